// ==========================================
// 任务装箱优化器 - CLI 主入口
// ==========================================
// 依据: Mission_Pack_Master_Spec.md
// 用途: 读取请求 JSON 文件,执行求解,输出响应 JSON
// 系统定位: 决策支持核心 (上层 App/服务负责采集与展示)
// ==========================================

use mission_packing::api::{PackingApi, SolveMissionRequest};
use mission_packing::sources::{StaticCandidateSource, StaticContainerSource};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志系统
    mission_packing::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 装备打包决策核心", mission_packing::APP_NAME);
    tracing::info!("系统版本: {}", mission_packing::VERSION);
    tracing::info!("==================================================");

    // 解析请求文件路径
    let Some(request_path) = std::env::args().nth(1) else {
        eprintln!("用法: mission-packing <request.json>");
        return ExitCode::from(2);
    };

    // 读取并解析请求
    let raw = match std::fs::read_to_string(&request_path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!("无法读取请求文件 {}: {}", request_path, err);
            return ExitCode::FAILURE;
        }
    };
    let request: SolveMissionRequest = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(err) => {
            tracing::error!("请求解析失败: {}", err);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        candidates_count = request.candidates.len(),
        containers_count = request.containers.len(),
        "请求加载完成"
    );

    // 内联请求不需要远程协作方,挂载空的静态来源
    let api = PackingApi::new(
        Arc::new(StaticCandidateSource::new(Vec::new())),
        Arc::new(StaticContainerSource::new(Vec::new())),
    );

    // 执行求解
    match api.solve_request(request).await {
        Ok(response) => {
            let json = serde_json::to_string_pretty(&response)
                .expect("响应序列化不应失败");
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("求解失败: {}", err);
            ExitCode::FAILURE
        }
    }
}

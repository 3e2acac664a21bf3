// ==========================================
// 任务装箱优化器 - PackingApi 业务接口
// ==========================================
// 依据: Packing_Api_Contract_v1.0.md
// 职责: 对外求解入口 - 拉取协作方数据 / 接收内联请求,
//       调用编排器,装配响应信封
// 红线: 求解本身同步单线程; 异步只存在于协作方 I/O 边界
// ==========================================

use crate::api::dto::{SolveMissionRequest, SolveMissionResponse};
use crate::api::error::ApiResult;
use crate::config::SolverSettings;
use crate::domain::constraints::MissionConstraints;
use crate::engine::orchestrator::PackingOrchestrator;
use crate::sources::{CandidateSource, ContainerSource};
use std::sync::Arc;
use tracing::info;

// ==========================================
// PackingApi - 求解业务接口
// ==========================================
pub struct PackingApi {
    candidate_source: Arc<dyn CandidateSource>,
    container_source: Arc<dyn ContainerSource>,
    orchestrator: PackingOrchestrator,
}

impl PackingApi {
    /// 构造函数
    ///
    /// # 参数
    /// - `candidate_source`: 外部语义检索方适配器
    /// - `container_source`: 容器定义来源
    pub fn new(
        candidate_source: Arc<dyn CandidateSource>,
        container_source: Arc<dyn ContainerSource>,
    ) -> Self {
        Self {
            candidate_source,
            container_source,
            orchestrator: PackingOrchestrator::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 求解内联请求 (候选与容器随请求体传入)
    pub async fn solve_request(
        &self,
        request: SolveMissionRequest,
    ) -> ApiResult<SolveMissionResponse> {
        let result = self.orchestrator.solve(
            request.candidates,
            request.containers,
            request.constraints,
            &request.settings,
        )?;
        Ok(SolveMissionResponse::from_result(result))
    }

    /// 按任务ID求解 (从协作方并发拉取候选与容器)
    ///
    /// # 参数
    /// - `mission_id`: 任务ID
    /// - `constraints`: 任务约束
    /// - `settings`: 搜索预算参数
    pub async fn solve_mission(
        &self,
        mission_id: &str,
        constraints: MissionConstraints,
        settings: SolverSettings,
    ) -> ApiResult<SolveMissionResponse> {
        info!(mission_id, "开始任务求解");

        let (candidates, containers) = futures::try_join!(
            self.candidate_source.fetch_ranked_candidates(mission_id),
            self.container_source.fetch_containers(mission_id),
        )?;

        info!(
            mission_id,
            candidates_count = candidates.len(),
            containers_count = containers.len(),
            "协作方数据拉取完成"
        );

        let result = self
            .orchestrator
            .solve(candidates, containers, constraints, &settings)?;
        Ok(SolveMissionResponse::from_result(result))
    }
}

// ==========================================
// 任务装箱优化器 - PackingApi DTO 定义
// ==========================================
// 依据: Packing_Api_Contract_v1.0.md
// 职责: 定义对外稳定的请求和响应结构
// ==========================================

use crate::config::SolverSettings;
use crate::domain::constraints::MissionConstraints;
use crate::domain::container::ContainerType;
use crate::domain::item::CandidateItem;
use crate::domain::solution::{
    ContainerUtilization, PackingAssignment, RejectedItem, SolveResult,
};
use crate::domain::types::SolveStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// 请求: solve_mission - 内联求解
// ==========================================

/// 求解请求 (候选与容器内联)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveMissionRequest {
    /// 候选物品列表 (必填,外部检索方已评分)
    pub candidates: Vec<CandidateItem>,

    /// 容器类型列表 (必填)
    pub containers: Vec<ContainerType>,

    /// 任务约束 (可选,缺省为无约束)
    #[serde(default)]
    pub constraints: MissionConstraints,

    /// 搜索预算 (平铺进请求体,缺省节点上限 200_000、无截止时间)
    #[serde(flatten)]
    pub settings: SolverSettings,
}

// ==========================================
// 响应: 求解结果信封
// ==========================================

/// 求解响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveMissionResponse {
    /// 响应ID (服务端生成)
    pub response_id: Uuid,

    /// 装配时间戳 (UTC)
    pub generated_at: DateTime<Utc>,

    /// 终态 ("OPTIMAL" | "FEASIBLE_RELAXED" | "DEGRADED_GREEDY" | "INFEASIBLE")
    pub status: SolveStatus,

    /// 装箱明细 (item_id, container_id, quantity_packed)
    pub assignments: Vec<PackingAssignment>,

    /// 实现效用 Σ(utility_score × quantity_packed)
    pub objective_value: f64,

    /// 按应用顺序排列的放宽约束组标签
    pub relaxed_constraints: Vec<String>,

    /// 落选候选及原因
    pub rejected_items: Vec<RejectedItem>,

    /// 分容器类型重量利用率
    pub container_utilization: Vec<ContainerUtilization>,

    /// 合计重量利用率
    pub aggregate_utilization: f64,

    /// 搜索诊断: 节点展开数合计
    pub nodes_expanded: u64,
}

impl SolveMissionResponse {
    /// 由内部 SolveResult 装配响应信封
    pub fn from_result(result: SolveResult) -> Self {
        Self {
            response_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            status: result.status,
            assignments: result.assignments,
            objective_value: result.objective_value,
            relaxed_constraints: result.relaxed_constraints,
            rejected_items: result.rejected_items,
            container_utilization: result.container_utilization,
            aggregate_utilization: result.aggregate_utilization,
            nodes_expanded: result.nodes_expanded,
        }
    }
}

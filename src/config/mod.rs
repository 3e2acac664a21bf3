// ==========================================
// 任务装箱优化器 - 求解参数配置
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - 搜索预算
// 职责: 定义单次求解的预算参数与默认值
// 红线: 搜索必须有界,上限缺省也要生效
// ==========================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 节点展开数上限默认值
pub const DEFAULT_NODE_EXPANSION_CEILING: u64 = 200_000;

// ==========================================
// SolverSettings - 求解参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// 单次求解调用的节点展开数上限
    /// 达到上限后降级为贪心路径,不是错误
    #[serde(default = "default_node_expansion_ceiling")]
    pub node_expansion_ceiling: u64,

    /// 调用方截止时间 (毫秒),节点展开间隙检查
    /// 到期中止并携带现任解降级,不是错误
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

fn default_node_expansion_ceiling() -> u64 {
    DEFAULT_NODE_EXPANSION_CEILING
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            node_expansion_ceiling: DEFAULT_NODE_EXPANSION_CEILING,
            deadline_ms: None,
        }
    }
}

impl SolverSettings {
    /// 截止时长 (若配置)
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

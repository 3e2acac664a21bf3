// ==========================================
// 任务装箱优化器 - 领域类型定义
// ==========================================
// 依据: Mission_Pack_Master_Spec.md - PART A2 红线
// 依据: Packing_Engine_Specs_v0.2.md - 求解状态体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 求解状态 (Solve Status)
// ==========================================
// 红线: 不可行是终态,不是异常
// 序列化格式: SCREAMING_SNAKE_CASE (与对外契约一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,        // 穷尽搜索完成,当前约束集下的全局最优
    FeasibleRelaxed, // 放宽部分约束后可行
    DegradedGreedy, // 搜索预算耗尽或全部放宽失败,贪心兜底
    Infeasible,     // 结构性不可行(任何容器都装不下任何候选)
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::FeasibleRelaxed => write!(f, "FEASIBLE_RELAXED"),
            SolveStatus::DegradedGreedy => write!(f, "DEGRADED_GREEDY"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
        }
    }
}

impl SolveStatus {
    /// 从字符串解析求解状态
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "OPTIMAL" => Some(SolveStatus::Optimal),
            "FEASIBLE_RELAXED" => Some(SolveStatus::FeasibleRelaxed),
            "DEGRADED_GREEDY" => Some(SolveStatus::DegradedGreedy),
            "INFEASIBLE" => Some(SolveStatus::Infeasible),
            _ => None,
        }
    }

    /// 是否产出了可用的装箱方案
    pub fn has_assignments(&self) -> bool {
        !matches!(self, SolveStatus::Infeasible)
    }
}

// ==========================================
// 放宽层级 (Relaxation Tier)
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - Relaxation Controller
// 红线: 放宽顺序固定,低优先级约束先放弃
// 顺序: Tier1 标签覆盖 → Tier2 降低品类下限 → Tier3 移除品类下限 → Tier4 移除全局限重
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelaxationTier {
    DropRequiredTags,       // Tier1: 放弃必备标签覆盖
    LowerCategoryMinimums,  // Tier2: 品类下限降至各自可达上限
    RemoveCategoryMinimums, // Tier3: 移除品类下限
    RemoveGlobalWeightCap,  // Tier4: 移除全局限重
}

impl RelaxationTier {
    /// 层级序号 (1-4)
    pub fn tier_no(&self) -> u8 {
        match self {
            RelaxationTier::DropRequiredTags => 1,
            RelaxationTier::LowerCategoryMinimums => 2,
            RelaxationTier::RemoveCategoryMinimums => 3,
            RelaxationTier::RemoveGlobalWeightCap => 4,
        }
    }

    /// 对外契约中的约束组标签
    ///
    /// # 返回
    /// relaxed_constraints 列表使用的稳定字符串
    pub fn label(&self) -> &'static str {
        match self {
            RelaxationTier::DropRequiredTags => "required_tags",
            RelaxationTier::LowerCategoryMinimums => "category_minimums_lowered",
            RelaxationTier::RemoveCategoryMinimums => "category_minimums_removed",
            RelaxationTier::RemoveGlobalWeightCap => "global_weight_cap",
        }
    }

    /// 全部层级,按固定放宽顺序
    pub fn all() -> [RelaxationTier; 4] {
        [
            RelaxationTier::DropRequiredTags,
            RelaxationTier::LowerCategoryMinimums,
            RelaxationTier::RemoveCategoryMinimums,
            RelaxationTier::RemoveGlobalWeightCap,
        ]
    }
}

impl fmt::Display for RelaxationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 拒绝原因 (Reject Reason)
// ==========================================
// 红线: 每个落选候选必须输出 reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    OverCapacity,                   // 装不下(单件超容量或容量竞争落选)
    RedundantCategorySatisfied,     // 品类下限已满足,冗余落选
    RelaxationTierDropped(u8),      // 所依赖的约束在第 N 层放宽中被放弃
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::OverCapacity => write!(f, "over_capacity"),
            RejectReason::RedundantCategorySatisfied => {
                write!(f, "redundant_category_satisfied")
            }
            RejectReason::RelaxationTierDropped(tier) => {
                write!(f, "relaxation_tier_{}_dropped", tier)
            }
        }
    }
}

impl RejectReason {
    /// 从字符串解析拒绝原因
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "over_capacity" => Some(RejectReason::OverCapacity),
            "redundant_category_satisfied" => Some(RejectReason::RedundantCategorySatisfied),
            _ => {
                let tier = s
                    .strip_prefix("relaxation_tier_")?
                    .strip_suffix("_dropped")?
                    .parse::<u8>()
                    .ok()?;
                Some(RejectReason::RelaxationTierDropped(tier))
            }
        }
    }
}

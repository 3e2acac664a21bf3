// ==========================================
// 任务装箱优化器 - 约束放宽控制引擎
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - Relaxation Controller
// 红线: 放宽顺序固定,低优先级约束先放弃
// 红线: 每次放宽必须记录,不得静默丢弃调用方意图
// ==========================================
// 职责: 求解不可行时按固定层级累进放宽并重试,
//       全部失败后贪心兜底
// 层级: 1) 放弃必备标签 2) 品类下限降至可达上限
//       3) 移除品类下限 4) 移除全局限重
// 无改动的层级跳过且不记录
// ==========================================

use crate::domain::constraints::MissionConstraints;
use crate::domain::container::ContainerCapacity;
use crate::domain::types::{RelaxationTier, SolveStatus};
use crate::engine::constraint_model::PackingInstance;
use crate::engine::greedy_filler::GreedyFiller;
use crate::engine::solver::{BranchBoundSolver, RawSolution, SearchVerdict};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

// ==========================================
// RelaxationOutcome - 放宽恢复结果
// ==========================================
#[derive(Debug, Clone)]
pub struct RelaxationOutcome {
    /// 恢复出的解; None 仅在结构性不可行时出现
    pub solution: Option<RawSolution>,
    pub status: SolveStatus,
    /// 实际应用的放宽层级,按应用顺序
    pub applied_tiers: Vec<RelaxationTier>,
    /// 最终生效的约束集
    pub effective_constraints: MissionConstraints,
    /// 本引擎内全部重试的节点展开数合计
    pub nodes_expanded: u64,
}

// ==========================================
// RelaxationController - 约束放宽控制引擎
// ==========================================
pub struct RelaxationController {
    solver: BranchBoundSolver,
    greedy: GreedyFiller,
}

impl RelaxationController {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            solver: BranchBoundSolver::new(),
            greedy: GreedyFiller::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 按固定层级累进放宽并重试求解
    ///
    /// 每个有实际改动的层级重新调用求解器 (各自享有完整节点上限,
    /// 截止时间为同一绝对时刻):
    /// - 穷尽且有解 → FeasibleRelaxed
    /// - 中断且有现任解 → DegradedGreedy (非最优信号优先)
    /// - 其余 → 继续下一层级
    /// 全部层级耗尽后贪心兜底; 兜底仍为空 → Infeasible
    ///
    /// # 参数
    /// - `instance`: 规范化问题实例
    /// - `node_ceiling`: 每次重试的节点展开数上限
    /// - `deadline`: 整个请求共享的绝对截止时间
    pub fn recover(
        &self,
        instance: &PackingInstance,
        node_ceiling: u64,
        deadline: Option<Instant>,
    ) -> RelaxationOutcome {
        let mut effective = instance.constraints.clone();
        let mut applied_tiers: Vec<RelaxationTier> = Vec::new();
        let mut nodes_expanded: u64 = 0;

        for tier in RelaxationTier::all() {
            let Some(relaxed) = apply_tier(tier, &effective, instance) else {
                continue;
            };
            effective = relaxed;
            applied_tiers.push(tier);

            info!(
                tier = tier.tier_no(),
                label = tier.label(),
                "应用放宽层级后重试求解"
            );
            let outcome = self
                .solver
                .solve(instance, &effective, node_ceiling, deadline);
            nodes_expanded += outcome.nodes_expanded;

            match outcome.verdict {
                SearchVerdict::Complete(Some(solution)) => {
                    return RelaxationOutcome {
                        solution: Some(solution),
                        status: SolveStatus::FeasibleRelaxed,
                        applied_tiers,
                        effective_constraints: effective,
                        nodes_expanded,
                    };
                }
                SearchVerdict::Aborted {
                    incumbent: Some(solution),
                    ..
                } => {
                    return RelaxationOutcome {
                        solution: Some(solution),
                        status: SolveStatus::DegradedGreedy,
                        applied_tiers,
                        effective_constraints: effective,
                        nodes_expanded,
                    };
                }
                // 仍不可行或预算耗尽无解: 继续放宽
                SearchVerdict::Complete(None) | SearchVerdict::Aborted { .. } => {}
            }
        }

        // 全部层级耗尽: 贪心兜底
        debug!("全部放宽层级耗尽,进入贪心兜底");
        let fallback = self.greedy.fill(instance, &effective);
        if fallback.total_units() == 0 {
            // 结构性不可行: 任何容器都装不下任何候选
            return RelaxationOutcome {
                solution: None,
                status: SolveStatus::Infeasible,
                applied_tiers,
                effective_constraints: effective,
                nodes_expanded,
            };
        }

        RelaxationOutcome {
            solution: Some(fallback),
            status: SolveStatus::DegradedGreedy,
            applied_tiers,
            effective_constraints: effective,
            nodes_expanded,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for RelaxationController {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 层级应用
// ==========================================

/// 应用单个放宽层级
///
/// # 返回
/// - `Some(constraints)`: 放宽后的约束集
/// - `None`: 该层级对当前约束集无实际改动,跳过且不记录
fn apply_tier(
    tier: RelaxationTier,
    current: &MissionConstraints,
    instance: &PackingInstance,
) -> Option<MissionConstraints> {
    match tier {
        RelaxationTier::DropRequiredTags => {
            if current.required_tags.is_empty() {
                return None;
            }
            let mut relaxed = current.clone();
            relaxed.required_tags = BTreeSet::new();
            Some(relaxed)
        }
        RelaxationTier::LowerCategoryMinimums => {
            if current.category_minimums.is_empty() {
                return None;
            }
            let mut changed = false;
            let mut relaxed = current.clone();
            for (category, minimum) in relaxed.category_minimums.iter_mut() {
                let achievable = achievable_distinct(instance, category);
                if achievable < *minimum {
                    *minimum = achievable;
                    changed = true;
                }
            }
            changed.then_some(relaxed)
        }
        RelaxationTier::RemoveCategoryMinimums => {
            if current.category_minimums.is_empty() {
                return None;
            }
            let mut relaxed = current.clone();
            relaxed.category_minimums.clear();
            Some(relaxed)
        }
        RelaxationTier::RemoveGlobalWeightCap => {
            current.global_weight_cap_grams?;
            let mut relaxed = current.clone();
            relaxed.global_weight_cap_grams = None;
            Some(relaxed)
        }
    }
}

/// 指定品类独立可达的不同物品数
///
/// 只看单实体容量可行性 (不考虑其他约束与容量竞争),
/// 品类下限降档与落选原因判定共用该口径
pub(crate) fn achievable_distinct(instance: &PackingInstance, category: &str) -> u32 {
    instance
        .items
        .iter()
        .filter(|item| {
            item.category == category
                && instance
                    .containers
                    .iter()
                    .any(|c| c.can_hold_unit(item.weight_grams))
        })
        .count() as u32
}

// ==========================================
// 任务装箱优化器 - 结果装配引擎
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - Result Assembler
// 依据: Mission_Pack_Master_Spec.md - PART A3 可解释性
// ==========================================
// 职责: 把内部解投影为对外 SolveResult
// 红线: 无状态引擎,所有方法都是纯函数,不含任何搜索逻辑
// 红线: 每个落选候选必须输出 reason
// ==========================================

use crate::domain::constraints::MissionConstraints;
use crate::domain::container::ContainerCapacity;
use crate::domain::solution::{
    ContainerUtilization, PackingAssignment, RejectedItem, SolveResult,
};
use crate::domain::types::{RejectReason, RelaxationTier, SolveStatus};
use crate::engine::constraint_model::PackingInstance;
use crate::engine::relaxation::achievable_distinct;
use crate::engine::solver::RawSolution;

// ==========================================
// ResultAssembler - 结果装配引擎
// ==========================================
pub struct ResultAssembler;

impl ResultAssembler {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 装配对外求解结果
    ///
    /// # 参数
    /// - `instance`: 规范化问题实例 (含原始约束)
    /// - `solution`: 内部解; None 表示结构性不可行
    /// - `status`: 终态
    /// - `applied_tiers`: 实际应用的放宽层级,按应用顺序
    /// - `effective_constraints`: 最终生效的约束集
    /// - `nodes_expanded`: 全部求解调用的节点展开数合计
    pub fn assemble(
        &self,
        instance: &PackingInstance,
        solution: Option<&RawSolution>,
        status: SolveStatus,
        applied_tiers: &[RelaxationTier],
        effective_constraints: &MissionConstraints,
        nodes_expanded: u64,
    ) -> SolveResult {
        let assignments = self.build_assignments(instance, solution);
        let objective_value = self.compute_objective(instance, solution);
        let (container_utilization, aggregate_utilization) =
            self.compute_utilization(instance, solution);
        let rejected_items = self.build_rejected_items(
            instance,
            solution,
            applied_tiers,
            effective_constraints,
        );

        SolveResult {
            status,
            assignments,
            objective_value,
            relaxed_constraints: applied_tiers
                .iter()
                .map(|t| t.label().to_string())
                .collect(),
            rejected_items,
            container_utilization,
            aggregate_utilization,
            nodes_expanded,
        }
    }

    // ==========================================
    // 装箱明细
    // ==========================================

    /// 展开 (item, container_type) 件数明细,保持规范顺序
    fn build_assignments(
        &self,
        instance: &PackingInstance,
        solution: Option<&RawSolution>,
    ) -> Vec<PackingAssignment> {
        let Some(solution) = solution else {
            return Vec::new();
        };

        let mut assignments = Vec::new();
        for (item_idx, item) in instance.items.iter().enumerate() {
            for (container_idx, container) in instance.containers.iter().enumerate() {
                let quantity = solution.quantities[item_idx][container_idx];
                if quantity > 0 {
                    assignments.push(PackingAssignment {
                        item_id: item.item_id.clone(),
                        container_id: container.container_id.clone(),
                        quantity_packed: quantity,
                    });
                }
            }
        }
        assignments
    }

    /// 实现效用 = Σ(utility_score × quantity_packed)
    fn compute_objective(
        &self,
        instance: &PackingInstance,
        solution: Option<&RawSolution>,
    ) -> f64 {
        let Some(solution) = solution else {
            return 0.0;
        };
        instance
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| item.utility_score * solution.item_total(idx) as f64)
            .sum()
    }

    // ==========================================
    // 利用率统计
    // ==========================================

    /// 分容器类型与合计的重量利用率
    fn compute_utilization(
        &self,
        instance: &PackingInstance,
        solution: Option<&RawSolution>,
    ) -> (Vec<ContainerUtilization>, f64) {
        let mut per_container = Vec::with_capacity(instance.containers.len());
        let mut total_packed = 0.0f64;
        let mut total_capacity = 0.0f64;

        for (container_idx, container) in instance.containers.iter().enumerate() {
            let packed_weight: f64 = match solution {
                Some(solution) => instance
                    .items
                    .iter()
                    .enumerate()
                    .map(|(item_idx, item)| {
                        solution.quantities[item_idx][container_idx] as f64
                            * item.weight_grams
                    })
                    .sum(),
                None => 0.0,
            };
            let pooled = container.pooled_capacity_grams();
            total_packed += packed_weight;
            total_capacity += pooled;

            per_container.push(ContainerUtilization {
                container_id: container.container_id.clone(),
                packed_weight_grams: packed_weight,
                pooled_capacity_grams: pooled,
                weight_utilization: packed_weight / pooled,
            });
        }

        let aggregate = if total_capacity > 0.0 {
            total_packed / total_capacity
        } else {
            0.0
        };
        (per_container, aggregate)
    }

    // ==========================================
    // 落选候选
    // ==========================================

    /// 为每个未装入的候选判定拒绝原因
    ///
    /// 判定优先级 (确定性投影):
    /// 1) 生效约束下装不进任何容器 → over_capacity
    /// 2) 携带被第1层放弃的必备标签 → relaxation_tier_1_dropped
    /// 3) 所属品类下限被第3层移除 → relaxation_tier_3_dropped
    /// 4) 所属品类下限被第2层降档 → relaxation_tier_2_dropped
    /// 5) 所属品类下限已由其他物品满足 → redundant_category_satisfied
    /// 6) 其余 (容量竞争落选) → over_capacity
    fn build_rejected_items(
        &self,
        instance: &PackingInstance,
        solution: Option<&RawSolution>,
        applied_tiers: &[RelaxationTier],
        effective_constraints: &MissionConstraints,
    ) -> Vec<RejectedItem> {
        let original = &instance.constraints;
        let tier_applied =
            |tier: RelaxationTier| applied_tiers.iter().any(|t| *t == tier);

        let mut rejected = Vec::new();
        for (item_idx, item) in instance.items.iter().enumerate() {
            let packed = solution.map(|s| s.item_total(item_idx)).unwrap_or(0);
            if packed > 0 {
                continue;
            }

            let fits_somewhere = instance
                .containers
                .iter()
                .any(|c| c.can_hold_unit(item.weight_grams))
                && effective_constraints
                    .global_weight_cap_grams
                    .map(|cap| item.weight_grams <= cap)
                    .unwrap_or(true);

            let reason = if !fits_somewhere {
                RejectReason::OverCapacity
            } else if tier_applied(RelaxationTier::DropRequiredTags)
                && item.tags.iter().any(|t| original.required_tags.contains(t))
            {
                RejectReason::RelaxationTierDropped(1)
            } else if tier_applied(RelaxationTier::RemoveCategoryMinimums)
                && original.category_minimums.contains_key(&item.category)
            {
                RejectReason::RelaxationTierDropped(3)
            } else if tier_applied(RelaxationTier::LowerCategoryMinimums)
                && original
                    .category_minimums
                    .get(&item.category)
                    .map(|minimum| achievable_distinct(instance, &item.category) < *minimum)
                    .unwrap_or(false)
            {
                RejectReason::RelaxationTierDropped(2)
            } else if self.category_minimum_satisfied(
                instance,
                solution,
                effective_constraints,
                &item.category,
            ) {
                RejectReason::RedundantCategorySatisfied
            } else {
                RejectReason::OverCapacity
            };

            rejected.push(RejectedItem {
                item_id: item.item_id.clone(),
                reason: reason.to_string(),
            });
        }
        rejected
    }

    /// 所属品类在生效约束下存在下限且已被满足
    fn category_minimum_satisfied(
        &self,
        instance: &PackingInstance,
        solution: Option<&RawSolution>,
        effective_constraints: &MissionConstraints,
        category: &str,
    ) -> bool {
        let Some(minimum) = effective_constraints.category_minimums.get(category) else {
            return false;
        };
        let Some(solution) = solution else {
            return false;
        };

        let distinct_packed = instance
            .items
            .iter()
            .enumerate()
            .filter(|(idx, item)| item.category == category && solution.item_total(*idx) > 0)
            .count() as u32;
        distinct_packed >= *minimum
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 任务装箱优化器 - 贪心兜底填充引擎
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - Relaxation Controller 兜底
// 红线: 容量约束优先于效用得分 (兜底路径同样不得超容)
// ==========================================
// 职责: 纯重量贪心装填,放宽全部失败或搜索预算耗尽
//       且无现任解时使用
// 规则: 候选按规范顺序逐件装入首个仍有余量的容器类型
// 输出: RawSolution (可能为空, 空即结构性不可行)
// ==========================================

use crate::domain::constraints::MissionConstraints;
use crate::domain::container::ContainerCapacity;
use crate::engine::constraint_model::PackingInstance;
use crate::engine::solver::RawSolution;
use tracing::debug;

/// 重量/容量比较的浮点容差 (克)
const WEIGHT_EPS: f64 = 1e-6;

// ==========================================
// GreedyFiller - 贪心兜底填充引擎
// ==========================================
// 无状态引擎,不需要注入依赖
pub struct GreedyFiller;

impl GreedyFiller {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 纯重量贪心装填
    ///
    /// 忽略标签覆盖与品类下限,只尊重容量:
    /// 单实体容量 (can_hold_unit)、类型合并容量、
    /// 以及生效约束集中仍存在的全局限重
    ///
    /// # 参数
    /// - `instance`: 规范化问题实例
    /// - `constraints`: 生效约束集 (只读取 global_weight_cap_grams)
    ///
    /// # 返回
    /// RawSolution: quantities 全 0 表示任何容器都装不下任何候选
    pub fn fill(
        &self,
        instance: &PackingInstance,
        constraints: &MissionConstraints,
    ) -> RawSolution {
        let n = instance.items.len();
        let m = instance.containers.len();

        let mut quantities = vec![vec![0u32; m]; n];
        let mut used_weight = vec![0.0f64; m];
        let mut total_weight = 0.0f64;
        let mut objective = 0.0f64;
        let mut units_packed: u64 = 0;

        for (item_idx, item) in instance.items.iter().enumerate() {
            for _unit in 0..item.available_quantity {
                // 全局限重门控
                if let Some(cap) = constraints.global_weight_cap_grams {
                    if total_weight + item.weight_grams > cap + WEIGHT_EPS {
                        break;
                    }
                }

                // 首个仍有余量的容器类型
                let slot = instance.containers.iter().enumerate().find(
                    |(container_idx, container)| {
                        container.can_hold_unit(item.weight_grams)
                            && used_weight[*container_idx] + item.weight_grams
                                <= container.pooled_capacity_grams() + WEIGHT_EPS
                    },
                );

                match slot {
                    Some((container_idx, _)) => {
                        quantities[item_idx][container_idx] += 1;
                        used_weight[container_idx] += item.weight_grams;
                        total_weight += item.weight_grams;
                        objective += item.utility_score;
                        units_packed += 1;
                    }
                    // 该物品已无处可放,后续更轻的候选仍可能装入
                    None => break,
                }
            }
        }

        debug!(
            units_packed,
            total_weight, objective, "贪心兜底装填完成"
        );

        RawSolution {
            quantities,
            objective,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for GreedyFiller {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constraints::MissionConstraints;
    use crate::domain::container::ContainerType;
    use crate::domain::item::CandidateItem;
    use crate::engine::constraint_model::ConstraintModeler;
    use std::collections::BTreeSet;

    fn item(id: &str, score: f64, weight: f64, quantity: u32) -> CandidateItem {
        CandidateItem {
            item_id: id.to_string(),
            utility_score: score,
            weight_grams: weight,
            category: "general".to_string(),
            tags: BTreeSet::new(),
            available_quantity: quantity,
        }
    }

    fn instance(
        items: Vec<CandidateItem>,
        containers: Vec<ContainerType>,
    ) -> PackingInstance {
        ConstraintModeler::new()
            .build(items, containers, MissionConstraints::default())
            .unwrap()
    }

    #[test]
    fn test_greedy_first_fit_in_canonical_order() {
        let instance = instance(
            vec![item("A", 0.9, 3000.0, 2), item("B", 0.5, 2000.0, 1)],
            vec![ContainerType {
                container_id: "BAG".to_string(),
                capacity_grams: 7000.0,
                unit_count: 1,
            }],
        );

        let solution = GreedyFiller::new().fill(&instance, &instance.constraints);
        // A 两件 (6000g) 先装,B 装不下
        assert_eq!(solution.quantities[0][0], 2);
        assert_eq!(solution.quantities[1][0], 0);
        assert!((solution.objective - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_greedy_structurally_impossible_packs_nothing() {
        let instance = instance(
            vec![item("A", 0.9, 5000.0, 1)],
            vec![ContainerType {
                container_id: "POUCH".to_string(),
                capacity_grams: 1000.0,
                unit_count: 1,
            }],
        );

        let solution = GreedyFiller::new().fill(&instance, &instance.constraints);
        assert!(solution.quantities.iter().flatten().all(|&q| q == 0));
        assert_eq!(solution.objective, 0.0);
    }

    #[test]
    fn test_greedy_respects_global_cap() {
        let mut constraints = MissionConstraints::default();
        constraints.global_weight_cap_grams = Some(2500.0);
        let instance = ConstraintModeler::new()
            .build(
                vec![item("A", 0.9, 1000.0, 5)],
                vec![ContainerType {
                    container_id: "BAG".to_string(),
                    capacity_grams: 10000.0,
                    unit_count: 1,
                }],
                constraints,
            )
            .unwrap();

        let solution = GreedyFiller::new().fill(&instance, &instance.constraints);
        assert_eq!(solution.quantities[0][0], 2);
    }
}

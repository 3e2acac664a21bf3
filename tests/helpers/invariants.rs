// ==========================================
// 装箱不变量断言 - 用于集成测试
// ==========================================
// 不变量:
// 1) 单物品跨容器类型件数合计 <= available_quantity
// 2) 单容器类型装载重量 <= capacity_grams × unit_count
// 3) 明细只引用已知物品/容器且件数 > 0
// ==========================================

use mission_packing::domain::container::{ContainerCapacity, ContainerType};
use mission_packing::domain::item::CandidateItem;
use mission_packing::domain::solution::SolveResult;

/// 校验求解结果满足容量与件数不变量
pub fn assert_packing_invariants(
    result: &SolveResult,
    items: &[CandidateItem],
    containers: &[ContainerType],
) {
    // 件数不变量
    for item in items {
        let packed = result.packed_quantity_of(&item.item_id);
        assert!(
            packed <= item.available_quantity,
            "物品 {} 装入 {} 件, 超过可用 {} 件",
            item.item_id,
            packed,
            item.available_quantity
        );
    }

    // 容量不变量 (按类型池化)
    for container in containers {
        let packed_weight: f64 = result
            .assignments
            .iter()
            .filter(|a| a.container_id == container.container_id)
            .map(|a| {
                let weight = items
                    .iter()
                    .find(|i| i.item_id == a.item_id)
                    .map(|i| i.weight_grams)
                    .expect("明细引用了未知物品");
                a.quantity_packed as f64 * weight
            })
            .sum();
        assert!(
            packed_weight <= container.pooled_capacity_grams() + 1e-6,
            "容器类型 {} 装载 {}g, 超过合并容量 {}g",
            container.container_id,
            packed_weight,
            container.pooled_capacity_grams()
        );
    }

    // 明细合法性
    for assignment in &result.assignments {
        assert!(assignment.quantity_packed > 0, "明细不应包含 0 件记录");
        assert!(
            containers
                .iter()
                .any(|c| c.container_id == assignment.container_id),
            "明细引用了未知容器类型 {}",
            assignment.container_id
        );
    }
}

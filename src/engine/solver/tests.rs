// ==========================================
// 分支定界搜索单元测试
// ==========================================
// 测试目标: 验证精确搜索的可行性判定与剪枝正确性
// ==========================================

use crate::domain::constraints::MissionConstraints;
use crate::domain::container::ContainerType;
use crate::domain::item::CandidateItem;
use crate::engine::constraint_model::{ConstraintModeler, PackingInstance};
use crate::engine::solver::{BranchBoundSolver, SearchVerdict};
use std::collections::BTreeSet;

// ==========================================
// 测试辅助函数
// ==========================================

fn item(id: &str, score: f64, weight: f64) -> CandidateItem {
    CandidateItem {
        item_id: id.to_string(),
        utility_score: score,
        weight_grams: weight,
        category: "general".to_string(),
        tags: BTreeSet::new(),
        available_quantity: 1,
    }
}

fn item_full(
    id: &str,
    score: f64,
    weight: f64,
    category: &str,
    tags: &[&str],
    quantity: u32,
) -> CandidateItem {
    CandidateItem {
        item_id: id.to_string(),
        utility_score: score,
        weight_grams: weight,
        category: category.to_string(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        available_quantity: quantity,
    }
}

fn container(id: &str, capacity: f64, units: u32) -> ContainerType {
    ContainerType {
        container_id: id.to_string(),
        capacity_grams: capacity,
        unit_count: units,
    }
}

fn build_instance(
    items: Vec<CandidateItem>,
    containers: Vec<ContainerType>,
    constraints: MissionConstraints,
) -> PackingInstance {
    ConstraintModeler::new()
        .build(items, containers, constraints)
        .unwrap()
}

fn solve_optimal(instance: &PackingInstance) -> (f64, u64) {
    let outcome = BranchBoundSolver::new().solve(
        instance,
        &instance.constraints,
        200_000,
        None,
    );
    match outcome.verdict {
        SearchVerdict::Complete(Some(solution)) => {
            (solution.objective, outcome.nodes_expanded)
        }
        other => panic!("期望穷尽且有解, 实际 {:?}", other),
    }
}

// ==========================================
// 测试用例: 效用最大化优于单件高分
// ==========================================

#[test]
fn test_prefers_combined_utility_over_single_heavy_item() {
    // 单容器 6000g: 2000g/0.9 + 3000g/0.8 (=1.7) 优于 5000g/0.95
    let instance = build_instance(
        vec![
            item("LIGHT", 0.9, 2000.0),
            item("MEDIUM", 0.8, 3000.0),
            item("HEAVY", 0.95, 5000.0),
        ],
        vec![container("PACK", 6000.0, 1)],
        MissionConstraints::default(),
    );

    let (objective, _) = solve_optimal(&instance);
    assert!((objective - 1.7).abs() < 1e-9, "应选择两件轻物品组合");
}

// ==========================================
// 测试用例: 多件数与跨容器分配
// ==========================================

#[test]
fn test_multi_quantity_spreads_across_container_types() {
    // 4 件 900g,单容器实体只装 1 件,两个类型合计 3 实体
    let instance = build_instance(
        vec![item_full("RATION", 0.6, 900.0, "food", &[], 4)],
        vec![container("BAG_A", 1000.0, 2), container("BAG_B", 1000.0, 1)],
        MissionConstraints::default(),
    );

    let outcome = BranchBoundSolver::new().solve(
        &instance,
        &instance.constraints,
        200_000,
        None,
    );
    let solution = match outcome.verdict {
        SearchVerdict::Complete(Some(solution)) => solution,
        other => panic!("期望穷尽且有解, 实际 {:?}", other),
    };

    // 合并容量允许 3 件 (2000g + 1000g 按类型池化)
    assert_eq!(solution.total_units(), 3);
    assert!((solution.objective - 1.8).abs() < 1e-9);
    // 任一类型都不得超池化容量
    assert!(solution.quantities[0][0] <= 2);
    assert!(solution.quantities[0][1] <= 1);
}

// ==========================================
// 测试用例: 单实体容量门控
// ==========================================

#[test]
fn test_unit_must_fit_single_container_instance() {
    // 合并容量 3000g,但单实体 1000g 装不下 2500g 物品
    let instance = build_instance(
        vec![item("BULKY", 0.9, 2500.0)],
        vec![container("POUCH", 1000.0, 3)],
        MissionConstraints::default(),
    );

    let outcome = BranchBoundSolver::new().solve(
        &instance,
        &instance.constraints,
        200_000,
        None,
    );
    assert!(
        matches!(outcome.verdict, SearchVerdict::Complete(None)),
        "单件超单实体容量应不可行"
    );
}

// ==========================================
// 测试用例: 品类下限按不同物品计数
// ==========================================

#[test]
fn test_category_minimum_counts_distinct_items_not_units() {
    let mut constraints = MissionConstraints::default();
    constraints.category_minimums.insert("medical".to_string(), 2);

    // 高分物品 5 件也只算 1 个不同物品,必须带上第二个 medical
    let instance = build_instance(
        vec![
            item_full("KIT_A", 0.9, 500.0, "medical", &[], 5),
            item_full("KIT_B", 0.2, 500.0, "medical", &[], 1),
            item_full("TOOL", 0.8, 500.0, "tools", &[], 1),
        ],
        vec![container("PACK", 3500.0, 1)],
        constraints,
    );

    let outcome = BranchBoundSolver::new().solve(
        &instance,
        &instance.constraints,
        200_000,
        None,
    );
    let solution = match outcome.verdict {
        SearchVerdict::Complete(Some(solution)) => solution,
        other => panic!("期望穷尽且有解, 实际 {:?}", other),
    };

    // KIT_B 必须在方案中 (KIT_A 多件不满足下限 2)
    let kit_b_idx = instance
        .items
        .iter()
        .position(|i| i.item_id == "KIT_B")
        .unwrap();
    assert!(solution.item_total(kit_b_idx) > 0, "品类下限必须由不同物品满足");
}

// ==========================================
// 测试用例: 必备标签覆盖
// ==========================================

#[test]
fn test_required_tag_forces_low_utility_carrier() {
    let mut constraints = MissionConstraints::default();
    constraints.required_tags.insert("tourniquet".to_string());

    let instance = build_instance(
        vec![
            item_full("FANCY", 0.95, 900.0, "tools", &[], 1),
            item_full("TQ", 0.1, 200.0, "medical", &["tourniquet"], 1),
        ],
        vec![container("POUCH", 1000.0, 1)],
        constraints,
    );

    let outcome = BranchBoundSolver::new().solve(
        &instance,
        &instance.constraints,
        200_000,
        None,
    );
    let solution = match outcome.verdict {
        SearchVerdict::Complete(Some(solution)) => solution,
        other => panic!("期望穷尽且有解, 实际 {:?}", other),
    };

    // 容量不够同时装两件,覆盖约束强制携带 TQ,放弃高分 FANCY
    let tq_idx = instance.items.iter().position(|i| i.item_id == "TQ").unwrap();
    assert!(solution.item_total(tq_idx) > 0);
}

#[test]
fn test_uncoverable_required_tag_is_infeasible() {
    let mut constraints = MissionConstraints::default();
    constraints.required_tags.insert("tourniquet".to_string());

    let instance = build_instance(
        vec![item("PLAIN", 0.9, 500.0)],
        vec![container("PACK", 5000.0, 1)],
        constraints,
    );

    let outcome = BranchBoundSolver::new().solve(
        &instance,
        &instance.constraints,
        200_000,
        None,
    );
    assert!(matches!(outcome.verdict, SearchVerdict::Complete(None)));
}

// ==========================================
// 测试用例: 全局限重
// ==========================================

#[test]
fn test_global_weight_cap_tightens_packing() {
    let mut constraints = MissionConstraints::default();
    constraints.global_weight_cap_grams = Some(2500.0);

    let instance = build_instance(
        vec![
            item("A", 0.9, 2000.0),
            item("B", 0.8, 2000.0),
        ],
        vec![container("BAG_A", 2000.0, 1), container("BAG_B", 2000.0, 1)],
        constraints,
    );

    let (objective, _) = solve_optimal(&instance);
    // 容器各装一件放得下,但全局限重只允许一件
    assert!((objective - 0.9).abs() < 1e-9);
}

// ==========================================
// 测试用例: 空方案不是解
// ==========================================

#[test]
fn test_structurally_impossible_yields_infeasible_not_empty_optimal() {
    let instance = build_instance(
        vec![item("BOULDER", 0.9, 5000.0)],
        vec![container("POUCH", 1000.0, 1)],
        MissionConstraints::default(),
    );

    let outcome = BranchBoundSolver::new().solve(
        &instance,
        &instance.constraints,
        200_000,
        None,
    );
    assert!(matches!(outcome.verdict, SearchVerdict::Complete(None)));
}

// ==========================================
// 测试用例: 节点上限中止
// ==========================================

#[test]
fn test_node_ceiling_aborts_search() {
    let items: Vec<CandidateItem> = (0..12)
        .map(|i| {
            item_full(
                &format!("ITEM{:02}", i),
                0.5 + (i as f64) * 0.01,
                100.0 + i as f64,
                "general",
                &[],
                3,
            )
        })
        .collect();
    let instance = build_instance(
        items,
        vec![container("BAG_A", 1500.0, 2), container("BAG_B", 900.0, 1)],
        MissionConstraints::default(),
    );

    let outcome = BranchBoundSolver::new().solve(&instance, &instance.constraints, 50, None);
    match outcome.verdict {
        SearchVerdict::Aborted { .. } => {
            assert!(outcome.nodes_expanded <= 51, "中止后不应继续展开节点");
        }
        other => panic!("期望预算耗尽中止, 实际 {:?}", other),
    }
}

// ==========================================
// 测试用例: 确定性
// ==========================================

#[test]
fn test_identical_input_identical_outcome() {
    let build = || {
        build_instance(
            vec![
                item_full("A", 0.8, 1000.0, "tools", &["cut"], 2),
                item_full("B", 0.8, 1000.0, "tools", &["cut"], 2),
                item_full("C", 0.7, 600.0, "food", &[], 3),
            ],
            vec![container("BAG", 3000.0, 1)],
            MissionConstraints::default(),
        )
    };

    let first = build();
    let second = build();
    let solver = BranchBoundSolver::new();
    let outcome_a = solver.solve(&first, &first.constraints, 200_000, None);
    let outcome_b = solver.solve(&second, &second.constraints, 200_000, None);
    assert_eq!(outcome_a, outcome_b, "相同输入必须产生相同结果");
}

// ==========================================
// 任务装箱优化器 - 约束建模引擎
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - Constraint Model
// 红线: 校验失败必须在搜索开始前返回
// 红线: 相同输入必须产生相同结果 (排序键显式、完备)
// ==========================================
// 职责: 输入校验 + 规范化为不可变问题实例
// 输入: 原始候选列表 + 容器列表 + 任务约束
// 输出: PackingInstance (候选按效用降序规范排序)
// ==========================================

use crate::domain::constraints::MissionConstraints;
use crate::domain::container::ContainerType;
use crate::domain::item::CandidateItem;
use crate::engine::error::{EngineResult, SolveError};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

// ==========================================
// PackingInstance - 规范化问题实例
// ==========================================
// 生命周期: 单次求解 (含放宽重试) 期间只读共享,求解结束后丢弃
#[derive(Debug, Clone)]
pub struct PackingInstance {
    // ===== 候选 (规范顺序) =====
    // 排序键: utility_score 降序 → weight_grams 升序 → item_id 升序
    pub items: Vec<CandidateItem>,

    // ===== 容器 (规范顺序) =====
    // 排序键: container_id 升序
    pub containers: Vec<ContainerType>,

    // ===== 任务约束 =====
    pub constraints: MissionConstraints,
}

// ==========================================
// ConstraintModeler - 约束建模引擎
// ==========================================
// 无状态引擎,不需要注入依赖
pub struct ConstraintModeler;

impl ConstraintModeler {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 校验并规范化问题实例
    ///
    /// 校验规则:
    /// 1) 容器: capacity_grams 有限且 > 0, unit_count >= 1, ID 不重复
    /// 2) 物品: weight_grams 有限且 > 0, utility_score ∈ [0,1],
    ///    available_quantity >= 1, ID 不重复
    /// 3) 全局限重: 若存在则有限且 > 0
    /// 4) 品类下限指向的品类必须存在于至少一个候选
    ///    (必备标签无承载候选不在此列: 由 Relaxation Controller 第1层处理)
    ///
    /// # 参数
    /// - `candidates`: 候选物品列表 (外部检索方已排名,此处重建规范顺序)
    /// - `containers`: 容器类型列表
    /// - `constraints`: 任务约束
    ///
    /// # 返回
    /// 规范化的 PackingInstance,或首个命中的校验错误
    pub fn build(
        &self,
        candidates: Vec<CandidateItem>,
        containers: Vec<ContainerType>,
        constraints: MissionConstraints,
    ) -> EngineResult<PackingInstance> {
        // 1. 容器校验
        let mut seen_containers: BTreeSet<&str> = BTreeSet::new();
        for container in &containers {
            if !container.capacity_grams.is_finite() || container.capacity_grams <= 0.0 {
                return Err(SolveError::NonPositiveCapacity {
                    container_id: container.container_id.clone(),
                    capacity_grams: container.capacity_grams,
                });
            }
            if container.unit_count == 0 {
                return Err(SolveError::InvalidUnitCount {
                    container_id: container.container_id.clone(),
                });
            }
            if !seen_containers.insert(container.container_id.as_str()) {
                return Err(SolveError::DuplicateContainerId(
                    container.container_id.clone(),
                ));
            }
        }

        // 2. 物品校验
        let mut seen_items: BTreeSet<&str> = BTreeSet::new();
        for item in &candidates {
            if !item.weight_grams.is_finite() || item.weight_grams <= 0.0 {
                return Err(SolveError::NonPositiveWeight {
                    item_id: item.item_id.clone(),
                    weight_grams: item.weight_grams,
                });
            }
            if !item.utility_score.is_finite()
                || item.utility_score < 0.0
                || item.utility_score > 1.0
            {
                return Err(SolveError::UtilityOutOfRange {
                    item_id: item.item_id.clone(),
                    utility_score: item.utility_score,
                });
            }
            if item.available_quantity == 0 {
                return Err(SolveError::InvalidQuantity {
                    item_id: item.item_id.clone(),
                });
            }
            if !seen_items.insert(item.item_id.as_str()) {
                return Err(SolveError::DuplicateItemId(item.item_id.clone()));
            }
        }

        // 3. 全局限重校验
        if let Some(cap) = constraints.global_weight_cap_grams {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(SolveError::NonPositiveGlobalCap(cap));
            }
        }

        // 4. 品类下限指向性校验
        let known_categories: BTreeSet<&str> =
            candidates.iter().map(|i| i.category.as_str()).collect();
        let unknown: Vec<String> = constraints
            .category_minimums
            .keys()
            .filter(|c| !known_categories.contains(c.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(SolveError::UnknownCategories {
                categories: unknown,
            });
        }

        // 5. 规范排序
        let mut items = candidates;
        items.sort_by(Self::compare_canonical);

        let mut containers = containers;
        containers.sort_by(|a, b| a.container_id.cmp(&b.container_id));

        debug!(
            items_count = items.len(),
            containers_count = containers.len(),
            category_minimums = constraints.category_minimums.len(),
            required_tags = constraints.required_tags.len(),
            "问题实例规范化完成"
        );

        Ok(PackingInstance {
            items,
            containers,
            constraints,
        })
    }

    // ==========================================
    // 比较方法
    // ==========================================

    /// 候选规范顺序比较
    ///
    /// 按3键依次比较:
    /// 1. utility_score 降序
    /// 2. weight_grams 升序 (同分更轻优先,装得更密)
    /// 3. item_id 升序 (兜底,保证全序)
    fn compare_canonical(a: &CandidateItem, b: &CandidateItem) -> Ordering {
        match b.utility_score.total_cmp(&a.utility_score) {
            Ordering::Equal => {}
            other => return other,
        }

        match a.weight_grams.total_cmp(&b.weight_grams) {
            Ordering::Equal => {}
            other => return other,
        }

        a.item_id.cmp(&b.item_id)
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ConstraintModeler {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use mission_packing::domain::constraints::MissionConstraints;
use mission_packing::domain::container::ContainerType;
use mission_packing::domain::item::CandidateItem;
use std::collections::BTreeSet;

// ==========================================
// CandidateItem 构建器
// ==========================================

pub struct ItemBuilder {
    item_id: String,
    utility_score: f64,
    weight_grams: f64,
    category: String,
    tags: BTreeSet<String>,
    available_quantity: u32,
}

impl ItemBuilder {
    pub fn new(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            utility_score: 0.5,
            weight_grams: 1000.0,
            category: "general".to_string(),
            tags: BTreeSet::new(),
            available_quantity: 1,
        }
    }

    pub fn score(mut self, utility_score: f64) -> Self {
        self.utility_score = utility_score;
        self
    }

    pub fn weight(mut self, weight_grams: f64) -> Self {
        self.weight_grams = weight_grams;
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    pub fn quantity(mut self, available_quantity: u32) -> Self {
        self.available_quantity = available_quantity;
        self
    }

    pub fn build(self) -> CandidateItem {
        CandidateItem {
            item_id: self.item_id,
            utility_score: self.utility_score,
            weight_grams: self.weight_grams,
            category: self.category,
            tags: self.tags,
            available_quantity: self.available_quantity,
        }
    }
}

// ==========================================
// 快捷构建函数
// ==========================================

/// 创建测试用的候选物品 (默认品类 general, 1 件)
pub fn create_test_item(item_id: &str, utility_score: f64, weight_grams: f64) -> CandidateItem {
    ItemBuilder::new(item_id)
        .score(utility_score)
        .weight(weight_grams)
        .build()
}

/// 创建测试用的容器类型
pub fn create_test_container(
    container_id: &str,
    capacity_grams: f64,
    unit_count: u32,
) -> ContainerType {
    ContainerType {
        container_id: container_id.to_string(),
        capacity_grams,
        unit_count,
    }
}

/// 创建带品类下限的任务约束
pub fn constraints_with_minimums(minimums: &[(&str, u32)]) -> MissionConstraints {
    let mut constraints = MissionConstraints::default();
    for (category, minimum) in minimums {
        constraints
            .category_minimums
            .insert(category.to_string(), *minimum);
    }
    constraints
}

/// 创建带必备标签的任务约束
pub fn constraints_with_tags(tags: &[&str]) -> MissionConstraints {
    let mut constraints = MissionConstraints::default();
    for tag in tags {
        constraints.required_tags.insert(tag.to_string());
    }
    constraints
}

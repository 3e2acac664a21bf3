// ==========================================
// 任务装箱优化器 - 任务约束领域模型
// ==========================================
// 依据: Mission_Pack_Master_Spec.md - PART B2 任务约束
// 依据: Packing_Engine_Specs_v0.2.md - mission_constraints
// ==========================================
// 使用 BTreeMap/BTreeSet: 迭代顺序可达输出,
// 红线: 相同输入必须产生相同结果
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// MissionConstraints - 任务约束
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionConstraints {
    // ===== 品类多样性下限 =====
    // 品类 → 必须装入的不同物品数 (件数不计入,同一物品多件只算一个)
    #[serde(default)]
    pub category_minimums: BTreeMap<String, u32>,

    // ===== 必备标签 =====
    // 每个标签必须被至少一个已装入物品覆盖
    #[serde(default)]
    pub required_tags: BTreeSet<String>,

    // ===== 全局限重 =====
    // 可选,跨全部容器的额外总重上限 (克)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_weight_cap_grams: Option<f64>,
}

impl MissionConstraints {
    /// 是否不含任何软约束与全局限重
    pub fn is_empty(&self) -> bool {
        self.category_minimums.is_empty()
            && self.required_tags.is_empty()
            && self.global_weight_cap_grams.is_none()
    }

    /// 指定品类的下限 (未配置视为 0)
    pub fn minimum_for(&self, category: &str) -> u32 {
        self.category_minimums.get(category).copied().unwrap_or(0)
    }
}

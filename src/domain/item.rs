// ==========================================
// 任务装箱优化器 - 候选物品领域模型
// ==========================================
// 依据: Mission_Pack_Master_Spec.md - PART C 数据体系
// 依据: Packing_Engine_Specs_v0.2.md - candidate_item
// ==========================================
// 所有权: 候选集由外部语义检索协作方构建,
//         求解期间只读借用,单次求解结束后丢弃
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// CandidateItem - 候选物品
// ==========================================
// 红线: 传入求解器后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    // ===== 标识 =====
    pub item_id: String,           // 物品ID

    // ===== 评分 =====
    pub utility_score: f64,        // 效用得分 [0,1],来自外部相似度检索

    // ===== 物理属性 =====
    pub weight_grams: f64,         // 单件重量 (克, > 0)

    // ===== 分类 =====
    pub category: String,          // 品类
    pub tags: BTreeSet<String>,    // 标签集合

    // ===== 库存 =====
    pub available_quantity: u32,   // 可用件数 (>= 1)
}

impl CandidateItem {
    /// 效用密度 (得分/克)
    ///
    /// 分数相同的情况下,更轻的物品密度更高,
    /// 用于分支定界的分数上界估计
    pub fn utility_density(&self) -> f64 {
        self.utility_score / self.weight_grams
    }

    /// 是否携带指定标签
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// 全部可用件数的总重量 (克)
    pub fn total_available_weight_grams(&self) -> f64 {
        self.weight_grams * self.available_quantity as f64
    }
}

// ==========================================
// 任务装箱优化器 - 求解结果领域模型
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - solve_result
// 依据: Mission_Pack_Master_Spec.md - PART A3 可解释性
// ==========================================
// 红线: 每个落选候选必须输出 reason
// 红线: 结果为单次求解的纯值,不含跨请求状态
// ==========================================

use crate::domain::types::SolveStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// PackingAssignment - 装箱明细
// ==========================================
// 不变量: 单物品跨容器类型件数合计 <= available_quantity
// 不变量: 单容器类型装载重量合计 <= capacity_grams × unit_count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingAssignment {
    pub item_id: String,        // 物品ID
    pub container_id: String,   // 容器类型ID
    pub quantity_packed: u32,   // 装入件数 (> 0 才会出现在明细中)
}

// ==========================================
// RejectedItem - 落选候选
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedItem {
    pub item_id: String,   // 物品ID
    pub reason: String,    // 拒绝原因 (RejectReason 的稳定字符串)
}

// ==========================================
// ContainerUtilization - 容器利用率
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerUtilization {
    pub container_id: String,          // 容器类型ID
    pub packed_weight_grams: f64,      // 已装载重量 (克)
    pub pooled_capacity_grams: f64,    // 合并容量 (克)
    pub weight_utilization: f64,       // 装载重量 ÷ 合并容量
}

// ==========================================
// SolveResult - 求解结果
// ==========================================
// 生命周期: 由 Result Assembler 装配后交给调用方只读消费
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    // ===== 状态 =====
    pub status: SolveStatus,

    // ===== 装箱方案 =====
    pub assignments: Vec<PackingAssignment>,
    pub objective_value: f64,          // Σ(utility_score × quantity_packed)

    // ===== 放宽记录 =====
    // 按应用顺序排列的约束组标签,未放宽时为空
    pub relaxed_constraints: Vec<String>,

    // ===== 落选候选 =====
    pub rejected_items: Vec<RejectedItem>,

    // ===== 利用率统计 =====
    pub container_utilization: Vec<ContainerUtilization>,
    pub aggregate_utilization: f64,    // 总装载重量 ÷ 总可用容量

    // ===== 搜索诊断 =====
    // 相同输入下该值确定,可用于回归比对
    pub nodes_expanded: u64,
}

impl SolveResult {
    /// 指定物品跨全部容器类型的装入件数合计
    pub fn packed_quantity_of(&self, item_id: &str) -> u32 {
        self.assignments
            .iter()
            .filter(|a| a.item_id == item_id)
            .map(|a| a.quantity_packed)
            .sum()
    }

    /// 装入的总件数
    pub fn total_units_packed(&self) -> u32 {
        self.assignments.iter().map(|a| a.quantity_packed).sum()
    }
}

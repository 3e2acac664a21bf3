// ==========================================
// 任务装箱优化器 - 容器领域模型
// ==========================================
// 依据: Mission_Pack_Master_Spec.md - PART B3 运载约束
// 依据: Packing_Engine_Specs_v0.2.md - container_type
// ==========================================
// 红线: 容量约束优先于效用得分
// 同型号的多个实体容器互换对称,按类型合并容量处理
// ==========================================

use serde::{Deserialize, Serialize};

/// 重量/容量比较的浮点容差 (克)
const WEIGHT_EPS: f64 = 1e-6;

// ==========================================
// ContainerType - 容器类型
// ==========================================
// capacity_grams = 最大载重 - 皮重,由调用方预先折算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerType {
    // ===== 标识 =====
    pub container_id: String,   // 容器类型ID

    // ===== 容量参数 =====
    pub capacity_grams: f64,    // 单实体容量 (克, > 0)
    pub unit_count: u32,        // 同型号实体数 (>= 1)
}

// ==========================================
// Trait: ContainerCapacity
// ==========================================
// 用途: Packing Solver / Greedy Filler 容量检查接口
pub trait ContainerCapacity {
    /// 单件物品能否放入该类型的一个实体容器
    fn can_hold_unit(&self, weight_grams: f64) -> bool;

    /// 类型合并容量 (单实体容量 × 实体数)
    fn pooled_capacity_grams(&self) -> f64;
}

// ==========================================
// ContainerCapacity trait 实现
// ==========================================
impl ContainerCapacity for ContainerType {
    /// 单件物品能否放入该类型的一个实体容器
    ///
    /// # 参数
    /// - `weight_grams`: 物品单件重量 (克)
    ///
    /// # 返回
    /// - `true`: 单实体容量足够
    /// - `false`: 单件已超过单实体容量,该类型完全装不下
    fn can_hold_unit(&self, weight_grams: f64) -> bool {
        weight_grams <= self.capacity_grams + WEIGHT_EPS
    }

    /// 类型合并容量
    ///
    /// # 返回
    /// 该类型全部实体的总容量 (克)
    fn pooled_capacity_grams(&self) -> f64 {
        self.capacity_grams * self.unit_count as f64
    }
}

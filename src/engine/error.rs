// ==========================================
// 任务装箱优化器 - 引擎层错误类型
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - 错误分类
// 职责: 定义求解前输入校验错误
// 红线: 校验失败必须在搜索开始前返回,不泄漏半成品状态
// 红线: 不可行不是错误,是 SolveResult 的终态 status
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
/// 所有变体均为调用方输入问题 (InvalidInput 类),
/// 在 Constraint Model 校验阶段抛出,搜索开始后不再产生错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    // ==========================================
    // 容器输入错误
    // ==========================================
    #[error("容器容量非法: container_id={container_id}, capacity_grams={capacity_grams}")]
    NonPositiveCapacity {
        container_id: String,
        capacity_grams: f64,
    },

    #[error("容器实体数非法: container_id={container_id}, unit_count 必须 >= 1")]
    InvalidUnitCount { container_id: String },

    #[error("容器类型ID重复: {0}")]
    DuplicateContainerId(String),

    // ==========================================
    // 候选物品输入错误
    // ==========================================
    #[error("物品重量非法: item_id={item_id}, weight_grams={weight_grams}")]
    NonPositiveWeight { item_id: String, weight_grams: f64 },

    #[error("效用得分越界: item_id={item_id}, utility_score={utility_score}, 合法区间 [0,1]")]
    UtilityOutOfRange { item_id: String, utility_score: f64 },

    #[error("物品可用件数非法: item_id={item_id}, available_quantity 必须 >= 1")]
    InvalidQuantity { item_id: String },

    #[error("物品ID重复: {0}")]
    DuplicateItemId(String),

    // ==========================================
    // 任务约束输入错误
    // ==========================================
    #[error("全局限重非法: global_weight_cap_grams={0}")]
    NonPositiveGlobalCap(f64),

    /// 品类下限指向任何候选都不具备的品类,属于无法满足的意图,
    /// 必须显式报告而不是静默丢弃
    #[error("品类下限指向不存在的品类: {}", categories.join(", "))]
    UnknownCategories { categories: Vec<String> },

    // ==========================================
    // 通用输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, SolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = SolveError::NonPositiveCapacity {
            container_id: "BAG1".to_string(),
            capacity_grams: -10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("BAG1"));
        assert!(msg.contains("-10"));

        let err = SolveError::UnknownCategories {
            categories: vec!["optics".to_string(), "fuel".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("optics"));
        assert!(msg.contains("fuel"));
    }
}

// ==========================================
// 任务装箱优化器 - API层错误类型
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - 错误分类
// 职责: 定义API层错误类型,转换引擎/协作方错误为用户友好的错误消息
// 红线: 可解释性 - 所有错误信息必须包含显式原因
// 红线: 不可行不是错误,是 SolveResult 的终态 status
// ==========================================

use crate::engine::error::SolveError;
use crate::sources::SourceError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用方输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 协作方访问错误
    // ==========================================
    #[error("协作方不可用: {0}")]
    SourceUnavailable(String),

    #[error("任务不存在: {0}")]
    MissionNotFound(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 SolveError 转换
// 目的: 引擎层校验错误统一呈现为 InvalidInput 类调用方错误
// ==========================================
impl From<SolveError> for ApiError {
    fn from(err: SolveError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

// ==========================================
// 从 SourceError 转换
// ==========================================
impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(msg) => ApiError::SourceUnavailable(msg),
            SourceError::MissionNotFound(id) => ApiError::MissionNotFound(id),
            SourceError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

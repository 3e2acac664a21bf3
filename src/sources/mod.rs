// ==========================================
// 任务装箱优化器 - 外部协作者接口层
// ==========================================
// 依据: Mission_Pack_Master_Spec.md - PART E 协作边界
// 职责: 定义候选集与容器定义的读取接口 (不包含实现细节)
// 红线: 本核心不查询数据库、不调用嵌入/视觉模型,
//       候选排名与相似度得分由外部语义检索方产出
// ==========================================

use crate::domain::container::ContainerType;
use crate::domain::item::CandidateItem;
use async_trait::async_trait;
use thiserror::Error;

// ==========================================
// 协作者错误类型
// ==========================================

/// 外部协作者访问错误
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("协作方不可用: {0}")]
    Unavailable(String),

    #[error("任务不存在: mission_id={0}")]
    MissionNotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type SourceResult<T> = Result<T, SourceError>;

// ==========================================
// CandidateSource Trait
// ==========================================
// 用途: 读取外部语义检索方为任务产出的排名候选集
// 实现者: 语义检索协作方适配器 / StaticCandidateSource (测试与CLI)
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// 获取任务的排名候选集
    ///
    /// # 参数
    /// - `mission_id`: 任务ID
    ///
    /// # 返回
    /// 已评分候选列表 (utility_score 由协作方计算,
    /// 规范排序由 Constraint Model 重建,此处顺序不作约定)
    async fn fetch_ranked_candidates(&self, mission_id: &str)
        -> SourceResult<Vec<CandidateItem>>;
}

// ==========================================
// ContainerSource Trait
// ==========================================
// 用途: 读取调用方的容器定义
#[async_trait]
pub trait ContainerSource: Send + Sync {
    /// 获取任务可用的容器类型列表
    ///
    /// # 参数
    /// - `mission_id`: 任务ID
    async fn fetch_containers(&self, mission_id: &str) -> SourceResult<Vec<ContainerType>>;
}

// ==========================================
// 内存实现 (测试与 CLI)
// ==========================================

/// 静态候选集 (请求体内联数据或测试夹具)
pub struct StaticCandidateSource {
    candidates: Vec<CandidateItem>,
}

impl StaticCandidateSource {
    pub fn new(candidates: Vec<CandidateItem>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl CandidateSource for StaticCandidateSource {
    async fn fetch_ranked_candidates(
        &self,
        _mission_id: &str,
    ) -> SourceResult<Vec<CandidateItem>> {
        Ok(self.candidates.clone())
    }
}

/// 静态容器定义
pub struct StaticContainerSource {
    containers: Vec<ContainerType>,
}

impl StaticContainerSource {
    pub fn new(containers: Vec<ContainerType>) -> Self {
        Self { containers }
    }
}

#[async_trait]
impl ContainerSource for StaticContainerSource {
    async fn fetch_containers(&self, _mission_id: &str) -> SourceResult<Vec<ContainerType>> {
        Ok(self.containers.clone())
    }
}

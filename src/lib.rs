// ==========================================
// 任务装箱优化器 - 核心库
// ==========================================
// 依据: Mission_Pack_Master_Spec.md - 系统宪法
// 系统定位: 装备打包助手的组合优化核心
// 红线: 单次求解无跨请求状态; 不可行是终态不是异常
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 求解规则
pub mod engine;

// 协作者接口层 - 候选与容器来源
pub mod sources;

// 配置层 - 求解参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 对外契约
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{RejectReason, RelaxationTier, SolveStatus};

// 领域实体
pub use domain::{
    CandidateItem, ContainerType, ContainerUtilization, MissionConstraints,
    PackingAssignment, RejectedItem, SolveResult,
};

// 引擎
pub use engine::{
    BranchBoundSolver, ConstraintModeler, GreedyFiller, PackingOrchestrator,
    RelaxationController, ResultAssembler, SolveError,
};

// 配置
pub use config::SolverSettings;

// API
pub use api::{ApiError, PackingApi, SolveMissionRequest, SolveMissionResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "任务装箱优化器";

// ==========================================
// 预编译检查
// ==========================================

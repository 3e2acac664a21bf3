// ==========================================
// 任务装箱优化器 - 领域模型层
// ==========================================
// 依据: Mission_Pack_Master_Spec.md - PART C 数据体系
// 依据: Packing_Engine_Specs_v0.2.md - 主实体定义
// ==========================================
// 职责: 定义领域实体、类型、容量检查接口
// 红线: 不含求解逻辑,不含外部数据访问
// ==========================================

pub mod constraints;
pub mod container;
pub mod item;
pub mod solution;
pub mod types;

// 重导出核心类型
pub use constraints::MissionConstraints;
pub use container::{ContainerCapacity, ContainerType};
pub use item::CandidateItem;
pub use solution::{ContainerUtilization, PackingAssignment, RejectedItem, SolveResult};
pub use types::{RejectReason, RelaxationTier, SolveStatus};

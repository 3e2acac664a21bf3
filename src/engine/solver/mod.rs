// ==========================================
// 任务装箱优化器 - 精确求解引擎
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - Packing Solver
// 红线: 容量约束优先于效用得分
// 红线: 搜索必须有界 (节点上限 + 可选截止时间)
// ==========================================
// 职责: 分支定界精确搜索 (item, container_type) 件数分配
// 输入: 规范化问题实例 + 生效约束集 + 搜索预算
// 输出: 当前约束集下的全局最优 / 不可行 / 预算耗尽携带现任解
// ==========================================

mod bound;
mod core;

#[cfg(test)]
mod tests;

pub use core::{AbortReason, BranchBoundSolver, RawSolution, SearchOutcome, SearchVerdict};

// ==========================================
// 任务装箱优化器 - 引擎编排器
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - 计算主流程
// 用途: 协调四大核心引擎的执行顺序
// ==========================================
// 主流程: Constraint Model → Packing Solver
//         → (不可行时) Relaxation Controller → Result Assembler
// 红线: 单次求解为同步单线程纯 CPU 搜索,无共享可变状态
// ==========================================

use crate::config::SolverSettings;
use crate::domain::constraints::MissionConstraints;
use crate::domain::container::ContainerType;
use crate::domain::item::CandidateItem;
use crate::domain::solution::SolveResult;
use crate::domain::types::{RelaxationTier, SolveStatus};
use crate::engine::assembler::ResultAssembler;
use crate::engine::constraint_model::ConstraintModeler;
use crate::engine::error::EngineResult;
use crate::engine::relaxation::RelaxationController;
use crate::engine::solver::{BranchBoundSolver, SearchVerdict};
use std::time::Instant;
use tracing::{debug, info, instrument};

// ==========================================
// PackingOrchestrator - 引擎编排器
// ==========================================
pub struct PackingOrchestrator {
    modeler: ConstraintModeler,
    solver: BranchBoundSolver,
    relaxation: RelaxationController,
    assembler: ResultAssembler,
}

impl PackingOrchestrator {
    /// 创建新的编排器实例
    pub fn new() -> Self {
        Self {
            modeler: ConstraintModeler::new(),
            solver: BranchBoundSolver::new(),
            relaxation: RelaxationController::new(),
            assembler: ResultAssembler::new(),
        }
    }

    /// 执行完整求解流程 (单次任务请求)
    ///
    /// # 参数
    /// - `candidates`: 外部检索方产出的候选物品列表
    /// - `containers`: 容器类型列表
    /// - `constraints`: 任务约束
    /// - `settings`: 搜索预算参数
    ///
    /// # 返回
    /// 完整装配的 SolveResult,或搜索开始前的输入校验错误
    #[instrument(skip(self, candidates, containers, constraints), fields(
        candidates_count = candidates.len(),
        containers_count = containers.len(),
        node_ceiling = settings.node_expansion_ceiling
    ))]
    pub fn solve(
        &self,
        candidates: Vec<CandidateItem>,
        containers: Vec<ContainerType>,
        constraints: MissionConstraints,
        settings: &SolverSettings,
    ) -> EngineResult<SolveResult> {
        // 截止时间折算为绝对时刻,全流程共享
        let deadline = settings.deadline().map(|d| Instant::now() + d);

        // ==========================================
        // 步骤1: Constraint Model - 校验与规范化
        // ==========================================
        debug!("步骤1: 校验与规范化问题实例");
        let instance = self.modeler.build(candidates, containers, constraints)?;

        // ==========================================
        // 步骤2: Packing Solver - 精确求解
        // ==========================================
        debug!("步骤2: 分支定界精确求解");
        let outcome = self.solver.solve(
            &instance,
            &instance.constraints,
            settings.node_expansion_ceiling,
            deadline,
        );
        let mut nodes_expanded = outcome.nodes_expanded;

        let (solution, status, applied_tiers, effective_constraints) = match outcome.verdict
        {
            SearchVerdict::Complete(Some(solution)) => (
                Some(solution),
                SolveStatus::Optimal,
                Vec::<RelaxationTier>::new(),
                instance.constraints.clone(),
            ),
            SearchVerdict::Aborted {
                incumbent: Some(solution),
                ..
            } => (
                Some(solution),
                SolveStatus::DegradedGreedy,
                Vec::new(),
                instance.constraints.clone(),
            ),
            // 不可行或预算耗尽无解
            SearchVerdict::Complete(None) | SearchVerdict::Aborted { .. } => {
                // ==========================================
                // 步骤3: Relaxation Controller - 累进放宽
                // ==========================================
                debug!("步骤3: 累进放宽重试");
                let recovery = self.relaxation.recover(
                    &instance,
                    settings.node_expansion_ceiling,
                    deadline,
                );
                nodes_expanded += recovery.nodes_expanded;
                (
                    recovery.solution,
                    recovery.status,
                    recovery.applied_tiers,
                    recovery.effective_constraints,
                )
            }
        };

        // ==========================================
        // 步骤4: Result Assembler - 结果装配
        // ==========================================
        debug!("步骤4: 结果装配");
        let result = self.assembler.assemble(
            &instance,
            solution.as_ref(),
            status,
            &applied_tiers,
            &effective_constraints,
            nodes_expanded,
        );

        info!(
            status = %result.status,
            objective_value = result.objective_value,
            assignments_count = result.assignments.len(),
            rejected_count = result.rejected_items.len(),
            relaxed_tiers = result.relaxed_constraints.len(),
            nodes_expanded = result.nodes_expanded,
            "求解流程完成"
        );
        Ok(result)
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PackingOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

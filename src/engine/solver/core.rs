// ==========================================
// 任务装箱优化器 - 分支定界搜索核心
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - Packing Solver
// 红线: 搜索必须有界,预算耗尽走降级路径而不是挂起
// 红线: 空方案不是解,结构性装不下必须以 Infeasible 终态暴露
// ==========================================
// 分支决策: "为物品 i 向容器类型 c 再分配 k 件"
// 候选按规范顺序 (效用降序) 展开,先试最大 k,
// 以便尽早获得高质量现任解、增强上界剪枝
// ==========================================

use crate::domain::constraints::MissionConstraints;
use crate::domain::container::ContainerCapacity;
use crate::engine::constraint_model::PackingInstance;
use crate::engine::solver::bound::{
    category_suffix_counts, density_order, fits_anywhere, tag_last_carriers, SCORE_EPS,
    WEIGHT_EPS,
};
use std::time::Instant;
use tracing::{debug, trace};

// ==========================================
// RawSolution - 搜索内部解
// ==========================================
// quantities[物品规范索引][容器规范索引] = 件数
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    pub quantities: Vec<Vec<u32>>,
    pub objective: f64,
}

impl RawSolution {
    /// 装入的总件数
    pub fn total_units(&self) -> u64 {
        self.quantities
            .iter()
            .flatten()
            .map(|&q| q as u64)
            .sum()
    }

    /// 指定物品跨全部容器类型的件数合计
    pub fn item_total(&self, item_idx: usize) -> u32 {
        self.quantities[item_idx].iter().sum()
    }
}

/// 搜索中断原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    NodeCeiling,     // 节点展开数达到上限
    DeadlineExpired, // 调用方截止时间已过
}

/// 搜索判定
#[derive(Debug, Clone, PartialEq)]
pub enum SearchVerdict {
    /// 搜索穷尽: Some = 当前约束集下全局最优, None = 不可行
    Complete(Option<RawSolution>),
    /// 预算耗尽: 现任解 (若有) 仍可用
    Aborted {
        incumbent: Option<RawSolution>,
        reason: AbortReason,
    },
}

/// 搜索结果 (判定 + 诊断)
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub verdict: SearchVerdict,
    pub nodes_expanded: u64,
}

// ==========================================
// BranchBoundSolver - 精确求解引擎
// ==========================================
// 无状态引擎,不需要注入依赖
pub struct BranchBoundSolver;

impl BranchBoundSolver {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 在给定约束集下精确求解
    ///
    /// # 参数
    /// - `instance`: 规范化问题实例 (只读)
    /// - `constraints`: 生效约束集 (放宽重试时与实例原始约束不同)
    /// - `node_ceiling`: 节点展开数上限
    /// - `deadline`: 可选的绝对截止时间,节点展开间隙检查
    ///
    /// # 返回
    /// SearchOutcome: 穷尽 (最优/不可行) 或中断 (携带现任解)
    pub fn solve(
        &self,
        instance: &PackingInstance,
        constraints: &MissionConstraints,
        node_ceiling: u64,
        deadline: Option<Instant>,
    ) -> SearchOutcome {
        let mut search = Search::new(instance, constraints, node_ceiling, deadline);
        search.explore(0, 0);

        let outcome = search.into_outcome();
        debug!(
            nodes_expanded = outcome.nodes_expanded,
            complete = matches!(outcome.verdict, SearchVerdict::Complete(_)),
            "分支定界搜索结束"
        );
        outcome
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for BranchBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// Search - 单次搜索的全部状态
// ==========================================
// 生命周期与单次 solve 调用一致,结束即丢弃
struct Search<'a> {
    instance: &'a PackingInstance,

    // ===== 索引化约束 =====
    category_minimums: Vec<u32>,
    item_category: Vec<Option<usize>>,
    item_tag_indices: Vec<Vec<usize>>,
    global_cap_grams: Option<f64>,

    // ===== 剪枝预计算 =====
    fits_any: Vec<bool>,
    tag_last_carrier: Vec<Option<usize>>,
    category_suffix: Vec<Vec<u32>>,
    density_order: Vec<usize>,
    pooled_capacity: Vec<f64>,

    // ===== 搜索预算 =====
    node_ceiling: u64,
    deadline: Option<Instant>,

    // ===== 可变搜索状态 =====
    quantities: Vec<Vec<u32>>,
    used_weight: Vec<f64>,
    total_weight: f64,
    objective: f64,
    remaining_quantity: Vec<u32>,
    packed_total: Vec<u32>,
    category_packed: Vec<u32>,
    tag_cover_count: Vec<u32>,
    units_packed: u64,

    // ===== 结果 =====
    incumbent: Option<RawSolution>,
    nodes_expanded: u64,
    aborted: Option<AbortReason>,
}

impl<'a> Search<'a> {
    fn new(
        instance: &'a PackingInstance,
        constraints: &MissionConstraints,
        node_ceiling: u64,
        deadline: Option<Instant>,
    ) -> Self {
        let items = &instance.items;
        let containers = &instance.containers;

        let required_tags: Vec<String> = constraints.required_tags.iter().cloned().collect();
        let category_names: Vec<String> =
            constraints.category_minimums.keys().cloned().collect();
        let category_minimums: Vec<u32> =
            constraints.category_minimums.values().copied().collect();
        let global_cap_grams = constraints.global_weight_cap_grams;

        let item_category: Vec<Option<usize>> = items
            .iter()
            .map(|item| category_names.iter().position(|c| *c == item.category))
            .collect();
        let item_tag_indices: Vec<Vec<usize>> = items
            .iter()
            .map(|item| {
                required_tags
                    .iter()
                    .enumerate()
                    .filter(|(_, tag)| item.has_tag(tag))
                    .map(|(idx, _)| idx)
                    .collect()
            })
            .collect();

        let fits_any: Vec<bool> = items
            .iter()
            .map(|item| fits_anywhere(item, containers, global_cap_grams))
            .collect();
        let tag_last_carrier = tag_last_carriers(items, &required_tags, &fits_any);
        let category_suffix = category_suffix_counts(items, &category_names, &fits_any);
        let density_order = density_order(items);
        let pooled_capacity: Vec<f64> =
            containers.iter().map(|c| c.pooled_capacity_grams()).collect();

        let n = items.len();
        let m = containers.len();
        let tag_count = required_tags.len();
        let category_count = category_names.len();

        Search {
            instance,
            category_minimums,
            item_category,
            item_tag_indices,
            global_cap_grams,
            fits_any,
            tag_last_carrier,
            category_suffix,
            density_order,
            pooled_capacity,
            node_ceiling,
            deadline,
            quantities: vec![vec![0u32; m]; n],
            used_weight: vec![0.0; m],
            total_weight: 0.0,
            objective: 0.0,
            remaining_quantity: items.iter().map(|i| i.available_quantity).collect(),
            packed_total: vec![0; n],
            category_packed: vec![0; category_count],
            tag_cover_count: vec![0; tag_count],
            units_packed: 0,
            incumbent: None,
            nodes_expanded: 0,
            aborted: None,
        }
    }

    // ==========================================
    // 递归展开
    // ==========================================

    /// 展开节点 (物品 item_idx, 容器 container_idx)
    fn explore(&mut self, item_idx: usize, container_idx: usize) {
        if self.aborted.is_some() {
            return;
        }

        self.nodes_expanded += 1;
        if self.nodes_expanded > self.node_ceiling {
            self.aborted = Some(AbortReason::NodeCeiling);
            return;
        }
        if (self.nodes_expanded & 1023) == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.aborted = Some(AbortReason::DeadlineExpired);
                    return;
                }
            }
        }

        let n = self.instance.items.len();
        let m = self.instance.containers.len();

        // 叶节点: 全部物品决策完毕
        if item_idx == n {
            self.try_accept_leaf();
            return;
        }

        // 物品边界: 结构剪枝 + 上界剪枝
        if container_idx == 0 {
            if self.structurally_dead(item_idx) {
                trace!(item_idx, "结构剪枝");
                return;
            }
            if let Some(best) = &self.incumbent {
                if self.fractional_upper_bound(item_idx) <= best.objective + SCORE_EPS {
                    trace!(item_idx, "上界剪枝");
                    return;
                }
            }
            // 任何容器都装不下的物品直接跳过
            if !self.fits_any[item_idx] {
                self.explore(item_idx + 1, 0);
                return;
            }
        }

        // 容器耗尽: 推进到下一物品
        if container_idx == m {
            self.explore(item_idx + 1, 0);
            return;
        }

        // 分支: 为 (item_idx, container_idx) 尝试 k = k_max..0
        let k_max = self.max_assignable(item_idx, container_idx);
        for k in (0..=k_max).rev() {
            self.apply(item_idx, container_idx, k);
            self.explore(item_idx, container_idx + 1);
            self.undo(item_idx, container_idx, k);
            if self.aborted.is_some() {
                return;
            }
        }
    }

    /// 叶节点验收
    ///
    /// 可行性是结构性的:
    /// 1) 每个必备标签被 >= 1 个已装物品覆盖
    /// 2) 每个品类下限由不同物品数满足 (件数不计入)
    /// 3) 至少装入 1 件 (空方案不是解)
    /// 同目标值保留首个现任解,保证确定性
    fn try_accept_leaf(&mut self) {
        if self.units_packed == 0 {
            return;
        }
        if self.tag_cover_count.iter().any(|&c| c == 0) {
            return;
        }
        for (packed, minimum) in self.category_packed.iter().zip(&self.category_minimums) {
            if packed < minimum {
                return;
            }
        }

        let improved = match &self.incumbent {
            None => true,
            Some(best) => self.objective > best.objective + SCORE_EPS,
        };
        if improved {
            trace!(objective = self.objective, "更新现任解");
            self.incumbent = Some(RawSolution {
                quantities: self.quantities.clone(),
                objective: self.objective,
            });
        }
    }

    // ==========================================
    // 剪枝
    // ==========================================

    /// 结构性死支判定
    ///
    /// 从 item_idx 起剩余候选已无法补齐:
    /// - 尚未覆盖的必备标签 (最后承载者已被跳过或不存在)
    /// - 尚未达标的品类下限 (剩余可行同品类物品不足)
    fn structurally_dead(&self, item_idx: usize) -> bool {
        for (tag_idx, cover) in self.tag_cover_count.iter().enumerate() {
            if *cover > 0 {
                continue;
            }
            match self.tag_last_carrier[tag_idx] {
                Some(last) if last >= item_idx => {}
                _ => return true,
            }
        }

        let suffix = &self.category_suffix[item_idx];
        for (cat_idx, minimum) in self.category_minimums.iter().enumerate() {
            if self.category_packed[cat_idx] + suffix[cat_idx] < *minimum {
                return true;
            }
        }

        false
    }

    /// 分数松弛上界 (经典背包上界)
    ///
    /// 剩余容量 = min(各容器类型剩余合并容量之和, 全局限重剩余),
    /// 按效用密度降序以分数件填充剩余候选;
    /// 对任何整数可行延伸都是合法上界
    fn fractional_upper_bound(&self, item_idx: usize) -> f64 {
        let mut room: f64 = self
            .pooled_capacity
            .iter()
            .zip(&self.used_weight)
            .map(|(cap, used)| (cap - used).max(0.0))
            .sum();
        if let Some(cap) = self.global_cap_grams {
            room = room.min((cap - self.total_weight).max(0.0));
        }

        let mut bound = self.objective;
        for &j in &self.density_order {
            if room <= WEIGHT_EPS {
                break;
            }
            if j < item_idx || !self.fits_any[j] {
                continue;
            }
            let item = &self.instance.items[j];
            let take = (self.remaining_quantity[j] as f64 * item.weight_grams).min(room);
            if take <= 0.0 {
                continue;
            }
            bound += item.utility_density() * take;
            room -= take;
        }
        bound
    }

    // ==========================================
    // 状态变更
    // ==========================================

    /// (item_idx, container_idx) 最多可再分配件数
    fn max_assignable(&self, item_idx: usize, container_idx: usize) -> u32 {
        let item = &self.instance.items[item_idx];
        let container = &self.instance.containers[container_idx];
        if !container.can_hold_unit(item.weight_grams) {
            return 0;
        }

        let mut k_max = self.remaining_quantity[item_idx];

        let pool_room =
            self.pooled_capacity[container_idx] - self.used_weight[container_idx];
        k_max = k_max.min(whole_units(pool_room, item.weight_grams));

        if let Some(cap) = self.global_cap_grams {
            let global_room = cap - self.total_weight;
            k_max = k_max.min(whole_units(global_room, item.weight_grams));
        }

        k_max
    }

    fn apply(&mut self, item_idx: usize, container_idx: usize, k: u32) {
        if k == 0 {
            return;
        }
        let item = &self.instance.items[item_idx];
        let added_weight = k as f64 * item.weight_grams;

        self.quantities[item_idx][container_idx] = k;
        self.used_weight[container_idx] += added_weight;
        self.total_weight += added_weight;
        self.objective += k as f64 * item.utility_score;
        self.remaining_quantity[item_idx] -= k;
        self.units_packed += k as u64;

        // 0 → >0 迁移: 不同物品计数与标签覆盖只在首次装入时累加
        if self.packed_total[item_idx] == 0 {
            if let Some(cat_idx) = self.item_category[item_idx] {
                self.category_packed[cat_idx] += 1;
            }
            for &tag_idx in &self.item_tag_indices[item_idx] {
                self.tag_cover_count[tag_idx] += 1;
            }
        }
        self.packed_total[item_idx] += k;
    }

    fn undo(&mut self, item_idx: usize, container_idx: usize, k: u32) {
        if k == 0 {
            return;
        }
        let item = &self.instance.items[item_idx];
        let removed_weight = k as f64 * item.weight_grams;

        self.quantities[item_idx][container_idx] = 0;
        self.used_weight[container_idx] -= removed_weight;
        self.total_weight -= removed_weight;
        self.objective -= k as f64 * item.utility_score;
        self.remaining_quantity[item_idx] += k;
        self.units_packed -= k as u64;

        self.packed_total[item_idx] -= k;
        if self.packed_total[item_idx] == 0 {
            if let Some(cat_idx) = self.item_category[item_idx] {
                self.category_packed[cat_idx] -= 1;
            }
            for &tag_idx in &self.item_tag_indices[item_idx] {
                self.tag_cover_count[tag_idx] -= 1;
            }
        }
    }

    fn into_outcome(self) -> SearchOutcome {
        let verdict = match self.aborted {
            Some(reason) => SearchVerdict::Aborted {
                incumbent: self.incumbent,
                reason,
            },
            None => SearchVerdict::Complete(self.incumbent),
        };
        SearchOutcome {
            verdict,
            nodes_expanded: self.nodes_expanded,
        }
    }
}

/// 剩余容量可容纳的整件数 (带浮点容差,负容量取 0)
fn whole_units(room_grams: f64, unit_weight_grams: f64) -> u32 {
    if room_grams <= 0.0 {
        return 0;
    }
    ((room_grams + WEIGHT_EPS) / unit_weight_grams).floor() as u32
}

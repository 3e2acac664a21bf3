// ==========================================
// 任务装箱优化器 - 搜索剪枝预计算
// ==========================================
// 依据: Packing_Engine_Specs_v0.2.md - Packing Solver 上界与剪枝
// ==========================================
// 职责: 为分支定界预计算结构性剪枝所需的静态数据
// 全部为纯函数,只依赖规范化实例,不持有可变状态
// ==========================================

use crate::domain::container::{ContainerCapacity, ContainerType};
use crate::domain::item::CandidateItem;
use std::cmp::Ordering;

/// 重量/容量比较的浮点容差 (克)
pub(crate) const WEIGHT_EPS: f64 = 1e-6;

/// 目标值比较的浮点容差
pub(crate) const SCORE_EPS: f64 = 1e-9;

/// 单件物品是否存在可放入的容器实体
///
/// 同时要求单件不超过生效的全局限重:
/// 两者任一不满足,该物品在当前约束集下永远装不进去
pub(crate) fn fits_anywhere(
    item: &CandidateItem,
    containers: &[ContainerType],
    global_cap_grams: Option<f64>,
) -> bool {
    if let Some(cap) = global_cap_grams {
        if item.weight_grams > cap + WEIGHT_EPS {
            return false;
        }
    }
    containers.iter().any(|c| c.can_hold_unit(item.weight_grams))
}

/// 候选按效用密度降序的索引序
///
/// 同密度时保持规范顺序 (索引升序),保证确定性;
/// 该顺序用于分数松弛上界的分数填充
pub(crate) fn density_order(items: &[CandidateItem]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        match items[b]
            .utility_density()
            .total_cmp(&items[a].utility_density())
        {
            Ordering::Equal => a.cmp(&b),
            other => other,
        }
    });
    order
}

/// 每个必备标签的最后可行承载者索引
///
/// # 参数
/// - `items`: 规范顺序候选
/// - `tags`: 生效必备标签 (索引化)
/// - `fits`: 每个候选是否存在可放入的容器
///
/// # 返回
/// 每个标签: 携带该标签且可放入的最大候选索引;
/// None 表示无任何承载者,该标签在当前约束集下不可覆盖
pub(crate) fn tag_last_carriers(
    items: &[CandidateItem],
    tags: &[String],
    fits: &[bool],
) -> Vec<Option<usize>> {
    tags.iter()
        .map(|tag| {
            items
                .iter()
                .enumerate()
                .filter(|(idx, item)| fits[*idx] && item.has_tag(tag))
                .map(|(idx, _)| idx)
                .max()
        })
        .collect()
}

/// 受约束品类的后缀可行计数
///
/// # 返回
/// suffix[i][j] = 索引 >= i 的候选中, 属于品类 j 且可放入的数量;
/// suffix 长度为 items.len() + 1, 末行全 0
pub(crate) fn category_suffix_counts(
    items: &[CandidateItem],
    categories: &[String],
    fits: &[bool],
) -> Vec<Vec<u32>> {
    let n = items.len();
    let k = categories.len();
    let mut suffix = vec![vec![0u32; k]; n + 1];
    for i in (0..n).rev() {
        for j in 0..k {
            suffix[i][j] = suffix[i + 1][j];
        }
        if fits[i] {
            if let Some(j) = categories.iter().position(|c| *c == items[i].category) {
                suffix[i][j] += 1;
            }
        }
    }
    suffix
}

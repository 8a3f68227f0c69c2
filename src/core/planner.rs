//! # Batch Planner Module / 批次计划模块
//!
//! This module turns the configured module list into the list a single
//! invocation actually runs, applying the prefix filter and the optional
//! round-robin split across CI runners. Plan order is preserved throughout.
//!
//! 此模块把配置的模块列表变成单次调用实际运行的列表，
//! 应用前缀过滤以及可选的跨 CI 运行器轮转切分。全程保持计划顺序。

use anyhow::{Result, bail};

/// Represents a complete execution plan for one batch.
/// 表示一个批次的完整执行计划。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// The modules to run, in plan order, after filtering and splitting.
    /// 过滤和切分后要运行的模块，按计划顺序排列。
    pub modules_to_run: Vec<String>,
    /// The number of modules dropped by the prefix filter.
    /// 被前缀过滤器丢弃的模块数量。
    pub filtered_count: usize,
    /// Whether the modules are split across multiple runners (CI environment).
    /// 模块是否被切分到多个运行器上（CI 环境）。
    pub is_distributed: bool,
}

/// Creates an execution plan for the given module list.
///
/// The prefix filter is applied first, then the optional round-robin split:
/// runner `index` keeps every module whose position in the filtered list
/// satisfies `i % total == index`, so the union over all runners is exactly
/// the filtered list. The configured order is never re-sorted.
///
/// 为给定的模块列表创建执行计划。
/// 先应用前缀过滤，再进行可选的轮转切分：运行器 `index` 保留过滤后
/// 列表中位置满足 `i % total == index` 的每个模块，因此所有运行器的
/// 并集恰好是过滤后的列表。配置顺序绝不会被重新排序。
///
/// # Arguments
/// * `modules` - The configured module list, in plan order
/// * `filter` - Optional module-name prefix; non-matching modules are dropped
/// * `total_runners` - Optional total number of runners for distributed execution
/// * `runner_index` - Optional index of this runner (0-based)
///
/// # Returns
/// An `ExecutionPlan` with the filtered and potentially distributed modules
pub fn plan_execution(
    modules: Vec<String>,
    filter: Option<&str>,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
) -> Result<ExecutionPlan> {
    let total_count = modules.len();

    let kept_modules: Vec<String> = match filter {
        Some(prefix) => modules
            .into_iter()
            .filter(|module| module.starts_with(prefix))
            .collect(),
        None => modules,
    };
    let filtered_count = total_count - kept_modules.len();

    // Distribute modules if running in CI
    let (modules_to_run, is_distributed) =
        if let (Some(total), Some(index)) = (total_runners, runner_index) {
            if index >= total {
                bail!("Runner index must be less than total runners.");
            }
            let distributed_modules: Vec<_> = kept_modules
                .into_iter()
                .enumerate()
                .filter(|(i, _)| i % total == index)
                .map(|(_, module)| module)
                .collect();
            (distributed_modules, true)
        } else {
            if total_runners.is_some() || runner_index.is_some() {
                bail!("Both --total-runners and --runner-index must be provided.");
            }
            (kept_modules, false)
        };

    Ok(ExecutionPlan {
        modules_to_run,
        filtered_count,
        is_distributed,
    })
}

//! # Batch Execution Engine Module / 批量执行引擎模块
//!
//! This module provides the core functionality for running the configured
//! test runner once per module. It renders the command template, supervises
//! each invocation with an idle timeout, classifies the outcome, and drives
//! the whole batch in plan order.
//!
//! 此模块提供按模块逐次运行所配置测试运行器的核心功能。
//! 它渲染命令模板，以空闲超时监管每次调用，对结果进行分类，
//! 并按计划顺序驱动整个批次。

use anyhow::{Context, Result};
use colored::*;
use futures::{StreamExt, pin_mut, stream};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::MODULE_PLACEHOLDER,
        models::{Category, ModuleResult},
    },
    infra::{command, t},
};

/// Renders the command template for one module into argv tokens.
///
/// Environment variables and `~` in the template are expanded first, then
/// every `{module}` occurrence is substituted, then the result is split
/// with shell-style quoting. A module name containing spaces therefore
/// splits into several tokens unless the caller quoted it.
///
/// 将某个模块的命令模板渲染为 argv 词元。
/// 先展开模板中的环境变量和 `~`，再替换每一处 `{module}`，
/// 最后按 shell 引号规则切分。因此包含空格的模块名除非调用方
/// 加了引号，否则会被切分为多个词元。
pub fn render_command(command_template: &str, module: &str) -> Result<Vec<String>> {
    let expanded_command = shellexpand::full(command_template)
        .with_context(|| format!("Failed to expand command: {command_template}"))?
        .to_string();

    let rendered = expanded_command.replace(MODULE_PLACEHOLDER, module);

    let parts = shlex::split(&rendered)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse command: {}", rendered))?;

    if parts.is_empty() {
        return Err(anyhow::anyhow!("Empty command after parsing."));
    }

    Ok(parts)
}

/// Runs the test runner once for a single module and classifies the outcome.
///
/// The invocation's output is echoed live and captured; a run that stays
/// silent past `idle_timeout` is killed and classified from a missing exit
/// code. A runner that cannot be started at all is an error, not a result.
///
/// 对单个模块运行一次测试运行器并对结果进行分类。
/// 调用的输出会实时回显并被捕获；静默超过 `idle_timeout` 的运行
/// 会被终止，并按缺失退出码分类。完全无法启动的运行器是错误而非结果。
pub async fn run_module(
    module: &str,
    command_template: &str,
    idle_timeout: Duration,
) -> Result<ModuleResult> {
    println!("{}", "-".repeat(80));
    println!("{}", module.cyan());
    println!("{}", "-".repeat(80));

    let parts = render_command(command_template, module)?;
    let program = &parts[0];
    let args = &parts[1..];

    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args);

    let start_time = Instant::now();
    let result = command::run_with_idle_timeout(cmd, idle_timeout)
        .await
        .with_context(|| t!("run.spawn_failed_for", module = module))?;
    let duration = start_time.elapsed();

    let module_result = ModuleResult {
        module: module.to_string(),
        category: Category::from_exit_code(result.exit_code),
        result,
        duration,
    };

    if module_result.result.timed_out() {
        println!("{}", t!("run.module_timed_out", module = module).red());
    } else {
        let line = t!(
            "run.module_exited",
            module = module,
            code = module_result.exit_code_str()
        );
        if module_result.is_passed() {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }

    Ok(module_result)
}

/// Runs the whole batch and collects results in plan order.
///
/// `jobs` is the number of modules allowed in flight at once; the default
/// of 1 keeps the batch strictly sequential. A module whose runner exits
/// badly is recorded and never aborts the rest of the batch. Cancelling
/// `stop_token` stops the batch: modules not yet started are skipped,
/// in-flight runners are killed, and the function returns only after every
/// runner has been reclaimed, with the flag `true` and the results covering
/// the modules that finished. A runner that cannot be started stops the
/// batch the same way and surfaces the error instead.
///
/// 运行整个批次并按计划顺序收集结果。
/// `jobs` 是同时在途的模块数量上限；默认值 1 保持批次严格串行。
/// 运行器退出异常的模块会被记录，绝不会中止批次的其余部分。
/// 取消 `stop_token` 会停止批次：尚未启动的模块被跳过，在途的
/// 运行器会被终止，函数在所有运行器都被回收后才返回，此时标志为
/// `true`，结果只覆盖已完成的模块。无法启动的运行器以同样的方式
/// 停止批次，并改为上报错误。
pub async fn run_batch(
    modules: Vec<String>,
    command_template: &str,
    idle_timeout: Duration,
    jobs: usize,
    stop_token: CancellationToken,
) -> Result<(Vec<ModuleResult>, bool)> {
    // Child of the caller's token so a failed spawn can stop the batch
    // without cancelling the caller's signal handling.
    let batch_token = stop_token.child_token();

    let runs = stream::iter(modules.into_iter().map(|module| {
        let template = command_template.to_string();
        let token = batch_token.clone();

        async move {
            if token.is_cancelled() {
                return Ok(None);
            }

            let mut handle =
                tokio::spawn(async move { run_module(&module, &template, idle_timeout).await });

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    // Waiting out the abort drops the runner future, which
                    // kills its child process before this wrapper resolves.
                    handle.abort();
                    let _ = handle.await;
                    Ok(None)
                }
                res = &mut handle => match res {
                    Ok(inner) => inner.map(Some),
                    Err(e) => Err(anyhow::anyhow!("Runner task failed: {}", e)),
                },
            }
        }
    }))
    .buffered(jobs);
    pin_mut!(runs);

    let mut results = Vec::new();
    let mut interrupted = false;
    let mut failure = None;

    // The stream is always drained so every in-flight wrapper observes the
    // cancellation and reclaims its runner before this function returns.
    while let Some(item) = runs.next().await {
        match item {
            Ok(Some(module_result)) => results.push(module_result),
            Ok(None) => interrupted = true,
            Err(e) => {
                batch_token.cancel();
                if failure.is_none() {
                    failure = Some(e);
                }
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok((results, interrupted)),
    }
}

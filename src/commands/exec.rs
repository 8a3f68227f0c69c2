// src/commands/exec.rs

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::{
    core::{config::TestPlan, execution::run_module},
    infra::t,
};

/// Runs one ad-hoc invocation built from the trailing CLI arguments.
///
/// The arguments are quoted and joined into a pseudo-module that is
/// substituted into the plan's command template, so they survive the
/// shell-style re-tokenization intact. The outcome is classified and
/// printed but never compared against the expectation table, and the
/// command succeeds whatever the category turns out to be.
///
/// 运行一次由 CLI 尾随参数构成的临时调用。
/// 参数经过引号处理后拼接成伪模块名并替换进计划的命令模板，
/// 因此能原样经受 shell 风格的再切分。结果会被分类并打印，
/// 但绝不会与预期表比较；无论类别如何，该命令都以成功结束。
pub async fn execute(
    config: PathBuf,
    timeout: Option<u64>,
    runner_args: Vec<String>,
) -> Result<()> {
    let (mut plan, _config_path) = TestPlan::load(&config)?;
    if let Some(secs) = timeout {
        plan.idle_timeout_secs = secs;
    }
    let plan = plan;

    let locale = plan.language.clone();
    rust_i18n::set_locale(&locale);

    plan.validate()?;

    let pseudo_module = shlex::try_join(runner_args.iter().map(String::as_str))
        .context("Failed to quote the trailing arguments")?;

    println!("{}", t!("exec.running", locale = locale, args = pseudo_module));

    let module_result = run_module(&pseudo_module, &plan.command, plan.idle_timeout()).await?;

    println!(
        "{}",
        t!("exec.category", locale = locale, category = module_result.category)
    );

    Ok(())
}

// src/commands/run.rs

use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{config::TestPlan, execution::run_batch, planner, report::aggregate},
    infra::t,
    reporting::{generate_html_report, print_mismatches, print_summary, write_json_report},
};

pub async fn execute(
    jobs: Option<usize>,
    config: PathBuf,
    timeout: Option<u64>,
    filter: Option<String>,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
    html: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let (mut plan, config_path) = TestPlan::load(&config)?;
    if let Some(secs) = timeout {
        plan.idle_timeout_secs = secs;
    }
    // The plan is frozen once the CLI override is applied.
    let plan = plan;

    let locale = plan.language.clone();
    rust_i18n::set_locale(&locale);

    plan.validate()?;

    println!(
        "{}",
        t!("run.loading_plan", locale = locale, path = config_path.display())
    );
    println!(
        "{}",
        t!("run.using_command", locale = locale, command = plan.command.yellow())
    );
    println!(
        "{}",
        t!("run.idle_timeout", locale = locale, secs = plan.idle_timeout_secs)
    );

    for module in plan.unknown_expected_modules() {
        println!(
            "{}",
            t!("run.unknown_expected_module", locale = locale, module = module).yellow()
        );
    }

    let overall_stop_token = setup_signal_handler(&locale)?;

    let exec_plan = planner::plan_execution(
        plan.modules.clone(),
        filter.as_deref(),
        total_runners,
        runner_index,
    )?;

    if exec_plan.filtered_count > 0 {
        println!(
            "{}",
            t!(
                "run.filtered_modules",
                locale = locale,
                filtered = exec_plan.filtered_count,
                total = exec_plan.modules_to_run.len()
            )
            .cyan()
        );
    }

    if let (Some(total), Some(index)) = (total_runners, runner_index) {
        println!(
            "{}",
            t!(
                "run.running_as_split_runner",
                locale = locale,
                index = index + 1,
                total = total,
                count = exec_plan.modules_to_run.len()
            )
            .bold()
        );
    } else {
        println!("{}", t!("run.running_as_single_runner", locale = locale).bold());
    }

    if exec_plan.modules_to_run.is_empty() {
        println!("{}", t!("run.no_modules_to_run", locale = locale).green());
        return Ok(());
    }

    let assigned = exec_plan.modules_to_run.len();
    let jobs = match jobs {
        Some(0) => num_cpus::get() / 2 + 1,
        Some(n) => n,
        None => 1,
    };

    let (results, interrupted) = run_batch(
        exec_plan.modules_to_run,
        &plan.command,
        plan.idle_timeout(),
        jobs,
        overall_stop_token,
    )
    .await?;

    let expectations = plan.expectation_table();
    print_summary(&results, &expectations, &locale);

    if interrupted {
        anyhow::bail!(t!(
            "run.interrupted",
            locale = locale,
            done = results.len(),
            total = assigned
        ));
    }

    let report = aggregate(&results, &expectations);

    if let Some(report_path) = &html {
        println!("\nGenerating HTML report at: {}", report_path.display());
        if let Err(e) = generate_html_report(&results, &report, report_path, &locale) {
            eprintln!("{} {}", "Failed to generate HTML report:".red(), e);
        }
    }

    if let Some(report_path) = &json {
        println!("\nGenerating JSON report at: {}", report_path.display());
        if let Err(e) = write_json_report(&results, &report, report_path) {
            eprintln!("{} {}", "Failed to generate JSON report:".red(), e);
        }
    }

    print_mismatches(&report, &locale);

    if report.is_success() {
        Ok(())
    } else {
        anyhow::bail!(t!("run.run_failed", locale = locale));
    }
}

fn setup_signal_handler(locale: &str) -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl-C");
        println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
        token_clone.cancel();
    });

    Ok(token)
}

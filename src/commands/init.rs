//! # Test Plan Initialization Module / 测试计划初始化模块
//!
//! This module provides functionality for initializing a new test plan
//! through an interactive command-line wizard. It helps users create a
//! `TestPlan.toml` file describing their runner command, module list,
//! idle timeout, and expectation table.
//!
//! 此模块通过交互式命令行向导提供初始化新测试计划的功能。
//! 它帮助用户创建描述运行器命令、模块列表、空闲超时和预期表的
//! `TestPlan.toml` 文件。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Step-by-step guidance for plan setup
//! - **Sensible Defaults**: Every prompt starts from the embedded default plan
//! - **Expectation Seeding**: Optionally marks every module as expected to pass
//! - **Overwrite Protection**: Confirmation prompts before overwriting existing plans
//!
//! - **交互式向导**: 计划设置的逐步指导
//! - **合理默认值**: 每个提示都从内嵌默认计划出发
//! - **预期表种子**: 可选地将每个模块标记为预期通过
//! - **覆盖保护**: 覆盖现有计划前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::{self, ExpectationTable, TestPlan};
use crate::infra::t;

/// Runs the interactive wizard to generate a `TestPlan.toml` file.
///
/// This function provides a step-by-step guided process for describing the
/// runner command, the idle timeout, the module list, and whether every
/// module should start out expected to pass. In non-interactive mode the
/// embedded default plan is written as-is.
///
/// 运行交互式向导以生成 `TestPlan.toml` 文件。
///
/// 此函数提供逐步指导过程，用于描述运行器命令、空闲超时、模块列表，
/// 以及是否让每个模块一开始就被预期通过。非交互模式下直接写出内嵌默认计划。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new("TestPlan.toml");
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
        println!("{}", t!("init_wizard_description", locale = language));
    }

    if config_path.exists() && !non_interactive {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!(
                "init_overwrite_prompt",
                locale = language,
                path = config_path.display()
            ))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let defaults = config::default_plan();

    if non_interactive {
        let mut plan = defaults.clone();
        plan.language = language.to_string();
        return write_config(config_path, &plan, language);
    }

    // Interactive part starts here
    let command: String = Input::with_theme(&theme)
        .with_prompt(t!("init_command_prompt", locale = language))
        .default(defaults.command.clone())
        .interact_text()?;

    let idle_timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt(t!("init_timeout_prompt", locale = language))
        .default(defaults.idle_timeout_secs)
        .interact_text()?;

    let modules_line: String = Input::with_theme(&theme)
        .with_prompt(t!("init_modules_prompt", locale = language))
        .default(defaults.modules.join(" "))
        .interact_text()?;
    let modules: Vec<String> = modules_line
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let seed_expected = Confirm::with_theme(&theme)
        .with_prompt(t!("init_seed_expected_prompt", locale = language))
        .default(true)
        .interact()
        .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

    let expected = if seed_expected {
        ExpectationTable::all_passed(&modules)
    } else {
        ExpectationTable::default()
    };

    let plan = TestPlan {
        language: language.to_string(),
        command,
        idle_timeout_secs,
        modules,
        expected,
    };
    plan.validate()?;

    write_config(config_path, &plan, language)
}

fn write_config(path: &Path, plan: &TestPlan, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(plan)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()))?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}

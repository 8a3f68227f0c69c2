//! # Console Reporting Module / 控制台报告模块
//!
//! This module handles the display of batch results in the console.
//! It prints the per-module summary, the per-category grouping, and the
//! mismatch list, using color coding with internationalization support.
//!
//! 此模块处理批次结果在控制台中的显示。
//! 它打印逐模块摘要、按类别分组以及不符合预期的列表，
//! 使用颜色编码并支持国际化。

use colored::*;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::config::ExpectationTable;
use crate::core::models::{Category, ModuleResult};
use crate::core::report::Report;
use crate::infra::t;

/// Prints a formatted summary of batch results to the console.
/// Shows one line per module with its category, exit code, and the
/// categories the expectation table accepts for it, followed by the
/// per-category grouping. Lines of modules that landed outside their
/// expected categories are highlighted in red.
///
/// 在控制台打印格式化的批次结果摘要。
/// 每个模块一行，显示其类别、退出码以及预期表为它接受的类别，
/// 随后是按类别的分组。落在预期类别之外的模块行以红色突出显示。
///
/// # Arguments / 参数
/// * `results` - The batch results, in the order they were produced
///               批次结果，按产生顺序排列
/// * `expectations` - The expectation table to annotate each line with
///                    用于标注每一行的预期表
/// * `locale` - The language locale to use for messages
///              用于消息的语言区域设置
///
/// # Output Format / 输出格式
/// ```text
/// ================================================================================
/// Test results summary
/// ================================================================================
/// pkg.tests.test_alpha passed (exit code 0), expected ["passed"]
/// pkg.tests.test_beta failed (exit code 1), expected ["passed"]
///
/// --------------------------------------------------------------------------------
/// Grouped by category
/// --------------------------------------------------------------------------------
/// category passed (1 modules)
///     pkg.tests.test_alpha
/// category failed (1 modules)
///     pkg.tests.test_beta
/// ```
pub fn print_summary(results: &[ModuleResult], expectations: &ExpectationTable, locale: &str) {
    println!();
    println!("{}", "=".repeat(80));
    println!("{}", t!("report.summary_banner", locale = locale).bold());
    println!("{}", "=".repeat(80));

    for module_result in results {
        let expected = expectations.expected_categories_for(&module_result.module);
        let line = t!(
            "report.summary_line",
            locale = locale,
            module = module_result.module,
            category = module_result.category,
            code = module_result.exit_code_str(),
            expected = format!("{:?}", expected_names(&expected))
        );
        if expected.contains(&module_result.category) {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }

    let mut grouped: BTreeMap<Category, Vec<&str>> = BTreeMap::new();
    for module_result in results {
        grouped
            .entry(module_result.category)
            .or_default()
            .push(&module_result.module);
    }

    println!();
    println!("{}", "-".repeat(80));
    println!("{}", t!("report.grouped_banner", locale = locale).bold());
    println!("{}", "-".repeat(80));

    for (category, modules) in &grouped {
        println!(
            "{}",
            t!(
                "report.category_line",
                locale = locale,
                category = category,
                count = modules.len()
            )
        );
        for module in modules {
            println!("    {}", module.cyan());
        }
    }
}

/// Prints the mismatch section of a report.
/// Lists every module whose observed category fell outside its expected
/// set, or a single confirmation line when the batch matched throughout.
///
/// 打印报告的不符合预期部分。
/// 列出观察类别落在预期集合之外的每个模块；
/// 若整个批次都符合预期，则打印一行确认信息。
///
/// # Arguments / 参数
/// * `report` - The aggregated report to read mismatches from
///              读取不符合项的聚合报告
/// * `locale` - The language locale to use for messages
///              用于消息的语言区域设置
pub fn print_mismatches(report: &Report, locale: &str) {
    if report.mismatches.is_empty() {
        println!("{}", t!("report.all_matched", locale = locale).green().bold());
        return;
    }

    println!("{}", "-".repeat(80));
    println!("{}", t!("report.mismatch_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));

    for mismatch in &report.mismatches {
        println!(
            "{}",
            t!(
                "report.mismatch_line",
                locale = locale,
                module = mismatch.module,
                expected = format!("{:?}", expected_names(&mismatch.expected)),
                actual = format!("{:?}", mismatch.actual.as_str())
            )
            .red()
        );
    }
}

/// The canonical names of a category set, in category order.
/// 类别集合的规范名称，按类别顺序排列。
pub fn expected_names(categories: &BTreeSet<Category>) -> Vec<&'static str> {
    categories.iter().map(Category::as_str).collect()
}

//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML batch reports.
//! It creates styled HTML files with per-category statistics, a detailed
//! results table, and interactive toggles for viewing captured output.
//!
//! 此模块处理 HTML 批次报告的生成。
//! 它创建带有按类别统计、详细结果表格和查看捕获输出的交互开关的
//! 样式化 HTML 文件。

use anyhow::Result;
use chrono::Local;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::core::models::{Category, ModuleResult};
use crate::core::report::Report;
use crate::infra::t;
use crate::reporting::console::expected_names;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Embedded JavaScript for HTML report interactivity / HTML 报告交互性的嵌入式 JavaScript
const HTML_SCRIPT: &str = include_str!("assets/report.js");

/// Generates a comprehensive HTML report from batch results.
/// Creates a styled HTML file with per-category statistics, a detailed
/// results table with collapsible captured output, and the mismatch list.
///
/// 从批次结果生成综合的 HTML 报告。
/// 创建一个样式化的 HTML 文件，包含按类别统计、带可折叠捕获输出的
/// 详细结果表格以及不符合预期的列表。
///
/// # Arguments / 参数
/// * `results` - The batch results, in the order they were produced
///               批次结果，按产生顺序排列
/// * `report` - The aggregated report the statistics are read from
///              读取统计数据的聚合报告
/// * `output_path` - The file path where the HTML report will be saved
///                   保存 HTML 报告的文件路径
/// * `locale` - The locale to use for internationalization
///              用于国际化使用的语言环境
pub fn generate_html_report(
    results: &[ModuleResult],
    report: &Report,
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let markup = render_report(results, report, locale, &timestamp);
    fs::write(output_path, markup.into_string())?;
    Ok(())
}

fn render_report(
    results: &[ModuleResult],
    report: &Report,
    locale: &str,
    timestamp: &str,
) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                title { (t!("html_report.title", locale = locale)) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header", locale = locale)) }
                p class="generated-at" {
                    (t!("html_report.generated_at", locale = locale, time = timestamp))
                }

                div class="summary-container" {
                    div class="summary-item" {
                        span class="count" { (results.len()) }
                        span class="label" { (t!("html_report.summary.total", locale = locale)) }
                    }
                    @for category in Category::all() {
                        @let count = report.by_category.get(&category).map_or(0, BTreeSet::len);
                        div class="summary-item" {
                            span class=(format!("count {}", category.status_class())) { (count) }
                            span class="label" { (category) }
                        }
                    }
                }

                table {
                    thead {
                        tr {
                            th { (t!("html_report.table.header.module", locale = locale)) }
                            th class="status-col" {
                                (t!("html_report.table.header.category", locale = locale))
                            }
                            th class="exit-code-cell" {
                                (t!("html_report.table.header.exit_code", locale = locale))
                            }
                            th class="duration-cell" {
                                (t!("html_report.table.header.duration", locale = locale))
                            }
                        }
                    }
                    tbody {
                        @for (i, module_result) in results.iter().enumerate() {
                            @let output_id = format!("output-{}", i);
                            @let has_output = !module_result.result.stdout.is_empty()
                                || !module_result.result.stderr.is_empty();
                            tr {
                                td { (module_result.module) }
                                td class="status-col" {
                                    div class=(format!(
                                        "status-cell {}",
                                        module_result.category.status_class()
                                    )) {
                                        (module_result.category)
                                    }
                                    @if has_output {
                                        div class="output-toggle"
                                            onclick=(format!("toggleOutput('{}')", output_id)) {
                                            (t!("html_report.toggle_output", locale = locale))
                                        }
                                    }
                                }
                                td class="exit-code-cell" { (module_result.exit_code_str()) }
                                td class="duration-cell" {
                                    (format!("{:.2}s", module_result.duration.as_secs_f64()))
                                }
                            }
                            @if has_output {
                                tr id=(output_id) style="display:none;" {
                                    td colspan="4" {
                                        pre class="output-content" {
                                            (module_result.result.stdout)
                                            (module_result.result.stderr)
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                @if report.is_success() {
                    p class="all-matched" { (t!("html_report.all_matched", locale = locale)) }
                } @else {
                    h2 { (t!("html_report.mismatch_header", locale = locale)) }
                    ul class="mismatch-list" {
                        @for mismatch in &report.mismatches {
                            li {
                                (t!(
                                    "report.mismatch_line",
                                    locale = locale,
                                    module = mismatch.module,
                                    expected = format!("{:?}", expected_names(&mismatch.expected)),
                                    actual = format!("{:?}", mismatch.actual.as_str())
                                ))
                            }
                        }
                    }
                }

                script { (PreEscaped(HTML_SCRIPT)) }
            }
        }
    }
}

//! # Reporting Module / 报告模块
//!
//! This module handles the generation and display of batch reports in
//! multiple formats. It provides functionality for printing colorful,
//! formatted summaries to the console and for writing styled HTML and
//! machine-readable JSON reports, with internationalization support.
//!
//! 此模块处理多种格式的批次报告生成和显示。
//! 它提供在控制台打印彩色格式化摘要、写出样式化 HTML 报告和
//! 机器可读 JSON 报告的功能，支持国际化。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_mismatches, print_summary};
pub use html::generate_html_report;
pub use json::write_json_report;

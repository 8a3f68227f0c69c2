//! # Module Runner Library / Module Runner 库
//!
//! This library provides the core functionality for the Module Runner tool,
//! a configuration-driven batch supervisor that runs a test suite module by
//! module, watches for stalled runs, and checks outcomes against an
//! expectation table.
//!
//! 此库为 Module Runner 工具提供核心功能，
//! 这是一个配置驱动的批量监管器，按模块逐次运行测试套件，
//! 监视停滞的运行，并将结果与预期表比对。
//!
//! ## Modules / 模块
//!
//! - `core` - Core data models, batch execution engine, and result aggregation
//! - `infra` - Infrastructure services like process supervision and file system operations
//! - `reporting` - Batch result reporting and visualization
//! - `cli` - Command-line interface
//! - `commands` - The CLI subcommand implementations
//!
//! - `core` - 核心数据模型、批量执行引擎和结果聚合
//! - `infra` - 基础设施服务，如进程监管和文件系统操作
//! - `reporting` - 批次结果报告和可视化
//! - `cli` - 命令行接口
//! - `commands` - CLI 子命令实现

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::execution;
pub use crate::core::models;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    // Detect system locale and set it for i18n.
    // Fallback to "en" if detection fails.
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    let lang = if available_locales.contains(&locale.as_str()) {
        &locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

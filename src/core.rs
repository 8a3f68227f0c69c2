//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Module Runner,
//! including data models, configuration, batch execution, and result
//! aggregation logic.
//!
//! 此模块包含 Module Runner 的核心功能，
//! 包括数据模型、配置、批量执行和结果聚合逻辑。

pub mod models;
pub mod config;
pub mod execution;
pub mod planner;
pub mod report;

// Re-exports
pub use models::{Category, CommandResult, ModuleResult};
pub use config::TestPlan;
pub use execution::run_module;
pub use report::aggregate;

//! # Test Plan Configuration Module / 测试计划配置模块
//!
//! This module defines the TOML test plan that drives a batch run: the
//! runner command template, the idle timeout, the module list, and the
//! expectation table the final results are compared against.
//!
//! 此模块定义驱动批量运行的 TOML 测试计划：运行器命令模板、
//! 空闲超时、模块列表，以及用于比对最终结果的预期表。

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::models::Category;
use crate::infra::t;

/// The placeholder the module identifier is substituted for in the
/// command template.
/// 命令模板中被模块标识符替换的占位符。
pub const MODULE_PLACEHOLDER: &str = "{module}";

/// The starter plan embedded into the binary, written out by `init`.
/// 内嵌到二进制中的初始计划，由 `init` 写出。
const DEFAULT_PLAN_TOML: &str = include_str!("assets/default_plan.toml");

static DEFAULT_PLAN: Lazy<TestPlan> =
    Lazy::new(|| toml::from_str(DEFAULT_PLAN_TOML).expect("embedded default plan is valid TOML"));

/// Returns the embedded starter plan.
pub fn default_plan() -> &'static TestPlan {
    &DEFAULT_PLAN
}

/// Maps each category to the set of modules allowed to finish in it.
/// A module may appear under several categories when its outcome is known
/// to vary between runs.
///
/// 将每个类别映射到允许以该类别结束的模块集合。
/// 当某个模块的结果在多次运行间会变化时，它可以出现在多个类别下。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectationTable(pub BTreeMap<Category, BTreeSet<String>>);

impl ExpectationTable {
    /// Builds a table that expects every given module to pass.
    /// 构建一个预期所有给定模块都通过的表。
    pub fn all_passed(modules: &[String]) -> Self {
        let mut table = BTreeMap::new();
        table.insert(Category::Passed, modules.iter().cloned().collect());
        Self(table)
    }

    /// Whether the table holds no module at all.
    /// 该表是否不包含任何模块。
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|modules| modules.is_empty())
    }

    /// All categories this module is allowed to finish in. The scan covers
    /// the whole table; an unknown module yields an empty set, so any
    /// outcome for it is a mismatch.
    ///
    /// 此模块允许结束于的所有类别。扫描覆盖整个表；
    /// 未知模块得到空集合，因此它的任何结果都是不匹配。
    pub fn expected_categories_for(&self, module: &str) -> BTreeSet<Category> {
        self.0
            .iter()
            .filter(|(_, modules)| modules.contains(module))
            .map(|(category, _)| *category)
            .collect()
    }

    /// Every module mentioned anywhere in the table.
    /// 表中任意位置提到的所有模块。
    pub fn modules(&self) -> BTreeSet<&str> {
        self.0
            .values()
            .flat_map(|modules| modules.iter().map(String::as_str))
            .collect()
    }
}

/// Represents the entire test plan, loaded from a TOML file.
/// It holds global settings, the list of modules to run, and the
/// expectation table.
///
/// 代表从 TOML 文件加载的整个测试计划。
/// 它包含全局设置、要运行的模块列表和预期表。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TestPlan {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 运行器输出消息的语言（例如 "en"、"zh-CN"）。
    /// 如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// The runner command template. It must contain the `{module}`
    /// placeholder; every occurrence is replaced with the module identifier
    /// before the command line is tokenized.
    ///
    /// 运行器命令模板。它必须包含 `{module}` 占位符；
    /// 在命令行被分词之前，每一处占位符都会被模块标识符替换。
    pub command: String,

    /// Seconds a module may stay silent before its process is killed.
    /// The clock restarts on every output line, so a slow but talkative
    /// run is never cut off.
    ///
    /// 模块在其进程被终止前可以保持静默的秒数。
    /// 每输出一行计时都会重新开始，因此缓慢但持续输出的运行不会被切断。
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// The modules to run, in batch order.
    /// 要运行的模块，按批量运行的顺序排列。
    pub modules: Vec<String>,

    /// The expectation table. When omitted or empty, every listed module
    /// is expected to pass.
    ///
    /// 预期表。省略或为空时，预期所有列出的模块都通过。
    #[serde(default)]
    pub expected: ExpectationTable,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_idle_timeout_secs() -> u64 {
    60
}

impl TestPlan {
    /// Reads and parses a plan file, resolving the path first.
    /// 读取并解析计划文件，首先解析路径。
    pub fn load(path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = crate::infra::fs::absolute_path(path)
            .with_context(|| t!("config.read_failed", path = path.display()))?;

        let content = fs::read_to_string(&config_path)
            .with_context(|| t!("config.read_failed", path = config_path.display()))?;

        let plan: TestPlan =
            toml::from_str(&content).with_context(|| t!("config.parse_failed"))?;

        Ok((plan, config_path))
    }

    /// Rejects plans whose command template cannot produce a runnable
    /// command line.
    pub fn validate(&self) -> Result<()> {
        if self.command.trim().is_empty() {
            bail!(t!("config.empty_command"));
        }
        if !self.command.contains(MODULE_PLACEHOLDER) {
            bail!(t!("config.missing_placeholder", placeholder = MODULE_PLACEHOLDER));
        }
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// The table results are compared against: the configured one, or a
    /// synthesized all-passed table when the plan leaves it empty.
    ///
    /// 结果比对所用的表：配置中的表；当计划将其留空时，
    /// 则合成一个全部预期通过的表。
    pub fn expectation_table(&self) -> ExpectationTable {
        if self.expected.is_empty() {
            ExpectationTable::all_passed(&self.modules)
        } else {
            self.expected.clone()
        }
    }

    /// Modules mentioned in the expectation table but missing from the
    /// module list. These are worth a warning, not an error.
    ///
    /// 预期表中提到但模块列表中缺失的模块。这些值得警告，而非报错。
    pub fn unknown_expected_modules(&self) -> Vec<&str> {
        let known: BTreeSet<&str> = self.modules.iter().map(String::as_str).collect();
        self.expected
            .modules()
            .into_iter()
            .filter(|module| !known.contains(module))
            .collect()
    }
}

//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures shared by the runner.
//! It includes the captured output of a supervised process, the fixed
//! outcome taxonomy derived from exit codes, and the per-module record
//! produced by a batch run.
//!
//! 此模块定义了运行器共享的核心数据结构。
//! 它包括被监管进程的捕获输出、由退出码得出的固定结果分类，
//! 以及批量运行产生的每模块记录。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The captured outcome of one supervised process run.
///
/// `exit_code` is `None` exactly when the supervisor killed the process for
/// producing no output within the idle window. A process terminated by an
/// outside signal still reports a code (negative on Unix, the way a shell
/// reports it).
///
/// 一次被监管进程运行的捕获结果。
/// 当且仅当监管器因进程在空闲窗口内没有任何输出而将其终止时，
/// `exit_code` 为 `None`。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandResult {
    /// The process exit code, or `None` if it was killed on idle timeout.
    /// 进程退出码；若因空闲超时被终止则为 `None`。
    pub exit_code: Option<i32>,
    /// Everything the process wrote to stdout, newline separated.
    /// 进程写入 stdout 的全部内容，按行分隔。
    pub stdout: String,
    /// Everything the process wrote to stderr, newline separated.
    /// 进程写入 stderr 的全部内容，按行分隔。
    pub stderr: String,
}

impl CommandResult {
    /// Whether the supervisor killed this process for going silent.
    /// 此进程是否因长时间无输出而被监管器终止。
    pub fn timed_out(&self) -> bool {
        self.exit_code.is_none()
    }
}

/// The fixed taxonomy a module outcome is classified into.
///
/// The canonical names are stable identifiers shared with the expectation
/// table and the serialized reports; they are data, not localized text.
///
/// 模块结果被归入的固定分类。
/// 规范名称是与预期表和序列化报告共享的稳定标识符，属于数据而非本地化文本。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    /// Exit code 0: every test in the module passed.
    /// 退出码 0：模块中的所有测试都通过。
    #[serde(rename = "passed")]
    Passed,
    /// Exit code 1: the module ran but some tests failed.
    /// 退出码 1：模块运行了，但部分测试失败。
    #[serde(rename = "failed")]
    Failed,
    /// Exit code 2: the runner could not collect the module's tests.
    /// 退出码 2：运行器无法收集该模块的测试。
    #[serde(rename = "tests collection error")]
    CollectionError,
    /// Exit code 4: the runner was invoked with unusable arguments.
    /// 退出码 4：运行器收到了无法使用的参数。
    #[serde(rename = "pytest usage error")]
    UsageError,
    /// Exit code 5: the module matched no tests at all.
    /// 退出码 5：该模块没有匹配到任何测试。
    #[serde(rename = "no test collected")]
    NoTestCollected,
    /// Any other exit code, or a run killed on idle timeout.
    /// 任何其他退出码，或因空闲超时被终止的运行。
    #[serde(rename = "fatal error or timeout")]
    FatalOrTimeout,
}

impl Category {
    /// Maps a process exit code to its category.
    ///
    /// `None` means the supervisor killed the process, which lands in the
    /// same catch-all as unknown codes.
    ///
    /// 将进程退出码映射为类别。
    /// `None` 表示进程被监管器终止，与未知退出码一样落入兜底类别。
    pub fn from_exit_code(exit_code: Option<i32>) -> Self {
        match exit_code {
            Some(0) => Category::Passed,
            Some(1) => Category::Failed,
            Some(2) => Category::CollectionError,
            Some(4) => Category::UsageError,
            Some(5) => Category::NoTestCollected,
            // Exit code 3 is pytest's internal error; crashed or corrupted
            // runs surface it too, so it stays folded into the catch-all.
            _ => Category::FatalOrTimeout,
        }
    }

    /// The canonical name of this category.
    /// 此类别的规范名称。
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Passed => "passed",
            Category::Failed => "failed",
            Category::CollectionError => "tests collection error",
            Category::UsageError => "pytest usage error",
            Category::NoTestCollected => "no test collected",
            Category::FatalOrTimeout => "fatal error or timeout",
        }
    }

    /// Every category, in declaration order.
    /// 所有类别，按声明顺序。
    pub fn all() -> [Category; 6] {
        [
            Category::Passed,
            Category::Failed,
            Category::CollectionError,
            Category::UsageError,
            Category::NoTestCollected,
            Category::FatalOrTimeout,
        ]
    }

    /// Gets the CSS class used for this category in the HTML report.
    /// 获取 HTML 报告中此类别使用的 CSS 类。
    pub fn status_class(&self) -> &'static str {
        match self {
            Category::Passed => "status-passed",
            Category::Failed => "status-failed",
            Category::CollectionError => "status-collection-error",
            Category::UsageError => "status-usage-error",
            Category::NoTestCollected => "status-no-test-collected",
            Category::FatalOrTimeout => "status-fatal-or-timeout",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record a batch run keeps for one module: the module identifier, the
/// captured process output, its classified category, and the wall time the
/// supervised run took.
///
/// 批量运行为每个模块保留的记录：模块标识符、捕获的进程输出、
/// 归类后的类别，以及这次受监管运行所花的墙钟时间。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleResult {
    /// The module identifier the runner command was built from.
    /// 用于构造运行器命令的模块标识符。
    pub module: String,
    /// The captured output and exit code of the supervised run.
    /// 受监管运行捕获的输出和退出码。
    pub result: CommandResult,
    /// The category the exit code classified into.
    /// 退出码归入的类别。
    pub category: Category,
    /// Wall time of the supervised run.
    /// 受监管运行的墙钟时间。
    pub duration: Duration,
}

impl ModuleResult {
    /// The exit code rendered for display, with `None` spelled out for
    /// runs killed on idle timeout.
    /// 用于显示的退出码；因空闲超时被终止的运行显示为 `None`。
    pub fn exit_code_str(&self) -> String {
        match self.result.exit_code {
            Some(code) => code.to_string(),
            None => "None".to_string(),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.category == Category::Passed
    }
}

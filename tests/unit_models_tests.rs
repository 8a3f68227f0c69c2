//! # Models Module Unit Tests / Models 模块单元测试
//!
//! This module contains comprehensive unit tests for the `models.rs` module,
//! covering the exit-code classifier, the canonical category strings, and
//! the per-module result helpers.
//!
//! 此模块包含 `models.rs` 模块的全面单元测试，
//! 覆盖退出码分类器、规范类别字符串以及逐模块结果的辅助方法。

use module_runner::core::models::{Category, CommandResult, ModuleResult};
use std::time::Duration;

/// Helper function to build a module result / 构建模块结果的辅助函数
fn make_result(module: &str, exit_code: Option<i32>) -> ModuleResult {
    ModuleResult {
        module: module.to_string(),
        category: Category::from_exit_code(exit_code),
        result: CommandResult {
            exit_code,
            stdout: String::new(),
            stderr: String::new(),
        },
        duration: Duration::from_millis(10),
    }
}

#[cfg(test)]
mod category_tests {
    use super::*;

    #[test]
    fn test_classifier_maps_known_exit_codes() {
        // 每个已知退出码映射到各自的类别
        assert_eq!(Category::from_exit_code(Some(0)), Category::Passed);
        assert_eq!(Category::from_exit_code(Some(1)), Category::Failed);
        assert_eq!(Category::from_exit_code(Some(2)), Category::CollectionError);
        assert_eq!(Category::from_exit_code(Some(4)), Category::UsageError);
        assert_eq!(Category::from_exit_code(Some(5)), Category::NoTestCollected);
    }

    #[test]
    fn test_classifier_folds_everything_else_into_fatal() {
        // 退出码 3、未知码、负数码和缺失码都归入兜底类别
        assert_eq!(Category::from_exit_code(Some(3)), Category::FatalOrTimeout);
        assert_eq!(Category::from_exit_code(Some(7)), Category::FatalOrTimeout);
        assert_eq!(Category::from_exit_code(Some(127)), Category::FatalOrTimeout);
        assert_eq!(Category::from_exit_code(Some(-9)), Category::FatalOrTimeout);
        assert_eq!(Category::from_exit_code(Some(-15)), Category::FatalOrTimeout);
        assert_eq!(Category::from_exit_code(None), Category::FatalOrTimeout);
    }

    #[test]
    fn test_category_display_strings_are_canonical() {
        assert_eq!(Category::Passed.to_string(), "passed");
        assert_eq!(Category::Failed.to_string(), "failed");
        assert_eq!(Category::CollectionError.to_string(), "tests collection error");
        assert_eq!(Category::UsageError.to_string(), "pytest usage error");
        assert_eq!(Category::NoTestCollected.to_string(), "no test collected");
        assert_eq!(Category::FatalOrTimeout.to_string(), "fatal error or timeout");
    }

    #[test]
    fn test_category_as_str_matches_display() {
        for category in Category::all() {
            assert_eq!(category.as_str(), category.to_string());
        }
    }

    #[test]
    fn test_category_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&Category::CollectionError).unwrap();
        assert_eq!(json, "\"tests collection error\"");

        let parsed: Category = serde_json::from_str("\"no test collected\"").unwrap();
        assert_eq!(parsed, Category::NoTestCollected);
    }

    #[test]
    fn test_category_order_puts_passed_first_and_fatal_last() {
        // 报告分组依赖这一排序
        let mut categories = Category::all().to_vec();
        categories.sort();
        assert_eq!(categories.first(), Some(&Category::Passed));
        assert_eq!(categories.last(), Some(&Category::FatalOrTimeout));
    }

    #[test]
    fn test_category_all_lists_each_variant_once() {
        let all = Category::all();
        assert_eq!(all.len(), 6);
        for category in all {
            assert_eq!(all.iter().filter(|c| **c == category).count(), 1);
        }
    }

    #[test]
    fn test_category_status_classes() {
        assert_eq!(Category::Passed.status_class(), "status-passed");
        assert_eq!(Category::Failed.status_class(), "status-failed");
        assert_eq!(
            Category::FatalOrTimeout.status_class(),
            "status-fatal-or-timeout"
        );
    }
}

#[cfg(test)]
mod command_result_tests {
    use super::*;

    #[test]
    fn test_timed_out_means_missing_exit_code() {
        let killed = CommandResult {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(killed.timed_out());
    }

    #[test]
    fn test_signal_death_is_not_a_timeout() {
        // 信号死亡携带负数退出码，不应与空闲终止混淆
        let signalled = CommandResult {
            exit_code: Some(-9),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(!signalled.timed_out());

        let normal = CommandResult {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(!normal.timed_out());
    }
}

#[cfg(test)]
mod module_result_tests {
    use super::*;

    #[test]
    fn test_exit_code_str_formats_codes_and_none() {
        assert_eq!(make_result("m", Some(2)).exit_code_str(), "2");
        assert_eq!(make_result("m", Some(-15)).exit_code_str(), "-15");
        assert_eq!(make_result("m", None).exit_code_str(), "None");
    }

    #[test]
    fn test_is_passed_tracks_category() {
        assert!(make_result("m", Some(0)).is_passed());
        assert!(!make_result("m", Some(1)).is_passed());
        assert!(!make_result("m", None).is_passed());
    }

    #[test]
    fn test_module_result_serializes_category_string() {
        let json = serde_json::to_value(make_result("pkg.tests.test_a", Some(1))).unwrap();
        assert_eq!(json["module"], "pkg.tests.test_a");
        assert_eq!(json["category"], "failed");
        assert_eq!(json["result"]["exit_code"], 1);
    }
}

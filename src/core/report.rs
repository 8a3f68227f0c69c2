//! # Result Aggregation Module / 结果聚合模块
//!
//! This module condenses a finished batch into a report: modules grouped
//! by outcome category, plus the ordered list of modules whose category
//! fell outside the expectation table. The report decides the process
//! exit status.
//!
//! 此模块把已完成的批次浓缩为一份报告：按结果类别分组的模块，
//! 以及类别落在预期表之外的模块的有序列表。报告决定进程退出状态。

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::{
    config::ExpectationTable,
    models::{Category, ModuleResult},
};

/// A module whose observed category was not among its expected ones.
/// 观察到的类别不在预期类别之中的模块。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    /// The module name.
    /// 模块名。
    pub module: String,
    /// Every category the expectation table accepts for this module.
    /// 预期表为该模块接受的全部类别。
    pub expected: BTreeSet<Category>,
    /// The category the batch actually produced.
    /// 批次实际产生的类别。
    pub actual: Category,
}

/// The aggregate view of one finished batch.
/// 一个已完成批次的聚合视图。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// Module names grouped by their observed category.
    /// 按观察到的类别分组的模块名。
    pub by_category: BTreeMap<Category, BTreeSet<String>>,
    /// The mismatches, in the order the results were produced.
    /// 不符合预期的项，按结果产生的顺序排列。
    pub mismatches: Vec<Mismatch>,
}

impl Report {
    /// Whether every module landed in an expected category.
    /// 是否每个模块都落在预期类别中。
    pub fn is_success(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Aggregates batch results against the expectation table.
///
/// Every result lands in `by_category`; a result whose category the table
/// does not accept for that module also lands in `mismatches`. A module
/// absent from the table has an empty expected set, so any outcome for it
/// is a mismatch. Feeding the same results twice yields the same report.
///
/// 根据预期表聚合批次结果。
/// 每个结果都进入 `by_category`；类别未被表为该模块接受的结果
/// 同时进入 `mismatches`。不在表中的模块预期集合为空，
/// 因此它的任何结果都是不符合项。相同输入得到相同报告。
pub fn aggregate(results: &[ModuleResult], expectations: &ExpectationTable) -> Report {
    let mut report = Report::default();

    for module_result in results {
        report
            .by_category
            .entry(module_result.category)
            .or_default()
            .insert(module_result.module.clone());

        let expected = expectations.expected_categories_for(&module_result.module);
        if !expected.contains(&module_result.category) {
            report.mismatches.push(Mismatch {
                module: module_result.module.clone(),
                expected,
                actual: module_result.category,
            });
        }
    }

    report
}

//! # JSON Reporting Module / JSON 报告模块
//!
//! This module writes batch results as a machine-readable JSON document,
//! combining the raw per-module results with the aggregated report so CI
//! jobs can archive one file per run.
//!
//! 此模块将批次结果写成机器可读的 JSON 文档，
//! 把逐模块的原始结果与聚合报告合并，便于 CI 任务每次运行归档一个文件。

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::core::models::ModuleResult;
use crate::core::report::Report;

/// The top-level shape of the JSON document.
/// JSON 文档的顶层结构。
#[derive(Serialize)]
struct RunRecord<'a> {
    /// When the report was written, as an RFC 3339 timestamp.
    /// 报告写入时间，RFC 3339 时间戳。
    generated_at: String,
    /// The batch results, in the order they were produced.
    /// 批次结果，按产生顺序排列。
    results: &'a [ModuleResult],
    #[serde(flatten)]
    report: &'a Report,
}

/// Writes the batch results and aggregated report as pretty-printed JSON.
/// 将批次结果和聚合报告写成带缩进的 JSON。
pub fn write_json_report(
    results: &[ModuleResult],
    report: &Report,
    output_path: &Path,
) -> Result<()> {
    let record = RunRecord {
        generated_at: Local::now().to_rfc3339(),
        results,
        report,
    };

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON report at {}", output_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &record)?;
    Ok(())
}

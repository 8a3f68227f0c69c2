//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides small file system utilities used by the
//! configuration loader.
//!
//! 此模块提供配置加载器使用的小型文件系统实用功能。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

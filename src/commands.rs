//! # Commands Module / 命令模块
//!
//! This module contains the implementation of every CLI subcommand:
//! running the whole plan, ad-hoc single invocations, and the test plan
//! initialization wizard.
//!
//! 此模块包含每个 CLI 子命令的实现：
//! 运行整个计划、临时单次调用以及测试计划初始化向导。

pub mod exec;
pub mod init;
pub mod run;

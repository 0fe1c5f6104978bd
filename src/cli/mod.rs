//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `scan`: 预览将被处理的候选文件
//! - `process`: 分批处理候选文件
//!
//! 所有运行参数都可以通过 `ARCHSWEEP_*` 环境变量提供。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: scan, process

pub mod process;
pub mod scan;

use clap::{Parser, Subcommand};

/// archsweep - 文档归档扫描与批量处理工具
#[derive(Parser)]
#[command(name = "archsweep")]
#[command(version)]
#[command(about = "Memory-bounded scanning and batch processing for document archives", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// List the files a processing run would pick up
    Scan(scan::ScanArgs),

    /// Process matching files in paced, fixed-size batches
    Process(process::ProcessArgs),
}

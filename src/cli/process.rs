//! # process 子命令 CLI 定义
//!
//! 分批处理候选文件：批大小、批间暂停、全局成功上限与单项操作。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 复用 `cli/scan.rs` 中的遍历参数
//! - 参数传递给 `commands/process.rs`

use super::scan::ScanOptions;
use crate::error::Result;
use crate::models::config::{self, DEFAULT_BATCH_SIZE, DEFAULT_PAUSE_SECS, DEFAULT_SUCCESS_CAP};
use crate::models::RunConfig;

use clap::builder::TypedValueParser as _;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 对每个候选文件执行的操作
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Action {
    /// Print each file as it is processed
    List,
    /// Append one CSV row (path, size, modification time) per file
    Report,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::List => write!(f, "list"),
            Action::Report => write!(f, "report"),
        }
    }
}

/// process 子命令参数
#[derive(Args, Debug)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub scan: ScanOptions,

    /// Number of files per batch
    #[arg(
        long,
        env = "ARCHSWEEP_BATCH_SIZE",
        default_value_t = DEFAULT_BATCH_SIZE,
        value_parser = clap::value_parser!(u64).range(1..).try_map(usize::try_from)
    )]
    pub batch_size: usize,

    /// Pause between batches, in seconds
    #[arg(long, env = "ARCHSWEEP_PAUSE", default_value_t = DEFAULT_PAUSE_SECS)]
    pub pause: f64,

    /// Stop pulling new files once this many have succeeded (checked per batch)
    #[arg(
        long,
        env = "ARCHSWEEP_CAP",
        default_value_t = DEFAULT_SUCCESS_CAP,
        value_parser = clap::value_parser!(u64).range(1..).try_map(usize::try_from)
    )]
    pub cap: usize,

    /// Operation applied to every file
    #[arg(long, value_enum, default_value_t = Action::List)]
    pub action: Action,

    /// CSV output for `--action report`
    #[arg(long, required_if_eq("action", "report"))]
    pub report: Option<PathBuf>,
}

impl ProcessArgs {
    /// 构造运行配置
    pub fn to_config(&self) -> Result<RunConfig> {
        let run_config = RunConfig::default()
            .with_scan(self.scan.to_config()?)
            .with_batch_size(self.batch_size)
            .with_pause(config::pause_from_secs(self.pause)?)
            .with_success_cap(self.cap);
        run_config.validate()?;
        Ok(run_config)
    }
}

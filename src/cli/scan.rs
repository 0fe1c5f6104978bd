//! # scan 子命令 CLI 定义
//!
//! 只遍历、不处理：预览候选文件。遍历参数也被 `process` 复用。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 与 `cli/process.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use crate::error::Result;
use crate::models::config::{DEFAULT_FORMATTED_PATTERN, DEFAULT_MAX_DEPTH};
use crate::models::{CandidateFilter, ScanConfig};

use clap::Args;
use std::path::PathBuf;

/// 遍历参数（scan 与 process 共用）
#[derive(Args, Debug)]
pub struct ScanOptions {
    /// Archive root directory
    pub root: PathBuf,

    /// Maximum directory depth to descend into (0 = root only)
    #[arg(long, env = "ARCHSWEEP_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Allowed file extensions, comma-separated and case-insensitive
    #[arg(
        long,
        env = "ARCHSWEEP_EXTENSIONS",
        value_delimiter = ',',
        default_value = "pdf,txt,doc,docx,xls,xlsx,ppt,pptx"
    )]
    pub ext: Vec<String>,

    /// Regex for names that are already formatted (matched at the start of the name)
    #[arg(long, env = "ARCHSWEEP_FORMATTED_PATTERN", default_value = DEFAULT_FORMATTED_PATTERN)]
    pub formatted_pattern: String,
}

impl ScanOptions {
    /// 构造遍历配置
    pub fn to_config(&self) -> Result<ScanConfig> {
        let filter = CandidateFilter::new(&self.ext, &self.formatted_pattern)?;
        Ok(ScanConfig::new(self.max_depth, filter))
    }
}

/// scan 子命令参数
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub scan: ScanOptions,

    /// Only print the summary, not every candidate
    #[arg(long, short, default_value_t = false)]
    pub quiet: bool,
}

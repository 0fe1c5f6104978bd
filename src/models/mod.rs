//! # 数据模型模块
//!
//! 定义扫描候选文件、运行配置与运行统计。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 子模块: candidate, config, stats

pub mod candidate;
pub mod config;
pub mod stats;

pub use candidate::Candidate;
pub use config::{CandidateFilter, RunConfig, ScanConfig};
pub use stats::{RunStats, Termination};

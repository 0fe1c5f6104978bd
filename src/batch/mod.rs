//! # 批量处理模块
//!
//! 提供内存受限的扫描与批量处理流水线。
//!
//! ## 功能
//! - 惰性、深度受限的候选文件遍历
//! - 固定批大小的顺序处理
//! - 批间暂停与全局成功上限
//! - 进度回调与统计
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `models/` 中的数据类型

pub mod collector;
pub mod runner;

pub use collector::CandidateWalker;
pub use runner::{BatchRunner, ProgressSink};

//! # 进度显示工具
//!
//! 封装 `indicatif` 提供统一的 spinner 样式，并实现批量执行器的进度回调。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 实现 `batch/runner.rs` 中的 `ProgressSink`
//! - 使用 `indicatif` crate

use crate::batch::ProgressSink;
use crate::models::RunStats;
use crate::utils::output;

use indicatif::{ProgressBar, ProgressStyle};

/// 创建 spinner（候选总数未知，只能显示不确定进度）
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {elapsed_precise} {msg}")
            .unwrap()
            .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// 基于 spinner 的批次进度输出
///
/// 每批结束打印一行 `Batch N: S processed, E errors`，并刷新 spinner 文本。
pub struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    pub fn new(pb: ProgressBar) -> Self {
        Self { pb }
    }

    /// 底层 spinner，用于在其上方输出消息
    pub fn bar(&self) -> &ProgressBar {
        &self.pb
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl ProgressSink for SpinnerProgress {
    fn batch_completed(&mut self, batch_index: usize, stats: &RunStats) {
        let line = format_batch_line(batch_index, stats);
        self.pb.suspend(|| output::print_info(&line));
        self.pb.set_message(format!(
            "{} processed, {} errors",
            stats.success(),
            stats.errors()
        ));
    }
}

/// 单批进度文本
pub fn format_batch_line(batch_index: usize, stats: &RunStats) -> String {
    format!(
        "Batch {}: {} processed, {} errors",
        batch_index,
        stats.success(),
        stats.errors()
    )
}

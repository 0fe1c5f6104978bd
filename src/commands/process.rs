//! # process 命令实现
//!
//! 惰性遍历归档目录，按批处理候选文件。
//!
//! ## 功能
//! - 固定批大小、批间暂停、全局成功上限
//! - Ctrl-C 在当前批结束后停止
//! - 单项操作：打印文件名，或写入 CSV 报告
//! - 结束后打印统计表
//!
//! ## 依赖关系
//! - 使用 `cli/process.rs` 定义的参数
//! - 使用 `batch/` 模块进行遍历与批处理
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{BatchRunner, CandidateWalker};
use crate::cli::process::{Action, ProcessArgs};
use crate::error::{Result, SweepError};
use crate::models::config::validate_root;
use crate::models::{Candidate, RunConfig, RunStats};
use crate::utils::progress::{self, SpinnerProgress};
use crate::utils::output;

use indicatif::ProgressBar;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Instant, UNIX_EPOCH};
use tabled::{Table, Tabled};

/// 统计表行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// 一次运行的结果
struct RunSummary {
    stats: RunStats,
    enumeration_errors: usize,
}

/// 执行 process 命令
pub fn execute(args: ProcessArgs) -> Result<()> {
    output::print_header("Batch Processing");

    // 配置错误必须在遍历开始前暴露
    let root = args.scan.root.clone();
    validate_root(&root)?;
    let config = args.to_config()?;

    output::print_info(&format!("Archive root: '{}'", root.display()));
    output::print_info(&format!(
        "Batch size: {}, pause: {:.1}s, safety limit: {} files",
        config.batch_size,
        config.pause.as_secs_f64(),
        config.success_cap
    ));
    output::print_info(&format!("Action: {}", args.action));

    let stop = install_interrupt_flag()?;
    output::print_info("Press Ctrl-C to stop after the current batch (twice to quit)");

    let start = Instant::now();
    let mut sink = SpinnerProgress::new(progress::create_spinner("Processing"));
    let summary = run_pipeline(
        &root,
        &config,
        args.action,
        args.report.as_deref(),
        stop,
        &mut sink,
    );
    sink.finish();
    let summary = summary?;

    print_summary(&summary, start.elapsed().as_secs_f64());

    if let Some(report) = &args.report {
        output::print_success(&format!("Report written to '{}'", report.display()));
    }

    Ok(())
}

/// 第一次 Ctrl-C 置位停止标志，标志已置位时再按一次直接退出
fn install_interrupt_flag() -> Result<Arc<AtomicBool>> {
    use signal_hook::consts::SIGINT;
    use signal_hook::flag;

    let stop = Arc::new(AtomicBool::new(false));
    let to_err =
        |e: std::io::Error| SweepError::Other(format!("Failed to install interrupt handler: {}", e));

    // 顺序不能颠倒：先检查标志再置位
    flag::register_conditional_shutdown(SIGINT, 1, Arc::clone(&stop)).map_err(to_err)?;
    flag::register(SIGINT, Arc::clone(&stop)).map_err(to_err)?;
    Ok(stop)
}

/// 遍历 + 批处理，返回统计
fn run_pipeline(
    root: &Path,
    config: &RunConfig,
    action: Action,
    report: Option<&Path>,
    stop: Arc<AtomicBool>,
    sink: &mut SpinnerProgress,
) -> Result<RunSummary> {
    let runner = BatchRunner::new(config).with_stop_flag(stop);
    let mut walker = CandidateWalker::new(root, &config.scan);
    let pb = sink.bar().clone();

    let stats = match action {
        Action::List => runner.run(walker.by_ref(), |c| list_item(c, &pb), sink),
        Action::Report => {
            let path = report.ok_or_else(|| {
                SweepError::InvalidArgument(
                    "--report is required for the report action".to_string(),
                )
            })?;
            let mut writer = ReportWriter::create(path)?;
            let stats = runner.run(
                walker.by_ref(),
                |c| match writer.append(c) {
                    Ok(()) => true,
                    Err(e) => {
                        let msg = format!("{}: {}", c.path().display(), e);
                        pb.suspend(|| output::print_warning(&msg));
                        false
                    }
                },
                sink,
            );
            writer.finish()?;
            stats
        }
    };

    Ok(RunSummary {
        stats,
        enumeration_errors: walker.enumeration_errors(),
    })
}

/// 打印文件名
fn list_item(candidate: &Candidate, pb: &ProgressBar) -> bool {
    pb.suspend(|| println!("   Processing: {}", candidate.file_name()));
    true
}

/// 打印统计表
fn print_summary(summary: &RunSummary, elapsed_secs: f64) {
    let stats = &summary.stats;

    output::print_separator();
    let rows = vec![
        SummaryRow {
            metric: "Time",
            value: format!("{:.1} s", elapsed_secs),
        },
        SummaryRow {
            metric: "Batches",
            value: stats.batches().to_string(),
        },
        SummaryRow {
            metric: "Processed",
            value: stats.processed().to_string(),
        },
        SummaryRow {
            metric: "Success",
            value: stats.success().to_string(),
        },
        SummaryRow {
            metric: "Errors",
            value: stats.errors().to_string(),
        },
        SummaryRow {
            metric: "Unreadable entries",
            value: summary.enumeration_errors.to_string(),
        },
        SummaryRow {
            metric: "Finished because",
            value: stats.termination().to_string(),
        },
    ];
    println!("{}", Table::new(&rows));

    output::print_done(&format!(
        "Processing complete: {} success, {} errors",
        stats.success(),
        stats.errors()
    ));
}

// ─────────────────────────────────────────────────────────────
// CSV 报告
// ─────────────────────────────────────────────────────────────

/// 报告行（`modified_unix` 取不到时留空）
#[derive(Debug, Serialize)]
struct ReportRow {
    path: String,
    depth: usize,
    size_bytes: u64,
    modified_unix: Option<u64>,
}

/// 流式 CSV 报告，每个文件写一行
///
/// 每次运行重新创建：已存在的同名文件会被截断。
struct ReportWriter {
    wtr: csv::Writer<File>,
    path: PathBuf,
}

impl ReportWriter {
    fn create(path: &Path) -> Result<Self> {
        let wtr = csv::Writer::from_path(path)?;
        Ok(Self {
            wtr,
            path: path.to_path_buf(),
        })
    }

    fn append(&mut self, candidate: &Candidate) -> Result<()> {
        let metadata = fs::metadata(candidate.path()).map_err(|e| SweepError::FileReadError {
            path: candidate.path().display().to_string(),
            source: e,
        })?;

        let modified_unix = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());

        self.wtr.serialize(ReportRow {
            path: candidate.path().display().to_string(),
            depth: candidate.depth(),
            size_bytes: metadata.len(),
            modified_unix,
        })?;
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.wtr.flush().map_err(|e| SweepError::FileWriteError {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

//! # 批量执行器
//!
//! 从惰性候选序列中按固定批大小取文件，逐个交给外部单项操作处理。
//!
//! ## 功能
//! - 单线程顺序执行，每批处理完才继续拉取
//! - 批间暂停，降低持续的文件系统压力
//! - 全局成功上限（只在整批处理完后检查）
//! - 在批次边界响应外部中断标志
//! - 成功/失败统计与每批进度回调
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 调用
//! - 使用 `models/` 中的 `Candidate`、`RunConfig`、`RunStats`
//! - 进度输出由 `utils/progress.rs` 实现 `ProgressSink`

use crate::models::{Candidate, RunConfig, RunStats, Termination};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// 批间暂停时检查中断标志的间隔
const PAUSE_SLICE: Duration = Duration::from_millis(100);

/// 批次完成通知
///
/// 纯信息性，不对执行器产生反压。
pub trait ProgressSink {
    /// 第 `batch_index` 批（从 1 开始）处理完毕，`stats` 为累计统计
    fn batch_completed(&mut self, batch_index: usize, stats: &RunStats);
}

impl ProgressSink for () {
    fn batch_completed(&mut self, _batch_index: usize, _stats: &RunStats) {}
}

/// 批量执行器
pub struct BatchRunner<'a> {
    config: &'a RunConfig,
    stop: Option<Arc<AtomicBool>>,
}

impl<'a> BatchRunner<'a> {
    /// 创建新的批量执行器
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config, stop: None }
    }

    /// 设置外部中断标志，在批次边界检查
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// 处理候选序列直到耗尽、达到成功上限或被中断
    ///
    /// `processor` 返回 `false` 计为失败，不会中止运行。
    pub fn run<I, F, S>(&self, candidates: I, mut processor: F, sink: &mut S) -> RunStats
    where
        I: IntoIterator<Item = Candidate>,
        F: FnMut(&Candidate) -> bool,
        S: ProgressSink + ?Sized,
    {
        let mut stats = RunStats::default();
        let mut batch: Vec<Candidate> = Vec::with_capacity(self.config.batch_size);

        for candidate in candidates {
            batch.push(candidate);
            if batch.len() < self.config.batch_size {
                continue;
            }

            self.flush(&mut batch, &mut processor, &mut stats, sink);
            self.pause();

            if stats.success() >= self.config.success_cap {
                stats.terminate(Termination::CapReached);
                break;
            }
            if self.is_stopped() {
                stats.terminate(Termination::Interrupted);
                break;
            }
        }

        // 尾批：不暂停，也不再检查上限
        if !batch.is_empty() {
            if self.is_stopped() {
                stats.terminate(Termination::Interrupted);
            } else {
                self.flush(&mut batch, &mut processor, &mut stats, sink);
            }
        }

        drop(batch);
        stats
    }

    /// 处理并清空当前批
    fn flush<F, S>(
        &self,
        batch: &mut Vec<Candidate>,
        processor: &mut F,
        stats: &mut RunStats,
        sink: &mut S,
    ) where
        F: FnMut(&Candidate) -> bool,
        S: ProgressSink + ?Sized,
    {
        for candidate in batch.drain(..) {
            let ok = processor(&candidate);
            stats.record(ok);
        }

        let index = stats.finish_batch();
        sink.batch_completed(index, stats);
    }

    /// 批间暂停，中断标志置位后提前返回
    fn pause(&self) {
        let pause = self.config.pause;
        if pause.is_zero() {
            return;
        }

        let stop = match &self.stop {
            Some(stop) => stop,
            None => {
                thread::sleep(pause);
                return;
            }
        };

        let deadline = Instant::now() + pause;
        while !stop.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep((deadline - now).min(PAUSE_SLICE));
        }
    }

    fn is_stopped(&self) -> bool {
        self.stop
            .as_ref()
            .map(|s| s.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::CandidateWalker;
    use crate::models::{CandidateFilter, ScanConfig};

    use std::cell::Cell;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// 记录每次批次通知：(批号, 成功, 失败)
    #[derive(Default)]
    struct Recorder {
        events: Vec<(usize, usize, usize)>,
    }

    impl ProgressSink for Recorder {
        fn batch_completed(&mut self, batch_index: usize, stats: &RunStats) {
            self.events
                .push((batch_index, stats.success(), stats.errors()));
        }
    }

    fn config(batch_size: usize, success_cap: usize) -> RunConfig {
        RunConfig::default()
            .with_batch_size(batch_size)
            .with_success_cap(success_cap)
            .with_pause(Duration::ZERO)
    }

    fn candidates(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate::new(PathBuf::from(format!("/archive/doc_{:03}.pdf", i)), 0))
            .collect()
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"data").unwrap();
    }

    /// 3 个目录，每个 10 个待处理 PDF 与 5 个已格式化文件；
    /// 其中 4 个文件名包含 "confidential"
    fn archive_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut confidential = 4;
        for year in ["2019", "2020", "2021"] {
            for i in 0..10 {
                let name = if confidential > 0 && i % 3 == 0 {
                    confidential -= 1;
                    format!("confidential_{:02}.pdf", i)
                } else {
                    format!("scan_{:02}.pdf", i)
                };
                touch(&dir.path().join(year).join(name));
            }
            for i in 1..=5 {
                touch(&dir.path().join(year).join(format!("{}-02-0{}_Brief.pdf", year, i)));
            }
        }
        dir
    }

    #[test]
    fn test_archive_scenario_all_succeed() {
        let dir = archive_tree();
        let config = config(25, 500);
        let walker = CandidateWalker::new(dir.path(), &config.scan);

        let mut sink = Recorder::default();
        let stats = BatchRunner::new(&config).run(walker, |_| true, &mut sink);

        assert_eq!(stats.success(), 30);
        assert_eq!(stats.errors(), 0);
        assert_eq!(stats.batches(), 2);
        assert_eq!(stats.termination(), Termination::Exhausted);
        assert_eq!(sink.events, vec![(1, 25, 0), (2, 30, 0)]);
    }

    #[test]
    fn test_archive_scenario_confidential_fails() {
        let dir = archive_tree();
        let config = config(25, 500);
        let walker = CandidateWalker::new(dir.path(), &config.scan);

        let stats = BatchRunner::new(&config).run(
            walker,
            |c| !c.file_name().contains("confidential"),
            &mut (),
        );

        assert_eq!(stats.success(), 26);
        assert_eq!(stats.errors(), 4);
        assert_eq!(stats.processed(), 30);
    }

    #[test]
    fn test_depth_zero_without_direct_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("2020").join("a.pdf"));
        touch(&dir.path().join("2021").join("b.pdf"));

        let config = config(25, 500).with_scan(ScanConfig::new(0, CandidateFilter::default()));
        let walker = CandidateWalker::new(dir.path(), &config.scan);

        let mut sink = Recorder::default();
        let stats = BatchRunner::new(&config).run(walker, |_| true, &mut sink);

        assert_eq!(stats.processed(), 0);
        assert_eq!(stats.batches(), 0);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn test_cap_checked_only_at_batch_boundary() {
        let config = config(4, 10);
        let pulled = Cell::new(0);
        let source = candidates(100).into_iter().inspect(|_| pulled.set(pulled.get() + 1));

        let stats = BatchRunner::new(&config).run(source, |_| true, &mut ());

        assert_eq!(stats.success(), 12);
        assert_eq!(stats.batches(), 3);
        assert_eq!(pulled.get(), 12);
        assert_eq!(stats.termination(), Termination::CapReached);
    }

    #[test]
    fn test_cap_upper_bound() {
        // 第一个文件失败，上限 100 在第 5 批之后才被越过
        let config = config(25, 100);
        let pulled = Cell::new(0);
        let source = candidates(300).into_iter().inspect(|_| pulled.set(pulled.get() + 1));

        let stats = BatchRunner::new(&config).run(
            source,
            |c| c.file_name() != "doc_000.pdf",
            &mut (),
        );

        assert_eq!(stats.success(), 124);
        assert_eq!(stats.errors(), 1);
        assert_eq!(pulled.get(), 125);
        assert!(stats.success() >= 100 && stats.success() <= 100 + 25 - 1);
        assert_eq!(stats.termination(), Termination::CapReached);
    }

    #[test]
    fn test_tail_batch_ignores_cap() {
        let config = config(4, 5);
        let mut sink = Recorder::default();
        let stats = BatchRunner::new(&config).run(candidates(6), |_| true, &mut sink);

        assert_eq!(stats.success(), 6);
        assert_eq!(stats.termination(), Termination::Exhausted);
        assert_eq!(sink.events, vec![(1, 4, 0), (2, 6, 0)]);
    }

    #[test]
    fn test_failures_never_abort() {
        let config = config(3, 500);
        let stats = BatchRunner::new(&config).run(candidates(10), |_| false, &mut ());

        assert_eq!(stats.success(), 0);
        assert_eq!(stats.errors(), 10);
        assert_eq!(stats.batches(), 4);
        assert_eq!(stats.termination(), Termination::Exhausted);
    }

    #[test]
    fn test_batches_are_full_except_tail() {
        let config = config(4, 500);
        let mut sizes = Vec::new();
        let mut last = 0;
        let mut sink = Recorder::default();
        BatchRunner::new(&config).run(candidates(11), |_| true, &mut sink);
        for (_, success, _) in &sink.events {
            sizes.push(success - last);
            last = *success;
        }
        assert_eq!(sizes, vec![4, 4, 3]);
    }

    #[test]
    fn test_idempotent_over_unchanged_tree() {
        let dir = archive_tree();
        let config = config(7, 500);
        let run = || {
            let walker = CandidateWalker::new(dir.path(), &config.scan);
            BatchRunner::new(&config).run(
                walker,
                |c| !c.file_name().contains("confidential"),
                &mut (),
            )
        };

        let first = run();
        let second = run();
        assert_eq!(first, second);
        assert_eq!(first.processed(), 30);
    }

    #[test]
    fn test_stop_flag_ends_run_at_boundary() {
        let config = config(2, 500);
        let stop = Arc::new(AtomicBool::new(false));
        let pulled = Cell::new(0);
        let source = candidates(10).into_iter().inspect(|_| pulled.set(pulled.get() + 1));

        let flag = Arc::clone(&stop);
        let stats = BatchRunner::new(&config).with_stop_flag(Arc::clone(&stop)).run(
            source,
            |c| {
                if c.file_name() == "doc_002.pdf" {
                    flag.store(true, Ordering::Relaxed);
                }
                true
            },
            &mut (),
        );

        assert_eq!(stats.processed(), 4);
        assert_eq!(stats.batches(), 2);
        assert_eq!(pulled.get(), 4);
        assert_eq!(stats.termination(), Termination::Interrupted);
    }

    #[test]
    fn test_stop_flag_cuts_pause_short() {
        let config = config(1, 500).with_pause(Duration::from_secs(30));
        let stop = Arc::new(AtomicBool::new(true));

        let started = Instant::now();
        let stats = BatchRunner::new(&config)
            .with_stop_flag(stop)
            .run(candidates(3), |_| true, &mut ());

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(stats.processed(), 1);
        assert_eq!(stats.termination(), Termination::Interrupted);
    }
}

//! # 运行统计
//!
//! 一次运行中单调累加的成功/失败计数，只由 `BatchRunner` 修改，
//! 运行结束后以只读形式交给调用方。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 更新
//! - 被 `commands/process.rs` 与 `utils/progress.rs` 读取

use std::fmt;

/// 运行结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Termination {
    /// 候选文件已全部处理
    #[default]
    Exhausted,
    /// 成功数达到全局上限
    CapReached,
    /// 在批次边界被外部中断
    Interrupted,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exhausted => write!(f, "all candidates processed"),
            Termination::CapReached => write!(f, "global success cap reached"),
            Termination::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// 运行统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    success: usize,
    errors: usize,
    batches: usize,
    termination: Termination,
}

impl RunStats {
    /// 成功数量
    pub fn success(&self) -> usize {
        self.success
    }

    /// 失败数量
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// 已交给单项操作的文件数（success + errors）
    pub fn processed(&self) -> usize {
        self.success + self.errors
    }

    /// 已清空的批次数（含尾批）
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// 运行结束原因
    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub(crate) fn record(&mut self, ok: bool) {
        if ok {
            self.success += 1;
        } else {
            self.errors += 1;
        }
    }

    pub(crate) fn finish_batch(&mut self) -> usize {
        self.batches += 1;
        self.batches
    }

    pub(crate) fn terminate(&mut self, termination: Termination) {
        self.termination = termination;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts() {
        let mut stats = RunStats::default();
        stats.record(true);
        stats.record(false);
        stats.record(true);
        assert_eq!(stats.success(), 2);
        assert_eq!(stats.errors(), 1);
        assert_eq!(stats.processed(), 3);
        assert_eq!(stats.finish_batch(), 1);
        assert_eq!(stats.termination(), Termination::Exhausted);
    }
}

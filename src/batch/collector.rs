//! # 候选文件遍历器
//!
//! 深度受限、惰性的目录遍历，逐个产出符合过滤条件的文件。
//!
//! ## 功能
//! - 深度优先遍历，同级顺序取决于底层目录列表
//! - 跳过以 `.` 开头的条目（目录连同整个子树）
//! - 超过最大深度的目录不再进入
//! - 权限错误、符号链接环等枚举错误只计数，不向调用方抛出
//! - 悬空链接与遍历途中消失的条目直接跳过，不计数
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs`、`commands/process.rs` 调用
//! - 使用 `walkdir` 遍历目录（内部维护打开目录的显式栈）
//! - 使用 `models/config.rs` 中的 `CandidateFilter`

use crate::models::{Candidate, CandidateFilter, ScanConfig};

use std::io;
use std::path::Path;
use walkdir::{DirEntry, FilterEntry, IntoIter, WalkDir};

/// 惰性候选文件遍历器
///
/// 每次调用 [`CandidateWalker::new`] 都从根目录重新开始；遍历中途不可重启。
pub struct CandidateWalker {
    inner: FilterEntry<IntoIter, fn(&DirEntry) -> bool>,
    filter: CandidateFilter,
    enumeration_errors: usize,
}

impl CandidateWalker {
    /// 从 `root` 开始遍历
    pub fn new(root: &Path, config: &ScanConfig) -> Self {
        // walkdir 中根目录下的条目深度为 1，所以文件所在目录深度 = 条目深度 - 1
        let inner = WalkDir::new(root)
            .follow_links(true)
            .max_depth(config.max_depth.saturating_add(1))
            .into_iter()
            .filter_entry(is_visible as fn(&DirEntry) -> bool);

        Self {
            inner,
            filter: config.filter.clone(),
            enumeration_errors: 0,
        }
    }

    /// 已吞掉的枚举错误数量
    pub fn enumeration_errors(&self) -> usize {
        self.enumeration_errors
    }
}

impl Iterator for CandidateWalker {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    // 该子树不再产出任何内容
                    if !is_vanished(&err) {
                        self.enumeration_errors += 1;
                    }
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.filter.matches_name(&name) {
                let depth = entry.depth().saturating_sub(1);
                return Some(Candidate::new(entry.into_path(), depth));
            }
        }
    }
}

/// 链接目标不存在，或条目在列出后被删除
fn is_vanished(err: &walkdir::Error) -> bool {
    err.io_error()
        .map(|e| e.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}

/// 根目录本身总是可见，其余以 `.` 开头的条目被跳过
fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
}

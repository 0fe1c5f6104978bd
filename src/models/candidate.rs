//! # 候选文件
//!
//! 遍历过程中发现的单个文件引用（只有路径，不含内容）。
//!
//! ## 依赖关系
//! - 由 `batch/collector.rs` 创建
//! - 被 `batch/runner.rs` 与 `commands/` 消费

use std::path::{Path, PathBuf};

/// 待处理的候选文件
///
/// 创建后不可变；每次遍历中同一个文件至多产生一次。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    path: PathBuf,
    depth: usize,
}

impl Candidate {
    /// 创建候选文件，`depth` 为其所在目录相对根目录的深度
    pub fn new(path: PathBuf, depth: usize) -> Self {
        Self { path, depth }
    }

    /// 文件完整路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 所在目录的深度（根目录下的文件为 0）
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// 文件名（非 UTF-8 字符做有损替换）
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// 相对于扫描根目录的显示路径
    pub fn relative_to(&self, root: &Path) -> String {
        self.path
            .strip_prefix(root)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}

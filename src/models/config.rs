//! # 运行配置
//!
//! 一次运行开始前确定、运行期间不再修改的全部参数：
//! 遍历深度、扩展名白名单、"已格式化"文件名规则、批大小、批间暂停与成功上限。
//!
//! ## 依赖关系
//! - 被 `batch/` 与 `commands/` 使用
//! - 使用 `regex` 匹配日期前缀

use crate::error::{Result, SweepError};

use regex::Regex;
use std::path::Path;
use std::time::Duration;

/// 默认最大遍历深度
pub const DEFAULT_MAX_DEPTH: usize = 3;
/// 默认批大小
pub const DEFAULT_BATCH_SIZE: usize = 25;
/// 默认批间暂停（秒）
pub const DEFAULT_PAUSE_SECS: f64 = 1.5;
/// 默认全局成功上限
pub const DEFAULT_SUCCESS_CAP: usize = 500;
/// 默认扩展名白名单
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "pdf", "txt", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
];
/// 已带 `YYYY-MM-DD_` 日期前缀的文件名
pub const DEFAULT_FORMATTED_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}_";

// ─────────────────────────────────────────────────────────────
// 文件过滤
// ─────────────────────────────────────────────────────────────

/// 候选文件过滤条件
///
/// 只看文件名与扩展名，不持有任何遍历状态。
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    /// 小写、不带点的扩展名
    extensions: Vec<String>,
    /// 已格式化文件名的前缀规则
    formatted: Regex,
}

impl CandidateFilter {
    /// 创建过滤器
    ///
    /// 扩展名可带或不带前导点，大小写不敏感；空白项被忽略。
    pub fn new<I, S>(extensions: I, formatted_pattern: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        if extensions.is_empty() {
            return Err(SweepError::InvalidArgument(
                "extension allow-list must not be empty".to_string(),
            ));
        }

        let formatted = Regex::new(formatted_pattern).map_err(|e| SweepError::InvalidPattern {
            pattern: formatted_pattern.to_string(),
            source: e,
        })?;

        Ok(Self {
            extensions,
            formatted,
        })
    }

    /// 扩展名白名单
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// 文件名的最后一个扩展名是否在白名单中
    pub fn has_allowed_extension(&self, name: &str) -> bool {
        match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }

    /// 文件名是否已带日期前缀（只认从开头匹配）
    pub fn is_already_formatted(&self, name: &str) -> bool {
        self.formatted
            .find(name)
            .map(|m| m.start() == 0)
            .unwrap_or(false)
    }

    /// 文件名是否应作为候选
    pub fn matches_name(&self, name: &str) -> bool {
        self.has_allowed_extension(name) && !self.is_already_formatted(name)
    }
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            formatted: Regex::new(DEFAULT_FORMATTED_PATTERN).unwrap(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 遍历与运行配置
// ─────────────────────────────────────────────────────────────

/// 遍历配置
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// 最大目录深度（根目录为 0）
    pub max_depth: usize,
    /// 文件过滤条件
    pub filter: CandidateFilter,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            filter: CandidateFilter::default(),
        }
    }
}

impl ScanConfig {
    /// 创建遍历配置
    pub fn new(max_depth: usize, filter: CandidateFilter) -> Self {
        Self { max_depth, filter }
    }
}

/// 批处理运行配置
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// 遍历配置
    pub scan: ScanConfig,
    /// 每批文件数（>= 1）
    pub batch_size: usize,
    /// 批间暂停
    pub pause: Duration,
    /// 成功数达到该值后不再拉取新文件（>= 1）
    pub success_cap: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            pause: Duration::from_secs_f64(DEFAULT_PAUSE_SECS),
            success_cap: DEFAULT_SUCCESS_CAP,
        }
    }
}

impl RunConfig {
    /// 设置遍历配置
    pub fn with_scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    /// 设置批大小
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// 设置批间暂停
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// 设置全局成功上限
    pub fn with_success_cap(mut self, success_cap: usize) -> Self {
        self.success_cap = success_cap;
        self
    }

    /// 检查数值参数
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(SweepError::InvalidArgument(
                "batch size must be at least 1".to_string(),
            ));
        }
        if self.success_cap == 0 {
            return Err(SweepError::InvalidArgument(
                "global success cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// 将秒数解析为暂停时长（拒绝负数、NaN 与无穷大）
pub fn pause_from_secs(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| {
        SweepError::InvalidArgument(format!(
            "pause must be a finite, non-negative number of seconds (got {})",
            secs
        ))
    })
}

/// 检查扫描根目录：必须存在且是目录
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(SweepError::DirectoryNotFound {
            path: root.display().to_string(),
        });
    }
    if !root.is_dir() {
        return Err(SweepError::NotADirectory {
            path: root.display().to_string(),
        });
    }
    Ok(())
}

//! # scan 命令实现
//!
//! 按遍历配置列出候选文件，不做任何处理。
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的参数
//! - 使用 `batch/collector.rs`
//! - 使用 `utils/output.rs`

use crate::batch::CandidateWalker;
use crate::cli::scan::ScanArgs;
use crate::error::Result;
use crate::models::config::validate_root;
use crate::utils::output;

/// 执行 scan 命令
pub fn execute(args: ScanArgs) -> Result<()> {
    output::print_header("Scanning Archive");

    let root = &args.scan.root;
    validate_root(root)?;
    let config = args.scan.to_config()?;

    output::print_info(&format!(
        "Scanning '{}' (max depth {}, extensions: {})",
        root.display(),
        config.max_depth,
        config.filter.extensions().join(", ")
    ));

    let mut walker = CandidateWalker::new(root, &config);
    let mut count = 0;
    for candidate in walker.by_ref() {
        if !args.quiet {
            output::print_candidate(&candidate.relative_to(root));
        }
        count += 1;
    }

    output::print_separator();
    if count == 0 {
        output::print_warning("No unformatted files found.");
    } else {
        output::print_done(&format!("Found {} candidate files", count));
    }

    if walker.enumeration_errors() > 0 {
        output::print_warning(&format!(
            "{} entries could not be read; their subtrees were skipped",
            walker.enumeration_errors()
        ));
    }

    Ok(())
}

//! # 美化输出工具
//!
//! 提供统一的终端状态行样式：`[OK]`、`[ERR]`、`[WARN]`、`[*]`、`[DONE]`。
//! 错误写到 stderr，其余写到 stdout。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块与 `utils/progress.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};
use std::fmt::Display;

const RULE_WIDTH: usize = 60;

fn status_line(tag: ColoredString, msg: impl Display) -> String {
    format!("{} {}", tag, msg)
}

/// 打印成功消息
pub fn print_success(msg: impl Display) {
    println!("{}", status_line("[OK]".green().bold(), msg));
}

/// 打印错误消息
pub fn print_error(msg: impl Display) {
    eprintln!("{}", status_line("[ERR]".red().bold(), msg));
}

/// 打印警告消息
pub fn print_warning(msg: impl Display) {
    println!("{}", status_line("[WARN]".yellow().bold(), msg));
}

/// 打印信息消息
pub fn print_info(msg: impl Display) {
    println!("{}", status_line("[*]".blue().bold(), msg));
}

/// 打印完成消息
pub fn print_done(msg: impl Display) {
    println!("{}", status_line("[DONE]".green().bold(), msg));
}

/// 打印单个候选文件（相对路径，缩进、灰色）
pub fn print_candidate(path: &str) {
    println!("    {}", path.dimmed());
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let rule = "─".repeat(RULE_WIDTH);
    println!("\n{}", rule.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", rule.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}

//! # archsweep - 文档归档扫描与批量处理
//!
//! 在不把整棵目录树载入内存的前提下，扫描个人文档归档并分批处理其中
//! 尚未按日期格式命名的文件。
//!
//! ## 子命令
//! - `scan`    - 预览候选文件
//! - `process` - 分批处理候选文件（批间暂停、全局成功上限）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (遍历器与批量执行器)
//!   │     └── models/    (候选文件、配置、统计)
//!   ├── utils/      (输出与进度)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use layer_dl::{cli::Cli, logging, run_from_cli, symbols};
use std::{env, sync::Arc, time::Duration};

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持。
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }

    let bin_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| "layer-dl".to_string());

    let after_help = format!(
        "示例:\n  # 启动轮询模式的 HTTP 服务\n  {bin} --serve --port 5000\n\n  # 启动同步返回结果的 HTTP 服务\n  {bin} --serve --sync\n\n  # 直接提取\n  {bin} --tiles \"t1:tile1:video:s1|t2:tile2:doc:s2\" --course-id 101 --parent-id 0 --csrf <值>\n\n  # 获取 csrf_name 帮助\n  {bin} --csrf-help",
        bin = bin_name
    );

    let cmd = Cli::command().after_help(after_help);

    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };

    logging::setup_logging(args.log_level);

    // 服务模式自行处理中断信号以便优雅退出
    if !args.serve {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                println!("\n{} 用户强制中断程序。", *symbols::WARN);
                tokio::time::sleep(Duration::from_millis(100)).await;
                std::process::exit(130);
            }
        });
    }

    if let Err(e) = run_from_cli(args).await {
        eprintln!("\n{} {}", *symbols::ERROR, format!("程序执行出错: {}", e).red());
        std::process::exit(1);
    }
}

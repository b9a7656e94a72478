// src/cli.rs

use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// command 属性
#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&["serve", "tiles", "csrf_help"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 启动 HTTP 服务 (/get_layer_two_data, /get_status)
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub serve: bool,
    /// 直接提取一组 tile (格式: topic_id:tile_id:type:subject_id，多个用 '|' 分隔)
    #[arg(long, value_name = "TILES", help_heading = "Mode", requires_all = ["course_id", "parent_id"])]
    pub tiles: Option<String>,
    /// 显示如何获取 csrf_name cookie 的指南并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub csrf_help: bool,

    // --- 提取选项 (Options) ---
    /// 课程 ID
    #[arg(long, help_heading = "Options")]
    pub course_id: Option<String>,
    /// 父节点 ID
    #[arg(long, help_heading = "Options")]
    pub parent_id: Option<String>,
    /// 会话 cookie csrf_name 的值，优先级高于环境变量 CSRF_NAME
    #[arg(long, help_heading = "Options")]
    pub csrf: Option<String>,
    /// 以 JSON 格式输出提取结果
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub json: bool,

    // --- 服务选项 (Server) ---
    /// [服务模式] 同步返回提取结果，不使用 /get_status 轮询
    #[arg(long, action = clap::ArgAction::SetTrue, requires = "serve", help_heading = "Server")]
    pub sync: bool,
    /// [服务模式] 监听地址
    #[arg(long, help_heading = "Server")]
    pub host: Option<String>,
    /// [服务模式] 监听端口
    #[arg(short, long, value_parser = clap::value_parser!(u16), help_heading = "Server")]
    pub port: Option<u16>,

    // --- 通用选项 (General) ---
    /// 指定配置文件路径 (默认: ~/.layer-dl/config.json)
    #[arg(short, long, value_name = "FILE", global = true, help_heading = "General")]
    pub config: Option<PathBuf>,
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// 设置日志输出级别
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true, help_heading = "General")]
    pub log_level: LogLevel,
}


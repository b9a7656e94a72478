// src/logging.rs

use crate::{cli::LogLevel, config::credentials, constants};
use log::{LevelFilter, warn};
use std::path::PathBuf;

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn log_file_path() -> PathBuf {
    match credentials::get_config_dir() {
        Ok(dir) => dir.join(constants::LOG_FILE_NAME),
        // 如果无法获取主目录，则回退到临时目录
        Err(_) => std::env::temp_dir()
            .join(clap::crate_name!())
            .join(constants::LOG_FILE_NAME),
    }
}

/// 初始化日志: 始终输出到 stderr，日志文件可用时同时写入文件
pub fn setup_logging(level: LogLevel) {
    let filter = LevelFilter::from(level);
    if filter == LevelFilter::Off {
        return;
    }

    let mut dispatch = fern::Dispatch::new()
        .level(filter)
        // 依赖库只保留警告及以上
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{:<5}] [{}:{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .chain(std::io::stderr());

    let path = log_file_path();
    let mut file_error = None;
    if let Some(dir) = path.parent()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("警告: 无法创建日志目录 {:?}: {}", dir, e);
    }
    match fern::log_file(&path) {
        Ok(file) => dispatch = dispatch.chain(file),
        Err(e) => file_error = Some(e),
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("警告: 日志系统初始化失败: {}", e);
        return;
    }
    if let Some(e) = file_error {
        warn!("无法打开日志文件 {:?}: {}，日志只输出到终端。", path, e);
    }
}

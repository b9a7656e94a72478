// src/lib.rs

pub mod cli;
pub mod client;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod server;
pub mod symbols;
pub mod ui;
pub mod utils;

use crate::{
    cli::Cli,
    client::RobustClient,
    config::AppConfig,
    error::{AppError, AppResult},
    extractor::{ContentExtractor, layer_two::LayerTwoExtractor},
    jobs::{InMemoryJobStore, JobRunner},
    models::ExtractionRequest,
    server::AppState,
};
use colored::*;
use log::{debug, info};
use std::sync::Arc;

/// 核心的执行上下文，两种运行模式共用
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub http_client: Arc<RobustClient>,
    pub args: Arc<Cli>,
}

impl AppContext {
    pub fn new(config: Arc<AppConfig>, args: Arc<Cli>) -> AppResult<Self> {
        let http_client = Arc::new(RobustClient::new(config.clone())?);
        Ok(Self {
            config,
            http_client,
            args,
        })
    }

    pub fn extractor(&self) -> Arc<dyn ContentExtractor> {
        Arc::new(LayerTwoExtractor::new(self.http_client.clone()))
    }

    pub fn job_runner(&self) -> JobRunner {
        JobRunner::new(Arc::new(InMemoryJobStore::new()), self.extractor())
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);
    if args.csrf_help {
        ui::box_message(
            "获取 csrf_name Cookie 指南",
            constants::HELP_CSRF_GUIDE
                .lines()
                .collect::<Vec<_>>()
                .as_slice(),
            |s| s.cyan(),
        );
        println!(
            "\n{} 安全提醒: csrf_name 等同于登录会话，请不要分享给他人。",
            *symbols::INFO
        );
        return Ok(());
    }

    let config = Arc::new(AppConfig::new(&args)?);
    debug!("加载的应用配置: {:?}", config);
    let context = AppContext::new(config, args.clone())?;

    if args.serve {
        run_server(context).await
    } else if let Some(tiles) = &args.tiles {
        run_once(tiles, context).await
    } else {
        Ok(())
    }
}

async fn run_server(context: AppContext) -> AppResult<()> {
    let state = AppState {
        runner: context.job_runner(),
        synchronous: context.args.sync,
    };
    println!(
        "{} 服务监听于 {}:{}，按 {} 停止。",
        *symbols::INFO,
        context.config.host,
        context.config.port,
        *symbols::CTRL_C
    );
    server::serve(state, &context.config.host, context.config.port).await
}

/// 单次提取: 在当前进程内完成整批 tile，并打印结果
async fn run_once(tiles: &str, context: AppContext) -> AppResult<()> {
    let (csrf_opt, source) = config::credentials::resolve_csrf(context.args.csrf.as_deref());
    let csrf = csrf_opt.ok_or_else(|| {
        AppError::Validation(format!(
            "未提供 csrf_name (可使用 --csrf 或环境变量 {})",
            constants::CSRF_ENV_VAR
        ))
    })?;
    info!("从 {} 加载 csrf_name", source);

    let request = ExtractionRequest::new(
        tiles,
        context.args.course_id.as_deref().unwrap_or_default(),
        context.args.parent_id.as_deref().unwrap_or_default(),
        &csrf,
    );
    let result = context.job_runner().run_sync(request).await?;

    if context.args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        ui::print_extraction_result(&result);
    }
    Ok(())
}

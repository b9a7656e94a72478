// src/config/credentials.rs

use crate::{
    config::ExternalConfig, // 只需要从父模块导入结构体定义
    constants,
    error::{AppError, AppResult},
};
use anyhow::{Context, anyhow};
use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn get_config_dir() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("无法获取用户主目录")))?
        .join(constants::CONFIG_DIR_NAME);
    Ok(path)
}

pub(super) fn get_config_path() -> AppResult<PathBuf> {
    Ok(get_config_dir()?.join(constants::CONFIG_FILE_NAME))
}

/// 读取外部配置；文件不存在时写入一份默认配置
pub(crate) fn load_or_create_external_config(
    override_path: Option<&Path>,
) -> AppResult<ExternalConfig> {
    let config_path = match override_path {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };
    if config_path.is_file() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("读取配置文件 '{}' 失败", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件 '{}' 失败", config_path.display()))
            .map_err(AppError::from)
    } else {
        info!("配置文件 {:?} 不存在，将创建默认配置。", config_path);
        let config = ExternalConfig::default_app_config();

        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json_content = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, json_content)?;

        Ok(config)
    }
}

/// 按优先级查找 csrf cookie: 命令行参数 > 环境变量
pub fn resolve_csrf(cli_csrf: Option<&str>) -> (Option<String>, String) {
    if let Some(csrf) = cli_csrf
        && !csrf.trim().is_empty()
    {
        debug!("使用来自命令行参数的 csrf_name");
        return (Some(csrf.trim().to_string()), "命令行参数".to_string());
    }
    if let Ok(csrf) = std::env::var(constants::CSRF_ENV_VAR)
        && !csrf.trim().is_empty()
    {
        debug!("使用来自环境变量 {} 的 csrf_name", constants::CSRF_ENV_VAR);
        return (
            Some(csrf.trim().to_string()),
            format!("环境变量 ({})", constants::CSRF_ENV_VAR),
        );
    }
    debug!("未在任何位置找到可用的 csrf_name");
    (None, "未找到".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_creates_default_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(constants::CONFIG_FILE_NAME);

        let created = load_or_create_external_config(Some(&path)).unwrap();
        assert!(path.is_file());
        assert_eq!(created.network.max_retries, Some(0));
        assert_eq!(created.network.timeout_secs, None);

        // 第二次读取的是刚写入的文件
        let reloaded = load_or_create_external_config(Some(&path)).unwrap();
        assert_eq!(reloaded.network.base_url, created.network.base_url);
    }

    #[test]
    fn test_malformed_config_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let err = load_or_create_external_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("解析配置文件"));
    }

    #[test]
    fn test_cli_csrf_takes_priority() {
        let (csrf, source) = resolve_csrf(Some("  abc  "));
        assert_eq!(csrf.as_deref(), Some("abc"));
        assert_eq!(source, "命令行参数");
    }
}

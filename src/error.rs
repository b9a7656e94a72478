// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("网络中间件错误: {0}")]
    NetworkMiddleware(#[from] reqwest_middleware::Error),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("无法解析来自 '{url}' 的API响应: {source}")]
    ApiParseFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("Base64 解码错误: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("UTF-8 解码错误: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("无效的请求头: {0}")]
    InvalidHeader(String),
    #[error("无效的 Tile 描述 '{0}' (需要 topic_id:tile_id:type:subject_id)")]
    InvalidTile(String),
    #[error("视频授权失败: {0}")]
    Authorization(String),
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    Validation(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

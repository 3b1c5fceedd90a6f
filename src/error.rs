//! 全局错误类型定义
//! 核心过滤/阶段解析为全函数，不产生错误；错误只出现在加载、缓存、订阅源拉取等 I/O 边界

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum CatalogError {
    // 目录相关错误
    #[error("目录加载失败：{0}")]
    CatalogLoadError(String),
    #[error("目录校验失败：{0}")]
    CatalogValidation(String),
    #[error("目录缓存失败：{0}")]
    CatalogCacheError(String),

    // 分类规则编译错误
    #[error("分类规则正则编译失败：{0}")]
    RuleCompileError(#[from] RegexError),

    // 订阅源相关错误
    #[error("订阅源拉取失败：{0}")]
    FeedFetchError(String),
    #[error("网络请求失败：{0}")]
    HttpError(#[from] reqwest::Error),

    // 全局目录
    #[error("构建目录未初始化")]
    LibraryNotInitialized,

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("MessagePack序列化/反序列化失败：{0}")]
    MsgPackError(String),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type CatalogResult<T> = Result<T, CatalogError>;

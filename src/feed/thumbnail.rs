//! 缩略图探测：maxres 不存在时 YouTube 返回一张很小的占位图，需要退回 hq

use std::time::Duration;
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::GlobalConfig;
use crate::error::CatalogResult;

/// YouTube 缩略图根地址
pub const DEFAULT_THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";
/// 占位图阈值（字节）
const PLACEHOLDER_MAX_BYTES: u64 = 2000;

/// 主图 + 备用图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailPair {
    pub primary: String,
    pub fallback: String,
}

/// 缩略图解析器
#[derive(Debug, Clone)]
pub struct ThumbnailResolver {
    // None 表示不探测
    client: Option<Client>,
    base_url: String,
}

impl ThumbnailResolver {
    pub fn new(config: &GlobalConfig) -> CatalogResult<Self> {
        let client = if config.check_thumbnails {
            Some(
                Client::builder()
                    .timeout(Duration::from_secs(config.thumbnail_timeout))
                    .build()?,
            )
        } else {
            None
        };
        Ok(Self {
            client,
            base_url: DEFAULT_THUMBNAIL_BASE.to_string(),
        })
    }

    /// 替换缩略图根地址（镜像或测试）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_probing(&self) -> bool {
        self.client.is_some()
    }

    pub fn maxres_url(&self, video_id: &str) -> String {
        format!("{}/{}/maxresdefault.jpg", self.base_url, video_id)
    }

    pub fn hq_url(&self, video_id: &str) -> String {
        format!("{}/{}/hqdefault.jpg", self.base_url, video_id)
    }

    /// 解析视频缩略图；探测失败一律退回 hq
    pub async fn resolve(&self, video_id: &str) -> ThumbnailPair {
        let maxres = self.maxres_url(video_id);
        let hq = self.hq_url(video_id);

        let Some(client) = &self.client else {
            return ThumbnailPair { primary: maxres, fallback: hq };
        };

        let keep_maxres = match client.head(&maxres).send().await {
            Ok(response) => {
                let content_length = response
                    .headers()
                    .get(CONTENT_LENGTH)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok());
                Self::accepts_maxres(response.status(), content_length)
            }
            Err(e) => {
                debug!("缩略图探测失败 {}：{}", video_id, e);
                false
            }
        };

        if keep_maxres {
            ThumbnailPair { primary: maxres, fallback: hq }
        } else {
            ThumbnailPair { primary: hq.clone(), fallback: hq }
        }
    }

    /// 状态码 200 且内容长度超过占位图阈值
    pub fn accepts_maxres(status: StatusCode, content_length: Option<u64>) -> bool {
        status == StatusCode::OK && content_length.unwrap_or(0) > PLACEHOLDER_MAX_BYTES
    }
}

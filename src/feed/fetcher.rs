//! 订阅源拉取器
//! 支持本地文件、远程 HTTP（带重试）和 yt-dlp 三种来源

use std::path::{Path, PathBuf};
use std::time::Duration;
use reqwest::Client;
use tokio::process::Command;
use tracing::{debug, warn};

use super::FeedSource;
use super::model::FeedVideo;
use crate::config::{GlobalConfig, RetryPolicy};
use crate::error::{CatalogError, CatalogResult};

const USER_AGENT: &str = "gekicatalog/0.1.0";
/// 默认 yt-dlp 可执行文件（从 PATH 查找）
pub const DEFAULT_YT_DLP: &str = "yt-dlp";

/// 订阅源拉取器
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
    retry: RetryPolicy,
    // yt-dlp 程序及其前置参数
    program: PathBuf,
    program_args: Vec<String>,
}

impl FeedFetcher {
    pub fn new(config: &GlobalConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .build()?;
        Ok(Self {
            client,
            retry: config.retry,
            program: PathBuf::from(DEFAULT_YT_DLP),
            program_args: Vec::new(),
        })
    }

    /// 指定 yt-dlp 程序路径；前置参数会放在 yt-dlp 参数之前（如通过解释器运行脚本）
    pub fn with_program<I, S>(mut self, program: impl Into<PathBuf>, leading_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.program = program.into();
        self.program_args = leading_args.into_iter().map(Into::into).collect();
        self
    }

    fn yt_dlp(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.program_args);
        command
    }

    /// 拉取视频列表
    pub async fn fetch(&self, source: &FeedSource) -> CatalogResult<Vec<FeedVideo>> {
        let videos = match source {
            FeedSource::LocalFile(path) => Self::fetch_local(path).await?,
            FeedSource::Remote(url) => self.fetch_remote(url).await?,
            FeedSource::YtDlp { channel_url } => self.fetch_yt_dlp(channel_url).await?,
        };
        debug!("订阅源拉取完成，视频数：{}", videos.len());
        Ok(videos)
    }

    async fn fetch_local(path: &Path) -> CatalogResult<Vec<FeedVideo>> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::parse_feed(&text)
    }

    /// 远程拉取，按重试策略重试
    async fn fetch_remote(&self, url: &str) -> CatalogResult<Vec<FeedVideo>> {
        let url = url::Url::parse(url)?;
        let max_retries = self.retry.max_retries();
        let mut last_err = None;

        for attempt in 0..=max_retries {
            match self.fetch_remote_once(&url).await {
                Ok(videos) => return Ok(videos),
                Err(e) => {
                    if attempt < max_retries {
                        warn!("订阅源请求失败：{}，重试中 ({}/{})", e, attempt + 1, max_retries);
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| CatalogError::FeedFetchError("所有重试均已失败".to_string())))
    }

    async fn fetch_remote_once(&self, url: &url::Url) -> CatalogResult<Vec<FeedVideo>> {
        let response = self.client.get(url.clone())
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::FeedFetchError(format!(
                "URL {} 返回状态码 {}",
                url, response.status()
            )));
        }

        let text = response.text().await?;
        Self::parse_feed(&text)
    }

    /// yt-dlp 扁平列表；失败时退回完整拉取（较慢）
    async fn fetch_yt_dlp(&self, channel_url: &str) -> CatalogResult<Vec<FeedVideo>> {
        let videos_url = format!("{}/videos", channel_url.trim_end_matches('/'));

        let flat = self
            .yt_dlp()
            .args(["--flat-playlist", "--dump-json", "--no-warnings", "--extractor-args", "youtube:lang=pt"])
            .arg(&videos_url)
            .output()
            .await?;
        if flat.status.success() {
            return Self::parse_feed(&String::from_utf8_lossy(&flat.stdout));
        }
        warn!("yt-dlp 扁平列表失败：{}，尝试完整拉取", Self::stderr_head(&flat.stderr));

        let full = self
            .yt_dlp()
            .args(["--dump-json", "--no-download", "--no-warnings", "--extractor-args", "youtube:lang=pt"])
            .arg(&videos_url)
            .output()
            .await?;
        if !full.status.success() {
            return Err(CatalogError::FeedFetchError(format!(
                "yt-dlp 执行失败：{}",
                Self::stderr_head(&full.stderr)
            )));
        }
        Self::parse_feed(&String::from_utf8_lossy(&full.stdout))
    }

    /// 逐个拉取视频的完整元数据，单个失败直接跳过
    pub async fn fetch_full_metadata(&self, ids: &[String]) -> Vec<FeedVideo> {
        let mut videos = Vec::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            let url = format!("https://www.youtube.com/watch?v={}", id);
            let output = self
                .yt_dlp()
                .args(["--dump-json", "--no-download", "--no-warnings"])
                .arg(&url)
                .output()
                .await;

            match output {
                Ok(out) if out.status.success() => {
                    match serde_json::from_slice::<FeedVideo>(out.stdout.trim_ascii()) {
                        Ok(video) => videos.push(video),
                        Err(e) => debug!("视频 {} 元数据解析失败：{}", id, e),
                    }
                }
                Ok(out) => debug!("视频 {} 元数据拉取失败：{}", id, Self::stderr_head(&out.stderr)),
                Err(e) => debug!("视频 {} 元数据拉取失败：{}", id, e),
            }

            if (i + 1) % 10 == 0 {
                debug!("完整元数据进度：{}/{}", i + 1, ids.len());
            }
        }
        videos
    }

    /// 解析订阅源文本：JSON 数组，或每行一个 JSON 对象（无法解析的行跳过）
    pub fn parse_feed(text: &str) -> CatalogResult<Vec<FeedVideo>> {
        let trimmed = text.trim();
        if trimmed.starts_with('[') {
            return Ok(serde_json::from_str(trimmed)?);
        }

        let mut videos = Vec::new();
        let mut skipped = 0;
        for line in trimmed.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match serde_json::from_str::<FeedVideo>(line) {
                Ok(video) => videos.push(video),
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("订阅源中有{}行无法解析，已跳过", skipped);
        }
        Ok(videos)
    }

    fn stderr_head(stderr: &[u8]) -> String {
        String::from_utf8_lossy(stderr).chars().take(500).collect()
    }
}

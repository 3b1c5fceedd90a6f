//! 订阅源模块：拉取频道视频元数据并生成目录记录（尽力而为，失败不影响核心功能）
pub mod model;
pub mod fetcher;
pub mod thumbnail;
pub mod ingest;

use std::path::PathBuf;

// 导出核心接口
pub use self::model::{FeedVideo, IngestedVideo};
pub use self::fetcher::FeedFetcher;
pub use self::thumbnail::{ThumbnailPair, ThumbnailResolver};
pub use self::ingest::{FeedIngestor, IngestReport, UNCATEGORIZED_LABEL};

/// 订阅源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// 本地 JSON Lines / JSON 数组文件
    LocalFile(PathBuf),
    /// 远程 JSON Lines / JSON 数组
    Remote(String),
    /// 通过 yt-dlp 拉取频道
    YtDlp { channel_url: String },
}

impl FeedSource {
    /// http(s) 开头视为远程地址，否则视为本地文件
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            FeedSource::Remote(location.to_string())
        } else {
            FeedSource::LocalFile(PathBuf::from(location))
        }
    }

    pub fn is_yt_dlp(&self) -> bool {
        matches!(self, FeedSource::YtDlp { .. })
    }
}

/// 测试用：以 /bin/sh 运行的 yt-dlp 替身脚本
#[cfg(all(test, unix))]
pub(crate) mod testing {
    use std::path::Path;

    use super::FeedFetcher;
    use crate::config::{ConfigManager, RetryPolicy};

    /// 将脚本写入目录，返回通过 sh 执行该脚本的拉取器
    pub(crate) fn scripted_fetcher(dir: &Path, script: &str) -> FeedFetcher {
        let path = dir.join("yt-dlp.sh");
        std::fs::write(&path, script).unwrap();
        let config = ConfigManager::custom().retry(RetryPolicy::Never).build();
        FeedFetcher::new(&config)
            .unwrap()
            .with_program("/bin/sh", [path.to_string_lossy().into_owned()])
    }
}

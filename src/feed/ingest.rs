//! 订阅源导入：拉取 -> 相关性过滤 -> 分类 -> 缩略图 -> 报告 -> 目录记录

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::FeedSource;
use super::fetcher::FeedFetcher;
use super::model::{FeedVideo, IngestedVideo};
use super::thumbnail::ThumbnailResolver;
use crate::catalog::model::{BuildRecord, ContentCategory};
use crate::classify::{Classification, VideoClassifier};
use crate::config::GlobalConfig;
use crate::error::CatalogResult;

/// 报告中简介最大字符数
const REPORT_DESCRIPTION_MAX: usize = 300;
/// 报告中标签最大个数
const REPORT_TAGS_MAX: usize = 15;
/// 目录记录简介最大字符数
const RECORD_DESCRIPTION_MAX: usize = 200;
/// 目录记录标签最大个数
const RECORD_TAGS_MAX: usize = 5;
/// 未归类视频在统计中的名称
pub const UNCATEGORIZED_LABEL: &str = "Outros";

/// 导入报告
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// 职业 -> 视频（按上传日期倒序）
    pub classes: BTreeMap<String, Vec<IngestedVideo>>,
    /// 非职业视频（content_category 为 None 表示未归类）
    pub uncategorized: Vec<IngestedVideo>,
    pub total_videos: usize,
    /// Unix 时间戳（秒）
    pub fetched_at: u64,
}

impl IngestReport {
    /// 各内容分类的视频数（未归类不计）
    pub fn category_counts(&self) -> BTreeMap<ContentCategory, usize> {
        let mut counts = BTreeMap::new();
        for video in &self.uncategorized {
            if let Some(category) = video.content_category {
                *counts.entry(category).or_insert(0) += 1;
            }
        }
        counts
    }

    /// 未归类（“Outros”）视频数
    pub fn uncategorized_count(&self) -> usize {
        self.uncategorized
            .iter()
            .filter(|video| video.content_category.is_none())
            .count()
    }

    /// 生成目录记录
    /// 职业按名称排序，随后为内容分类（按标签排序），未归类视频不生成记录
    pub fn to_records(&self, author: &str) -> Vec<BuildRecord> {
        let mut records = Vec::new();
        let mut next_id = 1usize;

        // 1. 职业构建
        for (class_name, videos) in &self.classes {
            for video in videos {
                let mut record = Self::base_record(next_id, video, ContentCategory::Builds, author);
                record.class_name = Some(class_name.clone());
                record.subcategory = video.subcategory.clone();
                records.push(record);
                next_id += 1;
            }
        }

        // 2. 内容分类
        let mut by_label: BTreeMap<&'static str, Vec<&IngestedVideo>> = BTreeMap::new();
        for video in &self.uncategorized {
            if let Some(category) = video.content_category {
                by_label.entry(category.label()).or_default().push(video);
            }
        }
        for videos in by_label.values() {
            for video in videos {
                let Some(category) = video.content_category else { continue };
                records.push(Self::base_record(next_id, video, category, author));
                next_id += 1;
            }
        }

        debug!("生成目录记录：{}条", records.len());
        records
    }

    fn base_record(index: usize, video: &IngestedVideo, category: ContentCategory, author: &str) -> BuildRecord {
        let mut record = BuildRecord::new(format!("ragna-{}", index), video.title.clone(), category);
        record.author = author.to_string();
        record.description = truncate_chars(&video.description, RECORD_DESCRIPTION_MAX).replace('\n', " ");
        record.image_url = video.thumbnail_url.clone();
        record.fallback_image_url = Some(video.thumbnail_fallback.clone());
        record.video_url = Some(video.video_url.clone());
        record.tags = video.tags.iter().take(RECORD_TAGS_MAX).cloned().collect();
        record
    }
}

/// 订阅源导入器
#[derive(Debug, Clone)]
pub struct FeedIngestor {
    fetcher: FeedFetcher,
    classifier: VideoClassifier,
    thumbnails: ThumbnailResolver,
}

impl FeedIngestor {
    /// 使用默认分类规则创建
    pub fn new(config: &GlobalConfig) -> CatalogResult<Self> {
        Ok(Self {
            fetcher: FeedFetcher::new(config)?,
            classifier: VideoClassifier::with_default_rules()?,
            thumbnails: ThumbnailResolver::new(config)?,
        })
    }

    pub fn with_parts(fetcher: FeedFetcher, classifier: VideoClassifier, thumbnails: ThumbnailResolver) -> Self {
        Self { fetcher, classifier, thumbnails }
    }

    /// 完整导入流程
    pub async fn run(&self, source: &FeedSource) -> CatalogResult<IngestReport> {
        // 1. 拉取
        let videos = self.fetcher.fetch(source).await?;
        info!("订阅源共{}个视频", videos.len());

        // 2. 相关性过滤
        let mut relevant = self.filter_relevant(videos);

        // 3. yt-dlp 扁平列表缺少简介和标签，补拉完整元数据后重新过滤
        if source.is_yt_dlp() && relevant.first().is_some_and(FeedVideo::is_flat_entry) {
            let ids: Vec<String> = relevant.iter().map(|v| v.id.clone()).collect();
            info!("扁平列表缺少元数据，补拉{}个视频", ids.len());
            let full = self.fetcher.fetch_full_metadata(&ids).await;
            if full.is_empty() {
                warn!("完整元数据拉取失败，沿用扁平列表");
            } else {
                relevant = self.filter_relevant(full);
            }
        }

        // 4. 分类 + 缩略图
        Ok(self.process(relevant).await)
    }

    fn filter_relevant(&self, videos: Vec<FeedVideo>) -> Vec<FeedVideo> {
        let total = videos.len();
        let relevant: Vec<FeedVideo> = videos
            .into_iter()
            .filter(|v| self.classifier.is_relevant(v))
            .collect();
        debug!("相关视频：{}/{}", relevant.len(), total);
        relevant
    }

    /// 分类并生成报告（不做相关性过滤）
    pub async fn process(&self, videos: Vec<FeedVideo>) -> IngestReport {
        let mut report = IngestReport {
            fetched_at: unix_now(),
            ..IngestReport::default()
        };

        for video in &videos {
            let thumbnail = self.thumbnails.resolve(&video.id).await;
            let mut entry = IngestedVideo {
                id: video.id.clone(),
                title: video.title.clone().unwrap_or_default(),
                description: truncate_chars(video.description.as_deref().unwrap_or(""), REPORT_DESCRIPTION_MAX),
                video_url: video.watch_url(),
                thumbnail_url: thumbnail.primary,
                thumbnail_fallback: thumbnail.fallback,
                upload_date: video.formatted_upload_date(),
                tags: video.tags.iter().flatten().take(REPORT_TAGS_MAX).cloned().collect(),
                class_name: None,
                subcategory: None,
                content_category: None,
            };

            match self.classifier.classify(video) {
                Classification::Build(found) => {
                    entry.class_name = Some(found.class_name.clone());
                    entry.subcategory = Some(found.subcategory);
                    report.classes.entry(found.class_name).or_default().push(entry);
                }
                Classification::Content(category) => {
                    entry.content_category = Some(category);
                    report.uncategorized.push(entry);
                }
                Classification::Uncategorized => report.uncategorized.push(entry),
            }
        }

        // 最新的在前；YYYY-MM-DD 字典序即日期序
        for videos in report.classes.values_mut() {
            videos.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        }
        report.total_videos = report.classes.values().map(Vec::len).sum::<usize>() + report.uncategorized.len();

        info!(
            "导入完成：{}个职业，{}个非职业视频，共{}个",
            report.classes.len(),
            report.uncategorized.len(),
            report.total_videos
        );
        report
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigManager, RetryPolicy};
    use std::io::Write;

    fn ingestor() -> FeedIngestor {
        let config = ConfigManager::custom().retry(RetryPolicy::Never).build();
        FeedIngestor::new(&config).unwrap()
    }

    fn video(id: &str, title: &str, date: &str) -> FeedVideo {
        FeedVideo {
            id: id.to_string(),
            title: Some(title.to_string()),
            description: Some("conteúdo do canal\nsegunda linha".to_string()),
            tags: Some((0..20).map(|i| format!("tag{}", i)).collect()),
            upload_date: Some(date.to_string()),
        }
    }

    #[tokio::test]
    async fn test_process_groups_and_sorts() {
        let report = ingestor()
            .process(vec![
                video("s1", "Build Sniper antiga", "20230105"),
                video("s2", "Build Sniper nova", "20240210"),
                video("p1", "Patch Notes de Março", "20240301"),
                video("l1", "Live de sexta", "20240302"),
            ])
            .await;

        assert_eq!(report.total_videos, 4);
        let snipers = &report.classes["Atirador de Elite"];
        assert_eq!(snipers.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(), vec!["s2", "s1"]);
        assert_eq!(snipers[0].upload_date, "2024-02-10");
        assert_eq!(snipers[0].tags.len(), 15);
        assert_eq!(snipers[0].subcategory.as_deref(), Some("Arqueiro"));
        assert_eq!(report.uncategorized.len(), 2);
        assert_eq!(report.category_counts().get(&ContentCategory::PatchNotes), Some(&1));
        assert_eq!(report.category_counts().values().sum::<usize>() + report.uncategorized_count(), 2);
        assert_eq!(report.uncategorized_count(), 1);
        assert!(report.fetched_at > 0);
    }

    #[tokio::test]
    async fn test_records_order_ids_and_truncation() {
        let report = ingestor()
            .process(vec![
                video("p1", "Patch Notes de Março", "20240301"),
                video("s1", "Build Sniper", "20240105"),
                video("a1", "Arquimago Campo Gravitacional", "20240110"),
                video("z1", "RMT do Zero - episódio 1", "20240201"),
                video("l1", "Live de sexta", "20240302"),
            ])
            .await;

        let records = report.to_records("GekiGaming");
        let summary: Vec<(&str, &str)> = records.iter().map(|r| (r.id.as_str(), r.title.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                ("ragna-1", "Arquimago Campo Gravitacional"),
                ("ragna-2", "Build Sniper"),
                ("ragna-3", "RMT do Zero - episódio 1"),
                ("ragna-4", "Patch Notes de Março"),
            ]
        );
        assert_eq!(records[0].category, ContentCategory::Builds);
        assert_eq!(records[0].class_name.as_deref(), Some("Arquimago"));
        assert_eq!(records[0].subcategory.as_deref(), Some("Mago"));
        assert_eq!(records[0].author, "GekiGaming");
        assert_eq!(records[0].description, "conteúdo do canal segunda linha");
        assert_eq!(records[0].tags.len(), 5);
        // 内容分类按标签排序："Do Zero ao RMT" 在 "Patch Notes" 之前
        assert_eq!(records[2].category, ContentCategory::ZeroToRmt);
        assert_eq!(records[2].class_name, None);
        assert_eq!(records[3].category, ContentCategory::PatchNotes);
    }

    #[tokio::test]
    async fn test_run_filters_irrelevant_videos() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id":"a","title":"Build Sniper RagnaTales","description":"","upload_date":"20240101"}}"#).unwrap();
        writeln!(file, r#"{{"id":"b","title":"Minecraft","description":"survival"}}"#).unwrap();
        writeln!(file, "{{broken").unwrap();

        let report = ingestor()
            .run(&FeedSource::LocalFile(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(report.total_videos, 1);
        assert!(report.classes.contains_key("Atirador de Elite"));
    }

    #[cfg(unix)]
    fn scripted_ingestor(dir: &std::path::Path, script: &str) -> FeedIngestor {
        let config = ConfigManager::get_default();
        FeedIngestor::with_parts(
            crate::feed::testing::scripted_fetcher(dir, script),
            VideoClassifier::with_default_rules().unwrap(),
            ThumbnailResolver::new(&config).unwrap(),
        )
    }

    #[cfg(unix)]
    const FLAT_LISTING: &str = r#"
case "$*" in
  *--flat-playlist*)
    echo '{"id":"a1","title":"Build Sniper RagnaTales"}'
    echo '{"id":"b2","title":"Patch Notes RagnaTales"}'
    echo '{"id":"c3","title":"Minecraft survival"}'
    ;;
"#;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_flat_listing_is_refetched_with_full_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "{}{}",
            FLAT_LISTING,
            r#"  *watch?v=a1*) echo '{"id":"a1","title":"Build Sniper RagnaTales","description":"Sniper completo","tags":["ragnatales"],"upload_date":"20240105"}' ;;
  *) exit 1 ;;
esac
"#
        );
        let source = FeedSource::YtDlp { channel_url: "https://www.youtube.com/@geki".to_string() };
        let report = scripted_ingestor(dir.path(), &script).run(&source).await.unwrap();

        // 只有补拉成功的视频进入报告
        assert_eq!(report.total_videos, 1);
        let snipers = &report.classes["Atirador de Elite"];
        assert_eq!(snipers[0].id, "a1");
        assert_eq!(snipers[0].description, "Sniper completo");
        assert_eq!(snipers[0].upload_date, "2024-01-05");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_refetch_keeps_flat_listing() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("{}{}", FLAT_LISTING, "  *) exit 1 ;;\nesac\n");
        let source = FeedSource::YtDlp { channel_url: "https://www.youtube.com/@geki".to_string() };
        let report = scripted_ingestor(dir.path(), &script).run(&source).await.unwrap();

        // 扁平列表中的相关视频保留，无关视频已过滤
        assert_eq!(report.total_videos, 2);
        assert_eq!(report.classes["Atirador de Elite"][0].upload_date, "");
        assert_eq!(report.category_counts().get(&ContentCategory::PatchNotes), Some(&1));
    }
}

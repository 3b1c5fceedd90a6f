//! 订阅源数据模型（yt-dlp --dump-json 的字段子集）

use serde::{Deserialize, Serialize};

use crate::catalog::model::ContentCategory;

/// 视频元数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedVideo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// YYYYMMDD
    #[serde(default)]
    pub upload_date: Option<String>,
}

impl FeedVideo {
    pub fn lowered_title(&self) -> String {
        self.title.as_deref().unwrap_or("").to_lowercase()
    }

    pub fn lowered_description(&self) -> String {
        self.description.as_deref().unwrap_or("").to_lowercase()
    }

    /// 扁平列表条目通常既无简介也无标签
    pub fn is_flat_entry(&self) -> bool {
        self.description.is_none() && self.tags.is_none()
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }

    /// YYYYMMDD -> YYYY-MM-DD；格式不符时原样返回
    pub fn formatted_upload_date(&self) -> String {
        match self.upload_date.as_deref() {
            Some(date) if date.len() == 8 && date.chars().all(|c| c.is_ascii_digit()) => {
                format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..8])
            }
            Some(date) => date.to_string(),
            None => String::new(),
        }
    }
}

/// 已处理的视频条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestedVideo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub thumbnail_fallback: String,
    pub upload_date: String,
    pub tags: Vec<String>,
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// None 表示未归类（“Outros”）
    #[serde(default)]
    pub content_category: Option<ContentCategory>,
}

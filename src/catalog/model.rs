//! 目录数据模型定义
//! 仅存储静态目录数据，无任何业务逻辑，支持序列化/反序列化
//! JSON 字段与站点数据文件保持一致（camelCase，class 字段名保留）

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// 内容分类（固定枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentCategory {
    #[serde(rename = "Builds")]
    Builds,
    #[serde(rename = "Guias Essenciais")]
    EssentialGuides,
    #[serde(rename = "Do Zero ao RMT - Ragnatales")]
    ZeroToRmt,
    #[serde(rename = "MMO para o Pai de Família")]
    FamilyManMmo,
    #[serde(rename = "Patch Notes")]
    PatchNotes,
}

impl ContentCategory {
    /// 文章页筛选条的展示顺序
    pub const ALL: [ContentCategory; 5] = [
        ContentCategory::Builds,
        ContentCategory::ZeroToRmt,
        ContentCategory::EssentialGuides,
        ContentCategory::FamilyManMmo,
        ContentCategory::PatchNotes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentCategory::Builds => "Builds",
            ContentCategory::EssentialGuides => "Guias Essenciais",
            ContentCategory::ZeroToRmt => "Do Zero ao RMT - Ragnatales",
            ContentCategory::FamilyManMmo => "MMO para o Pai de Família",
            ContentCategory::PatchNotes => "Patch Notes",
        }
    }

    /// 筛选条上的短标签（去掉服务器后缀）
    pub fn short_label(&self) -> &'static str {
        let label = self.label();
        label.strip_suffix(" - Ragnatales").unwrap_or(label)
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentCategory {
    type Err = CatalogError;

    /// 接受完整标签或短标签，忽略大小写
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ContentCategory::ALL
            .into_iter()
            .find(|cat| cat.label().to_lowercase() == wanted || cat.short_label().to_lowercase() == wanted)
            .ok_or_else(|| CatalogError::InvalidInput(format!("未知内容分类：{}", s)))
    }
}

/// 装备槽位（固定集合，顺序即展示顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    #[serde(rename = "topo")]
    Head,
    #[serde(rename = "meio")]
    Face,
    #[serde(rename = "baixo")]
    Mouth,
    #[serde(rename = "armadura")]
    Armor,
    #[serde(rename = "arma")]
    Weapon,
    #[serde(rename = "escudo")]
    Shield,
    #[serde(rename = "capa")]
    Garment,
    #[serde(rename = "sapatos")]
    Shoes,
    #[serde(rename = "acessorio1")]
    Accessory1,
    #[serde(rename = "acessorio2")]
    Accessory2,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 10] = [
        EquipmentSlot::Head,
        EquipmentSlot::Face,
        EquipmentSlot::Mouth,
        EquipmentSlot::Armor,
        EquipmentSlot::Weapon,
        EquipmentSlot::Shield,
        EquipmentSlot::Garment,
        EquipmentSlot::Shoes,
        EquipmentSlot::Accessory1,
        EquipmentSlot::Accessory2,
    ];

    /// 页面展示标签
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentSlot::Head => "Topo",
            EquipmentSlot::Face => "Meio",
            EquipmentSlot::Mouth => "Baixo",
            EquipmentSlot::Armor => "Armadura",
            EquipmentSlot::Weapon => "Arma",
            EquipmentSlot::Shield => "Escudo",
            EquipmentSlot::Garment => "Capa",
            EquipmentSlot::Shoes => "Sapatos",
            EquipmentSlot::Accessory1 => "Acessório 1",
            EquipmentSlot::Accessory2 => "Acessório 2",
        }
    }
}

/// 槽位 -> 物品描述；缺省槽位即“未指定”
pub type Equipment = BTreeMap<EquipmentSlot, String>;

/// 构建进度阶段（Start / Early Game / End Game ...）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildStage {
    pub label: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// 技能说明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillNote {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_core: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    Pro,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildTip {
    #[serde(rename = "type")]
    pub kind: TipKind,
    pub content: String,
}

/// 属性值：数字或自由文本（"90+"、"Restante"）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(n) => write!(f, "{}", n),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatItem {
    pub name: String,
    pub value: StatValue,
    #[serde(default)]
    pub description: String,
}

/// 分阶段属性分配说明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributePhase {
    pub phase: String,
    #[serde(default)]
    pub items: Vec<StatItem>,
}

/// 构建/文章记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRecord {
    pub id: String,
    pub title: String,
    pub category: ContentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    // 详细构建数据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tldr: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_phases: Vec<AttributePhase>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<SkillNote>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<BuildTip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<BuildStage>>,
}

impl BuildRecord {
    /// 最小记录（其余字段取默认值）
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: ContentCategory) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category,
            subcategory: None,
            class_name: None,
            author: String::new(),
            description: String::new(),
            image_url: String::new(),
            fallback_image_url: None,
            difficulty: None,
            tags: Vec::new(),
            video_url: None,
            slug: None,
            tldr: None,
            attribute_phases: Vec::new(),
            skills: Vec::new(),
            tips: Vec::new(),
            stages: None,
        }
    }

    /// 标识：有 slug 用 slug，否则退回 id
    pub fn identifier(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.id)
    }

    /// 是否有结构化的装备进度
    pub fn has_stages(&self) -> bool {
        self.stages.as_ref().is_some_and(|s| !s.is_empty())
    }
}

impl fmt::Display for BuildRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class_name {
            Some(class) => write!(f, "[{}] {} ({})", self.id, self.title, class),
            None => write!(f, "[{}] {}", self.id, self.title),
        }
    }
}

/// 职业分组表：画廊标签 -> 底层职业列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassGroupTable(BTreeMap<String, Vec<String>>);

impl ClassGroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.0.get(label).map(Vec::as_slice)
    }

    pub fn insert(&mut self, label: impl Into<String>, classes: Vec<String>) {
        self.0.insert(label.into(), classes);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl<L, C> FromIterator<(L, Vec<C>)> for ClassGroupTable
where
    L: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, Vec<C>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, classes)| (label.into(), classes.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

/// 画廊卡片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_override: Option<String>,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub hover_description: String,
}

/// 完整静态目录文档
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    #[serde(default)]
    pub builds: Vec<BuildRecord>,
    #[serde(default)]
    pub class_groups: ClassGroupTable,
    #[serde(default)]
    pub gallery: Vec<GalleryItem>,
}

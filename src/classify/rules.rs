//! 视频分类规则定义（纯数据，可序列化，可从 JSON 覆盖）
//! 默认规则即站点当前使用的别名表

use serde::{Deserialize, Serialize};

use crate::catalog::model::ContentCategory;

/// 单个职业的别名规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAliasRule {
    pub name: String,
    /// 基础职业树（画廊子分类）
    pub subcategory: String,
    pub aliases: Vec<String>,
}

/// 内容分类的关键词规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPatternRule {
    pub category: ContentCategory,
    pub patterns: Vec<String>,
}

/// 完整分类规则集
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierRules {
    /// 标题/简介中出现即视为相关视频
    pub relevance_keywords: Vec<String>,
    /// 标签命中即视为相关视频（忽略 # 前缀）
    pub relevance_tags: Vec<String>,
    /// 标题含这些词的视频不归属具体职业
    pub generic_patterns: Vec<String>,
    /// 不超过此长度（字符数）的别名按整词匹配
    pub short_alias_max_len: usize,
    pub classes: Vec<ClassAliasRule>,
    /// 系列规则：仅匹配标题，优先于普通分类
    pub series: Vec<CategoryPatternRule>,
    pub categories: Vec<CategoryPatternRule>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn class(name: &str, subcategory: &str, aliases: &[&str]) -> ClassAliasRule {
    ClassAliasRule {
        name: name.to_string(),
        subcategory: subcategory.to_string(),
        aliases: strings(aliases),
    }
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            relevance_keywords: strings(&["ragnatales", "ragnatales.com.br", "ragna tales"]),
            relevance_tags: strings(&[
                "ragnatales", "ragnarok", "ragnarokonline", "gypsy", "dancer", "gipsy",
                "trouvere", "mmorpg", "mmo", "rpg", "rmt",
            ]),
            generic_patterns: strings(&[
                "tier list", "melhores classes", "melhor classe", "todas as vocações", "todas as classes",
            ]),
            short_alias_max_len: 7,
            classes: vec![
                class("Atirador de Elite", "Arqueiro", &[
                    "atirador de elite", "sniper", "atirador", "arqueiro", "tiro preciso",
                    "disparo violento", "tempestade de flechas", "rajada de flechas", "arrow storm",
                    "sharp shooting", "double strafe", "hunter", "caçador",
                ]),
                class("Arquimago", "Mago", &[
                    "arquimago", "arch mage", "archmage", "mago", "wizard", "bruxo",
                    "campo gravitacional", "meteor storm", "tempestade de meteoros", "stave crasher",
                    "high wizard",
                ]),
                class("Lorde", "Espadachim", &[
                    "lorde", "lord knight", "espadachim", "cavaleiro", "knight", "impacto de tyr",
                    "bash", "spiral pierce", "perfuração espiral", "two-hand sword",
                ]),
                class("Paladino", "Espadachim", &[
                    "paladino", "paladin", "crux divinum", "grand cross", "cruz magnífica",
                    "escudo sagrado", "autocast paladin", "crusader", "cruzado",
                ]),
                class("Criador", "Mercador", &[
                    "criador", "creator", "alquimista", "alchemist", "ácido", "acid demonstration",
                    "homunculus", "tornado de carrinho", "terror ácido",
                ]),
                class("Mestre-Ferreiro", "Mercador", &[
                    "mestre-ferreiro", "mestre ferreiro", "whitesmith", "blacksmith", "ferreiro",
                    "cart termination", "mammonite", "over thrust", "martelo de thor",
                ]),
                class("Sumo Sacerdote", "Noviço", &[
                    "sumo sacerdote", "high priest", "sacerdote", "priest", "padre", "clérigo",
                    "acolyte", "magnus exorcismus", "adoramus", "heal bomb",
                ]),
                class("Mestre", "Noviço", &[
                    "mestre monge", "champion", "campeão", "monge", "monk", "asura strike",
                    "dedo de buda", "combo monk", "investigação", "occult impaction", "mestre",
                ]),
                class("Algoz", "Gatuno", &[
                    "algoz", "assassin cross", "assassino", "assassin", "sonic blow", "golpe sônico",
                    "crit assassin", "katar", "envenenar",
                ]),
                class("Desordeiro", "Gatuno", &[
                    "desordeiro", "stalker", "rogue", "disparo triplo", "plagiar", "bow rogue",
                    "strip", "divest",
                ]),
                class("Professor", "Expandida", &[
                    "professor", "scholar", "sage", "sábio", "autocast professor", "soul burn",
                    "mind breaker", "hindsight", "autospell",
                ]),
                class("Mestre Taekwon", "Expandida", &[
                    "mestre taekwon", "star gladiator", "taekwon master", "taekwon", "star emperor",
                ]),
                class("Cigana", "Expandida", &[
                    "cigana", "gypsy", "gipsy", "dançarina", "dancer", "trouvere", "odalisca",
                ]),
                class("Menestrel", "Expandida", &[
                    "menestrel", "minstrel", "bardo", "clown", "trovador", "músico", "bard", "vulcão",
                ]),
                class("Espiritualista", "Expandida", &["espiritualista", "soul linker", "soul reaper"]),
                class("Ninja", "Expandida", &["ninja", "kagerou", "oboro", "shuriken", "ninjutsu"]),
                class("Justiceiro", "Expandida", &["justiceiro", "gunslinger", "rebel", "rebelde", "pistoleiro"]),
                class("Super Novice", "Expandida", &["super novice", "super noviço", "super aprendiz"]),
            ],
            series: vec![
                CategoryPatternRule {
                    category: ContentCategory::ZeroToRmt,
                    patterns: strings(&[
                        "rmt do zero", "rmt do zero -", "renda extra na prática", "reserva de emergência",
                        "ganhe dinheiro jogando", "verdade sobre o rmt",
                    ]),
                },
                CategoryPatternRule {
                    category: ContentCategory::FamilyManMmo,
                    patterns: strings(&[
                        "do zero à chefênia", "do zero a chefenia", "comecei do zero", "jornada das sombras",
                        "guia de progressão do pai de família", "progressão do pai de família",
                        "pai de família", "pai de familia", "nosso segundo dia do zero",
                        "nossa primeira semana do zero",
                    ]),
                },
            ],
            categories: vec![
                CategoryPatternRule {
                    category: ContentCategory::EssentialGuides,
                    patterns: strings(&[
                        "guia", "como progredir", "progressão", "iniciante", "tier list", "instância",
                        "como começar", "consumíveis", "refino", "quest de acesso", "early game",
                        "farmar", "farm", "moedas", "logue e ganhe", "força heróica", "passe de batalha",
                        "classes mais", "melhor classe", "melhores classes", "manual de progressão",
                        "atalhos", "talestools", "despertar", "verus", "skagos", "fortaleza",
                        "medalhas do éden", "erros que iniciantes", "turbine seu farm", "convertir",
                        "munições", "biblioteca de conteúdo",
                    ]),
                },
                CategoryPatternRule {
                    category: ContentCategory::PatchNotes,
                    patterns: strings(&[
                        "patch notes", "changelog", "novidades para personagens", "patch note",
                        "novo sistema", "mapas especiais", "changelog ",
                    ]),
                },
            ],
        }
    }
}

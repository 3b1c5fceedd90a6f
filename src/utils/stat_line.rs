//! 属性文本拆分工具
//! "INT 99" -> (INT, 99)：首个空白分隔的词为属性名，其余为数值

use std::fmt;

/// 阶段属性行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine<'a> {
    pub name: &'a str,
    pub value: String,
}

impl<'a> StatLine<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let mut parts = raw.split_whitespace();
        let name = parts.next().unwrap_or("");
        let value = parts.collect::<Vec<_>>().join(" ");
        Self { name, value }
    }
}

impl fmt::Display for StatLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            f.write_str(self.name)
        } else {
            write!(f, "{} {}", self.name, self.value)
        }
    }
}

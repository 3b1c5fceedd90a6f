//! slug 生成工具
//! 由标题确定性地生成 URL 安全标识：去音调 -> 小写 -> 非字母数字折叠为单个 '-'

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// 根据标题生成 slug
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    // 标记上一个字符是否为分隔符，避免连续 '-'
    let mut pending_dash = false;

    for ch in title.nfd().filter(|c| !is_combining_mark(*c)) {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

//! 语音合成文本净化
//!
//! 合成服务对过长输入会拒绝或错误渲染，对 Markdown 标记会把标点读出来。
//! 送往合成端之前：去除标记字符 → 换行折叠为空格 → 去除首尾空白 → 截断。
//!
//! 整个流水线是幂等的：对已净化文本再执行一次不产生任何变化。
//! 截断必须放在最后，否则去标记可能把已截断文本再次缩短，
//! 第二次执行会在标记尾部重新截断，产生不同输出。

/// 合成文本最大字符数（按字符计，不是字节）
pub const MAX_SYNTH_CHARS: usize = 500;

/// 截断标记
pub const TRUNCATION_MARKER: &str = "...";

/// 净化配置
#[derive(Debug, Clone)]
pub struct SanitizeConfig {
    /// 截断前允许的最大字符数
    pub max_chars: usize,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            max_chars: MAX_SYNTH_CHARS,
        }
    }
}

/// 检查是否为 Markdown 标记字符（朗读时产生噪音）
#[inline]
fn is_markup_char(ch: char) -> bool {
    matches!(ch, '*' | '#' | '`')
}

/// 按字符截断文本，超长时追加截断标记
///
/// 按 `char` 计数而不是字节，文本可能包含西里尔等多字节字符。
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// 去除 Markdown 标记字符
fn strip_markup(text: &str) -> String {
    text.chars().filter(|ch| !is_markup_char(*ch)).collect()
}

/// 将连续换行折叠为单个空格
fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_newline_run = false;

    for ch in text.chars() {
        if ch == '\n' {
            if !in_newline_run {
                out.push(' ');
            }
            in_newline_run = true;
        } else {
            out.push(ch);
            in_newline_run = false;
        }
    }

    out
}

/// 净化合成输入
///
/// 步骤与顺序：
/// 1. 去除 `*`、`#`、反引号
/// 2. 连续换行折叠为单个空格
/// 3. 去除首尾空白
/// 4. 截断到 `max_chars` 个字符，超长时追加 `...`
///
/// 截断后的文本前 `max_chars` 个字符不再变化，重复截断返回相同结果，
/// 因此截断放在最后保证整条流水线幂等。
///
/// 返回值可能为空字符串，表示净化后没有可朗读内容，调用方应跳过合成。
pub fn sanitize_for_speech(text: &str, config: &SanitizeConfig) -> String {
    let stripped = strip_markup(text);
    let collapsed = collapse_newlines(&stripped);
    let trimmed = collapsed.trim();
    truncate_chars(trimmed, config.max_chars)
}

/// 使用默认配置净化（便捷方法）
pub fn sanitize_default(text: &str) -> String {
    sanitize_for_speech(text, &SanitizeConfig::default())
}

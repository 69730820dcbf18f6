//! Cookie 与 CSRF token 提取
//!
//! 纯函数，不做任何网络请求。

use regex::Regex;
use std::sync::OnceLock;

/// 会话 ID cookie 名
pub const SESSION_ID_COOKIE: &str = "sessionid";
/// 用户 ID cookie 名
pub const USER_ID_COOKIE: &str = "sid_guard";
/// CSRF token cookie 名
pub const CSRF_COOKIE: &str = "csrf_session_id";

/// cookie 字符串短于该长度时视为不完整
pub const COOKIE_MIN_LEN: usize = 50;

/// 从 cookie 字符串中提取指定名称的值
///
/// 名称必须出现在字符串开头或 `"; "` 之后，避免匹配到其它 cookie 名的后缀。
pub fn extract_cookie_value(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    let pattern = format!(r"(^|; ){}=([^;]*)", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    re.captures(cookies)
        .map(|caps| caps[2].to_string())
        .filter(|v| !v.is_empty())
}

/// 页面标记中的 CSRF meta 标签模式（name/content 两种属性顺序）
fn meta_csrf_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let patterns = [
            r#"<meta[^>]*name=["'][^"']*csrf[^"']*["'][^>]*content=["']([^"']+)["']"#,
            r#"<meta[^>]*content=["']([^"']+)["'][^>]*name=["'][^"']*csrf[^"']*["']"#,
        ];
        patterns.iter().filter_map(|p| Regex::new(p).ok()).collect()
    })
}

/// 提取 CSRF token
///
/// 顺序：csrf_session_id cookie → 页面标记中的 csrf meta 标签 →
/// 运行时变量值。都没有则返回 None。
pub fn extract_csrf_token(
    cookies: &str,
    markup: Option<&str>,
    runtime_token: Option<&str>,
) -> Option<String> {
    if let Some(token) = extract_cookie_value(cookies, CSRF_COOKIE) {
        return Some(token);
    }

    if let Some(html) = markup {
        for pattern in meta_csrf_patterns() {
            if let Some(caps) = pattern.captures(html) {
                let token = caps[1].trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    runtime_token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

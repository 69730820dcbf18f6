//! 视频 ID 解析
//!
//! 两种链接形式：直接包含数字 ID 的完整链接（纯模式匹配，不走网络），
//! 以及需要跟随重定向展开的短链接。

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

use tikcast_core::models::SessionData;

use crate::publisher::CommentPublisher;

/// `/video/<数字>` 模式
fn video_id_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"/video/(\d+)").ok())
        .as_ref()
}

/// 从链接文本中直接匹配视频 ID（不做网络请求）
pub fn match_video_id(url: &str) -> Option<String> {
    video_id_regex()?
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// 链接是否指向短链接域名
pub fn is_short_link(url: &str, short_link_host: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.eq_ignore_ascii_case(short_link_host)))
        .unwrap_or(false)
}

impl CommentPublisher {
    /// 解析视频 ID
    ///
    /// 完整链接直接模式匹配；短链接发 HEAD 请求跟随重定向后再匹配。
    /// 重定向解析中的任何网络错误都返回 None。
    pub async fn resolve_video_id(&self, url: &str) -> Option<String> {
        if let Some(id) = match_video_id(url) {
            return Some(id);
        }

        if is_short_link(url, &self.config().short_link_host) {
            let response = match self.ambient_client().head(url).send().await {
                Ok(response) => response,
                Err(err) => {
                    debug!("短链接展开失败: {err}");
                    return None;
                }
            };
            return match_video_id(response.url().as_str());
        }

        None
    }

    /// 解析视频的内部标识（aweme_id）
    ///
    /// 先拿到视频 ID，再尝试从视频详情端点换取 aweme_id；
    /// 详情查询失败时直接使用视频 ID。
    pub async fn resolve_aweme_id(
        &self,
        session: Option<&SessionData>,
        video_url: &str,
    ) -> Option<String> {
        let video_id = self.resolve_video_id(video_url).await?;

        match self.query_post_detail(session, video_url, &video_id).await {
            Ok(Some(aweme_id)) => Some(aweme_id),
            Ok(None) => Some(video_id),
            Err(err) => {
                debug!("视频详情查询失败，直接使用视频 ID: {err}");
                Some(video_id)
            }
        }
    }

    /// 查询视频详情端点，提取 aweme_detail.aweme_id
    ///
    /// 走带 cookie jar 的客户端：详情响应里的 Set-Cookie 留在 jar 中，
    /// 备用路径发布时自动附带。
    async fn query_post_detail(
        &self,
        session: Option<&SessionData>,
        video_url: &str,
        video_id: &str,
    ) -> Result<Option<String>, reqwest::Error> {
        use reqwest::header::{COOKIE, REFERER, USER_AGENT};

        let mut request = self
            .ambient_client()
            .get(self.config().post_detail_url(video_id))
            .header(REFERER, video_url)
            .header(USER_AGENT, &self.config().user_agent);
        if let Some(session) = session {
            if !session.raw_cookie_header.is_empty() {
                request = request.header(COOKIE, &session.raw_cookie_header);
            }
        }

        let data: serde_json::Value = request.send().await?.json().await?;
        let aweme_id = data["aweme_detail"]["aweme_id"]
            .as_str()
            .map(str::to_string)
            .or_else(|| data["aweme_detail"]["aweme_id"].as_i64().map(|v| v.to_string()));
        Ok(aweme_id)
    }
}

//! 会话数据模型
//!
//! 一次解析构造一份 `SessionData`，由发布器在单次发布调用期间持有。
//! 不做持久化，也没有销毁逻辑。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 会话解析结果
///
/// 除 `raw_cookie_header`（可能为空字符串）外，所有字段相互独立、均为可选。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// 原始 Cookie 请求头
    pub raw_cookie_header: String,
    /// CSRF token
    pub csrf_token: Option<String>,
    /// 会话 ID（sessionid cookie）
    pub session_id: Option<String>,
    /// 用户 ID（sid_guard cookie）
    pub user_id: Option<String>,
    /// 解析时间
    pub resolved_at: DateTime<Utc>,
}

impl SessionData {
    /// 以给定 cookie 头创建会话数据，其余字段为空
    pub fn new(raw_cookie_header: impl Into<String>) -> Self {
        Self {
            raw_cookie_header: raw_cookie_header.into(),
            csrf_token: None,
            session_id: None,
            user_id: None,
            resolved_at: Utc::now(),
        }
    }

    /// 发布评论所需的凭证（cookie 与 CSRF token）是否齐备
    pub fn has_publish_credentials(&self) -> bool {
        !self.raw_cookie_header.trim().is_empty()
            && self
                .csrf_token
                .as_deref()
                .map(|t| !t.trim().is_empty())
                .unwrap_or(false)
    }
}

/// 按字段拼装 Cookie 头
///
/// 只拼接已提供的字段，以 `"; "` 连接。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieParts {
    pub sessionid: Option<String>,
    pub csrf_session_id: Option<String>,
    pub sid_guard: Option<String>,
    pub tt_chain_token: Option<String>,
}

impl CookieParts {
    /// 拼装为 Cookie 请求头字符串
    pub fn to_cookie_header(&self) -> String {
        let mut cookies = Vec::new();
        if let Some(v) = &self.sessionid {
            cookies.push(format!("sessionid={v}"));
        }
        if let Some(v) = &self.csrf_session_id {
            cookies.push(format!("csrf_session_id={v}"));
        }
        if let Some(v) = &self.sid_guard {
            cookies.push(format!("sid_guard={v}"));
        }
        if let Some(v) = &self.tt_chain_token {
            cookies.push(format!("tt_chain_token={v}"));
        }
        cookies.join("; ")
    }
}

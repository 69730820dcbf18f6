//! 会话解析器
//!
//! 按固定顺序尝试多个来源（内嵌框架快照、宿主页面快照、持久化存储 blob、
//! 网络探测），在第一个产出可用数据的来源处停止。来源内部的网络错误
//! 被捕获并视为该策略失败，继续尝试下一个来源；解析器本身从不报错。
//!
//! 所有来源都是显式参数，替代原先环境里的全局对象。

use chrono::Utc;
use reqwest::header::{ACCEPT, COOKIE, SET_COOKIE, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tikcast_core::errors::PublishError;
use tikcast_core::models::SessionData;

use crate::config::PublisherConfig;
use crate::session::extract::{
    extract_cookie_value, extract_csrf_token, COOKIE_MIN_LEN, CSRF_COOKIE, SESSION_ID_COOKIE,
    USER_ID_COOKIE,
};

/// 页面快照
///
/// 调用方捕获的 cookie 字符串、页面标记与运行时 CSRF 值。
/// 内嵌框架可能因隔离策略无法读取，此时字段为空即可。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    /// cookie 字符串（`name=value; name=value` 形式）
    pub cookies: String,
    /// 页面标记文本（用于 csrf meta 标签扫描）
    pub markup: Option<String>,
    /// 运行时变量中的 CSRF 值
    pub runtime_csrf: Option<String>,
}

impl PageSnapshot {
    /// 仅携带 cookie 的快照
    pub fn from_cookies(cookies: impl Into<String>) -> Self {
        Self {
            cookies: cookies.into(),
            markup: None,
            runtime_csrf: None,
        }
    }
}

/// 会话来源（按列表顺序尝试）
#[derive(Debug, Clone)]
pub enum SessionSource {
    /// 内嵌登录框架的页面快照
    EmbeddedFrame(PageSnapshot),
    /// 宿主页面的快照
    HostPage(PageSnapshot),
    /// 持久化存储中的会话 blob（JSON）
    PersistedStorage { blob: String },
    /// 向用户详情端点发起探测，从响应头提取 CSRF
    NetworkProbe,
}

/// 持久化存储 blob 的结构
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    cookies: Option<String>,
    csrf_token: Option<String>,
}

/// 单个来源产出的候选数据
struct Candidate {
    cookies: String,
    csrf: Option<String>,
}

/// 会话解析器
pub struct SessionResolver {
    client: Client,
    config: PublisherConfig,
}

impl SessionResolver {
    /// 创建解析器
    ///
    /// 客户端自带 cookie jar：探测响应里的 Set-Cookie 会被吸收进 jar，
    /// 供后续依赖环境凭证的请求使用。
    pub fn new(config: PublisherConfig) -> Result<Self, PublishError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { client, config })
    }

    /// 使用外部构造的客户端（与发布器共享同一个 cookie jar 时用这个）
    pub fn with_client(client: Client, config: PublisherConfig) -> Self {
        Self { client, config }
    }

    /// 依序尝试各来源，返回第一份可用的会话数据
    ///
    /// 没有任何来源可用时返回 None，调用方应视为"未登录"。
    pub async fn resolve(&self, sources: &[SessionSource]) -> Option<SessionData> {
        // 网络探测自身拿不到 cookie，记录此前见过的最完整页面快照
        let mut best_snapshot_cookies = String::new();

        for source in sources {
            let candidate = match source {
                SessionSource::EmbeddedFrame(snapshot) | SessionSource::HostPage(snapshot) => {
                    if snapshot.cookies.len() > best_snapshot_cookies.len() {
                        best_snapshot_cookies = snapshot.cookies.clone();
                    }
                    Some(Candidate {
                        cookies: snapshot.cookies.clone(),
                        csrf: extract_csrf_token(
                            &snapshot.cookies,
                            snapshot.markup.as_deref(),
                            snapshot.runtime_csrf.as_deref(),
                        ),
                    })
                }
                SessionSource::PersistedStorage { blob } => from_storage(blob),
                SessionSource::NetworkProbe => {
                    match self.probe(&best_snapshot_cookies).await {
                        Ok(candidate) => Some(candidate),
                        Err(err) => {
                            debug!("网络探测失败，继续下一个来源: {err}");
                            None
                        }
                    }
                }
            };

            let Some(candidate) = candidate else { continue };
            if let Some(session) = build_session(candidate) {
                info!(
                    has_csrf = session.csrf_token.is_some(),
                    has_session_id = session.session_id.is_some(),
                    "会话解析成功"
                );
                return Some(session);
            }
            debug!("来源数据不可用，继续下一个来源");
        }

        None
    }

    /// 向用户详情端点发起探测，从 Set-Cookie 响应头提取 CSRF token
    async fn probe(&self, snapshot_cookies: &str) -> Result<Candidate, reqwest::Error> {
        let mut request = self
            .client
            .get(self.config.user_detail_url())
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/json");
        if !snapshot_cookies.is_empty() {
            request = request.header(COOKIE, snapshot_cookies);
        }

        let response = request.send().await?;

        let mut csrf = None;
        for value in response.headers().get_all(SET_COOKIE) {
            if let Ok(text) = value.to_str() {
                if text.contains("csrf") {
                    if let Some(token) = extract_cookie_value(text, CSRF_COOKIE) {
                        csrf = Some(token);
                        break;
                    }
                }
            }
        }

        Ok(Candidate {
            cookies: snapshot_cookies.to_string(),
            csrf,
        })
    }
}

/// 解析持久化存储中的会话 blob
fn from_storage(blob: &str) -> Option<Candidate> {
    let stored: StoredSession = serde_json::from_str(blob).ok()?;
    let cookies = stored.cookies.unwrap_or_default();
    let csrf = stored
        .csrf_token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| extract_csrf_token(&cookies, None, None));
    Some(Candidate { cookies, csrf })
}

/// 候选数据可用则构造会话：cookie 足够长，或单独找到了会话 ID / CSRF token
fn build_session(candidate: Candidate) -> Option<SessionData> {
    let session_id = extract_cookie_value(&candidate.cookies, SESSION_ID_COOKIE);
    let user_id = extract_cookie_value(&candidate.cookies, USER_ID_COOKIE);

    let usable = candidate.cookies.len() > COOKIE_MIN_LEN
        || session_id.is_some()
        || candidate.csrf.is_some();
    if !usable {
        return None;
    }

    Some(SessionData {
        raw_cookie_header: candidate.cookies,
        csrf_token: candidate.csrf,
        session_id,
        user_id,
        resolved_at: Utc::now(),
    })
}

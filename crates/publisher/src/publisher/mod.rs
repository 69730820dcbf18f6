//! 评论发布器
//!
//! 基于解析出的会话数据提交评论。主路径显式附带 Cookie 与 CSRF 头；
//! 失败时回退到依赖客户端 cookie jar 的备用路径，最多回退一次，
//! 没有重试退避。
//!
//! ## 模块结构
//! - `response`: 平台响应解释（纯函数）
//! - `video_id`: 视频 ID / aweme_id 解析

pub mod response;
pub mod video_id;

use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::Client;
use tracing::{debug, warn};

use tikcast_core::errors::PublishError;
use tikcast_core::models::{PublishRequest, PublishSuccess, SessionData};
use tikcast_core::sanitizer::CredentialSanitizer;

use crate::config::PublisherConfig;
use crate::publisher::response::interpret_response;
use crate::session::SessionResolver;

pub use response::RAW_BODY_PREVIEW_LEN;

/// 评论发布器
pub struct CommentPublisher {
    client: Client,
    /// 备用路径使用的带 cookie jar 的客户端
    ambient_client: Client,
    config: PublisherConfig,
    sanitizer: CredentialSanitizer,
}

impl CommentPublisher {
    pub fn new(config: PublisherConfig) -> Result<Self, PublishError> {
        let client = Client::builder().build()?;
        let ambient_client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            ambient_client,
            config,
            sanitizer: CredentialSanitizer::with_defaults(),
        })
    }

    pub fn with_defaults() -> Result<Self, PublishError> {
        Self::new(PublisherConfig::default())
    }

    pub(crate) fn ambient_client(&self) -> &Client {
        &self.ambient_client
    }

    pub(crate) fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// 创建与本发布器共享 cookie jar 的会话解析器
    ///
    /// 探测与详情请求经过同一个 jar，响应里的 Set-Cookie 会被吸收，
    /// 备用路径发布时凭 jar 自动附带这些凭证。
    pub fn session_resolver(&self) -> SessionResolver {
        SessionResolver::with_client(self.ambient_client.clone(), self.config.clone())
    }

    /// 提交评论（主路径）
    ///
    /// 会话必须同时携带非空 cookie 与 CSRF token，否则不发任何请求、
    /// 直接返回认证错误。CSRF 值同时写入 `X-CSRFToken` 与 `csrf-token`
    /// 两个头（平台两种网关各认一个）。
    pub async fn publish(
        &self,
        session: &SessionData,
        comment: &str,
        video_url: &str,
    ) -> Result<PublishSuccess, PublishError> {
        if !session.has_publish_credentials() {
            return Err(PublishError::MissingCredentials(
                "请先登录并提供 cookie 与 CSRF token".to_string(),
            ));
        }
        let csrf_token = session.csrf_token.as_deref().unwrap_or_default();

        let aweme_id = self
            .resolve_aweme_id(Some(session), video_url)
            .await
            .ok_or_else(|| PublishError::InvalidVideoUrl(video_url.to_string()))?;

        let payload = PublishRequest::new(comment, aweme_id);

        let response = self
            .client
            .post(self.config.comment_url())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(ACCEPT_LANGUAGE, &self.config.accept_language)
            .header(ORIGIN, &self.config.api_base)
            .header(REFERER, video_url)
            .header(USER_AGENT, &self.config.user_agent)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(COOKIE, &session.raw_cookie_header)
            .header("X-CSRFToken", csrf_token)
            .header("csrf-token", csrf_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            "评论发布响应: {}",
            self.sanitizer.sanitize(&body)
        );
        interpret_response(status, &body)
    }

    /// 提交评论（备用路径）
    ///
    /// 不显式附带 Cookie/CSRF 头，依赖客户端 cookie jar 里
    /// 已吸收的凭证自动附加。
    pub async fn publish_ambient(
        &self,
        comment: &str,
        video_url: &str,
    ) -> Result<PublishSuccess, PublishError> {
        let aweme_id = self
            .resolve_aweme_id(None, video_url)
            .await
            .ok_or_else(|| PublishError::InvalidVideoUrl(video_url.to_string()))?;

        let payload = PublishRequest::new(comment, aweme_id);

        let response = self
            .ambient_client
            .post(self.config.comment_url())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(ORIGIN, &self.config.api_base)
            .header(REFERER, video_url)
            .header(USER_AGENT, &self.config.user_agent)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            "备用路径响应: {}",
            self.sanitizer.sanitize(&body)
        );
        interpret_response(status, &body)
    }

    /// 先走主路径，失败则回退备用路径（仅一次）
    pub async fn publish_with_fallback(
        &self,
        session: &SessionData,
        comment: &str,
        video_url: &str,
    ) -> Result<PublishSuccess, PublishError> {
        match self.publish(session, comment, video_url).await {
            Ok(success) => Ok(success),
            Err(err) => {
                warn!("主路径发布失败，切换备用路径: {err}");
                self.publish_ambient(comment, video_url).await
            }
        }
    }

    /// 校验会话是否仍然有效
    pub async fn validate_session(&self, session: &SessionData) -> bool {
        if session.raw_cookie_header.trim().is_empty() {
            return false;
        }

        let response = self
            .client
            .get(self.config.user_detail_url())
            .header(COOKIE, &session.raw_cookie_header)
            .header(USER_AGENT, &self.config.user_agent)
            .header(REFERER, self.config.home_url())
            .send()
            .await;

        let Ok(response) = response else {
            return false;
        };
        if !response.status().is_success() {
            return false;
        }
        let Ok(data) = response.json::<serde_json::Value>().await else {
            return false;
        };
        data["status_code"].as_i64() == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher() -> CommentPublisher {
        CommentPublisher::with_defaults().unwrap()
    }

    #[tokio::test]
    async fn test_publish_without_cookie_fails_fast() {
        // cookie 为空时直接返回认证错误，不发任何请求
        let mut session = SessionData::new("");
        session.csrf_token = Some("tok".to_string());

        let result = publisher()
            .publish(&session, "你好", "https://www.tiktok.com/@u/video/123456")
            .await;
        assert!(matches!(result, Err(PublishError::MissingCredentials(_))));
    }

    #[tokio::test]
    async fn test_publish_without_csrf_fails_fast() {
        let session = SessionData::new("sessionid=abc");

        let result = publisher()
            .publish(&session, "你好", "https://www.tiktok.com/@u/video/123456")
            .await;
        match result {
            Err(err) => assert!(err.is_authentication()),
            Ok(_) => panic!("expected authentication error"),
        }
    }

    #[tokio::test]
    async fn test_publish_unresolvable_url() {
        // 非短链接且不含视频 ID 的链接：无需网络即可判定失败
        let mut session = SessionData::new("sessionid=abc");
        session.csrf_token = Some("tok".to_string());

        let result = publisher()
            .publish(&session, "你好", "https://www.tiktok.com/@user")
            .await;
        assert!(matches!(result, Err(PublishError::InvalidVideoUrl(_))));
    }

    #[tokio::test]
    async fn test_validate_session_empty_cookie() {
        let session = SessionData::new("  ");
        assert!(!publisher().validate_session(&session).await);
    }

    #[tokio::test]
    async fn test_session_resolver_shares_publisher_client() {
        // 发布器派生的解析器复用备用路径客户端（同一个 cookie jar）
        use crate::session::{PageSnapshot, SessionSource};

        let resolver = publisher().session_resolver();
        let session = resolver
            .resolve(&[SessionSource::HostPage(PageSnapshot::from_cookies(
                "sessionid=shared",
            ))])
            .await
            .unwrap();
        assert_eq!(session.session_id.as_deref(), Some("shared"));
    }
}

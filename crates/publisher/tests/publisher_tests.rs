//! publisher 模块测试
//!
//! 测试公开 API 的构造、序列化与端到端的本地判定路径（不依赖网络）

use tikcast_core::errors::PublishError;
use tikcast_core::models::{CookieParts, SessionData};
use tikcast_publisher::publisher::video_id::match_video_id;
use tikcast_publisher::session::extract_cookie_value;
use tikcast_publisher::{
    CommentPublisher, PageSnapshot, PublisherConfig, SessionResolver, SessionSource,
};

#[test]
fn test_publisher_creation() {
    let publisher = CommentPublisher::new(PublisherConfig::default());
    assert!(publisher.is_ok());
}

#[test]
fn test_session_extraction_roundtrip() {
    let parts = CookieParts {
        sessionid: Some("s-123".to_string()),
        csrf_session_id: Some("c-456".to_string()),
        sid_guard: Some("g-789".to_string()),
        tt_chain_token: None,
    };
    let header = parts.to_cookie_header();

    assert_eq!(
        extract_cookie_value(&header, "sessionid").as_deref(),
        Some("s-123")
    );
    assert_eq!(
        extract_cookie_value(&header, "csrf_session_id").as_deref(),
        Some("c-456")
    );
    assert_eq!(
        extract_cookie_value(&header, "sid_guard").as_deref(),
        Some("g-789")
    );
}

#[test]
fn test_video_id_from_url_without_network() {
    assert_eq!(
        match_video_id("https://www.tiktok.com/@someone/video/123456").as_deref(),
        Some("123456")
    );
}

#[tokio::test]
async fn test_resolver_prefers_earlier_sources() {
    let resolver = SessionResolver::new(PublisherConfig::default()).unwrap();
    let sources = [
        SessionSource::EmbeddedFrame(PageSnapshot::default()),
        SessionSource::PersistedStorage {
            blob: r#"{"cookies":"sessionid=from-storage","csrfToken":"tok"}"#.to_string(),
        },
        SessionSource::HostPage(PageSnapshot {
            cookies: "sessionid=from-host".to_string(),
            markup: None,
            runtime_csrf: None,
        }),
    ];

    let session = resolver.resolve(&sources).await.unwrap();
    assert_eq!(session.session_id.as_deref(), Some("from-storage"));
    assert_eq!(session.csrf_token.as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_publish_requires_credentials_before_any_request() {
    let publisher = CommentPublisher::new(PublisherConfig::default()).unwrap();
    let session = SessionData::new("");

    let result = publisher
        .publish(&session, "评论内容", "https://www.tiktok.com/@u/video/1")
        .await;

    match result {
        Err(PublishError::MissingCredentials(msg)) => {
            assert!(!msg.is_empty());
        }
        other => panic!("expected MissingCredentials, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fallback_runs_after_primary_credential_failure() {
    // 主路径因缺少凭证失败后备用路径接手：最终错误来自备用路径
    // （链接无法解析），而不是主路径的认证错误
    let publisher = CommentPublisher::new(PublisherConfig::default()).unwrap();
    let session = SessionData::new("");

    let result = publisher
        .publish_with_fallback(&session, "评论内容", "https://www.tiktok.com/@user/profile")
        .await;

    assert!(matches!(result, Err(PublishError::InvalidVideoUrl(_))));
}

#[tokio::test]
async fn test_fallback_attempted_once_then_error_returned() {
    // 两条路径都无法连通时返回备用路径的网络错误，没有重试
    let config = PublisherConfig {
        api_base: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let publisher = CommentPublisher::new(config).unwrap();
    let mut session = SessionData::new("sessionid=abc; csrf_session_id=def");
    session.csrf_token = Some("def".to_string());

    let result = publisher
        .publish_with_fallback(&session, "评论内容", "https://www.tiktok.com/@u/video/123456")
        .await;

    assert!(matches!(result, Err(PublishError::Network(_))));
}

#[tokio::test]
async fn test_publish_rejects_unresolvable_url_locally() {
    let publisher = CommentPublisher::new(PublisherConfig::default()).unwrap();
    let mut session = SessionData::new("sessionid=abc; csrf_session_id=def");
    session.csrf_token = Some("def".to_string());

    let result = publisher
        .publish(&session, "评论内容", "https://www.tiktok.com/@user/profile")
        .await;

    assert!(matches!(result, Err(PublishError::InvalidVideoUrl(_))));
}

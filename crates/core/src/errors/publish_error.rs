//! 发布相关错误类型
//!
//! 所有失败都在调用处被转换为带可读消息的错误值，流程本身不会 panic。
//! 错误分为五类：缺少凭证、视频 ID 无法解析、响应非 JSON、
//! 平台返回失败、网络/传输错误。
//!
//! ## 设计原则
//! - 使用 thiserror 派生 Error trait
//! - 支持 From 转换以便错误传播
//! - 实现 Serialize 以支持以字符串形式返回给调用方

use thiserror::Error;

/// 评论发布错误
///
/// 涵盖会话校验、视频 ID 解析与评论提交中可能出现的所有错误情况。
#[derive(Error, Debug)]
pub enum PublishError {
    /// 缺少会话凭证（cookie 或 CSRF token）
    #[error("缺少会话凭证: {0}")]
    MissingCredentials(String),

    /// 视频链接无效或无法解析出 ID
    #[error("视频链接无效或不可用: {0}")]
    InvalidVideoUrl(String),

    /// 响应体不是 JSON（携带截断后的原始响应内容）
    #[error("意外的响应内容: {0}")]
    UnexpectedResponse(String),

    /// 平台返回了失败状态
    #[error("发布失败: {0}")]
    PlatformRejected(String),

    /// 网络请求失败
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
}

impl PublishError {
    /// 是否为认证类错误（调用方据此提示重新登录）
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::MissingCredentials(_))
    }
}

impl From<PublishError> for String {
    fn from(err: PublishError) -> Self {
        err.to_string()
    }
}

impl serde::Serialize for PublishError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

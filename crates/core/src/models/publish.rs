//! 发布请求与响应模型
//!
//! 响应结构由第三方平台所有，随时可能变化，这里只做宽松解析。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 评论发布请求体（固定形状）
///
/// 平台同时接受 `item_id` 与 `aweme_id`，两者取同一个值；
/// `reply_id` 固定为 0（顶层评论）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub text: String,
    pub item_id: String,
    pub aweme_id: String,
    pub reply_id: i64,
}

impl PublishRequest {
    /// 构造指向目标视频的顶层评论请求
    pub fn new(text: impl Into<String>, target_id: impl Into<String>) -> Self {
        let target_id = target_id.into();
        Self {
            text: text.into(),
            item_id: target_id.clone(),
            aweme_id: target_id,
            reply_id: 0,
        }
    }
}

/// 平台响应的宽松视图
///
/// `status_code` 为 0 表示成功；未知字段原样保留在 `extra` 中。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformResponse {
    pub status_code: Option<i64>,
    pub status_msg: Option<String>,
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl PlatformResponse {
    /// 平台自身的状态码是否表示成功
    pub fn is_ok(&self) -> bool {
        self.status_code == Some(0)
    }

    /// 提取失败消息：优先 status_msg，其次 message，
    /// 否则用状态码生成通用消息（平台码缺失或为 0 时退回 HTTP 状态码）
    pub fn failure_message(&self, http_status: u16) -> String {
        if let Some(msg) = self.status_msg.as_deref() {
            if !msg.is_empty() {
                return msg.to_string();
            }
        }
        if let Some(msg) = self.message.as_deref() {
            if !msg.is_empty() {
                return msg.to_string();
            }
        }
        let code = match self.status_code {
            Some(code) if code != 0 => code,
            _ => i64::from(http_status),
        };
        format!("平台返回状态码 {code}")
    }
}

/// 发布成功结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishSuccess {
    /// 可读的成功消息
    pub message: String,
    /// 平台返回的完整响应
    pub response: PlatformResponse,
}

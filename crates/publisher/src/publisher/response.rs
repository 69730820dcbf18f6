//! 平台响应解释
//!
//! 纯函数：传输状态 + 响应体 → 成功结果或分类错误。

use reqwest::StatusCode;

use tikcast_core::errors::PublishError;
use tikcast_core::models::{PlatformResponse, PublishSuccess};

/// 非 JSON 响应在错误消息中保留的最大字符数
pub const RAW_BODY_PREVIEW_LEN: usize = 200;

/// 解释评论发布响应
///
/// - 响应体不是 JSON：返回携带截断原始内容的错误；
/// - 平台状态码为 0 且传输状态成功：返回成功；
/// - 其余情况：返回平台消息或基于状态码的通用消息。
pub fn interpret_response(
    http_status: StatusCode,
    body: &str,
) -> Result<PublishSuccess, PublishError> {
    let parsed: PlatformResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => {
            return Err(PublishError::UnexpectedResponse(truncate(
                body,
                RAW_BODY_PREVIEW_LEN,
            )));
        }
    };

    if http_status.is_success() && parsed.is_ok() {
        let message = parsed
            .status_msg
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "发布成功".to_string());
        return Ok(PublishSuccess {
            message,
            response: parsed,
        });
    }

    Err(PublishError::PlatformRejected(
        parsed.failure_message(http_status.as_u16()),
    ))
}

/// 按字符截断（保证不落在 UTF-8 边界中间）
fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

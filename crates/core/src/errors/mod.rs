//! 错误类型模块
//!
//! 定义评论发布流程中的各种错误类型。
//!
//! ## 模块结构
//! - `publish_error`: 发布相关错误（PublishError）

pub mod publish_error;

// 重新导出常用错误类型
pub use publish_error::PublishError;

//! 会话解析与评论发布模块
//!
//! 两个相互配合的部分：
//! - [`session::SessionResolver`] 按固定顺序尝试多个来源，解析出可用的
//!   cookie 与 CSRF token；
//! - [`publisher::CommentPublisher`] 基于解析出的会话数据，解析视频 ID、
//!   构造请求并提交评论，主路径失败时回退到备用路径。
//!
//! 所有环境耦合的凭证来源都以显式参数传入，库内不读取任何全局状态。

pub mod config;
pub mod publisher;
pub mod session;

pub use config::PublisherConfig;
pub use publisher::CommentPublisher;
pub use session::{PageSnapshot, SessionResolver, SessionSource};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

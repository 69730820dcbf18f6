//! 数据模型模块
//!
//! ## 模块结构
//! - `session`: 会话数据（SessionData, CookieParts）
//! - `publish`: 发布请求与响应（PublishRequest, PlatformResponse, PublishSuccess）

pub mod publish;
pub mod session;

pub use publish::{PlatformResponse, PublishRequest, PublishSuccess};
pub use session::{CookieParts, SessionData};

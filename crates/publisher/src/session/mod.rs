//! 会话解析模块
//!
//! ## 模块结构
//! - `extract`: cookie 与 CSRF token 的纯提取函数
//! - `resolver`: 按固定顺序尝试多个来源的会话解析器

pub mod extract;
pub mod resolver;

pub use extract::{extract_cookie_value, extract_csrf_token};
pub use resolver::{PageSnapshot, SessionResolver, SessionSource};

//! 核心类型和工具模块
//!
//! 包含 errors, models, sanitizer 等基础功能

pub mod errors;
pub mod models;
pub mod sanitizer;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

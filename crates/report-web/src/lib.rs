//! # Report Web
//!
//! 报告引擎的HTTP接口层：单个POST端点接收口述文本，返回规范化报告与摘要信息。
//! 方法限制、CORS与OPTIONS预检都在这一层处理，核心引擎保持纯函数。

pub mod handlers;
pub mod server;

pub use server::WebServer;

//! Chat Adapter - HTTP 对话补全客户端实现

mod http_chat_client;

pub use http_chat_client::*;

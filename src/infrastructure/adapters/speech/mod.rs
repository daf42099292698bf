//! Speech Adapter - HTTP 语音合成客户端实现

mod http_speech_client;

pub use http_speech_client::*;

//! Auth Adapter - HTTP 凭证交换实现

mod http_token_client;

pub use http_token_client::*;

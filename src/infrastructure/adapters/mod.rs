//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod auth;
pub mod chat;
pub mod speech;
pub mod storage;

pub use auth::*;
pub use chat::*;
pub use speech::*;
pub use storage::*;

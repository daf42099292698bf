//! HTTP Handlers

mod audio;
mod chat;
mod health;

pub use audio::*;
pub use chat::*;
pub use health::*;

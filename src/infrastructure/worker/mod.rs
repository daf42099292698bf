//! Worker Layer - Background Task Processing
//!
//! 实现 CleanupWorker，周期清理过期音频制品

mod cleanup_worker;

pub use cleanup_worker::{CleanupWorker, CleanupWorkerConfig};

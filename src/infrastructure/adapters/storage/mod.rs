//! Storage Adapter - 文件系统制品存储实现

mod file_artifact_store;

pub use file_artifact_store::*;

//! ZTOPO 文件格式处理
//!
//! 支持：
//! - `.ztop` 原生格式（MessagePack + Zstd）
//! - JSON 交换格式
//!
//! 两种格式共用同一文件内容结构，加载时逐实体经由
//! `Document::insert` 重建文档，损坏文件在边界处被拒绝。

pub mod content;
pub mod error;
pub mod json;
pub mod native;

pub use content::FileContent;
pub use error::FileError;

//! 两种文件格式共用的文件内容结构

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use ztopo_core::document::{Document, DocumentMetadata};
use ztopo_core::entity::Entity;

/// 可序列化的文件内容
///
/// 原生格式和JSON格式共用同一结构，实体按绘制顺序存放。
#[derive(Debug, Serialize, Deserialize)]
pub struct FileContent {
    /// 文档元数据
    pub metadata: DocumentMetadata,
    /// 所有实体（绘制顺序）
    pub entities: Vec<Entity>,
}

impl FileContent {
    /// 收集文档内容
    pub fn from_document(document: &Document) -> Self {
        Self {
            metadata: document.metadata.clone(),
            entities: document.iter().cloned().collect(),
        }
    }

    /// 重建文档
    ///
    /// 逐个经由 `Document::insert` 重新插入，使损坏文件中的
    /// 重复ID、悬空连接、非法几何数值在加载边界被拒绝。
    /// 文档内的绘制顺序保证连接排在其端点节点之后，
    /// 因此按保存顺序插入即可。
    pub fn into_document(self) -> Result<Document, FileError> {
        let mut document = Document::new();
        for entity in self.entities {
            document.insert(entity)?;
        }
        document.metadata = self.metadata;
        Ok(document)
    }
}

//! JSON交换格式
//!
//! 与原生格式共用同一 `FileContent` 结构，序列化为带缩进的JSON，
//! 便于版本管理和与外部工具交换。

use crate::content::FileContent;
use crate::error::FileError;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use ztopo_core::document::Document;

/// 保存文档为JSON文件
pub fn save(document: &Document, path: &Path) -> Result<(), FileError> {
    let content = FileContent::from_document(document);

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &content)?;

    tracing::info!(
        "Saved {} entities to {} (JSON)",
        content.entities.len(),
        path.display()
    );

    Ok(())
}

/// 从JSON文件加载文档
pub fn load(path: &Path) -> Result<Document, FileError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let content: FileContent = serde_json::from_reader(reader)?;

    // 重建文档（插入时校验）
    let document = content.into_document()?;

    tracing::info!(
        "Loaded {} entities from {} (JSON)",
        document.len(),
        path.display()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ztopo_core::entity::{Entity, Link, Node, NodeKind, TextBox};
    use ztopo_core::math::Point2;

    #[test]
    fn test_json_roundtrip() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_document.ztop.json");

        let mut doc = Document::new();
        doc.metadata.title = "JSON roundtrip".to_string();
        let a = doc
            .insert(Entity::Node(Node::new(
                NodeKind::Cloud,
                Point2::new(0.125, -42.5),
                60.0,
                "#9aa7b8",
            )))
            .unwrap();
        let b = doc
            .insert(Entity::Node(Node::new(
                NodeKind::Router,
                Point2::new(77.0, 33.0),
                60.0,
                "#d97b4a",
            )))
            .unwrap();
        doc.insert(Entity::Link(Link::new(a, b))).unwrap();
        doc.insert(Entity::TextBox(
            TextBox::new(Point2::new(5.0, 5.0), 16.0, "#000000").with_text("uplink"),
        ))
        .unwrap();

        save(&doc, &file_path).expect("Failed to save");
        let loaded = load(&file_path).expect("Failed to load");

        assert_eq!(loaded.metadata.title, doc.metadata.title);
        assert_eq!(loaded.metadata.modified_at, doc.metadata.modified_at);
        let original: Vec<_> = doc.iter().collect();
        let roundtripped: Vec<_> = loaded.iter().collect();
        assert_eq!(original, roundtripped);

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_json_rejects_duplicate_id() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_dup.ztop.json");

        let mut doc = Document::new();
        doc.insert(Entity::Node(Node::new(
            NodeKind::Server,
            Point2::new(0.0, 0.0),
            60.0,
            "#7b5ea7",
        )))
        .unwrap();

        let mut content = FileContent::from_document(&doc);
        // 模拟损坏文件：同一实体出现两次
        let copy = content.entities[0].clone();
        content.entities.push(copy);

        let file = File::create(&file_path).unwrap();
        serde_json::to_writer_pretty(BufWriter::new(file), &content).unwrap();

        assert!(matches!(load(&file_path), Err(FileError::Document(_))));

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_not_json() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_not_json.ztop.json");
        std::fs::write(&file_path, b"not json at all").unwrap();

        assert!(matches!(load(&file_path), Err(FileError::Json(_))));

        std::fs::remove_file(&file_path).ok();
    }
}

//! ZTOPO原生文件格式（.ztop）
//!
//! 基于 MessagePack + Zstd 的紧凑二进制格式：
//! - 体积小：MessagePack 比 JSON 小 30-50%，Zstd 再压缩 60-80%
//! - 速度快：直接序列化/反序列化，无需文本解析
//! - 简单可靠：无外部数据库依赖

use crate::content::FileContent;
use crate::error::FileError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use ztopo_core::document::Document;

/// 文件魔数 "ZTOP"
const MAGIC: &[u8; 4] = b"ZTOP";

/// 当前文件格式版本
const FORMAT_VERSION: u32 = 1;

/// Zstd 压缩级别（1-22，3 是默认值，平衡速度和压缩比）
const COMPRESSION_LEVEL: i32 = 3;

/// 文件头（16 字节）
#[derive(Debug)]
struct FileHeader {
    /// 魔数 "ZTOP"
    magic: [u8; 4],
    /// 格式版本
    version: u32,
    /// 标志位（预留）
    flags: u32,
    /// 压缩后数据长度
    compressed_size: u32,
}

impl FileHeader {
    fn new(compressed_size: u32) -> Self {
        Self {
            magic: *MAGIC,
            version: FORMAT_VERSION,
            flags: 0,
            compressed_size,
        }
    }

    fn write(&self, writer: &mut impl Write) -> Result<(), std::io::Error> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        Ok(())
    }

    fn read(reader: &mut impl Read) -> Result<Self, FileError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;

        if &magic != MAGIC {
            return Err(FileError::InvalidFormat(
                "Invalid magic number, not a ZTOP file".to_string(),
            ));
        }

        let mut buf = [0u8; 4];

        reader.read_exact(&mut buf)?;
        let version = u32::from_le_bytes(buf);

        reader.read_exact(&mut buf)?;
        let flags = u32::from_le_bytes(buf);

        reader.read_exact(&mut buf)?;
        let compressed_size = u32::from_le_bytes(buf);

        Ok(Self {
            magic,
            version,
            flags,
            compressed_size,
        })
    }
}

/// 保存文档到文件
pub fn save(document: &Document, path: &Path) -> Result<(), FileError> {
    // 收集文件内容
    let content = FileContent::from_document(document);

    // 序列化为 MessagePack
    let msgpack_data = rmp_serde::to_vec(&content)?;

    // 使用 Zstd 压缩
    let compressed_data = zstd::encode_all(msgpack_data.as_slice(), COMPRESSION_LEVEL)?;

    // 写入文件
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    // 写入文件头
    let header = FileHeader::new(compressed_data.len() as u32);
    header.write(&mut writer)?;

    // 写入压缩数据
    writer.write_all(&compressed_data)?;
    writer.flush()?;

    tracing::info!(
        "Saved {} entities to {} ({} bytes compressed)",
        content.entities.len(),
        path.display(),
        compressed_data.len()
    );

    Ok(())
}

/// 从文件加载文档
pub fn load(path: &Path) -> Result<Document, FileError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    // 读取文件头
    let header = FileHeader::read(&mut reader)?;

    // 版本检查
    if header.version > FORMAT_VERSION {
        return Err(FileError::UnsupportedVersion(format!(
            "File version {} is newer than supported version {}",
            header.version, FORMAT_VERSION
        )));
    }

    // 读取压缩数据
    let mut compressed_data = vec![0u8; header.compressed_size as usize];
    reader.read_exact(&mut compressed_data)?;

    // 解压缩
    let msgpack_data = zstd::decode_all(compressed_data.as_slice())?;

    // 反序列化
    let content: FileContent = rmp_serde::from_slice(&msgpack_data)?;

    // 重建文档（插入时校验）
    let document = content.into_document()?;

    tracing::info!(
        "Loaded {} entities ({} nodes, {} links) from {}",
        document.len(),
        document.node_count(),
        document.link_count(),
        path.display()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ztopo_core::entity::{Entity, Line, Link, Node, NodeKind, Shape, ShapeKind, TextBox};
    use ztopo_core::math::Point2;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.metadata.title = "Office network".to_string();

        let a = doc
            .insert(Entity::Node(
                Node::new(NodeKind::Server, Point2::new(10.5, 20.25), 60.0, "#7b5ea7")
                    .with_label("db-1"),
            ))
            .unwrap();
        let b = doc
            .insert(Entity::Node(Node::new(
                NodeKind::Switch,
                Point2::new(300.0, 20.25),
                60.0,
                "#4ab07a",
            )))
            .unwrap();
        doc.insert(Entity::Link(Link::new(a, b))).unwrap();
        doc.insert(Entity::Line(Line::new(
            Point2::new(-5.0, 0.0),
            Point2::new(120.0, 80.0),
            2.0,
            "#333333",
        )))
        .unwrap();
        doc.insert(Entity::TextBox(
            TextBox::new(Point2::new(50.0, 200.0), 14.0, "#222222").with_text("机房 A"),
        ))
        .unwrap();
        doc.insert(Entity::Shape(Shape::new(
            ShapeKind::BgArea,
            Point2::new(150.0, 100.0),
            120.0,
            "#e8f0fe",
        )))
        .unwrap();
        doc
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_document.ztop");

        let doc = sample_document();
        save(&doc, &file_path).expect("Failed to save");

        // 验证文件头
        let file = File::open(&file_path).expect("Failed to open");
        let mut reader = BufReader::new(file);
        let header = FileHeader::read(&mut reader).expect("Failed to read header");
        assert_eq!(&header.magic, MAGIC);
        assert_eq!(header.version, FORMAT_VERSION);

        let loaded = load(&file_path).expect("Failed to load");

        // 每个字段精确往返
        assert_eq!(loaded.metadata.title, doc.metadata.title);
        assert_eq!(loaded.metadata.created_at, doc.metadata.created_at);
        assert_eq!(loaded.metadata.modified_at, doc.metadata.modified_at);
        assert_eq!(loaded.len(), doc.len());
        let original: Vec<_> = doc.iter().collect();
        let roundtripped: Vec<_> = loaded.iter().collect();
        assert_eq!(original, roundtripped);
        loaded.validate().expect("Loaded document must be valid");

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_invalid_magic() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_invalid.ztop");

        // 写入无效的魔数
        let mut file = File::create(&file_path).expect("Failed to create");
        file.write_all(b"XXXX").expect("Failed to write");
        file.write_all(&[0u8; 12]).expect("Failed to write padding");

        let result = load(&file_path);
        assert!(matches!(result, Err(FileError::InvalidFormat(_))));

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_future_version_rejected() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_future.ztop");

        let mut file = File::create(&file_path).expect("Failed to create");
        let header = FileHeader {
            magic: *MAGIC,
            version: FORMAT_VERSION + 1,
            flags: 0,
            compressed_size: 0,
        };
        header.write(&mut file).expect("Failed to write header");

        let result = load(&file_path);
        assert!(matches!(result, Err(FileError::UnsupportedVersion(_))));

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_corrupted_payload() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_corrupt.ztop");

        // 文件头合法，压缩数据是垃圾
        let mut file = File::create(&file_path).expect("Failed to create");
        let garbage = [0xDEu8, 0xAD, 0xBE, 0xEF, 0x00, 0x11, 0x22, 0x33];
        let header = FileHeader::new(garbage.len() as u32);
        header.write(&mut file).expect("Failed to write header");
        file.write_all(&garbage).expect("Failed to write payload");

        assert!(load(&file_path).is_err());

        std::fs::remove_file(&file_path).ok();
    }
}

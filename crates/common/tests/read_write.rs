//! Integration tests for namespace read and write operations

mod common;

use ::common::{FsError, Namespace, TimeSpec};

#[tokio::test]
async fn test_write_then_read() {
    let ns = Namespace::new();

    ns.create("/file.txt", 0o644).await.unwrap();
    let n = ns.write("/file.txt", b"hello world", 0).await.unwrap();
    assert_eq!(n, 11);

    let data = common::cat(&ns, "/file.txt").await;
    assert_eq!(data, b"hello world");
}

#[tokio::test]
async fn test_write_at_offset_zero_extends() {
    let ns = Namespace::new();

    ns.create("/file.txt", 0o644).await.unwrap();
    ns.write("/file.txt", b"tail", 5).await.unwrap();

    // The gap before the written region reads back as zeroes
    let data = common::cat(&ns, "/file.txt").await;
    assert_eq!(data, b"\0\0\0\0\0tail");
    assert_eq!(ns.getattr("/file.txt").await.unwrap().size, 9);
}

#[tokio::test]
async fn test_overwrite_keeps_surrounding_bytes() {
    let ns = Namespace::new();

    ns.create("/file.txt", 0o644).await.unwrap();
    ns.write("/file.txt", b"hello world", 0).await.unwrap();
    ns.write("/file.txt", b"HELLO", 0).await.unwrap();

    let data = common::cat(&ns, "/file.txt").await;
    assert_eq!(data, b"HELLO world");
}

#[tokio::test]
async fn test_arbitrary_bytes_roundtrip() {
    let ns = Namespace::new();

    // Content is raw bytes; invalid UTF-8 and empty writes are both fine
    let payload = [0xff, 0xfe, 0x00, 0x80, 0x41];
    ns.create("/blob.bin", 0o644).await.unwrap();
    ns.write("/blob.bin", &payload, 0).await.unwrap();
    assert_eq!(common::cat(&ns, "/blob.bin").await, payload);

    assert_eq!(ns.write("/blob.bin", &[], 0).await.unwrap(), 0);
    assert_eq!(common::cat(&ns, "/blob.bin").await, payload);
}

#[tokio::test]
async fn test_read_with_offset() {
    let ns = Namespace::new();

    ns.create("/file.txt", 0o644).await.unwrap();
    ns.write("/file.txt", b"hello world", 0).await.unwrap();

    let mut buf = [0u8; 5];
    let n = ns.read("/file.txt", &mut buf, 6).await.unwrap();
    assert_eq!(n, 5);
    assert_eq!(&buf, b"world");
}

#[tokio::test]
async fn test_read_past_end() {
    let ns = Namespace::new();

    ns.create("/file.txt", 0o644).await.unwrap();
    ns.write("/file.txt", b"hello", 0).await.unwrap();

    // At or beyond the end yields zero bytes, not an error
    let mut buf = [0u8; 8];
    assert_eq!(ns.read("/file.txt", &mut buf, 5).await.unwrap(), 0);
    assert_eq!(ns.read("/file.txt", &mut buf, 100).await.unwrap(), 0);
}

#[tokio::test]
async fn test_short_read_at_tail() {
    let ns = Namespace::new();

    ns.create("/file.txt", 0o644).await.unwrap();
    ns.write("/file.txt", b"hello world", 0).await.unwrap();

    // Only the bytes up to the end come back
    let mut buf = [0u8; 64];
    let n = ns.read("/file.txt", &mut buf, 6).await.unwrap();
    assert_eq!(n, 5);
    assert_eq!(&buf[..n], b"world");
}

#[tokio::test]
async fn test_write_updates_size_and_mtime() {
    let ns = Namespace::new();

    ns.create("/file.txt", 0o644).await.unwrap();
    let before = TimeSpec::now();
    ns.write("/file.txt", b"hello", 0).await.unwrap();

    let attr = ns.getattr("/file.txt").await.unwrap();
    assert_eq!(attr.size, 5);
    assert!(attr.mtime.sec >= before.sec);
}

#[tokio::test]
async fn test_read_directory() {
    let ns = Namespace::new();

    ns.mkdir("/docs", 0o755).await.unwrap();

    let mut buf = [0u8; 8];
    let result = ns.read("/docs", &mut buf, 0).await;
    assert!(matches!(result, Err(FsError::IsADirectory)));

    let result = ns.write("/docs", b"data", 0).await;
    assert!(matches!(result, Err(FsError::IsADirectory)));
}

#[tokio::test]
async fn test_read_write_not_found() {
    let ns = Namespace::new();

    let mut buf = [0u8; 8];
    let result = ns.read("/nonexistent", &mut buf, 0).await;
    assert!(matches!(result, Err(FsError::NotFound)));

    let result = ns.write("/nonexistent", b"data", 0).await;
    assert!(matches!(result, Err(FsError::NotFound)));
}

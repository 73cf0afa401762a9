//! Integration tests for the host-filesystem backend

use ::common::{Backend, FsError, LocalBackend};
use tempfile::TempDir;

fn setup() -> (LocalBackend, TempDir) {
    let temp = TempDir::new().unwrap();
    (LocalBackend::new(temp.path()), temp)
}

#[tokio::test]
async fn test_stat() {
    let (backend, temp) = setup();
    std::fs::write(temp.path().join("f.txt"), b"hello").unwrap();

    let attr = backend.stat("/f.txt").await.unwrap();
    assert!(!attr.is_dir());
    assert_eq!(attr.size, 5);

    let attr = backend.stat("/").await.unwrap();
    assert!(attr.is_dir());
}

#[tokio::test]
async fn test_stat_missing() {
    let (backend, _temp) = setup();

    let result = backend.stat("/nonexistent").await;
    assert!(matches!(result, Err(FsError::NotFound)));
}

#[tokio::test]
async fn test_write_creates_file() {
    let (backend, temp) = setup();

    let n = backend.write("/new.txt", b"data", 0).await.unwrap();
    assert_eq!(n, 4);
    assert_eq!(std::fs::read(temp.path().join("new.txt")).unwrap(), b"data");
}

#[tokio::test]
async fn test_write_at_offset() {
    let (backend, temp) = setup();
    std::fs::write(temp.path().join("f.txt"), b"hello world").unwrap();

    backend.write("/f.txt", b"HELLO", 6).await.unwrap();
    assert_eq!(
        std::fs::read(temp.path().join("f.txt")).unwrap(),
        b"hello HELLO"
    );
}

#[tokio::test]
async fn test_read() {
    let (backend, temp) = setup();
    std::fs::write(temp.path().join("f.txt"), b"hello world").unwrap();

    let mut buf = [0u8; 5];
    let n = backend.read("/f.txt", &mut buf, 6).await.unwrap();
    assert_eq!(n, 5);
    assert_eq!(&buf, b"world");

    // A buffer larger than the remainder comes back partially filled
    let mut buf = [0u8; 64];
    let n = backend.read("/f.txt", &mut buf, 6).await.unwrap();
    assert_eq!(n, 5);
    assert_eq!(&buf[..n], b"world");
}

#[tokio::test]
async fn test_read_missing() {
    let (backend, _temp) = setup();

    let mut buf = [0u8; 8];
    let result = backend.read("/nonexistent", &mut buf, 0).await;
    assert!(matches!(result, Err(FsError::NotFound)));
}

#[tokio::test]
async fn test_create_truncates_existing() {
    let (backend, temp) = setup();
    std::fs::write(temp.path().join("f.txt"), b"hello").unwrap();

    backend.create("/f.txt", 0o644).await.unwrap();
    assert_eq!(std::fs::metadata(temp.path().join("f.txt")).unwrap().len(), 0);
}

#[tokio::test]
async fn test_mkdir() {
    let (backend, temp) = setup();

    backend.mkdir("/sub", 0o755).await.unwrap();
    assert!(temp.path().join("sub").is_dir());

    let result = backend.mkdir("/sub", 0o755).await;
    assert!(matches!(result, Err(FsError::AlreadyExists)));
}

#[tokio::test]
async fn test_list() {
    let (backend, temp) = setup();
    std::fs::write(temp.path().join("a.txt"), b"aa").unwrap();
    std::fs::create_dir(temp.path().join("sub")).unwrap();

    let mut entries = backend.list("/").await.unwrap();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "a.txt");
    assert!(!entries[0].attr.unwrap().is_dir());
    assert_eq!(entries[0].attr.unwrap().size, 2);
    assert_eq!(entries[1].name, "sub");
    assert!(entries[1].attr.unwrap().is_dir());
}

#[tokio::test]
async fn test_list_not_a_directory() {
    let (backend, temp) = setup();
    std::fs::write(temp.path().join("f.txt"), b"data").unwrap();

    let result = backend.list("/f.txt").await;
    assert!(matches!(result, Err(FsError::NotADirectory)));
}

#[tokio::test]
async fn test_unlink() {
    let (backend, temp) = setup();
    std::fs::write(temp.path().join("f.txt"), b"data").unwrap();

    backend.unlink("/f.txt").await.unwrap();
    assert!(!temp.path().join("f.txt").exists());

    std::fs::create_dir(temp.path().join("sub")).unwrap();
    let result = backend.unlink("/sub").await;
    assert!(matches!(result, Err(FsError::IsADirectory)));
}

#[tokio::test]
async fn test_rmdir() {
    let (backend, temp) = setup();
    std::fs::create_dir(temp.path().join("sub")).unwrap();

    backend.rmdir("/sub").await.unwrap();
    assert!(!temp.path().join("sub").exists());
}

#[tokio::test]
async fn test_rmdir_not_empty() {
    let (backend, temp) = setup();
    std::fs::create_dir(temp.path().join("sub")).unwrap();
    std::fs::write(temp.path().join("sub/f.txt"), b"data").unwrap();

    let result = backend.rmdir("/sub").await;
    assert!(matches!(result, Err(FsError::DirectoryNotEmpty)));
}

#[tokio::test]
async fn test_rename() {
    let (backend, temp) = setup();
    std::fs::write(temp.path().join("a.txt"), b"data").unwrap();

    backend.rename("/a.txt", "/b.txt").await.unwrap();
    assert!(!temp.path().join("a.txt").exists());
    assert_eq!(std::fs::read(temp.path().join("b.txt")).unwrap(), b"data");
}

#[tokio::test]
async fn test_truncate() {
    let (backend, temp) = setup();
    std::fs::write(temp.path().join("f.txt"), b"hello world").unwrap();

    backend.truncate("/f.txt", 5).await.unwrap();
    assert_eq!(std::fs::read(temp.path().join("f.txt")).unwrap(), b"hello");
}

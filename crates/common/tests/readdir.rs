//! Integration tests for namespace readdir operations

mod common;

use ::common::{FsError, Namespace};

#[tokio::test]
async fn test_readdir_empty_root() {
    let ns = Namespace::new();

    // Only the synthetic dot entries, in order, without attributes
    let entries = ns.readdir("/").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, ".");
    assert_eq!(entries[1].name, "..");
    assert!(entries[0].attr.is_none());
    assert!(entries[1].attr.is_none());
}

#[tokio::test]
async fn test_readdir_children_sorted() {
    let ns = Namespace::new();

    ns.mkdir("/bravo", 0o755).await.unwrap();
    ns.mkdir("/alpha", 0o755).await.unwrap();
    ns.create("/charlie.txt", 0o644).await.unwrap();

    let entries = ns.readdir("/").await.unwrap();
    assert_eq!(
        common::names(&entries),
        vec![
            "alpha".to_string(),
            "bravo".to_string(),
            "charlie.txt".to_string()
        ]
    );
}

#[tokio::test]
async fn test_readdir_immediate_children_only() {
    let ns = Namespace::new();

    ns.mkdir("/a", 0o755).await.unwrap();
    ns.mkdir("/a/b", 0o755).await.unwrap();
    ns.create("/a/b/deep.txt", 0o644).await.unwrap();

    // Grandchildren never leak into a listing
    let entries = ns.readdir("/").await.unwrap();
    assert_eq!(common::names(&entries), vec!["a".to_string()]);

    let entries = ns.readdir("/a").await.unwrap();
    assert_eq!(common::names(&entries), vec!["b".to_string()]);
}

#[tokio::test]
async fn test_readdir_carries_attributes() {
    let ns = Namespace::new();

    ns.mkdir("/docs", 0o755).await.unwrap();
    ns.create("/file.txt", 0o644).await.unwrap();

    let entries = ns.readdir("/").await.unwrap();
    for ent in &entries[2..] {
        let attr = ent.attr.unwrap();
        match ent.name.as_str() {
            "docs" => assert!(attr.is_dir()),
            "file.txt" => assert!(!attr.is_dir()),
            other => panic!("unexpected entry {}", other),
        }
    }
}

#[tokio::test]
async fn test_readdir_on_file() {
    let ns = Namespace::new();

    ns.create("/file.txt", 0o644).await.unwrap();

    let result = ns.readdir("/file.txt").await;
    assert!(matches!(result, Err(FsError::NotADirectory)));
}

#[tokio::test]
async fn test_readdir_not_found() {
    let ns = Namespace::new();

    let result = ns.readdir("/nonexistent").await;
    assert!(matches!(result, Err(FsError::NotFound)));
}

#[tokio::test]
async fn test_readdir_bound_directory() {
    let (ns, temp) = common::linked_env().await;
    std::fs::write(temp.path().join("a.txt"), b"aa").unwrap();
    std::fs::write(temp.path().join("b.txt"), b"bb").unwrap();
    std::fs::create_dir(temp.path().join("sub")).unwrap();

    let entries = ns.readdir("/ext").await.unwrap();
    let mut listed = common::names(&entries);
    listed.sort();
    assert_eq!(
        listed,
        vec!["a.txt".to_string(), "b.txt".to_string(), "sub".to_string()]
    );
}

#[tokio::test]
async fn test_readdir_delegated_subdirectory() {
    let (ns, temp) = common::linked_env().await;
    std::fs::create_dir(temp.path().join("sub")).unwrap();
    std::fs::write(temp.path().join("sub/x.txt"), b"x").unwrap();

    // No table entry exists below the binding point; the resolver finds it
    let entries = ns.readdir("/ext/sub").await.unwrap();
    assert_eq!(common::names(&entries), vec!["x.txt".to_string()]);
}

#[tokio::test]
async fn test_readdir_filters_junk_entries() {
    let (ns, temp) = common::linked_env().await;
    std::fs::write(temp.path().join("desktop.ini"), b"junk").unwrap();
    std::fs::write(temp.path().join("thumbs.db"), b"junk").unwrap();
    std::fs::write(temp.path().join("real.txt"), b"data").unwrap();

    let entries = ns.readdir("/ext").await.unwrap();
    assert_eq!(common::names(&entries), vec!["real.txt".to_string()]);
}

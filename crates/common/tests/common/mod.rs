//! Shared test utilities for namespace integration tests
#![allow(dead_code)]

use common::{DirEntry, Namespace};
use tempfile::TempDir;

/// Set up a namespace with a host-backed directory bound at `/ext`.
pub async fn linked_env() -> (Namespace, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let ns = Namespace::new();
    ns.link_local("/ext", temp_dir.path()).await.unwrap();
    (ns, temp_dir)
}

/// Read a whole file through the namespace.
pub async fn cat(ns: &Namespace, path: &str) -> Vec<u8> {
    let attr = ns.getattr(path).await.unwrap();
    let mut buf = vec![0u8; attr.size as usize];
    let n = ns.read(path, &mut buf, 0).await.unwrap();
    buf.truncate(n);
    buf
}

/// Entry names from a listing, without the synthetic dot entries.
pub fn names(entries: &[DirEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.name.clone())
        .filter(|n| n != "." && n != "..")
        .collect()
}

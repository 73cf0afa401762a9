use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::attrs::{DirEntry, FileAttr, StatVfs, TimeSpec, ID_UNCHANGED, S_IFMT};
use super::backend::{Backend, LocalBackend};
use super::error::{FsError, FsResult};
use super::node::Node;
use super::path::{child_prefix, is_descendant, parent_of, split};

// Host noise files a backend may contain that the namespace never surfaces
fn is_junk_entry(name: &str) -> bool {
    matches!(name, "desktop.ini" | "thumbs.db")
}

struct NamespaceInner {
    // full absolute path -> node, the flat representation of the tree
    nodes: BTreeMap<String, Node>,
}

impl NamespaceInner {
    fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::dir(0o755));
        NamespaceInner { nodes }
    }

    /// Nearest bound ancestor of `path`, with `path` rewritten relative to
    /// the binding point. An empty suffix maps to the backend root `"/"`.
    /// `None` when no ancestor up to and including the root is bound.
    fn resolve(&self, path: &str) -> Option<(Arc<dyn Backend>, String)> {
        let mut current = path;
        loop {
            if let Some(node) = self.nodes.get(current) {
                if let Some(binding) = &node.binding {
                    let rel = path.strip_prefix(current).unwrap_or(path);
                    let rel = if rel.is_empty() { "/" } else { rel };
                    return Some((binding.backend.clone(), rel.to_string()));
                }
            }
            if current == "/" {
                return None;
            }
            current = parent_of(current);
        }
    }
}

/// The namespace engine: one filesystem tree over two storage domains.
///
/// Cheap to clone; all clones share the same node table. Every operation
/// takes the table lock for its full duration, delegated backend I/O
/// included, so each call is atomic against all others.
#[derive(Clone)]
pub struct Namespace(Arc<Mutex<NamespaceInner>>);

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// Namespace holding only the root directory.
    pub fn new() -> Self {
        Namespace(Arc::new(Mutex::new(NamespaceInner::new())))
    }

    /// Bind `path` to a storage backend.
    ///
    /// The new node becomes the root of a delegated subtree: everything
    /// below it resolves through `backend` from now on. Fails if `path`
    /// already exists, or its parent is missing or not a directory.
    pub async fn link(&self, path: &str, backend: Arc<dyn Backend>) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        if inner.nodes.contains_key(path) {
            return Err(FsError::AlreadyExists);
        }

        let parent = parent_of(path);
        match inner.nodes.get(parent) {
            None => return Err(FsError::NotFound),
            Some(parent_node) if !parent_node.is_dir() => return Err(FsError::NotADirectory),
            Some(_) => {}
        }

        tracing::debug!("link: binding {} into the namespace", path);
        inner
            .nodes
            .insert(path.to_string(), Node::bound_dir(backend, "/"));
        if let Some(parent_node) = inner.nodes.get_mut(parent) {
            parent_node.attr.nlink += 1;
        }
        Ok(())
    }

    /// Bind `path` to a directory on the host filesystem.
    pub async fn link_local(&self, path: &str, root: impl Into<PathBuf>) -> FsResult<()> {
        let root = root.into();
        tracing::debug!("link_local: {} -> {}", path, root.display());
        self.link(path, Arc::new(LocalBackend::new(root))).await
    }

    pub async fn getattr(&self, path: &str) -> FsResult<FileAttr> {
        let inner = self.0.lock().await;

        match inner.nodes.get(path) {
            Some(node) => match &node.binding {
                // Bound nodes answer with live backend metadata
                Some(binding) => binding.backend.stat(&binding.rel_path).await,
                None => Ok(node.attr),
            },
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                backend.stat(&rel).await
            }
        }
    }

    pub async fn mkdir(&self, path: &str, mode: u32) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        if inner.nodes.contains_key(path) {
            return Err(FsError::AlreadyExists);
        }

        let (_, base) = split(path);
        let parent = parent_of(path);
        match inner.nodes.get(parent) {
            None => {
                // Parent has no entry of its own; the target may still fall
                // under a bound ancestor
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                return backend.mkdir(&rel, mode).await;
            }
            Some(parent_node) => {
                if !parent_node.is_dir() {
                    return Err(FsError::NotADirectory);
                }
                if let Some(binding) = &parent_node.binding {
                    // Parent is the binding point itself
                    let rel = format!("/{}", base);
                    return binding.backend.mkdir(&rel, mode).await;
                }
            }
        }

        inner.nodes.insert(path.to_string(), Node::dir(mode));
        if let Some(parent_node) = inner.nodes.get_mut(parent) {
            parent_node.attr.nlink += 1;
        }
        Ok(())
    }

    pub async fn rmdir(&self, path: &str) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        // The root entry is never removed
        if path == "/" {
            return Err(FsError::NotFound);
        }

        match inner.nodes.get(path) {
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                return backend.rmdir(&rel).await;
            }
            Some(node) => {
                if !node.is_dir() {
                    return Err(FsError::NotADirectory);
                }
                if let Some(binding) = &node.binding {
                    // Remove on the backend first, then drop the binding node
                    let backend = binding.backend.clone();
                    let rel = binding.rel_path.clone();
                    backend.rmdir(&rel).await?;
                } else {
                    // Emptiness means no table entry strictly below this one
                    let prefix = child_prefix(path);
                    if inner
                        .nodes
                        .keys()
                        .any(|p| p.as_str() != path && p.starts_with(&prefix))
                    {
                        return Err(FsError::DirectoryNotEmpty);
                    }
                }
            }
        }

        inner.nodes.remove(path);
        if let Some(parent_node) = inner.nodes.get_mut(parent_of(path)) {
            parent_node.attr.nlink -= 1;
        }
        Ok(())
    }

    /// Create an empty regular file.
    pub async fn create(&self, path: &str, mode: u32) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        if inner.nodes.contains_key(path) {
            return Err(FsError::AlreadyExists);
        }

        let (_, base) = split(path);
        let parent = parent_of(path);
        match inner.nodes.get(parent) {
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                return backend.create(&rel, mode).await;
            }
            Some(parent_node) => {
                if let Some(binding) = &parent_node.binding {
                    let rel = format!("/{}", base);
                    return binding.backend.create(&rel, mode).await;
                }
            }
        }

        inner.nodes.insert(path.to_string(), Node::file(mode));
        Ok(())
    }

    pub async fn unlink(&self, path: &str) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        match inner.nodes.get(path) {
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                return backend.unlink(&rel).await;
            }
            Some(node) => {
                if node.is_dir() {
                    return Err(FsError::IsADirectory);
                }
                if let Some(binding) = &node.binding {
                    let backend = binding.backend.clone();
                    let rel = binding.rel_path.clone();
                    backend.unlink(&rel).await?;
                }
            }
        }

        inner.nodes.remove(path);
        Ok(())
    }

    /// Move `old_path` to `new_path`.
    ///
    /// An existing destination entry is replaced. Moving an in-memory
    /// directory re-keys its whole subtree in the same operation. When the
    /// source only resolves through a binding, source and destination must
    /// resolve to the same backend; a rename is never split across two.
    pub async fn rename(&self, old_path: &str, new_path: &str) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        let is_dir = match inner.nodes.get(old_path) {
            Some(node) => node.is_dir(),
            None => {
                let (backend, old_rel) = inner.resolve(old_path).ok_or(FsError::NotFound)?;
                return match inner.resolve(new_path) {
                    Some((new_backend, new_rel)) if Arc::ptr_eq(&backend, &new_backend) => {
                        backend.rename(&old_rel, &new_rel).await
                    }
                    _ => Err(FsError::Io(io::Error::other(
                        "rename crosses backend boundaries",
                    ))),
                };
            }
        };

        // Destination parent must already be part of the table
        if !inner.nodes.contains_key(parent_of(new_path)) {
            return Err(FsError::NotFound);
        }

        // A directory cannot be moved underneath itself
        if is_descendant(new_path, old_path) {
            return Err(FsError::InvalidArgument);
        }

        if let Some(node) = inner.nodes.remove(old_path) {
            inner.nodes.insert(new_path.to_string(), node);
        }

        if is_dir {
            // Re-key every table entry under the old prefix
            let old_prefix = child_prefix(old_path);
            let new_prefix = child_prefix(new_path);
            let moved: Vec<String> = inner
                .nodes
                .keys()
                .filter(|p| p.starts_with(&old_prefix))
                .cloned()
                .collect();
            for p in moved {
                if let Some(child) = inner.nodes.remove(&p) {
                    let rewritten = format!("{}{}", new_prefix, &p[old_prefix.len()..]);
                    inner.nodes.insert(rewritten, child);
                }
            }
        }

        Ok(())
    }

    /// Open a regular file. The returned handle is always zero; no
    /// per-handle state exists below the transport layer.
    pub async fn open(&self, path: &str) -> FsResult<u64> {
        let inner = self.0.lock().await;

        match inner.nodes.get(path) {
            Some(node) => {
                if node.is_dir() {
                    return Err(FsError::IsADirectory);
                }
                Ok(0)
            }
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                let attr = backend.stat(&rel).await?;
                if attr.is_dir() {
                    return Err(FsError::IsADirectory);
                }
                Ok(0)
            }
        }
    }

    pub async fn read(&self, path: &str, buf: &mut [u8], offset: u64) -> FsResult<usize> {
        let inner = self.0.lock().await;

        match inner.nodes.get(path) {
            Some(node) => {
                if node.is_dir() {
                    return Err(FsError::IsADirectory);
                }
                if let Some(binding) = &node.binding {
                    return binding.backend.read(&binding.rel_path, buf, offset).await;
                }
                // Sparse read: at or past the end yields zero bytes
                let size = node.content.len() as u64;
                if offset >= size {
                    return Ok(0);
                }
                let start = offset as usize;
                let end = (offset + buf.len() as u64).min(size) as usize;
                let n = end - start;
                buf[..n].copy_from_slice(&node.content[start..end]);
                Ok(n)
            }
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                backend.read(&rel, buf, offset).await
            }
        }
    }

    pub async fn write(&self, path: &str, data: &[u8], offset: u64) -> FsResult<usize> {
        let mut inner = self.0.lock().await;

        match inner.nodes.get_mut(path) {
            Some(node) => {
                if node.is_dir() {
                    return Err(FsError::IsADirectory);
                }
                if let Some(binding) = &node.binding {
                    return binding.backend.write(&binding.rel_path, data, offset).await;
                }
                // Writing past the end zero-extends the buffer
                let end = offset as usize + data.len();
                if end > node.content.len() {
                    node.content.resize(end, 0);
                }
                node.content[offset as usize..end].copy_from_slice(data);
                node.attr.size = node.content.len() as u64;
                node.attr.mtime = TimeSpec::now();
                Ok(data.len())
            }
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                backend.write(&rel, data, offset).await
            }
        }
    }

    pub async fn truncate(&self, path: &str, size: u64) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        match inner.nodes.get_mut(path) {
            Some(node) => {
                if node.is_dir() {
                    return Err(FsError::IsADirectory);
                }
                if let Some(binding) = &node.binding {
                    return binding.backend.truncate(&binding.rel_path, size).await;
                }
                node.content.resize(size as usize, 0);
                node.attr.size = size;
                node.attr.mtime = TimeSpec::now();
                Ok(())
            }
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                backend.truncate(&rel, size).await
            }
        }
    }

    /// List a directory. The synthetic `.` and `..` entries always come
    /// first and carry no attributes.
    pub async fn readdir(&self, path: &str) -> FsResult<Vec<DirEntry>> {
        let inner = self.0.lock().await;

        let mut entries = vec![
            DirEntry {
                name: ".".to_string(),
                attr: None,
            },
            DirEntry {
                name: "..".to_string(),
                attr: None,
            },
        ];

        match inner.nodes.get(path) {
            Some(node) => {
                if let Some(binding) = &node.binding {
                    // The bound directory itself: its backend owns the listing
                    for ent in binding.backend.list(&binding.rel_path).await? {
                        if !is_junk_entry(&ent.name) {
                            entries.push(ent);
                        }
                    }
                } else {
                    if !node.is_dir() {
                        return Err(FsError::NotADirectory);
                    }
                    let prefix = child_prefix(path);
                    for (p, child) in inner.nodes.iter() {
                        if p.as_str() == path || !p.starts_with(&prefix) {
                            continue;
                        }
                        let name = &p[prefix.len()..];
                        // Immediate children only
                        if !name.contains('/') {
                            entries.push(DirEntry::new(name, child.attr));
                        }
                    }
                }
            }
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                for ent in backend.list(&rel).await? {
                    if !is_junk_entry(&ent.name) {
                        entries.push(ent);
                    }
                }
            }
        }

        Ok(entries)
    }

    /// Open a directory. The returned handle is always zero.
    pub async fn opendir(&self, path: &str) -> FsResult<u64> {
        let inner = self.0.lock().await;

        match inner.nodes.get(path) {
            Some(node) => {
                if !node.is_dir() {
                    return Err(FsError::NotADirectory);
                }
                Ok(0)
            }
            None => {
                let (backend, rel) = inner.resolve(path).ok_or(FsError::NotFound)?;
                let attr = backend.stat(&rel).await?;
                if !attr.is_dir() {
                    return Err(FsError::NotADirectory);
                }
                Ok(0)
            }
        }
    }

    /// Set access and modification times; `None` means now for both.
    pub async fn utimens(&self, path: &str, times: Option<[TimeSpec; 2]>) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        let node = inner.nodes.get_mut(path).ok_or(FsError::NotFound)?;
        match times {
            Some([atime, mtime]) => {
                node.attr.atime = atime;
                node.attr.mtime = mtime;
            }
            None => {
                let now = TimeSpec::now();
                node.attr.atime = now;
                node.attr.mtime = now;
            }
        }
        Ok(())
    }

    /// Replace permission bits, keeping the file-type bits.
    pub async fn chmod(&self, path: &str, mode: u32) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        let node = inner.nodes.get_mut(path).ok_or(FsError::NotFound)?;
        node.attr.mode = (node.attr.mode & S_IFMT) | mode;
        node.attr.ctime = TimeSpec::now();
        Ok(())
    }

    /// Change ownership; [`ID_UNCHANGED`] leaves the respective id alone.
    pub async fn chown(&self, path: &str, uid: u32, gid: u32) -> FsResult<()> {
        let mut inner = self.0.lock().await;

        let node = inner.nodes.get_mut(path).ok_or(FsError::NotFound)?;
        if uid != ID_UNCHANGED {
            node.attr.uid = uid;
        }
        if gid != ID_UNCHANGED {
            node.attr.gid = gid;
        }
        node.attr.ctime = TimeSpec::now();
        Ok(())
    }

    /// Fixed capacity figures, independent of the path.
    pub async fn statfs(&self, _path: &str) -> FsResult<StatVfs> {
        Ok(StatVfs::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_backend() -> Arc<dyn Backend> {
        Arc::new(LocalBackend::new("/nonexistent"))
    }

    #[test]
    fn test_junk_entries() {
        assert!(is_junk_entry("desktop.ini"));
        assert!(is_junk_entry("thumbs.db"));
        assert!(!is_junk_entry("notes.txt"));
    }

    #[test]
    fn test_resolve_rewrites_relative_to_binding_point() {
        let mut inner = NamespaceInner::new();
        inner
            .nodes
            .insert("/ext".to_string(), Node::bound_dir(test_backend(), "/"));

        let (_, rel) = inner.resolve("/ext/a/b.txt").unwrap();
        assert_eq!(rel, "/a/b.txt");

        // The binding point itself maps to the backend root
        let (_, rel) = inner.resolve("/ext").unwrap();
        assert_eq!(rel, "/");
    }

    #[test]
    fn test_resolve_nearest_binding_wins() {
        let mut inner = NamespaceInner::new();
        let outer = test_backend();
        let nested = test_backend();
        inner
            .nodes
            .insert("/ext".to_string(), Node::bound_dir(outer.clone(), "/"));
        inner
            .nodes
            .insert("/ext/sub".to_string(), Node::bound_dir(nested.clone(), "/"));

        let (backend, rel) = inner.resolve("/ext/sub/a.txt").unwrap();
        assert!(Arc::ptr_eq(&backend, &nested));
        assert_eq!(rel, "/a.txt");

        let (backend, rel) = inner.resolve("/ext/other/a.txt").unwrap();
        assert!(Arc::ptr_eq(&backend, &outer));
        assert_eq!(rel, "/other/a.txt");
    }

    #[test]
    fn test_resolve_unbound_paths() {
        let mut inner = NamespaceInner::new();
        inner.nodes.insert("/dir".to_string(), Node::dir(0o755));

        assert!(inner.resolve("/dir/file").is_none());
        assert!(inner.resolve("/missing").is_none());
        assert!(inner.resolve("/").is_none());
    }
}

use std::sync::Arc;

use super::attrs::FileAttr;
use super::backend::Backend;

/**
 * Nodes
 * =====
 * One node per namespace path, held in a flat path-keyed table rather
 * than a linked parent/child graph. A node is one of:
 *  - an in-memory directory or file (bytes live in `content`)
 *  - a bound directory: `binding` delegates the node and everything
 *    underneath it to a backend
 * Paths below a binding never get table entries of their own; they are
 * resolved against the backend on every call.
 */

/// Delegation of a node and its whole subtree to a backend.
#[derive(Debug, Clone)]
pub struct Binding {
    pub backend: Arc<dyn Backend>,
    // path of this node inside the backend, "/" for the binding point
    pub rel_path: String,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub attr: FileAttr,
    pub content: Vec<u8>,
    pub binding: Option<Binding>,
}

impl Node {
    /// In-memory directory with the given permission bits.
    pub fn dir(perm: u32) -> Self {
        Node {
            attr: FileAttr::dir(perm),
            content: Vec::new(),
            binding: None,
        }
    }

    /// Empty in-memory regular file with the given permission bits.
    pub fn file(perm: u32) -> Self {
        Node {
            attr: FileAttr::file(perm),
            content: Vec::new(),
            binding: None,
        }
    }

    /// Directory node delegated to `backend`.
    pub fn bound_dir(backend: Arc<dyn Backend>, rel_path: impl Into<String>) -> Self {
        Node {
            attr: FileAttr::dir(0o755),
            content: Vec::new(),
            binding: Some(Binding {
                backend,
                rel_path: rel_path.into(),
            }),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.attr.is_dir()
    }
}

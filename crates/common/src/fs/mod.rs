//! Namespace engine and backend delegation
//!
//! This module defines the core types for the graftfs namespace: a single
//! writable filesystem tree where every path is backed either by process
//! memory or by a real filesystem grafted in at an interior node:
//!
//! - **[`Namespace`]**: the operation surface (mkdir, create, read, write,
//!   rename, ...) over a flat path-keyed node table
//! - **[`Backend`]**: the capability contract a storage provider implements
//! - **[`LocalBackend`]**: the reference provider, rooted at a host directory
//! - **[`FileAttr`] / [`DirEntry`] / [`StatVfs`]**: POSIX-shaped metadata
//!
//! # Architecture
//!
//! ## One tree, two storage domains
//!
//! The namespace is a map from absolute path to node. A node either holds
//! its bytes inline, or carries a binding that delegates it and its whole
//! subtree to a backend:
//! ```text
//! "/"            in-memory dir
//! "/notes"       in-memory dir
//! "/notes/a.txt" in-memory file (bytes live in the table)
//! "/ext"         bound dir ----> LocalBackend at /home/me/shared
//!            ("/ext/b.txt" has no table entry; reads and writes
//!             resolve to /home/me/shared/b.txt live)
//! ```
//!
//! Paths under a binding are never materialized in the table. Every
//! operation first consults the table, then walks ancestors to find the
//! nearest binding, and translates the path to be relative to it.
//!
//! ## Consistency
//!
//! All operations run under one exclusive lock spanning lookup through
//! mutation, including delegated backend I/O. One slow backend call stalls
//! the whole namespace.

mod attrs;
mod backend;
mod error;
mod namespace;
mod node;
mod path;

pub use attrs::{DirEntry, FileAttr, StatVfs, TimeSpec, ID_UNCHANGED, S_IFDIR, S_IFMT, S_IFREG};
pub use backend::{Backend, LocalBackend};
pub use error::{FsError, FsResult};
pub use namespace::Namespace;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use common::{FsError, Namespace};

use crate::service_config::Config;

/// Main service state - the namespace plus the client handle table
#[derive(Clone)]
pub struct State {
    namespace: Namespace,
    handles: Arc<HandleTable>,
}

/// Handle identifiers surfaced over HTTP.
///
/// The engine itself never hands out stateful handles (its own are always
/// zero), so opendir/create responses draw from this table instead. Handles
/// are never reclaimed; callers that need the path back look it up here.
struct HandleTable {
    next: AtomicU64,
    paths: Mutex<HashMap<u64, String>>,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        let state = Self::new();

        // Graft configured backends before the server starts accepting
        // requests. The engine expects clean absolute paths, so config
        // entries are checked here.
        for entry in &config.links {
            if !entry.path.starts_with('/') {
                return Err(StateSetupError::Link {
                    path: entry.path.clone(),
                    source: FsError::InvalidArgument,
                });
            }
            state
                .namespace
                .link_local(&entry.path, &entry.target)
                .await
                .map_err(|source| StateSetupError::Link {
                    path: entry.path.clone(),
                    source,
                })?;
            tracing::info!(
                path = %entry.path,
                target = %entry.target.display(),
                "linked backend"
            );
        }

        Ok(state)
    }

    pub fn new() -> Self {
        Self {
            namespace: Namespace::new(),
            handles: Arc::new(HandleTable {
                next: AtomicU64::new(1),
                paths: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Allocate a fresh handle for `path`. Handles start at 1; zero is
    /// reserved so it can never collide with the engine's internal handle.
    pub fn allocate_handle(&self, path: &str) -> u64 {
        let handle = self.handles.next.fetch_add(1, Ordering::Relaxed);
        self.handles.paths.lock().insert(handle, path.to_string());
        handle
    }

    /// Path a previously allocated handle refers to.
    pub fn handle_path(&self, handle: u64) -> Option<String> {
        self.handles.paths.lock().get(&handle).cloned()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Namespace> for State {
    fn as_ref(&self) -> &Namespace {
        &self.namespace
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("failed to link {path}: {source}")]
    Link { path: String, source: FsError },
}

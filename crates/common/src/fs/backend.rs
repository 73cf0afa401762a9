use std::fmt::Debug;
use std::io::SeekFrom;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::{DirBuilder, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

use super::attrs::{DirEntry, FileAttr, TimeSpec};
use super::error::FsResult;

/// Capability contract any storage provider implements.
///
/// Paths are relative to the binding point; `"/"` names the provider's own
/// root. Implementations translate host errors into the engine's taxonomy
/// by error kind.
#[async_trait]
pub trait Backend: Debug + Send + Sync {
    /// Live metadata for a path.
    async fn stat(&self, path: &str) -> FsResult<FileAttr>;
    /// Directory listing with per-entry metadata.
    async fn list(&self, path: &str) -> FsResult<Vec<DirEntry>>;
    /// Read into `buf` at `offset`. A short count at end-of-data is not an
    /// error.
    async fn read(&self, path: &str, buf: &mut [u8], offset: u64) -> FsResult<usize>;
    /// Write `data` at `offset`, creating the file if absent and extending
    /// it when the offset lies past the end.
    async fn write(&self, path: &str, data: &[u8], offset: u64) -> FsResult<usize>;
    async fn truncate(&self, path: &str, size: u64) -> FsResult<()>;
    async fn create(&self, path: &str, mode: u32) -> FsResult<()>;
    async fn mkdir(&self, path: &str, mode: u32) -> FsResult<()>;
    async fn unlink(&self, path: &str) -> FsResult<()>;
    async fn rmdir(&self, path: &str) -> FsResult<()>;
    async fn rename(&self, old_path: &str, new_path: &str) -> FsResult<()>;
}

/// Backend rooted at a directory on the host filesystem.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalBackend { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Host-absolute path for a binding-relative one.
    fn abs(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

/// Synthesized attributes for a host file: real size and mtime, fixed
/// 0644/0755 permission bits, access and change times pinned to now.
fn attr_from_metadata(meta: &std::fs::Metadata) -> FileAttr {
    let mut attr = if meta.is_dir() {
        FileAttr::dir(0o755)
    } else {
        FileAttr::file(0o644)
    };
    attr.size = meta.len();
    if let Ok(mtime) = meta.modified() {
        attr.mtime = TimeSpec::from(mtime);
    }
    attr
}

#[async_trait]
impl Backend for LocalBackend {
    async fn stat(&self, path: &str) -> FsResult<FileAttr> {
        let meta = tokio::fs::symlink_metadata(self.abs(path)).await?;
        Ok(attr_from_metadata(&meta))
    }

    async fn list(&self, path: &str) -> FsResult<Vec<DirEntry>> {
        let mut dir = tokio::fs::read_dir(self.abs(path)).await?;
        let mut entries = Vec::new();
        while let Some(ent) = dir.next_entry().await? {
            // Entries that vanish between listing and stat are skipped
            let meta = match ent.metadata().await {
                Ok(meta) => meta,
                Err(_) => continue,
            };
            entries.push(DirEntry::new(
                ent.file_name().to_string_lossy().into_owned(),
                attr_from_metadata(&meta),
            ));
        }
        Ok(entries)
    }

    async fn read(&self, path: &str, buf: &mut [u8], offset: u64) -> FsResult<usize> {
        let mut file = File::open(self.abs(path)).await?;
        file.seek(SeekFrom::Start(offset)).await?;
        let mut filled = 0;
        while filled < buf.len() {
            let n = file.read(&mut buf[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }

    async fn write(&self, path: &str, data: &[u8], offset: u64) -> FsResult<usize> {
        let mut opts = OpenOptions::new();
        opts.write(true).create(true);
        #[cfg(unix)]
        opts.mode(0o644);
        let mut file = opts.open(self.abs(path)).await?;
        file.seek(SeekFrom::Start(offset)).await?;
        file.write_all(data).await?;
        file.flush().await?;
        Ok(data.len())
    }

    async fn truncate(&self, path: &str, size: u64) -> FsResult<()> {
        let file = OpenOptions::new().write(true).open(self.abs(path)).await?;
        file.set_len(size).await?;
        Ok(())
    }

    async fn create(&self, path: &str, mode: u32) -> FsResult<()> {
        let mut opts = OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        opts.mode(mode);
        #[cfg(not(unix))]
        let _ = mode;
        opts.open(self.abs(path)).await?;
        Ok(())
    }

    async fn mkdir(&self, path: &str, mode: u32) -> FsResult<()> {
        let mut builder = DirBuilder::new();
        #[cfg(unix)]
        builder.mode(mode);
        #[cfg(not(unix))]
        let _ = mode;
        builder.create(self.abs(path)).await?;
        Ok(())
    }

    async fn unlink(&self, path: &str) -> FsResult<()> {
        tokio::fs::remove_file(self.abs(path)).await?;
        Ok(())
    }

    async fn rmdir(&self, path: &str) -> FsResult<()> {
        tokio::fs::remove_dir(self.abs(path)).await?;
        Ok(())
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> FsResult<()> {
        tokio::fs::rename(self.abs(old_path), self.abs(new_path)).await?;
        Ok(())
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// File-type bit mask within a mode.
pub const S_IFMT: u32 = 0o170000;
/// Directory file type.
pub const S_IFDIR: u32 = 0o040000;
/// Regular-file file type.
pub const S_IFREG: u32 = 0o100000;

/// Sentinel uid/gid meaning "leave this field as it is".
pub const ID_UNCHANGED: u32 = u32::MAX;

/// A point in time as seconds plus nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSpec {
    pub sec: i64,
    pub nsec: i64,
}

impl TimeSpec {
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }
}

impl From<SystemTime> for TimeSpec {
    fn from(t: SystemTime) -> Self {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => TimeSpec {
                sec: d.as_secs() as i64,
                nsec: d.subsec_nanos() as i64,
            },
            Err(_) => TimeSpec::default(),
        }
    }
}

/// POSIX-shaped node metadata.
///
/// `size` is authoritative only for in-memory regular files; nodes bound to
/// a backend report live sizes from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttr {
    pub mode: u32,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub atime: TimeSpec,
    pub mtime: TimeSpec,
    pub ctime: TimeSpec,
}

impl FileAttr {
    /// Fresh directory attributes with the given permission bits.
    pub fn dir(perm: u32) -> Self {
        let now = TimeSpec::now();
        FileAttr {
            mode: S_IFDIR | perm,
            nlink: 2,
            uid: 0,
            gid: 0,
            size: 0,
            atime: now,
            mtime: now,
            ctime: now,
        }
    }

    /// Fresh regular-file attributes with the given permission bits.
    pub fn file(perm: u32) -> Self {
        let now = TimeSpec::now();
        FileAttr {
            mode: S_IFREG | perm,
            nlink: 1,
            uid: 0,
            gid: 0,
            size: 0,
            atime: now,
            mtime: now,
            ctime: now,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.mode & S_IFDIR != 0
    }

    /// Permission bits without the file-type bits.
    pub fn perm(&self) -> u32 {
        self.mode & !S_IFMT
    }
}

/// A single directory listing entry.
///
/// The synthetic `.` and `..` entries carry no attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub attr: Option<FileAttr>,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, attr: FileAttr) -> Self {
        DirEntry {
            name: name.into(),
            attr: Some(attr),
        }
    }
}

/// Filesystem capacity figures.
///
/// The namespace does not track real consumption; it advertises the fixed
/// figures below for any path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatVfs {
    pub bsize: u64,
    pub frsize: u64,
    pub blocks: u64,
    pub bfree: u64,
    pub bavail: u64,
    pub files: u64,
    pub ffree: u64,
    pub namemax: u64,
}

impl Default for StatVfs {
    fn default() -> Self {
        StatVfs {
            bsize: 4096,
            frsize: 4096,
            blocks: 1_000_000,
            bfree: 1_000_000,
            bavail: 1_000_000,
            files: 1_000_000,
            ffree: 1_000_000,
            namemax: 255,
        }
    }
}

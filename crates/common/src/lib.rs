/**
 * The namespace engine: a flat path-keyed node table
 *  backing a hierarchical filesystem view, with
 *  transparent delegation to grafted local-disk
 *  backends at arbitrary interior paths.
 */
pub mod fs;

pub use fs::{
    Backend, DirEntry, FileAttr, FsError, FsResult, LocalBackend, Namespace, StatVfs, TimeSpec,
};

pub mod prelude {
    pub use crate::fs::{
        Backend, DirEntry, FileAttr, FsError, FsResult, LocalBackend, Namespace, StatVfs, TimeSpec,
    };
}

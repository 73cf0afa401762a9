use std::io;

pub type FsResult<T> = Result<T, FsError>;

/// Error taxonomy shared by every namespace operation and backend.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("not a directory")]
    NotADirectory,
    #[error("is a directory")]
    IsADirectory,
    #[error("directory not empty")]
    DirectoryNotEmpty,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("i/o failure: {0}")]
    Io(io::Error),
}

impl FsError {
    /// Signed errno-style code, zero reserved for success.
    ///
    /// Host permission failures keep their own code; every other I/O
    /// failure reports as EIO.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NotFound => -2,
            FsError::Io(err) if err.kind() == io::ErrorKind::PermissionDenied => -13,
            FsError::Io(_) => -5,
            FsError::AlreadyExists => -17,
            FsError::NotADirectory => -20,
            FsError::IsADirectory => -21,
            FsError::InvalidArgument => -22,
            FsError::DirectoryNotEmpty => -39,
        }
    }

    /// Reverse of [`errno`](Self::errno), for callers that receive raw codes.
    pub fn from_errno(code: i32) -> Self {
        match code {
            -2 => FsError::NotFound,
            -13 => FsError::Io(io::Error::from(io::ErrorKind::PermissionDenied)),
            -17 => FsError::AlreadyExists,
            -20 => FsError::NotADirectory,
            -21 => FsError::IsADirectory,
            -22 => FsError::InvalidArgument,
            -39 => FsError::DirectoryNotEmpty,
            other => FsError::Io(io::Error::other(format!("errno {}", other))),
        }
    }
}

// Host filesystem errors fold into the taxonomy by kind; anything without
// a counterpart is carried through as an I/O failure.
impl From<io::Error> for FsError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound,
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists,
            io::ErrorKind::NotADirectory => FsError::NotADirectory,
            io::ErrorKind::IsADirectory => FsError::IsADirectory,
            io::ErrorKind::DirectoryNotEmpty => FsError::DirectoryNotEmpty,
            _ => FsError::Io(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_errno_round_trip() {
        for err in [
            FsError::NotFound,
            FsError::AlreadyExists,
            FsError::NotADirectory,
            FsError::IsADirectory,
            FsError::DirectoryNotEmpty,
            FsError::InvalidArgument,
        ] {
            let code = err.errno();
            assert!(code < 0);
            assert_eq!(FsError::from_errno(code).errno(), code);
        }
        assert_eq!(
            FsError::Io(io::Error::other("backend down")).errno(),
            -5
        );
        let denied = FsError::Io(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.errno(), -13);
        assert_eq!(FsError::from_errno(-13).errno(), -13);
    }

    #[test]
    fn test_io_error_kinds_fold_into_taxonomy() {
        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert!(matches!(FsError::from(missing), FsError::NotFound));

        let exists = io::Error::from(io::ErrorKind::AlreadyExists);
        assert!(matches!(FsError::from(exists), FsError::AlreadyExists));

        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert!(matches!(FsError::from(refused), FsError::Io(_)));
    }
}

use crate::handle::Handle;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the arena, the size index, and the filesystem
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Out of range, root misuse, wrong node kind, or unresolved parent
    #[error("Invalid handle: {0}")]
    InvalidHandle(Handle),

    #[error("Node is recycled: {0}")]
    RecycledNode(Handle),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("File already exists: {0}")]
    FileExists(String),

    #[error("Directory already exists: {0}")]
    DirectoryExists(String),

    #[error("Link already exists: {0}")]
    LinkExists(String),

    #[error("Name already exists: {0}")]
    NameExists(String),

    #[error("File of size {requested} exceeds available size {available}")]
    ExceedsSize { requested: u64, available: u64 },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Heap is empty")]
    HeapEmpty,

    /// Size index has no entry for the handle
    #[error("Handle not found in size index: {0}")]
    NotFound(Handle),

    #[error("Cycle detected at {0}")]
    CycleDetected(Handle),
}

impl Error {
    pub fn invalid_handle(handle: Handle) -> Self {
        Error::InvalidHandle(handle)
    }

    pub fn recycled_node(handle: Handle) -> Self {
        Error::RecycledNode(handle)
    }

    pub fn invalid_name<S: AsRef<str>>(name: S) -> Self {
        Error::InvalidName(name.as_ref().to_string())
    }

    pub fn file_exists<S: AsRef<str>>(name: S) -> Self {
        Error::FileExists(name.as_ref().to_string())
    }

    pub fn directory_exists<S: AsRef<str>>(name: S) -> Self {
        Error::DirectoryExists(name.as_ref().to_string())
    }

    pub fn link_exists<S: AsRef<str>>(name: S) -> Self {
        Error::LinkExists(name.as_ref().to_string())
    }

    pub fn name_exists<S: AsRef<str>>(name: S) -> Self {
        Error::NameExists(name.as_ref().to_string())
    }

    pub fn exceeds_size(requested: u64, available: u64) -> Self {
        Error::ExceedsSize {
            requested,
            available,
        }
    }

    pub fn invalid_path<S: AsRef<str>>(path: S) -> Self {
        Error::InvalidPath(path.as_ref().to_string())
    }

    pub fn not_found(handle: Handle) -> Self {
        Error::NotFound(handle)
    }

    pub fn cycle_detected(handle: Handle) -> Self {
        Error::CycleDetected(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::invalid_handle(Handle::new(4)).to_string(),
            "Invalid handle: #4"
        );
        assert_eq!(Error::invalid_name("a/b").to_string(), "Invalid name: \"a/b\"");
        assert_eq!(
            Error::exceeds_size(60, 50).to_string(),
            "File of size 60 exceeds available size 50"
        );
        assert_eq!(Error::HeapEmpty.to_string(), "Heap is empty");
    }
}

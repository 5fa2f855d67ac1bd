use crate::entry_type::EntryType;
use crate::handle::Handle;

/// Payload stored in each arena node.
///
/// The default value is an unnamed directory, which is what the root holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    kind: EntryType,
    name: String,
    size: u64,
    target: Option<Handle>,
}

impl Entry {
    pub fn file<S: Into<String>>(name: S, size: u64) -> Self {
        Self {
            kind: EntryType::File,
            name: name.into(),
            size,
            target: None,
        }
    }

    pub fn directory<S: Into<String>>(name: S) -> Self {
        Self {
            kind: EntryType::Directory,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn link<S: Into<String>>(name: S, target: Handle) -> Self {
        Self {
            kind: EntryType::Link,
            name: name.into(),
            size: 0,
            target: Some(target),
        }
    }

    pub fn kind(&self) -> EntryType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Size of a file; `None` for directories and links.
    pub fn file_size(&self) -> Option<u64> {
        match self.kind {
            EntryType::File => Some(self.size),
            _ => None,
        }
    }

    pub(crate) fn set_file_size(&mut self, size: u64) {
        self.size = size;
    }

    /// Handle a link points at; `None` for files and directories.
    pub fn link_target(&self) -> Option<Handle> {
        match self.kind {
            EntryType::Link => self.target,
            _ => None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryType::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryType::Directory
    }

    pub fn is_link(&self) -> bool {
        self.kind == EntryType::Link
    }
}

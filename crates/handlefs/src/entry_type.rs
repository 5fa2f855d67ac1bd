/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Sized leaf, counted against the quota
    File,
    /// Container of named children
    #[default]
    Directory,
    /// Reference to another node by handle
    Link,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Directory => "directory",
            EntryType::Link => "link",
        }
    }

    /// Marker printed in front of names in a layout listing.
    pub fn marker(&self) -> &'static str {
        match self {
            EntryType::File => "[F]",
            EntryType::Directory => "[D]",
            EntryType::Link => "[L]",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_forms() {
        assert_eq!(EntryType::File.to_string(), "file");
        assert_eq!(EntryType::Directory.marker(), "[D]");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&EntryType::Link).unwrap(), "\"link\"");
        let parsed: EntryType = serde_json::from_str("\"directory\"").unwrap();
        assert_eq!(parsed, EntryType::Directory);
    }
}

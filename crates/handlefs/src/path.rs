use crate::error::Error;
use crate::error::Result;

/// Separator between path components.
pub const SEPARATOR: char = '/';

/// Checks that `name` can be used as a single path component.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(Error::invalid_name(name));
    }
    Ok(())
}

/// Splits an absolute path into its components.
///
/// `/` yields no components. Relative paths and empty components (as in
/// `//a` or `/a/`) are rejected.
pub fn split_absolute(path: &str) -> Result<Vec<&str>> {
    let Some(rest) = path.strip_prefix(SEPARATOR) else {
        return Err(Error::invalid_path(path));
    };
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    let components: Vec<&str> = rest.split(SEPARATOR).collect();
    if components.iter().any(|c| c.is_empty()) {
        return Err(Error::invalid_path(path));
    }
    Ok(components)
}

/// Joins components into an absolute path; no components gives `/`.
pub fn join_absolute<I, S>(components: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::new();
    for component in components {
        path.push(SEPARATOR);
        path.push_str(component.as_ref());
    }
    if path.is_empty() {
        path.push(SEPARATOR);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("a.txt").is_ok());
        assert!(validate_name("..").is_ok());
        assert_eq!(validate_name("a/b"), Err(Error::invalid_name("a/b")));
        assert_eq!(validate_name(""), Err(Error::invalid_name("")));
    }

    #[test]
    fn test_split_absolute() {
        assert_eq!(split_absolute("/").unwrap(), Vec::<&str>::new());
        assert_eq!(split_absolute("/a").unwrap(), vec!["a"]);
        assert_eq!(split_absolute("/a/b/c").unwrap(), vec!["a", "b", "c"]);

        assert_eq!(split_absolute("a/b"), Err(Error::invalid_path("a/b")));
        assert_eq!(split_absolute(""), Err(Error::invalid_path("")));
        assert_eq!(split_absolute("/a/"), Err(Error::invalid_path("/a/")));
        assert_eq!(split_absolute("//a"), Err(Error::invalid_path("//a")));
    }

    #[test]
    fn test_join_absolute() {
        assert_eq!(join_absolute(Vec::<&str>::new()), "/");
        assert_eq!(join_absolute(["docs"]), "/docs");
        assert_eq!(join_absolute(["docs", "a.txt"]), "/docs/a.txt");
    }
}

use regex::Regex;
use std::collections::HashSet;
use std::fmt::Write;

/// One step of the qualified path. Fields come from object properties,
/// indices from array positions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Field(&'a str),
    Index(usize),
}

/// The location currently being compared, tracked as two parallel stacks:
/// `plain` holds only property names and is what ignore entries match
/// against; `qualified` additionally carries array indices and is what
/// difference messages print. Both are empty at the document root.
#[derive(Debug, Default)]
pub(crate) struct PathTracker<'a> {
    plain: Vec<&'a str>,
    qualified: Vec<Segment<'a>>,
}

impl<'a> PathTracker<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_field(&mut self, name: &'a str) {
        self.plain.push(name);
        self.qualified.push(Segment::Field(name));
    }

    pub(crate) fn pop_field(&mut self) {
        self.plain.pop();
        self.qualified.pop();
    }

    pub(crate) fn push_index(&mut self, idx: usize) {
        self.qualified.push(Segment::Index(idx));
    }

    pub(crate) fn pop_index(&mut self) {
        self.qualified.pop();
    }

    /// The plain path of a child property, dot-separated with no leading
    /// dot at the root. This is the form matched against the ignore set.
    pub(crate) fn plain_child(&self, name: &str) -> String {
        if self.plain.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.plain.join("."), name)
        }
    }

    /// Renders the qualified path for a difference message, e.g.
    /// `items[3].name`.
    pub(crate) fn qualified(&self) -> String {
        let mut out = String::new();
        for segment in &self.qualified {
            match segment {
                Segment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                Segment::Index(idx) => {
                    let _ = write!(out, "[{}]", idx);
                }
            }
        }
        out
    }
}

/// Plain property paths excluded from comparison. Matching is exact and
/// case-insensitive; entries are stored lowercased.
#[derive(Debug, Default)]
pub(crate) struct IgnoreSet {
    paths: HashSet<String>,
}

impl IgnoreSet {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Validates and collects the caller's ignore entries. Returns the
    /// first malformed entry (empty, or with empty segments) as the error.
    pub(crate) fn parse<'a, I>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let valid = Regex::new(r"^[^.]+(\.[^.]+)*$").expect("ignore path pattern is well-formed");

        let mut paths = HashSet::new();
        for entry in entries {
            if !valid.is_match(entry) {
                return Err(entry.to_string());
            }
            paths.insert(entry.to_lowercase());
        }

        Ok(Self { paths })
    }

    pub(crate) fn contains(&self, plain_path: &str) -> bool {
        !self.paths.is_empty() && self.paths.contains(&plain_path.to_lowercase())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_plain_child() {
        let mut path = PathTracker::new();
        assert_eq!(path.plain_child("a"), "a");

        path.push_field("a");
        path.push_field("b");
        assert_eq!(path.plain_child("c"), "a.b.c");

        path.pop_field();
        assert_eq!(path.plain_child("c"), "a.c");
    }

    #[test]
    fn test_plain_path_skips_indices() {
        let mut path = PathTracker::new();
        path.push_field("items");
        path.push_index(3);
        assert_eq!(path.plain_child("name"), "items.name");
    }

    #[test]
    fn test_qualified_rendering() {
        let mut path = PathTracker::new();
        assert_eq!(path.qualified(), "");

        path.push_field("items");
        path.push_index(3);
        path.push_field("name");
        assert_eq!(path.qualified(), "items[3].name");

        path.pop_field();
        path.pop_index();
        assert_eq!(path.qualified(), "items");
    }

    #[test]
    fn test_qualified_root_level_index() {
        let mut path = PathTracker::new();
        path.push_index(0);
        path.push_field("id");
        assert_eq!(path.qualified(), "[0].id");
    }

    #[test]
    fn test_ignore_set_matching() {
        let ignore = IgnoreSet::parse(["user.id", "CreatedAt"]).unwrap();

        assert!(ignore.contains("user.id"));
        assert!(ignore.contains("User.Id"));
        assert!(ignore.contains("createdat"));
        assert!(!ignore.contains("user"));
        assert!(!ignore.contains("user.id.raw"));
    }

    #[test]
    fn test_ignore_set_rejects_malformed_entries() {
        assert_eq!(IgnoreSet::parse([""]).unwrap_err(), "");
        assert_eq!(IgnoreSet::parse(["a..b"]).unwrap_err(), "a..b");
        assert_eq!(IgnoreSet::parse([".a"]).unwrap_err(), ".a");
        assert_eq!(IgnoreSet::parse(["a."]).unwrap_err(), "a.");
        assert!(IgnoreSet::parse(["a.b", "c"]).is_ok());
    }

    #[test]
    fn test_empty_ignore_set() {
        let ignore = IgnoreSet::empty();
        assert!(!ignore.contains("anything"));
    }
}

//! Cached reading of puzzle input lines

use crate::error::{Result, RunError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Input lines, shared and immutable once read
pub type Lines = Arc<[String]>;

/// Single-slot cache of the last input read.
///
/// The slot is not keyed by path: asking for another file while it is
/// populated returns the lines already held. Callers pass `clear_cache`
/// to force a fresh read.
#[derive(Debug, Default)]
pub struct LineCache {
    cached: Option<(PathBuf, Lines)>,
    reads: usize,
}

impl LineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lines of `input_file`, reading it only when the cache is empty
    pub fn read_lines(&mut self, input_file: &Path, clear_cache: bool) -> Result<Lines> {
        if clear_cache {
            self.cached = None;
        }

        if let Some((path, lines)) = &self.cached {
            if path != input_file {
                warn!(
                    cached = %path.display(),
                    requested = %input_file.display(),
                    "line cache holds another input; returning cached lines"
                );
            }
            return Ok(Arc::clone(lines));
        }

        self.reads += 1;
        let bytes = fs::read(input_file).map_err(|source| RunError::InputRead {
            path: input_file.to_path_buf(),
            source,
        })?;

        // Invalid UTF-8 sequences decode to U+FFFD
        let lines = split_lines(&String::from_utf8_lossy(&bytes));
        debug!(path = %input_file.display(), lines = lines.len(), "read input");
        self.cached = Some((input_file.to_path_buf(), Arc::clone(&lines)));
        Ok(lines)
    }

    /// Number of times the filesystem was hit
    #[cfg(test)]
    pub fn reads(&self) -> usize {
        self.reads
    }
}

/// Split text on `\r\n` or `\n`.
///
/// A trailing terminator produces a final empty line; a lone `\r` without
/// `\n` stays part of its line.
pub fn split_lines(text: &str) -> Lines {
    let mut segments: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        let line = &rest[..pos];
        segments.push(line.strip_suffix('\r').unwrap_or(line).to_string());
        rest = &rest[pos + 1..];
    }
    segments.push(rest.to_string());
    segments.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn as_vec(lines: &Lines) -> Vec<&str> {
        lines.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_split_mixed_endings() {
        let lines = split_lines("a\nb\r\nc");
        assert_eq!(as_vec(&lines), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_keeps_trailing_empty_line() {
        let lines = split_lines("a\nb\n");
        assert_eq!(as_vec(&lines), vec!["a", "b", ""]);
    }

    #[test]
    fn test_split_empty_text() {
        let lines = split_lines("");
        assert_eq!(as_vec(&lines), vec![""]);
    }

    #[test]
    fn test_split_lone_carriage_return() {
        let lines = split_lines("a\rb\nc\r");
        assert_eq!(as_vec(&lines), vec!["a\rb", "c\r"]);
    }

    #[test]
    fn test_read_lines_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("input.txt");
        fs::write(&path, "a\nb\r\nc").unwrap();

        let mut cache = LineCache::new();
        let lines = cache.read_lines(&path, false).unwrap();
        assert_eq!(as_vec(&lines), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_second_read_uses_cache() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("input.txt");
        fs::write(&path, "first").unwrap();

        let mut cache = LineCache::new();
        let first = cache.read_lines(&path, false).unwrap();
        fs::write(&path, "second").unwrap();
        let second = cache.read_lines(&path, false).unwrap();

        assert_eq!(cache.reads(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(as_vec(&second), vec!["first"]);
    }

    #[test]
    fn test_clear_forces_fresh_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("input.txt");
        fs::write(&path, "first").unwrap();

        let mut cache = LineCache::new();
        cache.read_lines(&path, false).unwrap();
        fs::write(&path, "second").unwrap();
        let lines = cache.read_lines(&path, true).unwrap();

        assert_eq!(cache.reads(), 2);
        assert_eq!(as_vec(&lines), vec!["second"]);
    }

    #[test]
    fn test_cache_is_not_keyed_by_path() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.txt");
        let b = temp.path().join("b.txt");
        fs::write(&a, "from a").unwrap();
        fs::write(&b, "from b").unwrap();

        let mut cache = LineCache::new();
        cache.read_lines(&a, false).unwrap();
        let lines = cache.read_lines(&b, false).unwrap();

        assert_eq!(as_vec(&lines), vec!["from a"]);
        assert_eq!(cache.reads(), 1);
    }

    #[test]
    fn test_missing_file_propagates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");

        let mut cache = LineCache::new();
        let result = cache.read_lines(&path, false);
        assert!(matches!(
            result,
            Err(RunError::InputRead { ref path, .. }) if path.ends_with("missing.txt")
        ));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("in.txt");
        fs::write(&path, b"1\n\xff2\n3").unwrap();

        let mut cache = LineCache::new();
        let lines = cache.read_lines(&path, false).unwrap();
        assert_eq!(as_vec(&lines), vec!["1", "\u{fffd}2", "3"]);
    }
}

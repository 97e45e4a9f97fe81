//! Loading and editing whole documents.

use std::io;
use std::path::Path;

/// Read a file as text, replacing invalid UTF-8 with U+FFFD.
///
/// Editing must never be blocked by an unexpected encoding.
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    })
}

/// Replace every occurrence of `find` in `text` with `replace`.
///
/// Returns the new text and the number of replacements. An empty `find`
/// matches nothing.
pub fn replace_all(text: &str, find: &str, replace: &str) -> (String, usize) {
    if find.is_empty() {
        return (text.to_string(), 0);
    }

    let count = text.matches(find).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(find, replace), count)
}

/// Replace every occurrence of `find` in the file at `path`, in place.
///
/// Files that are not valid UTF-8 are rejected with `InvalidData` and left
/// untouched. The file is only written when something matched. Returns the
/// number of replacements.
pub fn replace_in_file(path: &Path, find: &str, replace: &str) -> io::Result<usize> {
    let text = std::fs::read_to_string(path)?;
    let (new_text, count) = replace_all(&text, find, replace);
    if count > 0 {
        std::fs::write(path, new_text)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_counts_occurrences() {
        assert_eq!(
            replace_all("foo bar foo", "foo", "baz"),
            ("baz bar baz".to_string(), 2)
        );
    }

    #[test]
    fn replace_non_overlapping() {
        assert_eq!(replace_all("aaaa", "aa", "b"), ("bb".to_string(), 2));
        assert_eq!(replace_all("aaa", "aa", "b"), ("ba".to_string(), 1));
    }

    #[test]
    fn replace_edge_cases() {
        assert_eq!(replace_all("abc", "", "x"), ("abc".to_string(), 0));
        assert_eq!(replace_all("abc", "z", "x"), ("abc".to_string(), 0));
        assert_eq!(replace_all("héllo", "é", "e"), ("hello".to_string(), 1));
        assert_eq!(replace_all("a.b", ".", ""), ("ab".to_string(), 1));
    }

    /// Create a unique temp directory for test isolation.
    fn make_test_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir()
            .join("hlsp-test")
            .join(name)
            .join(format!("{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn read_valid_and_invalid_utf8() {
        let dir = make_test_dir("read-lossy");

        let good = dir.join("good.txt");
        std::fs::write(&good, "héllo").unwrap();
        assert_eq!(read_lossy(&good).unwrap(), "héllo");

        let bad = dir.join("bad.txt");
        std::fs::write(&bad, b"ok \xff\xfe end").unwrap();
        assert_eq!(read_lossy(&bad).unwrap(), "ok \u{fffd}\u{fffd} end");

        assert!(read_lossy(&dir.join("missing.txt")).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replace_in_file_rewrites_matches() {
        let dir = make_test_dir("replace-in-file");
        let file = dir.join("a.py");
        std::fs::write(&file, "foo = 1\nfoo += 1\n").unwrap();

        assert_eq!(replace_in_file(&file, "foo", "bar").unwrap(), 2);
        let written = std::fs::read_to_string(&file).unwrap();
        assert_eq!(written, "bar = 1\nbar += 1\n");

        assert_eq!(replace_in_file(&file, "zzz", "y").unwrap(), 0);
        assert!(replace_in_file(&dir.join("missing.txt"), "a", "b").is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replace_in_file_keeps_invalid_utf8_untouched() {
        let dir = make_test_dir("replace-latin1");
        let file = dir.join("latin1.txt");
        let bytes = b"caf\xe9 foo\n";
        std::fs::write(&file, bytes).unwrap();

        let err = replace_in_file(&file, "foo", "bar").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(std::fs::read(&file).unwrap(), bytes);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

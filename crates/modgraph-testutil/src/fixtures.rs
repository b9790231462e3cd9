//! Multi-file fixture trees.
//!
//! A `.fixture` file holds several source files:
//!
//! ```text
//! # file: lib/foo.js
//! ---
//! export default 1;
//! ===
//! ```
//!
//! Lines outside a file block are comments.

use std::io;
use std::path::{Path, PathBuf};

/// `foo`, `bar` and `baz` with a `resolver` dependency to whitelist.
pub const BASIC: &str = include_str!("../../../tests/fixtures/basic.fixture");

/// Modules under `renamed/` meant to be named with an `appkit/` prefix.
pub const RENAMED: &str = include_str!("../../../tests/fixtures/renamed.fixture");

/// Relative imports across `relative/{some,other,more}`.
pub const RELATIVE: &str = include_str!("../../../tests/fixtures/relative.fixture");

/// One file of a fixture tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureFile {
    /// Path relative to the tree root.
    pub path: PathBuf,
    pub source: String,
}

/// Parse a fixture into its files, in order.
pub fn parse_fixture(content: &str) -> Vec<FixtureFile> {
    let mut files = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(path) = line.trim().strip_prefix("# file:") else {
            continue;
        };

        // Skip to ---
        for line in lines.by_ref() {
            if line.trim() == "---" {
                break;
            }
        }

        let mut source_lines = Vec::new();
        for line in lines.by_ref() {
            if line.trim() == "===" {
                break;
            }
            source_lines.push(line);
        }

        let mut source = source_lines.join("\n");
        source.push('\n');
        files.push(FixtureFile {
            path: PathBuf::from(path.trim()),
            source,
        });
    }

    files
}

/// Write every file of `content` under `root`, creating directories.
///
/// Returns the written paths relative to `root`.
pub fn write_fixture(content: &str, root: &Path) -> io::Result<Vec<PathBuf>> {
    let files = parse_fixture(content);
    for file in &files {
        let target = root.join(&file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, &file.source)?;
    }
    Ok(files.into_iter().map(|f| f.path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_has_three_files() {
        let files = parse_fixture(BASIC);
        let paths: Vec<_> = files.iter().map(|f| f.path.to_string_lossy().into_owned()).collect();
        assert_eq!(paths, vec!["foo.js", "bar.js", "baz.js"]);
        assert!(files[0].source.starts_with("import resolver from 'resolver';"));
    }

    #[test]
    fn nested_paths() {
        let files = parse_fixture(RENAMED);
        assert_eq!(files.len(), 3);
        assert_eq!(files[2].path, PathBuf::from("renamed/nested/thing.js"));
        assert_eq!(parse_fixture(RELATIVE).len(), 4);
    }

    #[test]
    fn comments_are_ignored() {
        let files = parse_fixture("# just a note\n# file: a.js\n---\nx\n===\ntrailing\n");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].source, "x\n");
    }

    #[test]
    fn writes_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let written = write_fixture(RELATIVE, dir.path()).expect("write");
        assert_eq!(written.len(), 4);
        for path in written {
            assert!(dir.path().join(path).is_file());
        }
    }
}

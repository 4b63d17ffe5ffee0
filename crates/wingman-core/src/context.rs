//! Workspace context collection.
//!
//! Samples a bounded set of project files and concatenates them into a single
//! blob the prompt builder labels as project context. This is deliberately
//! lossy: at most [`CONTEXT_FILE_CAP`] files are included, in whatever order
//! the directory walker yields them. That order is not guaranteed stable
//! across runs; no relevance ranking is performed.

use std::path::Path;

use ignore::WalkBuilder;
use tracing::{debug, warn};

/// Maximum number of files included in one context blob.
pub const CONTEXT_FILE_CAP: usize = 10;

/// Extensions considered meaningful project context.
const CONTEXT_EXTENSIONS: &[&str] = &[
    "ts", "js", "py", "rs", "java", "cpp", "json", "html", "css", "md",
];

/// Dependency and build output directories, never worth sampling.
const EXCLUDED_DIRS: &[&str] = &["node_modules", "target", "dist", "build", "vendor"];

/// One sampled project file.
#[derive(Debug, Clone)]
pub struct ContextFile {
    pub path: String,
    pub text: String,
}

/// Collect up to [`CONTEXT_FILE_CAP`] project files under `root` into one blob.
///
/// Files that cannot be read are skipped with a warning; this never fails
/// outright. When nothing is readable the blob is empty.
pub fn collect(root: &Path) -> String {
    let files = sample_files(root);
    debug!("Collected {} context file(s) from {}", files.len(), root.display());

    files
        .iter()
        .map(|f| format!("// File: {}\n{}", f.path, f.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn sample_files(root: &Path) -> Vec<ContextFile> {
    let walker = WalkBuilder::new(root)
        .standard_filters(true)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !EXCLUDED_DIRS.contains(&name.as_ref())
        })
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unwalkable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().map_or(false, |t| t.is_file()) {
            continue;
        }
        if !has_context_extension(entry.path()) {
            continue;
        }

        match std::fs::read_to_string(entry.path()) {
            Ok(text) => files.push(ContextFile {
                path: entry.path().display().to_string(),
                text,
            }),
            Err(err) => {
                warn!("Skipping unreadable file {}: {}", entry.path().display(), err);
            }
        }

        if files.len() == CONTEXT_FILE_CAP {
            break;
        }
    }

    files
}

fn has_context_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| CONTEXT_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_workspace_yields_empty_blob() {
        let dir = tempdir().unwrap();
        assert_eq!(collect(dir.path()), "");
    }

    #[test]
    fn test_file_header_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.py");
        fs::write(&path, "print('hi')\n").unwrap();

        let blob = collect(dir.path());
        assert_eq!(blob, format!("// File: {}\nprint('hi')\n", path.display()));
    }

    #[test]
    fn test_cap_is_enforced() {
        let dir = tempdir().unwrap();
        for i in 0..25 {
            fs::write(dir.path().join(format!("f{i}.js")), "x\n").unwrap();
        }

        let blob = collect(dir.path());
        assert_eq!(blob.matches("// File: ").count(), CONTEXT_FILE_CAP);
    }

    #[test]
    fn test_dependency_dirs_excluded() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/dep.js"), "module\n").unwrap();
        fs::create_dir(dir.path().join("target")).unwrap();
        fs::write(dir.path().join("target/out.rs"), "artifact\n").unwrap();
        fs::write(dir.path().join("app.ts"), "app\n").unwrap();

        let blob = collect(dir.path());
        assert!(blob.contains("app.ts"));
        assert!(!blob.contains("dep.js"));
        assert!(!blob.contains("out.rs"));
    }

    #[test]
    fn test_unknown_extensions_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("binary.o"), "obj\n").unwrap();
        fs::write(dir.path().join("notes.md"), "notes\n").unwrap();

        let blob = collect(dir.path());
        assert!(blob.contains("notes.md"));
        assert!(!blob.contains("binary.o"));
    }

    #[test]
    fn test_files_joined_by_blank_line() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.css"), "a {}").unwrap();
        fs::write(dir.path().join("b.css"), "b {}").unwrap();

        let blob = collect(dir.path());
        assert_eq!(blob.matches("\n\n// File: ").count(), 1);
    }
}

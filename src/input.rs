use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DteError;
use crate::session::RawDocument;

/// Documents read from disk, plus the inputs that could not be read
#[derive(Debug, Default)]
pub struct ReadBatch {
    pub documents: Vec<RawDocument>,
    pub unreadable: Vec<(String, DteError)>,
}

impl ReadBatch {
    /// Number of inputs attempted, readable or not
    pub fn len(&self) -> usize {
        self.documents.len() + self.unreadable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn skip(&mut self, name: String, error: DteError) {
        warn!(file = %name, error = %error, "input skipped");
        self.unreadable.push((name, error));
    }
}

/// Expand the given paths into JSON files.
///
/// Files are taken as given, in argument order; a directory contributes its
/// `*.json` files (not recursive), sorted by name. Paths and directory
/// entries that cannot be resolved are recorded in `batch` and skipped.
fn collect_files(paths: &[PathBuf], batch: &mut ReadBatch) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = match fs::read_dir(path) {
                Ok(entries) => entries,
                Err(e) => {
                    batch.skip(path.display().to_string(), e.into());
                    continue;
                }
            };
            let mut found = Vec::new();
            for entry in entries {
                match entry {
                    Ok(entry) => {
                        let p = entry.path();
                        if p.is_file() && is_json(&p) {
                            found.push(p);
                        }
                    }
                    Err(e) => batch.skip(path.display().to_string(), e.into()),
                }
            }
            found.sort();
            debug!(dir = %path.display(), files = found.len(), "expanded directory");
            files.extend(found);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            batch.skip(
                display_name(path),
                DteError::InputNotFound(path.clone()),
            );
        }
    }
    files
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Name shown in file listings
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read every file found under `paths` into memory.
///
/// A file that cannot be read never stops the rest of the batch.
pub fn read_documents(paths: &[PathBuf]) -> ReadBatch {
    let mut batch = ReadBatch::default();
    for path in collect_files(paths, &mut batch) {
        let name = display_name(&path);
        match fs::read(&path) {
            Ok(content) => batch.documents.push(RawDocument { name, content }),
            Err(e) => batch.skip(name, e.into()),
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directories_contribute_sorted_json_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.JSON"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let batch = read_documents(&[dir.path().to_path_buf()]);
        let names: Vec<&str> = batch.documents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.JSON", "b.json"]);
        assert!(batch.unreadable.is_empty());
    }

    #[test]
    fn explicit_files_keep_argument_order() {
        let dir = TempDir::new().unwrap();
        let z = dir.path().join("z.txt");
        let a = dir.path().join("a.json");
        fs::write(&z, "1").unwrap();
        fs::write(&a, "2").unwrap();

        let batch = read_documents(&[z, a]);
        assert_eq!(batch.documents[0].name, "z.txt");
        assert_eq!(batch.documents[1].content, b"2");
    }

    #[test]
    fn unreadable_input_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        fs::write(&a, "1").unwrap();
        fs::write(&b, "2").unwrap();

        let batch = read_documents(&[a, missing, b]);
        assert_eq!(batch.len(), 3);
        let names: Vec<&str> = batch.documents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
        assert_eq!(batch.unreadable.len(), 1);
        assert_eq!(batch.unreadable[0].0, "nope.json");
        assert!(matches!(batch.unreadable[0].1, DteError::InputNotFound(_)));
    }
}

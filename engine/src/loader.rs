use crate::index::Index;
use anyhow::{bail, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Load every `.txt` file directly inside `dir` into `index`.
///
/// Symlinks are followed, so a link to a text file elsewhere is loaded like a
/// regular file. The id is the file name with every `.txt` removed, the title
/// is derived from it with [`title_from_id`], and the path is kept as the
/// document location. Entries that cannot be read are logged and skipped.
/// Returns the number of documents added.
pub fn load_directory<P: AsRef<Path>>(index: &mut Index, dir: P) -> Result<usize> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("directory {} does not exist", dir.display());
    }

    let mut loaded = 0;
    let entries = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(id) = path.file_name().and_then(|s| s.to_str()).and_then(document_id) else {
            continue;
        };
        match fs::read_to_string(path) {
            Ok(content) => {
                let title = title_from_id(&id);
                index.add_document(id, title, content, Some(path.display().to_string()));
                loaded += 1;
            }
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "skipping unreadable file"),
        }
    }
    tracing::info!(dir = %dir.display(), loaded, "loaded documents");
    Ok(loaded)
}

/// `notes.txt` -> `notes`, `notes.txt.txt` -> `notes`; `None` unless the name ends in `.txt`.
pub fn document_id(file_name: &str) -> Option<String> {
    file_name.ends_with(".txt").then(|| file_name.replace(".txt", ""))
}

/// `machine_learning` -> `Machine Learning`.
///
/// Underscores become spaces; the first letter of every run of letters is
/// upper-cased and the rest lower-cased.
pub fn title_from_id(id: &str) -> String {
    let mut title = String::with_capacity(id.len());
    let mut prev_is_letter = false;
    for c in id.chars().map(|c| if c == '_' { ' ' } else { c }) {
        if c.is_alphabetic() {
            if prev_is_letter {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            title.push(c);
            prev_is_letter = false;
        }
    }
    title
}

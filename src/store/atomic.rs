use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "poilog".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to `path` so that readers see either the old file or the
/// complete new one: write a sibling `.tmp` file, sync it, then rename over.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_existing_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        write_atomic(&path, b"[1]").unwrap();
        write_atomic(&path, b"[2]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[2]");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("file.json");
        write_atomic(&path, b"{}").unwrap();
        assert!(path.exists());
    }
}

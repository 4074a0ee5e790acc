//! Content repository — posts live directly on the filesystem.
//!
//! Every operation takes a caller-supplied path and reflects live disk
//! state; there is no cache and no index. There is also no locking:
//! concurrent writes to the same path race at the filesystem level and the
//! last write wins. That is an accepted limitation of the single-operator
//! deployment, not a serialization contract.

use std::path::Path;

use tokio::fs;

use crate::error::ContentError;

/// Recursively list every regular file under `root`.
///
/// Returns file names in walk order — callers must not depend on ordering.
/// Directories themselves are not included.
///
/// # Errors
///
/// - [`ContentError::NotFound`] if `root` does not exist.
/// - [`ContentError::NotADirectory`] if `root` is a file.
/// - [`ContentError::Io`] on any other filesystem failure.
pub async fn list(root: &Path) -> Result<Vec<String>, ContentError> {
    let meta = fs::metadata(root)
        .await
        .map_err(|e| ContentError::from_io(root, e))?;

    if !meta.is_dir() {
        return Err(ContentError::NotADirectory {
            path: root.display().to_string(),
        });
    }

    let mut names = Vec::new();
    walk(root, &mut names).await?;
    Ok(names)
}

async fn walk(dir: &Path, out: &mut Vec<String>) -> Result<(), ContentError> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| ContentError::from_io(dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ContentError::from_io(dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| ContentError::from_io(&entry.path(), e))?;

        if file_type.is_dir() {
            // Recursive async call.
            Box::pin(walk(&entry.path(), out)).await?;
        } else {
            out.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(())
}

/// Read a post as text, normalizing CRLF line endings to LF.
///
/// The normalization is a compatibility fix for downstream front-matter
/// parsers that reject CRLF input.
///
/// # Errors
///
/// - [`ContentError::NotFound`] if `path` does not exist.
/// - [`ContentError::Io`] on any other filesystem failure.
pub async fn read(path: &Path) -> Result<String, ContentError> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| ContentError::from_io(path, e))?;

    Ok(text.replace("\r\n", "\n"))
}

/// Write a post in full, creating the file if absent or overwriting it
/// otherwise. Parent directories are not created.
///
/// # Errors
///
/// Returns [`ContentError::NotFound`] or [`ContentError::Io`] on failure
/// (missing parent directory, permission denied, disk full).
pub async fn write(path: &Path, text: &str) -> Result<(), ContentError> {
    fs::write(path, text)
        .await
        .map_err(|e| ContentError::from_io(path, e))
}

/// Delete a post.
///
/// Deleting a path that does not exist is a failure, not a silent success.
///
/// # Errors
///
/// Returns [`ContentError::NotFound`] or [`ContentError::Io`] on failure.
pub async fn delete(path: &Path) -> Result<(), ContentError> {
    fs::remove_file(path)
        .await
        .map_err(|e| ContentError::from_io(path, e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.md");

        write(&path, "hello\nworld\n").await.unwrap();
        assert_eq!(read(&path).await.unwrap(), "hello\nworld\n");
    }

    #[tokio::test]
    async fn read_normalizes_crlf_to_lf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.md");

        write(&path, "+++\r\ntitle=\"x\"\r\n+++\r\n").await.unwrap();
        assert_eq!(read(&path).await.unwrap(), "+++\ntitle=\"x\"\n+++\n");
    }

    #[tokio::test]
    async fn read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = read(&dir.path().join("missing.md")).await;
        assert!(matches!(result, Err(ContentError::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_reflects_writes_and_deletes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.md");

        assert!(list(dir.path()).await.unwrap().is_empty());

        write(&path, "content").await.unwrap();
        assert_eq!(list(dir.path()).await.unwrap(), vec!["x.md".to_owned()]);

        delete(&path).await.unwrap();
        assert!(list(dir.path()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_descends_into_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("drafts")).await.unwrap();
        write(&dir.path().join("top.md"), "t").await.unwrap();
        write(&dir.path().join("drafts").join("nested.md"), "n")
            .await
            .unwrap();

        let mut names = list(dir.path()).await.unwrap();
        names.sort();
        assert_eq!(names, vec!["nested.md".to_owned(), "top.md".to_owned()]);
    }

    #[tokio::test]
    async fn list_missing_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = list(&dir.path().join("nope")).await;
        assert!(matches!(result, Err(ContentError::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_on_a_file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.md");
        write(&path, "x").await.unwrap();

        let result = list(&path).await;
        assert!(matches!(result, Err(ContentError::NotADirectory { .. })));
    }

    #[tokio::test]
    async fn delete_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = delete(&dir.path().join("missing.md")).await;
        assert!(matches!(result, Err(ContentError::NotFound { .. })));
    }

    #[tokio::test]
    async fn write_without_parent_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = write(&dir.path().join("no-such-dir").join("a.md"), "x").await;
        assert!(result.is_err());
    }
}

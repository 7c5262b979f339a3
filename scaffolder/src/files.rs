//! File existence and extension resolution
//!
//! Generators emit `.ts`/`.tsx` files, but a project may hold the `.js`
//! equivalent from an earlier run or a JavaScript setup. For the script
//! extensions in [`SOURCE_EXTENSIONS`] every physical variant of a base path
//! counts as the same logical file, both for existence checks and deletion.

use crate::error::{Result, ScaffoldError};
use std::fs;
use std::path::{Path, PathBuf};

/// Script extensions treated as interchangeable variants of one file
pub const SOURCE_EXTENSIONS: [&str; 3] = [".js", ".ts", ".tsx"];

/// Options for [`write_file`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Replace the target if it already exists
    pub overwrite_existing: bool,
}

impl WriteOptions {
    /// Options that permit replacing existing files
    #[must_use]
    pub const fn overwrite() -> Self {
        Self {
            overwrite_existing: true,
        }
    }
}

/// Strip the final `.` and trailing extension from a path
///
/// # Examples
///
/// ```
/// # use scaffolder::files::base_file;
/// # use std::path::Path;
/// assert_eq!(base_file(Path::new("a/b/Thing.tsx")), Path::new("a/b/Thing"));
/// assert_eq!(base_file(Path::new("a/b/Thing")), Path::new("a/b/Thing"));
/// ```
#[must_use]
pub fn base_file(path: &Path) -> PathBuf {
    path.with_extension("")
}

/// Whether the extension of `path` is one of [`SOURCE_EXTENSIONS`]
#[must_use]
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.iter().any(|known| &known[1..] == ext))
}

/// Every source-extension variant of `path`, in [`SOURCE_EXTENSIONS`] order
fn source_variants(path: &Path) -> Vec<PathBuf> {
    let base = base_file(path);
    SOURCE_EXTENSIONS
        .iter()
        .map(|ext| {
            let mut variant = base.clone().into_os_string();
            variant.push(ext);
            PathBuf::from(variant)
        })
        .collect()
}

/// Whether `path`, or for script files any of its extension variants, exists
#[must_use]
pub fn exists_any_extension(path: &Path) -> bool {
    if has_source_extension(path) {
        source_variants(path).iter().any(|variant| variant.exists())
    } else {
        path.exists()
    }
}

/// Delete `path`, or for script files every extension variant that exists
///
/// Returns the paths that were removed.
///
/// # Errors
///
/// Returns an error if a removal fails, or if a non-script `path` does not exist.
pub fn delete_any_extension(path: &Path) -> Result<Vec<PathBuf>> {
    if !has_source_extension(path) {
        fs::remove_file(path).map_err(|e| ScaffoldError::io(path, e))?;
        tracing::debug!(path = %path.display(), "deleted file");
        return Ok(vec![path.to_path_buf()]);
    }

    let mut removed = Vec::new();
    for variant in source_variants(path) {
        if variant.exists() {
            fs::remove_file(&variant).map_err(|e| ScaffoldError::io(&variant, e))?;
            tracing::debug!(path = %variant.display(), "deleted file");
            removed.push(variant);
        }
    }
    Ok(removed)
}

/// Write `contents` to `target`, creating parent directories as needed
///
/// # Errors
///
/// Returns [`ScaffoldError::AlreadyExists`] if the target exists and
/// `options.overwrite_existing` is false, or an I/O error if the directories
/// or file cannot be written.
pub fn write_file(target: &Path, contents: &str, options: WriteOptions) -> Result<()> {
    if !options.overwrite_existing && target.exists() {
        return Err(ScaffoldError::AlreadyExists(target.to_path_buf()));
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
    }

    fs::write(target, contents).map_err(|e| ScaffoldError::io(target, e))?;
    tracing::debug!(path = %target.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Read a UTF-8 file
///
/// # Errors
///
/// Returns an I/O error naming `path` if it cannot be read.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))
}

/// `path` relative to `base` for display, or unchanged if it lies elsewhere
#[must_use]
pub fn relative_to<'a>(base: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}

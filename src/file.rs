// src/file.rs

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use thiserror::Error;

use crate::csv::listing_to_string;
use crate::data::ListingPage;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not serialize record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("CSV export only supports listing pages")]
    CsvNeedsListing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Json => "json", ExportFormat::Csv => "csv" }
    }
}

/// Serialize any record as JSON (pretty unless `compact`).
pub fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String, ExportError> {
    let mut s = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    s.push('\n');
    Ok(s)
}

pub fn to_csv(pages: &[ListingPage]) -> String {
    listing_to_string(pages, true, ',')
}

/// Write `contents` to `path`, creating parent directories. Returns the path written.
pub fn write_export(path: &Path, contents: &str) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, contents).map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
    Ok(path.to_path_buf())
}

/// Stdout when no path was given.
pub fn write_stdout(contents: &str) -> Result<(), ExportError> {
    let mut out = io::stdout().lock();
    out.write_all(contents.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|source| ExportError::Io { path: PathBuf::from("<stdout>"), source })
}

/// `-o` handling: empty → default file in cwd; directory (existing, or hinted by
/// a trailing separator) → default file inside it; otherwise the path as given.
pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> Result<PathBuf, ExportError> {
    if user_o.is_empty() { return Ok(PathBuf::from(default_filename)); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(user_o) || p.is_dir() {
        ensure_directory(&p)?; Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

pub fn default_filename(stem: &str, format: ExportFormat) -> String {
    join!(stem, ".", format.ext())
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io { path: dir.to_path_buf(), source })?;
    }
    Ok(())
}

pub fn looks_like_dir_hint(p: &str) -> bool {
    p.ends_with('/') || p.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("sarkari_file_{}", name));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn dir_hint_gets_default_filename() {
        let dir = tmp_dir("hint");
        let hinted = format!("{}/sub/", dir.display());
        let out = resolve_single_out_path(&hinted, "latest-jobs.json").unwrap();
        assert!(out.ends_with("latest-jobs.json"));
        assert!(dir.join("sub").is_dir());
    }

    #[test]
    fn plain_path_is_kept() {
        let out = resolve_single_out_path("report.txt", "x.json").unwrap();
        assert_eq!(out, PathBuf::from("report.txt"));
        assert_eq!(resolve_single_out_path("", "x.json").unwrap(), PathBuf::from("x.json"));
    }

    #[test]
    fn file_in_the_way_is_reported() {
        let dir = tmp_dir("blocked");
        let blocker = dir.join("blocker");
        fs::write(&blocker, "x").unwrap();
        let err = write_export(&blocker.join("out.json"), "{}").unwrap_err();
        assert!(matches!(err, ExportError::NotADirectory(_)));
    }

    #[test]
    fn default_names() {
        assert_eq!(default_filename("detail", ExportFormat::Json), "detail.json");
        assert_eq!(default_filename("latest-jobs", ExportFormat::Csv), "latest-jobs.csv");
    }
}

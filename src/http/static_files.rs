//! Static file delivery from the resource root.

use std::path::{Path, PathBuf};

use crate::http::mime::MediaType;
use crate::http::request::Target;
use crate::http::response::{Response, StatusCode};

#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a target path such as `/css/` to a directory under the root.
    /// Returns `None` for paths that would climb out of it.
    pub fn resolve_dir(&self, path: &str) -> Option<PathBuf> {
        let mut dir = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
            if segment == ".." {
                return None;
            }
            dir.push(segment);
        }
        Some(dir)
    }

    /// Serves `target` with the negotiated type, or 404 if it is missing.
    pub async fn serve(&self, target: &Target, media: MediaType) -> Response {
        tracing::info!(
            file = %target.file_name,
            path = %target.path,
            mime = %media,
            "Handling file"
        );

        let Some(dir) = self.resolve_dir(&target.path) else {
            tracing::warn!(path = %target.path, "Rejected path outside resource root");
            return Response::canned(StatusCode::NotFound);
        };

        if target.file_name == ".." || !find_file(&dir, &target.file_name).await {
            tracing::warn!(file = %target.file_name, dir = %dir.display(), "File not found");
            return Response::canned(StatusCode::NotFound);
        }

        match read_all(&dir, &target.file_name).await {
            Ok(contents) => {
                tracing::debug!(size = contents.len(), "Read file");
                Response::file(media, contents)
            }
            Err(e) => {
                tracing::error!(file = %target.file_name, error = %e, "Failed to load file");
                Response::canned(StatusCode::NotFound)
            }
        }
    }
}

/// Looks for an entry named exactly `file_name` in `dir`.
pub async fn find_file(dir: &Path, file_name: &str) -> bool {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Could not read directory");
            return false;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        if entry.file_name() == file_name {
            return true;
        }
    }
    false
}

pub async fn read_all(dir: &Path, file_name: &str) -> std::io::Result<Vec<u8>> {
    tokio::fs::read(dir.join(file_name)).await
}

/// Static Responder
///
/// Serves the web page, privacy policy, OpenAI domain verification token and
/// every other file under the public directory. Content types, conditional
/// requests and missing-file handling come from actix-files.

use actix_files::{Files, NamedFile};
use actix_web::{Result, http::header::ContentType, web};
use std::path::{Path, PathBuf};

/// Served for `GET /` (and for non-JSON-RPC `POST /`).
pub const INDEX_FILE: &str = "index.html";
/// Served for `GET /privacy.html`.
pub const PRIVACY_FILE: &str = "privacy.html";
/// Served for `GET /.well-known/openai-apps-challenge`.
pub const CHALLENGE_FILE: &str = ".well-known/openai-apps-challenge";

/// Root of the static file tree.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Open a file relative to the root.
    pub async fn open(&self, relative: &str) -> std::io::Result<NamedFile> {
        NamedFile::open_async(self.root.join(relative)).await
    }
}

pub async fn index(files: web::Data<StaticFiles>) -> Result<NamedFile> {
    Ok(files.open(INDEX_FILE).await?)
}

pub async fn privacy(files: web::Data<StaticFiles>) -> Result<NamedFile> {
    Ok(files.open(PRIVACY_FILE).await?)
}

/// The challenge file has no extension, so its type is set explicitly.
pub async fn domain_challenge(files: web::Data<StaticFiles>) -> Result<NamedFile> {
    let file = files.open(CHALLENGE_FILE).await?;
    Ok(file.set_content_type(ContentType::plaintext().0))
}

/// Catch-all service for the public directory. Must be registered after
/// every API route since it is mounted at `/`.
pub fn assets(files: &StaticFiles) -> Files {
    Files::new("/", files.root()).index_file(INDEX_FILE)
}

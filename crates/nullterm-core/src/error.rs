use std::path::PathBuf;

use thiserror::Error;

/// Problems found while loading the site content asset.
///
/// All of these are authoring mistakes in `content/site.json`; none of them
/// can be triggered by user input at runtime.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content asset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported content version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("content store is empty")]
    Empty,
    #[error("duplicate file id `{0}`")]
    DuplicateId(String),
    #[error("file names `{first}` and `{second}` collide ignoring case")]
    DuplicateName { first: String, second: String },
    #[error("folder `{0}` must carry photo-collage content")]
    FolderWithoutGallery(String),
    #[error("photo-collage content in `{0}` must live in a folder")]
    GalleryOutsideFolder(String),
    #[error("gallery `{0}` has no photos")]
    EmptyGallery(String),
    #[error("navigation card in `{file}` points at unknown file `{target}`")]
    DanglingNavigation { file: String, target: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("config {path}: timing.{field} must be at least 1")]
    ZeroInterval { path: PathBuf, field: &'static str },
}

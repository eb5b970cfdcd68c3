mod model;

pub use model::*;

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::error::ContentError;

pub const CONTENT_VERSION: u32 = 1;

const EMBEDDED_SITE: &str = include_str!("../../content/site.json");

#[derive(Debug, Deserialize)]
struct SiteAsset {
    version: u32,
    dashboard: Dashboard,
    files: Vec<FileNode>,
}

/// Immutable, validated set of files plus the dashboard shown when nothing
/// is selected. Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dashboard: Dashboard,
    files: Vec<FileNode>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl ContentStore {
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_json(EMBEDDED_SITE)
    }

    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let asset: SiteAsset = serde_json::from_str(raw)?;
        if asset.version != CONTENT_VERSION {
            return Err(ContentError::UnsupportedVersion {
                found: asset.version,
                expected: CONTENT_VERSION,
            });
        }
        Self::from_parts(asset.dashboard, asset.files)
    }

    pub fn from_parts(dashboard: Dashboard, files: Vec<FileNode>) -> Result<Self, ContentError> {
        if files.is_empty() {
            return Err(ContentError::Empty);
        }

        let mut by_id = HashMap::with_capacity(files.len());
        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            if by_id.insert(file.id.clone(), index).is_some() {
                return Err(ContentError::DuplicateId(file.id.clone()));
            }
            let folded = file.name.to_lowercase();
            if let Some(&previous) = by_name.get(&folded) {
                return Err(ContentError::DuplicateName {
                    first: files[previous].name.clone(),
                    second: file.name.clone(),
                });
            }
            by_name.insert(folded, index);
            validate_shape(file)?;
        }

        let ids: HashSet<&str> = files.iter().map(|file| file.id.as_str()).collect();
        for file in &files {
            if let Some(FileContent::GettingStarted(page)) = &file.content {
                if let Some(card) = page
                    .navigation
                    .items
                    .iter()
                    .find(|card| !ids.contains(card.target.as_str()))
                {
                    return Err(ContentError::DanglingNavigation {
                        file: file.id.clone(),
                        target: card.target.clone(),
                    });
                }
            }
        }

        if let Some(link) = dashboard
            .quick_links
            .iter()
            .find(|link| !ids.contains(link.target.as_str()))
        {
            return Err(ContentError::DanglingNavigation {
                file: "dashboard".to_string(),
                target: link.target.clone(),
            });
        }

        debug!(files = files.len(), "content store loaded");
        Ok(Self {
            dashboard,
            files,
            by_id,
            by_name,
        })
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn get(&self, id: &str) -> Option<&FileNode> {
        self.by_id.get(id).map(|&index| &self.files[index])
    }

    /// Case-insensitive exact match on `name`; ids and display names never match.
    pub fn find_by_name(&self, name: &str) -> Option<&FileNode> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| &self.files[index])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn at(&self, index: usize) -> Option<&FileNode> {
        self.files.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileNode> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn validate_shape(file: &FileNode) -> Result<(), ContentError> {
    let gallery = match &file.content {
        Some(FileContent::PhotoCollage(gallery)) => Some(gallery),
        _ => None,
    };
    match (file.kind, gallery) {
        (NodeKind::Folder, None) => Err(ContentError::FolderWithoutGallery(file.id.clone())),
        (NodeKind::File, Some(_)) => Err(ContentError::GalleryOutsideFolder(file.id.clone())),
        (NodeKind::Folder, Some(gallery)) if gallery.photos.is_empty() => {
            Err(ContentError::EmptyGallery(file.id.clone()))
        }
        _ => Ok(()),
    }
}

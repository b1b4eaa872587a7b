use std::path::{Path, PathBuf};

use stickerboard_core::content::{entry_kind, EntryKind};
use stickerboard_core::{
    items_from_listing, ContentSetId, Item, LayoutCache, LayoutError, LayoutFetcher, ListingEntry,
};

pub struct Folder {
    pub content_set: ContentSetId,
    pub items: Vec<Item>,
}

/// Reads a content folder; the directory name is the content set id.
pub async fn read_folder(
    dir: &Path,
    image_base: &str,
) -> Result<Folder, Box<dyn std::error::Error>> {
    let name = dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("folder has no usable name: {}", dir.display()))?;
    let content_set = ContentSetId::parse(name)?;
    let mut entries = Vec::new();
    let mut listing = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = listing.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        match entry_kind(&file_name) {
            Some(EntryKind::Image) => entries.push(ListingEntry::image(file_name)),
            Some(EntryKind::Caption) => {
                let contents = tokio::fs::read_to_string(entry.path()).await?;
                entries.push(ListingEntry::caption(file_name, contents));
            }
            None => {}
        }
    }
    let items = items_from_listing(&content_set, &entries, image_base);
    log::debug!("{}: {} items", content_set, items.len());
    Ok(Folder { content_set, items })
}

/// Serves published layout paths from a local public directory.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl LayoutFetcher for FsFetcher {
    async fn fetch_text(&self, path: &str) -> Option<String> {
        let full = self.resolve_path(path);
        match tokio::fs::read_to_string(&full).await {
            Ok(raw) => Some(raw),
            Err(err) => {
                log::debug!("no published layout at {}: {err}", full.display());
                None
            }
        }
    }
}

/// Read-only cache holding one layout document read from a file.
pub struct FileCache {
    key: String,
    contents: Option<String>,
}

impl FileCache {
    /// A missing file behaves like an empty cache.
    pub async fn open(key: String, path: Option<&Path>) -> std::io::Result<Self> {
        let contents = match path {
            Some(path) => match tokio::fs::read_to_string(path).await {
                Ok(raw) => Some(raw),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
                Err(err) => return Err(err),
            },
            None => None,
        };
        Ok(Self { key, contents })
    }
}

impl LayoutCache for FileCache {
    fn read(&self, key: &str) -> Result<Option<String>, LayoutError> {
        if key != self.key {
            return Ok(None);
        }
        Ok(self.contents.clone())
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), LayoutError> {
        Err(LayoutError::Storage("cache file is read-only".to_string()))
    }
}

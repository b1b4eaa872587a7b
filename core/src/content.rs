//! Builds board items from a folder listing. Images and captions sharing a
//! file stem become one item.

use std::collections::BTreeMap;

use crate::content_set::ContentSetId;
use crate::model::Item;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif"];
pub const CAPTION_EXTENSIONS: &[&str] = &["md", "txt"];
/// Folder description, never a board item.
pub const FOLDER_DESCRIPTION_STEM: &str = "content";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub file_name: String,
    /// Text of caption files; ignored for images.
    pub contents: Option<String>,
}

impl ListingEntry {
    pub fn image(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: None,
        }
    }

    pub fn caption(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: Some(contents.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Image,
    Caption,
}

pub fn split_file_name(file_name: &str) -> Option<(&str, String)> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some((stem, ext.to_ascii_lowercase()))
}

pub fn entry_kind(file_name: &str) -> Option<EntryKind> {
    let (_, ext) = split_file_name(file_name)?;
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(EntryKind::Image)
    } else if CAPTION_EXTENSIONS.contains(&ext.as_str()) {
        Some(EntryKind::Caption)
    } else {
        None
    }
}

/// Items ordered by stem. `image_base` prefixes image paths, e.g.
/// `/images` yields `/images/<set>/<file>`.
pub fn items_from_listing(
    content_set: &ContentSetId,
    entries: &[ListingEntry],
    image_base: &str,
) -> Vec<Item> {
    let base = image_base.trim_end_matches('/');
    let mut grouped: BTreeMap<&str, Item> = BTreeMap::new();
    for entry in entries {
        let Some(kind) = entry_kind(&entry.file_name) else {
            continue;
        };
        let Some((stem, _)) = split_file_name(&entry.file_name) else {
            continue;
        };
        if stem == FOLDER_DESCRIPTION_STEM {
            continue;
        }
        let item = grouped.entry(stem).or_insert_with(|| Item::new(stem));
        match kind {
            EntryKind::Image => {
                if item.image.is_none() {
                    item.image = Some(format!("{base}/{content_set}/{}", entry.file_name));
                }
            }
            EntryKind::Caption => {
                let text = entry.contents.as_deref().map(str::trim).unwrap_or_default();
                if !text.is_empty() && item.text.is_none() {
                    item.text = Some(text.to_string());
                }
            }
        }
    }
    grouped
        .into_values()
        .filter(|item| item.image.is_some() || item.text.is_some())
        .collect()
}

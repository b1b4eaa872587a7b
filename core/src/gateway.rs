//! Where layouts come from and where they go.
//!
//! Load precedence is published document, then local cache, then an empty
//! map. A missing document and a malformed one are handled the same way.
//! Saves only ever touch the local cache; promoting a layout to the
//! published location is done by hand from an export.

use std::collections::HashMap;

use crate::codec::{decode_layout, encode_layout, encode_layout_pretty};
use crate::config::BoardConfig;
use crate::content_set::ContentSetId;
use crate::error::LayoutError;
use crate::model::{Item, LayoutMap, Orientation};
use crate::store::resolve_layout;

/// Local key-value storage for layout documents.
pub trait LayoutCache {
    fn read(&self, key: &str) -> Result<Option<String>, LayoutError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), LayoutError>;
}

/// Read access to published layout documents. `None` covers not-found and
/// transport failures alike.
#[allow(async_fn_in_trait)]
pub trait LayoutFetcher {
    async fn fetch_text(&self, path: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOrigin {
    Published,
    Cached,
    Defaults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLayout {
    pub orientation: Orientation,
    pub origin: LayoutOrigin,
    pub overrides: LayoutMap,
}

pub fn document_path(base: &str, content_set: &ContentSetId, orientation: Orientation) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        format!("{content_set}/layout-{orientation}.json")
    } else {
        format!("{base}/{content_set}/layout-{orientation}.json")
    }
}

pub fn cache_key(prefix: &str, content_set: &ContentSetId, orientation: Orientation) -> String {
    format!("{prefix}.{content_set}.{orientation}")
}

pub struct LayoutGateway<C> {
    cache: C,
    content_set: ContentSetId,
    layout_base: String,
    cache_key_prefix: String,
}

impl<C: LayoutCache> LayoutGateway<C> {
    pub fn new(content_set: ContentSetId, cache: C, config: &BoardConfig) -> Self {
        Self {
            cache,
            content_set,
            layout_base: config.layout_base.clone(),
            cache_key_prefix: config.cache_key_prefix.clone(),
        }
    }

    pub fn content_set(&self) -> &ContentSetId {
        &self.content_set
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    pub fn document_path(&self, orientation: Orientation) -> String {
        document_path(&self.layout_base, &self.content_set, orientation)
    }

    pub fn cache_key(&self, orientation: Orientation) -> String {
        cache_key(&self.cache_key_prefix, &self.content_set, orientation)
    }

    /// Applies the load precedence to an already-fetched published
    /// document.
    pub fn resolve(&self, orientation: Orientation, published: Option<&str>) -> LoadedLayout {
        if let Some(raw) = published {
            match decode_layout(raw) {
                Ok(overrides) => {
                    log::debug!(
                        "layout {}/{}: published ({} entries)",
                        self.content_set,
                        orientation,
                        overrides.len()
                    );
                    return LoadedLayout {
                        orientation,
                        origin: LayoutOrigin::Published,
                        overrides,
                    };
                }
                Err(err) => {
                    log::debug!("layout {}/{}: published ignored: {err}", self.content_set, orientation);
                }
            }
        }
        let key = self.cache_key(orientation);
        match self.cache.read(&key) {
            Ok(Some(raw)) => match decode_layout(&raw) {
                Ok(overrides) => {
                    log::debug!(
                        "layout {}/{}: cached ({} entries)",
                        self.content_set,
                        orientation,
                        overrides.len()
                    );
                    return LoadedLayout {
                        orientation,
                        origin: LayoutOrigin::Cached,
                        overrides,
                    };
                }
                Err(err) => {
                    log::debug!("layout {}/{}: cache ignored: {err}", self.content_set, orientation);
                }
            },
            Ok(None) => {}
            Err(err) => {
                log::warn!("layout {}/{}: cache read failed: {err}", self.content_set, orientation);
            }
        }
        log::debug!("layout {}/{}: defaults", self.content_set, orientation);
        LoadedLayout {
            orientation,
            origin: LayoutOrigin::Defaults,
            overrides: LayoutMap::new(),
        }
    }

    pub async fn load<F>(&self, orientation: Orientation, fetcher: &F) -> LoadedLayout
    where
        F: LayoutFetcher,
    {
        let path = self.document_path(orientation);
        let published = fetcher.fetch_text(&path).await;
        self.resolve(orientation, published.as_deref())
    }

    /// Fire-and-forget write of the whole override map.
    pub fn save(&mut self, orientation: Orientation, overrides: &LayoutMap) {
        let key = self.cache_key(orientation);
        let raw = match encode_layout(overrides) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("layout {key}: encode failed: {err}");
                return;
            }
        };
        if let Err(err) = self.cache.write(&key, &raw) {
            log::warn!("layout {key}: save failed: {err}");
        }
    }

    /// Every item resolved to its override or default, as a document ready
    /// to be published.
    pub fn export(&self, items: &[Item], overrides: &LayoutMap) -> String {
        let resolved = resolve_layout(items, overrides);
        match encode_layout_pretty(&resolved) {
            Ok(raw) => raw,
            Err(err) => {
                log::error!("layout {}: export failed: {err}", self.content_set);
                "{}".to_string()
            }
        }
    }
}

/// In-process cache. Can be switched off to behave like unavailable
/// storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            unavailable: true,
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LayoutCache for MemoryCache {
    fn read(&self, key: &str) -> Result<Option<String>, LayoutError> {
        if self.unavailable {
            return Err(LayoutError::Storage("storage unavailable".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), LayoutError> {
        if self.unavailable {
            return Err(LayoutError::Storage("storage unavailable".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Serves published documents from a fixed table of paths.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    documents: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<String>, raw: impl Into<String>) -> Self {
        self.documents.insert(path.into(), raw.into());
        self
    }
}

impl LayoutFetcher for StaticFetcher {
    async fn fetch_text(&self, path: &str) -> Option<String> {
        self.documents.get(path).cloned()
    }
}

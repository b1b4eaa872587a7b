use std::fmt;

use serde::Deserialize;
use stickerboard_core::{BoardConfig, ContentSetId, ContentSetIdError, Item};

pub(crate) const MANIFEST_ELEMENT_ID: &str = "stickerboard-manifest";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    content_set: String,
    #[serde(default)]
    layout_base: Option<String>,
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    config: Option<BoardConfig>,
    #[serde(default)]
    hero_candidates: Vec<String>,
}

/// Everything the page embeds for one board.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoardSetup {
    pub content_set: ContentSetId,
    pub items: Vec<Item>,
    pub config: BoardConfig,
    pub hero_candidates: Vec<String>,
}

#[derive(Debug)]
pub(crate) enum ManifestError {
    Missing,
    Json(serde_json::Error),
    ContentSet(ContentSetIdError),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Missing => write!(f, "#{MANIFEST_ELEMENT_ID} not found"),
            ManifestError::Json(err) => write!(f, "manifest is not valid JSON: {err}"),
            ManifestError::ContentSet(err) => write!(f, "manifest content set: {err}"),
        }
    }
}

impl std::error::Error for ManifestError {}

pub(crate) fn parse_manifest(raw: &str) -> Result<BoardSetup, ManifestError> {
    let manifest: RawManifest = serde_json::from_str(raw).map_err(ManifestError::Json)?;
    let content_set =
        ContentSetId::parse(&manifest.content_set).map_err(ManifestError::ContentSet)?;
    let mut config = manifest.config.unwrap_or_default().sanitized();
    if let Some(base) = manifest.layout_base {
        config.layout_base = base;
    }
    Ok(BoardSetup {
        content_set,
        items: manifest.items,
        config,
        hero_candidates: manifest.hero_candidates,
    })
}

pub(crate) fn read_manifest() -> Result<BoardSetup, ManifestError> {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(MANIFEST_ELEMENT_ID))
        .and_then(|element| element.text_content())
        .ok_or(ManifestError::Missing)?;
    parse_manifest(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_base_overrides_config() {
        let setup = parse_manifest(
            r#"{
                "contentSet": "summer-trip",
                "layoutBase": "/content",
                "items": [{"id": "a", "image": "/a.jpg"}, {"id": "b", "text": "hi"}],
                "config": {"tapThresholdPx": 8}
            }"#,
        )
        .expect("manifest");
        assert_eq!(setup.content_set.as_str(), "summer-trip");
        assert_eq!(setup.config.layout_base, "/content");
        assert_eq!(setup.config.tap_threshold_px, 8.0);
        assert_eq!(setup.items.len(), 2);
        assert!(setup.hero_candidates.is_empty());
    }

    #[test]
    fn bad_content_set_is_rejected() {
        let err = parse_manifest(r#"{"contentSet": "../etc"}"#).expect_err("invalid");
        assert!(matches!(err, ManifestError::ContentSet(_)));
    }
}

use serde_json::Value;

use crate::error::LayoutError;
use crate::model::{LayoutMap, Position};

/// Decodes a flat `{ id: {x, y, rotation} }` document. Any entry that does
/// not decode rejects the whole document.
pub fn decode_layout(raw: &str) -> Result<LayoutMap, LayoutError> {
    let value: Value = serde_json::from_str(raw).map_err(LayoutError::Parse)?;
    let Value::Object(entries) = value else {
        return Err(LayoutError::Shape("expected an object".to_string()));
    };
    let mut map = LayoutMap::new();
    for (id, entry) in entries {
        if !entry.is_object() {
            return Err(LayoutError::Shape(format!("entry `{id}` is not an object")));
        }
        let position: Position = serde_json::from_value(entry)
            .map_err(|err| LayoutError::Shape(format!("entry `{id}`: {err}")))?;
        if !position.is_finite() {
            return Err(LayoutError::NonFinite { id });
        }
        map.insert(id, position);
    }
    Ok(map)
}

pub fn encode_layout(map: &LayoutMap) -> Result<String, LayoutError> {
    serde_json::to_string(map).map_err(LayoutError::Encode)
}

pub fn encode_layout_pretty(map: &LayoutMap) -> Result<String, LayoutError> {
    serde_json::to_string_pretty(map).map_err(LayoutError::Encode)
}

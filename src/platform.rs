//! Browser bindings for the board: localStorage, fetch, clipboard and
//! viewport orientation.

use js_sys::{Function, Promise, Reflect};
use stickerboard_core::{LayoutCache, LayoutError, LayoutFetcher, Orientation};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Storage, Window};

const PORTRAIT_QUERY: &str = "(orientation: portrait)";

/// Layout cache backed by `window.localStorage`.
pub(crate) struct BrowserCache;

fn local_storage() -> Result<Storage, LayoutError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or_else(|| LayoutError::Storage("localStorage unavailable".to_string()))
}

fn storage_error(err: JsValue) -> LayoutError {
    LayoutError::Storage(format!("{err:?}"))
}

impl LayoutCache for BrowserCache {
    fn read(&self, key: &str) -> Result<Option<String>, LayoutError> {
        local_storage()?.get_item(key).map_err(storage_error)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), LayoutError> {
        local_storage()?.set_item(key, value).map_err(storage_error)
    }
}

/// Published layout documents over `window.fetch`.
pub(crate) struct BrowserFetcher;

async fn fetch_text(path: &str) -> Result<Option<String>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Ok(None);
    }
    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string())
}

impl LayoutFetcher for BrowserFetcher {
    async fn fetch_text(&self, path: &str) -> Option<String> {
        match fetch_text(path).await {
            Ok(text) => text,
            Err(err) => {
                log::debug!("fetch {path} failed: {err:?}");
                None
            }
        }
    }
}

pub(crate) fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let navigator = window.navigator();
    let clipboard = Reflect::get(&navigator, &"clipboard".into())?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("clipboard unavailable"));
    }
    let write_text = Reflect::get(&clipboard, &"writeText".into())?.dyn_into::<Function>()?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()?;
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = JsFuture::from(promise).await {
            log::warn!("clipboard write rejected: {err:?}");
        }
    });
    Ok(())
}

fn media_matches(window: &Window, query: &str) -> Option<bool> {
    let match_media = Reflect::get(window, &"matchMedia".into()).ok()?;
    let match_media = match_media.dyn_into::<Function>().ok()?;
    let list = match_media.call1(window, &query.into()).ok()?;
    Reflect::get(&list, &"matches".into()).ok()?.as_bool()
}

pub(crate) fn current_orientation() -> Orientation {
    let Some(window) = web_sys::window() else {
        return Orientation::default();
    };
    match media_matches(&window, PORTRAIT_QUERY) {
        Some(true) => Orientation::Portrait,
        Some(false) => Orientation::Landscape,
        None => {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(0.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(0.0);
            Orientation::from_viewport(width, height)
        }
    }
}

pub(crate) fn now_ms() -> f64 {
    js_sys::Date::now()
}

//! The sticker board: items, their positions for the active orientation,
//! the drag controller, and persistence, owned in one place.
//!
//! Loading is split in two so callers can perform the fetch without
//! holding the board: [`StickerBoard::initial_load`] or
//! [`StickerBoard::observe_orientation`] hand out a [`LoadRequest`], and
//! [`StickerBoard::complete_load`] applies whatever the fetch returned.
//! Commits and resets made while a load is in flight are held back and
//! applied over the loaded map, so they never overwrite the cached
//! document before it has been read.

use std::collections::{HashMap, HashSet};

use crate::config::BoardConfig;
use crate::content_set::ContentSetId;
use crate::drag::{DragController, DragEvent, DragOutcome, DragRelease};
use crate::gateway::{LayoutCache, LayoutFetcher, LayoutGateway, LayoutOrigin};
use crate::model::{Item, LayoutMap, Orientation, Position};
use crate::orientation::{LoadTicket, OrientationSwitch};
use crate::scatter::default_position;
use crate::shortcut::{match_shortcut, BoardShortcut, KeyPress};
use crate::store::{resolve_layout, LayoutSnapshot, PositionStore, SubscriptionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    /// Published document to fetch.
    pub path: String,
}

/// Session changes waiting for the in-flight load.
#[derive(Debug, Default)]
struct PendingChanges {
    reset: bool,
    commits: LayoutMap,
}

impl PendingChanges {
    fn is_empty(&self) -> bool {
        !self.reset && self.commits.is_empty()
    }
}

pub struct StickerBoard<C> {
    items: Vec<Item>,
    index_of: HashMap<String, usize>,
    config: BoardConfig,
    store: PositionStore,
    drag: DragController,
    gateway: LayoutGateway<C>,
    switch: OrientationSwitch,
    edit_mode: bool,
    last_origin: Option<LayoutOrigin>,
    pending: Option<PendingChanges>,
}

impl<C: LayoutCache> StickerBoard<C> {
    pub fn new(
        content_set: ContentSetId,
        mut items: Vec<Item>,
        cache: C,
        config: BoardConfig,
        orientation: Orientation,
    ) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        items.retain(|item| {
            let fresh = seen.insert(item.id.clone());
            if !fresh {
                log::warn!("duplicate item id {} ignored", item.id);
            }
            fresh
        });
        let index_of = items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id.clone(), index))
            .collect();
        let drag = DragController::new(&config);
        let gateway = LayoutGateway::new(content_set, cache, &config);
        Self {
            items,
            index_of,
            store: PositionStore::new(orientation),
            drag,
            gateway,
            switch: OrientationSwitch::new(orientation),
            edit_mode: false,
            last_origin: None,
            pending: None,
            config,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn content_set(&self) -> &ContentSetId {
        self.gateway.content_set()
    }

    pub fn orientation(&self) -> Orientation {
        self.switch.active()
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Where the current overrides came from; `None` until a load lands.
    pub fn last_origin(&self) -> Option<LayoutOrigin> {
        self.last_origin
    }

    /// Whether a load handed out by this board has not completed yet.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn store(&self) -> &PositionStore {
        &self.store
    }

    pub fn gateway(&self) -> &LayoutGateway<C> {
        &self.gateway
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&LayoutSnapshot) + 'static,
    {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn initial_load(&mut self) -> LoadRequest {
        let ticket = self.switch.current_ticket();
        self.pending.get_or_insert_with(PendingChanges::default);
        LoadRequest {
            path: self.gateway.document_path(ticket.orientation),
            ticket,
        }
    }

    /// Switches the active key. Rendered positions fall back to defaults
    /// until the returned load completes.
    pub fn observe_orientation(&mut self, orientation: Orientation) -> Option<LoadRequest> {
        let ticket = self.switch.observe(orientation)?;
        if self.drag.is_dragging() {
            self.drag.handle(DragEvent::Cancel);
        }
        if self.pending.as_ref().is_some_and(|pending| !pending.is_empty()) {
            log::debug!(
                "layout {}: unsaved changes for the previous orientation dropped",
                self.content_set()
            );
        }
        self.pending = Some(PendingChanges::default());
        self.store.clear(orientation);
        self.last_origin = None;
        Some(LoadRequest {
            path: self.gateway.document_path(orientation),
            ticket,
        })
    }

    /// Applies a finished fetch. Returns `false` when the request was
    /// superseded by a later orientation change.
    pub fn complete_load(&mut self, request: &LoadRequest, published: Option<&str>) -> bool {
        if !self.switch.is_current(&request.ticket) {
            log::debug!(
                "layout {}: stale load for {} discarded",
                self.content_set(),
                request.ticket.orientation
            );
            return false;
        }
        let loaded = self.gateway.resolve(request.ticket.orientation, published);
        self.last_origin = Some(loaded.origin);
        let mut overrides = loaded.overrides;
        let pending = self.pending.take().unwrap_or_default();
        if pending.reset {
            overrides.clear();
        }
        let changed = !pending.is_empty();
        overrides.extend(pending.commits);
        self.store.replace(loaded.orientation, overrides);
        if changed {
            self.gateway.save(loaded.orientation, self.store.overrides());
        }
        true
    }

    pub async fn load_with<F>(&mut self, request: &LoadRequest, fetcher: &F) -> bool
    where
        F: LayoutFetcher,
    {
        let published = fetcher.fetch_text(&request.path).await;
        self.complete_load(request, published.as_deref())
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        let index = *self.index_of.get(id)?;
        Some(
            self.store
                .get(id)
                .unwrap_or_else(|| default_position(index, self.items.len())),
        )
    }

    /// Effective position of every item.
    pub fn positions(&self) -> LayoutMap {
        resolve_layout(&self.items, self.store.overrides())
    }

    pub fn z_index(&self, id: &str) -> u32 {
        self.drag.z_index(id)
    }

    pub fn live_offset(&self) -> Option<(&str, f32, f32)> {
        self.drag.live_offset()
    }

    pub fn begin_drag(&mut self, id: &str) -> DragOutcome {
        let Some(origin) = self.position(id) else {
            return DragOutcome::Ignored;
        };
        self.drag.handle(DragEvent::Start {
            item: id.to_string(),
            origin,
        })
    }

    pub fn drag_by(&mut self, dx: f32, dy: f32) -> DragOutcome {
        self.drag.handle(DragEvent::Move { dx, dy })
    }

    /// Ends the gesture; a committed position is stored and persisted
    /// before this returns, or once the in-flight load completes.
    pub fn end_drag(&mut self, release: DragRelease) -> DragOutcome {
        let outcome = self.drag.handle(DragEvent::End(release));
        if let DragOutcome::Committed { item, position } = &outcome {
            let orientation = self.store.orientation();
            let overrides = self.store.set(item, *position);
            match self.pending.as_mut() {
                Some(pending) => {
                    pending.commits.insert(item.clone(), *position);
                }
                None => self.gateway.save(orientation, overrides),
            }
        }
        outcome
    }

    pub fn cancel_drag(&mut self) -> DragOutcome {
        self.drag.handle(DragEvent::Cancel)
    }

    pub fn suppress_click(&mut self, now_ms: f64) -> bool {
        self.drag.suppress_click(now_ms)
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
        self.drag.set_y_max(self.config.y_max_for(enabled));
        log::info!("edit mode {}", if enabled { "on" } else { "off" });
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.set_edit_mode(!self.edit_mode);
        self.edit_mode
    }

    pub fn handle_key(&mut self, press: &KeyPress) -> Option<BoardShortcut> {
        let shortcut = match_shortcut(press)?;
        match shortcut {
            BoardShortcut::ToggleEditMode => {
                self.toggle_edit_mode();
            }
        }
        Some(shortcut)
    }

    /// Drops every override for the active orientation.
    pub fn reset(&mut self) {
        let orientation = self.store.orientation();
        self.store.reset();
        match self.pending.as_mut() {
            Some(pending) => {
                pending.reset = true;
                pending.commits.clear();
            }
            None => self.gateway.save(orientation, self.store.overrides()),
        }
    }

    pub fn export(&self) -> String {
        self.gateway.export(&self.items, self.store.overrides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryCache;
    use crate::model::{BoardGeometry, ItemExtent};

    fn board(orientation: Orientation) -> StickerBoard<MemoryCache> {
        StickerBoard::new(
            ContentSetId::parse("trip").expect("valid"),
            vec![Item::new("a"), Item::new("b"), Item::new("c")],
            MemoryCache::new(),
            BoardConfig::default(),
            orientation,
        )
    }

    fn release() -> DragRelease {
        DragRelease {
            geometry: Some(BoardGeometry::new(1000.0, 1000.0)),
            extent: Some(ItemExtent::new(100.0, 100.0)),
            now_ms: 0.0,
        }
    }

    #[test]
    fn duplicate_ids_keep_first_item() {
        let board = StickerBoard::new(
            ContentSetId::parse("trip").expect("valid"),
            vec![
                Item::new("a").with_text("first"),
                Item::new("b"),
                Item::new("a").with_text("second"),
            ],
            MemoryCache::new(),
            BoardConfig::default(),
            Orientation::Landscape,
        );
        assert_eq!(board.items().len(), 2);
        assert_eq!(board.items()[0].text.as_deref(), Some("first"));
        let positions = board.positions();
        assert_eq!(positions.len(), 2);
        assert_eq!(board.position("a"), Some(positions["a"]));
        assert_eq!(board.position("b"), Some(positions["b"]));
    }

    #[test]
    fn unknown_item_cannot_be_dragged() {
        let mut board = board(Orientation::Landscape);
        assert_eq!(board.begin_drag("zzz"), DragOutcome::Ignored);
    }

    #[test]
    fn edit_mode_relaxes_vertical_clamp() {
        let mut board = board(Orientation::Landscape);
        board.handle_key(&KeyPress::new("E").ctrl().shift());
        assert!(board.edit_mode());
        board.begin_drag("a");
        board.drag_by(0.0, 5000.0);
        let DragOutcome::Committed { position, .. } = board.end_drag(release()) else {
            panic!("expected commit");
        };
        assert_eq!(position.y, 195.0);
    }

    #[test]
    fn reset_persists_empty_map() {
        let mut board = board(Orientation::Portrait);
        board.begin_drag("b");
        board.drag_by(100.0, 0.0);
        board.end_drag(release());
        assert!(board.store().get("b").is_some());
        board.reset();
        assert!(board.store().overrides().is_empty());
        assert_eq!(
            board.gateway().cache().get("stickerboard.layout.trip.portrait"),
            Some("{}")
        );
        assert_eq!(board.position("b"), Some(default_position(1, 3)));
    }

    #[test]
    fn orientation_change_cancels_drag() {
        let mut board = board(Orientation::Landscape);
        board.begin_drag("a");
        board.drag_by(50.0, 0.0);
        assert!(board.observe_orientation(Orientation::Portrait).is_some());
        assert_eq!(board.live_offset(), None);
        assert_eq!(board.end_drag(release()), DragOutcome::Ignored);
    }
}

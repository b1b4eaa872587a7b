pub mod board;
pub mod bounds;
pub mod codec;
pub mod config;
pub mod content;
pub mod content_set;
pub mod drag;
pub mod error;
pub mod gateway;
pub mod model;
pub mod orientation;
pub mod scatter;
pub mod session;
pub mod shortcut;
pub mod store;

pub use board::{LoadRequest, StickerBoard};
pub use bounds::ClampBounds;
pub use codec::{decode_layout, encode_layout, encode_layout_pretty};
pub use config::BoardConfig;
pub use content::{items_from_listing, ListingEntry};
pub use content_set::{ContentSetId, ContentSetIdError};
pub use drag::{DragController, DragEvent, DragOutcome, DragPhase, DragRelease};
pub use error::LayoutError;
pub use gateway::{
    LayoutCache, LayoutFetcher, LayoutGateway, LayoutOrigin, LoadedLayout, MemoryCache,
    StaticFetcher,
};
pub use model::{BoardGeometry, Item, ItemExtent, LayoutMap, Orientation, Position};
pub use orientation::{LoadTicket, OrientationSwitch};
pub use scatter::{default_layout, default_position, seeded_rand, DEFAULT_BOUNDS};
pub use session::HeroSelection;
pub use shortcut::{match_shortcut, BoardShortcut, KeyPress};
pub use store::{resolve_layout, LayoutSnapshot, PositionStore, SubscriptionId};

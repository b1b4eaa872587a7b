use stickerboard_core::codec::decode_layout;
use stickerboard_core::scatter::DEFAULT_BOUNDS;
use stickerboard_core::{
    default_position, BoardConfig, BoardGeometry, ClampBounds, ContentSetId, DragOutcome,
    DragRelease, Item, ItemExtent, LayoutOrigin, MemoryCache, Orientation, Position,
    StaticFetcher, StickerBoard,
};

const CACHE_LANDSCAPE: &str = "stickerboard.layout.folder-a.landscape";
const CACHE_PORTRAIT: &str = "stickerboard.layout.folder-a.portrait";

fn items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|index| Item::new(((b'a' + index as u8) as char).to_string()))
        .collect()
}

fn build_board(count: usize, cache: MemoryCache) -> StickerBoard<MemoryCache> {
    StickerBoard::new(
        ContentSetId::parse("folder-a").expect("valid"),
        items(count),
        cache,
        BoardConfig::default(),
        Orientation::Landscape,
    )
}

fn geometry() -> BoardGeometry {
    BoardGeometry::new(1000.0, 1000.0)
}

fn release() -> DragRelease {
    DragRelease {
        geometry: Some(geometry()),
        extent: Some(ItemExtent::new(100.0, 100.0)),
        now_ms: 0.0,
    }
}

fn assert_close(actual: f32, expected: f32) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= 1e-4,
        "expected {:.6} got {:.6} (delta {:.6})",
        expected,
        actual,
        delta
    );
}

fn drag(board: &mut StickerBoard<MemoryCache>, id: &str, dx: f32, dy: f32) -> DragOutcome {
    board.begin_drag(id);
    board.drag_by(dx, dy);
    board.end_drag(release())
}

#[test]
fn empty_sources_yield_defaults_in_bounds() {
    let mut board = build_board(3, MemoryCache::new());
    let request = board.initial_load();
    assert!(board.complete_load(&request, None));
    assert_eq!(board.last_origin(), Some(LayoutOrigin::Defaults));
    let positions = board.positions();
    assert_eq!(positions.len(), 3);
    for (index, item) in board.items().iter().enumerate() {
        let position = positions[&item.id];
        assert_eq!(position, default_position(index, 3));
        assert!(DEFAULT_BOUNDS.contains(&position), "{position:?}");
    }
}

#[test]
fn dragging_one_item_caches_exactly_that_item() {
    let mut board = build_board(3, MemoryCache::new());
    let request = board.initial_load();
    board.complete_load(&request, None);
    let before = board.position("a").expect("known item");

    let outcome = drag(&mut board, "a", 400.0, 100.0);
    assert!(matches!(outcome, DragOutcome::Committed { .. }));

    let bounds = ClampBounds::new(5.0, 5.0, 100.0);
    let expected = bounds.clamp(Position::new(before.x + 40.0, before.y + 10.0, before.rotation));
    let stored = board.store().get("a").expect("override");
    assert_close(stored.x, expected.x);
    assert_close(stored.y, expected.y);
    assert_eq!(stored.rotation, before.rotation);

    let raw = board.gateway().cache().get(CACHE_LANDSCAPE).expect("cached");
    let cached = decode_layout(raw).expect("valid document");
    assert_eq!(cached.keys().collect::<Vec<_>>(), vec!["a"]);
    assert!(board.gateway().cache().get(CACHE_PORTRAIT).is_none());
}

#[test]
fn tap_below_threshold_never_writes() {
    for travel in [0.0f32, 1.0, 2.5, 4.99] {
        let mut board = build_board(2, MemoryCache::new());
        board.begin_drag("b");
        board.drag_by(travel, 0.0);
        assert_eq!(
            board.end_drag(release()),
            DragOutcome::Tap { item: "b".to_string() }
        );
        assert!(board.store().overrides().is_empty());
        assert!(board.gateway().cache().is_empty());
    }
}

#[test]
fn drag_at_or_above_threshold_always_writes() {
    for (dx, dy) in [(5.0f32, 0.0f32), (2.5, -2.5), (-3.0, 3.0), (120.0, 0.0)] {
        let mut board = build_board(2, MemoryCache::new());
        board.begin_drag("b");
        board.drag_by(dx, dy);
        let outcome = board.end_drag(release());
        assert!(
            matches!(outcome, DragOutcome::Committed { .. }),
            "({dx}, {dy}) -> {outcome:?}"
        );
        assert!(board.store().get("b").is_some());
        assert!(board.gateway().cache().get(CACHE_LANDSCAPE).is_some());
    }
}

#[test]
fn commits_stay_inside_bounds_for_any_offset() {
    let offsets = [-1.0e6f32, -2500.0, -400.0, 0.0, 6.0, 333.0, 4800.0, 1.0e6];
    for dx in offsets {
        for dy in offsets {
            let mut board = build_board(4, MemoryCache::new());
            board.begin_drag("c");
            board.drag_by(dx, dy);
            board.drag_by(3.0, 3.0);
            let DragOutcome::Committed { position, .. } = board.end_drag(release()) else {
                panic!("expected commit for ({dx}, {dy})");
            };
            assert!(position.x >= 5.0 && position.x <= 95.0, "{position:?}");
            assert!(position.y >= 5.0 && position.y <= 95.0, "{position:?}");
        }
    }
}

#[test]
fn unmeasured_geometry_keeps_previous_position() {
    let mut board = build_board(2, MemoryCache::new());
    let before = board.position("a");
    board.begin_drag("a");
    board.drag_by(200.0, 200.0);
    let outcome = board.end_drag(DragRelease {
        geometry: Some(BoardGeometry::default()),
        extent: Some(ItemExtent::new(100.0, 100.0)),
        now_ms: 0.0,
    });
    assert_eq!(outcome, DragOutcome::Dropped { item: "a".to_string() });
    assert_eq!(board.position("a"), before);
    assert!(board.gateway().cache().is_empty());
}

#[test]
fn export_then_publish_reproduces_layout() {
    let mut board = build_board(5, MemoryCache::new());
    let request = board.initial_load();
    board.complete_load(&request, None);
    drag(&mut board, "b", 120.0, -80.0);
    drag(&mut board, "e", -300.0, 45.0);
    let exported = board.export();
    let rendered = board.positions();

    let fetcher = StaticFetcher::new().with_document(request.path.clone(), exported);
    let mut reloaded = build_board(5, MemoryCache::new());
    let request = reloaded.initial_load();
    assert!(pollster::block_on(reloaded.load_with(&request, &fetcher)));
    assert_eq!(reloaded.last_origin(), Some(LayoutOrigin::Published));
    assert_eq!(reloaded.positions(), rendered);
    assert_eq!(reloaded.store().overrides().len(), 5);
}

#[test]
fn orientation_round_trip_restores_layout() {
    let mut cache = MemoryCache::new();
    cache.insert(CACHE_LANDSCAPE, r#"{"a": {"x": 30, "y": 40, "rotation": 2}}"#);
    cache.insert(CACHE_PORTRAIT, r#"{"b": {"x": 70, "y": 20, "rotation": -5}}"#);
    let mut board = build_board(3, cache);
    let request = board.initial_load();
    board.complete_load(&request, None);
    let landscape = board.positions();
    assert_eq!(landscape["a"], Position::new(30.0, 40.0, 2.0));

    let to_portrait = board.observe_orientation(Orientation::Portrait).expect("changed");
    assert!(board.store().overrides().is_empty());
    assert!(board.complete_load(&to_portrait, None));
    assert_eq!(board.positions()["b"], Position::new(70.0, 20.0, -5.0));

    let back = board.observe_orientation(Orientation::Landscape).expect("changed");
    assert!(board.complete_load(&back, None));
    assert_eq!(board.positions(), landscape);
}

#[test]
fn stale_load_is_discarded() {
    let mut board = build_board(2, MemoryCache::new());
    let to_portrait = board.observe_orientation(Orientation::Portrait).expect("changed");
    let back = board.observe_orientation(Orientation::Landscape).expect("changed");
    let published = r#"{"a": {"x": 11, "y": 12, "rotation": 0}}"#;
    assert!(!board.complete_load(&to_portrait, Some(published)));
    assert!(board.store().overrides().is_empty());
    assert!(board.complete_load(&back, None));
    assert_eq!(board.orientation(), Orientation::Landscape);
}

#[test]
fn storage_failure_keeps_session_positions() {
    let mut board = build_board(2, MemoryCache::unavailable());
    let request = board.initial_load();
    board.complete_load(&request, None);
    let outcome = drag(&mut board, "a", 100.0, 0.0);
    let DragOutcome::Committed { position, .. } = outcome else {
        panic!("expected commit");
    };
    assert_eq!(board.position("a"), Some(position));
}

#[test]
fn subscribers_see_commits() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let revisions = Rc::new(RefCell::new(Vec::new()));
    let mut board = build_board(2, MemoryCache::new());
    {
        let revisions = Rc::clone(&revisions);
        board.subscribe(move |snapshot| revisions.borrow_mut().push(snapshot.overrides.len()));
    }
    let request = board.initial_load();
    board.complete_load(&request, None);
    drag(&mut board, "a", 50.0, 0.0);
    drag(&mut board, "b", 50.0, 0.0);
    assert_eq!(*revisions.borrow(), vec![0, 1, 2]);
}

#[test]
fn commit_during_load_keeps_cached_layout() {
    let mut cache = MemoryCache::new();
    cache.insert(
        CACHE_LANDSCAPE,
        r#"{"a": {"x": 30, "y": 40, "rotation": 0}, "b": {"x": 60, "y": 70, "rotation": 1}}"#,
    );
    let mut board = build_board(3, cache);
    let request = board.initial_load();
    assert!(board.is_loading());

    let DragOutcome::Committed { position, .. } = drag(&mut board, "c", 50.0, 0.0) else {
        panic!("expected commit");
    };
    let untouched = board.gateway().cache().get(CACHE_LANDSCAPE).expect("seeded");
    assert!(untouched.contains("\"a\""));

    assert!(board.complete_load(&request, None));
    assert!(!board.is_loading());
    assert_eq!(board.position("a"), Some(Position::new(30.0, 40.0, 0.0)));
    assert_eq!(board.position("b"), Some(Position::new(60.0, 70.0, 1.0)));
    assert_eq!(board.position("c"), Some(position));

    let saved = board.gateway().cache().get(CACHE_LANDSCAPE).expect("saved");
    let saved = decode_layout(saved).expect("valid");
    assert_eq!(saved.len(), 3);
    assert_eq!(saved["c"], position);
}

#[test]
fn reset_during_load_discards_loaded_overrides() {
    let mut cache = MemoryCache::new();
    cache.insert(CACHE_LANDSCAPE, r#"{"a": {"x": 30, "y": 40, "rotation": 0}}"#);
    let mut board = build_board(2, cache);
    let request = board.initial_load();
    board.reset();
    assert!(board.complete_load(&request, None));
    assert!(board.store().overrides().is_empty());
    assert_eq!(board.gateway().cache().get(CACHE_LANDSCAPE), Some("{}"));
}

use stickerboard_core::scatter::{base_y, DEFAULT_BOUNDS, Y_MARGIN, Y_SPREAD};
use stickerboard_core::{default_layout, default_position, seeded_rand, Item};

#[test]
fn defaults_are_reproducible() {
    let items: Vec<Item> = (0..12).map(|index| Item::new(format!("post-{index}"))).collect();
    let first = default_layout(&items);
    let second = default_layout(&items);
    assert_eq!(first, second);
    assert_eq!(first.len(), 12);
    for (index, item) in items.iter().enumerate() {
        assert_eq!(first[&item.id], default_position(index, items.len()));
    }
}

#[test]
fn baseline_is_monotonic_for_every_count() {
    for count in 2..40usize {
        let mut last = f32::MIN;
        for index in 0..count {
            let value = base_y(index, count);
            assert!(value >= last, "count {count} index {index}");
            assert!(value >= Y_MARGIN && value <= Y_MARGIN + Y_SPREAD);
            last = value;
        }
    }
}

#[test]
fn generated_positions_respect_bounds() {
    for count in 1..40usize {
        for index in 0..count {
            let position = default_position(index, count);
            assert!(DEFAULT_BOUNDS.contains(&position), "{index}/{count}: {position:?}");
        }
    }
}

#[test]
fn seeded_rand_matches_formula() {
    let seed: f64 = 12.9898 * 3.0 + 1.0;
    let raw = seed.sin() * 10_000.0;
    assert_eq!(seeded_rand(seed), raw - raw.floor());
}

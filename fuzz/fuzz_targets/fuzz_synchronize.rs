#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use responsive_grid::{CompactType, GridItem, live_items, synchronize};

#[derive(Debug, Arbitrary)]
struct Cell {
    x: u8,
    y: u8,
    w: u8,
    h: u8,
    pinned: bool,
}

#[derive(Debug, Arbitrary)]
struct Input {
    cols: u8,
    mode: u8,
    cells: Vec<Cell>,
    live: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Derive grid width (1..24) and compaction mode from the header bytes.
    let cols = u32::from(input.cols % 24) + 1;
    let compact_type = match input.mode % 3 {
        0 => CompactType::Vertical,
        1 => CompactType::Horizontal,
        _ => CompactType::None,
    };
    let layout: Vec<GridItem> = input
        .cells
        .iter()
        .take(32)
        .enumerate()
        .map(|(i, c)| {
            let item = GridItem::new(
                format!("i{i}"),
                u32::from(c.x % 32),
                u32::from(c.y % 32),
                u32::from(c.w % 8) + 1,
                u32::from(c.h % 8) + 1,
            );
            if c.pinned { item.pinned() } else { item }
        })
        .collect();
    let mut ids: Vec<String> = input
        .live
        .iter()
        .take(40)
        .map(|i| format!("i{}", i % 48))
        .collect();
    ids.sort();
    ids.dedup();
    let live = live_items(ids.clone());

    let once = synchronize(&layout, &live, cols, compact_type);
    let twice = synchronize(&once, &live, cols, compact_type);
    assert_eq!(once, twice, "synchronize not idempotent");

    let mut got: Vec<String> = once.iter().map(|item| item.id.clone()).collect();
    got.sort();
    assert_eq!(got, ids, "live id set not honored");

    for (i, a) in once.iter().enumerate() {
        assert!(a.right() <= cols, "item outside grid: {a:?}");
        if compact_type == CompactType::None {
            continue;
        }
        for b in &once[i + 1..] {
            if !(a.is_static && b.is_static) {
                assert!(!a.collides(b), "overlap: {a:?} {b:?}");
            }
        }
    }
});

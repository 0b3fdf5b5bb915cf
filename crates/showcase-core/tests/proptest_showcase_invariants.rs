//! Property-based invariant tests for the showcase state machine.
//!
//! 1. `active < len` after any sequence of commands and scroll samples.
//! 2. `next` wraps from the last index to 0; `previous` wraps from 0.
//! 3. `next` then `previous` restores the active index.
//! 4. Mapping identical metrics twice changes nothing the second time.
//! 5. While engaged, a larger `section_top` never yields a larger index.

use proptest::prelude::*;
use showcase_core::{
    Catalog, FeatureRecord, FixedGeometry, ScrollEventSource, ScrollMapping, ScrollMetrics,
    ShowcaseController, map_scroll,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn catalog(len: usize) -> Catalog {
    let records = (0..len)
        .map(|i| FeatureRecord::new(i as u32 + 1, format!("F{i}"), "", ""))
        .collect();
    Catalog::new(records).unwrap()
}

fn mounted(len: usize) -> (ScrollEventSource, ShowcaseController<FixedGeometry>) {
    let source = ScrollEventSource::new();
    let mut controller = ShowcaseController::new(catalog(len), FixedGeometry(None));
    controller.mount(&source).unwrap();
    (source, controller)
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    Jump(usize),
    Scroll { top: f64, height: f64, viewport: f64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Previous),
        (0usize..20).prop_map(Op::Jump),
        (-20_000.0f64..2_000.0, 0.0f64..20_000.0, -500.0f64..3_000.0).prop_map(
            |(top, height, viewport)| Op::Scroll {
                top,
                height,
                viewport
            }
        ),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Active index stays in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn active_always_in_range(len in 1usize..12, ops in prop::collection::vec(op_strategy(), 0..64)) {
        let (_source, mut controller) = mounted(len);
        for op in ops {
            match op {
                Op::Next => { controller.next(); }
                Op::Previous => { controller.previous(); }
                Op::Jump(i) => { controller.jump_to(i); }
                Op::Scroll { top, height, viewport } => {
                    controller.apply_metrics(&ScrollMetrics::new(top, height, viewport));
                }
            }
            prop_assert!(controller.active() < len, "active {} >= len {}", controller.active(), len);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Wrap at both ends
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_and_previous_wrap(len in 1usize..12) {
        let (_source, mut controller) = mounted(len);
        controller.jump_to(len - 1);
        controller.next();
        prop_assert_eq!(controller.active(), 0);
        controller.previous();
        prop_assert_eq!(controller.active(), len - 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. next/previous are inverses
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_then_previous_restores(len in 1usize..12, start in 0usize..12) {
        let (_source, mut controller) = mounted(len);
        let start = start % len;
        controller.jump_to(start);
        controller.next();
        controller.previous();
        prop_assert_eq!(controller.active(), start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Mapping is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_metrics_are_idempotent(
        len in 1usize..12,
        top in -20_000.0f64..2_000.0,
        height in 0.0f64..20_000.0,
        viewport in 1.0f64..3_000.0,
    ) {
        let (_source, mut controller) = mounted(len);
        let metrics = ScrollMetrics::new(top, height, viewport);
        controller.apply_metrics(&metrics);
        let active = controller.active();
        let generation = controller.generation();

        let second = controller.apply_metrics(&metrics).unwrap();
        prop_assert!(!second.changed());
        prop_assert_eq!(controller.active(), active);
        prop_assert_eq!(controller.generation(), generation);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Monotonic in section_top while engaged
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_monotonic_in_section_top(
        len in 1usize..12,
        a in -20_000.0f64..0.0,
        b in -20_000.0f64..0.0,
        height in 1.0f64..20_000.0,
        viewport in 1.0f64..3_000.0,
    ) {
        let (higher, lower) = if a >= b { (a, b) } else { (b, a) };
        let up = map_scroll(&ScrollMetrics::new(higher, height, viewport), len);
        let down = map_scroll(&ScrollMetrics::new(lower, height, viewport), len);
        if let (ScrollMapping::Index(i_up), ScrollMapping::Index(i_down)) = (up, down) {
            prop_assert!(
                i_up <= i_down,
                "top {} -> {}, top {} -> {}", higher, i_up, lower, i_down
            );
        }
    }
}

proptest! {
    #[test]
    fn sane_geometry_never_rejects(
        len in 1usize..12,
        top in -20_000.0f64..2_000.0,
        height in 0.0f64..20_000.0,
        viewport in 1.0f64..3_000.0,
    ) {
        let mapping = map_scroll(&ScrollMetrics::new(top, height, viewport), len);
        prop_assert!(!matches!(mapping, ScrollMapping::Rejected(_)));
    }
}

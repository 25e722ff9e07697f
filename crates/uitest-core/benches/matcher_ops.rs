//! Matcher and Locator Benchmarks
//!
//! Benchmarks for matcher evaluation, locator resolution over view trees and
//! toolbar menu classification.
//!
//! Run with: `cargo bench --bench matcher_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uitest_core::prelude::*;
use uitest_core::ToolbarMenu;

/// A screen holding one list with `rows` rows of two labels each
fn list_screen(rows: usize) -> ViewTree {
    let items = (0..rows).map(|i| {
        View::group([
            View::text_view(format!("Item {i}")).with_id("title"),
            View::text_view(format!("{i}.00")).with_id("price"),
        ])
    });
    ViewTree::from_root(View::group([
        View::toolbar(ToolbarState::titled("Catalog")),
        View::new(ViewKind::RecyclerView)
            .with_id("list")
            .with_children(items),
    ]))
}

fn bench_text_matchers(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_matchers");

    let matchers: Vec<(&str, TextMatcher)> = vec![
        ("equal_to", equal_to("Overflow menu item")),
        ("ends_with", ends_with("menu item")),
        ("regex", matches_regex(r"^Overflow \w+ item$").unwrap()),
        (
            "any_of",
            any_of([equal_to("Delete"), starts_with("Overflow"), contains_string("xyz")]),
        ),
    ];

    for (name, matcher) in matchers {
        group.bench_with_input(BenchmarkId::from_parameter(name), &matcher, |bench, m| {
            bench.iter(|| black_box(m.matches(black_box("Overflow menu item"))));
        });
    }

    group.finish();
}

fn bench_locator_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("locator_resolution");

    for rows in [10, 100, 1000] {
        let tree = list_screen(rows);
        let target = format!("Item {}", rows - 1);
        let locator = Locator::new(with_text(target.as_str()))
            .within(Locator::new(with_id("list")));
        group.bench_with_input(BenchmarkId::new("last_row", rows), &tree, |bench, tree| {
            bench.iter(|| black_box(locator.find_unique(tree).unwrap()));
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for items in [4, 32] {
        let mut state = ToolbarState::titled("Bench");
        for i in 0..items {
            state = if i % 2 == 0 {
                state.with_action(format!("action {i}"))
            } else {
                state.with_overflow_item(format!("overflow {i}"))
            };
        }
        let menu = ToolbarMenu::from_state(&state);
        let title = equal_to(format!("overflow {}", items - 1));
        group.bench_with_input(BenchmarkId::from_parameter(items), &menu, |bench, menu| {
            bench.iter(|| black_box(classify(menu, title.as_ref())));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_text_matchers,
    bench_locator_resolution,
    bench_classify
);
criterion_main!(benches);

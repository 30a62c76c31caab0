use zoombrot_core::{Fractal, FractalParams, Intent, Mandelbrot, Navigator, ViewChange, Viewport};
use zoombrot_render::{ColorTable, GridEngine, IterationGrid, Reconciled, ViewportCache};

fn full_recompute(mandelbrot: &Mandelbrot, viewport: &Viewport) -> IterationGrid {
    let mut grid = IterationGrid::new(viewport.width, viewport.height);
    GridEngine::new(1).compute_full(mandelbrot, viewport, &mut grid);
    grid
}

/// Drive a cache through `script`, reconciling after each tick, and check
/// every intermediate grid against a from-scratch computation.
fn check_script(viewport: Viewport, nav: Navigator, script: &[&[Intent]]) -> Vec<Reconciled> {
    let mandelbrot = Mandelbrot::new(FractalParams::new(120).unwrap());
    let mut viewport = viewport;
    let mut cache = ViewportCache::new(viewport.width, viewport.height, GridEngine::new(4));
    let mut outcomes = vec![cache.reconcile(&mandelbrot, &viewport)];

    for (tick, intents) in script.iter().enumerate() {
        for &intent in intents.iter() {
            let change = nav.apply(&mut viewport, intent);
            cache.notify(change);
        }
        outcomes.push(cache.reconcile(&mandelbrot, &viewport));
        assert_eq!(
            cache.grid(),
            &full_recompute(&mandelbrot, &viewport),
            "grid diverged after tick {tick} ({intents:?})"
        );
    }
    outcomes
}

#[test]
fn horizontal_pans_only_touch_edges() {
    use Intent::*;
    let viewport = Viewport::centered(
        zoombrot_core::Complex::new(-0.7453, 0.1127),
        0.0123,
        96,
        54,
    )
    .unwrap();
    let outcomes = check_script(
        viewport,
        Navigator::default(),
        &[
            &[PanLeft],
            &[PanLeft],
            &[PanRight],
            &[PanRight, PanRight],
            &[PanLeft, PanRight],
        ],
    );

    assert_eq!(outcomes[0], Reconciled::Full);
    for outcome in &outcomes[1..5] {
        assert!(matches!(outcome, Reconciled::Edge { .. }), "{outcome:?}");
    }
    assert_eq!(outcomes[5], Reconciled::Unchanged);
}

#[test]
fn mixed_navigation_matches_full_recompute() {
    use Intent::*;
    let viewport = Viewport::default_for(64, 40).unwrap();
    check_script(
        viewport,
        Navigator::new(0.15, 0.1).unwrap(),
        &[
            &[PanRight],
            &[ZoomIn],
            &[PanLeft, PanLeft],
            &[PanUp],
            &[PanRight],
            &[ZoomIn, PanLeft],
            &[PanDown, PanRight],
            &[ZoomOut],
            &[],
            &[PanLeft],
        ],
    );
}

#[test]
fn large_pans_fall_back_to_full_recompute() {
    use Intent::*;
    // Half-unit pixels and a one-unit pan step: two columns per pan, so four
    // pans scroll every column of the 8-wide grid off.
    let viewport = Viewport::new(-2.0, 2.0, -2.0, 2.0, 8, 8).unwrap();
    let nav = Navigator::new(0.5, 0.05).unwrap();
    assert_eq!(nav.pan_columns(&viewport), 2);

    let outcomes = check_script(
        viewport,
        nav,
        &[&[PanLeft], &[PanLeft, PanLeft, PanLeft], &[PanRight]],
    );
    assert_eq!(outcomes[1], Reconciled::Edge { columns: 2 });
    assert_eq!(outcomes[2], Reconciled::Full);
    assert_eq!(outcomes[3], Reconciled::Edge { columns: 2 });
}

#[test]
fn manual_shift_notifications_match() {
    let mandelbrot = Mandelbrot::new(FractalParams::new(60).unwrap());
    let mut viewport = Viewport::new(-1.9, 0.7, -0.65, 0.65, 40, 20).unwrap();
    let mut cache = ViewportCache::new(40, 20, GridEngine::new(3));
    cache.reconcile(&mandelbrot, &viewport);

    for columns in [3i64, -7, 11, -1, 39, -38] {
        viewport.shift_columns(-columns);
        cache.notify(ViewChange::Columns(columns));
        cache.reconcile(&mandelbrot, &viewport);
        assert_eq!(cache.grid(), &full_recompute(&mandelbrot, &viewport), "shift {columns}");
    }
}

#[test]
fn colorized_frame_shows_the_set() {
    let mandelbrot = Mandelbrot::default();
    let viewport = Viewport::default_for(160, 90).unwrap();
    let mut cache = ViewportCache::new(160, 90, GridEngine::default());
    cache.reconcile(&mandelbrot, &viewport);

    let table = ColorTable::build(mandelbrot.params().max_iterations);
    let frame = table.colorize(cache.grid());
    assert_eq!(frame.pixels.len(), 160 * 90 * 4);
    assert!(frame.pixels.chunks_exact(4).any(|px| px[..3] != [0, 0, 0]));
    assert!(frame.pixels.chunks_exact(4).all(|px| px[3] == 255));
    // The centre pixel is the origin.
    assert_eq!(frame.pixel(80, 45), [0, 0, 0, 255]);
}

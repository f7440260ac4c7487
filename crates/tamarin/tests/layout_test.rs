use tamarin::rng::XorShift64Star;
use tamarin::{
    Error, Frame, Graph, Initializer, Layout, LayoutState, RadialAnnotation, Schedule,
    SmoothRings, Variant, layout,
};

fn triangle() -> Graph {
    Graph::new(3)
        .with_weighted_edge(0, 1, 1.0)
        .with_weighted_edge(1, 2, 1.0)
        .with_weighted_edge(0, 2, 1.0)
}

fn petersen() -> Graph {
    let mut g = Graph::new(10);
    for i in 0..5 {
        g.add_edge(i, (i + 1) % 5);
        g.add_edge(i, i + 5);
        g.add_edge(i + 5, (i + 2) % 5 + 5);
    }
    g
}

fn run(
    graph: &Graph,
    schedule: &Schedule,
    initializer: Initializer,
    variant: Variant,
    weighted: bool,
) -> Layout {
    layout(
        graph,
        Frame::default(),
        schedule,
        initializer,
        variant,
        weighted,
    )
    .expect("layout")
}

fn s2_schedule() -> Schedule {
    Schedule::new(1, &Frame::default())
        .with_initial_temperature(1000.0)
        .with_cooling_factor(0.96)
}

#[test]
fn layout_returns_2n_finite_values() {
    let graph = petersen();
    let schedule = Schedule::new(50, &Frame::default());
    let levels = RadialAnnotation::from_centre(&graph, 0, 4, 1200.0).expect("annotation");
    let smooth = SmoothRings::new(levels.levels().to_vec(), [800.0, 1200.0, 1500.0])
        .expect("smooth rings");

    let cases = [
        (Initializer::Random { seed: 42 }, Variant::Plain),
        (Initializer::CircularOriginal, Variant::Plain),
        (Initializer::CircularRandom { seed: 42 }, Variant::Plain),
        (Initializer::CircularCrossingReduced, Variant::Plain),
        (Initializer::Rings, Variant::Radial(levels.clone())),
        (Initializer::Random { seed: 42 }, Variant::Smooth(smooth)),
    ];
    for (initializer, variant) in cases {
        let name = format!("{} / {}", initializer.name(), variant.name());
        let out = run(&graph, &schedule, initializer, variant, false);
        let data = out.coords.as_slice();
        assert_eq!(data.len(), 2 * graph.vertex_count, "{name}");
        assert!(data.iter().all(|c| c.is_finite()), "{name}: {data:?}");
    }
}

#[test]
fn identical_inputs_give_bitwise_identical_layouts() {
    let graph = petersen();
    let schedule = Schedule::new(40, &Frame::default());
    for initializer in [
        Initializer::Random { seed: 42 },
        Initializer::CircularRandom { seed: 42 },
        Initializer::CircularCrossingReduced,
    ] {
        let a = run(&graph, &schedule, initializer, Variant::Plain, false);
        let b = run(&graph, &schedule, initializer, Variant::Plain, false);
        let bits = |l: &Layout| -> Vec<u64> {
            l.coords.as_slice().iter().map(|c| c.to_bits()).collect()
        };
        assert_eq!(bits(&a), bits(&b), "{}", initializer.name());
        assert_eq!(a.temperature.to_bits(), b.temperature.to_bits());
    }
}

#[test]
fn different_seeds_give_different_layouts() {
    let graph = petersen();
    let schedule = Schedule::new(5, &Frame::default());
    let a = run(&graph, &schedule, Initializer::Random { seed: 1 }, Variant::Plain, false);
    let b = run(&graph, &schedule, Initializer::Random { seed: 2 }, Variant::Plain, false);
    assert_ne!(a.coords, b.coords);
}

#[test]
fn temperature_follows_the_geometric_schedule() {
    let graph = petersen();
    let frame = Frame::default();
    for steps in [1usize, 7, 25, 100] {
        let schedule = Schedule::new(steps, &frame);
        let out = run(&graph, &schedule, Initializer::Random { seed: 3 }, Variant::Plain, false);
        let expected = schedule.temperature_after(steps);
        let rel = ((out.temperature - expected) / expected).abs();
        assert!(rel < 1e-9, "steps={steps}: {} vs {expected}", out.temperature);
    }
    // The default schedule cools by a factor of 1000 overall.
    let schedule = Schedule::new(100, &frame);
    let out = run(&graph, &schedule, Initializer::Random { seed: 3 }, Variant::Plain, false);
    let ratio = out.temperature / schedule.initial_temperature;
    assert!((ratio - 0.001).abs() < 1e-12, "{ratio}");
}

#[test]
fn zero_steps_return_the_initializer_output() {
    let graph = petersen();
    let frame = Frame::default();
    let schedule = Schedule::new(0, &frame);
    for initializer in [
        Initializer::Random { seed: 42 },
        Initializer::CircularOriginal,
        Initializer::CircularCrossingReduced,
    ] {
        let seeded = LayoutState::new(&graph, frame, &schedule, initializer, Variant::Plain, false)
            .expect("state");
        let out = run(&graph, &schedule, initializer, Variant::Plain, false);
        assert_eq!(&out.coords, seeded.coordinates(), "{}", initializer.name());
        assert_eq!(out.temperature, schedule.initial_temperature);
    }
}

#[test]
fn two_isolated_vertices_follow_the_seeded_generator() {
    let graph = Graph::new(2);
    let schedule = Schedule::new(0, &Frame::default());
    let out = run(&graph, &schedule, Initializer::Random { seed: 42 }, Variant::Plain, false);

    let mut rng = XorShift64Star::new(42);
    let mut expected = [(0.0, 0.0); 2];
    for p in &mut expected {
        *p = (rng.next_f64_below(10_000.0), rng.next_f64_below(10_000.0));
    }
    for (v, (ex, ey)) in expected.into_iter().enumerate() {
        assert_eq!(out.coords.point(v), (ex, ey));
        assert!((0.0..10_000.0).contains(&ex) && (0.0..10_000.0).contains(&ey));
    }
    let again = run(&graph, &schedule, Initializer::Random { seed: 42 }, Variant::Plain, false);
    assert_eq!(out, again);
}

#[test]
fn one_step_on_a_triangle_cools_to_960() {
    let graph = triangle();
    let frame = Frame::default();
    let schedule = s2_schedule();
    let before = LayoutState::new(
        &graph,
        frame,
        &schedule,
        Initializer::Random { seed: 42 },
        Variant::Plain,
        false,
    )
    .expect("state");
    let out = run(&graph, &schedule, Initializer::Random { seed: 42 }, Variant::Plain, false);

    assert!((out.temperature - 960.0).abs() < 1e-9, "{}", out.temperature);
    // Each component moves by at most the starting temperature.
    for v in 0..3 {
        let (x0, y0) = before.coordinates().point(v);
        let (x1, y1) = out.coords.point(v);
        assert!((x1 - x0).abs() <= 1000.0 + 1e-9);
        assert!((y1 - y0).abs() <= 1000.0 + 1e-9);
    }
    assert_ne!(&out.coords, before.coordinates());
    // k = sqrt(area / n).
    assert!((before.ideal_length() - (1.0e8f64 / 3.0).sqrt()).abs() < 1e-9);
}

#[test]
fn triangle_replay_is_bitwise_identical() {
    let graph = triangle();
    let schedule = s2_schedule();
    let a = run(&graph, &schedule, Initializer::Random { seed: 42 }, Variant::Plain, false);
    let b = run(&graph, &schedule, Initializer::Random { seed: 42 }, Variant::Plain, false);
    assert_eq!(a.coords.into_vec(), b.coords.into_vec());
}

#[test]
fn unit_weights_match_the_unweighted_model() {
    let graph = triangle();
    let schedule = Schedule::new(20, &Frame::default());
    let plain = run(&graph, &schedule, Initializer::Random { seed: 9 }, Variant::Plain, false);
    let weighted = run(&graph, &schedule, Initializer::Random { seed: 9 }, Variant::Plain, true);
    assert_eq!(plain, weighted);
}

#[test]
fn zero_weight_edges_pull_nothing() {
    let with_edge = Graph::new(3).with_edge(0, 1).with_weighted_edge(1, 2, 0.0);
    let without = Graph::new(3).with_edge(0, 1);
    let schedule = Schedule::new(20, &Frame::default());
    let a = run(&with_edge, &schedule, Initializer::Random { seed: 5 }, Variant::Plain, true);
    let b = run(&without, &schedule, Initializer::Random { seed: 5 }, Variant::Plain, true);
    assert_eq!(a, b);
}

#[test]
fn circular_original_is_a_circle_of_radius_3800() {
    let graph = Graph::new(6).with_edge(0, 3).with_edge(1, 4);
    let schedule = Schedule::new(0, &Frame::default());
    let out = run(&graph, &schedule, Initializer::CircularOriginal, Variant::Plain, false);

    let (x0, y0) = out.coords.point(0);
    assert!((x0 - 1200.0).abs() < 1e-9 && (y0 - 5000.0).abs() < 1e-9);
    for v in 0..6 {
        let (x, y) = out.coords.point(v);
        let (dx, dy) = (x - 5000.0, y - 5000.0);
        assert!(((dx * dx + dy * dy).sqrt() - 3800.0).abs() < 1e-9, "v{v}");
        let angle = std::f64::consts::PI - (v as f64) * std::f64::consts::PI / 3.0;
        assert!((dx - 3800.0 * angle.cos()).abs() < 1e-9, "v{v}");
        assert!((dy - 3800.0 * angle.sin()).abs() < 1e-9, "v{v}");
    }
}

#[test]
fn invalid_inputs_are_rejected() {
    let frame = Frame::default();
    let schedule = Schedule::new(10, &frame);
    let init = Initializer::CircularOriginal;

    let cases = [
        Graph::new(1),
        Graph::new(3).with_edge(0, 3),
        Graph::new(3).with_edge(1, 1),
        Graph::new(3).with_weighted_edge(0, 1, -1.0),
        Graph::new(3).with_weighted_edge(0, 1, f64::NAN),
    ];
    for graph in &cases {
        let err = layout(graph, frame, &schedule, init, Variant::Plain, false).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph { .. }), "{graph:?}: {err}");
    }

    let graph = triangle();
    let bad_schedules = [
        schedule.with_cooling_factor(1.5),
        schedule.with_initial_temperature(0.0),
        schedule.with_initial_temperature(f64::INFINITY),
    ];
    for s in &bad_schedules {
        let err = layout(&graph, frame, s, init, Variant::Plain, false).unwrap_err();
        assert!(matches!(err, Error::InvalidSchedule { .. }), "{s:?}: {err}");
    }
    let err = layout(
        &graph,
        Frame::new(-1.0, 10.0),
        &schedule,
        init,
        Variant::Plain,
        false,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidSchedule { .. }));
}

#[test]
fn overflow_rolls_back_and_reports_breakdown() {
    // The frame area overflows, so the ideal length is infinite and attraction yields NaN.
    let graph = Graph::new(2).with_edge(0, 1);
    let frame = Frame::new(1e200, 1e200);
    let schedule = Schedule::new(5, &frame)
        .with_initial_temperature(1.0)
        .with_cooling_factor(0.5);
    let mut state = LayoutState::new(
        &graph,
        frame,
        &schedule,
        Initializer::CircularOriginal,
        Variant::Plain,
        false,
    )
    .expect("state");
    let seeded = state.coordinates().clone();
    assert_eq!(seeded.first_non_finite(), None);

    let err = state.step().unwrap_err();
    let (step, temperature, last_good) = match err {
        Error::NumericalBreakdown {
            step,
            temperature,
            last_good,
            ..
        } => (step, temperature, last_good),
        other => panic!("expected a numerical breakdown, got {other}"),
    };
    assert_eq!(step, 0);
    assert_eq!(temperature, 1.0);
    assert_eq!(*last_good, seeded);
    assert_eq!(state.coordinates(), &seeded);
    assert_eq!(state.steps_taken(), 0);
    assert_eq!(state.temperature(), 1.0);

    let err = layout(
        &graph,
        frame,
        &schedule,
        Initializer::CircularOriginal,
        Variant::Plain,
        false,
    )
    .unwrap_err();
    assert!(matches!(err, Error::NumericalBreakdown { .. }));
}

#[test]
fn stepping_matches_a_full_run() {
    let graph = petersen();
    let frame = Frame::default();
    let schedule = Schedule::new(30, &frame);
    let full = run(&graph, &schedule, Initializer::Random { seed: 11 }, Variant::Plain, false);

    let mut state = LayoutState::new(
        &graph,
        frame,
        &schedule,
        Initializer::Random { seed: 11 },
        Variant::Plain,
        false,
    )
    .expect("state");
    let mut last = state.temperature();
    for _ in 0..30 {
        let t = state.step().expect("step");
        assert!(t < last);
        last = t;
    }
    assert_eq!(state.into_layout(), full);
}

#[test]
fn reheating_changes_the_next_step() {
    let graph = petersen();
    let frame = Frame::default();
    let schedule = Schedule::new(10, &frame);
    let make = || {
        LayoutState::new(
            &graph,
            frame,
            &schedule,
            Initializer::CircularOriginal,
            Variant::Plain,
            false,
        )
        .expect("state")
    };
    let mut a = make();
    let mut b = make();
    b.set_temperature(1.0).expect("temperature");
    a.step().expect("step");
    b.step().expect("step");
    assert!((b.temperature() - a.cooling_factor()).abs() < 1e-12);
    assert_ne!(a.coordinates(), b.coordinates());
}

//! End-to-end checks of masking, decimation and display transforms
//! through the public API.

use specview_lod::prelude::*;
use specview_lod::{decimate_adaptive, decimate_uniform, AdaptiveParams};

fn flat_store(curves: usize) -> SampleStore {
    let x: Vec<f64> = (0..1000).map(|i| i as f64).collect();
    SampleStore::new(x, vec![vec![2.0; 1000]; curves]).unwrap()
}

fn spike_store() -> SampleStore {
    let x: Vec<f64> = (0..1000).map(|i| i as f64).collect();
    let mut y = vec![0.0; 1000];
    y[500] = 50.0;
    SampleStore::new(x, vec![y]).unwrap()
}

#[test]
fn mask_returns_inclusive_window() {
    let store = flat_store(3);
    let (range, xs) = store.mask(200.0, 300.0).unwrap();
    assert_eq!(range.len(), 101);
    assert_eq!(xs.len(), 101);
    assert!(xs.iter().all(|&x| (200.0..=300.0).contains(&x)));
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn uniform_on_zoom_window_uses_stride_two() {
    let store = flat_store(3);
    let (range, _) = store.mask(200.0, 300.0).unwrap();
    let out = decimate_uniform(range, 50);
    assert!(out.len() <= 51);
    assert_eq!(out[0], 200);
    assert!(out.windows(2).all(|w| w[1] - w[0] == 2));
}

#[test]
fn adaptive_keeps_spike_and_endpoints() {
    let store = spike_store();
    let out = decimate_adaptive(
        &store,
        0..store.len(),
        AdaptiveParams {
            target_points: 10,
            feature_threshold: 0.001,
        },
    );
    assert!(out.len() <= 10);
    assert!(out.contains(&0));
    assert!(out.contains(&500));
    assert!(out.contains(&999));
}

#[test]
fn mask_outside_domain_is_empty_range() {
    let store = flat_store(3);
    assert!(matches!(
        store.mask(2000.0, 3000.0),
        Err(LodError::EmptyRange { .. })
    ));
}

#[test]
fn stacking_offsets_follow_render_position() {
    let store = flat_store(3);
    let reducer = ViewportReducer::new(store, ReducerConfig::default()).unwrap();
    let transform = DisplayTransform {
        stack_offset_base: 5.0,
        stack_scale_exponent: 2,
        height_scale_exponent: 0.0,
        fill_enabled: false,
    };
    let frame = reducer
        .render(XRange::new(200.0, 300.0), 1000, &transform)
        .unwrap();
    let offsets: Vec<f64> = frame.traces.iter().map(|t| t.y[0] - 2.0).collect();
    assert_eq!(offsets, vec![0.0, 500.0, 1000.0]);
    assert_eq!(
        frame.traces.iter().map(|t| t.curve).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn zoomed_reduction_preserves_spike_through_reducer() {
    let reducer = ViewportReducer::new(spike_store(), ReducerConfig::default()).unwrap();
    let out = reducer.reduce(XRange::new(400.0, 600.0), 20).unwrap();
    assert_eq!(out.strategy, ReductionStrategy::Adaptive);
    assert!(out.indices.contains(&500));
    assert_eq!(out.indices.first(), Some(&400));
    assert_eq!(out.indices.last(), Some(&600));
    let peak = out.indices.iter().position(|&i| i == 500).unwrap();
    assert_eq!(out.curves[0][peak], 50.0);
}

#[test]
fn overview_uses_uniform_and_stays_sorted() {
    let reducer = ViewportReducer::new(spike_store(), ReducerConfig::default()).unwrap();
    let out = reducer.overview(100).unwrap();
    assert_eq!(out.strategy, ReductionStrategy::Uniform);
    assert!(out.len() <= 101);
    assert!(out.x.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(out.x_range, reducer.store().domain());
}

#[test]
fn same_request_twice_is_bit_identical() {
    let x: Vec<f64> = (0..5000).map(|i| i as f64 * 0.001).collect();
    let curves: Vec<Vec<f64>> = (0..4)
        .map(|k| x.iter().map(|v| (v * (k as f64 + 3.0)).sin() / (1.0 + v)).collect())
        .collect();
    let reducer =
        ViewportReducer::new(SampleStore::new(x, curves).unwrap(), ReducerConfig::default())
            .unwrap();
    let view = XRange::new(1.0, 2.0);
    let a = reducer.reduce(view, 200).unwrap();
    let b = reducer.reduce(view, 200).unwrap();
    assert_eq!(a, b);
}

#[test]
fn cache_does_not_change_results() {
    let x: Vec<f64> = (0..3000).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| (v * 0.37).cos() * (v * 0.01).sin()).collect();
    let store = SampleStore::new(x, vec![y]).unwrap();
    let cached = ViewportReducer::new(store.clone(), ReducerConfig::default()).unwrap();
    let uncached = ViewportReducer::new(
        store,
        ReducerConfig {
            cache_curvature: false,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(cached.store().has_curvature_cache());
    assert!(!uncached.store().has_curvature_cache());

    let view = XRange::new(1200.0, 1900.0);
    assert_eq!(
        cached.reduce(view, 150).unwrap(),
        uncached.reduce(view, 150).unwrap()
    );
}

#[test]
fn concurrent_requests_share_one_store() {
    let x: Vec<f64> = (0..20_000).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| (v * 0.013).sin()).collect();
    let reducer =
        ViewportReducer::new(SampleStore::new(x, vec![y.clone(), y]).unwrap(), ReducerConfig::default())
            .unwrap();

    let views = [
        XRange::new(0.0, 19_999.0),
        XRange::new(100.0, 2000.0),
        XRange::new(5000.0, 5600.0),
    ];
    let expected: Vec<_> = views.iter().map(|v| reducer.reduce(*v, 300).unwrap()).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = views
            .iter()
            .map(|v| {
                let reducer = &reducer;
                scope.spawn(move || reducer.reduce(*v, 300).unwrap())
            })
            .collect();
        for (h, want) in handles.into_iter().zip(expected.iter()) {
            assert_eq!(&h.join().unwrap(), want);
        }
    });
}

#[test]
fn zero_offset_transform_only_reorders() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let curves = vec![vec![1.0; 10], vec![2.0; 10], vec![3.0; 10]];
    let reducer =
        ViewportReducer::new(SampleStore::new(x, curves).unwrap(), ReducerConfig::default())
            .unwrap();
    let plain = DisplayTransform {
        stack_offset_base: 0.0,
        stack_scale_exponent: 0,
        height_scale_exponent: 0.0,
        fill_enabled: false,
    };
    let filled = DisplayTransform {
        fill_enabled: true,
        ..plain
    };
    let domain = reducer.store().domain();
    let a = reducer.render(domain, 100, &plain).unwrap();
    let b = reducer.render(domain, 100, &filled).unwrap();
    for t in &a.traces {
        let other = b.traces.iter().find(|o| o.curve == t.curve).unwrap();
        assert_eq!(t.y, other.y);
    }
    assert_eq!(b.traces[0].curve, 2);
}

#[test]
fn config_round_trips_through_toml() {
    let text = r#"
        target_points = 2000
        strategy = "adaptive"
        feature_threshold = 0.01
    "#;
    let config: ReducerConfig = toml::from_str(text).unwrap();
    assert_eq!(config.target_points, 2000);
    assert_eq!(config.strategy, Strategy::Adaptive);
    assert_eq!(config.max_target_points, 5000);
    assert!(config.validate().is_ok());
}

#[test]
fn frame_serializes_to_json() {
    let reducer = ViewportReducer::new(flat_store(2), ReducerConfig::default()).unwrap();
    let frame = reducer
        .render(XRange::new(0.0, 4.0), 100, &DisplayTransform::default())
        .unwrap();
    let v = serde_json::to_value(&frame).unwrap();
    assert_eq!(v["traces"].as_array().unwrap().len(), 2);
    assert_eq!(v["x"].as_array().unwrap().len(), 5);
}

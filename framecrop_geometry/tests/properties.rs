// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavioral properties of `CropGeometry`.
//!
//! These exercise the clamping, zoom saturation, fit and center rules on
//! realistic viewport and image sizes.

use approx::assert_relative_eq;
use framecrop_geometry::{
    CropGeometry, FitPolicy, NaturalSize, ScaleX, Snapshot, ViewportConfig,
};

fn geometry(natural_width: f64, natural_height: f64) -> CropGeometry<Vec<Snapshot>> {
    let config = ViewportConfig::new(400.0, 300.0).unwrap();
    let mut g = CropGeometry::with_notifier(config, Vec::new());
    g.initialize_from_natural_size(NaturalSize::new(natural_width, natural_height))
        .unwrap();
    g
}

#[test]
fn offset_stays_within_content_for_extreme_inputs() {
    let mut g = geometry(1200.0, 900.0);
    for left in [-1000.0, -1.0, 0.0, 0.7, 1.9, 2.0, 2.5, 1000.0] {
        g.set_offset(Some(left), Some(-left));
        let s = g.snapshot();
        assert!(s.offset_x >= 0.0 && s.offset_x <= s.content_width - 1.0, "x={left}");
        assert!(s.offset_y >= 0.0 && s.offset_y <= s.content_height - 1.0, "y={left}");
    }
}

#[test]
fn zoom_out_from_fit_saturates_and_zoom_in_doubles() {
    let mut g = geometry(400.0, 300.0);
    g.zoom(0.5);
    let s = g.snapshot();
    assert_eq!((s.content_width, s.content_height), (1.0, 1.0));
    assert_eq!(g.scale(), 1.0);

    g.zoom(2.0);
    let s = g.snapshot();
    assert_eq!((s.content_width, s.content_height), (2.0, 2.0));
    assert_eq!(g.scale(), 2.0);
}

#[test]
fn fit_is_idempotent() {
    for (w, h) in [(200.0, 600.0), (800.0, 150.0), (1000.0, 1000.0), (123.0, 77.0)] {
        let mut g = geometry(w, h);
        g.fit();
        let once = (g.content_size(), g.scale());
        g.fit();
        assert_relative_eq!(g.content_size().width, once.0.width, epsilon = 1e-12);
        assert_relative_eq!(g.content_size().height, once.0.height, epsilon = 1e-12);
        assert_relative_eq!(g.scale(), once.1, epsilon = 1e-12);
        assert!(g.content_size().width >= 1.0 - 1e-12);
        assert!(g.content_size().height >= 1.0 - 1e-12);
    }
}

#[test]
fn center_is_exact_midpoint() {
    let mut g = geometry(1000.0, 450.0);
    g.center();
    let s = g.snapshot();
    assert_eq!(s.offset_x, (s.content_width - 1.0) / 2.0);
    assert_eq!(s.offset_y, (s.content_height - 1.0) / 2.0);
}

#[test]
fn double_flip_restores_everything_else() {
    let mut g = geometry(800.0, 600.0);
    g.set_offset(Some(0.3), Some(0.6));
    let before = g.snapshot();
    let scale = g.scale();
    g.flip_horizontal();
    assert_eq!(g.scale_x(), ScaleX::Flipped);
    g.flip_horizontal();
    assert_eq!(g.snapshot(), before);
    assert_eq!(g.scale(), scale);
}

#[test]
fn wide_image_does_not_auto_fit() {
    let g = geometry(800.0, 300.0);
    let s = g.snapshot();
    assert_eq!((s.content_width, s.content_height), (2.0, 1.0));
    assert!(!g.should_fit(FitPolicy::default()));
    assert_eq!((s.offset_x, s.offset_y), (0.0, 0.0));
}

#[test]
fn forced_fit_on_wide_image_keeps_width() {
    let mut g = geometry(800.0, 300.0);
    let policy = FitPolicy {
        fit_on_init: true,
        center_on_init: false,
    };
    assert!(g.should_fit(policy));
    g.fit();
    let s = g.snapshot();
    assert_eq!((s.content_width, s.content_height), (2.0, 1.0));
    assert_eq!(g.scale(), 1.0);
}

#[test]
fn every_notification_carries_the_final_state() {
    let mut g = geometry(800.0, 600.0);
    g.center();
    g.zoom(1.25);
    g.flip_horizontal();
    let last = *g.notifier().last().unwrap();
    assert_eq!(last, g.snapshot());
    assert_eq!(g.notifier().len(), 3);
}

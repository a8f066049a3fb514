// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size, Vec2};

use crate::config::{FitPolicy, GeometryError, NaturalSize, ViewportConfig};
use crate::notify::ChangeNotifier;
use crate::snapshot::{ImageData, ScaleX, Snapshot};

/// Normalized crop geometry for one image inside a fixed viewport.
///
/// Content size and offset are expressed in viewport units: a content width
/// of `1.0` exactly fills the viewport horizontally, and an offset of `0.5`
/// shifts the visible window half a viewport into the content.
///
/// `CropGeometry` owns the state exclusively. Every mutation that changes
/// what a host would render reports the new [`Snapshot`] to its
/// [`ChangeNotifier`] before returning.
///
/// Whenever both content dimensions are at least `1.0`, the offset satisfies
/// `0 <= offset_x <= content_width - 1` and `0 <= offset_y <= content_height - 1`,
/// so the viewport is always covered.
#[derive(Clone, Debug)]
pub struct CropGeometry<N = ()> {
    config: ViewportConfig,
    natural: Option<NaturalSize>,
    content: Size,
    offset: Vec2,
    scale: f64,
    rotation_degrees: i32,
    scale_x: ScaleX,
    notifier: N,
}

impl CropGeometry<()> {
    /// Creates unready geometry for `config` that discards notifications.
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        Self::with_notifier(config, ())
    }
}

impl<N: ChangeNotifier> CropGeometry<N> {
    /// Creates unready geometry for `config` reporting changes to `notifier`.
    ///
    /// Until [`CropGeometry::initialize_from_natural_size`] runs, the content
    /// is a 1x1 box at offset zero.
    #[must_use]
    pub fn with_notifier(config: ViewportConfig, notifier: N) -> Self {
        Self {
            config,
            natural: None,
            content: Size::new(1.0, 1.0),
            offset: Vec2::ZERO,
            scale: 1.0,
            rotation_degrees: 0,
            scale_x: ScaleX::Normal,
            notifier,
        }
    }

    /// Returns the viewport configuration.
    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    /// Returns the natural image size once known.
    #[must_use]
    pub fn natural_size(&self) -> Option<NaturalSize> {
        self.natural
    }

    /// Returns `true` once natural dimensions are known and sizing has run.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.natural.is_some()
    }

    /// Content size in viewport units.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content
    }

    /// Offset of the viewport into the content, in viewport units.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Cumulative zoom factor relative to the initial sizing.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Tracked rotation in degrees, in `[0, 360)`.
    #[must_use]
    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    /// Horizontal flip state.
    #[must_use]
    pub fn scale_x(&self) -> ScaleX {
        self.scale_x
    }

    /// Returns the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the notifier mutably.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Sizes the content from the image's natural dimensions.
    ///
    /// Content becomes `natural / target` per axis; offset, rotation and flip
    /// reset and the cumulative scale returns to `1.0`. Call once per image
    /// load. Invalid sizes leave the geometry untouched.
    pub fn initialize_from_natural_size(
        &mut self,
        natural: NaturalSize,
    ) -> Result<(), GeometryError> {
        let natural = natural.validate()?;
        self.content = Size::new(
            natural.width / self.config.target_width(),
            natural.height / self.config.target_height(),
        );
        self.offset = Vec2::ZERO;
        self.rotation_degrees = 0;
        self.scale = 1.0;
        self.scale_x = ScaleX::Normal;
        self.natural = Some(natural);
        log::debug!(
            "initialized from {}x{}: content {}x{}",
            natural.width,
            natural.height,
            self.content.width,
            self.content.height
        );
        Ok(())
    }

    /// Returns `true` when the content must be fit to cover the viewport.
    ///
    /// That is the case when the image is smaller than the viewport along
    /// either axis, or when `policy` forces a fit.
    #[must_use]
    pub fn should_fit(&self, policy: FitPolicy) -> bool {
        let smaller_than_viewport = self.natural.is_some_and(|n| {
            n.width < self.config.target_width() || n.height < self.config.target_height()
        });
        smaller_than_viewport
            || self.content.width < 1.0
            || self.content.height < 1.0
            || policy.fit_on_init
    }

    /// Rescales the content so its tighter axis exactly fills the viewport.
    ///
    /// Aspect ratio is preserved and the cumulative scale follows the change in
    /// content width. The offset is not touched; follow with
    /// [`CropGeometry::center`] or [`CropGeometry::set_offset`] to re-clamp.
    pub fn fit(&mut self) {
        let old_width = self.content.width;
        let ratio = self.content.height / self.content.width;
        self.content = if ratio > 1.0 {
            Size::new(1.0, ratio)
        } else {
            Size::new(1.0 / ratio, 1.0)
        };
        self.scale *= self.content.width / old_width;
    }

    /// Centers the content over the viewport on both axes.
    pub fn center(&mut self) {
        let (x, y) = self.centered_offset();
        self.set_offset(Some(x), Some(y));
    }

    /// Centers the content horizontally, leaving the vertical offset alone.
    pub fn center_x(&mut self) {
        let (x, _) = self.centered_offset();
        self.set_offset(Some(x), None);
    }

    /// Centers the content vertically, leaving the horizontal offset alone.
    pub fn center_y(&mut self) {
        let (_, y) = self.centered_offset();
        self.set_offset(None, Some(y));
    }

    /// Zooms by `factor`, anchored at the viewport center.
    ///
    /// Factors that are not finite and positive, or exactly `1.0`, are ignored,
    /// as is a zoom whose content size would overflow. A zoom out that would
    /// leave the viewport uncovered saturates at the fitted size.
    pub fn zoom(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
            return;
        }
        let old = self.content;
        if !(old.width * factor).is_finite() || !(old.height * factor).is_finite() {
            log::warn!("ignoring zoom {factor}: content size would overflow");
            return;
        }
        let effective = if old.width * factor > 1.0 && old.height * factor > 1.0 {
            self.content = Size::new(old.width * factor, old.height * factor);
            self.scale *= factor;
            factor
        } else {
            self.fit();
            self.content.width / old.width
        };
        let x = (self.offset.x + 0.5) * effective - 0.5;
        let y = (self.offset.y + 0.5) * effective - 0.5;
        log::trace!("zoom {factor} (effective {effective})");
        self.set_offset(Some(x), Some(y));
    }

    /// Mirrors the content horizontally.
    pub fn flip_horizontal(&mut self) {
        self.scale_x = self.scale_x.toggled();
        self.notify();
    }

    /// Rotates the tracked rotation 90 degrees counter-clockwise.
    pub fn rotate_left(&mut self) {
        self.rotate_by(-90);
    }

    /// Rotates the tracked rotation 90 degrees clockwise.
    pub fn rotate_right(&mut self) {
        self.rotate_by(90);
    }

    fn rotate_by(&mut self, degrees: i32) {
        self.rotation_degrees = (self.rotation_degrees + degrees).rem_euclid(360);
        self.notify();
    }

    /// Moves the viewport to `(left, top)` in viewport units.
    ///
    /// `None` leaves that axis alone. Values are clamped into
    /// `[0, content - 1]`, never rejected; non-finite values are ignored.
    /// Notifies exactly once per call.
    pub fn set_offset(&mut self, left: Option<f64>, top: Option<f64>) {
        if let Some(left) = left.filter(|v| v.is_finite()) {
            self.offset.x = clamp_axis(left, self.content.width);
        }
        if let Some(top) = top.filter(|v| v.is_finite()) {
            self.offset.y = clamp_axis(top, self.content.height);
        }
        self.notify();
    }

    /// Applies persisted geometry.
    ///
    /// When the persisted width differs from the current one the cumulative
    /// scale is rescaled proportionally. Degenerate sizes keep the current
    /// content size; the offset is always clamped.
    pub fn restore(&mut self, data: &ImageData) {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(data.w) && valid(data.h) {
            if data.w != self.content.width {
                self.scale *= data.w / self.content.width;
            }
            self.content = Size::new(data.w, data.h);
        } else {
            log::warn!("ignoring persisted content size {}x{}", data.w, data.h);
        }
        self.scale_x = data.scale_x;
        self.set_offset(Some(data.x), Some(data.y));
    }

    /// Returns the current state as a [`Snapshot`].
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            content_width: self.content.width,
            content_height: self.content.height,
            offset_x: self.offset.x,
            offset_y: self.offset.y,
            rotation_degrees: self.rotation_degrees,
            scale_x: self.scale_x,
        }
    }

    /// Offset in viewport pixels, for the render surface.
    #[must_use]
    pub fn pixel_offset(&self) -> Vec2 {
        Vec2::new(
            self.offset.x * self.config.target_width(),
            self.offset.y * self.config.target_height(),
        )
    }

    /// Content size in viewport pixels, for the render surface.
    #[must_use]
    pub fn content_pixel_size(&self) -> Size {
        Size::new(
            self.content.width * self.config.target_width(),
            self.content.height * self.config.target_height(),
        )
    }

    /// Visible region in natural image pixels, before flip and rotation.
    ///
    /// Returns `None` until the geometry is ready.
    #[must_use]
    pub fn crop_rect(&self) -> Option<Rect> {
        let natural = self.natural?;
        let px_per_unit_x = natural.width / self.content.width;
        let px_per_unit_y = natural.height / self.content.height;
        let x0 = self.offset.x * px_per_unit_x;
        let y0 = self.offset.y * px_per_unit_y;
        Some(Rect::new(x0, y0, x0 + px_per_unit_x, y0 + px_per_unit_y))
    }

    fn centered_offset(&self) -> (f64, f64) {
        (
            (self.content.width - 1.0) / 2.0,
            (self.content.height - 1.0) / 2.0,
        )
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.notifier.changed(&snapshot);
    }
}

/// Clamps an offset into `[0, extent - 1]`, collapsing to `0` for content
/// narrower than the viewport.
fn clamp_axis(value: f64, extent: f64) -> f64 {
    value.clamp(0.0, (extent - 1.0).max(0.0))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use approx::assert_relative_eq;

    use super::*;

    fn ready(natural: (f64, f64)) -> CropGeometry<Vec<Snapshot>> {
        let mut g = CropGeometry::with_notifier(ViewportConfig::DEFAULT, Vec::new());
        g.initialize_from_natural_size(NaturalSize::new(natural.0, natural.1))
            .unwrap();
        g
    }

    #[test]
    fn unready_geometry_defaults() {
        let g = CropGeometry::new(ViewportConfig::DEFAULT);
        assert!(!g.is_ready());
        assert_eq!(g.content_size(), Size::new(1.0, 1.0));
        assert_eq!(g.offset(), Vec2::ZERO);
        assert_eq!(g.crop_rect(), None);
        assert!(!g.should_fit(FitPolicy::default()));
    }

    #[test]
    fn initialize_sets_normalized_content() {
        let g = ready((800.0, 300.0));
        assert!(g.is_ready());
        assert_eq!(g.content_size(), Size::new(2.0, 1.0));
        assert_eq!(g.offset(), Vec2::ZERO);
        assert_eq!(g.scale(), 1.0);
        assert!(g.notifier().is_empty());
    }

    #[test]
    fn initialize_rejects_empty_image() {
        let mut g = CropGeometry::new(ViewportConfig::DEFAULT);
        assert!(
            g.initialize_from_natural_size(NaturalSize::new(0.0, 0.0))
                .is_err()
        );
        assert!(!g.is_ready());
    }

    #[test]
    fn initialize_resets_previous_state() {
        let mut g = ready((800.0, 600.0));
        g.zoom(2.0);
        g.flip_horizontal();
        g.rotate_right();
        g.initialize_from_natural_size(NaturalSize::new(400.0, 300.0))
            .unwrap();
        let s = g.snapshot();
        assert_eq!((s.content_width, s.content_height), (1.0, 1.0));
        assert_eq!(s.rotation_degrees, 0);
        assert_eq!(s.scale_x, ScaleX::Normal);
        assert_eq!(g.scale(), 1.0);
    }

    #[test]
    fn should_fit_small_images_and_forced_policy() {
        let g = ready((200.0, 600.0));
        assert!(g.should_fit(FitPolicy::default()));

        let g = ready((800.0, 300.0));
        assert!(!g.should_fit(FitPolicy::default()));
        assert!(g.should_fit(FitPolicy {
            fit_on_init: true,
            center_on_init: false,
        }));
    }

    #[test]
    fn fit_tall_content() {
        let mut g = ready((200.0, 600.0));
        // content 0.5 x 2.0, ratio 4.
        g.fit();
        assert_eq!(g.content_size(), Size::new(1.0, 4.0));
        assert_relative_eq!(g.scale(), 2.0);
    }

    #[test]
    fn fit_wide_content() {
        let mut g = ready((800.0, 150.0));
        // content 2.0 x 0.5, ratio 0.25.
        g.fit();
        assert_eq!(g.content_size(), Size::new(4.0, 1.0));
        assert_relative_eq!(g.scale(), 2.0);
    }

    #[test]
    fn fit_does_not_notify() {
        let mut g = ready((200.0, 600.0));
        g.fit();
        assert!(g.notifier().is_empty());
    }

    #[test]
    fn set_offset_clamps_and_notifies_once() {
        let mut g = ready((800.0, 600.0));
        g.set_offset(Some(-1000.0), Some(1000.0));
        assert_eq!(g.offset(), Vec2::new(0.0, 1.0));
        assert_eq!(g.notifier().len(), 1);

        g.set_offset(Some(1000.0), None);
        assert_eq!(g.offset(), Vec2::new(1.0, 1.0));
        assert_eq!(g.notifier().len(), 2);
    }

    #[test]
    fn set_offset_ignores_non_finite_axes() {
        let mut g = ready((800.0, 600.0));
        g.set_offset(Some(0.25), Some(0.5));
        g.set_offset(Some(f64::NAN), Some(f64::INFINITY));
        assert_eq!(g.offset(), Vec2::new(0.25, 0.5));
    }

    #[test]
    fn set_offset_on_narrow_content_collapses_to_zero() {
        let mut g = ready((200.0, 150.0));
        g.set_offset(Some(0.3), Some(-0.3));
        assert_eq!(g.offset(), Vec2::ZERO);
    }

    #[test]
    fn center_per_axis() {
        let mut g = ready((1200.0, 600.0));
        g.set_offset(Some(0.0), Some(0.0));
        g.center_x();
        assert_eq!(g.offset(), Vec2::new(1.0, 0.0));
        g.center_y();
        assert_eq!(g.offset(), Vec2::new(1.0, 0.5));
    }

    #[test]
    fn zoom_is_anchored_at_viewport_center() {
        let mut g = ready((800.0, 600.0));
        g.center();
        // Centered on a 2x2 content: offset 0.5, center of view at 1.0.
        g.zoom(1.5);
        let s = g.snapshot();
        assert_relative_eq!(s.content_width, 3.0);
        assert_relative_eq!(s.offset_x, 1.0);
        assert_relative_eq!(s.offset_y, 1.0);
        assert_relative_eq!(g.scale(), 1.5);
    }

    #[test]
    fn zoom_ignores_invalid_factors() {
        let mut g = ready((800.0, 600.0));
        for factor in [0.0, -2.0, 1.0, f64::NAN] {
            g.zoom(factor);
        }
        assert_eq!(g.content_size(), Size::new(2.0, 2.0));
        assert!(g.notifier().is_empty());
    }

    #[test]
    fn zoom_ignores_non_finite_and_overflowing_factors() {
        let mut g = ready((800.0, 600.0));
        for factor in [f64::INFINITY, f64::NEG_INFINITY, 1e308, f64::MAX] {
            g.zoom(factor);
        }
        assert_eq!(g.content_size(), Size::new(2.0, 2.0));
        assert_eq!(g.scale(), 1.0);
        assert!(g.notifier().is_empty());

        // Still zooms normally afterwards.
        g.zoom(0.5);
        assert_eq!(g.content_size(), Size::new(1.0, 1.0));
        assert!(g.crop_rect().is_some_and(|r| r.width() > 0.0));
    }

    #[test]
    fn zoom_out_saturates_at_fit() {
        let mut g = ready((800.0, 600.0));
        g.set_offset(Some(1.0), Some(1.0));
        g.zoom(0.25);
        let s = g.snapshot();
        assert_eq!((s.content_width, s.content_height), (1.0, 1.0));
        assert_relative_eq!(g.scale(), 0.5);
        assert_eq!(g.offset(), Vec2::ZERO);
    }

    #[test]
    fn flip_and_rotation_notify() {
        let mut g = ready((800.0, 600.0));
        g.flip_horizontal();
        g.rotate_left();
        assert_eq!(g.scale_x(), ScaleX::Flipped);
        assert_eq!(g.rotation_degrees(), 270);
        g.rotate_right();
        g.rotate_right();
        assert_eq!(g.rotation_degrees(), 90);
        assert_eq!(g.notifier().len(), 4);
    }

    #[test]
    fn restore_rescales_cumulative_scale() {
        let mut g = ready((800.0, 600.0));
        g.restore(&ImageData {
            w: 4.0,
            h: 4.0,
            x: 1.5,
            y: 10.0,
            scale_x: ScaleX::Flipped,
        });
        let s = g.snapshot();
        assert_eq!((s.content_width, s.content_height), (4.0, 4.0));
        assert_eq!((s.offset_x, s.offset_y), (1.5, 3.0));
        assert_eq!(s.scale_x, ScaleX::Flipped);
        assert_relative_eq!(g.scale(), 2.0);
        assert_eq!(g.notifier().len(), 1);
    }

    #[test]
    fn restore_keeps_size_for_degenerate_data() {
        let mut g = ready((800.0, 600.0));
        g.restore(&ImageData {
            w: 0.0,
            h: f64::NAN,
            x: 0.5,
            y: 0.5,
            scale_x: ScaleX::Normal,
        });
        assert_eq!(g.content_size(), Size::new(2.0, 2.0));
        assert_eq!(g.offset(), Vec2::new(0.5, 0.5));
        assert_eq!(g.scale(), 1.0);
    }

    #[test]
    fn pixel_projection_and_crop_rect() {
        let mut g = ready((800.0, 600.0));
        g.set_offset(Some(0.5), Some(0.25));
        assert_eq!(g.pixel_offset(), Vec2::new(200.0, 75.0));
        assert_eq!(g.content_pixel_size(), Size::new(800.0, 600.0));
        assert_eq!(g.crop_rect(), Some(Rect::new(200.0, 75.0, 600.0, 375.0)));
    }
}

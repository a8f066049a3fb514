// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use framecrop_events::{BusNotifier, ChangedEvent, EventBus, ImageReadyEvent, ListenerId};
use framecrop_geometry::{CropGeometry, Snapshot};
use framecrop_gesture::{GestureController, Listeners, PointerEvent, Response};
use kurbo::{Rect, Size};

use crate::error::CropperError;
use crate::loader::{LoadOutcome, LoadRequest, Origin, encode_data_url};
use crate::options::CropperOptions;

/// Where a [`Cropper`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Built, image load not yet requested.
    #[default]
    Constructed,
    /// Waiting for the host to report the image ready.
    Loading,
    /// Geometry sized; runtime API and gestures are live.
    Initialized,
}

/// One cropping widget.
///
/// `K` identifies the widget's attachment point in the host (an element id,
/// a node handle). Several croppers may share one [`EventBus`]; each only
/// reacts to image-ready events for its own target and tags its change
/// notifications with it.
///
/// Runtime operations called before the image is ready are ignored.
pub struct Cropper<K> {
    options: CropperOptions,
    target: K,
    geometry: CropGeometry<BusNotifier<K>>,
    gestures: GestureController,
    lifecycle: Lifecycle,
    display_url: Option<String>,
    image_source: Option<String>,
    degraded: bool,
}

impl<K> Cropper<K>
where
    K: Clone + PartialEq + Debug + 'static,
{
    /// Creates a cropper with its own event bus.
    pub fn new(options: CropperOptions, target: K) -> Result<Self, CropperError> {
        Self::with_bus(options, target, Rc::new(RefCell::new(EventBus::new())))
    }

    /// Creates a cropper publishing on a shared event bus.
    pub fn with_bus(
        options: CropperOptions,
        target: K,
        bus: Rc<RefCell<EventBus<K>>>,
    ) -> Result<Self, CropperError> {
        options.validate()?;
        let viewport = options.viewport()?;
        let gestures = GestureController::new().with_zoom_step(options.zoom_step);
        let geometry = CropGeometry::with_notifier(viewport, BusNotifier::new(bus, target.clone()));
        log::debug!(
            "cropper {target:?} constructed with {}x{} viewport",
            viewport.target_width(),
            viewport.target_height()
        );
        Ok(Self {
            options,
            target,
            geometry,
            gestures,
            lifecycle: Lifecycle::Constructed,
            display_url: None,
            image_source: None,
            degraded: false,
        })
    }

    /// Construction options.
    pub fn options(&self) -> &CropperOptions {
        &self.options
    }

    /// Attachment point this widget answers to.
    pub fn target(&self) -> &K {
        &self.target
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns `true` once the image is ready and the geometry sized.
    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    /// Bus this widget publishes on.
    pub fn bus(&self) -> &Rc<RefCell<EventBus<K>>> {
        self.geometry.notifier().bus()
    }

    /// Read-only view of the geometry engine, for rendering.
    pub fn geometry(&self) -> &CropGeometry<BusNotifier<K>> {
        &self.geometry
    }

    /// Plans the image load and moves to [`Lifecycle::Loading`].
    ///
    /// `page_origin` is the origin of the hosting page, used when
    /// `check_cross_origin` is set; `now_millis` feeds the cache-busting
    /// timestamp.
    pub fn load_request(&mut self, page_origin: Option<&Origin>, now_millis: u64) -> LoadRequest {
        let url = self.options.image_url.as_deref().unwrap_or_default();
        let request = LoadRequest::resolve(
            url,
            self.options.check_cross_origin,
            page_origin,
            now_millis,
        );
        if !request.fetch {
            self.image_source = Some(request.url.clone());
        }
        self.display_url = Some(request.url.clone());
        if self.lifecycle == Lifecycle::Constructed {
            self.lifecycle = Lifecycle::Loading;
        }
        log::debug!("cropper {:?} loading {}", self.target, request.url);
        request
    }

    /// Reports the host's load result.
    ///
    /// Initializes this widget, then publishes [`ImageReadyEvent`] on the bus
    /// so other subscribers see the sized geometry. Nothing is published when
    /// the natural size is unusable. Returns `true` if the widget initialized.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> bool {
        let natural = outcome.natural();
        match outcome {
            LoadOutcome::Loaded { bytes, .. } => {
                self.degraded = false;
                if let Some(bytes) = bytes {
                    self.image_source = Some(encode_data_url(&bytes));
                }
            }
            LoadOutcome::Degraded { raw_url, .. } => {
                log::warn!(
                    "cropper {:?}: image fetch failed, using {raw_url} directly",
                    self.target
                );
                self.degraded = true;
                self.image_source = Some(raw_url.clone());
                self.display_url.get_or_insert(raw_url);
            }
        }
        let event = ImageReadyEvent {
            natural,
            target: self.target.clone(),
        };
        if !self.handle_image_ready(&event) {
            return false;
        }
        match self.bus().try_borrow_mut() {
            Ok(mut bus) => {
                bus.publish(&event.into());
            }
            Err(_) => log::warn!("cropper {:?}: bus busy, image-ready not published", self.target),
        }
        true
    }

    /// Reacts to an image-ready event.
    ///
    /// Events for other targets are ignored. Otherwise sizes the geometry from
    /// the natural dimensions, fits and centers as the options require, starts
    /// listening for gestures, restores any persisted geometry and enables
    /// wheel zoom. Returns `true` if the event was for this widget and the
    /// dimensions were usable.
    pub fn handle_image_ready(&mut self, event: &ImageReadyEvent<K>) -> bool {
        if !event.is_for(&self.target) {
            log::trace!(
                "cropper {:?} ignoring image-ready for {:?}",
                self.target,
                event.target
            );
            return false;
        }
        if let Err(err) = self.geometry.initialize_from_natural_size(event.natural) {
            log::warn!("cropper {:?}: {err}", self.target);
            return false;
        }
        let policy = self.options.fit_policy();
        if self.geometry.should_fit(policy) {
            self.geometry.fit();
            self.geometry.center();
        } else if policy.center_on_init {
            self.geometry.center();
        }
        self.gestures.attach();
        if let Some(data) = &self.options.image_data {
            self.geometry.restore(data);
        }
        self.lifecycle = Lifecycle::Initialized;
        self.gestures.set_zoom_enabled(true);
        log::debug!("cropper {:?} initialized: {:?}", self.target, self.geometry.snapshot());
        true
    }

    /// URL the host should display: the requested URL, cache-busted when
    /// cross-origin.
    pub fn display_url(&self) -> Option<&str> {
        self.display_url.as_deref()
    }

    /// The image as a `data:` URL when its bytes were fetched, otherwise the
    /// URL it was loaded from.
    pub fn image_source(&self) -> Option<&str> {
        self.image_source.as_deref()
    }

    /// Returns `true` if the last load fell back to the raw URL.
    pub fn load_degraded(&self) -> bool {
        self.degraded
    }

    /// Registers `listener` for this widget's change notifications.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a listener on the same bus.
    pub fn subscribe_changed(
        &self,
        mut listener: impl FnMut(&ChangedEvent<K>) + 'static,
    ) -> ListenerId {
        let target = self.target.clone();
        self.bus().borrow_mut().on_changed(move |event| {
            if event.target == target {
                listener(event);
            }
        })
    }

    /// Registers `listener` for this widget's image-ready notification.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a listener on the same bus.
    pub fn subscribe_image_ready(
        &self,
        mut listener: impl FnMut(&ImageReadyEvent<K>) + 'static,
    ) -> ListenerId {
        let target = self.target.clone();
        self.bus().borrow_mut().on_image_ready(move |event| {
            if event.is_for(&target) {
                listener(event);
            }
        })
    }

    /// Removes a listener registered with one of the `subscribe_*` methods.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.bus().borrow_mut().remove(id)
    }

    /// Zooms in by `step`, a fraction of the current size.
    pub fn zoom_in(&mut self, step: f64) {
        if let Some(geometry) = self.ready_geometry() {
            geometry.zoom(1.0 + step);
        }
    }

    /// Zooms out by `step`, a fraction of the current size.
    pub fn zoom_out(&mut self, step: f64) {
        if let Some(geometry) = self.ready_geometry() {
            geometry.zoom(1.0 - step);
        }
    }

    /// Zooms in by the configured step.
    pub fn zoom_in_step(&mut self) {
        self.zoom_in(self.gestures.zoom_step());
    }

    /// Zooms out by the configured step.
    pub fn zoom_out_step(&mut self) {
        self.zoom_out(self.gestures.zoom_step());
    }

    /// Fits the image to the viewport and centers it.
    pub fn fit(&mut self) {
        if let Some(geometry) = self.ready_geometry() {
            geometry.fit();
            geometry.center();
        }
    }

    /// Centers the image.
    pub fn center(&mut self) {
        if let Some(geometry) = self.ready_geometry() {
            geometry.center();
        }
    }

    /// Moves the viewport; see [`CropGeometry::set_offset`].
    pub fn set_offset(&mut self, left: Option<f64>, top: Option<f64>) {
        if let Some(geometry) = self.ready_geometry() {
            geometry.set_offset(left, top);
        }
    }

    /// Mirrors the image horizontally.
    pub fn flip_horizontal(&mut self) {
        if let Some(geometry) = self.ready_geometry() {
            geometry.flip_horizontal();
        }
    }

    /// Rotates 90 degrees counter-clockwise.
    pub fn rotate_left(&mut self) {
        if let Some(geometry) = self.ready_geometry() {
            geometry.rotate_left();
        }
    }

    /// Rotates 90 degrees clockwise.
    pub fn rotate_right(&mut self) {
        if let Some(geometry) = self.ready_geometry() {
            geometry.rotate_right();
        }
    }

    /// Current geometry state.
    pub fn snapshot(&self) -> Snapshot {
        self.geometry.snapshot()
    }

    /// Visible region in natural image pixels, once initialized.
    pub fn crop_rect(&self) -> Option<Rect> {
        self.geometry.crop_rect()
    }

    /// Feeds a pointer event to the drag gesture.
    ///
    /// `wrapper` is the rendered viewport size in device pixels.
    pub fn pointer(&mut self, event: &PointerEvent, wrapper: Size) -> Response {
        self.gestures.handle_pointer(event, &mut self.geometry, wrapper)
    }

    /// Feeds a wheel event; positive `delta` zooms in.
    pub fn wheel(&mut self, delta: f64) -> Response {
        self.gestures.handle_wheel(delta, &mut self.geometry)
    }

    /// Enables or disables wheel zoom. Ignored until initialized.
    pub fn set_zoom_enabled(&mut self, enabled: bool) {
        if self.is_initialized() {
            self.gestures.set_zoom_enabled(enabled);
        }
    }

    /// Host listeners that should currently be attached.
    pub fn attached_listeners(&self) -> Listeners {
        self.gestures.attached()
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    /// Stops all gesture handling, ending any drag in progress.
    pub fn detach(&mut self) -> Response {
        self.gestures.detach()
    }

    fn ready_geometry(&mut self) -> Option<&mut CropGeometry<BusNotifier<K>>> {
        if self.is_initialized() {
            Some(&mut self.geometry)
        } else {
            log::trace!("cropper {:?} not initialized, ignoring call", self.target);
            None
        }
    }
}

impl<K: Debug> Debug for Cropper<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cropper")
            .field("target", &self.target)
            .field("lifecycle", &self.lifecycle)
            .field("geometry", &self.geometry)
            .field("gestures", &self.gestures)
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}

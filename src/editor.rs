//! Editor facade: one instance owns all engine state for one image.
//!
//! The editor wires the pieces together: the active tool, the style
//! configuration, the viewport scale, the layer stack, and the gesture
//! phase machine. Input events are processed synchronously and atomically,
//! one at a time; no gesture can interleave with another. All drawing
//! happens in the base image's logical pixel space regardless of zoom.

use crate::canvas::{LayerStack, compose};
use crate::config::{Config, SettingsStore};
use crate::draw::{self, FontDescriptor};
use crate::input::{
    DragGeometry, GesturePhase, PointerButton, TouchPoint, Viewport, ZoomDirection,
};
use crate::style::{StyleConfig, StyleUpdate};
use crate::tools::ToolKind;
use log::{debug, info, warn};

/// Tool bound to a fresh editor before the host selects one.
pub const DEFAULT_TOOL: ToolKind = ToolKind::OutlinedRect;

/// Identity and kind of one layer, for management UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerEntry {
    /// Stable layer id
    pub id: u32,
    /// Tool that produced the layer
    pub tool: ToolKind,
}

/// Gesture-driven annotation editor over one base image.
pub struct Editor {
    base: Option<cairo::ImageSurface>,
    stack: LayerStack,
    viewport: Option<Viewport>,
    phase: GesturePhase,
    style: StyleConfig,
    font: FontDescriptor,
    active_tool: ToolKind,
    /// Width the host layout offers for zoom-to-fit
    fit_width: f64,
}

impl Editor {
    /// Creates an editor from the application config and a settings store.
    pub fn new(config: &Config, store: SettingsStore) -> Self {
        Self {
            base: None,
            stack: LayerStack::new(0, 0),
            viewport: None,
            phase: GesturePhase::Idle,
            style: StyleConfig::load(config.style.clone(), store),
            font: config.font.to_descriptor(),
            active_tool: DEFAULT_TOOL,
            fit_width: 0.0,
        }
    }

    /// Creates an editor with default config and session-only settings.
    ///
    /// Convenient for headless use and tests where nothing should touch
    /// the user's config directory.
    pub fn with_defaults() -> Self {
        Self::new(&Config::default(), SettingsStore::in_memory())
    }

    // ========================================================================
    // Base image lifecycle
    // ========================================================================

    /// Loads a new base image, replacing any existing work.
    ///
    /// Clears the layer stack (restarting layer ids from 1), abandons any
    /// in-flight gesture, and resets the zoom to fit the host viewport.
    /// Images without a positive pixel area are rejected.
    pub fn load_base_image(&mut self, image: cairo::ImageSurface) {
        let (width, height) = (image.width(), image.height());
        if width <= 0 || height <= 0 {
            warn!("Ignoring base image with invalid size {}x{}", width, height);
            return;
        }

        info!("Loaded {}x{} base image", width, height);
        self.base = Some(image);
        self.stack = LayerStack::new(width, height);
        self.phase = GesturePhase::Idle;
        self.viewport = Some(Viewport::new(width, height, self.fit_width));
    }

    /// Logical pixel dimensions of the loaded base image, if any.
    pub fn base_dimensions(&self) -> Option<(i32, i32)> {
        self.base.as_ref().map(|base| (base.width(), base.height()))
    }

    /// Records the width available to the editor for zoom-to-fit.
    ///
    /// Takes effect on the next zoom reset (including the implicit reset
    /// when a base image loads).
    pub fn set_fit_width(&mut self, width: f64) {
        self.fit_width = width;
        if let Some(viewport) = &mut self.viewport {
            viewport.set_fit_width(width);
        }
    }

    // ========================================================================
    // Tool and style
    // ========================================================================

    /// Selects the tool used by the next gesture.
    ///
    /// A gesture already in flight keeps the tool it started with.
    pub fn set_active_tool(&mut self, tool: ToolKind) {
        self.active_tool = tool;
        debug!("Active tool: {}", tool.id());
    }

    /// The currently selected tool.
    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    /// Read access to the current style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Applies a partial style update.
    pub fn update_style(&mut self, update: StyleUpdate) {
        self.style.apply(update);
    }

    /// Restores every style field to its configured default.
    pub fn reset_style(&mut self) {
        self.style.reset();
    }

    // ========================================================================
    // Layer management
    // ========================================================================

    /// Lists the layers bottom to top.
    pub fn layers(&self) -> Vec<LayerEntry> {
        self.stack
            .iter()
            .map(|layer| LayerEntry {
                id: layer.id(),
                tool: layer.tool(),
            })
            .collect()
    }

    /// Removes a layer by id; unknown ids are a no-op.
    ///
    /// Remaining layers keep their ids and relative order. Removing the
    /// provisional layer of an in-flight gesture leaves the gesture running
    /// against nothing: its remaining redraws silently do nothing.
    pub fn remove_layer(&mut self, id: u32) {
        self.stack.remove(id);
        debug!("Removed layer {}", id);
    }

    // ========================================================================
    // Zoom
    // ========================================================================

    /// Adjusts the on-screen display scale.
    ///
    /// Display scale never affects recorded gesture geometry or the export;
    /// a no-op before any base image is loaded.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        if let Some(viewport) = &mut self.viewport {
            viewport.zoom(direction);
        }
    }

    /// Current display size in on-screen pixels, once an image is loaded.
    pub fn display_size(&self) -> Option<(f64, f64)> {
        self.viewport.as_ref().map(Viewport::display_size)
    }

    // ========================================================================
    // Pointer gestures
    // ========================================================================

    /// Primary-pointer press: begins a drag at the pressed position.
    ///
    /// A stale drag still in flight (e.g. the release event never arrived)
    /// is force-committed first. Non-primary buttons are ignored.
    pub fn pointer_down(&mut self, button: PointerButton, x: f64, y: f64) {
        if button != PointerButton::Primary {
            return;
        }
        let Some((lx, ly)) = self.normalize(x, y) else {
            return;
        };

        if self.phase.is_dragging() {
            debug!("New press interrupts active gesture, committing it");
            self.commit_gesture();
        }

        self.begin_gesture(DragGeometry::at_point(lx, ly));
    }

    /// Pointer motion: updates the drag end point and redraws the
    /// provisional layer. Ignored while idle.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some((lx, ly)) = self.normalize(x, y) else {
            return;
        };

        match &mut self.phase {
            GesturePhase::Dragging { geom, .. } => geom.set_end(lx, ly),
            GesturePhase::Idle => return,
        }
        self.redraw_provisional();
    }

    /// Primary-pointer release: commits the drag.
    ///
    /// Redundant releases while idle are no-ops, not errors.
    pub fn pointer_up(&mut self, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        self.commit_gesture();
    }

    /// Pointer leaving the editor area commits like a release.
    pub fn pointer_leave(&mut self) {
        self.commit_gesture();
    }

    // ========================================================================
    // Two-finger touch gestures
    // ========================================================================

    /// Touch contacts appeared.
    ///
    /// Exactly two contacts start a gesture with both endpoints set at
    /// once: the first contact is the start, the second the end. Any
    /// pending gesture is committed first. Other contact counts are
    /// ignored.
    pub fn touch_start(&mut self, contacts: &[TouchPoint]) {
        if contacts.len() != 2 {
            return;
        }
        let Some(geom) = self.normalize_pair(contacts[0], contacts[1]) else {
            return;
        };

        if self.phase.is_dragging() {
            self.commit_gesture();
        }
        self.begin_gesture(geom);
    }

    /// Touch contacts moved.
    ///
    /// With exactly two contacts both endpoints track the fingers each
    /// frame; any other count commits the gesture.
    pub fn touch_move(&mut self, contacts: &[TouchPoint]) {
        if contacts.len() != 2 {
            self.commit_gesture();
            return;
        }
        let Some(updated) = self.normalize_pair(contacts[0], contacts[1]) else {
            return;
        };

        match &mut self.phase {
            GesturePhase::Dragging { geom, .. } => *geom = updated,
            GesturePhase::Idle => return,
        }
        self.redraw_provisional();
    }

    /// Touch contacts ended or were cancelled.
    ///
    /// `contacts` holds the remaining active contacts. Dropping below two
    /// commits the gesture; with two still down the gesture continues as a
    /// move.
    pub fn touch_end(&mut self, contacts: &[TouchPoint]) {
        if contacts.len() < 2 {
            self.commit_gesture();
        } else {
            self.touch_move(contacts);
        }
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Flattens the base image and every layer into a new raster.
    ///
    /// Includes the provisional layer of a mid-flight gesture without
    /// committing it. Returns `None` before any base image is loaded (or on
    /// an allocation failure, which is logged).
    pub fn export_composite(&self) -> Option<cairo::ImageSurface> {
        let base = self.base.as_ref()?;
        match compose(base, &self.stack) {
            Ok(surface) => Some(surface),
            Err(err) => {
                warn!("Compositing failed: {}", err);
                None
            }
        }
    }

    // ========================================================================
    // Gesture internals
    // ========================================================================

    /// Maps display coordinates to logical space; `None` without an image.
    fn normalize(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.viewport.as_ref().map(|v| v.to_logical(x, y))
    }

    fn normalize_pair(&self, start: TouchPoint, end: TouchPoint) -> Option<DragGeometry> {
        let viewport = self.viewport.as_ref()?;
        let (sx, sy) = viewport.to_logical(start.x, start.y);
        let (ex, ey) = viewport.to_logical(end.x, end.y);
        Some(DragGeometry::with_endpoints(sx, sy, ex, ey))
    }

    /// Binds the active tool, appends a provisional layer, and draws it.
    fn begin_gesture(&mut self, geom: DragGeometry) {
        let tool = self.active_tool;
        let Some(layer_id) = self.stack.append(tool) else {
            debug!("Cannot start a gesture without a layer surface");
            return;
        };

        self.phase = GesturePhase::Dragging {
            tool,
            layer_id,
            geom,
        };
        debug!(
            "Gesture started: {} at ({:.1}, {:.1}) as layer {}",
            tool.id(),
            geom.start_x,
            geom.start_y,
            layer_id
        );
        self.redraw_provisional();
    }

    /// Clears the provisional surface and re-renders the bound tool.
    ///
    /// Silently does nothing when no gesture is active or the provisional
    /// layer no longer exists.
    fn redraw_provisional(&self) {
        let GesturePhase::Dragging {
            tool,
            layer_id,
            geom,
        } = &self.phase
        else {
            return;
        };

        let Some(layer) = self.stack.get(*layer_id) else {
            debug!("Provisional layer {} is gone, skipping redraw", layer_id);
            return;
        };

        let Ok(ctx) = cairo::Context::new(layer.surface()) else {
            debug!("No drawing context for layer {}, skipping redraw", layer_id);
            return;
        };

        draw::clear_surface(&ctx);
        tool.draw(&ctx, geom, &self.style, &self.font);
    }

    /// Finalizes the active gesture: one last draw, then the tool's commit
    /// hook, then back to idle. No-op while idle.
    fn commit_gesture(&mut self) {
        if !self.phase.is_dragging() {
            return;
        }

        self.redraw_provisional();

        let GesturePhase::Dragging { tool, layer_id, .. } =
            std::mem::replace(&mut self.phase, GesturePhase::Idle)
        else {
            return;
        };

        tool.on_commit(&mut self.style);
        debug!("Committed layer {} ({})", layer_id, tool.id());
    }
}

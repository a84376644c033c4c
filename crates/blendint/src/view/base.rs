//! View base state.
//!
//! `ViewBase` holds the state every node in the view tree carries regardless
//! of its behavior: geometry, visibility, rounding, the managed flag, and the
//! `destroyed` signal. It lives in the tree next to the node's behavior, so it
//! stays readable while the behavior is busy handling an event.
//!
//! Geometry setters are crate-private. Outside the crate, geometry only
//! changes through the update-request protocol on [`super::ViewTree`].

use blendint_core::Signal;

use super::ViewId;
use super::round::RoundType;
use crate::geometry::{Point, Rect, Size};

/// The common state of a view.
pub struct ViewBase {
    name: String,
    position: Point,
    size: Size,
    visible: bool,
    round_type: RoundType,
    round_radius: f32,
    /// Owned by the container: destroyed with it.
    managed: bool,
    references: usize,
    hovered: bool,
    focused: bool,
    destroying: bool,
    destroyed: Signal<ViewId>,
}

impl Default for ViewBase {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewBase {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            position: Point::ZERO,
            size: Size::ZERO,
            visible: true,
            round_type: RoundType::NONE,
            round_radius: 0.0,
            managed: true,
            references: 0,
            hovered: false,
            focused: false,
            destroying: false,
            destroyed: Signal::new(),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the container owns this view's lifetime.
    pub fn is_managed(&self) -> bool {
        self.managed
    }

    pub fn set_managed(&mut self, managed: bool) {
        self.managed = managed;
    }

    /// Holders keeping this view alive when its container lets it go.
    ///
    /// A managed view with no references is destroyed when it is removed
    /// from its container or when the container is destroyed.
    pub fn reference_count(&self) -> usize {
        self.references
    }

    pub(crate) fn retain(&mut self) -> usize {
        self.references += 1;
        self.references
    }

    pub(crate) fn release(&mut self) -> usize {
        self.references = self.references.saturating_sub(1);
        self.references
    }

    /// Set once destruction has started; the view is about to disappear.
    pub fn is_destroying(&self) -> bool {
        self.destroying
    }

    pub(crate) fn mark_destroying(&mut self) {
        self.destroying = true;
    }

    /// Fired exactly once, while the view is still fully intact, when it is destroyed.
    pub fn destroyed(&self) -> &Signal<ViewId> {
        &self.destroyed
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Bottom-left corner relative to the container.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Rectangle in the container's coordinate space.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size.clamp_non_negative();
    }

    // =========================================================================
    // Decoration and state
    // =========================================================================

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn round_type(&self) -> RoundType {
        self.round_type
    }

    pub(crate) fn set_round_type(&mut self, round_type: RoundType) {
        self.round_type = RoundType::from_bits(round_type.bits() as u32);
    }

    #[inline]
    pub fn round_radius(&self) -> f32 {
        self.round_radius
    }

    pub(crate) fn set_round_radius(&mut self, radius: f32) {
        self.round_radius = radius.max(0.0);
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl std::fmt::Debug for ViewBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewBase")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("visible", &self.visible)
            .field("round_type", &self.round_type)
            .field("managed", &self.managed)
            .field("references", &self.references)
            .finish()
    }
}

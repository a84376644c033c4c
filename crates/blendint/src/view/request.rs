//! Update requests carried through the Perform/Report protocol.

use super::ViewId;
use super::round::RoundType;
use crate::geometry::{Point, Size};

/// A geometry or decoration change travelling through the tree.
///
/// `source` is the view that started the change, `target` the view whose
/// state the change applies to. A view that started a request for itself has
/// `source == target`; a parent resizing a child has `source == parent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateRequest<T> {
    source: ViewId,
    target: ViewId,
    data: T,
}

impl<T: Copy> UpdateRequest<T> {
    pub fn new(source: ViewId, target: ViewId, data: T) -> Self {
        Self {
            source,
            target,
            data,
        }
    }

    #[inline]
    pub fn source(&self) -> ViewId {
        self.source
    }

    #[inline]
    pub fn target(&self) -> ViewId {
        self.target
    }

    #[inline]
    pub fn data(&self) -> T {
        self.data
    }
}

pub type SizeUpdateRequest = UpdateRequest<Size>;
pub type PositionUpdateRequest = UpdateRequest<Point>;
pub type RoundTypeUpdateRequest = UpdateRequest<RoundType>;
pub type RoundRadiusUpdateRequest = UpdateRequest<f32>;
pub type VisibilityUpdateRequest = UpdateRequest<bool>;

/// A public mutation deferred until the in-flight propagation finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PendingUpdate {
    Size(ViewId, Size),
    Position(ViewId, Point),
    RoundType(ViewId, RoundType),
    RoundRadius(ViewId, f32),
    Visibility(ViewId, bool),
    SubviewsChanged(ViewId),
    PreferredSizeChanged(ViewId),
}

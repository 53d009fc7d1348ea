//! Click Router — decides whether a click on a tab entry activates the tab.
//!
//! Clicks that land in a nested control (close, close-with-children) must not
//! also activate the tab. The router walks from the click target towards the
//! root looking for a control marker.

use crate::types::element::{ControlMarker, ElementId, ElementTree};

/// A visual hierarchy that can be walked upwards.
pub trait UiTree {
    type Node: Copy;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    fn has_marker(&self, node: Self::Node, marker: ControlMarker) -> bool;
}

impl UiTree for ElementTree {
    type Node = ElementId;

    fn parent(&self, node: ElementId) -> Option<ElementId> {
        ElementTree::parent(self, node)
    }

    fn has_marker(&self, node: ElementId, marker: ControlMarker) -> bool {
        ElementTree::has_marker(self, node, marker)
    }
}

const NESTED_CONTROLS: [ControlMarker; 2] =
    [ControlMarker::Close, ControlMarker::CloseWithChildren];

pub struct ClickRouter;

impl ClickRouter {
    /// Returns `false` if `target` or any of its ancestors below the root is
    /// a nested control.
    ///
    /// The tree root is the entry boundary and its markers are never read,
    /// so a tree must be rooted at the entry itself, not at a nested control.
    pub fn should_activate<T: UiTree>(tree: &T, target: T::Node) -> bool {
        let mut node = target;
        while let Some(parent) = tree.parent(node) {
            if NESTED_CONTROLS.iter().any(|m| tree.has_marker(node, *m)) {
                return false;
            }
            node = parent;
        }
        true
    }
}

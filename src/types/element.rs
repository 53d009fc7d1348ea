//! A minimal visual tree: elements with a parent link and control markers.

/// Index of an element inside an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// Marks an element as a nested interactive control inside a tab entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlMarker {
    Close,
    CloseWithChildren,
}

#[derive(Debug, Clone)]
struct Element {
    name: &'static str,
    parent: Option<ElementId>,
    markers: Vec<ControlMarker>,
}

/// Arena of elements. The first element added is the root.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    elements: Vec<Element>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the root element (no parent).
    pub fn add_root(&mut self, name: &'static str) -> ElementId {
        self.push(name, None, Vec::new())
    }

    /// Adds a child of `parent` carrying the given markers.
    pub fn add_child(
        &mut self,
        parent: ElementId,
        name: &'static str,
        markers: &[ControlMarker],
    ) -> ElementId {
        self.push(name, Some(parent), markers.to_vec())
    }

    fn push(
        &mut self,
        name: &'static str,
        parent: Option<ElementId>,
        markers: Vec<ControlMarker>,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            name,
            parent,
            markers,
        });
        id
    }

    pub fn name(&self, id: ElementId) -> Option<&'static str> {
        self.elements.get(id.0).map(|e| e.name)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id.0).and_then(|e| e.parent)
    }

    pub fn has_marker(&self, id: ElementId, marker: ControlMarker) -> bool {
        self.elements
            .get(id.0)
            .is_some_and(|e| e.markers.contains(&marker))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

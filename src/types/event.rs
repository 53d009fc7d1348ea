use super::element::ElementId;

/// A pointer event delivered to a tab entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Element the pointer was over.
    pub target: ElementId,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    /// Stops the host from running its own handling of this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

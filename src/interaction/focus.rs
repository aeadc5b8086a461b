use crate::core::NodeId;

/// Tab order over focusable containers, in registration order.
#[derive(Debug, Default, Clone)]
pub struct FocusOrder {
    targets: Vec<NodeId>,
}

impl FocusOrder {
    pub fn new(targets: Vec<NodeId>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn position(&self, id: Option<&NodeId>) -> Option<usize> {
        let id = id?;
        self.targets.iter().position(|target| target == id)
    }

    /// Target after `current`, wrapping. With no current target the first
    /// one is chosen.
    pub fn next(&self, current: Option<&NodeId>) -> Option<NodeId> {
        if self.targets.is_empty() {
            return None;
        }
        let index = match self.position(current) {
            Some(idx) => (idx + 1) % self.targets.len(),
            None => 0,
        };
        self.targets.get(index).cloned()
    }

    /// Target before `current`, wrapping. With no current target the last
    /// one is chosen.
    pub fn prev(&self, current: Option<&NodeId>) -> Option<NodeId> {
        if self.targets.is_empty() {
            return None;
        }
        let len = self.targets.len();
        let index = match self.position(current) {
            Some(idx) => (idx + len - 1) % len,
            None => len - 1,
        };
        self.targets.get(index).cloned()
    }
}

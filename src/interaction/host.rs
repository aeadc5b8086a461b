use super::document::{Delivery, Document, UiEvent};
use crate::core::NodeId;
use crate::field::controller::Field;
use indexmap::IndexMap;
use tracing::trace;

/// What the host could not hand to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOutcome {
    /// Bubble-phase clicks for the caller's own listeners (row handlers).
    pub bubbled: Vec<NodeId>,
    /// Deliveries a field acted on.
    pub handled: usize,
}

/// Owns a document and the fields mounted on it, in mount order.
#[derive(Default)]
pub struct FieldHost {
    document: Document,
    fields: IndexMap<NodeId, Field>,
}

impl FieldHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn mount(&mut self, mut field: Field) {
        field.mount(&self.document);
        if let Some(mut previous) = self.fields.insert(field.id().clone(), field) {
            previous.unmount();
        }
    }

    pub fn unmount(&mut self, id: &NodeId) -> Option<Field> {
        let mut field = self.fields.shift_remove(id)?;
        field.unmount();
        Some(field)
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.get(id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.get_mut(id)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn dispatch(&mut self, event: UiEvent) -> HostOutcome {
        let mut outcome = HostOutcome::default();
        for delivery in self.document.dispatch(event) {
            if let Delivery::Bubble { element } = delivery {
                outcome.bubbled.push(element);
                continue;
            }
            let Some(field) = self.fields.get_mut(delivery.target().as_str()) else {
                trace!(target_id = %delivery.target(), "delivery without a mounted field");
                continue;
            };
            if field.deliver(delivery) {
                outcome.handled += 1;
            }
        }
        outcome
    }
}

use crate::dom::{DomElement, DomEvent};
use crate::selector::selector_for;
use chrono::{DateTime, Utc};
use interactor_common::protocol::{Category, InteractionRecord};

/// Ordered, append-only buffer of captured interactions.
///
/// Filtering happens upstream in the lifecycle controller; the recorder only
/// refuses events it cannot turn into a well-formed record.
#[derive(Debug, Default)]
pub struct InteractionRecorder {
    records: Vec<InteractionRecord>,
    debug: bool,
}

impl InteractionRecorder {
    pub fn new(debug: bool) -> Self {
        Self {
            records: Vec::new(),
            debug,
        }
    }

    /// Snapshot the event target and append a record.
    ///
    /// Events without a target are dropped.
    pub fn record<E: DomElement>(
        &mut self,
        event: &DomEvent<E>,
        category: Category,
        captured_at: DateTime<Utc>,
    ) {
        let Some(target) = event.target.as_ref() else {
            if self.debug {
                tracing::warn!(
                    event = %event.event_type,
                    category = %category,
                    "Skipping interaction without target"
                );
            }
            return;
        };

        let record = InteractionRecord {
            category,
            event_name: event.event_type.clone(),
            target_tag: target.tag_name(),
            target_classes: target.class_name(),
            target_id: target.id(),
            text_content: target.inner_text(),
            selector: selector_for(target),
            client_position: event.client.unwrap_or_default(),
            screen_position: event.screen.unwrap_or_default(),
            timestamp: captured_at,
        };

        if self.debug {
            match serde_json::to_string(&record) {
                Ok(json) => tracing::info!(selector = %record.selector, "Interaction: {}", json),
                Err(e) => tracing::warn!("Interaction could not be serialized: {}", e),
            }
        }

        self.records.push(record);
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Move the buffer out, leaving the recorder empty.
    pub fn take_records(&mut self) -> Vec<InteractionRecord> {
        std::mem::take(&mut self.records)
    }
}

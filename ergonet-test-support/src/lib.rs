//! Shared test utilities used across ergonet crates.

pub mod tracing {
    //! Recording layer utilities for capturing spans and events in tests.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    /// Recording layer installed during tests to capture events for later
    /// assertions. The layer records structured metadata so behavioural
    /// tests can verify instrumentation deterministically.
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        events: Arc<Mutex<Vec<EventRecord>>>,
    }

    impl RecordingLayer {
        /// Returns a snapshot of the emitted events in emission order.
        ///
        /// # Examples
        /// ```
        /// use ergonet_test_support::tracing::RecordingLayer;
        ///
        /// let layer = RecordingLayer::default();
        /// assert!(layer.events().is_empty());
        /// ```
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            self.events.lock().expect("lock poisoned").clone()
        }

        /// Whether any recorded event's message contains `needle`.
        #[must_use]
        pub fn saw_message(&self, needle: &str) -> bool {
            self.events()
                .iter()
                .any(|event| event.message.contains(needle))
        }
    }

    /// Snapshot of one emitted event: level, target, rendered message and
    /// structured fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target (usually the module path).
        pub target: String,
        /// Rendered `message` field, empty when absent.
        pub message: String,
        /// Remaining fields, rendered with `Debug`.
        pub fields: HashMap<String, String>,
    }

    #[derive(Default)]
    struct FieldVisitor {
        message: String,
        fields: HashMap<String, String>,
    }

    impl Visit for FieldVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.message = format!("{value:?}");
            } else {
                self.fields
                    .insert(field.name().to_owned(), format!("{value:?}"));
            }
        }
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            self.events.lock().expect("lock poisoned").push(EventRecord {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                message: visitor.message,
                fields: visitor.fields,
            });
        }
    }
}

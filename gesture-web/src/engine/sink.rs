//! Event sinks - where named gesture events go

use serde::Serialize;

use crate::detectors::GestureEvent;

/// Payload delivered with every emitted event
///
/// Serializes as the gesture record itself; `detector` is only present on
/// the generic `gesture:detected` event.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct EventPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detector: Option<&'a str>,
    #[serde(flatten)]
    pub event: &'a GestureEvent,
}

impl<'a> EventPayload<'a> {
    pub fn gesture(event: &'a GestureEvent) -> Self {
        Self { detector: None, event }
    }

    pub fn detected(detector: &'a str, event: &'a GestureEvent) -> Self {
        Self {
            detector: Some(detector),
            event,
        }
    }
}

/// Receives named events from the engine, in emission order
pub trait EventSink {
    fn emit(&mut self, name: &str, payload: &EventPayload<'_>);
}

impl<F> EventSink for F
where
    F: FnMut(&str, &EventPayload<'_>),
{
    fn emit(&mut self, name: &str, payload: &EventPayload<'_>) {
        self(name, payload)
    }
}

/// Owned copy of one emitted event
#[derive(Clone, Debug, PartialEq)]
pub struct EmittedEvent {
    pub name: String,
    pub detector: Option<String>,
    pub event: GestureEvent,
}

/// Sink that keeps everything it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<EmittedEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EmittedEvent] {
        &self.events
    }

    pub fn names(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name == name).count()
    }

    pub fn take(&mut self) -> Vec<EmittedEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, name: &str, payload: &EventPayload<'_>) {
        self.events.push(EmittedEvent {
            name: name.to_string(),
            detector: payload.detector.map(str::to_string),
            event: payload.event.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::{PushDirection, PushEvent};
    use crate::landmarks::Handedness;
    use serde_json::json;

    fn push_event() -> GestureEvent {
        GestureEvent::Push(PushEvent {
            direction: PushDirection::Forward,
            depth: 0.5,
            velocity: 2.0,
            handedness: Handedness::Left,
            timestamp: 100.0,
        })
    }

    #[test]
    fn test_payload_shape() {
        let event = push_event();
        let named = serde_json::to_value(EventPayload::gesture(&event)).unwrap();
        assert_eq!(
            named,
            json!({
                "type": "push",
                "direction": "forward",
                "depth": 0.5,
                "velocity": 2.0,
                "handedness": "Left",
                "timestamp": 100.0
            })
        );

        let generic = serde_json::to_value(EventPayload::detected("push", &event)).unwrap();
        assert_eq!(generic["detector"], "push");
        assert_eq!(generic["type"], "push");
    }

    /// Pins the closure to the higher-ranked sink signature
    fn closure_sink<F: FnMut(&str, &EventPayload<'_>)>(f: F) -> F {
        f
    }

    #[test]
    fn test_closure_sink() {
        let event = push_event();
        let mut seen = Vec::new();
        {
            let mut sink = closure_sink(|name, payload| {
                seen.push((name.to_string(), payload.detector.is_some()));
            });
            sink.emit("gesture:push:forward", &EventPayload::gesture(&event));
        }
        assert_eq!(seen, vec![("gesture:push:forward".to_string(), false)]);
    }

    #[test]
    fn test_recording_sink() {
        let event = push_event();
        let mut sink = RecordingSink::new();
        sink.emit("gesture:push:forward", &EventPayload::gesture(&event));
        sink.emit("gesture:detected", &EventPayload::detected("push", &event));
        assert_eq!(sink.names(), vec!["gesture:push:forward", "gesture:detected"]);
        assert_eq!(sink.events()[1].detector.as_deref(), Some("push"));
        assert_eq!(sink.take().len(), 2);
        assert!(sink.events().is_empty());
    }
}

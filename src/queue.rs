// Event queue: where completed logins are recorded.
// `ConsoleQueue` only acknowledges events on its writer; `MemoryQueue`
// keeps them in process. Both sit behind `EventSink` so a durable backend
// can replace them without touching the login flow.

use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, info};

/// Event type recorded after a granted login.
pub const LOGIN_OK: &str = "LOGIN_OK";

/// A login event. Serializes as `{"type", "payload", "created_at"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: BTreeMap<String, String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Event {
            kind: kind.into(),
            payload: BTreeMap::new(),
            created_at: None,
        }
    }

    /// `LOGIN_OK` carrying the user code, stamped with the current time.
    pub fn login_ok(user_code: &str) -> Self {
        Event::new(LOGIN_OK)
            .with_payload("user_code", user_code)
            .stamped()
    }

    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Set `created_at` to now, UTC, RFC 3339.
    pub fn stamped(mut self) -> Self {
        self.created_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        self
    }
}

/// Something that accepts login events.
pub trait EventSink {
    fn enqueue(&mut self, event: Event) -> Result<()>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn enqueue(&mut self, event: Event) -> Result<()> {
        (**self).enqueue(event)
    }
}

/// Prints `queued event: <TYPE>` and drops the event.
// TODO: back this with SQLite so events survive restarts.
pub struct ConsoleQueue<W: Write> {
    out: W,
}

impl ConsoleQueue<std::io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleQueue::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleQueue<W> {
    pub fn new(out: W) -> Self {
        ConsoleQueue { out }
    }
}

impl<W: Write> EventSink for ConsoleQueue<W> {
    fn enqueue(&mut self, event: Event) -> Result<()> {
        let json = serde_json::to_string(&event)?;
        debug!(event = %json, "event payload");
        writeln!(self.out, "queued event: {}", event.kind)?;
        self.out.flush()?;
        info!(event_type = %event.kind, "event queued");
        Ok(())
    }
}

/// Keeps events in arrival order.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    events: Vec<Event>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for MemoryQueue {
    fn enqueue(&mut self, event: Event) -> Result<()> {
        info!(event_type = %event.kind, "event queued in memory");
        self.events.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_queue_prints_event_type_only() {
        let mut buf = Vec::new();
        ConsoleQueue::new(&mut buf)
            .enqueue(Event::login_ok("alice123"))
            .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "queued event: LOGIN_OK\n");
    }

    #[test]
    fn memory_queue_keeps_arrival_order() {
        let mut queue = MemoryQueue::new();
        assert!(queue.is_empty());
        queue.enqueue(Event::new("A")).unwrap();
        queue.enqueue(Event::new("B")).unwrap();
        let kinds: Vec<&str> = queue.events().iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["A", "B"]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn login_event_carries_user_code_and_timestamp() {
        let event = Event::login_ok("alice123");
        assert_eq!(event.kind, LOGIN_OK);
        assert_eq!(event.payload.get("user_code").map(String::as_str), Some("alice123"));
        let created_at = event.created_at.expect("timestamp set");
        assert!(chrono::DateTime::parse_from_rfc3339(&created_at).is_ok());
    }

    #[test]
    fn new_event_has_empty_payload_and_no_timestamp() {
        let event = Event::new("LOGOUT");
        assert!(event.payload.is_empty());
        assert!(event.created_at.is_none());
    }

    #[test]
    fn serializes_kind_as_type() {
        let event = Event::new(LOGIN_OK).with_payload("user_code", "bob");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "LOGIN_OK");
        assert_eq!(json["payload"]["user_code"], "bob");
        assert!(json["created_at"].is_null());

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn sink_works_through_mutable_reference() {
        fn record<S: EventSink>(mut sink: S) {
            sink.enqueue(Event::new(LOGIN_OK)).unwrap();
        }

        let mut queue = MemoryQueue::new();
        record(&mut queue);
        assert_eq!(queue.len(), 1);
    }
}

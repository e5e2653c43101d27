//! Event source and sink boundaries, plus an in-memory event queue.
//!
//! The grammar engine that turns text into events (and back) lives outside
//! this crate. It plugs in through [`EventSource`] and [`EventSink`]. The
//! [`EventQueue`] implements both over a ring buffer of owned events, which
//! is what tests and pre-built event sequences use.
//!
//! # Architecture
//!
//! ```text
//!  Emitter            EventQueue (sink side)              Reader
//!     │──push(event)──▶│ ring ──flush──▶ delivered │         │
//!     │                                                      │
//!     │            EventQueue (source side)                  │
//!     │                │ ring │◀────────────pull()───────────│
//! ```

use crate::error::{Error, Result};
use crate::event::{Encoding, Event, ScalarStyle};

/// Pull side of the grammar engine.
pub trait EventSource {
    /// Fix the text encoding. Called once, before the first pull.
    fn set_encoding(&mut self, encoding: Encoding) {
        let _ = encoding;
    }

    /// Yield the next event.
    ///
    /// Failure is opaque and not recoverable: report it as
    /// [`Error::UnderlyingFailure`].
    fn pull(&mut self) -> Result<Event<'_>>;
}

/// Push side of the grammar engine.
pub trait EventSink {
    /// Accept one event for output.
    fn push(&mut self, event: Event<'_>) -> Result<()>;

    /// Deliver buffered output to its final destination.
    fn flush(&mut self) -> Result<()>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn set_encoding(&mut self, encoding: Encoding) {
        (**self).set_encoding(encoding)
    }

    fn pull(&mut self) -> Result<Event<'_>> {
        (**self).pull()
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn push(&mut self, event: Event<'_>) -> Result<()> {
        (**self).push(event)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Fixed-size ring buffer of owned events.
///
/// Uses power-of-2 sizing for fast modulo via bitmask. As a source, pulls
/// pop from the front; pulling from an empty queue is an underlying failure
/// (the stream ended early). As a sink, pushed events are buffered in the
/// ring and moved to [`EventQueue::delivered`] on flush, or when the ring
/// is full.
#[derive(Debug)]
pub struct EventQueue {
    /// The actual event storage (power-of-2 sized)
    events: Vec<Option<Event<'static>>>,
    /// Read position (consumer)
    read_pos: usize,
    /// Write position (producer)
    write_pos: usize,
    /// Number of events currently in buffer
    count: usize,
    /// Capacity (power of 2) - stored directly for fast full check
    capacity: usize,
    /// Bitmask for fast modulo (capacity - 1)
    mask: usize,
    /// Events flushed out of the ring
    delivered: Vec<Event<'static>>,
    encoding: Encoding,
}

impl EventQueue {
    /// Create a new queue with at least the given capacity.
    /// Actual capacity will be rounded up to the next power of 2.
    pub fn new(min_capacity: usize) -> Self {
        let capacity = min_capacity.max(2).next_power_of_two();
        let mut events = Vec::with_capacity(capacity);
        events.resize_with(capacity, || None);
        Self {
            events,
            read_pos: 0,
            write_pos: 0,
            count: 0,
            capacity,
            mask: capacity - 1,
            delivered: Vec::new(),
            encoding: Encoding::Any,
        }
    }

    /// Create with default capacity (1024 events).
    pub fn with_default_capacity() -> Self {
        Self::new(1024)
    }

    /// Build a source that yields `events` in order.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event<'static>>,
    {
        let events: Vec<_> = events.into_iter().collect();
        let mut queue = Self::new(events.len());
        for event in events {
            // Sized to fit, cannot be full.
            let _ = queue.try_push(event);
        }
        queue
    }

    /// Actual capacity (power of 2).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of events buffered in the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Encoding configured by the reader, if any.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Try to buffer an event. Returns it back if the ring is full.
    pub fn try_push(&mut self, event: Event<'static>) -> Result<(), Event<'static>> {
        if self.count == self.capacity {
            return Err(event);
        }
        self.events[self.write_pos] = Some(event);
        self.write_pos = (self.write_pos + 1) & self.mask;
        self.count += 1;
        Ok(())
    }

    /// Pop an event from the front. Returns None if empty.
    pub fn pop(&mut self) -> Option<Event<'static>> {
        if self.count == 0 {
            return None;
        }
        let event = self.events[self.read_pos].take();
        self.read_pos = (self.read_pos + 1) & self.mask;
        self.count -= 1;
        event
    }

    /// Peek at the front event without removing it.
    pub fn peek(&self) -> Option<&Event<'static>> {
        if self.count == 0 {
            return None;
        }
        self.events[self.read_pos].as_ref()
    }

    /// Iterate over buffered events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &Event<'static>> {
        let mask = self.mask;
        let read_pos = self.read_pos;
        let events = &self.events;
        (0..self.count).filter_map(move |i| events[(read_pos + i) & mask].as_ref())
    }

    /// Events delivered by flushing, in push order.
    pub fn delivered(&self) -> &[Event<'static>] {
        &self.delivered
    }

    /// Take the delivered events, leaving the log empty.
    pub fn take_delivered(&mut self) -> Vec<Event<'static>> {
        std::mem::take(&mut self.delivered)
    }

    /// Move every buffered event to the delivered log.
    fn drain_to_delivered(&mut self) {
        self.delivered.reserve(self.count);
        while let Some(event) = self.pop() {
            self.delivered.push(event);
        }
    }

    /// Drop all buffered events.
    pub fn clear(&mut self) {
        for i in 0..self.count {
            let idx = (self.read_pos + i) & self.mask;
            self.events[idx] = None;
        }
        self.read_pos = 0;
        self.write_pos = 0;
        self.count = 0;
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl EventSource for EventQueue {
    fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    fn pull(&mut self) -> Result<Event<'_>> {
        self.pop().ok_or_else(|| {
            tracing::debug!("event queue exhausted");
            Error::underlying("unexpected end of event stream")
        })
    }
}

/// Choose a style where the emitter left it open: untagged scalars are
/// rendered plain. Tagged scalars keep `Any`; their tag types them.
fn settle_style(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Scalar(mut scalar) if scalar.style == ScalarStyle::Any && scalar.tag.is_none() => {
            scalar.style = ScalarStyle::Plain;
            Event::Scalar(scalar)
        }
        other => other,
    }
}

impl EventSink for EventQueue {
    fn push(&mut self, event: Event<'_>) -> Result<()> {
        if let Err(event) = self.try_push(settle_style(event).into_owned()) {
            self.drain_to_delivered();
            // The ring was just emptied.
            let _ = self.try_push(event);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.drain_to_delivered();
        Ok(())
    }
}

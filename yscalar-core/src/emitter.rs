//! Push-side session over an event sink.
//!
//! Typed emits go through the canonical forms of [`crate::scalar`]: null as
//! `~`, booleans as plain `y`/`n`, integers in base 10, strings double-quoted
//! and binary as tagged base64.

use std::borrow::Cow;

use crate::base64;
use crate::error::{Error, Result};
use crate::event::{Encoding, Event, Scalar, ScalarStyle};
use crate::scalar;
use crate::stream::EventSink;
use crate::tag::BINARY_TAG;
use crate::value::Value;

/// Encoded binary payloads (terminator included) up to this size are built on
/// the stack.
const STACK_BUFFER_LEN: usize = 256;

/// Emitter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Tag attached to binary scalars.
    pub binary_tag: Cow<'static, str>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            binary_tag: Cow::Borrowed(BINARY_TAG),
        }
    }
}

impl EmitterConfig {
    pub fn with_binary_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.binary_tag = tag.into();
        self
    }
}

/// Single-owner emitting session.
///
/// [`Emitter::finish`] flushes and hands the sink back. An emitter dropped
/// without finishing still flushes, logging rather than returning a failure.
#[derive(Debug)]
pub struct Emitter<S: EventSink> {
    /// `None` once finished
    sink: Option<S>,
    config: EmitterConfig,
}

impl<S: EventSink> Emitter<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, EmitterConfig::default())
    }

    pub fn with_config(sink: S, config: EmitterConfig) -> Self {
        Self {
            sink: Some(sink),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    fn push(sink: &mut Option<S>, event: Event<'_>) -> Result<()> {
        let sink = sink
            .as_mut()
            .ok_or_else(|| Error::underlying("emitter already finished"))?;
        tracing::trace!(kind = ?event.kind(), "emit");
        sink.push(event)
    }

    #[inline]
    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        Self::push(&mut self.sink, event)
    }

    // ========== Structure ==========

    pub fn stream_start(&mut self) -> Result<()> {
        self.emit(Event::StreamStart {
            encoding: Encoding::Utf8,
        })
    }

    pub fn stream_end(&mut self) -> Result<()> {
        self.emit(Event::StreamEnd)
    }

    /// Explicit `---`.
    pub fn document_start(&mut self) -> Result<()> {
        self.emit(Event::DocumentStart { implicit: false })
    }

    /// Explicit `...`.
    pub fn document_end(&mut self) -> Result<()> {
        self.emit(Event::DocumentEnd { implicit: false })
    }

    pub fn mapping_start(&mut self, tag: Option<&str>) -> Result<()> {
        self.emit(Event::MappingStart {
            tag: tag.map(Cow::Borrowed),
        })
    }

    pub fn mapping_end(&mut self) -> Result<()> {
        self.emit(Event::MappingEnd)
    }

    pub fn sequence_start(&mut self, tag: Option<&str>) -> Result<()> {
        self.emit(Event::SequenceStart {
            tag: tag.map(Cow::Borrowed),
        })
    }

    pub fn sequence_end(&mut self) -> Result<()> {
        self.emit(Event::SequenceEnd)
    }

    // ========== Scalars ==========

    /// Emit a scalar as given, without typing.
    pub fn scalar(&mut self, value: &[u8], tag: Option<&str>, style: ScalarStyle) -> Result<()> {
        let scalar = Scalar::new(value, tag.map(Cow::Borrowed), style);
        self.emit(Event::Scalar(scalar))
    }

    pub fn null(&mut self) -> Result<()> {
        self.emit(Event::Scalar(scalar::null_scalar()))
    }

    pub fn boolean(&mut self, value: bool) -> Result<()> {
        self.emit(Event::Scalar(scalar::boolean_scalar(value)))
    }

    pub fn integer(&mut self, value: i64) -> Result<()> {
        self.emit(Event::Scalar(scalar::integer_scalar(value)))
    }

    pub fn unsigned_integer(&mut self, value: u64) -> Result<()> {
        self.emit(Event::Scalar(scalar::unsigned_integer_scalar(value)))
    }

    pub fn string(&mut self, value: &[u8]) -> Result<()> {
        self.emit(Event::Scalar(scalar::string_scalar(value)))
    }

    /// Emit bytes as a base64 scalar tagged with the configured binary tag.
    pub fn binary(&mut self, data: &[u8]) -> Result<()> {
        let needed = base64::encoded_len(data.len()) + 1;
        let mut stack = [0u8; STACK_BUFFER_LEN];
        let mut heap: Vec<u8>;
        let buffer: &mut [u8] = if needed <= STACK_BUFFER_LEN {
            &mut stack
        } else {
            heap = vec![0u8; needed];
            &mut heap
        };
        let n = base64::encode_into(data, buffer);

        let event = Event::Scalar(scalar::binary_scalar(&buffer[..n], &self.config.binary_tag));
        Self::push(&mut self.sink, event)
    }

    /// Emit a typed value in its canonical form.
    pub fn value(&mut self, value: &Value<'_>) -> Result<()> {
        match value {
            Value::Null => self.null(),
            Value::Bool(b) => self.boolean(*b),
            Value::Integer(i) => self.integer(*i),
            Value::UnsignedInteger(u) => self.unsigned_integer(*u),
            Value::String(s) => self.string(s),
            Value::Binary(data) => self.binary(data),
        }
    }

    // ========== Teardown ==========

    pub fn flush(&mut self) -> Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Err(Error::underlying("emitter already finished")),
        }
    }

    /// Flush and end the session, giving back the sink.
    pub fn finish(mut self) -> Result<S> {
        let mut sink = self
            .sink
            .take()
            .ok_or_else(|| Error::underlying("emitter already finished"))?;
        sink.flush()?;
        Ok(sink)
    }
}

impl<S: EventSink> Drop for Emitter<S> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.flush() {
                tracing::warn!(%err, "flush on drop failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::EventQueue;

    /// Sink that counts flushes and can be told to fail them.
    #[derive(Debug, Default)]
    struct Recorder {
        events: Vec<Event<'static>>,
        flushes: usize,
        fail_flush: bool,
    }

    impl EventSink for Recorder {
        fn push(&mut self, event: Event<'_>) -> Result<()> {
            self.events.push(event.into_owned());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes += 1;
            if self.fail_flush {
                return Err(Error::underlying("disk full"));
            }
            Ok(())
        }
    }

    fn scalar_of(event: &Event<'_>) -> Scalar<'static> {
        event.as_scalar().unwrap().clone().into_owned()
    }

    #[test]
    fn test_typed_emits() {
        let mut emitter = Emitter::new(EventQueue::default());
        emitter.null().unwrap();
        emitter.boolean(true).unwrap();
        emitter.boolean(false).unwrap();
        emitter.integer(i64::MIN).unwrap();
        emitter.unsigned_integer(u64::MAX).unwrap();
        emitter.string(b"0").unwrap();
        let queue = emitter.finish().unwrap();

        let scalars: Vec<_> = queue.delivered().iter().map(scalar_of).collect();
        assert_eq!(
            scalars,
            [
                // The queue settles the open style of null to plain.
                Scalar::plain(&b"~"[..]),
                Scalar::plain(&b"y"[..]),
                Scalar::plain(&b"n"[..]),
                Scalar::plain(&b"-9223372036854775808"[..]),
                Scalar::plain(&b"18446744073709551615"[..]),
                Scalar::styled(&b"0"[..], ScalarStyle::DoubleQuoted),
            ]
        );
    }

    #[test]
    fn test_binary_stack_and_heap() {
        let small = vec![0xAB; 10];
        // 189 bytes encode to exactly 252 symbols plus terminator.
        let edge = vec![0x01; 189];
        let large = vec![0xFF; 1000];

        let mut emitter = Emitter::new(EventQueue::default());
        emitter.binary(&small).unwrap();
        emitter.binary(&edge).unwrap();
        emitter.binary(&large).unwrap();
        emitter.binary(b"").unwrap();
        let queue = emitter.finish().unwrap();

        let delivered = queue.delivered();
        assert_eq!(delivered.len(), 4);
        for (event, data) in delivered.iter().zip([&small, &edge, &large, &Vec::new()]) {
            let scalar = event.as_scalar().unwrap();
            assert_eq!(scalar.tag(), Some(BINARY_TAG));
            assert_eq!(scalar.style, ScalarStyle::Any);
            assert_eq!(scalar.len(), base64::encoded_len(data.len()));
            assert_eq!(&scalar::parse_binary(scalar).unwrap(), data);
        }
    }

    #[test]
    fn test_binary_tag_override() {
        let config = EmitterConfig::default().with_binary_tag("!bytes");
        let mut emitter = Emitter::with_config(EventQueue::default(), config);
        assert_eq!(emitter.config().binary_tag, "!bytes");
        emitter.binary(b"abc").unwrap();
        let queue = emitter.finish().unwrap();
        let scalar = queue.delivered()[0].as_scalar().unwrap();
        assert_eq!(scalar.tag(), Some("!bytes"));
        assert_eq!(scalar.value(), b"YWJj");
    }

    #[test]
    fn test_value_dispatch() {
        let mut emitter = Emitter::new(EventQueue::default());
        emitter.value(&Value::String(b"hi")).unwrap();
        emitter.value(&Value::Binary(b"hi".to_vec())).unwrap();
        emitter.value(&Value::Integer(-5)).unwrap();
        let queue = emitter.finish().unwrap();
        let delivered = queue.delivered();
        assert_eq!(scalar_of(&delivered[0]), Scalar::styled(&b"hi"[..], ScalarStyle::DoubleQuoted));
        assert_eq!(delivered[1].tag(), Some(BINARY_TAG));
        assert_eq!(scalar_of(&delivered[2]), Scalar::plain(&b"-5"[..]));
    }

    #[test]
    fn test_structure() {
        let mut queue = EventQueue::default();
        {
            let mut emitter = Emitter::new(&mut queue);
            emitter.stream_start().unwrap();
            emitter.document_start().unwrap();
            emitter.sequence_start(None).unwrap();
            emitter.mapping_start(Some("!point")).unwrap();
            emitter.mapping_end().unwrap();
            emitter.sequence_end().unwrap();
            emitter.scalar(b"raw", Some("!x"), ScalarStyle::Literal).unwrap();
            emitter.document_end().unwrap();
            emitter.stream_end().unwrap();
        }
        // Dropping the emitter flushed.
        assert!(queue.is_empty());
        assert_eq!(
            queue.delivered(),
            [
                Event::StreamStart { encoding: Encoding::Utf8 },
                Event::DocumentStart { implicit: false },
                Event::sequence_start(),
                Event::MappingStart { tag: Some(Cow::Borrowed("!point")) },
                Event::MappingEnd,
                Event::SequenceEnd,
                Event::Scalar(Scalar::styled(&b"raw"[..], ScalarStyle::Literal).with_tag("!x")),
                Event::DocumentEnd { implicit: false },
                Event::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_finish_flushes_once() {
        let mut emitter = Emitter::new(Recorder::default());
        emitter.integer(1).unwrap();
        emitter.flush().unwrap();
        let recorder = emitter.finish().unwrap();
        // Explicit flush plus finish; drop after finish does nothing.
        assert_eq!(recorder.flushes, 2);
        assert_eq!(recorder.events.len(), 1);
    }

    #[test]
    fn test_finish_reports_flush_failure() {
        let sink = Recorder {
            fail_flush: true,
            ..Recorder::default()
        };
        let emitter = Emitter::new(sink);
        assert!(emitter.finish().unwrap_err().is_fatal());
    }

    #[test]
    fn test_drop_swallows_flush_failure() {
        let mut sink = Recorder {
            fail_flush: true,
            ..Recorder::default()
        };
        {
            let mut emitter = Emitter::new(&mut sink);
            emitter.null().unwrap();
        }
        assert_eq!(sink.flushes, 1);
    }
}

//! Stream events - the unit of exchange with the grammar engine.
//!
//! This is a pull-style event model: the source yields one event per pull,
//! with no accumulation. Structure is represented by start/end event pairs.
//!
//! For mappings: MappingStart, key event, value event(s)..., MappingEnd
//! For sequences: SequenceStart, item event(s)..., SequenceEnd
//!
//! Payloads are `Cow` so a source can hand out zero-copy events borrowed
//! from its own buffers while an in-memory queue can hold owned ones.

use std::borrow::Cow;

/// Character encoding of the underlying text.
///
/// Only UTF-8 is ever configured by this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Let the engine detect the encoding
    Any,
    #[default]
    Utf8,
}

/// Presentation style of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalarStyle {
    /// Unspecified: only meaningful when emitting, lets the sink choose
    #[default]
    Any,
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// The kind of an event, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    MappingStart,
    MappingEnd,
    SequenceStart,
    SequenceEnd,
    Scalar,
    Alias,
}

impl EventKind {
    /// Check if this kind opens a subtree that [`crate::skip`] knows how to close.
    ///
    /// `StreamStart` is deliberately not one of them: a stream is never a
    /// subtree of anything callers hold.
    #[inline]
    pub fn opens_subtree(self) -> bool {
        matches!(
            self,
            EventKind::DocumentStart | EventKind::MappingStart | EventKind::SequenceStart
        )
    }

    /// Check if this kind closes a subtree opened by [`EventKind::opens_subtree`].
    #[inline]
    pub fn closes_subtree(self) -> bool {
        matches!(
            self,
            EventKind::DocumentEnd | EventKind::MappingEnd | EventKind::SequenceEnd
        )
    }
}

/// A scalar event's payload.
///
/// `value` is raw bytes: it is not assumed to be UTF-8 nor NUL-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar<'a> {
    pub value: Cow<'a, [u8]>,
    pub tag: Option<Cow<'a, str>>,
    pub style: ScalarStyle,
}

impl<'a> Scalar<'a> {
    pub fn new(
        value: impl Into<Cow<'a, [u8]>>,
        tag: Option<Cow<'a, str>>,
        style: ScalarStyle,
    ) -> Self {
        Self {
            value: value.into(),
            tag,
            style,
        }
    }

    /// Untagged plain scalar.
    pub fn plain(value: impl Into<Cow<'a, [u8]>>) -> Self {
        Self::new(value, None, ScalarStyle::Plain)
    }

    /// Untagged scalar with the given style.
    pub fn styled(value: impl Into<Cow<'a, [u8]>>, style: ScalarStyle) -> Self {
        Self::new(value, None, style)
    }

    /// Builder: attach a tag.
    pub fn with_tag(mut self, tag: impl Into<Cow<'a, str>>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The raw value bytes.
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Length of the raw value in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[inline]
    pub fn is_plain(&self) -> bool {
        self.style == ScalarStyle::Plain
    }

    /// Detach from any borrowed buffer.
    pub fn into_owned(self) -> Scalar<'static> {
        Scalar {
            value: Cow::Owned(self.value.into_owned()),
            tag: self.tag.map(|t| Cow::Owned(t.into_owned())),
            style: self.style,
        }
    }
}

/// Stream events.
///
/// The lifetime `'a` refers to whatever buffer the source borrows payloads
/// from; `Event<'static>` is a fully owned event.
///
/// ## Event Sequences
///
/// The document `--- !person {name: Ada}` yields:
/// ```text
/// StreamStart { encoding: Utf8 }
/// DocumentStart { implicit: false }
/// MappingStart { tag: Some("!person") }
/// Scalar("name")
/// Scalar("Ada")
/// MappingEnd
/// DocumentEnd { implicit: true }
/// StreamEnd
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    // ========== Stream / Document Events ==========
    StreamStart {
        encoding: Encoding,
    },

    StreamEnd,

    /// `---` (explicit) or the start of a bare document (implicit)
    DocumentStart {
        implicit: bool,
    },

    /// `...` (explicit) or end of a bare document (implicit)
    DocumentEnd {
        implicit: bool,
    },

    // ========== Collection Events ==========
    MappingStart {
        tag: Option<Cow<'a, str>>,
    },

    MappingEnd,

    SequenceStart {
        tag: Option<Cow<'a, str>>,
    },

    SequenceEnd,

    // ========== Leaf Events ==========
    Scalar(Scalar<'a>),

    /// `*anchor` - resolution is left to the caller
    Alias {
        anchor: Cow<'a, str>,
    },
}

impl<'a> Event<'a> {
    /// Get the kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StreamStart { .. } => EventKind::StreamStart,
            Event::StreamEnd => EventKind::StreamEnd,
            Event::DocumentStart { .. } => EventKind::DocumentStart,
            Event::DocumentEnd { .. } => EventKind::DocumentEnd,
            Event::MappingStart { .. } => EventKind::MappingStart,
            Event::MappingEnd => EventKind::MappingEnd,
            Event::SequenceStart { .. } => EventKind::SequenceStart,
            Event::SequenceEnd => EventKind::SequenceEnd,
            Event::Scalar(_) => EventKind::Scalar,
            Event::Alias { .. } => EventKind::Alias,
        }
    }

    /// Tag of a scalar, mapping or sequence event.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Event::MappingStart { tag } | Event::SequenceStart { tag } => tag.as_deref(),
            Event::Scalar(scalar) => scalar.tag(),
            _ => None,
        }
    }

    /// Get the scalar payload, if this is a scalar event.
    pub fn as_scalar(&self) -> Option<&Scalar<'a>> {
        match self {
            Event::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Untagged mapping start.
    pub fn mapping_start() -> Self {
        Event::MappingStart { tag: None }
    }

    /// Untagged sequence start.
    pub fn sequence_start() -> Self {
        Event::SequenceStart { tag: None }
    }

    /// Untagged plain scalar event.
    pub fn plain(value: impl Into<Cow<'a, [u8]>>) -> Self {
        Event::Scalar(Scalar::plain(value))
    }

    /// Detach from any borrowed buffer.
    pub fn into_owned(self) -> Event<'static> {
        match self {
            Event::StreamStart { encoding } => Event::StreamStart { encoding },
            Event::StreamEnd => Event::StreamEnd,
            Event::DocumentStart { implicit } => Event::DocumentStart { implicit },
            Event::DocumentEnd { implicit } => Event::DocumentEnd { implicit },
            Event::MappingStart { tag } => Event::MappingStart {
                tag: tag.map(|t| Cow::Owned(t.into_owned())),
            },
            Event::MappingEnd => Event::MappingEnd,
            Event::SequenceStart { tag } => Event::SequenceStart {
                tag: tag.map(|t| Cow::Owned(t.into_owned())),
            },
            Event::SequenceEnd => Event::SequenceEnd,
            Event::Scalar(scalar) => Event::Scalar(scalar.into_owned()),
            Event::Alias { anchor } => Event::Alias {
                anchor: Cow::Owned(anchor.into_owned()),
            },
        }
    }
}

impl<'a> From<Scalar<'a>> for Event<'a> {
    fn from(scalar: Scalar<'a>) -> Self {
        Event::Scalar(scalar)
    }
}

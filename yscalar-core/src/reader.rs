//! Pull-side session over an event source.

use crate::error::{Error, Result};
use crate::event::{Encoding, Event, EventKind};
use crate::scalar;
use crate::skip;
use crate::stream::EventSource;

/// Single-owner reading session.
///
/// Fixes the source to UTF-8 before anything is pulled, then hands out events
/// one at a time. The session ends when the reader is dropped or
/// [`Reader::into_inner`] gives the source back.
#[derive(Debug)]
pub struct Reader<S: EventSource> {
    source: S,
}

impl<S: EventSource> Reader<S> {
    pub fn new(mut source: S) -> Self {
        source.set_encoding(Encoding::Utf8);
        Self { source }
    }

    /// Pull the next event.
    #[inline]
    pub fn next_event(&mut self) -> Result<Event<'_>> {
        self.source.pull()
    }

    /// Pull the next event and check its kind.
    ///
    /// A different kind is [`Error::InvalidValue`]; the event is consumed
    /// either way.
    pub fn expect(&mut self, kind: EventKind) -> Result<()> {
        let found = self.source.pull()?.kind();
        if found == kind {
            Ok(())
        } else {
            tracing::debug!(?kind, ?found, "unexpected event");
            Err(Error::InvalidValue)
        }
    }

    /// Skip the subtree opened by the last pulled event of kind `last`.
    pub fn skip(&mut self, last: EventKind) -> Result<()> {
        skip::skip(&mut self.source, last)
    }

    /// Pull one value and discard it, nested collections included.
    pub fn skip_next(&mut self) -> Result<()> {
        skip::skip_next(&mut self.source)
    }

    /// Advance to the next string key of the mapping being read.
    ///
    /// Call after `MappingStart` and after consuming each value. Returns
    /// `None` once the `MappingEnd` is pulled. Keys that are not strings
    /// (collections, aliases, scalars tagged with another type) are skipped
    /// together with their values.
    pub fn next_key(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let kind = {
                let event = self.source.pull()?;
                match &event {
                    Event::MappingEnd => return Ok(None),
                    Event::Scalar(key) => {
                        if let Ok(key) = scalar::parse_string(key) {
                            return Ok(Some(key.to_vec()));
                        }
                    }
                    _ => {}
                }
                event.kind()
            };
            tracing::debug!(?kind, "skipping entry with non-string key");
            skip::skip(&mut self.source, kind)?;
            skip::skip_next(&mut self.source)?;
        }
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// End the session, giving back the source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

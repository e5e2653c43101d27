//! Structural skipping: discard a whole document, mapping or sequence.
//!
//! Relies on the nesting invariant of the event stream: a subtree opened by a
//! start event is closed by exactly one matching end event, with any number of
//! nested pairs in between. Counting depth is therefore enough.

use crate::error::Result;
use crate::event::EventKind;
use crate::stream::EventSource;

/// Consume events until the subtree opened by an event of kind `last` is closed.
///
/// `last` is the kind of the event the caller just pulled. Document, mapping
/// and sequence starts open a subtree; any other kind (including
/// `StreamStart`) makes this a no-op that pulls nothing.
///
/// A pull failure aborts at once. The stream position is undefined after
/// that and the caller must stop parsing.
pub fn skip<S: EventSource + ?Sized>(source: &mut S, last: EventKind) -> Result<()> {
    let mut depth: usize = usize::from(last.opens_subtree());

    while depth > 0 {
        let kind = source.pull()?.kind();
        if kind.opens_subtree() {
            depth += 1;
        } else if kind.closes_subtree() {
            depth -= 1;
        }
        tracing::trace!(?kind, depth, "skip");
    }

    Ok(())
}

/// Pull one event and skip whatever subtree it opens.
///
/// This is how to drop the value of an unexpected mapping key, whether that
/// value is a scalar or a nested collection.
pub fn skip_next<S: EventSource + ?Sized>(source: &mut S) -> Result<()> {
    let kind = source.pull()?.kind();
    skip(source, kind)
}

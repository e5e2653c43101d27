//! yscalar Core
//!
//! Typed scalar layer over a pull-based YAML event stream. Converts scalar
//! events to and from null, boolean, integer, string and binary values under
//! the YAML 1.1 core schema, and skips whole subtrees a caller is not
//! interested in. Text parsing and rendering stay with the event source/sink.
//!
//! # Architecture
//!
//! - **event.rs** - Event, Scalar and style/encoding types
//! - **stream.rs** - EventSource/EventSink traits, EventQueue ring buffer
//! - **tag.rs** - Core-schema tag URIs to semantic types
//! - **scalar.rs** - Per-type scalar parsing and canonical emit forms
//! - **base64.rs** - Whitespace-tolerant base64 codec for `!!binary`
//! - **value.rs** - Value enum and implicit/explicit typing
//! - **skip.rs** - Depth-counting subtree skipper
//! - **reader.rs** / **emitter.rs** - Single-owner sessions
//!
//! # Example
//!
//! ```
//! use yscalar_core::{Emitter, EventKind, EventQueue, Reader, Value};
//!
//! let mut emitter = Emitter::new(EventQueue::default());
//! emitter.mapping_start(None)?;
//! emitter.string(b"port")?;
//! emitter.integer(8080)?;
//! emitter.mapping_end()?;
//! let events = emitter.finish()?.take_delivered();
//!
//! let mut reader = Reader::new(EventQueue::from_events(events));
//! reader.expect(EventKind::MappingStart)?;
//! assert_eq!(reader.next_key()?, Some(b"port".to_vec()));
//! let event = reader.next_event()?;
//! let port = Value::resolve(event.as_scalar().unwrap())?;
//! assert_eq!(port.as_integer(), Some(8080));
//! # Ok::<(), yscalar_core::Error>(())
//! ```

pub mod base64;
pub mod emitter;
pub mod error;
pub mod event;
pub mod reader;
pub mod scalar;
pub mod skip;
pub mod stream;
pub mod tag;
pub mod value;

pub use emitter::{Emitter, EmitterConfig};
pub use error::{Error, Result};
pub use event::{Encoding, Event, EventKind, Scalar, ScalarStyle};
pub use reader::Reader;
pub use skip::{skip, skip_next};
pub use stream::{EventQueue, EventSink, EventSource};
pub use tag::{SemanticType, TagError};
pub use value::Value;

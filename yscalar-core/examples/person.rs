//! Emit a small document into an in-memory queue, then read it back.
//!
//! Run with: RUST_LOG=trace cargo run --example person

use yscalar_core::{scalar, Emitter, Error, EventKind, EventQueue, Reader};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut emitter = Emitter::new(EventQueue::default());
    emitter.stream_start()?;
    emitter.document_start()?;
    emitter.mapping_start(None)?;
    emitter.string(b"name")?;
    emitter.string(b"Ada")?;
    emitter.string(b"age")?;
    emitter.integer(36)?;
    emitter.string(b"languages")?;
    emitter.sequence_start(None)?;
    emitter.string(b"Analytical Engine")?;
    emitter.sequence_end()?;
    emitter.string(b"portrait")?;
    emitter.binary(b"\x89PNG\r\n\x1a\n")?;
    emitter.mapping_end()?;
    emitter.document_end()?;
    emitter.stream_end()?;

    let events = emitter.finish()?.take_delivered();
    for event in &events {
        println!("{event:?}");
    }

    let mut reader = Reader::new(EventQueue::from_events(events));
    reader.expect(EventKind::StreamStart)?;
    reader.expect(EventKind::DocumentStart)?;
    reader.expect(EventKind::MappingStart)?;
    while let Some(key) = reader.next_key()? {
        match key.as_slice() {
            b"name" => {
                let event = reader.next_event()?;
                let name = event.as_scalar().ok_or(Error::InvalidValue)?;
                println!("name = {}", String::from_utf8_lossy(scalar::parse_string(name)?));
            }
            b"age" => {
                let event = reader.next_event()?;
                let age = event.as_scalar().ok_or(Error::InvalidValue)?;
                println!("age = {}", scalar::parse_integer(age)?);
            }
            b"portrait" => {
                let event = reader.next_event()?;
                let portrait = event.as_scalar().ok_or(Error::InvalidValue)?;
                println!("portrait = {:02x?}", scalar::parse_binary(portrait)?);
            }
            other => {
                println!("skipping {}", String::from_utf8_lossy(other));
                reader.skip_next()?;
            }
        }
    }
    Ok(())
}

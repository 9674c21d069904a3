//! Streaming decoder for the machines snapshot.
//!
//! The machines endpoint returns one JSON array that can be arbitrarily
//! large, so the body is decoded element by element straight off the reader
//! rather than buffered and parsed in one shot. Malformed input fails fast
//! with the stage that broke: the opening `[`, a machine element, or the
//! `,`/`]` that should follow it.

use std::io::Read;

use serde::Deserialize;

use crate::error::{DecodeStage, Result, WatchError};
use crate::machine::Machine;

/// Decode a JSON array of machines from `reader`, handing each machine to
/// `sink` as soon as it parses.
pub fn decode_machine_array<R: Read>(
    mut reader: R,
    mut sink: impl FnMut(Machine),
) -> Result<()> {
    match next_significant_byte(&mut reader, DecodeStage::ArrayStart)? {
        Some(b'[') => {}
        Some(other) => {
            return Err(decode_error(
                DecodeStage::ArrayStart,
                format!("expected '[', found '{}'", other as char),
            ))
        }
        None => {
            return Err(decode_error(
                DecodeStage::ArrayStart,
                "unexpected end of stream",
            ))
        }
    }

    // First element, or an immediately closed (empty) array.
    let mut lead = match next_significant_byte(&mut reader, DecodeStage::Element)? {
        Some(b']') => return Ok(()),
        Some(byte) => byte,
        None => {
            return Err(decode_error(
                DecodeStage::ArrayEnd,
                "unexpected end of stream",
            ))
        }
    };

    loop {
        // `lead` was already consumed while scanning, so stitch it back in
        // front of the reader for the element deserializer.
        let element = std::io::Cursor::new([lead]).chain(&mut reader);
        let mut de = serde_json::Deserializer::from_reader(element);
        let machine = Machine::deserialize(&mut de)
            .map_err(|e| decode_error(DecodeStage::Element, e.to_string()))?;
        sink(machine);

        match next_significant_byte(&mut reader, DecodeStage::ArrayEnd)? {
            Some(b']') => return Ok(()),
            Some(b',') => {}
            Some(other) => {
                return Err(decode_error(
                    DecodeStage::ArrayEnd,
                    format!("expected ',' or ']', found '{}'", other as char),
                ))
            }
            None => {
                return Err(decode_error(
                    DecodeStage::ArrayEnd,
                    "unexpected end of stream",
                ))
            }
        }

        lead = match next_significant_byte(&mut reader, DecodeStage::Element)? {
            Some(byte) => byte,
            None => {
                return Err(decode_error(
                    DecodeStage::ArrayEnd,
                    "unexpected end of stream",
                ))
            }
        };
    }
}

/// Read past JSON whitespace to the next significant byte. `Ok(None)` is a
/// clean end of stream; read failures are reported against `stage`.
fn next_significant_byte<R: Read>(reader: &mut R, stage: DecodeStage) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => match byte[0] {
                b' ' | b'\t' | b'\n' | b'\r' => continue,
                b => return Ok(Some(b)),
            },
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(decode_error(stage, e.to_string())),
        }
    }
}

fn decode_error(stage: DecodeStage, message: impl Into<String>) -> WatchError {
    WatchError::Decode {
        stage,
        message: message.into(),
    }
}

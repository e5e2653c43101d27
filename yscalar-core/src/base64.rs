//! Base64 codec for `!!binary` scalars.
//!
//! Encoding uses the standard alphabet with `=` padding. Decoding is a small
//! state machine over the four symbol slots of a group and tolerates
//! whitespace before any slot, which is how multi-line binary scalars look
//! once the grammar engine has folded them.
//!
//! ```text
//!  byte 0   byte 1   byte 2
//! |xxxxxx xx|xxxx xxxx|xx xxxxxx|
//! |  s0  |  s1  |  s2  |  s3  |
//! ```

use crate::error::{Error, Result};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const PAD: u8 = b'=';

/// Marker for bytes outside the alphabet.
const INVALID: u8 = 0xff;

static SEXTETS: [u8; 256] = build_sextets();

const fn build_sextets() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Whitespace tolerated between symbols: space, `\f`, `\n`, `\r`, `\t`, `\v`.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\x0c' | b'\n' | b'\r' | b'\t' | b'\x0b')
}

#[inline]
fn sextet(symbol: u8) -> Result<u8> {
    match SEXTETS[symbol as usize] {
        INVALID => Err(Error::MalformedEncoding),
        value => Ok(value),
    }
}

/// Number of symbols `encode` produces for `n` input bytes.
#[inline]
pub const fn encoded_len(n: usize) -> usize {
    n.div_ceil(3) * 4
}

/// Upper bound on the bytes `decode` produces for `n` bytes of text.
#[inline]
pub const fn decoded_len_max(n: usize) -> usize {
    n.div_ceil(4) * 3
}

/// Encode `src` into `dst`, followed by a NUL terminator.
///
/// Returns the number of symbols written, not counting the terminator.
///
/// # Panics
///
/// Panics if `dst` is shorter than `encoded_len(src.len()) + 1`.
pub fn encode_into(src: &[u8], dst: &mut [u8]) -> usize {
    let needed = encoded_len(src.len()) + 1;
    assert!(
        dst.len() >= needed,
        "base64 destination holds {} bytes, needs {}",
        dst.len(),
        needed
    );

    let mut j = 0;
    let mut groups = src.chunks_exact(3);
    for group in &mut groups {
        let (a, b, c) = (group[0], group[1], group[2]);
        dst[j] = ALPHABET[(a >> 2) as usize];
        dst[j + 1] = ALPHABET[((a & 0x03) << 4 | b >> 4) as usize];
        dst[j + 2] = ALPHABET[((b & 0x0f) << 2 | c >> 6) as usize];
        dst[j + 3] = ALPHABET[(c & 0x3f) as usize];
        j += 4;
    }

    match *groups.remainder() {
        [] => {}
        [a] => {
            dst[j] = ALPHABET[(a >> 2) as usize];
            dst[j + 1] = ALPHABET[((a & 0x03) << 4) as usize];
            dst[j + 2] = PAD;
            dst[j + 3] = PAD;
            j += 4;
        }
        [a, b] => {
            dst[j] = ALPHABET[(a >> 2) as usize];
            dst[j + 1] = ALPHABET[((a & 0x03) << 4 | b >> 4) as usize];
            dst[j + 2] = ALPHABET[((b & 0x0f) << 2) as usize];
            dst[j + 3] = PAD;
            j += 4;
        }
        _ => unreachable!("chunks_exact(3) remainder has at most 2 bytes"),
    }

    dst[j] = 0;
    j
}

/// Encode `src` into a new string.
pub fn encode(src: &[u8]) -> String {
    let mut buffer = vec![0u8; encoded_len(src.len()) + 1];
    let n = encode_into(src, &mut buffer);
    buffer.truncate(n);
    String::from_utf8(buffer).unwrap_or_else(|_| unreachable!("base64 output is ASCII"))
}

/// Symbol reader that skips whitespace before each slot.
struct Symbols<'a> {
    text: &'a [u8],
    pos: usize,
}

impl<'a> Symbols<'a> {
    fn new(text: &'a [u8]) -> Self {
        Self { text, pos: 0 }
    }

    fn skip_space(&mut self) {
        while self.pos < self.text.len() && is_space(self.text[self.pos]) {
            self.pos += 1;
        }
    }

    /// Next non-whitespace byte, or `None` at end of text.
    fn next(&mut self) -> Option<u8> {
        self.skip_space();
        let symbol = *self.text.get(self.pos)?;
        self.pos += 1;
        Some(symbol)
    }

    /// After a padding symbol only more padding and whitespace may follow.
    fn finish_padding(&mut self) -> Result<()> {
        while self.pos < self.text.len() {
            let b = self.text[self.pos];
            if b != PAD && !is_space(b) {
                return Err(Error::MalformedEncoding);
            }
            self.pos += 1;
        }
        Ok(())
    }
}

/// Bounded writer over the caller's buffer.
struct Output<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl Output<'_> {
    #[inline]
    fn put(&mut self, byte: u8) -> Result<()> {
        let slot = self.buf.get_mut(self.len).ok_or(Error::Range)?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }
}

/// Decode base64 `text` into `dst`, returning the number of bytes written.
///
/// Fails with [`Error::MalformedEncoding`] on a non-alphabet symbol, on a
/// group holding a single symbol, or on anything other than padding and
/// whitespace after padding. Fails with [`Error::Range`] if `dst` is too
/// small; `decoded_len_max(text.len())` is always enough.
pub fn decode_into(text: &[u8], dst: &mut [u8]) -> Result<usize> {
    let mut symbols = Symbols::new(text);
    let mut out = Output { buf: dst, len: 0 };

    loop {
        let Some(s0) = symbols.next() else {
            return Ok(out.len);
        };
        let s0 = sextet(s0)?;

        // A lone symbol cannot carry a whole byte.
        let s1 = sextet(symbols.next().ok_or(Error::MalformedEncoding)?)?;
        out.put(s0 << 2 | s1 >> 4)?;

        let Some(s2) = symbols.next() else {
            return Ok(out.len);
        };
        if s2 == PAD {
            break;
        }
        let s2 = sextet(s2)?;
        out.put(s1 << 4 | s2 >> 2)?;

        let Some(s3) = symbols.next() else {
            return Ok(out.len);
        };
        if s3 == PAD {
            break;
        }
        let s3 = sextet(s3)?;
        out.put(s2 << 6 | s3)?;
    }

    symbols.finish_padding()?;
    Ok(out.len)
}

/// Decode base64 `text` into a new buffer.
pub fn decode(text: &[u8]) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; decoded_len_max(text.len())];
    let n = decode_into(text, &mut buffer)?;
    buffer.truncate(n);
    Ok(buffer)
}

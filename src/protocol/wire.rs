//! Variable-length integer codec
// (c) 2026 sbts contributors
//!
//! Every length and status field on the wire is a varint: seven payload bits
//! per byte, least-significant group first, high bit set on every byte except
//! the last. Signed values are zig-zag mapped onto unsigned ones first
//! (0, -1, 1, -2, ... becomes 0, 1, 2, 3, ...) so that small-magnitude
//! negative status codes stay at one byte.
//!
//! Decoding reads one byte at a time, so it never consumes bytes beyond the
//! end of the varint. That matters: the response body follows the response
//! header directly on the same stream.

use std::io::Read;

/// The longest legal encoding of a 64-bit varint.
///
/// Ten groups of seven bits cover 70 bits; a tenth byte may therefore only
/// carry the top single bit of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Errors arising while decoding a varint from a stream.
///
/// `Truncated` and `Overflow` mean the frame itself was malformed; once
/// either is seen the stream can no longer be trusted and must be discarded.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The stream ended cleanly part-way through a varint.
    #[error("stream ended mid-varint")]
    Truncated,
    /// More than [`MAX_VARINT_LEN`] bytes without a terminator, or the final
    /// byte overflows 64 bits.
    #[error("varint overflows 64 bits")]
    Overflow,
    /// The underlying transport failed.
    #[error("read error while decoding varint: {0}")]
    Io(#[from] std::io::Error),
}

/// Appends the minimal-length unsigned varint encoding of `value` to `out`.
#[allow(clippy::cast_possible_truncation)] // low seven bits only
pub fn encode_uint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Appends the zig-zag signed varint encoding of `value` to `out`.
///
/// This is the server-side counterpart of [`decode_int`]; the client proper
/// only ever sends unsigned fields.
pub fn encode_int(value: i64, out: &mut Vec<u8>) {
    encode_uint(zigzag(value), out);
}

/// Reads one unsigned varint from `reader`, one byte at a time.
pub fn decode_uint<R: Read>(reader: &mut R) -> Result<u64, FrameError> {
    let mut value = 0u64;
    let mut shift = 0u32;
    for count in 0..MAX_VARINT_LEN {
        let byte = read_byte(reader)?;
        if byte < 0x80 {
            if count == MAX_VARINT_LEN - 1 && byte > 1 {
                // tenth byte may only contribute bit 63
                return Err(FrameError::Overflow);
            }
            return Ok(value | u64::from(byte) << shift);
        }
        value |= u64::from(byte & 0x7f) << shift;
        shift += 7;
    }
    Err(FrameError::Overflow)
}

/// Reads one zig-zag signed varint from `reader`.
pub fn decode_int<R: Read>(reader: &mut R) -> Result<i64, FrameError> {
    decode_uint(reader).map(unzigzag)
}

#[allow(clippy::cast_sign_loss)]
fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[allow(clippy::cast_possible_wrap)]
fn unzigzag(value: u64) -> i64 {
    (value >> 1) as i64 ^ -((value & 1) as i64)
}

fn read_byte<R: Read>(reader: &mut R) -> Result<u8, FrameError> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Err(FrameError::Truncated),
            Ok(_) => return Ok(buf[0]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => (),
            Err(e) => return Err(FrameError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_int, decode_uint, encode_int, encode_uint, FrameError, MAX_VARINT_LEN};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn uint_bytes(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        encode_uint(value, &mut out);
        out
    }

    #[test]
    fn unsigned_wire_vectors() {
        assert_eq!(uint_bytes(0), vec![0]);
        assert_eq!(uint_bytes(1), vec![1]);
        assert_eq!(uint_bytes(127), vec![0x7f]);
        assert_eq!(uint_bytes(128), vec![0x80, 0x01]);
        assert_eq!(uint_bytes(300), vec![0xac, 0x02]);
        assert_eq!(uint_bytes(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn signed_wire_vectors() {
        // the zig-zag mapping: 0,-1,1,-2,2 -> 0,1,2,3,4
        for (value, expected) in [(0i64, 0u8), (-1, 1), (1, 2), (-2, 3), (2, 4)] {
            let mut out = Vec::new();
            encode_int(value, &mut out);
            assert_eq!(out, vec![expected], "value {value}");
        }
    }

    #[test]
    fn unsigned_round_trip() {
        for value in [
            0,
            1,
            127,
            128,
            16_383,
            16_384,
            299_792_458,
            u64::from(u32::MAX),
            u64::MAX - 1,
            u64::MAX,
        ] {
            let decoded = decode_uint(&mut Cursor::new(uint_bytes(value))).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn signed_round_trip() {
        for value in [0, -1, 1, -2, 2, -64, 63, 64, -65, i64::MIN, i64::MAX] {
            let mut out = Vec::new();
            encode_int(value, &mut out);
            let decoded = decode_int(&mut Cursor::new(out)).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn truncated_empty_stream() {
        let e = decode_uint(&mut Cursor::new(Vec::new())).unwrap_err();
        assert!(matches!(e, FrameError::Truncated), "{e:?}");
    }

    #[test]
    fn truncated_mid_sequence() {
        // continuation bit set, then nothing
        let e = decode_uint(&mut Cursor::new(vec![0x80])).unwrap_err();
        assert!(matches!(e, FrameError::Truncated), "{e:?}");
        let e = decode_int(&mut Cursor::new(vec![0xff, 0xff])).unwrap_err();
        assert!(matches!(e, FrameError::Truncated), "{e:?}");
    }

    #[test]
    fn overflow_never_terminates() {
        let e = decode_uint(&mut Cursor::new(vec![0x80; 11])).unwrap_err();
        assert!(matches!(e, FrameError::Overflow), "{e:?}");
    }

    #[test]
    fn overflow_tenth_byte_too_large() {
        // nine continuation bytes then a final byte contributing more than bit 63
        let mut buf = vec![0xff; 9];
        buf.push(2);
        let e = decode_uint(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(e, FrameError::Overflow), "{e:?}");
    }

    #[test]
    fn max_value_is_decodable_at_the_boundary() {
        // u64::MAX is nine 0xff bytes then 0x01: exactly MAX_VARINT_LEN long
        let buf = uint_bytes(u64::MAX);
        let mut expected = vec![0xff; 9];
        expected.push(0x01);
        assert_eq!(buf, expected);
        assert_eq!(decode_uint(&mut Cursor::new(buf)).unwrap(), u64::MAX);
    }

    #[test]
    fn decode_stops_at_the_varint_boundary() {
        // trailing bytes must be left unread for the caller
        let mut buf = uint_bytes(300);
        buf.extend_from_slice(b"payload");
        let mut cursor = Cursor::new(buf);
        assert_eq!(decode_uint(&mut cursor).unwrap(), 300);
        let mut rest = Vec::new();
        let _ = std::io::Read::read_to_end(&mut cursor, &mut rest).unwrap();
        assert_eq!(rest, b"payload");
    }

    #[test]
    fn io_errors_propagate() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "reset",
                ))
            }
        }
        let e = decode_uint(&mut Broken).unwrap_err();
        assert!(matches!(e, FrameError::Io(_)), "{e:?}");
    }
}

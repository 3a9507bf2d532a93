use std::io::{self, Read, Write};

/// Longest LEB128 encoding of a u64
pub const MAX_VARINT_LEN: usize = 10;

/// Encode a u64 as a variable-length integer
pub fn encode_varint_u64(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        if value < 0x80 {
            buf.push(value as u8);
            break;
        }
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
}

/// Decode a u64 variable-length integer from a slice
/// Returns (value, bytes_consumed)
pub fn decode_varint_u64(buf: &[u8]) -> Option<(u64, usize)> {
    let mut result: u64 = 0;
    let mut shift = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return None;
        }
        // Tenth byte may only carry the top bit of the value
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return None;
        }

        result |= ((byte & 0x7F) as u64) << shift;

        if byte & 0x80 == 0 {
            return Some((result, i + 1));
        }

        shift += 7;
    }

    None
}

/// Read a u64 variable-length integer from a stream.
///
/// Returns `Ok(None)` when the bytes do not form a valid varint; an
/// early end of stream surfaces as `UnexpectedEof`.
pub fn read_varint_u64<R: Read>(reader: &mut R) -> io::Result<Option<u64>> {
    let mut buf = [0u8; MAX_VARINT_LEN];

    for i in 0..MAX_VARINT_LEN {
        reader.read_exact(&mut buf[i..i + 1])?;
        if buf[i] & 0x80 == 0 {
            return Ok(decode_varint_u64(&buf[..=i]).map(|(value, _)| value));
        }
    }

    Ok(None)
}

/// Write a u64 as a variable-length integer
pub fn write_varint_u64<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    let mut buf = Vec::with_capacity(MAX_VARINT_LEN);
    encode_varint_u64(value, &mut buf);
    writer.write_all(&buf)
}

/// Number of bytes `encode_varint_u64` produces for `value`
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Write a u32 in little-endian format
pub fn write_u32_le<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Read a u32 in little-endian format
pub fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

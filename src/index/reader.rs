//! Index reader
//!
//! Decodes a serialized index and refuses to hand it out until the suffix
//! array has been verified against the corpus.

use super::Index;
use super::types::*;
use super::verify::verify_suffix_array;
use crate::error::{CorruptIndex, Error, Result};
use crate::utils::{read_u32_le, read_varint_u64};
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Suffix array entries are decoded through a buffer of this many bytes
const READ_CHUNK: usize = 64 * 1024;

impl Index {
    /// Decode an index from `reader` with full verification
    pub fn read_from<R: Read>(reader: R) -> Result<Index> {
        Self::read_from_with(reader, &IndexConfig::default())
    }

    /// Decode an index from `reader`.
    ///
    /// Only the bytes of one index are consumed; anything after the suffix
    /// array is left in the stream.
    pub fn read_from_with<R: Read>(mut reader: R, config: &IndexConfig) -> Result<Index> {
        let header = read_header(&mut reader)?;

        let n64 = match read_varint_u64(&mut reader) {
            Ok(Some(n)) => n,
            Ok(None) => return Err(CorruptIndex::BadLength.into()),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(CorruptIndex::BadLength.into());
            }
            Err(e) => return Err(e.into()),
        };
        let n = usize::try_from(n64).map_err(|_| CorruptIndex::TooLarge(n64))?;
        if !header.is_wide() && n > MAX_NARROW_LEN {
            return Err(CorruptIndex::TooLarge(n64).into());
        }

        let data = read_section(&mut reader, "corpus", n64)?;

        let sa = if header.is_wide() {
            let sa = read_offsets::<_, u64>(&mut reader, n)?;
            verify_suffix_array(&data, &sa, config)?;
            Offsets::Wide(sa)
        } else {
            let sa = read_offsets::<_, u32>(&mut reader, n)?;
            verify_suffix_array(&data, &sa, config)?;
            Offsets::Narrow(sa)
        };

        debug!(corpus_len = n, wide = header.is_wide(), "read index");
        Ok(Index::from_parts(data, sa))
    }

    /// Decode an index that occupies all of `bytes`, with full verification
    pub fn from_bytes(bytes: &[u8]) -> Result<Index> {
        Self::from_bytes_with(bytes, &IndexConfig::default())
    }

    /// Decode an index that occupies all of `bytes`
    pub fn from_bytes_with(bytes: &[u8], config: &IndexConfig) -> Result<Index> {
        let mut rest = bytes;
        let index = Self::read_from_with(&mut rest, config)?;
        if !rest.is_empty() {
            return Err(CorruptIndex::TrailingBytes(rest.len()).into());
        }
        Ok(index)
    }

    /// Load an index file written by [`Index::save`], with full verification
    pub fn open(path: &Path) -> Result<Index> {
        Self::open_with(path, &IndexConfig::default())
    }

    /// Load an index file through a memory map.
    ///
    /// The corpus and suffix array are decoded straight out of the mapped
    /// pages into owned buffers, so peak memory is one copy of the index
    /// rather than a file-sized read buffer plus the decoded copy. The map is
    /// released before returning; later changes to the file do not affect
    /// the returned index.
    pub fn open_with(path: &Path, config: &IndexConfig) -> Result<Index> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(truncated("header", IndexHeader::SIZE as u64, 0));
        }

        // The file must not be truncated while mapped; decoding finishes
        // before this function returns
        let mmap = unsafe { Mmap::map(&file)? };
        debug!(path = %path.display(), size = mmap.len(), "opening index");
        Self::from_bytes_with(&mmap, config)
    }
}

/// Read and check the fixed-size header
fn read_header<R: Read>(reader: &mut R) -> Result<IndexHeader> {
    let raw = read_section(reader, "header", IndexHeader::SIZE as u64)?;
    let mut fields = raw.as_slice();

    let header = IndexHeader {
        magic: read_u32_le(&mut fields)?,
        version: read_u32_le(&mut fields)?,
        flags: read_u32_le(&mut fields)?,
    };

    if header.magic != SA_MAGIC {
        return Err(CorruptIndex::BadMagic(header.magic).into());
    }
    if header.version != SA_VERSION {
        return Err(CorruptIndex::UnsupportedVersion(header.version).into());
    }
    if header.flags & !FLAG_WIDE_OFFSETS != 0 {
        return Err(CorruptIndex::UnknownFlags(header.flags).into());
    }

    Ok(header)
}

/// Read exactly `len` bytes, growing the buffer only as data arrives
fn read_section<R: Read>(reader: &mut R, section: &'static str, len: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut buf)?;

    if (buf.len() as u64) < len {
        return Err(truncated(section, len, buf.len() as u64));
    }
    Ok(buf)
}

/// Read `n` little-endian suffix array entries
fn read_offsets<R: Read, O: SuffixOffset>(reader: &mut R, n: usize) -> Result<Vec<O>> {
    let expected = (n as u64)
        .checked_mul(O::WIDTH as u64)
        .ok_or(CorruptIndex::TooLarge(n as u64))?;
    let per_chunk = READ_CHUNK / O::WIDTH;

    let mut sa = Vec::new();
    let mut chunk = Vec::with_capacity(READ_CHUNK);
    let mut remaining = n;

    while remaining > 0 {
        let want = remaining.min(per_chunk);
        let want_bytes = want * O::WIDTH;

        chunk.clear();
        reader.by_ref().take(want_bytes as u64).read_to_end(&mut chunk)?;
        sa.extend(chunk.chunks_exact(O::WIDTH).map(O::read_le));

        if chunk.len() < want_bytes {
            let found = ((n - remaining) * O::WIDTH + chunk.len()) as u64;
            return Err(truncated("suffix array", expected, found));
        }
        remaining -= want;
    }

    Ok(sa)
}

fn truncated(section: &'static str, expected: u64, found: u64) -> Error {
    CorruptIndex::Truncated {
        section,
        expected,
        found,
    }
    .into()
}

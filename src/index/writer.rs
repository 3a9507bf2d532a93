//! Index writer
//!
//! Writes the corpus and suffix array as one stream in the layout described
//! in the module docs of [`crate::index`].

use super::Index;
use super::types::*;
use crate::error::Result;
use crate::utils::{write_u32_le, write_varint_u64};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Suffix array entries are staged through a buffer of this many bytes
const WRITE_CHUNK: usize = 64 * 1024;

impl Index {
    /// Serialize the index to `writer`.
    ///
    /// Only errors from the sink itself are returned.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let header = IndexHeader::new(self.sa.is_wide());
        write_u32_le(&mut writer, header.magic)?;
        write_u32_le(&mut writer, header.version)?;
        write_u32_le(&mut writer, header.flags)?;

        write_varint_u64(&mut writer, self.data.len() as u64)?;
        writer.write_all(&self.data)?;

        match &self.sa {
            Offsets::Narrow(sa) => write_offsets(&mut writer, sa)?,
            Offsets::Wide(sa) => write_offsets(&mut writer, sa)?,
        }

        writer.flush()?;

        debug!(
            corpus_len = self.data.len(),
            wide = header.is_wide(),
            "wrote index"
        );
        Ok(())
    }

    /// Serialize the index into a fresh buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.stats().encoded_size);
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        buf
    }

    /// Write the index to a file, replacing any existing one
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = BufWriter::with_capacity(WRITE_CHUNK, File::create(path)?);
        self.write_to(file)
    }
}

/// Write suffix array entries, batching to reduce system call overhead
fn write_offsets<W: Write, O: SuffixOffset>(writer: &mut W, sa: &[O]) -> std::io::Result<()> {
    let mut buffer = Vec::with_capacity(WRITE_CHUNK);
    for &entry in sa {
        entry.write_le(&mut buffer);
        if buffer.len() >= WRITE_CHUNK {
            writer.write_all(&buffer)?;
            buffer.clear();
        }
    }
    if !buffer.is_empty() {
        writer.write_all(&buffer)?;
    }
    Ok(())
}

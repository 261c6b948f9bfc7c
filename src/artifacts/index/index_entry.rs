//! Index entry representation
//!
//! Each entry in the index represents a tracked file with:
//! - File path relative to the worktree root
//! - Content hash (blob object ID)
//! - Stat data (timestamps, device, inode, mode, owner, size)
//! - Flags (assume-valid, merge stage)
//!
//! ## Entry Format
//!
//! ```text
//! ctime s, ctime ns, mtime s, mtime ns, dev, ino   6 x 4 bytes
//! reserved (must be zero)                          2 bytes
//! mode (4 bits type, 3 unused, 9 permission bits)  2 bytes
//! uid, gid, size                                   3 x 4 bytes
//! object id                                        20 bytes
//! flags (assume-valid, extended, stage, name len)  2 bytes
//! path, NUL, zero padding to a multiple of 8
//! ```

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VfError;
use bitflags::bitflags;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::fs::Metadata;
use std::io::Write;
use std::os::unix::prelude::MetadataExt;

/// Names at least this long store the cap in the flags and run to the next NUL
pub const MAX_NAME_LENGTH: usize = 0xFFF;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Size of the fixed-width part of an entry, before the name
pub const ENTRY_FIXED_SIZE: usize = 62;

bitflags! {
    /// The 16-bit flags word of an index entry
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EntryFlags: u16 {
        const ASSUME_VALID = 0b1000_0000_0000_0000;
        const EXTENDED = 0b0100_0000_0000_0000;
        const STAGE = 0b0011_0000_0000_0000;
        const NAME_LENGTH = 0b0000_1111_1111_1111;
    }
}

/// Index entry representing a tracked file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to the worktree root
    #[new(into)]
    pub name: String,
    /// Blob object ID of the staged content
    pub oid: ObjectId,
    /// Stat data captured when the file was staged
    pub metadata: EntryMetadata,
    #[new(default)]
    pub assume_valid: bool,
    /// Merge stage, 0 to 3
    #[new(default)]
    pub stage: u8,
}

/// Stat data stored in index entries
///
/// Timestamps and sizes are truncated to 32 bits, as the on-disk format stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Status change time (seconds since Unix epoch)
    pub ctime: u32,
    pub ctime_nsec: u32,
    /// Content modification time (seconds since Unix epoch)
    pub mtime: u32,
    pub mtime_nsec: u32,
    pub dev: u32,
    pub ino: u32,
    pub mode: EntryMode,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
}

impl EntryMetadata {
    pub fn times_match(&self, other: &EntryMetadata) -> bool {
        self.ctime == other.ctime
            && self.ctime_nsec == other.ctime_nsec
            && self.mtime == other.mtime
            && self.mtime_nsec == other.mtime_nsec
    }
}

impl From<&Metadata> for EntryMetadata {
    fn from(metadata: &Metadata) -> Self {
        Self {
            ctime: metadata.ctime() as u32,
            ctime_nsec: metadata.ctime_nsec() as u32,
            mtime: metadata.mtime() as u32,
            mtime_nsec: metadata.mtime_nsec() as u32,
            dev: metadata.dev() as u32,
            ino: metadata.ino() as u32,
            mode: metadata.mode().into(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
        }
    }
}

impl IndexEntry {
    /// Last path component
    pub fn basename(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Containing directory, `""` for the worktree root
    pub fn dirname(&self) -> &str {
        self.name.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }

    /// Every ancestor directory from the top, excluding the root
    ///
    /// `a/b/c` yields `["a", "a/b"]`.
    pub fn parent_dirs(&self) -> Vec<&str> {
        self.name
            .match_indices('/')
            .map(|(position, _)| &self.name[..position])
            .collect()
    }

    fn flags(&self) -> EntryFlags {
        let name_length = self.name.len().min(MAX_NAME_LENGTH) as u16;
        let mut flags = EntryFlags::from_bits_retain(
            (u16::from(self.stage & 0b11) << 12) | name_length,
        );
        flags.set(EntryFlags::ASSUME_VALID, self.assume_valid);

        flags
    }

    /// Parse one entry from the start of `bytes`
    ///
    /// Returns the entry and the number of bytes it occupied, padding included.
    pub fn read_from(bytes: &[u8]) -> anyhow::Result<(Self, usize)> {
        let corrupt = |reason: &str| VfError::CorruptIndex(reason.to_string());

        if bytes.len() < ENTRY_FIXED_SIZE {
            return Err(corrupt("truncated entry").into());
        }

        let read_u32 = |offset: usize| byteorder::NetworkEndian::read_u32(&bytes[offset..]);

        let reserved = byteorder::NetworkEndian::read_u16(&bytes[24..26]);
        if reserved != 0 {
            return Err(corrupt("reserved mode bits are set").into());
        }
        let mode = EntryMode::try_from(byteorder::NetworkEndian::read_u16(&bytes[26..28]))?;

        let oid_bytes: &[u8; RAW_OBJECT_ID_LENGTH] = bytes[40..60].try_into()?;
        let oid = ObjectId::from_raw(oid_bytes);

        let flags = EntryFlags::from_bits_retain(byteorder::NetworkEndian::read_u16(&bytes[60..62]));
        if flags.contains(EntryFlags::EXTENDED) {
            return Err(corrupt("extended flags are not supported").into());
        }
        let stage = ((flags & EntryFlags::STAGE).bits() >> 12) as u8;
        let name_length = (flags & EntryFlags::NAME_LENGTH).bits() as usize;

        let name_start = ENTRY_FIXED_SIZE;
        let name_end = if name_length < MAX_NAME_LENGTH {
            let name_end = name_start + name_length;
            if bytes.get(name_end) != Some(&0) {
                return Err(corrupt("entry name is not NUL-terminated").into());
            }
            name_end
        } else {
            bytes
                .get(name_start + MAX_NAME_LENGTH..)
                .and_then(|rest| rest.iter().position(|&b| b == 0))
                .map(|offset| name_start + MAX_NAME_LENGTH + offset)
                .ok_or_else(|| corrupt("entry name is not NUL-terminated"))?
        };
        let name = std::str::from_utf8(&bytes[name_start..name_end])
            .map_err(|_| corrupt("entry name is not valid UTF-8"))?
            .to_string();

        // past the NUL, rounded up to the block size
        let consumed = (name_end + 1).div_ceil(ENTRY_BLOCK) * ENTRY_BLOCK;

        let entry = IndexEntry {
            name,
            oid,
            metadata: EntryMetadata {
                ctime: read_u32(0),
                ctime_nsec: read_u32(4),
                mtime: read_u32(8),
                mtime_nsec: read_u32(12),
                dev: read_u32(16),
                ino: read_u32(20),
                mode,
                uid: read_u32(28),
                gid: read_u32(32),
                size: read_u32(36),
            },
            assume_valid: flags.contains(EntryFlags::ASSUME_VALID),
            stage,
        };

        Ok((entry, consumed.min(bytes.len())))
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let metadata = &self.metadata;

        let mut entry_bytes = Vec::with_capacity(ENTRY_FIXED_SIZE + self.name.len() + ENTRY_BLOCK);
        entry_bytes.write_u32::<byteorder::NetworkEndian>(metadata.ctime)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(metadata.ctime_nsec)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(metadata.mtime)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(metadata.mtime_nsec)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(metadata.dev)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(metadata.ino)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(0)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(metadata.mode.as_u16())?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(metadata.uid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(metadata.gid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(metadata.size)?;
        self.oid.write_h40_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(self.flags().bits())?;
        entry_bytes.write_all(self.name.as_bytes())?;

        // There must be at least one null byte at the end
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

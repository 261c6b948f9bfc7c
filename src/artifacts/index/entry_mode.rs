use crate::errors::VfError;

/// Tree mode written for subdirectories
pub const DIRECTORY_MODE: &str = "040000";

/// Object type bits of an index entry's mode (the high four bits)
#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
#[repr(u16)]
pub enum ModeType {
    #[default]
    Regular = 0b1000,
    Symlink = 0b1010,
    Gitlink = 0b1110,
}

impl TryFrom<u16> for ModeType {
    type Error = anyhow::Error;

    fn try_from(bits: u16) -> anyhow::Result<Self> {
        match bits {
            0b1000 => Ok(ModeType::Regular),
            0b1010 => Ok(ModeType::Symlink),
            0b1110 => Ok(ModeType::Gitlink),
            _ => Err(VfError::CorruptIndex(format!("invalid mode type {bits:#06b}")).into()),
        }
    }
}

/// Mode of an index entry: object type plus nine permission bits
#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct EntryMode {
    pub mode_type: ModeType,
    pub permissions: u16,
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode {
            mode_type: ModeType::Regular,
            permissions: 0o644,
        }
    }
}

impl EntryMode {
    pub fn new(mode_type: ModeType, permissions: u16) -> Self {
        EntryMode {
            mode_type,
            permissions: permissions & 0o777,
        }
    }

    pub fn as_u16(&self) -> u16 {
        ((self.mode_type as u16) << 12) | self.permissions
    }

    /// Mode as written into a tree: two octal digits of type, four of permissions
    pub fn tree_mode(&self) -> String {
        format!("{:02o}{:04o}", self.mode_type as u16, self.permissions)
    }
}

impl TryFrom<u16> for EntryMode {
    type Error = anyhow::Error;

    fn try_from(mode: u16) -> anyhow::Result<Self> {
        Ok(EntryMode {
            mode_type: ModeType::try_from(mode >> 12)?,
            permissions: mode & 0o777,
        })
    }
}

impl From<u32> for EntryMode {
    /// Build from a `st_mode`, treating anything but a symlink as a regular file
    ///
    /// Symlinks carry no permission bits.
    fn from(st_mode: u32) -> Self {
        match st_mode & 0o170000 {
            0o120000 => EntryMode::new(ModeType::Symlink, 0),
            _ => EntryMode::new(ModeType::Regular, (st_mode & 0o777) as u16),
        }
    }
}

//! Directory metadata captured before a rename.

use std::fs::Metadata;
use std::time::SystemTime;

/// Attributes of a directory taken just before it is renamed.
///
/// On non-Unix platforms only the timestamps and the read-only flag are meaningful;
/// ownership fields stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSnapshot {
    /// Permission bits (`st_mode & 0o7777`).
    pub mode: u32,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub accessed: SystemTime,
    pub modified: SystemTime,
    /// Creation time where the platform reports one, otherwise the inode change time.
    pub changed: Option<SystemTime>,
    pub readonly: bool,
}

impl MetadataSnapshot {
    #[cfg(unix)]
    pub fn from_metadata(meta: &Metadata) -> std::io::Result<Self> {
        use std::os::unix::fs::MetadataExt;

        let changed = meta.created().ok().or_else(|| {
            let secs = u64::try_from(meta.ctime()).ok()?;
            let nanos = u32::try_from(meta.ctime_nsec()).ok()?;
            SystemTime::UNIX_EPOCH.checked_add(std::time::Duration::new(secs, nanos))
        });

        Ok(Self {
            mode: meta.mode() & 0o7777,
            uid: Some(meta.uid()),
            gid: Some(meta.gid()),
            accessed: meta.accessed()?,
            modified: meta.modified()?,
            changed,
            readonly: meta.permissions().readonly(),
        })
    }

    #[cfg(not(unix))]
    pub fn from_metadata(meta: &Metadata) -> std::io::Result<Self> {
        Ok(Self {
            mode: 0,
            uid: None,
            gid: None,
            accessed: meta.accessed()?,
            modified: meta.modified()?,
            changed: meta.created().ok(),
            readonly: meta.permissions().readonly(),
        })
    }
}

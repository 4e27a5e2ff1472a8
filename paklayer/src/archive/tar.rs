//! Tarball-backed archives.
//!
//! Packs are gzip-compressed tarballs (whatever their extension). The system
//! `tar` tool is used for listing and reading, so no codec lives in-process.
//! Tarballs carry no mount point of their own; every pack opened by a
//! [`TarArchiveOpener`] mounts at the opener's configured mount point.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{normalize_mount_point, virtual_path, Archive, ArchiveError, ArchiveOpener, ArchiveResult};

/// An opened tarball.
///
/// The entry index is read once at open time.
#[derive(Debug, Clone)]
pub struct TarArchive {
    path: PathBuf,
    mount_point: String,
    /// Virtual path → member name inside the tarball.
    index: HashMap<String, String>,
    /// Virtual paths in tarball order.
    order: Vec<String>,
}

impl TarArchive {
    /// Open and index a tarball.
    pub fn open(path: &Path, mount_point: &str) -> ArchiveResult<Self> {
        if !path.is_file() {
            return Err(ArchiveError::OpenFailed {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        let output = Command::new("tar")
            .arg("-tzf")
            .arg(path)
            .output()
            .map_err(|e| ArchiveError::OpenFailed {
                path: path.to_path_buf(),
                reason: format!("failed to run tar: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArchiveError::Corrupt {
                path: path.to_path_buf(),
                reason: format!("tar list failed: {}", stderr.trim()),
            });
        }

        let mount_point = normalize_mount_point(mount_point);
        let mut index = HashMap::new();
        let mut order = Vec::new();

        for member in String::from_utf8_lossy(&output.stdout).lines() {
            // Directory members end with a slash
            if member.is_empty() || member.ends_with('/') {
                continue;
            }
            let virtual_path = virtual_path(&mount_point, member);
            if index
                .insert(virtual_path.clone(), member.to_string())
                .is_none()
            {
                order.push(virtual_path);
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            mount_point,
            index,
            order,
        })
    }

    /// Number of file entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the tarball has no file entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Archive for TarArchive {
    fn path(&self) -> &Path {
        &self.path
    }

    fn mount_point(&self) -> &str {
        &self.mount_point
    }

    fn list_entries(&self, prefix: &str) -> ArchiveResult<Vec<String>> {
        Ok(self
            .order
            .iter()
            .filter(|p| p.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn read_entry(&self, entry: &str) -> ArchiveResult<Vec<u8>> {
        let member = self
            .index
            .get(entry)
            .ok_or_else(|| ArchiveError::EntryNotFound {
                path: self.path.clone(),
                entry: entry.to_string(),
            })?;

        let output = Command::new("tar")
            .arg("-xzOf")
            .arg(&self.path)
            .arg(member)
            .output()
            .map_err(|e| ArchiveError::OpenFailed {
                path: self.path.clone(),
                reason: format!("failed to run tar: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArchiveError::Corrupt {
                path: self.path.clone(),
                reason: format!("tar read of {} failed: {}", member, stderr.trim()),
            });
        }

        Ok(output.stdout)
    }
}

/// Opens packs as [`TarArchive`]s at a fixed mount point.
#[derive(Debug, Clone)]
pub struct TarArchiveOpener {
    mount_point: String,
}

impl TarArchiveOpener {
    /// Create an opener mounting every pack at `mount_point`.
    pub fn new(mount_point: &str) -> Self {
        Self {
            mount_point: normalize_mount_point(mount_point),
        }
    }
}

impl ArchiveOpener for TarArchiveOpener {
    fn open(&self, path: &Path) -> ArchiveResult<Box<dyn Archive>> {
        Ok(Box::new(TarArchive::open(path, &self.mount_point)?))
    }
}

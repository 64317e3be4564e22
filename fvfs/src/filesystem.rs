//! Virtual directory view over discovered firmware volumes.
//!
//! Each discovered volume is exposed as one synthetic directory entry at
//! the top level; a mounting filesystem layer owns path resolution and
//! whatever handle type it needs, keyed by entry ordinal. File content
//! nested inside a volume is not interpreted here.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    err::FileSystemError,
    names::NameResolver,
    scan::{DiscoveredVolume, VolumeScanner},
};

/// A top-level directory entry backed by a discovered volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Synthetic display name of the entry.
    pub name: String,
    /// Total length of the backing volume in bytes.
    pub size: u64,
    /// Volumes always list as directories.
    pub directory: bool,
}

/// Read-only directory view of the firmware volumes in a byte source.
///
/// Mounting runs the scan once; the listing is fixed for the life of the
/// view. Re-mounting is the only refresh operation.
pub struct FirmwareVolumeFileSystem<'a> {
    data: &'a [u8],
    volumes: Vec<DiscoveredVolume>,
}

impl<'a> FirmwareVolumeFileSystem<'a> {
    /// Scans `data` and mounts the result. A source containing no volumes
    /// mounts successfully with an empty listing.
    pub fn mount(data: &'a [u8], resolver: &dyn NameResolver) -> Self {
        Self::mount_with_scanner(VolumeScanner::new(data), resolver)
    }

    /// Mounts using a preconfigured scanner (base offset, decode options).
    pub fn mount_with_scanner(scanner: VolumeScanner<'a>, resolver: &dyn NameResolver) -> Self {
        let volumes = scanner.scan(resolver);
        FirmwareVolumeFileSystem { data: scanner.source(), volumes }
    }

    /// The byte source backing this view.
    pub fn source(&self) -> &'a [u8] {
        self.data
    }

    /// The discovered volumes, in stream order.
    pub fn volumes(&self) -> &[DiscoveredVolume] {
        &self.volumes
    }

    /// One directory entry per discovered volume, in stream order.
    pub fn list_top_level(&self) -> Vec<DirEntry> {
        self.volumes
            .iter()
            .map(|volume| DirEntry {
                name: volume.name.clone(),
                size: volume.header.length(),
                directory: true,
            })
            .collect()
    }

    /// A human-readable rendering of the entry's decoded header, or `None`
    /// if the ordinal does not correspond to a discovered volume.
    pub fn describe(&self, index: usize) -> Option<String> {
        self.volumes.get(index).map(|volume| volume.header.to_string())
    }

    /// Content access for an entry.
    ///
    /// Enumerating the files inside a volume is a future capability, so
    /// this reports [`FileSystemError::Unsupported`] for every known entry.
    pub fn open_content(&self, index: usize) -> Result<&'a [u8], FileSystemError> {
        if index >= self.volumes.len() {
            return Err(FileSystemError::NotFound);
        }
        Err(FileSystemError::Unsupported)
    }
}

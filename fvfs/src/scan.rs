//! Firmware volume discovery over an arbitrary byte stream.
//!
//! A stream carries no out-of-band index of where volumes begin, so
//! discovery is two-phased: a cheap signature pre-scan locates a plausible
//! first header, then volumes are decoded and skipped sequentially until
//! the stream is exhausted or decoding fails. A decode failure marks the
//! end of the concatenated-volume region, not a failed scan; everything
//! discovered up to that point is kept.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use alloc::{format, string::String, vec::Vec};

use fvfs_pi::fw_fs::fv;

use crate::{
    names::NameResolver,
    volume::{DecodeOptions, VolumeHeader},
};

/// A firmware volume discovered during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredVolume {
    /// Ordinal of this volume in stream order, starting at 0.
    pub index: usize,
    /// Byte offset of the volume header within the source.
    pub offset: usize,
    /// Synthetic display name, `"Volume NN - <filesystem name>"`.
    pub name: String,
    /// The decoded volume header.
    pub header: VolumeHeader,
}

/// Sequential firmware volume scanner over a borrowed byte source.
pub struct VolumeScanner<'a> {
    data: &'a [u8],
    base_offset: usize,
    options: DecodeOptions,
}

impl<'a> VolumeScanner<'a> {
    /// Creates a scanner over `data`, starting at offset 0 with strict
    /// decode options.
    pub const fn new(data: &'a [u8]) -> Self {
        VolumeScanner { data, base_offset: 0, options: DecodeOptions::new() }
    }

    /// Sets the offset at which signature scanning starts.
    pub const fn with_base_offset(mut self, base_offset: usize) -> Self {
        self.base_offset = base_offset;
        self
    }

    /// Sets the decode options applied to each volume header.
    pub const fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// The byte source this scanner reads.
    pub const fn source(&self) -> &'a [u8] {
        self.data
    }

    /// Locates the first plausible volume header in the stream.
    ///
    /// Steps through the stream 4 bytes at a time looking for the `_FVH`
    /// signature. The signature sits at offset [`fv::SIGNATURE_OFFSET`]
    /// within a header, so a match at `pos` puts the candidate header at
    /// `pos - 40`; matches too close to the start of the stream to hold the
    /// preceding header bytes, or too close to its end to hold the rest of
    /// a minimal header, are skipped as coincidental. Full structural
    /// validation is left to [`VolumeHeader::parse`].
    pub fn pre_scan(&self) -> Option<usize> {
        let mut pos = self.base_offset;
        while pos + 4 <= self.data.len() {
            if self.data[pos..pos + 4] == fv::SIGNATURE.to_le_bytes() {
                if pos >= fv::SIGNATURE_OFFSET
                    && self.data.len() - pos >= fv::HEADER_SIZE - fv::SIGNATURE_OFFSET
                {
                    log::debug!("found _FVH signature at {:#x}", pos);
                    return Some(pos - fv::SIGNATURE_OFFSET);
                }
            }
            pos += 4;
        }
        None
    }

    /// Discovers every volume in the stream, in stream order.
    ///
    /// From the pre-scan offset, decodes a header, records the volume, and
    /// advances by the decoded volume length while bytes remain. The first
    /// decode failure ends the scan; volumes discovered before it are
    /// returned. An empty result means the source contains no volumes.
    pub fn scan(&self, resolver: &dyn NameResolver) -> Vec<DiscoveredVolume> {
        let mut volumes = Vec::new();
        let Some(start) = self.pre_scan() else {
            return volumes;
        };

        let mut offset = start;
        while offset < self.data.len() {
            match VolumeHeader::parse(self.data, offset, self.options) {
                Ok(header) => {
                    let index = volumes.len();
                    let name = format!(
                        "Volume {:02} - {}",
                        index,
                        resolver.resolve_display_name(&header.file_system_guid())
                    );
                    log::debug!("volume {} at {:#x}, {:#x} bytes", index, offset, header.length());
                    let length = header.length() as usize;
                    volumes.push(DiscoveredVolume { index, offset, name, header });
                    offset += length;
                }
                Err(err) => {
                    log::debug!("decode failed at {:#x} ({}), ending scan", offset, err);
                    break;
                }
            }
        }
        volumes
    }
}

//! Firmware Volume (FV) header decoding.
//!
//! Provides [`VolumeHeader`]: an owned, validated decoding of the
//! fixed-layout volume header, including its block map and optional
//! extended header. Decoding either fully succeeds or fails; no partial
//! header values are produced. [`DecodeOptions`] controls the checks that
//! production images routinely violate.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use alloc::vec::Vec;
use core::{fmt, mem};

use fvfs_pi::fw_fs::{fv, fvb};
use r_efi::efi;

use crate::{err::VolumeError, names::canonical_name};

/// Controls which structural checks are applied during decoding.
///
/// The defaults enforce every invariant of the on-disk format. Disabling
/// checksum or zero-vector validation admits headers produced by tools
/// that leave those fields stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Require the header's 16-bit words to sum to zero.
    pub validate_checksum: bool,
    /// Require the leading 16-byte zero vector to be all zero.
    pub require_zero_vector: bool,
}

impl DecodeOptions {
    /// Creates options with every structural check enabled.
    pub const fn new() -> Self {
        DecodeOptions { validate_checksum: true, require_zero_vector: true }
    }

    /// Sets whether the header checksum is validated.
    pub const fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Sets whether the zero vector is required to be all zero.
    pub const fn with_zero_vector_check(mut self, require: bool) -> Self {
        self.require_zero_vector = require;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions::new()
    }
}

/// Owned decoding of a firmware volume header.
///
/// Parsed via [`VolumeHeader::parse`] from a byte source at a given offset.
/// On success the value is fully self-contained; no further reads of the
/// source are needed. [`VolumeHeader::length`] reports the total volume
/// length so a caller can advance past the volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeHeader {
    zero_vector: [u8; 16],
    file_system_guid: efi::Guid,
    fv_length: u64,
    attributes: fvb::attributes::EfiFvbAttributes2,
    header_length: u16,
    checksum: u16,
    ext_header_offset: u16,
    reserved: u8,
    revision: u8,
    block_map: Vec<fv::BlockMapEntry>,
    ext_header: Option<fv::ExtHeader>,
}

impl VolumeHeader {
    /// Decodes and validates a volume header starting at `offset`.
    ///
    /// Every field read is bounds-checked against the source; the caller
    /// need not guarantee that enough trailing bytes exist. Fails with
    /// [`VolumeError::OutOfBounds`] when the source ends before the header
    /// or the volume it describes, and [`VolumeError::MalformedHeader`]
    /// when a structural invariant is violated. A revision other than
    /// [`fv::EXPECTED_REVISION`] is logged but tolerated.
    pub fn parse(data: &[u8], offset: usize, options: DecodeOptions) -> Result<Self, VolumeError> {
        let fixed_end = offset.checked_add(fv::HEADER_SIZE).ok_or(VolumeError::OutOfBounds)?;
        if fixed_end > data.len() {
            return Err(VolumeError::OutOfBounds);
        }
        let fixed = &data[offset..fixed_end];

        // Signature must be ASCII '_FVH'
        let signature = u32::from_le_bytes(fixed[40..44].try_into().unwrap());
        if signature != fv::SIGNATURE {
            return Err(VolumeError::MalformedHeader);
        }

        let mut zero_vector = [0u8; 16];
        zero_vector.copy_from_slice(&fixed[..16]);
        if options.require_zero_vector && zero_vector != [0u8; 16] {
            return Err(VolumeError::MalformedHeader);
        }

        let file_system_guid = efi::Guid::from_bytes(fixed[16..32].try_into().unwrap());

        // fv_length: nonzero, and the volume must lie inside the source.
        let fv_length = u64::from_le_bytes(fixed[32..40].try_into().unwrap());
        if fv_length == 0 {
            return Err(VolumeError::MalformedHeader);
        }
        let volume_end = (offset as u64).checked_add(fv_length).ok_or(VolumeError::OutOfBounds)?;
        if volume_end > data.len() as u64 {
            return Err(VolumeError::OutOfBounds);
        }

        let attributes = u32::from_le_bytes(fixed[44..48].try_into().unwrap());

        // header_length: spans at least the fixed portion, fits in the
        // volume, and is a whole number of checksum words.
        let header_length = u16::from_le_bytes(fixed[48..50].try_into().unwrap());
        if (header_length as usize) < fv::HEADER_SIZE || header_length as u64 > fv_length {
            return Err(VolumeError::MalformedHeader);
        }
        if header_length & 0x01 != 0 {
            return Err(VolumeError::MalformedHeader);
        }

        let checksum = u16::from_le_bytes(fixed[50..52].try_into().unwrap());
        if options.validate_checksum {
            let sum = data[offset..offset + header_length as usize]
                .chunks_exact(2)
                .fold(0u16, |sum, value| sum.wrapping_add(u16::from_le_bytes(value.try_into().unwrap())));
            if sum != 0 {
                return Err(VolumeError::MalformedHeader);
            }
        }

        let ext_header_offset = u16::from_le_bytes(fixed[52..54].try_into().unwrap());
        let reserved = fixed[54];
        let revision = fixed[55];
        if revision != fv::EXPECTED_REVISION {
            log::warn!("unexpected volume header revision {} at offset {:#x}", revision, offset);
        }

        // Block map occupies the header bytes past the fixed portion, in
        // (num_blocks, length) pairs.
        let map_region = &data[offset + fv::HEADER_SIZE..offset + header_length as usize];
        if map_region.len() & 0x7 != 0 {
            return Err(VolumeError::MalformedHeader);
        }
        let mut block_map = map_region
            .chunks_exact(8)
            .map(|pair| fv::BlockMapEntry {
                num_blocks: u32::from_le_bytes(pair[..4].try_into().unwrap()),
                length: u32::from_le_bytes(pair[4..].try_into().unwrap()),
            })
            .collect::<Vec<_>>();
        if !block_map.is_empty() {
            // A non-empty map ends with the terminator pair; interior
            // terminators would leave trailing bytes unaccounted for.
            if block_map.last() != Some(&fv::BlockMapEntry::TERMINATOR) {
                return Err(VolumeError::MalformedHeader);
            }
            block_map.pop();
            if block_map.contains(&fv::BlockMapEntry::TERMINATOR) {
                return Err(VolumeError::MalformedHeader);
            }
        }

        // If an ext header is present it must lie fully inside the volume.
        let ext_header = if ext_header_offset != 0 {
            let ext_size = mem::size_of::<fv::ExtHeader>() as u64;
            if ext_header_offset as u64 + ext_size > fv_length {
                return Err(VolumeError::MalformedHeader);
            }
            let ext_bytes = &data[offset + ext_header_offset as usize..];
            let fv_name = efi::Guid::from_bytes(ext_bytes[..16].try_into().unwrap());
            let ext_header_size = u32::from_le_bytes(ext_bytes[16..20].try_into().unwrap());
            if (ext_header_size as u64) < ext_size
                || ext_header_offset as u64 + ext_header_size as u64 > fv_length
            {
                return Err(VolumeError::MalformedHeader);
            }
            Some(fv::ExtHeader { fv_name, ext_header_size })
        } else {
            None
        };

        Ok(VolumeHeader {
            zero_vector,
            file_system_guid,
            fv_length,
            attributes,
            header_length,
            checksum,
            ext_header_offset,
            reserved,
            revision,
            block_map,
            ext_header,
        })
    }

    /// Total volume length in bytes, including this header.
    pub fn length(&self) -> u64 {
        self.fv_length
    }

    /// The GUID naming the volume's filesystem format.
    pub fn file_system_guid(&self) -> efi::Guid {
        self.file_system_guid
    }

    /// The volume attributes bitfield (`EFI_FVB_ATTRIBUTES_2`), preserved verbatim.
    pub fn attributes(&self) -> fvb::attributes::EfiFvbAttributes2 {
        self.attributes
    }

    /// Length of the header structure including the block map.
    pub fn header_length(&self) -> u16 {
        self.header_length
    }

    /// The stored header checksum.
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    /// Offset of the extended header within the volume, or 0 if absent.
    pub fn ext_header_offset(&self) -> u16 {
        self.ext_header_offset
    }

    /// Header format revision.
    pub fn revision(&self) -> u8 {
        self.revision
    }

    /// The erase-block geometry, terminator excluded.
    pub fn block_map(&self) -> &[fv::BlockMapEntry] {
        &self.block_map
    }

    /// The extended header, if present.
    pub fn ext_header(&self) -> Option<&fv::ExtHeader> {
        self.ext_header.as_ref()
    }

    /// The volume name GUID from the extended header, if available.
    pub fn fv_name(&self) -> Option<efi::Guid> {
        self.ext_header.map(|ext_header| ext_header.fv_name)
    }

    /// The erase/pad byte used by this volume according to its attributes.
    ///
    /// Returns 0xFF when erase polarity is 1, otherwise 0x00.
    pub fn erase_byte(&self) -> u8 {
        if self.attributes & fvb::attributes::raw::fvb2::ERASE_POLARITY != 0 { 0xff } else { 0 }
    }

    /// Re-encodes the decoded header fields into their on-disk form.
    ///
    /// All fields, the checksum included, are emitted verbatim, so
    /// serializing a parsed header reproduces the original header bytes
    /// exactly.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.header_length as usize);
        bytes.extend_from_slice(&self.zero_vector);
        bytes.extend_from_slice(self.file_system_guid.as_bytes());
        bytes.extend_from_slice(&self.fv_length.to_le_bytes());
        bytes.extend_from_slice(&fv::SIGNATURE.to_le_bytes());
        bytes.extend_from_slice(&self.attributes.to_le_bytes());
        bytes.extend_from_slice(&self.header_length.to_le_bytes());
        bytes.extend_from_slice(&self.checksum.to_le_bytes());
        bytes.extend_from_slice(&self.ext_header_offset.to_le_bytes());
        bytes.push(self.reserved);
        bytes.push(self.revision);
        for entry in &self.block_map {
            bytes.extend_from_slice(&entry.num_blocks.to_le_bytes());
            bytes.extend_from_slice(&entry.length.to_le_bytes());
        }
        if self.header_length as usize > fv::HEADER_SIZE {
            // terminator pair
            bytes.extend_from_slice(&[0u8; 8]);
        }
        bytes
    }
}

impl fmt::Display for VolumeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "file system:   {}", canonical_name(&self.file_system_guid))?;
        writeln!(f, "volume length: {:#x} ({} bytes)", self.fv_length, self.fv_length)?;
        writeln!(f, "attributes:    {:#010x} (erase byte {:#04x})", self.attributes, self.erase_byte())?;
        writeln!(f, "header length: {:#x}", self.header_length)?;
        writeln!(f, "checksum:      {:#06x}", self.checksum)?;
        writeln!(f, "revision:      {}", self.revision)?;
        if let Some(ext_header) = &self.ext_header {
            writeln!(f, "volume name:   {}", canonical_name(&ext_header.fv_name))?;
        }
        write!(f, "block map:     ")?;
        if self.block_map.is_empty() {
            write!(f, "(none)")
        } else {
            for (idx, entry) in self.block_map.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} x {:#x}", entry.num_blocks, entry.length)?;
            }
            Ok(())
        }
    }
}

impl TryFrom<&[u8]> for VolumeHeader {
    type Error = VolumeError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        VolumeHeader::parse(value, 0, DecodeOptions::new())
    }
}

//! Shared helpers for building synthetic firmware volumes in tests.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use fvfs_pi::fw_fs::fv;
use r_efi::efi;

pub const TEST_GUID: efi::Guid =
    efi::Guid::from_fields(0x550e8400, 0xe29b, 0x41d4, 0xa7, 0x16, &[0x44, 0x66, 0x55, 0x44, 0x00, 0x00]);

/// Recomputes the checksum of the header at `offset` so that its 16-bit
/// words sum to zero.
pub fn patch_checksum(bytes: &mut [u8], offset: usize, header_length: usize) {
    bytes[offset + 50..offset + 52].copy_from_slice(&[0u8; 2]);
    let sum = bytes[offset..offset + header_length]
        .chunks_exact(2)
        .fold(0u16, |sum, value| sum.wrapping_add(u16::from_le_bytes(value.try_into().unwrap())));
    bytes[offset + 50..offset + 52].copy_from_slice(&0u16.wrapping_sub(sum).to_le_bytes());
}

/// Builds a `total_len`-byte volume whose block map is the raw `map_bytes`,
/// terminator included (or absent) exactly as given.
pub fn build_volume_raw(total_len: usize, guid: &efi::Guid, map_bytes: &[u8]) -> Vec<u8> {
    let header_length = fv::HEADER_SIZE + map_bytes.len();
    let mut bytes = vec![0u8; total_len];
    bytes[16..32].copy_from_slice(guid.as_bytes());
    bytes[32..40].copy_from_slice(&(total_len as u64).to_le_bytes());
    bytes[40..44].copy_from_slice(&fv::SIGNATURE.to_le_bytes());
    bytes[48..50].copy_from_slice(&(header_length as u16).to_le_bytes());
    bytes[55] = fv::EXPECTED_REVISION;
    bytes[fv::HEADER_SIZE..header_length].copy_from_slice(map_bytes);
    patch_checksum(&mut bytes, 0, header_length);
    bytes
}

/// Builds a well-formed `total_len`-byte volume with the given block map
/// entries; the terminator pair is appended automatically. Empty `entries`
/// produce the minimal 56-byte header with no block map at all.
pub fn build_volume(total_len: usize, guid: &efi::Guid, entries: &[(u32, u32)]) -> Vec<u8> {
    let mut map_bytes = Vec::new();
    for (num_blocks, length) in entries {
        map_bytes.extend_from_slice(&num_blocks.to_le_bytes());
        map_bytes.extend_from_slice(&length.to_le_bytes());
    }
    if !entries.is_empty() {
        map_bytes.extend_from_slice(&[0u8; 8]);
    }
    build_volume_raw(total_len, guid, &map_bytes)
}

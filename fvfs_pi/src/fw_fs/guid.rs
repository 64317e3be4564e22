//! Well-Known Firmware Storage GUIDs
//!
//! Filesystem and volume name GUIDs commonly found in the headers of
//! production firmware volumes.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use r_efi::efi;

/// EFI_FIRMWARE_FILE_SYSTEM_GUID: 7A9354D9-0468-444A-81CE-0BF617D890DF
pub const EFI_FIRMWARE_FILE_SYSTEM_GUID: efi::Guid =
    efi::Guid::from_fields(0x7a9354d9, 0x0468, 0x444a, 0x81, 0xce, &[0x0b, 0xf6, 0x17, 0xd8, 0x90, 0xdf]);

/// EFI_FIRMWARE_FILE_SYSTEM2_GUID: 8C8CE578-8A3D-4F1C-9935-896185C32DD3
pub const EFI_FIRMWARE_FILE_SYSTEM2_GUID: efi::Guid =
    efi::Guid::from_fields(0x8c8ce578, 0x8a3d, 0x4f1c, 0x99, 0x35, &[0x89, 0x61, 0x85, 0xc3, 0x2d, 0xd3]);

/// EFI_FIRMWARE_FILE_SYSTEM3_GUID: 5473C07A-3DCB-4DCA-BD6F-1E9689E7349A
pub const EFI_FIRMWARE_FILE_SYSTEM3_GUID: efi::Guid =
    efi::Guid::from_fields(0x5473c07a, 0x3dcb, 0x4dca, 0xbd, 0x6f, &[0x1e, 0x96, 0x89, 0xe7, 0x34, 0x9a]);

/// EFI_SYSTEM_NV_DATA_FV_GUID: FFF12B8D-7696-4C8B-A985-2747075B4F50
pub const EFI_SYSTEM_NV_DATA_FV_GUID: efi::Guid =
    efi::Guid::from_fields(0xfff12b8d, 0x7696, 0x4c8b, 0xa9, 0x85, &[0x27, 0x47, 0x07, 0x5b, 0x4f, 0x50]);

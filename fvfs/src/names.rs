//! Display-name resolution for firmware volume GUIDs.
//!
//! A volume is named after its filesystem GUID. Well-known GUIDs resolve to
//! their EDK II symbolic names; everything else falls back to the GUID's
//! canonical registry-format text.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
use alloc::string::{String, ToString};
use fvfs_pi::fw_fs::guid;
use r_efi::efi;
use uuid::Uuid;

/// Renders a GUID in canonical registry format.
///
/// ## Examples
///
/// ```rust
/// use fvfs::names::canonical_name;
/// use r_efi::efi;
///
/// let guid = efi::Guid::from_fields(0x8c8ce578, 0x8a3d, 0x4f1c, 0x99, 0x35, &[0x89, 0x61, 0x85, 0xc3, 0x2d, 0xd3]);
/// assert_eq!(canonical_name(&guid), "8C8CE578-8A3D-4F1C-9935-896185C32DD3");
/// ```
pub fn canonical_name(guid: &efi::Guid) -> String {
    // efi::Guid stores the mixed-endian wire form.
    Uuid::from_bytes_le(*guid.as_bytes()).to_string().to_uppercase()
}

/// Maps a 16-byte identifier to a display string.
pub trait NameResolver {
    /// Resolves a display name for `guid`, falling back to its canonical
    /// text form when no known name exists.
    fn resolve_display_name(&self, guid: &efi::Guid) -> String {
        canonical_name(guid)
    }
}

/// Resolver that only ever produces canonical GUID text.
pub struct CanonicalNames;

impl NameResolver for CanonicalNames {}

const KNOWN_GUID_NAMES: &[(efi::Guid, &str)] = &[
    (guid::EFI_FIRMWARE_FILE_SYSTEM_GUID, "EfiFirmwareFileSystemGuid"),
    (guid::EFI_FIRMWARE_FILE_SYSTEM2_GUID, "EfiFirmwareFileSystem2Guid"),
    (guid::EFI_FIRMWARE_FILE_SYSTEM3_GUID, "EfiFirmwareFileSystem3Guid"),
    (guid::EFI_SYSTEM_NV_DATA_FV_GUID, "EfiSystemNvDataFvGuid"),
];

/// Resolver backed by the table of well-known firmware storage GUIDs.
pub struct KnownGuidNames;

impl NameResolver for KnownGuidNames {
    fn resolve_display_name(&self, guid: &efi::Guid) -> String {
        KNOWN_GUID_NAMES
            .iter()
            .find(|(known, _)| known == guid)
            .map(|(_, name)| (*name).to_string())
            .unwrap_or_else(|| canonical_name(guid))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn canonical_name_renders_registry_format() {
        let guid = efi::Guid::from_bytes(&[0u8; 16]);
        assert_eq!(canonical_name(&guid), "00000000-0000-0000-0000-000000000000");
        assert_eq!(
            canonical_name(&guid::EFI_SYSTEM_NV_DATA_FV_GUID),
            "FFF12B8D-7696-4C8B-A985-2747075B4F50"
        );
    }

    #[test]
    fn known_guids_resolve_to_symbolic_names() {
        let resolver = KnownGuidNames;
        assert_eq!(
            resolver.resolve_display_name(&guid::EFI_FIRMWARE_FILE_SYSTEM2_GUID),
            "EfiFirmwareFileSystem2Guid"
        );
        assert_eq!(
            resolver.resolve_display_name(&guid::EFI_FIRMWARE_FILE_SYSTEM3_GUID),
            "EfiFirmwareFileSystem3Guid"
        );
    }

    #[test]
    fn unknown_guids_fall_back_to_canonical_text() {
        let resolver = KnownGuidNames;
        let guid = efi::Guid::from_bytes(&[0xa5u8; 16]);
        assert_eq!(resolver.resolve_display_name(&guid), canonical_name(&guid));
    }
}

//! Firmware volume discovery for firmware images, flash dumps, and capsules.
//!
//! This crate locates UEFI Firmware Volumes embedded in an arbitrary byte
//! stream and exposes them as a flat virtual directory: one synthetic entry
//! per discovered volume.
//!
//! - [`volume`]: decodes and validates the fixed-layout volume header.
//! - [`scan`]: signature pre-scan and sequential decode-and-advance driver.
//! - [`filesystem`]: the directory view consumed by a mounting filesystem
//!   layer.
//! - [`names`]: display-name resolution for filesystem GUIDs.
//!
//! File content inside a volume is not interpreted; [`filesystem`] reports
//! nested content access as unsupported.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod err;
pub mod filesystem;
pub mod names;
pub mod scan;
pub mod volume;

#[cfg(test)]
mod test_support;

pub use err::{FileSystemError, VolumeError};

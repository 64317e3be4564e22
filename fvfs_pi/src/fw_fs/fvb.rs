//! Firmware Volume Block (FVB) Definitions
//!
//! Based on the values defined in the UEFI Platform Initialization (PI) Specification V1.8A 3.2.1.1
//! EFI_FIRMWARE_VOLUME_HEADER.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

pub mod attributes;

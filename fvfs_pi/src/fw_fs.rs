//! Firmware Storage Definitions
//!
//! Based on the values defined in the UEFI Platform Initialization (PI)
//! Specification V1.8A 3.1 Firmware Storage Code Definitions.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
pub mod fv;
pub mod fvb;
pub mod guid;

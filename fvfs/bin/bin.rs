//! Executable for listing the firmware volumes in a firmware image.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use clap::Parser;
use fvfs::{
    filesystem::FirmwareVolumeFileSystem,
    names::KnownGuidNames,
    scan::VolumeScanner,
    volume::DecodeOptions,
};
use std::{
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
struct Args {
    /// Path for the input firmware image, flash dump, or capsule.
    image_path: PathBuf,
    /// Optional path for the output file. If not specified, the output will be printed to stdout.
    #[arg(short, long)]
    output_path: Option<PathBuf>,
    /// Byte offset at which signature scanning starts.
    #[arg(short, long, default_value_t = 0)]
    base_offset: usize,
    /// Flag to include the decoded header of each volume in the output.
    #[arg(short, long, default_value_t = false)]
    info: bool,
    /// Flag to skip checksum and zero-vector validation.
    #[arg(long, default_value_t = false)]
    permissive: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Read the image into a buffer
    let mut file = File::open(Path::new(&args.image_path))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let options = DecodeOptions::new()
        .with_checksum_validation(!args.permissive)
        .with_zero_vector_check(!args.permissive);
    let scanner = VolumeScanner::new(&buffer).with_base_offset(args.base_offset).with_options(options);
    let filesystem = FirmwareVolumeFileSystem::mount_with_scanner(scanner, &KnownGuidNames);

    // Write to stdout if no output file is specified.
    match args.output_path {
        Some(path) => {
            let mut out = File::create(path)?;
            write_listing(&filesystem, args.info, &mut out)
        }
        None => write_listing(&filesystem, args.info, &mut io::stdout()),
    }
}

fn write_listing<W: Write>(
    filesystem: &FirmwareVolumeFileSystem<'_>,
    info: bool,
    out: &mut W,
) -> io::Result<()> {
    if filesystem.volumes().is_empty() {
        writeln!(out, "no firmware volumes found")?;
        return Ok(());
    }

    for volume in filesystem.volumes() {
        writeln!(out, "{} ({} bytes at {:#x})", volume.name, volume.header.length(), volume.offset)?;
        if info {
            if let Some(text) = filesystem.describe(volume.index) {
                for line in text.lines() {
                    writeln!(out, "    {line}")?;
                }
            }
        }
    }

    Ok(())
}

// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Command-line front end for the medcodec image codec: decodes an input
//! image, round-trips it through [`medcodec_codec::container`], and writes
//! both the compressed container and the decoded image back out.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use medcodec_codec::container;
use medcodec_core::errors::{image_decode_error, CodecError, Result};

/// Encode an image losslessly and immediately decode it back, writing both
/// the compressed container and the reconstructed image to disk.
#[derive(Parser)]
#[command(name = "medcodec", version, about)]
struct Cli {
    /// Input BMP or PNG image to compress.
    input_image: PathBuf,

    /// Path to write the compressed container to.
    output_compressed: PathBuf,

    /// Path to write the decoded image back out to.
    output_decoded: PathBuf,

    /// Increase log verbosity; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", level);
    }
    pretty_env_logger::init();
}

fn read_rgb8(path: &Path) -> Result<(Vec<u8>, u32, u32)> {
    let img = image::open(path).map_err(|e| CodecError::ImageDecode(e.to_string()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok((rgb.into_raw(), width, height))
}

fn write_rgb8(path: &Path, rgb: &[u8], width: u32, height: u32) -> Result<()> {
    let buf = image::RgbImage::from_raw(width, height, rgb.to_vec())
        .ok_or_else(|| CodecError::ImageDecode("decoded buffer does not match its dimensions".into()))?;
    buf.save(path).map_err(|e| CodecError::Io {
        path: path.display().to_string(),
        source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
    })
}

fn run(cli: &Cli) -> Result<()> {
    info!("reading {}", cli.input_image.display());
    let (rgb, width, height) = read_rgb8(&cli.input_image)?;

    info!("encoding {}x{} image", width, height);
    let packed = container::encode(&rgb, width, height)?;

    info!("writing compressed container to {}", cli.output_compressed.display());
    std::fs::write(&cli.output_compressed, &packed).map_err(|e| CodecError::Io {
        path: cli.output_compressed.display().to_string(),
        source: e,
    })?;

    info!("decoding container back to pixels");
    let (decoded, dec_width, dec_height) = container::decode(&packed)?;
    if decoded != rgb || (dec_width, dec_height) != (width, height) {
        return image_decode_error("decoded image did not match the original losslessly");
    }

    info!("writing decoded image to {}", cli.output_decoded.display());
    write_rgb8(&cli.output_decoded, &decoded, dec_width, dec_height)?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("medcodec: {}", err);
            ExitCode::FAILURE
        }
    }
}

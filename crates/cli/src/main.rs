#![deny(unsafe_code)]
//! CLI binary for egl-triangle.
//!
//! Renders one triangle into an offscreen EGL pbuffer and writes it as a
//! 32-bit BMP. With no arguments: 640x480, `triangle.bmp` in the current
//! directory.

mod error;
mod logging;

use clap::Parser;
use egl_triangle_core::config::{DEFAULT_HEIGHT, DEFAULT_OUTPUT, DEFAULT_WIDTH};
use egl_triangle_core::{render, RenderConfig};
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "egl-triangle",
    about = "Render a triangle offscreen with EGL and save it as BMP"
)]
struct Cli {
    /// Print a JSON report instead of the version line; errors as JSON too.
    #[arg(long)]
    json: bool,

    /// Surface width in pixels.
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Surface height in pixels.
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Output file path. Overwritten if it exists.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

impl Cli {
    fn config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            output: self.output.clone(),
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let report = render::render(&cli.config())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("EGL major.minor: {}", report.egl_version_string());
    }
    Ok(())
}

fn main() {
    logging::init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        if cli.json {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

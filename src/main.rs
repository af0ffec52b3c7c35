use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use zensprite::{ModePolicy, ResizeFilter, SheetConfig};

/// Pack images side by side into one sprite sheet and write matching CSS.
#[derive(Parser, Debug)]
#[command(name = "zensprite", version, about)]
struct Cli {
    /// The output image file; its extension selects the format
    output: PathBuf,

    /// The output CSS file
    css: PathBuf,

    /// The input image files, packed left to right in this order
    #[arg(required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Rescale every image to this height (also accepted as -fh)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    fixed_height: Option<u32>,

    /// Output quality (0-100), lossy formats only
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: Option<u8>,

    /// Do not print the argument summary
    #[arg(short, long)]
    silent: bool,

    /// Prefix for the image URL in the CSS
    #[arg(short = 'p', long, alias = "url_prefix", default_value = "")]
    url_prefix: String,

    /// Fail when input images have different colour types
    #[arg(long)]
    strict_mode: bool,

    /// Resampling filter used with --fixed-height
    #[arg(long, default_value = "lanczos3", value_parser = parse_filter)]
    filter: ResizeFilter,
}

impl Cli {
    fn into_config(self) -> SheetConfig {
        SheetConfig {
            output_image: self.output,
            output_css: self.css,
            input_images: self.input,
            fixed_height: self.fixed_height,
            quality: self.quality,
            silent: self.silent,
            url_prefix: self.url_prefix,
            mode_policy: if self.strict_mode {
                ModePolicy::Strict
            } else {
                ModePolicy::AdoptFirst
            },
            resize_filter: self.filter,
        }
    }
}

fn parse_filter(s: &str) -> Result<ResizeFilter, String> {
    ResizeFilter::from_name(s).ok_or_else(|| {
        format!(
            "unknown filter {s:?} (expected nearest, bilinear, catmull-rom, mitchell or lanczos3)"
        )
    })
}

/// Rewrite the two-letter short flag `-fh` to `--fixed-height`, which clap
/// cannot express as a short option. Arguments that are not UTF-8 pass
/// through untouched.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|a| match a.to_str().and_then(|s| s.strip_prefix("-fh")) {
            Some("") => OsString::from("--fixed-height"),
            Some(rest) if rest.starts_with('=') => format!("--fixed-height{rest}").into(),
            _ => a,
        })
        .collect()
}

fn run(config: &SheetConfig) -> anyhow::Result<()> {
    if !config.silent {
        for line in config.summary_lines() {
            println!("{line}");
        }
    }
    let report = zensprite::build(config).with_context(|| {
        format!(
            "building {} from {} images",
            config.output_image.display(),
            config.input_images.len()
        )
    })?;
    log::info!(
        "{}x{} {:?} sheet, stylesheet at {}",
        report.canvas.width,
        report.canvas.height,
        report.color,
        report.css_path.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let default_level = if cli.silent { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.into_config();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("zensprite: {err:#}");
            ExitCode::FAILURE
        }
    }
}

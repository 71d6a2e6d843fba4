use batchpix::imaging::RustBackend;
use batchpix::{config, convert, output, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "batchpix")]
#[command(about = "Batch image converter for photo dumps")]
#[command(long_about = "\
Batch image converter for photo dumps

Reads every image in the source directory, converts HEIC to JPEG and
normalizes JPEG/PNG, then writes the results next to it:

  image/                 # Source directory (flat, not traversed)
  ├── IMG_0042.HEIC      # → dist/IMG_0042.jpg
  ├── scan.jpeg          # → dist/scan.jpg
  ├── art.png            # → dist/art.png
  └── notes.txt          # skipped with a notice
  dist/                  # Output directory, created on demand

Modes decide what happens beyond the format conversion:

  plain     convert formats only (JPEG encodes at quality 90)
  min       also bound both dimensions to 2000 px (never enlarging)
  comp      also recompress at quality 80
  mincomp   both

Defaults can be re-tuned with a config.toml next to where batchpix runs
('batchpix gen-config' prints a documented one) and overridden per run
with --max-size / --quality.")]
#[command(version = version_string())]
struct Cli {
    /// Source directory (default: "image", or config.toml `input`)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (default: "dist", or config.toml `output`)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the source directory into the output directory
    Convert(ConvertArgs),
    /// List what a run would convert and skip, without converting
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Run preset deciding whether resizing and recompression apply
    #[arg(long, value_enum, default_value_t = config::Mode::Plain)]
    mode: config::Mode,

    /// Remove the output directory before converting
    #[arg(long)]
    refresh: bool,

    /// Bound both dimensions to this many pixels (overrides the preset)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_size: Option<u32>,

    /// Encoder quality 0-100 (overrides the preset)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: Option<u8>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let tool_config = config::load_config(Path::new("."))?;
    let input_dir = cli
        .source
        .unwrap_or_else(|| PathBuf::from(&tool_config.input));
    let output_dir = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&tool_config.output));

    match cli.command {
        Command::Convert(args) => {
            let mut run_config = config::resolve(args.mode, &tool_config.defaults);
            if args.max_size.is_some() {
                run_config.resize_limit = args.max_size;
            }
            if args.quality.is_some() {
                run_config.quality = args.quality;
            }

            let opts = convert::RunOptions {
                input_dir,
                output_dir,
                refresh: args.refresh,
                config: run_config,
            };
            let summary = convert::run(&RustBackend::new(), &opts)?;
            output::print_run_summary(&summary);
        }
        Command::Check => {
            let listing = scan::scan(&input_dir)?;
            output::print_check_output(&listing);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

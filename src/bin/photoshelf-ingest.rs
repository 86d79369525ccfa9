use clap::Parser;
use photoshelf::ingest::{self, IngestError, IngestOptions};
use photoshelf::{config, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "photoshelf-ingest")]
#[command(about = "Add images to a site's photos/ directory and manifest")]
#[command(long_about = "\
Add images to a site's photos/ directory and manifest

Every supported source (.jpeg .jpg .png .tif .tiff .webp) under INPUT becomes
the next free numbered pair in PROJECT/photos/, and one record is appended to
PROJECT/photos/manifest.json:

  photos/
  ├── manifest.json
  ├── 004.jpg          2000px long edge, progressive JPEG
  └── 004-thumb.jpg     600px long edge

Numbering continues after the highest NNN.jpg already present. Captions are
made from the source file name (sunset_over-the_bay.jpg → \"sunset over the
bay\"), optionally prefixed with --alt-prefix.

Sizes, quality and URL prefix can be set in PROJECT/photos.toml.
Run 'photoshelf-ingest --gen-config' to print a documented one.")]
#[command(version = photoshelf::version_string())]
struct Cli {
    /// Image file or directory to ingest
    #[arg(required_unless_present = "gen_config")]
    input: Option<PathBuf>,

    /// Site root (photos/ is created inside it)
    #[arg(required_unless_present = "gen_config")]
    project: Option<PathBuf>,

    /// Prefix for every synthesized caption
    #[arg(long)]
    alt_prefix: Option<String>,

    /// Config file to use instead of PROJECT/photos.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a stock photos.toml with all options documented
    #[arg(long, exclusive = true)]
    gen_config: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    let (Some(input), Some(project)) = (cli.input, cli.project) else {
        eprintln!("INPUT and PROJECT are required");
        return ExitCode::FAILURE;
    };

    let config = match config::resolve_config(cli.config.as_deref(), &project) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = IngestOptions {
        input,
        project,
        alt_prefix: cli.alt_prefix,
        config,
    };

    match ingest::ingest(&options) {
        Ok(report) => {
            output::print_ingest_report(&report);
            ExitCode::SUCCESS
        }
        Err(e @ IngestError::NoImages(_)) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

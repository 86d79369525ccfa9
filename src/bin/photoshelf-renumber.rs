use clap::Parser;
use photoshelf::renumber::{self, RenumberOptions, SortOrder};
use photoshelf::{config, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "photoshelf-renumber")]
#[command(about = "Renumber photo pairs and rebuild manifest.json")]
#[command(long_about = "\
Renumber photo pairs and rebuild manifest.json

Every NNN.jpg that has a matching NNN-thumb.jpg is renamed into a contiguous
run starting at --start, in --sort order. Files without a partner are left
alone.

  002.jpg  ->  001.jpg
  005.jpg  ->  002.jpg
  009.jpg  ->  003.jpg

The manifest is then rebuilt from the renamed files. Captions and tones are
carried over from the previous manifest by image content; the previous
manifest is kept as manifest.json.bak.

Use --dry-run to see the plan and the resulting manifest without touching
anything.

If a new name is already taken by a file that is not part of any pair (an
NNN.jpg with no thumbnail, say), the plan and the conflicting file are
printed, nothing is renamed, and the exit status is 1.")]
#[command(version = photoshelf::version_string())]
struct Cli {
    /// Site root, or the photos directory itself
    project: PathBuf,

    /// Order before renumbering
    #[arg(long, value_enum, default_value_t = SortOrder::Name)]
    sort: SortOrder,

    /// First index to assign
    #[arg(long, default_value_t = 1)]
    start: u32,

    /// Print actions, do not write
    #[arg(long)]
    dry_run: bool,

    /// Tone for images with no recoverable tone [default: from config, "neutral"]
    #[arg(long)]
    default_tone: Option<String>,

    /// Config file to use instead of <site root>/photos.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let photos_dir = match renumber::locate_photos_dir(&cli.project) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut config = match config::resolve_config(
        cli.config.as_deref(),
        &renumber::site_root_of(&photos_dir),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(tone) = cli.default_tone {
        config.manifest.default_tone = tone;
    }

    let options = RenumberOptions {
        project: photos_dir,
        sort: cli.sort,
        start: cli.start,
        dry_run: cli.dry_run,
        config,
    };

    let report = match renumber::renumber(&options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = output::print_renumber_report(&report) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if report.conflict.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

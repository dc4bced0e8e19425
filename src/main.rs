use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use superposter::config::{self, CompositorKind, PosterConfig};
use superposter::imaging::{
    CellGeometry, Compositor, MontageCompositor, NativeCompositor, TileGrid,
};
use superposter::{assemble, output, scan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "superposter")]
#[command(about = "Assemble a chronological grid poster from dated PNG tiles")]
#[command(long_about = "\
Assemble a chronological grid poster from dated PNG tiles

Tiles are PNG files in the working directory whose names start with a date:

  BC0431_antigone.png    before the epoch, listed first (descending)
  1601_hamlet.png        after the epoch, listed next (ascending)

Names are compared as text, so keep the year part zero-padded to one width.
Any existing superposter.png is deleted first, then the tiles are handed to
ImageMagick `montage` (or the built-in native compositor) in that order.

Settings come from superposter.toml in the working directory, overridden by
flags. Run 'superposter gen-config' for a documented config file.")]
#[command(version)]
struct Cli {
    /// Working directory holding the tiles [default: workingDirectory from config]
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Config file [default: <dir>/superposter.toml, if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Compositor to build the poster with
    #[arg(long, value_enum, global = true)]
    compositor: Option<CompositorKind>,

    /// Output filename inside the working directory
    #[arg(long, global = true)]
    output: Option<String>,

    /// Tile grid as COLUMNSxROWS, e.g. 29x23
    #[arg(long, value_name = "CxR", global = true)]
    tile: Option<TileGrid>,

    /// Cell geometry as WIDTHxHEIGHT+X+Y, e.g. 600x600+1+1
    #[arg(long, value_name = "WxH+X+Y", global = true)]
    geometry: Option<CellGeometry>,

    /// Do not show compositor progress
    #[arg(long, global = true)]
    no_monitor: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Remove stale output, list tiles, compose the poster (the default)
    Build,
    /// Print tiles in poster order without touching anything
    List {
        /// Emit a JSON array instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the compositor invocation without running it
    Plan,
    /// Print a stock superposter.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.as_ref().unwrap_or(&Command::Build) {
        Command::Build => {
            let (poster_config, options) = load_settings(&cli)?;
            let compositor = build_compositor(&poster_config);
            let report =
                assemble::assemble(&options, compositor.as_ref(), output::print_assemble_event)?;
            println!("{}", output::format_summary(&report));
        }
        Command::List { json } => {
            let (_, options) = load_settings(&cli)?;
            let files = scan::scan(&options.working_dir)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else {
                output::print_file_list(&files);
            }
        }
        Command::Plan => {
            let (poster_config, options) = load_settings(&cli)?;
            let files = scan::scan(&options.working_dir)?;
            let params = assemble::compose_params(&options, &files);
            match poster_config.compositor {
                CompositorKind::Montage => {
                    let montage = MontageCompositor::with_program(
                        poster_config.montage_program.clone(),
                        poster_config.monitor,
                    );
                    println!(
                        "{}",
                        output::format_command(montage.program(), &montage.args(&params))
                    );
                }
                CompositorKind::Native => {
                    println!(
                        "native: {} grid, {} cells → {}",
                        params.grid,
                        params.geometry,
                        params.output.display()
                    );
                    output::print_file_list(&files);
                }
            }
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Resolve config file, flag overrides, and the working directory.
///
/// Precedence: flags > config file > stock defaults.
fn load_settings(
    cli: &Cli,
) -> Result<(PosterConfig, assemble::AssembleOptions), config::ConfigError> {
    let (mut poster_config, base) = match &cli.config {
        Some(path) => {
            let loaded = config::load_config_file(path)?;
            let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (loaded, base)
        }
        None => {
            let dir = cli.dir.clone().unwrap_or_else(|| PathBuf::from("."));
            (config::load_config(&dir)?, dir)
        }
    };

    if let Some(kind) = cli.compositor {
        poster_config.compositor = kind;
    }
    if let Some(name) = &cli.output {
        poster_config.output = name.clone();
    }
    if let Some(grid) = cli.tile {
        poster_config.set_grid(grid);
    }
    if let Some(geometry) = cli.geometry {
        poster_config.set_geometry(geometry);
    }
    if cli.no_monitor {
        poster_config.monitor = false;
    }
    poster_config.validate()?;

    let working_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => config::resolve_working_directory(&poster_config, &base),
    };
    tracing::debug!(dir = %working_dir.display(), ?poster_config, "resolved settings");
    let options = assemble::AssembleOptions::from_config(&poster_config, working_dir);
    Ok((poster_config, options))
}

fn build_compositor(poster_config: &PosterConfig) -> Box<dyn Compositor> {
    match poster_config.compositor {
        CompositorKind::Montage => Box::new(MontageCompositor::with_program(
            poster_config.montage_program.clone(),
            poster_config.monitor,
        )),
        CompositorKind::Native => Box::new(NativeCompositor::new(
            poster_config.background_rgb(),
            poster_config.monitor,
        )),
    }
}

/// Diagnostics go to stderr so stdout stays clean for `list --json`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

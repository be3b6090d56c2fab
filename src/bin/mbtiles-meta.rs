use std::path::{Path, PathBuf};

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use log::{debug, error};
use mbtiles_meta::{
    BoundsCalculator, OsEnv, PatchDefaults, Tileset, apply_metadata,
};
use tilejson::Bounds;

/// Defines the styles used for the CLI help output.
const HELP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Blue.on_default().bold())
    .usage(AnsiColor::Blue.on_default().bold())
    .literal(AnsiColor::White.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, PartialEq, Debug)]
#[command(
    version,
    name = "mbtiles-meta",
    about = "Computes and writes descriptive metadata into an .mbtiles tile archive",
    after_help = "Metadata defaults are read from the NAME, ID, VERSION, ATTRIBUTION, DESCRIPTION, TYPE, BBOX, MIN_ZOOM, MAX_ZOOM and CENTER_ZOOM environment variables.\nUse RUST_LOG environment variable to control logging level, e.g. RUST_LOG=debug or RUST_LOG=mbtiles_meta=debug. See https://docs.rs/env_logger/latest/env_logger/index.html#enabling-logging for more information.",
    styles = HELP_STYLES
)]
pub struct Args {
    /// Overwrite all metadata values instead of only filling missing or empty ones
    #[arg(short, long)]
    force: bool,
    /// `MBTiles` file to update
    file: PathBuf,
    /// Explicit bounding box in degrees, replacing the BBOX environment default
    #[arg(
        num_args = 4,
        allow_negative_numbers = true,
        value_names = ["WEST", "SOUTH", "EAST", "NORTH"]
    )]
    bounds: Vec<f64>,
}

#[tokio::main]
async fn main() {
    let env = env_logger::Env::default().default_filter_or("mbtiles_meta=info");
    env_logger::Builder::from_env(env)
        .format_indent(None)
        .format_module_path(false)
        .format_target(false)
        .format_timestamp(None)
        .init();

    if let Err(err) = main_int().await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn main_int() -> anyhow::Result<()> {
    let args = Args::parse();

    let defaults = PatchDefaults::from_env(&OsEnv)?;
    let bounds = match args.bounds[..] {
        [west, south, east, north] => Bounds::new(west, south, east, north),
        _ => defaults.bbox,
    };

    let calc = BoundsCalculator::new(
        bounds,
        defaults.min_zoom,
        defaults.max_zoom,
        defaults.center_zoom,
    );
    let record = calc.build_record(&defaults, &args.file)?;
    debug!("Computed metadata record:\n{}", serde_yaml::to_string(&record)?);

    apply_metadata(&args.file, &record, args.force).await?;

    print_metadata(&args.file).await
}

/// Print the resulting metadata table, the way `mbtiles meta-all` would.
async fn print_metadata(file: &Path) -> anyhow::Result<()> {
    let tileset = Tileset::new(file)?;
    let mut conn = tileset.open_readonly().await?;
    let metadata = tileset.read_all_metadata(&mut conn).await?;
    println!("{}", serde_yaml::to_string(&metadata)?);
    Ok(())
}

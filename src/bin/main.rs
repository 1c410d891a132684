use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use pathmorph::svg::{load_svg, write_svg};
use pathmorph::{Config, MorphError, Session};
use std::path::PathBuf;

/// Morph one closed path of an SVG file into another.
#[derive(Parser, Debug)]
#[command(name = "pathmorph", version)]
struct Args {
    /// SVG file with the paths to morph
    input: Option<PathBuf>,

    /// Index of the path to morph from
    #[arg(long, default_value_t = 0)]
    path1: usize,

    /// Index of the path to morph to (defaults to the second path)
    #[arg(long)]
    path2: Option<usize>,

    /// Segment of path 1 to start from
    #[arg(long, default_value_t = 0)]
    shift: usize,

    /// Traverse path 1 in the opposite direction
    #[arg(long)]
    reverse: bool,

    /// Search for the shift and direction that best match path 2
    #[arg(long)]
    auto_align: bool,

    /// Frames extrapolated before path 1
    #[arg(long)]
    before: Option<usize>,

    /// Frames between path 1 and path 2
    #[arg(long)]
    between: Option<usize>,

    /// Frames extrapolated after path 2
    #[arg(long)]
    after: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the resulting SVG (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let input = args.input.as_ref().context("No input file given")?;
    let mut session = Session::new(config);
    session.load(load_svg(input)?);
    if session.path_count() == 0 {
        warn!("No paths found in {}", input.display());
    }

    session.set_path1_index(args.path1);
    if let Some(path2) = args.path2 {
        session.set_path2_index(path2);
    }
    session.set_start_shift(args.shift);
    session.set_reverse(args.reverse);
    let mut blend = session.blend();
    blend.before = args.before.unwrap_or(blend.before);
    blend.between = args.between.unwrap_or(blend.between);
    blend.after = args.after.unwrap_or(blend.after);
    session.set_blend(blend);

    if args.auto_align {
        match session.auto_align() {
            Ok(_) => {}
            Err(MorphError::LengthMismatch { .. }) => {
                warn!("Auto align error: paths do not have the same length")
            }
            Err(err) => warn!("Auto align error: {}", err),
        }
    }

    let alignment = session.alignment();
    info!(
        "Path {} -> path {}: start {}, reversed {}, {} frames",
        session.path1_index() + 1,
        session.path2_index() + 1,
        alignment.shift + 1,
        alignment.reverse,
        session.frames().len()
    );

    let frame = match session.frame() {
        Some(frame) => frame,
        None => {
            warn!("Nothing to write");
            return Ok(());
        }
    };
    let document = write_svg(&frame);
    match &args.output {
        Some(path) => {
            std::fs::write(path, document).with_context(|| format!("Could not write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", document),
    }
    Ok(())
}

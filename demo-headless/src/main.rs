//! Headless blast demo
//!
//! Loads or builds a terrain, places bombs and walls, detonates one bomb and
//! prints the blast either as a bordered preview or as JSON.
//!
//! ```bash
//! cargo run -p blast-demo -- --bomb 6,4 --bomb 4,4 --wall 6,6
//! cargo run -p blast-demo -- --terrain level.txt --at 3,2 --radius 4 --json
//! RUST_LOG=blast_core=debug cargo run -p blast-demo -- --bomb 2,2 --bomb 2,4
//! ```

use blast_core::{detonate_with, BlastConfig, Cell, Position, Terrain};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Bomb blast demo with configurable terrain
#[derive(Parser, Debug)]
#[command(name = "blast-demo")]
#[command(about = "Detonate a bomb on a grid terrain and preview the blast", long_about = None)]
struct Args {
    /// Terrain file: width line, height line, then one row per line
    #[arg(short, long)]
    terrain: Option<PathBuf>,

    /// Width of a blank terrain (ignored with --terrain)
    #[arg(long, default_value_t = 12)]
    width: usize,

    /// Height of a blank terrain (ignored with --terrain)
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Place a bomb at x,y before detonating (repeatable)
    #[arg(short, long = "bomb", value_parser = parse_position)]
    bombs: Vec<Position>,

    /// Place a wall at x,y before detonating (repeatable)
    #[arg(short, long = "wall", value_parser = parse_position)]
    walls: Vec<Position>,

    /// Bomb to detonate, as x,y (defaults to the first bomb on the terrain)
    #[arg(short, long, value_parser = parse_position)]
    at: Option<Position>,

    /// Blast radius in cells (overrides --config)
    #[arg(short, long)]
    radius: Option<u32>,

    /// JSON blast configuration file, e.g. {"radius": 4}
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the changed cells as JSON instead of a preview
    #[arg(long)]
    json: bool,

    /// Apply the blast and print the resulting terrain
    #[arg(long)]
    apply: bool,
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Position::new(x, y))
}

fn load_config(args: &Args) -> Result<BlastConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => BlastConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.radius = radius;
    }
    config.validate()?;
    Ok(config)
}

fn build_terrain(args: &Args) -> Result<Terrain, Box<dyn Error>> {
    let mut terrain = match &args.terrain {
        Some(path) => Terrain::load(path)?,
        None => Terrain::try_new(args.width, args.height)?,
    };
    for &wall in &args.walls {
        terrain.set(wall, Cell::Wall)?;
    }
    for &bomb in &args.bombs {
        terrain.set(bomb, Cell::Bomb)?;
    }
    Ok(terrain)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let mut terrain = build_terrain(args)?;

    let origin = match args.at {
        Some(origin) => origin,
        None => terrain
            .bombs()
            .next()
            .ok_or("terrain has no bombs; place one with --bomb x,y")?,
    };

    info!(%origin, radius = config.radius, "Detonating");
    let update = detonate_with(origin, &terrain, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&update.sorted())?);
    } else if args.apply {
        terrain.apply(&update)?;
        print!("{terrain}");
    } else {
        print!("{}", terrain.render_with(&update));
    }

    if !args.json {
        let bombs_left = if args.apply {
            terrain.bombs().count()
        } else {
            terrain
                .bombs()
                .filter(|&pos| !update.contains(pos))
                .count()
        };
        println!(
            "Detonated {origin}: {} cells changed, {bombs_left} bombs left",
            update.len()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("6,4"), Ok(Position::new(6, 4)));
        assert_eq!(parse_position(" 1 , -2 "), Ok(Position::new(1, -2)));
        assert!(parse_position("6").is_err());
        assert!(parse_position("a,1").is_err());
    }

    #[test]
    fn test_radius_flag_overrides_default() {
        let args = Args::parse_from(["blast-demo", "--radius", "5"]);
        assert_eq!(load_config(&args).unwrap().radius, 5);

        let args = Args::parse_from(["blast-demo", "--radius", "0"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_build_terrain_places_cells() {
        let args = Args::parse_from([
            "blast-demo", "--width", "4", "--height", "3", "--bomb", "1,1", "--wall", "3,1",
        ]);
        let terrain = build_terrain(&args).unwrap();
        assert_eq!(terrain.get(Position::new(1, 1)), Some(Cell::Bomb));
        assert_eq!(terrain.get(Position::new(3, 1)), Some(Cell::Wall));

        let args = Args::parse_from(["blast-demo", "--width", "2", "--bomb", "5,5"]);
        assert!(build_terrain(&args).is_err());
    }

    #[test]
    fn test_sample_level_chains_two_bombs() {
        let level = concat!(env!("CARGO_MANIFEST_DIR"), "/levels/chain.txt");
        let args = Args::parse_from(["blast-demo", "--terrain", level]);
        let terrain = build_terrain(&args).unwrap();
        assert_eq!(terrain.bombs().count(), 4);

        let origin = terrain.bombs().next().unwrap();
        assert_eq!(origin, Position::new(3, 2));
        let update = detonate_with(origin, &terrain, &load_config(&args).unwrap()).unwrap();

        assert!(update.get(Position::new(3, 5)).is_some_and(Cell::is_flame));
        assert_eq!(update.get(Position::new(3, 0)), Some(Cell::Empty));
        assert!(!update.contains(Position::new(7, 2)));
    }
}

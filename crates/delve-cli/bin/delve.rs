//! Command line front end: generate one floor and print it.

use clap::Parser;
use strum::IntoEnumIterator;

use delve_core::{
    dungeon_to_ascii, find_room_path, generate_with_config, room_graph, to_legacy, Difficulty,
    GenConfig, RoomType,
};

/// Deterministic BSP dungeon generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate a dungeon floor", long_about = None)]
struct Args {
    /// RNG seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Floor depth, 1 is the top
    #[arg(short, long, default_value_t = 1)]
    depth: u32,

    /// Difficulty (easy, normal, hard, nightmare)
    #[arg(short = 'D', long, default_value = "normal")]
    difficulty: Difficulty,

    /// Grid width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// Emit the full map as JSON instead of ASCII art
    #[arg(long)]
    json: bool,

    /// Emit the flat legacy layout as JSON
    #[arg(long)]
    legacy: bool,
}

fn main() {
    let args = Args::parse();

    let mut cfg = GenConfig::default();
    if let Some(width) = args.width {
        cfg.width = width;
    }
    if let Some(height) = args.height {
        cfg.height = height;
    }

    let map = generate_with_config(&cfg, args.difficulty, args.depth, args.seed);

    if args.json {
        match serde_json::to_string_pretty(&map) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("serialization failed: {err}"),
        }
        return;
    }
    if args.legacy {
        match serde_json::to_string_pretty(&to_legacy(&map)) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("serialization failed: {err}"),
        }
        return;
    }

    print!("{}", dungeon_to_ascii(&map));
    println!();
    println!(
        "seed {} depth {} difficulty {}: {} rooms, {} corridors",
        map.seed,
        map.depth,
        args.difficulty,
        map.room_count,
        map.corridors.len()
    );
    for ty in RoomType::iter() {
        let count = map.rooms_of_type(ty).count();
        if count > 0 {
            println!("  {ty}: {count}");
        }
    }

    let graph = room_graph(&map);
    if let (Some(entrance), Some(exit)) = (map.entrance_room(), map.exit_room()) {
        match find_room_path(&graph, entrance.id, exit.id) {
            Some(path) => println!("entrance to exit: {} hops", path.len().saturating_sub(1)),
            None => println!("entrance to exit: no path"),
        }
    }
}

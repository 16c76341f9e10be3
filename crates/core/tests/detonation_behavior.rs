use blast_core::{
    detonate, detonate_with, BlastConfig, BlastError, Cell, FlameMask, Position, Terrain,
};
use ctor::ctor;

#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn flame(glyph: char) -> Cell {
    Cell::Flame(FlameMask::from_glyph(glyph).expect("flame glyph"))
}

fn terrain_with(width: usize, height: usize, cells: &[((i32, i32), Cell)]) -> Terrain {
    let mut terrain = Terrain::new(width, height);
    for &(pos, cell) in cells {
        terrain.set(pos.into(), cell).expect("cell on grid");
    }
    terrain
}

#[test]
fn test_detonation_leaves_terrain_untouched() {
    let terrain = terrain_with(
        10,
        10,
        &[
            ((5, 5), Cell::Bomb),
            ((5, 3), Cell::Bomb),
            ((7, 5), Cell::Wall),
            ((2, 5), flame('│')),
        ],
    );
    let before = terrain.clone();

    let update = detonate(Position::new(5, 5), &terrain).unwrap();

    assert!(!update.is_empty());
    assert_eq!(terrain, before);
}

#[test]
fn test_isolated_bomb_stays_within_radius() {
    for radius in 1..=4 {
        let origin = Position::new(6, 6);
        let terrain = terrain_with(13, 13, &[((6, 6), Cell::Bomb)]);
        let update = detonate_with(origin, &terrain, &BlastConfig::with_radius(radius)).unwrap();

        assert_eq!(update.len(), 1 + 4 * radius as usize, "radius {radius}");
        for (pos, cell) in update.iter() {
            let dx = (pos.x - origin.x).unsigned_abs();
            let dy = (pos.y - origin.y).unsigned_abs();
            assert!(dx == 0 || dy == 0, "{pos} is off-axis");
            assert!(dx.max(dy) <= radius, "{pos} is beyond radius {radius}");
            assert!(cell.is_flame());
        }
    }
}

#[test]
fn test_wall_stops_ray_and_is_destroyed() {
    for distance in 1..=3 {
        let origin = Position::new(1, 4);
        let wall = Position::new(1 + distance, 4);
        let terrain = terrain_with(
            10,
            9,
            &[((1, 4), Cell::Bomb), ((wall.x, wall.y), Cell::Wall)],
        );
        let update = detonate(origin, &terrain).unwrap();

        for step in 1..distance {
            assert_eq!(update.get(Position::new(1 + step, 4)), Some(flame('─')));
        }
        assert_eq!(update.get(wall), Some(Cell::Empty));
        for beyond in (distance + 1)..=5 {
            assert!(!update.contains(Position::new(1 + beyond, 4)));
        }
    }
}

#[test]
fn test_wall_shields_bomb_behind_it() {
    let terrain = terrain_with(
        8,
        3,
        &[((1, 1), Cell::Bomb), ((3, 1), Cell::Wall), ((4, 1), Cell::Bomb)],
    );
    let update = detonate(Position::new(1, 1), &terrain).unwrap();

    assert_eq!(update.get(Position::new(3, 1)), Some(Cell::Empty));
    assert!(!update.contains(Position::new(4, 1)));
}

#[test]
fn test_chain_reaction_matches_worked_example() {
    let terrain = terrain_with(12, 10, &[((6, 4), Cell::Bomb), ((4, 4), Cell::Bomb)]);
    let update = detonate(Position::new(6, 4), &terrain).unwrap();

    let expected = [
        ((6, 4), '┼'),
        ((4, 4), '┼'),
        ((6, 3), '│'),
        ((6, 2), '│'),
        ((6, 1), '╷'),
        ((6, 5), '│'),
        ((6, 6), '│'),
        ((6, 7), '╵'),
        ((7, 4), '─'),
        ((8, 4), '─'),
        ((9, 4), '╴'),
        ((5, 4), '─'),
        ((4, 3), '│'),
        ((4, 2), '│'),
        ((4, 1), '╷'),
        ((4, 5), '│'),
        ((4, 6), '│'),
        ((4, 7), '╵'),
        ((3, 4), '─'),
        ((2, 4), '─'),
        ((1, 4), '╶'),
    ];

    assert_eq!(update.len(), expected.len());
    for ((x, y), glyph) in expected {
        assert_eq!(
            update.get(Position::new(x, y)),
            Some(flame(glyph)),
            "at ({x}, {y})"
        );
    }
}

#[test]
fn test_crossing_rays_merge_into_junction() {
    // A sets off B, B sets off C, C's upward ray crosses A's rightward ray.
    let terrain = terrain_with(
        9,
        9,
        &[((2, 2), Cell::Bomb), ((2, 4), Cell::Bomb), ((4, 4), Cell::Bomb)],
    );
    let update = detonate(Position::new(2, 2), &terrain).unwrap();

    assert_eq!(update.get(Position::new(4, 2)), Some(flame('┼')));
    for bomb in [(2, 2), (2, 4), (4, 4)] {
        assert_eq!(update.get(bomb.into()), Some(flame('┼')));
    }
}

#[test]
fn test_mutually_reachable_bombs_detonate_once() {
    let terrain = terrain_with(6, 5, &[((2, 2), Cell::Bomb), ((3, 2), Cell::Bomb)]);
    let update = detonate(Position::new(2, 2), &terrain).unwrap();

    assert_eq!(update.len(), 14);
    assert_eq!(update.get(Position::new(2, 2)), Some(flame('┼')));
    assert_eq!(update.get(Position::new(3, 2)), Some(flame('┼')));
    assert_eq!(update.get(Position::new(0, 2)), Some(flame('─')));
    assert_eq!(update.get(Position::new(5, 2)), Some(flame('─')));
}

#[test]
fn test_long_bomb_row_chains_to_the_end() {
    const LEN: usize = 50_000;
    let mut terrain = Terrain::new(LEN, 1);
    for x in 0..LEN {
        terrain.set(Position::new(x as i32, 0), Cell::Bomb).unwrap();
    }

    let update = detonate(Position::new(0, 0), &terrain).unwrap();

    assert_eq!(update.len(), LEN);
    assert!(update.iter().all(|(_, cell)| cell == flame('┼')));
    assert_eq!(update.get(Position::new(LEN as i32 - 1, 0)), Some(flame('┼')));
}

#[test]
fn test_stale_flame_is_replaced_not_merged() {
    let terrain = terrain_with(7, 3, &[((3, 1), Cell::Bomb), ((4, 1), flame('│'))]);
    let update = detonate(Position::new(3, 1), &terrain).unwrap();

    assert_eq!(update.get(Position::new(4, 1)), Some(flame('─')));
}

#[test]
fn test_host_cycle_apply_then_clear() {
    let mut terrain = terrain_with(
        9,
        9,
        &[((4, 4), Cell::Bomb), ((4, 2), Cell::Bomb), ((6, 4), Cell::Wall)],
    );
    let update = detonate(Position::new(4, 4), &terrain).unwrap();
    terrain.apply(&update).unwrap();

    assert_eq!(terrain.bombs().count(), 0);
    assert_eq!(terrain.get(Position::new(6, 4)), Some(Cell::Empty));
    assert_eq!(terrain.get(Position::new(4, 2)), Some(flame('┼')));

    let cleared = terrain.clear_flames();
    assert_eq!(cleared, update.len() - 1);
    assert!(terrain.iter().all(|(_, cell)| cell == Cell::Empty));

    assert!(matches!(
        detonate(Position::new(4, 4), &terrain),
        Err(BlastError::NotABomb { .. })
    ));
}

#[test]
fn test_render_preview_overlays_update() {
    let terrain: Terrain = "7\n1\n   \u{03CC}   ".parse().unwrap();
    let update = detonate(Position::new(3, 0), &terrain).unwrap();

    assert_eq!(
        terrain.render_with(&update),
        "╔═══════╗\n║╶──┼──╴║\n╚═══════╝\n"
    );
    assert_eq!(terrain.to_string(), "╔═══════╗\n║   \u{03CC}   ║\n╚═══════╝\n");
}

#[test]
fn test_sorted_entries_serialize_to_json() {
    let terrain = terrain_with(3, 1, &[((1, 0), Cell::Bomb)]);
    let update = detonate_with(Position::new(1, 0), &terrain, &BlastConfig::with_radius(1)).unwrap();

    let json = serde_json::to_value(update.sorted()).unwrap();
    let cells: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["position"]["x"].as_i64().unwrap())
        .collect();
    assert_eq!(cells, vec![0, 1, 2]);
    assert_eq!(json[1]["cell"]["flame"], 15);
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: BlastConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, BlastConfig::default());

    let config: BlastConfig = serde_json::from_str(r#"{ "radius": 5 }"#).unwrap();
    assert_eq!(config.radius, 5);
}

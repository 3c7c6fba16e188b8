use sandlot_gen::{LevelGenerator, SeededRandom, TerrainGenerator, TileKind, TileLayer};

const SEEDS: [u64; 6] = [0, 1, 7, 42, 1234, u64::MAX];

#[test]
fn test_dimensions_match_request() {
    let generator = TerrainGenerator::new();
    for (w, h) in [(1, 1), (3, 200), (150, 90), (400, 30)] {
        let mut rng = SeededRandom::new(3);
        let grid = generator.generate(w, h, &mut rng).unwrap();
        assert_eq!(grid.width(), w as usize);
        assert_eq!(grid.height(), h as usize);
        assert_eq!(grid.rows().count(), h as usize);
        assert!(grid.rows().all(|row| row.len() == w as usize));
    }
}

#[test]
fn test_profile_stays_in_bounds() {
    let generator = TerrainGenerator::new();
    for seed in SEEDS {
        let mut rng = SeededRandom::new(seed);
        let level = generator.generate_level(500, 80, &mut rng).unwrap();
        assert_eq!(level.profile.len(), 500);
        assert!(level.profile.iter().all(|h| (6..=18).contains(&h)), "seed {seed}");
    }
}

#[test]
fn test_ground_filled_to_bottom() {
    let generator = TerrainGenerator::new();
    for seed in SEEDS {
        let mut rng = SeededRandom::new(seed);
        let level = generator.generate_level(300, 100, &mut rng).unwrap();
        for (x, surface) in level.profile.iter().enumerate() {
            for y in surface..100 {
                let tile = level.grid.get(x as i32, y).unwrap();
                assert!(
                    matches!(
                        tile,
                        TileKind::Dirt | TileKind::Grass | TileKind::Stone | TileKind::Water
                    ),
                    "seed {seed}: {tile:?} at ({x}, {y})"
                );
            }
        }
    }
}

#[test]
fn test_trees_sit_on_the_surface() {
    let generator = TerrainGenerator::new();
    let mut rng = SeededRandom::new(99);
    let level = generator.generate_level(400, 60, &mut rng).unwrap();

    let mut trees = 0;
    for (x, surface) in level.profile.iter().enumerate() {
        for y in 0..60 {
            let tile = level.grid.get(x as i32, y).unwrap();
            let expected_row = match tile {
                TileKind::TreeShort | TileKind::TreeTallBase => surface - 1,
                TileKind::TreeTallMid => surface - 2,
                TileKind::TreeTallTop => surface - 3,
                _ => continue,
            };
            assert_eq!(y, expected_row, "{tile:?} at column {x}");
            trees += 1;
        }
        // Nothing floats above a tree.
        for y in 0..(surface - 3).max(0) {
            assert_eq!(level.grid.get(x as i32, y), Some(TileKind::Empty));
        }
    }
    // 400 columns at roughly 36% tree odds
    assert!(trees > 50);
}

#[test]
fn test_same_seed_same_level() {
    let generator = TerrainGenerator::new();
    for seed in SEEDS {
        let a = generator.generate(250, 120, &mut SeededRandom::new(seed)).unwrap();
        let b = generator.generate(250, 120, &mut SeededRandom::new(seed)).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            TileLayer::from_grid("World", &a).data,
            TileLayer::from_grid("World", &b).data
        );
    }
}

#[test]
fn test_different_seeds_differ() {
    let generator = TerrainGenerator::new();
    let a = generator.generate(250, 120, &mut SeededRandom::new(1)).unwrap();
    let b = generator.generate(250, 120, &mut SeededRandom::new(2)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_works_with_any_rand_rng() {
    use rand::SeedableRng;
    let mut rng = rand::rngs::StdRng::seed_from_u64(8);
    let grid = TerrainGenerator::new().generate(60, 90, &mut rng).unwrap();
    assert!(grid.count(TileKind::Grass) > 0);
    assert!(grid.count(TileKind::Stone) > 0);
}

#[test]
fn test_deep_lakes_appear_on_tall_levels() {
    let generator = TerrainGenerator::new();
    let mut rng = SeededRandom::new(5);
    let level = generator.generate_level(300, 100, &mut rng).unwrap();
    let deep_water = (0..300)
        .filter(|&x| {
            let surface = level.profile.get(x).unwrap();
            (surface + 50..surface + 56).any(|y| level.grid.get(x, y) == Some(TileKind::Water))
        })
        .count();
    // five lakes of at least 15 columns, possibly overlapping
    assert!(deep_water >= 15);
}

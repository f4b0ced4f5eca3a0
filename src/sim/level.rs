//! Procedural level generation
//!
//! Deterministic shell (walls + floor), randomized fill (ledges, spikers,
//! goal). All randomness comes from the caller's RNG so a seeded generator
//! reproduces a level exactly.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::Boundaries;
use crate::tuning::Tuning;

/// What a tile is part of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Wall,
    Floor,
    Ledge,
}

/// A static square tile (center position)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub kind: PlatformKind,
}

/// A generated mid-air platform as a whole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ledge {
    /// Center x of the first tile
    pub start_x: f32,
    pub y: f32,
    pub len_tiles: u32,
}

/// Where and how fast a hazard starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikerSpawn {
    pub pos: Vec2,
    pub speed: f32,
}

/// Level-completion trigger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
}

/// Everything a scene needs to populate itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub bounds: Boundaries,
    pub tile_size: f32,
    pub level_height: f32,
    pub platforms: Vec<Platform>,
    /// Bottom-up
    pub ledges: Vec<Ledge>,
    pub spikers: Vec<SpikerSpawn>,
    pub goal: Option<Goal>,
}

impl Level {
    pub fn tiles(&self, kind: PlatformKind) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(move |p| p.kind == kind)
    }

    pub fn topmost_ledge(&self) -> Option<&Ledge> {
        self.ledges.last()
    }

    /// Largest vertical distance between consecutive standing surfaces,
    /// starting from the floor
    pub fn max_vertical_gap(&self) -> f32 {
        let mut prev = self.bounds.ymax;
        let mut worst = 0.0f32;
        for ledge in &self.ledges {
            worst = worst.max(prev - ledge.y);
            prev = ledge.y;
        }
        worst
    }
}

/// Walls on both sides for the full height plus the floor row at `ymax`
pub fn build_shell(bounds: &Boundaries, tile: f32, level_height: f32) -> Vec<Platform> {
    let left = bounds.xmin - tile;
    let right = bounds.xmax + tile;
    let mut platforms = Vec::new();

    let rows = ((level_height + tile) / tile).ceil().max(0.0) as usize;
    for i in 0..rows {
        let y = bounds.ymin + i as f32 * tile;
        platforms.push(Platform {
            pos: Vec2::new(left, y),
            kind: PlatformKind::Wall,
        });
        platforms.push(Platform {
            pos: Vec2::new(right, y),
            kind: PlatformKind::Wall,
        });
    }

    // Last tile is pinned to the right edge so the row spans exactly
    let cols = ((right - left) / tile).ceil() as usize;
    for i in 0..=cols {
        let x = (left + i as f32 * tile).min(right);
        platforms.push(Platform {
            pos: Vec2::new(x, bounds.ymax),
            kind: PlatformKind::Floor,
        });
    }

    platforms
}

/// The closing room: shell only, nothing to climb
pub fn generate_victory_level(bounds: &Boundaries, tile: f32, level_height: f32) -> Level {
    Level {
        bounds: *bounds,
        tile_size: tile,
        level_height,
        platforms: build_shell(bounds, tile, level_height),
        ledges: Vec::new(),
        spikers: Vec::new(),
        goal: None,
    }
}

/// Build a full play level
pub fn generate_level<R: Rng + ?Sized>(
    bounds: &Boundaries,
    level_height: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Level {
    let tile = tuning.level.tile_size;
    let mut level = generate_victory_level(bounds, tile, level_height);

    place_ledges(&mut level, tuning, rng);
    level.spikers = place_spikers(bounds, level_height, tuning, rng);

    log::info!(
        "Generated level: {} tiles, {} ledges, {} spikers, max gap {:.0}",
        level.platforms.len(),
        level.ledges.len(),
        level.spikers.len(),
        level.max_vertical_gap()
    );
    level
}

/// Ceiling for vertical gap draws
fn gap_ceiling(tuning: &Tuning) -> f32 {
    let level = &tuning.level;
    if !level.clamp_gaps_to_reach {
        return level.max_gap;
    }
    let reach = tuning.player.max_jump_height();
    if level.max_gap <= reach {
        return level.max_gap;
    }
    log::warn!(
        "max_gap {:.0} exceeds jump reach {:.0}; clamping",
        level.max_gap,
        reach
    );
    reach.max(level.min_gap)
}

fn ledge_count(level_height: f32, avg_gap: f32) -> usize {
    let ratio = level_height / avg_gap;
    if ratio <= 1.0 {
        return 0;
    }
    // Room for more than one gap always gets at least one ledge
    ((ratio.floor() as usize).saturating_sub(1)).max(1)
}

fn place_ledges<R: Rng + ?Sized>(level: &mut Level, tuning: &Tuning, rng: &mut R) {
    let lt = &tuning.level;
    let tile = lt.tile_size;
    let left = level.bounds.xmin - tile;
    let right = level.bounds.xmax + tile;
    let mid = (left + right) / 2.0;
    let max_gap = gap_ceiling(tuning);
    // Highest a ledge may sit with its goal still inside the shaft
    let top = level.bounds.ymin + tile;

    let count = ledge_count(level.level_height, lt.avg_gap());
    let mut curr_y = level.bounds.ymax;

    for index in 0..count {
        let room = curr_y - top;
        if room < lt.min_gap {
            log::debug!("shaft full after {index} of {count} ledges");
            break;
        }
        curr_y -= rng.random_range(lt.min_gap..=max_gap.min(room));
        let len_tiles = rng.random_range(lt.min_platform_len..=lt.max_platform_len);
        let width = len_tiles as f32 * tile;

        // Even ledges favour the right half, odd ones the left
        let (a, b) = if index % 2 == 0 {
            (mid, right - width)
        } else {
            (left, mid)
        };
        let start_x = rng.random_range(a.min(b)..=a.max(b));

        for t in 0..len_tiles {
            level.platforms.push(Platform {
                pos: Vec2::new(start_x + t as f32 * tile, curr_y),
                kind: PlatformKind::Ledge,
            });
        }
        level.ledges.push(Ledge {
            start_x,
            y: curr_y,
            len_tiles,
        });
    }

    level.goal = level.ledges.last().map(|ledge| Goal {
        pos: Vec2::new(
            ledge.start_x + ledge.len_tiles as f32 * tile / 2.0,
            ledge.y - tile,
        ),
    });
}

fn place_spikers<R: Rng + ?Sized>(
    bounds: &Boundaries,
    level_height: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<SpikerSpawn> {
    let lt = &tuning.level;
    let band_top = level_height * lt.spiker_band_top;
    let band_bottom = level_height * lt.spiker_band_bottom;
    let min_spacing = band_bottom / lt.spiker_min_spacing_divisor;
    let max_spacing = band_bottom / lt.spiker_max_spacing_divisor;

    let mut spikers = Vec::new();
    if min_spacing <= 0.0 {
        return spikers;
    }

    let mut curr_y = band_bottom + rng.random_range(0.0..=(max_spacing - min_spacing).max(0.0));
    while curr_y > band_top {
        spikers.push(SpikerSpawn {
            pos: Vec2::new(bounds.spawn_x(), bounds.ymin + curr_y),
            speed: rng.random_range(lt.spiker_min_speed..=lt.spiker_max_speed),
        });
        curr_y -= rng.random_range(min_spacing..=max_spacing);
    }
    spikers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn play_bounds() -> Boundaries {
        Boundaries::for_scene(1200.0, 6000.0, 64.0).unwrap()
    }

    fn generate(seed: u64) -> Level {
        let mut rng = Pcg32::seed_from_u64(seed);
        generate_level(&play_bounds(), 6000.0, &Tuning::default(), &mut rng)
    }

    #[test]
    fn test_shell_walls_and_floor() {
        let level = generate(1);
        let floor: Vec<_> = level.tiles(PlatformKind::Floor).collect();
        let first = floor.first().unwrap().pos;
        let last = floor.last().unwrap().pos;
        assert_eq!(first, Vec2::new(0.0, 6000.0));
        assert_eq!(last, Vec2::new(1200.0, 6000.0));

        let walls: Vec<_> = level.tiles(PlatformKind::Wall).collect();
        assert!(walls.iter().all(|w| w.pos.x == 0.0 || w.pos.x == 1200.0));
        let lowest = walls.iter().map(|w| w.pos.y).fold(f32::MIN, f32::max);
        let highest = walls.iter().map(|w| w.pos.y).fold(f32::MAX, f32::min);
        assert_eq!(highest, 0.0);
        assert!(lowest >= 6000.0);
        // 95 rows on each side
        assert_eq!(walls.len(), 190);
    }

    #[test]
    fn test_ledge_count_and_goal() {
        let level = generate(7);
        // At most floor(6000 / 425) - 1, fewer if the shaft fills up
        assert!((1..=13).contains(&level.ledges.len()));
        let top = level.topmost_ledge().unwrap();
        let goal = level.goal.unwrap();
        assert!(goal.pos.y < top.y);
        assert_eq!(goal.pos.y, top.y - 64.0);
        assert_eq!(goal.pos.x, top.start_x + top.len_tiles as f32 * 32.0);
    }

    #[test]
    fn test_ledges_climb_with_bounded_gaps() {
        let level = generate(42);
        let mut prev = 6000.0;
        for ledge in &level.ledges {
            let gap = prev - ledge.y;
            assert!((299.99..=550.01).contains(&gap), "gap {gap}");
            assert!((2..=12).contains(&ledge.len_tiles));
            prev = ledge.y;
        }
        assert!(level.max_vertical_gap() <= 550.01);
        let ledge_tiles: u32 = level.ledges.iter().map(|l| l.len_tiles).sum();
        assert_eq!(level.tiles(PlatformKind::Ledge).count(), ledge_tiles as usize);
    }

    #[test]
    fn test_ledges_alternate_halves() {
        let level = generate(3);
        for (i, ledge) in level.ledges.iter().enumerate() {
            if i % 2 == 1 {
                assert!(ledge.start_x <= 600.0);
            } else {
                let width = ledge.len_tiles as f32 * 64.0;
                assert!(ledge.start_x >= (1200.0 - width).min(600.0));
            }
        }
    }

    #[test]
    fn test_spikers_in_band() {
        let level = generate(9);
        assert!(!level.spikers.is_empty());
        for s in &level.spikers {
            assert!(s.pos.y > 900.0, "y {}", s.pos.y);
            assert!(s.pos.y <= 4500.0 + 750.0 - 450.0 + 1e-3);
            assert!((0.05..=0.55).contains(&s.speed));
            assert_eq!(s.pos.x, 568.0);
        }
        // Spawned bottom-up
        assert!(level.spikers.windows(2).all(|w| w[1].pos.y < w[0].pos.y));
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = generate(1234);
        let b = generate(1234);
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.spikers, b.spikers);
        assert_eq!(a.goal, b.goal);

        let c = generate(4321);
        assert_ne!(a.ledges, c.ledges);
    }

    #[test]
    fn test_short_level_still_gets_a_ledge() {
        let bounds = Boundaries::for_scene(1200.0, 600.0, 64.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        let level = generate_level(&bounds, 600.0, &Tuning::default(), &mut rng);
        assert_eq!(level.ledges.len(), 1);
        assert!(level.goal.is_some());
    }

    #[test]
    fn test_gap_ceiling_clamped_to_reach() {
        let mut tuning = Tuning::default();
        tuning.level.max_gap = 900.0;
        assert!((gap_ceiling(&tuning) - 562.5).abs() < 0.01);

        tuning.level.clamp_gaps_to_reach = false;
        assert_eq!(gap_ceiling(&tuning), 900.0);
    }

    #[test]
    fn test_ledges_stop_at_the_top_of_the_shaft() {
        // 13 ledges at 300 px or more cannot fit under a 3000 px ceiling
        let bounds = Boundaries::for_scene(1200.0, 3000.0, 64.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(11);
        let level = generate_level(&bounds, 6000.0, &Tuning::default(), &mut rng);

        assert!(level.ledges.len() < 13);
        assert!(level.ledges.iter().all(|l| l.y - 64.0 >= bounds.ymin));
        let goal = level.goal.unwrap();
        assert!(goal.pos.y >= bounds.ymin);
        assert_eq!(goal.pos.y, level.topmost_ledge().unwrap().y - 64.0);
    }

    #[test]
    fn test_victory_room_is_bare() {
        let bounds = Boundaries::for_scene(1200.0, 700.0, 64.0).unwrap();
        let level = generate_victory_level(&bounds, 64.0, 700.0);
        assert!(level.ledges.is_empty());
        assert!(level.spikers.is_empty());
        assert!(level.goal.is_none());
        assert!(level.tiles(PlatformKind::Floor).count() > 0);
    }
}

//! Distance-based zones: spawn danger and the closing death fog.

use rand::Rng;

use crate::config::MapConfig;
use crate::state::Position;

/// Normalised distance of `position` from the nearest map edge.
///
/// `0.0` on the outermost playable ring, approaching `1.0` at the centre.
pub fn danger(map: &MapConfig, position: Position) -> f32 {
    let edge = |value: i32| (value - map.border).min(map.center + map.border - value - 1);
    let dist = edge(position.row).min(edge(position.col));
    2.0 * dist as f32 / map.center as f32
}

/// Random position on the ring whose [`danger`] equals `danger_level`.
///
/// One side of the ring is chosen uniformly, then an offset along it.
pub fn spawn_position<R: Rng + ?Sized>(map: &MapConfig, danger_level: f32, rng: &mut R) -> Position {
    let mid = map.center / 2;
    let dist = (danger_level.clamp(0.0, 1.0) * map.center as f32 / 2.0) as i32;
    let dist = dist.min(mid.saturating_sub(1).max(0));

    let max_offset = mid - dist;
    let offset = if max_offset > 0 {
        mid + map.border + rng.random_range(-max_offset..max_offset)
    } else {
        mid + map.border
    };

    let near = map.border + dist;
    let far = map.border + map.center - dist - 1;
    match rng.random_range(0..4) {
        0 => Position::new(near, offset),
        1 => Position::new(far, offset),
        2 => Position::new(offset, near),
        _ => Position::new(offset, far),
    }
}

/// Death fog damage for a player standing at `position` on `tick`.
///
/// Zero before `fog_start`, and zero inside the final safe square around the
/// map midpoint. Outside it, damage grows with distance and with the time
/// elapsed since the fog started.
pub fn fog_damage(
    map: &MapConfig,
    position: Position,
    tick: u64,
    fog_start: u64,
    speed: f32,
    final_size: u32,
) -> u32 {
    if tick < fog_start {
        return 0;
    }

    let mid = map.midpoint();
    let dist = position.distance(Position::new(mid, mid));
    if dist <= final_size {
        return 0;
    }

    let time_damage = speed * (tick - fog_start + 1) as f32;
    let dist_damage = dist as f32 - (map.center / 2) as f32;
    let damage = (dist_damage + time_damage).round();
    if damage <= 0.0 { 0 } else { damage as u32 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn map() -> MapConfig {
        MapConfig {
            border: 10,
            center: 40,
        }
    }

    #[test]
    fn danger_is_zero_on_the_edge() {
        let map = map();
        assert_eq!(danger(&map, Position::new(10, 25)), 0.0);
        assert_eq!(danger(&map, Position::new(49, 25)), 0.0);
        assert_eq!(danger(&map, Position::new(20, 25)), 0.5);
    }

    #[test]
    fn spawn_lands_on_requested_ring() {
        let map = map();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for level in [0.0, 0.25, 0.5] {
            for _ in 0..32 {
                let position = spawn_position(&map, level, &mut rng);
                assert!(map.contains(position), "{position} outside map");
                assert_eq!(danger(&map, position), level);
            }
        }
    }

    #[test]
    fn fog_spares_the_centre_and_waits_for_start() {
        let map = map();
        let edge = Position::new(10, 30);
        assert_eq!(fog_damage(&map, edge, 4, 5, 1.0, 4), 0);
        // dist 20 from midpoint 30: (20 - 20) + 1.0 * 1
        assert_eq!(fog_damage(&map, edge, 5, 5, 1.0, 4), 1);
        assert_eq!(fog_damage(&map, edge, 14, 5, 1.0, 4), 10);
        assert_eq!(fog_damage(&map, Position::new(32, 31), 100, 5, 1.0, 4), 0);
    }
}

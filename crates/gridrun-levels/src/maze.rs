//! Seeded procedural maze levels.

use crate::level::Level;
use crate::spec::EntitySpec;
use gridrun_core::{LevelError, MoveRule, ObjectiveRule, Pos};
use indexmap::IndexSet;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Carve a perfect maze over the odd-indexed room lattice.
///
/// Iterative backtracker: rooms sit at even coordinates, walls between
/// them are knocked out as the carver advances. Returns the set of
/// open (walkable) cells.
fn carve(width: u32, height: u32, rng: &mut ChaCha8Rng) -> IndexSet<Pos> {
    let rooms_w = (width as i32 + 1) / 2;
    let rooms_h = (height as i32 + 1) / 2;
    let room = |cx: i32, cy: i32| Pos::new(cx * 2, cy * 2);

    let mut open: IndexSet<Pos> = IndexSet::new();
    let mut visited: IndexSet<(i32, i32)> = IndexSet::new();
    let mut stack = vec![(0, 0)];
    visited.insert((0, 0));
    open.insert(room(0, 0));

    while let Some(&(cx, cy)) = stack.last() {
        let mut neighbors = [(cx + 1, cy), (cx - 1, cy), (cx, cy + 1), (cx, cy - 1)];
        neighbors.shuffle(rng);
        let next = neighbors.iter().copied().find(|&(nx, ny)| {
            nx >= 0 && ny >= 0 && nx < rooms_w && ny < rooms_h && !visited.contains(&(nx, ny))
        });
        match next {
            Some((nx, ny)) => {
                visited.insert((nx, ny));
                open.insert(room(nx, ny));
                // Knock out the wall between the two rooms.
                open.insert(Pos::new(cx * 2 + (nx - cx), cy * 2 + (ny - cy)));
                stack.push((nx, ny));
            }
            None => {
                stack.pop();
            }
        }
    }
    open
}

/// Generate a seeded maze level.
///
/// The agent starts in the top-left room, a single exit sits in the
/// bottom-right room, and a handful of coins are scattered over open
/// cells. The same `(width, height, seed)` triple always produces the
/// same level. Even dimensions work; the trailing row / column simply
/// stays walled.
pub fn generate_maze(width: u32, height: u32, seed: u64) -> Result<Level, LevelError> {
    if width == 0 || height == 0 {
        return Err(LevelError::EmptyGrid { width, height });
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let open = carve(width, height, &mut rng);

    let mut level = Level::new(width, height, MoveRule::Default, ObjectiveRule::Exit)
        .with_seed(seed);

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pos = Pos::new(x, y);
            if !open.contains(&pos) {
                level.add(pos, EntitySpec::wall())?;
            }
        }
    }

    let start = Pos::new(0, 0);
    let goal = Pos::new((width as i32 - 1) / 2 * 2, (height as i32 - 1) / 2 * 2);
    level.add(start, EntitySpec::agent(5))?;
    level.add(goal, EntitySpec::exit())?;

    // Sprinkle coins on open cells away from start and goal.
    let mut candidates: Vec<Pos> = open
        .iter()
        .copied()
        .filter(|p| *p != start && *p != goal)
        .collect();
    candidates.sort_unstable();
    let coins = (candidates.len() / 8).min(5);
    for _ in 0..coins {
        if candidates.is_empty() {
            break;
        }
        let idx = rng.random_range(0..candidates.len());
        let pos = candidates.swap_remove(idx);
        level.add(pos, EntitySpec::coin(1))?;
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridrun_core::Direction;
    use indexmap::IndexSet;

    fn open_cells(level: &Level) -> IndexSet<Pos> {
        let mut open = IndexSet::new();
        for y in 0..level.height as i32 {
            for x in 0..level.width as i32 {
                let pos = Pos::new(x, y);
                if !level.specs_at(pos).iter().any(|s| s.blocking) {
                    open.insert(pos);
                }
            }
        }
        open
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate_maze(9, 9, 1234).unwrap();
        let b = generate_maze(9, 9, 1234).unwrap();
        assert_eq!(open_cells(&a), open_cells(&b));
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = generate_maze(9, 9, 1).unwrap();
        let b = generate_maze(9, 9, 2).unwrap();
        assert_ne!(open_cells(&a), open_cells(&b));
    }

    #[test]
    fn start_and_goal_are_connected() {
        let level = generate_maze(11, 9, 77).unwrap();
        let open = open_cells(&level);
        let start = Pos::new(0, 0);
        let goal = Pos::new(10, 8);
        assert!(open.contains(&start));
        assert!(open.contains(&goal));

        // Flood fill over open cells.
        let mut seen = IndexSet::new();
        let mut queue = vec![start];
        seen.insert(start);
        while let Some(pos) = queue.pop() {
            for dir in Direction::ALL {
                let next = pos.step(dir);
                if open.contains(&next) && seen.insert(next) {
                    queue.push(next);
                }
            }
        }
        assert!(seen.contains(&goal));
    }

    #[test]
    fn maze_converts_to_a_valid_state() {
        let level = generate_maze(9, 9, 5).unwrap();
        let state = level.to_state().unwrap();
        assert!(state.first_agent().is_some());
        assert!(!state.exit.is_empty());
        assert_eq!(state.seed, Some(5));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(generate_maze(0, 9, 5).is_err());
    }
}

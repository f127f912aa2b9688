//! Random level synthesis filtered through the solver.

use serde::{Deserialize, Serialize};

use crate::core::level::MIN_SIDE;
use crate::core::{AgentPair, Cell, Level, LevelRng, Pos};
use crate::difficulty::MoveLimits;
use crate::solver::Solver;

use super::config::GeneratorConfig;

/// A generated level and how it was obtained.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLevel {
    pub level: Level,
    /// Present when calibration was requested.
    pub move_limits: Option<MoveLimits>,
    /// Attempts consumed, including the accepted one.
    pub attempts: u32,
    /// True when the retry budget ran out.
    pub fallback: bool,
}

const FALLBACK_ROWS: [&str; 5] = ["#####", "#   #", "# . #", "#   #", "#####"];

/// Small hand-built level that is solvable in one move (agent 2 steps down).
#[must_use]
pub fn fallback_level(label: &str) -> Level {
    Level::parse(
        format!("{label} (fallback)"),
        &FALLBACK_ROWS,
        Pos::new(1, 1),
        Pos::new(2, 1),
    )
    .expect("hand-built fallback level is valid")
}

/// Generate a level, drawing all randomness from `rng`.
///
/// Never returns an unplayable level: when every attempt fails, the
/// fallback level is returned instead.
pub fn generate(config: &GeneratorConfig, rng: &mut LevelRng) -> GeneratedLevel {
    let mut solver = Solver::new(config.solver.clone());

    for attempt in 0..config.retry_budget {
        let mut attempt_rng = rng.fork();
        let name = format!("{} #{}", config.label, config.attempt.saturating_add(attempt));

        let level = match build_candidate(config, &mut attempt_rng, name) {
            Some(level) => level,
            None => {
                log::debug!("generator attempt {} abandoned: placement failed", attempt + 1);
                continue;
            }
        };

        let check = solver.is_solvable(&level);
        if check.solvable {
            log::debug!(
                "generator accepted {:?} after {} attempts (min {} moves)",
                level.name(),
                attempt + 1,
                check.min_steps.unwrap_or_default()
            );
            return finish(config, &mut solver, level, attempt + 1, false);
        }
        log::debug!("generator attempt {} rejected: not solvable", attempt + 1);
    }

    log::warn!(
        "no solvable {}x{} level after {} attempts, using fallback",
        config.width,
        config.height,
        config.retry_budget
    );
    finish(config, &mut solver, fallback_level(&config.label), config.retry_budget, true)
}

/// Generate with a fresh RNG seeded from `seed`.
pub fn generate_seeded(config: &GeneratorConfig, seed: u64) -> GeneratedLevel {
    generate(config, &mut LevelRng::new(seed))
}

/// Generate with an entropy-seeded RNG. Output differs between calls.
pub fn generate_random(config: &GeneratorConfig) -> GeneratedLevel {
    let mut rng = LevelRng::from_entropy();
    log::debug!("random generation seed {}", rng.seed());
    generate(config, &mut rng)
}

fn finish(
    config: &GeneratorConfig,
    solver: &mut Solver,
    level: Level,
    attempts: u32,
    fallback: bool,
) -> GeneratedLevel {
    let move_limits = config
        .calibrate
        .then(|| solver.solve(&level, config.solver.max_solutions).move_limits);

    GeneratedLevel {
        level,
        move_limits,
        attempts,
        fallback,
    }
}

/// Assemble one candidate. `None` when a placement step finds no free cell.
fn build_candidate(config: &GeneratorConfig, rng: &mut LevelRng, name: String) -> Option<Level> {
    let (width, height) = (config.width, config.height);
    if width < MIN_SIDE || height < MIN_SIDE {
        return None;
    }

    let mut grid = Grid::bordered(width, height);
    grid.scatter_walls(config.wall_density, rng);

    for _ in 0..config.goal_count {
        let pos = grid.pick_free(&[], rng)?;
        grid.set(pos, Cell::Goal { owner: None });
    }

    let first = grid.pick_free(&[], rng)?;
    let second = grid.pick_free(&[first], rng)?;

    Level::from_cells(name, width, height, grid.cells, AgentPair::new(first, second)).ok()
}

/// Mutable cell buffer used while assembling a candidate.
struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    fn bordered(width: u16, height: u16) -> Self {
        let cells = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        Cell::Wall
                    } else {
                        Cell::Open
                    }
                })
            })
            .collect();
        Self { width, height, cells }
    }

    fn index(&self, pos: Pos) -> usize {
        usize::from(pos.y) * usize::from(self.width) + usize::from(pos.x)
    }

    fn set(&mut self, pos: Pos, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    fn interior(&self) -> impl Iterator<Item = Pos> {
        let (width, height) = (self.width, self.height);
        (1..height - 1).flat_map(move |y| (1..width - 1).map(move |x| Pos::new(x, y)))
    }

    fn scatter_walls(&mut self, density: f64, rng: &mut LevelRng) {
        let interior: Vec<Pos> = self.interior().collect();
        for pos in interior {
            if rng.gen_bool(density) {
                self.set(pos, Cell::Wall);
            }
        }
    }

    /// Uniformly pick an open interior cell not in `taken`.
    fn pick_free(&self, taken: &[Pos], rng: &mut LevelRng) -> Option<Pos> {
        let free: Vec<Pos> = self
            .interior()
            .filter(|&pos| self.cells[self.index(pos)] == Cell::Open && !taken.contains(&pos))
            .collect();
        rng.choose(&free).copied()
    }
}

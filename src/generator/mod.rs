//! Procedural level generator.
//!
//! Each attempt builds a walled grid, scatters interior walls, places goals
//! and then both starts on distinct free cells. Candidates go through the
//! solver's plain solvability check; the first solvable one is returned.
//! An exhausted retry budget yields a fixed, known-solvable fallback.
//!
//! All randomness comes from a caller-supplied `LevelRng`, so a seed fully
//! determines the output.
//!
//! ```
//! use axis_pals::generator::{generate_seeded, GeneratorConfig};
//! use axis_pals::solver::is_solvable;
//!
//! let config = GeneratorConfig::default().with_size(8, 6).with_goal_count(1);
//! let generated = generate_seeded(&config, 2024);
//!
//! assert!(is_solvable(&generated.level).solvable);
//! assert_eq!(generated, generate_seeded(&config, 2024));
//! ```

pub mod config;
pub mod generate;

pub use config::GeneratorConfig;
pub use generate::{fallback_level, generate, generate_random, generate_seeded, GeneratedLevel};

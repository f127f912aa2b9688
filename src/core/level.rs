//! Level definitions: the immutable grid, goals and start positions.
//!
//! ## Symbol format
//!
//! Levels are authored as row-major strings:
//!
//! | Symbol | Cell                          |
//! |--------|-------------------------------|
//! | `#`    | wall                          |
//! | ` `    | open floor                    |
//! | `.`    | goal, covered by either agent |
//! | `1`    | goal owned by agent 1         |
//! | `2`    | goal owned by agent 2         |
//!
//! Every level is validated on construction: the border must be walls, both
//! starts must sit on non-wall cells, and at least one goal must exist. A
//! `Level` value therefore always satisfies those invariants.
//!
//! ```
//! use axis_pals::core::{Level, Pos};
//!
//! let level = Level::parse(
//!     "tiny",
//!     &["#####", "#   #", "# . #", "#   #", "#####"],
//!     Pos::new(1, 1),
//!     Pos::new(3, 3),
//! )
//! .unwrap();
//!
//! assert_eq!(level.goals().len(), 1);
//! assert!(level.is_wall(Pos::new(0, 0)));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::agent::{AgentId, AgentPair};
use super::state::{JointState, Pos};

pub const WALL: char = '#';
pub const OPEN: char = ' ';
pub const GOAL: char = '.';
pub const GOAL_FIRST: char = '1';
pub const GOAL_SECOND: char = '2';

/// Smallest side length that can hold a walled border and one open cell.
pub const MIN_SIDE: u16 = 3;

/// Classification of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Open,
    Wall,
    /// Goal cell. `owner` restricts which agent may cover it.
    Goal { owner: Option<AgentId> },
}

impl Cell {
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            WALL => Some(Cell::Wall),
            OPEN => Some(Cell::Open),
            GOAL => Some(Cell::Goal { owner: None }),
            GOAL_FIRST => Some(Cell::Goal { owner: Some(AgentId::First) }),
            GOAL_SECOND => Some(Cell::Goal { owner: Some(AgentId::Second) }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Cell::Open => OPEN,
            Cell::Wall => WALL,
            Cell::Goal { owner: None } => GOAL,
            Cell::Goal { owner: Some(AgentId::First) } => GOAL_FIRST,
            Cell::Goal { owner: Some(AgentId::Second) } => GOAL_SECOND,
        }
    }

    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }
}

/// A goal cell and its optional owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Pos,
    pub owner: Option<AgentId>,
}

impl Goal {
    /// Whether `state` satisfies this goal.
    #[must_use]
    pub fn is_covered(&self, state: &JointState) -> bool {
        match self.owner {
            Some(agent) => state.position(agent) == self.pos,
            None => state.occupies(self.pos),
        }
    }
}

/// Reasons a level definition is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("grid must be at least 3x3, got {width}x{height}")]
    TooSmall { width: u16, height: u16 },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: u16, found: usize },

    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth { row: usize, expected: u16, found: usize },

    #[error("unknown symbol {symbol:?} at {pos}")]
    UnknownSymbol { symbol: char, pos: Pos },

    #[error("border cell {0} is not a wall")]
    OpenBorder(Pos),

    #[error("{agent} starts outside the grid at {pos}")]
    StartOutOfBounds { agent: AgentId, pos: Pos },

    #[error("{agent} starts on a wall at {pos}")]
    StartOnWall { agent: AgentId, pos: Pos },

    #[error("level has no goal cells")]
    NoGoals,
}

/// Serialized level format, shared with level files and the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    #[serde(default)]
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub map: Vec<String>,
    #[serde(alias = "player1")]
    pub agent1: Pos,
    #[serde(alias = "player2")]
    pub agent2: Pos,
}

/// An immutable, validated level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelSpec", into = "LevelSpec")]
pub struct Level {
    name: String,
    width: u16,
    height: u16,
    /// Row-major cells, `width * height` long.
    cells: Vec<Cell>,
    /// Goals in row-major order.
    goals: Vec<Goal>,
    starts: AgentPair<Pos>,
}

impl Level {
    /// Parse a level from symbol rows.
    pub fn parse<S: AsRef<str>>(
        name: impl Into<String>,
        rows: &[S],
        first: Pos,
        second: Pos,
    ) -> Result<Self, LevelError> {
        let height = u16::try_from(rows.len()).unwrap_or(u16::MAX);
        let width = rows
            .first()
            .map(|row| u16::try_from(row.as_ref().chars().count()).unwrap_or(u16::MAX))
            .unwrap_or(0);
        Self::from_rows(name.into(), width, height, rows, AgentPair::new(first, second))
    }

    /// Build a level from its serialized form.
    pub fn from_spec(spec: LevelSpec) -> Result<Self, LevelError> {
        Self::from_rows(
            spec.name,
            spec.width,
            spec.height,
            &spec.map,
            AgentPair::new(spec.agent1, spec.agent2),
        )
    }

    /// Build a level from already-classified cells.
    pub fn from_cells(
        name: impl Into<String>,
        width: u16,
        height: u16,
        cells: Vec<Cell>,
        starts: AgentPair<Pos>,
    ) -> Result<Self, LevelError> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(LevelError::TooSmall { width, height });
        }
        let expected = usize::from(width) * usize::from(height);
        if cells.len() != expected {
            return Err(LevelError::CellCount {
                expected,
                found: cells.len(),
            });
        }

        let mut level = Self {
            name: name.into(),
            width,
            height,
            cells,
            goals: Vec::new(),
            starts,
        };
        level.validate()?;
        level.goals = level.collect_goals();
        if level.goals.is_empty() {
            return Err(LevelError::NoGoals);
        }
        Ok(level)
    }

    fn from_rows<S: AsRef<str>>(
        name: String,
        width: u16,
        height: u16,
        rows: &[S],
        starts: AgentPair<Pos>,
    ) -> Result<Self, LevelError> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(LevelError::TooSmall { width, height });
        }
        if rows.len() != usize::from(height) {
            return Err(LevelError::RowCount {
                expected: height,
                found: rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != usize::from(width) {
                return Err(LevelError::RowWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or(LevelError::UnknownSymbol {
                    symbol,
                    pos: Pos::new(x as u16, y as u16),
                })?;
                cells.push(cell);
            }
        }

        Self::from_cells(name, width, height, cells, starts)
    }

    fn validate(&self) -> Result<(), LevelError> {
        for y in 0..self.height {
            for x in 0..self.width {
                let on_border = x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1;
                let pos = Pos::new(x, y);
                if on_border && !self.is_wall(pos) {
                    return Err(LevelError::OpenBorder(pos));
                }
            }
        }

        for (agent, &pos) in self.starts.iter() {
            match self.cell(pos) {
                None => return Err(LevelError::StartOutOfBounds { agent, pos }),
                Some(Cell::Wall) => return Err(LevelError::StartOnWall { agent, pos }),
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn collect_goals(&self) -> Vec<Goal> {
        self.positions()
            .filter_map(|pos| match self.cell(pos) {
                Some(Cell::Goal { owner }) => Some(Goal { pos, owner }),
                _ => None,
            })
            .collect()
    }

    /// Serialized form of this level.
    #[must_use]
    pub fn to_spec(&self) -> LevelSpec {
        LevelSpec {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            map: self.rows(),
            agent1: self.starts.first,
            agent2: self.starts.second,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    #[must_use]
    pub fn starts(&self) -> AgentPair<Pos> {
        self.starts
    }

    /// The state every play session and search begins from.
    #[must_use]
    pub fn initial_state(&self) -> JointState {
        JointState { agents: self.starts }
    }

    /// Cell at `pos`, or `None` when off-grid.
    #[must_use]
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some(self.cells[usize::from(pos.y) * usize::from(self.width) + usize::from(pos.x)])
    }

    /// Off-grid coordinates count as walls.
    #[must_use]
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.cell(pos).map_or(true, Cell::is_wall)
    }

    /// All coordinates in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Pos::new(x, y)))
    }

    /// Symbol rows, without agents.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.width))
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }
}

impl TryFrom<LevelSpec> for Level {
    type Error = LevelError;

    fn try_from(spec: LevelSpec) -> Result<Self, Self::Error> {
        Level::from_spec(spec)
    }
}

impl From<Level> for LevelSpec {
    fn from(level: Level) -> Self {
        level.to_spec()
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({}x{})", self.name, self.width, self.height)?;
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: [&str; 5] = ["######", "#  . #", "# #  #", "#1  2#", "######"];

    fn sample() -> Level {
        Level::parse("sample", &ROWS, Pos::new(1, 1), Pos::new(4, 1)).unwrap()
    }

    #[test]
    fn test_parse_collects_goals_in_row_major_order() {
        let level = sample();
        assert_eq!(level.width(), 6);
        assert_eq!(level.height(), 5);
        assert_eq!(
            level.goals(),
            &[
                Goal { pos: Pos::new(3, 1), owner: None },
                Goal { pos: Pos::new(1, 3), owner: Some(AgentId::First) },
                Goal { pos: Pos::new(4, 3), owner: Some(AgentId::Second) },
            ]
        );
    }

    #[test]
    fn test_cells_and_walls() {
        let level = sample();
        assert_eq!(level.cell(Pos::new(2, 2)), Some(Cell::Wall));
        assert_eq!(level.cell(Pos::new(2, 1)), Some(Cell::Open));
        assert_eq!(level.cell(Pos::new(6, 0)), None);
        assert!(level.is_wall(Pos::new(99, 99)));
        assert!(!level.is_wall(Pos::new(1, 1)));
    }

    #[test]
    fn test_rows_roundtrip_symbols() {
        assert_eq!(sample().rows(), ROWS.to_vec());
    }

    #[test]
    fn test_rejects_ragged_row() {
        let err = Level::parse("bad", &["####", "#  #", "# #", "####"], Pos::new(1, 1), Pos::new(2, 1))
            .unwrap_err();
        assert_eq!(err, LevelError::RowWidth { row: 2, expected: 4, found: 3 });
    }

    #[test]
    fn test_rejects_open_border() {
        let err = Level::parse("bad", &["#####", "  . #", "#####"], Pos::new(1, 1), Pos::new(3, 1))
            .unwrap_err();
        assert_eq!(err, LevelError::OpenBorder(Pos::new(0, 1)));
    }

    #[test]
    fn test_rejects_start_on_wall() {
        let err = Level::parse("bad", &ROWS, Pos::new(2, 2), Pos::new(4, 1)).unwrap_err();
        assert_eq!(
            err,
            LevelError::StartOnWall { agent: AgentId::First, pos: Pos::new(2, 2) }
        );
    }

    #[test]
    fn test_rejects_start_outside_grid() {
        let err = Level::parse("bad", &ROWS, Pos::new(1, 1), Pos::new(40, 1)).unwrap_err();
        assert_eq!(
            err,
            LevelError::StartOutOfBounds { agent: AgentId::Second, pos: Pos::new(40, 1) }
        );
    }

    #[test]
    fn test_rejects_unknown_symbol_and_missing_goals() {
        let err = Level::parse("bad", &["####", "#x.#", "####"], Pos::new(2, 1), Pos::new(2, 1))
            .unwrap_err();
        assert_eq!(err, LevelError::UnknownSymbol { symbol: 'x', pos: Pos::new(1, 1) });

        let err = Level::parse("bad", &["####", "#  #", "####"], Pos::new(1, 1), Pos::new(2, 1))
            .unwrap_err();
        assert_eq!(err, LevelError::NoGoals);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let err = Level::parse("bad", &["##", "##"], Pos::new(0, 0), Pos::new(0, 0)).unwrap_err();
        assert_eq!(err, LevelError::TooSmall { width: 2, height: 2 });
    }

    #[test]
    fn test_json_accepts_player_aliases() {
        let json = serde_json::json!({
            "name": "legacy",
            "width": 5,
            "height": 3,
            "map": ["#####", "# . #", "#####"],
            "player1": {"x": 1, "y": 1},
            "player2": {"x": 3, "y": 1}
        });
        let level: Level = serde_json::from_value(json).unwrap();
        assert_eq!(level.name(), "legacy");
        assert_eq!(level.starts().second, Pos::new(3, 1));
    }

    #[test]
    fn test_json_roundtrip_preserves_level() {
        let level = sample();
        let json = serde_json::to_string(&level).unwrap();
        assert!(json.contains("\"agent1\""));
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(level, back);
    }

    #[test]
    fn test_json_rejects_invalid_level() {
        // The only open cell has no goal.
        let json = serde_json::json!({
            "width": 3,
            "height": 3,
            "map": ["###", "# #", "###"],
            "agent1": {"x": 1, "y": 1},
            "agent2": {"x": 1, "y": 1}
        });
        assert!(serde_json::from_value::<Level>(json).is_err());
    }
}

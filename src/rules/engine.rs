//! Movement engine: applies one directional command to a joint state.
//!
//! A command is issued by one agent. It is only legal along that agent's
//! axis; when legal, *both* agents try to step one cell in the command's
//! direction. Each agent is blocked independently by walls and the grid
//! edge. There is no agent-vs-agent collision: two agents may share a cell.
//!
//! The engine is a pure function over `(&Level, JointState)`. It never
//! mutates its input and holds no state between calls.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AgentId, AgentPair, Direction, JointState, Level};

/// Why a command was rejected outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveReason {
    /// The direction name was not recognized.
    Invalid,
    /// The direction is not on the commanding agent's axis.
    AxisBlocked,
}

impl MoveReason {
    /// Wire code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            MoveReason::Invalid => "invalid",
            MoveReason::AxisBlocked => "axis_blocked",
        }
    }
}

/// A direction issued by a specific agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    pub agent: AgentId,
    pub direction: Direction,
}

impl Command {
    #[must_use]
    pub const fn new(agent: AgentId, direction: Direction) -> Self {
        Self { agent, direction }
    }

    /// Whether `direction` lies on the commanding agent's axis.
    #[must_use]
    pub fn is_axis_legal(&self) -> bool {
        self.agent.axis() == self.direction.axis()
    }
}

/// Result of applying one command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The resulting state. Equal to the input unless something moved.
    pub state: JointState,
    /// True iff at least one agent changed position.
    pub moved: bool,
    /// Which agents changed position.
    pub moved_agents: AgentPair<bool>,
    /// Set when the command was rejected before any move was attempted.
    pub reason: Option<MoveReason>,
}

impl MoveOutcome {
    /// Outcome that leaves `state` untouched.
    #[must_use]
    pub fn unchanged(state: JointState, reason: Option<MoveReason>) -> Self {
        Self {
            state,
            moved: false,
            moved_agents: AgentPair::default(),
            reason,
        }
    }
}

/// Successor list. At most four commands are axis-legal per state.
pub type Successors = SmallVec<[(Command, JointState); 4]>;

/// Movement rules for one level.
#[derive(Clone, Copy, Debug)]
pub struct MovementEngine<'a> {
    level: &'a Level,
}

impl<'a> MovementEngine<'a> {
    #[must_use]
    pub fn new(level: &'a Level) -> Self {
        Self { level }
    }

    #[must_use]
    pub fn level(&self) -> &'a Level {
        self.level
    }

    /// Apply `direction` as commanded by `agent`.
    #[must_use]
    pub fn apply(&self, state: JointState, agent: AgentId, direction: Direction) -> MoveOutcome {
        let command = Command::new(agent, direction);
        if !command.is_axis_legal() {
            return MoveOutcome::unchanged(state, Some(MoveReason::AxisBlocked));
        }

        let mut next = state;
        let mut moved_agents = AgentPair::default();
        for agent in AgentId::BOTH {
            let from = state.position(agent);
            if let Some(to) = from.step(direction) {
                if !self.level.is_wall(to) {
                    next.agents[agent] = to;
                    moved_agents[agent] = true;
                }
            }
        }

        MoveOutcome {
            state: next,
            moved: moved_agents.first || moved_agents.second,
            moved_agents,
            reason: None,
        }
    }

    /// Apply a direction given by its wire name.
    ///
    /// Unknown names yield `MoveReason::Invalid` with the state unchanged.
    #[must_use]
    pub fn apply_named(&self, state: JointState, agent: AgentId, name: &str) -> MoveOutcome {
        match name.parse::<Direction>() {
            Ok(direction) => self.apply(state, agent, direction),
            Err(_) => MoveOutcome::unchanged(state, Some(MoveReason::Invalid)),
        }
    }

    /// Every goal covered, owned goals by their owner.
    #[must_use]
    pub fn is_complete(&self, state: &JointState) -> bool {
        self.level.goals().iter().all(|goal| goal.is_covered(state))
    }

    /// All states reachable in one command that actually move something.
    ///
    /// Tries both agents against all four directions; axis-blocked and
    /// fully-blocked commands are dropped.
    #[must_use]
    pub fn successors(&self, state: &JointState) -> Successors {
        let mut out = Successors::new();
        for agent in AgentId::BOTH {
            for direction in Direction::ALL {
                let outcome = self.apply(*state, agent, direction);
                if outcome.moved {
                    out.push((Command::new(agent, direction), outcome.state));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pos;

    fn corridor() -> Level {
        // Agent 1 at the left end of a corridor, agent 2 in an alcove below.
        Level::parse(
            "corridor",
            &["#######", "#   . #", "### ###", "#######"],
            Pos::new(1, 1),
            Pos::new(3, 2),
        )
        .unwrap()
    }

    #[test]
    fn test_axis_mismatch_is_rejected() {
        let level = corridor();
        let engine = MovementEngine::new(&level);
        let start = level.initial_state();

        let outcome = engine.apply(start, AgentId::First, Direction::Up);
        assert_eq!(outcome, MoveOutcome::unchanged(start, Some(MoveReason::AxisBlocked)));

        let outcome = engine.apply(start, AgentId::Second, Direction::Left);
        assert_eq!(outcome.reason, Some(MoveReason::AxisBlocked));
        assert!(!outcome.moved);
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let level = corridor();
        let engine = MovementEngine::new(&level);
        let start = level.initial_state();

        let outcome = engine.apply_named(start, AgentId::First, "sideways");
        assert_eq!(outcome.reason, Some(MoveReason::Invalid));
        assert_eq!(outcome.state, start);
        assert_eq!(MoveReason::Invalid.code(), "invalid");
    }

    #[test]
    fn test_both_agents_step_independently() {
        let level = corridor();
        let engine = MovementEngine::new(&level);

        // Agent 2 is walled in left and right; only agent 1 moves.
        let outcome = engine.apply(level.initial_state(), AgentId::First, Direction::Right);
        assert!(outcome.moved);
        assert_eq!(outcome.moved_agents, AgentPair::new(true, false));
        assert_eq!(outcome.state.position(AgentId::First), Pos::new(2, 1));
        assert_eq!(outcome.state.position(AgentId::Second), Pos::new(3, 2));

        // Up: agent 1 hits the top wall, agent 2 leaves the alcove.
        let outcome = engine.apply_named(outcome.state, AgentId::Second, "up");
        assert_eq!(outcome.moved_agents, AgentPair::new(false, true));
        assert_eq!(outcome.state.position(AgentId::Second), Pos::new(3, 1));
    }

    #[test]
    fn test_fully_blocked_command_is_idempotent() {
        let level = corridor();
        let engine = MovementEngine::new(&level);
        let start = level.initial_state();

        // Agent 1 against the left wall, agent 2 walled on the left.
        for _ in 0..3 {
            let outcome = engine.apply(start, AgentId::First, Direction::Left);
            assert_eq!(outcome, MoveOutcome::unchanged(start, None));
        }
    }

    #[test]
    fn test_agents_may_share_a_cell() {
        let level = corridor();
        let engine = MovementEngine::new(&level);

        let mut state = level.initial_state();
        for _ in 0..2 {
            state = engine.apply(state, AgentId::First, Direction::Right).state;
        }
        state = engine.apply(state, AgentId::Second, Direction::Up).state;

        assert_eq!(state.position(AgentId::First), Pos::new(3, 1));
        assert_eq!(state.position(AgentId::Second), Pos::new(3, 1));
    }

    #[test]
    fn test_completion_predicate() {
        let level = corridor();
        let engine = MovementEngine::new(&level);
        assert!(!engine.is_complete(&level.initial_state()));

        let done = level.initial_state().with_position(AgentId::Second, Pos::new(4, 1));
        assert!(engine.is_complete(&done));
    }

    #[test]
    fn test_successors_skip_blocked_commands() {
        let level = corridor();
        let engine = MovementEngine::new(&level);

        let succ = engine.successors(&level.initial_state());
        let commands: Vec<_> = succ.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            commands,
            vec![
                Command::new(AgentId::First, Direction::Right),
                Command::new(AgentId::Second, Direction::Up),
            ]
        );
    }
}

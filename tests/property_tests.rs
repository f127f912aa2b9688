//! Property tests for the movement rules, tiering, and the generator.

use axis_pals::core::{AgentId, Direction, JointState, Level, Pos};
use axis_pals::difficulty::{limits, Tier};
use axis_pals::generator::{generate_seeded, GeneratorConfig};
use axis_pals::levels::campaign;
use axis_pals::rules::{MoveReason, MovementEngine};
use axis_pals::solver::is_solvable;
use proptest::prelude::*;

fn agent() -> impl Strategy<Value = AgentId> {
    prop_oneof![Just(AgentId::First), Just(AgentId::Second)]
}

fn direction() -> impl Strategy<Value = Direction> {
    (0usize..4).prop_map(|i| Direction::ALL[i])
}

fn pos() -> impl Strategy<Value = Pos> {
    (0u16..64, 0u16..64).prop_map(|(x, y)| Pos::new(x, y))
}

/// A campaign level and an arbitrary placement of both agents on open cells.
fn level_and_state() -> impl Strategy<Value = (Level, JointState)> {
    (0usize..5, any::<prop::sample::Index>(), any::<prop::sample::Index>()).prop_map(
        |(which, a, b)| {
            let level = campaign().unwrap().swap_remove(which);
            let open: Vec<Pos> = level.positions().filter(|&p| !level.is_wall(p)).collect();
            let state = JointState::new(*a.get(&open), *b.get(&open));
            (level, state)
        },
    )
}

proptest! {
    #[test]
    fn prop_unknown_direction_never_moves(
        (level, state) in level_and_state(),
        agent in agent(),
        name in "[a-zA-Z ]{0,8}",
    ) {
        prop_assume!(name.parse::<Direction>().is_err());
        let outcome = MovementEngine::new(&level).apply_named(state, agent, &name);
        prop_assert!(!outcome.moved);
        prop_assert_eq!(outcome.state, state);
        prop_assert_eq!(outcome.reason, Some(MoveReason::Invalid));
    }

    #[test]
    fn prop_axis_mismatch_never_moves(
        (level, state) in level_and_state(),
        agent in agent(),
        direction in direction(),
    ) {
        prop_assume!(agent.axis() != direction.axis());
        let outcome = MovementEngine::new(&level).apply(state, agent, direction);
        prop_assert!(!outcome.moved);
        prop_assert_eq!(outcome.state, state);
        prop_assert_eq!(outcome.reason, Some(MoveReason::AxisBlocked));
    }

    #[test]
    fn prop_blocked_commands_are_idempotent(
        (level, state) in level_and_state(),
        agent in agent(),
        direction in direction(),
    ) {
        let engine = MovementEngine::new(&level);
        let first = engine.apply(state, agent, direction);
        prop_assume!(!first.moved);
        let again = engine.apply(first.state, agent, direction);
        prop_assert_eq!(again, first);
    }

    #[test]
    fn prop_moves_stay_off_walls(
        (level, state) in level_and_state(),
        agent in agent(),
        direction in direction(),
    ) {
        let outcome = MovementEngine::new(&level).apply(state, agent, direction);
        for agent in AgentId::BOTH {
            prop_assert!(!level.is_wall(outcome.state.position(agent)));
        }
    }

    #[test]
    fn prop_canonical_key_preserves_order(a in pos(), b in pos(), c in pos(), d in pos()) {
        let left = JointState::new(a, b);
        let right = JointState::new(c, d);
        prop_assert_eq!(left.cmp(&right), left.key().cmp(&right.key()));
    }

    #[test]
    fn prop_tier_limits_are_monotonic(mut solutions in prop::collection::vec(0u32..400, 0..24)) {
        solutions.sort_unstable();
        let table = limits(&solutions);
        if solutions.is_empty() {
            prop_assert!(table.is_unbounded());
        } else {
            let strict = table.get(Tier::Strict).unwrap();
            let medium = table.get(Tier::Medium).unwrap();
            let lenient = table.get(Tier::Lenient).unwrap();
            prop_assert!(strict <= medium);
            prop_assert!(medium <= lenient);
            prop_assert!(strict >= solutions[0]);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_generated_levels_are_solvable(
        seed in any::<u64>(),
        width in 5u16..10,
        height in 5u16..9,
        goal_count in 1usize..4,
        density in 0.0f64..0.2,
    ) {
        let config = GeneratorConfig::default()
            .with_size(width, height)
            .with_goal_count(goal_count)
            .with_wall_density(density);
        let generated = generate_seeded(&config, seed);
        prop_assert!(
            is_solvable(&generated.level).solvable,
            "seed={seed}, size={width}x{height}, goals={goal_count}"
        );
    }
}

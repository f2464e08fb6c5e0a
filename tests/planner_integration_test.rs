//! The turn planner driving the skirmish rules.

use hex_skirmish::config::AppConfig;
use hex_skirmish::game::{
    run_match, PriorityHeuristic, SkirmishAction, SkirmishState, Unit, UnitKind, World,
    WorldConfig,
};
use hex_skirmish::mcts::{FirstCandidate, PlannerConfig, SearchBudget};
use hex_skirmish::{plan, GameState, Hex, HexCoordinate, TurnAction, TurnPlanner};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::tempdir;

fn open_world() -> Arc<World> {
    let hexes = Hex::ORIGIN.spiral(3).into_iter().collect();
    Arc::new(World::from_hexes(hexes, vec![Hex::new(-2, 0), Hex::new(2, 0)]))
}

fn iteration_planner(iterations: usize, seed: u64) -> TurnPlanner<PriorityHeuristic> {
    let config = PlannerConfig {
        time_budget_secs: 30.0,
        max_iterations: Some(iterations),
    };
    TurnPlanner::new(config, PriorityHeuristic::new(seed))
}

#[test]
fn test_plan_replays_legally_and_ends_once() {
    let state = SkirmishState::new(open_world(), 4);
    let mut planner = iteration_planner(200, 3);

    let result = planner.plan(&state, 0).unwrap();
    assert_eq!(result.iterations, 200);
    assert_eq!(result.root_visits, 200);

    let ends = result.actions.iter().filter(|a| a.is_end_turn()).count();
    assert_eq!(ends, 1);
    assert!(result.actions.last().is_some_and(|a| a.is_end_turn()));

    let mut replay = state.clone();
    for action in &result.actions {
        assert!(replay.legal_actions().contains(action), "{} not legal", action);
        replay = replay.apply(action);
    }
    assert_eq!(replay.current_player(), 1);
}

#[test]
fn test_planner_finishes_a_weak_capitol() {
    // five hexes in a row: own capitol, knight in the middle, enemy capitol
    let hexes = (-2..=2).map(|q| Hex::new(q, 0)).collect();
    let world = Arc::new(World::from_hexes(hexes, vec![Hex::new(-2, 0), Hex::new(2, 0)]));
    let mut units = BTreeMap::new();
    units.insert(Hex::new(-2, 0), Unit::new(0, UnitKind::Capitol));
    units.insert(Hex::new(0, 0), Unit::new(0, UnitKind::Knight));
    let mut capitol = Unit::new(1, UnitKind::Capitol);
    capitol.lives = 1;
    units.insert(Hex::new(2, 0), capitol);
    let state = SkirmishState::with_units(world, units, 2, 10);

    let strike = SkirmishAction::AttackTo {
        from: Hex::new(0, 0),
        to: Hex::new(2, 0),
    };
    assert!(state.legal_actions().contains(&strike));

    let mut planner = iteration_planner(300, 11);
    let result = planner.plan(&state, 0).unwrap();
    assert!(result.actions.contains(&strike));

    let mut replay = state;
    for action in &result.actions {
        replay = replay.apply(action);
    }
    assert!(replay.is_terminal());
    assert_eq!(replay.winner(), Some(0));
}

#[test]
fn test_free_plan_function_with_zero_budget() {
    let state = SkirmishState::new(open_world(), 10);
    let actions = plan(&state, 0, 0.0, &mut FirstCandidate).unwrap();
    assert_eq!(actions, vec![SkirmishAction::EndTurn]);
}

#[test]
fn test_search_with_iteration_budget_grows_tree() {
    let state = SkirmishState::new(open_world(), 10);
    let result = hex_skirmish::mcts::search(
        state,
        0,
        SearchBudget::iterations(25),
        &mut PriorityHeuristic::new(1),
    )
    .unwrap();
    assert_eq!(result.iterations, 25);
    assert!(result.tree_size > 1 && result.tree_size <= 26);
}

#[test]
fn test_match_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("match.json");
    let config = AppConfig {
        world: WorldConfig {
            radius: 3,
            obstacle_ratio: 0.0,
            players: 3,
        },
        planner: PlannerConfig {
            time_budget_secs: 10.0,
            max_iterations: Some(15),
        },
        max_turns: 2,
        seed: 5,
    };
    config.save(&path).unwrap();

    let loaded = AppConfig::load(&path).unwrap();
    let report = run_match(&loaded, loaded.seed).unwrap();
    assert_eq!(report.map_hexes, 37);
    assert_eq!(report.final_worth.len(), 3);
    assert!(report.turns <= 2);
}

#[test]
fn test_spawns_are_spread_out() {
    let world = World::generate(
        &WorldConfig {
            radius: 4,
            obstacle_ratio: 0.0,
            players: 2,
        },
        &mut StdRng::seed_from_u64(0),
    );
    let spawns = world.spawns();
    assert_eq!(spawns[0].distance(&spawns[1]), 6);
}

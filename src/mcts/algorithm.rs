//! Turn planning loop.
//!
//! Each iteration descends the tree by UCB1, expands one candidate, rolls the
//! selected node out and feeds the reward back to the root. Once the budget
//! is spent the plan is read off the most visited path, up to and including
//! the first end-turn action.
use crate::mcts::capability::{ExpansionHeuristic, GameState, PlayerId, TurnAction};
use crate::mcts::hyperparameters::{PlannerConfig, SearchBudget};
use crate::mcts::mcts_result::PlanResult;
use crate::mcts::node::NodeId;
use crate::mcts::selection::{descend, most_visited_child};
use crate::mcts::tree::SearchTree;
use crate::mcts::PlannerError;
use std::time::Instant;

/// Planner holding its configuration and expansion heuristic across turns.
///
/// Trees are never reused: every call to [`TurnPlanner::plan`] searches from
/// scratch.
#[derive(Debug, Clone)]
pub struct TurnPlanner<H> {
    config: PlannerConfig,
    heuristic: H,
}

impl<H> TurnPlanner<H> {
    pub fn new(config: PlannerConfig, heuristic: H) -> Self {
        Self { config, heuristic }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans the whole turn of `player` from `root_state`.
    pub fn plan<S>(
        &mut self,
        root_state: &S,
        player: PlayerId,
    ) -> Result<PlanResult<S::Action>, PlannerError>
    where
        S: GameState,
        H: ExpansionHeuristic<S::Action>,
    {
        search(root_state.clone(), player, self.config.budget(), &mut self.heuristic)
    }
}

/// Plans a turn under a wall-clock budget and returns only the actions.
///
/// The returned sequence always ends with exactly one end-turn action.
pub fn plan<S, H>(
    root_state: &S,
    player: PlayerId,
    time_budget_secs: f64,
    heuristic: &mut H,
) -> Result<Vec<S::Action>, PlannerError>
where
    S: GameState,
    H: ExpansionHeuristic<S::Action> + ?Sized,
{
    let result = search(
        root_state.clone(),
        player,
        SearchBudget::wall_clock(time_budget_secs),
        heuristic,
    )?;
    Ok(result.actions)
}

/// Runs the search loop until `budget` is exhausted.
pub fn search<S, H>(
    root_state: S,
    player: PlayerId,
    budget: SearchBudget,
    heuristic: &mut H,
) -> Result<PlanResult<S::Action>, PlannerError>
where
    S: GameState,
    H: ExpansionHeuristic<S::Action> + ?Sized,
{
    let started = Instant::now();
    let mut tree = SearchTree::new(root_state, player)?;
    let mut iterations = 0;

    while !budget.is_exhausted(started, iterations) {
        let selected = select(&mut tree, heuristic)?;
        let value = tree.rollout(selected);
        tree.backpropagate(selected, value);
        iterations += 1;
    }

    let actions = extract_plan(&tree);
    let root_visits = tree.get(tree.root()).visits;
    let elapsed = started.elapsed();
    log::debug!(
        "player {} planned {} actions: {} iterations, {} nodes, {:?}",
        player,
        actions.len(),
        iterations,
        tree.len(),
        elapsed
    );

    Ok(PlanResult {
        actions,
        iterations,
        root_visits,
        tree_size: tree.len(),
        elapsed,
    })
}

/// Picks the node to simulate: the terminal node reached by descent, or a
/// freshly expanded child of the first node with candidates left.
fn select<S, H>(tree: &mut SearchTree<S>, heuristic: &mut H) -> Result<NodeId, PlannerError>
where
    S: GameState,
    H: ExpansionHeuristic<S::Action> + ?Sized,
{
    let leaf = descend(tree, tree.root());
    let node = tree.get(leaf);
    if node.is_terminal() || node.is_fully_expanded() {
        return Ok(leaf);
    }
    tree.expand_one(leaf, heuristic)
}

/// Follows the most visited children from the root, stopping after the first
/// end-turn action. Appends an end-turn when the walk runs out of children.
pub fn extract_plan<S: GameState>(tree: &SearchTree<S>) -> Vec<S::Action> {
    let mut actions = Vec::new();
    let mut current = tree.root();

    while let Some(child) = most_visited_child(tree, current) {
        let Some(action) = tree.get(child).action.clone() else {
            break;
        };
        let ends_turn = action.is_end_turn();
        actions.push(action);
        if ends_turn {
            break;
        }
        current = child;
    }

    if !actions.last().is_some_and(|action| action.is_end_turn()) {
        actions.push(S::Action::end_turn());
    }
    actions
}

//! Monte Carlo Tree Search implementation.
//!
//! Each decision rebuilds the tree from the current state and runs
//! select -> expand -> rollout -> backpropagate until the wall-clock budget
//! (or the optional simulation cap) is spent. Selection uses UCB with an
//! additive wall-pressure bias; expansion is deferred until a node's second
//! visit.

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use enclosure_core::{EnclosureError, Game, Result, Side};
use rand::Rng;
use tracing::{debug, trace};

use crate::{
    config::MctsConfig,
    evaluator::Evaluator,
    node::{Node, NodeId},
    policy::SamplingPolicy,
    tree::Tree,
};

/// Result of one decision.
#[derive(Clone, Debug)]
pub struct SearchResult<A> {
    /// Most-visited root child (first in enumeration order on ties).
    pub best_action: A,

    /// Visit count for each root child, in enumeration order.
    pub visit_counts: Vec<(A, u32)>,

    /// Number of completed simulations.
    pub simulations: usize,

    /// Wall-clock time spent searching.
    pub elapsed: Duration,

    /// Mean score of the root's children, from the deciding side's view.
    pub root_value: f32,
}

/// Monte Carlo Tree Search with UCB selection and biased rollouts.
///
/// Generic over:
/// - `G`: The game being played
/// - `E`: The leaf evaluation strategy
/// - `R`: The random number generator used for expansion sampling
pub struct Mcts<G: Game, E: Evaluator<G>, R: Rng> {
    config: MctsConfig,
    evaluator: E,
    rng: R,
    policy: SamplingPolicy,
    tree: Tree<G::State, G::Action>,
    first_decision: bool,
    root_side: Side,
    _game: PhantomData<G>,
}

impl<G, E, R> Mcts<G, E, R>
where
    G: Game,
    E: Evaluator<G>,
    R: Rng,
{
    /// Create an engine for a new game.
    pub fn new(config: MctsConfig, evaluator: E, rng: R) -> Self {
        let policy = SamplingPolicy::new(config.bucket_weights);
        Self {
            config,
            evaluator,
            rng,
            policy,
            tree: Tree::new(),
            first_decision: true,
            root_side: Side::Me,
            _game: PhantomData,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Tree left behind by the last decision.
    pub fn tree(&self) -> &Tree<G::State, G::Action> {
        &self.tree
    }

    /// True until the first decision of the current game has been made.
    pub fn is_first_decision(&self) -> bool {
        self.first_decision
    }

    /// Forget the previous game: drop the tree and re-arm the opening budget.
    pub fn new_game(&mut self) {
        self.tree.clear();
        self.first_decision = true;
    }

    /// Choose an action for the side to move in `state`.
    ///
    /// # Errors
    /// - `EnclosureError::GameOver` if `state` is already decided
    /// - `EnclosureError::NoLegalMoves` if the root has no children
    pub fn decide(&mut self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>> {
        if game.is_terminal(state) {
            return Err(EnclosureError::GameOver);
        }

        let start = Instant::now();
        let budget = self.config.budget(self.first_decision);
        self.first_decision = false;

        self.root_side = game.to_move(state);
        let heuristic = game.heuristic(state, self.root_side);
        self.tree.reset(Node::root(state.clone(), heuristic));

        self.expand_children(game, NodeId::ROOT);
        if self.tree.root().children.is_empty() {
            return Err(EnclosureError::NoLegalMoves);
        }

        let mut simulations = 0;
        loop {
            self.simulate(game);
            simulations += 1;

            if self
                .config
                .max_simulations
                .is_some_and(|cap| simulations >= cap)
            {
                break;
            }
            if start.elapsed() >= budget {
                break;
            }
        }

        let result = self.extract_results(simulations, start.elapsed())?;
        debug!(
            side = %self.root_side,
            simulations,
            nodes = self.tree.len(),
            elapsed_ms = result.elapsed.as_millis() as u64,
            root_value = result.root_value,
            best = ?result.best_action,
            "decision complete"
        );
        Ok(result)
    }

    /// Run a single simulation: select -> expand -> rollout -> backpropagate.
    fn simulate(&mut self, game: &G) {
        let leaf = self.select();
        let node_id = self.expand(game, leaf);

        let node = self.tree.get(node_id);
        let mut score = self.evaluator.evaluate(game, &node.state, self.root_side);
        // Store the score for whoever moved into the node.
        if node.turn == self.tree.root().turn {
            score = -score;
        }
        trace!(node = node_id.0, depth = self.tree.depth(node_id), score, "simulation");

        self.backpropagate(node_id, score);
    }

    /// Descend from the root by UCB until no child beats the current node.
    ///
    /// The current node is the incumbent with score 0; a child replaces it
    /// only with a strictly higher score, so earlier children win ties.
    fn select(&self) -> NodeId {
        let exploration = self.config.exploration;
        let heuristic_weight = self.config.heuristic_weight;
        let mut current = NodeId::ROOT;

        loop {
            let node = self.tree.get(current);
            let mut best = current;
            let mut best_score = 0.0;

            for &child_id in &node.children {
                let score = self.tree.get(child_id).stats.selection_score(
                    node.stats.visits,
                    exploration,
                    heuristic_weight,
                );
                if score > best_score {
                    best_score = score;
                    best = child_id;
                }
            }

            if best == current {
                return current;
            }
            current = best;
            if self.tree.get(current).children.is_empty() {
                return current;
            }
        }
    }

    /// Expand a visited, non-terminal leaf and sample one of its children.
    ///
    /// A node that has never been visited is returned unchanged; its first
    /// visit is a plain rollout. Terminal nodes are never expanded.
    fn expand(&mut self, game: &G, node_id: NodeId) -> NodeId {
        let node = self.tree.get(node_id);
        if node.stats.visits == 0 || game.is_terminal(&node.state) {
            return node_id;
        }

        if !node.expanded {
            self.expand_children(game, node_id);
        }

        let node = self.tree.get(node_id);
        match self
            .policy
            .choose(node.buckets, node.children.len(), node.turn, &mut self.rng)
        {
            Some(index) => node.children[index],
            None => node_id,
        }
    }

    /// Add one child per enumerated action, in enumeration order.
    fn expand_children(&mut self, game: &G, node_id: NodeId) {
        let node = self.tree.get(node_id);
        let mover = game.to_move(&node.state);
        let (actions, counts) = game.actions(&node.state).into_parts();

        let children: Vec<Node<G::State, G::Action>> = actions
            .into_iter()
            .map(|action| {
                let state = game.apply(&node.state, action);
                let turn = game.to_move(&state) == self.root_side;
                let heuristic = game.heuristic(&state, mover);
                Node::new(Some(action), state, turn, heuristic)
            })
            .collect();

        for child in children {
            self.tree.add_child(node_id, child);
        }

        let node = self.tree.get_mut(node_id);
        node.buckets = counts;
        node.expanded = true;
    }

    /// Add `score` to `node_id` and alternate its sign on the way up to the
    /// root, counting one visit per node.
    fn backpropagate(&mut self, node_id: NodeId, score: f32) {
        let mut current = Some(node_id);
        let mut score = score;

        while let Some(id) = current {
            let node = self.tree.get_mut(id);
            node.stats.visits += 1;
            node.stats.wins += score;
            score = -score;
            current = node.parent;
        }
    }

    /// Extract the decision from the root's children.
    fn extract_results(
        &self,
        simulations: usize,
        elapsed: Duration,
    ) -> Result<SearchResult<G::Action>> {
        let root = self.tree.root();
        let mut visit_counts = Vec::with_capacity(root.children.len());
        let mut best: Option<(G::Action, u32)> = None;
        let mut total_wins = 0.0;
        let mut total_visits = 0u32;

        for &child_id in &root.children {
            let child = self.tree.get(child_id);
            let Some(action) = child.action else {
                continue;
            };
            let visits = child.stats.visits;
            trace!(
                action = ?action,
                visits,
                mean = child.stats.mean_value(),
                heuristic = child.stats.heuristic,
                "root child"
            );

            if best.map_or(true, |(_, most)| visits > most) {
                best = Some((action, visits));
            }
            total_wins += child.stats.wins;
            total_visits += visits;
            visit_counts.push((action, visits));
        }

        let (best_action, _) = best.ok_or(EnclosureError::NoLegalMoves)?;
        let root_value = if total_visits > 0 {
            total_wins / total_visits as f32
        } else {
            0.0
        };

        Ok(SearchResult {
            best_action,
            visit_counts,
            simulations,
            elapsed,
            root_value,
        })
    }
}

use std::collections::HashMap;

use rand::{seq::SliceRandom, Rng};

use crate::env::Environment;

/// Learning rate.
pub const ALPHA: f64 = 0.5;
/// Probability of exploring with a random action.
pub const EPSILON: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QConfig {
    pub alpha: f64,
    pub epsilon: f64,
}

impl Default for QConfig {
    fn default() -> Self {
        Self {
            alpha: ALPHA,
            epsilon: EPSILON,
        }
    }
}

/// Tabular Q-learning over state snapshots.
///
/// Missing entries are worth zero. Both the bootstrap and the greedy choice
/// start from a floor of zero, so an action with a negative value is never
/// preferred over one that was never tried.
pub struct QLearner<E: Environment> {
    q: HashMap<(E::State, E::Action), f64>,
    config: QConfig,
}

impl<E: Environment> Default for QLearner<E> {
    fn default() -> Self {
        Self::new(QConfig::default())
    }
}

impl<E: Environment> QLearner<E> {
    #[must_use]
    pub fn new(config: QConfig) -> Self {
        Self {
            q: HashMap::new(),
            config,
        }
    }

    /// Number of learned `(state, action)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.q.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// Every learned entry, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&E::State, E::Action, f64)> {
        self.q.iter().map(|((state, action), q)| (state, *action, *q))
    }

    #[must_use]
    pub fn q_value(&self, state: &E::State, action: E::Action) -> f64 {
        self.q
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or_default()
    }

    /// Largest known value among actions from `state`, but never below zero.
    /// Only actions legal in `state` are considered, so a terminal state is worth zero.
    #[must_use]
    pub fn best_future_reward(&self, state: &E::State) -> f64 {
        let mut actions = Vec::new();
        E::actions(state, &mut actions);
        actions
            .into_iter()
            .map(|action| self.q_value(state, action))
            .fold(0.0, f64::max)
    }

    /// Move the estimate for `(old_state, action)` towards
    /// `reward + best_future_reward(new_state)`.
    pub fn update(
        &mut self,
        old_state: &E::State,
        action: E::Action,
        new_state: &E::State,
        reward: f64,
    ) {
        let old = self.q_value(old_state, action);
        let future = self.best_future_reward(new_state);
        let new = self.config.alpha.mul_add((reward + future) - old, old);
        self.q.insert((old_state.clone(), action), new);
    }

    /// Pick an action from `state`. Returns `None` if there are no legal actions.
    ///
    /// Without any positively valued action the choice is uniformly random.
    /// Otherwise the best action is returned, except that with `explore`
    /// a random action is taken with probability epsilon.
    pub fn choose_action(
        &self,
        state: &E::State,
        explore: bool,
        rng: &mut impl Rng,
    ) -> Option<E::Action> {
        let mut actions = Vec::new();
        E::actions(state, &mut actions);

        let mut max_reward = 0.0;
        let mut best_action = None;
        for &action in &actions {
            let q = self.q_value(state, action);
            if q > max_reward {
                max_reward = q;
                best_action = Some(action);
            }
        }

        match best_action {
            Some(best) if !explore || rng.gen::<f64>() >= self.config.epsilon => Some(best),
            _ => actions.choose(rng).copied(),
        }
    }
}

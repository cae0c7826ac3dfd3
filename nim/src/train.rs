use rand::Rng;

use crate::{
    agent::{QConfig, QLearner},
    env::{Environment, Player},
};

/// How often to report training progress.
const LOG_INTERVAL: usize = 1_000;

/// Learn by playing `games` games against itself.
///
/// # Errors
///
/// Returns an error if the agent ever picks an illegal action.
pub fn train<E: Environment>(
    games: usize,
    config: QConfig,
    rng: &mut impl Rng,
) -> Result<QLearner<E>, E::Error> {
    let mut agent = QLearner::new(config);
    for game in 1..=games {
        let winner = self_play(&mut agent, E::default(), rng)?;
        log::debug!("training game {game} won by {winner:?}");
        if game % LOG_INTERVAL == 0 {
            log::info!("played {game} training games, {} entries", agent.len());
        }
    }
    log::info!("done training after {games} games");
    Ok(agent)
}

/// Play one game from `env` where both sides share the agent's table.
///
/// After every move the previous move of the player now to act is updated with
/// no reward. When the game ends both players' last moves receive the result.
///
/// # Errors
///
/// Returns an error if the agent picks an illegal action.
pub fn self_play<E: Environment>(
    agent: &mut QLearner<E>,
    mut env: E,
    rng: &mut impl Rng,
) -> Result<Option<Player>, E::Error> {
    let mut last: [Option<(E::State, E::Action)>; 2] = [None, None];

    loop {
        let state = env.state();
        let Some(action) = agent.choose_action(&state, true, rng) else {
            // The starting position has no moves.
            return Ok(None);
        };
        last[env.to_move().index()] = Some((state, action));

        env.step(action)?;
        let new_state = env.state();

        if let Some(terminal) = env.terminal() {
            // The result is from the view of the player to move, the opponent gets the negation.
            let to_move = env.to_move();
            let reward = f64::from(terminal);
            for (player, reward) in [(to_move, reward), (to_move.other(), -reward)] {
                if let Some((state, action)) = &last[player.index()] {
                    agent.update(state, *action, &new_state, reward);
                }
            }
            return Ok(env.winner());
        }

        if let Some((state, action)) = &last[env.to_move().index()] {
            agent.update(state, *action, &new_state, 0.0);
        }
    }
}

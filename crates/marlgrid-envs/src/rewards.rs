//! Terminal group reward for Social Rejection.

use marlgrid::grid::{Carrying, GridAgent, Pos};

/// Whether `pos` lies in the refuge: at or left of the dividing wall
pub fn in_safe_zone(pos: Pos, wall_x_pos: usize) -> bool {
    pos.0 <= wall_x_pos
}

/// Rewards once time is up.
///
/// Agents outside the refuge get `-1`. Agents inside pool the value of what
/// they carry and split the pool evenly, so each receives the same share
/// whatever it brought back itself.
pub fn terminal_rewards(
    agents: &[GridAgent],
    wall_x_pos: usize,
    good_berry_reward: f32,
    poisoned_berry_reward: f32,
) -> Vec<f32> {
    let mut rewards = vec![-1.0; agents.len()];
    let safe: Vec<usize> = agents
        .iter()
        .enumerate()
        .filter(|(_, a)| in_safe_zone(a.pos, wall_x_pos))
        .map(|(i, _)| i)
        .collect();
    if safe.is_empty() {
        return rewards;
    }

    let pool: f32 = safe
        .iter()
        .map(|&i| match agents[i].carrying {
            Carrying::Berry => good_berry_reward,
            Carrying::PoisonedBerry => poisoned_berry_reward,
            Carrying::Nothing => 0.0,
        })
        .sum();
    let share = pool / safe.len() as f32;
    for i in safe {
        rewards[i] = share;
    }
    rewards
}

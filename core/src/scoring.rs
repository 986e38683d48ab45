//! Score awarded when a level is completed.

use crate::Count;

pub const BASE_SCORE: u32 = 100;
/// Points per move left unused.
pub const MOVE_BONUS: u32 = 15;
/// Points per second left on the clock.
pub const TIME_BONUS: u32 = 3;
/// Ceiling of the efficiency bonus, scaled by the share of moves remaining.
pub const EFFICIENCY_BONUS: u32 = 50;

/// Computes the final score of a completed level.
///
/// `max_moves` must be positive, which every loaded level guarantees.
pub fn compute_score(
    max_moves: Count,
    moves_used: Count,
    moves_remaining: Count,
    time_remaining: Count,
) -> u32 {
    let move_bonus = max_moves.saturating_sub(moves_used).saturating_mul(MOVE_BONUS);
    let time_bonus = time_remaining.saturating_mul(TIME_BONUS);
    let efficiency_bonus = if moves_remaining > 0 && max_moves > 0 {
        let scaled =
            u64::from(moves_remaining) * u64::from(EFFICIENCY_BONUS) / u64::from(max_moves);
        scaled as u32
    } else {
        0
    };

    BASE_SCORE
        .saturating_add(move_bonus)
        .saturating_add(time_bonus)
        .saturating_add(efficiency_bonus)
}

//! Game score
//!
//! 첫 시도 정답 = 100점, 이후 시도마다 `100 / max_attempts` 감점, 최저 0점.

pub const BASE_SCORE: u32 = 100;

/// Score for a game won on attempt number `attempts` (1-based).
///
/// A first-attempt win always scores exactly 100. Wins past `max_attempts`
/// (continuous mode) bottom out at 0.
pub fn calculate_score(attempts: u32, max_attempts: u32) -> u32 {
    if attempts <= 1 {
        return BASE_SCORE;
    }
    if max_attempts == 0 {
        return 0;
    }

    let penalty_per_attempt = f64::from(BASE_SCORE) / f64::from(max_attempts);
    let score = f64::from(BASE_SCORE) - f64::from(attempts - 1) * penalty_per_attempt;

    score.max(0.0).round() as u32
}

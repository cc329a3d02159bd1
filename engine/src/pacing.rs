use std::time::Duration;

const BASE_TICK_MS: u64 = 150;
const MIN_TICK_MS: u64 = 50;
const SPEEDUP_STEP_MS: u64 = 10;
const SCORE_BRACKET: u32 = 50;

/// Fixed cadence of the autonomous (spectator) engine.
pub const AUTONOMOUS_TICK: Duration = Duration::from_millis(BASE_TICK_MS);

/// Tick interval for a controlled game as a pure function of score: the
/// clock speeds up by 10ms per 50 points, floored at 50ms. The
/// clock-owning collaborator re-derives this after every published
/// snapshot.
pub fn tick_interval(score: u32) -> Duration {
    let reduction = u64::from(score / SCORE_BRACKET) * SPEEDUP_STEP_MS;
    let ms = BASE_TICK_MS.saturating_sub(reduction).max(MIN_TICK_MS);
    Duration::from_millis(ms)
}

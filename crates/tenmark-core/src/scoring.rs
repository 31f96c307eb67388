//! Score assembly for the final feedback screen.

use crate::session::SessionState;
use crate::timer::TIME_LIMIT_SECS;

/// Raw score substituted when feedback generation falls back to static
/// content. Fixed rather than random so repeated runs score identically.
pub const FALLBACK_BASE_SCORE: u8 = 85;

/// 10 bonus points for finishing inside the timed phase.
pub fn time_bonus(elapsed_secs: u64) -> u8 {
    if elapsed_secs < TIME_LIMIT_SECS { 10 } else { 0 }
}

/// 10 bonus points when headline, USP, CTA and caption are all filled in.
pub fn completeness_bonus(state: &SessionState) -> u8 {
    if state.campaign_fields_complete() {
        10
    } else {
        0
    }
}

/// `min(raw + bonuses, 100)`. Applied identically whether `raw` came from
/// the live provider or the fallback baseline.
pub fn final_score(raw: u8, time_bonus: u8, completeness_bonus: u8) -> u8 {
    (raw as u16 + time_bonus as u16 + completeness_bonus as u16).min(100) as u8
}

/// Assembles the final score for the current session state.
pub fn assemble(raw: u8, state: &SessionState) -> u8 {
    final_score(raw, time_bonus(state.elapsed_time), completeness_bonus(state))
}

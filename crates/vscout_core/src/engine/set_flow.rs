use std::cmp::Ordering;

use crate::models::{MatchState, SetRecord};

/// Close the current set and open the next one.
///
/// The side ahead on points takes the set. A level score credits nobody.
/// Lineups and serve possession carry over unchanged.
pub fn start_new_set(state: &MatchState) -> MatchState {
    let mut next = state.clone();

    match state.home_score.cmp(&state.away_score) {
        Ordering::Greater => next.home_set_wins += 1,
        Ordering::Less => next.away_set_wins += 1,
        Ordering::Equal => {}
    }

    next.completed_sets.push(SetRecord {
        set_number: state.set_number,
        home_score: state.home_score,
        away_score: state.away_score,
        events: std::mem::take(&mut next.events),
    });

    next.set_number += 1;
    next.home_score = 0;
    next.away_score = 0;
    next
}

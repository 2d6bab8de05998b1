//! Match scoring
//!
//! Assigns each surviving destination a weighted score from temperature
//! closeness, sunshine and tag matches, then sorts descending. The score is
//! deliberately unclamped above 100; the sort is stable, so destinations
//! with equal scores keep their upstream order.

use crate::models::{EvaluatedDestination, ScoredDestination, SearchCriteria};

/// Compute the weighted match score for one evaluated destination
#[must_use]
pub fn match_score(evaluated: &EvaluatedDestination, criteria: &SearchCriteria) -> i64 {
    let temp_diff = (evaluated.avg_temp as f64 - criteria.temp_midpoint()).abs();
    let mut score = (40.0 - temp_diff * 2.0).max(0.0);

    if criteria.sunny {
        score += evaluated.sunshine as f64 * 0.3;
    }
    if criteria.beach && evaluated.destination.beach {
        score += 10.0;
    }
    if criteria.culture && evaluated.destination.culture {
        score += 10.0;
    }
    if criteria.nature && evaluated.destination.nature {
        score += 10.0;
    }

    score += evaluated.sunshine as f64 * 0.2;

    score.round() as i64
}

/// Score and rank destinations, best match first
#[must_use]
pub fn calculate_scores(
    destinations: Vec<EvaluatedDestination>,
    criteria: &SearchCriteria,
) -> Vec<ScoredDestination> {
    let mut scored: Vec<ScoredDestination> = destinations
        .into_iter()
        .map(|evaluated| ScoredDestination {
            match_score: match_score(&evaluated, criteria),
            evaluated,
        })
        .collect();

    // sort_by is stable; ties keep their relative input order
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored
}

//! Terminal rendering of search results
//!
//! Maps scored destinations to text cards and an on-demand detail view.
//! This is the rendering boundary: everything here is pure formatting over
//! the ordered list the pipeline produced.

use crate::models::{Destination, ScoredDestination, SearchCriteria};
use crate::search::CityOverview;
use std::fmt::Write;

/// Number of forthcoming days shown in the detail view
const DETAIL_DAYS: usize = 5;

/// Badges for the tags that match the search criteria
fn tag_badges(destination: &Destination, criteria: &SearchCriteria) -> Vec<&'static str> {
    let mut badges = Vec::new();
    if criteria.beach && destination.beach {
        badges.push("🏖 beach");
    }
    if criteria.culture && destination.culture {
        badges.push("🏛 culture");
    }
    if criteria.nature && destination.nature {
        badges.push("🌲 nature");
    }
    badges
}

/// Render one result card
#[must_use]
pub fn render_card(scored: &ScoredDestination, criteria: &SearchCriteria) -> String {
    let evaluated = &scored.evaluated;
    let dest = &evaluated.destination;
    let mut card = String::new();

    let _ = writeln!(card, "{} {} ({})", dest.emoji, dest.name, dest.country);
    let _ = write!(
        card,
        "   {}°C avg · {}% sunshine",
        evaluated.avg_temp, evaluated.sunshine
    );
    if let Some(humidity) = evaluated.humidity {
        let _ = write!(card, " · {humidity}% humidity");
    }
    let _ = writeln!(card);

    let badges = tag_badges(dest, criteria);
    if !badges.is_empty() {
        let _ = writeln!(card, "   {}", badges.join("  "));
    }

    let _ = writeln!(card, "   {}", dest.description);
    let _ = writeln!(card, "   Match score: {}", scored.match_score);

    card
}

/// Render the full ordered result list
#[must_use]
pub fn render_results(results: &[ScoredDestination], criteria: &SearchCriteria) -> String {
    if results.is_empty() {
        return "No destinations matched your criteria. Try widening the temperature range.\n"
            .to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Found {} matching destinations:\n", results.len());
    for scored in results {
        out.push_str(&render_card(scored, criteria));
        out.push('\n');
    }
    out
}

/// Render the detail view: up to five forthcoming days for one destination
#[must_use]
pub fn render_detail(scored: &ScoredDestination) -> String {
    let evaluated = &scored.evaluated;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {} — next days:",
        evaluated.destination.emoji, evaluated.destination.name
    );

    if evaluated.forecast.is_empty() {
        let _ = writeln!(out, "   (no live forecast available)");
        return out;
    }

    for day in evaluated.forecast.iter().take(DETAIL_DAYS) {
        let _ = writeln!(
            out,
            "   {}  {}..{}°C  {}% sunshine  {}",
            day.date, day.min_temp, day.max_temp, day.sunshine_pct, day.description
        );
    }
    out
}

/// Render a city overview (weather, forecast and attractions)
#[must_use]
pub fn render_overview(overview: &CityOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", overview.city);

    match &overview.weather {
        Some(weather) => {
            let _ = writeln!(
                out,
                "Now: {} ({}), feels like {}°C, {}% humidity, wind {} m/s",
                weather.format_temperature(),
                weather.description,
                weather.feels_like,
                weather.humidity,
                weather.wind_speed
            );
        }
        None => {
            let _ = writeln!(out, "Now: weather unavailable");
        }
    }

    for day in overview.forecast.iter().take(DETAIL_DAYS) {
        let _ = writeln!(
            out,
            "  {}  {}..{}°C  {}% sunshine  {}",
            day.date, day.min_temp, day.max_temp, day.sunshine_pct, day.description
        );
    }

    if !overview.places.is_empty() {
        let _ = writeln!(out, "Top attractions:");
        for place in &overview.places {
            let _ = writeln!(
                out,
                "  {} ({:.1}★, {} ratings)",
                place.name, place.rating, place.user_ratings_total
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailySummary, EvaluatedDestination};
    use chrono::NaiveDate;

    fn scored() -> ScoredDestination {
        ScoredDestination {
            evaluated: EvaluatedDestination {
                destination: Destination {
                    name: "Barcelona".to_string(),
                    country: "Spain".to_string(),
                    beach: true,
                    culture: true,
                    nature: false,
                    description: "Mediterranean beaches and Gaudí.".to_string(),
                    emoji: "🏖️".to_string(),
                    avg_temp: 24,
                    sunshine: 75,
                },
                avg_temp: 23,
                sunshine: 70,
                humidity: Some(60),
                current: None,
                forecast: (0..7)
                    .map(|i| DailySummary {
                        date: NaiveDate::from_ymd_opt(2024, 6, 1 + i).unwrap(),
                        avg_temp: 23,
                        min_temp: 19,
                        max_temp: 27,
                        avg_humidity: 60,
                        avg_clouds: 30,
                        sunshine_pct: 70,
                        description: "few clouds".to_string(),
                        icon: "02d".to_string(),
                    })
                    .collect(),
            },
            match_score: 74,
        }
    }

    #[test]
    fn test_card_shows_score_and_matching_badges() {
        let criteria = SearchCriteria {
            beach: true,
            nature: true,
            ..SearchCriteria::default()
        };
        let card = render_card(&scored(), &criteria);

        assert!(card.contains("Barcelona"));
        assert!(card.contains("Match score: 74"));
        assert!(card.contains("beach"));
        // nature requested but not offered by this destination
        assert!(!card.contains("nature"));
        assert!(card.contains("60% humidity"));
    }

    #[test]
    fn test_detail_view_caps_at_five_days() {
        let detail = render_detail(&scored());
        let day_lines = detail
            .lines()
            .filter(|line| line.contains("sunshine"))
            .count();
        assert_eq!(day_lines, 5);
    }

    #[test]
    fn test_empty_results_message() {
        let out = render_results(&[], &SearchCriteria::default());
        assert!(out.contains("No destinations matched"));
    }
}

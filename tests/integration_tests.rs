//! Integration tests for the sunseeker search pipeline
//!
//! These run the filter → score → render pipeline end to end on catalog and
//! fixture data, without touching the network.

use rstest::rstest;
use sunseeker::catalog::default_catalog;
use sunseeker::config::{PlacesConfig, SearchConfig, WeatherConfig};
use sunseeker::evaluator::{evaluate_offline, forecast_aggregates, passes_filters};
use sunseeker::models::{DailySummary, SearchCriteria};
use sunseeker::scorer::calculate_scores;
use sunseeker::{report, PlacesApiClient, SearchService, WeatherApiClient};

fn criteria(min_temp: i64, max_temp: i64) -> SearchCriteria {
    SearchCriteria {
        min_temp,
        max_temp,
        ..SearchCriteria::default()
    }
}

fn day(avg_temp: i64, sunshine_pct: i64) -> DailySummary {
    DailySummary {
        date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        avg_temp,
        min_temp: avg_temp - 4,
        max_temp: avg_temp + 4,
        avg_humidity: 55,
        avg_clouds: 100 - sunshine_pct,
        sunshine_pct,
        description: "few clouds".to_string(),
        icon: "02d".to_string(),
    }
}

/// Offline pipeline end to end: filter, score, render
#[test]
fn test_offline_pipeline_produces_ranked_cards() {
    let search_criteria = SearchCriteria {
        sunny: true,
        beach: true,
        ..criteria(20, 30)
    };

    let evaluated: Vec<_> = default_catalog()
        .iter()
        .filter_map(|dest| evaluate_offline(dest, &search_criteria))
        .collect();
    assert!(!evaluated.is_empty());

    let scored = calculate_scores(evaluated, &search_criteria);
    for pair in scored.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }

    let rendered = report::render_results(&scored, &search_criteria);
    assert!(rendered.contains("Match score:"));
    assert!(rendered.contains("beach"));
}

/// The worked scenario from the pipeline contract: two forecast days of
/// (22°C, 80%) and (24°C, 60%) under a sunny 15-30°C search score 74.
#[test]
fn test_worked_scenario_through_aggregation_and_scoring() {
    let forecast = vec![day(22, 80), day(24, 60)];
    let (avg_temp, avg_sunshine) = forecast_aggregates(&forecast);
    assert_eq!(avg_temp, 23);
    assert_eq!(avg_sunshine, 70);

    let search_criteria = SearchCriteria {
        sunny: true,
        ..criteria(15, 30)
    };

    let dest = default_catalog().into_iter().next().unwrap();
    assert!(passes_filters(avg_temp, avg_sunshine, &dest, &search_criteria));

    let evaluated = sunseeker::models::EvaluatedDestination {
        destination: dest,
        avg_temp,
        sunshine: avg_sunshine,
        humidity: Some(55),
        current: None,
        forecast,
    };
    let scored = calculate_scores(vec![evaluated], &search_criteria);
    // 39 temperature component + 21 sunny bonus + 14 base sunshine = 74
    assert_eq!(scored[0].match_score, 74);
}

/// Filtering is exactly the five-rule predicate
#[rstest]
#[case(14, 90, false)] // below minimum temperature
#[case(31, 90, false)] // above maximum temperature
#[case(20, 69, false)] // sunny requested, sunshine below threshold
#[case(20, 70, true)] // sunny threshold is inclusive
fn test_hard_filter_boundaries(
    #[case] avg_temp: i64,
    #[case] avg_sunshine: i64,
    #[case] expected: bool,
) {
    let search_criteria = SearchCriteria {
        sunny: true,
        ..criteria(15, 30)
    };
    let dest = default_catalog().into_iter().next().unwrap();
    assert_eq!(
        passes_filters(avg_temp, avg_sunshine, &dest, &search_criteria),
        expected
    );
}

fn unreachable_service() -> SearchService {
    let weather_config = WeatherConfig {
        api_key: "integration_key".to_string(),
        base_url: "http://127.0.0.1:1".to_string(),
        units: "metric".to_string(),
        lang: "en".to_string(),
        timeout_seconds: 2,
    };
    let places_config = PlacesConfig {
        api_key: "integration_key".to_string(),
        base_url: "http://127.0.0.1:1".to_string(),
        language: "en".to_string(),
    };
    let search_config = SearchConfig {
        timeout_seconds: 30,
        max_places: 5,
        cors_proxy: None,
    };

    SearchService::new(
        WeatherApiClient::new(weather_config, None).unwrap(),
        PlacesApiClient::new(places_config, None).unwrap(),
        default_catalog(),
        &search_config,
    )
}

/// Invalid criteria are rejected before any network call
#[tokio::test]
async fn test_validation_precedes_network() {
    let bad = SearchCriteria {
        min_temp: 10,
        max_temp: 5,
        ..SearchCriteria::default()
    };
    assert!(unreachable_service().search(&bad).await.is_err());

    let bad_duration = SearchCriteria {
        duration_days: 45,
        ..criteria(15, 30)
    };
    assert!(unreachable_service().search(&bad_duration).await.is_err());
}

/// A destination whose fetches fail is simply absent from the results
#[tokio::test]
async fn test_failed_fetches_become_exclusions() {
    let results = unreachable_service()
        .search(&criteria(-50, 50))
        .await
        .unwrap();
    assert!(results.is_empty());
}

/// The fallback path answers from static catalog tags alone
#[test]
fn test_fallback_path_uses_catalog_tags() {
    let search_criteria = SearchCriteria {
        sunny: true,
        ..criteria(20, 30)
    };
    let results = unreachable_service().search_offline(&search_criteria);

    assert!(!results.is_empty());
    for scored in &results {
        assert!(scored.evaluated.current.is_none());
        assert!(scored.evaluated.forecast.is_empty());
        assert!(scored.evaluated.sunshine >= 70);
    }
}

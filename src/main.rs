//! Composition root for the `sunseeker` CLI

use anyhow::Result;
use chrono::NaiveDate;
use sunseeker::config::SunseekerConfig;
use sunseeker::models::SearchCriteria;
use sunseeker::{catalog, report, PlacesApiClient, SearchService, SunseekerError, WeatherApiClient};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "sunseeker - weather-aware travel destination finder

USAGE:
    sunseeker search [OPTIONS]     rank catalog destinations by live weather
    sunseeker overview CITY...     weather, forecast and attractions per city

SEARCH OPTIONS:
    --min-temp <N>       minimum average temperature (default 15)
    --max-temp <N>       maximum average temperature (default 30)
    --duration <DAYS>    trip duration, 1-30 (default 7)
    --start-date <DATE>  trip start date (YYYY-MM-DD)
    --sunny              require at least 70% average sunshine
    --beach              require a beach destination
    --culture            require a culture destination
    --nature             require a nature destination
    --details            also print the 5-day detail view per result
";

fn parse_criteria(args: &[String]) -> Result<(SearchCriteria, bool)> {
    let mut criteria = SearchCriteria::default();
    let mut details = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| -> Result<String> {
            iter.next().cloned().ok_or_else(|| {
                SunseekerError::validation(format!("{flag} requires a value")).into()
            })
        };

        match arg.as_str() {
            "--min-temp" => criteria.min_temp = value_for("--min-temp")?.parse()?,
            "--max-temp" => criteria.max_temp = value_for("--max-temp")?.parse()?,
            "--duration" => criteria.duration_days = value_for("--duration")?.parse()?,
            "--start-date" => {
                criteria.start_date =
                    Some(NaiveDate::parse_from_str(&value_for("--start-date")?, "%Y-%m-%d")?);
            }
            "--sunny" => criteria.sunny = true,
            "--beach" => criteria.beach = true,
            "--culture" => criteria.culture = true,
            "--nature" => criteria.nature = true,
            "--details" => details = true,
            other => {
                return Err(
                    SunseekerError::validation(format!("Unknown option: {other}")).into(),
                );
            }
        }
    }

    Ok((criteria, details))
}

fn build_service(config: &SunseekerConfig) -> Result<SearchService> {
    let weather = WeatherApiClient::new(config.weather.clone(), config.search.cors_proxy.clone())?;
    let places = PlacesApiClient::new(config.places.clone(), config.search.cors_proxy.clone())?;
    Ok(SearchService::new(
        weather,
        places,
        catalog::default_catalog(),
        &config.search,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = SunseekerConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("search") => {
            let (criteria, details) = parse_criteria(&args[1..])?;
            let service = build_service(&config)?;

            match service.search(&criteria).await {
                Ok(results) => {
                    print!("{}", report::render_results(&results, &criteria));
                    if details {
                        for scored in &results {
                            print!("{}", report::render_detail(scored));
                        }
                    }
                }
                Err(e) => {
                    if let Some(err) = e.downcast_ref::<SunseekerError>() {
                        eprintln!("{}", err.user_message());
                    } else {
                        eprintln!("Search failed, please try again: {e}");
                    }
                    std::process::exit(1);
                }
            }
        }
        Some("overview") => {
            let cities: Vec<String> = args[1..].to_vec();
            if cities.is_empty() {
                eprintln!("overview requires at least one city name");
                std::process::exit(1);
            }

            let service = build_service(&config)?;
            for overview in service.compare_cities(&cities).await {
                print!("{}", report::render_overview(&overview));
            }
        }
        _ => {
            print!("{USAGE}");
        }
    }

    Ok(())
}

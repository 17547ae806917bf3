//! Command handlers. Each returns an [`AppError`] for `main` to report.

use ventwise_core::{AppError, Config, ConfigError, InputError, UnitSystem, ValidationResult};
use ventwise_humidity::{
    evaluate, Evaluation, HumidityLevel, IndoorConditions, IndoorStore, OutdoorReading,
    WindowAction,
};
use ventwise_weather::{
    precipitation_description, resolve_location, Geocoder, LocationQuery, WeatherProvider,
    WeatherReport,
};

use crate::cli::{AdviseArgs, Cli, Command, ConfigCommand, IndoorCommand, LocationArgs};
use crate::error_mapping::IntoAppError;

pub async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config =
        Config::load_or_default_path(cli.config.as_deref()).map_err(IntoAppError::into_app_error)?;
    if let Some(unit) = cli.unit {
        config.units = unit;
    }

    let validation = config.validate();
    if let Command::Config {
        action: ConfigCommand::Validate,
    } = cli.command
    {
        return validate(&validation);
    }
    if !validation.is_valid() {
        return Err(ConfigError::Invalid(validation.error_summary()).into());
    }
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let store = IndoorStore::new(config.storage_path());

    match cli.command {
        Command::Advise(args) => advise(&config, &store, args).await,
        Command::Weather(args) => weather(&config, &args).await,
        Command::Search { query } => search(&config, &query).await,
        Command::Indoor { action } => indoor(&config, &store, action),
        // `config validate` returned above.
        Command::Config { .. } => {
            let rendered = config.to_toml().map_err(IntoAppError::into_app_error)?;
            println!("{}", rendered);
            Ok(())
        }
    }
}

fn validate(validation: &ValidationResult) -> Result<(), AppError> {
    for warning in &validation.warnings {
        println!("warning: {}", warning);
    }
    for error in &validation.errors {
        println!("error:   {}", error);
    }

    if validation.is_valid() {
        println!("Configuration is valid.");
        Ok(())
    } else {
        Err(ConfigError::Invalid(validation.error_summary()).into())
    }
}

async fn fetch_report(config: &Config, location: &LocationArgs) -> Result<WeatherReport, AppError> {
    let geocoder = Geocoder::new(&config.geocoding).map_err(IntoAppError::into_app_error)?;
    let provider =
        WeatherProvider::new(&config.weather, config.units).map_err(IntoAppError::into_app_error)?;

    let query: LocationQuery = location.query();
    let resolved = resolve_location(&query, &config.location, &geocoder)
        .await
        .map_err(IntoAppError::into_app_error)?;

    provider
        .fetch(&resolved)
        .await
        .map_err(IntoAppError::into_app_error)
}

/// Flag values win field by field; blanks fall back to the saved record.
fn indoor_for(args: &AdviseArgs, saved: IndoorConditions) -> Result<IndoorConditions, AppError> {
    let indoor = IndoorConditions {
        temperature: args.indoor_temp.clone().unwrap_or(saved.temperature),
        humidity: args.indoor_humidity.clone().unwrap_or(saved.humidity),
    };

    if indoor.is_complete() {
        Ok(indoor)
    } else {
        Err(AppError::Input(InputError::MissingIndoor))
    }
}

/// Evaluate, then persist `indoor` when asked. Rejected input is never saved.
fn evaluate_and_save(
    store: &IndoorStore,
    indoor: &IndoorConditions,
    outdoor: &OutdoorReading,
    unit: UnitSystem,
    save: bool,
) -> Result<Evaluation, AppError> {
    let evaluation = evaluate(indoor, outdoor, unit).map_err(IntoAppError::into_app_error)?;
    if save {
        store.save(indoor).map_err(IntoAppError::into_app_error)?;
    }
    Ok(evaluation)
}

async fn advise(config: &Config, store: &IndoorStore, args: AdviseArgs) -> Result<(), AppError> {
    let saved = store.load().map_err(IntoAppError::into_app_error)?;
    let indoor = indoor_for(&args, saved)?;

    let report = fetch_report(config, &args.location).await?;
    let outdoor = OutdoorReading::new(report.current.temperature, report.current.humidity);
    let evaluation = evaluate_and_save(store, &indoor, &outdoor, config.units, args.save)?;

    let symbol = config.units.temperature_symbol();
    println!("Location: {}", report.location.label());
    println!(
        "Indoor:  {}{} / {}% RH  →  {:.2} g/m³",
        indoor.temperature.trim(),
        symbol,
        indoor.humidity.trim(),
        evaluation.indoor_ah
    );
    println!(
        "Outdoor: {}{} / {}% RH  →  {:.2} g/m³",
        report.current.temperature, symbol, report.current.humidity, evaluation.outdoor_ah
    );
    println!();
    println!(
        "{} {}",
        action_marker(evaluation.recommendation.advice.action()),
        evaluation.message()
    );
    println!("Difference (indoor − outdoor): {:+.2} g/m³", evaluation.difference());

    if args.explain {
        println!();
        println!("{}", evaluation.explanation);
    }

    Ok(())
}

fn action_marker(action: WindowAction) -> &'static str {
    match action {
        WindowAction::Open => "[open]",
        WindowAction::NoAction => "[ok]",
        WindowAction::KeepClosed => "[closed]",
    }
}

async fn weather(config: &Config, args: &LocationArgs) -> Result<(), AppError> {
    let report = fetch_report(config, args).await?;
    let current = &report.current;
    let level = HumidityLevel::from_percent(current.humidity);

    println!("Current weather in {}", report.location.label());
    println!("[{}] {}", current.sky.label(), current.condition_description());
    println!("{}", current.sentence(level.label()));
    println!();
    println!("Temperature: {}{}", current.temperature, config.units.temperature_symbol());
    println!("Humidity:    {}% ({})", current.humidity, level);
    println!(
        "Wind:        {} {} from {}",
        current.wind_speed,
        config.units.speed_symbol(),
        current.wind_direction()
    );
    if let Some(chance) = current.precipitation_chance {
        println!("Rain:        {}", precipitation_description(chance));
    }

    if let Some(lowest) = report.lowest_humidity_hour() {
        println!();
        println!(
            "Driest hour today: {:02}:00 at {}% RH",
            lowest.hour, lowest.humidity
        );
    }

    Ok(())
}

async fn search(config: &Config, query: &str) -> Result<(), AppError> {
    let geocoder = Geocoder::new(&config.geocoding).map_err(IntoAppError::into_app_error)?;
    let cities = geocoder.search(query).await;

    if cities.is_empty() {
        println!("No cities found for '{}'.", query);
        return Ok(());
    }

    for city in cities {
        println!("{:<40} {:>9.4} {:>10.4}", city.name, city.latitude, city.longitude);
    }
    Ok(())
}

fn indoor(config: &Config, store: &IndoorStore, action: IndoorCommand) -> Result<(), AppError> {
    match action {
        IndoorCommand::Set {
            temperature,
            humidity,
        } => {
            let conditions = IndoorConditions::new(temperature, humidity);
            // Reject typos up front rather than at the next `advise`.
            conditions
                .parse(config.units)
                .map_err(IntoAppError::into_app_error)?;
            store.save(&conditions).map_err(IntoAppError::into_app_error)?;
            println!("Saved indoor conditions to {}", store.path().display());
        }
        IndoorCommand::Show => {
            let saved = store.load().map_err(IntoAppError::into_app_error)?;
            if saved.is_complete() {
                println!(
                    "Indoor: {}{} / {}% RH",
                    saved.temperature,
                    config.units.temperature_symbol(),
                    saved.humidity
                );
            } else {
                println!("No indoor conditions saved.");
            }
        }
        IndoorCommand::Clear => {
            store.clear().map_err(IntoAppError::into_app_error)?;
            println!("Cleared saved indoor conditions.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(temp: Option<&str>, humidity: Option<&str>) -> AdviseArgs {
        AdviseArgs {
            location: LocationArgs {
                city: None,
                lat: None,
                lon: None,
            },
            indoor_temp: temp.map(str::to_string),
            indoor_humidity: humidity.map(str::to_string),
            save: false,
            explain: false,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> IndoorStore {
        IndoorStore::new(dir.path().join("storage.json"))
    }

    #[test]
    fn test_flags_override_saved_field_by_field() {
        let saved = IndoorConditions::new("21", "45");

        let merged = indoor_for(&args(Some("24"), None), saved.clone()).unwrap();
        assert_eq!(merged, IndoorConditions::new("24", "45"));

        let merged = indoor_for(&args(None, Some("60")), saved.clone()).unwrap();
        assert_eq!(merged, IndoorConditions::new("21", "60"));

        assert_eq!(indoor_for(&args(None, None), saved.clone()).unwrap(), saved);
    }

    #[test]
    fn test_blank_field_is_missing_indoor() {
        let err = indoor_for(&args(Some("22"), None), IndoorConditions::default()).unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::MissingIndoor)));

        let err = indoor_for(&args(Some("22"), Some("  ")), IndoorConditions::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::MissingIndoor)));
    }

    #[test]
    fn test_save_happens_after_successful_evaluation() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let indoor = IndoorConditions::new("24", "64");
        let outdoor = OutdoorReading::new(22.0, 85.0);

        evaluate_and_save(&store, &indoor, &outdoor, UnitSystem::Metric, false).unwrap();
        assert!(!store.path().exists());

        let evaluation =
            evaluate_and_save(&store, &indoor, &outdoor, UnitSystem::Metric, true).unwrap();
        assert_eq!(evaluation.indoor_ah, 13.92);
        assert_eq!(store.load().unwrap(), indoor);
    }

    #[test]
    fn test_rejected_input_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&IndoorConditions::new("20", "50")).unwrap();

        let bad = IndoorConditions::new("warm", "50");
        let err = evaluate_and_save(
            &store,
            &bad,
            &OutdoorReading::new(22.0, 85.0),
            UnitSystem::Metric,
            true,
        )
        .unwrap_err();

        assert!(matches!(err, AppError::Input(InputError::Invalid { .. })));
        assert_eq!(store.load().unwrap(), IndoorConditions::new("20", "50"));
    }
}

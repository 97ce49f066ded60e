use std::collections::HashMap;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use flight_tours::catalog::{
    Catalog, DEFAULT_FLIGHT_DELIMITER, load_airports_from_path, load_flights_from_path,
    load_utc_offsets_from_path,
};
use flight_tours::planner::{Planner, SearchConfig};
use flight_tours::report::{GeoEnricher, ItineraryWriter, OutputFormat};

#[derive(Parser)]
#[command(name = "flight-tours")]
#[command(about = "Enumerate round-trip flight tours that visit a new country on every stop")]
struct Cli {
    /// Flight list (source, destination, local_departure_time, local_arrival_time)
    #[arg(env = "FLIGHT_TOURS_FLIGHTS")]
    flights: PathBuf,

    /// OurAirports-style airport dataset
    #[arg(env = "FLIGHT_TOURS_AIRPORTS")]
    airports: PathBuf,

    /// Number of legs in every tour
    #[arg(long, env = "FLIGHT_TOURS_CHAIN_LENGTH")]
    chain_length: Option<usize>,

    /// Minimum time on the ground between legs, in minutes
    #[arg(long, env = "FLIGHT_TOURS_MIN_STAY_MINS")]
    min_stay_mins: Option<i64>,

    /// Maximum span of a tour, in days from the first departure
    #[arg(long, env = "FLIGHT_TOURS_MAX_TRIP_DAYS")]
    max_trip_days: Option<i64>,

    /// Stop after this many tours
    #[arg(long, env = "FLIGHT_TOURS_LIMIT", conflicts_with = "unlimited")]
    limit: Option<usize>,

    /// Report every tour
    #[arg(long, env = "FLIGHT_TOURS_UNLIMITED")]
    unlimited: bool,

    /// Scan every airport from its first flight on each visit
    #[arg(long, env = "FLIGHT_TOURS_NO_RESUME_CURSOR")]
    no_resume_cursor: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines, env = "FLIGHT_TOURS_FORMAT")]
    format: OutputFormat,

    /// Append UTC times, durations and distances to every leg
    #[arg(long, env = "FLIGHT_TOURS_ENRICH")]
    enrich: bool,

    /// UTC offsets per airport (iata_code, utc_offset_minutes)
    #[arg(long, env = "FLIGHT_TOURS_TIMEZONES", requires = "enrich")]
    timezones: Option<PathBuf>,

    /// Field delimiter of the flight list
    #[arg(long, default_value_t = DEFAULT_FLIGHT_DELIMITER as char, env = "FLIGHT_TOURS_DELIMITER")]
    delimiter: char,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig::default();
        if let Some(chain_length) = self.chain_length {
            config.chain_length = chain_length;
        }
        if let Some(min_stay_mins) = self.min_stay_mins {
            config.min_stay_mins = min_stay_mins;
        }
        if let Some(max_trip_days) = self.max_trip_days {
            config.max_trip_days = max_trip_days;
        }
        if self.unlimited {
            config.output_cap = None;
        } else if let Some(limit) = self.limit {
            config.output_cap = Some(limit);
        }
        config.resume_cursor = !self.no_resume_cursor;
        config
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flight_tours=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.search_config();
    config.validate().context("invalid search options")?;

    let delimiter = u8::try_from(cli.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("delimiter {:?} is not a single ASCII character", cli.delimiter))?;

    let table = load_airports_from_path(&cli.airports)
        .with_context(|| format!("loading airports from {}", cli.airports.display()))?;
    info!(airports = table.len(), "Loaded airport table");

    let loaded = load_flights_from_path(&cli.flights, &table, delimiter)
        .with_context(|| format!("loading flights from {}", cli.flights.display()))?;
    if !loaded.missing.is_empty() {
        let codes: Vec<&str> = loaded.missing.iter().map(String::as_str).collect();
        warn!(
            count = codes.len(),
            codes = %codes.join(","),
            "Dropped flights with unresolved airports"
        );
    }

    let catalog = Catalog::from_records(loaded.records);
    info!(
        flights = catalog.len(),
        airports = catalog.airport_count(),
        "Built catalog"
    );

    let enricher = if cli.enrich {
        let offsets = match &cli.timezones {
            Some(path) => load_utc_offsets_from_path(path)
                .with_context(|| format!("loading UTC offsets from {}", path.display()))?,
            None => HashMap::new(),
        };
        Some(GeoEnricher::new(&table, &offsets))
    } else {
        None
    };

    let stdout = io::stdout();
    let mut writer = ItineraryWriter::new(BufWriter::new(stdout.lock()), cli.format);
    if let Some(enricher) = &enricher {
        writer = writer.with_enricher(enricher);
    }

    let outcome = Planner::new(&catalog, &config)
        .run(writer)
        .context("search failed")?;
    outcome.output.into_inner().context("flushing output")?;
    Ok(())
}

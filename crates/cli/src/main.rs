//! # waterwise
//!
//! Command-line interface for the water consumption estimator.

mod repl;

use clap::{Parser, Subcommand};
use consumption_facade::{Mode, PredictionStore, Reading, SessionConfig, SessionController};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repl::Outcome;

pub(crate) type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "waterwise")]
#[command(about = "Water consumption estimator", long_about = None)]
struct Cli {
    /// Session configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict consumption for a single reading
    Predict {
        /// Temperature in °C
        #[arg(short, long, default_value = "25", allow_negative_numbers = true)]
        temperature: f64,

        /// Rainfall in mm
        #[arg(short, long, default_value = "100")]
        rainfall: f64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session on stdin
    Session {
        /// Activate the premium entitlement
        #[arg(long)]
        premium: bool,

        /// Start in automatic mode (implies --premium)
        #[arg(long)]
        auto: bool,
    },

    /// Feed a CSV of readings through a session and export the log
    Replay {
        /// Input CSV with temperature and rainfall columns
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat each row as an input change in automatic mode; rows equal to
        /// the current reading (initially 25 °C, 100 mm) are skipped
        #[arg(long)]
        auto: bool,
    },
}

/// Install the tracing subscriber; logs go to stderr so stdout stays clean.
fn init_tracing() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waterwise=info,consumption_core=warn".into()),
        )
        .init();
}

/// Load the session configuration, or defaults when no file is given
fn load_config(path: Option<&PathBuf>) -> CliResult<SessionConfig> {
    match path {
        Some(path) => SessionConfig::from_path(path).map_err(|e| e.to_string()),
        None => Ok(SessionConfig::default()),
    }
}

/// Build a session, optionally forcing premium and automatic mode
fn start_session(
    mut config: SessionConfig,
    premium: bool,
    auto: bool,
) -> CliResult<SessionController> {
    if premium || auto {
        config.premium = true;
    }
    if auto {
        config.mode = Mode::Automatic;
    }
    let session = config.build_session().map_err(|e| e.to_string())?;
    tracing::info!(
        mode = %session.mode(),
        fitted = session.model().is_fitted(),
        "session started"
    );
    Ok(session)
}

/// Load readings from a CSV file.
///
/// Columns are located by header name (`temperature`, `rainfall`, case
/// insensitive); without matching headers the first two columns are used.
fn load_readings(path: &PathBuf) -> CliResult<Vec<Reading>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().to_lowercase().starts_with(name))
    };
    let (t_idx, r_idx) = match (find("temperature"), find("rainfall")) {
        (Some(t), Some(r)) => (t, r),
        _ => (0, 1),
    };

    let mut readings = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("Failed to read record: {}", e))?;
        let field = |idx: usize, name: &str| -> CliResult<f64> {
            record
                .get(idx)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .ok_or_else(|| format!("Row {}: missing or invalid {}", line + 1, name))
        };
        readings.push(Reading::new(
            field(t_idx, "temperature")?,
            field(r_idx, "rainfall")?,
        ));
    }

    if readings.is_empty() {
        return Err("No readings found in input".to_string());
    }

    Ok(readings)
}

/// Run predict command
fn run_predict(
    config: SessionConfig,
    temperature: f64,
    rainfall: f64,
    json: bool,
) -> CliResult<()> {
    let mut session = start_session(config, false, false)?;
    let record = session
        .predict(temperature, rainfall)
        .map_err(|e| e.to_string())?;
    let advisory = session.advisory(temperature, rainfall);
    let score = session.efficiency_score(record.predicted);

    if json {
        let value = serde_json::json!({
            "temperature": record.temperature,
            "rainfall": record.rainfall,
            "predicted": record.predicted,
            "efficiency_score": score,
            "advisory": advisory,
            "advice": advisory.message(),
        });
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", text);
    } else {
        println!("Predicted: {:.2} liters", record.predicted);
        println!("Efficiency score: {:.1} / 100", score);
        println!("{}: {}", advisory, advisory.message());
    }

    Ok(())
}

/// Run interactive session command
fn run_session(config: SessionConfig, premium: bool, auto: bool) -> CliResult<()> {
    let mut session = start_session(config, premium, auto)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Water consumption session ({} mode)", session.mode());
    loop {
        if session.show_intro() {
            println!("{}", repl::INTRO);
        }
        print!("> ");
        stdout.flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read input: {}", e))?;
        if read == 0 {
            break;
        }

        let outcome = repl::parse_command(&line).and_then(|command| match command {
            Some(command) => repl::execute(&mut session, command),
            None => Ok(Outcome::Continue(String::new())),
        });

        match outcome {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue(text)) if !text.is_empty() => println!("{}", text),
            Ok(Outcome::Continue(_)) => {}
            Err(e) => println!("Error: {}", e),
        }
    }

    tracing::info!(predictions = session.log().len(), "session ended");
    Ok(())
}

/// Feed readings through the session and return how many were skipped.
///
/// In manual mode every row is predicted. In automatic mode a row equal to
/// the current reading is not a change and logs nothing.
fn replay_readings(session: &mut SessionController, readings: &[Reading]) -> CliResult<usize> {
    let mut skipped = 0;
    for reading in readings {
        if session.mode() == Mode::Automatic {
            let record = session
                .update_reading(reading.temperature, reading.rainfall)
                .map_err(|e| e.to_string())?;
            if record.is_none() {
                skipped += 1;
            }
        } else {
            session
                .predict(reading.temperature, reading.rainfall)
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(skipped)
}

/// Run replay command
fn run_replay(
    config: SessionConfig,
    input: PathBuf,
    output: Option<PathBuf>,
    auto: bool,
) -> CliResult<()> {
    let readings = load_readings(&input)?;
    let mut session = start_session(config, auto, auto)?;
    let skipped = replay_readings(&mut session, &readings)?;
    if skipped > 0 {
        tracing::info!(skipped, "unchanged readings produced no prediction");
    }

    let csv = session.export_csv().map_err(|e| e.to_string())?;
    match output {
        Some(path) => {
            std::fs::write(&path, csv).map_err(|e| format!("Failed to write output: {}", e))?;
            println!(
                "Replayed {} readings ({} unchanged, skipped), {} predictions written to {:?}",
                readings.len(),
                skipped,
                session.log().len(),
                path
            );
            if let Some(summary) = session.summary() {
                println!(
                    "Total: {:.2} liters, average temperature {:.2} °C, average rainfall {:.2} mm",
                    summary.total_predicted, summary.average_temperature, summary.average_rainfall
                );
            }
        }
        None => print!("{}", csv),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Commands::Predict {
            temperature,
            rainfall,
            json,
        } => run_predict(config, temperature, rainfall, json),

        Commands::Session { premium, auto } => run_session(config, premium, auto),

        Commands::Replay {
            input,
            output,
            auto,
        } => run_replay(config, input, output, auto),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

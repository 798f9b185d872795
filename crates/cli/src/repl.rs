//! Line-based interactive session.
//!
//! Each input line is one command. Commands map one-to-one onto
//! [`SessionController`] operations; output is returned as text so the loop
//! in `main` only has to print it.

use consumption_facade::{Mode, PredictionRecord, PredictionStore, SessionController};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::CliResult;

pub const HELP: &str = "\
Commands:
  predict T R     predict for temperature T (°C) and rainfall R (mm) and log it
  set T R         change the current reading (logged right away in auto mode)
  trigger         predict for the current reading
  mode manual|auto
  premium on|off  toggle the premium entitlement
  history         show the log, sorted by temperature
  summary         totals and averages over the log
  trend           change between the last two predictions
  score [VALUE]   efficiency score of VALUE or of the latest prediction
  advice T R      conservation advice for a reading
  clear           empty the log
  export [PATH]   write the log as CSV to PATH or print it
  help            show this help
  quit            leave the session";

pub const INTRO: &str = "\
Estimate daily water consumption from temperature and rainfall.
Type `predict 25 100` to get started or `help` for all commands.";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Predict(f64, f64),
    Set(f64, f64),
    Trigger,
    Mode(Mode),
    Premium(bool),
    History,
    Summary,
    Trend,
    Score(Option<f64>),
    Advice(f64, f64),
    Clear,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> CliResult<Option<Command>> {
    let mut parts = line.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match keyword.to_lowercase().as_str() {
        "predict" | "p" => {
            let (t, r) = reading_args(&args)?;
            Command::Predict(t, r)
        }
        "set" => {
            let (t, r) = reading_args(&args)?;
            Command::Set(t, r)
        }
        "trigger" => Command::Trigger,
        "mode" => match args.first().copied() {
            Some("manual") => Command::Mode(Mode::Manual),
            Some("auto") | Some("automatic") => Command::Mode(Mode::Automatic),
            _ => return Err("usage: mode manual|auto".to_string()),
        },
        "premium" => match args.first().copied() {
            Some("on") => Command::Premium(true),
            Some("off") => Command::Premium(false),
            _ => return Err("usage: premium on|off".to_string()),
        },
        "history" | "h" => Command::History,
        "summary" => Command::Summary,
        "trend" => Command::Trend,
        "score" => match args.first() {
            Some(value) => Command::Score(Some(number("value", value)?)),
            None => Command::Score(None),
        },
        "advice" => {
            let (t, r) = reading_args(&args)?;
            Command::Advice(t, r)
        }
        "clear" => Command::Clear,
        "export" => Command::Export(args.first().map(PathBuf::from)),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{}', try `help`", other)),
    };

    Ok(Some(command))
}

/// Run a command against the session.
pub fn execute(session: &mut SessionController, command: Command) -> CliResult<Outcome> {
    let mut out = String::new();

    match command {
        Command::Predict(t, r) => {
            let record = session.predict(t, r).map_err(|e| e.to_string())?;
            predicted_line(&mut out, &record);
        }
        Command::Set(t, r) => match session.update_reading(t, r).map_err(|e| e.to_string())? {
            Some(record) => predicted_line(&mut out, &record),
            None => {
                let _ = write!(out, "Reading set to {} °C, {} mm", t, r);
            }
        },
        Command::Trigger => {
            let record = session.trigger().map_err(|e| e.to_string())?;
            predicted_line(&mut out, &record);
        }
        Command::Mode(mode) => {
            session.set_mode(mode).map_err(|e| e.to_string())?;
            let _ = write!(out, "Mode: {}", session.mode());
        }
        Command::Premium(active) => {
            session.set_premium(active);
            let _ = write!(
                out,
                "Premium {} (mode: {})",
                if active { "active" } else { "inactive" },
                session.mode()
            );
        }
        Command::History => {
            if session.log().is_empty() {
                out.push_str("No predictions yet");
            } else {
                let _ = writeln!(
                    out,
                    "{:>4}  {:>8}  {:>8}  {:>10}",
                    "#", "Temp °C", "Rain mm", "Liters"
                );
                for record in session.snapshot() {
                    let _ = writeln!(
                        out,
                        "{:>4}  {:>8.1}  {:>8.1}  {:>10.2}",
                        record.sequence, record.temperature, record.rainfall, record.predicted
                    );
                }
                out.truncate(out.trim_end().len());
            }
        }
        Command::Summary => match session.summary() {
            Some(s) => {
                let _ = writeln!(out, "Predictions: {}", s.count);
                let _ = writeln!(out, "Total: {:.2} liters", s.total_predicted);
                let _ = writeln!(out, "Average temperature: {:.2} °C", s.average_temperature);
                let _ = write!(out, "Average rainfall: {:.2} mm", s.average_rainfall);
            }
            None => out.push_str("No predictions yet"),
        },
        Command::Trend => match session.trend_delta() {
            Some(delta) if delta > 0.0 => {
                let _ = write!(out, "Usage down by {:.2} liters", delta);
            }
            Some(delta) if delta < 0.0 => {
                let _ = write!(out, "Usage up by {:.2} liters", -delta);
            }
            Some(_) => out.push_str("Usage unchanged"),
            None => out.push_str("Need at least two predictions"),
        },
        Command::Score(value) => {
            let score = match value {
                Some(v) => Some(session.efficiency_score(v)),
                None => session.latest_efficiency_score(),
            };
            match score {
                Some(score) => {
                    let _ = write!(out, "Efficiency score: {:.1} / 100", score);
                }
                None => out.push_str("No predictions yet"),
            }
        }
        Command::Advice(t, r) => {
            let advisory = session.advisory(t, r);
            let _ = write!(out, "{}: {}", advisory, advisory.message());
        }
        Command::Clear => {
            session.clear();
            out.push_str("Log cleared");
        }
        Command::Export(path) => {
            let csv = session.export_csv().map_err(|e| e.to_string())?;
            match path {
                Some(path) => {
                    std::fs::write(&path, csv)
                        .map_err(|e| format!("Failed to write {:?}: {}", path, e))?;
                    let _ = write!(out, "Exported {} rows to {:?}", session.log().len(), path);
                }
                None => out.push_str(csv.trim_end()),
            }
        }
        Command::Help => out.push_str(HELP),
        Command::Quit => return Ok(Outcome::Quit),
    }

    Ok(Outcome::Continue(out))
}

fn predicted_line(out: &mut String, record: &PredictionRecord) {
    let _ = write!(out, "Predicted: {:.2} liters (#{})", record.predicted, record.sequence);
}

fn reading_args(args: &[&str]) -> CliResult<(f64, f64)> {
    match args {
        [t, r] => Ok((number("temperature", t)?, number("rainfall", r)?)),
        _ => Err("expected two numbers: TEMPERATURE RAINFALL".to_string()),
    }
}

fn number(name: &str, raw: &str) -> CliResult<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("invalid {} '{}'", name, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consumption_facade::EstimatorModel;

    fn session() -> SessionController {
        SessionController::new(EstimatorModel::baseline())
    }

    fn run(session: &mut SessionController, line: &str) -> String {
        let command = parse_command(line).unwrap().unwrap();
        match execute(session, command).unwrap() {
            Outcome::Continue(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(
            parse_command("predict 25 100").unwrap(),
            Some(Command::Predict(25.0, 100.0))
        );
        assert_eq!(
            parse_command("MODE auto").unwrap(),
            Some(Command::Mode(Mode::Automatic))
        );
        assert_eq!(parse_command("score").unwrap(), Some(Command::Score(None)));
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("predict 25").is_err());
        assert!(parse_command("predict hot 10").is_err());
        assert!(parse_command("predict NaN 10").is_err());
        assert!(parse_command("score inf").is_err());
        assert!(parse_command("premium maybe").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_predict_and_history() {
        let mut s = session();
        assert_eq!(run(&mut s, "predict 25 100"), "Predicted: 130.00 liters (#1)");
        run(&mut s, "predict 10 0");

        let history = run(&mut s, "history");
        let lines: Vec<&str> = history.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_start().starts_with('2'));
    }

    #[test]
    fn test_trend_messages() {
        let mut s = session();
        assert_eq!(run(&mut s, "trend"), "Need at least two predictions");
        run(&mut s, "predict 30 0");
        run(&mut s, "predict 20 0");
        assert_eq!(run(&mut s, "trend"), "Usage down by 20.00 liters");
    }

    #[test]
    fn test_auto_mode_needs_premium() {
        let mut s = session();
        let command = parse_command("mode auto").unwrap().unwrap();
        assert!(execute(&mut s, command).is_err());

        run(&mut s, "premium on");
        assert_eq!(run(&mut s, "mode auto"), "Mode: automatic");
        assert!(run(&mut s, "set 26 100").starts_with("Predicted"));
    }

    #[test]
    fn test_score_and_advice() {
        let mut s = session();
        assert_eq!(run(&mut s, "score"), "No predictions yet");
        assert_eq!(run(&mut s, "score 150"), "Efficiency score: 50.0 / 100");
        assert!(run(&mut s, "advice 40 30").starts_with("LOW_RAINFALL"));
    }

    #[test]
    fn test_export_to_stdout() {
        let mut s = session();
        run(&mut s, "predict 25 100");
        let csv = run(&mut s, "export");
        assert_eq!(csv.lines().nth(1), Some("25,100,130.00"));
    }

    #[test]
    fn test_quit() {
        let mut s = session();
        assert_eq!(execute(&mut s, Command::Quit).unwrap(), Outcome::Quit);
    }
}

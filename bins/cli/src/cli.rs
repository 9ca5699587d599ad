//! Command-line interface for subpool.

use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use subpool_core::charge::ChargeService;
use subpool_core::split::{SplitError, calculate_split};
use subpool_shared::types::{Currency, Money};
use subpool_shared::{AppConfig, AppError};
use tracing::debug;

use crate::error::{map_charge_error, map_json_error, map_split_error};
use crate::request::{ChargeRequest, SplitDefaults, SplitRequest};

/// Subpool - split shared subscription costs among pool members.
#[derive(Parser)]
#[command(name = "subpool")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview how a total splits among members.
    Preview {
        /// Split request document (`-` reads stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Currency used to format amounts (default: from the document or config)
        #[arg(short, long)]
        currency: Option<Currency>,

        /// Print the allocations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a charge and split it across the subscription's pools.
    Charge {
        /// Charge request document (`-` reads stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },
}

/// Run a parsed command and return what should be printed on stdout.
pub fn run(cli: Cli, config: &AppConfig) -> Result<String, AppError> {
    let defaults = split_defaults(config)?;

    match cli.command {
        Commands::Preview {
            input,
            currency,
            json,
        } => {
            let doc = read_input(&input)?;
            preview_command(&doc, currency, json, defaults, config.default_currency)
        }
        Commands::Charge { input } => {
            let doc = read_input(&input)?;
            charge_command(&doc, defaults)
        }
    }
}

fn split_defaults(config: &AppConfig) -> Result<SplitDefaults, AppError> {
    let to_config = |e: SplitError| AppError::Config(map_split_error(&e).to_string());
    Ok(SplitDefaults {
        rounding_mode: config.split.rounding_mode.parse().map_err(to_config)?,
        remainder_to: config.split.remainder_to.parse().map_err(to_config)?,
    })
}

fn read_input(path: &Path) -> Result<String, AppError> {
    let mut buf = String::new();
    if path == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AppError::Validation(format!("cannot read stdin: {e}")))?;
    } else {
        buf = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
            _ => AppError::Validation(format!("cannot read {}: {e}", path.display())),
        })?;
    }
    debug!(bytes = buf.len(), "Read input document");
    Ok(buf)
}

/// Execute the preview command on a JSON document.
fn preview_command(
    doc: &str,
    currency: Option<Currency>,
    json: bool,
    defaults: SplitDefaults,
    default_currency: Currency,
) -> Result<String, AppError> {
    let request: SplitRequest = serde_json::from_str(doc).map_err(|e| map_json_error(&e))?;
    let currency = currency.or(request.currency).unwrap_or(default_currency);
    let total = request.total.minor_units(currency)?;
    let options = request.options(defaults);
    let results = calculate_split(&request.members, total, request.policy, options);

    if json {
        return serde_json::to_string_pretty(&results)
            .map_err(|e| AppError::Internal(e.to_string()));
    }

    let width = results
        .iter()
        .map(|r| r.display_name.chars().count())
        .chain(std::iter::once("total".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let mut total = 0_i64;
    for r in &results {
        total = total.saturating_add(r.amount);
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            r.display_name,
            Money::new(r.amount, currency).format()
        );
    }
    let _ = write!(
        out,
        "{:<width$}  {}",
        "total",
        Money::new(total, currency).format()
    );
    Ok(out)
}

/// Execute the charge command on a JSON document.
fn charge_command(doc: &str, defaults: SplitDefaults) -> Result<String, AppError> {
    let request: ChargeRequest = serde_json::from_str(doc).map_err(|e| map_json_error(&e))?;
    let pools = request.pools(defaults)?;
    let batch = ChargeService::create_charge(&request.subscription, request.charge_date, &pools)
        .map_err(|e| map_charge_error(&e))?;

    serde_json::to_string_pretty(&batch).map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use subpool_core::split::{RemainderTo, RoundingMode};

    const PREVIEW: &str = r#"{
        "members": [
            {"id": "a", "display_name": "Ann"},
            {"id": "b", "display_name": "Bo"},
            {"id": "c", "display_name": "Cy"}
        ],
        "total": 100,
        "policy": "equal",
        "currency": "USD"
    }"#;

    const CHARGE: &str = r#"{
        "subscription": {
            "id": "0190a6c4-2f6e-7a3c-9d3b-3a1f4e5d6c7b",
            "name": "Family plan",
            "amount": 1999,
            "currency": "EUR"
        },
        "charge_date": "2026-10-01",
        "pools": [{
            "title": "Household",
            "split_policy": "seat",
            "seat_total": 4,
            "members": [
                {"display_name": "Ann", "value": 1},
                {"display_name": "Bo", "value": 1}
            ]
        }]
    }"#;

    fn minor_owner() -> SplitDefaults {
        SplitDefaults::default()
    }

    #[test]
    fn test_preview_table() {
        let out = preview_command(PREVIEW, None, false, minor_owner(), Currency::Cny).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Ann    $0.34");
        assert_eq!(lines[1], "Bo     $0.33");
        assert_eq!(lines[3], "total  $1.00");
    }

    #[test]
    fn test_preview_currency_flag_wins() {
        let out =
            preview_command(PREVIEW, Some(Currency::Jpy), false, minor_owner(), Currency::Cny)
                .unwrap();
        assert!(out.ends_with("¥100"));
    }

    #[test]
    fn test_preview_json_uses_config_defaults() {
        let defaults = SplitDefaults {
            rounding_mode: RoundingMode::Floor,
            remainder_to: RemainderTo::Last,
        };
        let out = preview_command(PREVIEW, None, true, defaults, Currency::Cny).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let amounts: Vec<i64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["amount"].as_i64().unwrap())
            .collect();

        assert_eq!(amounts, vec![33, 33, 34]);
    }

    #[test]
    fn test_preview_bare_seat_total_keeps_configured_rounding() {
        let doc = PREVIEW
            .replace(r#""total": 100"#, r#""total": 101"#)
            .replace(r#""currency": "USD""#, r#""currency": "USD", "options": 5"#);
        let defaults = SplitDefaults {
            rounding_mode: RoundingMode::Floor,
            remainder_to: RemainderTo::Owner,
        };
        let out = preview_command(&doc, None, true, defaults, Currency::Cny).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let amounts: Vec<i64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["amount"].as_i64().unwrap())
            .collect();

        assert_eq!(amounts, vec![35, 33, 33]);
    }

    #[test]
    fn test_preview_major_total_uses_resolved_currency() {
        let doc = PREVIEW.replace(r#""total": 100"#, r#""total": {"major": "1.00"}"#);
        let out = preview_command(&doc, None, false, minor_owner(), Currency::Cny).unwrap();
        assert!(out.ends_with("total  $1.00"));

        let out =
            preview_command(&doc, Some(Currency::Jpy), false, minor_owner(), Currency::Cny)
                .unwrap();
        assert!(out.ends_with("total  ¥1"));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"members": [], "total": 1}"#)]
    #[case(r#"{"members": [], "total": 1, "policy": "percent"}"#)]
    fn test_preview_rejects_bad_documents(#[case] doc: &str) {
        let err = preview_command(doc, None, false, minor_owner(), Currency::Cny).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_charge_outputs_batch() {
        let out = charge_command(CHARGE, minor_owner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["charge"]["amount"], 1999);
        assert_eq!(value["charge"]["status"], "pending");
        let lines = value["periods"][0]["lines"].as_array().unwrap();
        let due: Vec<i64> = lines
            .iter()
            .map(|l| l["amount_due"].as_i64().unwrap())
            .collect();
        assert_eq!(due.iter().sum::<i64>(), 1999);
        assert_eq!(value["periods"][0]["period_key"], "2026-10");
    }

    #[test]
    fn test_charge_archived_subscription() {
        let doc = CHARGE.replace(r#""currency": "EUR""#, r#""currency": "EUR", "archived": true"#);
        let err = charge_command(&doc, minor_owner()).unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[rstest]
    #[case("sideways", "owner")]
    #[case("minor", "middle")]
    fn test_bad_config_defaults(#[case] rounding: &str, #[case] remainder: &str) {
        let mut config = AppConfig::default();
        config.split.rounding_mode = rounding.to_string();
        config.split.remainder_to = remainder.to_string();

        let err = split_defaults(&config).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_missing_input_file() {
        let err = read_input(Path::new("/nonexistent/subpool.json")).unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}

//! CLI command implementations
//!
//! Every command follows the same sequence: load config, read one JSON
//! document, resolve its shape once, run the entity operation, write one
//! envelope. Validation violations are output, not CLI errors.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{json, Value};

use crate::entities::{FundingLoan, FundingTicker, LedgerEntry, PublicTrade, TradingTicker};
use crate::model::{
    normalize, serialize, serialize_all, Model, ModelInput, Normalized, ValidationError,
};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::args::{Cli, Command, EntityKind};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response};

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    /// `validate` ran and the input was rejected
    Rejected,
}

/// Parse arguments and run the command against stdout
pub fn run() -> CliResult<CommandOutcome> {
    let cli = Cli::parse_args();
    run_command(&cli.command)
}

/// Run a command, writing its envelope to stdout
pub fn run_command(command: &Command) -> CliResult<CommandOutcome> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match execute(command, &mut out) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            // A failed envelope write does not replace `e`
            let _ = write_error(&mut out, e.code_str(), e.message());
            Err(e)
        }
    }
}

/// Run a command, writing its envelope to `out`
pub fn execute<W: Write>(command: &Command, out: &mut W) -> CliResult<CommandOutcome> {
    let args = command.args();

    let config = Config::load_or_default(args.config.as_deref())?;
    Logger::set_min_severity(config.severity());
    log_event_with_fields(Event::ConfigLoaded, &[("log_level", &config.log_level)]);

    let entity = args.entity.entity_name();
    log_event_with_fields(
        Event::CommandBegin,
        &[("command", command.name()), ("entity", entity)],
    );

    let document = read_input(args.input.as_deref())?;
    let input = ModelInput::from_json(&document, entity);
    if input.len() > config.max_batch_items {
        return Err(CliError::invalid_input(format!(
            "Batch of {} items exceeds max_batch_items ({})",
            input.len(),
            config.max_batch_items
        )));
    }

    let (data, outcome) = dispatch(command, args.entity, &input)?;
    write_response(out, data, config.pretty_output)?;

    log_event_with_fields(
        Event::CommandComplete,
        &[("command", command.name()), ("entity", entity)],
    );

    Ok(outcome)
}

fn dispatch(
    command: &Command,
    entity: EntityKind,
    input: &ModelInput,
) -> CliResult<(Value, CommandOutcome)> {
    match entity {
        EntityKind::LedgerEntry => apply::<LedgerEntry>(command, input),
        EntityKind::TradingTicker => apply::<TradingTicker>(command, input),
        EntityKind::FundingTicker => apply::<FundingTicker>(command, input),
        EntityKind::FundingLoan => apply::<FundingLoan>(command, input),
        EntityKind::PublicTrade => apply::<PublicTrade>(command, input),
    }
}

fn apply<M: Model + Serialize>(
    command: &Command,
    input: &ModelInput,
) -> CliResult<(Value, CommandOutcome)> {
    let data = match command {
        Command::Construct(_) => M::construct(input).to_json()?,
        Command::Unserialize(_) => M::unserialize(input).to_json()?,
        Command::Serialize(_) => match normalize(M::fields(), input) {
            Normalized::One(record) => json!(serialize(M::fields(), &record)),
            Normalized::Many(records) => json!(serialize_all(M::fields(), &records)),
        },
        Command::Validate(_) => {
            return Ok(match M::validate(input) {
                Ok(()) => (json!({ "valid": true }), CommandOutcome::Completed),
                Err(err) => (validation_report(&err), CommandOutcome::Rejected),
            });
        }
    };

    Ok((data, CommandOutcome::Completed))
}

/// Output form of a validation failure
pub fn validation_report(err: &ValidationError) -> Value {
    json!({
        "valid": false,
        "code": err.code(),
        "entity": err.entity(),
        "field": err.field(),
        "index": err.index(),
        "message": err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::TransformArgs;
    use crate::model::Violation;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn input_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("input.json");
        fs::write(&path, content).unwrap();
        path
    }

    fn args(entity: EntityKind, input: PathBuf) -> TransformArgs {
        TransformArgs {
            entity,
            input: Some(input),
            config: None,
        }
    }

    fn run(command: Command) -> (CliResult<CommandOutcome>, Value) {
        let mut out = Vec::new();
        let result = execute(&command, &mut out);
        let envelope = if out.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&out).unwrap()
        };
        (result, envelope)
    }

    #[test]
    fn test_construct_ledger_entry() {
        let dir = TempDir::new().unwrap();
        let path = input_file(&dir, r#"[1,"USD",null,1000,null,50.5,200.0,null,"Transfer from wallet margin"]"#);

        let (result, envelope) = run(Command::Construct(args(EntityKind::LedgerEntry, path)));
        assert_eq!(result.unwrap(), CommandOutcome::Completed);
        assert_eq!(envelope["status"], "ok");
        assert_eq!(envelope["data"]["wallet"], "margin");
        assert_eq!(envelope["data"]["balance"], json!(200.0));
    }

    #[test]
    fn test_serialize_batch_of_objects() {
        let dir = TempDir::new().unwrap();
        let path = input_file(&dir, r#"[{"id":1,"mts":5,"amount":-1,"price":2},{"id":2}]"#);

        let (_, envelope) = run(Command::Serialize(args(EntityKind::PublicTrade, path)));
        assert_eq!(
            envelope["data"],
            json!([[1, 5, -1, 2], [2, null, null, null]])
        );
    }

    #[test]
    fn test_validate_reports_violation_as_output() {
        let dir = TempDir::new().unwrap();
        let path = input_file(&dir, r#"{"symbol":"tBTCUSD","bid":-1}"#);

        let (result, envelope) = run(Command::Validate(args(EntityKind::TradingTicker, path)));
        assert_eq!(result.unwrap(), CommandOutcome::Rejected);
        assert_eq!(envelope["status"], "ok");
        assert_eq!(envelope["data"]["valid"], false);
        assert_eq!(envelope["data"]["field"], "bid");
        assert_eq!(envelope["data"]["index"], 0);
    }

    #[test]
    fn test_batch_limit_from_config() {
        let dir = TempDir::new().unwrap();
        let input = input_file(&dir, "[[1],[2],[3]]");
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{"max_batch_items": 2}"#).unwrap();

        let command = Command::Unserialize(TransformArgs {
            entity: EntityKind::PublicTrade,
            input: Some(input),
            config: Some(config),
        });

        let (result, _) = run(command);
        assert_eq!(result.unwrap_err().code_str(), "CLI_INVALID_INPUT");
    }

    #[test]
    fn test_validation_report_for_empty_input() {
        let report = validation_report(&ValidationError::EmptyInput { entity: "public_trade" });
        assert_eq!(report["code"], "MODEL_EMPTY_INPUT");
        assert_eq!(report["field"], Value::Null);
        assert_eq!(report["index"], Value::Null);
    }

    #[test]
    fn test_validation_report_for_field_violation() {
        let report = validation_report(&ValidationError::FieldViolation {
            entity: "funding_loan",
            field: "side",
            index: 4,
            details: Violation::new("side of 1, 0 or -1", "2"),
        });
        assert_eq!(report["index"], 4);
        assert!(report["message"].as_str().unwrap().contains("side"));
    }
}

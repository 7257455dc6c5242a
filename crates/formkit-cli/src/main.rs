//! `formkit` binary: manage a schema store from the command line.
//!
//! The store is one JSON document (default `formkit.json`, override with
//! `--store`). Field-list files given to `check` and `save` hold a JSON
//! array of field definitions, the same shape the store itself uses.

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use formkit_engine::{
    render_form, validate_schema, Control, PreviewSession, SchemaBuilder, SubmitOutcome,
};
use formkit_expr::Value;
use formkit_schema::{FieldDefinition, FieldId, FormSchema, SchemaId};
use formkit_store::{FileRepository, SchemaRepository};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("formkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Form schema builder and previewer")
        .arg_required_else_help(true)
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .default_value("formkit.json")
                .value_parser(value_parser!(PathBuf))
                .help("Path of the schema store file"),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a field-list file without saving it")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file holding an array of field definitions"),
                ),
        )
        .subcommand(
            Command::new("save")
                .about("Validate a field-list file and save it as a named schema")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file holding an array of field definitions"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .required(true)
                        .help("Name for the saved schema"),
                ),
        )
        .subcommand(Command::new("list").about("List saved schemas, oldest first"))
        .subcommand(
            Command::new("show")
                .about("Print a saved schema as JSON")
                .arg(Arg::new("id").long("id").required(true).help("Schema id")),
        )
        .subcommand(
            Command::new("delete")
                .about("Remove a saved schema")
                .arg(Arg::new("id").long("id").required(true).help("Schema id")),
        )
        .subcommand(
            Command::new("preview")
                .about("Load a saved schema, apply values, and render it")
                .arg(Arg::new("id").long("id").required(true).help("Schema id"))
                .arg(
                    Arg::new("set")
                        .long("set")
                        .action(ArgAction::Append)
                        .value_name("FIELD=VALUE")
                        .help("Set a field value before rendering (repeatable)"),
                )
                .arg(
                    Arg::new("submit")
                        .long("submit")
                        .action(ArgAction::SetTrue)
                        .help("Run submit-time validation and report the outcome"),
                ),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let store: &PathBuf = matches
        .get_one("store")
        .context("store path has a default")?;
    let mut repo = FileRepository::open(store);

    match matches.subcommand() {
        Some(("check", args)) => {
            let file: &PathBuf = args.get_one("file").context("--file is required")?;
            let fields = read_fields(file)?;
            let schema = FormSchema::new("draft", fields);
            validate_schema(&schema)?;
            println!("ok: {} field(s)", schema.fields.len());
        }
        Some(("save", args)) => {
            let file: &PathBuf = args.get_one("file").context("--file is required")?;
            let name: &String = args.get_one("name").context("--name is required")?;
            let fields = read_fields(file)?;
            let id = SchemaBuilder::from_fields(fields).save(name, &mut repo)?;
            println!("{id}");
        }
        Some(("list", _)) => {
            for summary in repo.list()? {
                println!(
                    "{}  {}  {} field(s)  {}",
                    summary.id,
                    summary.created_at.format("%Y-%m-%d %H:%M:%S"),
                    summary.field_count,
                    summary.name,
                );
            }
        }
        Some(("show", args)) => {
            let id = parse_id(args.get_one::<String>("id"))?;
            let schema = repo
                .load(&id)?
                .with_context(|| format!("schema {id} not found"))?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Some(("delete", args)) => {
            let id = parse_id(args.get_one::<String>("id"))?;
            if repo.delete(&id)? {
                println!("deleted {id}");
            } else {
                bail!("schema {id} not found");
            }
        }
        Some(("preview", args)) => {
            let id = parse_id(args.get_one::<String>("id"))?;
            let mut session = PreviewSession::load(&repo, &id)?;

            if let Some(pairs) = args.get_many::<String>("set") {
                for pair in pairs {
                    let (field, raw) = pair
                        .split_once('=')
                        .with_context(|| format!("expected FIELD=VALUE, got {pair:?}"))?;
                    session.set_value(&FieldId::from(field), parse_value(raw));
                }
            }

            if args.get_flag("submit") {
                match session.submit() {
                    SubmitOutcome::Accepted(values) => {
                        println!("accepted");
                        for (field, value) in &values {
                            println!("  {field} = {value}");
                        }
                    }
                    SubmitOutcome::Rejected(errors) => {
                        eprintln!("rejected");
                        for (field, message) in &errors {
                            eprintln!("  {field}: {message}");
                        }
                        std::process::exit(1);
                    }
                }
            } else {
                print_form(&session);
            }
        }
        _ => unreachable!("arg_required_else_help"),
    }
    Ok(())
}

fn read_fields(path: &std::path::Path) -> Result<Vec<FieldDefinition>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing field list from {}", path.display()))
}

fn parse_id(raw: Option<&String>) -> Result<SchemaId> {
    let raw = raw.context("--id is required")?;
    raw.parse()
        .with_context(|| format!("invalid schema id {raw:?}"))
}

/// Interpret a command-line value: `true`/`false` map to the toggle states,
/// everything else stays text, exactly as typed into a form input. Numeric
/// values only ever arise from derived-field formulas.
fn parse_value(raw: &str) -> Value {
    match raw {
        "" => Value::Empty,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::text(raw),
    }
}

fn print_form(session: &PreviewSession) {
    for field in render_form(session) {
        let marker = if field.required { "*" } else { " " };
        let label = if field.label.is_empty() {
            field.id.to_string()
        } else {
            field.label.clone()
        };
        let control = match &field.control {
            Control::Input(kind) => format!("{kind:?}").to_lowercase(),
            Control::Multiline { .. } => "multiline".to_string(),
            Control::SelectOne { options } => format!("select[{}]", options.join(", ")),
            Control::ChoiceGroup { options } => format!("choice[{}]", options.join(", ")),
            Control::Toggle { checked } => {
                format!("toggle[{}]", if *checked { "x" } else { " " })
            }
        };
        let derived = if field.disabled { " (derived)" } else { "" };
        println!("{marker} {label}: {control} = {:?}{derived}", field.value);
        if let Some(error) = &field.error {
            println!("    ! {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn values_parse_by_shape() {
        assert_eq!(parse_value(""), Value::Empty);
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("hello"), Value::text("hello"));
    }

    #[test]
    fn numeric_looking_input_stays_text() {
        // An entered "0" counts as present for the required check, and
        // length rules still see the characters.
        assert_eq!(parse_value("0"), Value::text("0"));
        assert_eq!(parse_value("12345"), Value::text("12345"));
        assert!(!parse_value("0").is_missing());
    }
}

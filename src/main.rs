//! Purpose: `attrjson` CLI entry point.
//! Role: Binary crate root; reads one tagged document, transforms it, emits plain JSON on stdout.
//! Invariants: Stdout carries only the transformed document.
//! Invariants: Non-interactive errors are emitted as JSON on stderr; logs also go to stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::fs::{self, File};
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use attrjson::api::{
    Error, ErrorKind, TagSelection, TransformOptions, Transformer, to_exit_code,
};
use attrjson::json::parse;
use attrjson::sample::SAMPLE_INPUT;

#[derive(Parser)]
#[command(
    name = "attrjson",
    version,
    about = "Convert type-tagged attribute JSON into plain JSON",
    long_about = None,
    after_help = r#"EXAMPLES
  $ echo '{"a":{"N":"011"},"b":{"BOOL":"t"}}' | attrjson
  $ attrjson item.json --no-wrap --compact
  $ attrjson --sample

Recognized tags: S, N, BOOL, NULL, L, M. Invalid entries are dropped.
Set RUST_LOG=debug (or pass -v) to see why an entry was dropped."#
)]
struct Cli {
    #[arg(
        help = "Input file; reads stdin when omitted or '-'",
        value_hint = ValueHint::FilePath,
        conflicts_with = "sample"
    )]
    input: Option<PathBuf>,
    #[arg(long, help = "Transform the built-in sample document")]
    sample: bool,
    #[arg(
        long,
        help = "JSON options file (max_depth, tag_selection)",
        value_hint = ValueHint::FilePath
    )]
    config: Option<PathBuf>,
    #[arg(long, help = "Maximum aggregate nesting depth")]
    max_depth: Option<usize>,
    #[arg(long, help = "Reject tagged values that carry more than one key")]
    strict_tags: bool,
    #[arg(long, help = "Emit single-line JSON")]
    compact: bool,
    #[arg(long, help = "Emit the bare object instead of a one-element array")]
    no_wrap: bool,
    #[arg(short, long, help = "Log dropped entries to stderr")]
    verbose: bool,
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                return Ok(0);
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `attrjson --help`."));
            }
        },
    };

    init_tracing(cli.verbose);

    let options = load_options(&cli)?;
    debug!(
        max_depth = options.max_depth,
        tag_selection = ?options.tag_selection,
        "resolved options"
    );

    let input = read_input(&cli)?;
    let output = Transformer::new(options).parse_input(&input)?;
    if let Some(fields) = output.as_object() {
        info!(fields = fields.len(), "transformed document");
    }

    let rendered = render(output, cli.compact, !cli.no_wrap)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write output")
            .with_source(err)
    })?;
    Ok(0)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init();
}

fn load_options(cli: &Cli) -> Result<TransformOptions, Error> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|err| io_error(err, path))?;
            parse::from_str::<TransformOptions>(&text, &path.display().to_string())?
        }
        None => TransformOptions::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }
    if cli.strict_tags {
        options = options.with_tag_selection(TagSelection::Strict);
    }
    Ok(options)
}

fn read_input(cli: &Cli) -> Result<Value, Error> {
    if cli.sample {
        return parse::from_str(SAMPLE_INPUT, "sample");
    }
    match cli.input.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path).map_err(|err| io_error(err, path))?;
            parse::from_reader(BufReader::new(file), &path.display().to_string())
        }
        _ => parse::from_reader(io::stdin().lock(), "stdin"),
    }
}

fn render(output: Value, compact: bool, wrap: bool) -> Result<String, Error> {
    let document = if wrap {
        Value::Array(vec![output])
    } else {
        output
    };
    let encoded = if compact {
        serde_json::to_string(&document)
    } else {
        serde_json::to_string_pretty(&document)
    };
    encoded.map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to encode output")
            .with_source(err)
    })
}

fn io_error(err: io::Error, path: &Path) -> Error {
    let kind = if err.kind() == io::ErrorKind::NotFound {
        ErrorKind::Usage
    } else {
        ErrorKind::Io
    };
    Error::new(kind)
        .with_message(format!("failed to read {}", path.display()))
        .with_source(err)
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }
    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"io\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::InvalidData => "invalid data".to_string(),
        ErrorKind::EmptyData => "empty data".to_string(),
        ErrorKind::InvalidType => "invalid data type".to_string(),
        ErrorKind::Parse => "invalid number".to_string(),
        ErrorKind::DepthLimit => "nesting too deep".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = StdError::source(err);
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(err.kind().as_str()));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path));
    }
    if let Some(tag) = err.tag() {
        inner.insert("tag".to_string(), json!(tag));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("path: {path}"));
    }
    for cause in error_causes(err) {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

#[cfg(test)]
mod tests {
    use super::{error_json, render};
    use attrjson::api::{Error, ErrorKind};
    use serde_json::json;

    #[test]
    fn render_wraps_in_single_element_array_by_default() {
        let out = render(json!({"a": 1}), true, true).expect("render");
        assert_eq!(out, r#"[{"a":1}]"#);

        let out = render(json!({"a": 1}), false, false).expect("render");
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn error_json_includes_context_fields() {
        let err = Error::new(ErrorKind::EmptyData)
            .with_message("attribute set has no valid entries")
            .with_path("$");
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "empty-data");
        assert_eq!(value["error"]["path"], "$");
        assert!(value["error"].get("hint").is_none());
    }
}

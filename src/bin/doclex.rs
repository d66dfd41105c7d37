//! Command-line interface for doclex
//! This binary highlights code samples the way the documentation pipeline does, which makes
//! it handy for checking how a fenced block will render.
//!
//! Usage:
//!   doclex highlight `<path>` [--lang `<tag>`] [--format html|json] [--config `<file>`]  - Highlight a file
//!   doclex list                                                                  - List available lexers
//!   doclex table `<tag>` [--config `<file>`]                                       - Dump a lexer's token table as JSON
//!
//! Logging goes to stderr and is controlled by `DOCLEX_LOG` (e.g. `DOCLEX_LOG=doclex=trace`).

use clap::{Arg, ArgAction, Command};
use doclex::config::{DoclexConfig, Loader};
use doclex::highlight::{
    highlight, Formatter, Highlighter, HtmlFormatter, JsonFormatter, LexerRegistry,
};
use std::io::Read;

fn main() {
    setup_tracing();

    let matches = Command::new("doclex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Syntax highlighting for documentation code samples")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("highlight")
                .about("Highlight a file and print the rendered output")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file ('-' reads stdin)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .short('l')
                        .help("Fence tag or MIME type of the lexer (defaults to a lookup by file name)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["html", "json"])
                        .default_value("html"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("nowrap")
                        .long("nowrap")
                        .help("Emit the spans only, without the <div><pre> wrapper")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list").about("List available lexers and their aliases"))
        .subcommand(
            Command::new("table")
                .about("Print the token table of a lexer as JSON")
                .arg(
                    Arg::new("lang")
                        .help("Fence tag of the lexer")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("highlight", highlight_matches)) => {
            let path = highlight_matches
                .get_one::<String>("path")
                .map(String::as_str)
                .unwrap_or("-");
            let options = HighlightArgs {
                lang: highlight_matches.get_one::<String>("lang").cloned(),
                format: highlight_matches
                    .get_one::<String>("format")
                    .cloned()
                    .unwrap_or_else(|| "html".to_string()),
                config: highlight_matches.get_one::<String>("config").cloned(),
                nowrap: highlight_matches.get_flag("nowrap"),
            };
            handle_highlight_command(path, &options)
        }
        Some(("list", _)) => handle_list_command(),
        Some(("table", table_matches)) => {
            let tag = table_matches
                .get_one::<String>("lang")
                .map(String::as_str)
                .unwrap_or_default();
            let config = table_matches.get_one::<String>("config").map(String::as_str);
            handle_table_command(tag, config)
        }
        _ => unreachable!(),
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("DOCLEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

struct HighlightArgs {
    lang: Option<String>,
    format: String,
    config: Option<String>,
    nowrap: bool,
}

fn load_config(path: Option<&str>, nowrap: bool) -> Result<DoclexConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader
        .with_nowrap(nowrap)
        .and_then(Loader::build)
        .map_err(|e| e.to_string())
}

fn read_source(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        Ok(source)
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))
    }
}

/// Handle the highlight command
fn handle_highlight_command(path: &str, args: &HighlightArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref(), args.nowrap)?;
    let registry = config.registry().map_err(|e| e.to_string())?;

    let lexer: &dyn Highlighter = match &args.lang {
        Some(mimetype) if mimetype.contains('/') => registry.for_mimetype(mimetype),
        Some(tag) => registry.get(tag),
        None => registry.for_filename(path),
    }
    .map_err(|e| e.to_string())?;
    tracing::info!(lexer = lexer.info().name, path, "highlighting");

    let html = HtmlFormatter::new(config.html.clone());
    let json = JsonFormatter { pretty: true };
    let formatter: &dyn Formatter = match args.format.as_str() {
        "json" => &json,
        _ => &html,
    };

    let source = read_source(path)?;
    let output =
        highlight(&source, lexer, formatter, &config.lexer).map_err(|e| e.to_string())?;
    print!("{}", output);
    if formatter.name() == "json" {
        println!();
    }
    Ok(())
}

/// Handle the list command
fn handle_list_command() -> Result<(), String> {
    let registry = LexerRegistry::with_defaults();
    println!("Available lexers:");
    for info in registry.list() {
        println!("  {:<16} {}", info.name, info.aliases.join(", "));
    }
    Ok(())
}

/// Handle the table command
fn handle_table_command(tag: &str, config: Option<&str>) -> Result<(), String> {
    let registry = load_config(config, false)?
        .registry()
        .map_err(|e| e.to_string())?;
    let lexer = registry.get(tag).map_err(|e| e.to_string())?;
    let table = lexer
        .token_table()
        .ok_or_else(|| format!("Lexer '{}' is not table driven", lexer.info().name))?;

    let table = serde_json::to_string_pretty(table)
        .map_err(|e| format!("Failed to serialize table: {}", e))?;
    println!("{}", table);
    Ok(())
}

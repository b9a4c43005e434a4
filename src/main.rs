//! Graph Query Options CLI
//!
//! Entry point for the `graph-options` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use graph_query_options::{
    consistency, decode_timeout, encode_str, keys, ClientConfig, ConsistencyCode, CustomPayload,
    QueryOptions, Resolution, ResolvedGraphOptions, RetryPolicy, Setting,
};
use serde_json::{json, Map, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graph-options")]
#[command(about = "Resolve effective graph query options", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the options and payload of one graph query
    Resolve {
        /// Path to client config file
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// Execution profile (default profile when omitted)
        #[arg(long, short = 'p')]
        profile: Option<String>,

        /// Resolve with no per-call options at all
        #[arg(long)]
        defaults_only: bool,

        #[arg(long, conflicts_with = "no_language")]
        language: Option<String>,
        /// Omit graph-language
        #[arg(long)]
        no_language: bool,

        #[arg(long, conflicts_with = "no_source")]
        source: Option<String>,
        /// Omit graph-source
        #[arg(long)]
        no_source: bool,

        #[arg(long, conflicts_with = "no_name")]
        name: Option<String>,
        /// Omit graph-name
        #[arg(long)]
        no_name: bool,

        #[arg(long, conflicts_with = "no_execute_as")]
        execute_as: Option<String>,
        /// Omit the proxy execute identity
        #[arg(long)]
        no_execute_as: bool,

        /// Canonical consistency name, e.g. LOCAL_QUORUM
        #[arg(long, conflicts_with = "no_read_consistency", value_parser = parse_consistency)]
        read_consistency: Option<ConsistencyCode>,
        /// Omit graph-read-consistency
        #[arg(long)]
        no_read_consistency: bool,

        #[arg(long, conflicts_with = "no_write_consistency", value_parser = parse_consistency)]
        write_consistency: Option<ConsistencyCode>,
        /// Omit graph-write-consistency
        #[arg(long)]
        no_write_consistency: bool,

        /// Read timeout in milliseconds
        #[arg(long, conflicts_with = "no_read_timeout", allow_hyphen_values = true)]
        read_timeout_ms: Option<i64>,
        /// Send no request-timeout
        #[arg(long)]
        no_read_timeout: bool,

        /// Extra payload entry (KEY=VALUE, repeatable)
        #[arg(long, value_parser = parse_payload_entry)]
        payload: Vec<(String, String)>,
    },

    /// Show canonical consistency names
    Consistency {
        /// Numeric code to look up (all levels when omitted)
        code: Option<ConsistencyCode>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            config,
            profile,
            defaults_only,
            language,
            no_language,
            source,
            no_source,
            name,
            no_name,
            execute_as,
            no_execute_as,
            read_consistency,
            no_read_consistency,
            write_consistency,
            no_write_consistency,
            read_timeout_ms,
            no_read_timeout,
            payload,
        } => {
            let options = (!defaults_only).then(|| QueryOptions {
                execution_profile: profile,
                graph_language: setting(language, no_language),
                graph_source: setting(source, no_source),
                graph_name: setting(name, no_name),
                execute_as: setting(execute_as, no_execute_as),
                graph_read_consistency: setting(read_consistency, no_read_consistency),
                graph_write_consistency: setting(write_consistency, no_write_consistency),
                read_timeout: setting(read_timeout_ms, no_read_timeout),
                custom_payload: (!payload.is_empty()).then(|| build_payload(payload)),
                retry: None,
            });
            run_resolve(config, options);
        }
        Commands::Consistency { code } => {
            run_consistency(code);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn setting<T>(value: Option<T>, suppress: bool) -> Setting<T> {
    match (value, suppress) {
        (_, true) => Setting::Suppressed,
        (Some(v), false) => Setting::Value(v),
        (None, false) => Setting::Unset,
    }
}

fn build_payload(entries: Vec<(String, String)>) -> CustomPayload {
    entries
        .into_iter()
        .map(|(key, value)| (key, encode_str(&value)))
        .collect()
}

fn parse_consistency(name: &str) -> Result<ConsistencyCode, String> {
    consistency::code_of(name).ok_or_else(|| format!("unknown consistency level '{}'", name))
}

fn parse_payload_entry(entry: &str) -> Result<(String, String), String> {
    match entry.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", entry)),
    }
}

fn run_resolve(config_path: PathBuf, options: Option<QueryOptions>) {
    let resolver = match ClientConfig::load(&config_path).and_then(ClientConfig::into_resolver) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    let resolution = match resolver.resolve(options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error resolving options: {}", e);
            process::exit(1);
        }
    };

    let output = match resolution {
        Resolution::Graph(resolved) => resolved_to_json(&resolved),
        Resolution::Passthrough(options) => json!({
            "resolved": false,
            "execution_profile": options.and_then(|o| o.execution_profile),
        }),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn resolved_to_json(resolved: &ResolvedGraphOptions) -> Value {
    let mut payload = Map::new();
    for (key, value) in resolved.custom_payload().iter() {
        let mut entry = Map::new();
        entry.insert("hex".to_string(), Value::String(hex::encode(value)));
        if key == keys::REQUEST_TIMEOUT {
            if let Ok(millis) = decode_timeout(value) {
                entry.insert("millis".to_string(), json!(millis));
            }
        } else if let Ok(text) = std::str::from_utf8(value) {
            entry.insert("text".to_string(), Value::String(text.to_string()));
        }
        payload.insert(key.clone(), Value::Object(entry));
    }

    json!({
        "resolved": true,
        "execution_profile": resolved.execution_profile(),
        "graph_language": resolved.graph_language(),
        "graph_source": resolved.graph_source(),
        "read_timeout_ms": resolved.read_timeout(),
        "retry": resolved.retry().map(|r| r.name().to_string()),
        "payload": payload,
    })
}

fn run_consistency(code: Option<ConsistencyCode>) {
    match code {
        Some(code) => match consistency::name_for(code) {
            Ok(name) => println!("{}", name),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => {
            for (code, name) in consistency::entries() {
                println!("{:>3}  {}", code, name);
            }
        }
    }
}

//! Command-line protobuf wire-format inspector.
//!
//! # Usage Examples
//!
//! ```bash
//! # Hex from an argument
//! protobuf-decode "08 96 01 12 0b 48 65 6c 6c 6f 20 57 6f 72 6c 64"
//!
//! # Base64 from stdin, JSON output
//! echo CJYB | protobuf-decode --encoding base64 --output json
//!
//! # Trace the nested-message heuristics
//! RUST_LOG=devbox_protobuf=trace protobuf-decode --file message.hex
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use devbox_protobuf::{decode_input, DecodeOptions, Field, InputEncoding, Message, ProtobufDecoder};
use tracing::debug;

#[derive(Parser)]
#[command(name = "protobuf-decode")]
#[command(about = "Decode Protocol Buffers wire format without a schema")]
struct Cli {
    /// Encoded message; read from --file or stdin when omitted
    input: Option<String>,

    /// Read the encoded message from a file
    #[arg(long, short, conflicts_with = "input")]
    file: Option<PathBuf>,

    /// Text encoding of the input
    #[arg(long, short, value_enum, default_value_t = Encoding::Auto, env = "DEVBOX_PROTOBUF_ENCODING")]
    encoding: Encoding,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = Output::Text, env = "DEVBOX_PROTOBUF_OUTPUT")]
    output: Output,

    /// Maximum nesting depth for nested-message detection
    #[arg(long, default_value_t = devbox_protobuf::DEFAULT_MAX_DEPTH, env = "DEVBOX_PROTOBUF_MAX_DEPTH")]
    max_depth: usize,

    /// Highest field number accepted inside a nested message
    #[arg(long, default_value_t = 999, env = "DEVBOX_PROTOBUF_MAX_NESTED_FIELD")]
    max_nested_field: u32,

    /// Fail instead of clamping a top-level value that runs past the input
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Encoding {
    Auto,
    Hex,
    Base64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    /// Indented text, one field per line
    Text,
    /// JSON object keyed by field number, last occurrence wins
    Json,
    /// JSON object with repeated field numbers collected into arrays
    JsonRepeated,
    /// Flat listing of fields with wire types and byte spans
    Fields,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let text = read_input(&cli)?;
    let encoding = match cli.encoding {
        Encoding::Auto => InputEncoding::detect(&text),
        Encoding::Hex => InputEncoding::Hex,
        Encoding::Base64 => InputEncoding::Base64,
    };
    debug!(%encoding, "decoding input text");
    let bytes = decode_input(&text, encoding)
        .with_context(|| format!("Failed to read input as {encoding}"))?;

    let options = DecodeOptions::default()
        .with_max_depth(cli.max_depth)
        .with_max_nested_field_number(cli.max_nested_field)
        .with_clamp_truncated(!cli.strict);
    let message = ProtobufDecoder::new(options)
        .decode(&bytes)
        .context("Failed to decode protobuf message")?;

    if message.is_empty() {
        bail!("nothing to decode: input is empty or not valid protobuf");
    }

    match cli.output {
        Output::Text => print!("{message}"),
        Output::Json => println!("{}", serde_json::to_string_pretty(&message.to_json())?),
        Output::JsonRepeated => {
            println!(
                "{}",
                serde_json::to_string_pretty(&message.to_json_repeated())?
            )
        }
        Output::Fields => print_fields(&message),
    }
    Ok(())
}

fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(input) = &cli.input {
        return Ok(input.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

fn print_fields(message: &Message) {
    fn walk(fields: &[Field], path: &str) {
        for field in fields {
            let path = if path.is_empty() {
                field.field_number.to_string()
            } else {
                format!("{path}.{}", field.field_number)
            };
            println!(
                "{path}\t{}\t{}..{}",
                field.wire_type, field.span.start, field.span.end
            );
            if let Some(nested) = field.value.as_fields() {
                walk(nested, &path);
            }
        }
    }
    walk(&message.fields, "");
}

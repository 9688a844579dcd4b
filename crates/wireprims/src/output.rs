use std::fmt::Write as _;
use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use wireprims_codec::WireValue;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ValueOutput {
    kind: &'static str,
    value: serde_json::Value,
}

#[derive(Serialize)]
struct EncodedOutput<'a> {
    length: usize,
    hex: &'a str,
}

pub fn print_values(values: &[WireValue], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out: Vec<ValueOutput> = values.iter().map(value_output).collect();
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "KIND", "VALUE"]);
            for (index, value) in values.iter().enumerate() {
                table.add_row(vec![
                    index.to_string(),
                    value.kind().to_string(),
                    value.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for value in values {
                println!("{}={}", value.kind(), value);
            }
        }
    }
}

pub fn print_encoded(bytes: &[u8], format: OutputFormat) {
    let hex = hex_bytes(bytes);
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                length: bytes.len(),
                hex: &hex,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["LENGTH", "BYTES"])
                .add_row(vec![bytes.len().to_string(), hex]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{hex}"),
    }
}

/// Space-separated uppercase hex, e.g. `00 02 6F 6B`.
pub fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (index, byte) in bytes.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02X}");
    }
    out
}

fn value_output(value: &WireValue) -> ValueOutput {
    let json = match value {
        WireValue::Byte(v) => serde_json::Value::from(*v),
        WireValue::UInt16(v) => serde_json::Value::from(*v),
        WireValue::Int32(v) => serde_json::Value::from(*v),
        WireValue::Int64(v) => serde_json::Value::from(*v),
        // Non-finite doubles have no JSON number form.
        WireValue::Double(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(v.to_string())),
        WireValue::String(v) => serde_json::Value::from(v.as_str()),
    };
    ValueOutput {
        kind: value.kind().name(),
        value: json,
    }
}

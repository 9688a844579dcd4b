use clap::{Args, Subcommand};
use wireprims_codec::{WireKind, WireValue};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod encode;
pub mod send;
pub mod values;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send typed values to a server and optionally read typed replies.
    Send(SendArgs),
    /// Print the wire bytes of typed values without connecting.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Host name or literal address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Value to send, as KIND:LITERAL (kinds: u8, u16, i32, i64, f64, str).
    /// Repeat to send several values in one buffer.
    #[arg(long = "value", short = 'v', value_name = "KIND:LITERAL", value_parser = values::parse_value)]
    pub values: Vec<WireValue>,
    /// Kind of reply value to read after sending. Repeat to read several, in order.
    #[arg(long, short = 'e', value_name = "KIND", value_parser = values::parse_kind)]
    pub expect: Vec<WireKind>,
    /// Per-address connect timeout (e.g. 5s, 500ms).
    #[arg(long, value_name = "DURATION")]
    pub connect_timeout: Option<String>,
    /// Read and write timeout (e.g. 5s, 500ms).
    #[arg(long, value_name = "DURATION")]
    pub io_timeout: Option<String>,
    /// Disable Nagle's algorithm on the connection.
    #[arg(long)]
    pub nodelay: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Value to encode, as KIND:LITERAL. Repeat to encode several back to back.
    #[arg(long = "value", short = 'v', value_name = "KIND:LITERAL", value_parser = values::parse_value, required = true)]
    pub values: Vec<WireValue>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

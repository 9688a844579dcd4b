use std::time::Duration;

use wireprims_codec::{WireKind, WireValue};

use crate::exit::{CliError, CliResult, USAGE};

/// Parse `KIND:LITERAL`, e.g. `i32:-1`, `f64:1.5`, `str:hello`.
///
/// Everything after the first `:` is the literal, so strings may contain
/// colons.
pub fn parse_value(input: &str) -> Result<WireValue, String> {
    let (kind, literal) = input
        .split_once(':')
        .ok_or_else(|| format!("expected KIND:LITERAL, got {input:?}"))?;
    let kind = parse_kind(kind)?;

    let invalid = |err: &dyn std::fmt::Display| format!("invalid {kind} literal {literal:?}: {err}");
    let value = match kind {
        WireKind::Byte => WireValue::Byte(literal.parse().map_err(|e| invalid(&e))?),
        WireKind::UInt16 => WireValue::UInt16(literal.parse().map_err(|e| invalid(&e))?),
        WireKind::Int32 => WireValue::Int32(literal.parse().map_err(|e| invalid(&e))?),
        WireKind::Int64 => WireValue::Int64(literal.parse().map_err(|e| invalid(&e))?),
        WireKind::Double => WireValue::Double(literal.parse().map_err(|e| invalid(&e))?),
        WireKind::String => WireValue::String(literal.to_string()),
    };
    Ok(value)
}

pub fn parse_kind(input: &str) -> Result<WireKind, String> {
    WireKind::from_name(input.trim())
        .ok_or_else(|| format!("unknown kind {input:?} (expected u8, u16, i32, i64, f64 or str)"))
}

/// Parse `500ms`, `5s`, `2m`, or a bare number of seconds.
pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else if let Some(num) = input.strip_suffix('m') {
        (num, "m")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    Ok(match unit {
        "ms" => Duration::from_millis(value),
        "m" => Duration::from_secs(value.saturating_mul(60)),
        _ => Duration::from_secs(value),
    })
}

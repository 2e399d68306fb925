//! Semicolon-delimited line codec.
//!
//! Input lines carry six fields:
//!
//! ```text
//! SourceTime;Side;Action;OrderId;Price;Qty
//! ```
//!
//! Output lines repeat them and append the top-of-book annotation:
//!
//! ```text
//! SourceTime;Side;Action;OrderId;Price;Qty;B0;BQ0;BN0;A0;AQ0;AN0
//! ```
//!
//! Decoding is strict about numbers and lenient about shape: empty numeric
//! fields read as zero, missing trailing fields take their defaults and
//! extra fields are dropped. A non-empty field that is not a valid number
//! fails the whole run, since every later order reference depends on it.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{BboError, Result};
use crate::source::IO_BUFFER_SIZE;
use crate::types::{Action, BestLevel, Side, TickEvent};

/// Input header line.
pub const INPUT_HEADER: &str = "SourceTime;Side;Action;OrderId;Price;Qty";

/// Output header line.
pub const OUTPUT_HEADER: &str = "SourceTime;Side;Action;OrderId;Price;Qty;B0;BQ0;BN0;A0;AQ0;AN0";

const DELIMITER: char = ';';

/// Decode one record line. `line_no` is 1-based and only used in errors.
///
/// # Example
///
/// ```
/// use bbo_reconstructor::codec::decode_line;
/// use bbo_reconstructor::{Action, Side};
///
/// let event = decode_line("1000;1;A;42;1050;7", 2).unwrap();
/// assert_eq!(event.side, Side::Bid);
/// assert_eq!(event.action, Action::Add);
/// assert_eq!(event.price, 1050);
/// ```
pub fn decode_line(line: &str, line_no: usize) -> Result<TickEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut event = TickEvent::default();

    for (index, field) in line.split(DELIMITER).enumerate() {
        match index {
            0 => event.source_time = field.to_string(),
            1 => {
                if !field.is_empty() {
                    let code = parse_field::<i64>(field, "side", line_no)?;
                    event.side = Side::from_code(code);
                }
            }
            2 => event.action = Action::from_code(field),
            3 => event.order_id = parse_field(field, "order_id", line_no)?,
            4 => event.price = parse_field(field, "price", line_no)?,
            5 => event.qty = parse_field(field, "qty", line_no)?,
            _ => break,
        }
    }

    Ok(event)
}

#[inline]
fn parse_field<T>(field: &str, name: &'static str, line_no: usize) -> Result<T>
where
    T: std::str::FromStr + Default,
{
    if field.is_empty() {
        return Ok(T::default());
    }
    field
        .parse()
        .map_err(|_| BboError::decode(line_no, name, field))
}

/// Append one output line (without newline) to `buf`.
pub fn encode_line(event: &TickEvent, buf: &mut String) {
    buf.push_str(&event.source_time);
    buf.push(DELIMITER);
    if let Some(code) = event.side.code() {
        let _ = write!(buf, "{code}");
    }
    buf.push(DELIMITER);
    buf.push_str(event.action.code());
    let _ = write!(buf, ";{};{};{};", event.order_id, event.price, event.qty);
    push_level(buf, event.best_bid);
    buf.push(DELIMITER);
    push_level(buf, event.best_ask);
}

#[inline]
fn push_level(buf: &mut String, level: Option<BestLevel>) {
    if let Some(level) = level {
        let _ = write!(buf, "{};{};{}", level.price, level.qty, level.count);
    } else {
        buf.push_str(";;");
    }
}

/// Write the output header followed by one line per event.
///
/// Returns the number of event lines written.
pub fn write_events<'a, W, I>(writer: &mut W, events: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a TickEvent>,
{
    writeln!(writer, "{OUTPUT_HEADER}")?;

    let mut buf = String::with_capacity(128);
    let mut written = 0;
    for event in events {
        buf.clear();
        encode_line(event, &mut buf);
        buf.push('\n');
        writer.write_all(buf.as_bytes())?;
        written += 1;
    }

    Ok(written)
}

/// Write annotated events to a file at `path`.
pub fn save_events(path: impl AsRef<Path>, events: &[TickEvent]) -> Result<usize> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::with_capacity(IO_BUFFER_SIZE, file);
    let written = write_events(&mut writer, events)?;
    writer.flush()?;
    log::debug!("Wrote {} events to {}", written, path.as_ref().display());
    Ok(written)
}

//! CSV export of a ledger query result

use chrono::{NaiveDate, SecondsFormat};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::shared::errors::ExportError;
use crate::shared::types::TransactionRecord;

pub const CSV_HEADERS: [&str; 10] = [
    "Date",
    "Type",
    "Amount In",
    "Token In",
    "Amount Out",
    "Token Out",
    "Slippage (bps)",
    "Fee",
    "Status",
    "Signature",
];

/// Serialize records to CSV in the given order.
///
/// The header row is bare; every data field is double-quoted, with embedded
/// quotes doubled. Rows are separated by `\n`, no trailing newline.
pub fn to_csv(records: &[TransactionRecord]) -> Result<String, ExportError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    for tx in records {
        wtr.write_record([
            tx.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            tx.direction.as_str().to_string(),
            tx.amount_in.to_string(),
            tx.token_in().as_str().to_string(),
            tx.amount_out.to_string(),
            tx.token_out().as_str().to_string(),
            tx.slippage_bps.to_string(),
            tx.fee.to_string(),
            tx.status.as_str().to_string(),
            tx.signature.clone(),
        ])?;
    }

    let body = wtr.into_inner().map_err(|e| ExportError::Flush(e.to_string()))?;
    let body = String::from_utf8(body)?;

    let mut csv = CSV_HEADERS.join(",");
    if !body.is_empty() {
        csv.push('\n');
        csv.push_str(body.strip_suffix('\n').unwrap_or(&body));
    }
    Ok(csv)
}

/// `<prefix>-transactions-<YYYY-MM-DD>.csv`
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}-transactions-{}.csv", prefix, date.format("%Y-%m-%d"))
}

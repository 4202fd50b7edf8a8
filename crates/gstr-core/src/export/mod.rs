//! GSTR-1 B2B CSV export.

use tracing::debug;

use crate::error::ExportError;
use crate::models::gstr1::{Gstr1B2BRow, GSTR1_B2B_HEADERS};

/// Render rows as a GSTR-1 B2B CSV document.
///
/// The header is always written, rows follow in input order, records end in
/// `\n` and fields are quoted only when they contain a comma, a quote or a
/// line break.
pub fn export_csv(rows: &[Gstr1B2BRow]) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(vec![]);

    wtr.write_record(GSTR1_B2B_HEADERS)?;

    for row in rows {
        wtr.write_record(row.to_record())?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;

    debug!("Exported {} GSTR-1 B2B rows ({} bytes)", rows.len(), bytes.len());

    Ok(String::from_utf8(bytes)?)
}

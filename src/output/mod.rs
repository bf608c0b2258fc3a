//! Table output for stored URL records
//!
//! Renders the store's contents as a fixed-width text table. URLs longer
//! than the column width wrap onto continuation lines with blank id, depth,
//! and secure cells.

use crate::storage::UrlRecord;

/// Width of the URL column in the rendered table
const MAX_URL_LEN: usize = 60;

/// Renders all records as a text table
pub fn format_url_table(records: &[UrlRecord]) -> String {
    let mut out = String::new();
    let rule = "-".repeat(MAX_URL_LEN);

    out.push_str(&format!("|  ID  | {:<width$} | Depth | Secure |\n", "URL", width = MAX_URL_LEN));
    out.push_str(&format!("| ---- | {} | ----- | ------ |\n", rule));

    if records.is_empty() {
        out.push_str(&format!(
            "| ---- | {:-<width$} | ----- | ------ |\n",
            "No URLs yet registered.",
            width = MAX_URL_LEN
        ));
        return out;
    }

    for record in records {
        let chars: Vec<char> = record.url.chars().collect();
        let mut chunks = chars.chunks(MAX_URL_LEN);

        let first: String = chunks.next().unwrap_or_default().iter().collect();
        out.push_str(&format!(
            "| {:<4} | {:<width$} | {:<5} | {:<6} |\n",
            record.id,
            first,
            record.depth,
            record.secure as u8,
            width = MAX_URL_LEN
        ));

        for chunk in chunks {
            let line: String = chunk.iter().collect();
            out.push_str(&format!(
                "|      | {:<width$} |       |        |\n",
                line,
                width = MAX_URL_LEN
            ));
        }
    }

    out.push_str(&format!("| ---- | {} | ----- | ------ |\n", rule));
    out
}

/// Pretty-prints all records to stdout
pub fn print_url_table(records: &[UrlRecord]) {
    print!("{}", format_url_table(records));
}

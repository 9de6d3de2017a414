//! Customizing format parameters: separators, headers, disabled quoting.
//!
//! Run with: `cargo run --example custom_options`

use flatcsv::{row, rows_to_string, rows_to_string_with_schema, CsvOptions, CsvSchema};

fn main() -> flatcsv::Result<()> {
    let rows = vec![row![1, "a,b"], row![2, "plain"]];

    // Tab-separated: the comma is ordinary data and needs no quoting.
    let tsv = rows_to_string(&rows, CsvOptions::new().with_separator('\t'))?;
    println!("TSV:\n{tsv}");

    // Header row through the same quoting logic as data.
    let schema = CsvSchema::from_names(["id", "note"])?;
    let with_header =
        rows_to_string_with_schema(&rows, schema, CsvOptions::new().with_header(true))?;
    println!("With header:\n{with_header}");

    // Quoting disabled: raw passthrough, round-trip is the caller's burden.
    let raw = rows_to_string(&rows, CsvOptions::new().without_quote())?;
    println!("Unquoted:\n{raw}");

    Ok(())
}

//! Your first flatcsv experience: encode rows, decode them back.
//!
//! Run with: `cargo run --example simple`

use flatcsv::{row, rows_from_str, rows_to_string, CsvOptions};

fn main() -> flatcsv::Result<()> {
    let rows = vec![
        row![13, "Joe \"Sixpack\" Paxson", true],
        row![-3, "Unknown", false],
    ];

    let text = rows_to_string(&rows, CsvOptions::new())?;
    println!("Encoded:\n{text}");

    let back = rows_from_str(&text, CsvOptions::new())?;
    println!("Decoded {} rows", back.len());
    for row in &back {
        println!("  age={:?} name={:?}", row[0], row[1]);
    }
    assert_eq!(back, rows);
    Ok(())
}

//! Driving the codec at the structural-event level.
//!
//! Run with: `cargo run --example event_stream`

use flatcsv::{events_to_string, CsvEvent, CsvOptions, CsvReader, CsvSchema, CsvWriter};

fn main() -> flatcsv::Result<()> {
    // Encode: feed events into the writer, field names resolved by schema.
    let schema = CsvSchema::from_names(["age", "name"])?;
    let mut writer = CsvWriter::with_schema(CsvOptions::new().with_header(true), schema)?;
    writer.start_object()?;
    writer.field_name("name")?;
    writer.write_str("Joe")?;
    writer.field_name("age")?;
    writer.write_i32(13)?;
    writer.end_object()?;
    let text = writer.finish();
    println!("Encoded:\n{text}");

    // Decode: the reader is an iterator over the symmetric event stream.
    let reader = CsvReader::new(&text, CsvOptions::new().with_header(true))?;
    let events = reader.collect::<flatcsv::Result<Vec<CsvEvent>>>()?;
    for event in &events {
        println!("{event:?}");
    }

    // The decode-side stream feeds straight back into the encode side.
    let again = events_to_string(events, CsvOptions::new())?;
    println!("Re-encoded:\n{again}");
    Ok(())
}

use std::cmp::Ordering;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use itertools::Itertools;
use thiserror::Error;

use crate::aggregate::Analysis;
use crate::extract::{HotelInfo, Price};

const HEADER: [&str; 4] = ["name", "district", "price", "rooms_left"];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write CSV report")]
    Csv(#[from] csv::Error),
    #[error("failed to create report file")]
    Io(#[from] std::io::Error),
}

/// Ascending price, then name.
pub fn sort_priced(hotels: &mut [HotelInfo]) {
    hotels.sort_by(|a, b| match a.price.amount.total_cmp(&b.price.amount) {
        Ordering::Equal => a.name.cmp(&b.name),
        other => other,
    });
}

/// Sort and write the priced hotels to `path`, replacing any existing file.
pub fn write_csv(path: &Path, hotels: &mut [HotelInfo]) -> Result<usize, ReportError> {
    sort_priced(hotels);
    let file = File::create(path)?;
    write_records(file, hotels)
}

/// Every field quoted, header included, CRLF line endings.
pub fn write_records<W: Write>(out: W, hotels: &[HotelInfo]) -> Result<usize, ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);
    writer.write_record(HEADER)?;
    for hotel in hotels {
        let price = hotel.price.to_string();
        let rooms_left = hotel.rooms_left.to_string();
        writer.write_record([
            hotel.name.as_str(),
            hotel.district.as_str(),
            price.as_str(),
            rooms_left.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(hotels.len())
}

/// Two decimals with `,` grouping: `1234567.891` -> `1,234,567.89`.
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Record tally line, e.g. `Analyzed 8 hotels (2 skipped)`.
pub fn considered_line(analysis: &Analysis) -> String {
    format!(
        "Analyzed {} hotels ({} skipped)",
        analysis.considered, analysis.skipped
    )
}

pub fn print_summary(analysis: &Analysis, output: &Path) {
    println!("{}\n", considered_line(analysis));
    println!("Remaining rooms per hotel");
    println!("{}", "-".repeat(40));
    for (name, rooms) in analysis.room_counts.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        println!("{}: {} rooms", name, rooms);
    }

    println!("\nTotal rooms: {}", analysis.total_rooms);

    match &analysis.cheapest {
        Some(hotel) => {
            println!("\nCheapest hotel");
            println!("{}", "-".repeat(40));
            println!("Name:       {}", hotel.name);
            println!("District:   {}", hotel.district);
            println!("Price:      {} TL", format_thousands(hotel.price.amount));
            println!("Rooms left: {}", hotel.rooms_left);
        }
        None => println!("\nNo qualifying hotel found."),
    }

    println!("\nFull hotel list saved to {:?}", output);
}

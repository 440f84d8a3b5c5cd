use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::extract::{extract_hotel, ExtractedHotel, HotelInfo};

/// Accumulated result of one pass over the feed.
#[derive(Debug, Default)]
pub struct Analysis {
    /// Records in the feed, including skipped ones.
    pub considered: usize,
    pub skipped: usize,
    /// Hotels with a positive room count; a repeated name overwrites.
    pub room_counts: HashMap<String, u64>,
    /// Sum over every qualifying record, repeated names included.
    pub total_rooms: u64,
    pub cheapest: Option<HotelInfo>,
    /// Priced hotels in input order.
    pub priced: Vec<HotelInfo>,
}

impl Analysis {
    fn record(&mut self, hotel: ExtractedHotel) {
        if hotel.rooms_left > 0 {
            self.room_counts.insert(hotel.name, hotel.rooms_left);
            self.total_rooms = self.total_rooms.saturating_add(hotel.rooms_left);
        }

        let Some(listing) = hotel.listing else {
            return;
        };
        // Strict comparison keeps the first hotel seen at the minimum price.
        let cheaper = self
            .cheapest
            .as_ref()
            .map_or(true, |current| listing.price.amount < current.price.amount);
        if cheaper {
            self.cheapest = Some(listing.clone());
        }
        self.priced.push(listing);
    }
}

fn step(mut acc: Analysis, (index, value): (usize, &Value)) -> Analysis {
    acc.considered += 1;
    match extract_hotel(value) {
        Ok(hotel) => acc.record(hotel),
        Err(err) => {
            debug!(index, error = %err, "Skipping hotel record");
            acc.skipped += 1;
        }
    }
    acc
}

/// Single in-order pass over the feed records.
pub fn analyze(records: &[Value]) -> Analysis {
    records
        .iter()
        .enumerate()
        .fold(Analysis::default(), step)
}

use std::fmt;

use serde_json::{Number, Value};
use thiserror::Error;

use crate::feed::{parse_int, HotelRecord};

/// Placeholder for names and districts that cannot be recovered.
pub const UNKNOWN: &str = "unknown";

const CITY_NAMES: [&str; 2] = ["Istanbul", "İstanbul"];

/// A finite price plus whether the feed wrote it as an integer, so the report
/// renders `1200` and `1200.0` the way they arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    pub amount: f64,
    pub integral: bool,
}

impl Price {
    pub fn from_number(n: &Number) -> Option<Price> {
        let amount = n.as_f64().filter(|a| a.is_finite())?;
        Some(Price {
            amount,
            integral: n.is_i64() || n.is_u64(),
        })
    }

    fn from_value(value: Option<&Value>) -> Option<Price> {
        match value {
            Some(Value::Number(n)) => Price::from_number(n),
            _ => None,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.integral || self.amount.fract() != 0.0 {
            write!(f, "{}", self.amount)
        } else {
            write!(f, "{:.1}", self.amount)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelInfo {
    pub name: String,
    pub district: String,
    pub price: Price,
    pub rooms_left: u64,
}

/// Everything derived from one record. `listing` is present only when a finite
/// price was resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedHotel {
    pub name: String,
    pub rooms_left: u64,
    pub listing: Option<HotelInfo>,
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("offer #{offer} is not a JSON object")]
    MalformedOffer { offer: usize },
}

/// Derive name, rooms and (when priced) the report row for one feed record.
/// Nothing is committed anywhere; a failure leaves the caller's state untouched.
pub fn extract_hotel(value: &Value) -> Result<ExtractedHotel, RecordError> {
    let record = HotelRecord::from_value(value).ok_or(RecordError::NotAnObject)?;
    let name = record.name().unwrap_or(UNKNOWN).to_string();
    let rooms_left = resolve_rooms_left(&record);
    let price = resolve_price(&record)?;

    let listing = price.map(|price| HotelInfo {
        name: name.clone(),
        district: district_from_address(record.address_full())
            .unwrap_or(UNKNOWN)
            .to_string(),
        price,
        rooms_left,
    });

    Ok(ExtractedHotel {
        name,
        rooms_left,
        listing,
    })
}

/// Best-effort district: the comma-separated segment just before the one
/// naming the city. `None` when the city is missing, leads the address, or the
/// address is not a non-empty string.
pub fn district_from_address(full: Option<&Value>) -> Option<&str> {
    let full = full?.as_str()?;
    if full.is_empty() {
        return None;
    }
    let parts: Vec<&str> = full.split(',').collect();
    let city = parts
        .iter()
        .position(|part| CITY_NAMES.iter().any(|name| part.contains(name)))?;
    if city == 0 {
        return None;
    }
    Some(parts[city - 1].trim())
}

/// Smallest strictly positive numeric `displayedPrice` (first one wins a tie),
/// or `None` when no offer qualifies. Offers that are not objects make the
/// whole record unusable.
pub fn min_option_price(options: &[Value]) -> Result<Option<Price>, RecordError> {
    let mut min: Option<Price> = None;
    for (offer, option) in options.iter().enumerate() {
        let option = option
            .as_object()
            .ok_or(RecordError::MalformedOffer { offer })?;
        let Some(price) = Price::from_value(option.get("displayedPrice")) else {
            continue;
        };
        if price.amount > 0.0 && min.map_or(true, |m| price.amount < m.amount) {
            min = Some(price);
        }
    }
    Ok(min)
}

/// Room count with two tiers: the sum of positive per-room counts wins as soon
/// as one exists, otherwise the top-level `roomsLeft`. Negative results clamp to 0.
pub fn resolve_rooms_left(record: &HotelRecord<'_>) -> u64 {
    let per_room = record.rooms().and_then(|rooms| {
        rooms
            .iter()
            .filter_map(|room| room.as_object()?.get("roomsLeft"))
            .filter_map(parse_int)
            .filter(|&count| count > 0)
            .fold(None, |sum: Option<i64>, count| {
                Some(sum.unwrap_or(0).saturating_add(count))
            })
    });

    let count = match per_room {
        Some(sum) => sum,
        None => record.rooms_left().and_then(parse_int).unwrap_or(0),
    };
    u64::try_from(count).unwrap_or(0)
}

/// `min(price, cheapest option)`; `None` when neither source gives a finite value.
pub fn resolve_price(record: &HotelRecord<'_>) -> Result<Option<Price>, RecordError> {
    let base = record.price().and_then(Price::from_number);
    let option = match record.options() {
        Some(options) => min_option_price(options)?,
        None => None,
    };
    // Ties keep the base price.
    Ok(match (base, option) {
        (Some(base), Some(option)) if option.amount < base.amount => Some(option),
        (Some(base), _) => Some(base),
        (None, option) => option,
    })
}

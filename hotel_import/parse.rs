use std::sync::LazyLock;

use regex::Regex;

use crate::db::NewHotel;

static RATING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

/// One `=`-terminated block of the text export. Fields are raw, trimmed values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportBlock {
    pub name: Option<String>,
    pub url: Option<String>,
    pub location: Option<String>,
    pub rating: Option<String>,
}

impl ExportBlock {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.location.is_none() && self.rating.is_none()
    }

    fn set(&mut self, label: &str, value: &str) {
        let slot = match label.to_ascii_lowercase().as_str() {
            "name" => &mut self.name,
            "url" => &mut self.url,
            "location" => &mut self.location,
            "rating" => &mut self.rating,
            _ => return,
        };
        *slot = Some(value.to_string());
    }

    /// Name and url are required; an unparsable rating becomes `None`.
    pub fn into_new_hotel(self) -> Option<NewHotel> {
        let name = self.name.filter(|n| !n.is_empty())?;
        let url = self.url.filter(|u| !u.is_empty())?;
        Some(NewHotel {
            name,
            url,
            location: self.location.filter(|l| !l.is_empty()),
            rating: self.rating.as_deref().and_then(parse_rating),
        })
    }
}

/// Split the export into blocks. Lines look like `Label: value`; a line
/// starting with `=` closes the current block. A trailing block without a
/// separator is kept, and blocks with no recognised field are dropped.
pub fn parse_export(text: &str) -> Vec<ExportBlock> {
    let mut blocks = Vec::new();
    let mut current = ExportBlock::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with('=') {
            let block = std::mem::take(&mut current);
            if !block.is_empty() {
                blocks.push(block);
            }
            continue;
        }
        if let Some((label, value)) = line.split_once(':') {
            current.set(label.trim(), value.trim());
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// First numeric token, `,` accepted as the decimal mark: `"8,5 / 10"` -> 8.5.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let token = RATING_RE.find(raw)?.as_str().replace(',', ".");
    token.parse::<f64>().ok().filter(|r| r.is_finite())
}

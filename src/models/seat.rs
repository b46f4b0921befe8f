use serde::{Deserialize, Serialize};

/// One seat of the inventory. `id` is the row letter followed by the number ("A1").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub section: String,
    pub row: String,
    pub number: u32,
    /// Fixed when the inventory is loaded.
    pub available: bool,
    pub price: f64,
}

impl Seat {
    pub fn new(section: &str, row: &str, number: u32, available: bool, price: f64) -> Self {
        Self {
            id: format!("{}{}", row, number),
            section: section.to_string(),
            row: row.to_string(),
            number,
            available,
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    /// Price shown next to the section heading.
    pub list_price: f64,
    pub seats: Vec<Seat>,
}

/// Seat inventory grouped by section, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatMap {
    pub sections: Vec<Section>,
}

impl SeatMap {
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.sections.iter().flat_map(|section| section.seats.iter())
    }

    pub fn find(&self, seat_id: &str) -> Option<&Seat> {
        self.seats().find(|seat| seat.id == seat_id)
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|section| section.seats.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

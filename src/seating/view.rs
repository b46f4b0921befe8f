use serde::Serialize;
use uuid::Uuid;

use super::{status_of, toggle_seat, BookingSummary, SeatStatus, Selection};
use crate::models::SeatMap;
use crate::ui::format::format_peso;

/// One visit to the seat map of an event: its own inventory snapshot and selection.
#[derive(Debug, Clone)]
pub struct SelectionView {
    pub id: Uuid,
    pub event_id: Uuid,
    seat_map: SeatMap,
    selection: Selection,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatCell {
    pub id: String,
    pub row: String,
    pub number: u32,
    pub price: f64,
    pub status: SeatStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub name: String,
    pub list_price: f64,
    pub list_price_display: String,
    pub seats: Vec<SeatCell>,
}

/// Everything the seat selection screen renders.
#[derive(Debug, Clone, Serialize)]
pub struct SeatSelectionSnapshot {
    pub view_id: Uuid,
    pub event_id: Uuid,
    pub sections: Vec<SectionView>,
    pub summary: BookingSummary,
}

impl SelectionView {
    pub fn open(event_id: Uuid, seat_map: SeatMap) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            seat_map,
            selection: Selection::new(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Unknown ids are ignored the same way occupied seats are.
    pub fn toggle(&mut self, seat_id: &str) -> bool {
        match self.seat_map.find(seat_id) {
            Some(seat) => toggle_seat(&mut self.selection, seat),
            None => false,
        }
    }

    pub fn status_of(&self, seat_id: &str) -> Option<SeatStatus> {
        self.seat_map
            .find(seat_id)
            .map(|seat| status_of(seat, &self.selection))
    }

    pub fn summary(&self) -> BookingSummary {
        BookingSummary::of(&self.selection)
    }

    pub fn snapshot(&self) -> SeatSelectionSnapshot {
        let sections = self
            .seat_map
            .sections
            .iter()
            .map(|section| SectionView {
                name: section.name.clone(),
                list_price: section.list_price,
                list_price_display: format_peso(section.list_price),
                seats: section
                    .seats
                    .iter()
                    .map(|seat| SeatCell {
                        id: seat.id.clone(),
                        row: seat.row.clone(),
                        number: seat.number,
                        price: seat.price,
                        status: status_of(seat, &self.selection),
                    })
                    .collect(),
            })
            .collect();

        SeatSelectionSnapshot {
            view_id: self.id,
            event_id: self.event_id,
            sections,
            summary: self.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seating::inventory::demo_seat_map;

    #[test]
    fn unknown_seat_is_a_no_op() {
        let mut view = SelectionView::open(Uuid::new_v4(), demo_seat_map());
        assert!(!view.toggle("Z99"));
        assert!(view.selection().is_empty());
        assert_eq!(view.status_of("Z99"), None);
    }

    #[test]
    fn snapshot_reflects_selection() {
        let mut view = SelectionView::open(Uuid::new_v4(), demo_seat_map());
        assert!(view.toggle("B1"));
        assert!(!view.toggle("B4"));

        let snapshot = view.snapshot();
        let premium = &snapshot.sections[1];
        assert_eq!(premium.name, "Premium");
        assert_eq!(premium.list_price_display, "₱4,000.00");
        assert_eq!(premium.seats[0].status, SeatStatus::Selected);
        assert_eq!(premium.seats[3].status, SeatStatus::Occupied);
        assert_eq!(premium.seats[1].status, SeatStatus::Available);
        assert_eq!(snapshot.summary.total, 4000.0);
    }
}

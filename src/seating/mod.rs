//! Seat selection and the booking summary derived from it.
//!
//! A [`Selection`] is local to one visit of the seat map. Nothing here talks to
//! the data service or to other shoppers: two visits can select the same seat
//! without either noticing.

pub mod inventory;
pub mod registry;
pub mod view;

use serde::Serialize;

use crate::models::Seat;
use crate::ui::format::format_peso;

pub use registry::SelectionViews;
pub use view::{SeatSelectionSnapshot, SelectionView};

/// Mutually exclusive seat states as seen by one shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Selected,
    /// Unavailable at load time; never selectable.
    Occupied,
}

/// Seats chosen by the shopper, unique by id, kept in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    seats: Vec<Seat>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, seat_id: &str) -> bool {
        self.seats.iter().any(|s| s.id == seat_id)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn total(&self) -> f64 {
        compute_total(self)
    }
}

/// Adds an available seat or removes it if already chosen. Returns whether the
/// selection changed; occupied seats leave it untouched.
pub fn toggle_seat(selection: &mut Selection, seat: &Seat) -> bool {
    if !seat.available {
        return false;
    }

    match selection.seats.iter().position(|s| s.id == seat.id) {
        Some(idx) => {
            selection.seats.remove(idx);
        }
        None => selection.seats.push(seat.clone()),
    }
    true
}

pub fn compute_total(selection: &Selection) -> f64 {
    selection.seats.iter().map(|s| s.price).sum()
}

pub fn status_of(seat: &Seat, selection: &Selection) -> SeatStatus {
    if !seat.available {
        SeatStatus::Occupied
    } else if selection.contains(&seat.id) {
        SeatStatus::Selected
    } else {
        SeatStatus::Available
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub id: String,
    pub section: String,
    pub price: f64,
    pub price_display: String,
}

/// "Booking Summary" panel: chosen seats in selection order plus the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSummary {
    pub seats: Vec<SummaryLine>,
    pub count: usize,
    pub total: f64,
    pub total_display: String,
}

impl BookingSummary {
    pub fn of(selection: &Selection) -> Self {
        let total = compute_total(selection);
        Self {
            seats: selection
                .seats()
                .iter()
                .map(|s| SummaryLine {
                    id: s.id.clone(),
                    section: s.section.clone(),
                    price: s.price,
                    price_display: format_peso(s.price),
                })
                .collect(),
            count: selection.len(),
            total,
            total_display: format_peso(total),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seating::inventory::demo_seat_map;
    use proptest::prelude::*;

    fn seat(id: &str) -> Seat {
        demo_seat_map().find(id).cloned().unwrap()
    }

    #[test]
    fn empty_selection_totals_zero() {
        assert_eq!(compute_total(&Selection::new()), 0.0);
    }

    #[test]
    fn total_sums_selected_prices() {
        let mut selection = Selection::new();
        toggle_seat(&mut selection, &seat("A1"));
        toggle_seat(&mut selection, &seat("B2"));
        assert_eq!(compute_total(&selection), 10000.0);
        assert_eq!(selection.total(), 10000.0);
    }

    #[test]
    fn occupied_seat_stays_occupied() {
        let a3 = seat("A3");
        let mut selection = Selection::new();
        assert_eq!(status_of(&a3, &selection), SeatStatus::Occupied);

        assert!(!toggle_seat(&mut selection, &a3));
        assert!(!toggle_seat(&mut selection, &a3));
        assert!(selection.is_empty());
        assert_eq!(status_of(&a3, &selection), SeatStatus::Occupied);
    }

    #[test]
    fn toggle_keeps_selection_order() {
        let mut selection = Selection::new();
        for id in ["C2", "A1", "D10"] {
            toggle_seat(&mut selection, &seat(id));
        }
        toggle_seat(&mut selection, &seat("A1"));
        let ids: Vec<_> = selection.seats().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["C2", "D10"]);
    }

    #[test]
    fn summary_formats_total() {
        let mut selection = Selection::new();
        toggle_seat(&mut selection, &seat("A1"));
        toggle_seat(&mut selection, &seat("A2"));
        let summary = BookingSummary::of(&selection);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_display, "₱12,000.00");
        assert_eq!(summary.seats[0].id, "A1");
        assert_eq!(summary.seats[0].section, "VIP");
    }

    fn seat_ids() -> Vec<String> {
        demo_seat_map().seats().map(|s| s.id.clone()).collect()
    }

    proptest! {
        #[test]
        fn toggling_an_available_seat_twice_is_identity(
            picks in proptest::collection::vec(0usize..29, 0..12),
            target in 0usize..29,
        ) {
            let map = demo_seat_map();
            let ids = seat_ids();
            let mut selection = Selection::new();
            for i in picks {
                toggle_seat(&mut selection, map.find(&ids[i]).unwrap());
            }
            let before = selection.clone();
            let seat = map.find(&ids[target]).unwrap();

            toggle_seat(&mut selection, seat);
            toggle_seat(&mut selection, seat);

            if seat.available {
                let mut a: Vec<_> = before.seats().iter().map(|s| s.id.clone()).collect();
                let mut b: Vec<_> = selection.seats().iter().map(|s| s.id.clone()).collect();
                a.sort();
                b.sort();
                prop_assert_eq!(a, b);
            } else {
                prop_assert_eq!(before, selection);
            }
        }

        #[test]
        fn status_partitions_every_seat(picks in proptest::collection::vec(0usize..29, 0..29)) {
            let map = demo_seat_map();
            let ids = seat_ids();
            let mut selection = Selection::new();
            for i in picks {
                toggle_seat(&mut selection, map.find(&ids[i]).unwrap());
            }

            let mut counted = 0;
            for seat in map.seats() {
                let status = status_of(seat, &selection);
                let occupied = !seat.available;
                let selected = selection.contains(&seat.id);
                match status {
                    SeatStatus::Occupied => prop_assert!(occupied && !selected),
                    SeatStatus::Selected => prop_assert!(!occupied && selected),
                    SeatStatus::Available => prop_assert!(!occupied && !selected),
                }
                counted += 1;
            }
            prop_assert_eq!(counted, map.len());
        }

        #[test]
        fn total_matches_listed_prices(picks in proptest::collection::vec(0usize..29, 0..29)) {
            let map = demo_seat_map();
            let ids = seat_ids();
            let mut selection = Selection::new();
            for i in picks {
                toggle_seat(&mut selection, map.find(&ids[i]).unwrap());
            }
            let expected: f64 = map
                .seats()
                .filter(|s| selection.contains(&s.id))
                .map(|s| s.price)
                .sum();
            prop_assert_eq!(compute_total(&selection), expected);
        }
    }
}

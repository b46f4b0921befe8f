use crate::models::{Seat, SeatMap, Section};

struct SectionLayout {
    name: &'static str,
    row: &'static str,
    seats: u32,
    seat_price: f64,
    list_price: f64,
    unavailable: &'static [u32],
}

// Макет зала, одинаковый для всех событий
const DEMO_SECTIONS: &[SectionLayout] = &[
    SectionLayout { name: "VIP", row: "A", seats: 5, seat_price: 6000.0, list_price: 6000.0, unavailable: &[3] },
    SectionLayout { name: "Premium", row: "B", seats: 6, seat_price: 4000.0, list_price: 4000.0, unavailable: &[4] },
    SectionLayout { name: "Standard", row: "C", seats: 8, seat_price: 2250.0, list_price: 2250.0, unavailable: &[5] },
    SectionLayout { name: "Economy", row: "D", seats: 10, seat_price: 25.0, list_price: 1250.0, unavailable: &[] },
];

/// Fixed seat inventory served for every event.
pub fn demo_seat_map() -> SeatMap {
    SeatMap {
        sections: DEMO_SECTIONS
            .iter()
            .map(|layout| Section {
                name: layout.name.to_string(),
                list_price: layout.list_price,
                seats: (1..=layout.seats)
                    .map(|n| {
                        Seat::new(layout.name, layout.row, n, !layout.unavailable.contains(&n), layout.seat_price)
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub mod user;
pub mod event;
pub mod seat;

pub use user::{Session, User, UserProfile};
pub use event::{Event, EventDraft, EventForm};
pub use seat::{Seat, SeatMap, Section};

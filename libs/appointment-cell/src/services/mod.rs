pub mod booking;
pub mod clock;
pub mod store;

pub use booking::BookingFlow;
pub use clock::{Clock, FixedClock, SystemClock};
pub use store::AppointmentStore;

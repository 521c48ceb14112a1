pub mod event;

pub use event::{Event, EventPayload, DATETIME_FORMAT};

use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDateTime, Utc};
use tracing::debug;

use crate::models::event::{Event, EventPayload};
use crate::utils::error::{AppError, FieldError};

pub mod validation;

use validation::{
    validate_datetime_of_event, validate_description, validate_name, validate_organizer,
};

/// In-memory owner of all event records for the process lifetime.
///
/// Records live in a single insertion-ordered collection behind one mutex;
/// every operation is short, synchronous work and the guard is never held
/// across an await point. The store is handed to request handlers behind an
/// `Arc`, so tests construct isolated stores instead of sharing process-wide
/// state.
pub struct EventStore {
    events: Mutex<Vec<Event>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Full snapshot in insertion order.
    pub fn list(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn get(&self, id: u64) -> Result<Event, AppError> {
        self.lock()
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or_else(AppError::event_not_found)
    }

    /// Validates the whole payload, assigns the next id and appends the new
    /// event. On any violation the collection is left untouched and every
    /// offending field is reported.
    pub fn create(&self, payload: &EventPayload) -> Result<Event, AppError> {
        let now = Utc::now().naive_utc();
        let draft = validate_create(payload, now).map_err(AppError::Validation)?;

        let mut events = self.lock();
        let event = Event {
            id: next_id(&events),
            name: draft.name,
            description: draft.description,
            organizer: draft.organizer,
            datetime_of_event: draft.datetime_of_event,
        };
        events.push(event.clone());

        debug!(id = event.id, name = %event.name, "Created event");
        Ok(event)
    }

    /// Overwrites the provided fields of an existing event. The whole payload
    /// is validated before any field is touched, so a failed update never
    /// commits a partial change. Fields that are absent or empty in the
    /// payload are left as they are.
    pub fn update(&self, id: u64, payload: &EventPayload) -> Result<Event, AppError> {
        let now = Utc::now().naive_utc();

        let mut events = self.lock();
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(AppError::event_not_found)?;

        let datetime_of_event = validate_update(payload, now).map_err(AppError::Validation)?;

        if let Some(value) = payload.name() {
            event.name = value.to_string();
        }
        if let Some(value) = payload.description() {
            event.description = value.to_string();
        }
        if let Some(value) = payload.organizer() {
            event.organizer = Some(value.to_string());
        }
        if let Some(value) = datetime_of_event {
            event.datetime_of_event = value;
        }

        debug!(id, "Updated event");
        Ok(event.clone())
    }

    pub fn delete(&self, id: u64) -> Result<(), AppError> {
        let mut events = self.lock();
        let position = events
            .iter()
            .position(|event| event.id == id)
            .ok_or_else(AppError::event_not_found)?;
        events.remove(position);

        debug!(id, "Removed event");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.lock().expect("event store mutex poisoned")
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

// Recomputed from the current collection on every create, not a running
// counter: after deleting the highest-numbered event the freed id is handed
// out again.
fn next_id(events: &[Event]) -> u64 {
    events.iter().map(|event| event.id).max().unwrap_or(0) + 1
}

struct DraftEvent {
    name: String,
    description: String,
    organizer: Option<String>,
    datetime_of_event: NaiveDateTime,
}

fn validate_create(
    payload: &EventPayload,
    now: NaiveDateTime,
) -> Result<DraftEvent, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = match payload.name() {
        None => {
            errors.push(FieldError::required("name"));
            None
        }
        Some(value) => match validate_name(value) {
            Some(error) => {
                errors.push(error);
                None
            }
            None => Some(value.to_string()),
        },
    };

    let description = match payload.description() {
        None => {
            errors.push(FieldError::required("description"));
            None
        }
        Some(value) => match validate_description(value) {
            Some(error) => {
                errors.push(error);
                None
            }
            None => Some(value.to_string()),
        },
    };

    let organizer = match payload.organizer() {
        None => None,
        Some(value) => match validate_organizer(value) {
            Some(error) => {
                errors.push(error);
                None
            }
            None => Some(value.to_string()),
        },
    };

    let datetime_of_event = match payload.datetime_of_event() {
        None => {
            errors.push(FieldError::required("datetime_of_event"));
            None
        }
        Some(raw) => match validate_datetime_of_event(raw, now) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                errors.push(error);
                None
            }
        },
    };

    match (name, description, datetime_of_event) {
        (Some(name), Some(description), Some(datetime_of_event)) if errors.is_empty() => {
            Ok(DraftEvent {
                name,
                description,
                organizer,
                datetime_of_event,
            })
        }
        _ => Err(errors),
    }
}

// Only provided fields are checked; returns the parsed timestamp when one was
// supplied so update applies it without re-parsing.
fn validate_update(
    payload: &EventPayload,
    now: NaiveDateTime,
) -> Result<Option<NaiveDateTime>, Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Some(value) = payload.name() {
        errors.extend(validate_name(value));
    }
    if let Some(value) = payload.description() {
        errors.extend(validate_description(value));
    }
    if let Some(value) = payload.organizer() {
        errors.extend(validate_organizer(value));
    }

    let datetime_of_event = match payload.datetime_of_event() {
        None => None,
        Some(raw) => match validate_datetime_of_event(raw, now) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                errors.push(error);
                None
            }
        },
    };

    if errors.is_empty() {
        Ok(datetime_of_event)
    } else {
        Err(errors)
    }
}

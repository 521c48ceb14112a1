use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Wire format for `datetime_of_event`, e.g. `2025-06-01 18:30:00`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub organizer: Option<String>,
    #[serde(with = "datetime_format")]
    pub datetime_of_event: NaiveDateTime,
}

/// Request body for POST and PUT on the events resource. Every field is
/// optional at the decoding stage; required-field checks belong to the store
/// so they can be reported per field instead of as a body decode failure.
///
/// The timestamp stays a raw string here for the same reason: an unparseable
/// value must surface as a validation error on `datetime_of_event`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub datetime_of_event: Option<String>,
}

impl EventPayload {
    pub fn name(&self) -> Option<&str> {
        provided(&self.name)
    }

    pub fn description(&self) -> Option<&str> {
        provided(&self.description)
    }

    pub fn organizer(&self) -> Option<&str> {
        provided(&self.organizer)
    }

    pub fn datetime_of_event(&self) -> Option<&str> {
        provided(&self.datetime_of_event)
    }
}

// A field counts as provided only when present and non-empty. An empty string
// therefore cannot blank out a stored value on update.
fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn event_serializes_timestamp_in_wire_format() {
        let event = Event {
            id: 1,
            name: "Conf".to_string(),
            description: "Annual conf".to_string(),
            organizer: None,
            datetime_of_event: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["datetime_of_event"], "2025-06-01 18:30:00");
        assert_eq!(json["organizer"], serde_json::Value::Null);
    }

    #[test]
    fn empty_payload_fields_count_as_absent() {
        let payload = EventPayload {
            name: Some(String::new()),
            organizer: Some("Acme".to_string()),
            ..Default::default()
        };

        assert_eq!(payload.name(), None);
        assert_eq!(payload.organizer(), Some("Acme"));
        assert_eq!(payload.description(), None);
    }
}

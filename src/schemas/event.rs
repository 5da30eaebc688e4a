use sea_orm::{IntoActiveModel, NotSet, Set};
use serde::Deserialize;

use super::validation::{
    nullable, required, validate_noc, validate_non_negative, validate_not_blank, Validate,
    ValidationError,
};
use super::RecordSchema;
use crate::database::entities::events;

/// Event fields accepted on create. `id` is assigned by the store.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    pub year: i32,
    pub country: String,
    pub host: String,
    #[serde(rename = "NOC")]
    pub noc: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub disabilities_included: Option<String>,
    #[serde(default)]
    pub countries: Option<i32>,
    #[serde(default)]
    pub events: Option<i32>,
    #[serde(default)]
    pub sports: Option<i32>,
    #[serde(default)]
    pub participants_m: Option<i32>,
    #[serde(default)]
    pub participants_f: Option<i32>,
    #[serde(default)]
    pub participants: Option<i32>,
    #[serde(default)]
    pub highlights: Option<String>,
}

impl Validate for EventPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_not_blank("type", &self.event_type)?;
        validate_noc("NOC", &self.noc)?;
        validate_counts(&[
            ("year", Some(self.year)),
            ("duration", self.duration),
            ("countries", self.countries),
            ("events", self.events),
            ("sports", self.sports),
            ("participants_m", self.participants_m),
            ("participants_f", self.participants_f),
            ("participants", self.participants),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventPatch {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub event_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub host: Option<Option<String>>,
    #[serde(rename = "NOC", default, deserialize_with = "nullable")]
    pub noc: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub start: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub end: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub disabilities_included: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub countries: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub events: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub sports: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub participants_m: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub participants_f: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub participants: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub highlights: Option<Option<String>>,
}

impl Validate for EventPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, cleared) in [
            ("type", matches!(self.event_type, Some(None))),
            ("year", matches!(self.year, Some(None))),
            ("country", matches!(self.country, Some(None))),
            ("host", matches!(self.host, Some(None))),
            ("NOC", matches!(self.noc, Some(None))),
        ] {
            if cleared {
                return Err(ValidationError::field(field, "Field may not be null"));
            }
        }

        if let Some(Some(event_type)) = &self.event_type {
            validate_not_blank("type", event_type)?;
        }
        if let Some(Some(noc)) = &self.noc {
            validate_noc("NOC", noc)?;
        }
        validate_counts(&[
            ("year", self.year.flatten()),
            ("duration", self.duration.flatten()),
            ("countries", self.countries.flatten()),
            ("events", self.events.flatten()),
            ("sports", self.sports.flatten()),
            ("participants_m", self.participants_m.flatten()),
            ("participants_f", self.participants_f.flatten()),
            ("participants", self.participants.flatten()),
        ])
    }
}

fn validate_counts(counts: &[(&str, Option<i32>)]) -> Result<(), ValidationError> {
    counts
        .iter()
        .try_for_each(|(field, value)| validate_non_negative(field, *value))
}

pub struct EventSchema;

impl RecordSchema for EventSchema {
    type Model = events::Model;
    type ActiveModel = events::ActiveModel;
    type Create = EventPayload;
    type Patch = EventPatch;

    fn load(payload: EventPayload) -> events::ActiveModel {
        events::ActiveModel {
            id: NotSet,
            event_type: Set(payload.event_type),
            year: Set(payload.year),
            country: Set(payload.country),
            host: Set(payload.host),
            noc: Set(payload.noc),
            start: Set(payload.start),
            end: Set(payload.end),
            duration: Set(payload.duration),
            disabilities_included: Set(payload.disabilities_included),
            countries: Set(payload.countries),
            events: Set(payload.events),
            sports: Set(payload.sports),
            participants_m: Set(payload.participants_m),
            participants_f: Set(payload.participants_f),
            participants: Set(payload.participants),
            highlights: Set(payload.highlights),
        }
    }

    fn load_partial(
        existing: events::Model,
        patch: EventPatch,
    ) -> Result<events::ActiveModel, ValidationError> {
        if let Some(id) = patch.id {
            if id != existing.id {
                return Err(ValidationError::field("id", "Event id cannot be changed"));
            }
        }

        let mut event = existing.into_active_model();

        if let Some(value) = required("type", patch.event_type)? {
            event.event_type = Set(value);
        }
        if let Some(value) = required("year", patch.year)? {
            event.year = Set(value);
        }
        if let Some(value) = required("country", patch.country)? {
            event.country = Set(value);
        }
        if let Some(value) = required("host", patch.host)? {
            event.host = Set(value);
        }
        if let Some(value) = required("NOC", patch.noc)? {
            event.noc = Set(value);
        }

        if let Some(value) = patch.start {
            event.start = Set(value);
        }
        if let Some(value) = patch.end {
            event.end = Set(value);
        }
        if let Some(value) = patch.duration {
            event.duration = Set(value);
        }
        if let Some(value) = patch.disabilities_included {
            event.disabilities_included = Set(value);
        }
        if let Some(value) = patch.countries {
            event.countries = Set(value);
        }
        if let Some(value) = patch.events {
            event.events = Set(value);
        }
        if let Some(value) = patch.sports {
            event.sports = Set(value);
        }
        if let Some(value) = patch.participants_m {
            event.participants_m = Set(value);
        }
        if let Some(value) = patch.participants_f {
            event.participants_f = Set(value);
        }
        if let Some(value) = patch.participants {
            event.participants = Set(value);
        }
        if let Some(value) = patch.highlights {
            event.highlights = Set(value);
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveModelTrait;
    use serde_json::json;

    fn london() -> events::Model {
        events::Model {
            id: 7,
            event_type: "summer".to_string(),
            year: 2012,
            country: "UK".to_string(),
            host: "London".to_string(),
            noc: "GBR".to_string(),
            start: Some("29/08/2012".to_string()),
            end: Some("09/09/2012".to_string()),
            duration: Some(12),
            disabilities_included: None,
            countries: Some(164),
            events: Some(503),
            sports: Some(20),
            participants_m: None,
            participants_f: None,
            participants: Some(4237),
            highlights: None,
        }
    }

    #[test]
    fn create_needs_core_fields_only() {
        let body = json!({
            "type": "winter",
            "year": 1976,
            "country": "Sweden",
            "host": "Örnsköldsvik",
            "NOC": "SWE"
        });
        let event = EventSchema::load_json(body.to_string().as_bytes()).unwrap();
        assert_eq!(event.id, NotSet);
        assert_eq!(event.year, Set(1976));
        assert_eq!(event.participants, Set(None));
    }

    #[test]
    fn create_rejects_missing_host_and_client_ids() {
        let missing_host = json!({"type": "winter", "year": 1976, "country": "Sweden", "NOC": "SWE"});
        assert!(EventSchema::load_json(missing_host.to_string().as_bytes()).is_err());

        let with_id = json!({
            "id": 3, "type": "winter", "year": 1976,
            "country": "Sweden", "host": "Örnsköldsvik", "NOC": "SWE"
        });
        assert!(EventSchema::load_json(with_id.to_string().as_bytes()).is_err());
    }

    #[test]
    fn create_rejects_wrong_types_and_negative_counts() {
        let text_year = json!({
            "type": "summer", "year": "sixty", "country": "Italy", "host": "Rome", "NOC": "ITA"
        });
        assert!(EventSchema::load_json(text_year.to_string().as_bytes()).is_err());

        let negative = json!({
            "type": "summer", "year": 1960, "country": "Italy", "host": "Rome", "NOC": "ITA",
            "participants": -1
        });
        let err = EventSchema::load_json(negative.to_string().as_bytes()).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("participants"));
    }

    #[test]
    fn partial_load_merges_supplied_fields() {
        let body = json!({"highlights": "Record ticket sales", "participants_m": null});
        let event = EventSchema::load_partial_json(london(), body.to_string().as_bytes()).unwrap();

        assert!(event.is_changed());
        assert_eq!(event.highlights, Set(Some("Record ticket sales".to_string())));
        assert_eq!(event.participants_m, Set(None));
        assert!(!event.host.is_set());
        assert_eq!(event.id.as_ref(), &7);
    }

    #[test]
    fn partial_load_guards_required_fields_and_id() {
        let null_year = json!({"year": null});
        assert!(EventSchema::load_partial_json(london(), null_year.to_string().as_bytes()).is_err());

        let same_id = json!({"id": 7, "sports": 21});
        assert!(EventSchema::load_partial_json(london(), same_id.to_string().as_bytes()).is_ok());

        let other_id = json!({"id": 8});
        let err = EventSchema::load_partial_json(london(), other_id.to_string().as_bytes())
            .unwrap_err();
        assert_eq!(err.field.as_deref(), Some("id"));
    }
}

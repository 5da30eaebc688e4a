use sea_orm::{IntoActiveModel, Set};
use serde::Deserialize;

use super::validation::{nullable, required, validate_noc, Validate, ValidationError};
use super::RecordSchema;
use crate::database::entities::regions;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionPayload {
    #[serde(rename = "NOC")]
    pub noc: String,
    pub region: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for RegionPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_noc("NOC", &self.noc)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionPatch {
    #[serde(rename = "NOC", default)]
    pub noc: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub region: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

impl Validate for RegionPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if matches!(self.region, Some(None)) {
            return Err(ValidationError::field("region", "Field may not be null"));
        }
        Ok(())
    }
}

pub struct RegionSchema;

impl RecordSchema for RegionSchema {
    type Model = regions::Model;
    type ActiveModel = regions::ActiveModel;
    type Create = RegionPayload;
    type Patch = RegionPatch;

    fn load(payload: RegionPayload) -> regions::ActiveModel {
        regions::ActiveModel {
            noc: Set(payload.noc),
            region: Set(payload.region),
            notes: Set(payload.notes),
        }
    }

    fn load_partial(
        existing: regions::Model,
        patch: RegionPatch,
    ) -> Result<regions::ActiveModel, ValidationError> {
        if let Some(noc) = &patch.noc {
            if *noc != existing.noc {
                return Err(ValidationError::field("NOC", "NOC code cannot be changed"));
            }
        }

        let mut region = existing.into_active_model();
        if let Some(value) = required("region", patch.region)? {
            region.region = Set(value);
        }
        if let Some(notes) = patch.notes {
            region.notes = Set(notes);
        }
        Ok(region)
    }
}

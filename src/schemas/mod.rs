//! Request payload schemas.
//!
//! A schema turns a JSON body into an active model ready to be written. Two
//! modes exist: full construction for creates, and a partial merge onto an
//! existing row for patches, where only the keys present in the body change.

pub mod event;
pub mod region;
pub mod validation;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use event::EventSchema;
pub use region::RegionSchema;
pub use validation::{Validate, ValidationError};

pub trait RecordSchema: Send + Sync + 'static {
    /// Stored row, serialised as the response body
    type Model: Serialize + Send + Sync + 'static;
    /// Pending write produced by a load
    type ActiveModel: Send + 'static;
    /// Full payload accepted on create
    type Create: DeserializeOwned + Validate + Send;
    /// Payload accepted on patch, every field optional
    type Patch: DeserializeOwned + Validate + Send;

    fn load(payload: Self::Create) -> Self::ActiveModel;

    fn load_partial(
        existing: Self::Model,
        patch: Self::Patch,
    ) -> Result<Self::ActiveModel, ValidationError>;

    fn load_json(body: &[u8]) -> Result<Self::ActiveModel, ValidationError> {
        let payload: Self::Create = serde_json::from_slice(body)?;
        payload.validate()?;
        Ok(Self::load(payload))
    }

    fn load_partial_json(
        existing: Self::Model,
        body: &[u8],
    ) -> Result<Self::ActiveModel, ValidationError> {
        let patch: Self::Patch = serde_json::from_slice(body)?;
        patch.validate()?;
        Self::load_partial(existing, patch)
    }
}

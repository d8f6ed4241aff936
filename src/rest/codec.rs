//! Wire codec: JSON bodies and per-operation status tables.
//!
//! Each operation declares a [`ResponseTable`] listing the status codes it
//! treats as success and whether that code carries a body. After the
//! transport returns, the table is consulted exactly once:
//!
//! | status                         | outcome                                  |
//! |--------------------------------|------------------------------------------|
//! | registered, [`ResponseShape::Body`], body present | decode into the declared type |
//! | registered, body absent or [`ResponseShape::Empty`] | empty success (`None`)      |
//! | not registered                 | [`CloudError`] built from the body       |
//!
//! # Example
//!
//! ```rust
//! use arm_fluent::clients::HttpResponse;
//! use arm_fluent::rest::{ResponseShape, ResponseTable};
//! use std::collections::HashMap;
//!
//! const DELETE: ResponseTable = ResponseTable::new(&[
//!     (200, ResponseShape::Empty),
//!     (204, ResponseShape::Empty),
//! ]);
//!
//! let ok = HttpResponse::new(204, HashMap::new(), "");
//! assert!(DELETE.decode::<serde_json::Value>(&ok).unwrap().is_none());
//!
//! let conflict = HttpResponse::new(409, HashMap::new(), "");
//! assert!(DELETE.decode::<serde_json::Value>(&conflict).is_err());
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::HttpResponse;
use crate::rest::errors::{ArmError, CloudError};

/// What a registered success status carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// A body of the declared success type (may still be absent on the wire).
    Body,
    /// No meaningful body; any content is ignored.
    Empty,
}

/// Explicit mapping from status code to success shape for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTable {
    entries: &'static [(u16, ResponseShape)],
}

impl ResponseTable {
    /// `200` with a body.
    pub const OK: Self = Self::new(&[(200, ResponseShape::Body)]);

    /// Creates a table from `(status, shape)` pairs.
    #[must_use]
    pub const fn new(entries: &'static [(u16, ResponseShape)]) -> Self {
        Self { entries }
    }

    /// Returns the registered shape for `status`, if any.
    #[must_use]
    pub fn shape_for(&self, status: u16) -> Option<ResponseShape> {
        self.entries
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, shape)| *shape)
    }

    /// Returns the registered status codes.
    #[must_use]
    pub fn statuses(&self) -> Vec<u16> {
        self.entries.iter().map(|(code, _)| *code).collect()
    }

    /// Maps a response to a typed success or an error.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::Cloud`] for an unregistered status and
    /// [`ArmError::Decode`] if a registered body does not match `T`.
    pub fn decode<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
    ) -> Result<Option<T>, ArmError> {
        match self.shape_for(response.code) {
            None => Err(CloudError::from_response(response).into()),
            Some(ResponseShape::Empty) => Ok(None),
            Some(ResponseShape::Body) if !response.has_body() => Ok(None),
            Some(ResponseShape::Body) => serde_json::from_str(&response.body)
                .map(Some)
                .map_err(|source| ArmError::Decode {
                    status: response.code,
                    type_name: std::any::type_name::<T>(),
                    source,
                }),
        }
    }
}

/// Serializes a request body.
///
/// # Errors
///
/// Returns [`ArmError::Encode`] if `value` cannot be represented as JSON.
pub fn encode_body<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, ArmError> {
    serde_json::to_value(value).map_err(ArmError::Encode)
}

/// Requires a decoded body to be present.
///
/// # Errors
///
/// Returns [`ArmError::UnexpectedEmptyBody`] for `None`.
pub fn require_body<T>(status: u16, body: Option<T>) -> Result<T, ArmError> {
    body.ok_or(ArmError::UnexpectedEmptyBody {
        status,
        type_name: std::any::type_name::<T>(),
    })
}

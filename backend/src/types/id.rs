//! Typed ID wrappers for compile-time type safety.
//!
//! These types wrap UUIDs to prevent accidental mixing of different entity IDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Macro to generate typed ID wrappers with common trait implementations.
macro_rules! typed_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        #[schema(value_type = String, format = Uuid)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(EmployeeId, "Unique identifier for an employee.");
typed_id!(AttendanceId, "Unique identifier for an attendance record.");
typed_id!(KssModuleId, "Unique identifier for a KSS training module.");
typed_id!(KssLessonId, "Unique identifier for a KSS lesson.");
typed_id!(KssQuestionId, "Unique identifier for a KSS quiz question.");
typed_id!(KssAssignmentId, "Unique identifier for a KSS module assignment.");
typed_id!(SupplierId, "Unique identifier for a supplier.");
typed_id!(ComponentId, "Unique identifier for an inventory component.");
typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(BatchId, "Unique identifier for an import batch.");
typed_id!(CustomerId, "Unique identifier for a customer.");
typed_id!(OrderId, "Unique identifier for a sales order.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_id_round_trips_through_string() {
        let id = EmployeeId::new();
        let parsed = EmployeeId::from_str(&id.to_string()).expect("parse id");
        assert_eq!(id, parsed);
    }

    #[test]
    fn typed_id_rejects_garbage() {
        assert!(OrderId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn typed_id_serializes_as_plain_string() {
        let uuid = Uuid::parse_str("6f1c1b8e-57a4-4d62-9a3c-2b9f0d6f3a10").unwrap();
        let id = ProductId::from_uuid(uuid);
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!("6f1c1b8e-57a4-4d62-9a3c-2b9f0d6f3a10"));
    }
}

//! Newtype wrappers around [`uuid::Uuid`] for every identifier the booking
//! workflow passes around.
//!
//! Using distinct types prevents accidentally passing a `StationId` where a
//! `ModelId` is expected, which matters because the availability lookup takes
//! several of them positionally.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype ID wrapper around `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Return a reference to the inner UUID.
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
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a renter (the customer placing the booking).
    RenterId
);

define_id!(
    /// Unique identifier for a vehicle model (e.g. a make/trim offered for rent).
    ModelId
);

define_id!(
    /// Unique identifier for a pick-up station.
    StationId
);

define_id!(
    /// Unique identifier for a physical vehicle instance.
    VehicleId
);

define_id!(
    /// Unique identifier for a pending invoice issued for a hold.
    InvoiceId
);

define_id!(
    /// Opaque correlation token for a booking hold.
    ///
    /// Handed to the client on reservation and used later by the summary
    /// screen and the payment-completion path.
    BookingToken
);

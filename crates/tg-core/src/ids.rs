//! Typed identifiers for zones, tourists and indexed points.
//!
//! All IDs are `Copy + Ord + Hash`, so they work as map keys and sort keys
//! directly.  The numbering is owned by whoever stores the zones or tracks the
//! tourists; this crate never allocates IDs itself.

use std::fmt;

/// Generate a typed ID wrapper around a `u32`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialised IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u32> for $name {
            #[inline(always)]
            fn from(n: u32) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Identity of a geofence zone.
    pub struct ZoneId;
}

typed_id! {
    /// Identity of a tracked tourist (the subject of location fixes).
    pub struct TouristId;
}

typed_id! {
    /// Opaque identity of a point stored in a spatial index.
    pub struct PointId;
}

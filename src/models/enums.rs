use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors from parsing backend enum strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },
}

/// Macro to generate enum with as_str + std::str::FromStr + string serde
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(
    /// Account role as reported by the backend.
    Role {
        Patient => "patient",
        Doctor => "doctor",
        Staff => "staff",
    }
);

str_enum!(
    /// Lifecycle status of an appointment record.
    AppointmentStatus {
        Booked => "booked",
        CheckedIn => "checked in",
        Completed => "completed",
        Cancelled => "cancelled",
    }
);

impl Default for AppointmentStatus {
    fn default() -> Self {
        Self::Booked
    }
}

str_enum!(
    /// Status tag accepted by the status-update endpoint.
    StatusTag {
        CheckIn => "checkin",
        Completed => "completed",
        Booked => "booked",
    }
);

impl StatusTag {
    /// Record status the appointment holds once this tag is applied.
    pub fn target_status(self) -> AppointmentStatus {
        match self {
            Self::CheckIn => AppointmentStatus::CheckedIn,
            Self::Completed => AppointmentStatus::Completed,
            Self::Booked => AppointmentStatus::Booked,
        }
    }
}

str_enum!(
    /// Window of available slots requested from the backend.
    SlotRange {
        Week => "week",
        Month => "month",
    }
);

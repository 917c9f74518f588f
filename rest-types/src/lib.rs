use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TurfTypeTO {
    Padel,
    Futsal,
    Cricket,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatusTO {
    Vacant,
    Booked,
    Maintenance,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatusTO {
    Past,
    Vacant,
    Booked,
    Maintenance,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingTO {
    #[serde(default)]
    pub id: Uuid,
    pub date: Date,
    pub start_time: String,
    pub end_time: String,
    pub turf_type: TurfTypeTO,
    pub status: BookingStatusTO,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(rename = "createdAt")]
    #[serde(default)]
    pub created: Option<PrimitiveDateTime>,
    #[serde(rename = "$version")]
    #[serde(default)]
    pub version: Uuid,
}

/// Body of the booking upsert: one requested status change for a
/// (date, startTime, turfType) triple.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingChangeTO {
    pub date: Date,
    pub start_time: String,
    pub end_time: String,
    pub turf_type: TurfTypeTO,
    pub status: BookingStatusTO,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of the partial booking update; omitted fields keep their
/// stored values.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdateTO {
    #[serde(default)]
    pub status: Option<BookingStatusTO>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlotTO {
    pub start_time: String,
    pub end_time: String,
    pub turf_type: TurfTypeTO,
    pub status: SlotStatusTO,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserTO {
    pub name: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleTO {
    pub name: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserRoleTO {
    pub user: String,
    pub role: String,
}

#[cfg(feature = "service-impl")]
mod service_conversions {
    use super::*;

    impl From<service::booking::TurfType> for TurfTypeTO {
        fn from(turf_type: service::booking::TurfType) -> Self {
            match turf_type {
                service::booking::TurfType::Padel => Self::Padel,
                service::booking::TurfType::Futsal => Self::Futsal,
                service::booking::TurfType::Cricket => Self::Cricket,
            }
        }
    }
    impl From<TurfTypeTO> for service::booking::TurfType {
        fn from(turf_type: TurfTypeTO) -> Self {
            match turf_type {
                TurfTypeTO::Padel => Self::Padel,
                TurfTypeTO::Futsal => Self::Futsal,
                TurfTypeTO::Cricket => Self::Cricket,
            }
        }
    }

    impl From<service::booking::BookingStatus> for BookingStatusTO {
        fn from(status: service::booking::BookingStatus) -> Self {
            match status {
                service::booking::BookingStatus::Vacant => Self::Vacant,
                service::booking::BookingStatus::Booked => Self::Booked,
                service::booking::BookingStatus::Maintenance => Self::Maintenance,
            }
        }
    }
    impl From<BookingStatusTO> for service::booking::BookingStatus {
        fn from(status: BookingStatusTO) -> Self {
            match status {
                BookingStatusTO::Vacant => Self::Vacant,
                BookingStatusTO::Booked => Self::Booked,
                BookingStatusTO::Maintenance => Self::Maintenance,
            }
        }
    }

    impl From<service::schedule::SlotStatus> for SlotStatusTO {
        fn from(status: service::schedule::SlotStatus) -> Self {
            match status {
                service::schedule::SlotStatus::Past => Self::Past,
                service::schedule::SlotStatus::Vacant => Self::Vacant,
                service::schedule::SlotStatus::Booked => Self::Booked,
                service::schedule::SlotStatus::Maintenance => Self::Maintenance,
            }
        }
    }

    impl From<&service::booking::Booking> for BookingTO {
        fn from(booking: &service::booking::Booking) -> Self {
            Self {
                id: booking.id,
                date: booking.date,
                start_time: booking.start_time.to_string(),
                end_time: booking.end_time.to_string(),
                turf_type: booking.turf_type.into(),
                status: booking.status.into(),
                notes: booking.notes.as_ref().map(|notes| notes.to_string()),
                updated_by: booking.updated_by.as_ref().map(|user| user.to_string()),
                created: booking.created,
                version: booking.version,
            }
        }
    }

    impl From<&BookingChangeTO> for service::booking::BookingChange {
        fn from(change: &BookingChangeTO) -> Self {
            Self {
                date: change.date,
                start_time: change.start_time.as_str().into(),
                end_time: change.end_time.as_str().into(),
                turf_type: change.turf_type.into(),
                status: change.status.into(),
                notes: change.notes.as_ref().map(|notes| notes.as_str().into()),
            }
        }
    }

    impl From<&service::schedule::ScheduleSlot> for ScheduleSlotTO {
        fn from(slot: &service::schedule::ScheduleSlot) -> Self {
            Self {
                start_time: slot.start_time.to_string(),
                end_time: slot.end_time.to_string(),
                turf_type: slot.turf_type.into(),
                status: slot.status.into(),
            }
        }
    }

    impl From<&service::User> for UserTO {
        fn from(user: &service::User) -> Self {
            Self {
                name: user.name.to_string(),
            }
        }
    }

    impl From<&service::Role> for RoleTO {
        fn from(role: &service::Role) -> Self {
            Self {
                name: role.name.to_string(),
            }
        }
    }
}

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::Date;

use crate::booking::{BookingStatus, TurfType};
use crate::permission::Authentication;
use crate::ServiceError;

/// Displayed status of a grid slot. `Past` is computed from the wall
/// clock at read time and never stored; the stored status of a record
/// is untouched by calendar progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Past,
    Vacant,
    Booked,
    Maintenance,
}
impl From<BookingStatus> for SlotStatus {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Vacant => Self::Vacant,
            BookingStatus::Booked => Self::Booked,
            BookingStatus::Maintenance => Self::Maintenance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub start_time: Arc<str>,
    pub end_time: Arc<str>,
    pub turf_type: TurfType,
    pub status: SlotStatus,
}

#[automock(type Context=();)]
#[async_trait]
pub trait ScheduleService {
    type Context: Clone + PartialEq + Eq + Debug + Send + Sync + 'static;

    /// The administrative view: every catalog slot of the day, elapsed
    /// ones resolved as [`SlotStatus::Past`].
    async fn day_schedule(
        &self,
        date: Date,
        turf_type: TurfType,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[ScheduleSlot]>, ServiceError>;
    /// The booking view: like [`ScheduleService::day_schedule`], but
    /// slots of today whose hour already began are omitted entirely.
    async fn upcoming_day_schedule(
        &self,
        date: Date,
        turf_type: TurfType,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[ScheduleSlot]>, ServiceError>;
}

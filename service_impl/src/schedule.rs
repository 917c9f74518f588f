use std::sync::Arc;

use async_trait::async_trait;
use service::booking::{Booking, TurfType};
use service::permission::{Authentication, ADMIN_ROLE, STUDENT_ROLE};
use service::schedule::{ScheduleSlot, SlotStatus};
use service::{slot, ServiceError};
use time::Date;
use tokio::join;

/// Whether a slot can no longer be acted on. Days before `today` have
/// fully elapsed; on `today` a slot elapses once the clock hour rolls
/// past its starting hour, so the 11:00 slot stays active during the
/// 11 o'clock hour and only elapses at 12:00. Labels without a
/// readable hour never elapse on `today`.
pub fn slot_elapsed(selected_date: Date, today: Date, current_hour: u8, start_time: &str) -> bool {
    if selected_date < today {
        return true;
    }
    selected_date == today
        && matches!(slot::start_hour(start_time), Some(slot_hour) if current_hour > slot_hour)
}

/// Display status of one grid slot. Pure over its inputs: elapsed slots
/// resolve to `Past`, otherwise the stored status of the matching
/// booking is passed through unchanged, and a missing record reads as
/// `Vacant`.
pub fn resolve_slot_status(
    selected_date: Date,
    today: Date,
    current_hour: u8,
    start_time: &str,
    turf_type: TurfType,
    bookings: &[Booking],
) -> SlotStatus {
    if slot_elapsed(selected_date, today, current_hour, start_time) {
        return SlotStatus::Past;
    }
    bookings
        .iter()
        .find(|booking| {
            booking.start_time.as_ref() == start_time && booking.turf_type == turf_type
        })
        .map(|booking| SlotStatus::from(booking.status))
        .unwrap_or(SlotStatus::Vacant)
}

/// The resolved grid for one day and turf. With `only_upcoming` set,
/// slots of `today` whose hour already began are left out entirely
/// instead of being shown as past.
pub fn build_day_grid(
    selected_date: Date,
    today: Date,
    current_hour: u8,
    turf_type: TurfType,
    bookings: &[Booking],
    only_upcoming: bool,
) -> Arc<[ScheduleSlot]> {
    slot::catalog()
        .filter(|grid_slot| {
            !only_upcoming
                || selected_date != today
                || matches!(grid_slot.start_hour(), Some(slot_hour) if current_hour <= slot_hour)
        })
        .map(|grid_slot| ScheduleSlot {
            status: resolve_slot_status(
                selected_date,
                today,
                current_hour,
                &grid_slot.start_time,
                turf_type,
                bookings,
            ),
            start_time: grid_slot.start_time,
            end_time: grid_slot.end_time,
            turf_type,
        })
        .collect()
}

pub struct ScheduleServiceImpl<BookingService, PermissionService, ClockService>
where
    BookingService: service::booking::BookingService + Send + Sync,
    PermissionService: service::permission::PermissionService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
{
    pub booking_service: Arc<BookingService>,
    pub permission_service: Arc<PermissionService>,
    pub clock_service: Arc<ClockService>,
}
impl<BookingService, PermissionService, ClockService>
    ScheduleServiceImpl<BookingService, PermissionService, ClockService>
where
    BookingService: service::booking::BookingService + Send + Sync,
    PermissionService: service::permission::PermissionService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
{
    pub fn new(
        booking_service: Arc<BookingService>,
        permission_service: Arc<PermissionService>,
        clock_service: Arc<ClockService>,
    ) -> Self {
        Self {
            booking_service,
            permission_service,
            clock_service,
        }
    }
}

#[async_trait]
impl<BookingService, PermissionService, ClockService> service::schedule::ScheduleService
    for ScheduleServiceImpl<BookingService, PermissionService, ClockService>
where
    BookingService: service::booking::BookingService + Send + Sync,
    PermissionService: service::permission::PermissionService<Context = BookingService::Context>
        + Send
        + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
{
    type Context = BookingService::Context;

    async fn day_schedule(
        &self,
        date: Date,
        turf_type: TurfType,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[ScheduleSlot]>, ServiceError> {
        self.permission_service
            .check_permission(ADMIN_ROLE, context.clone())
            .await?;
        let bookings = self
            .booking_service
            .get_for_day(date, turf_type, context)
            .await?;
        Ok(build_day_grid(
            date,
            self.clock_service.date_now(),
            self.clock_service.time_now().hour(),
            turf_type,
            &bookings,
            false,
        ))
    }

    async fn upcoming_day_schedule(
        &self,
        date: Date,
        turf_type: TurfType,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[ScheduleSlot]>, ServiceError> {
        let (admin_permission, student_permission) = join!(
            self.permission_service
                .check_permission(ADMIN_ROLE, context.clone()),
            self.permission_service
                .check_permission(STUDENT_ROLE, context.clone()),
        );
        admin_permission.or(student_permission)?;
        let bookings = self
            .booking_service
            .get_for_day(date, turf_type, context)
            .await?;
        Ok(build_day_grid(
            date,
            self.clock_service.date_now(),
            self.clock_service.time_now().hour(),
            turf_type,
            &bookings,
            true,
        ))
    }
}

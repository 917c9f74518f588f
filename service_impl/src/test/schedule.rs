use crate::schedule::{build_day_grid, resolve_slot_status, slot_elapsed, ScheduleServiceImpl};
use crate::test::booking::{default_booking, default_booking_entity, default_date};
use crate::test::error_test::*;
use dao::booking::BookingEntity;
use mockall::predicate::eq;
use service::booking::{Booking, MockBookingService, TurfType};
use service::clock::MockClockService;
use service::permission::{ADMIN_ROLE, STUDENT_ROLE};
use service::schedule::{ScheduleService, SlotStatus};
use service::MockPermissionService;
use time::macros::{date, time};

fn default_bookings() -> Vec<Booking> {
    vec![
        default_booking(),
        Booking::from(&BookingEntity {
            start_time: "08:00".into(),
            end_time: "09:00".into(),
            status: dao::booking::BookingStatus::Maintenance,
            ..default_booking_entity()
        }),
    ]
}

#[test]
fn test_slot_elapsed() {
    let today = default_date();
    assert!(slot_elapsed(date!(2063 - 04 - 04), today, 0, "11:00"));
    assert!(slot_elapsed(today, today, 12, "11:00"));
    assert!(!slot_elapsed(today, today, 11, "11:00"));
    assert!(!slot_elapsed(today, today, 10, "11:00"));
    assert!(!slot_elapsed(date!(2063 - 04 - 06), today, 23, "11:00"));
    // labels without a readable hour never elapse on the current day
    assert!(!slot_elapsed(today, today, 23, "garbage"));
}

#[test]
fn test_resolve_earlier_date_is_past_regardless_of_status() {
    let status = resolve_slot_status(
        date!(2063 - 04 - 04),
        default_date(),
        10,
        "11:00",
        TurfType::Padel,
        &default_bookings(),
    );
    assert_eq!(status, SlotStatus::Past);
}

#[test]
fn test_resolve_elapsed_hour_is_past_regardless_of_status() {
    let status = resolve_slot_status(
        default_date(),
        default_date(),
        12,
        "11:00",
        TurfType::Padel,
        &default_bookings(),
    );
    assert_eq!(status, SlotStatus::Past);
}

#[test]
fn test_resolve_current_hour_still_active() {
    let status = resolve_slot_status(
        default_date(),
        default_date(),
        11,
        "11:00",
        TurfType::Padel,
        &default_bookings(),
    );
    assert_eq!(status, SlotStatus::Booked);
}

#[test]
fn test_resolve_passes_stored_status_through() {
    let bookings = default_bookings();
    let booked = resolve_slot_status(
        default_date(),
        default_date(),
        6,
        "11:00",
        TurfType::Padel,
        &bookings,
    );
    assert_eq!(booked, SlotStatus::Booked);
    let maintenance = resolve_slot_status(
        default_date(),
        default_date(),
        6,
        "08:00",
        TurfType::Padel,
        &bookings,
    );
    assert_eq!(maintenance, SlotStatus::Maintenance);
}

#[test]
fn test_resolve_absent_record_is_vacant() {
    let status = resolve_slot_status(
        date!(2063 - 04 - 06),
        default_date(),
        10,
        "15:00",
        TurfType::Padel,
        &default_bookings(),
    );
    assert_eq!(status, SlotStatus::Vacant);
}

#[test]
fn test_resolve_ignores_other_turf() {
    let status = resolve_slot_status(
        default_date(),
        default_date(),
        10,
        "11:00",
        TurfType::Futsal,
        &default_bookings(),
    );
    assert_eq!(status, SlotStatus::Vacant);
}

#[test]
fn test_resolve_empty_booking_list_is_vacant() {
    let status = resolve_slot_status(
        default_date(),
        default_date(),
        10,
        "11:00",
        TurfType::Padel,
        &[],
    );
    assert_eq!(status, SlotStatus::Vacant);
}

#[test]
fn test_resolve_is_idempotent() {
    let bookings = default_bookings();
    let first = resolve_slot_status(
        default_date(),
        default_date(),
        10,
        "11:00",
        TurfType::Padel,
        &bookings,
    );
    let second = resolve_slot_status(
        default_date(),
        default_date(),
        10,
        "11:00",
        TurfType::Padel,
        &bookings,
    );
    assert_eq!(first, second);
}

#[test]
fn test_build_day_grid_full() {
    let grid = build_day_grid(
        default_date(),
        default_date(),
        10,
        TurfType::Padel,
        &default_bookings(),
        false,
    );
    assert_eq!(grid.len(), 17);
    assert_eq!(grid[0].start_time.as_ref(), "06:00");
    assert_eq!(grid[0].status, SlotStatus::Past);
    // 08:00 holds a maintenance record but already elapsed at 10
    assert_eq!(grid[2].status, SlotStatus::Past);
    assert_eq!(grid[4].start_time.as_ref(), "10:00");
    assert_eq!(grid[4].status, SlotStatus::Vacant);
    assert_eq!(grid[5].start_time.as_ref(), "11:00");
    assert_eq!(grid[5].status, SlotStatus::Booked);
}

#[test]
fn test_build_day_grid_upcoming_omits_elapsed() {
    let grid = build_day_grid(
        default_date(),
        default_date(),
        10,
        TurfType::Padel,
        &default_bookings(),
        true,
    );
    assert_eq!(grid.len(), 13);
    assert_eq!(grid[0].start_time.as_ref(), "10:00");
    assert!(grid.iter().all(|slot| slot.status != SlotStatus::Past));
}

#[test]
fn test_build_day_grid_upcoming_keeps_other_days_complete() {
    let grid = build_day_grid(
        date!(2063 - 04 - 06),
        default_date(),
        10,
        TurfType::Padel,
        &[],
        true,
    );
    assert_eq!(grid.len(), 17);
    assert!(grid.iter().all(|slot| slot.status == SlotStatus::Vacant));
}

pub struct ScheduleServiceDependencies {
    pub booking_service: MockBookingService,
    pub permission_service: MockPermissionService,
    pub clock_service: MockClockService,
}
impl ScheduleServiceDependencies {
    pub fn build_service(
        self,
    ) -> ScheduleServiceImpl<MockBookingService, MockPermissionService, MockClockService> {
        ScheduleServiceImpl::new(
            self.booking_service.into(),
            self.permission_service.into(),
            self.clock_service.into(),
        )
    }
}

pub fn build_dependencies(permission: bool, role: &'static str) -> ScheduleServiceDependencies {
    let mut booking_service = MockBookingService::new();
    booking_service
        .expect_get_for_day()
        .returning(|_, _, _| Ok(default_bookings().into()));
    let mut permission_service = MockPermissionService::new();
    permission_service
        .expect_check_permission()
        .with(eq(role), eq(().auth()))
        .returning(move |_, _| {
            if permission {
                Ok(())
            } else {
                Err(service::ServiceError::Forbidden)
            }
        });
    permission_service
        .expect_check_permission()
        .returning(move |_, _| Err(service::ServiceError::Forbidden));
    let mut clock_service = MockClockService::new();
    clock_service.expect_time_now().returning(|| time!(10:30));
    clock_service.expect_date_now().returning(default_date);
    ScheduleServiceDependencies {
        booking_service,
        permission_service,
        clock_service,
    }
}

#[tokio::test]
async fn test_day_schedule() {
    let deps = build_dependencies(true, ADMIN_ROLE);
    let service = deps.build_service();
    let result = service
        .day_schedule(default_date(), TurfType::Padel, ().auth())
        .await;
    assert!(result.is_ok());
    let grid = result.unwrap();
    assert_eq!(grid.len(), 17);
    assert_eq!(grid[0].status, SlotStatus::Past);
    assert_eq!(grid[5].status, SlotStatus::Booked);
    assert!(grid.iter().all(|slot| slot.turf_type == TurfType::Padel));
}

#[tokio::test]
async fn test_day_schedule_requires_admin() {
    let deps = build_dependencies(true, STUDENT_ROLE);
    let service = deps.build_service();
    let result = service
        .day_schedule(default_date(), TurfType::Padel, ().auth())
        .await;
    test_forbidden(&result);
}

#[tokio::test]
async fn test_upcoming_day_schedule_as_student() {
    let deps = build_dependencies(true, STUDENT_ROLE);
    let service = deps.build_service();
    let result = service
        .upcoming_day_schedule(default_date(), TurfType::Padel, ().auth())
        .await;
    assert!(result.is_ok());
    let grid = result.unwrap();
    assert_eq!(grid.len(), 13);
    assert_eq!(grid[0].start_time.as_ref(), "10:00");
    assert!(grid.iter().all(|slot| slot.status != SlotStatus::Past));
}

#[tokio::test]
async fn test_upcoming_day_schedule_as_admin() {
    let deps = build_dependencies(true, ADMIN_ROLE);
    let service = deps.build_service();
    let result = service
        .upcoming_day_schedule(default_date(), TurfType::Padel, ().auth())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_upcoming_day_schedule_no_permission() {
    let deps = build_dependencies(false, ADMIN_ROLE);
    let service = deps.build_service();
    let result = service
        .upcoming_day_schedule(default_date(), TurfType::Padel, ().auth())
        .await;
    test_forbidden(&result);
}

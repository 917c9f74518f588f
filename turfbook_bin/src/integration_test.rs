use std::sync::Arc;

use dao::PermissionDao;
use dao_impl_sqlite::PermissionDaoImpl;
use rest::RestStateDef;
use service::booking::{BookingChange, BookingService, BookingStatus, TurfType};
use service::permission::{Authentication, MockContext};
use service::schedule::{ScheduleService, SlotStatus};
use service::ServiceError;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use time::macros::date;

use crate::{create_admin_user, RestStateImpl};

fn auth() -> Authentication<MockContext> {
    Authentication::Context(MockContext)
}

async fn setup() -> (Arc<SqlitePool>, RestStateImpl) {
    let pool = Arc::new(
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap(),
    );
    sqlx::migrate!("../migrations/sqlite")
        .run(pool.as_ref())
        .await
        .unwrap();
    let rest_state = RestStateImpl::new(pool.clone());
    create_admin_user(pool.clone(), "DEVUSER").await;
    (pool, rest_state)
}

async fn make_devuser_student(pool: Arc<SqlitePool>) {
    let permission_dao = PermissionDaoImpl::new(pool);
    permission_dao
        .delete_user_role("DEVUSER", "admin")
        .await
        .unwrap();
    permission_dao
        .add_user_role("DEVUSER", "student", "integration-test")
        .await
        .unwrap();
}

fn padel_change(start_time: &str, end_time: &str, status: BookingStatus) -> BookingChange {
    BookingChange {
        date: date!(2063 - 04 - 05),
        start_time: start_time.into(),
        end_time: end_time.into(),
        turf_type: TurfType::Padel,
        status,
        notes: Some("Integration test".into()),
    }
}

#[tokio::test]
async fn test_booking_roundtrip() {
    let (_pool, state) = setup().await;
    let booking_service = state.booking_service();

    let created = booking_service
        .upsert(&padel_change("11:00", "12:00", BookingStatus::Booked), auth())
        .await
        .unwrap();
    assert_eq!(created.status, BookingStatus::Booked);
    assert_eq!(created.updated_by, Some("DEVUSER".into()));
    assert!(created.created.is_some());

    let bookings = booking_service
        .get_for_day(date!(2063 - 04 - 05), TurfType::Padel, auth())
        .await
        .unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, created.id);
    assert_eq!(bookings[0].date, created.date);
    assert_eq!(bookings[0].start_time, created.start_time);
    assert_eq!(bookings[0].end_time, created.end_time);
    assert_eq!(bookings[0].turf_type, created.turf_type);
    assert_eq!(bookings[0].status, created.status);
    assert_eq!(bookings[0].notes, created.notes);
    assert_eq!(bookings[0].updated_by, created.updated_by);

    let fetched = booking_service.get(created.id, auth()).await.unwrap();
    assert_eq!(fetched, bookings[0]);
}

#[tokio::test]
async fn test_one_record_per_slot() {
    let (_pool, state) = setup().await;
    let booking_service = state.booking_service();

    let first = booking_service
        .upsert(&padel_change("11:00", "12:00", BookingStatus::Booked), auth())
        .await
        .unwrap();
    let second = booking_service
        .upsert(
            &padel_change("11:00", "12:00", BookingStatus::Maintenance),
            auth(),
        )
        .await
        .unwrap();

    let bookings = booking_service
        .get_for_day(date!(2063 - 04 - 05), TurfType::Padel, auth())
        .await
        .unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].status, BookingStatus::Maintenance);
    // the record is overwritten in place, not replaced
    assert_eq!(second.id, first.id);
    assert_eq!(bookings[0].id, first.id);
}

#[tokio::test]
async fn test_bookings_of_other_turfs_do_not_interfere() {
    let (_pool, state) = setup().await;
    let booking_service = state.booking_service();

    booking_service
        .upsert(&padel_change("11:00", "12:00", BookingStatus::Booked), auth())
        .await
        .unwrap();
    booking_service
        .upsert(
            &BookingChange {
                turf_type: TurfType::Cricket,
                ..padel_change("11:00", "12:00", BookingStatus::Maintenance)
            },
            auth(),
        )
        .await
        .unwrap();

    let padel = booking_service
        .get_for_day(date!(2063 - 04 - 05), TurfType::Padel, auth())
        .await
        .unwrap();
    assert_eq!(padel.len(), 1);
    assert_eq!(padel[0].status, BookingStatus::Booked);
    let cricket = booking_service
        .get_for_day(date!(2063 - 04 - 05), TurfType::Cricket, auth())
        .await
        .unwrap();
    assert_eq!(cricket.len(), 1);
    assert_eq!(cricket[0].status, BookingStatus::Maintenance);
}

#[tokio::test]
async fn test_past_date_rejected() {
    let (_pool, state) = setup().await;
    let booking_service = state.booking_service();

    let result = booking_service
        .upsert(
            &BookingChange {
                date: date!(2020 - 01 - 01),
                ..padel_change("11:00", "12:00", BookingStatus::Booked)
            },
            auth(),
        )
        .await;
    assert!(matches!(result, Err(ServiceError::SlotElapsed(_, _))));
}

#[tokio::test]
async fn test_schedule_reflects_stored_bookings() {
    let (_pool, state) = setup().await;
    let booking_service = state.booking_service();
    let schedule_service = state.schedule_service();

    booking_service
        .upsert(&padel_change("11:00", "12:00", BookingStatus::Booked), auth())
        .await
        .unwrap();
    booking_service
        .upsert(
            &padel_change("08:00", "09:00", BookingStatus::Maintenance),
            auth(),
        )
        .await
        .unwrap();

    let grid = schedule_service
        .day_schedule(date!(2063 - 04 - 05), TurfType::Padel, auth())
        .await
        .unwrap();
    assert_eq!(grid.len(), 17);
    let status_of = |start_time: &str| {
        grid.iter()
            .find(|slot| slot.start_time.as_ref() == start_time)
            .unwrap()
            .status
    };
    assert_eq!(status_of("11:00"), SlotStatus::Booked);
    assert_eq!(status_of("08:00"), SlotStatus::Maintenance);
    assert_eq!(status_of("10:00"), SlotStatus::Vacant);
}

#[tokio::test]
async fn test_student_can_only_release() {
    let (pool, state) = setup().await;
    let booking_service = state.booking_service();

    booking_service
        .upsert(&padel_change("11:00", "12:00", BookingStatus::Booked), auth())
        .await
        .unwrap();

    make_devuser_student(pool).await;

    // booking and maintenance stay administrative actions
    let result = booking_service
        .upsert(&padel_change("12:00", "13:00", BookingStatus::Booked), auth())
        .await;
    assert!(matches!(result, Err(ServiceError::Forbidden)));
    let result = booking_service
        .upsert(
            &padel_change("11:00", "12:00", BookingStatus::Maintenance),
            auth(),
        )
        .await;
    assert!(matches!(result, Err(ServiceError::Forbidden)));

    // releasing a slot without a record is rejected as well
    let result = booking_service
        .upsert(&padel_change("12:00", "13:00", BookingStatus::Vacant), auth())
        .await;
    assert!(matches!(result, Err(ServiceError::Forbidden)));

    // the existing booked slot can be given back
    let released = booking_service
        .upsert(&padel_change("11:00", "12:00", BookingStatus::Vacant), auth())
        .await
        .unwrap();
    assert_eq!(released.status, BookingStatus::Vacant);
}

#[tokio::test]
async fn test_delete_booking() {
    let (_pool, state) = setup().await;
    let booking_service = state.booking_service();

    let created = booking_service
        .upsert(&padel_change("11:00", "12:00", BookingStatus::Booked), auth())
        .await
        .unwrap();
    booking_service.delete(created.id, auth()).await.unwrap();

    let bookings = booking_service
        .get_for_day(date!(2063 - 04 - 05), TurfType::Padel, auth())
        .await
        .unwrap();
    assert!(bookings.is_empty());

    let result = booking_service.delete(created.id, auth()).await;
    assert!(matches!(result, Err(ServiceError::EntityNotFound(_))));
}

use service::{permission::Authentication, ValidationFailureItem};
use time::{Date, Month, PrimitiveDateTime, Time};
use uuid::Uuid;

pub fn test_forbidden<T>(result: &Result<T, service::ServiceError>) {
    if let Err(service::ServiceError::Forbidden) = result {
        // All good
    } else {
        panic!("Expected forbidden error");
    }
}

pub fn test_not_found<T>(result: &Result<T, service::ServiceError>, target_id: &Uuid) {
    if let Err(service::ServiceError::EntityNotFound(id)) = result {
        assert_eq!(
            id, target_id,
            "Expected entity {} not found but got {}",
            target_id, id
        );
    } else {
        panic!("Expected entity {} not found error", target_id);
    }
}

pub fn test_slot_elapsed<T>(
    result: &Result<T, service::ServiceError>,
    target_date: &Date,
    target_start_time: &str,
) {
    if let Err(service::ServiceError::SlotElapsed(date, start_time)) = result {
        assert_eq!(date, target_date);
        assert_eq!(start_time.as_ref(), target_start_time);
    } else {
        panic!("Expected slot elapsed error for {target_start_time} on {target_date}");
    }
}

pub fn test_validation_error<T>(
    result: &Result<T, service::ServiceError>,
    validation_failure: &ValidationFailureItem,
    fail_count: usize,
) {
    if let Err(service::ServiceError::ValidationError(validation_failure_items)) = result {
        if !validation_failure_items.contains(validation_failure) {
            panic!(
                "Validation failure not found: {:?} in {:?}",
                validation_failure, validation_failure_items
            );
        }
        assert_eq!(fail_count, validation_failure_items.len());
    } else {
        panic!("Expected validation error");
    }
}

pub fn generate_default_datetime() -> PrimitiveDateTime {
    PrimitiveDateTime::new(
        Date::from_calendar_date(2063, Month::April, 5).unwrap(),
        Time::from_hms(10, 30, 0).unwrap(),
    )
}

pub trait NoneTypeExt {
    fn auth(&self) -> Authentication<()>;
}
impl NoneTypeExt for () {
    fn auth(&self) -> Authentication<()> {
        Authentication::Context(())
    }
}

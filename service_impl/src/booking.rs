use std::sync::Arc;

use async_trait::async_trait;
use dao::booking::BookingEntity;
use service::booking::{Booking, BookingChange, BookingService, BookingStatus};
use service::permission::{Authentication, ADMIN_ROLE, STUDENT_ROLE};
use service::{slot, ServiceError, ValidationFailureItem};
use time::Date;
use tokio::join;
use uuid::Uuid;

use crate::schedule::slot_elapsed;

const BOOKING_SERVICE_PROCESS: &str = "booking-service";

pub struct BookingServiceImpl<BookingDao, PermissionService, ClockService, UuidService>
where
    BookingDao: dao::booking::BookingDao + Send + Sync,
    PermissionService: service::permission::PermissionService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
    UuidService: service::uuid_service::UuidService + Send + Sync,
{
    pub booking_dao: Arc<BookingDao>,
    pub permission_service: Arc<PermissionService>,
    pub clock_service: Arc<ClockService>,
    pub uuid_service: Arc<UuidService>,
}
impl<BookingDao, PermissionService, ClockService, UuidService>
    BookingServiceImpl<BookingDao, PermissionService, ClockService, UuidService>
where
    BookingDao: dao::booking::BookingDao + Send + Sync,
    PermissionService: service::permission::PermissionService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
    UuidService: service::uuid_service::UuidService + Send + Sync,
{
    pub fn new(
        booking_dao: Arc<BookingDao>,
        permission_service: Arc<PermissionService>,
        clock_service: Arc<ClockService>,
        uuid_service: Arc<UuidService>,
    ) -> Self {
        Self {
            booking_dao,
            permission_service,
            clock_service,
            uuid_service,
        }
    }

    fn verify_grid_slot(change: &BookingChange) -> Result<(), ServiceError> {
        let mut validation = Vec::new();
        match slot::find_slot(&change.start_time) {
            None => validation.push(ValidationFailureItem::InvalidValue("start_time".into())),
            Some(grid_slot) => {
                if grid_slot.end_time != change.end_time {
                    validation.push(ValidationFailureItem::InvalidValue("end_time".into()));
                }
            }
        }
        if !validation.is_empty() {
            return Err(ServiceError::ValidationError(validation.into()));
        }
        Ok(())
    }

    fn verify_not_elapsed(
        &self,
        date: Date,
        start_time: &Arc<str>,
    ) -> Result<(), ServiceError> {
        let today = self.clock_service.date_now();
        let current_hour = self.clock_service.time_now().hour();
        if slot_elapsed(date, today, current_hour, start_time) {
            return Err(ServiceError::SlotElapsed(date, start_time.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl<BookingDao, PermissionService, ClockService, UuidService> BookingService
    for BookingServiceImpl<BookingDao, PermissionService, ClockService, UuidService>
where
    BookingDao: dao::booking::BookingDao + Send + Sync,
    PermissionService: service::permission::PermissionService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
    UuidService: service::uuid_service::UuidService + Send + Sync,
{
    type Context = PermissionService::Context;

    async fn get_for_day(
        &self,
        date: Date,
        turf_type: service::booking::TurfType,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[Booking]>, ServiceError> {
        let (admin_permission, student_permission) = join!(
            self.permission_service
                .check_permission(ADMIN_ROLE, context.clone()),
            self.permission_service
                .check_permission(STUDENT_ROLE, context),
        );
        admin_permission.or(student_permission)?;
        Ok(self
            .booking_dao
            .find_by_day_and_turf(date, turf_type.into())
            .await?
            .iter()
            .map(Booking::from)
            .collect())
    }

    async fn get(
        &self,
        id: Uuid,
        context: Authentication<Self::Context>,
    ) -> Result<Booking, ServiceError> {
        let (admin_permission, student_permission) = join!(
            self.permission_service
                .check_permission(ADMIN_ROLE, context.clone()),
            self.permission_service
                .check_permission(STUDENT_ROLE, context),
        );
        admin_permission.or(student_permission)?;
        let booking_entity = self.booking_dao.find_by_id(id).await?;
        let booking = booking_entity
            .as_ref()
            .map(Booking::from)
            .ok_or(ServiceError::EntityNotFound(id))?;
        Ok(booking)
    }

    async fn upsert(
        &self,
        change: &BookingChange,
        context: Authentication<Self::Context>,
    ) -> Result<Booking, ServiceError> {
        let (admin_permission, student_permission) = join!(
            self.permission_service
                .check_permission(ADMIN_ROLE, context.clone()),
            self.permission_service
                .check_permission(STUDENT_ROLE, context.clone()),
        );
        let is_admin = admin_permission.is_ok();
        admin_permission.or(student_permission)?;

        Self::verify_grid_slot(change)?;
        self.verify_not_elapsed(change.date, &change.start_time)?;

        let existing = self
            .booking_dao
            .find_by_key(change.date, &change.start_time, change.turf_type.into())
            .await?;

        // Non-admins may only release an already written slot back to
        // vacant; everything else stays an administrative action.
        if !is_admin && (existing.is_none() || change.status != BookingStatus::Vacant) {
            return Err(ServiceError::Forbidden);
        }

        let updated_by = self.permission_service.current_user_id(context).await?;
        let entity = match existing {
            Some(existing) => {
                tracing::info!(
                    "Overwriting booking for {} {} ({})",
                    existing.date,
                    existing.start_time,
                    change.turf_type.as_str()
                );
                BookingEntity {
                    status: change.status.into(),
                    notes: change.notes.clone(),
                    updated_by,
                    version: self.uuid_service.new_uuid("booking-version"),
                    ..existing
                }
            }
            None => {
                tracing::info!(
                    "Creating booking for {} {} ({})",
                    change.date,
                    change.start_time,
                    change.turf_type.as_str()
                );
                BookingEntity {
                    id: self.uuid_service.new_uuid("booking-id"),
                    date: change.date,
                    start_time: change.start_time.clone(),
                    end_time: change.end_time.clone(),
                    turf_type: change.turf_type.into(),
                    status: change.status.into(),
                    notes: change.notes.clone(),
                    updated_by,
                    created: self.clock_service.date_time_now(),
                    version: self.uuid_service.new_uuid("booking-version"),
                }
            }
        };
        self.booking_dao
            .upsert(&entity, BOOKING_SERVICE_PROCESS)
            .await?;
        Ok(Booking::from(&entity))
    }

    async fn update(
        &self,
        id: Uuid,
        status: Option<BookingStatus>,
        notes: Option<Arc<str>>,
        context: Authentication<Self::Context>,
    ) -> Result<Booking, ServiceError> {
        self.permission_service
            .check_permission(ADMIN_ROLE, context.clone())
            .await?;
        let existing = self
            .booking_dao
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::EntityNotFound(id))?;
        self.verify_not_elapsed(existing.date, &existing.start_time)?;

        let updated_by = self.permission_service.current_user_id(context).await?;
        let status = status.map(Into::into).unwrap_or(existing.status);
        let notes = notes.or_else(|| existing.notes.clone());
        let entity = BookingEntity {
            status,
            notes,
            updated_by,
            version: self.uuid_service.new_uuid("booking-version"),
            ..existing
        };
        self.booking_dao
            .update(&entity, BOOKING_SERVICE_PROCESS)
            .await?;
        Ok(Booking::from(&entity))
    }

    async fn delete(
        &self,
        id: Uuid,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError> {
        self.permission_service
            .check_permission(ADMIN_ROLE, context)
            .await?;
        self.booking_dao
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::EntityNotFound(id))?;
        self.booking_dao.delete(id).await?;
        Ok(())
    }
}

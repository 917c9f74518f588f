use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::permission::Authentication;
use crate::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurfType {
    Padel,
    Futsal,
    Cricket,
}
impl TurfType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurfType::Padel => "padel",
            TurfType::Futsal => "futsal",
            TurfType::Cricket => "cricket",
        }
    }
}
impl From<dao::booking::TurfType> for TurfType {
    fn from(turf_type: dao::booking::TurfType) -> Self {
        match turf_type {
            dao::booking::TurfType::Padel => Self::Padel,
            dao::booking::TurfType::Futsal => Self::Futsal,
            dao::booking::TurfType::Cricket => Self::Cricket,
        }
    }
}
impl From<TurfType> for dao::booking::TurfType {
    fn from(turf_type: TurfType) -> Self {
        match turf_type {
            TurfType::Padel => Self::Padel,
            TurfType::Futsal => Self::Futsal,
            TurfType::Cricket => Self::Cricket,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Vacant,
    Booked,
    Maintenance,
}
impl From<dao::booking::BookingStatus> for BookingStatus {
    fn from(status: dao::booking::BookingStatus) -> Self {
        match status {
            dao::booking::BookingStatus::Vacant => Self::Vacant,
            dao::booking::BookingStatus::Booked => Self::Booked,
            dao::booking::BookingStatus::Maintenance => Self::Maintenance,
        }
    }
}
impl From<BookingStatus> for dao::booking::BookingStatus {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Vacant => Self::Vacant,
            BookingStatus::Booked => Self::Booked,
            BookingStatus::Maintenance => Self::Maintenance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub date: Date,
    pub start_time: Arc<str>,
    pub end_time: Arc<str>,
    pub turf_type: TurfType,
    pub status: BookingStatus,
    pub notes: Option<Arc<str>>,
    pub updated_by: Option<Arc<str>>,
    pub created: Option<PrimitiveDateTime>,
    pub version: Uuid,
}

impl From<&dao::booking::BookingEntity> for Booking {
    fn from(booking: &dao::booking::BookingEntity) -> Self {
        Self {
            id: booking.id,
            date: booking.date,
            start_time: booking.start_time.clone(),
            end_time: booking.end_time.clone(),
            turf_type: booking.turf_type.into(),
            status: booking.status.into(),
            notes: booking.notes.clone(),
            updated_by: booking.updated_by.clone(),
            created: Some(booking.created),
            version: booking.version,
        }
    }
}

impl TryFrom<&Booking> for dao::booking::BookingEntity {
    type Error = ServiceError;
    fn try_from(booking: &Booking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: booking.id,
            date: booking.date,
            start_time: booking.start_time.clone(),
            end_time: booking.end_time.clone(),
            turf_type: booking.turf_type.into(),
            status: booking.status.into(),
            notes: booking.notes.clone(),
            updated_by: booking.updated_by.clone(),
            created: booking.created.ok_or(ServiceError::InternalError)?,
            version: booking.version,
        })
    }
}

/// A requested status change for one (date, start_time, turf_type)
/// triple, before the transition rules have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingChange {
    pub date: Date,
    pub start_time: Arc<str>,
    pub end_time: Arc<str>,
    pub turf_type: TurfType,
    pub status: BookingStatus,
    pub notes: Option<Arc<str>>,
}

#[automock(type Context=();)]
#[async_trait]
pub trait BookingService {
    type Context: Clone + PartialEq + Eq + Debug + Send + Sync + 'static;

    async fn get_for_day(
        &self,
        date: Date,
        turf_type: TurfType,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[Booking]>, ServiceError>;
    async fn get(
        &self,
        id: Uuid,
        context: Authentication<Self::Context>,
    ) -> Result<Booking, ServiceError>;
    /// Applies a status change to the slot named by the change's
    /// (date, start_time, turf_type) triple, creating the record if the
    /// slot has never been written.
    async fn upsert(
        &self,
        change: &BookingChange,
        context: Authentication<Self::Context>,
    ) -> Result<Booking, ServiceError>;
    /// Partial update of an existing record; omitted fields keep their
    /// stored values.
    async fn update(
        &self,
        id: Uuid,
        status: Option<BookingStatus>,
        notes: Option<Arc<str>>,
        context: Authentication<Self::Context>,
    ) -> Result<Booking, ServiceError>;
    async fn delete(
        &self,
        id: Uuid,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError>;
}

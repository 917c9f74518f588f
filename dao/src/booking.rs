use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::DaoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurfType {
    Padel,
    Futsal,
    Cricket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Vacant,
    Booked,
    Maintenance,
}

/// One stored booking. At most one row exists per
/// (date, start_time, turf_type) - a missing row reads as vacant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingEntity {
    pub id: Uuid,
    pub date: Date,
    pub start_time: Arc<str>,
    pub end_time: Arc<str>,
    pub turf_type: TurfType,
    pub status: BookingStatus,
    pub notes: Option<Arc<str>>,
    pub updated_by: Option<Arc<str>>,
    pub created: PrimitiveDateTime,
    pub version: Uuid,
}

#[automock]
#[async_trait]
pub trait BookingDao {
    async fn find_by_day_and_turf(
        &self,
        date: Date,
        turf_type: TurfType,
    ) -> Result<Arc<[BookingEntity]>, DaoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookingEntity>, DaoError>;
    async fn find_by_key(
        &self,
        date: Date,
        start_time: &str,
        turf_type: TurfType,
    ) -> Result<Option<BookingEntity>, DaoError>;
    /// Insert the entity, or overwrite the row holding its
    /// (date, start_time, turf_type) key. Last writer wins.
    async fn upsert(&self, entity: &BookingEntity, process: &str) -> Result<(), DaoError>;
    async fn update(&self, entity: &BookingEntity, process: &str) -> Result<(), DaoError>;
    async fn delete(&self, id: Uuid) -> Result<(), DaoError>;
}

use std::sync::Arc;

use crate::ResultDbErrorExt;
use async_trait::async_trait;
use dao::{
    booking::{BookingDao, BookingEntity, BookingStatus, TurfType},
    DaoError,
};
use sqlx::SqlitePool;
use time::{
    format_description::well_known::Iso8601, Date, PrimitiveDateTime,
};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct BookingDb {
    id: Vec<u8>,
    date: String,
    start_time: String,
    end_time: String,
    turf_type: String,
    status: String,
    notes: Option<String>,
    updated_by: Option<String>,
    created: String,
    update_version: Vec<u8>,
}
impl TryFrom<&BookingDb> for BookingEntity {
    type Error = DaoError;
    fn try_from(booking: &BookingDb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::from_slice(booking.id.as_ref()).map_db_error()?,
            date: Date::parse(&booking.date, &Iso8601::DATE)?,
            start_time: booking.start_time.as_str().into(),
            end_time: booking.end_time.as_str().into(),
            turf_type: turf_type_from_db(&booking.turf_type)?,
            status: status_from_db(&booking.status)?,
            notes: booking.notes.as_ref().map(|notes| notes.as_str().into()),
            updated_by: booking
                .updated_by
                .as_ref()
                .map(|user| user.as_str().into()),
            created: PrimitiveDateTime::parse(&booking.created, &Iso8601::DATE_TIME)?,
            version: Uuid::from_slice(&booking.update_version).map_db_error()?,
        })
    }
}

fn turf_type_to_db(turf_type: TurfType) -> &'static str {
    match turf_type {
        TurfType::Padel => "padel",
        TurfType::Futsal => "futsal",
        TurfType::Cricket => "cricket",
    }
}
fn turf_type_from_db(value: &str) -> Result<TurfType, DaoError> {
    match value {
        "padel" => Ok(TurfType::Padel),
        "futsal" => Ok(TurfType::Futsal),
        "cricket" => Ok(TurfType::Cricket),
        _ => Err(DaoError::EnumValueNotKnown(value.into())),
    }
}
fn status_to_db(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Vacant => "vacant",
        BookingStatus::Booked => "booked",
        BookingStatus::Maintenance => "maintenance",
    }
}
fn status_from_db(value: &str) -> Result<BookingStatus, DaoError> {
    match value {
        "vacant" => Ok(BookingStatus::Vacant),
        "booked" => Ok(BookingStatus::Booked),
        "maintenance" => Ok(BookingStatus::Maintenance),
        _ => Err(DaoError::EnumValueNotKnown(value.into())),
    }
}

const SELECT_COLUMNS: &str = r"SELECT id, date, start_time, end_time, turf_type, status, notes, updated_by, created, update_version FROM booking";

pub struct BookingDaoImpl {
    pool: Arc<SqlitePool>,
}
impl BookingDaoImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingDao for BookingDaoImpl {
    async fn find_by_day_and_turf(
        &self,
        date: Date,
        turf_type: TurfType,
    ) -> Result<Arc<[BookingEntity]>, DaoError> {
        let date = date.format(&Iso8601::DATE).map_db_error()?;
        sqlx::query_as::<_, BookingDb>(&format!(
            "{SELECT_COLUMNS} WHERE date = ? AND turf_type = ? ORDER BY start_time"
        ))
        .bind(date)
        .bind(turf_type_to_db(turf_type))
        .fetch_all(self.pool.as_ref())
        .await
        .map_db_error()?
        .iter()
        .map(BookingEntity::try_from)
        .collect::<Result<Arc<[BookingEntity]>, DaoError>>()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookingEntity>, DaoError> {
        sqlx::query_as::<_, BookingDb>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.as_bytes().to_vec())
            .fetch_optional(self.pool.as_ref())
            .await
            .map_db_error()?
            .as_ref()
            .map(BookingEntity::try_from)
            .transpose()
    }

    async fn find_by_key(
        &self,
        date: Date,
        start_time: &str,
        turf_type: TurfType,
    ) -> Result<Option<BookingEntity>, DaoError> {
        let date = date.format(&Iso8601::DATE).map_db_error()?;
        sqlx::query_as::<_, BookingDb>(&format!(
            "{SELECT_COLUMNS} WHERE date = ? AND start_time = ? AND turf_type = ?"
        ))
        .bind(date)
        .bind(start_time)
        .bind(turf_type_to_db(turf_type))
        .fetch_optional(self.pool.as_ref())
        .await
        .map_db_error()?
        .as_ref()
        .map(BookingEntity::try_from)
        .transpose()
    }

    async fn upsert(&self, entity: &BookingEntity, process: &str) -> Result<(), DaoError> {
        let date = entity.date.format(&Iso8601::DATE).map_db_error()?;
        let created = entity.created.format(&Iso8601::DATE_TIME).map_db_error()?;
        sqlx::query(
            r"INSERT INTO booking (id, date, start_time, end_time, turf_type, status, notes, updated_by, created, update_version, update_process)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(date, start_time, turf_type) DO UPDATE SET
                    status = excluded.status,
                    notes = excluded.notes,
                    updated_by = excluded.updated_by,
                    update_version = excluded.update_version,
                    update_process = excluded.update_process",
        )
        .bind(entity.id.as_bytes().to_vec())
        .bind(date)
        .bind(entity.start_time.as_ref())
        .bind(entity.end_time.as_ref())
        .bind(turf_type_to_db(entity.turf_type))
        .bind(status_to_db(entity.status))
        .bind(entity.notes.as_ref().map(|notes| notes.to_string()))
        .bind(entity.updated_by.as_ref().map(|user| user.to_string()))
        .bind(created)
        .bind(entity.version.as_bytes().to_vec())
        .bind(process)
        .execute(self.pool.as_ref())
        .await
        .map_db_error()?;
        Ok(())
    }

    async fn update(&self, entity: &BookingEntity, process: &str) -> Result<(), DaoError> {
        sqlx::query(
            r"UPDATE booking SET status = ?, notes = ?, updated_by = ?, update_version = ?, update_process = ? WHERE id = ?",
        )
        .bind(status_to_db(entity.status))
        .bind(entity.notes.as_ref().map(|notes| notes.to_string()))
        .bind(entity.updated_by.as_ref().map(|user| user.to_string()))
        .bind(entity.version.as_bytes().to_vec())
        .bind(process)
        .bind(entity.id.as_bytes().to_vec())
        .execute(self.pool.as_ref())
        .await
        .map_db_error()?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DaoError> {
        sqlx::query(r"DELETE FROM booking WHERE id = ?")
            .bind(id.as_bytes().to_vec())
            .execute(self.pool.as_ref())
            .await
            .map_db_error()?;
        Ok(())
    }
}

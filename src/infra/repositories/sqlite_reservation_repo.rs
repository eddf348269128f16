use crate::domain::{
    models::reservation::{Reservation, ReservationDetails, ReservationKind},
    ports::ReservationRepository,
    services::availability::Slot,
};
use crate::error::AppError;
use crate::infra::repositories::rows::{
    first_conflict, into_reservations, table_name, write_error, OutdoorRow, RoomRow, TableRow,
};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, FromRow, Row, SqlitePool};
use tracing::error;

pub struct SqliteReservationRepo {
    pool: SqlitePool,
}

impl SqliteReservationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_rows<'q, R>(&self, sql: &'q str, args: &[&'q str]) -> Result<Vec<Reservation>, AppError>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
        Reservation: TryFrom<R, Error = AppError>,
    {
        let mut query = sqlx::query_as::<sqlx::Sqlite, R>(sql);
        for arg in args {
            query = query.bind(*arg);
        }
        into_reservations(query.fetch_all(&self.pool).await.map_err(AppError::Database)?)
    }

    async fn select(&self, kind: ReservationKind, filter: &str, args: &[&str]) -> Result<Vec<Reservation>, AppError> {
        let sql = format!("SELECT * FROM {} {} ORDER BY created_at ASC", table_name(kind), filter);
        match kind {
            ReservationKind::Outdoor => self.fetch_rows::<OutdoorRow>(&sql, args).await,
            ReservationKind::Table => self.fetch_rows::<TableRow>(&sql, args).await,
            ReservationKind::Room => self.fetch_rows::<RoomRow>(&sql, args).await,
        }
    }
}

#[async_trait]
impl ReservationRepository for SqliteReservationRepo {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        let c = &reservation.contact;
        match &reservation.details {
            ReservationDetails::Outdoor(d) => sqlx::query_as::<_, OutdoorRow>(
                "INSERT INTO outdoor_reservations (id, customer_name, email, phone_number, number_of_guests, event_type, date, time_from, time_to, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING *"
            )
                .bind(&reservation.id).bind(&c.customer_name).bind(&c.email).bind(&c.phone_number).bind(c.number_of_guests)
                .bind(&d.event_type).bind(d.date).bind(d.time_from.as_str()).bind(d.time_to.as_str())
                .bind(reservation.created_at).bind(reservation.updated_at)
                .fetch_one(&self.pool).await.map_err(write_error(reservation))?
                .try_into(),
            ReservationDetails::Table(d) => sqlx::query_as::<_, TableRow>(
                "INSERT INTO table_reservations (id, customer_name, email, phone_number, number_of_guests, table_no, date, time_from, time_to, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING *"
            )
                .bind(&reservation.id).bind(&c.customer_name).bind(&c.email).bind(&c.phone_number).bind(c.number_of_guests)
                .bind(&d.table_no).bind(d.date).bind(d.time_from.as_str()).bind(d.time_to.as_str())
                .bind(reservation.created_at).bind(reservation.updated_at)
                .fetch_one(&self.pool).await.map_err(write_error(reservation))?
                .try_into(),
            ReservationDetails::Room(d) => sqlx::query_as::<_, RoomRow>(
                "INSERT INTO room_reservations (id, customer_name, email, phone_number, number_of_guests, room_type, room_number, check_in_date, check_in_time, check_out_date, check_out_time, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 RETURNING *"
            )
                .bind(&reservation.id).bind(&c.customer_name).bind(&c.email).bind(&c.phone_number).bind(c.number_of_guests)
                .bind(d.room_type.as_str()).bind(&d.room_number)
                .bind(d.check_in_date).bind(d.check_in_time.as_str()).bind(d.check_out_date).bind(d.check_out_time.as_str())
                .bind(reservation.created_at).bind(reservation.updated_at)
                .fetch_one(&self.pool).await.map_err(write_error(reservation))?
                .try_into(),
        }
    }

    async fn find_by_id(&self, kind: ReservationKind, id: &str) -> Result<Option<Reservation>, AppError> {
        Ok(self.select(kind, "WHERE id = ?", &[id]).await?.into_iter().next())
    }

    async fn list(&self, kind: ReservationKind) -> Result<Vec<Reservation>, AppError> {
        self.select(kind, "", &[]).await
    }

    async fn list_by_customer_name(&self, kind: ReservationKind, customer_name: &str) -> Result<Vec<Reservation>, AppError> {
        self.select(kind, "WHERE customer_name = ?", &[customer_name]).await
    }

    async fn list_by_email(&self, kind: ReservationKind, email: &str) -> Result<Vec<Reservation>, AppError> {
        self.select(kind, "WHERE email = ?", &[email]).await
    }

    async fn count(&self, kind: ReservationKind) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) as count FROM {}", table_name(kind));
        let row = sqlx::query(&sql).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn update(&self, reservation: &Reservation) -> Result<Option<Reservation>, AppError> {
        let c = &reservation.contact;
        let updated = match &reservation.details {
            ReservationDetails::Outdoor(d) => sqlx::query_as::<_, OutdoorRow>(
                "UPDATE outdoor_reservations SET customer_name=?, email=?, phone_number=?, number_of_guests=?, event_type=?, date=?, time_from=?, time_to=?, updated_at=?
                 WHERE id=?
                 RETURNING *"
            )
                .bind(&c.customer_name).bind(&c.email).bind(&c.phone_number).bind(c.number_of_guests)
                .bind(&d.event_type).bind(d.date).bind(d.time_from.as_str()).bind(d.time_to.as_str())
                .bind(reservation.updated_at).bind(&reservation.id)
                .fetch_optional(&self.pool).await.map_err(write_error(reservation))?
                .map(Reservation::try_from),
            ReservationDetails::Table(d) => sqlx::query_as::<_, TableRow>(
                "UPDATE table_reservations SET customer_name=?, email=?, phone_number=?, number_of_guests=?, table_no=?, date=?, time_from=?, time_to=?, updated_at=?
                 WHERE id=?
                 RETURNING *"
            )
                .bind(&c.customer_name).bind(&c.email).bind(&c.phone_number).bind(c.number_of_guests)
                .bind(&d.table_no).bind(d.date).bind(d.time_from.as_str()).bind(d.time_to.as_str())
                .bind(reservation.updated_at).bind(&reservation.id)
                .fetch_optional(&self.pool).await.map_err(write_error(reservation))?
                .map(Reservation::try_from),
            ReservationDetails::Room(d) => sqlx::query_as::<_, RoomRow>(
                "UPDATE room_reservations SET customer_name=?, email=?, phone_number=?, number_of_guests=?, room_type=?, room_number=?, check_in_date=?, check_in_time=?, check_out_date=?, check_out_time=?, updated_at=?
                 WHERE id=?
                 RETURNING *"
            )
                .bind(&c.customer_name).bind(&c.email).bind(&c.phone_number).bind(c.number_of_guests)
                .bind(d.room_type.as_str()).bind(&d.room_number)
                .bind(d.check_in_date).bind(d.check_in_time.as_str()).bind(d.check_out_date).bind(d.check_out_time.as_str())
                .bind(reservation.updated_at).bind(&reservation.id)
                .fetch_optional(&self.pool).await.map_err(write_error(reservation))?
                .map(Reservation::try_from),
        };
        updated.transpose()
    }

    async fn delete(&self, kind: ReservationKind, id: &str) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", table_name(kind));
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite Reservation Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Reservation not found".into())); }
        Ok(())
    }

    async fn find_conflict(&self, slot: &Slot, exclude_id: Option<&str>) -> Result<Option<Reservation>, AppError> {
        let exclude = exclude_id.unwrap_or("");
        let candidates = match slot {
            Slot::Outdoor { date, .. } => into_reservations(
                sqlx::query_as::<_, OutdoorRow>("SELECT * FROM outdoor_reservations WHERE date = ? AND id != ? ORDER BY created_at ASC")
                    .bind(date).bind(exclude)
                    .fetch_all(&self.pool).await.map_err(AppError::Database)?
            )?,
            Slot::Table { table_no, date, .. } => into_reservations(
                sqlx::query_as::<_, TableRow>("SELECT * FROM table_reservations WHERE table_no = ? AND date = ? AND id != ? ORDER BY created_at ASC")
                    .bind(table_no).bind(date).bind(exclude)
                    .fetch_all(&self.pool).await.map_err(AppError::Database)?
            )?,
            // Stored stays are well-ordered, so every clash shares at least one day.
            Slot::Room(stay) => into_reservations(
                sqlx::query_as::<_, RoomRow>("SELECT * FROM room_reservations WHERE room_number = ? AND id != ? AND check_in_date <= ? AND check_out_date >= ? ORDER BY created_at ASC")
                    .bind(&stay.room_number).bind(exclude).bind(stay.check_out_date).bind(stay.check_in_date)
                    .fetch_all(&self.pool).await.map_err(AppError::Database)?
            )?,
        };
        Ok(first_conflict(slot, candidates))
    }
}

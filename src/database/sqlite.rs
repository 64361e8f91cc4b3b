// ABOUTME: SQLite implementation of the DatabaseProvider trait
// ABOUTME: Connection pool, inline schema migrations, and row mapping for all domain tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Randevu

//! # SQLite Database
//!
//! Stores all domain entities in a single SQLite file (or in-memory database
//! for tests). Ids are TEXT UUIDs, dates/times are ISO text, and structured
//! fields (weekly schedules, holiday sets, settings, service id lists) are
//! JSON text columns.
//!
//! Booking inserts are conditional: the overlap check against non-canceled
//! bookings runs inside the insert statement itself, which SQLite's
//! single-writer lock makes atomic, so no check-then-act window exists for
//! any time range. Two unique constraints back this up: `access_code` and
//! the partial index on `(staff_id, booking_date, start_time)`. Every
//! rejection is reported as an [`InsertOutcome`] variant so the workflow can
//! retry or surface a race.

use super::{BookingFilter, DatabaseProvider, InsertOutcome};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use randevu_core::{
    BookingId, BookingRecord, BookingStatus, CustomerId, HolidaySet, Salon, SalonId,
    SalonSettings, ServiceId, ServiceOffering, Staff, StaffId, WeeklySchedule,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite, SqlitePool};
use std::str::FromStr;

/// SQLite database manager
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: Pool<Sqlite>,
}

impl SqliteDatabase {
    /// Create a new database connection and run migrations
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .with_context(|| format!("failed to connect to {database_url}"))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Access the underlying pool (test support)
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS salons (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                slug TEXT UNIQUE NOT NULL,
                email TEXT,
                phone TEXT,
                address TEXT,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                settings TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS staff (
                id TEXT PRIMARY KEY,
                salon_id TEXT NOT NULL REFERENCES salons(id),
                name TEXT NOT NULL,
                email TEXT,
                phone TEXT,
                working_schedule TEXT NOT NULL,
                holiday_dates TEXT NOT NULL,
                service_ids TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_staff_salon ON staff(salon_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS services (
                id TEXT PRIMARY KEY,
                salon_id TEXT NOT NULL REFERENCES salons(id),
                name TEXT NOT NULL,
                price REAL NOT NULL,
                duration_minutes INTEGER NOT NULL DEFAULT 30,
                description TEXT,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_services_salon ON services(salon_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS bookings (
                id TEXT PRIMARY KEY,
                salon_id TEXT NOT NULL REFERENCES salons(id),
                staff_id TEXT NOT NULL REFERENCES staff(id),
                service_id TEXT NOT NULL REFERENCES services(id),
                customer_id TEXT,
                customer_name TEXT NOT NULL,
                customer_phone TEXT NOT NULL,
                customer_email TEXT,
                booking_date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                access_code TEXT UNIQUE NOT NULL,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_bookings_staff_date \
             ON bookings(staff_id, booking_date)",
        )
        .execute(&self.pool)
        .await?;

        // Closes the check-then-act race between conflict validation and
        // insert: two concurrent requests for the same start slot cannot
        // both commit.
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_slot_guard \
             ON bookings(staff_id, booking_date, start_time) \
             WHERE status != 'canceled'",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create_salon(&self, salon: &Salon) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO salons (id, name, slug, email, phone, address, is_active,
                                settings, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(salon.id.to_string())
        .bind(&salon.name)
        .bind(&salon.slug)
        .bind(&salon.email)
        .bind(&salon.phone)
        .bind(&salon.address)
        .bind(salon.is_active)
        .bind(serde_json::to_string(&salon.settings)?)
        .bind(salon.created_at.to_rfc3339())
        .bind(salon.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_salon(&self, salon_id: SalonId) -> Result<Option<Salon>> {
        let row = sqlx::query("SELECT * FROM salons WHERE id = ?")
            .bind(salon_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| salon_from_row(&r)).transpose()
    }

    async fn get_salon_by_slug(&self, slug: &str) -> Result<Option<Salon>> {
        let row = sqlx::query("SELECT * FROM salons WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| salon_from_row(&r)).transpose()
    }

    async fn create_staff(&self, staff: &Staff) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO staff (id, salon_id, name, email, phone, working_schedule,
                               holiday_dates, service_ids, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(staff.id.to_string())
        .bind(staff.salon_id.to_string())
        .bind(&staff.name)
        .bind(&staff.email)
        .bind(&staff.phone)
        .bind(serde_json::to_string(&staff.working_schedule)?)
        .bind(serde_json::to_string(&staff.holiday_dates)?)
        .bind(serde_json::to_string(&staff.service_ids)?)
        .bind(staff.is_active)
        .bind(staff.created_at.to_rfc3339())
        .bind(staff.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_staff(&self, staff_id: StaffId) -> Result<Option<Staff>> {
        let row = sqlx::query("SELECT * FROM staff WHERE id = ?")
            .bind(staff_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| staff_from_row(&r)).transpose()
    }

    async fn list_staff_for_salon(&self, salon_id: SalonId) -> Result<Vec<Staff>> {
        let rows = sqlx::query("SELECT * FROM staff WHERE salon_id = ? ORDER BY name")
            .bind(salon_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(staff_from_row).collect()
    }

    async fn update_staff_schedule(
        &self,
        staff_id: StaffId,
        schedule: &WeeklySchedule,
        holidays: &HolidaySet,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE staff SET working_schedule = ?, holiday_dates = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(serde_json::to_string(schedule)?)
        .bind(serde_json::to_string(holidays)?)
        .bind(Utc::now().to_rfc3339())
        .bind(staff_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_service(&self, service: &ServiceOffering) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO services (id, salon_id, name, price, duration_minutes,
                                  description, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(service.id.to_string())
        .bind(service.salon_id.to_string())
        .bind(&service.name)
        .bind(service.price)
        .bind(i64::from(service.duration_minutes))
        .bind(&service.description)
        .bind(service.is_active)
        .bind(service.created_at.to_rfc3339())
        .bind(service.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_service(&self, service_id: ServiceId) -> Result<Option<ServiceOffering>> {
        let row = sqlx::query("SELECT * FROM services WHERE id = ?")
            .bind(service_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| service_from_row(&r)).transpose()
    }

    async fn list_services_for_salon(&self, salon_id: SalonId) -> Result<Vec<ServiceOffering>> {
        let rows = sqlx::query("SELECT * FROM services WHERE salon_id = ? ORDER BY name")
            .bind(salon_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(service_from_row).collect()
    }

    async fn insert_booking(&self, booking: &BookingRecord) -> Result<InsertOutcome> {
        // Conditional insert: the NOT EXISTS overlap re-check runs inside the
        // same statement as the write, so SQLite's single-writer lock makes
        // the check-then-act sequence atomic for arbitrary time ranges. Times
        // are fixed-width HH:MM:SS text, so string comparison is
        // chronological. The slot unique index remains as a backstop for the
        // exact-start case.
        let result = sqlx::query(
            r"
            INSERT INTO bookings (id, salon_id, staff_id, service_id, customer_id,
                                  customer_name, customer_phone, customer_email,
                                  booking_date, start_time, end_time, status,
                                  access_code, notes, created_at, updated_at)
            SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
            WHERE NOT EXISTS (
                SELECT 1 FROM bookings
                WHERE staff_id = ? AND booking_date = ? AND status != 'canceled'
                  AND start_time < ? AND ? < end_time
            )
            ",
        )
        .bind(booking.id.to_string())
        .bind(booking.salon_id.to_string())
        .bind(booking.staff_id.to_string())
        .bind(booking.service_id.to_string())
        .bind(booking.customer_id.map(|id| id.to_string()))
        .bind(&booking.customer_name)
        .bind(&booking.customer_phone)
        .bind(&booking.customer_email)
        .bind(booking.date.format("%Y-%m-%d").to_string())
        .bind(format_time(booking.start_time))
        .bind(format_time(booking.end_time))
        .bind(booking.status.as_str())
        .bind(&booking.access_code)
        .bind(&booking.notes)
        .bind(booking.created_at.to_rfc3339())
        .bind(booking.updated_at.to_rfc3339())
        .bind(booking.staff_id.to_string())
        .bind(booking.date.format("%Y-%m-%d").to_string())
        .bind(format_time(booking.end_time))
        .bind(format_time(booking.start_time))
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(InsertOutcome::SlotTaken),
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                let message = db_error.message().to_owned();
                if message.contains("access_code") {
                    Ok(InsertOutcome::AccessCodeTaken)
                } else {
                    Ok(InsertOutcome::SlotTaken)
                }
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn get_booking(&self, booking_id: BookingId) -> Result<Option<BookingRecord>> {
        let row = sqlx::query("SELECT * FROM bookings WHERE id = ?")
            .bind(booking_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| booking_from_row(&r)).transpose()
    }

    async fn get_booking_by_access_code(
        &self,
        access_code: &str,
    ) -> Result<Option<BookingRecord>> {
        let row = sqlx::query("SELECT * FROM bookings WHERE access_code = ?")
            .bind(access_code)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| booking_from_row(&r)).transpose()
    }

    async fn list_bookings_for_staff_on_date(
        &self,
        staff_id: StaffId,
        date: NaiveDate,
    ) -> Result<Vec<BookingRecord>> {
        let rows = sqlx::query(
            "SELECT * FROM bookings WHERE staff_id = ? AND booking_date = ? \
             ORDER BY start_time",
        )
        .bind(staff_id.to_string())
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn list_bookings_for_salon(
        &self,
        salon_id: SalonId,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingRecord>> {
        // Dynamic filter assembly; every value goes through a bind.
        let mut sql = String::from("SELECT * FROM bookings WHERE salon_id = ?");
        if filter.date.is_some() {
            sql.push_str(" AND booking_date = ?");
        }
        if filter.staff_id.is_some() {
            sql.push_str(" AND staff_id = ?");
        }
        if filter.status.is_some() {
            sql.push_str(" AND status = ?");
        }
        sql.push_str(" ORDER BY booking_date, start_time");

        let mut query = sqlx::query(&sql).bind(salon_id.to_string());
        if let Some(date) = filter.date {
            query = query.bind(date.format("%Y-%m-%d").to_string());
        }
        if let Some(staff_id) = filter.staff_id {
            query = query.bind(staff_id.to_string());
        }
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(booking_from_row).collect()
    }

    async fn update_booking_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE bookings SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now().to_rfc3339())
            .bind(booking_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_booking(&self, booking_id: BookingId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(booking_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ================================
// Row mapping helpers
// ================================

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|e| anyhow!("invalid time '{raw}': {e}"))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| anyhow!("invalid date '{raw}': {e}"))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("invalid timestamp '{raw}': {e}"))
}

fn salon_from_row(row: &SqliteRow) -> Result<Salon> {
    let settings_json: String = row.try_get("settings")?;
    let settings: SalonSettings = serde_json::from_str(&settings_json)?;

    Ok(Salon {
        id: SalonId::from_str(row.try_get("id")?)?,
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        is_active: row.try_get("is_active")?,
        settings,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

fn staff_from_row(row: &SqliteRow) -> Result<Staff> {
    let schedule_json: String = row.try_get("working_schedule")?;
    let holidays_json: String = row.try_get("holiday_dates")?;
    let services_json: String = row.try_get("service_ids")?;

    Ok(Staff {
        id: StaffId::from_str(row.try_get("id")?)?,
        salon_id: SalonId::from_str(row.try_get("salon_id")?)?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        working_schedule: serde_json::from_str(&schedule_json)?,
        holiday_dates: serde_json::from_str(&holidays_json)?,
        service_ids: serde_json::from_str(&services_json)?,
        is_active: row.try_get("is_active")?,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

fn service_from_row(row: &SqliteRow) -> Result<ServiceOffering> {
    let duration: i64 = row.try_get("duration_minutes")?;

    Ok(ServiceOffering {
        id: ServiceId::from_str(row.try_get("id")?)?,
        salon_id: SalonId::from_str(row.try_get("salon_id")?)?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        duration_minutes: u32::try_from(duration)
            .map_err(|_| anyhow!("negative service duration {duration}"))?,
        description: row.try_get("description")?,
        is_active: row.try_get("is_active")?,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

fn booking_from_row(row: &SqliteRow) -> Result<BookingRecord> {
    let status_raw: String = row.try_get("status")?;
    let customer_id_raw: Option<String> = row.try_get("customer_id")?;

    Ok(BookingRecord {
        id: BookingId::from_str(row.try_get("id")?)?,
        salon_id: SalonId::from_str(row.try_get("salon_id")?)?,
        staff_id: StaffId::from_str(row.try_get("staff_id")?)?,
        service_id: ServiceId::from_str(row.try_get("service_id")?)?,
        customer_id: customer_id_raw
            .map(|raw| CustomerId::from_str(&raw))
            .transpose()?,
        customer_name: row.try_get("customer_name")?,
        customer_phone: row.try_get("customer_phone")?,
        customer_email: row.try_get("customer_email")?,
        date: parse_date(row.try_get("booking_date")?)?,
        start_time: parse_time(row.try_get("start_time")?)?,
        end_time: parse_time(row.try_get("end_time")?)?,
        status: BookingStatus::from_str(&status_raw).map_err(|e| anyhow!(e))?,
        access_code: row.try_get("access_code")?,
        notes: row.try_get("notes")?,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

//! SQLite-backed observation table.
//!
//! A connection is opened for every call and dropped at its end; each
//! statement auto-commits on its own.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params, types::Type};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};
use crate::model::{NewObservation, Observation};

use super::ObservationStore;

const SELECT_COLUMNS: &str = "SELECT id, city, country, latitude, longitude, temperature_c,
            windspeed_kmh, observation_time, notes
     FROM observations";

#[derive(Debug, Clone)]
pub struct SqliteObservationStore {
    path: PathBuf,
}

impl SqliteObservationStore {
    /// Open the store at `path`, creating the database file and table if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self { path: path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    fn init_schema(&self) -> Result<()> {
        self.connect()?.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS observations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                city TEXT NOT NULL,
                country TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                temperature_c REAL NOT NULL,
                windspeed_kmh REAL NOT NULL,
                observation_time TEXT NOT NULL,
                notes TEXT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn row_to_observation(row: &Row) -> rusqlite::Result<Observation> {
        let time_str: String = row.get(7)?;
        let observation_time = DateTime::parse_from_rfc3339(&time_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

        Ok(Observation {
            id: row.get(0)?,
            city: row.get(1)?,
            country: row.get(2)?,
            latitude: row.get(3)?,
            longitude: row.get(4)?,
            temperature_c: row.get(5)?,
            windspeed_kmh: row.get(6)?,
            observation_time,
            notes: row.get(8)?,
        })
    }

    fn find(conn: &Connection, id: i64) -> Result<Observation> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        conn.query_row(&sql, params![id], Self::row_to_observation)
            .optional()?
            .ok_or(TrackerError::ObservationNotFound(id))
    }
}

impl ObservationStore for SqliteObservationStore {
    fn insert(&mut self, new: NewObservation) -> Result<Observation> {
        let conn = self.connect()?;
        let c = &new.conditions;

        conn.execute(
            r#"
            INSERT INTO observations (
                city, country, latitude, longitude, temperature_c, windspeed_kmh,
                observation_time, notes
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL)
            "#,
            params![
                new.city,
                new.country,
                c.latitude,
                c.longitude,
                c.temperature_c,
                c.windspeed_kmh,
                c.observation_time.to_rfc3339(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        tracing::debug!("Inserted observation {}", id);

        Ok(Observation::new(id, new))
    }

    fn list(&self) -> Result<Vec<Observation>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let rows = stmt.query_map([], Self::row_to_observation)?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get(&self, id: i64) -> Result<Observation> {
        Self::find(&self.connect()?, id)
    }

    fn update_notes(&mut self, id: i64, notes: &str) -> Result<Observation> {
        let conn = self.connect()?;
        let changed =
            conn.execute("UPDATE observations SET notes = ?1 WHERE id = ?2", params![notes, id])?;

        if changed == 0 {
            return Err(TrackerError::ObservationNotFound(id));
        }

        tracing::debug!("Updated notes of observation {}", id);
        Self::find(&conn, id)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let removed =
            self.connect()?.execute("DELETE FROM observations WHERE id = ?1", params![id])?;

        if removed == 0 {
            return Err(TrackerError::ObservationNotFound(id));
        }

        tracing::debug!("Deleted observation {}", id);
        Ok(())
    }
}

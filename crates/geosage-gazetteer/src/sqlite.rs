//! Read-only SQLite gazetteer.
//!
//! Opens a prebuilt GeoNames database (see `schema`) and answers name,
//! id, country and admin1 lookups. Country and admin1 records are preloaded
//! at open time since every output record needs them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use geosage_core::{Candidate, Error, FeatureClass, GeoRecord, Result};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::{debug, info};

use crate::admin::AdminIndex;
use crate::gazetteer::{normalize_name, Gazetteer};
use crate::ranking::{rank_hits, similarity, NameHit};
use crate::schema::REQUIRED_TABLES;
use crate::types::GazetteerStats;

/// Upper bound on rows scanned when ranking fuzzy matches.
const FUZZY_PREFILTER_LIMIT: i64 = 5000;

/// SQLite-backed gazetteer shared read-only across requests.
pub struct SqliteGazetteer {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    admin: AdminIndex,
}

impl SqliteGazetteer {
    /// Open an existing gazetteer database read-only.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if !db_path.exists() {
            return Err(Error::Database(format!(
                "Gazetteer not found at {}",
                db_path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA query_only = ON;
             PRAGMA cache_size = -65536;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Self::check_schema(&conn)?;
        let admin = Self::load_admin_index(&conn)?;

        let gazetteer = Self {
            conn: Mutex::new(conn),
            db_path,
            admin,
        };

        let stats = gazetteer.stats()?;
        info!(
            "SqliteGazetteer initialized: {} records, {} names, {} countries, {} admin1 regions, path={}",
            stats.total_records,
            stats.total_names,
            stats.countries,
            stats.admin1_regions,
            gazetteer.db_path.display()
        );

        Ok(gazetteer)
    }

    fn check_schema(conn: &Connection) -> Result<()> {
        for table in REQUIRED_TABLES {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    params![table],
                    |row| row.get(0),
                )
                .map_err(|e| Error::Database(e.to_string()))?;
            if count == 0 {
                return Err(Error::Database(format!(
                    "Gazetteer is missing table '{}'",
                    table
                )));
            }
        }
        Ok(())
    }

    fn load_admin_index(conn: &Connection) -> Result<AdminIndex> {
        let mut stmt = conn
            .prepare(
                "SELECT * FROM geonames \
                 WHERE feature_code LIKE 'PCL%' OR feature_code = 'ADM1'",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let records: Vec<Arc<GeoRecord>> = stmt
            .query_map([], |row| Self::row_to_record(row).map(Arc::new))
            .map_err(|e| Error::Database(e.to_string()))?
            .collect::<rusqlite::Result<_>>()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(AdminIndex::build(&records))
    }

    /// Gazetteer statistics.
    pub fn stats(&self) -> Result<GazetteerStats> {
        let conn = self.conn.lock();
        let total_records: i64 = conn
            .query_row("SELECT COUNT(*) FROM geonames", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        let total_names: i64 = conn
            .query_row("SELECT COUNT(*) FROM alternate_names", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(GazetteerStats {
            total_records,
            total_names,
            countries: self.admin.country_count(),
            admin1_regions: self.admin.admin1_count(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    // ---------------------------------------------------------------
    // Name Lookup
    // ---------------------------------------------------------------

    fn exact_hits(&self, key: &str) -> Result<Vec<NameHit>> {
        let conn = self.conn.lock();
        let sql = "SELECT g.*, a.name AS matched_name \
                   FROM alternate_names a \
                   JOIN geonames g ON g.geoname_id = a.geoname_id \
                   WHERE a.name_key = ?1";
        let mut stmt = conn.prepare_cached(sql).map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![key], |row| {
                let record = Self::row_to_record(row)?;
                let matched_name: String = row.get("matched_name")?;
                Ok((record, matched_name))
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(record, matched_name)| NameHit {
                primary: normalize_name(&record.name) == key,
                record: Arc::new(record),
                matched_name,
                similarity: 1.0,
            })
            .collect())
    }

    /// Two-stage fuzzy lookup: names sharing the first character are pulled
    /// from the index, then scored with Jaro–Winkler.
    fn fuzzy_hits(&self, key: &str) -> Result<Vec<NameHit>> {
        let first: String = key.chars().take(1).collect();
        let conn = self.conn.lock();
        let sql = "SELECT g.*, a.name AS matched_name, a.name_key AS name_key \
                   FROM alternate_names a \
                   JOIN geonames g ON g.geoname_id = a.geoname_id \
                   WHERE substr(a.name_key, 1, 1) = ?1 \
                   ORDER BY g.population DESC, g.geoname_id ASC \
                   LIMIT ?2";
        let mut stmt = conn.prepare_cached(sql).map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![first, FUZZY_PREFILTER_LIMIT], |row| {
                let record = Self::row_to_record(row)?;
                let matched_name: String = row.get("matched_name")?;
                let name_key: String = row.get("name_key")?;
                Ok((record, matched_name, name_key))
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(record, matched_name, name_key)| NameHit {
                primary: normalize_name(&record.name) == name_key,
                similarity: similarity(key, &name_key),
                record: Arc::new(record),
                matched_name,
            })
            .collect())
    }

    // ---------------------------------------------------------------
    // Row Mapping Helpers
    // ---------------------------------------------------------------

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<GeoRecord> {
        let population: i64 = row.get("population")?;
        let feature_class: String = row.get("feature_class")?;
        Ok(GeoRecord {
            geoname_id: row.get("geoname_id")?,
            name: row.get("name")?,
            latitude: row.get("latitude")?,
            longitude: row.get("longitude")?,
            population: population.max(0) as u64,
            feature_class: FeatureClass::from_code(&feature_class),
            feature_code: row.get("feature_code")?,
            country_code: row.get("country_code")?,
            admin1_code: row.get("admin1_code")?,
        })
    }
}

impl Gazetteer for SqliteGazetteer {
    fn candidates(&self, name: &str, max_results: usize, fuzzy: bool) -> Result<Vec<Candidate>> {
        let key = normalize_name(name);
        if key.is_empty() || max_results == 0 {
            return Ok(Vec::new());
        }

        let exact = self.exact_hits(&key)?;
        if !exact.is_empty() || !fuzzy {
            return Ok(rank_hits(exact, max_results, false));
        }

        let approximate = self.fuzzy_hits(&key)?;
        debug!("Fuzzy lookup for '{}' scanned {} names", key, approximate.len());
        Ok(rank_hits(approximate, max_results, true))
    }

    fn by_id(&self, geoname_id: i64) -> Result<Arc<GeoRecord>> {
        let conn = self.conn.lock();
        let record = conn
            .prepare_cached("SELECT * FROM geonames WHERE geoname_id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![geoname_id], Self::row_to_record)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        record
            .map(Arc::new)
            .ok_or(Error::UnknownGazetteerId(geoname_id))
    }

    fn country(&self, country_code: &str) -> Option<Arc<GeoRecord>> {
        self.admin.country(country_code)
    }

    fn admin1(&self, country_code: &str, admin1_code: &str) -> Option<Arc<GeoRecord>> {
        self.admin.admin1(country_code, admin1_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GAZETTEER_SCHEMA_SQL;
    use tempfile::TempDir;

    #[allow(clippy::too_many_arguments)]
    fn insert(
        conn: &Connection,
        id: i64,
        name: &str,
        population: i64,
        class: &str,
        code: &str,
        cc: &str,
        admin1: &str,
        alternates: &[&str],
    ) {
        conn.execute(
            "INSERT INTO geonames VALUES (?1, ?2, 0.0, 0.0, ?3, ?4, ?5, ?6, ?7)",
            params![id, name, population, class, code, cc, admin1],
        )
        .unwrap();
        for alt in std::iter::once(&name).chain(alternates.iter()) {
            conn.execute(
                "INSERT INTO alternate_names VALUES (?1, ?2, ?3)",
                params![id, alt, normalize_name(alt)],
            )
            .unwrap();
        }
    }

    fn test_gazetteer() -> (SqliteGazetteer, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gazetteer.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(GAZETTEER_SCHEMA_SQL).unwrap();
            insert(&conn, 3508796, "Dominican Republic", 10648613, "A", "PCLI", "DO", "00", &[]);
            insert(&conn, 3504158, "Distrito Nacional", 1000000, "A", "ADM1", "DO", "34", &[]);
            insert(&conn, 3492908, "Santo Domingo", 2201941, "P", "PPLC", "DO", "34", &["Ciudad Trujillo"]);
            insert(&conn, 3983105, "Santo Domingo", 1200, "P", "PPL", "MX", "24", &[]);
            insert(&conn, 2988507, "Paris", 2138551, "P", "PPLC", "FR", "11", &["Lutetia"]);
        }
        let gazetteer = SqliteGazetteer::open(&path).unwrap();
        (gazetteer, dir)
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = SqliteGazetteer::open(dir.path().join("nope.db"));
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[test]
    fn test_open_rejects_foreign_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (id INTEGER);")
            .unwrap();
        assert!(matches!(SqliteGazetteer::open(&path), Err(Error::Database(_))));
    }

    #[test]
    fn test_exact_candidates() {
        let (g, _dir) = test_gazetteer();
        let candidates = g.candidates("Santo Domingo", 10, false).unwrap();
        let ids: Vec<i64> = candidates.iter().map(|c| c.record.geoname_id).collect();
        assert_eq!(ids, vec![3492908, 3983105]);
        assert_eq!(candidates[1].rank, 1);
        assert_eq!(candidates[0].record.feature_class, FeatureClass::P);
    }

    #[test]
    fn test_alternate_and_fuzzy_candidates() {
        let (g, _dir) = test_gazetteer();
        let alt = g.candidates("lutetia", 10, false).unwrap();
        assert_eq!(alt[0].record.geoname_id, 2988507);
        assert_eq!(alt[0].matched_name, "Lutetia");

        assert!(g.candidates("Parris", 10, false).unwrap().is_empty());
        let fuzzy = g.candidates("Parris", 10, true).unwrap();
        assert_eq!(fuzzy[0].record.geoname_id, 2988507);
        assert!(fuzzy[0].fuzzy);
    }

    #[test]
    fn test_by_id_and_admin() {
        let (g, _dir) = test_gazetteer();
        assert_eq!(g.by_id(2988507).unwrap().name, "Paris");
        assert!(matches!(g.by_id(1), Err(Error::UnknownGazetteerId(1))));
        assert_eq!(g.country("DO").unwrap().geoname_id, 3508796);
        assert_eq!(g.admin1("DO", "34").unwrap().name, "Distrito Nacional");
        assert!(g.admin1("FR", "11").is_none());
    }

    #[test]
    fn test_stats() {
        let (g, _dir) = test_gazetteer();
        let stats = g.stats().unwrap();
        assert_eq!(stats.total_records, 5);
        assert_eq!(stats.total_names, 7);
        assert_eq!(stats.countries, 1);
        assert_eq!(stats.admin1_regions, 1);
    }

    #[test]
    fn test_undecodable_row_is_a_database_error() {
        let (gazetteer, dir) = test_gazetteer();
        let conn = Connection::open(dir.path().join("gazetteer.db")).unwrap();
        conn.execute(
            "INSERT INTO geonames VALUES (1, 'Atlantis', 0.0, 0.0, 'many', 'P', 'PPL', 'GR', '')",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO alternate_names VALUES (1, 'Atlantis', 'atlantis')", [])
            .unwrap();

        assert!(matches!(
            gazetteer.candidates("Atlantis", 5, false),
            Err(Error::Database(_))
        ));
        assert!(matches!(gazetteer.by_id(1), Err(Error::Database(_))));
    }
}

//! Database layout the SQLite gazetteer reads.
//!
//! GeoSage never writes to the gazetteer; the index is produced by a
//! separate import job. Every name a place is known by (its primary name
//! included) has a row in `alternate_names`, keyed by `normalize_name`.

/// Tables and indexes expected in a gazetteer database.
pub const GAZETTEER_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS geonames (
    geoname_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    population INTEGER NOT NULL DEFAULT 0,
    feature_class TEXT NOT NULL,
    feature_code TEXT NOT NULL,
    country_code TEXT NOT NULL DEFAULT '',
    admin1_code TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS alternate_names (
    geoname_id INTEGER NOT NULL REFERENCES geonames(geoname_id),
    name TEXT NOT NULL,
    name_key TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_alternate_names_key ON alternate_names(name_key);
CREATE INDEX IF NOT EXISTS idx_geonames_admin ON geonames(country_code, feature_code, admin1_code);
"#;

/// Tables that must exist for a database to be usable.
pub const REQUIRED_TABLES: &[&str] = &["geonames", "alternate_names"];

//! Database schema definitions.

/// SQL schema for creating all tables.
pub const SCHEMA: &str = r#"
-- Scan records
CREATE TABLE IF NOT EXISTS scan_records (
    id TEXT PRIMARY KEY,
    owner_key TEXT NOT NULL,
    waste_type TEXT NOT NULL,
    disposal_category TEXT NOT NULL,
    weight_grams REAL NOT NULL,
    recyclable INTEGER NOT NULL DEFAULT 0,
    compostable INTEGER NOT NULL DEFAULT 0,
    timestamp TEXT NOT NULL,
    analysis_json TEXT
);

CREATE INDEX IF NOT EXISTS idx_scan_records_owner ON scan_records(owner_key);
CREATE INDEX IF NOT EXISTS idx_scan_records_timestamp ON scan_records(timestamp);

-- Redemptions
CREATE TABLE IF NOT EXISTS redemptions (
    id TEXT PRIMARY KEY,
    owner_key TEXT NOT NULL,
    reward_id TEXT NOT NULL,
    points_cost INTEGER NOT NULL,
    address_json TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    tracking_number TEXT NOT NULL,
    estimated_delivery_date TEXT NOT NULL,
    redeemed_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_redemptions_owner ON redemptions(owner_key);

-- Small flags and caches, JSON-valued
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Schema version tracking table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

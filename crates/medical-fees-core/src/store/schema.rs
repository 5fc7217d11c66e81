//! SQLite schema definition.

/// Database schema for the key-value store.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key-value store (one row per local-storage key)
-- ============================================================================

CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                          -- JSON document
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

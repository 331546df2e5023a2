//! Table layout and statements for the `requests` table.

/// Idempotent bootstrap: table plus the host, received_at and device_id indexes.
///
/// Executed as one simple-protocol batch, so every statement must be safe to
/// re-run against an existing schema.
pub const BOOTSTRAP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS requests (
    id BIGSERIAL PRIMARY KEY,
    method VARCHAR(10) NOT NULL,
    uri TEXT NOT NULL,
    host VARCHAR(255) NOT NULL,
    ip VARCHAR(45),
    device_id VARCHAR(255),
    user_agent TEXT,
    body TEXT,
    received_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_requests_host ON requests(host);
CREATE INDEX IF NOT EXISTS idx_requests_received_at ON requests(received_at);
CREATE INDEX IF NOT EXISTS idx_requests_device_id ON requests(device_id);
"#;

/// `created_at` is left to the column default.
pub const INSERT_SQL: &str = r#"
INSERT INTO requests (method, uri, host, ip, device_id, user_agent, body, received_at)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#;

pub const PING_SQL: &str = "SELECT 1";

/// Index names created by [`BOOTSTRAP_SQL`].
pub const INDEX_NAMES: [&str; 3] = [
    "idx_requests_host",
    "idx_requests_received_at",
    "idx_requests_device_id",
];

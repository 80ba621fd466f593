use anyhow::Context;
use rusqlite::Connection;

// Migrations are embedded so that in-memory databases used by tests get the
// full schema. Applied entries are recorded in _migrations and skipped on
// later startups; never edit an entry after it has shipped, append instead.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_services",
        "CREATE TABLE IF NOT EXISTS services (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            duration_minutes INTEGER NOT NULL DEFAULT 30,
            price_cents INTEGER NOT NULL DEFAULT 0,
            description TEXT,
            image_url TEXT
        );",
    ),
    (
        "002_barbers",
        "CREATE TABLE IF NOT EXISTS barbers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            specialty TEXT NOT NULL DEFAULT '',
            bio TEXT,
            image_url TEXT
        );",
    ),
    (
        "003_reservations",
        "CREATE TABLE IF NOT EXISTS reservations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            service_id INTEGER NOT NULL REFERENCES services(id),
            date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            user_name TEXT NOT NULL,
            user_phone TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'confirmed',
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_reservations_date ON reservations(date);",
    ),
    (
        // At most one live reservation per slot; cancelled rows free the slot
        // again, so they are excluded from the index.
        "004_slot_guard",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_reservations_slot
            ON reservations(date, start_time) WHERE status != 'cancelled';",
    ),
    (
        "005_site_config",
        "CREATE TABLE IF NOT EXISTS site_config (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            shop_name TEXT NOT NULL,
            tagline TEXT NOT NULL DEFAULT '',
            about_text TEXT NOT NULL DEFAULT '',
            logo_url TEXT,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    ),
];

pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .context("failed to check migration status")?;

        if already_applied {
            continue;
        }

        conn.execute_batch(sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;

        conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!("applied migration: {name}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied as usize, MIGRATIONS.len());
    }
}

//! SQLite implementation of the metadata ports.
//!
//! Maps the relational schema to the `domains` models. Multi-caller
//! invariants (the reintroduction swap, lease upserts) are expressed as
//! single conditional statements so concurrent callers resolve at the
//! database rather than in application code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::error::StoreError;
use domains::models::{Peer, Species, UserRegistration, VersionPolicy};
use domains::traits::{PeerStore, SpeciesStore, VersionPolicyStore};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS species (
    name                TEXT NOT NULL,
    version             TEXT NOT NULL,
    species_type        TEXT NOT NULL,
    author              TEXT NOT NULL,
    author_email        TEXT NOT NULL,
    date_added          TEXT NOT NULL,
    assembly_full_name  TEXT NOT NULL,
    extinct             INTEGER NOT NULL DEFAULT 0,
    blacklisted         INTEGER NOT NULL DEFAULT 0,
    last_reintroduction TEXT,
    reintroduction_node TEXT,
    PRIMARY KEY (name, version)
);

CREATE TABLE IF NOT EXISTS peers (
    channel       TEXT NOT NULL,
    ip_address    TEXT NOT NULL,
    version       TEXT NOT NULL,
    guid          TEXT NOT NULL,
    lease         TEXT NOT NULL,
    first_contact TEXT NOT NULL,
    PRIMARY KEY (channel, ip_address, version)
);

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT NOT NULL,
    ip_address    TEXT NOT NULL,
    registered_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS version_policies (
    version  TEXT PRIMARY KEY,
    disabled INTEGER NOT NULL,
    message  TEXT NOT NULL
)
"#;

pub struct SqliteMetadataStore {
    pool: SqlitePool,
}

impl SqliteMetadataStore {
    /// Opens (or creates) the database and bootstraps the schema.
    pub async fn new(url: &str) -> Result<Self, sqlx::Error> {
        // A single connection keeps `sqlite::memory:` databases coherent.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;

        for statement in SCHEMA.split(';') {
            let statement = statement.trim();
            if !statement.is_empty() {
                sqlx::query(statement).execute(&pool).await?;
            }
        }
        Ok(Self { pool })
    }

    /// Admin-side writer: flips the extinct flag when a population tracker
    /// reports zero. The registries only ever read this flag back.
    pub async fn set_extinct(
        &self,
        name: &str,
        version: &str,
        extinct: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE species SET extinct = ? WHERE name = ? AND version = ?")
            .bind(extinct)
            .bind(name)
            .bind(version)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Admin-side writer: marks a species as blacklisted, hiding it from
    /// listings without touching its stored artifact.
    pub async fn set_blacklisted(
        &self,
        name: &str,
        version: &str,
        blacklisted: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE species SET blacklisted = ? WHERE name = ? AND version = ?")
            .bind(blacklisted)
            .bind(name)
            .bind(version)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Admin-side writer for the version policy table.
    pub async fn set_version_policy(&self, policy: &VersionPolicy) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO version_policies (version, disabled, message) VALUES (?, ?, ?) \
             ON CONFLICT(version) DO UPDATE SET disabled = excluded.disabled, message = excluded.message",
        )
        .bind(&policy.version)
        .bind(policy.disabled)
        .bind(&policy.message)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn store_err(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            StoreError::Duplicate(db.message().to_string())
        }
        sqlx::Error::RowNotFound => StoreError::NotFound("row".into()),
        _ => StoreError::Unavailable(e.to_string()),
    }
}

fn species_from_row(row: &SqliteRow) -> Species {
    Species {
        name: row.get("name"),
        version: row.get("version"),
        species_type: row.get("species_type"),
        author: row.get("author"),
        author_email: row.get("author_email"),
        date_added: row.get("date_added"),
        assembly_full_name: row.get("assembly_full_name"),
        extinct: row.get("extinct"),
        blacklisted: row.get("blacklisted"),
        last_reintroduction: row.get("last_reintroduction"),
        reintroduction_node: row
            .get::<Option<String>, _>("reintroduction_node")
            .and_then(|s| Uuid::parse_str(&s).ok()),
    }
}

fn peer_from_row(row: &SqliteRow) -> Peer {
    Peer {
        channel: row.get("channel"),
        ip_address: row.get("ip_address"),
        version: row.get("version"),
        guid: Uuid::parse_str(&row.get::<String, _>("guid")).unwrap_or_default(),
        lease: row.get("lease"),
        first_contact: row.get("first_contact"),
    }
}

#[async_trait]
impl SpeciesStore for SqliteMetadataStore {
    async fn insert(&self, species: &Species) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO species (name, version, species_type, author, author_email, date_added, \
             assembly_full_name, extinct, blacklisted, last_reintroduction, reintroduction_node) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&species.name)
        .bind(&species.version)
        .bind(&species.species_type)
        .bind(&species.author)
        .bind(&species.author_email)
        .bind(species.date_added)
        .bind(&species.assembly_full_name)
        .bind(species.extinct)
        .bind(species.blacklisted)
        .bind(species.last_reintroduction)
        .bind(species.reintroduction_node.map(|u| u.to_string()))
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn delete(&self, name: &str, version: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM species WHERE name = ? AND version = ?")
            .bind(name)
            .bind(version)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn blacklisted(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT assembly_full_name FROM species WHERE blacklisted = 1")
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(rows
            .into_iter()
            .map(|row| row.get("assembly_full_name"))
            .collect())
    }

    async fn extinct(
        &self,
        version: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Species>, StoreError> {
        let rows = match since {
            Some(cutoff) => {
                sqlx::query(
                    "SELECT * FROM species WHERE version = ? AND extinct = 1 AND blacklisted = 0 \
                     AND date_added >= ? ORDER BY date_added DESC",
                )
                .bind(version)
                .bind(cutoff)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "SELECT * FROM species WHERE version = ? AND extinct = 1 AND blacklisted = 0 \
                     ORDER BY date_added DESC",
                )
                .bind(version)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(store_err)?;
        Ok(rows.iter().map(species_from_row).collect())
    }

    async fn all(
        &self,
        version: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Species>, StoreError> {
        let rows = match since {
            Some(cutoff) => {
                sqlx::query(
                    "SELECT * FROM species WHERE version = ? AND blacklisted = 0 \
                     AND date_added >= ? ORDER BY date_added DESC",
                )
                .bind(version)
                .bind(cutoff)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "SELECT * FROM species WHERE version = ? AND blacklisted = 0 \
                     ORDER BY date_added DESC",
                )
                .bind(version)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(store_err)?;
        Ok(rows.iter().map(species_from_row).collect())
    }

    /// The conditional UPDATE is the whole race: whichever caller finds
    /// `extinct = 1` flips it, and everyone else changes zero rows.
    async fn reintroduce(
        &self,
        name: &str,
        version: &str,
        node: Uuid,
        when: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE species SET extinct = 0, last_reintroduction = ?, reintroduction_node = ? \
             WHERE name = ? AND version = ? AND extinct = 1",
        )
        .bind(when)
        .bind(node.to_string())
        .bind(name)
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl PeerStore for SqliteMetadataStore {
    async fn add_user(&self, user: &UserRegistration) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO users (email, ip_address, registered_at) VALUES (?, ?, ?)")
            .bind(&user.email)
            .bind(&user.ip_address)
            .bind(user.registered_at)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn register(&self, peer: &Peer) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO peers (channel, ip_address, version, guid, lease, first_contact) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT(channel, ip_address, version) \
             DO UPDATE SET guid = excluded.guid, lease = excluded.lease",
        )
        .bind(&peer.channel)
        .bind(&peer.ip_address)
        .bind(&peer.version)
        .bind(peer.guid.to_string())
        .bind(peer.lease)
        .bind(peer.first_contact)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn live_peers(
        &self,
        version: &str,
        channel: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Peer>, StoreError> {
        let rows = sqlx::query(
            "SELECT * FROM peers WHERE version = ? AND channel = ? AND lease > ? \
             ORDER BY first_contact ASC",
        )
        .bind(version)
        .bind(channel)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(rows.iter().map(peer_from_row).collect())
    }

    async fn count_peers(
        &self,
        version: &str,
        channel: &str,
        now: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM peers WHERE version = ? AND channel = ? AND lease > ?",
        )
        .bind(version)
        .bind(channel)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)
    }
}

#[async_trait]
impl VersionPolicyStore for SqliteMetadataStore {
    async fn policy(&self, version: &str) -> Result<Option<VersionPolicy>, StoreError> {
        let row = sqlx::query("SELECT * FROM version_policies WHERE version = ?")
            .bind(version)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(row.map(|row| VersionPolicy {
            version: row.get("version"),
            disabled: row.get("disabled"),
            message: row.get("message"),
        }))
    }
}

//! SQLite-backed store for clients and quotation records

use crate::client::{Client, ClientPreferences};
use crate::{Result, StoreError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use std::path::Path;
use tarif::Category;

/// Current schema version, recorded in `PRAGMA user_version`
pub const SCHEMA_VERSION: i64 = 1;

/// Date format used for quotation rows and file names
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS clients (
      id INTEGER PRIMARY KEY,
      name TEXT NOT NULL UNIQUE,
      nif TEXT,
      rc TEXT,
      address TEXT,
      client_type TEXT,
      preferences TEXT
    );
    CREATE TABLE IF NOT EXISTS quotations (
      id INTEGER PRIMARY KEY,
      client_id INTEGER NOT NULL REFERENCES clients(id),
      type TEXT NOT NULL,
      number TEXT NOT NULL,
      product TEXT NOT NULL,
      quantity REAL NOT NULL,
      unit_price REAL NOT NULL,
      date TEXT NOT NULL,
      purchase_order TEXT
    );
";

/// Columns absent from databases created by earlier releases
const LEGACY_COLUMNS: [(&str, &str, &str); 3] = [
    (
        "clients",
        "client_type",
        "ALTER TABLE clients ADD COLUMN client_type TEXT",
    ),
    (
        "clients",
        "preferences",
        "ALTER TABLE clients ADD COLUMN preferences TEXT",
    ),
    (
        "quotations",
        "purchase_order",
        "ALTER TABLE quotations ADD COLUMN purchase_order TEXT",
    ),
];

/// An entry appended to the quotation log when a document is generated
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationRecord {
    /// Document kind, "devis" or "facture"
    pub kind: String,
    /// Human-assigned document number
    pub number: String,
    pub product: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub date: NaiveDate,
    pub purchase_order: Option<String>,
}

/// Optional filters applied to the history query
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub client: Option<String>,
    pub kind: Option<String>,
    pub date: Option<NaiveDate>,
}

/// A history row, joined with the client name
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub client: String,
    pub kind: String,
    pub number: String,
    pub product: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub date: NaiveDate,
    pub purchase_order: Option<String>,
}

/// Store of clients and quotation records
///
/// Owns one connection for the life of the process. The schema is
/// created or migrated on open.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open a store at the given path, creating the file if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a transient in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Insert a new client
    ///
    /// Fails with [`StoreError::DuplicateClient`] when the name is
    /// already taken; the store is left untouched in that case.
    pub fn add_client(&self, client: &Client) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO clients (name, nif, rc, address, client_type, preferences)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    client.name,
                    client.nif,
                    client.rc,
                    client.address,
                    client.category.map(|c| c.to_string()),
                    client.preferences.encode()?,
                ],
            )
            .map_err(|e| duplicate_name(e, &client.name))?;
        Ok(())
    }

    /// Update a client identified by its current name
    ///
    /// The name itself may change; renaming onto an existing client
    /// fails with [`StoreError::DuplicateClient`].
    pub fn update_client(&self, current_name: &str, client: &Client) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE clients
                 SET name = ?1, nif = ?2, rc = ?3, address = ?4, client_type = ?5, preferences = ?6
                 WHERE name = ?7",
                params![
                    client.name,
                    client.nif,
                    client.rc,
                    client.address,
                    client.category.map(|c| c.to_string()),
                    client.preferences.encode()?,
                    current_name,
                ],
            )
            .map_err(|e| duplicate_name(e, &client.name))?;
        if changed == 0 {
            return Err(StoreError::ClientNotFound(current_name.to_string()));
        }
        Ok(())
    }

    /// Fetch a client by name
    pub fn client_by_name(&self, name: &str) -> Result<Client> {
        self.conn
            .query_row(
                "SELECT name, nif, rc, address, client_type, preferences
                 FROM clients WHERE name = ?1",
                params![name],
                row_to_client,
            )
            .optional()?
            .ok_or_else(|| StoreError::ClientNotFound(name.to_string()))
    }

    /// Replace a client's preferences record
    pub fn set_preferences(&self, name: &str, preferences: &ClientPreferences) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE clients SET preferences = ?1 WHERE name = ?2",
            params![preferences.encode()?, name],
        )?;
        if changed == 0 {
            return Err(StoreError::ClientNotFound(name.to_string()));
        }
        Ok(())
    }

    /// Client names in insertion order, optionally one category only
    pub fn client_names(&self, category: Option<Category>) -> Result<Vec<String>> {
        let text = category.map(|c| c.to_string());
        let mut bindings: Vec<&dyn ToSql> = Vec::new();
        let sql = match &text {
            Some(t) => {
                bindings.push(t);
                "SELECT name FROM clients WHERE client_type = ?1"
            }
            None => "SELECT name FROM clients",
        };

        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(bindings.as_slice(), |row| row.get(0))?;
        let mut names = Vec::new();
        for name in rows {
            names.push(name?);
        }
        Ok(names)
    }

    /// Append a quotation record for the named client
    ///
    /// The client reference is resolved here; a missing client fails
    /// with [`StoreError::ClientNotFound`] and nothing is inserted.
    pub fn insert_quotation(&self, client_name: &str, record: &QuotationRecord) -> Result<()> {
        let client_id: i64 = self
            .conn
            .query_row(
                "SELECT id FROM clients WHERE name = ?1",
                params![client_name],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| StoreError::ClientNotFound(client_name.to_string()))?;

        self.conn.execute(
            "INSERT INTO quotations
               (client_id, type, number, product, quantity, unit_price, date, purchase_order)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                client_id,
                record.kind,
                record.number,
                record.product,
                record.quantity,
                record.unit_price,
                record.date.format(DATE_FORMAT).to_string(),
                record.purchase_order,
            ],
        )?;
        Ok(())
    }

    /// Quotation history joined with client names, in insertion order
    pub fn history(&self, filter: &HistoryFilter) -> Result<Vec<HistoryEntry>> {
        let date_text = filter.date.map(|d| d.format(DATE_FORMAT).to_string());

        let mut sql = String::from(
            "SELECT clients.name, quotations.type, quotations.number, quotations.product,
                    quotations.quantity, quotations.unit_price, quotations.date,
                    quotations.purchase_order
             FROM quotations JOIN clients ON quotations.client_id = clients.id
             WHERE 1=1",
        );
        let mut bindings: Vec<&dyn ToSql> = Vec::new();
        if let Some(client) = &filter.client {
            sql.push_str(" AND clients.name = ?");
            bindings.push(client);
        }
        if let Some(kind) = &filter.kind {
            sql.push_str(" AND quotations.type = ?");
            bindings.push(kind);
        }
        if let Some(date) = &date_text {
            sql.push_str(" AND quotations.date = ?");
            bindings.push(date);
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(bindings.as_slice(), row_to_entry)?;
        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }
}

/// Create missing tables and add columns older databases lack
fn migrate(conn: &Connection) -> Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    conn.execute_batch(SCHEMA)?;
    for (table, column, ddl) in LEGACY_COLUMNS {
        if !column_exists(conn, table, column)? {
            log::info!("Adding missing column {table}.{column}");
            conn.execute_batch(ddl)?;
        }
    }
    conn.execute_batch(&format!("PRAGMA user_version={SCHEMA_VERSION};"))?;
    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        params![table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn duplicate_name(e: rusqlite::Error, name: &str) -> StoreError {
    match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::DuplicateClient(name.to_string())
        }
        other => StoreError::Sqlite(other),
    }
}

fn row_to_client(row: &rusqlite::Row<'_>) -> rusqlite::Result<Client> {
    let category = row
        .get::<_, Option<String>>(4)?
        .and_then(|s| match s.parse::<Category>() {
            Ok(category) => Some(category),
            Err(e) => {
                log::warn!("Ignoring stored client category: {e}");
                None
            }
        });
    let preferences = ClientPreferences::decode(row.get::<_, Option<String>>(5)?.as_deref());

    Ok(Client {
        name: row.get(0)?,
        nif: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        rc: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        address: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        category,
        preferences,
    })
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let date_text: String = row.get(6)?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(HistoryEntry {
        client: row.get(0)?,
        kind: row.get(1)?,
        number: row.get(2)?,
        product: row.get(3)?,
        quantity: row.get(4)?,
        unit_price: row.get(5)?,
        date,
        purchase_order: row
            .get::<_, Option<String>>(7)?
            .filter(|po| !po.is_empty()),
    })
}

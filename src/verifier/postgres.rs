//! PostgreSQL customer store
//!
//! Holds a single connection for the whole verification and drives the
//! async `sqlx` API from a current-thread runtime, so every query runs
//! sequentially on the calling thread.

use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection, Postgres};
use tokio::runtime::{Builder, Runtime};

use super::record::{CustomerSummary, Row};
use super::store::CustomerStore;
use super::VerifyError;
use crate::config::DatabaseConfig;

/// Customer store backed by one PostgreSQL connection
#[derive(Debug)]
pub struct PgCustomerStore {
    runtime: Runtime,
    conn: PgConnection,
    table: String,
}

impl PgCustomerStore {
    /// Connect using the given settings.
    ///
    /// `config.table` must already be validated as a plain identifier.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, VerifyError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| VerifyError::Connection(sqlx::Error::Io(e)))?;

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        log::debug!(
            "Connecting to postgres://{}@{}:{}/{}",
            config.user,
            config.host,
            config.port,
            config.database
        );
        let conn = runtime
            .block_on(PgConnection::connect_with(&options))
            .map_err(VerifyError::Connection)?;

        Ok(Self {
            runtime,
            conn,
            table: config.table.clone(),
        })
    }

    /// Close the connection gracefully.
    ///
    /// Dropping the store also releases the connection, without the
    /// termination handshake.
    pub fn close(self) -> Result<(), VerifyError> {
        let Self { runtime, conn, .. } = self;
        runtime.block_on(conn.close()).map_err(VerifyError::Query)
    }

    fn fetch_summary(
        &mut self,
        sql: &str,
        bind: SummaryBind<'_>,
    ) -> Result<Option<CustomerSummary>, VerifyError> {
        let query = sqlx::query_as::<Postgres, (String, Option<String>, Option<String>)>(sql);
        let query = match bind {
            SummaryBind::Minutes(minutes) => query.bind(minutes),
            SummaryBind::Pattern(pattern) => query.bind(pattern),
        };

        let row = self
            .runtime
            .block_on(query.fetch_optional(&mut self.conn))
            .map_err(VerifyError::Query)?;

        Ok(row.map(|(customer_id, full_name, created_at)| CustomerSummary {
            customer_id,
            full_name,
            created_at,
        }))
    }
}

/// Live columns in table order.
///
/// `regclass` resolves the name like the unquoted `FROM <table>` in the row
/// queries: case-folded and looked up through `search_path`.
const COLUMNS_SQL: &str = "SELECT attname::text FROM pg_attribute \
                           WHERE attrelid = $1::text::regclass AND attnum > 0 AND NOT attisdropped \
                           ORDER BY attnum";

enum SummaryBind<'a> {
    Minutes(i32),
    Pattern(&'a str),
}

/// LIKE pattern matching values that start with `prefix` literally
pub(crate) fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl CustomerStore for PgCustomerStore {
    fn find_by_id(&mut self, customer_id: &str) -> Result<Option<Row>, VerifyError> {
        log::debug!("Fetching customer {customer_id}");
        let sql = format!("SELECT to_jsonb(t) FROM {} t WHERE t.customer_id = $1", self.table);

        let value = self
            .runtime
            .block_on(
                sqlx::query_scalar::<Postgres, Value>(&sql)
                    .bind(customer_id)
                    .fetch_optional(&mut self.conn),
            )
            .map_err(VerifyError::Query)?;

        Ok(value.map(|v| match v {
            Value::Object(map) => map,
            _ => Row::new(),
        }))
    }

    fn most_recent_within(&mut self, minutes: u32) -> Result<Option<CustomerSummary>, VerifyError> {
        log::debug!("Looking for customers created in the last {minutes} minutes");
        let sql = format!(
            "SELECT customer_id::text, full_name::text, created_at::text FROM {} \
             WHERE created_at > NOW() - make_interval(mins => $1) \
             ORDER BY created_at DESC LIMIT 1",
            self.table
        );
        let minutes = i32::try_from(minutes).unwrap_or(i32::MAX);
        self.fetch_summary(&sql, SummaryBind::Minutes(minutes))
    }

    fn most_recent_with_prefix(
        &mut self,
        prefix: &str,
    ) -> Result<Option<CustomerSummary>, VerifyError> {
        log::debug!("Looking for customers with prefix {prefix}");
        let sql = format!(
            "SELECT customer_id::text, full_name::text, created_at::text FROM {} \
             WHERE customer_id LIKE $1 \
             ORDER BY created_at DESC LIMIT 1",
            self.table
        );
        let pattern = like_prefix(prefix);
        self.fetch_summary(&sql, SummaryBind::Pattern(&pattern))
    }

    fn columns(&mut self) -> Result<Vec<String>, VerifyError> {
        let columns = self
            .runtime
            .block_on(
                sqlx::query_scalar::<Postgres, String>(COLUMNS_SQL)
                    .bind(&self.table)
                    .fetch_all(&mut self.conn),
            )
            .map_err(VerifyError::Query)?;

        log::debug!("Table {} has {} columns", self.table, columns.len());
        Ok(columns)
    }
}

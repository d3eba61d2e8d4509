use crate::domain::ports::{GatewayError, UserGateway};
use crate::utils::error::{Result, UploadError};
use async_trait::async_trait;
use sqlx::{AnyConnection, Connection};

const CREATE_USERS_MYSQL_SQL: &str = include_str!("../../sql/create_users_mysql.sql");
const CREATE_USERS_SQLITE_SQL: &str = include_str!("../../sql/create_users_sqlite.sql");
const INSERT_USER_SQL: &str = include_str!("../../sql/insert_user.sql");
const COUNT_USERS_SQL: &str = "SELECT COUNT(*) FROM users";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    MySql,
    Sqlite,
}

impl Backend {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "MySQL" => Some(Backend::MySql),
            "SQLite" => Some(Backend::Sqlite),
            _ => None,
        }
    }

    fn create_users_sql(self) -> &'static str {
        match self {
            Backend::MySql => CREATE_USERS_MYSQL_SQL,
            Backend::Sqlite => CREATE_USERS_SQLITE_SQL,
        }
    }
}

/// Users table behind a single database connection.
///
/// The connection is opened by [`SqlGateway::connect`] and released either by
/// [`SqlGateway::close`] or when the gateway is dropped.
pub struct SqlGateway {
    conn: AnyConnection,
    backend: Backend,
}

impl SqlGateway {
    pub async fn connect(url: &str) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let conn = AnyConnection::connect(url).await?;
        let backend = Backend::from_name(conn.backend_name()).ok_or_else(|| {
            UploadError::ConfigError {
                message: format!("Unsupported database backend: {}", conn.backend_name()),
            }
        })?;

        tracing::info!(?backend, "database connection established");
        Ok(Self { conn, backend })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub async fn user_count(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(COUNT_USERS_SQL)
            .fetch_one(&mut self.conn)
            .await?;
        Ok(count)
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        tracing::debug!("database connection closed");
        Ok(())
    }
}

fn classify(error: sqlx::Error) -> GatewayError {
    match &error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => GatewayError::DuplicateKey,
        _ => GatewayError::Other(error.to_string()),
    }
}

#[async_trait]
impl UserGateway for SqlGateway {
    async fn ensure_schema(&mut self) -> std::result::Result<(), GatewayError> {
        sqlx::query(self.backend.create_users_sql())
            .execute(&mut self.conn)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn insert(
        &mut self,
        name: &str,
        surname: &str,
        email: &str,
    ) -> std::result::Result<(), GatewayError> {
        sqlx::query(INSERT_USER_SQL)
            .bind(name)
            .bind(surname)
            .bind(email)
            .execute(&mut self.conn)
            .await
            .map_err(classify)?;
        Ok(())
    }
}

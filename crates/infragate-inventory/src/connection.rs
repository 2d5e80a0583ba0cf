//! Opening the inventory store.
//!
//! [`open`] works over any engine, so the in-memory engine used by tests and
//! the WebSocket client used by the server share the same start-up path:
//! select the inventory database, bring the schema up to date, hand back a
//! [`SurrealInventory`]. [`connect`] adds the transport and credentials.

use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Surreal};
use tracing::{info, warn};

use crate::error::DbError;
use crate::schema::run_migrations;
use crate::store::SurrealInventory;

/// Where the inventory database lives.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket address of the SurrealDB server (e.g. `127.0.0.1:8000`).
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root credentials. An empty username connects without signing in.
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "infragate".into(),
            database: "inventory".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Select `namespace`/`database` on `db`, apply pending migrations and wrap
/// the handle in an inventory store.
pub async fn open<C: Connection>(
    db: Surreal<C>,
    namespace: &str,
    database: &str,
) -> Result<SurrealInventory<C>, DbError> {
    db.use_ns(namespace).use_db(database).await?;
    run_migrations(&db).await?;
    info!(namespace, database, "Inventory store ready");
    Ok(SurrealInventory::new(db))
}

/// Connect to the SurrealDB server named by `config` and open the inventory
/// store on it.
pub async fn connect(config: &DbConfig) -> Result<SurrealInventory<Client>, DbError> {
    info!(
        url = %config.url,
        namespace = %config.namespace,
        database = %config.database,
        "Connecting to SurrealDB"
    );
    let db = Surreal::new::<Ws>(config.url.as_str()).await?;

    if config.username.is_empty() {
        warn!("No database username configured, continuing without sign-in");
    } else {
        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;
    }

    open(db, &config.namespace, &config.database).await
}

//! MySQL 连接器：持有单个连接，实现 [`StatementExecutor`]

use crate::bind_value::BindValue;
use crate::config::ConnectorConfig;
use crate::error::{DocQueryError, Result};
use crate::executor::{Record, StatementExecutor, WriteResult};
use crate::hook::StatementHook;
use crate::row::record_from_row;
use crate::statement::Statement;
use sqlx::mysql::{MySqlArguments, MySqlConnection};
use sqlx::query::Query;
use sqlx::{Connection, MySql};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

/// 连接生命周期事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorEvent {
    Connected,
    Disconnected,
}

/// 将绑定值依次应用到查询中
fn apply_binds<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    binds: &[BindValue],
) -> Query<'q, MySql, MySqlArguments> {
    for bind in binds {
        query = match bind.clone() {
            BindValue::String(s) => query.bind(s),
            BindValue::Int64(i) => query.bind(i),
            BindValue::UInt64(u) => query.bind(u),
            BindValue::Float64(f) => query.bind(f),
            BindValue::Bool(b) => query.bind(b),
            BindValue::Bytes(b) => query.bind(b),
            BindValue::Null => query.bind(Option::<String>::None),
        };
    }
    query
}

pub struct MySqlConnector {
    config: ConnectorConfig,
    connection: Mutex<Option<MySqlConnection>>,
    events: broadcast::Sender<ConnectorEvent>,
    hooks: Vec<Arc<dyn StatementHook>>,
}

impl MySqlConnector {
    pub fn new(config: ConnectorConfig) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            config,
            connection: Mutex::new(None),
            events,
            hooks: Vec::new(),
        }
    }

    /// 添加语句钩子（链式调用，可多次调用）
    pub fn with_hook(mut self, hook: impl StatementHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// 订阅连接 / 断开事件
    pub fn subscribe(&self) -> broadcast::Receiver<ConnectorEvent> {
        self.events.subscribe()
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.lock().await.is_some()
    }

    /// 建立连接，成功后广播 [`ConnectorEvent::Connected`]
    ///
    /// 已有连接时会先关闭旧连接。
    pub async fn connect(&self) -> Result<()> {
        let options = self.config.connect_options();
        let connection = MySqlConnection::connect_with(&options).await?;

        let previous = self.connection.lock().await.replace(connection);
        if let Some(previous) = previous {
            if let Err(err) = previous.close().await {
                tracing::warn!(error = %err, "failed to close previous connection");
            }
        }

        tracing::info!(
            host = self.config.host.as_deref().unwrap_or("localhost"),
            database = self.config.database.as_deref().unwrap_or("-"),
            "connected to mysql"
        );
        let _ = self.events.send(ConnectorEvent::Connected);
        Ok(())
    }

    /// 关闭连接，无论关闭是否成功都会广播 [`ConnectorEvent::Disconnected`]
    pub async fn disconnect(&self) -> Result<()> {
        let connection = self.connection.lock().await.take();
        let result = match connection {
            Some(connection) => connection.close().await.map_err(DocQueryError::from),
            None => Ok(()),
        };

        tracing::info!("disconnected from mysql");
        let _ = self.events.send(ConnectorEvent::Disconnected);
        result
    }

    fn run_hooks(&self, statement: &Statement) {
        for hook in &self.hooks {
            hook.before_statement(statement);
        }
    }
}

#[async_trait::async_trait]
impl StatementExecutor for MySqlConnector {
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Record>> {
        self.run_hooks(statement);

        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or(DocQueryError::NotConnected)?;

        let query = apply_binds(sqlx::query(&statement.sql), &statement.values);
        let rows = query.fetch_all(&mut *connection).await?;
        tracing::debug!(rows = rows.len(), "statement fetched");

        rows.iter().map(record_from_row).collect()
    }

    async fn execute(&self, statement: &Statement) -> Result<WriteResult> {
        self.run_hooks(statement);

        let mut guard = self.connection.lock().await;
        let connection = guard.as_mut().ok_or(DocQueryError::NotConnected)?;

        let query = apply_binds(sqlx::query(&statement.sql), &statement.values);
        let result = query.execute(&mut *connection).await?;
        tracing::debug!(
            affected_rows = result.rows_affected(),
            "statement executed"
        );

        Ok(WriteResult {
            affected_rows: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }
}

//! 连接配置

use crate::error::{DocQueryError, Result};
use serde::Deserialize;

/// MySQL 连接配置
///
/// 反序列化时会忽略未知字段，只保留连接所需的参数。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl ConnectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `MYSQL_HOST`、`MYSQL_PORT`、`MYSQL_USER`、`MYSQL_PASSWORD`、`MYSQL_DATABASE` 读取
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("MYSQL_PORT") {
            Some(port) => Some(port.parse::<u16>().map_err(|_| {
                DocQueryError::Config(format!("MYSQL_PORT is not a valid port: {}", port))
            })?),
            None => None,
        };

        Ok(Self {
            host: lookup("MYSQL_HOST"),
            port,
            user: lookup("MYSQL_USER"),
            password: lookup("MYSQL_PASSWORD"),
            database: lookup("MYSQL_DATABASE"),
        })
    }

    /// 用 `overrides` 中已设置的字段覆盖当前配置
    pub fn merge(self, overrides: ConnectorConfig) -> Self {
        Self {
            host: overrides.host.or(self.host),
            port: overrides.port.or(self.port),
            user: overrides.user.or(self.user),
            password: overrides.password.or(self.password),
            database: overrides.database.or(self.database),
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// 转换为 sqlx 的连接参数，未设置的字段使用 sqlx 默认值
    #[cfg(feature = "mysql")]
    pub fn connect_options(&self) -> sqlx::mysql::MySqlConnectOptions {
        let mut options = sqlx::mysql::MySqlConnectOptions::new();
        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        options
    }
}

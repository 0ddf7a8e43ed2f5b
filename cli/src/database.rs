use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Password};
use docquery::{ConnectorConfig, MySqlConnector, TracingStatementHook};

/// 连接参数，未指定的字段回退到 MYSQL_* 环境变量（见 [`ConnectorConfig::from_env`]）
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// MySQL host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// MySQL port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// MySQL user
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// MySQL password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// MySQL database name
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Prompt for the password instead of reading it from flags or environment
    #[arg(long, global = true)]
    pub ask_password: bool,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> Result<ConnectorConfig> {
        let password = if self.ask_password {
            let password = Password::with_theme(&ColorfulTheme::default())
                .with_prompt("MySQL password")
                .allow_empty_password(true)
                .interact()
                .context("Failed to read password")?;
            Some(password)
        } else {
            self.password.clone()
        };

        let overrides = ConnectorConfig {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password,
            database: self.database.clone(),
        };
        let config = ConnectorConfig::from_env().context("Invalid MYSQL_* environment")?;
        Ok(config.merge(overrides))
    }
}

/// 建立连接，每条语句都会通过 tracing 输出
pub async fn connect(args: &ConnectionArgs) -> Result<MySqlConnector> {
    let config = args.to_config()?;
    let connector = MySqlConnector::new(config).with_hook(TracingStatementHook::new());
    connector
        .connect()
        .await
        .context("Failed to connect to database")?;
    Ok(connector)
}

pub mod bind_value;
pub mod builder;
pub mod config;
#[cfg(feature = "mysql")]
pub mod connector;
pub mod crud;
pub mod document;
pub mod error;
pub mod executor;
pub mod hook;
pub mod options;
#[cfg(feature = "mysql")]
pub mod row;
pub mod statement;

pub use bind_value::BindValue;
pub use config::ConnectorConfig;
#[cfg(feature = "mysql")]
pub use connector::{ConnectorEvent, MySqlConnector};
pub use crud::Crud;
pub use document::{document_from_json, rows_from_json, Criteria, Document, Row, UpdateSet};
pub use error::{DocQueryError, Result};
pub use executor::{Record, StatementExecutor, WriteResult};
pub use hook::{StatementHook, TracingStatementHook};
pub use options::{DeleteOptions, FindOptions, SortDirection, SortSpec, UpdateOptions};
pub use statement::Statement;

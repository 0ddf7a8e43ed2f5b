use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use docquery::builder::{
    build_count_statement, build_delete_one_statement, build_delete_statement,
    build_find_one_statement, build_find_statement, build_insert_many_statement,
    build_insert_one_statement, build_update_one_statement, build_update_statement,
};
use docquery::{
    document_from_json, rows_from_json, DeleteOptions, Document, FindOptions, Statement,
    UpdateOptions,
};
use serde::de::DeserializeOwned;

/// 语句类型：读语句返回行，写语句返回影响行数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Write,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// SELECT matching rows
    Find {
        #[command(flatten)]
        target: Target,
        /// Find options as JSON: {"projections": [..], "sort": {..}, "limit": n, "offset": n}
        #[arg(short, long)]
        options: Option<String>,
        /// Only return the first matching row
        #[arg(long)]
        one: bool,
    },
    /// COUNT matching rows
    Count {
        #[command(flatten)]
        target: Target,
    },
    /// INSERT one row (JSON object) or a batch of rows (JSON array)
    Insert {
        /// Table name
        #[arg(short, long)]
        table: String,
        /// Row object or array of row objects
        #[arg(short, long)]
        rows: String,
    },
    /// UPDATE matching rows
    Update {
        #[command(flatten)]
        target: Target,
        /// Fields to assign as a JSON object
        #[arg(short, long)]
        set: String,
        /// Update options as JSON: {"sort": {..}, "limit": n}
        #[arg(short, long)]
        options: Option<String>,
        /// Only update the first matching row
        #[arg(long)]
        one: bool,
    },
    /// DELETE matching rows
    Delete {
        #[command(flatten)]
        target: Target,
        /// Delete options as JSON: {"sort": {..}, "limit": n}
        #[arg(short, long)]
        options: Option<String>,
        /// Only delete the first matching row
        #[arg(long)]
        one: bool,
    },
}

#[derive(Args, Debug)]
pub struct Target {
    /// Table name
    #[arg(short, long)]
    pub table: String,
    /// Match criteria as a JSON object (key order is kept)
    #[arg(short, long)]
    pub criteria: Option<String>,
}

impl Target {
    fn criteria(&self) -> Result<Document> {
        match &self.criteria {
            Some(raw) => parse_document(raw, "criteria"),
            None => Ok(Document::new()),
        }
    }
}

fn parse_document(raw: &str, what: &str) -> Result<Document> {
    let value: serde_json::Value =
        serde_json::from_str(raw).with_context(|| format!("Failed to parse {} JSON", what))?;
    document_from_json(value).with_context(|| format!("Invalid {}", what))
}

fn parse_options<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T> {
    match raw {
        Some(raw) => serde_json::from_str(raw).context("Failed to parse options JSON"),
        None => Ok(T::default()),
    }
}

impl Command {
    /// 构建语句，不接触数据库
    pub fn build(&self) -> Result<(Statement, StatementKind)> {
        let planned = match self {
            Command::Find {
                target,
                options,
                one,
            } => {
                let criteria = target.criteria()?;
                let options: FindOptions = parse_options(options.as_deref())?;
                let statement = if *one {
                    build_find_one_statement(&target.table, &criteria, &options)
                } else {
                    build_find_statement(&target.table, &criteria, &options)
                };
                (statement, StatementKind::Read)
            }
            Command::Count { target } => {
                let criteria = target.criteria()?;
                (
                    build_count_statement(&target.table, &criteria),
                    StatementKind::Read,
                )
            }
            Command::Insert { table, rows } => {
                let value: serde_json::Value =
                    serde_json::from_str(rows).context("Failed to parse rows JSON")?;
                let statement = if value.is_object() {
                    let row = document_from_json(value)?;
                    build_insert_one_statement(table, &row)?
                } else {
                    let rows = rows_from_json(value)?;
                    build_insert_many_statement(table, &rows)?
                };
                (statement, StatementKind::Write)
            }
            Command::Update {
                target,
                set,
                options,
                one,
            } => {
                let criteria = target.criteria()?;
                let sets = parse_document(set, "set")?;
                let options: UpdateOptions = parse_options(options.as_deref())?;
                let statement = if *one {
                    build_update_one_statement(&target.table, &criteria, &sets, &options)?
                } else {
                    build_update_statement(&target.table, &criteria, &sets, &options)?
                };
                (statement, StatementKind::Write)
            }
            Command::Delete {
                target,
                options,
                one,
            } => {
                let criteria = target.criteria()?;
                let options: DeleteOptions = parse_options(options.as_deref())?;
                let statement = if *one {
                    build_delete_one_statement(&target.table, &criteria, &options)?
                } else {
                    build_delete_statement(&target.table, &criteria, &options)?
                };
                (statement, StatementKind::Write)
            }
        };
        Ok(planned)
    }
}

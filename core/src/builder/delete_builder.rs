//! Delete Builder - 与 UPDATE 形状相同，只是没有 SET 子句

use super::clause::{append_tail, document_values};
use crate::document::Criteria;
use crate::error::{DocQueryError, Result};
use crate::options::DeleteOptions;
use crate::statement::Statement;

/// 构建 DELETE 语句
///
/// 空条件会被拒绝，防止误删整张表。
pub fn build_delete_statement(
    table: &str,
    criteria: &Criteria,
    options: &DeleteOptions,
) -> Result<Statement> {
    if criteria.is_empty() {
        return Err(DocQueryError::EmptyDeleteMatch);
    }

    let mut sql = format!("DELETE FROM {}", table);
    append_tail(&mut sql, criteria, &options.sort, options.limit, None);
    Ok(Statement::new(sql, document_values(criteria)))
}

/// 构建只删除一行的 DELETE 语句
pub fn build_delete_one_statement(
    table: &str,
    criteria: &Criteria,
    options: &DeleteOptions,
) -> Result<Statement> {
    if criteria.is_empty() {
        return Err(DocQueryError::EmptyMatch("single delete"));
    }
    let options = options.clone().limit(1);
    build_delete_statement(table, criteria, &options)
}

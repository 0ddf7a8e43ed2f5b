//! Find Builder - SELECT / COUNT 语句

use super::clause::{append_tail, build_field_list, document_values};
use crate::document::Criteria;
use crate::options::{FindOptions, SortSpec};
use crate::statement::Statement;

/// 构建 SELECT 语句
///
/// 绑定值为 criteria 中按键顺序排列的值。
pub fn build_find_statement(table: &str, criteria: &Criteria, options: &FindOptions) -> Statement {
    let mut sql = format!(
        "SELECT {} FROM {}",
        build_field_list(&options.projections),
        table
    );
    append_tail(
        &mut sql,
        criteria,
        &options.sort,
        options.limit,
        options.offset,
    );
    Statement::new(sql, document_values(criteria))
}

/// 构建只取一行的 SELECT 语句，其余选项保持不变
pub fn build_find_one_statement(
    table: &str,
    criteria: &Criteria,
    options: &FindOptions,
) -> Statement {
    let options = options.clone().limit(1);
    build_find_statement(table, criteria, &options)
}

/// 构建 `SELECT COUNT(*) AS count` 语句
pub fn build_count_statement(table: &str, criteria: &Criteria) -> Statement {
    let mut sql = format!("SELECT COUNT(*) AS count FROM {}", table);
    append_tail(&mut sql, criteria, &SortSpec::new(), None, None);
    Statement::new(sql, document_values(criteria))
}

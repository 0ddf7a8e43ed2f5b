//! Update Builder - 带匹配条件、排序和数量限制的更新

use super::clause::{append_tail, build_set_list, document_values};
use crate::document::{Criteria, UpdateSet};
use crate::error::{DocQueryError, Result};
use crate::options::UpdateOptions;
use crate::statement::Statement;

/// 构建 UPDATE 语句
///
/// 绑定值顺序：先 SET 的值，再 WHERE 的值，与 SQL 中出现的顺序一致。
/// 空的 criteria 会匹配所有行。
pub fn build_update_statement(
    table: &str,
    criteria: &Criteria,
    sets: &UpdateSet,
    options: &UpdateOptions,
) -> Result<Statement> {
    if sets.is_empty() {
        return Err(DocQueryError::EmptySet);
    }

    let mut sql = format!("UPDATE {} SET {}", table, build_set_list(sets));
    append_tail(&mut sql, criteria, &options.sort, options.limit, None);

    let mut values = document_values(sets);
    values.extend(document_values(criteria));
    Ok(Statement::new(sql, values))
}

/// 构建只更新一行的 UPDATE 语句
///
/// 不接受空的 criteria，调用方必须明确缩小匹配范围。
pub fn build_update_one_statement(
    table: &str,
    criteria: &Criteria,
    sets: &UpdateSet,
    options: &UpdateOptions,
) -> Result<Statement> {
    if criteria.is_empty() {
        return Err(DocQueryError::EmptyMatch("single update"));
    }
    let options = options.clone().limit(1);
    build_update_statement(table, criteria, sets, &options)
}

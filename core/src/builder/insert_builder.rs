//! Insert Builder - 单行与批量插入

use crate::bind_value::BindValue;
use crate::document::Row;
use crate::error::{DocQueryError, Result};
use crate::statement::Statement;

/// 所有行共有的字段，按字母序排列
///
/// 单行时直接返回该行排序后的键。
pub fn common_fields(rows: &[Row]) -> Vec<String> {
    let Some((first, rest)) = rows.split_first() else {
        return Vec::new();
    };

    let mut fields: Vec<String> = first
        .keys()
        .filter(|key| rest.iter().all(|row| row.contains_key(key.as_str())))
        .cloned()
        .collect();
    fields.sort();
    fields
}

/// 按键的字母序重排一行
pub fn sort_by_keys(row: &Row) -> Row {
    let mut sorted = row.clone();
    sorted.sort_keys();
    sorted
}

/// 批量插入的绑定值：每行各自按键排序后依次展开
pub fn insert_values(rows: &[Row]) -> Vec<BindValue> {
    rows.iter()
        .flat_map(|row| sort_by_keys(row).into_values())
        .collect()
}

/// 构建 `INSERT INTO t (f1,f2) VALUES (?,?),(?,?)`
///
/// `fields` 需要已经排好序并通过校验，`row_count` 为占位符分组的数量。
pub fn build_insert_sql<S: AsRef<str>>(table: &str, fields: &[S], row_count: usize) -> String {
    let field_list = fields
        .iter()
        .map(|field| field.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    let row_placeholders = vec!["?"; fields.len()].join(",");
    let rows_placeholders = vec![row_placeholders; row_count].join("),(");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table, field_list, rows_placeholders
    )
}

/// 校验所有行的字段集合一致，返回排序后的字段列表
fn validate_row_shapes(rows: &[Row]) -> Result<Vec<String>> {
    let Some(first) = rows.first() else {
        return Err(DocQueryError::EmptyBatch);
    };

    let mut first_fields: Vec<String> = first.keys().cloned().collect();
    first_fields.sort();

    let fields = common_fields(rows);
    // 任何一行多出或缺少字段都会让交集与首行不一致
    let same_width = rows.iter().all(|row| row.len() == fields.len());
    if first_fields != fields || !same_width {
        return Err(DocQueryError::ShapeMismatch);
    }
    Ok(fields)
}

/// 批量插入
pub fn build_insert_many_statement(table: &str, rows: &[Row]) -> Result<Statement> {
    let fields = validate_row_shapes(rows)?;
    if fields.is_empty() {
        return Err(DocQueryError::EmptyRow);
    }

    let sql = build_insert_sql(table, &fields, rows.len());
    Ok(Statement::new(sql, insert_values(rows)))
}

/// 单行插入
pub fn build_insert_one_statement(table: &str, row: &Row) -> Result<Statement> {
    if row.is_empty() {
        return Err(DocQueryError::EmptyRow);
    }
    build_insert_many_statement(table, std::slice::from_ref(row))
}

//! 子句构建函数
//!
//! 纯函数，只负责拼出 SQL 片段，不涉及任何 I/O。列名原样输出，
//! 需要转义时由调用方处理。

use crate::bind_value::BindValue;
use crate::document::Document;
use crate::options::SortSpec;
use std::fmt::Write;

/// SELECT 的字段列表，空投影返回 `*`
pub fn build_field_list<S: AsRef<str>>(projections: &[S]) -> String {
    if projections.is_empty() {
        return "*".to_string();
    }
    projections
        .iter()
        .map(|field| field.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

/// WHERE 谓词，按键的插入顺序生成 `col=? AND col=?`
///
/// 空条件返回恒真式 `1`，保证 `WHERE` 后面永远有合法内容。
pub fn build_predicate(criteria: &Document) -> String {
    if criteria.is_empty() {
        return "1".to_string();
    }
    criteria
        .keys()
        .map(|field| format!("{}=?", field))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// ORDER BY 片段，没有有效排序列时返回空字符串
pub fn build_sort(sort: &SortSpec) -> String {
    let parts: Vec<String> = sort
        .iter()
        .filter_map(|(field, direction)| {
            direction.map(|direction| format!("{} {}", field, direction.as_sql()))
        })
        .collect();

    if parts.is_empty() {
        return String::new();
    }
    format!("ORDER BY {}", parts.join(","))
}

/// LIMIT / OFFSET 片段（带前导空格）
///
/// 只有 limit 为正数时才输出；offset 依附于 limit，单独出现不会生效。
pub fn build_limit_offset(limit: Option<u64>, offset: Option<u64>) -> String {
    let mut sql = String::new();

    if let Some(limit) = limit.filter(|&n| n > 0) {
        let _ = write!(sql, " LIMIT {}", limit);
        if let Some(offset) = offset.filter(|&n| n > 0) {
            let _ = write!(sql, " OFFSET {}", offset);
        }
    }

    sql
}

/// UPDATE 的 SET 列表：`col=?,col=?`
pub fn build_set_list(sets: &Document) -> String {
    sets.keys()
        .map(|field| format!("{}=?", field))
        .collect::<Vec<_>>()
        .join(",")
}

/// 按键顺序提取绑定值，与 [`build_predicate`] / [`build_set_list`] 的占位符顺序一致
pub fn document_values(document: &Document) -> Vec<BindValue> {
    document.values().cloned().collect()
}

/// 把 WHERE、ORDER BY、LIMIT 拼到语句头后面
pub(crate) fn append_tail(
    sql: &mut String,
    criteria: &Document,
    sort: &SortSpec,
    limit: Option<u64>,
    offset: Option<u64>,
) {
    sql.push_str(" WHERE ");
    sql.push_str(&build_predicate(criteria));

    let sort_sql = build_sort(sort);
    if !sort_sql.is_empty() {
        sql.push(' ');
        sql.push_str(&sort_sql);
    }

    sql.push_str(&build_limit_offset(limit, offset));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;

    #[test]
    fn test_field_list_wildcard() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(build_field_list(&empty), "*");
    }

    #[test]
    fn test_field_list_single_and_many() {
        assert_eq!(build_field_list(&["test"]), "test");
        assert_eq!(
            build_field_list(&["test", "coffee", "latte"]),
            "test,coffee,latte"
        );
    }

    #[test]
    fn test_predicate_empty_is_tautology() {
        assert_eq!(build_predicate(&document! {}), "1");
    }

    #[test]
    fn test_predicate_keeps_key_order() {
        assert_eq!(build_predicate(&document! { "joe" => 1 }), "joe=?");
        let criteria = document! { "joe" => 1, "jake" => "x", "john" => true };
        assert_eq!(build_predicate(&criteria), "joe=? AND jake=? AND john=?");
    }

    #[test]
    fn test_predicate_placeholders_match_values() {
        let criteria = document! { "b" => 2, "a" => 1, "c" => 3 };
        let predicate = build_predicate(&criteria);
        let values = document_values(&criteria);
        assert_eq!(predicate.matches('?').count(), criteria.len());
        assert_eq!(
            values,
            vec![BindValue::from(2), BindValue::from(1), BindValue::from(3)]
        );
    }

    #[test]
    fn test_sort_empty() {
        assert_eq!(build_sort(&SortSpec::new()), "");
        assert_eq!(build_sort(&SortSpec::new().push("a", None)), "");
    }

    #[test]
    fn test_sort_case_normalized() {
        let sort = SortSpec::new()
            .parse("id", "asc")
            .unwrap()
            .parse("name", "DESC")
            .unwrap();
        assert_eq!(build_sort(&sort), "ORDER BY id ASC,name DESC");
    }

    #[test]
    fn test_sort_skips_excluded_without_dangling_comma() {
        let sort = SortSpec::new().push("a", None).asc("b").push("c", None);
        assert_eq!(build_sort(&sort), "ORDER BY b ASC");
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(build_limit_offset(Some(0), Some(5)), "");
        assert_eq!(build_limit_offset(None, Some(5)), "");
        assert_eq!(build_limit_offset(Some(5), Some(0)), " LIMIT 5");
        assert_eq!(build_limit_offset(Some(5), None), " LIMIT 5");
        assert_eq!(build_limit_offset(Some(5), Some(10)), " LIMIT 5 OFFSET 10");
    }

    #[test]
    fn test_set_list() {
        let sets = document! { "name" => "test", "age" => 30 };
        assert_eq!(build_set_list(&sets), "name=?,age=?");
    }

    #[test]
    fn test_sort_zero_direction_excluded() {
        let sort: SortSpec =
            serde_json::from_value(serde_json::json!({"id": 0, "name": "desc"})).unwrap();
        assert_eq!(build_sort(&sort), "ORDER BY name DESC");
    }
}

//! 语句构建模块
//!
//! `clause` 提供各个子句片段，其余模块把片段组装成完整语句并给出对应的绑定值。

pub mod clause;
pub mod delete_builder;
pub mod find_builder;
pub mod insert_builder;
pub mod update_builder;

pub use clause::{
    build_field_list, build_limit_offset, build_predicate, build_set_list, build_sort,
    document_values,
};
pub use delete_builder::{build_delete_one_statement, build_delete_statement};
pub use find_builder::{build_count_statement, build_find_one_statement, build_find_statement};
pub use insert_builder::{
    build_insert_many_statement, build_insert_one_statement, build_insert_sql, common_fields,
    insert_values, sort_by_keys,
};
pub use update_builder::{build_update_one_statement, build_update_statement};

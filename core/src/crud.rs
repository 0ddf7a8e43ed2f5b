use crate::bind_value::BindValue;
use crate::builder::{
    build_count_statement, build_delete_one_statement, build_delete_statement,
    build_find_one_statement, build_find_statement, build_insert_many_statement,
    build_insert_one_statement, build_update_one_statement, build_update_statement,
};
use crate::document::{Criteria, Row, UpdateSet};
use crate::error::Result;
use crate::executor::{Record, StatementExecutor, WriteResult};
use crate::options::{DeleteOptions, FindOptions, UpdateOptions};
use crate::statement::Statement;

/// Crud trait 提供了基于表名和有序文档的 CRUD 操作
///
/// 为所有 [`StatementExecutor`] 自动实现。每个方法先构建语句，
/// 校验失败时直接返回错误，不会触达执行器。
#[async_trait::async_trait]
pub trait Crud: StatementExecutor {
    /// 执行原始 SQL
    async fn query(&self, sql: &str, values: Vec<BindValue>) -> Result<Vec<Record>> {
        self.fetch_all(&Statement::new(sql, values)).await
    }

    /// 统计匹配的行数
    async fn count(&self, table: &str, criteria: &Criteria) -> Result<u64> {
        let statement = build_count_statement(table, criteria);
        let rows = self.fetch_all(&statement).await?;
        Ok(rows
            .first()
            .and_then(|row| row.get("count"))
            .and_then(|count| count.as_u64())
            .unwrap_or(0))
    }

    async fn find_many(
        &self,
        table: &str,
        criteria: &Criteria,
        options: &FindOptions,
    ) -> Result<Vec<Record>> {
        let statement = build_find_statement(table, criteria, options);
        self.fetch_all(&statement).await
    }

    /// 查找第一条匹配的记录，没有时返回 `None`
    async fn find_one(
        &self,
        table: &str,
        criteria: &Criteria,
        options: &FindOptions,
    ) -> Result<Option<Record>> {
        let statement = build_find_one_statement(table, criteria, options);
        let rows = self.fetch_all(&statement).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_many(&self, table: &str, rows: &[Row]) -> Result<WriteResult> {
        let statement = build_insert_many_statement(table, rows)?;
        self.execute(&statement).await
    }

    async fn insert_one(&self, table: &str, row: &Row) -> Result<WriteResult> {
        let statement = build_insert_one_statement(table, row)?;
        self.execute(&statement).await
    }

    async fn update_many(
        &self,
        table: &str,
        criteria: &Criteria,
        sets: &UpdateSet,
        options: &UpdateOptions,
    ) -> Result<WriteResult> {
        let statement = build_update_statement(table, criteria, sets, options)?;
        self.execute(&statement).await
    }

    async fn update_one(
        &self,
        table: &str,
        criteria: &Criteria,
        sets: &UpdateSet,
        options: &UpdateOptions,
    ) -> Result<WriteResult> {
        let statement = build_update_one_statement(table, criteria, sets, options)?;
        self.execute(&statement).await
    }

    async fn delete_many(
        &self,
        table: &str,
        criteria: &Criteria,
        options: &DeleteOptions,
    ) -> Result<WriteResult> {
        let statement = build_delete_statement(table, criteria, options)?;
        self.execute(&statement).await
    }

    async fn delete_one(
        &self,
        table: &str,
        criteria: &Criteria,
        options: &DeleteOptions,
    ) -> Result<WriteResult> {
        let statement = build_delete_one_statement(table, criteria, options)?;
        self.execute(&statement).await
    }
}

impl<E: StatementExecutor + ?Sized> Crud for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;
    use crate::error::DocQueryError;
    use crate::options::SortSpec;
    use serde_json::json;
    use std::sync::Mutex;

    /// 记录收到的语句，并返回预设结果
    #[derive(Default)]
    struct RecordingExecutor {
        statements: Mutex<Vec<Statement>>,
        rows: Vec<Record>,
    }

    impl RecordingExecutor {
        fn with_rows(rows: Vec<serde_json::Value>) -> Self {
            Self {
                statements: Mutex::new(Vec::new()),
                rows: rows
                    .into_iter()
                    .filter_map(|row| row.as_object().cloned())
                    .collect(),
            }
        }

        fn statements(&self) -> Vec<Statement> {
            self.statements.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl StatementExecutor for RecordingExecutor {
        async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Record>> {
            self.statements.lock().unwrap().push(statement.clone());
            Ok(self.rows.clone())
        }

        async fn execute(&self, statement: &Statement) -> Result<WriteResult> {
            self.statements.lock().unwrap().push(statement.clone());
            Ok(WriteResult {
                affected_rows: 1,
                last_insert_id: 0,
            })
        }
    }

    #[tokio::test]
    async fn test_query_passes_values_through() {
        let executor = RecordingExecutor::default();
        executor
            .query(
                "SELECT ? AS test1, ? AS test2 FROM DUAL",
                vec![BindValue::from("joe"), BindValue::from("mocha")],
            )
            .await
            .unwrap();
        let statements = executor.statements();
        assert_eq!(
            statements[0].to_string(),
            "SELECT ? AS test1, ? AS test2 FROM DUAL [joe, mocha]"
        );
    }

    #[tokio::test]
    async fn test_count() {
        let executor = RecordingExecutor::with_rows(vec![json!({"count": 3})]);
        let count = executor.count("tests", &document! {}).await.unwrap();
        assert_eq!(count, 3);
        assert_eq!(
            executor.statements()[0].sql,
            "SELECT COUNT(*) AS count FROM tests WHERE 1"
        );
    }

    #[tokio::test]
    async fn test_find_one_returns_first_row() {
        let executor = RecordingExecutor::with_rows(vec![
            json!({"id": 2, "name": "test 2"}),
            json!({"id": 3, "name": "test 3"}),
        ]);
        let row = executor
            .find_one("tests", &document! { "type" => 3 }, &FindOptions::new())
            .await
            .unwrap();
        assert_eq!(row.unwrap()["id"], json!(2));
        assert_eq!(
            executor.statements()[0].sql,
            "SELECT * FROM tests WHERE type=? LIMIT 1"
        );
    }

    #[tokio::test]
    async fn test_find_one_without_rows() {
        let executor = RecordingExecutor::default();
        let row = executor
            .find_one("tests", &document! { "id" => 42 }, &FindOptions::new())
            .await
            .unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_find_many_with_sort() {
        let executor = RecordingExecutor::default();
        let options = FindOptions::new().sort(SortSpec::new().asc("id"));
        executor
            .find_many("tests", &document! {}, &options)
            .await
            .unwrap();
        assert_eq!(
            executor.statements()[0].sql,
            "SELECT * FROM tests WHERE 1 ORDER BY id ASC"
        );
    }

    #[tokio::test]
    async fn test_validation_errors_skip_executor() {
        let executor = RecordingExecutor::default();

        let err = executor
            .insert_many(
                "tests",
                &[
                    document! { "id" => 1, "type" => 1, "name" => "John Doe" },
                    document! { "id" => 2, "name" => "Joe Mocha" },
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocQueryError::ShapeMismatch));

        let err = executor
            .insert_one("tests2", &document! {})
            .await
            .unwrap_err();
        assert!(matches!(err, DocQueryError::EmptyRow));

        let err = executor
            .update_many("tests", &document! {}, &document! {}, &UpdateOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DocQueryError::EmptySet));

        let err = executor
            .update_one(
                "tests",
                &document! {},
                &document! { "type" => 5 },
                &UpdateOptions::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocQueryError::EmptyMatch(_)));

        let err = executor
            .delete_one("tests", &document! {}, &DeleteOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DocQueryError::EmptyMatch(_)));

        let err = executor
            .delete_many("tests", &document! {}, &DeleteOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DocQueryError::EmptyDeleteMatch));

        assert!(executor.statements().is_empty());
    }

    #[tokio::test]
    async fn test_update_many_binds_set_then_match() {
        let executor = RecordingExecutor::default();
        executor
            .update_many(
                "tests",
                &document! { "country" => "FR", "type" => 1 },
                &document! { "type" => 5, "name" => "updated" },
                &UpdateOptions::new(),
            )
            .await
            .unwrap();
        let statement = &executor.statements()[0];
        assert_eq!(
            statement.sql,
            "UPDATE tests SET type=?,name=? WHERE country=? AND type=?"
        );
        assert_eq!(
            statement.values,
            vec![
                BindValue::from(5),
                BindValue::from("updated"),
                BindValue::from("FR"),
                BindValue::from(1),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_many_and_insert_many() {
        let executor = RecordingExecutor::default();
        executor
            .delete_many(
                "tests",
                &document! { "country" => "FR" },
                &DeleteOptions::new().limit(2),
            )
            .await
            .unwrap();
        let result = executor
            .insert_many("tests", &[document! { "type" => 1, "id" => 3, "name" => "Jake" }])
            .await
            .unwrap();
        assert_eq!(result.affected_rows, 1);

        let statements = executor.statements();
        assert_eq!(statements[0].sql, "DELETE FROM tests WHERE country=? LIMIT 2");
        assert_eq!(
            statements[1].sql,
            "INSERT INTO tests (id,name,type) VALUES (?,?,?)"
        );
    }
}

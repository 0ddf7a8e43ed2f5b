//! 语句执行前的钩子

use crate::statement::Statement;
use tracing::Level;

/// 在每条语句交给数据库之前被调用
pub trait StatementHook: Send + Sync {
    fn before_statement(&self, statement: &Statement);
}

/// 基于 `tracing` 的 SQL 日志钩子
#[derive(Debug, Clone)]
pub struct TracingStatementHook {
    /// 日志级别
    pub level: Level,
    /// 超过该长度（字节）的 SQL 会被截断，`None` 表示不截断
    pub max_sql_length: Option<usize>,
}

impl Default for TracingStatementHook {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl TracingStatementHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.max_sql_length {
            Some(max) if sql.len() > max => {
                // 截断位置必须落在字符边界上
                let mut end = max;
                while !sql.is_char_boundary(end) {
                    end -= 1;
                }
                format!("{}...", &sql[..end]).into()
            }
            _ => sql.into(),
        }
    }
}

impl StatementHook for TracingStatementHook {
    fn before_statement(&self, statement: &Statement) {
        let sql = self.truncate_sql(&statement.sql);
        let values = tracing::field::display(ValueList(statement));

        match self.level {
            Level::ERROR => tracing::error!(target: "docquery.sql", %sql, values),
            Level::WARN => tracing::warn!(target: "docquery.sql", %sql, values),
            Level::INFO => tracing::info!(target: "docquery.sql", %sql, values),
            Level::DEBUG => tracing::debug!(target: "docquery.sql", %sql, values),
            Level::TRACE => tracing::trace!(target: "docquery.sql", %sql, values),
        }
    }
}

struct ValueList<'a>(&'a Statement);

impl std::fmt::Display for ValueList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind_value::BindValue;

    #[test]
    fn test_truncate_sql() {
        let hook = TracingStatementHook::new().max_sql_length(6);
        assert_eq!(hook.truncate_sql("SELECT * FROM t"), "SELECT...");
        assert_eq!(hook.truncate_sql("SELECT"), "SELECT");
        assert_eq!(hook.no_truncate().truncate_sql("SELECT * FROM t"), "SELECT * FROM t");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let hook = TracingStatementHook::new().max_sql_length(2);
        assert_eq!(hook.truncate_sql("éé"), "é...");
    }

    #[test]
    fn test_value_list() {
        let statement = Statement::new(
            "SELECT ?, ?",
            vec![BindValue::from("joe"), BindValue::Null],
        );
        assert_eq!(ValueList(&statement).to_string(), "[joe, NULL]");
    }
}

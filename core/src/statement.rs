use crate::bind_value::BindValue;
use serde::Serialize;
use std::fmt;

/// 构建完成的语句：带 `?` 占位符的 SQL 和按位置排列的绑定值
///
/// `values` 的长度和顺序与 `sql` 中从左到右的 `?` 一一对应。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<BindValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, values: Vec<BindValue>) -> Self {
        Self {
            sql: sql.into(),
            values,
        }
    }

    /// SQL 中 `?` 占位符的数量
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// 诊断用格式：`SELECT ? AS a FROM DUAL [joe]`
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.sql)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

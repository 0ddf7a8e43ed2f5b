use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocQueryError {
    /// 批量插入没有任何行
    #[error("Invalid parameter for rows, must be an array of objects")]
    EmptyBatch,
    /// 批量插入的行之间字段集合不一致
    #[error("Inconsistent object keys among row objects")]
    ShapeMismatch,
    /// 单行插入的行为空
    #[error("Invalid or empty row object")]
    EmptyRow,
    /// UPDATE 没有任何 SET 字段
    #[error("Invalid or empty sets object for update")]
    EmptySet,
    /// 需要匹配条件的操作收到了空条件，参数为操作名称
    #[error("Empty matching object for {0}")]
    EmptyMatch(&'static str),
    /// 批量 DELETE 收到了空条件
    #[error("Invalid or empty match object for delete")]
    EmptyDeleteMatch,
    #[error("Invalid sort direction: {0}")]
    InvalidSortDirection(String),
    /// 期望 JSON 对象但收到了其他类型
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// 无法绑定到占位符的值（数组、嵌套对象等）
    #[error("Unsupported bind value: {0}")]
    UnsupportedValue(String),
    #[error("Not connected to database")]
    NotConnected,
    #[error("Configuration error: {0}")]
    Config(String),
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, DocQueryError>;

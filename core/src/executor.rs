use crate::error::Result;
use crate::statement::Statement;
use serde::Serialize;

/// 查询结果中的一行，保持列的原始顺序
pub type Record = serde_json::Map<String, serde_json::Value>;

/// 写操作（INSERT / UPDATE / DELETE）的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteResult {
    pub affected_rows: u64,
    /// 自增主键，没有时为 0
    pub last_insert_id: u64,
}

/// 语句执行器 trait
///
/// 接收构建好的 [`Statement`]，负责真正与数据库交互。
/// 构建层不关心连接、超时和取消，这些都由实现方处理。
///
/// 注意：此 trait 要求 `Send + Sync`，因为异步方法需要在不同线程之间传递 Future
#[async_trait::async_trait]
pub trait StatementExecutor: Send + Sync {
    /// 执行查询并返回所有行
    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<Record>>;

    /// 执行写操作并返回影响行数
    async fn execute(&self, statement: &Statement) -> Result<WriteResult>;
}

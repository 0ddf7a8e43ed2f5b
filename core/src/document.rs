//! 有序文档：列名到绑定值的映射
//!
//! 整个构建流程只使用这一种有序映射，保证 WHERE 子句中字段的顺序
//! 与之后提取出的绑定值顺序完全一致。

use crate::bind_value::BindValue;
use crate::error::{DocQueryError, Result};
use indexmap::IndexMap;

/// 按插入顺序迭代的列名 → 值映射
pub type Document = IndexMap<String, BindValue>;

/// WHERE 等值匹配条件
pub type Criteria = Document;

/// INSERT 的一行数据
pub type Row = Document;

/// UPDATE 的 SET 字段
pub type UpdateSet = Document;

/// 宏：按书写顺序构建 [`Document`]
///
/// ```ignore
/// let criteria = docquery::document! { "country" => "FR", "type" => 1 };
/// ```
#[macro_export]
macro_rules! document {
    () => {
        $crate::Document::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut document = $crate::Document::new();
        $(
            document.insert(
                ::std::string::String::from($key),
                $crate::BindValue::from($value),
            );
        )+
        document
    }};
}

/// 将 JSON 对象转换为 [`Document`]，保留键的原始顺序
pub fn document_from_json(value: serde_json::Value) -> Result<Document> {
    match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| Ok((key, BindValue::try_from(value)?)))
            .collect(),
        serde_json::Value::Null => Ok(Document::new()),
        other => Err(DocQueryError::InvalidDocument(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// 将 JSON 数组转换为待插入的行列表
pub fn rows_from_json(value: serde_json::Value) -> Result<Vec<Row>> {
    match value {
        serde_json::Value::Array(items) => items.into_iter().map(document_from_json).collect(),
        _ => Err(DocQueryError::EmptyBatch),
    }
}

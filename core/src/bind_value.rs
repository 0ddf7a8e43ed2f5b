use crate::error::{DocQueryError, Result};
use serde::Serialize;
use std::fmt;

/// 绑定值，用于安全地传递参数
///
/// 每个值对应生成 SQL 中的一个 `?` 占位符，由执行器按顺序绑定。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    String(String),
    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Null,
}

impl BindValue {
    pub fn is_null(&self) -> bool {
        matches!(self, BindValue::Null)
    }
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindValue::String(s) => f.write_str(s),
            BindValue::Int64(i) => write!(f, "{}", i),
            BindValue::UInt64(i) => write!(f, "{}", i),
            BindValue::Float64(v) => write!(f, "{}", v),
            BindValue::Bool(b) => write!(f, "{}", b),
            BindValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            BindValue::Null => f.write_str("NULL"),
        }
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::String(s)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::String(s.to_string())
    }
}

impl From<&String> for BindValue {
    fn from(s: &String) -> Self {
        BindValue::String(s.clone())
    }
}

/// 有符号整数统一转换为 Int64
macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BindValue {
                fn from(i: $ty) -> Self {
                    BindValue::Int64(i as i64)
                }
            }
        )*
    };
}

/// 无符号整数统一转换为 UInt64
macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BindValue {
                fn from(i: $ty) -> Self {
                    BindValue::UInt64(i as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<f64> for BindValue {
    fn from(f: f64) -> Self {
        BindValue::Float64(f)
    }
}

impl From<f32> for BindValue {
    fn from(f: f32) -> Self {
        BindValue::Float64(f as f64)
    }
}

impl From<bool> for BindValue {
    fn from(b: bool) -> Self {
        BindValue::Bool(b)
    }
}

impl From<Vec<u8>> for BindValue {
    fn from(b: Vec<u8>) -> Self {
        BindValue::Bytes(b)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => BindValue::Null,
        }
    }
}

impl TryFrom<serde_json::Value> for BindValue {
    type Error = DocQueryError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(BindValue::Null),
            Value::Bool(b) => Ok(BindValue::Bool(b)),
            Value::String(s) => Ok(BindValue::String(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(BindValue::Int64(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(BindValue::UInt64(u))
                } else if let Some(f) = n.as_f64() {
                    Ok(BindValue::Float64(f))
                } else {
                    Err(DocQueryError::UnsupportedValue(n.to_string()))
                }
            }
            other @ (Value::Array(_) | Value::Object(_)) => {
                Err(DocQueryError::UnsupportedValue(other.to_string()))
            }
        }
    }
}

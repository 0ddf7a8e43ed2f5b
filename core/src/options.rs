//! 查询选项：投影、排序、分页

use crate::error::{DocQueryError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SortDirection {
    type Err = DocQueryError;

    /// 大小写不敏感
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(DocQueryError::InvalidSortDirection(s.to_string()))
        }
    }
}

/// 有序的 列名 → 排序方向 映射
///
/// 方向为 `None` 的列不参与排序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct SortSpec {
    fields: IndexMap<String, Option<SortDirection>>,
}

impl SortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asc(self, field: &str) -> Self {
        self.push(field, Some(SortDirection::Asc))
    }

    pub fn desc(self, field: &str) -> Self {
        self.push(field, Some(SortDirection::Desc))
    }

    /// 追加一列（链式调用），`None` 表示该列被排除
    pub fn push(mut self, field: &str, direction: Option<SortDirection>) -> Self {
        self.fields.insert(field.to_string(), direction);
        self
    }

    /// 解析字符串方向并追加，空字符串视为排除
    pub fn parse(self, field: &str, direction: &str) -> Result<Self> {
        if direction.is_empty() {
            return Ok(self.push(field, None));
        }
        let direction = direction.parse::<SortDirection>()?;
        Ok(self.push(field, Some(direction)))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<SortDirection>)> + '_ {
        self.fields
            .iter()
            .map(|(field, direction)| (field.as_str(), *direction))
    }
}

impl TryFrom<IndexMap<String, serde_json::Value>> for SortSpec {
    type Error = DocQueryError;

    fn try_from(raw: IndexMap<String, serde_json::Value>) -> Result<Self> {
        use serde_json::Value;

        let mut spec = SortSpec::new();
        for (field, direction) in raw {
            spec = match direction {
                Value::String(s) => spec.parse(&field, &s)?,
                Value::Null | Value::Bool(false) => spec.push(&field, None),
                Value::Number(n) if n.as_f64() == Some(0.0) => spec.push(&field, None),
                other => return Err(DocQueryError::InvalidSortDirection(other.to_string())),
            };
        }
        Ok(spec)
    }
}

/// find 操作的选项，所有字段缺省时表示"不做限制"
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FindOptions {
    /// 要查询的列，空表示 `*`
    #[serde(alias = "projection", deserialize_with = "null_as_default")]
    pub projections: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sort: SortSpec,
    #[serde(deserialize_with = "lenient_count")]
    pub limit: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub offset: Option<u64>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projections(mut self, fields: &[&str]) -> Self {
        self.projections = fields.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

/// update / delete 操作的选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateOptions {
    #[serde(deserialize_with = "null_as_default")]
    pub sort: SortSpec,
    #[serde(deserialize_with = "lenient_count")]
    pub limit: Option<u64>,
}

impl UpdateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }
}

pub type DeleteOptions = UpdateOptions;

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 只接受非负整数（`5.0` 也算），其余（负数、小数、字符串、null）都视为未设置
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64().or_else(|| whole_number(&v))))
}

fn whole_number(value: &serde_json::Value) -> Option<u64> {
    let f = value.as_f64()?;
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then(|| f as u64)
}

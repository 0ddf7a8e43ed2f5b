//! MySQL 行解码：把 `MySqlRow` 转换为按列顺序排列的 JSON 对象

use crate::error::Result;
use crate::executor::Record;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// 解码一整行
pub fn record_from_row(row: &MySqlRow) -> Result<Record> {
    let mut record = Record::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.type_info().name())?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

/// 根据列类型名称选择解码方式
fn decode_column(row: &MySqlRow, index: usize, type_name: &str) -> Result<Value> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOLEAN" => Value::Bool(row.try_get::<bool, _>(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            Value::from(row.try_get::<i64, _>(index)?)
        }
        name if name.ends_with("UNSIGNED") => Value::from(row.try_get::<u64, _>(index)?),
        "YEAR" => Value::from(row.try_get_unchecked::<u16, _>(index)?),
        "FLOAT" => Value::from(row.try_get::<f32, _>(index)? as f64),
        "DOUBLE" => Value::from(row.try_get::<f64, _>(index)?),
        // 与 mysql 驱动的习惯一致，DECIMAL 以字符串返回避免精度丢失
        "DECIMAL" => Value::String(row.try_get::<BigDecimal, _>(index)?.to_string()),
        "DATETIME" | "TIMESTAMP" => {
            Value::String(row.try_get::<NaiveDateTime, _>(index)?.to_string())
        }
        "DATE" => Value::String(row.try_get::<NaiveDate, _>(index)?.to_string()),
        "TIME" => Value::String(row.try_get::<NaiveTime, _>(index)?.to_string()),
        "JSON" => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        }
        // 文本、ENUM、SET、BLOB 等统一按字节读取
        _ => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }
    };

    Ok(value)
}

//! Conversions between relq values and postgres wire types.

use std::error::Error;

use bytes::BytesMut;
use postgres::Row;
use postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use relq_core::error::{RelqError, Result};
use relq_core::Value;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// A bound value, converted to whatever type the server inferred for its
/// placeholder.
#[derive(Debug)]
pub(crate) struct PgValue<'a>(pub(crate) &'a Value);

impl ToSql for PgValue<'_> {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Integer(v) => {
                let v = *v;
                if *ty == Type::INT2 {
                    i16::try_from(v)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(v)?.to_sql(ty, out)
                } else if *ty == Type::FLOAT4 {
                    (v as f32).to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    (v as f64).to_sql(ty, out)
                } else if *ty == Type::NUMERIC {
                    Decimal::from(v).to_sql(ty, out)
                } else if *ty == Type::BOOL {
                    (v != 0).to_sql(ty, out)
                } else if *ty == Type::INT8 {
                    v.to_sql(ty, out)
                } else {
                    Err(format!("integer value cannot bind to {ty}").into())
                }
            }
            Value::Real(v) => {
                let v = *v;
                if *ty == Type::FLOAT4 {
                    (v as f32).to_sql(ty, out)
                } else if *ty == Type::NUMERIC {
                    Decimal::from_f64(v)
                        .ok_or("real value does not fit NUMERIC")?
                        .to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    v.to_sql(ty, out)
                } else {
                    Err(format!("real value cannot bind to {ty}").into())
                }
            }
            Value::Text(s) => {
                if !<&str as ToSql>::accepts(ty) {
                    return Err(format!("text value cannot bind to {ty}").into());
                }
                s.as_str().to_sql(ty, out)
            }
            Value::Boolean(b) => {
                if *ty == Type::BOOL {
                    b.to_sql(ty, out)
                } else if [Type::INT2, Type::INT4, Type::INT8].contains(ty) {
                    PgValue(&Value::Integer(i64::from(*b))).to_sql(ty, out)
                } else {
                    Err(format!("boolean value cannot bind to {ty}").into())
                }
            }
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn decimal_value(decimal: Decimal) -> Result<Value> {
    if decimal.fract().is_zero() {
        if let Some(v) = decimal.to_i64() {
            return Ok(Value::Integer(v));
        }
    }
    decimal
        .to_f64()
        .map(Value::Real)
        .ok_or_else(|| RelqError::Mapping(format!("numeric {decimal} out of range")))
}

fn get<'a, T>(row: &'a Row, index: usize) -> Result<Option<T>>
where
    T: postgres::types::FromSql<'a>,
{
    row.try_get::<_, Option<T>>(index)
        .map_err(|e| RelqError::Mapping(e.to_string()))
}

/// Reads column `index` of `row` into a [`Value`].
pub(crate) fn column_value(row: &Row, index: usize) -> Result<Value> {
    let ty = row.columns()[index].type_();
    let value = if *ty == Type::BOOL {
        get::<bool>(row, index)?.map(Value::Boolean)
    } else if *ty == Type::INT2 {
        get::<i16>(row, index)?.map(|v| Value::Integer(v.into()))
    } else if *ty == Type::INT4 {
        get::<i32>(row, index)?.map(|v| Value::Integer(v.into()))
    } else if *ty == Type::INT8 {
        get::<i64>(row, index)?.map(Value::Integer)
    } else if *ty == Type::FLOAT4 {
        get::<f32>(row, index)?.map(|v| Value::Real(v.into()))
    } else if *ty == Type::FLOAT8 {
        get::<f64>(row, index)?.map(Value::Real)
    } else if *ty == Type::NUMERIC {
        get::<Decimal>(row, index)?.map(decimal_value).transpose()?
    } else if [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME].contains(ty) {
        get::<String>(row, index)?.map(Value::Text)
    } else {
        return Err(RelqError::Mapping(format!(
            "unsupported column type {ty} at index {index}"
        )));
    };
    Ok(value.unwrap_or(Value::Null))
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use super::{DocumentType, YearMonth};
use crate::error::{DteError, Result};

pub const NIT_PATH: &str = "/nit";
pub const TYPE_PATH: &str = "/dteJson/identificacion/tipoDte";
pub const DATE_PATH: &str = "/dteJson/identificacion/fecEmi";
pub const ISSUER_PATH: &str = "/dteJson/emisor/nombre";
pub const RECEIVER_PATH: &str = "/dteJson/receptor/nombre";
pub const TOTAL_PATH: &str = "/dteJson/resumen/totalPagar";

/// A parsed DTE document.
///
/// The extracted fields drive filtering and display; `source` keeps the
/// complete original JSON so exports preserve every field.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub nit: String,
    pub document_type: DocumentType,
    pub emission_date: NaiveDate,
    pub issuer_name: String,
    pub receiver_name: String,
    pub total_payable: Decimal,
    pub source: Value,
}

impl Receipt {
    /// Parse raw file content. `name` is only used for error messages.
    pub fn parse(name: &str, content: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(content).map_err(|e| DteError::Parse {
            name: name.to_string(),
            source: e,
        })?;
        Self::from_value(name, value)
    }

    pub fn from_value(name: &str, value: Value) -> Result<Self> {
        let nit = string_at(name, &value, NIT_PATH)?;
        let document_type = string_at(name, &value, TYPE_PATH)?
            .parse::<DocumentType>()
            .map_err(|e| invalid(name, TYPE_PATH, e.to_string()))?;
        let emission_date = NaiveDate::parse_from_str(&string_at(name, &value, DATE_PATH)?, "%Y-%m-%d")
            .map_err(|e| invalid(name, DATE_PATH, e.to_string()))?;
        let issuer_name = string_at(name, &value, ISSUER_PATH)?;
        let receiver_name = string_at(name, &value, RECEIVER_PATH)?;
        let total_payable = decimal_at(name, &value, TOTAL_PATH)?;

        Ok(Self {
            nit,
            document_type,
            emission_date,
            issuer_name,
            receiver_name,
            total_payable,
            source: value,
        })
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.emission_date)
    }

    /// Case-insensitive substring match over NIT, issuer, receiver and ISO date.
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [
            self.nit.as_str(),
            self.issuer_name.as_str(),
            self.receiver_name.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
            || self.emission_date.to_string().contains(needle)
    }

    /// Pretty-printed original document
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.source).unwrap_or_else(|_| self.source.to_string())
    }
}

fn field_name(path: &str) -> String {
    path.trim_start_matches('/').replace('/', ".")
}

fn invalid(name: &str, path: &str, reason: String) -> DteError {
    DteError::InvalidField {
        name: name.to_string(),
        field: field_name(path),
        reason,
    }
}

fn lookup<'a>(name: &str, value: &'a Value, path: &str) -> Result<&'a Value> {
    match value.pointer(path) {
        Some(Value::Null) | None => Err(DteError::MissingField {
            name: name.to_string(),
            field: field_name(path),
        }),
        Some(v) => Ok(v),
    }
}

fn string_at(name: &str, value: &Value, path: &str) -> Result<String> {
    match lookup(name, value, path)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(invalid(name, path, format!("expected a string, found {other}"))),
    }
}

fn decimal_at(name: &str, value: &Value, path: &str) -> Result<Decimal> {
    let text = match lookup(name, value, path)? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => return Err(invalid(name, path, format!("expected a number, found {other}"))),
    };
    let amount = Decimal::from_str(text.trim())
        .or_else(|_| Decimal::from_scientific(text.trim()))
        .map_err(|e| invalid(name, path, e.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(invalid(name, path, "amount must not be negative".to_string()));
    }
    Ok(amount)
}

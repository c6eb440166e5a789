//! Shape and value checks for an incoming transaction payload.
//!
//! Runs before the ledger is touched; an invalid payload never mutates a client.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::Amount;
use crate::model::TransactionKind;

/// Longest accepted description, in Unicode scalar values.
pub const MAX_DESCRIPTION_CHARS: usize = 10;

/// Transaction body as decoded from JSON, before any checks.
///
/// Fields are kept as raw JSON values so a wrongly typed field is reported by
/// the validator instead of failing deserialization.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub valor: Option<Value>,
    #[serde(default)]
    pub tipo: Option<Value>,
    #[serde(default)]
    pub descricao: Option<Value>,
}

/// A payload that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTransaction {
    pub amount: Amount,
    pub kind: TransactionKind,
    pub description: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("valor is missing")]
    MissingAmount,
    #[error("valor must be a positive integer, got {0}")]
    InvalidAmount(String),
    #[error("tipo is missing")]
    MissingKind,
    #[error("tipo must be \"c\" or \"d\", got {0}")]
    InvalidKind(String),
    #[error("descricao is missing")]
    MissingDescription,
    #[error("descricao must be a string of 1 to 10 characters, got {0}")]
    InvalidDescription(String),
}

/// Check a raw payload.
pub fn validate(raw: &RawTransaction) -> Result<ValidTransaction, ValidationError> {
    let amount = parse_amount(raw.valor.as_ref().ok_or(ValidationError::MissingAmount)?)?;
    let kind = parse_kind(raw.tipo.as_ref().ok_or(ValidationError::MissingKind)?)?;
    let description =
        parse_description(raw.descricao.as_ref().ok_or(ValidationError::MissingDescription)?)?;

    Ok(ValidTransaction {
        amount,
        kind,
        description,
    })
}

/// Integral, strictly positive and within `i64`. `1000.0` counts as integral.
fn parse_amount(value: &Value) -> Result<Amount, ValidationError> {
    let invalid = || ValidationError::InvalidAmount(value.to_string());
    let Value::Number(number) = value else {
        return Err(invalid());
    };

    let integral = match number.as_i64() {
        Some(n) => n,
        None => {
            // u64 beyond i64::MAX, or a float
            let f = number.as_f64().ok_or_else(invalid)?;
            if f.fract() != 0.0 || f < 1.0 || f >= i64::MAX as f64 {
                return Err(invalid());
            }
            f as i64
        }
    };

    if integral <= 0 {
        return Err(invalid());
    }
    Ok(Amount::new(integral))
}

fn parse_kind(value: &Value) -> Result<TransactionKind, ValidationError> {
    value
        .as_str()
        .and_then(TransactionKind::from_code)
        .ok_or_else(|| ValidationError::InvalidKind(value.to_string()))
}

fn parse_description(value: &Value) -> Result<String, ValidationError> {
    match value.as_str() {
        Some(s) if (1..=MAX_DESCRIPTION_CHARS).contains(&s.chars().count()) => Ok(s.to_owned()),
        _ => Err(ValidationError::InvalidDescription(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(body: Value) -> RawTransaction {
        serde_json::from_value(body).unwrap()
    }

    fn check(body: Value) -> Result<ValidTransaction, ValidationError> {
        validate(&raw(body))
    }

    #[test]
    fn accepts_credit() {
        let tx = check(json!({"valor": 1000, "tipo": "c", "descricao": "credito"})).unwrap();
        assert_eq!(
            tx,
            ValidTransaction {
                amount: Amount::new(1000),
                kind: TransactionKind::Credit,
                description: "credito".to_string(),
            }
        );
    }

    #[test]
    fn accepts_debit_with_integral_float() {
        let tx = check(json!({"valor": 250.0, "tipo": "d", "descricao": "x"})).unwrap();
        assert_eq!(tx.amount, Amount::new(250));
        assert_eq!(tx.kind, TransactionKind::Debit);
    }

    #[test]
    fn rejects_fractional_amount() {
        let result = check(json!({"valor": 60.75, "tipo": "c", "descricao": "x"}));
        assert!(matches!(result, Err(ValidationError::InvalidAmount(_))));
    }

    #[test]
    fn rejects_negative_and_zero_amount() {
        for valor in [json!(-1), json!(-100.0), json!(0)] {
            let result = check(json!({"valor": valor, "tipo": "c", "descricao": "x"}));
            assert!(
                matches!(result, Err(ValidationError::InvalidAmount(_))),
                "valor {valor}"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_amount() {
        for valor in [json!("100"), json!(true), json!([1]), json!({})] {
            let result = check(json!({"valor": valor, "tipo": "c", "descricao": "x"}));
            assert!(
                matches!(result, Err(ValidationError::InvalidAmount(_))),
                "valor {valor}"
            );
        }
    }

    #[test]
    fn rejects_amount_beyond_i64() {
        let result = check(json!({"valor": u64::MAX, "tipo": "c", "descricao": "x"}));
        assert!(matches!(result, Err(ValidationError::InvalidAmount(_))));
    }

    #[test]
    fn rejects_unknown_kind() {
        for tipo in [json!("e"), json!("C"), json!("cd"), json!(""), json!(1)] {
            let result = check(json!({"valor": 6000, "tipo": tipo, "descricao": "x"}));
            assert!(
                matches!(result, Err(ValidationError::InvalidKind(_))),
                "tipo {tipo}"
            );
        }
    }

    #[test]
    fn description_length_bounds() {
        let ok = check(json!({"valor": 1, "tipo": "c", "descricao": "0123456789"}));
        assert!(ok.is_ok());

        let empty = check(json!({"valor": 1, "tipo": "c", "descricao": ""}));
        assert!(matches!(empty, Err(ValidationError::InvalidDescription(_))));

        let long = check(json!({"valor": 1, "tipo": "c", "descricao": "01234567890"}));
        assert!(matches!(long, Err(ValidationError::InvalidDescription(_))));
    }

    #[test]
    fn description_counts_characters_not_bytes() {
        let ten = "ç".repeat(10);
        assert_eq!(ten.len(), 20);
        let tx = check(json!({"valor": 1, "tipo": "c", "descricao": ten})).unwrap();
        assert_eq!(tx.description.chars().count(), 10);

        let eleven = "ã".repeat(11);
        let tx = check(json!({"valor": 1, "tipo": "c", "descricao": eleven}));
        assert!(matches!(tx, Err(ValidationError::InvalidDescription(_))));
    }

    #[test]
    fn null_counts_as_missing() {
        assert_eq!(
            check(json!({"valor": null, "tipo": "c", "descricao": "x"})),
            Err(ValidationError::MissingAmount)
        );
    }

    #[test]
    fn missing_fields() {
        assert_eq!(
            check(json!({"tipo": "c", "descricao": "x"})),
            Err(ValidationError::MissingAmount)
        );
        assert_eq!(
            check(json!({"valor": 1, "descricao": "x"})),
            Err(ValidationError::MissingKind)
        );
        assert_eq!(
            check(json!({"valor": 1, "tipo": "c"})),
            Err(ValidationError::MissingDescription)
        );
    }
}

//! Request validation
//!
//! Turns untrusted, string-keyed query parameters into a [`SearchRequest`].
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. integer parsing of `limit`, `offset`, `order_by`
//! 2. range checks on `limit` and `offset`
//! 3. allow-list checks on `order_by`, then `order_field`
//!
//! No defaults are applied here. A parameter that is absent is reported the
//! same way as one that fails to parse.

use std::collections::HashMap;
use thiserror::Error;

use crate::types::{params, OrderBy, OrderField, SearchRequest};

/// Reasons a search request can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Parameter missing or not parseable
    #[error("invalid param [{param}]")]
    MalformedParam { param: &'static str },

    #[error("limit must be > 0, got {0}")]
    LimitNotPositive(i64),

    #[error("offset must be >= 0, got {0}")]
    NegativeOffset(i64),

    #[error("order_by {0} is not one of -1, 0, 1")]
    InvalidOrderBy(i64),

    #[error("order_field {0:?} is not one of \"\", Id, Age, Name")]
    InvalidOrderField(String),
}

impl ValidationError {
    pub const REASON_BAD_PARAM: &'static str = "ErrorBadParam";
    pub const REASON_BAD_LIMIT: &'static str = "ErrorBadLimit";
    pub const REASON_BAD_OFFSET: &'static str = "ErrorBadOffset";
    pub const REASON_BAD_ORDER_BY: &'static str = "ErrorBadOrderBy";
    pub const REASON_BAD_ORDER_FIELD: &'static str = "ErrorBadOrderField";

    /// Reason string sent to clients in the error payload
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MalformedParam { .. } => Self::REASON_BAD_PARAM,
            Self::LimitNotPositive(_) => Self::REASON_BAD_LIMIT,
            Self::NegativeOffset(_) => Self::REASON_BAD_OFFSET,
            Self::InvalidOrderBy(_) => Self::REASON_BAD_ORDER_BY,
            Self::InvalidOrderField(_) => Self::REASON_BAD_ORDER_FIELD,
        }
    }
}

fn int_param(raw: &HashMap<String, String>, name: &'static str) -> Result<i64, ValidationError> {
    raw.get(name)
        .and_then(|value| value.parse::<i64>().ok())
        .ok_or(ValidationError::MalformedParam { param: name })
}

/// Validate raw query parameters into a typed request
pub fn validate_params(raw: &HashMap<String, String>) -> Result<SearchRequest, ValidationError> {
    let limit = int_param(raw, params::LIMIT)?;
    let offset = int_param(raw, params::OFFSET)?;
    let order_by = int_param(raw, params::ORDER_BY)?;

    if limit <= 0 {
        return Err(ValidationError::LimitNotPositive(limit));
    }
    if offset < 0 {
        return Err(ValidationError::NegativeOffset(offset));
    }

    let order_by = OrderBy::from_code(order_by).ok_or(ValidationError::InvalidOrderBy(order_by))?;

    let raw_field = raw
        .get(params::ORDER_FIELD)
        .ok_or(ValidationError::MalformedParam {
            param: params::ORDER_FIELD,
        })?;
    let order_field = OrderField::parse(raw_field)
        .ok_or_else(|| ValidationError::InvalidOrderField(raw_field.clone()))?;

    let limit = usize::try_from(limit).map_err(|_| ValidationError::LimitNotPositive(limit))?;
    let offset = usize::try_from(offset).map_err(|_| ValidationError::NegativeOffset(offset))?;

    Ok(SearchRequest {
        query: raw.get(params::QUERY).cloned().unwrap_or_default(),
        limit,
        offset,
        order_field,
        order_by,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid() -> HashMap<String, String> {
        params_of(&[
            ("query", "Boyd"),
            ("limit", "10"),
            ("offset", "0"),
            ("order_field", "Age"),
            ("order_by", "-1"),
        ])
    }

    #[test]
    fn test_valid_request() {
        let request = validate_params(&valid()).unwrap();
        assert_eq!(request.query, "Boyd");
        assert_eq!(request.limit, 10);
        assert_eq!(request.offset, 0);
        assert_eq!(request.order_field, OrderField::Age);
        assert_eq!(request.order_by, OrderBy::Asc);
    }

    #[test]
    fn test_missing_query_is_empty() {
        let mut p = valid();
        p.remove("query");
        assert_eq!(validate_params(&p).unwrap().query, "");
    }

    #[test]
    fn test_missing_integer_params() {
        for name in ["limit", "offset", "order_by"] {
            let mut p = valid();
            p.remove(name);
            assert_eq!(
                validate_params(&p),
                Err(ValidationError::MalformedParam { param: name }),
                "missing {name}"
            );
        }
    }

    #[test]
    fn test_unparsable_integer_params() {
        for name in ["limit", "offset", "order_by"] {
            let mut p = valid();
            p.insert(name.to_string(), "ten".to_string());
            let err = validate_params(&p).unwrap_err();
            assert_eq!(err, ValidationError::MalformedParam { param: name });
            assert_eq!(err.reason(), "ErrorBadParam");
        }
    }

    #[test]
    fn test_padded_integer_is_malformed() {
        for value in [" 5", "5 ", "\t5"] {
            let mut p = valid();
            p.insert("limit".to_string(), value.to_string());
            assert_eq!(
                validate_params(&p),
                Err(ValidationError::MalformedParam { param: "limit" }),
                "value {:?}",
                value
            );
        }
    }

    #[test]
    fn test_missing_order_field() {
        let mut p = valid();
        p.remove("order_field");
        assert_eq!(
            validate_params(&p),
            Err(ValidationError::MalformedParam {
                param: "order_field"
            })
        );
    }

    #[test]
    fn test_non_positive_limit_rejected() {
        for limit in [-100, -2, -1, 0] {
            let mut p = valid();
            p.insert("limit".to_string(), limit.to_string());
            let err = validate_params(&p).unwrap_err();
            assert_eq!(err, ValidationError::LimitNotPositive(limit));
            assert_eq!(err.reason(), "ErrorBadLimit");
        }
    }

    #[test]
    fn test_negative_offset_rejected() {
        for offset in [-50, -10, -1] {
            let mut p = valid();
            p.insert("offset".to_string(), offset.to_string());
            let err = validate_params(&p).unwrap_err();
            assert_eq!(err, ValidationError::NegativeOffset(offset));
            assert_eq!(err.reason(), "ErrorBadOffset");
        }
    }

    #[test]
    fn test_invalid_order_by_rejected() {
        for order_by in [-2, 2, 100] {
            let mut p = valid();
            p.insert("order_by".to_string(), order_by.to_string());
            let err = validate_params(&p).unwrap_err();
            assert_eq!(err, ValidationError::InvalidOrderBy(order_by));
            assert_eq!(err.reason(), "ErrorBadOrderBy");
        }
    }

    #[test]
    fn test_invalid_order_field_rejected() {
        for field in ["Something", "id", "AGE", " Name"] {
            let mut p = valid();
            p.insert("order_field".to_string(), field.to_string());
            let err = validate_params(&p).unwrap_err();
            assert_eq!(err, ValidationError::InvalidOrderField(field.to_string()));
            assert_eq!(err.reason(), "ErrorBadOrderField");
        }
    }

    #[test]
    fn test_parse_failure_precedes_range_check() {
        let mut p = valid();
        p.insert("limit".to_string(), "-5".to_string());
        p.insert("order_by".to_string(), "x".to_string());
        assert_eq!(
            validate_params(&p),
            Err(ValidationError::MalformedParam { param: "order_by" })
        );
    }

    #[test]
    fn test_range_check_precedes_enum_check() {
        let mut p = valid();
        p.insert("offset".to_string(), "-1".to_string());
        p.insert("order_by".to_string(), "7".to_string());
        p.insert("order_field".to_string(), "Something".to_string());
        assert_eq!(validate_params(&p), Err(ValidationError::NegativeOffset(-1)));
    }

    #[test]
    fn test_order_by_checked_before_order_field() {
        let mut p = valid();
        p.insert("order_by".to_string(), "7".to_string());
        p.insert("order_field".to_string(), "Something".to_string());
        assert_eq!(validate_params(&p), Err(ValidationError::InvalidOrderBy(7)));
    }

    #[test]
    fn test_empty_order_field_allowed() {
        let mut p = valid();
        p.insert("order_field".to_string(), String::new());
        assert_eq!(validate_params(&p).unwrap().order_field, OrderField::Unset);
    }
}

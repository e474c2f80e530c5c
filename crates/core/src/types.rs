//! Core types shared by the usersearch server and client
//!
//! The wire format is a JSON array of [`UserRecord`] on success and a
//! [`SearchErrorResponse`] object on failure. Field names are part of the
//! protocol and must not be renamed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the number of records returned in one page
pub const MAX_PAGE_SIZE: usize = 50;

/// Query parameter names used on the wire
pub mod params {
    pub const QUERY: &str = "query";
    pub const LIMIT: &str = "limit";
    pub const OFFSET: &str = "offset";
    pub const ORDER_FIELD: &str = "order_field";
    pub const ORDER_BY: &str = "order_by";
}

/// A single user as served by the search API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub about: String,
    pub gender: String,
}

impl UserRecord {
    /// Check whether the name or the about text contains `query`
    ///
    /// Matching is case-sensitive; an empty query matches every record.
    pub fn matches(&self, query: &str) -> bool {
        self.name.contains(query) || self.about.contains(query)
    }
}

/// Record attribute used as the sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
    /// No field requested; sorts by name
    #[default]
    Unset,
    Id,
    Age,
    Name,
}

impl OrderField {
    /// Parse the wire value against the allow-list `"", "Id", "Age", "Name"`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" => Some(Self::Unset),
            "Id" => Some(Self::Id),
            "Age" => Some(Self::Age),
            "Name" => Some(Self::Name),
            _ => None,
        }
    }

    /// Wire representation of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Id => "Id",
            Self::Age => "Age",
            Self::Name => "Name",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    Asc,
    /// Keep filter order
    #[default]
    AsIs,
    Desc,
}

impl OrderBy {
    /// Parse the wire code against the allow-list `-1, 0, 1`
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Asc),
            0 => Some(Self::AsIs),
            1 => Some(Self::Desc),
            _ => None,
        }
    }

    /// Wire code of the direction
    pub fn code(&self) -> i64 {
        match self {
            Self::Asc => -1,
            Self::AsIs => 0,
            Self::Desc => 1,
        }
    }
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Always greater than zero
    pub limit: usize,
    pub offset: usize,
    pub order_field: OrderField,
    pub order_by: OrderBy,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub users: Vec<UserRecord>,
    /// More records exist beyond this page
    pub has_next_page: bool,
    /// Number of records that matched before pagination, when known
    pub total: Option<usize>,
}

/// Error payload sent with every non-200 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchErrorResponse {
    pub error: String,
}

impl SearchErrorResponse {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        Self {
            error: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, about: &str) -> UserRecord {
        UserRecord {
            id: 1,
            name: name.to_string(),
            age: 30,
            about: about.to_string(),
            gender: "female".to_string(),
        }
    }

    #[test]
    fn test_matches_name_or_about() {
        let u = user("Hilda Mayer", "Sit commodo consectetur");
        assert!(u.matches("Hilda"));
        assert!(u.matches("commodo c"));
        assert!(u.matches(""));
        assert!(!u.matches("hilda"));
        assert!(!u.matches("Boyd"));
    }

    #[test]
    fn test_order_field_allow_list() {
        assert_eq!(OrderField::parse(""), Some(OrderField::Unset));
        assert_eq!(OrderField::parse("Id"), Some(OrderField::Id));
        assert_eq!(OrderField::parse("Age"), Some(OrderField::Age));
        assert_eq!(OrderField::parse("Name"), Some(OrderField::Name));
        assert_eq!(OrderField::parse("name"), None);
        assert_eq!(OrderField::parse("Something"), None);
    }

    #[test]
    fn test_order_by_codes() {
        for code in [-1, 0, 1] {
            let order = OrderBy::from_code(code).unwrap();
            assert_eq!(order.code(), code);
        }
        assert_eq!(OrderBy::from_code(2), None);
        assert_eq!(OrderBy::from_code(-2), None);
    }

    #[test]
    fn test_user_record_wire_names() {
        let json = serde_json::to_value(user("Boyd Wolf", "x")).unwrap();
        let object = json.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["about", "age", "gender", "id", "name"]);
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_string(&SearchErrorResponse::new("unauthorized")).unwrap();
        assert_eq!(body, r#"{"error":"unauthorized"}"#);
    }
}

//! Identifier validation
//!
//! Table, column, filter and sort names are spliced into SQL text, so every
//! one of them passes through here before it is rendered.

use thiserror::Error;

/// Why a name was refused as an unquoted identifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("identifier '{0}' may only contain ASCII letters, digits and underscores")]
    InvalidCharacters(String),

    #[error("identifier '{name}' is {length} bytes long (max {max_length})")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },

    #[error("identifier is empty")]
    Empty,

    #[error("identifier '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),

    #[error("identifier '{0}' is a reserved SQL keyword")]
    ReservedKeyword(String),
}

/// Postgres truncates identifiers beyond NAMEDATALEN - 1 bytes
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Keywords that can never be used unquoted as a table or column name.
/// Type names and soft keywords (`date`, `text`, `name`, ...) are allowed.
const RESERVED_KEYWORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CAST", "CHECK",
    "COLUMN", "CONSTRAINT", "CREATE", "CROSS", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP",
    "ELSE", "END", "EXCEPT", "EXISTS", "FALSE", "FETCH", "FOR", "FOREIGN", "FROM", "FULL",
    "GRANT", "GROUP", "HAVING", "IN", "INNER", "INSERT", "INTERSECT", "INTO", "IS", "JOIN",
    "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER", "OUTER",
    "PRIMARY", "REFERENCES", "RETURNING", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TO",
    "TRUE", "TRUNCATE", "UNION", "UNIQUE", "UPDATE", "USING", "VALUES", "WHEN", "WHERE",
    "WITH",
];

fn check_identifier(name: &str) -> Result<String, ValidationError> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(ValidationError::Empty),
        Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
            return Err(ValidationError::InvalidStartCharacter(name.to_string()))
        }
        Some(_) => {}
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }

    let upper = name.to_ascii_uppercase();
    if RESERVED_KEYWORDS.binary_search(&upper.as_str()).is_ok() {
        return Err(ValidationError::ReservedKeyword(name.to_string()));
    }

    Ok(name.to_string())
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: &str) -> Result<Self, ValidationError> {
                check_identifier(name).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// Table name checked once when an accessor is built
    ValidatedTableName
);

identifier!(
    /// Column name from a record, filter or sort entry
    ValidatedFieldName
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_list_is_sorted() {
        assert!(RESERVED_KEYWORDS.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_accepts_plain_identifiers() {
        let longest = "t".repeat(MAX_IDENTIFIER_LENGTH);
        for name in ["orders", "order_lines", "OrderLines", "_staging", "v2", "x", &longest] {
            let table = ValidatedTableName::new(name).unwrap();
            assert_eq!(table.to_string(), name);
        }
    }

    #[test]
    fn test_rejections_name_the_reason() {
        let cases = [
            ("", ValidationError::Empty),
            ("9lives", ValidationError::InvalidStartCharacter("9lives".into())),
            ("order-lines", ValidationError::InvalidCharacters("order-lines".into())),
            ("order lines", ValidationError::InvalidCharacters("order lines".into())),
            ("größe", ValidationError::InvalidCharacters("größe".into())),
            ("WHERE", ValidationError::ReservedKeyword("WHERE".into())),
            ("returning", ValidationError::ReservedKeyword("returning".into())),
        ];

        for (name, expected) in cases {
            assert_eq!(ValidatedFieldName::new(name), Err(expected), "name: {:?}", name);
        }
    }

    #[test]
    fn test_length_limit() {
        let name = "c".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert_eq!(
            ValidatedTableName::new(&name),
            Err(ValidationError::TooLong {
                name: name.clone(),
                length: 64,
                max_length: 63,
            })
        );
    }

    #[test]
    fn test_common_column_names_allowed() {
        for name in ["id", "name", "status", "created", "modified", "date", "text", "key"] {
            assert!(ValidatedFieldName::new(name).is_ok(), "{} should be allowed", name);
        }
    }

    #[test]
    fn test_sql_injection_prevention() {
        let malicious_names = [
            "users; DROP TABLE users; --",
            "users' OR '1'='1",
            "users/**/UNION/**/SELECT",
            "users\"; DELETE FROM users; --",
            "status = 'active'",
            "name DESC",
        ];

        for name in malicious_names {
            assert!(
                ValidatedFieldName::new(name).is_err(),
                "Should reject malicious name: {}",
                name
            );
        }
    }
}

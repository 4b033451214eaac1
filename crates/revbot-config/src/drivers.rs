use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Invalid driver kind: {kind}")]
    InvalidDriverKind { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseDriver {
    Memory,
    Postgres,
}

impl FromStr for DatabaseDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "memory" => Ok(Self::Memory),
            "pg" => Ok(Self::Postgres),
            _ => Err(DriverError::InvalidDriverKind { kind: s.into() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_database_driver() {
        assert_eq!(
            DatabaseDriver::from_str("memory").unwrap(),
            DatabaseDriver::Memory
        );
        assert_eq!(DatabaseDriver::from_str("PG").unwrap(), DatabaseDriver::Postgres);
        assert!(matches!(
            DatabaseDriver::from_str("mysql"),
            Err(DriverError::InvalidDriverKind { kind }) if kind == "mysql"
        ));
    }
}

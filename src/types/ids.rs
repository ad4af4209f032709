use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse object id of an invoice, as reported by the document listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    /// Wraps a raw object id. The id is opaque: it is kept exactly as the
    /// listing reported it, and only an empty id is rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::EmptyField("objectId"));
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for InvoiceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        InvoiceId::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parsing() {
        let id = InvoiceId::parse("aB3xYz9Q01").unwrap();
        assert_eq!(id.as_str(), "aB3xYz9Q01");
    }

    #[test]
    fn test_id_is_kept_verbatim() {
        assert_eq!(InvoiceId::parse(" abc ").unwrap().as_str(), " abc ");
        assert_eq!(InvoiceId::parse("a_b-1").unwrap().as_str(), "a_b-1");
    }

    #[test]
    fn test_empty_id_is_rejected() {
        assert!(matches!(
            InvoiceId::parse(""),
            Err(ValidationError::EmptyField("objectId"))
        ));
    }

    #[test]
    fn test_unusual_id_round_trips() {
        let parsed: InvoiceId = serde_json::from_str("\"a_b-1\"").unwrap();
        assert_eq!(parsed.as_str(), "a_b-1");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"a_b-1\"");
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let parsed: Result<InvoiceId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
        let parsed: InvoiceId = serde_json::from_str("\"Xk12\"").unwrap();
        assert_eq!(parsed.to_string(), "Xk12");
    }
}

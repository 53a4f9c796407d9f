mod v1;
mod v3;

pub use v1::CollectionV1;
pub use v3::CollectionV3;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Collection, NewCollection};

/// A versioned wire projection of [`Collection`]: a decode step from the
/// wire payload to a creation input, and an encode step from the model back
/// to the wire. Several versions can be mounted side by side; the service
/// underneath stays the same.
pub trait CollectionView: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn into_model(self) -> Result<NewCollection, ViewError>;
    fn from_model(model: &Collection) -> Self;
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ViewError(pub &'static str);

/// Identifiers travel as 32-character lowercase hex with no separators.
pub fn encode_id(id: Uuid) -> String {
    id.simple().to_string()
}

/// Hyphenated input is accepted too, for callers that predate the compact
/// encoding.
pub fn parse_id(raw: &str) -> Result<Uuid, ViewError> {
    Uuid::parse_str(raw).map_err(|_| ViewError("Invalid identifier"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_id_is_compact_hex() {
        let id = Uuid::new_v4();
        let encoded = encode_id(id);
        assert_eq!(encoded.len(), 32);
        assert!(encoded.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn parse_id_accepts_both_encodings() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.simple().to_string()).unwrap(), id);
        assert_eq!(parse_id(&id.hyphenated().to_string()).unwrap(), id);
        assert!(parse_id("not-a-uuid").is_err());
    }
}

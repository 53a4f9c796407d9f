use serde::{Deserialize, Serialize};

use super::{CollectionView, ViewError, encode_id, parse_id};
use crate::models::{Collection, NewCollection};

/// Version 3 collection payload, which also exposes the owning principal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CollectionV3 {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
}

impl CollectionView for CollectionV3 {
    fn into_model(self) -> Result<NewCollection, ViewError> {
        // UserId is ignored on input; the service records the caller as the
        // owning principal.
        Ok(NewCollection {
            id: self.id.as_deref().map(parse_id).transpose()?,
            name: self.name.unwrap_or_default(),
        })
    }

    fn from_model(model: &Collection) -> Self {
        Self {
            id: Some(encode_id(model.id)),
            user_id: Some(encode_id(model.principal_id)),
            name: Some(model.name.clone()),
        }
    }
}

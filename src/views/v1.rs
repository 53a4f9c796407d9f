use serde::{Deserialize, Serialize};

use super::{CollectionView, ViewError, encode_id, parse_id};
use crate::models::{Collection, NewCollection};

/// Version 1 collection payload: identifier and name only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CollectionV1 {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl CollectionView for CollectionV1 {
    fn into_model(self) -> Result<NewCollection, ViewError> {
        Ok(NewCollection {
            id: self.id.as_deref().map(parse_id).transpose()?,
            name: self.name.unwrap_or_default(),
        })
    }

    fn from_model(model: &Collection) -> Self {
        Self {
            id: Some(encode_id(model.id)),
            name: Some(model.name.clone()),
        }
    }
}

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::description::UrlRole;
use crate::domain::template::SearchValues;
use crate::error::{DescriptionError, DescriptionResult};

/// A saved search: which endpoint to pick and the values to resolve it with
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SearchProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, ProfileValue>,
}

/// One value or a list of values for a repeatable parameter
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ProfileValue {
    List(Vec<ProfileScalar>),
    Single(ProfileScalar),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ProfileScalar {
    Text(String),
    Number(serde_yaml::Number),
    Flag(bool),
}

impl std::fmt::Display for ProfileScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileScalar::Text(s) => f.write_str(s),
            ProfileScalar::Number(n) => write!(f, "{}", n),
            ProfileScalar::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl ProfileValue {
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            ProfileValue::List(items) => items.iter().map(ToString::to_string).collect(),
            ProfileValue::Single(item) => vec![item.to_string()],
        }
    }
}

impl SearchProfile {
    pub fn from_yaml(yml: &str) -> DescriptionResult<Self> {
        Ok(serde_yaml::from_str(yml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> DescriptionResult<Self> {
        let yml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yml)
    }

    pub fn role(&self) -> DescriptionResult<UrlRole> {
        match &self.role {
            Some(role) => UrlRole::parse(role)
                .map_err(|err| DescriptionError::InvalidProfile(err.to_string())),
            None => Ok(UrlRole::Results),
        }
    }

    pub fn use_defaults(&self) -> bool {
        self.defaults.unwrap_or(false)
    }

    /// The profile's values keyed by placeholder kind; unknown names are an error
    pub fn search_values(&self) -> DescriptionResult<SearchValues> {
        let pairs = self
            .values
            .iter()
            .flat_map(|(name, value)| value.to_strings().into_iter().map(move |v| (name, v)));
        SearchValues::from_pairs(pairs)
            .map_err(|err| DescriptionError::InvalidProfile(err.to_string()))
    }
}

// Small closed enumerations of the description document

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a Url element in relation to the description document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlRole {
    Results,
    Suggestions,
    #[serde(rename = "self")]
    SelfDescription,
    Collection,
}

impl UrlRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UrlRole::Results => "results",
            UrlRole::Suggestions => "suggestions",
            UrlRole::SelfDescription => "self",
            UrlRole::Collection => "collection",
        }
    }

    /// Case-insensitive parse of a single `rel` value
    pub fn parse(value: &str) -> Result<Self, UnknownValue> {
        match value.trim().to_ascii_lowercase().as_str() {
            "results" => Ok(UrlRole::Results),
            "suggestions" => Ok(UrlRole::Suggestions),
            "self" => Ok(UrlRole::SelfDescription),
            "collection" => Ok(UrlRole::Collection),
            _ => Err(UnknownValue::new("rel", value)),
        }
    }
}

impl fmt::Display for UrlRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrlRole {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Degree to which search results may be queried, displayed and redistributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyndicationRight {
    #[default]
    Open,
    Limited,
    Private,
    Closed,
}

impl SyndicationRight {
    pub fn as_str(self) -> &'static str {
        match self {
            SyndicationRight::Open => "open",
            SyndicationRight::Limited => "limited",
            SyndicationRight::Private => "private",
            SyndicationRight::Closed => "closed",
        }
    }

    /// Case-sensitive parse: only the lowercase spellings are accepted
    pub fn parse(value: &str) -> Result<Self, UnknownValue> {
        match value {
            "open" => Ok(SyndicationRight::Open),
            "limited" => Ok(SyndicationRight::Limited),
            "private" => Ok(SyndicationRight::Private),
            "closed" => Ok(SyndicationRight::Closed),
            _ => Err(UnknownValue::new("SyndicationRight", value)),
        }
    }

    /// Clients may display results to end users
    pub fn allows_display(self) -> bool {
        matches!(self, SyndicationRight::Open | SyndicationRight::Limited)
    }

    /// Clients may request results at all
    pub fn allows_requests(self) -> bool {
        self != SyndicationRight::Closed
    }
}

impl fmt::Display for SyndicationRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyndicationRight {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// HTTP method of the parameter extension (`parameters:method`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    pub fn parse(value: &str) -> Result<Self, UnknownValue> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            _ => Err(UnknownValue::new("parameters:method", value)),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value outside one of the closed enumerations. Callers decide the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    pub field: &'static str,
    pub value: String,
}

impl UnknownValue {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {} value: {:?}", self.field, self.value)
    }
}

impl std::error::Error for UnknownValue {}

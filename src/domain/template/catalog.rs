// Catalog of OpenSearch template placeholders

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DescriptionError;

/// The closed set of placeholder kinds a URL template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateParameter {
    SearchTerms,
    Count,
    StartIndex,
    StartPage,
    Language,
    InputEncoding,
    OutputEncoding,
    TimeStart,
    TimeEnd,
    GeoName,
    GeoLat,
    GeoLon,
    GeoRadius,
    GeoBox,
    GeoGeometry,
}

/// Deprecated tokens still accepted on input, paired with the kind they stand for.
const ALIASES: &[(&str, TemplateParameter)] = &[
    ("{geo:locationString}", TemplateParameter::GeoName),
    ("{geo:polygon}", TemplateParameter::GeoGeometry),
];

impl TemplateParameter {
    pub const ALL: [TemplateParameter; 15] = [
        TemplateParameter::SearchTerms,
        TemplateParameter::Count,
        TemplateParameter::StartIndex,
        TemplateParameter::StartPage,
        TemplateParameter::Language,
        TemplateParameter::InputEncoding,
        TemplateParameter::OutputEncoding,
        TemplateParameter::TimeStart,
        TemplateParameter::TimeEnd,
        TemplateParameter::GeoName,
        TemplateParameter::GeoLat,
        TemplateParameter::GeoLon,
        TemplateParameter::GeoRadius,
        TemplateParameter::GeoBox,
        TemplateParameter::GeoGeometry,
    ];

    /// Placeholder name without braces, e.g. `searchTerms` or `geo:box`
    pub fn name(self) -> &'static str {
        match self {
            TemplateParameter::SearchTerms => "searchTerms",
            TemplateParameter::Count => "count",
            TemplateParameter::StartIndex => "startIndex",
            TemplateParameter::StartPage => "startPage",
            TemplateParameter::Language => "language",
            TemplateParameter::InputEncoding => "inputEncoding",
            TemplateParameter::OutputEncoding => "outputEncoding",
            TemplateParameter::TimeStart => "time:start",
            TemplateParameter::TimeEnd => "time:end",
            TemplateParameter::GeoName => "geo:name",
            TemplateParameter::GeoLat => "geo:lat",
            TemplateParameter::GeoLon => "geo:lon",
            TemplateParameter::GeoRadius => "geo:radius",
            TemplateParameter::GeoBox => "geo:box",
            TemplateParameter::GeoGeometry => "geo:geometry",
        }
    }

    /// Canonical token, e.g. `{searchTerms}`. Never returns a deprecated alias.
    pub fn token(self) -> &'static str {
        match self {
            TemplateParameter::SearchTerms => "{searchTerms}",
            TemplateParameter::Count => "{count}",
            TemplateParameter::StartIndex => "{startIndex}",
            TemplateParameter::StartPage => "{startPage}",
            TemplateParameter::Language => "{language}",
            TemplateParameter::InputEncoding => "{inputEncoding}",
            TemplateParameter::OutputEncoding => "{outputEncoding}",
            TemplateParameter::TimeStart => "{time:start}",
            TemplateParameter::TimeEnd => "{time:end}",
            TemplateParameter::GeoName => "{geo:name}",
            TemplateParameter::GeoLat => "{geo:lat}",
            TemplateParameter::GeoLon => "{geo:lon}",
            TemplateParameter::GeoRadius => "{geo:radius}",
            TemplateParameter::GeoBox => "{geo:box}",
            TemplateParameter::GeoGeometry => "{geo:geometry}",
        }
    }

    /// Token with the optional marker, e.g. `{count?}`
    pub fn optional_token(self) -> String {
        format!("{{{}?}}", self.name())
    }

    /// Look up the kind of a token, canonical or deprecated. Surrounding whitespace is ignored.
    pub fn from_token(token: &str) -> Result<Self, DescriptionError> {
        let token = token.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.token() == token)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == token)
                    .map(|(_, kind)| *kind)
            })
            .ok_or_else(|| DescriptionError::UnknownTemplateToken(token.to_string()))
    }

    /// Look up a kind by its bare name (`count`, `geo:box`), as used in profiles and on the CLI.
    pub fn from_name(name: &str) -> Result<Self, DescriptionError> {
        Self::from_token(&format!("{{{}}}", name.trim()))
    }

    /// All tokens recognized on input, canonical ones first
    pub fn accepted_tokens() -> impl Iterator<Item = &'static str> {
        Self::ALL
            .iter()
            .map(|kind| kind.token())
            .chain(ALIASES.iter().map(|(alias, _)| *alias))
    }
}

impl fmt::Display for TemplateParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for TemplateParameter {
    type Err = DescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

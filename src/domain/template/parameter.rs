// Template parameter slots

use serde::{Deserialize, Serialize};

use super::catalog::TemplateParameter;
use super::parser::TemplateParser;
use crate::error::{DescriptionError, DescriptionResult};

/// Maximum value meaning "may repeat an arbitrary number of times" (`maximum="*"`).
pub const UNBOUNDED: u32 = u32::MAX;

/// Most entries one parameter contributes to a resolved URL, whatever its `minimum`.
pub const REPEAT_LIMIT: u32 = 64;

/// What a parameter slot renders: a runtime-supplied value or a fixed literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterValue {
    Bound(TemplateParameter),
    Literal(String),
}

/// One slot of a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,
    pub minimum: u32,
    pub maximum: u32,
    /// Substituted inside the template text instead of appended as `name=value`
    pub inline: bool,
    /// Literal taken from the query string of a template whose text is already
    /// percent-encoded (`date%20desc`, `en+US`)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pre_encoded: bool,
}

/// Strip the optional marker from a token: `{count?}` -> (`{count}`, true)
pub fn strip_optional_marker(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    match trimmed.strip_suffix("?}") {
        Some(head) if trimmed.starts_with('{') => (format!("{}}}", head), true),
        _ => (trimmed.to_string(), false),
    }
}

impl Parameter {
    /// Create a parameter from a configured value.
    ///
    /// A recognized placeholder (optionally carrying the `?` marker) binds the parameter to
    /// its kind; the marker makes it optional. Anything else is kept verbatim as a literal.
    pub fn bind(name: &str, configured_value: &str) -> Self {
        let (token, optional) = strip_optional_marker(configured_value);
        match TemplateParameter::from_token(&token) {
            Ok(kind) => Self {
                name: name.trim().to_string(),
                value: ParameterValue::Bound(kind),
                minimum: if optional { 0 } else { 1 },
                maximum: 1,
                inline: false,
                pre_encoded: false,
            },
            Err(_) => Self::literal(name, configured_value),
        }
    }

    pub fn literal(name: &str, value: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            value: ParameterValue::Literal(value.to_string()),
            minimum: 1,
            maximum: 1,
            inline: false,
            pre_encoded: false,
        }
    }

    /// Inline slot for a placeholder found in the template text
    pub fn inline(kind: TemplateParameter, optional: bool) -> Self {
        Self {
            name: kind.name().to_string(),
            value: ParameterValue::Bound(kind),
            minimum: if optional { 0 } else { 1 },
            maximum: 1,
            inline: true,
            pre_encoded: false,
        }
    }

    /// Parse one `name=value` pair of a template's query string. A literal value is kept
    /// as written and rendered without further encoding.
    pub fn from_query_pair(pair: &str) -> DescriptionResult<Self> {
        match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                let mut param = Self::bind(name, value);
                param.pre_encoded = param
                    .literal_value()
                    .is_some_and(|v| urlencoding::encode(v) != v);
                Ok(param)
            }
            _ => Err(DescriptionError::invalid_attribute("template", pair)),
        }
    }

    /// Override the repeat bounds; `maximum` is raised to at least `minimum`.
    pub fn with_cardinality(mut self, minimum: u32, maximum: u32) -> Self {
        self.minimum = minimum;
        self.maximum = maximum.max(minimum);
        self
    }

    pub fn with_minimum(self, minimum: u32) -> Self {
        let maximum = self.maximum;
        self.with_cardinality(minimum, maximum)
    }

    pub fn with_maximum(self, maximum: u32) -> Self {
        let minimum = self.minimum;
        self.with_cardinality(minimum, maximum)
    }

    pub fn kind(&self) -> Option<TemplateParameter> {
        match self.value {
            ParameterValue::Bound(kind) => Some(kind),
            ParameterValue::Literal(_) => None,
        }
    }

    pub fn literal_value(&self) -> Option<&str> {
        match &self.value {
            ParameterValue::Literal(value) => Some(value),
            ParameterValue::Bound(_) => None,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.minimum == 0
    }

    pub fn is_unbounded(&self) -> bool {
        self.maximum == UNBOUNDED
    }

    /// The configured value as written in a document: the literal, or the token with
    /// its optional marker when the slot may be omitted.
    pub fn configured_value(&self) -> String {
        match &self.value {
            ParameterValue::Literal(value) => value.clone(),
            ParameterValue::Bound(kind) if self.is_optional() => kind.optional_token(),
            ParameterValue::Bound(kind) => kind.token().to_string(),
        }
    }

    /// `name=value` with the value percent-encoded as UTF-8
    pub fn encode_as_query_entry(&self, value: &str) -> String {
        format!("{}={}", self.name, urlencoding::encode(value))
    }

    /// The query entry of a literal slot; `None` for bound slots
    pub fn literal_entry(&self) -> Option<String> {
        let value = self.literal_value()?;
        if self.pre_encoded {
            Some(format!("{}={}", self.name, value))
        } else {
            Some(self.encode_as_query_entry(value))
        }
    }

    /// `name=value` as template text, when scanning that text gives this slot back
    pub fn template_pair(&self) -> Option<String> {
        let pair = format!("{}={}", self.name, self.configured_value());
        let scanned = scan_pair(&pair)?;
        let same = scanned.name == self.name
            && scanned.value == self.value
            && scanned.pre_encoded == self.pre_encoded;
        same.then_some(pair)
    }

    /// `name=` as template text, when the name alone survives scanning
    pub fn template_name_pair(&self) -> Option<String> {
        let pair = format!("{}=", self.name);
        scan_pair(&pair)
            .filter(|scanned| scanned.name == self.name)
            .map(|_| pair)
    }

    /// Cardinality a `Parameter` element with this name and value gets when it omits
    /// `minimum` and `maximum`
    pub fn implied_cardinality(&self) -> (u32, u32) {
        let implied = Self::bind(&self.name, &self.configured_value());
        (implied.minimum, implied.maximum)
    }
}

/// The one appended parameter a lone query pair scans to
fn scan_pair(pair: &str) -> Option<Parameter> {
    let scanned = TemplateParser::scan(&format!("?{}", pair)).ok()?;
    match scanned.parameters.as_slice() {
        [param] if scanned.template.is_empty() && !param.inline => Some(param.clone()),
        _ => None,
    }
}

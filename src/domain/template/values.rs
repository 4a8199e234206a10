// Runtime search values bound to template placeholders

use std::collections::BTreeMap;

use super::catalog::TemplateParameter;
use crate::domain::description::{Query, UrlEndpoint};
use crate::error::DescriptionResult;

pub const DEFAULT_LANGUAGE: &str = "*";
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Values supplied by a search client, keyed by placeholder kind.
///
/// A kind may carry several values; repeatable query parameters render one entry per value.
/// Resolution only reads this map, so one endpoint can be resolved against many value sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchValues {
    values: BTreeMap<TemplateParameter, Vec<String>>,
}

impl SearchValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `set`
    pub fn with(mut self, kind: TemplateParameter, value: impl Into<String>) -> Self {
        self.set(kind, value);
        self
    }

    /// Replace every value of `kind` with `value`
    pub fn set(&mut self, kind: TemplateParameter, value: impl Into<String>) -> &mut Self {
        self.values.insert(kind, vec![value.into()]);
        self
    }

    /// Append one more value for a repeatable parameter
    pub fn push(&mut self, kind: TemplateParameter, value: impl Into<String>) -> &mut Self {
        self.values.entry(kind).or_default().push(value.into());
        self
    }

    pub fn clear(&mut self, kind: TemplateParameter) -> &mut Self {
        self.values.remove(&kind);
        self
    }

    pub fn clear_all(&mut self) -> &mut Self {
        self.values.clear();
        self
    }

    /// Non-empty values for `kind`, in the order they were supplied
    pub fn present(&self, kind: TemplateParameter) -> Vec<&str> {
        self.values
            .get(&kind)
            .map(|values| {
                values
                    .iter()
                    .map(String::as_str)
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn first(&self, kind: TemplateParameter) -> Option<&str> {
        self.present(kind).into_iter().next()
    }

    pub fn is_set(&self, kind: TemplateParameter) -> bool {
        self.first(kind).is_some()
    }

    pub fn is_empty(&self) -> bool {
        TemplateParameter::ALL.iter().all(|kind| !self.is_set(*kind))
    }

    /// Take every kind `other` has a value for, replacing what is set here
    pub fn overlay(mut self, other: &SearchValues) -> Self {
        for (kind, values) in &other.values {
            if other.is_set(*kind) {
                self.values.insert(*kind, values.clone());
            }
        }
        self
    }

    /// Set `name=value` where `name` is a bare placeholder name (`count`, `geo:box`).
    /// Repeating a name appends.
    pub fn from_pairs<I, K, V>(pairs: I) -> DescriptionResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = Self::new();
        for (name, value) in pairs {
            let kind = TemplateParameter::from_name(name.as_ref())?;
            values.push(kind, value);
        }
        Ok(values)
    }

    /// Fill the values OpenSearch defines defaults for, leaving anything already set alone:
    /// startIndex and startPage from the endpoint offsets, language `*`, encodings `UTF-8`.
    pub fn with_endpoint_defaults(mut self, endpoint: &UrlEndpoint) -> Self {
        let defaults = [
            (TemplateParameter::StartIndex, endpoint.index_offset.to_string()),
            (TemplateParameter::StartPage, endpoint.page_offset.to_string()),
            (TemplateParameter::Language, DEFAULT_LANGUAGE.to_string()),
            (TemplateParameter::InputEncoding, DEFAULT_ENCODING.to_string()),
            (TemplateParameter::OutputEncoding, DEFAULT_ENCODING.to_string()),
        ];
        for (kind, value) in defaults {
            if !self.is_set(kind) {
                self.set(kind, value);
            }
        }
        self
    }

    /// Values that replay an example or request `Query` from a description document
    pub fn from_query(query: &Query) -> Self {
        let mut values = Self::new();
        if let Some(terms) = &query.search_terms {
            values.set(TemplateParameter::SearchTerms, terms.as_str());
        }
        if let Some(count) = query.count {
            values.set(TemplateParameter::Count, count.to_string());
        }
        if let Some(start_index) = query.start_index {
            values.set(TemplateParameter::StartIndex, start_index.to_string());
        }
        if let Some(start_page) = query.start_page {
            values.set(TemplateParameter::StartPage, start_page.to_string());
        }
        values.set(TemplateParameter::Language, query.language.as_str());
        values.set(TemplateParameter::InputEncoding, query.input_encoding.as_str());
        values.set(TemplateParameter::OutputEncoding, query.output_encoding.as_str());
        values
    }
}

// The OpenSearch description document aggregate

use serde::{Deserialize, Serialize};

use super::endpoint::{Image, Query, UrlEndpoint};
use super::roles::{SyndicationRight, UrlRole};
use crate::domain::template::{DEFAULT_ENCODING, DEFAULT_LANGUAGE};
use crate::error::{DescriptionError, DescriptionResult};

/// Plain-text length limits of OpenSearch 1.1, in characters
pub const SHORT_NAME_LIMIT: usize = 16;
pub const LONG_NAME_LIMIT: usize = 48;
pub const DESCRIPTION_LIMIT: usize = 1024;
pub const DEVELOPER_LIMIT: usize = 64;
pub const TAGS_LIMIT: usize = 256;
pub const ATTRIBUTION_LIMIT: usize = 256;
pub const QUERY_TITLE_LIMIT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionDocument {
    pub short_name: String,
    pub description: String,
    pub urls: Vec<UrlEndpoint>,
    /// Defaults to the short name
    pub long_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub syndication_right: SyndicationRight,
    #[serde(default)]
    pub adult_content: bool,
    pub languages: Vec<String>,
    pub input_encodings: Vec<String>,
    pub output_encodings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<Query>,
}

/// A text field longer than OpenSearch allows. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitViolation {
    pub field: &'static str,
    pub limit: usize,
    pub actual: usize,
}

impl DescriptionDocument {
    /// A document with the required fields and every default applied
    pub fn new(
        short_name: &str,
        description: &str,
        urls: Vec<UrlEndpoint>,
    ) -> DescriptionResult<Self> {
        if short_name.trim().is_empty() {
            return Err(DescriptionError::MissingRequiredElement("ShortName".to_string()));
        }
        if description.trim().is_empty() {
            return Err(DescriptionError::MissingRequiredElement("Description".to_string()));
        }
        if urls.is_empty() {
            return Err(DescriptionError::MissingRequiredElement("Url".to_string()));
        }

        Ok(Self {
            short_name: short_name.trim().to_string(),
            description: description.trim().to_string(),
            urls,
            long_name: short_name.trim().to_string(),
            developer: None,
            contact: None,
            attribution: None,
            tags: Vec::new(),
            syndication_right: SyndicationRight::default(),
            adult_content: false,
            languages: vec![DEFAULT_LANGUAGE.to_string()],
            input_encodings: vec![DEFAULT_ENCODING.to_string()],
            output_encodings: vec![DEFAULT_ENCODING.to_string()],
            images: Vec::new(),
            queries: Vec::new(),
        })
    }

    /// First endpoint with `role` and, when given, the MIME type
    pub fn find_endpoint(&self, role: UrlRole, mime_type: Option<&str>) -> Option<&UrlEndpoint> {
        self.urls.iter().find(|url| {
            url.has_role(role)
                && mime_type.map_or(true, |wanted| {
                    url.mime_type
                        .as_deref()
                        .is_some_and(|t| t.eq_ignore_ascii_case(wanted))
                })
        })
    }

    /// Queries with role `example`, which clients may use to check the engine works
    pub fn example_queries(&self) -> impl Iterator<Item = &Query> {
        self.queries.iter().filter(|q| q.is_example())
    }

    /// Space-delimited form of the tags, as written in the `Tags` element
    pub fn tags_text(&self) -> Option<String> {
        if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.join(" "))
        }
    }

    pub fn supports_language(&self, language: &str) -> bool {
        self.languages
            .iter()
            .any(|l| l == "*" || l.eq_ignore_ascii_case(language))
    }

    /// Text fields exceeding the OpenSearch length limits
    pub fn limit_violations(&self) -> Vec<LimitViolation> {
        let mut fields: Vec<(&'static str, usize, Option<String>)> = vec![
            ("ShortName", SHORT_NAME_LIMIT, Some(self.short_name.clone())),
            ("LongName", LONG_NAME_LIMIT, Some(self.long_name.clone())),
            ("Description", DESCRIPTION_LIMIT, Some(self.description.clone())),
            ("Developer", DEVELOPER_LIMIT, self.developer.clone()),
            ("Tags", TAGS_LIMIT, self.tags_text()),
            ("Attribution", ATTRIBUTION_LIMIT, self.attribution.clone()),
        ];
        for query in &self.queries {
            fields.push(("Query@title", QUERY_TITLE_LIMIT, query.title.clone()));
        }

        fields
            .into_iter()
            .filter_map(|(field, limit, value)| {
                let actual = value?.chars().count();
                (actual > limit).then_some(LimitViolation { field, limit, actual })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(template: &str, mime: &str) -> UrlEndpoint {
        UrlEndpoint::from_template(template)
            .unwrap()
            .with_mime_type(mime)
            .unwrap()
    }

    #[test]
    fn test_new_applies_defaults() {
        let doc = DescriptionDocument::new(
            "Web Search",
            "Search the web",
            vec![endpoint("http://example.com/?q={searchTerms}", "text/html")],
        )
        .unwrap();

        assert_eq!(doc.long_name, "Web Search");
        assert_eq!(doc.languages, vec!["*"]);
        assert_eq!(doc.input_encodings, vec!["UTF-8"]);
        assert_eq!(doc.output_encodings, vec!["UTF-8"]);
        assert_eq!(doc.syndication_right, SyndicationRight::Open);
        assert!(!doc.adult_content);
    }

    #[test]
    fn test_new_requires_fields() {
        let urls = vec![endpoint("http://example.com/?q={searchTerms}", "text/html")];
        assert_eq!(
            DescriptionDocument::new("", "d", urls.clone()).unwrap_err(),
            DescriptionError::MissingRequiredElement("ShortName".to_string())
        );
        assert!(DescriptionDocument::new("n", " ", urls).is_err());
        assert_eq!(
            DescriptionDocument::new("n", "d", Vec::new()).unwrap_err(),
            DescriptionError::MissingRequiredElement("Url".to_string())
        );
    }

    #[test]
    fn test_find_endpoint() {
        let suggestions = endpoint("http://example.com/suggest?q={searchTerms}", "application/x-suggestions+json")
            .with_roles([UrlRole::Suggestions]);
        let doc = DescriptionDocument::new(
            "Web Search",
            "Search the web",
            vec![
                endpoint("http://example.com/?q={searchTerms}", "text/html"),
                endpoint("http://example.com/rss?q={searchTerms}", "application/rss+xml"),
                suggestions,
            ],
        )
        .unwrap();

        let rss = doc
            .find_endpoint(UrlRole::Results, Some("application/rss+xml"))
            .unwrap();
        assert_eq!(rss.template, "http://example.com/rss");

        let first = doc.find_endpoint(UrlRole::Results, None).unwrap();
        assert_eq!(first.mime_type.as_deref(), Some("text/html"));

        assert!(doc.find_endpoint(UrlRole::Suggestions, None).is_some());
        assert!(doc.find_endpoint(UrlRole::Collection, None).is_none());
    }

    #[test]
    fn test_limit_violations() {
        let mut doc = DescriptionDocument::new(
            "A Very Long Short Name",
            "Search the web",
            vec![endpoint("http://example.com/?q={searchTerms}", "text/html")],
        )
        .unwrap();
        doc.developer = Some("d".repeat(65));

        let violations = doc.limit_violations();
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["ShortName", "Developer"]);
        assert_eq!(violations[0].actual, 22);
    }

    #[test]
    fn test_supports_language() {
        let mut doc = DescriptionDocument::new(
            "Web",
            "Search",
            vec![endpoint("http://example.com/?q={searchTerms}", "text/html")],
        )
        .unwrap();
        assert!(doc.supports_language("fr"));

        doc.languages = vec!["en-us".to_string()];
        assert!(doc.supports_language("EN-US"));
        assert!(!doc.supports_language("fr"));
    }
}

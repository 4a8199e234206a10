// Url, Image and Query records of a description document

use serde::{Deserialize, Serialize};

use super::roles::{HttpMethod, UrlRole};
use crate::domain::template::{
    Parameter, SearchValues, TemplateParameter, TemplateParser, TemplateResolver,
    DEFAULT_ENCODING, DEFAULT_LANGUAGE,
};
use crate::error::DescriptionResult;
use crate::validation;

pub const DEFAULT_ENCTYPE: &str = "application/x-www-form-urlencoded";
pub const DEFAULT_OFFSET: i64 = 1;

/// One query interface of a search engine (a `Url` element)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEndpoint {
    /// Template text; pure query pairs live in `parameters`
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub roles: Vec<UrlRole>,
    pub index_offset: i64,
    pub page_offset: i64,
    pub method: HttpMethod,
    pub enctype: String,
    pub parameters: Vec<Parameter>,
}

impl UrlEndpoint {
    /// Build an endpoint from a raw template attribute, with every other field at its default
    pub fn from_template(raw_template: &str) -> DescriptionResult<Self> {
        let scanned = TemplateParser::scan(raw_template)?;
        Ok(Self {
            template: scanned.template,
            mime_type: None,
            roles: vec![UrlRole::Results],
            index_offset: DEFAULT_OFFSET,
            page_offset: DEFAULT_OFFSET,
            method: HttpMethod::Get,
            enctype: DEFAULT_ENCTYPE.to_string(),
            parameters: scanned.parameters,
        })
    }

    pub fn with_mime_type(mut self, mime_type: &str) -> DescriptionResult<Self> {
        validation::validate_mime_type("type", mime_type)?;
        self.mime_type = Some(mime_type.to_string());
        Ok(self)
    }

    pub fn with_enctype(mut self, enctype: &str) -> DescriptionResult<Self> {
        validation::validate_mime_type("parameters:enctype", enctype)?;
        self.enctype = enctype.to_string();
        Ok(self)
    }

    /// Set the roles, dropping duplicates. An empty list falls back to `results`.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = UrlRole>) -> Self {
        let mut unique = Vec::new();
        for role in roles {
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        if unique.is_empty() {
            unique.push(UrlRole::Results);
        }
        self.roles = unique;
        self
    }

    pub fn with_offsets(mut self, index_offset: i64, page_offset: i64) -> Self {
        self.index_offset = index_offset;
        self.page_offset = page_offset;
        self
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add an appended parameter. One with the same name is replaced in place, so a
    /// `Parameter` element can refine a pair already lifted from the template.
    pub fn with_parameter(mut self, mut parameter: Parameter) -> Self {
        parameter.inline = false;
        match self
            .parameters
            .iter_mut()
            .find(|p| !p.inline && p.name == parameter.name)
        {
            Some(existing) => {
                // same literal as the template pair: still the text written there
                parameter.pre_encoded |= existing.pre_encoded && existing.value == parameter.value;
                *existing = parameter;
            }
            None => self.parameters.push(parameter),
        }
        self
    }

    pub fn has_role(&self, role: UrlRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn inline_parameter(&self, kind: TemplateParameter) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.inline && p.kind() == Some(kind))
    }

    /// Parameters rendered as `name=value` entries, in declared order
    pub fn appended_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| !p.inline)
    }

    /// The unbound template: template text followed by every appended parameter as
    /// `name=value`, placeholders written as tokens (with `?` when optional). A value that
    /// would not scan back is left as `name=`; see `template_layout`.
    pub fn template_text(&self) -> String {
        self.template_layout().0
    }

    /// Split the appended parameters between the `template` attribute and `Parameter`
    /// elements, so that parsing the two back gives this endpoint again.
    ///
    /// A slot whose `name=value` text scans back to itself goes into the template. Any other
    /// slot keeps its place in the template as `name=` and takes its value from an element.
    /// Slots are also listed when their cardinality differs from the one their value implies.
    pub fn template_layout(&self) -> (String, Vec<&Parameter>) {
        let mut pairs = Vec::new();
        let mut elements = Vec::new();

        for param in self.appended_parameters() {
            match param.template_pair() {
                Some(pair) => {
                    pairs.push(pair);
                    if (param.minimum, param.maximum) != param.implied_cardinality() {
                        elements.push(param);
                    }
                }
                None => {
                    pairs.extend(param.template_name_pair());
                    elements.push(param);
                }
            }
        }

        if pairs.is_empty() {
            return (self.template.clone(), elements);
        }
        let separator = if self.template.contains('?') { '&' } else { '?' };
        let text = format!("{}{}{}", self.template, separator, pairs.join("&"));
        (text, elements)
    }

    /// Render a request URL for the given values
    pub fn resolve(&self, values: &SearchValues) -> DescriptionResult<String> {
        TemplateResolver::new().resolve(self, values)
    }
}

/// An icon or image associated with the search engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub uri: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Image {
    pub fn new(uri: &str) -> DescriptionResult<Self> {
        let uri = uri.trim();
        validation::validate_uri("Image", uri)?;
        Ok(Self {
            uri: uri.to_string(),
            width: 0,
            height: 0,
            mime_type: None,
        })
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_mime_type(mut self, mime_type: &str) -> DescriptionResult<Self> {
        validation::validate_mime_type("type", mime_type)?;
        self.mime_type = Some(mime_type.to_string());
        Ok(self)
    }
}

/// A specific search request (`Query` element), e.g. an example query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<i64>,
    pub language: String,
    pub input_encoding: String,
    pub output_encoding: String,
}

impl Query {
    pub fn new(role: &str) -> Self {
        Self {
            role: role.trim().to_string(),
            title: None,
            total_results: None,
            search_terms: None,
            count: None,
            start_index: None,
            start_page: None,
            language: DEFAULT_LANGUAGE.to_string(),
            input_encoding: DEFAULT_ENCODING.to_string(),
            output_encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    pub fn is_example(&self) -> bool {
        self.role == "example"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DescriptionError;

    #[test]
    fn test_from_template_defaults() {
        let endpoint = UrlEndpoint::from_template("http://example.com/?q={searchTerms}").unwrap();
        assert_eq!(endpoint.template, "http://example.com/");
        assert_eq!(endpoint.roles, vec![UrlRole::Results]);
        assert_eq!(endpoint.index_offset, 1);
        assert_eq!(endpoint.page_offset, 1);
        assert_eq!(endpoint.method, HttpMethod::Get);
        assert_eq!(endpoint.enctype, DEFAULT_ENCTYPE);
        assert_eq!(endpoint.mime_type, None);
        assert_eq!(endpoint.parameters.len(), 1);
    }

    #[test]
    fn test_with_mime_type_validates() {
        let endpoint = UrlEndpoint::from_template("http://example.com/").unwrap();
        assert!(endpoint.clone().with_mime_type("application/rss+xml").is_ok());

        let err = endpoint.with_mime_type("text html").unwrap_err();
        assert_eq!(err, DescriptionError::invalid_attribute("type", "text html"));
    }

    #[test]
    fn test_with_enctype_validates() {
        let endpoint = UrlEndpoint::from_template("http://example.com/").unwrap();
        assert!(endpoint.clone().with_enctype("multipart/form-data").is_ok());
        assert!(endpoint.with_enctype("multipart").is_err());
    }

    #[test]
    fn test_with_roles_dedupes_and_defaults() {
        let endpoint = UrlEndpoint::from_template("http://example.com/")
            .unwrap()
            .with_roles([UrlRole::Suggestions, UrlRole::Suggestions, UrlRole::Collection]);
        assert_eq!(endpoint.roles, vec![UrlRole::Suggestions, UrlRole::Collection]);
        assert!(!endpoint.has_role(UrlRole::Results));

        let endpoint = endpoint.with_roles([]);
        assert_eq!(endpoint.roles, vec![UrlRole::Results]);
    }

    #[test]
    fn test_template_text_reproduces_unbound_template() {
        let raw = "http://example.com/search?q={searchTerms}&c={count?}&format=rss";
        let endpoint = UrlEndpoint::from_template(raw).unwrap();
        assert_eq!(endpoint.template_text(), raw);

        let raw = "http://example.com/{searchTerms}";
        assert_eq!(UrlEndpoint::from_template(raw).unwrap().template_text(), raw);
    }

    #[test]
    fn test_template_text_uses_canonical_tokens() {
        let endpoint =
            UrlEndpoint::from_template("http://example.com/?where={geo:locationString}").unwrap();
        assert_eq!(endpoint.template_text(), "http://example.com/?where={geo:name}");
    }

    #[test]
    fn test_template_layout_moves_unwritable_values_to_elements() {
        let endpoint = UrlEndpoint::from_template("http://example.com/s?q={searchTerms}&f=rss")
            .unwrap()
            .with_parameter(Parameter::bind("q", "{searchTerms}").with_maximum(3))
            .with_parameter(Parameter::literal("fq", "a&b"))
            .with_parameter(Parameter::literal("x", "{custom:v}"));

        let (text, elements) = endpoint.template_layout();
        assert_eq!(text, "http://example.com/s?q={searchTerms}&f=rss&fq=&x=");
        let names: Vec<_> = elements.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["q", "fq", "x"]);
    }

    #[test]
    fn test_with_parameter_replaces_same_name() {
        let endpoint = UrlEndpoint::from_template("http://example.com/?q={searchTerms}&f=rss")
            .unwrap()
            .with_parameter(Parameter::bind("q", "{searchTerms}").with_cardinality(1, 3))
            .with_parameter(Parameter::bind("n", "{count?}"));

        let names: Vec<_> = endpoint.appended_parameters().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["q", "f", "n"]);
        assert_eq!(endpoint.parameters[0].maximum, 3);
    }

    #[test]
    fn test_image_validation() {
        let image = Image::new(" http://example.com/icon.png ").unwrap().with_size(16, 16);
        assert_eq!(image.uri, "http://example.com/icon.png");
        assert_eq!((image.width, image.height), (16, 16));

        assert!(Image::new("http://example.com/icon.png")
            .unwrap()
            .with_mime_type("text html")
            .is_err());
        assert!(Image::new("not a uri").is_err());
    }

    #[test]
    fn test_query_defaults() {
        let query = Query::new("example");
        assert!(query.is_example());
        assert_eq!(query.language, "*");
        assert_eq!(query.input_encoding, "UTF-8");
        assert_eq!(query.output_encoding, "UTF-8");
        assert_eq!(query.count, None);
    }
}

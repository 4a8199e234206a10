// Builds a DescriptionDocument from a parsed XML tree

use tracing::{debug, warn};

use super::document::DescriptionDocument;
use super::endpoint::{Image, Query, UrlEndpoint, DEFAULT_OFFSET};
use super::roles::{HttpMethod, SyndicationRight, UrlRole};
use super::xml::XmlNode;
use crate::domain::template::{
    Parameter, DEFAULT_ENCODING, DEFAULT_LANGUAGE, REPEAT_LIMIT, UNBOUNDED,
};
use crate::error::{DescriptionError, DescriptionResult};

pub const ROOT_ELEMENT: &str = "OpenSearchDescription";

/// Reads description documents.
///
/// Required elements fail the parse when missing. Optional elements with a documented default
/// fall back to it, and the rest are left empty. Numeric attributes that do not parse are treated
/// as absent; MIME types, enctypes and image URIs that fail validation are errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionParser;

impl DescriptionParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> DescriptionResult<DescriptionDocument> {
        let root = XmlNode::parse(text)?;
        self.parse_node(&root)
    }

    pub fn parse_node(&self, root: &XmlNode) -> DescriptionResult<DescriptionDocument> {
        if root.local_name() != ROOT_ELEMENT {
            return Err(DescriptionError::MalformedDocument(format!(
                "expected <{}> root, found <{}>",
                ROOT_ELEMENT, root.name
            )));
        }

        let short_name = required_text(root, "ShortName")?;
        let description = required_text(root, "Description")?;
        let urls = root
            .children_named("Url")
            .map(|node| self.parse_url(node))
            .collect::<DescriptionResult<Vec<_>>>()?;

        let mut doc = DescriptionDocument::new(short_name, description, urls)?;

        if let Some(long_name) = root.child_text("LongName") {
            doc.long_name = long_name.to_string();
        }
        doc.developer = root.child_text("Developer").map(str::to_string);
        doc.contact = root.child_text("Contact").map(str::to_string);
        doc.attribution = root.child_text("Attribution").map(str::to_string);
        doc.tags = root
            .child_text("Tags")
            .map(|tags| tags.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        doc.syndication_right = parse_syndication_right(root.child_text("SyndicationRight"));
        doc.adult_content = parse_adult_content(root.child_text("AdultContent"));
        doc.languages = text_list(root, "Language", DEFAULT_LANGUAGE);
        doc.input_encodings = text_list(root, "InputEncoding", DEFAULT_ENCODING);
        doc.output_encodings = text_list(root, "OutputEncoding", DEFAULT_ENCODING);

        doc.images = root
            .children_named("Image")
            .map(parse_image)
            .collect::<DescriptionResult<Vec<_>>>()?;
        doc.queries = root
            .children_named("Query")
            .map(parse_query)
            .collect::<DescriptionResult<Vec<_>>>()?;

        for violation in doc.limit_violations() {
            warn!(
                field = violation.field,
                limit = violation.limit,
                actual = violation.actual,
                "Description field exceeds OpenSearch length limit"
            );
        }

        Ok(doc)
    }

    fn parse_url(&self, node: &XmlNode) -> DescriptionResult<UrlEndpoint> {
        let template = node
            .attr_text("template")
            .ok_or_else(|| DescriptionError::MissingRequiredElement("Url/@template".to_string()))?;

        let mut endpoint = UrlEndpoint::from_template(template)?
            .with_roles(parse_roles(node.attr_text("rel")))
            .with_offsets(
                offset_attr(node, "indexOffset"),
                offset_attr(node, "pageOffset"),
            )
            .with_method(parse_method(node.attr_text("method")));

        if let Some(mime_type) = node.attr("type") {
            endpoint = endpoint.with_mime_type(mime_type.trim())?;
        }
        if let Some(enctype) = node.attr("enctype") {
            endpoint = endpoint.with_enctype(enctype.trim())?;
        }

        for child in node.children_named("Parameter") {
            if let Some(parameter) = parse_parameter(child) {
                endpoint = endpoint.with_parameter(parameter);
            }
        }

        Ok(endpoint)
    }
}

fn required_text<'a>(root: &'a XmlNode, element: &str) -> DescriptionResult<&'a str> {
    root.child_text(element)
        .ok_or_else(|| DescriptionError::MissingRequiredElement(element.to_string()))
}

/// Every non-blank occurrence of a repeatable element, or the default alone
fn text_list(root: &XmlNode, element: &str, default: &str) -> Vec<String> {
    let values: Vec<String> = root
        .children_named(element)
        .map(|c| c.text.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        vec![default.to_string()]
    } else {
        values
    }
}

fn parse_syndication_right(value: Option<&str>) -> SyndicationRight {
    match value.map(SyndicationRight::parse) {
        Some(Ok(right)) => right,
        Some(Err(err)) => {
            debug!("{}, using {}", err, SyndicationRight::default());
            SyndicationRight::default()
        }
        None => SyndicationRight::default(),
    }
}

/// `false`, `no` and `0` (any case) are false, a missing value is false, anything else is true
pub fn parse_adult_content(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !["false", "no", "0"].iter().any(|f| v.eq_ignore_ascii_case(f)),
    }
}

fn parse_roles(value: Option<&str>) -> Vec<UrlRole> {
    value
        .unwrap_or_default()
        .split_whitespace()
        .filter_map(|token| match UrlRole::parse(token) {
            Ok(role) => Some(role),
            Err(err) => {
                debug!("{}, ignoring", err);
                None
            }
        })
        .collect()
}

fn parse_method(value: Option<&str>) -> HttpMethod {
    match value.map(HttpMethod::parse) {
        Some(Ok(method)) => method,
        Some(Err(err)) => {
            debug!("{}, using GET", err);
            HttpMethod::Get
        }
        None => HttpMethod::Get,
    }
}

fn offset_attr(node: &XmlNode, attribute: &str) -> i64 {
    parse_attr::<i64>(node, attribute).unwrap_or(DEFAULT_OFFSET)
}

/// Parse an attribute, treating anything unparseable as absent
fn parse_attr<T: std::str::FromStr>(node: &XmlNode, attribute: &str) -> Option<T> {
    let raw = node.attr_text(attribute)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(attribute, value = raw, "Unparseable numeric attribute, treating as absent");
            None
        }
    }
}

/// Numeric attribute clamped to zero at the bottom
fn non_negative(node: &XmlNode, attribute: &str) -> Option<u64> {
    parse_attr::<i64>(node, attribute).map(|v| v.max(0).unsigned_abs())
}

fn non_negative_u32(node: &XmlNode, attribute: &str) -> Option<u32> {
    non_negative(node, attribute).map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

fn parse_parameter(node: &XmlNode) -> Option<Parameter> {
    let Some(name) = node.attr_text("name") else {
        debug!("Parameter element without a name, skipping");
        return None;
    };
    let parameter = Parameter::bind(name, node.attr("value").unwrap_or_default());

    let minimum = non_negative_u32(node, "minimum").unwrap_or(parameter.minimum);
    let maximum = match node.attr_text("maximum") {
        Some("*") => UNBOUNDED,
        _ => non_negative_u32(node, "maximum").unwrap_or(parameter.maximum),
    };
    if minimum > REPEAT_LIMIT {
        warn!(
            parameter = name,
            minimum,
            limit = REPEAT_LIMIT,
            "Parameter minimum exceeds the repeat limit"
        );
    }
    Some(parameter.with_cardinality(minimum, maximum))
}

fn parse_image(node: &XmlNode) -> DescriptionResult<Image> {
    let mut image = Image::new(node.text.trim())?.with_size(
        non_negative_u32(node, "width").unwrap_or(0),
        non_negative_u32(node, "height").unwrap_or(0),
    );
    if let Some(mime_type) = node.attr("type") {
        image = image.with_mime_type(mime_type.trim())?;
    }
    Ok(image)
}

fn parse_query(node: &XmlNode) -> DescriptionResult<Query> {
    let role = node
        .attr_text("role")
        .ok_or_else(|| DescriptionError::MissingRequiredElement("Query/@role".to_string()))?;

    let mut query = Query::new(role);
    query.title = node.attr_text("title").map(str::to_string);
    query.total_results = non_negative(node, "totalResults");
    query.search_terms = node.attr_text("searchTerms").map(str::to_string);
    query.count = non_negative_u32(node, "count");
    query.start_index = parse_attr::<i64>(node, "startIndex").map(|v| v.max(0));
    query.start_page = parse_attr::<i64>(node, "startPage").map(|v| v.max(0));
    if let Some(language) = node.attr_text("language") {
        query.language = language.to_string();
    }
    if let Some(encoding) = node.attr_text("inputEncoding") {
        query.input_encoding = encoding.to_string();
    }
    if let Some(encoding) = node.attr_text("outputEncoding") {
        query.output_encoding = encoding.to_string();
    }
    Ok(query)
}

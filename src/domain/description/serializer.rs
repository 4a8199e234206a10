// Renders a DescriptionDocument back to canonical XML

use quick_xml::escape::escape;

use super::document::DescriptionDocument;
use super::endpoint::{Image, Query, UrlEndpoint, DEFAULT_ENCTYPE, DEFAULT_OFFSET};
use super::parser::ROOT_ELEMENT;
use super::roles::HttpMethod;

pub const OPENSEARCH_NAMESPACE: &str = "http://a9.com/-/spec/opensearch/1.1/";
pub const PARAMETERS_NAMESPACE: &str = "http://a9.com/-/spec/opensearch/extensions/parameters/1.0/";

/// Writes description documents as OpenSearch 1.1 XML.
///
/// Absent optional fields are left out entirely. SyndicationRight and AdultContent always
/// carry a value and are always written.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionSerializer;

impl DescriptionSerializer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, doc: &DescriptionDocument) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<{} xmlns=\"{}\" xmlns:parameters=\"{}\">\n",
            ROOT_ELEMENT, OPENSEARCH_NAMESPACE, PARAMETERS_NAMESPACE
        ));

        leaf(&mut out, "ShortName", &doc.short_name);
        leaf(&mut out, "Description", &doc.description);
        for url in &doc.urls {
            render_url(&mut out, url);
        }
        leaf(&mut out, "LongName", &doc.long_name);
        optional_leaf(&mut out, "Developer", doc.developer.as_deref());
        optional_leaf(&mut out, "Contact", doc.contact.as_deref());
        optional_leaf(&mut out, "Tags", doc.tags_text().as_deref());
        optional_leaf(&mut out, "Attribution", doc.attribution.as_deref());
        for image in &doc.images {
            render_image(&mut out, image);
        }
        for query in &doc.queries {
            render_query(&mut out, query);
        }
        leaf(&mut out, "SyndicationRight", doc.syndication_right.as_str());
        leaf(&mut out, "AdultContent", if doc.adult_content { "true" } else { "false" });
        for language in &doc.languages {
            leaf(&mut out, "Language", language);
        }
        for encoding in &doc.input_encodings {
            leaf(&mut out, "InputEncoding", encoding);
        }
        for encoding in &doc.output_encodings {
            leaf(&mut out, "OutputEncoding", encoding);
        }

        out.push_str(&format!("</{}>\n", ROOT_ELEMENT));
        out
    }
}

fn leaf(out: &mut String, element: &str, text: &str) {
    out.push_str(&format!("  <{0}>{1}</{0}>\n", element, escape(text)));
}

fn optional_leaf(out: &mut String, element: &str, text: Option<&str>) {
    if let Some(text) = text {
        leaf(out, element, text);
    }
}

/// ` name="value"` pairs, escaped
fn attributes(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, escape(value.as_str())))
        .collect()
}

fn render_url(out: &mut String, url: &UrlEndpoint) {
    let mut attrs: Vec<(&str, String)> = Vec::new();
    if let Some(mime_type) = &url.mime_type {
        attrs.push(("type", mime_type.clone()));
    }
    let roles: Vec<&str> = url.roles.iter().map(|r| r.as_str()).collect();
    attrs.push(("rel", roles.join(" ")));
    if url.index_offset != DEFAULT_OFFSET {
        attrs.push(("indexOffset", url.index_offset.to_string()));
    }
    if url.page_offset != DEFAULT_OFFSET {
        attrs.push(("pageOffset", url.page_offset.to_string()));
    }
    if url.method != HttpMethod::Get {
        attrs.push(("parameters:method", url.method.to_string()));
    }
    if url.enctype != DEFAULT_ENCTYPE {
        attrs.push(("parameters:enctype", url.enctype.clone()));
    }
    let (template, refinements) = url.template_layout();
    attrs.push(("template", template));

    if refinements.is_empty() {
        out.push_str(&format!("  <Url{}/>\n", attributes(&attrs)));
        return;
    }

    out.push_str(&format!("  <Url{}>\n", attributes(&attrs)));
    for param in refinements {
        let maximum = if param.is_unbounded() {
            "*".to_string()
        } else {
            param.maximum.to_string()
        };
        let attrs = [
            ("name", param.name.clone()),
            ("value", param.configured_value()),
            ("minimum", param.minimum.to_string()),
            ("maximum", maximum),
        ];
        out.push_str(&format!("    <parameters:Parameter{}/>\n", attributes(&attrs)));
    }
    out.push_str("  </Url>\n");
}

fn render_image(out: &mut String, image: &Image) {
    let mut attrs: Vec<(&str, String)> = Vec::new();
    if image.height > 0 {
        attrs.push(("height", image.height.to_string()));
    }
    if image.width > 0 {
        attrs.push(("width", image.width.to_string()));
    }
    if let Some(mime_type) = &image.mime_type {
        attrs.push(("type", mime_type.clone()));
    }
    out.push_str(&format!(
        "  <Image{}>{}</Image>\n",
        attributes(&attrs),
        escape(image.uri.as_str())
    ));
}

fn render_query(out: &mut String, query: &Query) {
    let mut attrs: Vec<(&str, String)> = vec![("role", query.role.clone())];
    if let Some(title) = &query.title {
        attrs.push(("title", title.clone()));
    }
    if let Some(total) = query.total_results {
        attrs.push(("totalResults", total.to_string()));
    }
    if let Some(terms) = &query.search_terms {
        attrs.push(("searchTerms", terms.clone()));
    }
    if let Some(count) = query.count {
        attrs.push(("count", count.to_string()));
    }
    if let Some(start_index) = query.start_index {
        attrs.push(("startIndex", start_index.to_string()));
    }
    if let Some(start_page) = query.start_page {
        attrs.push(("startPage", start_page.to_string()));
    }
    attrs.push(("language", query.language.clone()));
    attrs.push(("inputEncoding", query.input_encoding.clone()));
    attrs.push(("outputEncoding", query.output_encoding.clone()));
    out.push_str(&format!("  <Query{}/>\n", attributes(&attrs)));
}

// Serializers for description document output formats

use anyhow::Result;

use crate::domain::description::{DescriptionDocument, DescriptionParser, DescriptionSerializer};

/// Strategy trait for document output formats
pub trait DocumentSerializer: Send + Sync {
    fn serialize(&self, doc: &DescriptionDocument) -> Result<String>;
    fn deserialize(&self, content: &str) -> Result<DescriptionDocument>;
    fn file_extension(&self) -> &'static str;
    fn content_type(&self) -> &'static str;
}

/// Canonical OpenSearch XML
pub struct XmlSerializer;

impl DocumentSerializer for XmlSerializer {
    fn serialize(&self, doc: &DescriptionDocument) -> Result<String> {
        Ok(DescriptionSerializer::new().render(doc))
    }

    fn deserialize(&self, content: &str) -> Result<DescriptionDocument> {
        Ok(DescriptionParser::new().parse(content)?)
    }

    fn file_extension(&self) -> &'static str {
        "xml"
    }

    fn content_type(&self) -> &'static str {
        "application/opensearchdescription+xml"
    }
}

pub struct JsonSerializer;

impl DocumentSerializer for JsonSerializer {
    fn serialize(&self, doc: &DescriptionDocument) -> Result<String> {
        Ok(serde_json::to_string_pretty(doc)?)
    }

    fn deserialize(&self, content: &str) -> Result<DescriptionDocument> {
        Ok(serde_json::from_str(content)?)
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

pub struct YamlSerializer;

impl DocumentSerializer for YamlSerializer {
    fn serialize(&self, doc: &DescriptionDocument) -> Result<String> {
        Ok(serde_yaml::to_string(doc)?)
    }

    fn deserialize(&self, content: &str) -> Result<DescriptionDocument> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn file_extension(&self) -> &'static str {
        "yml"
    }

    fn content_type(&self) -> &'static str {
        "application/x-yaml"
    }
}

/// Output format names accepted by `serializer_for`
pub const FORMATS: [&str; 3] = ["xml", "json", "yaml"];

pub fn serializer_for(format: &str) -> Option<Box<dyn DocumentSerializer>> {
    match format.to_ascii_lowercase().as_str() {
        "xml" => Some(Box::new(XmlSerializer)),
        "json" => Some(Box::new(JsonSerializer)),
        "yaml" | "yml" => Some(Box::new(YamlSerializer)),
        _ => None,
    }
}

// OpenSearch description document model, parser and serializer

pub mod document;
pub mod endpoint;
pub mod parser;
pub mod roles;
pub mod serializer;
pub mod xml;

pub use document::{DescriptionDocument, LimitViolation};
pub use endpoint::{Image, Query, UrlEndpoint, DEFAULT_ENCTYPE, DEFAULT_OFFSET};
pub use parser::DescriptionParser;
pub use roles::{HttpMethod, SyndicationRight, UnknownValue, UrlRole};
pub use serializer::DescriptionSerializer;
pub use xml::XmlNode;

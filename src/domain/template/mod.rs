// Template module for OpenSearch URL templates
//
// This module provides the placeholder catalog, template scanning, parameter slots and the
// resolution of an endpoint plus runtime search values into a request URL.

mod catalog;
mod parameter;
mod parser;
mod resolver;
mod values;

pub use catalog::TemplateParameter;
pub use parameter::{strip_optional_marker, Parameter, ParameterValue, REPEAT_LIMIT, UNBOUNDED};
pub use parser::{Placeholder, ScannedTemplate, TemplateParser, TemplatePart};
pub use resolver::TemplateResolver;
pub use values::{SearchValues, DEFAULT_ENCODING, DEFAULT_LANGUAGE};

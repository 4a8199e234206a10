// Domain model: description documents and URL template resolution

pub mod description;
pub mod template;

pub use description::{
    DescriptionDocument, DescriptionParser, DescriptionSerializer, HttpMethod, Image, Query,
    SyndicationRight, UrlEndpoint, UrlRole,
};
pub use template::{Parameter, SearchValues, TemplateParameter, TemplateResolver, UNBOUNDED};

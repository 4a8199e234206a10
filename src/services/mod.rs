// Collaborators around the core: document loading and output formats

pub mod loader;
pub mod serializers;

pub use loader::{load_document, load_source, Source};
pub use serializers::{serializer_for, DocumentSerializer};

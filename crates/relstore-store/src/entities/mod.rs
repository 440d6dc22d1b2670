pub mod document_parameter;
pub mod release;
pub mod release_document;
pub mod release_parameter;

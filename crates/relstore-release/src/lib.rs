pub mod baseline;
pub mod diff;
pub mod effective_view;
pub mod parameter_index;
pub mod service;

pub use baseline::resolve_chain;
pub use diff::{diff as diff_documents, DiffEntry, DiffKind, DiffParameters};
pub use effective_view::effective_view;
pub use parameter_index::find_releases_by_parameters;
pub use service::ReleaseService;

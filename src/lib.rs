//! ssm-parent: resolve parameters from a parameter store, transform them,
//! and hand them to a child process or a `.env` file.

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod params;
pub mod resolve;
pub mod transform;

// Explicit exports for better API clarity
pub use config::Settings;
pub use error::{ResolveError, ResolveResult};
pub use params::{
    FetchError, FileStore, MergeReport, ParameterMap, ParameterStore, RawParameter,
    SourceDescriptor, SourceGroups, SourceKind, ValueFormat,
};
pub use resolve::resolve;
pub use transform::{Transformation, TransformationList};

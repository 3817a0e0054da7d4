pub mod config;
pub mod errors;
pub mod project_config;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use errors::ResolverError;
pub use registry::{RegistryLoader, RuleSetDefinition, RuleSetRegistry};
pub use resolver::{ResolutionReport, RuleSetResolver, RuleSource, resolve};
pub use types::*;

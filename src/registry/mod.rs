pub mod builtin;
pub mod loader;
pub mod parser;
pub mod snapshot;
pub mod types;

// Re-export commonly used types
pub use loader::RegistryLoader;
pub use parser::parse_rule_set_file;
pub use snapshot::{RegistryBuilder, RuleSetRegistry};
pub use types::{RuleSetDefinition, RuleSetFile};

//! Configuration for the meshauth daemon: YAML schema, defaults, env
//! substitution, and loading.

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use schema::{AuthSection, LoggingSection, MeshAuthConfig, NodeEntry};
pub use validation::validate;

//! Declared table structure: column validators, the table validator, and
//! the document loader.

mod field;
mod loader;
mod table;
mod types;

pub use field::Field;
pub use loader::{FieldDescriptor, LoaderConfig, SchemaDocument, TIMEOUT_ENV_VAR};
pub use table::Schema;
pub use types::{Constraints, FieldType, TypeCheck, XSD_NAMESPACE};

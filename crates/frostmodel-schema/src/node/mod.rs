mod property;
mod schema;

pub use property::{PropertyDeclaration, PropertyKind};
pub use schema::Schema;

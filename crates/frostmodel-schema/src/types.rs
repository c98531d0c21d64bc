use derive_more::Display;
use serde::Serialize;

///
/// Flavor
///
/// Mutability flavor of a model type.
/// Immutable instances are frozen at construction; mutable instances change
/// in place until explicitly frozen.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum Flavor {
    Immutable,
    Mutable,
}

impl Flavor {
    #[must_use]
    pub const fn is_immutable(self) -> bool {
        matches!(self, Self::Immutable)
    }

    #[must_use]
    pub const fn is_mutable(self) -> bool {
        matches!(self, Self::Mutable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(Flavor::Immutable.to_string(), "Immutable");
        assert_eq!(Flavor::Mutable.to_string(), "Mutable");
    }

    #[test]
    fn predicates_are_exclusive() {
        assert!(Flavor::Immutable.is_immutable());
        assert!(!Flavor::Immutable.is_mutable());
        assert!(Flavor::Mutable.is_mutable());
    }
}

//! Declaration validation run before schema resolution.

pub mod naming;

use crate::{
    build::ModelDeclaration,
    error::{Issue, Issues},
};
use std::collections::BTreeMap;

/// Check names and cross references, returning declarations indexed by name.
pub(crate) fn validate_declarations<'a>(
    declarations: &'a [ModelDeclaration],
    issues: &mut Issues,
) -> BTreeMap<&'a str, &'a ModelDeclaration> {
    let mut by_name = BTreeMap::new();

    // Phase 1: names are valid and unique.
    for declaration in declarations {
        validate_names(declaration, issues);

        if by_name.insert(declaration.name(), declaration).is_some() {
            issues.add(Issue::RedeclaredModel {
                model: declaration.name().to_string(),
            });
        }
    }

    // Phase 2: every nested reference names a declared model.
    for declaration in declarations {
        for property in declaration.properties() {
            let Some(nested) = property.nested_model() else {
                continue;
            };

            if !by_name.contains_key(nested) {
                issues.add(Issue::UnknownNestedModel {
                    model: declaration.name().to_string(),
                    key: property.key.clone(),
                    nested: nested.to_string(),
                });
            }
        }
    }

    by_name
}

fn validate_names(declaration: &ModelDeclaration, issues: &mut Issues) {
    if let Err(reason) = naming::validate_model_name(declaration.name()) {
        issues.add(Issue::InvalidModelName {
            model: declaration.name().to_string(),
            reason,
        });
    }

    for property in declaration.properties() {
        if let Err(reason) = naming::validate_property_key(&property.key) {
            issues.add(Issue::InvalidPropertyKey {
                model: declaration.name().to_string(),
                key: property.key.clone(),
                reason,
            });
        }
    }
}

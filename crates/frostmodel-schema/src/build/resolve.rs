use crate::{
    build::ModelDeclaration,
    error::{Issue, Issues, SchemaError},
    node::{PropertyDeclaration, Schema},
    registry::Registry,
    validate::validate_declarations,
};
use std::{collections::BTreeMap, sync::Arc};
use tracing::debug;

/// Validate declarations and resolve each one into its inherited schema.
pub(super) fn resolve(declarations: &[ModelDeclaration]) -> Result<Registry, SchemaError> {
    // Phase 1: local and cross-reference checks.
    let mut issues = Issues::new();
    let by_name = validate_declarations(declarations, &mut issues);

    // Phase 2: walk every base chain and merge properties root-first.
    let mut schemas = BTreeMap::new();
    for declaration in by_name.values() {
        let Some(lineage) = resolve_lineage(declaration, &by_name, &mut issues) else {
            continue;
        };

        let properties = merge_properties(&lineage, &by_name);
        if properties.is_empty() {
            issues.add(Issue::NoProperties {
                model: declaration.name().to_string(),
            });
            continue;
        }

        let schema = Schema::new(
            declaration.name().to_string(),
            declaration.flavor(),
            lineage,
            properties,
        );
        schemas.insert(declaration.name().to_string(), Arc::new(schema));
    }

    issues.result()?;
    debug!(models = schemas.len(), "schema registry built");

    Ok(Registry::from_schemas(schemas))
}

// Collect the model's own name followed by its ancestors.
// Problems are only reported against the model that declares the broken edge.
fn resolve_lineage(
    declaration: &ModelDeclaration,
    by_name: &BTreeMap<&str, &ModelDeclaration>,
    issues: &mut Issues,
) -> Option<Vec<String>> {
    let mut lineage = vec![declaration.name().to_string()];
    let mut current = declaration;

    while let Some(base) = current.base() {
        let own_edge = current.name() == declaration.name();

        if lineage.iter().any(|name| name == base) {
            if base == declaration.name() {
                issues.add(Issue::InheritanceCycle {
                    model: declaration.name().to_string(),
                });
            }
            return None;
        }

        let Some(base_declaration) = by_name.get(base) else {
            if own_edge {
                issues.add(Issue::UnknownBase {
                    model: declaration.name().to_string(),
                    base: base.to_string(),
                });
            }
            return None;
        };

        if base_declaration.flavor() != current.flavor() {
            if own_edge {
                issues.add(Issue::MismatchedBaseFlavor {
                    model: declaration.name().to_string(),
                    flavor: declaration.flavor(),
                    base: base.to_string(),
                    base_flavor: base_declaration.flavor(),
                });
            }
            return None;
        }

        lineage.push(base.to_string());
        current = base_declaration;
    }

    Some(lineage)
}

// Ancestors first; a descendant's declaration replaces the inherited one in place.
fn merge_properties(
    lineage: &[String],
    by_name: &BTreeMap<&str, &ModelDeclaration>,
) -> Vec<PropertyDeclaration> {
    let mut properties: Vec<PropertyDeclaration> = Vec::new();

    for name in lineage.iter().rev() {
        let Some(declaration) = by_name.get(name.as_str()) else {
            continue;
        };

        for property in declaration.properties() {
            match properties.iter_mut().find(|p| p.key == property.key) {
                Some(existing) => *existing = property.clone(),
                None => properties.push(property.clone()),
            }
        }
    }

    properties
}

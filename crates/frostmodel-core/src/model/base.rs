use crate::{
    error::ModelError,
    model::ModelType,
    value::{Record, Value},
};
use frostmodel_schema::node::PropertyDeclaration;

///
/// AssignProperty
///
/// Flavor-specific storage policy for one declared property during
/// construction. `value` is `None` when the key is missing from the data.
///

pub(crate) trait AssignProperty {
    fn assign_property(
        &mut self,
        ty: &ModelType,
        declaration: &PropertyDeclaration,
        value: Option<&Value>,
    ) -> Result<(), ModelError>;
}

/// Visit every declaration of `ty` in schema order, exactly once each.
/// Keys in `data` that the schema does not declare are ignored.
pub(crate) fn materialize<T: AssignProperty>(
    ty: &ModelType,
    data: &Record,
    target: &mut T,
) -> Result<(), ModelError> {
    for declaration in ty.schema().properties() {
        let key = declaration.key();
        let value = data.get(key);

        target
            .assign_property(ty, declaration, value.as_ref())
            .map_err(|err| err.with_field(key))?;
    }

    Ok(())
}

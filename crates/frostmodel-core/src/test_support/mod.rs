//! Shared registry fixture for unit tests.

use crate::{
    model::{ImmutableModel, ModelType, MutableModel},
    value::Record,
};
use frostmodel_schema::registry::{Registry, SchemaProvider};
use std::sync::Arc;

///
/// Fixture
///

pub(crate) struct Fixture {
    provider: Arc<dyn SchemaProvider>,
}

impl Fixture {
    pub(crate) fn model_type(&self, name: &str) -> ModelType {
        ModelType::resolve(&self.provider, name).expect("fixture type should resolve")
    }

    pub(crate) fn immutable(&self, name: &str, data: &Record) -> ImmutableModel {
        ImmutableModel::new(self.model_type(name), data).expect("immutable fixture should build")
    }

    pub(crate) fn mutable(&self, name: &str, data: &Record) -> MutableModel {
        MutableModel::new(self.model_type(name), data).expect("mutable fixture should build")
    }
}

pub(crate) fn fixture() -> Fixture {
    let mut builder = Registry::builder();

    // immutable owners
    builder.immutable("ImmTest").prop("id").prop("name");
    builder.immutable("ImmObject").prop("complex");
    builder.immutable("ImmArray").prop("arr");
    builder
        .immutable("ImmWithModel")
        .model_ref("test", "ImmTest");
    builder
        .immutable("ImmWithDeep")
        .model_ref("deep", "ImmWithModel");
    builder
        .immutable("ImmWithMutable")
        .model_ref("mutable", "MutTest");
    builder.immutable("ImmName").prop("name");

    // mutable owners
    builder.mutable("MutTest").prop("id").prop("name");
    builder.mutable("MutArray").prop("arr");
    builder.mutable("MutWithModel").model_ref("test", "MutTest");
    builder
        .mutable("MutWithDeep")
        .model_ref("deep", "MutWithModel");
    builder
        .mutable("MutWithImmutable")
        .model_ref("immutable", "ImmName");
    builder
        .mutable("MutObject")
        .prop("complex")
        .model_ref("mutable", "MutTest")
        .model_ref("immutable", "ImmName");

    // inheritance
    builder.mutable("Animal").prop("name");
    builder.mutable("Dog").extends("Animal").prop("breed");
    builder.mutable("Kennel").model_ref("resident", "Animal");

    let registry = builder.build().expect("fixture registry should build");

    Fixture {
        provider: registry.into_provider(),
    }
}

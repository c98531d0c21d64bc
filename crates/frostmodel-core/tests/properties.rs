use frostmodel_core::{
    prelude::*,
    value::{deep_copy, deep_freeze},
};
use proptest::prelude::*;
use std::{collections::BTreeMap, sync::Arc};

///
/// Tree
/// Owned description of a plain-data value; built into fresh handles per case.
///

#[derive(Clone, Debug)]
enum Tree {
    Null,
    Int(i64),
    Text(String),
    List(Vec<Tree>),
    Record(BTreeMap<String, Tree>),
}

fn arb_tree() -> impl Strategy<Value = Tree> {
    let leaf = prop_oneof![
        Just(Tree::Null),
        any::<i64>().prop_map(Tree::Int),
        "[a-z]{0,6}".prop_map(Tree::Text),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Tree::List),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(Tree::Record),
        ]
    })
}

fn build(tree: &Tree) -> Value {
    match tree {
        Tree::Null => Value::Null,
        Tree::Int(i) => Value::Int(*i),
        Tree::Text(s) => Value::from(s.as_str()),
        Tree::List(items) => Value::List(items.iter().map(build).collect()),
        Tree::Record(entries) => Value::Record(
            entries
                .iter()
                .map(|(key, value)| (key.as_str(), build(value)))
                .collect(),
        ),
    }
}

fn all_frozen(value: &Value) -> bool {
    match value {
        Value::Record(record) => record.is_frozen() && record.values().iter().all(all_frozen),
        Value::List(list) => list.is_frozen() && list.items().iter().all(all_frozen),
        other => other.is_frozen(),
    }
}

fn shares_nothing(original: &Value, copy: &Value) -> bool {
    match (original, copy) {
        (Value::Record(ours), Value::Record(theirs)) => {
            !ours.ptr_eq(theirs)
                && ours
                    .keys()
                    .iter()
                    .all(|key| match (ours.get(key), theirs.get(key)) {
                        (Some(left), Some(right)) => shares_nothing(&left, &right),
                        _ => true,
                    })
        }
        (Value::List(ours), Value::List(theirs)) => {
            !ours.ptr_eq(theirs)
                && ours
                    .items()
                    .iter()
                    .zip(theirs.items().iter())
                    .all(|(left, right)| shares_nothing(left, right))
        }
        _ => true,
    }
}

fn payload_type() -> ModelType {
    let mut builder = Registry::builder();
    builder.immutable("Payload").prop("data");
    let provider: Arc<dyn SchemaProvider> = builder
        .build()
        .expect("payload registry should build")
        .into_provider();

    ModelType::resolve(&provider, "Payload").expect("payload type should resolve")
}

proptest! {
    #[test]
    fn deep_freeze_is_idempotent(tree in arb_tree()) {
        let once = deep_freeze(build(&tree));
        let twice = deep_freeze(once.clone());

        prop_assert_eq!(&once, &twice);
        prop_assert!(twice.same(&once));
        prop_assert!(all_frozen(&twice));
    }

    #[test]
    fn deep_copy_is_equal_and_disjoint(tree in arb_tree()) {
        let original = build(&tree);
        let copy = deep_copy(&original);

        prop_assert_eq!(&copy, &original);
        prop_assert!(shares_nothing(&original, &copy));
    }

    #[test]
    fn immutable_models_never_alias_caller_data(tree in arb_tree()) {
        let data = build(&tree);
        let input = record! { "data" => data.clone() };
        let model = ImmutableModel::new(payload_type(), &input).unwrap();

        let stored = model.get("data").unwrap_or(Value::Null);
        prop_assert_eq!(&stored, &data);
        prop_assert!(shares_nothing(&data, &stored));
        prop_assert!(all_frozen(&stored));
        if let Value::Record(_) | Value::List(_) = data {
            prop_assert!(!data.is_frozen());
        }
    }

    #[test]
    fn immutable_duplicate_round_trips(tree in arb_tree()) {
        let input = record! { "data" => build(&tree) };
        let model = ImmutableModel::new(payload_type(), &input).unwrap();
        let copy = model.duplicate().unwrap();

        prop_assert!(!copy.ptr_eq(&model));
        prop_assert_eq!(&copy, &model);
    }
}

use clove_match::{Evaluator, Value, append_suffix, dependent_fields};
use proptest::prelude::*;
use serde_json::{Map, json};

const FIELDS: [&str; 3] = ["a", "b", "c"];

fn arb_field() -> impl Strategy<Value = &'static str> {
    prop::sample::select(FIELDS.to_vec())
}

fn arb_scalar() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(json!(null)),
        any::<bool>().prop_map(|b| json!(b)),
        (-5i64..5).prop_map(|n| json!(n)),
        prop::sample::select(vec!["x", "y", "z"]).prop_map(|s| json!(s)),
    ]
}

fn arb_field_value() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        3 => arb_scalar(),
        1 => prop::collection::vec(arb_scalar(), 0..3).prop_map(serde_json::Value::Array),
    ]
}

fn arb_document() -> impl Strategy<Value = serde_json::Value> {
    prop::collection::vec((arb_field(), arb_field_value()), 0..4).prop_map(|entries| {
        let mut map = Map::new();
        for (field, value) in entries {
            map.insert(field.to_string(), value);
        }
        serde_json::Value::Object(map)
    })
}

fn arb_operators() -> impl Strategy<Value = serde_json::Value> {
    let scalars = || prop::collection::vec(arb_scalar(), 1..3);
    prop_oneof![
        arb_scalar(),
        arb_scalar().prop_map(|v| json!({"$e": v})),
        arb_scalar().prop_map(|v| json!({"$ne": v})),
        (-5i64..5, -5i64..5).prop_map(|(lo, hi)| json!({"$gte": lo, "$lte": hi})),
        scalars().prop_map(|v| json!({"$in": v})),
        scalars().prop_map(|v| json!({"$nin": v})),
        scalars().prop_map(|v| json!({"$all": v})),
        any::<bool>().prop_map(|b| json!({"$exists": b})),
        (1i64..4, 0i64..3).prop_map(|(d, r)| json!({"$mod": [d, r]})),
        (-5i64..5).prop_map(|n| json!({"$not": {"$gt": n}})),
    ]
}

fn arb_leaf_query() -> impl Strategy<Value = serde_json::Value> {
    prop::collection::vec((arb_field(), arb_operators()), 0..3).prop_map(|conditions| {
        let mut map = Map::new();
        for (field, operators) in conditions {
            map.insert(field.to_string(), operators);
        }
        serde_json::Value::Object(map)
    })
}

fn arb_query(depth: u32) -> BoxedStrategy<serde_json::Value> {
    if depth == 0 {
        return arb_leaf_query().boxed();
    }

    let logical = (
        prop::sample::select(vec!["$and", "$or", "$nor"]),
        prop::collection::vec(arb_query(depth - 1), 1..3),
    )
        .prop_map(|(op, subqueries)| json!({ op: subqueries }));
    let negated = arb_query(depth - 1).prop_map(|q| json!({"$not": q}));

    prop_oneof![arb_leaf_query(), logical, negated].boxed()
}

fn eval(query: &serde_json::Value, doc: &serde_json::Value) -> bool {
    Evaluator::new()
        .matches(&Value::from(query.clone()), &Value::from(doc.clone()))
        .expect("generated queries are well-formed")
}

/// Moves every top-level value of `doc` one level down, under `suffix`.
fn nest_fields(doc: &serde_json::Value, suffix: &str) -> serde_json::Value {
    let mut map = Map::new();
    if let Some(obj) = doc.as_object() {
        for (field, value) in obj {
            map.insert(field.clone(), json!({ suffix: value }));
        }
    }
    serde_json::Value::Object(map)
}

proptest! {
    #[test]
    fn empty_query_matches_everything(doc in arb_document()) {
        let empty_query = json!({});
        prop_assert!(eval(&empty_query, &doc));
    }

    #[test]
    fn not_negates(query in arb_query(2), doc in arb_document()) {
        prop_assert_eq!(eval(&json!({"$not": query.clone()}), &doc), !eval(&query, &doc));
    }

    #[test]
    fn or_is_negated_nor(
        subqueries in prop::collection::vec(arb_query(1), 1..4),
        doc in arb_document(),
    ) {
        let or = eval(&json!({"$or": subqueries.clone()}), &doc);
        let nor = eval(&json!({"$nor": subqueries}), &doc);
        prop_assert_eq!(or, !nor);
    }

    #[test]
    fn and_of_subqueries_matches_all(
        subqueries in prop::collection::vec(arb_query(1), 1..4),
        doc in arb_document(),
    ) {
        let and = eval(&json!({"$and": subqueries.clone()}), &doc);
        prop_assert_eq!(and, subqueries.iter().all(|q| eval(q, &doc)));
    }

    #[test]
    fn equality_shorthand(field in arb_field(), value in arb_scalar(), doc in arb_document()) {
        let shorthand = eval(&json!({ field: value.clone() }), &doc);
        let explicit = eval(&json!({ field: {"$e": value} }), &doc);
        prop_assert_eq!(shorthand, explicit);
    }

    #[test]
    fn suffix_rescopes_onto_nested_document(query in arb_query(2), doc in arb_document()) {
        let rescoped = append_suffix(&Value::from(query.clone()), "inner");
        let nested = Value::from(nest_fields(&doc, "inner"));
        let direct = eval(&query, &doc);
        prop_assert_eq!(Evaluator::new().matches(&rescoped, &nested).unwrap(), direct);
    }

    #[test]
    fn dependent_fields_are_query_fields(query in arb_query(3)) {
        for field in dependent_fields(&Value::from(query)) {
            prop_assert!(FIELDS.contains(&field.as_str()), "unexpected field {}", field);
        }
    }
}

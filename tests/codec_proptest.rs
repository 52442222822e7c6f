//! Property-based tests for the dataset codec.
//!
//! These tests use proptest to generate arbitrary datasets and tables and
//! verify that conversion preserves values, weights, targets and storage.

use std::collections::HashSet;

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use tabular_bridge::codec::DatasetCodec;
use tabular_bridge::config::CodecConfig;
use tabular_bridge::dataset::{
    CategoricalSchema, ClassificationDataset, Dataset, DatasetSchema, NumericVec, PlainDataset,
    Record, RegressionDataset, SparseVec,
};
use tabular_bridge::table::Attribute;
use tabular_bridge::testing::{assert_records_match, synthetic_table, FixtureTarget};

// =============================================================================
// Arbitrary Dataset Generators
// =============================================================================

/// Strategy for finite numeric values.
fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), -1e6f64..1e6]
}

fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), 0.0f64..10.0]
}

/// Display names that collide with generated column names.
fn arb_display_name() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("numericAttr")),
        Just(Some("category")),
        Just(Some("classTarget")),
        Just(Some("a")),
        Just(Some("a1")),
    ]
}

/// Cardinality and optional display name of one categorical column.
type Column = (usize, Option<&'static str>);

#[derive(Clone, Debug)]
enum Target {
    None,
    Labels(usize),
    Values,
}

fn arb_target() -> impl Strategy<Value = Target> {
    prop_oneof![
        Just(Target::None),
        (1usize..=5).prop_map(Target::Labels),
        Just(Target::Values),
    ]
}

/// Raw parts of one record: categorical values, numeric values, weight and
/// a target draw.
type RecordParts = (Vec<i32>, Vec<f64>, f64, f64);

fn arb_record(cardinalities: Vec<usize>, numeric_count: usize) -> impl Strategy<Value = RecordParts> {
    let categorical: Vec<_> = cardinalities
        .into_iter()
        .map(|k| 0..k as i32)
        .collect();
    (
        categorical,
        prop_vec(arb_value(), numeric_count),
        arb_weight(),
        arb_value(),
    )
}

fn build_numeric(values: Vec<f64>, sparse: bool) -> NumericVec {
    if sparse {
        let dim = values.len();
        let pairs = values.into_iter().enumerate();
        match SparseVec::from_pairs(dim, pairs) {
            Ok(v) => NumericVec::Sparse(v),
            Err(err) => panic!("enumerated pairs are sorted: {err}"),
        }
    } else {
        NumericVec::dense(values)
    }
}

/// Strategy for a dataset of any kind with uniform storage.
fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (
        prop_vec((1usize..=4, arb_display_name()), 0..=12),
        0usize..=4,
        arb_target(),
        any::<bool>(),
    )
        .prop_filter("needs at least one feature", |(cats, numeric, _, _)| {
            !cats.is_empty() || *numeric > 0
        })
        .prop_flat_map(|(columns, numeric_count, target, sparse)| {
            let cardinalities = columns.iter().map(|&(k, _)| k).collect();
            let records = prop_vec(arb_record(cardinalities, numeric_count), 0..20);
            records.prop_map(move |parts| {
                build_dataset(&columns, numeric_count, &target, sparse, parts)
            })
        })
}

fn build_dataset(
    columns: &[Column],
    numeric_count: usize,
    target: &Target,
    sparse: bool,
    parts: Vec<RecordParts>,
) -> Dataset {
    let categorical = columns
        .iter()
        .map(|&(k, name)| {
            let schema = CategoricalSchema::new(k).expect("cardinality is positive");
            match name {
                Some(name) => schema.with_display_name(name),
                None => schema,
            }
        })
        .collect();
    let schema = DatasetSchema::new(categorical, numeric_count);
    let shared = schema.categorical_shared().clone();
    let records = parts.into_iter().map(|(cats, nums, weight, draw)| {
        let record = Record::new(build_numeric(nums, sparse), cats, shared.clone(), weight)
            .expect("generated record is valid");
        (record, draw)
    });

    match *target {
        Target::None => {
            let mut data = PlainDataset::new(schema);
            for (record, _) in records {
                data.push(record).expect("record matches schema");
            }
            data.into()
        }
        Target::Labels(k) => {
            let target = CategoricalSchema::new(k).expect("cardinality is positive");
            let mut data = ClassificationDataset::new(schema, target);
            for (record, draw) in records {
                let label = (draw.abs() as usize % k) as i32;
                data.push(record, label).expect("label in range");
            }
            data.into()
        }
        Target::Values => {
            let mut data = RegressionDataset::new(schema);
            for (record, draw) in records {
                data.push(record, draw).expect("record matches schema");
            }
            data.into()
        }
    }
}

fn cardinalities(data: &Dataset) -> Vec<usize> {
    data.categorical_schemas()
        .iter()
        .map(CategoricalSchema::cardinality)
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn encode_then_decode_preserves_dataset(data in arb_dataset()) {
        let codec = DatasetCodec::default();
        let table = codec.encode(&data).unwrap();
        let decoded = codec.decode(&table).unwrap();

        prop_assert_eq!(decoded.kind(), data.kind());
        prop_assert_eq!(decoded.numeric_count(), data.numeric_count());
        prop_assert_eq!(cardinalities(&decoded), cardinalities(&data));
        prop_assert_eq!(decoded.target_schema().map(CategoricalSchema::cardinality),
            data.target_schema().map(CategoricalSchema::cardinality));
        assert_records_match(decoded.records(), data.records(), "round trip");
        prop_assert!(codec.encode(&decoded).is_ok());

        for (a, b) in decoded.records().iter().zip(data.records()) {
            prop_assert_eq!(a.numeric().is_sparse(), b.numeric().is_sparse());
        }
        match (&decoded, &data) {
            (Dataset::Classification(a), Dataset::Classification(b)) => {
                prop_assert_eq!(a.labels(), b.labels());
            }
            (Dataset::Regression(a), Dataset::Regression(b)) => {
                prop_assert_eq!(a.targets(), b.targets());
            }
            _ => {}
        }
    }

    #[test]
    fn encoded_target_is_last_column(data in arb_dataset()) {
        let table = DatasetCodec::default().encode(&data).unwrap();
        let expected_width = data.schema().n_features() + usize::from(data.has_target());

        prop_assert_eq!(table.n_attributes(), expected_width);
        prop_assert_eq!(table.n_rows(), data.n_records());
        let names: HashSet<&str> = table.attributes().iter().map(Attribute::name).collect();
        prop_assert_eq!(names.len(), expected_width);
        if data.has_target() {
            prop_assert_eq!(table.class_index(), Some(expected_width - 1));
        } else {
            prop_assert_eq!(table.class_index(), None);
        }
    }

    #[test]
    fn decode_is_deterministic_across_threads(
        n_rows in 0usize..200,
        n_numeric in 0usize..5,
        n_nominal in 1usize..4,
        sparse in any::<bool>(),
        n_threads in 2usize..5,
        chunk in 1usize..40,
    ) {
        let table = synthetic_table(n_rows, n_numeric, n_nominal, 3, FixtureTarget::Nominal(2), sparse)
            .unwrap();
        let sequential = DatasetCodec::default().decode(&table).unwrap();
        let config = CodecConfig::builder()
            .n_threads(n_threads)
            .parallel_chunk_rows(chunk)
            .build()
            .unwrap();
        let parallel = DatasetCodec::new(config).decode(&table).unwrap();
        prop_assert_eq!(parallel, sequential);
    }
}

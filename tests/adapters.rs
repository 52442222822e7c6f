//! Integration tests for model adapters, using small in-test models.

mod common;

use common::{init_tracing, load_table, synthetic_table, FixtureTarget};
use tabular_bridge::adapter::{
    CategoricalResults, Capabilities, Capability, Classifier, Clusterer, DatasetClassifierAdapter,
    DatasetRegressorAdapter, ParamError, ParamKind, ParamSpec, ParamValue, Parameterized,
    Regressor, TableClassifierAdapter, TableClustererAdapter, TableClusterer,
    TableModel, TableRegressorAdapter,
};
use tabular_bridge::codec::DatasetCodec;
use tabular_bridge::dataset::{ClassificationDataset, DatasetKind, Record, RegressionDataset};
use tabular_bridge::error::{CodecError, FitError, ModelError};
use tabular_bridge::table::{Instance, Table};

// =============================================================================
// Table-side models
// =============================================================================

/// Predicts the weighted class frequencies, or the weighted mean of a
/// numeric class.
#[derive(Clone, Debug, Default)]
struct Prior {
    capabilities: Capabilities,
    smoothing: f64,
    dist: Vec<f64>,
    built_on: Option<Table>,
}

impl Prior {
    fn with(capabilities: &[Capability]) -> Self {
        Self {
            capabilities: capabilities.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn full() -> Self {
        Self::with(&[
            Capability::NominalAttributes,
            Capability::NumericAttributes,
            Capability::NominalClass,
            Capability::NumericClass,
        ])
    }
}

impl Parameterized for Prior {
    const PARAMETERS: &'static [ParamSpec<Self>] = &[ParamSpec::new(
        "smoothing",
        ParamKind::Float,
        "pseudo-count added to every class",
        |m: &Prior| ParamValue::Float(m.smoothing),
        |m: &mut Prior, v: &ParamValue| {
            let smoothing = v.as_float()?;
            if smoothing < 0.0 {
                return Err(ParamError::Invalid {
                    name: "smoothing".into(),
                    reason: "must be non-negative".into(),
                });
            }
            m.smoothing = smoothing;
            Ok(())
        },
    )];
}

impl TableModel for Prior {
    fn build(&mut self, table: &Table) -> Result<(), ModelError> {
        let class = table.class_index().ok_or("no class column")?;
        let attr = table.attribute(class);
        if attr.is_nominal() {
            let mut counts = vec![self.smoothing; attr.num_values()];
            for row in table.rows() {
                counts[row.value(class) as usize] += row.weight();
            }
            let total: f64 = counts.iter().sum();
            self.dist = counts.into_iter().map(|c| c / total).collect();
        } else {
            let total: f64 = table.rows().iter().map(Instance::weight).sum();
            let sum: f64 = table
                .rows()
                .iter()
                .map(|r| r.weight() * r.value(class))
                .sum();
            self.dist = vec![sum / total];
        }
        self.built_on = Some(table.clone());
        Ok(())
    }

    fn distribution_for_instance(&self, row: &Instance) -> Result<Vec<f64>, ModelError> {
        let class = row.class_index().ok_or("row has no class context")?;
        if !row.is_missing(class) {
            return Err("class value of a prediction row must be missing".into());
        }
        Ok(self.dist.clone())
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities.clone()
    }

    fn handles_weights(&self) -> bool {
        true
    }
}

/// Fails every prediction.
#[derive(Clone, Debug)]
struct Broken;

impl TableModel for Broken {
    fn build(&mut self, _table: &Table) -> Result<(), ModelError> {
        Ok(())
    }

    fn distribution_for_instance(&self, _row: &Instance) -> Result<Vec<f64>, ModelError> {
        Err("broken model".into())
    }

    fn capabilities(&self) -> Capabilities {
        Prior::full().capabilities
    }
}

/// Splits rows on the first column's mean.
#[derive(Clone, Debug, Default)]
struct MeanSplit {
    threshold: f64,
    n_attributes: usize,
}

impl TableClusterer for MeanSplit {
    fn build(&mut self, table: &Table) -> Result<(), ModelError> {
        if table.class_index().is_some() {
            return Err("clusterer got a class column".into());
        }
        let n = table.n_rows().max(1) as f64;
        self.threshold = table.rows().iter().map(|r| r.value(0)).sum::<f64>() / n;
        self.n_attributes = table.n_attributes();
        Ok(())
    }

    fn cluster_instance(&self, row: &Instance) -> Result<usize, ModelError> {
        Ok(usize::from(row.value(0) > self.threshold))
    }
}

// =============================================================================
// Canonical-side models
// =============================================================================

/// Label frequencies, ignoring features.
#[derive(Clone, Debug, Default)]
struct LabelCounts {
    counts: Vec<f64>,
}

impl Classifier for LabelCounts {
    fn train(&mut self, data: &ClassificationDataset) -> Result<(), FitError> {
        self.counts = vec![0.0; data.n_classes()];
        for &label in data.labels() {
            self.counts[label as usize] += 1.0;
        }
        Ok(())
    }

    fn classify(&self, _record: &Record) -> CategoricalResults {
        CategoricalResults::from_probs(self.counts.clone())
    }
}

/// Weighted mean target plus the record's first numeric value.
#[derive(Clone, Debug, Default)]
struct MeanOffset {
    mean: f64,
}

impl Regressor for MeanOffset {
    fn train(&mut self, data: &RegressionDataset) -> Result<(), FitError> {
        if data.is_empty() {
            return Err(FitError::model("empty training set"));
        }
        let total: f64 = data.records().iter().map(Record::weight).sum();
        let sum: f64 = data
            .records()
            .iter()
            .zip(data.targets())
            .map(|(r, t)| r.weight() * t)
            .sum();
        self.mean = sum / total;
        Ok(())
    }

    fn regress(&self, record: &Record) -> f64 {
        self.mean + record.numeric().get(0)
    }

    fn supports_weighted_data(&self) -> bool {
        true
    }
}

// =============================================================================
// Table models as canonical models
// =============================================================================

#[test]
fn classifier_adapter_requires_nominal_class() {
    let err = TableClassifierAdapter::new(Prior::with(&[Capability::NumericClass])).unwrap_err();
    assert!(matches!(
        err,
        FitError::Unsupported(DatasetKind::Classification)
    ));

    let err = TableRegressorAdapter::new(Prior::with(&[Capability::NominalClass])).unwrap_err();
    assert!(matches!(err, FitError::Unsupported(DatasetKind::Regression)));
}

#[test]
fn classifier_adapter_trains_on_encoded_table() {
    init_tracing();
    let codec = DatasetCodec::default();
    let data = codec
        .decode_classification(&load_table("nominal_class"))
        .unwrap();

    let mut adapter = TableClassifierAdapter::new(Prior::full()).unwrap();
    adapter.train(&data).unwrap();
    assert_eq!(adapter.n_classes(), 2);
    assert!(adapter.supports_weighted_data());

    let built = adapter.model().built_on.as_ref().unwrap();
    assert_eq!(built.class_index(), Some(built.n_attributes() - 1));
    assert_eq!(adapter.header().unwrap(), built.header());

    // weights: no = 1 + 1, yes = 3 + 1 + 0.25
    let scores = adapter.classify(&data.records()[0]);
    assert_eq!(scores.size(), 2);
    assert_eq!(scores.most_likely(), Some(1));
    assert!((scores.prob(0) - 2.0 / 6.25).abs() < 1e-12);
}

#[test]
fn classifier_adapter_checks_capabilities() {
    let data = DatasetCodec::default()
        .decode_classification(&load_table("nominal_class"))
        .unwrap();
    let model = Prior::with(&[Capability::NumericAttributes, Capability::NominalClass]);
    let mut adapter = TableClassifierAdapter::new(model).unwrap();
    assert!(matches!(
        adapter.train(&data),
        Err(FitError::MissingCapability(Capability::NominalAttributes))
    ));
}

#[test]
fn classify_falls_back_to_zero_scores() {
    init_tracing();
    let data = DatasetCodec::default()
        .decode_classification(&load_table("nominal_class"))
        .unwrap();
    let mut adapter = TableClassifierAdapter::new(Broken).unwrap();
    adapter.train(&data).unwrap();

    let scores = adapter.classify(&data.records()[1]);
    assert_eq!(scores, CategoricalResults::new(2));
}

#[test]
fn regressor_adapter_predicts_and_falls_back_to_nan() {
    let data = DatasetCodec::default()
        .decode_regression(&load_table("numeric_target"))
        .unwrap();

    let mut adapter = TableRegressorAdapter::new(Prior::full()).unwrap();
    adapter.train(&data).unwrap();
    let expected = (250000.0 + 1.5 * 612500.5 + 99999.99) / 3.5;
    assert!((adapter.regress(&data.records()[0]) - expected).abs() < 1e-6);

    let mut broken = TableRegressorAdapter::new(Broken).unwrap();
    broken.train(&data).unwrap();
    assert!(broken.regress(&data.records()[0]).is_nan());
}

#[test]
fn untrained_adapters_fall_back() {
    let record = Record::numeric_only(tabular_bridge::dataset::NumericVec::dense(vec![1.0]));
    let classifier = TableClassifierAdapter::new(Prior::full()).unwrap();
    assert_eq!(classifier.classify(&record).size(), 0);
    let regressor = TableRegressorAdapter::new(Prior::full()).unwrap();
    assert!(regressor.regress(&record).is_nan());
}

#[test]
fn clusterer_adapter_strips_class_column() {
    let table = synthetic_table(12, 2, 1, 3, FixtureTarget::Nominal(2), false).unwrap();
    let data = DatasetCodec::default().decode(&table).unwrap();

    let mut adapter = TableClustererAdapter::new(MeanSplit::default());
    let clusters = adapter.cluster(&data).unwrap();
    assert_eq!(clusters.len(), data.n_records());
    assert_eq!(adapter.model().n_attributes, 3);

    // Column 0 of the encoded table is the categorical column.
    let first: Vec<f64> = data
        .records()
        .iter()
        .map(|r| f64::from(r.categorical()[0]))
        .collect();
    let mean = first.iter().sum::<f64>() / first.len() as f64;
    let expected: Vec<usize> = first.iter().map(|&v| usize::from(v > mean)).collect();
    assert_eq!(clusters, expected);
}

#[test]
fn adapters_forward_parameters_and_clone_deeply() {
    let mut adapter = TableClassifierAdapter::new(Prior::full()).unwrap();
    assert_eq!(adapter.parameter_specs().len(), 1);
    adapter
        .set_parameter("smoothing", ParamValue::Float(1.0))
        .unwrap();

    let copy = adapter.clone();
    adapter
        .set_parameter("smoothing", ParamValue::Int(3))
        .unwrap();

    assert_eq!(adapter.parameter("smoothing"), Ok(ParamValue::Float(3.0)));
    assert_eq!(
        copy.parameters(),
        vec![("smoothing", ParamValue::Float(1.0))]
    );
    assert_eq!(
        adapter.set_parameter("smoothing", ParamValue::Float(-1.0)),
        Err(ParamError::Invalid {
            name: "smoothing".into(),
            reason: "must be non-negative".into()
        })
    );
    assert!(matches!(
        adapter.parameter("depth"),
        Err(ParamError::Unknown(_))
    ));
}

// =============================================================================
// Canonical models as table models
// =============================================================================

#[test]
fn dataset_classifier_adapter_builds_from_table() {
    let table = load_table("nominal_class");
    let mut adapter = DatasetClassifierAdapter::new(LabelCounts::default());
    adapter.build(&table).unwrap();

    let dist = adapter.distribution_for_instance(table.row(0)).unwrap();
    assert_eq!(dist, vec![0.4, 0.6]);
    assert_eq!(adapter.classify_instance(table.row(0)).unwrap(), 1.0);
    assert!(!adapter.handles_weights());
    assert!(adapter.supports(Capability::NominalClass));
}

#[test]
fn dataset_classifier_adapter_rejects_numeric_class() {
    let table = load_table("numeric_target");
    let mut adapter = DatasetClassifierAdapter::new(LabelCounts::default());
    let err = adapter.build(&table).unwrap_err();
    assert_eq!(
        err.downcast_ref::<CodecError>(),
        Some(&CodecError::KindMismatch {
            expected: DatasetKind::Classification,
            actual: DatasetKind::Regression,
        })
    );
}

#[test]
fn dataset_adapters_need_attached_rows() {
    let table = load_table("nominal_class");
    let mut adapter = DatasetClassifierAdapter::new(LabelCounts::default());
    adapter.build(&table).unwrap();

    let mut row = table.row(0).clone();
    row.detach();
    assert!(adapter.distribution_for_instance(&row).is_err());
}

#[test]
fn dataset_regressor_adapter_round_trip() {
    let table = load_table("numeric_target");
    let mut adapter = DatasetRegressorAdapter::new(MeanOffset::default());
    adapter.build(&table).unwrap();
    assert!(adapter.handles_weights());

    let mean = (250000.0 + 1.5 * 612500.5 + 99999.99) / 3.5;
    let prediction = adapter.classify_instance(table.row(1)).unwrap();
    assert!((prediction - (mean + 5.0)).abs() < 1e-6);
    assert_eq!(
        adapter.distribution_for_instance(table.row(1)).unwrap(),
        vec![prediction]
    );

    let err = adapter.build(&load_table("nominal_class")).unwrap_err();
    assert!(err.downcast_ref::<CodecError>().is_some());
}

#[test]
fn adapters_compose_both_ways() {
    // Canonical classifier -> table model -> canonical classifier.
    let inner = DatasetClassifierAdapter::new(LabelCounts::default());
    let mut outer = TableClassifierAdapter::new(inner).unwrap();
    let data = DatasetCodec::default()
        .decode_classification(&load_table("nominal_class"))
        .unwrap();
    outer.train(&data).unwrap();

    let scores = outer.classify(&data.records()[0]);
    assert_eq!(scores.probs(), &[0.4, 0.6]);
}

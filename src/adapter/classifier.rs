//! Classifier adapters in both directions.

use tracing::{debug, warn};

use super::capabilities::{Capabilities, Capability};
use super::results::CategoricalResults;
use super::traits::{Classifier, TableModel};
use crate::codec::{DatasetCodec, RecordCodec};
use crate::dataset::{ClassificationDataset, DatasetKind, Record};
use crate::error::{FitError, ModelError};
use crate::table::{Instance, Table, TableHeader};

// =============================================================================
// Table model as canonical classifier
// =============================================================================

/// Exposes a [`TableModel`] with a nominal class as a [`Classifier`].
#[derive(Clone, Debug)]
pub struct TableClassifierAdapter<M> {
    pub(super) model: M,
    codec: DatasetCodec,
    template: Option<Table>,
    n_classes: usize,
}

impl<M: TableModel> TableClassifierAdapter<M> {
    /// Wrap `model`.
    ///
    /// # Errors
    ///
    /// [`FitError::Unsupported`] if the model cannot predict a nominal class.
    pub fn new(model: M) -> Result<Self, FitError> {
        Self::with_codec(model, DatasetCodec::default())
    }

    pub fn with_codec(model: M, codec: DatasetCodec) -> Result<Self, FitError> {
        if !model.supports(Capability::NominalClass) {
            return Err(FitError::Unsupported(DatasetKind::Classification));
        }
        Ok(Self {
            model,
            codec,
            template: None,
            n_classes: 0,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_inner(self) -> M {
        self.model
    }

    /// Header of the last training table.
    pub fn header(&self) -> Option<&TableHeader> {
        self.template.as_ref().map(Table::header)
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&self, record: &Record) -> Result<CategoricalResults, ModelError> {
        let template = self
            .template
            .as_ref()
            .ok_or("classifier has not been trained")?;
        let row = self
            .codec
            .record_to_instance(record, template.header_shared())?;
        let dist = self.model.distribution_for_instance(&row)?;
        Ok(CategoricalResults::from_probs(dist))
    }
}

impl<M: TableModel> Classifier for TableClassifierAdapter<M> {
    fn train(&mut self, data: &ClassificationDataset) -> Result<(), FitError> {
        let table = self.codec.encode_classification(data)?;
        self.model.capabilities().check(&table)?;
        self.model.build(&table).map_err(FitError::Model)?;
        self.template = Some(table.empty_like());
        self.n_classes = data.n_classes();
        debug!(rows = table.n_rows(), classes = self.n_classes, "trained table classifier");
        Ok(())
    }

    /// Scores from the wrapped model. Any failure yields all-zero scores.
    fn classify(&self, record: &Record) -> CategoricalResults {
        self.predict(record).unwrap_or_else(|err| {
            warn!(error = %err, "classification failed, returning zero scores");
            CategoricalResults::new(self.n_classes)
        })
    }

    fn supports_weighted_data(&self) -> bool {
        self.model.handles_weights()
    }
}

// =============================================================================
// Canonical classifier as table model
// =============================================================================

/// Exposes a [`Classifier`] as a [`TableModel`].
#[derive(Clone, Debug)]
pub struct DatasetClassifierAdapter<C> {
    pub(super) classifier: C,
    codec: DatasetCodec,
}

impl<C: Classifier> DatasetClassifierAdapter<C> {
    pub fn new(classifier: C) -> Self {
        Self::with_codec(classifier, DatasetCodec::default())
    }

    pub fn with_codec(classifier: C, codec: DatasetCodec) -> Self {
        Self { classifier, codec }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    pub fn into_inner(self) -> C {
        self.classifier
    }
}

/// Record for a prediction row, resolved through the row's table.
pub(super) fn attached_record(row: &Instance) -> Result<Record, ModelError> {
    let header = row.context().ok_or("instance is not attached to a table")?;
    Ok(RecordCodec::instance_to_record(row, header.attributes())?)
}

impl<C: Classifier> TableModel for DatasetClassifierAdapter<C> {
    /// Decode `table` and train the classifier.
    ///
    /// Tables whose class is not nominal fail with
    /// [`CodecError::KindMismatch`](crate::error::CodecError::KindMismatch).
    fn build(&mut self, table: &Table) -> Result<(), ModelError> {
        let data = self.codec.decode_classification(table)?;
        self.classifier.train(&data)?;
        Ok(())
    }

    /// Normalized class scores.
    fn distribution_for_instance(&self, row: &Instance) -> Result<Vec<f64>, ModelError> {
        let record = attached_record(row)?;
        let mut scores = self.classifier.classify(&record);
        scores.normalize();
        Ok(scores.into_vec())
    }

    fn capabilities(&self) -> Capabilities {
        [
            Capability::NominalAttributes,
            Capability::NumericAttributes,
            Capability::NominalClass,
        ]
        .into_iter()
        .collect()
    }

    fn handles_weights(&self) -> bool {
        self.classifier.supports_weighted_data()
    }
}


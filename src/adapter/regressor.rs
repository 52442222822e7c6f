//! Regressor adapters in both directions.

use tracing::{debug, warn};

use super::capabilities::{Capabilities, Capability};
use super::classifier::attached_record;
use super::traits::{Regressor, TableModel};
use crate::codec::DatasetCodec;
use crate::dataset::{DatasetKind, Record, RegressionDataset};
use crate::error::{FitError, ModelError};
use crate::table::{Instance, Table, TableHeader};

/// Exposes a [`TableModel`] with a numeric class as a [`Regressor`].
#[derive(Clone, Debug)]
pub struct TableRegressorAdapter<M> {
    pub(super) model: M,
    codec: DatasetCodec,
    template: Option<Table>,
}

impl<M: TableModel> TableRegressorAdapter<M> {
    /// Wrap `model`.
    ///
    /// # Errors
    ///
    /// [`FitError::Unsupported`] if the model cannot predict a numeric class.
    pub fn new(model: M) -> Result<Self, FitError> {
        Self::with_codec(model, DatasetCodec::default())
    }

    pub fn with_codec(model: M, codec: DatasetCodec) -> Result<Self, FitError> {
        if !model.supports(Capability::NumericClass) {
            return Err(FitError::Unsupported(DatasetKind::Regression));
        }
        Ok(Self {
            model,
            codec,
            template: None,
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

    pub fn header(&self) -> Option<&TableHeader> {
        self.template.as_ref().map(Table::header)
    }

    fn predict(&self, record: &Record) -> Result<f64, ModelError> {
        let template = self
            .template
            .as_ref()
            .ok_or("regressor has not been trained")?;
        let row = self
            .codec
            .record_to_instance(record, template.header_shared())?;
        self.model.classify_instance(&row)
    }
}

impl<M: TableModel> Regressor for TableRegressorAdapter<M> {
    fn train(&mut self, data: &RegressionDataset) -> Result<(), FitError> {
        let table = self.codec.encode_regression(data)?;
        self.model.capabilities().check(&table)?;
        self.model.build(&table).map_err(FitError::Model)?;
        self.template = Some(table.empty_like());
        debug!(rows = table.n_rows(), "trained table regressor");
        Ok(())
    }

    /// Prediction of the wrapped model, `NaN` on failure.
    fn regress(&self, record: &Record) -> f64 {
        self.predict(record).unwrap_or_else(|err| {
            warn!(error = %err, "regression failed, returning NaN");
            f64::NAN
        })
    }

    fn supports_weighted_data(&self) -> bool {
        self.model.handles_weights()
    }
}

/// Exposes a [`Regressor`] as a [`TableModel`].
#[derive(Clone, Debug)]
pub struct DatasetRegressorAdapter<R> {
    pub(super) regressor: R,
    codec: DatasetCodec,
}

impl<R: Regressor> DatasetRegressorAdapter<R> {
    pub fn new(regressor: R) -> Self {
        Self::with_codec(regressor, DatasetCodec::default())
    }

    pub fn with_codec(regressor: R, codec: DatasetCodec) -> Self {
        Self { regressor, codec }
    }

    pub fn regressor(&self) -> &R {
        &self.regressor
    }

    pub fn regressor_mut(&mut self) -> &mut R {
        &mut self.regressor
    }

    pub fn into_inner(self) -> R {
        self.regressor
    }
}

impl<R: Regressor> TableModel for DatasetRegressorAdapter<R> {
    fn build(&mut self, table: &Table) -> Result<(), ModelError> {
        let data = self.codec.decode_regression(table)?;
        self.regressor.train(&data)?;
        Ok(())
    }

    /// Single predicted value.
    fn distribution_for_instance(&self, row: &Instance) -> Result<Vec<f64>, ModelError> {
        let record = attached_record(row)?;
        Ok(vec![self.regressor.regress(&record)])
    }

    fn classify_instance(&self, row: &Instance) -> Result<f64, ModelError> {
        let record = attached_record(row)?;
        Ok(self.regressor.regress(&record))
    }

    fn capabilities(&self) -> Capabilities {
        [
            Capability::NominalAttributes,
            Capability::NumericAttributes,
            Capability::NumericClass,
        ]
        .into_iter()
        .collect()
    }

    fn handles_weights(&self) -> bool {
        self.regressor.supports_weighted_data()
    }
}

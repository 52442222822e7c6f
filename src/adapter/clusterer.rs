//! Table clusterers as canonical clusterers.

use tracing::debug;

use super::traits::{Clusterer, TableClusterer};
use crate::codec::DatasetCodec;
use crate::dataset::Dataset;
use crate::error::FitError;

/// Exposes a [`TableClusterer`] as a [`Clusterer`].
///
/// Any target column is removed before the model sees the table.
#[derive(Clone, Debug)]
pub struct TableClustererAdapter<M> {
    pub(super) model: M,
    codec: DatasetCodec,
}

impl<M: TableClusterer> TableClustererAdapter<M> {
    pub fn new(model: M) -> Self {
        Self::with_codec(model, DatasetCodec::default())
    }

    pub fn with_codec(model: M, codec: DatasetCodec) -> Self {
        Self { model, codec }
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
}

impl<M: TableClusterer> Clusterer for TableClustererAdapter<M> {
    fn cluster(&mut self, data: &Dataset) -> Result<Vec<usize>, FitError> {
        let mut table = self.codec.encode(data)?;
        if let Some(class) = table.class_index() {
            table = table.without_attribute(class)?;
        }
        self.model.build(&table).map_err(FitError::Model)?;

        let clusters = table
            .rows()
            .iter()
            .map(|row| self.model.cluster_instance(row).map_err(FitError::Model))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = clusters.len(), "clustered dataset");
        Ok(clusters)
    }
}

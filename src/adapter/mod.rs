//! Models of one representation exposed as models of the other.
//!
//! The training algorithms live outside this crate. Two pairs of traits
//! describe them:
//!
//! - canonical side: [`Classifier`], [`Regressor`], [`Clusterer`]
//! - table side: [`TableModel`], [`TableClusterer`]
//!
//! `Table*Adapter` types wrap a table model as a canonical model, converting
//! training data with [`DatasetCodec::encode`](crate::codec::DatasetCodec::encode).
//! `Dataset*Adapter` types go the other way with
//! [`DatasetCodec::decode`](crate::codec::DatasetCodec::decode).
//!
//! Adapters are `Clone` whenever the wrapped model is, and forward
//! parameter access to models implementing [`Parameterized`].

mod capabilities;
mod classifier;
mod clusterer;
mod params;
mod regressor;
mod results;
mod traits;

pub use capabilities::{Capabilities, Capability};
pub use classifier::{DatasetClassifierAdapter, TableClassifierAdapter};
pub use clusterer::TableClustererAdapter;
pub use params::{ParamError, ParamKind, ParamSpec, ParamValue, Parameterized};
pub use regressor::{DatasetRegressorAdapter, TableRegressorAdapter};
pub use results::CategoricalResults;
pub use traits::{Classifier, Clusterer, Regressor, TableClusterer, TableModel};

/// Parameter access on an adapter, forwarded to the wrapped model.
macro_rules! forward_parameters {
    ($($adapter:ident => $field:ident),* $(,)?) => {
        $(
            impl<M: Parameterized> $adapter<M> {
                /// Declared parameters of the wrapped model.
                pub fn parameter_specs(&self) -> &'static [ParamSpec<M>] {
                    M::PARAMETERS
                }

                /// Current parameter values of the wrapped model.
                pub fn parameters(&self) -> Vec<(&'static str, ParamValue)> {
                    self.$field.parameters()
                }

                pub fn parameter(&self, name: &str) -> Result<ParamValue, ParamError> {
                    self.$field.parameter(name)
                }

                pub fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
                    self.$field.set_parameter(name, value)
                }
            }
        )*
    };
}

forward_parameters! {
    TableClassifierAdapter => model,
    TableRegressorAdapter => model,
    TableClustererAdapter => model,
    DatasetClassifierAdapter => classifier,
    DatasetRegressorAdapter => regressor,
}

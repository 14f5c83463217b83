//! SMOTE core library.
//!
//! Generates synthetic minority-class points by interpolating between each
//! source point and one of its `k` nearest neighbours.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod datasource;
pub mod distance;
mod error;
mod neighbours;
mod rate;
mod result;
mod sample;
mod sampler;
mod session;
mod smote;
mod synthetic;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::SmoteBuilder,
    datasource::DataSource,
    distance::{Distance, DistanceError, euclidean_distance},
    error::{
        DataSourceError, DataSourceErrorCode, ErrorCategory, Result, SmoteError, SmoteErrorCode,
    },
    neighbours::{NeighbourFinder, NeighbourList, NeighbourRecord},
    rate::OversamplingRate,
    result::{Provenance, SyntheticSample},
    sample::Sample,
    sampler::{Undersampled, random_subset, undersample},
    session::Session,
    smote::{Smote, smote},
    synthetic::{SyntheticGenerator, interpolate},
};

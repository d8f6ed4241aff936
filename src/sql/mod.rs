//! Azure SQL recommended elastic pools.
//!
//! Read-only access to the pool sizing recommendations of a server through
//! [`RecommendedElasticPoolsClient`].

mod models;
mod recommended_elastic_pools;

pub use models::{
    DatabaseInner, DatabaseProperties, RecommendedElasticPoolInner, RecommendedElasticPoolMetric,
    RecommendedElasticPoolProperties,
};
pub use recommended_elastic_pools::{RecommendedElasticPoolsClient, API_VERSION};

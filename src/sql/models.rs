//! Wire models of SQL recommended elastic pools.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One usage sample of a recommended pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedElasticPoolMetric {
    /// Sample time, ISO 8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// DTUs used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtu: Option<f64>,
    /// Storage used in gigabytes.
    #[serde(rename = "sizeGB", default, skip_serializing_if = "Option::is_none")]
    pub size_gb: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    /// Maximum size, as the service's decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size_bytes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_pool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_service_objective_name: Option<String>,
}

/// A database of a recommended pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<DatabaseProperties>,
}

/// Sizing recommendation of a pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedElasticPoolProperties {
    /// Edition of the pool (`Basic`, `Standard`, `Premium`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_edition: Option<String>,
    /// Recommended pool DTUs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_dtu_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_dtu_max: Option<f64>,
    /// Recommended storage in megabytes.
    #[serde(rename = "storageMB", default, skip_serializing_if = "Option::is_none")]
    pub storage_mb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_period_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_period_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_observed_dtu: Option<f64>,
    #[serde(rename = "maxObservedStorageMB", default, skip_serializing_if = "Option::is_none")]
    pub max_observed_storage_mb: Option<f64>,
    /// Databases proposed for the pool; only returned by `get`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub databases: Vec<DatabaseInner>,
    /// Usage samples; only returned by `get`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<RecommendedElasticPoolMetric>,
}

/// A recommended elastic pool of a SQL server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedElasticPoolInner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<RecommendedElasticPoolProperties>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pool_decodes_unit_suffixed_fields() {
        let pool: RecommendedElasticPoolInner = serde_json::from_value(json!({
            "name": "ElasticPool1",
            "type": "Microsoft.Sql/servers/recommendedElasticPools",
            "properties": {
                "databaseEdition": "Standard",
                "dtu": 100.0,
                "storageMB": 1024.5,
                "maxObservedStorageMB": 512.0,
                "metrics": [{ "dateTime": "2016-01-01T00:00:00Z", "dtu": 1.5, "sizeGB": 0.25 }]
            }
        }))
        .unwrap();

        let properties = pool.properties.unwrap();
        assert_eq!(properties.database_edition.as_deref(), Some("Standard"));
        assert_eq!(properties.storage_mb, Some(1024.5));
        assert_eq!(properties.max_observed_storage_mb, Some(512.0));
        assert_eq!(properties.metrics[0].size_gb, Some(0.25));
        assert!(properties.databases.is_empty());
    }
}

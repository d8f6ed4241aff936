//! Operations on the recommended elastic pools of a SQL server.
//!
//! Every operation is a GET answered with 200. The list operations return
//! the whole collection in one response.

use crate::clients::HttpMethod;
use crate::config::ApiVersion;
use crate::rest::{require_body, Operation, RequestSpec, ResponseTable, ServiceClient};
use crate::sql::models::{DatabaseInner, RecommendedElasticPoolInner, RecommendedElasticPoolMetric};

/// The api-version of every recommended elastic pool operation.
pub const API_VERSION: ApiVersion = ApiVersion::from_static("2014-04-01");

const POOLS: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Sql/servers/{serverName}/recommendedElasticPools";
const POOL: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Sql/servers/{serverName}/recommendedElasticPools/{recommendedElasticPoolName}";
const DATABASES: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Sql/servers/{serverName}/recommendedElasticPools/{recommendedElasticPoolName}/databases";
const DATABASE: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Sql/servers/{serverName}/recommendedElasticPools/{recommendedElasticPoolName}/databases/{databaseName}";
const METRICS: &str = "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Sql/servers/{serverName}/recommendedElasticPools/{recommendedElasticPoolName}/metrics";

/// Low-level operations on recommended elastic pools.
#[derive(Debug, Clone)]
pub struct RecommendedElasticPoolsClient {
    client: ServiceClient,
}

impl RecommendedElasticPoolsClient {
    /// Creates a recommended elastic pools client.
    #[must_use]
    pub const fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    fn spec(
        name: &'static str,
        template: &'static str,
        resource_group: &str,
        server: &str,
    ) -> RequestSpec {
        RequestSpec::with_template(name, HttpMethod::Get, template, API_VERSION)
            .param("resourceGroupName", resource_group)
            .param("serverName", server)
    }

    /// Reads one recommended pool with its databases and metrics.
    pub fn get(
        &self,
        resource_group: &str,
        server: &str,
        pool: &str,
    ) -> Operation<RecommendedElasticPoolInner> {
        let spec = Self::spec("RecommendedElasticPools.get", POOL, resource_group, server)
            .param("recommendedElasticPoolName", pool);
        self.client
            .send::<RecommendedElasticPoolInner>(spec, ResponseTable::OK)
            .and_then(|response| require_body(response.status(), response.into_body()))
    }

    /// Reads one database of a recommended pool.
    pub fn get_databases(
        &self,
        resource_group: &str,
        server: &str,
        pool: &str,
        database: &str,
    ) -> Operation<DatabaseInner> {
        let spec = Self::spec(
            "RecommendedElasticPools.getDatabases",
            DATABASE,
            resource_group,
            server,
        )
        .param("recommendedElasticPoolName", pool)
        .param("databaseName", database);
        self.client
            .send::<DatabaseInner>(spec, ResponseTable::OK)
            .and_then(|response| require_body(response.status(), response.into_body()))
    }

    /// Lists the recommended pools of a server.
    pub fn list_by_server(
        &self,
        resource_group: &str,
        server: &str,
    ) -> Operation<Vec<RecommendedElasticPoolInner>> {
        let spec = Self::spec("RecommendedElasticPools.list", POOLS, resource_group, server);
        self.client.list(spec, ResponseTable::OK).collect_all()
    }

    /// Lists the databases of a recommended pool.
    pub fn list_databases(
        &self,
        resource_group: &str,
        server: &str,
        pool: &str,
    ) -> Operation<Vec<DatabaseInner>> {
        let spec = Self::spec(
            "RecommendedElasticPools.listDatabases",
            DATABASES,
            resource_group,
            server,
        )
        .param("recommendedElasticPoolName", pool);
        self.client.list(spec, ResponseTable::OK).collect_all()
    }

    /// Lists the usage samples of a recommended pool.
    pub fn list_metrics(
        &self,
        resource_group: &str,
        server: &str,
        pool: &str,
    ) -> Operation<Vec<RecommendedElasticPoolMetric>> {
        let spec = Self::spec(
            "RecommendedElasticPools.listMetrics",
            METRICS,
            resource_group,
            server,
        )
        .param("recommendedElasticPoolName", pool);
        self.client.list(spec, ResponseTable::OK).collect_all()
    }
}

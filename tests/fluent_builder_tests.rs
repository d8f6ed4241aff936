//! Integration tests for the staged builders.
//!
//! These tests verify that builders stage children locally and that commits
//! issue the parent call first, then one call per child in attach order.

mod common;

use arm_fluent::cdn::{GeoFilterAction, Profile, Profiles, SkuName};
use arm_fluent::rest::{CommitAction, Constituent, ValidationError};
use arm_fluent::{ArmError, Region};
use common::{client, rg_url, SpyTransport};
use serde_json::json;
use std::sync::Arc;

fn profile_json(name: &str) -> serde_json::Value {
    json!({
        "id": format!("/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Cdn/profiles/{name}"),
        "name": name,
        "type": "Microsoft.Cdn/profiles",
        "location": "centralus",
        "sku": { "name": "Standard_Akamai" },
        "properties": { "resourceState": "Active", "provisioningState": "Succeeded" }
    })
}

fn endpoint_json(name: &str, origin: &str) -> serde_json::Value {
    json!({
        "name": name,
        "location": "centralus",
        "properties": {
            "hostName": format!("{name}.azureedge.net"),
            "isHttpAllowed": true,
            "origins": [{ "name": "origin", "properties": { "hostName": origin } }]
        }
    })
}

fn conflict() -> serde_json::Value {
    json!({ "error": { "code": "Conflict", "message": "Endpoint name already taken" } })
}

fn profile_url(name: &str) -> String {
    format!("{}/providers/Microsoft.Cdn/profiles/{name}", rg_url("rg1"))
}

/// Loads profile `p1` with endpoints `ep1` and `ep2`.
async fn load_profile(spy: &Arc<SpyTransport>) -> Profile {
    spy.respond(200, profile_json("p1")).respond(
        200,
        json!({ "value": [
            endpoint_json("ep1", "one.example.com"),
            endpoint_json("ep2", "two.example.com")
        ] }),
    );
    Profiles::new(client(spy))
        .get_by_resource_group("rg1", "p1")
        .await
        .unwrap()
}

// ============================================================================
// Definition
// ============================================================================

#[tokio::test]
async fn test_attach_stages_one_child_without_requests() {
    let spy = SpyTransport::new();

    let definition = Profiles::new(client(&spy))
        .define("p1")
        .with_region(Region::us_central())
        .with_existing_resource_group("rg1")
        .with_standard_akamai_sku()
        .define_new_endpoint("ep1")
        .with_origin("origin.example.com")
        .with_http_port(8080)
        .attach();

    assert_eq!(definition.pending_endpoints().len(), 1);
    assert!(definition.pending_endpoints().contains("ep1"));
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_create_without_children_issues_one_call() {
    let spy = SpyTransport::new();
    spy.respond(201, profile_json("p1"));

    let profile = Profiles::new(client(&spy))
        .define("p1")
        .with_region(Region::us_central())
        .with_existing_resource_group("rg1")
        .with_standard_akamai_sku()
        .with_tag("env", "test")
        .create()
        .await
        .unwrap();

    assert_eq!(
        spy.lines(),
        vec![format!("PUT {}?api-version=2016-04-02", profile_url("p1"))]
    );
    let sent: serde_json::Value =
        serde_json::from_str(spy.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(sent["location"], "centralus");
    assert_eq!(sent["sku"]["name"], "Standard_Akamai");
    assert_eq!(sent["tags"]["env"], "test");

    assert_eq!(profile.name(), "p1");
    assert_eq!(profile.resource_group_name(), "rg1");
    assert_eq!(profile.sku(), Some(SkuName::StandardAkamai));
    assert_eq!(profile.resource_state(), Some("Active"));
    assert!(profile.endpoints().is_empty());
}

#[tokio::test]
async fn test_create_with_two_children_issues_three_calls_in_order() {
    let spy = SpyTransport::new();
    spy.respond(201, profile_json("p1"))
        .respond(201, endpoint_json("ep1", "one.example.com"))
        .respond(201, endpoint_json("ep2", "two.example.com"));

    let mut definition = Profiles::new(client(&spy))
        .define("p1")
        .with_region(Region::us_central())
        .with_existing_resource_group("rg1")
        .with_standard_akamai_sku()
        .define_new_endpoint("ep1")
        .with_origin("one.example.com")
        .attach()
        .define_new_endpoint("ep2")
        .with_origin("two.example.com")
        .with_geo_filter("/pictures/", GeoFilterAction::Block, "US")
        .attach();
    let profile = definition.create().await.unwrap();

    assert_eq!(
        spy.lines(),
        vec![
            format!("PUT {}?api-version=2016-04-02", profile_url("p1")),
            format!("PUT {}/endpoints/ep1?api-version=2016-04-02", profile_url("p1")),
            format!("PUT {}/endpoints/ep2?api-version=2016-04-02", profile_url("p1")),
        ]
    );
    let sent: serde_json::Value =
        serde_json::from_str(spy.requests()[2].body.as_deref().unwrap()).unwrap();
    assert_eq!(sent["location"], "centralus");
    assert_eq!(sent["properties"]["origins"][0]["properties"]["hostName"], "two.example.com");
    assert_eq!(sent["properties"]["geoFilters"][0]["countryCodes"][0], "US");

    assert_eq!(profile.endpoints().len(), 2);
    let ep1 = &profile.endpoints()["ep1"];
    assert_eq!(ep1.name(), "ep1");
    assert_eq!(ep1.parent_name(), Some("p1"));
    assert_eq!(ep1.host_name(), Some("ep1.azureedge.net"));
    assert!(definition.pending_endpoints().is_empty());
}

#[tokio::test]
async fn test_child_conflict_reports_aggregate_and_keeps_pending() {
    let spy = SpyTransport::new();
    spy.respond(201, profile_json("p1"))
        .respond(201, endpoint_json("ep1", "one.example.com"))
        .respond(409, conflict());

    let mut definition = Profiles::new(client(&spy))
        .define("p1")
        .with_region(Region::us_central())
        .with_existing_resource_group("rg1")
        .with_standard_akamai_sku()
        .define_new_endpoint("ep1")
        .with_origin("one.example.com")
        .attach()
        .define_new_endpoint("ep2")
        .with_origin("two.example.com")
        .attach();
    let error = definition.create().await.unwrap_err();

    assert_eq!(spy.calls(), 3);
    let ArmError::Commit(commit) = error else {
        panic!("expected a commit error, got {error:?}");
    };
    assert!(!commit.parent_failed());
    assert_eq!(commit.failed_children(), vec!["ep2"]);
    let failure = commit.failure_for("ep2").unwrap();
    assert!(matches!(
        failure.constituent,
        Constituent::Child {
            action: CommitAction::Create,
            ..
        }
    ));
    assert_eq!(failure.error.cloud_error().unwrap().code, "Conflict");
    assert_eq!(definition.pending_endpoints().len(), 2);
}

#[tokio::test]
async fn test_parent_failure_skips_children() {
    let spy = SpyTransport::new();
    spy.respond(409, conflict());

    let mut definition = Profiles::new(client(&spy))
        .define("p1")
        .with_region(Region::us_central())
        .with_existing_resource_group("rg1")
        .with_premium_verizon_sku()
        .with_new_endpoint("one.example.com");
    let error = definition.create().await.unwrap_err();

    assert_eq!(spy.calls(), 1);
    let ArmError::Commit(commit) = error else {
        panic!("expected a commit error, got {error:?}");
    };
    assert!(commit.parent_failed());
    assert!(commit.failed_children().is_empty());
    assert_eq!(definition.pending_endpoints().len(), 1);
}

#[tokio::test]
async fn test_blank_resource_group_fails_locally() {
    let spy = SpyTransport::new();

    let error = Profiles::new(client(&spy))
        .define("p1")
        .with_region(Region::us_central())
        .with_existing_resource_group("")
        .with_standard_verizon_sku()
        .create()
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ArmError::Validation(ValidationError::MissingParameter { ref parameter, .. })
            if parameter == "resourceGroupName"
    ));
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_blank_child_name_fails_before_parent_call() {
    let spy = SpyTransport::new();
    spy.respond(201, profile_json("p1"));

    let mut definition = Profiles::new(client(&spy))
        .define("p1")
        .with_region(Region::us_central())
        .with_existing_resource_group("rg1")
        .with_standard_akamai_sku()
        .define_new_endpoint("")
        .with_origin("origin.example.com")
        .attach();
    let error = definition.create().await.unwrap_err();

    assert!(matches!(
        error,
        ArmError::Validation(ValidationError::MissingParameter { operation, ref parameter })
            if operation == "Endpoints.create" && parameter == "endpointName"
    ));
    assert_eq!(spy.calls(), 0);
    assert_eq!(definition.pending_endpoints().len(), 1);
}

#[tokio::test]
async fn test_new_endpoint_is_named_after_origin() {
    let spy = SpyTransport::new();

    let definition = Profiles::new(client(&spy))
        .define("p1")
        .with_region(Region::us_west())
        .with_existing_resource_group("rg1")
        .with_premium_verizon_sku()
        .with_new_endpoint("supername.cloudapp.net")
        .with_new_endpoint("other.cloudapp.net");

    let names = definition.pending_endpoints().names();
    assert_eq!(names, vec!["supername-cloudapp-net-1", "other-cloudapp-net-2"]);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_get_loads_profile_and_endpoints() {
    let spy = SpyTransport::new();
    let profile = load_profile(&spy).await;

    assert_eq!(spy.calls(), 2);
    assert_eq!(profile.region_name(), Some("centralus"));
    let names: Vec<&str> = profile.endpoints().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["ep1", "ep2"]);
    assert_eq!(
        profile.endpoints()["ep2"].origin_host_name(),
        Some("two.example.com")
    );
}

#[tokio::test]
async fn test_apply_patches_parent_then_children() {
    let spy = SpyTransport::new();
    let mut profile = load_profile(&spy).await;
    let mut patched = profile_json("p1");
    patched["tags"] = json!({ "provider": "cdn" });
    spy.respond(200, patched)
        .respond(200, endpoint_json("ep1", "one.example.com"))
        .respond_empty(204)
        .respond(201, endpoint_json("ep3", "three.example.com"));

    profile
        .update()
        .with_tag("provider", "cdn")
        .update_endpoint("ep1")
        .without_geo_filters()
        .with_http_allowed(true)
        .parent()
        .without_endpoint("ep2")
        .define_new_endpoint("ep3")
        .with_origin("three.example.com")
        .attach()
        .apply()
        .await
        .unwrap();

    let lines = spy.lines();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[2], format!("PATCH {}?api-version=2016-04-02", profile_url("p1")));
    assert_eq!(
        lines[3],
        format!("PATCH {}/endpoints/ep1?api-version=2016-04-02", profile_url("p1"))
    );
    assert_eq!(
        lines[4],
        format!("DELETE {}/endpoints/ep2?api-version=2016-04-02", profile_url("p1"))
    );
    assert_eq!(
        lines[5],
        format!("PUT {}/endpoints/ep3?api-version=2016-04-02", profile_url("p1"))
    );

    let sent: serde_json::Value =
        serde_json::from_str(spy.requests()[3].body.as_deref().unwrap()).unwrap();
    assert_eq!(sent["properties"]["geoFilters"], json!([]));
    assert_eq!(sent["properties"]["isHttpAllowed"], true);

    assert_eq!(profile.tags().get("provider").map(String::as_str), Some("cdn"));
    let names: Vec<&str> = profile.endpoints().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["ep1", "ep3"]);
}

#[tokio::test]
async fn test_update_of_unknown_endpoint_fails_before_sending() {
    let spy = SpyTransport::new();
    let mut profile = load_profile(&spy).await;

    let error = profile
        .update()
        .with_tag("provider", "cdn")
        .update_endpoint("missing")
        .with_http_allowed(false)
        .parent()
        .apply()
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ArmError::Validation(ValidationError::UnknownChild { ref name, .. }) if name == "missing"
    ));
    assert_eq!(spy.calls(), 2);
    assert!(profile.tags().is_empty());
}

#[tokio::test]
async fn test_blank_removal_fails_before_parent_call() {
    let spy = SpyTransport::new();
    let mut profile = load_profile(&spy).await;
    spy.respond(200, profile_json("p1"));

    let error = profile
        .update()
        .with_tag("provider", "cdn")
        .without_endpoint("")
        .apply()
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ArmError::Validation(ValidationError::MissingParameter { operation, ref parameter })
            if operation == "Endpoints.delete" && parameter == "endpointName"
    ));
    assert_eq!(spy.calls(), 2);
    assert!(profile.tags().is_empty());
}

#[tokio::test]
async fn test_new_endpoint_skips_names_already_in_use() {
    let spy = SpyTransport::new();
    spy.respond(200, profile_json("p1")).respond(
        200,
        json!({ "value": [
            endpoint_json("ep1", "one.example.com"),
            endpoint_json("one-example-com-3", "one.example.com")
        ] }),
    );
    let mut profile = Profiles::new(client(&spy))
        .get_by_resource_group("rg1", "p1")
        .await
        .unwrap();

    let update = profile
        .update()
        .with_new_endpoint("one.example.com")
        .define_new_endpoint("one-example-com-5")
        .with_origin("one.example.com")
        .attach()
        .with_new_endpoint("one.example.com");

    assert_eq!(
        update.pending_endpoints().names(),
        vec!["one-example-com-4", "one-example-com-5", "one-example-com-6"]
    );
    assert_eq!(spy.calls(), 2);
}

#[tokio::test]
async fn test_failed_apply_leaves_profile_unchanged() {
    let spy = SpyTransport::new();
    let mut profile = load_profile(&spy).await;
    spy.respond(200, profile_json("p1")).respond(409, conflict());

    let mut update = profile.update().without_endpoint("ep2");
    let error = update.apply().await.unwrap_err();

    assert!(matches!(error, ArmError::Commit(ref commit) if commit.failed_children() == vec!["ep2"]));
    assert_eq!(update.pending_endpoints().len(), 1);
    drop(update);
    assert_eq!(profile.endpoints().len(), 2);
}

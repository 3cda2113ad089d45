//! End-to-end behaviour of the standard enrichment chain.

use std::collections::HashMap;
use std::sync::Arc;

use common::keys::{property, scope};
use common::{ActivityTags, AmbientScope, TelemetryRecord};
use enricher::{Ambient, EnricherConfig, EnrichmentPipeline, NodeNameCache, RoleInstance};
use serde_json::json;

const SUFFIX: &str = ".azurewebsites.net";

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn pipeline_with(pairs: &[(&str, &str)]) -> (EnrichmentPipeline, NodeNameCache) {
    let cache = NodeNameCache::new(SUFFIX);
    let pipeline = EnrichmentPipeline::standard(
        &EnricherConfig::default(),
        Arc::new(env_of(pairs)),
        Arc::new(RoleInstance::new()),
        cache.clone(),
    );
    (pipeline, cache)
}

fn hosted_pipeline() -> EnrichmentPipeline {
    pipeline_with(&[
        ("WEBSITE_SITE_NAME", "OrdersApp"),
        ("WEBSITE_SLOT_NAME", "staging"),
        ("WEBSITE_INSTANCE_ID", "a1b2c3"),
    ])
    .0
}

fn invocation_scope(event_id: i64) -> AmbientScope {
    [
        (scope::FUNCTION_NAME, json!("GetOrder")),
        (scope::INVOCATION_ID, json!("0f9e8d7c")),
        (scope::CATEGORY, json!("Function.GetOrder")),
        (scope::LOG_LEVEL, json!("Information")),
        (scope::EVENT_ID, json!(event_id)),
        (scope::EVENT_NAME, json!("FunctionCompleted")),
    ]
    .into_iter()
    .collect()
}

#[test]
fn applying_twice_equals_applying_once() {
    let pipeline = hosted_pipeline();
    let scope = invocation_scope(7);
    let tags: ActivityTags = [
        ("Name", "GetOrder"),
        ("Succeeded", "true"),
        ("ClientIp", "198.51.100.4"),
        ("ai_internal", "x"),
        ("Region", "west"),
    ]
    .into_iter()
    .collect();
    let ambient = Ambient::new(Some(&scope), Some(&tags));

    let records = [
        TelemetryRecord::request(
            "GET /orders/5",
            Some("https://ordersapp.azurewebsites.net/api/orders/5?code=abc"),
        ),
        TelemetryRecord::request("QueueTrigger", None),
        TelemetryRecord::trace("hello"),
        TelemetryRecord::dependency("SELECT", "sql"),
    ];

    for mut rec in records {
        pipeline.initialize(Some(&mut rec), &ambient);
        let once = rec.clone();
        pipeline.initialize(Some(&mut rec), &ambient);
        assert_eq!(rec, once);
    }
}

#[test]
fn existing_role_name_is_never_changed() {
    let pipeline = hosted_pipeline();
    for role in ["custom", "ordersapp-staging", "X"] {
        let mut rec = TelemetryRecord::trace("t");
        rec.context.cloud_role_name = role.into();
        pipeline.initialize(Some(&mut rec), &Ambient::none());
        assert_eq!(rec.context.cloud_role_name, role);
    }
}

#[test]
fn identity_fields_filled_from_environment() {
    let pipeline = hosted_pipeline();
    let mut rec = TelemetryRecord::trace("t");
    pipeline.initialize(Some(&mut rec), &Ambient::none());

    assert_eq!(rec.context.cloud_role_name, "ordersapp-staging");
    assert_eq!(rec.context.cloud_role_instance, "a1b2c3");
    assert_eq!(rec.context.node_name, "ordersapp-staging.azurewebsites.net");
    assert_eq!(rec.context.location_ip, "0.0.0.0");
}

#[test]
fn query_string_never_survives() {
    let pipeline = hosted_pipeline();
    let mut rec = TelemetryRecord::request(
        "POST /api/login",
        Some("https://ordersapp.azurewebsites.net/api/login?password=hunter2&code=k3y"),
    );
    pipeline.initialize(Some(&mut rec), &Ambient::none());

    let url = rec.as_request().unwrap().url.clone().unwrap();
    assert_eq!(url, "https://localhost/api/login");
    assert!(!url.contains('?'));
    for value in rec.properties.values() {
        assert!(!value.contains("hunter2"));
        assert!(!value.contains("k3y"));
    }
}

#[test]
fn http_method_taken_from_display_name() {
    let pipeline = hosted_pipeline();
    let mut rec = TelemetryRecord::request("GET /orders/5", Some("https://h/orders/5"));
    pipeline.initialize(Some(&mut rec), &Ambient::none());

    assert_eq!(rec.properties.get(property::HTTP_METHOD).unwrap(), "GET");
    assert_eq!(rec.properties.get(property::HTTP_PATH).unwrap(), "/orders/5");
}

#[test]
fn http_method_from_renaming_tag_appears_on_next_pass() {
    let pipeline = hosted_pipeline();
    let tags: ActivityTags = [("Name", "POST /orders")].into_iter().collect();
    let ambient = Ambient::new(None, Some(&tags));
    let mut rec = TelemetryRecord::request("Fn", Some("https://h/orders"));

    pipeline.initialize(Some(&mut rec), &ambient);
    assert_eq!(rec.as_request().unwrap().name, "POST /orders");
    assert_eq!(rec.properties.get(property::HTTP_PATH).unwrap(), "/orders");
    assert!(!rec.properties.contains_key(property::HTTP_METHOD));

    pipeline.initialize(Some(&mut rec), &ambient);
    assert_eq!(rec.properties.get(property::HTTP_METHOD).unwrap(), "POST");
    let once_more = rec.clone();
    pipeline.initialize(Some(&mut rec), &ambient);
    assert_eq!(rec, once_more);
}

#[test]
fn succeeded_tag_wins_and_other_tags_copied() {
    let pipeline = hosted_pipeline();
    let mut rec = TelemetryRecord::request("GET /a", Some("https://h/a"));
    rec.as_request_mut().unwrap().success = true;
    rec.properties.insert("Succeeded".into(), "true".into());

    let tags: ActivityTags = [("Succeeded", "false"), ("Other", "x")].into_iter().collect();
    pipeline.initialize(Some(&mut rec), &Ambient::new(None, Some(&tags)));

    assert!(!rec.as_request().unwrap().success);
    assert!(!rec.properties.contains_key("Succeeded"));
    assert_eq!(rec.properties.get("Other").unwrap(), "x");
}

#[test]
fn event_id_zero_is_suppressed() {
    let pipeline = hosted_pipeline();

    let mut unset = TelemetryRecord::trace("t");
    pipeline.initialize(Some(&mut unset), &Ambient::new(Some(&invocation_scope(0)), None));
    assert!(!unset.properties.contains_key(property::EVENT_ID));

    let mut set = TelemetryRecord::trace("t");
    pipeline.initialize(Some(&mut set), &Ambient::new(Some(&invocation_scope(7)), None));
    assert_eq!(set.properties.get(property::EVENT_ID).unwrap(), "7");
    assert_eq!(set.context.operation_name, "GetOrder");
    assert_eq!(set.properties.get(property::INVOCATION_ID).unwrap(), "0f9e8d7c");
}

#[test]
fn node_name_cache_is_consistent_across_threads() {
    const THREADS: usize = 16;
    let cache = NodeNameCache::new(SUFFIX);

    let results: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let cache = cache.clone();
                // Mixed casing still maps to one entry.
                let identity = if i % 2 == 0 { "OrdersApp" } else { "ordersapp" };
                s.spawn(move || cache.get_or_create(identity))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.len(), THREADS);
    assert!(results.iter().all(|r| r == &results[0]));
    assert_eq!(cache.len(), 1);
}

#[test]
fn concurrent_pipelines_share_one_node_name() {
    let (pipeline, cache) = pipeline_with(&[("WEBSITE_SITE_NAME", "app")]);

    let names: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| {
                    let mut rec = TelemetryRecord::trace("t");
                    pipeline.initialize(Some(&mut rec), &Ambient::none());
                    rec.context.node_name
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(names.iter().all(|n| n == "app.azurewebsites.net"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn reserved_prefix_tags_never_copied() {
    let pipeline = hosted_pipeline();
    let mut rec = TelemetryRecord::request("GET /a", None);
    let tags: ActivityTags = [
        ("ai_session", "s"),
        ("ai_user_id", "u"),
        ("ai_", "empty"),
        ("visible", "v"),
    ]
    .into_iter()
    .collect();
    pipeline.initialize(Some(&mut rec), &Ambient::new(None, Some(&tags)));

    assert!(rec.properties.keys().all(|k| !k.starts_with("ai_")));
    assert_eq!(rec.properties.get("visible").unwrap(), "v");
}

#[test]
fn absent_record_and_context_are_tolerated() {
    let pipeline = pipeline_with(&[]).0;
    pipeline.initialize(None, &Ambient::none());

    let mut rec = TelemetryRecord::request("Timer", None);
    pipeline.initialize(Some(&mut rec), &Ambient::none());
    assert_eq!(rec.as_request().unwrap().response_code, "0");
    assert!(rec.context.cloud_role_name.is_empty());
    assert!(rec.context.node_name.is_empty());
}

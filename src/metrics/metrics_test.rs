use super::*;

fn create_test_registry() -> Registry {
    let registry = Registry::new();
    register_custom_metrics(&registry);
    registry
}

#[test]
fn test_custom_registry() {
    let registry = create_test_registry();

    CACHE_REQUESTS_COUNTER
        .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_FEATURES, LAYER_EXTERNAL, CODE_HIT])
        .inc();
    let metrics = &registry.gather();
    assert!(!metrics.is_empty());

    let metric_names: Vec<_> = metrics.iter().map(|m| m.get_name()).collect();
    assert!(
        metric_names.contains(&"gateway_api_cache_requests_total"),
        "Missing gateway_api_cache_requests_total"
    );
}

#[test]
fn test_register_metrics_is_idempotent() {
    register_metrics();
    register_metrics();

    REQUESTS_COUNTER
        .with_label_values(&["GetFeatureFlags", CODE_OK])
        .inc();
    assert!(gather_metrics().contains("gateway_api_requests_total"));
}

#[test]
fn test_counter_increment() {
    let labels = [CALLER_GATEWAY_SERVICE, TYPE_GOAL, "counter-test"];
    let before = REGISTER_EVENTS_COUNTER.with_label_values(&labels).get();

    REGISTER_EVENTS_COUNTER.with_label_values(&labels).inc();
    REGISTER_EVENTS_COUNTER.with_label_values(&labels).inc();

    let value = REGISTER_EVENTS_COUNTER.with_label_values(&labels).get();
    assert_eq!(value, before + 2, "Counter should increment correctly");
}

#[test]
fn test_histogram_labels() {
    let labels = ["p", "e", "histogram-test", "GetEvaluations", "1.0.0", "Android"];
    SDK_LATENCY_HISTOGRAM.with_label_values(&labels).observe(0.2);
    SDK_LATENCY_HISTOGRAM.with_label_values(&labels).observe(0.4);

    let h = SDK_LATENCY_HISTOGRAM.with_label_values(&labels);
    assert_eq!(h.get_sample_count(), 2);
    assert!((h.get_sample_sum() - 0.6).abs() < f64::EPSILON);
}

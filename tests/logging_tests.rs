use observability_demo::setup_logging;

#[test]
fn test_setup_logging_installs_the_global_subscriber_once() {
    let first = std::panic::catch_unwind(setup_logging);
    assert!(first.is_ok(), "first setup_logging call should install the subscriber");
    assert!(tracing::dispatcher::has_been_set());

    // A second global subscriber is refused
    let second = std::panic::catch_unwind(setup_logging);
    assert!(second.is_err());

    // Events still go through the subscriber installed first
    tracing::info!(component = "logging_tests", "still logging after a refused setup");
}

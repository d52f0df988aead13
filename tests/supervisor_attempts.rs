//! Supervisor behavior against stub registrars.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gateway_proxy::config::GatewayConfig;
use gateway_proxy::lifecycle::Shutdown;
use gateway_proxy::supervisor::Supervisor;

mod common;

fn test_config(http_port: u16) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.http_port = http_port;
    config.retry.max_attempts = 2;
    config.retry.base_delay_ms = 10;
    config.retry.max_delay_ms = 50;
    config
}

#[tokio::test]
async fn failing_registrar_is_fatal_and_never_binds() {
    let calls = Arc::new(AtomicU32::new(0));
    let registrar = Arc::new(common::FailingRegistrar {
        calls: calls.clone(),
    });

    let mut config = test_config(28491);
    config.grpc_port = 9000;

    let shutdown = Shutdown::new();
    let supervisor = Supervisor::new(config, registrar);
    let err = supervisor
        .run(&shutdown)
        .await
        .expect_err("supervisor should give up after exhausting attempts");

    let message = err.to_string().to_lowercase();
    assert!(
        message.contains("connection refused"),
        "fatal error should carry the underlying message, got: {message}"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2, "one retry, then give up");

    // The listen port was never bound; binding it ourselves must succeed.
    let probe = tokio::net::TcpListener::bind(("127.0.0.1", 28491)).await;
    assert!(probe.is_ok(), "no listener should ever bind the HTTP port");
}

#[tokio::test]
async fn serves_stub_handler_after_registration() {
    let registered = Arc::new(AtomicU32::new(0));
    let registrar = Arc::new(common::StaticRegistrar {
        body: "stub-ok",
        registered: registered.clone(),
    });

    let config = test_config(28492);
    let shutdown = Shutdown::new();
    let supervisor = Supervisor::new(config, registrar);

    let handle = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { supervisor.run(&shutdown).await }
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let mut served = false;
    for _ in 0..50 {
        if let Ok(res) = client.get("http://127.0.0.1:28492/anything").send().await {
            assert_eq!(res.status(), 200);
            assert_eq!(res.text().await.unwrap(), "stub-ok");
            served = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(served, "gateway never started serving");
    assert_eq!(registered.load(Ordering::SeqCst), 1);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("supervisor should stop on shutdown")
        .unwrap();
    assert!(result.is_ok(), "graceful shutdown should return Ok");
}

#[tokio::test]
async fn bind_conflict_is_fatal() {
    // Hold the HTTP port so the attempt's bind step fails.
    let _holder = tokio::net::TcpListener::bind(("0.0.0.0", 28493))
        .await
        .unwrap();

    let registrar = Arc::new(common::StaticRegistrar {
        body: "unused",
        registered: Arc::new(AtomicU32::new(0)),
    });

    let mut config = test_config(28493);
    config.retry.max_attempts = 1;

    let shutdown = Shutdown::new();
    let supervisor = Supervisor::new(config, registrar);
    let err = supervisor
        .run(&shutdown)
        .await
        .expect_err("bind conflict should be fatal");
    assert!(
        err.to_string().contains("28493"),
        "error should name the listen address, got: {err}"
    );
}

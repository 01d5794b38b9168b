//! Load testing for the gateway.

use std::time::{Duration, Instant};

use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn test_load_performance() {
    let backend = common::start_mock_backend("Hello from catalog").await;
    let (gateway, shutdown) = common::start_gateway(common::config_with_backends(backend)).await;

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let token = common::token("42", "user", 600);
    let start = Instant::now();

    let mut handles = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            let mut failures = 0;
            for i in 0..requests_per_task {
                // Alternate public and protected paths.
                let req = if (task + i) % 2 == 0 {
                    client.get(format!("http://{}/api/v1/products/{}", gateway, i))
                } else {
                    client
                        .get(format!("http://{}/api/v1/orders/{}", gateway, i))
                        .bearer_auth(&token)
                };
                match req.timeout(Duration::from_secs(10)).send().await {
                    Ok(res) if res.status() == StatusCode::OK => {}
                    _ => failures += 1,
                }
            }
            failures
        }));
    }

    let mut failures = 0;
    for handle in handles {
        failures += handle.await.unwrap();
    }

    let elapsed = start.elapsed();
    println!(
        "{} requests in {:?} ({:.0} req/s), {} failures",
        total_requests,
        elapsed,
        total_requests as f64 / elapsed.as_secs_f64(),
        failures
    );
    assert_eq!(failures, 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_repeated_get_is_idempotent() {
    let backend = common::start_echo_backend().await;
    let (gateway, shutdown) = common::start_gateway(common::config_with_backends(backend)).await;
    let client = common::client();

    let mut bodies = Vec::new();
    for _ in 0..3 {
        let res = client
            .get(format!("http://{}/api/v1/categories?sort=name", gateway))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        bodies.push(res.text().await.unwrap());
    }

    assert!(bodies.windows(2).all(|w| w[0] == w[1]));

    shutdown.trigger();
}

#[tokio::test]
async fn test_inflight_count_returns_to_zero() {
    let backend = common::start_mock_backend("ok").await;
    let config = common::config_with_backends(backend);
    let server = api_gateway::GatewayServer::new(config);
    let gateway = server.gateway();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = api_gateway::Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    let client = common::client();
    let mut handles = Vec::new();
    for _ in 0..10 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .get(format!("http://{}/api/v1/products", addr))
                .send()
                .await
                .map(|r| r.status())
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), StatusCode::OK);
    }

    let inflight = gateway.forwarder().inflight();
    assert_eq!(inflight.active_count(), 0);
    assert_eq!(inflight.cancelled_count(), 0);

    shutdown.trigger();
}

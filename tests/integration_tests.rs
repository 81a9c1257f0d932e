use serde_json::{json, Value};
use shop_services::{models::ServiceKind, AppSettings};
use std::collections::HashSet;

mod common;
use common::*;

#[tokio::test]
async fn test_health_is_exact_on_every_service() {
    for kind in ServiceKind::ALL {
        let test_env = TestEnvironment::new(kind).await;

        let response = test_env
            .client
            .get(test_env.url("/health"))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({"status": "healthy"}));
    }
}

#[tokio::test]
async fn test_product_api_endpoints() {
    let test_env = TestEnvironment::new(ServiceKind::Product).await;
    let client = &test_env.client;

    let response = client
        .get(test_env.url("/products"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let listed: Value = response.json().await.unwrap();
    assert_eq!(listed["1"]["name"], "Laptop");
    assert_eq!(listed["2"]["price"], 699.99);

    let response = client
        .post(test_env.url("/products"))
        .json(&json!({"name": "Monitor", "price": 199.5, "stock": 4}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["id"], 3);

    let response = client
        .get(test_env.url("/products/3"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let fetched: Value = response.json().await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched["name"], "Monitor");
    assert_eq!(fetched["price"], 199.5);
    assert_eq!(fetched["stock"], 4);
}

#[tokio::test]
async fn test_product_ids_exceed_existing_ids() {
    let test_env = TestEnvironment::new(ServiceKind::Product).await;

    let mut previous_max = 2;
    for i in 0..5 {
        let created: Value = test_env
            .client
            .post(test_env.url("/products"))
            .json(&json!({"name": format!("Item {}", i), "price": 1}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let id = created["id"].as_u64().unwrap();
        assert!(id > previous_max);
        assert_eq!(created["stock"], 0);
        previous_max = id;
    }
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let test_env = TestEnvironment::new(ServiceKind::Product).await;

    for path in ["/products/999", "/products/-1", "/products/abc"] {
        let response = test_env.client.get(test_env.url(path)).send().await.unwrap();

        assert_eq!(response.status().as_u16(), 404);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Product not found"}));
    }
}

#[tokio::test]
async fn test_invalid_product_payloads_are_bad_requests() {
    let test_env = TestEnvironment::new(ServiceKind::Product).await;

    let cases = [
        (json!({"name": "Mouse"}), "Missing required fields"),
        (json!({"name": "Mouse", "price": "abc"}), "Invalid price value"),
        (json!({"name": "Mouse", "price": 5, "stock": -1}), "Invalid stock value"),
    ];

    for (payload, message) in cases {
        let response = test_env
            .client
            .post(test_env.url("/products"))
            .json(&payload)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": message }));
    }

    let response = test_env
        .client
        .post(test_env.url("/products"))
        .header("content-type", "text/plain")
        .body("name=Mouse")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Request must be JSON"}));

    // Rejected payloads never reach the store
    let listed: Value = test_env
        .client
        .get(test_env.url("/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_sequential_orders_count_from_one() {
    let test_env = TestEnvironment::new(ServiceKind::Order).await;

    for expected in 1..=3 {
        let response = test_env
            .client
            .post(test_env.url("/orders"))
            .json(&json!({"user_id": 1, "product_id": 2, "quantity": expected}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let order: Value = response.json().await.unwrap();
        assert_eq!(
            order,
            json!({
                "id": expected,
                "user_id": 1,
                "product_id": 2,
                "quantity": expected,
                "status": "created"
            })
        );
    }

    let response = test_env
        .client
        .get(test_env.url("/orders/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let order: Value = response.json().await.unwrap();
    assert_eq!(order["quantity"], 2);
}

#[tokio::test]
async fn test_order_schema_errors_report_every_field() {
    let test_env = TestEnvironment::new(ServiceKind::Order).await;

    let response = test_env
        .client
        .post(test_env.url("/orders"))
        .json(&json!({"user_id": "abc"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    let locations: Vec<Value> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|violation| violation["loc"].clone())
        .collect();
    assert_eq!(
        locations,
        vec![
            json!(["body", "user_id"]),
            json!(["body", "product_id"]),
            json!(["body", "quantity"]),
        ]
    );
    assert_eq!(body["detail"][0]["type"], "type_error.integer");
    assert_eq!(body["detail"][1]["type"], "value_error.missing");
}

#[tokio::test]
async fn test_user_api_endpoints() {
    let test_env = TestEnvironment::new(ServiceKind::User).await;
    let client = &test_env.client;

    let response = client
        .post(test_env.url("/users"))
        .json(&json!({"name": "Alan", "email": "alan@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(
        created,
        json!({"id": 3, "name": "Alan", "email": "alan@example.com"})
    );

    let response = client.get(test_env.url("/users/3")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), created);

    let response = client.get(test_env.url("/users/42")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "User not found"}));

    let response = client.get(test_env.url("/users/abc")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"][0]["loc"], json!(["path", "user_id"]));

    // Duplicate emails are accepted unless uniqueness is enabled
    let response = client
        .post(test_env.url("/users"))
        .json(&json!({"name": "John Again", "email": "john@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn test_unique_email_conflict() {
    let settings = AppSettings {
        enforce_unique_email: true,
        ..AppSettings::default()
    };
    let test_env = TestEnvironment::with_settings(ServiceKind::User, settings).await;

    let response = test_env
        .client
        .post(test_env.url("/users"))
        .json(&json!({"name": "John Again", "email": "JOHN@example.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Email already registered"}));
}

#[tokio::test]
async fn test_payment_processing() {
    let test_env = TestEnvironment::new(ServiceKind::Payment).await;

    let response = test_env
        .client
        .post(test_env.url("/payments/process"))
        .json(&json!({"amount": 100}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let transaction: Value = response.json().await.unwrap();
    assert_eq!(transaction["status"], "success");
    assert_eq!(transaction["currency"], "USD");
    assert_eq!(transaction["amount"], 100);
    let transaction_id = transaction["transaction_id"].as_str().unwrap();
    assert!(transaction_id.starts_with("txn_"));
    assert!(transaction_id.len() <= 20);

    let response = test_env
        .client
        .post(test_env.url("/payments/process"))
        .json(&json!({"currency": "EUR"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Amount is required"}));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_product_creation_yields_unique_ids() {
    let test_env = TestEnvironment::new(ServiceKind::Product).await;

    let requests = (0..20).map(|i| {
        let client = test_env.client.clone();
        let url = test_env.url("/products");
        tokio::spawn(async move {
            let created: Value = client
                .post(url)
                .json(&json!({"name": format!("Concurrent {}", i), "price": 2.5}))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            created["id"].as_u64().unwrap()
        })
    });

    let mut ids = HashSet::new();
    for handle in requests.collect::<Vec<_>>() {
        assert!(ids.insert(handle.await.unwrap()));
    }
    assert_eq!(ids, (3..=22).collect::<HashSet<u64>>());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let test_env = TestEnvironment::new(ServiceKind::Order).await;

    test_env
        .client
        .post(test_env.url("/orders"))
        .json(&json!({"user_id": 1, "product_id": 1, "quantity": 1}))
        .send()
        .await
        .unwrap();

    let response = test_env
        .client
        .get(test_env.url("/metrics"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let text = response.text().await.unwrap();
    assert!(text.contains("resource_operations_total"));
    assert!(text.contains("service=\"order\""));
}

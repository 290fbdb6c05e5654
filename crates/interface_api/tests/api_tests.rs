//! HTTP API Tests
//!
//! Drives the full router (middleware included) with `tower::ServiceExt::oneshot`
//! over an in-memory registry.
//!
//! # Test Organization
//!
//! - `lookup` - GET by code and by country
//! - `registration` - POST validation and registry rules
//! - `removal` - DELETE
//! - `health` - liveness and readiness probes

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use domain_bank::BankRegistry;
use interface_api::{config::ApiConfig, create_router};
use test_utils::{
    assert_json_field, assert_json_field_absent, memory_registry, seeded_memory_registry,
    CodeFixtures,
};

// ============================================================================
// TEST HELPERS
// ============================================================================

fn app(registry: BankRegistry) -> Router {
    create_router(registry, ApiConfig::default())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/v1/swift-codes", Some(body)).await
}

async fn delete(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

fn chile_headquarters() -> Value {
    json!({
        "address": "AHUMADA 251",
        "bankName": "BANCO DE CHILE",
        "countryISO2": "CL",
        "countryName": "CHILE",
        "isHeadquarter": true,
        "swiftCode": "BCHICLRMXXX"
    })
}

// ============================================================================
// LOOKUP
// ============================================================================

mod lookup {
    use super::*;

    #[tokio::test]
    async fn test_headquarters_lists_branches() {
        let app = app(seeded_memory_registry().await);

        let (status, body) = get(app, "/v1/swift-codes/BPKOPLPWXXX").await;

        assert_eq!(status, StatusCode::OK);
        assert_json_field(&body, "swiftCode", json!("BPKOPLPWXXX"));
        assert_json_field(&body, "isHeadquarter", json!(true));
        assert_json_field(&body, "countryISO2", json!("PL"));
        assert_json_field(&body, "countryName", json!("Poland"));
        assert_json_field(&body, "bankName", json!("PKO BANK POLSKI S.A."));

        let branches = body["branches"].as_array().unwrap();
        assert_eq!(branches.len(), 1);
        assert_json_field(&branches[0], "swiftCode", json!(CodeFixtures::PKO_BRANCH));
        assert_json_field(&branches[0], "isHeadquarter", json!(false));
        assert_json_field_absent(&branches[0], "countryName");
    }

    #[tokio::test]
    async fn test_branch_has_no_branches_field() {
        let app = app(seeded_memory_registry().await);

        let (status, body) = get(app, "/v1/swift-codes/BPKOPLPWKRK").await;

        assert_eq!(status, StatusCode::OK);
        assert_json_field(&body, "isHeadquarter", json!(false));
        assert_json_field_absent(&body, "branches");
    }

    #[tokio::test]
    async fn test_headquarters_without_branches_has_empty_list() {
        let registry = memory_registry();
        let app = app(registry);
        let (status, _) = post(app.clone(), chile_headquarters()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get(app, "/v1/swift-codes/BCHICLRMXXX").await;

        assert_eq!(status, StatusCode::OK);
        assert_json_field(&body, "branches", json!([]));
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let app = app(seeded_memory_registry().await);

        let (status, body) = get(app, "/v1/swift-codes/ZZZZPLPWXXX").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_json_field(&body, "error", json!("not_found"));
    }

    #[tokio::test]
    async fn test_malformed_code_is_bad_request() {
        for uri in [
            "/v1/swift-codes/BPKO",
            "/v1/swift-codes/bpkoplpwxxx",
            "/v1/swift-codes/BPKOPLPW-XX",
        ] {
            let (status, body) = get(app(memory_registry()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_json_field(&body, "error", json!("bad_request"));
        }
    }

    #[tokio::test]
    async fn test_country_view() {
        let app = app(seeded_memory_registry().await);

        let (status, body) = get(app, "/v1/swift-codes/country/PL").await;

        assert_eq!(status, StatusCode::OK);
        assert_json_field(&body, "countryISO2", json!("PL"));
        assert_json_field(&body, "countryName", json!("Poland"));
        let codes: Vec<&str> = body["swiftCodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["swiftCode"].as_str().unwrap())
            .collect();
        assert_eq!(codes, [CodeFixtures::PKO_HQ, CodeFixtures::PKO_BRANCH]);
    }

    #[tokio::test]
    async fn test_country_without_codes_is_empty() {
        let app = app(seeded_memory_registry().await);

        let (status, body) = get(app, "/v1/swift-codes/country/DE").await;

        assert_eq!(status, StatusCode::OK);
        assert_json_field(&body, "countryName", json!("Germany"));
        assert_json_field(&body, "swiftCodes", json!([]));
    }

    #[tokio::test]
    async fn test_unknown_country_is_bad_request() {
        let (status, _) = get(app(memory_registry()), "/v1/swift-codes/country/QQ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get(app(memory_registry()), "/v1/swift-codes/country/POL").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// REGISTRATION
// ============================================================================

mod registration {
    use super::*;

    #[tokio::test]
    async fn test_register_headquarters() {
        let app = app(memory_registry());

        let (status, body) = post(app.clone(), chile_headquarters()).await;

        assert_eq!(status, StatusCode::OK);
        assert_json_field(
            &body,
            "message",
            json!("Successfully saved bank information for SWIFT code BCHICLRMXXX"),
        );

        let (status, body) = get(app, "/v1/swift-codes/BCHICLRMXXX").await;
        assert_eq!(status, StatusCode::OK);
        assert_json_field(&body, "countryName", json!("Chile"));
    }

    #[tokio::test]
    async fn test_register_branch_appears_under_headquarters() {
        let app = app(seeded_memory_registry().await);

        let (status, _) = post(
            app.clone(),
            json!({
                "address": null,
                "bankName": "PKO BANK POLSKI S.A.",
                "countryISO2": "PL",
                "countryName": "Poland",
                "isHeadquarter": false,
                "swiftCode": "BPKOPLPWGDA"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = get(app, "/v1/swift-codes/BPKOPLPWXXX").await;
        assert_eq!(body["branches"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_length_violations_report_details() {
        let mut body = chile_headquarters();
        body["swiftCode"] = json!("BCHI");
        body["countryISO2"] = json!("CHL");

        let (status, body) = post(app(memory_registry()), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_json_field(&body, "error", json!("validation_error"));
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_bank_name_is_rejected() {
        let mut body = chile_headquarters();
        body["bankName"] = json!("  ");

        let (status, body) = post(app(memory_registry()), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_json_field(&body, "error", json!("validation_error"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let mut body = chile_headquarters();
        body.as_object_mut().unwrap().remove("isHeadquarter");

        let (status, body) = post(app(memory_registry()), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_json_field(&body, "error", json!("bad_request"));
    }

    #[tokio::test]
    async fn test_country_name_mismatch_is_bad_request() {
        let mut body = chile_headquarters();
        body["countryName"] = json!("PERU");

        let (status, _) = post(app(memory_registry()), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_branch_without_headquarters_is_not_found() {
        let mut body = chile_headquarters();
        body["swiftCode"] = json!("BCHICLRM001");
        body["isHeadquarter"] = json!(false);

        let (status, body) = post(app(memory_registry()), body).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_json_field(&body, "error", json!("not_found"));
    }

    #[tokio::test]
    async fn test_inconsistent_flag_is_conflict() {
        let mut body = chile_headquarters();
        body["isHeadquarter"] = json!(false);

        let (status, body) = post(app(memory_registry()), body).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_json_field(&body, "error", json!("conflict"));
    }

    #[tokio::test]
    async fn test_duplicate_is_conflict() {
        let app = app(memory_registry());
        let (status, _) = post(app.clone(), chile_headquarters()).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post(app, chile_headquarters()).await;

        assert_eq!(status, StatusCode::CONFLICT);
    }
}

// ============================================================================
// REMOVAL
// ============================================================================

mod removal {
    use super::*;

    #[tokio::test]
    async fn test_delete_branch_then_headquarters() {
        let app = app(seeded_memory_registry().await);

        let (status, body) = delete(app.clone(), "/v1/swift-codes/BPKOPLPWKRK").await;
        assert_eq!(status, StatusCode::OK);
        assert_json_field(
            &body,
            "message",
            json!("Successfully deleted bank details for SWIFT code BPKOPLPWKRK"),
        );

        let (status, _) = delete(app.clone(), "/v1/swift-codes/BPKOPLPWXXX").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get(app, "/v1/swift-codes/BPKOPLPWXXX").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_headquarters_with_branches_is_conflict() {
        let app = app(seeded_memory_registry().await);

        let (status, _) = delete(app.clone(), "/v1/swift-codes/BPKOPLPWXXX").await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = get(app, "/v1/swift-codes/BPKOPLPWXXX").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let (status, _) = delete(app(memory_registry()), "/v1/swift-codes/ZZZZPLPWXXX").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_malformed_is_bad_request() {
        let (status, _) = delete(app(memory_registry()), "/v1/swift-codes/XXX").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// HEALTH
// ============================================================================

mod health {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use core_kernel::{
        AdapterHealth, CountryCode, DomainPort, HealthCheckResult, HealthCheckable, PortError,
        SwiftCode,
    };
    use domain_bank::{BankStore, BankTransaction, BranchRecord, HeadquartersRecord};

    #[tokio::test]
    async fn test_liveness() {
        let (status, body) = get(app(memory_registry()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_json_field(&body, "status", json!("healthy"));
        assert_json_field_absent(&body, "storage");
    }

    #[tokio::test]
    async fn test_readiness_names_store() {
        let (status, body) = get(app(memory_registry()), "/health/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_json_field(&body, "status", json!("ready"));
        assert_json_field(&body, "storage", json!("in-memory-bank-store"));
    }

    /// A store whose database cannot be reached
    struct UnreachableStore;

    impl DomainPort for UnreachableStore {}

    #[async_trait]
    impl HealthCheckable for UnreachableStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "unreachable-store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms: 0,
                message: Some("connection refused".to_string()),
                checked_at: chrono::Utc::now(),
            }
        }
    }

    fn refused<T>() -> Result<T, PortError> {
        Err(PortError::connection("connection refused"))
    }

    #[async_trait]
    impl BankStore for UnreachableStore {
        async fn get_headquarters(
            &self,
            _code: &SwiftCode,
        ) -> Result<Option<HeadquartersRecord>, PortError> {
            refused()
        }

        async fn get_branch(&self, _code: &SwiftCode) -> Result<Option<BranchRecord>, PortError> {
            refused()
        }

        async fn list_headquarters_by_country(
            &self,
            _country: &CountryCode,
        ) -> Result<Vec<HeadquartersRecord>, PortError> {
            refused()
        }

        async fn list_branches_by_country(
            &self,
            _country: &CountryCode,
        ) -> Result<Vec<BranchRecord>, PortError> {
            refused()
        }

        async fn list_branches_by_headquarters(
            &self,
            _headquarters: &SwiftCode,
        ) -> Result<Vec<BranchRecord>, PortError> {
            refused()
        }

        async fn is_empty(&self) -> Result<bool, PortError> {
            refused()
        }

        async fn begin(
            &self,
            _lock_keys: &[SwiftCode],
        ) -> Result<Box<dyn BankTransaction>, PortError> {
            refused()
        }
    }

    fn unreachable_app() -> Router {
        app(BankRegistry::new(Arc::new(UnreachableStore)))
    }

    #[tokio::test]
    async fn test_readiness_fails_when_store_is_down() {
        let (status, body) = get(unreachable_app(), "/health/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_json_field(&body, "status", json!("unavailable"));
        assert_json_field(&body, "storage", json!("unreachable-store"));
    }

    #[tokio::test]
    async fn test_lookup_when_store_is_down_is_unavailable() {
        let (status, body) = get(unreachable_app(), "/v1/swift-codes/BPKOPLPWXXX").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_json_field(&body, "error", json!("service_unavailable"));
        assert!(!body["message"].as_str().unwrap().contains("refused"));
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app(memory_registry()).oneshot(request).await.unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{
        country_strategy, fake_address, fake_bank_name, headquarters_with_branch_strategy,
        swift_code_strategy,
    };

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    fn body(
        code: &str,
        iso2: &str,
        country_name: &str,
        bank_name: &str,
        address: Option<&str>,
    ) -> Value {
        json!({
            "address": address,
            "bankName": bank_name,
            "countryISO2": iso2,
            "countryName": country_name,
            "isHeadquarter": code.ends_with("XXX"),
            "swiftCode": code
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn registered_branch_is_listed_under_its_headquarters(
            (hq, branch) in headquarters_with_branch_strategy(),
            (country, country_name) in country_strategy(),
        ) {
            let bank_name = fake_bank_name();
            let address = fake_address();
            let (hq_status, branch_status, listed, stored_address) = runtime().block_on(async {
                let app = app(memory_registry());
                let (hq_status, _) = post(
                    app.clone(),
                    body(hq.as_str(), country.as_str(), &country_name, &bank_name, Some(&address)),
                )
                .await;
                let (branch_status, _) = post(
                    app.clone(),
                    body(branch.as_str(), country.as_str(), &country_name, &bank_name, None),
                )
                .await;
                let (_, view) = get(app, &format!("/v1/swift-codes/{}", hq)).await;
                let listed: Vec<String> = view["branches"]
                    .as_array()
                    .map(|branches| {
                        branches
                            .iter()
                            .filter_map(|b| b["swiftCode"].as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default();
                let stored_address = view["address"].as_str().map(str::to_string);
                (hq_status, branch_status, listed, stored_address)
            });

            prop_assert_eq!(hq_status, StatusCode::OK);
            prop_assert_eq!(branch_status, StatusCode::OK);
            prop_assert_eq!(listed, vec![branch.to_string()]);
            prop_assert_eq!(stored_address, Some(address));
        }

        #[test]
        fn unregistered_codes_are_not_found(code in swift_code_strategy()) {
            let (lookup, removal) = runtime().block_on(async {
                let app = app(memory_registry());
                let uri = format!("/v1/swift-codes/{}", code);
                let (lookup, _) = get(app.clone(), &uri).await;
                let (removal, _) = delete(app, &uri).await;
                (lookup, removal)
            });

            prop_assert_eq!(lookup, StatusCode::NOT_FOUND);
            prop_assert_eq!(removal, StatusCode::NOT_FOUND);
        }
    }
}

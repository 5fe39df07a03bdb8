#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use reqwest::{Client, redirect::Policy};
use serde_json::json;
// self
use blink_debit::{
	Error, RequestOptions, ReqwestBlinkDebitClient,
	config::ClientConfig,
	error::TokenError,
	http::ReqwestHttpClient,
	model::{
		Amount, AuthFlowDetail, Bank, ConsentId, ConsentStatus, Pcr, SingleConsentRequest,
	},
	retry::RetryPolicy,
	url::Url,
	uuid::Uuid,
};

const TOKEN_BODY: &str =
	"{\"access_token\":\"live-token\",\"token_type\":\"bearer\",\"expires_in\":3600}";

fn build_config(server: &MockServer, retry: RetryPolicy) -> ClientConfig {
	ClientConfig::builder()
		.debit_url(Url::parse(&server.base_url()).expect("Mock server URL should parse."))
		.client_id("merchant-client")
		.client_secret("merchant-secret")
		.retry_policy(retry)
		.build()
		.expect("Loopback configuration should validate.")
}

// The mock server presents a self-signed certificate.
fn build_client(server: &MockServer, retry: RetryPolicy) -> ReqwestBlinkDebitClient {
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.redirect(Policy::none())
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Test HTTP client should build."),
	);

	ReqwestBlinkDebitClient::with_config(&build_config(server, retry), http_client)
		.expect("Client should build.")
}

fn consent_body(id: Uuid, status: &str) -> String {
	json!({
		"consent_id": id,
		"status": status,
		"creation_timestamp": "2026-03-01T10:00:00+13:00",
		"detail": {
			"type": "single",
			"flow": {
				"detail": {
					"type": "redirect",
					"bank": "PNZ",
					"redirect_uri": "https://merchant.example/return"
				}
			},
			"pcr": { "particulars": "coffee" },
			"amount": { "currency": "NZD", "total": "4.50" }
		}
	})
	.to_string()
}

#[tokio::test]
async fn access_token_is_fetched_once_and_reused() {
	let server = MockServer::start_async().await;
	let id = Uuid::new_v4();
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let consent_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(format!("/payments/v1/single-consents/{id}"))
				.header("authorization", "Bearer live-token")
				.header_exists("request-id")
				.header_exists("x-correlation-id");
			then.status(200)
				.header("content-type", "application/json")
				.body(consent_body(id, "Authorised"));
		})
		.await;
	let client = build_client(&server, RetryPolicy::default());

	for _ in 0..2 {
		let consent = client
			.get_single_consent(ConsentId::from_uuid(id), &RequestOptions::default())
			.await
			.expect("Consent lookup should succeed.");

		assert_eq!(consent.status, ConsentStatus::Authorised);
	}

	token_mock.assert_calls_async(1).await;
	consent_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn create_sends_an_idempotent_json_body() {
	let server = MockServer::start_async().await;
	let id = Uuid::new_v4();
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/payments/v1/single-consents")
				.header("content-type", "application/json")
				.header_exists("idempotency-key");
			then.status(201)
				.header("content-type", "application/json")
				.json_body(json!({ "consent_id": id, "redirect_uri": "https://bank.example" }));
		})
		.await;
	let client = build_client(&server, RetryPolicy::default());
	let request = SingleConsentRequest {
		flow: AuthFlowDetail::Redirect {
			bank: Bank::Pnz,
			redirect_uri: "https://merchant.example/return".into(),
			redirect_to_app: Some(true),
		}
		.into(),
		pcr: Pcr { particulars: "coffee".into(), ..Default::default() },
		amount: Amount::nzd("4.50"),
		hashed_customer_identifier: None,
	};
	let created = client
		.create_single_consent(&request, &RequestOptions::default())
		.await
		.expect("Consent creation should succeed.");

	assert_eq!(created.consent_id.into_uuid(), id);
	assert_eq!(created.redirect_uri.as_deref(), Some("https://bank.example"));

	create_mock.assert_async().await;
}

#[tokio::test]
async fn rejected_credentials_surface_as_token_errors() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let client = build_client(&server, RetryPolicy::default());
	let err = client
		.get_meta(&RequestOptions::default())
		.await
		.expect_err("Invalid credentials should fail.");

	assert!(matches!(err, Error::Token(TokenError::Rejected { status: Some(401), .. })));

	token_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn throttling_details_reach_the_caller() {
	let server = MockServer::start_async().await;
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let meta_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/payments/v1/meta");
			then.status(429)
				.header("content-type", "application/json")
				.header("retry-after", "30")
				.body("{\"code\":\"rate_limited\",\"message\":\"Slow down\"}");
		})
		.await;
	let client = build_client(&server, RetryPolicy::disabled());
	let err = client
		.get_meta(&RequestOptions::default())
		.await
		.expect_err("Throttled requests should fail when retries are disabled.");
	let Error::Service(err) = err else {
		panic!("Throttling should surface as a service error.");
	};

	assert_eq!(err.status, Some(429));
	assert_eq!(err.code.as_deref(), Some("rate_limited"));
	assert_eq!(err.retry_after, Some(time::Duration::seconds(30)));

	meta_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn await_helper_polls_over_http() {
	let server = MockServer::start_async().await;
	let id = Uuid::new_v4();
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let consent_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/payments/v1/single-consents/{id}"));
			then.status(200)
				.header("content-type", "application/json")
				.body(consent_body(id, "Consumed"));
		})
		.await;
	let client = build_client(&server, RetryPolicy::default());
	let consent = client
		.await_authorised_single_consent(ConsentId::from_uuid(id), 5)
		.await
		.expect("Consumed consents settle immediately.");

	assert_eq!(consent.status, ConsentStatus::Consumed);

	consent_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn rejected_api_token_is_refreshed_and_the_request_reissued() {
	let server = MockServer::start_async().await;
	let mut stale_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"stale-token\",\"token_type\":\"bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let mut warm_up_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/payments/v1/meta")
				.header("authorization", "Bearer stale-token");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let client = build_client(&server, RetryPolicy::default());

	client.get_meta(&RequestOptions::default()).await.expect("The first token should work.");

	stale_token_mock.delete_async().await;
	warm_up_mock.delete_async().await;

	let fresh_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let rejected_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/payments/v1/meta")
				.header("authorization", "Bearer stale-token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"code\":\"invalid_token\",\"message\":\"Token revoked\"}");
		})
		.await;
	let accepted_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/payments/v1/meta")
				.header("authorization", "Bearer live-token");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let banks = client
		.get_meta(&RequestOptions::default())
		.await
		.expect("The re-issued request should succeed with the refreshed token.");

	assert!(banks.is_empty());

	fresh_token_mock.assert_calls_async(1).await;
	rejected_mock.assert_calls_async(1).await;
	accepted_mock.assert_calls_async(1).await;
}

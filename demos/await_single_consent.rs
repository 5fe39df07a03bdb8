//! Creates a single consent against a mock Blink Debit deployment and waits for the customer
//! to authorise it over reqwest with client-credentials tokens. The mock server uses a
//! self-signed certificate, so the demo transport skips verification.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use reqwest::Client;
use serde_json::json;
// self
use blink_debit::{
	RequestOptions, ReqwestBlinkDebitClient,
	config::ClientConfig,
	http::ReqwestHttpClient,
	model::{Amount, AuthFlowDetail, Bank, Pcr, SingleConsentRequest},
	url::Url,
	uuid::Uuid,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let consent_id = Uuid::new_v4();
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let _create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/payments/v1/single-consents");
			then.status(201).header("content-type", "application/json").json_body(json!({
				"consent_id": consent_id,
				"redirect_uri": "https://obabank.example/authorise"
			}));
		})
		.await;
	let _consent_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/payments/v1/single-consents/{consent_id}"));
			then.status(200).header("content-type", "application/json").json_body(json!({
				"consent_id": consent_id,
				"status": "Authorised",
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
			}));
		})
		.await;
	let config = ClientConfig::builder()
		.debit_url(Url::parse(&server.base_url())?)
		.client_id("demo-client")
		.client_secret("demo-secret")
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = ReqwestBlinkDebitClient::with_config(&config, http_client)?;
	let request = SingleConsentRequest {
		flow: AuthFlowDetail::Redirect {
			bank: Bank::Pnz,
			redirect_uri: "https://merchant.example/return".into(),
			redirect_to_app: None,
		}
		.into(),
		pcr: Pcr { particulars: "coffee".into(), ..Default::default() },
		amount: Amount::nzd("4.50"),
		hashed_customer_identifier: None,
	};
	let created = client.create_single_consent(&request, &RequestOptions::default()).await?;

	println!("Send the customer to {:?}.", created.redirect_uri);

	let consent = client.await_authorised_single_consent(created.consent_id, 60).await?;

	println!("Consent {} is {}.", consent.consent_id, consent.status);

	token_mock.assert_async().await;

	Ok(())
}

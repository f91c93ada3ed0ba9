//! Daraja (M-Pesa) Gateway Client
//!
//! Two-step STK push: fetch an OAuth client-credentials token, then post
//! the push request. The request password is
//! base64(shortcode + passkey + timestamp) with the timestamp in
//! `YYYYMMDDHHMMSS`, per the gateway's API contract.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::gateway::{PaymentGateway, StkPushReceipt};
use crate::error::{WalletError, WalletResult};

/// Sandbox host used when no base URL is configured
pub const SANDBOX_BASE_URL: &str = "https://sandbox.safaricom.co.ke";

/// Gateway credentials and endpoints, injected from the environment
#[derive(Debug, Clone)]
pub struct DarajaConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub shortcode: String,
    pub passkey: String,
    /// Gateway host, e.g. the sandbox default
    pub base_url: String,
    /// Public base of this service, used to build the callback URL
    pub callback_base_url: String,
}

/// HTTP client for the Daraja gateway
#[derive(Clone)]
pub struct DarajaClient {
    http: reqwest::Client,
    config: DarajaConfig,
}

impl DarajaClient {
    pub fn new(config: DarajaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn oauth_token(&self) -> WalletResult<String> {
        let url = format!(
            "{}/oauth/v1/generate?grant_type=client_credentials",
            self.config.base_url
        );
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.consumer_key, Some(&self.config.consumer_secret))
            .send()
            .await
            .map_err(gateway_err)?
            .error_for_status()
            .map_err(gateway_err)?;

        let token: OauthTokenResponse = response.json().await.map_err(gateway_err)?;
        Ok(token.access_token)
    }
}

fn gateway_err(err: reqwest::Error) -> WalletError {
    WalletError::Gateway(err.to_string())
}

#[derive(Deserialize)]
struct OauthTokenResponse {
    access_token: String,
}

#[derive(Serialize)]
struct StkPushRequest<'a> {
    #[serde(rename = "BusinessShortCode")]
    business_short_code: &'a str,
    #[serde(rename = "Password")]
    password: String,
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "TransactionType")]
    transaction_type: &'static str,
    #[serde(rename = "Amount")]
    amount: i64,
    #[serde(rename = "PartyA")]
    party_a: &'a str,
    #[serde(rename = "PartyB")]
    party_b: &'a str,
    #[serde(rename = "PhoneNumber")]
    phone_number: &'a str,
    #[serde(rename = "CallBackURL")]
    callback_url: String,
    #[serde(rename = "AccountReference")]
    account_reference: &'static str,
    #[serde(rename = "TransactionDesc")]
    transaction_desc: &'static str,
}

#[derive(Deserialize)]
struct StkPushResponse {
    #[serde(rename = "MerchantRequestID")]
    merchant_request_id: Option<String>,
    #[serde(rename = "CheckoutRequestID")]
    checkout_request_id: Option<String>,
    #[serde(rename = "ResponseDescription")]
    response_description: Option<String>,
    #[serde(rename = "CustomerMessage")]
    customer_message: Option<String>,
}

impl PaymentGateway for DarajaClient {
    async fn initiate_stk_push(
        &self,
        principal: Uuid,
        amount: i64,
        phone_number: &str,
    ) -> WalletResult<StkPushReceipt> {
        let access_token = self.oauth_token().await?;

        let timestamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let password = BASE64.encode(format!(
            "{}{}{}",
            self.config.shortcode, self.config.passkey, timestamp
        ));
        let callback_url = format!(
            "{}/api/wallet/mpesa/callback?userId={}",
            self.config.callback_base_url, principal
        );

        let request = StkPushRequest {
            business_short_code: &self.config.shortcode,
            password,
            timestamp,
            transaction_type: "CustomerPayBillOnline",
            amount,
            party_a: phone_number,
            party_b: &self.config.shortcode,
            phone_number,
            callback_url,
            account_reference: "BookSwap",
            transaction_desc: "Token Purchase",
        };

        let url = format!("{}/mpesa/stkpush/v1/processrequest", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await
            .map_err(gateway_err)?
            .error_for_status()
            .map_err(gateway_err)?;

        let body: StkPushResponse = response.json().await.map_err(gateway_err)?;

        Ok(StkPushReceipt {
            merchant_request_id: body.merchant_request_id,
            checkout_request_id: body.checkout_request_id,
            response_description: body.response_description,
            customer_message: body.customer_message,
        })
    }
}

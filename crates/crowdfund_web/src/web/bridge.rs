//! Bindings to the `crowdfund*` globals installed by `bridge.js`.
//!
//! The JS side owns the wallet connector and the generated contract proxy.
//! Every function returns a promise; integers cross the boundary as decimal
//! strings so nothing is rounded through an f64.

use crowdfund::error::ClientError;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = crowdfundWalletConnect)]
    pub(super) async fn wallet_connect() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = crowdfundWalletDisconnect)]
    pub(super) async fn wallet_disconnect() -> Result<JsValue, JsValue>;

    /// Resolves to the current account address, or `null`.
    #[wasm_bindgen(catch, js_name = crowdfundWalletAccount)]
    pub(super) async fn wallet_account() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = crowdfundWalletBalance)]
    pub(super) async fn wallet_balance() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = crowdfundBaseAssetId)]
    pub(super) async fn base_asset_id() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = crowdfundCreateCampaign)]
    pub(super) async fn create_campaign(
        contract_id: &str,
        target_goal: &str,
        deadline: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = crowdfundListCampaigns)]
    pub(super) async fn list_campaigns(contract_id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = crowdfundGetCampaign)]
    pub(super) async fn get_campaign(contract_id: &str, id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = crowdfundContribute)]
    pub(super) async fn contribute(
        contract_id: &str,
        id: &str,
        amount: &str,
        asset_id: &str,
    ) -> Result<JsValue, JsValue>;
}

/// Round-trip through `JSON.stringify`; `undefined` maps to `null`.
pub(super) fn to_json(value: &JsValue) -> Result<Value, ClientError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let text = js_sys::JSON::stringify(value)
        .map_err(|e| ClientError::Decode(error_message(&e)))?
        .as_string()
        .unwrap_or_else(|| "null".to_string());
    Ok(serde_json::from_str(&text)?)
}

/// Best-effort text of a rejected promise. Classification matches on it.
pub(super) fn error_message(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    if let Some(s) = err.as_string() {
        return s;
    }
    js_sys::JSON::stringify(err)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

pub(super) fn call_error(err: JsValue) -> ClientError {
    ClientError::Call(error_message(&err))
}

pub(super) fn wallet_error(err: JsValue) -> ClientError {
    ClientError::Wallet(error_message(&err))
}

/// Browser UTC offset, in minutes west of UTC, at `local` (a
/// `datetime-local` value) or now when `local` is empty or unparsable.
pub(super) fn timezone_offset_minutes(local: &str) -> i32 {
    let at = js_sys::Date::new(&JsValue::from_str(local));
    let minutes = at.get_timezone_offset();
    if minutes.is_nan() {
        js_sys::Date::new_0().get_timezone_offset() as i32
    } else {
        minutes as i32
    }
}

pub(super) fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

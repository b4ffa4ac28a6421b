//! Payment Method Model
//!
//! A payment option owned by exactly one store. `code` is the short machine
//! key, unique per store (case-insensitive). `config` is an opaque JSON
//! document whose shape depends on the method type; the engine only cares
//! whether it is a non-empty object.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Code given to the self-healed reserved (cash) method
pub const RESERVED_METHOD_CODE: &str = "cash";

/// Codes recognised as the reserved method (trimmed, case-insensitive)
pub const RESERVED_CODE_ALIASES: &[&str] = &["cash", "bargeld"];

/// Whether `code` designates the reserved method
pub fn is_reserved_code(code: &str) -> bool {
    let code = code.trim();
    RESERVED_CODE_ALIASES
        .iter()
        .any(|alias| alias.eq_ignore_ascii_case(code))
}

/// Payment method entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub display_name: String,
    pub code: String,
    pub icon: Option<String>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub config: Option<Value>,
    pub is_active: bool,
    pub disabled_by_super_admin: bool,
    pub sort_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PaymentMethod {
    pub fn is_reserved(&self) -> bool {
        is_reserved_code(&self.code)
    }

    /// `config` is present, an object, and has at least one key
    pub fn has_usable_config(&self) -> bool {
        is_usable_config(self.config.as_ref())
    }
}

/// Create payment method payload
///
/// Required text fields default to empty so that a missing field surfaces as
/// a validation error from the service instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentMethodCreate {
    #[serde(default)]
    pub store_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub code: String,
    pub icon: Option<String>,
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub config: Option<Value>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Update payment method payload
///
/// Only these fields are mutable. The nullable ones (`icon`, `bg_color`,
/// `text_color`, `config`) distinguish an absent key (left unchanged) from an
/// explicit `null` (cleared).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentMethodUpdate {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub code: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub bg_color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_color: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    pub disabled_by_super_admin: Option<bool>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub config: Option<Option<Value>>,
}

/// Admin-shaped record: the stored method plus whether a global override
/// currently hides its code from customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodWithStatus {
    #[serde(flatten)]
    pub method: PaymentMethod,
    pub disabled_globally: bool,
}

/// Result of listing a store's methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodListing {
    /// Filtered customer view
    Customer(Vec<PaymentMethod>),
    /// Unfiltered, annotated admin view
    Admin(Vec<PaymentMethodWithStatus>),
}

impl MethodListing {
    /// Codes in listing order
    pub fn codes(&self) -> Vec<&str> {
        match self {
            Self::Customer(methods) => methods.iter().map(|m| m.code.as_str()).collect(),
            Self::Admin(methods) => methods.iter().map(|m| m.method.code.as_str()).collect(),
        }
    }
}

/// `Some(non-empty object)` check shared by the resolver and the model
pub fn is_usable_config(config: Option<&Value>) -> bool {
    matches!(config, Some(Value::Object(map)) if !map.is_empty())
}

/// Normalize an incoming config value into a structured document
///
/// - object: kept as is
/// - string: parsed as JSON; kept if it yields an object, otherwise wrapped
///   as `{"raw": <string>}`
/// - null: cleared
/// - any other JSON value: wrapped as `{"value": <v>}`
pub fn normalize_config(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(_) => Some(value),
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(parsed @ Value::Object(_)) => Some(parsed),
            _ => Some(wrap("raw", Value::String(raw))),
        },
        other => Some(wrap("value", other)),
    }
}

fn wrap(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Deserialize a present field (even `null`) as `Some(..)`
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

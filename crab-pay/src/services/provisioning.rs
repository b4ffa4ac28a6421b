//! 默认支付方式预配
//!
//! Seeds are plain data so callers (and tests) can substitute their own table.

use shared::models::{PaymentMethod, PaymentMethodCreate};

use super::payment_methods::PaymentMethodService;
use crate::utils::{AppResult, FailureKind};

/// Presentation and flags of one seeded method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSeed {
    pub name: &'static str,
    pub display_name: &'static str,
    pub code: &'static str,
    pub icon: &'static str,
    pub bg_color: &'static str,
    pub text_color: &'static str,
    pub sort_order: i32,
    pub is_active: bool,
}

/// The reserved method, also used by self-healing
pub const RESERVED_METHOD_SEED: MethodSeed = MethodSeed {
    name: "Cash",
    display_name: "Cash",
    code: "cash",
    icon: "banknote",
    bg_color: "#16a34a",
    text_color: "#ffffff",
    sort_order: 0,
    is_active: true,
};

pub const DEFAULT_METHOD_SEEDS: &[MethodSeed] = &[
    RESERVED_METHOD_SEED,
    MethodSeed {
        name: "Card",
        display_name: "Credit / Debit Card",
        code: "card",
        icon: "credit-card",
        bg_color: "#2563eb",
        text_color: "#ffffff",
        sort_order: 1,
        is_active: true,
    },
    MethodSeed {
        name: "PayPal",
        display_name: "PayPal",
        code: "paypal",
        icon: "wallet",
        bg_color: "#003087",
        text_color: "#ffffff",
        sort_order: 2,
        is_active: false,
    },
];

impl MethodSeed {
    pub fn to_create(&self, store_id: i64) -> PaymentMethodCreate {
        PaymentMethodCreate {
            store_id,
            name: self.name.to_string(),
            display_name: self.display_name.to_string(),
            code: self.code.to_string(),
            icon: Some(self.icon.to_string()),
            bg_color: Some(self.bg_color.to_string()),
            text_color: Some(self.text_color.to_string()),
            config: None,
            sort_order: Some(self.sort_order),
            is_active: Some(self.is_active),
        }
    }

    /// Fully resolved record with a fresh id
    pub(crate) fn to_method(&self, store_id: i64, sort_order: i32, now: i64) -> PaymentMethod {
        PaymentMethod {
            id: shared::util::snowflake_id(),
            store_id,
            name: self.name.to_string(),
            display_name: self.display_name.to_string(),
            code: self.code.to_string(),
            icon: Some(self.icon.to_string()),
            bg_color: Some(self.bg_color.to_string()),
            text_color: Some(self.text_color.to_string()),
            config: None,
            is_active: self.is_active,
            disabled_by_super_admin: false,
            sort_order,
            created_at: now,
            updated_at: now,
        }
    }
}

impl PaymentMethodService {
    /// Create every seed whose code the store does not have yet.
    /// Returns how many were created.
    pub async fn provision_store(&self, store_id: i64, seeds: &[MethodSeed]) -> AppResult<usize> {
        let mut created = 0;
        for seed in seeds {
            match self.create(seed.to_create(store_id)).await {
                Ok(_) => created += 1,
                Err(e) if e.kind() == FailureKind::Conflict => {
                    tracing::debug!(store_id = %store_id, code = %seed.code, "Seed already present, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        if created > 0 {
            tracing::info!(store_id = %store_id, created, "Provisioned default payment methods");
        }
        Ok(created)
    }

    /// [`provision_store`](Self::provision_store) for every known store
    pub async fn provision_all_stores(&self, seeds: &[MethodSeed]) -> AppResult<usize> {
        let store_ids = self.stores().list_store_ids().await?;
        let mut created = 0;
        for store_id in &store_ids {
            created += self.provision_store(*store_id, seeds).await?;
        }
        tracing::info!(stores = store_ids.len(), created, "Default payment method provisioning finished");
        Ok(created)
    }
}

//! Visibility Resolver
//!
//! Decides which of a store's payment methods a viewer sees.
//!
//! - 顾客视图: 先按门店开关过滤 (active + 可用 config, 保留方式豁免 config),
//!   排除平台逐条禁用, 再排除全局禁用 code
//! - 管理视图: 不过滤, 每条附带 `disabled_globally` 标注
//!
//! Both views are ordered by `sort_order`, then `created_at`, then `id`.

use std::collections::HashSet;

use shared::models::{PaymentMethod, PaymentMethodWithStatus};

/// Store-level gate: active, and either reserved or carrying a usable config,
/// and not killed by the platform operator
pub fn passes_store_gate(method: &PaymentMethod) -> bool {
    method.is_active
        && (method.is_reserved() || method.has_usable_config())
        && !method.disabled_by_super_admin
}

/// `disabled_codes` must already be lower-cased
pub fn is_globally_disabled(code: &str, disabled_codes: &HashSet<String>) -> bool {
    disabled_codes.contains(&code.trim().to_lowercase())
}

/// Filtered, end-user-facing list
pub fn customer_view(
    methods: Vec<PaymentMethod>,
    disabled_codes: &HashSet<String>,
) -> Vec<PaymentMethod> {
    let total = methods.len();
    let store_visible: Vec<PaymentMethod> = methods.into_iter().filter(passes_store_gate).collect();
    let after_store_gate = store_visible.len();

    let mut visible: Vec<PaymentMethod> = store_visible
        .into_iter()
        .filter(|m| !is_globally_disabled(&m.code, disabled_codes))
        .collect();

    tracing::debug!(
        total,
        after_store_gate,
        visible = visible.len(),
        "Resolved customer payment methods"
    );

    sort_methods(&mut visible);
    visible
}

/// Unfiltered list annotated with the global override state
pub fn admin_view(
    mut methods: Vec<PaymentMethod>,
    disabled_codes: &HashSet<String>,
) -> Vec<PaymentMethodWithStatus> {
    sort_methods(&mut methods);
    methods
        .into_iter()
        .map(|method| {
            let disabled_globally = is_globally_disabled(&method.code, disabled_codes);
            PaymentMethodWithStatus {
                method,
                disabled_globally,
            }
        })
        .collect()
}

pub fn sort_methods(methods: &mut [PaymentMethod]) {
    methods.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn method(id: i64, code: &str, config: Option<Value>) -> PaymentMethod {
        PaymentMethod {
            id,
            store_id: 1,
            name: code.to_string(),
            display_name: code.to_string(),
            code: code.to_string(),
            icon: None,
            bg_color: None,
            text_color: None,
            config,
            is_active: true,
            disabled_by_super_admin: false,
            sort_order: id as i32,
            created_at: 100,
            updated_at: 100,
        }
    }

    fn disabled(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_reserved_method_exempt_from_config() {
        let cash = method(1, "cash", None);
        assert!(passes_store_gate(&cash));

        let mut inactive = cash.clone();
        inactive.is_active = false;
        assert!(!passes_store_gate(&inactive));
    }

    #[test]
    fn test_store_gate_requires_non_empty_object() {
        assert!(!passes_store_gate(&method(2, "card", None)));
        assert!(!passes_store_gate(&method(2, "card", Some(json!({})))));
        assert!(!passes_store_gate(&method(2, "card", Some(json!("legacy")))));
        assert!(passes_store_gate(&method(2, "card", Some(json!({"provider": "x"})))));

        let mut killed = method(2, "card", Some(json!({"provider": "x"})));
        killed.disabled_by_super_admin = true;
        assert!(!passes_store_gate(&killed));
    }

    #[test]
    fn test_customer_view_excludes_global_codes() {
        let methods = vec![
            method(1, "cash", None),
            method(2, "Card", Some(json!({"provider": "x"}))),
            method(3, "sepa", Some(json!({"iban": "DE.."}))),
        ];
        let visible = customer_view(methods, &disabled(&["card"]));
        let codes: Vec<&str> = visible.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["cash", "sepa"]);
    }

    #[test]
    fn test_admin_view_keeps_everything() {
        let mut inactive = method(3, "sepa", None);
        inactive.is_active = false;
        let methods = vec![
            inactive,
            method(2, "card", Some(json!({}))),
            method(1, "cash", None),
        ];
        let listed = admin_view(methods, &disabled(&["card"]));

        let codes: Vec<&str> = listed.iter().map(|m| m.method.code.as_str()).collect();
        assert_eq!(codes, vec!["cash", "card", "sepa"]);
        let flags: Vec<bool> = listed.iter().map(|m| m.disabled_globally).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_sort_ties_broken_by_created_at() {
        let mut a = method(10, "a", None);
        let mut b = method(11, "b", None);
        let mut c = method(12, "c", None);
        a.sort_order = 1;
        b.sort_order = 1;
        c.sort_order = 0;
        a.created_at = 200;
        b.created_at = 150;
        let mut methods = vec![a, b, c];
        sort_methods(&mut methods);
        let codes: Vec<&str> = methods.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["c", "b", "a"]);
    }
}

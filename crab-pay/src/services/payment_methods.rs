//! Payment Method Service
//!
//! Per-store CRUD with validation, `(store, code)` uniqueness and self-healing
//! of the reserved (cash) method. Listing composes the store records with the
//! global override set through [`visibility`](super::visibility).

use std::sync::Arc;

use shared::models::{
    MethodListing, PaymentMethod, PaymentMethodCreate, PaymentMethodUpdate, is_reserved_code,
    normalize_config,
};
use sqlx::SqlitePool;

use super::global_config::GlobalPaymentConfigService;
use super::provisioning::RESERVED_METHOD_SEED;
use super::store_directory::StoreDirectory;
use super::visibility;
use crate::db::repository::{RepoError, payment_method};
use crate::utils::validation::{
    MAX_CODE_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
    validate_sort_order,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct PaymentMethodService {
    pool: SqlitePool,
    stores: Arc<dyn StoreDirectory>,
    global: GlobalPaymentConfigService,
}

impl PaymentMethodService {
    pub fn new(
        pool: SqlitePool,
        stores: Arc<dyn StoreDirectory>,
        global: GlobalPaymentConfigService,
    ) -> Self {
        Self {
            pool,
            stores,
            global,
        }
    }

    pub fn stores(&self) -> &dyn StoreDirectory {
        self.stores.as_ref()
    }

    /// Make sure the store has an active reserved method.
    ///
    /// A concurrent caller may insert it first; the resulting uniqueness
    /// violation is swallowed since the post-condition holds either way.
    pub async fn ensure_reserved_method(&self, store_id: i64) -> AppResult<()> {
        self.stores.require_store(store_id).await?;
        let now = shared::util::now_millis();

        if let Some(existing) = payment_method::find_reserved(&self.pool, store_id).await? {
            if !existing.is_active {
                tracing::warn!(store_id = %store_id, id = %existing.id, "Reserved payment method was inactive, reactivating");
                payment_method::set_active(&self.pool, existing.id, true, now).await?;
            }
            return Ok(());
        }

        // 保留方式排在最前
        let sort_order = payment_method::min_sort_order(&self.pool, store_id)
            .await?
            .map(|min| min.min(1).saturating_sub(1))
            .unwrap_or(0);
        let record = RESERVED_METHOD_SEED.to_method(store_id, sort_order, now);

        match payment_method::insert(&self.pool, &record).await {
            Ok(created) => {
                tracing::info!(store_id = %store_id, id = %created.id, "Reserved payment method created");
                Ok(())
            }
            Err(RepoError::Duplicate(msg)) => {
                tracing::debug!(store_id = %store_id, reason = %msg, "Reserved payment method created concurrently");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Store methods for a viewer: customer view when `active_only`,
    /// otherwise the annotated admin view
    pub async fn list_methods(&self, store_id: i64, active_only: bool) -> AppResult<MethodListing> {
        self.ensure_reserved_method(store_id).await?;

        let methods = payment_method::find_by_store(&self.pool, store_id).await?;
        let disabled_codes = self.global.disabled_codes().await;

        Ok(if active_only {
            MethodListing::Customer(visibility::customer_view(methods, &disabled_codes))
        } else {
            MethodListing::Admin(visibility::admin_view(methods, &disabled_codes))
        })
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<PaymentMethod> {
        payment_method::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::method_not_found(id))
    }

    pub async fn create(&self, data: PaymentMethodCreate) -> AppResult<PaymentMethod> {
        let name = validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        let display_name = validate_required_text(&data.display_name, "display_name", MAX_NAME_LEN)?;
        let code = validate_required_text(&data.code, "code", MAX_CODE_LEN)?;
        validate_presentation(
            data.icon.as_deref(),
            data.bg_color.as_deref(),
            data.text_color.as_deref(),
        )?;
        validate_sort_order(data.sort_order)?;

        let store_id = data.store_id;
        self.stores.require_store(store_id).await?;
        self.ensure_code_available(store_id, &code, None).await?;

        let sort_order = match data.sort_order {
            Some(order) => order,
            None => payment_method::max_sort_order(&self.pool, store_id)
                .await?
                .map(|max| max.saturating_add(1))
                .unwrap_or(1),
        };

        let now = shared::util::now_millis();
        let method = PaymentMethod {
            id: shared::util::snowflake_id(),
            store_id,
            name,
            display_name,
            code,
            icon: data.icon,
            bg_color: data.bg_color,
            text_color: data.text_color,
            config: data.config.and_then(normalize_config),
            is_active: data.is_active.unwrap_or(true),
            disabled_by_super_admin: false,
            sort_order,
            created_at: now,
            updated_at: now,
        };

        let created = payment_method::insert(&self.pool, &method)
            .await
            .map_err(|e| conflict_or(e, store_id, &method.code))?;
        tracing::info!(store_id = %store_id, id = %created.id, code = %created.code, "Payment method created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, data: PaymentMethodUpdate) -> AppResult<PaymentMethod> {
        let existing = self.find_by_id(id).await?;
        let mut method = existing.clone();

        if let Some(name) = &data.name {
            method.name = validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(display_name) = &data.display_name {
            method.display_name = validate_required_text(display_name, "display_name", MAX_NAME_LEN)?;
        }
        if let Some(code) = &data.code {
            method.code = validate_required_text(code, "code", MAX_CODE_LEN)?;
        }
        validate_presentation(
            data.icon.as_ref().and_then(Option::as_deref),
            data.bg_color.as_ref().and_then(Option::as_deref),
            data.text_color.as_ref().and_then(Option::as_deref),
        )?;
        validate_sort_order(data.sort_order)?;
        // 显式 null 清空
        if let Some(icon) = data.icon {
            method.icon = icon;
        }
        if let Some(bg_color) = data.bg_color {
            method.bg_color = bg_color;
        }
        if let Some(text_color) = data.text_color {
            method.text_color = text_color;
        }
        if let Some(is_active) = data.is_active {
            method.is_active = is_active;
        }
        if let Some(sort_order) = data.sort_order {
            method.sort_order = sort_order;
        }
        if let Some(disabled) = data.disabled_by_super_admin {
            method.disabled_by_super_admin = disabled;
        }
        if let Some(config) = data.config {
            method.config = config.and_then(normalize_config);
        }

        // Checked on the resulting record so a rename onto a reserved code is covered too
        if method.is_reserved() && method.disabled_by_super_admin {
            return Err(AppError::reserved_protected(
                "Reserved payment method cannot be disabled by operator",
            )
            .with_detail("id", id));
        }

        if method.code != existing.code {
            self.ensure_code_available(method.store_id, &method.code, Some(id))
                .await?;
        }

        method.updated_at = shared::util::now_millis();
        let updated = payment_method::save(&self.pool, &method)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => AppError::method_not_found(id),
                other => conflict_or(other, method.store_id, &method.code),
            })?;
        tracing::info!(store_id = %updated.store_id, id = %id, code = %updated.code, "Payment method updated");
        Ok(updated)
    }

    /// Platform operator's per-record kill switch. Touches nothing else.
    pub async fn set_operator_disabled(&self, id: i64, disabled: bool) -> AppResult<PaymentMethod> {
        self.update(
            id,
            PaymentMethodUpdate {
                disabled_by_super_admin: Some(disabled),
                ..Default::default()
            },
        )
        .await
    }

    /// Deleting the reserved method is allowed; the next listing recreates it
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = self.find_by_id(id).await?;
        if existing.is_reserved() {
            tracing::warn!(store_id = %existing.store_id, id = %id, "Deleting reserved payment method, it will be recreated on next listing");
        }
        if !payment_method::delete(&self.pool, id).await? {
            return Err(AppError::method_not_found(id));
        }
        tracing::info!(store_id = %existing.store_id, id = %id, code = %existing.code, "Payment method deleted");
        Ok(())
    }

    /// Whether `user_id` owns the store. Data check only, no authentication.
    pub async fn verify_store_owner(&self, store_id: i64, user_id: i64) -> AppResult<bool> {
        let store = self.stores.require_store(store_id).await?;
        Ok(store.is_owned_by(user_id))
    }

    /// Reject a code taken in the store, or a second reserved alias
    async fn ensure_code_available(
        &self,
        store_id: i64,
        code: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        if payment_method::find_by_store_and_code(&self.pool, store_id, code, exclude_id)
            .await?
            .is_some()
        {
            return Err(AppError::code_conflict(store_id, code));
        }
        if is_reserved_code(code)
            && let Some(reserved) = payment_method::find_reserved(&self.pool, store_id).await?
            && Some(reserved.id) != exclude_id
        {
            return Err(AppError::code_conflict(store_id, code)
                .with_detail("reserved_code", reserved.code));
        }
        Ok(())
    }
}

fn validate_presentation(
    icon: Option<&str>,
    bg_color: Option<&str>,
    text_color: Option<&str>,
) -> AppResult<()> {
    validate_optional_text(icon, "icon", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(bg_color, "bg_color", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(text_color, "text_color", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// A storage-level duplicate is the losing side of a code race
fn conflict_or(err: RepoError, store_id: i64, code: &str) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::code_conflict(store_id, code),
        other => other.into(),
    }
}

//! Seller profile commands.
//!
//! # Usage
//!
//! ```bash
//! roastery sellers list
//! roastery sellers show seller-001
//! roastery sellers update seller-002 --company-name "Liquid Soul Coffee Redux" --tier premium
//! roastery sellers check-name "Premium Coffee Co." --exclude seller-001
//! roastery sellers color seller-001
//! ```

use roastery_core::{SellerPatch, SubscriptionStatus, SubscriptionTier, brand_color};
use roastery_registry::SellerRegistry;
use thiserror::Error;
use tracing::info;

/// Errors from building an update.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The `--patch` argument is not a valid seller patch.
    #[error("Invalid --patch JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Nothing to change.
    #[error("Nothing to update: pass --patch or at least one field flag")]
    Empty,
}

/// Field flags accepted by `sellers update`.
#[derive(Debug, Default)]
pub struct PatchFlags {
    pub company_name: Option<String>,
    pub mission: Option<String>,
    pub location: Option<String>,
    pub rating: Option<f64>,
    pub tier: Option<SubscriptionTier>,
    pub status: Option<SubscriptionStatus>,
}

/// Parse a `--rating` value.
///
/// # Errors
///
/// Returns an error unless the value is a number between 0 and 5.
pub fn parse_rating(value: &str) -> Result<f64, String> {
    let rating: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=5.0).contains(&rating) {
        Ok(rating)
    } else {
        Err(format!("rating must be between 0 and 5 (got {rating})"))
    }
}

/// Combine a JSON patch with field flags. Flags win over JSON fields.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or the resulting patch is empty.
pub fn build_patch(json: Option<&str>, flags: PatchFlags) -> Result<SellerPatch, PatchError> {
    let mut patch: SellerPatch = match json {
        Some(json) => serde_json::from_str(json)?,
        None => SellerPatch::default(),
    };

    let PatchFlags {
        company_name,
        mission,
        location,
        rating,
        tier,
        status,
    } = flags;
    patch.company_name = company_name.or(patch.company_name);
    patch.mission = mission.or(patch.mission);
    patch.location = location.or(patch.location);
    patch.rating = rating.or(patch.rating);
    patch.subscription_tier = tier.or(patch.subscription_tier);
    patch.subscription_status = status.or(patch.subscription_status);

    if patch.is_empty() {
        return Err(PatchError::Empty);
    }
    Ok(patch)
}

/// Print one line per seller.
#[allow(clippy::print_stdout)]
pub async fn list(registry: &SellerRegistry) {
    let sellers = registry.get_sellers_data().await;
    for record in sellers.values() {
        println!(
            "{:<16} {:<32} {:<10} {:<9} {}",
            record.id,
            record.company_name,
            record.subscription_tier,
            record.subscription_status,
            brand_color(record.id.as_str()),
        );
    }
    info!(count = sellers.len(), "Listed sellers");
}

/// Print one seller as pretty JSON.
///
/// # Errors
///
/// Returns an error if the seller does not exist.
#[allow(clippy::print_stdout)]
pub async fn show(registry: &SellerRegistry, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let record = registry
        .get_seller_profile(id)
        .await
        .ok_or_else(|| format!("Seller not found: {id}"))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Apply a patch and print the resulting record.
///
/// # Errors
///
/// Returns an error if the company name is already taken.
#[allow(clippy::print_stdout)]
pub async fn update(
    registry: &SellerRegistry,
    id: &str,
    patch: SellerPatch,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = registry.update_seller_profile(id, patch).await?;

    let status = registry.status().await;
    if let Some(e) = status.last_write_error {
        tracing::warn!(error = %e, "Update kept in memory only; the document was not written");
    }

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Print whether a name is available.
#[allow(clippy::print_stdout)]
pub async fn check_name(registry: &SellerRegistry, name: &str, exclude: Option<&str>) {
    let available = registry.is_company_name_available(name, exclude).await;
    println!("{}", if available { "available" } else { "taken" });
}

/// Print the brand color for an ID.
#[allow(clippy::print_stdout)]
pub fn color(id: &str) {
    println!("{}", brand_color(id));
}

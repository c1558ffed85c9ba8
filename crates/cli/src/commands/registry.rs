//! Registry health and maintenance commands.

use roastery_registry::SellerRegistry;
use tracing::{info, warn};

/// Load the registry and print its status as JSON.
///
/// # Errors
///
/// Returns an error if the status cannot be serialized.
#[allow(clippy::print_stdout)]
pub async fn status(registry: &SellerRegistry) -> Result<(), Box<dyn std::error::Error>> {
    registry.get_sellers_data().await;
    let status = registry.status().await;

    if !status.is_healthy() {
        warn!(
            mode = ?status.mode,
            duplicates = status.duplicate_names.len(),
            "Registry is not healthy"
        );
    }

    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

/// Force a reconcile from disk and report what happened.
///
/// # Errors
///
/// Returns an error if the document could not be loaded or written.
pub async fn reload(registry: &SellerRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let sellers = registry.reload().await;
    let status = registry.status().await;

    if let Some(e) = status.last_load_error {
        return Err(format!("Reload fell back to seed data: {e}").into());
    }
    if let Some(e) = status.last_write_error {
        return Err(format!("Reconciled document was not written: {e}").into());
    }

    info!(
        records = sellers.len(),
        location = %status.location,
        "Seller document reconciled"
    );
    Ok(())
}

//! Integration tests for the file-backed seller registry.
//!
//! Each test works on its own temporary directory. "Restarting" means
//! building a new registry over the same file.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use roastery_core::{SellerPatch, SellerRecord, SocialMedia, brand_color};
use roastery_integration_tests::TestRegistry;
use roastery_registry::seed::default_sellers;
use roastery_registry::{
    JsonFileStorage, RegistryConfig, RegistryError, RegistryMode, SellerRegistry,
};
use serde_json::json;

// =============================================================================
// Bootstrap
// =============================================================================

#[tokio::test]
async fn test_empty_store_bootstraps_seed() {
    let env = TestRegistry::new();
    let registry = env.open();

    let sellers = registry.get_sellers_data().await;

    assert_eq!(sellers.len(), 6);
    assert_eq!(sellers["seller-001"].company_name, "Premium Coffee Co.");
    assert_eq!(registry.status().await.mode, RegistryMode::Bootstrapped);

    // The seed was written so the next process starts from it
    let document = env.document_json();
    assert_eq!(document.as_object().unwrap().len(), 6);
    assert_eq!(document["seller-001"]["companyName"], "Premium Coffee Co.");
}

#[tokio::test]
async fn test_whitespace_document_bootstraps_seed() {
    let env = TestRegistry::new();
    env.write_document("  \n\t ");
    let registry = env.open();

    assert_eq!(*registry.get_sellers_data().await, default_sellers());
    assert_eq!(registry.status().await.mode, RegistryMode::Bootstrapped);
    assert!(registry.status().await.last_load_error.is_none());
}

#[tokio::test]
async fn test_missing_parent_directory_is_created() {
    let env = TestRegistry::new();
    let path = env.dir().join("nested").join("data").join("sellers.json");
    let registry = SellerRegistry::new(JsonFileStorage::new(&path));

    registry.get_sellers_data().await;

    assert!(path.exists());
    assert!(registry.status().await.is_healthy());
}

// =============================================================================
// Example scenarios
// =============================================================================

#[tokio::test]
async fn test_duplicate_rename_is_rejected_and_leaves_record_unchanged() {
    let env = TestRegistry::new();
    let registry = env.open();
    let before = registry.get_seller_profile("seller-002").await.unwrap();
    let document_before = env.read_document();

    let result = registry
        .update_seller_profile("seller-002", SellerPatch::company_name("Premium Coffee Co."))
        .await;

    assert_eq!(
        result,
        Err(RegistryError::DuplicateName {
            name: "Premium Coffee Co.".to_string()
        })
    );
    assert_eq!(registry.get_seller_profile("seller-002").await.unwrap(), before);
    assert_eq!(env.read_document(), document_before);
}

#[tokio::test]
async fn test_rename_to_free_name_succeeds() {
    let env = TestRegistry::new();
    let registry = env.open();
    let before = registry.get_seller_profile("seller-002").await.unwrap();

    let updated = registry
        .update_seller_profile(
            "seller-002",
            SellerPatch::company_name("Liquid Soul Coffee Redux"),
        )
        .await
        .unwrap();

    let after = registry.get_seller_profile("seller-002").await.unwrap();
    assert_eq!(after, updated);
    assert_eq!(after.company_name, "Liquid Soul Coffee Redux");
    assert_ne!(after.updated_at, before.updated_at);
    assert_eq!(after.mission, before.mission);
    assert_eq!(
        env.document_json()["seller-002"]["companyName"],
        "Liquid Soul Coffee Redux"
    );
}

#[tokio::test]
async fn test_unknown_id_is_provisioned() {
    let env = TestRegistry::new();
    let registry = env.open();

    let created = registry
        .update_seller_profile("new-seller-42", SellerPatch::company_name("Brand New Co"))
        .await
        .unwrap();

    assert_eq!(created.id.as_str(), "new-seller-42");
    assert_eq!(created.company_name, "Brand New Co");
    assert!(created.specialties.is_empty());
    assert!(!created.created_at.is_empty());
    assert_eq!(registry.get_sellers_data().await.len(), 7);
    assert_eq!(env.document_json()["new-seller-42"]["id"], "new-seller-42");
}

// =============================================================================
// Persistence across restarts
// =============================================================================

#[tokio::test]
async fn test_updates_survive_restart() {
    let env = TestRegistry::new();
    let first = env.open();
    first
        .update_seller_profile("seller-003", SellerPatch::company_name("Highland Roasting Co"))
        .await
        .unwrap();
    first
        .update_seller_profile("new-seller-42", SellerPatch::company_name("Brand New Co"))
        .await
        .unwrap();
    drop(first);

    let second = env.open();
    let sellers = second.get_sellers_data().await;

    assert_eq!(sellers.len(), 7);
    assert_eq!(sellers["seller-003"].company_name, "Highland Roasting Co");
    assert_eq!(sellers["new-seller-42"].company_name, "Brand New Co");
    assert_eq!(second.status().await.mode, RegistryMode::Persisted);
}

#[tokio::test]
async fn test_open_loads_eagerly() {
    let env = TestRegistry::new();
    let registry = SellerRegistry::open(&env.config()).await;

    assert_eq!(registry.status().await.mode, RegistryMode::Bootstrapped);
    assert!(env.read_document().is_some());
}

#[tokio::test]
async fn test_second_process_sees_first_process_rename() {
    let env = TestRegistry::new();
    let first = env.open();
    let second = env.open();
    second.get_sellers_data().await;

    first
        .update_seller_profile("seller-004", SellerPatch::company_name("Bean and Barrel"))
        .await
        .unwrap();

    // Availability always re-reads the document
    assert!(!second.is_company_name_available("bean and barrel", None).await);
    let result = second
        .update_seller_profile("seller-005", SellerPatch::company_name("Bean and Barrel"))
        .await;
    assert!(result.is_err());
}

// =============================================================================
// Reconciliation
// =============================================================================

#[tokio::test]
async fn test_reload_reaches_fixed_point() {
    let env = TestRegistry::new();
    env.write_document(
        &json!({
            "seller-001": { "companyName": "Premium Coffee Company", "brandColor": "amber" },
            "custom-7": { "companyName": "Custom Roasts", "roastProfile": "light" }
        })
        .to_string(),
    );
    let registry = env.open();

    registry.reload().await;
    let first = env.read_document().unwrap();
    registry.reload().await;
    let second = env.read_document().unwrap();

    assert_eq!(first, second);
    let document = env.document_json();
    assert_eq!(document.as_object().unwrap().len(), 7);
    assert!(document["seller-001"].get("brandColor").is_none());
    assert_eq!(document["custom-7"]["roastProfile"], "light");
}

#[tokio::test]
async fn test_seed_additions_are_backfilled_without_overwriting() {
    let env = TestRegistry::new();
    env.open().get_sellers_data().await;
    env.open()
        .update_seller_profile("seller-001", SellerPatch::company_name("Premium Coffee Company"))
        .await
        .unwrap();

    let mut seed = default_sellers();
    let added = SellerRecord::new("seller-007", "Seventh Wave Roasters");
    seed.insert(added.id.clone(), added.clone());
    let registry = SellerRegistry::with_seed(JsonFileStorage::new(env.path()), seed);

    let sellers = registry.get_sellers_data().await;

    assert_eq!(sellers.len(), 7);
    assert_eq!(sellers["seller-007"], added);
    assert_eq!(sellers["seller-001"].company_name, "Premium Coffee Company");
}

#[tokio::test]
async fn test_hand_edited_nulls_keep_customizations() {
    let env = TestRegistry::new();
    env.write_document(
        &json!({
            "seller-001": { "companyName": "Customized Name" },
            "custom-7": { "companyName": "Hand Added", "rating": null }
        })
        .to_string(),
    );
    let registry = env.open();

    let sellers = registry.get_sellers_data().await;

    assert_eq!(registry.status().await.mode, RegistryMode::Persisted);
    assert!(env.other_files().is_empty());
    assert_eq!(sellers.len(), 7);
    assert_eq!(sellers["seller-001"].company_name, "Customized Name");
    assert_eq!(sellers["custom-7"].company_name, "Hand Added");
}

#[tokio::test]
async fn test_null_in_patch_clears_country_and_city() {
    let env = TestRegistry::new();
    let registry = env.open();

    let patch: SellerPatch =
        serde_json::from_value(json!({ "country": null, "city": null })).unwrap();
    registry.update_seller_profile("seller-001", patch).await.unwrap();

    let restarted = env.open();
    let record = restarted.get_seller_profile("seller-001").await.unwrap();
    assert_eq!(record.country, None);
    assert_eq!(record.city, None);
    assert_eq!(env.document_json()["seller-001"]["country"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_id_in_document_cannot_move_a_record() {
    let env = TestRegistry::new();
    env.write_document(&json!({ "seller-006": { "id": "seller-600" } }).to_string());
    let registry = env.open();

    let sellers = registry.get_sellers_data().await;

    assert_eq!(sellers["seller-006"].id.as_str(), "seller-006");
    assert!(!sellers.contains_key("seller-600"));
    assert_eq!(env.document_json()["seller-006"]["id"], "seller-006");
}

// =============================================================================
// Degraded mode
// =============================================================================

#[tokio::test]
async fn test_corrupt_document_is_quarantined_and_fails_closed() {
    let env = TestRegistry::new();
    env.write_document("{ \"seller-001\": ");
    let registry = env.open();

    // The check performs the load that finds the document unreadable
    assert!(
        !registry
            .is_company_name_available("Nobody Has This Name", None)
            .await
    );

    let status = registry.status().await;
    assert_eq!(*registry.get_sellers_data().await, default_sellers());
    assert_eq!(status.mode, RegistryMode::Degraded);
    assert!(status.last_load_error.is_some());
    assert!(status.quarantined_to.is_some());
    assert!(!status.is_healthy());

    let others = env.other_files();
    assert_eq!(others.len(), 1);
    assert!(others[0].starts_with("sellers.json.corrupt-"));
    let quarantined = std::fs::read_to_string(env.dir().join(&others[0])).unwrap();
    assert_eq!(quarantined, "{ \"seller-001\": ");

    // The seed was written in its place, so the next load is clean
    assert!(
        registry
            .is_company_name_available("Nobody Has This Name", None)
            .await
    );
    assert_eq!(registry.status().await.mode, RegistryMode::Persisted);
}

#[tokio::test]
async fn test_unreadable_document_without_quarantine_fails_closed() {
    let env = TestRegistry::new();
    // A directory where the document should be cannot be read or replaced
    std::fs::create_dir(env.path()).unwrap();
    let config = RegistryConfig {
        quarantine_corrupt: false,
        ..env.config()
    };
    let registry = SellerRegistry::from_config(&config);

    assert_eq!(*registry.get_sellers_data().await, default_sellers());
    let status = registry.status().await;
    assert_eq!(status.mode, RegistryMode::Degraded);
    assert!(status.quarantined_to.is_none());
    assert!(status.last_write_error.is_some());

    assert!(
        !registry
            .is_company_name_available("Nobody Has This Name", None)
            .await
    );
    assert!(
        registry
            .update_seller_profile("seller-002", SellerPatch::company_name("Fresh Name"))
            .await
            .is_err()
    );
    assert!(env.path().is_dir());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_renames_to_same_name_one_wins() {
    let env = TestRegistry::new();
    let registry = env.open();

    let handles: Vec<_> = ["seller-002", "seller-003", "seller-004", "seller-005"]
        .into_iter()
        .map(|id| {
            let registry = registry.clone();
            tokio::spawn(async move {
                registry
                    .update_seller_profile(id, SellerPatch::company_name("Contested Roasters"))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    let holders = env
        .document_json()
        .as_object()
        .unwrap()
        .values()
        .filter(|record| record["companyName"] == "Contested Roasters")
        .count();
    assert_eq!(holders, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_field_updates_are_not_lost() {
    let env = TestRegistry::new();
    let registry = Arc::new(env.open());

    let mission = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let patch = SellerPatch {
                mission: Some("Roast small, roast often".to_string()),
                ..SellerPatch::default()
            };
            registry.update_seller_profile("seller-001", patch).await
        })
    };
    let social = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let patch = SellerPatch {
                social_media: Some(SocialMedia {
                    instagram: Some("@highland".to_string()),
                    ..SocialMedia::default()
                }),
                ..SellerPatch::default()
            };
            registry.update_seller_profile("seller-003", patch).await
        })
    };
    mission.await.unwrap().unwrap();
    social.await.unwrap().unwrap();

    let restarted = env.open();
    let sellers = restarted.get_sellers_data().await;
    assert_eq!(sellers["seller-001"].mission, "Roast small, roast often");
    assert_eq!(
        sellers["seller-003"].social_media.instagram.as_deref(),
        Some("@highland")
    );
    // Nested objects are replaced wholesale
    assert_eq!(sellers["seller-003"].social_media.website, None);
}

// =============================================================================
// Brand color
// =============================================================================

#[test]
fn test_brand_color_is_stable_across_calls() {
    for id in ["seller-001", "seller-002", "new-seller-42", "no-digits"] {
        assert_eq!(brand_color(id), brand_color(id));
    }
    assert_eq!(brand_color("seller-001").as_str(), "emerald");
}

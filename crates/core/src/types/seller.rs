//! Seller profile records and partial updates.
//!
//! Records serialize with camelCase keys. Every `Option` field is written as
//! an explicit `null` rather than omitted: the registry merges persisted
//! records over seed records key by key, and an omitted key would let a seed
//! value reappear on the next load.
//!
//! Reading is lenient: a field holding `null` or a value of the wrong type
//! (a hand edit, or an older writer) reads as that field's default instead
//! of rejecting the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::id::{SellerId, TeamMemberId};
use super::status::{SubscriptionStatus, SubscriptionTier};

/// Normalize a company name for uniqueness comparisons (trim + case-fold).
#[must_use]
pub fn normalize_company_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Social media handles. The key set is fixed; unset handles are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

/// A member of the seller's team shown on the public profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub name: String,
    pub occupation: String,
    /// Image reference (path or URL).
    pub image: String,
}

/// A seller profile, the unit of storage in the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerRecord {
    pub id: SellerId,
    #[serde(default, deserialize_with = "lenient")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub company_size: String,
    #[serde(default, deserialize_with = "lenient")]
    pub mission: String,
    /// Logo reference (path or URL).
    #[serde(default, deserialize_with = "lenient")]
    pub logo: String,
    #[serde(default, deserialize_with = "lenient")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient")]
    pub email: String,
    /// Free-text location as entered by the seller.
    #[serde(default, deserialize_with = "lenient")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub city: Option<String>,
    /// Computed by the reviews subsystem; stored here for display only.
    /// Always finite (JSON cannot carry NaN or infinities).
    #[serde(default, deserialize_with = "lenient")]
    pub rating: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub specialties: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub social_media: SocialMedia,
    #[serde(default, deserialize_with = "lenient")]
    pub team_members: Vec<TeamMember>,
    #[serde(default, deserialize_with = "lenient")]
    pub subscription_tier: SubscriptionTier,
    #[serde(default, deserialize_with = "lenient")]
    pub subscription_status: SubscriptionStatus,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: String,
    /// Top-level keys this version does not know about, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SellerRecord {
    /// Create a record with the given ID and company name and empty profile fields.
    #[must_use]
    pub fn new(id: impl Into<SellerId>, company_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            company_name: company_name.into(),
            ..Self::default()
        }
    }

    /// The company name as used for uniqueness checks.
    #[must_use]
    pub fn normalized_company_name(&self) -> String {
        normalize_company_name(&self.company_name)
    }

    /// Shallow-merge a patch into this record.
    ///
    /// Each field present in the patch replaces the whole field on the record,
    /// nested structures included: a patch carrying `socialMedia` with only
    /// `instagram` set clears every other handle. A blank `companyName` is
    /// treated as absent. `country` and `city` can be cleared. `id` and
    /// `updatedAt` are owned by the registry and cannot be patched. A
    /// non-finite `rating` is ignored.
    pub fn apply_patch(&mut self, patch: SellerPatch) {
        let SellerPatch {
            company_name,
            company_size,
            mission,
            logo,
            phone,
            email,
            location,
            country,
            city,
            rating,
            specialties,
            certifications,
            social_media,
            team_members,
            subscription_tier,
            subscription_status,
            created_at,
        } = patch;

        if let Some(name) = company_name.filter(|n| !n.trim().is_empty()) {
            self.company_name = name;
        }
        replace(&mut self.company_size, company_size);
        replace(&mut self.mission, mission);
        replace(&mut self.logo, logo);
        replace(&mut self.phone, phone);
        replace(&mut self.email, email);
        replace(&mut self.location, location);
        replace(&mut self.country, country);
        replace(&mut self.city, city);
        replace(&mut self.rating, rating.filter(|r| r.is_finite()));
        replace(&mut self.specialties, specialties);
        replace(&mut self.certifications, certifications);
        replace(&mut self.social_media, social_media);
        replace(&mut self.team_members, team_members);
        replace(&mut self.subscription_tier, subscription_tier);
        replace(&mut self.subscription_status, subscription_status);
        replace(&mut self.created_at, created_at);
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Read a field, falling back to its default when the stored value does not fit.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Tell an explicit `null` (`Some(None)`) apart from a missing key (`None`).
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A partial update to a [`SellerRecord`].
///
/// Fields left `None` keep their current value. In JSON, a missing key leaves
/// the field alone and `null` clears `country` or `city`; for every other
/// field `null` counts as missing. Unknown keys, including `id` and
/// `updatedAt`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SellerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `Some(None)` clears the field.
    #[serde(
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<Option<String>>,
    /// `Some(None)` clears the field.
    #[serde(
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_members: Option<Vec<TeamMember>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<SubscriptionTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl SellerPatch {
    /// Patch that only renames the company.
    #[must_use]
    pub fn company_name(name: impl Into<String>) -> Self {
        Self {
            company_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The requested company name, if the patch changes it.
    #[must_use]
    pub fn requested_company_name(&self) -> Option<&str> {
        self.company_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Returns `true` if applying the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> SellerRecord {
        SellerRecord {
            social_media: SocialMedia {
                website: Some("https://premium.example".to_string()),
                instagram: Some("@premium".to_string()),
                ..SocialMedia::default()
            },
            specialties: vec!["Espresso".to_string()],
            ..SellerRecord::new("seller-001", "Premium Coffee Co.")
        }
    }

    #[test]
    fn test_normalize_company_name() {
        assert_eq!(normalize_company_name("  Premium Coffee Co. "), "premium coffee co.");
        assert_eq!(
            normalize_company_name("PREMIUM coffee co."),
            normalize_company_name("premium Coffee Co.")
        );
    }

    #[test]
    fn test_apply_patch_replaces_nested_wholesale() {
        let mut record = sample();
        record.apply_patch(SellerPatch {
            social_media: Some(SocialMedia {
                twitter: Some("@premium_tw".to_string()),
                ..SocialMedia::default()
            }),
            ..SellerPatch::default()
        });

        assert_eq!(record.social_media.twitter.as_deref(), Some("@premium_tw"));
        assert_eq!(record.social_media.website, None);
        assert_eq!(record.social_media.instagram, None);
        assert_eq!(record.specialties, vec!["Espresso".to_string()]);
    }

    #[test]
    fn test_apply_patch_ignores_blank_company_name() {
        let mut record = sample();
        record.apply_patch(SellerPatch::company_name("   "));
        assert_eq!(record.company_name, "Premium Coffee Co.");
        assert_eq!(SellerPatch::company_name("  ").requested_company_name(), None);
    }

    #[test]
    fn test_patch_ignores_id_and_updated_at_keys() {
        let patch: SellerPatch = serde_json::from_str(
            r#"{"id": "seller-999", "updatedAt": "1999-01-01", "mission": "Roast well"}"#,
        )
        .unwrap();

        let mut record = sample();
        record.updated_at = "2024-01-01T00:00:00.000Z".to_string();
        record.apply_patch(patch);

        assert_eq!(record.id.as_str(), "seller-001");
        assert_eq!(record.updated_at, "2024-01-01T00:00:00.000Z");
        assert_eq!(record.mission, "Roast well");
    }

    #[test]
    fn test_record_serializes_camel_case_with_explicit_nulls() {
        let json = serde_json::to_value(sample()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object["companyName"], "Premium Coffee Co.");
        assert!(object.contains_key("subscriptionTier"));
        assert_eq!(object["country"], Value::Null);
        assert_eq!(object["socialMedia"]["facebook"], Value::Null);
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let record: SellerRecord = serde_json::from_str(
            r#"{"id": "seller-007", "companyName": "Seven", "roastProfile": {"level": "dark"}}"#,
        )
        .unwrap();

        assert_eq!(record.extra["roastProfile"]["level"], "dark");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["roastProfile"]["level"], "dark");
    }

    #[test]
    fn test_null_clears_country_and_city() {
        let mut record = sample();
        record.country = Some("United States".to_string());
        record.city = Some("Portland".to_string());

        let patch: SellerPatch = serde_json::from_str(r#"{"country": null}"#).unwrap();
        assert_eq!(patch.country, Some(None));
        assert_eq!(patch.city, None);
        record.apply_patch(patch);

        assert_eq!(record.country, None);
        assert_eq!(record.city.as_deref(), Some("Portland"));
    }

    #[test]
    fn test_null_in_other_patch_fields_is_ignored() {
        let patch: SellerPatch =
            serde_json::from_str(r#"{"mission": null, "rating": null}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_clearing_patch_serializes_null() {
        let patch = SellerPatch {
            city: Some(None),
            ..SellerPatch::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"city":null}"#);
    }

    #[test]
    fn test_mistyped_fields_read_as_defaults() {
        let record: SellerRecord = serde_json::from_str(
            r#"{
                "id": "custom-7",
                "companyName": null,
                "mission": "Hand edited",
                "rating": null,
                "specialties": "Espresso",
                "subscriptionTier": "platinum",
                "country": 42
            }"#,
        )
        .unwrap();

        assert_eq!(record.company_name, "");
        assert_eq!(record.mission, "Hand edited");
        assert!(record.rating.abs() < f64::EPSILON);
        assert!(record.specialties.is_empty());
        assert_eq!(record.subscription_tier, SubscriptionTier::Free);
        assert_eq!(record.country, None);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_empty_patch() {
        assert!(SellerPatch::default().is_empty());
        assert!(!SellerPatch::company_name("X").is_empty());
        assert_eq!(serde_json::to_string(&SellerPatch::default()).unwrap(), "{}");
    }
}

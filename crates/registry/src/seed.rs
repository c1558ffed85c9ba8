//! Built-in seller dataset.
//!
//! The seed bootstraps an empty store and backfills any seed ID missing from
//! the persisted document, so sellers added here in a later release show up
//! on existing installs without a migration.

use roastery_core::{
    SellerId, SellerRecord, SocialMedia, SubscriptionStatus, SubscriptionTier, TeamMember,
    TeamMemberId,
};

use crate::registry::Snapshot;

const SEEDED_AT: &str = "2024-01-15T09:00:00.000Z";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn handle(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn member(id: &str, name: &str, occupation: &str) -> TeamMember {
    TeamMember {
        id: TeamMemberId::new(id),
        name: name.to_string(),
        occupation: occupation.to_string(),
        image: format!("/images/team/{id}.jpg"),
    }
}

fn seeded(id: &str, company_name: &str) -> SellerRecord {
    SellerRecord {
        logo: format!("/images/logos/{id}.png"),
        created_at: SEEDED_AT.to_string(),
        updated_at: SEEDED_AT.to_string(),
        ..SellerRecord::new(id, company_name)
    }
}

/// The default seller records, keyed by ID.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn default_sellers() -> Snapshot {
    let records = [
        SellerRecord {
            company_size: "11-50".to_string(),
            mission: "Sourcing exceptional single-origin beans and roasting them to order."
                .to_string(),
            phone: "+1 (503) 555-0101".to_string(),
            email: "hello@premiumcoffee.example".to_string(),
            location: "Portland, Oregon".to_string(),
            country: handle("United States"),
            city: handle("Portland"),
            rating: 4.8,
            specialties: strings(&["Single Origin", "Espresso", "Light Roast"]),
            certifications: strings(&["Organic", "Fair Trade"]),
            social_media: SocialMedia {
                website: handle("https://premiumcoffee.example"),
                instagram: handle("@premiumcoffeeco"),
                facebook: handle("premiumcoffeeco"),
                twitter: handle("@premiumcoffee"),
                linkedin: None,
            },
            team_members: vec![
                member("tm-001-1", "Maria Santos", "Head Roaster"),
                member("tm-001-2", "James Carter", "Green Coffee Buyer"),
            ],
            subscription_tier: SubscriptionTier::Premium,
            subscription_status: SubscriptionStatus::Active,
            ..seeded("seller-001", "Premium Coffee Co.")
        },
        SellerRecord {
            company_size: "1-10".to_string(),
            mission: "Small-batch roasts with soul, delivered fresh every week.".to_string(),
            phone: "+1 (312) 555-0102".to_string(),
            email: "team@liquidsoul.example".to_string(),
            location: "Chicago, Illinois".to_string(),
            country: handle("United States"),
            city: handle("Chicago"),
            rating: 4.6,
            specialties: strings(&["Cold Brew", "Blends"]),
            certifications: strings(&["Rainforest Alliance"]),
            social_media: SocialMedia {
                instagram: handle("@liquidsoulcoffee"),
                ..SocialMedia::default()
            },
            team_members: vec![member("tm-002-1", "Devon Price", "Founder")],
            subscription_tier: SubscriptionTier::Basic,
            subscription_status: SubscriptionStatus::Active,
            ..seeded("seller-002", "Liquid Soul Coffee")
        },
        SellerRecord {
            company_size: "51-200".to_string(),
            mission: "Direct trade partnerships with highland farms in East Africa.".to_string(),
            phone: "+254 20 555 0103".to_string(),
            email: "info@highlandroasters.example".to_string(),
            location: "Nairobi, Kenya".to_string(),
            country: handle("Kenya"),
            city: handle("Nairobi"),
            rating: 4.9,
            specialties: strings(&["Washed Process", "SL28", "Medium Roast"]),
            certifications: strings(&["Direct Trade", "Organic"]),
            social_media: SocialMedia {
                website: handle("https://highlandroasters.example"),
                linkedin: handle("highland-roasters"),
                ..SocialMedia::default()
            },
            team_members: vec![
                member("tm-003-1", "Amani Wanjiru", "Managing Director"),
                member("tm-003-2", "Peter Otieno", "Quality Lead"),
            ],
            subscription_tier: SubscriptionTier::Enterprise,
            subscription_status: SubscriptionStatus::Active,
            ..seeded("seller-003", "Highland Roasters")
        },
        SellerRecord {
            company_size: "1-10".to_string(),
            mission: "Barrel-aged coffees finished in reclaimed whiskey casks.".to_string(),
            phone: "+1 (502) 555-0104".to_string(),
            email: "cellar@beanandbarrel.example".to_string(),
            location: "Louisville, Kentucky".to_string(),
            country: handle("United States"),
            city: handle("Louisville"),
            rating: 4.4,
            specialties: strings(&["Barrel Aged", "Dark Roast"]),
            social_media: SocialMedia {
                instagram: handle("@beanandbarrel"),
                facebook: handle("beanandbarrel"),
                ..SocialMedia::default()
            },
            subscription_tier: SubscriptionTier::Free,
            subscription_status: SubscriptionStatus::Trialing,
            ..seeded("seller-004", "Bean & Barrel")
        },
        SellerRecord {
            company_size: "11-50".to_string(),
            mission: "Making the first cup of the day a ritual worth waking up for.".to_string(),
            phone: "+44 20 5550 0105".to_string(),
            email: "hello@morningritual.example".to_string(),
            location: "London, United Kingdom".to_string(),
            country: handle("United Kingdom"),
            city: handle("London"),
            rating: 4.2,
            specialties: strings(&["Filter", "Subscriptions", "Decaf"]),
            certifications: strings(&["B Corp"]),
            social_media: SocialMedia {
                website: handle("https://morningritual.example"),
                twitter: handle("@morningritual"),
                ..SocialMedia::default()
            },
            team_members: vec![member("tm-005-1", "Hannah Reid", "Roastery Manager")],
            subscription_tier: SubscriptionTier::Basic,
            subscription_status: SubscriptionStatus::PastDue,
            ..seeded("seller-005", "Morning Ritual Roastery")
        },
        SellerRecord {
            company_size: "200+".to_string(),
            mission: "A farmer-owned cooperative bringing Andean coffee straight to roasters."
                .to_string(),
            phone: "+57 1 555 0106".to_string(),
            email: "ventas@cerroverde.example".to_string(),
            location: "Huila, Colombia".to_string(),
            country: handle("Colombia"),
            city: None,
            rating: 4.7,
            specialties: strings(&["Green Coffee", "Natural Process", "Caturra"]),
            certifications: strings(&["Fair Trade", "Fair Trade", "Organic"]),
            team_members: vec![
                member("tm-006-1", "Lucia Ramirez", "Cooperative President"),
                member("tm-006-2", "Andres Molina", "Export Coordinator"),
            ],
            subscription_tier: SubscriptionTier::Premium,
            subscription_status: SubscriptionStatus::Active,
            ..seeded("seller-006", "Cerro Verde Cooperative")
        },
    ];

    records
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect()
}

/// Default profile for a seller ID seen for the first time on update.
#[must_use]
pub fn provisioned_profile(id: &str, now: &str) -> SellerRecord {
    SellerRecord {
        id: SellerId::new(id),
        company_name: format!("Seller {id}"),
        subscription_tier: SubscriptionTier::Free,
        subscription_status: SubscriptionStatus::Active,
        created_at: now.to_string(),
        updated_at: now.to_string(),
        ..SellerRecord::default()
    }
}

//! Default master data. Seeding is idempotent: records that already
//! exist (same name, same kind) are skipped via the Conflict outcome.

use anyhow::Result;
use tracing::info;

use propdesk_masters::domain::error::DomainError;
use propdesk_masters::domain::model::{DetailsInput, MasterRecord, NewMasterRecord};
use propdesk_masters::api::rest::MasterServices;
use propdesk_masters::SeaOrmMasterRepository;

#[derive(Debug, Default)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
}

fn tally(report: &mut SeedReport, outcome: Result<MasterRecord, DomainError>) -> Result<()> {
    match outcome {
        Ok(_) => report.created += 1,
        Err(DomainError::Conflict(_)) => report.skipped += 1,
        Err(e) => return Err(anyhow::anyhow!(e.to_string())),
    }
    Ok(())
}

pub async fn seed_masters(
    masters: &MasterServices<SeaOrmMasterRepository>,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    let amenities = [
        ("Swimming Pool", "leisure", true),
        ("Clubhouse", "leisure", true),
        ("Gymnasium", "fitness", true),
        ("Jogging Track", "fitness", false),
        ("Children's Play Area", "family", true),
        ("CCTV Surveillance", "security", false),
        ("Gated Security", "security", true),
        ("Power Backup", "utilities", false),
        ("Rainwater Harvesting", "utilities", false),
        ("Covered Parking", "parking", true),
    ];
    for (name, category, popular) in amenities {
        let outcome = masters
            .amenities
            .create(NewMasterRecord {
                name: name.to_owned(),
                is_popular: Some(popular),
                details: DetailsInput {
                    category: Some(category.to_owned()),
                    ..DetailsInput::default()
                },
                ..NewMasterRecord::default()
            })
            .await;
        tally(&mut report, outcome)?;
    }

    let property_types = [
        ("Apartment", "residential", true),
        ("Villa", "residential", true),
        ("Row House", "residential", false),
        ("Plot", "land", false),
        ("Office Space", "commercial", false),
        ("Retail Shop", "commercial", false),
    ];
    for (name, category, popular) in property_types {
        let outcome = masters
            .property_types
            .create(NewMasterRecord {
                name: name.to_owned(),
                is_popular: Some(popular),
                details: DetailsInput {
                    category: Some(category.to_owned()),
                    ..DetailsInput::default()
                },
                ..NewMasterRecord::default()
            })
            .await;
        tally(&mut report, outcome)?;
    }

    // Floors from two basements up to the 20th; names come from the same
    // derivation the adapter applies to display names.
    for value in -2..=20 {
        let outcome = masters
            .floors
            .create(NewMasterRecord {
                name: propdesk_masters::domain::adapters::floors::floor_display_name(value),
                sort_order: Some(i32::clamp(value + 2, 0, 9999)),
                details: DetailsInput {
                    value: Some(value),
                    ..DetailsInput::default()
                },
                ..NewMasterRecord::default()
            })
            .await;
        tally(&mut report, outcome)?;
    }

    for count in 1..=5 {
        let outcome = masters
            .rooms
            .create(NewMasterRecord {
                name: format!("{count} BHK"),
                sort_order: Some(count),
                is_popular: Some((2..=3).contains(&count)),
                details: DetailsInput {
                    value: Some(count),
                    ..DetailsInput::default()
                },
                ..NewMasterRecord::default()
            })
            .await;
        tally(&mut report, outcome)?;
    }

    for count in 1..=4 {
        let outcome = masters
            .washrooms
            .create(NewMasterRecord {
                name: format!("{count} Bathroom{}", if count == 1 { "" } else { "s" }),
                sort_order: Some(count),
                details: DetailsInput {
                    value: Some(count),
                    ..DetailsInput::default()
                },
                ..NewMasterRecord::default()
            })
            .await;
        tally(&mut report, outcome)?;
    }

    info!(
        created = report.created,
        skipped = report.skipped,
        "seed finished"
    );
    Ok(report)
}

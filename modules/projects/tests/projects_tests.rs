#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for builders, agents and projects over in-memory
//! sqlite, with the master store migrated alongside for reference checks.

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use propdesk_masters::domain::adapters::CityService;
use propdesk_masters::domain::model::{DetailsInput, NewMasterRecord};
use propdesk_masters::SeaOrmMasterRepository;
use propdesk_projects::domain::model::{
    MediaKind, NewBuilder, NewProject, PartyQuery, ProjectQuery, UnitConfiguration,
};
use propdesk_projects::{
    AgentService, BuilderService, DomainError, ProjectService, ProjectsMigrator, RepoMasterLookup,
    SeaOrmAgentRepository, SeaOrmBuilderRepository, SeaOrmProjectRepository,
};

struct Harness {
    builders: BuilderService<SeaOrmBuilderRepository>,
    agents: AgentService<SeaOrmAgentRepository>,
    projects:
        ProjectService<SeaOrmProjectRepository, SeaOrmBuilderRepository, SeaOrmAgentRepository>,
    cities: CityService<SeaOrmMasterRepository>,
}

async fn harness() -> Harness {
    // One connection: every pooled connection to sqlite::memory: would
    // otherwise see its own empty database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect");
    propdesk_masters::Migrator::up(&db, None).await.expect("masters migrate");
    ProjectsMigrator::up(&db, None).await.expect("projects migrate");

    let master_repo = Arc::new(SeaOrmMasterRepository::new(db.clone()));
    let builder_repo = Arc::new(SeaOrmBuilderRepository::new(db.clone()));
    let agent_repo = Arc::new(SeaOrmAgentRepository::new(db.clone()));
    let project_repo = Arc::new(SeaOrmProjectRepository::new(db));

    Harness {
        builders: BuilderService::new(builder_repo.clone()),
        agents: AgentService::new(agent_repo.clone()),
        projects: ProjectService::new(
            project_repo,
            builder_repo,
            agent_repo,
            Arc::new(RepoMasterLookup::new(master_repo.clone())),
        ),
        cities: CityService::new(master_repo),
    }
}

async fn seed_city(h: &Harness, name: &str) -> Uuid {
    h.cities
        .create(NewMasterRecord {
            name: name.to_owned(),
            details: DetailsInput {
                state: Some("Maharashtra".to_owned()),
                ..DetailsInput::default()
            },
            ..NewMasterRecord::default()
        })
        .await
        .expect("city")
        .id
}

fn new_project(name: &str, builder_id: Uuid, city_id: Uuid) -> NewProject {
    NewProject {
        name: name.to_owned(),
        builder_id: Some(builder_id),
        city_id: Some(city_id),
        unit_configurations: vec![UnitConfiguration {
            label: "2 BHK".to_owned(),
            bedrooms: 2,
            bathrooms: 2,
            area_sqft: Some(980.0),
            price: Some(8_500_000),
        }],
        ..NewProject::default()
    }
}

#[tokio::test]
async fn builder_names_are_unique_among_non_archived() {
    let h = harness().await;

    let acme = h
        .builders
        .create(NewBuilder {
            name: "Acme Homes".to_owned(),
            ..NewBuilder::default()
        })
        .await
        .expect("create");

    let err = h
        .builders
        .create(NewBuilder {
            name: "Acme Homes".to_owned(),
            ..NewBuilder::default()
        })
        .await
        .expect_err("duplicate");
    assert!(matches!(err, DomainError::Conflict(_)));

    h.builders.remove(acme.id).await.expect("archive");
    h.builders
        .create(NewBuilder {
            name: "Acme Homes".to_owned(),
            ..NewBuilder::default()
        })
        .await
        .expect("name free after archive");

    let page = h.builders.list(PartyQuery::default()).await.expect("list");
    assert_eq!(page.pagination.total, 1);
}

#[tokio::test]
async fn project_creation_validates_references() {
    let h = harness().await;
    let city_id = seed_city(&h, "Pune").await;

    // Missing builder.
    let err = h
        .projects
        .create(new_project("Skyline One", Uuid::now_v7(), city_id))
        .await
        .expect_err("unknown builder");
    assert!(matches!(err, DomainError::Validation { .. }));

    let builder = h
        .builders
        .create(NewBuilder {
            name: "Acme Homes".to_owned(),
            ..NewBuilder::default()
        })
        .await
        .expect("builder");

    // Unknown city.
    let err = h
        .projects
        .create(new_project("Skyline One", builder.id, Uuid::now_v7()))
        .await
        .expect_err("unknown city");
    assert!(matches!(err, DomainError::Validation { .. }));

    // All references in place.
    let project = h
        .projects
        .create(new_project("Skyline One", builder.id, city_id))
        .await
        .expect("create");
    assert_eq!(project.unit_configurations.len(), 1);
    assert!(project.media.is_empty());
}

#[tokio::test]
async fn media_entries_append_and_remove_as_independent_writes() {
    let h = harness().await;
    let city_id = seed_city(&h, "Pune").await;
    let builder = h
        .builders
        .create(NewBuilder {
            name: "Acme Homes".to_owned(),
            ..NewBuilder::default()
        })
        .await
        .expect("builder");
    let project = h
        .projects
        .create(new_project("Skyline One", builder.id, city_id))
        .await
        .expect("project");

    let with_media = h
        .projects
        .add_media(
            project.id,
            "https://cdn.example/hero.jpg".to_owned(),
            MediaKind::Image,
            Some("Hero shot".to_owned()),
        )
        .await
        .expect("add media");
    assert_eq!(with_media.media.len(), 1);

    let with_doc = h
        .projects
        .add_document(
            project.id,
            "https://cdn.example/rera.pdf".to_owned(),
            "RERA certificate".to_owned(),
            Some("rera".to_owned()),
        )
        .await
        .expect("add document");
    assert_eq!(with_doc.documents.len(), 1);

    let media_id = with_media.media[0].id;
    let after_remove = h
        .projects
        .remove_media(project.id, media_id)
        .await
        .expect("remove media");
    assert!(after_remove.media.is_empty());

    let err = h
        .projects
        .remove_media(project.id, media_id)
        .await
        .expect_err("already removed");
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn project_listing_filters_by_builder_and_price() {
    let h = harness().await;
    let city_id = seed_city(&h, "Pune").await;
    let acme = h
        .builders
        .create(NewBuilder {
            name: "Acme Homes".to_owned(),
            ..NewBuilder::default()
        })
        .await
        .expect("builder");
    let zen = h
        .builders
        .create(NewBuilder {
            name: "Zen Estates".to_owned(),
            ..NewBuilder::default()
        })
        .await
        .expect("builder");

    let mut cheap = new_project("Skyline One", acme.id, city_id);
    cheap.min_price = Some(4_000_000);
    cheap.max_price = Some(6_000_000);
    h.projects.create(cheap).await.expect("cheap");

    let mut pricey = new_project("Zen Towers", zen.id, city_id);
    pricey.min_price = Some(12_000_000);
    pricey.max_price = Some(20_000_000);
    h.projects.create(pricey).await.expect("pricey");

    let by_builder = h
        .projects
        .list(ProjectQuery {
            builder_id: Some(acme.id),
            ..ProjectQuery::default()
        })
        .await
        .expect("by builder");
    assert_eq!(by_builder.pagination.total, 1);
    assert_eq!(by_builder.records[0].name, "Skyline One");

    // Price window that only overlaps the expensive project.
    let in_window = h
        .projects
        .list(ProjectQuery {
            min_price: Some(10_000_000),
            ..ProjectQuery::default()
        })
        .await
        .expect("window");
    assert_eq!(in_window.pagination.total, 1);
    assert_eq!(in_window.records[0].name, "Zen Towers");

    let stats = h.projects.statistics().await.expect("stats");
    assert_eq!(stats.total, 2);
    assert!(stats.avg_min_price.is_some());
}

#[tokio::test]
async fn agents_archive_like_everything_else() {
    let h = harness().await;
    let agent = h
        .agents
        .create(propdesk_projects::domain::model::NewAgent {
            name: "Ravi Deshmukh".to_owned(),
            agency: Some("Acme Realty".to_owned()),
            ..propdesk_projects::domain::model::NewAgent::default()
        })
        .await
        .expect("agent");

    h.agents.remove(agent.id).await.expect("archive");
    let err = h.agents.get(agent.id).await.expect_err("gone");
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = h.agents.remove(agent.id).await.expect_err("second remove");
    assert!(matches!(err, DomainError::NotFound { .. }));
}

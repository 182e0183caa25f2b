//! SeaORM repositories for builders, agents and projects.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use propdesk_http::Page;
use propdesk_masters::RecordStatus;

use crate::domain::error::DomainError;
use crate::domain::model::{
    Agent, Builder, PartyQuery, Project, ProjectQuery, ProjectStatistics,
};
use crate::domain::repo::{AgentRepository, BuilderRepository, ProjectRepository};

use super::entity::{agent, builder, project};

fn db_err(e: DbErr) -> DomainError {
    DomainError::database(e.to_string())
}

fn conflict_on_unique(entity: &'static str, name: &str, e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::conflict(format!("{entity} with name '{name}' already exists"))
        }
        _ => db_err(e),
    }
}

fn parse_status(raw: &str) -> Result<RecordStatus, DomainError> {
    raw.parse()
        .map_err(|()| DomainError::database(format!("unknown record status '{raw}'")))
}

fn json_list<T: serde::de::DeserializeOwned>(
    column: &'static str,
    value: Option<serde_json::Value>,
) -> Result<Vec<T>, DomainError> {
    match value {
        None => Ok(Vec::new()),
        Some(v) => serde_json::from_value(v)
            .map_err(|e| DomainError::database(format!("bad {column} payload: {e}"))),
    }
}

fn to_json_list<T: serde::Serialize>(items: &[T]) -> Option<serde_json::Value> {
    if items.is_empty() {
        None
    } else {
        serde_json::to_value(items).ok()
    }
}

// === Builders ===

pub struct SeaOrmBuilderRepository {
    db: DatabaseConnection,
}

impl SeaOrmBuilderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn builder_to_domain(m: builder::Model) -> Result<Builder, DomainError> {
    Ok(Builder {
        id: m.id,
        name: m.name,
        description: m.description,
        contact_email: m.contact_email,
        contact_phone: m.contact_phone,
        website: m.website,
        established_year: m.established_year,
        status: parse_status(&m.status)?,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn builder_to_active(b: &Builder) -> builder::ActiveModel {
    use sea_orm::ActiveValue::Set;
    builder::ActiveModel {
        id: Set(b.id),
        name: Set(b.name.clone()),
        description: Set(b.description.clone()),
        contact_email: Set(b.contact_email.clone()),
        contact_phone: Set(b.contact_phone.clone()),
        website: Set(b.website.clone()),
        established_year: Set(b.established_year),
        status: Set(b.status.as_str().to_owned()),
        created_at: Set(b.created_at),
        updated_at: Set(b.updated_at),
    }
}

#[async_trait]
impl BuilderRepository for SeaOrmBuilderRepository {
    async fn insert(&self, item: Builder) -> Result<Builder, DomainError> {
        let model = builder_to_active(&item)
            .insert(&self.db)
            .await
            .map_err(|e| conflict_on_unique("Builder", &item.name, e))?;
        builder_to_domain(model)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Builder>, DomainError> {
        let model = builder::Entity::find()
            .filter(builder::Column::Id.eq(id))
            .filter(builder::Column::Status.ne(RecordStatus::Archived.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(builder_to_domain).transpose()
    }

    async fn list(&self, query: &PartyQuery) -> Result<Page<Builder>, DomainError> {
        let mut cond = Condition::all();
        cond = match query.status {
            Some(status) => cond.add(builder::Column::Status.eq(status.as_str())),
            None => cond.add(builder::Column::Status.ne(RecordStatus::Archived.as_str())),
        };
        if let Some(term) = &query.search {
            let pattern = format!("%{}%", term.to_lowercase());
            cond = cond.add(
                Expr::expr(Func::lower(Expr::col(builder::Column::Name))).like(pattern),
            );
        }

        let base = builder::Entity::find().filter(cond);
        let total = base.clone().count(&self.db).await.map_err(db_err)?;
        let models = base
            .order_by(builder::Column::Name, Order::Asc)
            .order_by(builder::Column::Id, Order::Asc)
            .offset(query.page.offset())
            .limit(query.page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let records = models
            .into_iter()
            .map(builder_to_domain)
            .collect::<Result<_, _>>()?;
        Ok(Page::new(records, query.page, total))
    }

    async fn update(&self, item: Builder) -> Result<Builder, DomainError> {
        let mut am = builder_to_active(&item);
        am.id = sea_orm::ActiveValue::Unchanged(item.id);
        am.created_at = sea_orm::ActiveValue::Unchanged(item.created_at);
        let model = am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Builder", item.id),
            other => conflict_on_unique("Builder", &item.name, other),
        })?;
        builder_to_domain(model)
    }

    async fn set_status(&self, id: Uuid, status: RecordStatus) -> Result<bool, DomainError> {
        let result = builder::Entity::update_many()
            .col_expr(builder::Column::Status, Expr::value(status.as_str()))
            .col_expr(builder::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(builder::Column::Id.eq(id))
            .filter(builder::Column::Status.ne(RecordStatus::Archived.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

// === Agents ===

pub struct SeaOrmAgentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAgentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn agent_to_domain(m: agent::Model) -> Result<Agent, DomainError> {
    Ok(Agent {
        id: m.id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        license_number: m.license_number,
        agency: m.agency,
        status: parse_status(&m.status)?,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn agent_to_active(a: &Agent) -> agent::ActiveModel {
    use sea_orm::ActiveValue::Set;
    agent::ActiveModel {
        id: Set(a.id),
        name: Set(a.name.clone()),
        email: Set(a.email.clone()),
        phone: Set(a.phone.clone()),
        license_number: Set(a.license_number.clone()),
        agency: Set(a.agency.clone()),
        status: Set(a.status.as_str().to_owned()),
        created_at: Set(a.created_at),
        updated_at: Set(a.updated_at),
    }
}

#[async_trait]
impl AgentRepository for SeaOrmAgentRepository {
    async fn insert(&self, item: Agent) -> Result<Agent, DomainError> {
        let model = agent_to_active(&item)
            .insert(&self.db)
            .await
            .map_err(|e| conflict_on_unique("Agent", &item.name, e))?;
        agent_to_domain(model)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Agent>, DomainError> {
        let model = agent::Entity::find()
            .filter(agent::Column::Id.eq(id))
            .filter(agent::Column::Status.ne(RecordStatus::Archived.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(agent_to_domain).transpose()
    }

    async fn list(&self, query: &PartyQuery) -> Result<Page<Agent>, DomainError> {
        let mut cond = Condition::all();
        cond = match query.status {
            Some(status) => cond.add(agent::Column::Status.eq(status.as_str())),
            None => cond.add(agent::Column::Status.ne(RecordStatus::Archived.as_str())),
        };
        if let Some(term) = &query.search {
            let pattern = format!("%{}%", term.to_lowercase());
            cond = cond.add(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(agent::Column::Name))).like(&pattern))
                    .add(Expr::expr(Func::lower(Expr::col(agent::Column::Agency))).like(&pattern)),
            );
        }

        let base = agent::Entity::find().filter(cond);
        let total = base.clone().count(&self.db).await.map_err(db_err)?;
        let models = base
            .order_by(agent::Column::Name, Order::Asc)
            .order_by(agent::Column::Id, Order::Asc)
            .offset(query.page.offset())
            .limit(query.page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let records = models
            .into_iter()
            .map(agent_to_domain)
            .collect::<Result<_, _>>()?;
        Ok(Page::new(records, query.page, total))
    }

    async fn update(&self, item: Agent) -> Result<Agent, DomainError> {
        let mut am = agent_to_active(&item);
        am.id = sea_orm::ActiveValue::Unchanged(item.id);
        am.created_at = sea_orm::ActiveValue::Unchanged(item.created_at);
        let model = am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Agent", item.id),
            other => conflict_on_unique("Agent", &item.name, other),
        })?;
        agent_to_domain(model)
    }

    async fn set_status(&self, id: Uuid, status: RecordStatus) -> Result<bool, DomainError> {
        let result = agent::Entity::update_many()
            .col_expr(agent::Column::Status, Expr::value(status.as_str()))
            .col_expr(agent::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(agent::Column::Id.eq(id))
            .filter(agent::Column::Status.ne(RecordStatus::Archived.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

// === Projects ===

pub struct SeaOrmProjectRepository {
    db: DatabaseConnection,
}

impl SeaOrmProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn project_to_domain(m: project::Model) -> Result<Project, DomainError> {
    Ok(Project {
        id: m.id,
        name: m.name,
        description: m.description,
        builder_id: m.builder_id,
        agent_id: m.agent_id,
        city_id: m.city_id,
        location_id: m.location_id,
        property_type_id: m.property_type_id,
        project_status: m
            .project_status
            .parse()
            .map_err(|()| DomainError::database(format!("unknown project status '{}'", m.project_status)))?,
        status: parse_status(&m.status)?,
        min_price: m.min_price,
        max_price: m.max_price,
        possession_date: m.possession_date,
        amenity_ids: json_list("amenity_ids", m.amenity_ids)?,
        unit_configurations: json_list("unit_configurations", m.unit_configurations)?,
        media: json_list("media", m.media)?,
        documents: json_list("documents", m.documents)?,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn project_to_active(p: &Project) -> project::ActiveModel {
    use sea_orm::ActiveValue::Set;
    project::ActiveModel {
        id: Set(p.id),
        name: Set(p.name.clone()),
        description: Set(p.description.clone()),
        builder_id: Set(p.builder_id),
        agent_id: Set(p.agent_id),
        city_id: Set(p.city_id),
        location_id: Set(p.location_id),
        property_type_id: Set(p.property_type_id),
        project_status: Set(p.project_status.as_str().to_owned()),
        status: Set(p.status.as_str().to_owned()),
        min_price: Set(p.min_price),
        max_price: Set(p.max_price),
        possession_date: Set(p.possession_date),
        amenity_ids: Set(to_json_list(&p.amenity_ids)),
        unit_configurations: Set(to_json_list(&p.unit_configurations)),
        media: Set(to_json_list(&p.media)),
        documents: Set(to_json_list(&p.documents)),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

#[async_trait]
impl ProjectRepository for SeaOrmProjectRepository {
    async fn insert(&self, item: Project) -> Result<Project, DomainError> {
        let model = project_to_active(&item)
            .insert(&self.db)
            .await
            .map_err(|e| conflict_on_unique("Project", &item.name, e))?;
        project_to_domain(model)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, DomainError> {
        let model = project::Entity::find()
            .filter(project::Column::Id.eq(id))
            .filter(project::Column::Status.ne(RecordStatus::Archived.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(project_to_domain).transpose()
    }

    async fn list(&self, query: &ProjectQuery) -> Result<Page<Project>, DomainError> {
        let mut cond = Condition::all()
            .add(project::Column::Status.ne(RecordStatus::Archived.as_str()));
        if let Some(status) = query.project_status {
            cond = cond.add(project::Column::ProjectStatus.eq(status.as_str()));
        }
        if let Some(builder_id) = query.builder_id {
            cond = cond.add(project::Column::BuilderId.eq(builder_id));
        }
        if let Some(city_id) = query.city_id {
            cond = cond.add(project::Column::CityId.eq(city_id));
        }
        // Price window: keep projects whose range overlaps the filter.
        if let Some(min) = query.min_price {
            cond = cond.add(project::Column::MaxPrice.gte(min));
        }
        if let Some(max) = query.max_price {
            cond = cond.add(project::Column::MinPrice.lte(max));
        }
        if let Some(term) = &query.search {
            let pattern = format!("%{}%", term.to_lowercase());
            cond = cond.add(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(project::Column::Name))).like(&pattern))
                    .add(
                        Expr::expr(Func::lower(Expr::col(project::Column::Description)))
                            .like(&pattern),
                    ),
            );
        }

        let base = project::Entity::find().filter(cond);
        let total = base.clone().count(&self.db).await.map_err(db_err)?;
        let models = base
            .order_by(project::Column::CreatedAt, Order::Desc)
            .order_by(project::Column::Id, Order::Asc)
            .offset(query.page.offset())
            .limit(query.page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let records = models
            .into_iter()
            .map(project_to_domain)
            .collect::<Result<_, _>>()?;
        Ok(Page::new(records, query.page, total))
    }

    async fn update(&self, item: Project) -> Result<Project, DomainError> {
        let mut am = project_to_active(&item);
        am.id = sea_orm::ActiveValue::Unchanged(item.id);
        am.created_at = sea_orm::ActiveValue::Unchanged(item.created_at);
        let model = am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Project", item.id),
            other => conflict_on_unique("Project", &item.name, other),
        })?;
        project_to_domain(model)
    }

    async fn set_status(&self, id: Uuid, status: RecordStatus) -> Result<bool, DomainError> {
        let result = project::Entity::update_many()
            .col_expr(project::Column::Status, Expr::value(status.as_str()))
            .col_expr(project::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(project::Column::Id.eq(id))
            .filter(project::Column::Status.ne(RecordStatus::Archived.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn statistics(&self) -> Result<ProjectStatistics, DomainError> {
        let non_archived =
            Condition::all().add(project::Column::Status.ne(RecordStatus::Archived.as_str()));

        let total = project::Entity::find()
            .filter(non_archived.clone())
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let status_rows: Vec<(String, i64)> = project::Entity::find()
            .filter(non_archived.clone())
            .select_only()
            .column(project::Column::ProjectStatus)
            .column_as(project::Column::Id.count(), "count")
            .group_by(project::Column::ProjectStatus)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        // FLOAT8 casts keep AVG portable: sqlite gives the column REAL
        // affinity, postgres avoids NUMERIC output on bigint.
        let averages: Option<(Option<f64>, Option<f64>)> = project::Entity::find()
            .filter(non_archived)
            .select_only()
            .column_as(Expr::cust("AVG(CAST(min_price AS FLOAT8))"), "avg_min")
            .column_as(Expr::cust("AVG(CAST(max_price AS FLOAT8))"), "avg_max")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let (avg_min_price, avg_max_price) = averages.unwrap_or((None, None));

        Ok(ProjectStatistics {
            total,
            by_status: status_rows
                .into_iter()
                .map(|(key, count)| (key, count.unsigned_abs()))
                .collect(),
            avg_min_price,
            avg_max_price,
        })
    }
}

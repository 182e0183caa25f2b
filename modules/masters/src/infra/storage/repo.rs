//! SeaORM implementation of the master record repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use propdesk_http::Page;

use crate::domain::error::DomainError;
use crate::domain::geo::BoundingBox;
use crate::domain::model::{
    CountBucket, DetailFamily, MasterKind, MasterQuery, MasterRecord, MasterStatistics,
    RecordStatus, SortDir, SortField, ValueBounds,
};
use crate::domain::repo::{GroupField, MasterRepository};

use super::entity;
use super::mapper;

pub struct SeaOrmMasterRepository {
    db: DatabaseConnection,
}

impl SeaOrmMasterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn non_archived(kind: MasterKind) -> Condition {
        Condition::all()
            .add(entity::Column::Kind.eq(kind.as_str()))
            .add(entity::Column::Status.ne(RecordStatus::Archived.as_str()))
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::database(e.to_string())
}

/// Classify a write failure: a unique-index violation is a Conflict (the
/// index name tells name apart from code), anything else is Unexpected.
fn write_err(record: &MasterRecord, e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            if message.contains("code") {
                if let Some(code) = &record.code {
                    return DomainError::duplicate_code(record.kind, code);
                }
            }
            DomainError::duplicate_name(record.kind, &record.name)
        }
        _ => db_err(e),
    }
}

fn sort_column(field: SortField) -> entity::Column {
    match field {
        SortField::SortOrder => entity::Column::SortOrder,
        SortField::Name => entity::Column::Name,
        SortField::CreatedAt => entity::Column::CreatedAt,
        SortField::UpdatedAt => entity::Column::UpdatedAt,
        SortField::Value => entity::Column::NumericValue,
    }
}

fn lower_like(column: entity::Column, pattern: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

fn models_to_domain(models: Vec<entity::Model>) -> Result<Vec<MasterRecord>, DomainError> {
    models.into_iter().map(mapper::to_domain).collect()
}

#[async_trait]
impl MasterRepository for SeaOrmMasterRepository {
    async fn insert(&self, record: MasterRecord) -> Result<MasterRecord, DomainError> {
        let model = mapper::to_active_model(&record)
            .insert(&self.db)
            .await
            .map_err(|e| write_err(&record, e))?;
        mapper::to_domain(model)
    }

    async fn find_by_id(
        &self,
        kind: MasterKind,
        id: Uuid,
    ) -> Result<Option<MasterRecord>, DomainError> {
        let model = entity::Entity::find()
            .filter(Self::non_archived(kind))
            .filter(entity::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(mapper::to_domain).transpose()
    }

    async fn list(
        &self,
        kind: MasterKind,
        query: &MasterQuery,
    ) -> Result<Page<MasterRecord>, DomainError> {
        let mut cond = Condition::all().add(entity::Column::Kind.eq(kind.as_str()));
        cond = match query.status {
            Some(status) => cond.add(entity::Column::Status.eq(status.as_str())),
            None => cond.add(entity::Column::Status.ne(RecordStatus::Archived.as_str())),
        };
        if let Some(is_default) = query.is_default {
            cond = cond.add(entity::Column::IsDefault.eq(is_default));
        }
        if let Some(is_popular) = query.is_popular {
            cond = cond.add(entity::Column::IsPopular.eq(is_popular));
        }
        if let Some(parent_id) = query.parent_id {
            cond = cond.add(entity::Column::ParentId.eq(parent_id));
        }
        if let Some(category) = &query.category {
            cond = cond.add(entity::Column::Category.eq(category.as_str()));
        }
        if let Some(min_value) = query.min_value {
            cond = cond.add(entity::Column::NumericValue.gte(min_value));
        }
        if let Some(max_value) = query.max_value {
            cond = cond.add(entity::Column::NumericValue.lte(max_value));
        }
        if let Some(unit) = &query.unit {
            cond = cond.add(entity::Column::Unit.eq(unit.as_str()));
        }
        if let Some(state) = &query.state {
            cond = cond.add(
                Expr::expr(Func::lower(Expr::col(entity::Column::State)))
                    .eq(state.to_lowercase()),
            );
        }
        if let Some(country) = &query.country {
            cond = cond.add(
                Expr::expr(Func::lower(Expr::col(entity::Column::Country)))
                    .eq(country.to_lowercase()),
            );
        }
        if let Some(pin_code) = &query.pin_code {
            // pin_codes holds a JSON array as text; match the quoted entry.
            cond = cond.add(entity::Column::PinCodes.like(format!("%\"{pin_code}\"%")));
        }
        if let Some(term) = &query.search {
            let pattern = format!("%{}%", term.to_lowercase());
            cond = cond.add(
                Condition::any()
                    .add(lower_like(entity::Column::Name, &pattern))
                    .add(lower_like(entity::Column::Description, &pattern))
                    .add(lower_like(entity::Column::Code, &pattern))
                    .add(lower_like(entity::Column::DisplayName, &pattern)),
            );
        }

        let base = entity::Entity::find().filter(cond);
        let total = base.clone().count(&self.db).await.map_err(db_err)?;

        let order = match query.sort_dir {
            SortDir::Asc => Order::Asc,
            SortDir::Desc => Order::Desc,
        };
        let models = base
            .order_by(sort_column(query.sort_by), order)
            // Stable tiebreak so page concatenation reproduces the set.
            .order_by(entity::Column::Id, Order::Asc)
            .offset(query.page.offset())
            .limit(query.page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(models_to_domain(models)?, query.page, total))
    }

    async fn update(&self, record: MasterRecord) -> Result<MasterRecord, DomainError> {
        let mut am = mapper::to_active_model(&record);
        am.id = sea_orm::ActiveValue::Unchanged(record.id);
        am.created_at = sea_orm::ActiveValue::Unchanged(record.created_at);

        let model = am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found(record.kind, record.id),
            other => write_err(&record, other),
        })?;
        mapper::to_domain(model)
    }

    async fn set_status(
        &self,
        kind: MasterKind,
        id: Uuid,
        status: RecordStatus,
    ) -> Result<bool, DomainError> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Status, Expr::value(status.as_str()))
            .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Self::non_archived(kind))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn statistics(&self, kind: MasterKind) -> Result<MasterStatistics, DomainError> {
        let scoped = |status: Option<RecordStatus>| {
            let mut cond = Self::non_archived(kind);
            if let Some(status) = status {
                cond = cond.add(entity::Column::Status.eq(status.as_str()));
            }
            entity::Entity::find().filter(cond)
        };

        let total = scoped(None).count(&self.db).await.map_err(db_err)?;
        let active = scoped(Some(RecordStatus::Active))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        let inactive = scoped(Some(RecordStatus::Inactive))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        let popular = scoped(None)
            .filter(entity::Column::IsPopular.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        let defaults = scoped(None)
            .filter(entity::Column::IsDefault.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let status_rows: Vec<(String, i64)> = scoped(None)
            .select_only()
            .column(entity::Column::Status)
            .column_as(entity::Column::Id.count(), "count")
            .group_by(entity::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let by_status = status_rows
            .into_iter()
            .map(|(key, count)| CountBucket {
                key,
                count: count.unsigned_abs(),
            })
            .collect();

        let by_category = if kind.detail_family() == DetailFamily::Category {
            let rows: Vec<(String, i64)> = scoped(None)
                .filter(entity::Column::Category.is_not_null())
                .select_only()
                .column(entity::Column::Category)
                .column_as(entity::Column::Id.count(), "count")
                .group_by(entity::Column::Category)
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(db_err)?;
            rows.into_iter()
                .map(|(key, count)| CountBucket {
                    key,
                    count: count.unsigned_abs(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let value_bounds = if kind.detail_family() == DetailFamily::Numeric {
            let bounds: Option<(Option<i32>, Option<i32>)> = scoped(None)
                .select_only()
                .column_as(entity::Column::NumericValue.min(), "min_value")
                .column_as(entity::Column::NumericValue.max(), "max_value")
                .into_tuple()
                .one(&self.db)
                .await
                .map_err(db_err)?;
            match bounds {
                Some((Some(min), Some(max))) => Some(ValueBounds { min, max }),
                _ => None,
            }
        } else {
            None
        };

        Ok(MasterStatistics {
            total,
            active,
            inactive,
            popular,
            defaults,
            by_status,
            by_category,
            value_bounds,
        })
    }

    async fn group_counts(
        &self,
        kind: MasterKind,
        field: GroupField,
    ) -> Result<Vec<CountBucket>, DomainError> {
        let column = match field {
            GroupField::State => entity::Column::State,
            GroupField::Country => entity::Column::Country,
        };
        let rows: Vec<(String, i64)> = entity::Entity::find()
            .filter(Self::non_archived(kind))
            .filter(column.is_not_null())
            .select_only()
            .column(column)
            .column_as(entity::Column::Id.count(), "count")
            .group_by(column)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|(key, count)| CountBucket {
                key,
                count: count.unsigned_abs(),
            })
            .collect())
    }

    async fn find_in_bbox(
        &self,
        kind: MasterKind,
        bbox: BoundingBox,
    ) -> Result<Vec<MasterRecord>, DomainError> {
        let models = entity::Entity::find()
            .filter(Self::non_archived(kind))
            .filter(entity::Column::Longitude.gte(bbox.min_longitude))
            .filter(entity::Column::Longitude.lte(bbox.max_longitude))
            .filter(entity::Column::Latitude.gte(bbox.min_latitude))
            .filter(entity::Column::Latitude.lte(bbox.max_latitude))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models_to_domain(models)
    }
}

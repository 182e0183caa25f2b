//! SeaORM implementation of the file metadata repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use propdesk_http::Page;

use crate::domain::error::FileError;
use crate::domain::model::{FileQuery, FileRecord};
use crate::domain::repo::FileRepository;

use super::entity;

pub struct SeaOrmFileRepository {
    db: DatabaseConnection,
}

impl SeaOrmFileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: DbErr) -> FileError {
    FileError::Database(e.to_string())
}

#[async_trait]
impl FileRepository for SeaOrmFileRepository {
    async fn insert(&self, record: FileRecord) -> Result<FileRecord, FileError> {
        let model = entity::ActiveModel::from(&record)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(FileRecord::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, FileError> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(FileRecord::from))
    }

    async fn list(&self, query: &FileQuery) -> Result<Page<FileRecord>, FileError> {
        let mut cond = Condition::all();
        if let Some(uploader) = &query.uploaded_by {
            cond = cond.add(entity::Column::UploadedBy.eq(uploader.as_str()));
        }
        if let Some(term) = &query.search {
            let pattern = format!("%{}%", term.to_lowercase());
            cond = cond.add(
                Expr::expr(Func::lower(Expr::col(entity::Column::FileName))).like(pattern),
            );
        }

        let base = entity::Entity::find().filter(cond);
        let total = base.clone().count(&self.db).await.map_err(db_err)?;
        let models = base
            .order_by(entity::Column::CreatedAt, Order::Desc)
            .order_by(entity::Column::Id, Order::Asc)
            .offset(query.page.offset())
            .limit(query.page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(
            models.into_iter().map(FileRecord::from).collect(),
            query.page,
            total,
        ))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, FileError> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

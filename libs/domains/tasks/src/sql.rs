use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::TaskResult,
    models::{NewTask, Task, TaskChanges},
    repository::TaskRepository,
};

/// SeaORM-backed repository; works with any backend the connection was opened for
pub struct SqlTaskRepository {
    db: DatabaseConnection,
}

impl SqlTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for SqlTaskRepository {
    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, input: NewTask) -> TaskResult<i32> {
        let now = Utc::now().fixed_offset();

        let active_model = entity::ActiveModel {
            title: Set(input.title),
            completed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = entity::Entity::insert(active_model).exec(&self.db).await?;
        Ok(result.last_insert_id)
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: i32, changes: TaskChanges) -> TaskResult<u64> {
        let mut query = entity::Entity::update_many()
            .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()));

        if let Some(title) = changes.title {
            query = query.col_expr(entity::Column::Title, Expr::value(title));
        }
        if let Some(completed) = changes.completed {
            query = query.col_expr(entity::Column::Completed, Expr::value(completed));
        }

        let result = query
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i32) -> TaskResult<u64> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn count(&self) -> TaskResult<u64> {
        let count = entity::Entity::find().count(&self.db).await?;
        Ok(count)
    }
}

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Schema, Select,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Product, ProductFilter},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Create the `products` table from the entity definition unless it
    /// already exists. Safe to call on every start.
    pub async fn init_schema(&self) -> ProductResult<()> {
        let backend = self.db.get_database_backend();
        let mut table = Schema::new(backend).create_table_from_entity(entity::Entity);
        table.if_not_exists();

        self.db.execute_raw(backend.build(&table)).await?;

        tracing::info!("Products schema initialized");
        Ok(())
    }

    fn select(filter: &ProductFilter) -> Select<entity::Entity> {
        let query = entity::Entity::find();

        let query = match filter {
            ProductFilter::All => query,
            ProductFilter::Name(name) => query.filter(entity::Column::Name.eq(name.as_str())),
            ProductFilter::Category(category) => {
                query.filter(entity::Column::Category.eq(*category))
            }
            ProductFilter::Available(available) => {
                query.filter(entity::Column::Available.eq(*available))
            }
            ProductFilter::Price(price) => query.filter(entity::Column::Price.eq(*price)),
        };

        query.order_by_asc(entity::Column::Id)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, mut product: Product) -> ProductResult<Product> {
        product.id = None;
        let active_model: entity::ActiveModel = product.into();

        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let id = product.id.ok_or_else(|| {
            ProductError::Validation("Update called with empty ID field".to_string())
        })?;

        let active_model: entity::ActiveModel = product.into();
        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ProductError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(product_id = id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, product: &Product) -> ProductResult<()> {
        let Some(id) = product.id else {
            return Ok(());
        };

        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }

    async fn all(&self) -> ProductResult<Vec<Product>> {
        self.fetch(&ProductFilter::All).await
    }

    async fn find(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn fetch(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let models = Self::select(filter).all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

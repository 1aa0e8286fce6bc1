use crate::{
    db::DbPool,
    entities::{inventory, product, supplier},
    errors::ServiceError,
};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Inventory fields default to an empty shelf with the stock page's
/// standard reorder threshold when the caller omits them.
const DEFAULT_REORDER_LEVEL: i32 = 5;

/// Service for managing products and their inventory rows
pub struct ProductService {
    db_pool: Arc<DbPool>,
}

/// A product row joined with its supplier name and inventory fields,
/// as returned by the list and get endpoints.
#[derive(Debug, FromQueryResult, Serialize, ToSchema)]
pub struct ProductWithStock {
    pub id: i32,
    pub name: String,
    pub platform: Option<String>,
    pub edition: Option<String>,
    pub genre: Option<String>,
    pub base_price: Decimal,
    pub is_physical: bool,
    pub is_digital: bool,
    pub supplier_id: i32,
    pub supplier_name: String,
    pub quantity_on_hand: i32,
    pub reorder_level: i32,
}

/// Fields accepted when creating a product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub platform: Option<String>,
    pub edition: Option<String>,
    pub genre: Option<String>,
    pub base_price: Option<Decimal>,
    pub is_physical: Option<bool>,
    pub is_digital: Option<bool>,
    pub supplier_id: i32,
    pub quantity_on_hand: Option<i32>,
    pub reorder_level: Option<i32>,
}

/// Partial update; omitted fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub edition: Option<String>,
    pub genre: Option<String>,
    pub base_price: Option<Decimal>,
    pub is_physical: Option<bool>,
    pub is_digital: Option<bool>,
    pub supplier_id: Option<i32>,
}

impl ProductPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.platform.is_none()
            && self.edition.is_none()
            && self.genre.is_none()
            && self.base_price.is_none()
            && self.is_physical.is_none()
            && self.is_digital.is_none()
            && self.supplier_id.is_none()
    }
}

/// Select products joined with supplier name and inventory fields
fn with_stock_query() -> Select<product::Entity> {
    product::Entity::find()
        .select_only()
        .columns([
            product::Column::Id,
            product::Column::Name,
            product::Column::Platform,
            product::Column::Edition,
            product::Column::Genre,
            product::Column::BasePrice,
            product::Column::IsPhysical,
            product::Column::IsDigital,
            product::Column::SupplierId,
        ])
        .column_as(
            SimpleExpr::from(Expr::col((supplier::Entity, supplier::Column::Name))),
            "supplier_name",
        )
        .column_as(
            SimpleExpr::from(Expr::col((inventory::Entity, inventory::Column::QuantityOnHand))),
            "quantity_on_hand",
        )
        .column_as(
            SimpleExpr::from(Expr::col((inventory::Entity, inventory::Column::ReorderLevel))),
            "reorder_level",
        )
        .join(JoinType::InnerJoin, product::Relation::Supplier.def())
        .join(JoinType::InnerJoin, product::Relation::Inventory.def())
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists all products with supplier and inventory info, ordered by name
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductWithStock>, ServiceError> {
        let db = &*self.db_pool;
        let products = with_stock_query()
            .order_by_asc(product::Column::Name)
            .into_model::<ProductWithStock>()
            .all(db)
            .await?;

        Ok(products)
    }

    /// Gets a product by ID with supplier and inventory info
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> Result<Option<ProductWithStock>, ServiceError> {
        let db = &*self.db_pool;
        let found = with_stock_query()
            .filter(product::Column::Id.eq(id))
            .into_model::<ProductWithStock>()
            .one(db)
            .await?;

        Ok(found)
    }

    /// Creates a product together with its inventory row in one transaction
    #[instrument(skip(self))]
    pub async fn create_product(&self, input: NewProduct) -> Result<product::Model, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let created = product::ActiveModel {
            name: Set(input.name),
            platform: Set(input.platform),
            edition: Set(input.edition),
            genre: Set(input.genre),
            base_price: Set(input.base_price.unwrap_or_default()),
            is_physical: Set(input.is_physical.unwrap_or(true)),
            is_digital: Set(input.is_digital.unwrap_or(false)),
            supplier_id: Set(input.supplier_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        inventory::ActiveModel {
            product_id: Set(created.id),
            quantity_on_hand: Set(input.quantity_on_hand.unwrap_or(0)),
            reorder_level: Set(input.reorder_level.unwrap_or(DEFAULT_REORDER_LEVEL)),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(created)
    }

    /// Applies a partial update; omitted fields retain their prior value
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: i32,
        patch: ProductPatch,
    ) -> Result<product::Model, ServiceError> {
        let db = &*self.db_pool;

        let Some(existing) = product::Entity::find_by_id(id).one(db).await? else {
            return Err(ServiceError::NotFound(format!(
                "Product with id {} not found",
                id
            )));
        };

        if patch.is_empty() {
            return Ok(existing);
        }

        let mut active: product::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(platform) = patch.platform {
            active.platform = Set(Some(platform));
        }
        if let Some(edition) = patch.edition {
            active.edition = Set(Some(edition));
        }
        if let Some(genre) = patch.genre {
            active.genre = Set(Some(genre));
        }
        if let Some(base_price) = patch.base_price {
            active.base_price = Set(base_price);
        }
        if let Some(is_physical) = patch.is_physical {
            active.is_physical = Set(is_physical);
        }
        if let Some(is_digital) = patch.is_digital {
            active.is_digital = Set(is_digital);
        }
        if let Some(supplier_id) = patch.supplier_id {
            active.supplier_id = Set(supplier_id);
        }

        let updated = active.update(db).await?;
        Ok(updated)
    }

    /// Deletes a product and its inventory row in one transaction
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db_pool.begin().await?;

        inventory::Entity::delete_many()
            .filter(inventory::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;

        let result = product::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServiceError::NotFound(format!(
                "Product with id {} not found",
                id
            )));
        }

        txn.commit().await?;
        Ok(())
    }
}

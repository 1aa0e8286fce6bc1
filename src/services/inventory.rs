use crate::{
    db::DbPool,
    entities::{inventory, product, supplier},
    errors::ServiceError,
    procedures::StoredProcedures,
};
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Service for stock receipts and low-stock reporting
pub struct InventoryService {
    db_pool: Arc<DbPool>,
    procedures: Arc<dyn StoredProcedures>,
}

/// A product whose quantity on hand has fallen below its reorder level
#[derive(Debug, FromQueryResult, Serialize, ToSchema)]
pub struct LowStockItem {
    pub product_id: i32,
    pub name: String,
    pub platform: Option<String>,
    pub quantity_on_hand: i32,
    pub reorder_level: i32,
    pub supplier_name: String,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>, procedures: Arc<dyn StoredProcedures>) -> Self {
        Self {
            db_pool,
            procedures,
        }
    }

    /// Receives stock by delegating to `sp_receive_stock`
    #[instrument(skip(self))]
    pub async fn receive_stock(&self, product_id: i32, quantity: i32) -> Result<(), ServiceError> {
        self.procedures.receive_stock(product_id, quantity).await
    }

    /// Lists products below their reorder level, lowest stock first
    #[instrument(skip(self))]
    pub async fn low_stock(&self) -> Result<Vec<LowStockItem>, ServiceError> {
        let db = &*self.db_pool;

        let items = inventory::Entity::find()
            .select_only()
            .column(inventory::Column::ProductId)
            .column_as(
                SimpleExpr::from(Expr::col((product::Entity, product::Column::Name))),
                "name",
            )
            .column_as(
                SimpleExpr::from(Expr::col((product::Entity, product::Column::Platform))),
                "platform",
            )
            .columns([
                inventory::Column::QuantityOnHand,
                inventory::Column::ReorderLevel,
            ])
            .column_as(
                SimpleExpr::from(Expr::col((supplier::Entity, supplier::Column::Name))),
                "supplier_name",
            )
            .join(JoinType::InnerJoin, inventory::Relation::Product.def())
            .join(JoinType::InnerJoin, product::Relation::Supplier.def())
            .filter(
                Expr::col((inventory::Entity, inventory::Column::QuantityOnHand)).lt(Expr::col((
                    inventory::Entity,
                    inventory::Column::ReorderLevel,
                ))),
            )
            .order_by_asc(inventory::Column::QuantityOnHand)
            .into_model::<LowStockItem>()
            .all(db)
            .await?;

        Ok(items)
    }
}

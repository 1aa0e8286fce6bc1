//! Gateway to the database stored procedures.
//!
//! `sp_record_sale` and `sp_receive_stock` are external collaborators: they
//! validate stock, mutate inventory, insert order rows and write the audit
//! trail entirely on the database side. This module only knows their call
//! signatures. The trait boundary lets tests substitute an implementation
//! that honors the same contract without a PostgreSQL server.

use crate::db::DbPool;
use crate::entities::sales_order::SaleChannel;
use crate::errors::ServiceError;
use async_trait::async_trait;
use sea_orm::{ActiveEnum, ConnectionTrait, DbBackend, DbErr, RuntimeErr, Statement};
use std::sync::Arc;
use tracing::debug;

/// Arguments for `sp_record_sale`. A `None` customer records a guest sale.
#[derive(Debug, Clone)]
pub struct RecordSale {
    pub customer_id: Option<i32>,
    pub product_id: i32,
    pub quantity: i32,
    pub channel: SaleChannel,
    pub payment_method: Option<String>,
    pub shipping_address: Option<String>,
}

#[async_trait]
pub trait StoredProcedures: Send + Sync {
    /// Records a sale atomically and returns the new order id.
    ///
    /// The procedure raises on insufficient stock or an invalid product; the
    /// raised message is surfaced to the caller unchanged.
    async fn record_sale(&self, sale: RecordSale) -> Result<i32, ServiceError>;

    /// Receives stock for a product, incrementing its quantity on hand.
    async fn receive_stock(&self, product_id: i32, quantity: i32) -> Result<(), ServiceError>;
}

/// Production implementation calling the PostgreSQL procedures by name.
pub struct PgStoredProcedures {
    db: Arc<DbPool>,
}

impl PgStoredProcedures {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoredProcedures for PgStoredProcedures {
    async fn record_sale(&self, sale: RecordSale) -> Result<i32, ServiceError> {
        debug!(product_id = sale.product_id, quantity = sale.quantity, "calling sp_record_sale");

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT sp_record_sale($1, $2, $3, $4, $5, $6) AS order_id",
            [
                sale.customer_id.into(),
                sale.product_id.into(),
                sale.quantity.into(),
                sale.channel.to_value().into(),
                sale.payment_method.into(),
                sale.shipping_address.into(),
            ],
        );

        let row = self
            .db
            .query_one(stmt)
            .await
            .map_err(procedure_error)?
            .ok_or_else(|| {
                ServiceError::InternalError("sp_record_sale returned no row".to_string())
            })?;

        let order_id: i32 = row.try_get("", "order_id")?;
        Ok(order_id)
    }

    async fn receive_stock(&self, product_id: i32, quantity: i32) -> Result<(), ServiceError> {
        debug!(product_id, quantity, "calling sp_receive_stock");

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT sp_receive_stock($1, $2)",
            [product_id.into(), quantity.into()],
        );

        self.db.execute(stmt).await.map_err(procedure_error)?;
        Ok(())
    }
}

/// Surfaces an error raised inside a stored procedure with its original
/// message, so business-rule violations (insufficient stock, invalid product)
/// reach the caller verbatim.
fn procedure_error(err: DbErr) -> ServiceError {
    let message = match &err {
        DbErr::Query(RuntimeErr::SqlxError(e)) | DbErr::Exec(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .map(|db_err| db_err.message().to_string())
            .unwrap_or_else(|| err.to_string()),
        _ => err.to_string(),
    };
    ServiceError::InventoryError(message)
}

use crate::{
    db::DbPool,
    entities::{customer, sales_order, sales_order_item},
    entities::sales_order::SaleChannel,
    errors::ServiceError,
    procedures::{RecordSale, StoredProcedures},
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Service for recording and listing sales
pub struct SaleService {
    db_pool: Arc<DbPool>,
    procedures: Arc<dyn StoredProcedures>,
}

/// One order as returned by the sales listing: header fields joined with the
/// customer name and the computed line-item total.
#[derive(Debug, FromQueryResult, Serialize, ToSchema)]
pub struct SaleSummary {
    pub order_id: i32,
    pub order_date: DateTime<Utc>,
    pub channel: SaleChannel,
    pub payment_method: Option<String>,
    pub status: String,
    /// Null for guest sales
    pub customer_name: Option<String>,
    pub total_amount: Decimal,
}

/// Optional filters for sale listings and reports
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    pub channel: Option<SaleChannel>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Inclusive date bound at midnight UTC
pub(crate) fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

impl SaleService {
    pub fn new(db_pool: Arc<DbPool>, procedures: Arc<dyn StoredProcedures>) -> Self {
        Self {
            db_pool,
            procedures,
        }
    }

    /// Records a sale by delegating to `sp_record_sale`; returns the order id
    #[instrument(skip(self))]
    pub async fn record_sale(&self, sale: RecordSale) -> Result<i32, ServiceError> {
        self.procedures.record_sale(sale).await
    }

    /// Lists orders with their computed totals, newest first
    #[instrument(skip(self))]
    pub async fn list_sales(&self, filter: SaleFilter) -> Result<Vec<SaleSummary>, ServiceError> {
        let db = &*self.db_pool;

        let line_total = Expr::col((
            sales_order_item::Entity,
            sales_order_item::Column::Quantity,
        ))
        .mul(Expr::col((
            sales_order_item::Entity,
            sales_order_item::Column::UnitPrice,
        )));

        let mut query = sales_order::Entity::find()
            .select_only()
            .column_as(sales_order::Column::Id, "order_id")
            .columns([
                sales_order::Column::OrderDate,
                sales_order::Column::Channel,
                sales_order::Column::PaymentMethod,
                sales_order::Column::Status,
            ])
            .column_as(
                SimpleExpr::from(Expr::col((customer::Entity, customer::Column::Name))),
                "customer_name",
            )
            .column_as(SimpleExpr::from(Func::sum(line_total)), "total_amount")
            .join(JoinType::InnerJoin, sales_order::Relation::Items.def())
            .join(JoinType::LeftJoin, sales_order::Relation::Customer.def())
            .group_by(sales_order::Column::Id)
            .group_by(sales_order::Column::OrderDate)
            .group_by(sales_order::Column::Channel)
            .group_by(sales_order::Column::PaymentMethod)
            .group_by(sales_order::Column::Status)
            .group_by(SimpleExpr::from(Expr::col((
                customer::Entity,
                customer::Column::Name,
            ))))
            .order_by_desc(sales_order::Column::OrderDate);

        if let Some(channel) = filter.channel {
            query = query.filter(sales_order::Column::Channel.eq(channel));
        }
        if let Some(from) = filter.from {
            query = query.filter(sales_order::Column::OrderDate.gte(day_start(from)));
        }
        if let Some(to) = filter.to {
            query = query.filter(sales_order::Column::OrderDate.lte(day_start(to)));
        }

        let sales = query.into_model::<SaleSummary>().all(db).await?;
        Ok(sales)
    }
}

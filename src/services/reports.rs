use crate::{
    db::DbPool,
    entities::{product, sales_order, sales_order_item},
    entities::sales_order::SaleChannel,
    errors::ServiceError,
    services::sales::{day_start, SaleFilter},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Default row cap for the top-products report
const DEFAULT_TOP_PRODUCTS_LIMIT: u64 = 10;

/// Read-only sales aggregation reports
pub struct ReportService {
    db_pool: Arc<DbPool>,
}

/// Units and revenue sold per product
#[derive(Debug, FromQueryResult, Serialize, ToSchema)]
pub struct TopProduct {
    pub product_id: i32,
    pub name: String,
    pub platform: Option<String>,
    pub genre: Option<String>,
    pub total_units_sold: i64,
    pub total_revenue: Decimal,
}

/// Order count and revenue per sale channel
#[derive(Debug, FromQueryResult, Serialize, ToSchema)]
pub struct ChannelSales {
    pub channel: SaleChannel,
    pub total_orders: i64,
    pub total_revenue: Decimal,
}

fn line_total() -> SimpleExpr {
    Expr::col((
        sales_order_item::Entity,
        sales_order_item::Column::Quantity,
    ))
    .mul(Expr::col((
        sales_order_item::Entity,
        sales_order_item::Column::UnitPrice,
    )))
}

impl ReportService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Best-selling products by units within an optional date/channel window
    #[instrument(skip(self))]
    pub async fn top_products(
        &self,
        filter: SaleFilter,
        limit: Option<u64>,
    ) -> Result<Vec<TopProduct>, ServiceError> {
        let db = &*self.db_pool;

        let mut query = sales_order_item::Entity::find()
            .select_only()
            .column_as(
                SimpleExpr::from(Expr::col((product::Entity, product::Column::Id))),
                "product_id",
            )
            .column_as(
                SimpleExpr::from(Expr::col((product::Entity, product::Column::Name))),
                "name",
            )
            .column_as(
                SimpleExpr::from(Expr::col((product::Entity, product::Column::Platform))),
                "platform",
            )
            .column_as(
                SimpleExpr::from(Expr::col((product::Entity, product::Column::Genre))),
                "genre",
            )
            .column_as(
                SimpleExpr::from(Func::sum(Expr::col((
                    sales_order_item::Entity,
                    sales_order_item::Column::Quantity,
                )))),
                "total_units_sold",
            )
            .column_as(SimpleExpr::from(Func::sum(line_total())), "total_revenue")
            .join(JoinType::InnerJoin, sales_order_item::Relation::Order.def())
            .join(
                JoinType::InnerJoin,
                sales_order_item::Relation::Product.def(),
            )
            .group_by(SimpleExpr::from(Expr::col((
                product::Entity,
                product::Column::Id,
            ))))
            .group_by(SimpleExpr::from(Expr::col((
                product::Entity,
                product::Column::Name,
            ))))
            .group_by(SimpleExpr::from(Expr::col((
                product::Entity,
                product::Column::Platform,
            ))))
            .group_by(SimpleExpr::from(Expr::col((
                product::Entity,
                product::Column::Genre,
            ))))
            .order_by_desc(Expr::col(Alias::new("total_units_sold")))
            .limit(limit.unwrap_or(DEFAULT_TOP_PRODUCTS_LIMIT));

        if let Some(channel) = filter.channel {
            query = query.filter(sales_order::Column::Channel.eq(channel));
        }
        if let Some(from) = filter.from {
            query = query.filter(sales_order::Column::OrderDate.gte(day_start(from)));
        }
        if let Some(to) = filter.to {
            query = query.filter(sales_order::Column::OrderDate.lte(day_start(to)));
        }

        let rows = query.into_model::<TopProduct>().all(db).await?;
        Ok(rows)
    }

    /// Revenue and distinct order count per channel within an optional range
    #[instrument(skip(self))]
    pub async fn sales_by_channel(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ChannelSales>, ServiceError> {
        let db = &*self.db_pool;

        let order_count = Func::count_distinct(Expr::col((
            sales_order::Entity,
            sales_order::Column::Id,
        )));

        let mut query = sales_order::Entity::find()
            .select_only()
            .column(sales_order::Column::Channel)
            .column_as(SimpleExpr::from(order_count), "total_orders")
            .column_as(SimpleExpr::from(Func::sum(line_total())), "total_revenue")
            .join(JoinType::InnerJoin, sales_order::Relation::Items.def())
            .group_by(sales_order::Column::Channel)
            .order_by_asc(sales_order::Column::Channel);

        if let Some(from) = from {
            query = query.filter(sales_order::Column::OrderDate.gte(day_start(from)));
        }
        if let Some(to) = to {
            query = query.filter(sales_order::Column::OrderDate.lte(day_start(to)));
        }

        let rows = query.into_model::<ChannelSales>().all(db).await?;
        Ok(rows)
    }
}

use std::collections::HashMap;

use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::db::DbPool;
use crate::domain::catalog::BoxType;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    page_offset, Customer, ListResult, NewOrder, Order, OrderDetails, OrderItem,
    OrderItemDetails, PlacedOrder,
};
use crate::domain::ports::OrderRepository;
use crate::domain::status::{OrderStatus, PaymentStatus, TransitionPolicy};
use crate::schema::{box_types, customers, order_items, orders, products};

use super::models::{
    stored, BoxTypeRow, CustomerRow, NewCustomerRow, NewOrderItemRow, NewOrderRow, OrderItemRow,
    OrderRow, ProductRow,
};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Attach customer, box type and line items to each order row, keeping the
/// order of `rows`. Three queries regardless of how many orders are passed.
fn load_details(
    conn: &mut PgConnection,
    rows: Vec<OrderRow>,
) -> Result<Vec<OrderDetails>, DomainError> {
    if rows.is_empty() {
        return Ok(vec![]);
    }

    let customer_ids: Vec<i32> = rows.iter().map(|r| r.customer_id).collect();
    let customers_by_id: HashMap<i32, CustomerRow> = customers::table
        .filter(customers::id.eq_any(&customer_ids))
        .select(CustomerRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let box_type_ids: Vec<i32> = rows.iter().map(|r| r.box_type_id).collect();
    let box_types_by_id: HashMap<i32, BoxTypeRow> = box_types::table
        .filter(box_types::id.eq_any(&box_type_ids))
        .select(BoxTypeRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();

    let mut items_by_order: HashMap<i32, Vec<OrderItemDetails>> = HashMap::new();
    let lines: Vec<(OrderItemRow, ProductRow)> = OrderItemRow::belonging_to(&rows)
        .inner_join(products::table)
        .select((OrderItemRow::as_select(), ProductRow::as_select()))
        .order(order_items::id.asc())
        .load(conn)?;
    for (item, product) in lines {
        items_by_order
            .entry(item.order_id)
            .or_default()
            .push(OrderItemDetails {
                item: item.into(),
                product: product.try_into()?,
            });
    }

    rows.into_iter()
        .map(|row| {
            // Several orders may share a customer, so clone rather than remove.
            let customer = customers_by_id
                .get(&row.customer_id)
                .cloned()
                .ok_or_else(|| DomainError::Internal(format!("order {} has no customer", row.id)))?;
            let box_type = box_types_by_id
                .get(&row.box_type_id)
                .cloned()
                .ok_or_else(|| DomainError::Internal(format!("order {} has no box type", row.id)))?;
            let items = items_by_order.remove(&row.id).unwrap_or_default();
            Ok(OrderDetails {
                order: row.try_into()?,
                customer: Customer::from(customer),
                box_type: BoxType::from(box_type),
                items,
            })
        })
        .collect()
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, new: NewOrder) -> Result<PlacedOrder, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Resolve the customer by email. The no-op update makes the
            //    conflicting row come back through RETURNING, so concurrent
            //    first orders for the same email converge on one customer.
            let customer = diesel::insert_into(customers::table)
                .values(NewCustomerRow::from(new.customer))
                .on_conflict(customers::email)
                .do_update()
                .set(customers::email.eq(excluded(customers::email)))
                .returning(CustomerRow::as_returning())
                .get_result(conn)?;

            // 2. Insert the order
            let order = diesel::insert_into(orders::table)
                .values(NewOrderRow {
                    customer_id: customer.id,
                    box_type_id: new.box_type_id,
                    total_amount: new.total_amount,
                    payment_method: new.payment_method.as_str().to_string(),
                    payment_status: PaymentStatus::Pending.as_str().to_string(),
                    order_status: OrderStatus::Processing.as_str().to_string(),
                    delivery_date: new.delivery_date,
                    special_instructions: new.special_instructions,
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 3. Insert the items with the prices the customer saw
            let new_items: Vec<NewOrderItemRow> = new
                .items
                .into_iter()
                .map(|line| NewOrderItemRow {
                    order_id: order.id,
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect();
            let items = diesel::insert_into(order_items::table)
                .values(&new_items)
                .returning(OrderItemRow::as_returning())
                .get_results(conn)?;

            Ok(PlacedOrder {
                order: order.try_into()?,
                customer: customer.into(),
                items: items.into_iter().map(OrderItem::from).collect(),
            })
        })
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderDetails>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        Ok(load_details(&mut conn, vec![order])?.pop())
    }

    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = page_offset(page, limit)?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table.count().get_result(conn)?;

            let rows = orders::table
                .select(OrderRow::as_select())
                .order((orders::created_at.desc(), orders::id.desc()))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: load_details(conn, rows)?,
                total,
            })
        })
    }

    fn update_order_status(
        &self,
        id: i32,
        status: OrderStatus,
        policy: TransitionPolicy,
    ) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let current: Option<String> = orders::table
                .find(id)
                .select(orders::order_status)
                .for_update()
                .first(conn)
                .optional()?;
            let Some(current) = current else {
                return Ok(None);
            };
            policy.check_order(stored(&current)?, status)?;

            let row = diesel::update(orders::table.find(id))
                .set((
                    orders::order_status.eq(status.as_str()),
                    orders::updated_at.eq(Utc::now()),
                ))
                .returning(OrderRow::as_returning())
                .get_result(conn)?;
            Ok(Some(row.try_into()?))
        })
    }

    fn update_payment_status(
        &self,
        id: i32,
        status: PaymentStatus,
        policy: TransitionPolicy,
    ) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let current: Option<String> = orders::table
                .find(id)
                .select(orders::payment_status)
                .for_update()
                .first(conn)
                .optional()?;
            let Some(current) = current else {
                return Ok(None);
            };
            policy.check_payment(stored(&current)?, status)?;

            let row = diesel::update(orders::table.find(id))
                .set((
                    orders::payment_status.eq(status.as_str()),
                    orders::updated_at.eq(Utc::now()),
                ))
                .returning(OrderRow::as_returning())
                .get_result(conn)?;
            Ok(Some(row.try_into()?))
        })
    }
}

//! In-memory port implementations for service and handler tests.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::domain::catalog::{
    BoxType, BoxTypePatch, NewBoxType, NewProduct, Product, ProductCategory, ProductFilter,
    ProductPatch,
};
use crate::domain::contact::{ContactMessage, NewContactMessage};
use crate::domain::errors::DomainError;
use crate::domain::order::{
    page_offset, Customer, CustomerDetails, ListResult, NewOrder, Order, OrderDetails, OrderItem,
    OrderItemDetails, OrderLineInput, OrderSubmission, PlacedOrder,
};
use crate::domain::ports::{
    CatalogRepository, ContactRepository, OrderRepository, StatsRepository,
};
use crate::domain::stats::{OrderStats, RevenueBasis};
use crate::domain::status::{OrderStatus, PaymentMethod, PaymentStatus, TransitionPolicy};

#[derive(Default)]
struct State {
    box_types: Vec<BoxType>,
    products: Vec<Product>,
    customers: Vec<Customer>,
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    messages: Vec<ContactMessage>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

pub fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("valid decimal")
}

pub fn product(id: i32, name: &str, category: ProductCategory, price: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        category,
        price: dec(price),
        unit: "kg".to_string(),
        image_url: None,
        description: None,
        is_available: true,
        nutrition_info: None,
    }
}

/// Checkout for 2 × Apples @ 150.00 and 3 × Bananas @ 80.00 in a Small Box.
pub fn checkout(email: &str) -> OrderSubmission {
    OrderSubmission {
        customer: CustomerDetails {
            first_name: "Hamza".to_string(),
            last_name: "Iqbal".to_string(),
            email: email.to_string(),
            phone: "03001234567".to_string(),
            address: "House 5, Street 9, G-10".to_string(),
            city: "Islamabad".to_string(),
        },
        box_type_id: 1,
        payment_method: PaymentMethod::Easypaisa,
        special_instructions: Some("Leave at the gate".to_string()),
        delivery_date: None,
        declared_total: Some(dec("540.00")),
        items: vec![
            OrderLineInput {
                product_id: 1,
                quantity: BigDecimal::from(2),
                unit_price: dec("150.00"),
            },
            OrderLineInput {
                product_id: 2,
                quantity: BigDecimal::from(3),
                unit_price: dec("80.00"),
            },
        ],
    }
}

impl InMemoryStore {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// One active box type and three products.
    pub fn seeded() -> Arc<Self> {
        let store = Self::default();
        {
            let mut s = store.lock();
            s.box_types.push(BoxType {
                id: 1,
                name: "Small Box".to_string(),
                price: dec("799.00"),
                items_limit: 3,
                description: None,
                is_active: true,
            });
            s.products.push(product(1, "Apples", ProductCategory::Fruit, "150.00"));
            s.products.push(product(2, "Bananas", ProductCategory::Fruit, "80.00"));
            s.products
                .push(product(3, "Carrots", ProductCategory::Vegetable, "70.00"));
        }
        Arc::new(store)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("store mutex poisoned")
    }

    pub fn customer_count(&self) -> usize {
        self.lock().customers.len()
    }

    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    pub fn payment_status(&self, order_id: i32) -> Option<PaymentStatus> {
        self.lock()
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .map(|o| o.payment_status)
    }

    pub fn set_product_price(&self, product_id: i32, price: BigDecimal) {
        let mut s = self.lock();
        if let Some(p) = s.products.iter_mut().find(|p| p.id == product_id) {
            p.price = price;
        }
    }

    fn details(s: &State, order: &Order) -> Result<OrderDetails, DomainError> {
        let customer = s
            .customers
            .iter()
            .find(|c| c.id == order.customer_id)
            .cloned()
            .ok_or(DomainError::NotFound("Customer"))?;
        let box_type = s
            .box_types
            .iter()
            .find(|b| b.id == order.box_type_id)
            .cloned()
            .ok_or(DomainError::NotFound("Box type"))?;
        let items = s
            .items
            .iter()
            .filter(|i| i.order_id == order.id)
            .map(|i| {
                let product = s
                    .products
                    .iter()
                    .find(|p| p.id == i.product_id)
                    .cloned()
                    .ok_or(DomainError::NotFound("Product"))?;
                Ok(OrderItemDetails {
                    item: i.clone(),
                    product,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(OrderDetails {
            order: order.clone(),
            customer,
            box_type,
            items,
        })
    }
}

fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}

impl CatalogRepository for InMemoryStore {
    fn list_box_types(&self) -> Result<Vec<BoxType>, DomainError> {
        let mut list: Vec<BoxType> = self
            .lock()
            .box_types
            .iter()
            .filter(|b| b.is_active)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(list)
    }

    fn create_box_type(&self, new: NewBoxType) -> Result<BoxType, DomainError> {
        let mut s = self.lock();
        let box_type = BoxType {
            id: next_id(s.box_types.iter().map(|b| b.id)),
            name: new.name,
            price: new.price,
            items_limit: new.items_limit,
            description: new.description,
            is_active: new.is_active,
        };
        s.box_types.push(box_type.clone());
        Ok(box_type)
    }

    fn update_box_type(&self, id: i32, patch: BoxTypePatch) -> Result<Option<BoxType>, DomainError> {
        let mut s = self.lock();
        let Some(b) = s.box_types.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.name {
            b.name = v;
        }
        if let Some(v) = patch.price {
            b.price = v;
        }
        if let Some(v) = patch.items_limit {
            b.items_limit = v;
        }
        if let Some(v) = patch.description {
            b.description = v;
        }
        if let Some(v) = patch.is_active {
            b.is_active = v;
        }
        Ok(Some(b.clone()))
    }

    fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
        let mut list: Vec<Product> = self
            .lock()
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        list.sort_by(|a, b| (a.category, &a.name).cmp(&(b.category, &b.name)));
        Ok(list)
    }

    fn create_product(&self, new: NewProduct) -> Result<Product, DomainError> {
        let mut s = self.lock();
        let product = Product {
            id: next_id(s.products.iter().map(|p| p.id)),
            name: new.name,
            category: new.category,
            price: new.price,
            unit: new.unit,
            image_url: new.image_url,
            description: new.description,
            is_available: new.is_available,
            nutrition_info: new.nutrition_info,
        };
        s.products.push(product.clone());
        Ok(product)
    }

    fn update_product(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, DomainError> {
        let mut s = self.lock();
        let Some(p) = s.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.name {
            p.name = v;
        }
        if let Some(v) = patch.category {
            p.category = v;
        }
        if let Some(v) = patch.price {
            p.price = v;
        }
        if let Some(v) = patch.unit {
            p.unit = v;
        }
        if let Some(v) = patch.image_url {
            p.image_url = v;
        }
        if let Some(v) = patch.description {
            p.description = v;
        }
        if let Some(v) = patch.is_available {
            p.is_available = v;
        }
        if let Some(v) = patch.nutrition_info {
            p.nutrition_info = v;
        }
        Ok(Some(p.clone()))
    }

    fn delete_product(&self, id: i32) -> Result<bool, DomainError> {
        let mut s = self.lock();
        if s.items.iter().any(|i| i.product_id == id) {
            return Err(DomainError::Integrity(
                "product is referenced by existing orders".to_string(),
            ));
        }
        let before = s.products.len();
        s.products.retain(|p| p.id != id);
        Ok(s.products.len() != before)
    }
}

impl OrderRepository for InMemoryStore {
    fn create(&self, new: NewOrder) -> Result<PlacedOrder, DomainError> {
        let mut s = self.lock();

        // Foreign keys are checked before anything is written.
        if !s.box_types.iter().any(|b| b.id == new.box_type_id) {
            return Err(DomainError::Integrity("unknown box type".to_string()));
        }
        for line in &new.items {
            if !s.products.iter().any(|p| p.id == line.product_id) {
                return Err(DomainError::Integrity("unknown product".to_string()));
            }
        }

        let now = Utc::now();
        let existing = s
            .customers
            .iter()
            .find(|c| c.email == new.customer.email)
            .cloned();
        let customer = match existing {
            Some(existing) => existing,
            None => {
                let c = new.customer;
                let customer = Customer {
                    id: next_id(s.customers.iter().map(|c| c.id)),
                    first_name: c.first_name,
                    last_name: c.last_name,
                    email: c.email,
                    phone: c.phone,
                    address: c.address,
                    city: c.city,
                    created_at: now,
                };
                s.customers.push(customer.clone());
                customer
            }
        };

        let order = Order {
            id: next_id(s.orders.iter().map(|o| o.id)),
            customer_id: customer.id,
            box_type_id: new.box_type_id,
            total_amount: new.total_amount,
            payment_method: new.payment_method,
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Processing,
            delivery_date: new.delivery_date,
            special_instructions: new.special_instructions,
            created_at: now,
        };
        s.orders.push(order.clone());

        let mut items = Vec::with_capacity(new.items.len());
        for line in new.items {
            let item = OrderItem {
                id: next_id(s.items.iter().map(|i| i.id)),
                order_id: order.id,
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            };
            s.items.push(item.clone());
            items.push(item);
        }

        Ok(PlacedOrder {
            order,
            customer,
            items,
        })
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderDetails>, DomainError> {
        let s = self.lock();
        s.orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| Self::details(&s, o))
            .transpose()
    }

    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let s = self.lock();
        let mut orders: Vec<&Order> = s.orders.iter().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let offset = usize::try_from(page_offset(page, limit)?).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);
        let items = orders
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|o| Self::details(&s, o))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListResult {
            items,
            total: s.orders.len() as i64,
        })
    }

    fn update_order_status(
        &self,
        id: i32,
        status: OrderStatus,
        policy: TransitionPolicy,
    ) -> Result<Option<Order>, DomainError> {
        let mut s = self.lock();
        let Some(order) = s.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        policy.check_order(order.order_status, status)?;
        order.order_status = status;
        Ok(Some(order.clone()))
    }

    fn update_payment_status(
        &self,
        id: i32,
        status: PaymentStatus,
        policy: TransitionPolicy,
    ) -> Result<Option<Order>, DomainError> {
        let mut s = self.lock();
        let Some(order) = s.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        policy.check_payment(order.payment_status, status)?;
        order.payment_status = status;
        Ok(Some(order.clone()))
    }
}

impl StatsRepository for InMemoryStore {
    fn order_stats(&self, basis: RevenueBasis) -> Result<OrderStats, DomainError> {
        let s = self.lock();
        let revenue: Vec<&BigDecimal> = s
            .orders
            .iter()
            .filter(|o| {
                basis == RevenueBasis::AllOrders || o.payment_status == PaymentStatus::Completed
            })
            .map(|o| &o.total_amount)
            .collect();
        let total_revenue = if revenue.is_empty() {
            None
        } else {
            Some(revenue.into_iter().fold(BigDecimal::from(0), |acc, v| acc + v))
        };
        Ok(OrderStats {
            total_orders: s.orders.len() as i64,
            total_revenue,
            total_customers: s.customers.len() as i64,
            total_products: s.products.len() as i64,
        })
    }
}

impl ContactRepository for InMemoryStore {
    fn create(&self, message: NewContactMessage) -> Result<ContactMessage, DomainError> {
        let mut s = self.lock();
        let created = ContactMessage {
            id: next_id(s.messages.iter().map(|m| m.id)),
            first_name: message.first_name,
            last_name: message.last_name,
            email: message.email,
            phone: message.phone,
            subject: message.subject,
            message: message.message,
            is_replied: false,
            created_at: Utc::now(),
        };
        s.messages.push(created.clone());
        Ok(created)
    }

    fn list(&self) -> Result<Vec<ContactMessage>, DomainError> {
        let mut list = self.lock().messages.clone();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    fn mark_replied(&self, id: i32) -> Result<Option<ContactMessage>, DomainError> {
        let mut s = self.lock();
        Ok(s.messages.iter_mut().find(|m| m.id == id).map(|m| {
            m.is_replied = true;
            m.clone()
        }))
    }
}

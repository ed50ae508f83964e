//! Embedded Entity Store
//!
//! In-memory relational state behind a read/write guard API. A write
//! guard is held across every check-then-act sequence, so concurrent
//! mutating requests serialize and the business-rule checks they make
//! cannot race each other. `insert_order` re-asserts the
//! one-non-terminal-order-per-table invariant at insert time, the
//! analog of a unique partial index in a SQL deployment.
//!
//! All finders used on behalf of an actor take the tenant id and fail
//! closed: an entity of another restaurant is simply not found.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use shared::models::{
    Category, ItemStatus, ManualStatus, Menu, MenuItem, ModifierGroup, ModifierOption, Order,
    OrderItem, OrderStatus, Reservation, Restaurant, StaffRole, Station, Table, TableCreate, User,
};

use crate::common::{ServiceError, ServiceResult};

/// Relational state. Only reachable through [`EntityStore`] guards.
#[derive(Debug, Default)]
pub struct StoreInner {
    restaurants: HashMap<i64, Restaurant>,
    tables: HashMap<i64, Table>,
    menus: HashMap<i64, Menu>,
    categories: HashMap<i64, Category>,
    menu_items: HashMap<i64, MenuItem>,
    modifier_groups: HashMap<i64, ModifierGroup>,
    modifier_options: HashMap<i64, ModifierOption>,
    stations: HashMap<i64, Station>,
    users: HashMap<i64, User>,
    orders: HashMap<i64, Order>,
    order_items: HashMap<i64, OrderItem>,
    next_id: i64,
}

/// Transactional in-memory store.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    inner: Arc<RwLock<StoreInner>>,
}

/// Shared read transaction.
pub struct ReadTxn<'a>(RwLockReadGuard<'a, StoreInner>);

/// Exclusive write transaction; holding it serializes all mutations.
pub struct WriteTxn<'a>(RwLockWriteGuard<'a, StoreInner>);

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> ReadTxn<'_> {
        ReadTxn(self.inner.read())
    }

    pub fn write(&self) -> WriteTxn<'_> {
        WriteTxn(self.inner.write())
    }
}

impl Deref for ReadTxn<'_> {
    type Target = StoreInner;

    fn deref(&self) -> &StoreInner {
        &self.0
    }
}

impl Deref for WriteTxn<'_> {
    type Target = StoreInner;

    fn deref(&self) -> &StoreInner {
        &self.0
    }
}

impl DerefMut for WriteTxn<'_> {
    fn deref_mut(&mut self) -> &mut StoreInner {
        &mut self.0
    }
}

impl StoreInner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    // ========== Restaurants ==========

    pub fn restaurant(&self, id: i64) -> Option<&Restaurant> {
        self.restaurants.get(&id)
    }

    pub fn restaurant_by_slug(&self, slug: &str) -> Option<&Restaurant> {
        self.restaurants.values().find(|r| r.slug == slug)
    }

    pub fn create_restaurant(
        &mut self,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> ServiceResult<Restaurant> {
        let slug = slug.into();
        if self.restaurant_by_slug(&slug).is_some() {
            return Err(ServiceError::Conflict(format!(
                "slug already registered: {slug}"
            )));
        }
        let restaurant = Restaurant::new(self.next_id(), name, slug);
        self.restaurants.insert(restaurant.id, restaurant.clone());
        Ok(restaurant)
    }

    // ========== Tables ==========

    pub fn table(&self, restaurant_id: i64, table_id: i64) -> Option<&Table> {
        self.tables
            .get(&table_id)
            .filter(|t| t.restaurant_id == restaurant_id)
    }

    /// Unscoped lookup for the customer checkout path, where the tenant
    /// is derived from the table itself.
    pub fn table_global(&self, table_id: i64) -> Option<&Table> {
        self.tables.get(&table_id)
    }

    pub fn table_by_number(&self, restaurant_id: i64, number: &str) -> Option<&Table> {
        self.tables
            .values()
            .find(|t| t.restaurant_id == restaurant_id && t.number == number)
    }

    pub fn tables_of(&self, restaurant_id: i64) -> Vec<&Table> {
        self.tables
            .values()
            .filter(|t| t.restaurant_id == restaurant_id)
            .collect()
    }

    pub fn create_table(&mut self, restaurant_id: i64, payload: TableCreate) -> ServiceResult<Table> {
        if !self.restaurants.contains_key(&restaurant_id) {
            return Err(ServiceError::not_found("restaurant"));
        }
        // (restaurant_id, number) unique among live tables
        if self.table_by_number(restaurant_id, &payload.number).is_some() {
            return Err(ServiceError::Conflict(format!(
                "table number already exists: {}",
                payload.number
            )));
        }
        let table = Table {
            id: self.next_id(),
            restaurant_id,
            number: payload.number,
            qr_identifier: Uuid::new_v4(),
            status: ManualStatus::Available,
            floor: payload.floor,
            seating_capacity: payload.seating_capacity,
            notes: payload.notes,
            reservation: payload.reservation.filter(Reservation::is_active),
            created_at: Utc::now(),
        };
        self.tables.insert(table.id, table.clone());
        Ok(table)
    }

    pub fn set_table_status(
        &mut self,
        restaurant_id: i64,
        table_id: i64,
        status: ManualStatus,
    ) -> ServiceResult<Table> {
        let table = self
            .tables
            .get_mut(&table_id)
            .filter(|t| t.restaurant_id == restaurant_id)
            .ok_or_else(|| ServiceError::not_found("table"))?;
        table.status = status;
        Ok(table.clone())
    }

    /// Store a reservation; a record with an empty name clears it.
    pub fn set_table_reservation(
        &mut self,
        restaurant_id: i64,
        table_id: i64,
        reservation: Option<Reservation>,
    ) -> ServiceResult<Table> {
        let table = self
            .tables
            .get_mut(&table_id)
            .filter(|t| t.restaurant_id == restaurant_id)
            .ok_or_else(|| ServiceError::not_found("table"))?;
        table.reservation = reservation.filter(Reservation::is_active);
        Ok(table.clone())
    }

    pub fn remove_table(&mut self, restaurant_id: i64, table_id: i64) -> ServiceResult<Table> {
        if self.table(restaurant_id, table_id).is_none() {
            return Err(ServiceError::not_found("table"));
        }
        self.tables
            .remove(&table_id)
            .ok_or_else(|| ServiceError::not_found("table"))
    }

    // ========== Menus / Categories / Items / Stations ==========

    pub fn menus_of(&self, restaurant_id: i64) -> Vec<&Menu> {
        self.menus
            .values()
            .filter(|m| m.restaurant_id == restaurant_id)
            .collect()
    }

    pub fn categories_of(&self, restaurant_id: i64) -> Vec<&Category> {
        self.categories
            .values()
            .filter(|c| c.restaurant_id == restaurant_id)
            .collect()
    }

    pub fn menu_item(&self, restaurant_id: i64, item_id: i64) -> Option<&MenuItem> {
        self.menu_items
            .get(&item_id)
            .filter(|i| i.restaurant_id == restaurant_id)
    }

    pub fn menu_items_of(&self, restaurant_id: i64) -> Vec<&MenuItem> {
        self.menu_items
            .values()
            .filter(|i| i.restaurant_id == restaurant_id)
            .collect()
    }

    pub fn stations_of(&self, restaurant_id: i64) -> Vec<&Station> {
        self.stations
            .values()
            .filter(|s| s.restaurant_id == restaurant_id)
            .collect()
    }

    pub fn modifier_option(&self, option_id: i64) -> Option<&ModifierOption> {
        self.modifier_options.get(&option_id)
    }

    pub fn modifier_group(&self, group_id: i64) -> Option<&ModifierGroup> {
        self.modifier_groups.get(&group_id)
    }

    pub fn create_menu(&mut self, menu: Menu) -> Menu {
        let mut menu = menu;
        menu.id = self.next_id();
        self.menus.insert(menu.id, menu.clone());
        menu
    }

    pub fn create_category(
        &mut self,
        restaurant_id: i64,
        name: impl Into<String>,
    ) -> ServiceResult<Category> {
        let name = name.into();
        if self
            .categories
            .values()
            .any(|c| c.restaurant_id == restaurant_id && c.name == name)
        {
            return Err(ServiceError::Conflict(format!(
                "category already exists: {name}"
            )));
        }
        let category = Category {
            id: self.next_id(),
            restaurant_id,
            name,
            is_active: true,
        };
        self.categories.insert(category.id, category.clone());
        Ok(category)
    }

    pub fn create_menu_item(&mut self, item: MenuItem) -> MenuItem {
        let mut item = item;
        item.id = self.next_id();
        item.created_at = Utc::now();
        self.menu_items.insert(item.id, item.clone());
        item
    }

    pub fn set_menu_item_categories(
        &mut self,
        restaurant_id: i64,
        item_id: i64,
        category_ids: Vec<i64>,
    ) -> ServiceResult<MenuItem> {
        let item = self
            .menu_items
            .get_mut(&item_id)
            .filter(|i| i.restaurant_id == restaurant_id)
            .ok_or_else(|| ServiceError::not_found("menu item"))?;
        item.category_ids = category_ids;
        Ok(item.clone())
    }

    pub fn create_station(&mut self, restaurant_id: i64, name: impl Into<String>) -> Station {
        let station = Station {
            id: self.next_id(),
            restaurant_id,
            name: name.into(),
        };
        self.stations.insert(station.id, station.clone());
        station
    }

    pub fn create_modifier_group(&mut self, group: ModifierGroup) -> ModifierGroup {
        let mut group = group;
        group.id = self.next_id();
        self.modifier_groups.insert(group.id, group.clone());
        group
    }

    pub fn create_modifier_option(&mut self, option: ModifierOption) -> ModifierOption {
        let mut option = option;
        option.id = self.next_id();
        self.modifier_options.insert(option.id, option.clone());
        option
    }

    pub fn create_user(
        &mut self,
        restaurant_id: i64,
        email: impl Into<String>,
        role: StaffRole,
    ) -> User {
        let user = User {
            id: self.next_id(),
            restaurant_id,
            email: email.into(),
            role,
            is_active: true,
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        user
    }

    // ========== Orders ==========

    pub fn order(&self, restaurant_id: i64, order_id: i64) -> Option<&Order> {
        self.orders
            .get(&order_id)
            .filter(|o| o.restaurant_id == restaurant_id)
    }

    pub fn orders_of(&self, restaurant_id: i64) -> Vec<&Order> {
        self.orders
            .values()
            .filter(|o| o.restaurant_id == restaurant_id)
            .collect()
    }

    /// The order blocking new seating at this table, if any
    /// (status pending/preparing/ready/served).
    pub fn active_order_for_table(&self, table_id: i64) -> Option<&Order> {
        self.orders
            .values()
            .find(|o| o.table_id == Some(table_id) && o.status.blocks_table())
    }

    /// The order shown on the table board for this table: any order not
    /// yet cleared or cancelled, including a paid one awaiting bussing.
    pub fn display_order_for_table(&self, table_id: i64) -> Option<&Order> {
        self.orders.values().find(|o| {
            o.table_id == Some(table_id)
                && !matches!(o.status, OrderStatus::Completed | OrderStatus::Cancelled)
        })
    }

    /// Insert a new pending order.
    ///
    /// Invariant: at most one non-terminal order per table. The check
    /// runs under the same write guard as the insert, so no interleaving
    /// request can seat the table in between.
    pub fn insert_order(
        &mut self,
        restaurant_id: i64,
        table_id: Option<i64>,
    ) -> ServiceResult<Order> {
        if let Some(tid) = table_id
            && let Some(existing) = self.active_order_for_table(tid)
        {
            return Err(ServiceError::TableOccupied(format!(
                "table already has an active order (order: {})",
                existing.id
            )));
        }
        let order = Order {
            id: self.next_id(),
            restaurant_id,
            table_id,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    pub fn set_order_status(&mut self, order_id: i64, status: OrderStatus) -> ServiceResult<Order> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ServiceError::not_found("order"))?;
        order.status = status;
        Ok(order.clone())
    }

    pub fn set_order_table(&mut self, order_id: i64, table_id: Option<i64>) -> ServiceResult<Order> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ServiceError::not_found("order"))?;
        order.table_id = table_id;
        Ok(order.clone())
    }

    // ========== Order Items ==========

    /// Scoped through the owning order's tenant.
    pub fn order_item(&self, restaurant_id: i64, item_id: i64) -> Option<&OrderItem> {
        let item = self.order_items.get(&item_id)?;
        self.order(restaurant_id, item.order_id)?;
        Some(item)
    }

    /// Items of one order, in insertion order.
    pub fn items_of_order(&self, order_id: i64) -> Vec<&OrderItem> {
        let mut items: Vec<&OrderItem> = self
            .order_items
            .values()
            .filter(|i| i.order_id == order_id)
            .collect();
        items.sort_by_key(|i| (i.created_at, i.id));
        items
    }

    /// Find the row holding the coalescing key (order, menu_item, notes).
    pub fn order_item_by_key(
        &self,
        order_id: i64,
        menu_item_id: i64,
        notes: Option<&str>,
    ) -> Option<&OrderItem> {
        self.order_items.values().find(|i| {
            i.order_id == order_id
                && i.menu_item_id == menu_item_id
                && i.notes.as_deref() == notes
        })
    }

    pub fn insert_order_item(
        &mut self,
        order_id: i64,
        menu_item_id: i64,
        quantity: i32,
        notes: Option<String>,
        modifier_option_ids: Vec<i64>,
    ) -> OrderItem {
        let item = OrderItem {
            id: self.next_id(),
            order_id,
            menu_item_id,
            quantity,
            notes,
            modifier_option_ids,
            status: ItemStatus::Pending,
            created_at: Utc::now(),
        };
        self.order_items.insert(item.id, item.clone());
        item
    }

    pub fn set_item_quantity(&mut self, item_id: i64, quantity: i32) -> ServiceResult<OrderItem> {
        let item = self
            .order_items
            .get_mut(&item_id)
            .ok_or_else(|| ServiceError::not_found("order item"))?;
        item.quantity = quantity;
        Ok(item.clone())
    }

    pub fn add_item_quantity(&mut self, item_id: i64, delta: i32) -> ServiceResult<OrderItem> {
        let item = self
            .order_items
            .get_mut(&item_id)
            .ok_or_else(|| ServiceError::not_found("order item"))?;
        item.quantity += delta;
        Ok(item.clone())
    }

    pub fn set_item_status(&mut self, item_id: i64, status: ItemStatus) -> ServiceResult<OrderItem> {
        let item = self
            .order_items
            .get_mut(&item_id)
            .ok_or_else(|| ServiceError::not_found("order item"))?;
        item.status = status;
        Ok(item.clone())
    }

    /// Reparent an item onto another order (merge flow).
    pub fn set_item_order(&mut self, item_id: i64, order_id: i64) -> ServiceResult<OrderItem> {
        let item = self
            .order_items
            .get_mut(&item_id)
            .ok_or_else(|| ServiceError::not_found("order item"))?;
        item.order_id = order_id;
        Ok(item.clone())
    }

    pub fn remove_order_item(&mut self, item_id: i64) -> ServiceResult<OrderItem> {
        self.order_items
            .remove(&item_id)
            .ok_or_else(|| ServiceError::not_found("order item"))
    }
}

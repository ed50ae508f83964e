//! OrdersManager - order lifecycle command processing
//!
//! Owns every mutating operation on orders and their line items. Each
//! operation runs as one unit under the store's write guard
//! (validate first, then mutate), emits structured tracing, and
//! broadcasts change events after the mutation lands:
//!
//! ```text
//! operation(ctx, ...)
//!     ├─ 1. Role gate (ActorContext)
//!     ├─ 2. Acquire write guard
//!     ├─ 3. Tenant-scoped lookups (fail closed)
//!     ├─ 4. Business-rule validation
//!     ├─ 5. Mutation
//!     ├─ 6. Release guard
//!     └─ 7. Broadcast event(s), return result
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use shared::event::{ChangeEvent, Scope};
use shared::models::{
    Category, ItemCounts, ItemStatus, ManualStatus, Menu, MenuItem, Order, OrderItem, OrderStatus,
    Reservation, Station, Table,
};

use crate::auth::ActorContext;
use crate::common::{ServiceError, ServiceResult};
use crate::core::{CoreConfig, SettledAdditions, TransitionPolicy};
use crate::menus::schedule::{self, MenuView};
use crate::notify::{BroadcastNotifier, Notifier, Published};
use crate::store::{EntityStore, StoreInner};
use crate::tables::board::{self, BoardEntry};

use super::kitchen::{self, KitchenQueue};
use super::money;

/// Where a staff-created order is seated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seating {
    Table(i64),
    Takeaway,
}

/// Where a customer checkout comes from. The tenant is derived from the
/// table for dine-in; take-away names it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOrigin {
    Table { table_id: i64 },
    Takeaway { restaurant_id: i64 },
}

/// One submitted order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: i64,
    pub quantity: i32,
    pub notes: Option<String>,
    #[serde(default)]
    pub modifier_option_ids: Vec<i64>,
}

impl OrderLine {
    pub fn new(menu_item_id: i64, quantity: i32) -> Self {
        Self {
            menu_item_id,
            quantity,
            notes: None,
            modifier_option_ids: vec![],
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Result of a line-item status update.
#[derive(Debug, Clone)]
pub struct ItemStatusChange {
    pub item: OrderItem,
    /// Set when the update made every item ready and the order was
    /// auto-promoted.
    pub order_status: Option<OrderStatus>,
}

/// Result of a quantity update: ≤0 deletes the row.
#[derive(Debug, Clone)]
pub enum QuantityUpdate {
    Updated(OrderItem),
    Removed,
}

/// Order lifecycle manager.
pub struct OrdersManager {
    store: EntityStore,
    notifier: BroadcastNotifier,
    config: CoreConfig,
}

impl OrdersManager {
    pub fn new(store: EntityStore, config: CoreConfig) -> Self {
        Self {
            store,
            notifier: BroadcastNotifier::new(),
            config,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Subscribe to change-event broadcasts.
    pub fn subscribe(&self) -> broadcast::Receiver<Published> {
        self.notifier.subscribe()
    }

    // ========== Order Creation ==========

    /// Open an order for a table (or take-away).
    ///
    /// Fails when the table already hosts a non-terminal order; a paid
    /// but uncleared table may be re-seated.
    pub fn create_order(&self, ctx: &ActorContext, seating: Seating) -> ServiceResult<Order> {
        ctx.require_floor()?;
        let order = {
            let mut txn = self.store.write();
            let table_id = match seating {
                Seating::Table(table_id) => {
                    let table = txn
                        .table(ctx.restaurant_id, table_id)
                        .ok_or_else(|| ServiceError::not_found("table"))?;
                    Self::check_seatable(table)?;
                    Some(table.id)
                }
                Seating::Takeaway => None,
            };
            txn.insert_order(ctx.restaurant_id, table_id)?
        };
        tracing::info!(
            order_id = order.id,
            restaurant_id = ctx.restaurant_id,
            table_id = ?order.table_id,
            operator = ctx.user_id,
            "Order created"
        );
        self.notifier
            .publish(Scope::Restaurant(ctx.restaurant_id), ChangeEvent::new_order(order.id));
        Ok(order)
    }

    /// Customer checkout: create the order and its lines as one unit.
    ///
    /// The same seating rules apply as for staff creation; every
    /// creation path upholds the one-active-order-per-table invariant.
    pub fn place_order(
        &self,
        origin: CheckoutOrigin,
        lines: Vec<OrderLine>,
    ) -> ServiceResult<Order> {
        if lines.is_empty() {
            return Err(ServiceError::invalid("order must contain at least one item"));
        }
        let (order, restaurant_id) = {
            let mut txn = self.store.write();
            let (restaurant_id, table_id) = match origin {
                CheckoutOrigin::Table { table_id } => {
                    let table = txn
                        .table_global(table_id)
                        .ok_or_else(|| ServiceError::not_found("table"))?;
                    Self::check_seatable(table)?;
                    (table.restaurant_id, Some(table.id))
                }
                CheckoutOrigin::Takeaway { restaurant_id } => {
                    txn.restaurant(restaurant_id)
                        .ok_or_else(|| ServiceError::not_found("restaurant"))?;
                    (restaurant_id, None)
                }
            };
            for line in &lines {
                Self::validate_line(&txn, restaurant_id, line)?;
            }
            let order = txn.insert_order(restaurant_id, table_id)?;
            for line in lines {
                Self::apply_line(&mut txn, order.id, line)?;
            }
            (order, restaurant_id)
        };
        tracing::info!(
            order_id = order.id,
            restaurant_id,
            table_id = ?order.table_id,
            "Customer order placed"
        );
        self.notifier
            .publish(Scope::Restaurant(restaurant_id), ChangeEvent::new_order(order.id));
        Ok(order)
    }

    fn check_seatable(table: &Table) -> ServiceResult<()> {
        if table.status == ManualStatus::Maintenance {
            return Err(ServiceError::TableOccupied(format!(
                "table {} is under maintenance",
                table.number
            )));
        }
        Ok(())
    }

    // ========== Line Items ==========

    /// Add one line to an open order, coalescing on
    /// (order, menu_item, notes).
    pub fn add_item(
        &self,
        ctx: &ActorContext,
        order_id: i64,
        line: OrderLine,
    ) -> ServiceResult<OrderItem> {
        ctx.require_floor()?;
        let item = {
            let mut txn = self.store.write();
            let order = txn
                .order(ctx.restaurant_id, order_id)
                .ok_or_else(|| ServiceError::not_found("order"))?;
            self.check_accepts_items(order)?;
            Self::validate_line(&txn, ctx.restaurant_id, &line)?;
            Self::apply_line(&mut txn, order_id, line)?
        };
        tracing::info!(
            order_id,
            item_id = item.id,
            menu_item_id = item.menu_item_id,
            quantity = item.quantity,
            operator = ctx.user_id,
            "Item added"
        );
        Ok(item)
    }

    /// Batch add; all lines validate before any row is written.
    pub fn add_items(
        &self,
        ctx: &ActorContext,
        order_id: i64,
        lines: Vec<OrderLine>,
    ) -> ServiceResult<Vec<OrderItem>> {
        ctx.require_floor()?;
        let items = {
            let mut txn = self.store.write();
            let order = txn
                .order(ctx.restaurant_id, order_id)
                .ok_or_else(|| ServiceError::not_found("order"))?;
            self.check_accepts_items(order)?;
            for line in &lines {
                Self::validate_line(&txn, ctx.restaurant_id, line)?;
            }
            let mut items = Vec::with_capacity(lines.len());
            for line in lines {
                items.push(Self::apply_line(&mut txn, order_id, line)?);
            }
            items
        };
        tracing::info!(order_id, count = items.len(), operator = ctx.user_id, "Items added");
        Ok(items)
    }

    pub fn remove_item(&self, ctx: &ActorContext, item_id: i64) -> ServiceResult<()> {
        ctx.require_floor()?;
        let item = {
            let mut txn = self.store.write();
            txn.order_item(ctx.restaurant_id, item_id)
                .ok_or_else(|| ServiceError::not_found("order item"))?;
            txn.remove_order_item(item_id)?
        };
        tracing::info!(
            order_id = item.order_id,
            item_id,
            operator = ctx.user_id,
            "Item removed"
        );
        Ok(())
    }

    /// Set a line's quantity; zero or less deletes the row.
    pub fn update_item_quantity(
        &self,
        ctx: &ActorContext,
        item_id: i64,
        quantity: i32,
    ) -> ServiceResult<QuantityUpdate> {
        ctx.require_floor()?;
        let outcome = {
            let mut txn = self.store.write();
            txn.order_item(ctx.restaurant_id, item_id)
                .ok_or_else(|| ServiceError::not_found("order item"))?;
            if quantity > 0 {
                if quantity > money::MAX_QUANTITY {
                    return Err(ServiceError::invalid(format!(
                        "quantity exceeds maximum allowed ({}), got {quantity}",
                        money::MAX_QUANTITY
                    )));
                }
                QuantityUpdate::Updated(txn.set_item_quantity(item_id, quantity)?)
            } else {
                txn.remove_order_item(item_id)?;
                QuantityUpdate::Removed
            }
        };
        tracing::info!(item_id, quantity, operator = ctx.user_id, "Item quantity updated");
        Ok(outcome)
    }

    fn check_accepts_items(&self, order: &Order) -> ServiceResult<()> {
        if self.config.settled_additions == SettledAdditions::Reject
            && (order.status == OrderStatus::Served || order.status.is_terminal())
        {
            return Err(ServiceError::Conflict(format!(
                "order {} is already {}",
                order.id, order.status
            )));
        }
        Ok(())
    }

    fn validate_line(txn: &StoreInner, restaurant_id: i64, line: &OrderLine) -> ServiceResult<()> {
        money::validate_quantity(line.quantity)?;
        txn.menu_item(restaurant_id, line.menu_item_id)
            .ok_or_else(|| ServiceError::not_found("menu item"))?;
        for option_id in &line.modifier_option_ids {
            let option = txn
                .modifier_option(*option_id)
                .ok_or_else(|| ServiceError::not_found("modifier option"))?;
            let group = txn
                .modifier_group(option.group_id)
                .ok_or_else(|| ServiceError::not_found("modifier group"))?;
            if group.menu_item_id != line.menu_item_id {
                return Err(ServiceError::invalid(format!(
                    "modifier option {} does not belong to menu item {}",
                    option_id, line.menu_item_id
                )));
            }
        }
        Ok(())
    }

    fn apply_line(
        txn: &mut StoreInner,
        order_id: i64,
        line: OrderLine,
    ) -> ServiceResult<OrderItem> {
        let notes = line.notes.filter(|n| !n.trim().is_empty());
        match txn
            .order_item_by_key(order_id, line.menu_item_id, notes.as_deref())
            .map(|existing| existing.id)
        {
            Some(existing_id) => txn.add_item_quantity(existing_id, line.quantity),
            None => Ok(txn.insert_order_item(
                order_id,
                line.menu_item_id,
                line.quantity,
                notes,
                line.modifier_option_ids,
            )),
        }
    }

    // ========== Status Transitions ==========

    /// Update a line's prep status. When this makes every item of the
    /// order ready, the order itself is promoted to ready, the one
    /// automatic transition in the system.
    pub fn set_item_status(
        &self,
        ctx: &ActorContext,
        item_id: i64,
        status: ItemStatus,
    ) -> ServiceResult<ItemStatusChange> {
        let (item, promoted) = {
            let mut txn = self.store.write();
            let existing = txn
                .order_item(ctx.restaurant_id, item_id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("order item"))?;
            let order = txn
                .order(ctx.restaurant_id, existing.order_id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("order"))?;
            let item = txn.set_item_status(item_id, status)?;

            let mut promoted = None;
            if status == ItemStatus::Ready && order.status != OrderStatus::Ready {
                let all_ready = txn
                    .items_of_order(order.id)
                    .iter()
                    .all(|i| i.status == ItemStatus::Ready);
                let eligible = match self.config.transition_policy {
                    TransitionPolicy::Unrestricted => true,
                    TransitionPolicy::ForwardOnly => matches!(
                        order.status,
                        OrderStatus::Pending | OrderStatus::Preparing
                    ),
                };
                if all_ready && eligible {
                    txn.set_order_status(order.id, OrderStatus::Ready)?;
                    promoted = Some(OrderStatus::Ready);
                }
            }
            (item, promoted)
        };

        self.notify_item_status(ctx.restaurant_id, item.order_id, item.id, item.status);
        if let Some(order_status) = promoted {
            tracing::info!(order_id = item.order_id, "All items ready, order promoted");
            self.notify_order_status(ctx.restaurant_id, item.order_id, order_status);
        }
        Ok(ItemStatusChange {
            item,
            order_status: promoted,
        })
    }

    /// Staff status override. Validation depends on the configured
    /// transition policy; under `unrestricted` backward moves are
    /// accepted but logged for the audit trail.
    pub fn set_order_status(
        &self,
        ctx: &ActorContext,
        order_id: i64,
        new_status: OrderStatus,
    ) -> ServiceResult<Order> {
        let order = {
            let mut txn = self.store.write();
            let order = txn
                .order(ctx.restaurant_id, order_id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("order"))?;
            self.check_transition(ctx, &order, new_status)?;
            txn.set_order_status(order_id, new_status)?
        };
        tracing::info!(
            order_id,
            status = %order.status,
            operator = ctx.user_id,
            "Order status updated"
        );
        self.notify_order_status(ctx.restaurant_id, order_id, order.status);
        Ok(order)
    }

    fn check_transition(
        &self,
        ctx: &ActorContext,
        order: &Order,
        to: OrderStatus,
    ) -> ServiceResult<()> {
        let from = order.status;
        match self.config.transition_policy {
            TransitionPolicy::Unrestricted => {
                if is_backward(from, to) {
                    tracing::warn!(
                        order_id = order.id,
                        operator = ctx.user_id,
                        %from,
                        %to,
                        "Backward status override"
                    );
                }
                Ok(())
            }
            TransitionPolicy::ForwardOnly => {
                if transition_allowed(from, to) {
                    Ok(())
                } else {
                    Err(ServiceError::invalid(format!(
                        "cannot move order from {from} to {to}"
                    )))
                }
            }
        }
    }

    /// Cancel unconditionally. The row stays behind as the audit record.
    pub fn cancel_order(&self, ctx: &ActorContext, order_id: i64) -> ServiceResult<Order> {
        ctx.require_floor()?;
        let order = {
            let mut txn = self.store.write();
            txn.order(ctx.restaurant_id, order_id)
                .ok_or_else(|| ServiceError::not_found("order"))?;
            txn.set_order_status(order_id, OrderStatus::Cancelled)?
        };
        tracing::info!(order_id, operator = ctx.user_id, "Order cancelled");
        self.notify_order_status(ctx.restaurant_id, order_id, OrderStatus::Cancelled);
        Ok(order)
    }

    /// Mark settled. Does not clear the table: the resolver shows it as
    /// needing clearing until the order completes or the table resets.
    pub fn mark_paid(&self, ctx: &ActorContext, order_id: i64) -> ServiceResult<Order> {
        ctx.require_floor()?;
        let order = {
            let mut txn = self.store.write();
            txn.order(ctx.restaurant_id, order_id)
                .ok_or_else(|| ServiceError::not_found("order"))?;
            txn.set_order_status(order_id, OrderStatus::Paid)?
        };
        tracing::info!(order_id, operator = ctx.user_id, "Order marked paid");
        self.notify_order_status(ctx.restaurant_id, order_id, OrderStatus::Paid);
        Ok(order)
    }

    // ========== Move / Merge ==========

    /// Reseat an order at another table of the same tenant.
    pub fn move_order(
        &self,
        ctx: &ActorContext,
        order_id: i64,
        new_table_id: i64,
    ) -> ServiceResult<Order> {
        ctx.require_floor()?;
        let order = {
            let mut txn = self.store.write();
            txn.order(ctx.restaurant_id, order_id)
                .ok_or_else(|| ServiceError::not_found("order"))?;
            let table = txn
                .table(ctx.restaurant_id, new_table_id)
                .ok_or_else(|| ServiceError::not_found("table"))?;
            let table_number = table.number.clone();
            if let Some(existing) = txn.active_order_for_table(new_table_id)
                && existing.id != order_id
            {
                return Err(ServiceError::TargetOccupied(format!(
                    "table {} already hosts order {}",
                    table_number, existing.id
                )));
            }
            txn.set_order_table(order_id, Some(new_table_id))?
        };
        tracing::info!(
            order_id,
            table_id = new_table_id,
            operator = ctx.user_id,
            "Order moved"
        );
        Ok(order)
    }

    /// Merge the source order into the target: lines sharing the
    /// coalescing key sum quantities, the rest reparent, and the source
    /// is cancelled (never deleted).
    pub fn merge_orders(
        &self,
        ctx: &ActorContext,
        source_id: i64,
        target_id: i64,
    ) -> ServiceResult<Order> {
        ctx.require_floor()?;
        if source_id == target_id {
            return Err(ServiceError::invalid("cannot merge an order into itself"));
        }
        let target = {
            let mut txn = self.store.write();
            txn.order(ctx.restaurant_id, source_id)
                .ok_or_else(|| ServiceError::not_found("order"))?;
            let target = txn
                .order(ctx.restaurant_id, target_id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("order"))?;

            let source_items: Vec<OrderItem> = txn
                .items_of_order(source_id)
                .into_iter()
                .cloned()
                .collect();
            for item in source_items {
                match txn
                    .order_item_by_key(target_id, item.menu_item_id, item.notes.as_deref())
                    .map(|existing| existing.id)
                {
                    Some(existing_id) => {
                        txn.add_item_quantity(existing_id, item.quantity)?;
                        txn.remove_order_item(item.id)?;
                    }
                    None => {
                        txn.set_item_order(item.id, target_id)?;
                    }
                }
            }
            txn.set_order_status(source_id, OrderStatus::Cancelled)?;
            target
        };
        tracing::info!(source_id, target_id, operator = ctx.user_id, "Orders merged");
        self.notify_order_status(ctx.restaurant_id, source_id, OrderStatus::Cancelled);
        Ok(target)
    }

    // ========== Tables ==========

    pub fn set_table_status(
        &self,
        ctx: &ActorContext,
        table_id: i64,
        status: ManualStatus,
    ) -> ServiceResult<Table> {
        ctx.require_floor()?;
        let table = self
            .store
            .write()
            .set_table_status(ctx.restaurant_id, table_id, status)?;
        tracing::info!(table_id, status = %table.status, operator = ctx.user_id, "Table status set");
        Ok(table)
    }

    pub fn set_reservation(
        &self,
        ctx: &ActorContext,
        table_id: i64,
        reservation: Option<Reservation>,
    ) -> ServiceResult<Table> {
        ctx.require_floor()?;
        let table = self
            .store
            .write()
            .set_table_reservation(ctx.restaurant_id, table_id, reservation)?;
        tracing::info!(
            table_id,
            reserved = table.has_reservation(),
            operator = ctx.user_id,
            "Table reservation updated"
        );
        Ok(table)
    }

    // ========== Alerts ==========

    /// Relay a customer "call staff" alert to the tenant's staff screens.
    pub fn alert_staff(&self, restaurant_id: i64, message: impl Into<String>) -> ServiceResult<()> {
        self.store
            .read()
            .restaurant(restaurant_id)
            .ok_or_else(|| ServiceError::not_found("restaurant"))?;
        self.notifier.publish(
            Scope::Restaurant(restaurant_id),
            ChangeEvent::staff_alert(message),
        );
        Ok(())
    }

    // ========== Queries ==========

    pub fn order(&self, ctx: &ActorContext, order_id: i64) -> ServiceResult<(Order, Vec<OrderItem>)> {
        let txn = self.store.read();
        let order = txn
            .order(ctx.restaurant_id, order_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("order"))?;
        let items = txn
            .items_of_order(order_id)
            .into_iter()
            .cloned()
            .collect();
        Ok((order, items))
    }

    /// Orders on the floor screens: everything not yet cleared or
    /// cancelled (a paid order still shows until bussed), newest first.
    pub fn open_orders(&self, ctx: &ActorContext) -> Vec<Order> {
        let txn = self.store.read();
        let mut orders: Vec<Order> = txn
            .orders_of(ctx.restaurant_id)
            .into_iter()
            .filter(|o| !matches!(o.status, OrderStatus::Completed | OrderStatus::Cancelled))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        orders
    }

    /// Order total: line unit prices (item price + selected modifier
    /// overrides) times quantities, summed in Decimal.
    pub fn order_total(&self, ctx: &ActorContext, order_id: i64) -> ServiceResult<f64> {
        let txn = self.store.read();
        txn.order(ctx.restaurant_id, order_id)
            .ok_or_else(|| ServiceError::not_found("order"))?;
        let mut lines = Vec::new();
        for item in txn.items_of_order(order_id) {
            let base = txn
                .menu_item(ctx.restaurant_id, item.menu_item_id)
                .map(|m| m.price)
                .unwrap_or(0.0);
            let overrides: Vec<f64> = item
                .modifier_option_ids
                .iter()
                .filter_map(|id| txn.modifier_option(*id))
                .map(|o| o.price_override)
                .collect();
            lines.push((money::unit_price(base, overrides), item.quantity));
        }
        Ok(money::order_total(lines))
    }

    pub fn item_counts(&self, ctx: &ActorContext, order_id: i64) -> ServiceResult<Option<ItemCounts>> {
        let txn = self.store.read();
        txn.order(ctx.restaurant_id, order_id)
            .ok_or_else(|| ServiceError::not_found("order"))?;
        Ok(ItemCounts::tally(txn.items_of_order(order_id)))
    }

    /// Kitchen display: outstanding items of in-prep orders, grouped by
    /// station.
    pub fn kitchen_queue(&self, ctx: &ActorContext) -> KitchenQueue {
        let txn = self.store.read();
        let stations: Vec<Station> = txn
            .stations_of(ctx.restaurant_id)
            .into_iter()
            .cloned()
            .collect();
        let mut items: Vec<&OrderItem> = txn
            .orders_of(ctx.restaurant_id)
            .into_iter()
            .filter(|o| kitchen::order_in_prep(o))
            .flat_map(|o| txn.items_of_order(o.id))
            .collect();
        items.sort_by_key(|i| (i.created_at, i.id));
        kitchen::build(stations, items, |menu_item_id| {
            txn.menu_item(ctx.restaurant_id, menu_item_id)
        })
    }

    /// Floor view: every table with its resolved display status and
    /// seated-order summary.
    pub fn table_board(&self, ctx: &ActorContext) -> Vec<BoardEntry> {
        let txn = self.store.read();
        let tables: Vec<Table> = txn
            .tables_of(ctx.restaurant_id)
            .into_iter()
            .cloned()
            .collect();
        board::build(
            tables,
            |table_id| txn.display_order_for_table(table_id),
            |order_id| txn.items_of_order(order_id),
        )
    }

    /// The customer-visible menu for a tenant at `now`, resolved in the
    /// restaurant's timezone.
    pub fn menu_view(&self, restaurant_id: i64, now: DateTime<Utc>) -> ServiceResult<MenuView> {
        let txn = self.store.read();
        let restaurant = txn
            .restaurant(restaurant_id)
            .ok_or_else(|| ServiceError::not_found("restaurant"))?;
        let tz = schedule::restaurant_tz(restaurant);
        let now_local = now.with_timezone(&tz);

        let mut all_menus = txn.menus_of(restaurant_id);
        all_menus.sort_by_key(|m| m.id);
        let mut all_categories = txn.categories_of(restaurant_id);
        all_categories.sort_by(|a, b| a.name.cmp(&b.name));
        let mut all_items = txn.menu_items_of(restaurant_id);
        all_items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let menus: Vec<Menu> = schedule::active_menus(&all_menus, now_local)
            .into_iter()
            .cloned()
            .collect();
        let categories: Vec<Category> =
            schedule::active_categories(&all_menus, &all_categories, now_local)
                .into_iter()
                .cloned()
                .collect();
        let items: Vec<MenuItem> =
            schedule::visible_items(&all_menus, &all_categories, &all_items, now_local)
                .into_iter()
                .cloned()
                .collect();

        Ok(MenuView {
            menus,
            categories,
            items,
        })
    }

    // ========== Event helpers ==========

    fn notify_order_status(&self, restaurant_id: i64, order_id: i64, status: OrderStatus) {
        let event = ChangeEvent::order_status(order_id, status);
        self.notifier.publish(Scope::Order(order_id), event.clone());
        self.notifier.publish(Scope::Restaurant(restaurant_id), event);
    }

    fn notify_item_status(
        &self,
        restaurant_id: i64,
        order_id: i64,
        item_id: i64,
        status: ItemStatus,
    ) {
        let event = ChangeEvent::item_status(order_id, item_id, status);
        self.notifier.publish(Scope::Order(order_id), event.clone());
        self.notifier.publish(Scope::Restaurant(restaurant_id), event);
    }
}

/// A move against the pipeline direction. Cancelling is never backward;
/// leaving `cancelled` always is.
fn is_backward(from: OrderStatus, to: OrderStatus) -> bool {
    match (from.pipeline_index(), to.pipeline_index()) {
        (Some(f), Some(t)) => t < f,
        (None, _) => true,
        (_, None) => false,
    }
}

/// Forward-only policy: pipeline-forward (skipping allowed, same state
/// accepted) plus cancel from any non-terminal state.
fn transition_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    if to == OrderStatus::Cancelled {
        return !from.is_terminal();
    }
    match (from.pipeline_index(), to.pipeline_index()) {
        (Some(f), Some(t)) => t >= f,
        _ => false,
    }
}

//! Cross-module flows: a tenant's day on the floor, driven through the
//! public API with a subscribed event receiver.

use chrono::{TimeZone, Utc};
use tableside_core::notify::Published;
use tableside_core::orders::{CheckoutOrigin, OrderLine, QuantityUpdate, Seating};
use tableside_core::tables::Availability;
use tableside_core::{
    ActorContext, CoreConfig, EntityStore, OrdersManager, ServiceError,
};

use shared::event::{EventKind, Scope};
use shared::models::{
    ItemStatus, Menu, MenuItem, ModifierGroup, ModifierOption, OrderStatus, SelectionType,
    StaffRole, TableCreate,
};

struct World {
    manager: OrdersManager,
    staff: ActorContext,
    kitchen: ActorContext,
    restaurant_id: i64,
    table5: i64,
    table6: i64,
    burger: i64,
    salad: i64,
    extra_beef: i64,
    grill_station: i64,
}

fn world() -> World {
    let store = EntityStore::new();
    let (restaurant_id, table5, table6, burger, salad, extra_beef, grill_station) = {
        let mut txn = store.write();
        let restaurant = txn.create_restaurant("Demo Bistro", "demo-bistro").unwrap();

        let table5 = txn
            .create_table(
                restaurant.id,
                TableCreate {
                    number: "5".to_string(),
                    seating_capacity: Some(4),
                    ..Default::default()
                },
            )
            .unwrap();
        let table6 = txn
            .create_table(
                restaurant.id,
                TableCreate {
                    number: "6".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        let grill = txn.create_station(restaurant.id, "Grill");
        let burger = txn.create_menu_item(MenuItem {
            id: 0,
            restaurant_id: restaurant.id,
            name: "Burger".to_string(),
            sku: Some("ITEM-001".to_string()),
            price: 9.50,
            compare_at_price: None,
            description: None,
            image: None,
            is_available: true,
            station_id: Some(grill.id),
            category_ids: vec![],
            created_at: Utc::now(),
        });
        let salad = txn.create_menu_item(MenuItem {
            id: 0,
            restaurant_id: restaurant.id,
            name: "Salad".to_string(),
            sku: Some("ITEM-002".to_string()),
            price: 7.00,
            compare_at_price: None,
            description: None,
            image: None,
            is_available: true,
            station_id: None,
            category_ids: vec![],
            created_at: Utc::now(),
        });
        let group = txn.create_modifier_group(ModifierGroup {
            id: 0,
            menu_item_id: burger.id,
            name: "Choose your protein".to_string(),
            selection_type: SelectionType::Single,
            is_required: false,
            min_selection: 0,
            max_selection: Some(1),
        });
        let extra_beef = txn.create_modifier_option(ModifierOption {
            id: 0,
            group_id: group.id,
            name: "Extra Beef".to_string(),
            price_override: 2.00,
        });

        (
            restaurant.id,
            table5.id,
            table6.id,
            burger.id,
            salad.id,
            extra_beef.id,
            grill.id,
        )
    };
    let manager = OrdersManager::new(store, CoreConfig::default());
    World {
        staff: ActorContext::new(restaurant_id, 1, StaffRole::Staff),
        kitchen: ActorContext::new(restaurant_id, 2, StaffRole::Kitchen),
        manager,
        restaurant_id,
        table5,
        table6,
        burger,
        salad,
        extra_beef,
        grill_station,
    }
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Published>) -> Vec<Published> {
    let mut events = Vec::new();
    while let Ok(published) = rx.try_recv() {
        events.push(published);
    }
    events
}

fn board_entry(
    w: &World,
    table_id: i64,
) -> tableside_core::BoardEntry {
    w.manager
        .table_board(&w.staff)
        .into_iter()
        .find(|e| e.table.id == table_id)
        .unwrap()
}

/// Table "5": available → occupied on order → needs clearing after
/// payment, with the manual status never touched.
#[test]
fn table_five_walkthrough() {
    let w = world();

    let entry = board_entry(&w, w.table5);
    assert_eq!(entry.display.availability, Availability::Available);
    assert!(entry.order.is_none());

    let order = w
        .manager
        .create_order(&w.staff, Seating::Table(w.table5))
        .unwrap();
    let entry = board_entry(&w, w.table5);
    assert_eq!(entry.display.availability, Availability::Occupied);
    assert_eq!(entry.order.as_ref().unwrap().status, OrderStatus::Pending);

    w.manager.mark_paid(&w.staff, order.id).unwrap();
    let entry = board_entry(&w, w.table5);
    assert_eq!(entry.display.availability, Availability::NotAvailable);
    assert_eq!(entry.table.status, shared::models::ManualStatus::Available);
    // The paid table may still be re-seated.
    assert!(
        w.manager
            .create_order(&w.staff, Seating::Table(w.table5))
            .is_ok()
    );
}

#[test]
fn customer_checkout_places_order_atomically() {
    let w = world();
    let mut rx = w.manager.subscribe();

    let order = w
        .manager
        .place_order(
            CheckoutOrigin::Table { table_id: w.table5 },
            vec![
                OrderLine::new(w.burger, 2),
                OrderLine::new(w.salad, 1),
                OrderLine::new(w.burger, 1), // coalesces with the first line
            ],
        )
        .unwrap();

    let (order, items) = w.manager.order(&w.staff, order.id).unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(items.len(), 2);
    assert_eq!(
        items
            .iter()
            .find(|i| i.menu_item_id == w.burger)
            .unwrap()
            .quantity,
        3
    );

    let events = drain(&mut rx);
    let new_orders: Vec<&Published> = events
        .iter()
        .filter(|p| p.event.kind == EventKind::NewOrder)
        .collect();
    assert_eq!(new_orders.len(), 1);
    assert_eq!(new_orders[0].scope, Scope::Restaurant(w.restaurant_id));
    assert_eq!(new_orders[0].scope.channel(), format!("restaurant_{}", w.restaurant_id));

    // A second checkout against the seated table conflicts.
    let err = w
        .manager
        .place_order(
            CheckoutOrigin::Table { table_id: w.table5 },
            vec![OrderLine::new(w.salad, 1)],
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::TableOccupied(_)));

    // Take-away needs no table at all.
    let takeaway = w
        .manager
        .place_order(
            CheckoutOrigin::Takeaway {
                restaurant_id: w.restaurant_id,
            },
            vec![OrderLine::new(w.salad, 2)],
        )
        .unwrap();
    assert_eq!(takeaway.table_id, None);
}

#[test]
fn last_ready_item_promotes_the_order_once() {
    let w = world();
    let order = w
        .manager
        .create_order(&w.staff, Seating::Table(w.table5))
        .unwrap();
    let lines = w
        .manager
        .add_items(
            &w.staff,
            order.id,
            vec![OrderLine::new(w.burger, 1), OrderLine::new(w.salad, 2)],
        )
        .unwrap();

    let mut rx = w.manager.subscribe();

    let first = w
        .manager
        .set_item_status(&w.kitchen, lines[0].id, ItemStatus::Ready)
        .unwrap();
    assert_eq!(first.order_status, None);
    // Not before the last item...
    let (order_now, _) = w.manager.order(&w.staff, order.id).unwrap();
    assert_eq!(order_now.status, OrderStatus::Pending);

    let last = w
        .manager
        .set_item_status(&w.kitchen, lines[1].id, ItemStatus::Ready)
        .unwrap();
    assert_eq!(last.order_status, Some(OrderStatus::Ready));

    let order_events: Vec<Published> = drain(&mut rx)
        .into_iter()
        .filter(|p| {
            p.event.kind == EventKind::StatusChange && p.event.item_id.is_none()
        })
        .collect();
    // Exactly one promotion, fanned out to the order and tenant scopes.
    assert_eq!(order_events.len(), 2);
    assert!(order_events.iter().any(|p| p.scope == Scope::Order(order.id)));
}

#[test]
fn merge_moves_and_sums_lines_then_cancels_source() {
    let w = world();
    let a = w
        .manager
        .create_order(&w.staff, Seating::Table(w.table5))
        .unwrap();
    let b = w
        .manager
        .create_order(&w.staff, Seating::Table(w.table6))
        .unwrap();

    w.manager
        .add_item(&w.staff, a.id, OrderLine::new(w.burger, 2))
        .unwrap();
    w.manager
        .add_item(&w.staff, b.id, OrderLine::new(w.burger, 3))
        .unwrap();
    w.manager
        .add_item(
            &w.staff,
            a.id,
            OrderLine::new(w.salad, 1).with_notes("no dressing"),
        )
        .unwrap();

    w.manager.merge_orders(&w.staff, a.id, b.id).unwrap();

    let (a, a_items) = w.manager.order(&w.staff, a.id).unwrap();
    assert_eq!(a.status, OrderStatus::Cancelled);
    assert!(a_items.is_empty());

    let (_, b_items) = w.manager.order(&w.staff, b.id).unwrap();
    assert_eq!(b_items.len(), 2);
    assert_eq!(
        b_items
            .iter()
            .find(|i| i.menu_item_id == w.burger)
            .unwrap()
            .quantity,
        5
    );
    assert_eq!(
        b_items
            .iter()
            .find(|i| i.menu_item_id == w.salad)
            .unwrap()
            .notes
            .as_deref(),
        Some("no dressing")
    );

    // Table 5 frees up once its order is merged away.
    let entry = board_entry(&w, w.table5);
    assert_eq!(entry.display.availability, Availability::Available);
}

#[test]
fn zero_quantity_deletes_and_lookup_fails_afterwards() {
    let w = world();
    let order = w.manager.create_order(&w.staff, Seating::Takeaway).unwrap();
    let item = w
        .manager
        .add_item(&w.staff, order.id, OrderLine::new(w.burger, 2))
        .unwrap();

    let outcome = w
        .manager
        .update_item_quantity(&w.staff, item.id, 0)
        .unwrap();
    assert!(matches!(outcome, QuantityUpdate::Removed));

    let err = w.manager.remove_item(&w.staff, item.id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn totals_include_modifier_overrides() {
    let w = world();
    let order = w.manager.create_order(&w.staff, Seating::Takeaway).unwrap();
    w.manager
        .add_item(&w.staff, order.id, {
            let mut line = OrderLine::new(w.burger, 2);
            line.modifier_option_ids = vec![w.extra_beef];
            line
        })
        .unwrap();
    w.manager
        .add_item(&w.staff, order.id, OrderLine::new(w.salad, 1).with_notes("side"))
        .unwrap();

    // 2 × (9.50 + 2.00) + 1 × 7.00
    assert_eq!(w.manager.order_total(&w.staff, order.id).unwrap(), 30.00);
}

#[test]
fn kitchen_queue_groups_by_station_and_drops_ready_items() {
    let w = world();
    let order = w
        .manager
        .create_order(&w.staff, Seating::Table(w.table5))
        .unwrap();
    let lines = w
        .manager
        .add_items(
            &w.staff,
            order.id,
            vec![OrderLine::new(w.burger, 1), OrderLine::new(w.salad, 1)],
        )
        .unwrap();

    let queue = w.manager.kitchen_queue(&w.kitchen);
    let grill = queue
        .stations
        .iter()
        .find(|q| q.station.id == w.grill_station)
        .unwrap();
    assert_eq!(grill.items.len(), 1);
    assert_eq!(queue.unassigned.len(), 1);

    // Ready items leave the queue.
    w.manager
        .set_item_status(&w.kitchen, lines[0].id, ItemStatus::Ready)
        .unwrap();
    let queue = w.manager.kitchen_queue(&w.kitchen);
    let grill = queue
        .stations
        .iter()
        .find(|q| q.station.id == w.grill_station)
        .unwrap();
    assert!(grill.items.is_empty());

    // A served order no longer feeds the kitchen.
    w.manager
        .set_order_status(&w.staff, order.id, OrderStatus::Served)
        .unwrap();
    let queue = w.manager.kitchen_queue(&w.kitchen);
    assert!(queue.unassigned.is_empty());
}

#[test]
fn modifier_option_must_belong_to_the_item() {
    let w = world();
    let order = w.manager.create_order(&w.staff, Seating::Takeaway).unwrap();
    let err = w
        .manager
        .add_item(&w.staff, order.id, {
            let mut line = OrderLine::new(w.salad, 1);
            line.modifier_option_ids = vec![w.extra_beef];
            line
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[test]
fn menu_schedule_drives_customer_visibility() {
    let w = world();
    {
        let store = w.manager.store();
        let mut txn = store.write();
        let category = txn.create_category(w.restaurant_id, "Dinner").unwrap();
        txn.create_menu(Menu {
            id: 0,
            restaurant_id: w.restaurant_id,
            name: "Dinner".to_string(),
            description: None,
            start_time: chrono::NaiveTime::from_hms_opt(22, 0, 0),
            end_time: chrono::NaiveTime::from_hms_opt(2, 0, 0),
            active_days: None,
            is_active: true,
            category_ids: vec![category.id],
        });
        txn.set_menu_item_categories(w.restaurant_id, w.burger, vec![category.id])
            .unwrap();
    }

    let at = |h, m| Utc.with_ymd_and_hms(2026, 8, 3, h, m, 0).unwrap();

    let view = w.manager.menu_view(w.restaurant_id, at(23, 30)).unwrap();
    assert_eq!(view.menus.len(), 1);
    assert_eq!(view.items.len(), 1);

    let view = w.manager.menu_view(w.restaurant_id, at(1, 0)).unwrap();
    assert_eq!(view.menus.len(), 1);

    let view = w.manager.menu_view(w.restaurant_id, at(12, 0)).unwrap();
    assert!(view.menus.is_empty());
    assert!(view.items.is_empty());
}

#[test]
fn board_sorts_numeric_labels_numerically() {
    let w = world();
    {
        let store = w.manager.store();
        let mut txn = store.write();
        for number in ["10", "2", "Patio A"] {
            txn.create_table(
                w.restaurant_id,
                TableCreate {
                    number: number.to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        }
    }
    let numbers: Vec<String> = w
        .manager
        .table_board(&w.staff)
        .into_iter()
        .map(|e| e.table.number)
        .collect();
    assert_eq!(numbers, vec!["2", "5", "6", "10", "Patio A"]);
}

#[test]
fn staff_alert_reaches_the_restaurant_scope() {
    let w = world();
    let mut rx = w.manager.subscribe();
    w.manager
        .alert_staff(w.restaurant_id, "table 5 calling")
        .unwrap();

    let events = drain(&mut rx);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.kind, EventKind::StaffAlert);
    assert_eq!(events[0].scope, Scope::Restaurant(w.restaurant_id));

    let err = w.manager.alert_staff(999, "nobody home").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

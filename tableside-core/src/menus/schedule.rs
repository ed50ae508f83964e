//! Menu Scheduling Resolver
//!
//! Decides which menus (and through them which categories and items)
//! are orderable at a given local time. A menu is active iff its day
//! rule and its time rule both match:
//!
//! - days: `None` = unrestricted, empty string = never (explicitly
//!   disabled), otherwise the current weekday index (Monday=0) must
//!   appear in the comma-separated list
//! - time: constrains only when both bounds are set; `start > end` is
//!   an overnight window wrapping midnight

use chrono::{DateTime, Datelike, NaiveTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shared::models::{Category, Menu, MenuItem, Restaurant};

/// Tenant timezone; UTC when unset or unparseable.
pub fn restaurant_tz(restaurant: &Restaurant) -> Tz {
    restaurant.timezone.parse().unwrap_or(Tz::UTC)
}

fn day_matches(active_days: Option<&str>, weekday: u32) -> bool {
    match active_days {
        None => true,
        Some(days) => days
            .split(',')
            .filter_map(|d| d.trim().parse::<u32>().ok())
            .any(|d| d == weekday),
    }
}

fn time_matches(start: Option<NaiveTime>, end: Option<NaiveTime>, now: NaiveTime) -> bool {
    let (Some(start), Some(end)) = (start, end) else {
        return true;
    };
    if start <= end {
        now >= start && now <= end
    } else {
        // Overnight window, e.g. 22:00 - 02:00
        now >= start || now <= end
    }
}

/// Whether one menu is active at the given local instant.
pub fn menu_is_active(menu: &Menu, now_local: DateTime<Tz>) -> bool {
    if !menu.is_active {
        return false;
    }
    let weekday = now_local.weekday().num_days_from_monday();
    // Windows are minute-granular
    let now_time = NaiveTime::from_hms_opt(now_local.hour(), now_local.minute(), 0)
        .unwrap_or(NaiveTime::MIN);
    day_matches(menu.active_days.as_deref(), weekday)
        && time_matches(menu.start_time, menu.end_time, now_time)
}

/// Menus currently within their activation window.
pub fn active_menus<'a>(menus: &'a [&'a Menu], now_local: DateTime<Tz>) -> Vec<&'a Menu> {
    menus
        .iter()
        .copied()
        .filter(|m| menu_is_active(m, now_local))
        .collect()
}

/// Active categories: enabled categories attached to any active menu,
/// deduplicated, in the given category order.
pub fn active_categories<'a>(
    menus: &'a [&'a Menu],
    categories: &'a [&'a Category],
    now_local: DateTime<Tz>,
) -> Vec<&'a Category> {
    let active = active_menus(menus, now_local);
    categories
        .iter()
        .copied()
        .filter(|c| c.is_active && active.iter().any(|m| m.category_ids.contains(&c.id)))
        .collect()
}

/// The customer-visible item set: available items attached to any
/// active category, deduplicated by item identity.
pub fn visible_items<'a>(
    menus: &'a [&'a Menu],
    categories: &'a [&'a Category],
    items: &'a [&'a MenuItem],
    now_local: DateTime<Tz>,
) -> Vec<&'a MenuItem> {
    let categories = active_categories(menus, categories, now_local);
    items
        .iter()
        .copied()
        .filter(|i| {
            i.is_available
                && categories
                    .iter()
                    .any(|c| i.category_ids.contains(&c.id))
        })
        .collect()
}

/// Resolved storefront view for one tenant at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuView {
    pub menus: Vec<Menu>,
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_menu(
        start: Option<(u32, u32)>,
        end: Option<(u32, u32)>,
        active_days: Option<&str>,
    ) -> Menu {
        Menu {
            id: 1,
            restaurant_id: 1,
            name: "Dinner".to_string(),
            description: None,
            start_time: start.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            end_time: end.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            active_days: active_days.map(str::to_string),
            is_active: true,
            category_ids: vec![],
        }
    }

    /// 2026-08-03 is a Monday.
    fn monday_at(hour: u32, minute: u32) -> DateTime<Tz> {
        Tz::UTC
            .with_ymd_and_hms(2026, 8, 3, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn unrestricted_menu_is_always_active() {
        let menu = make_menu(None, None, None);
        assert!(menu_is_active(&menu, monday_at(0, 0)));
        assert!(menu_is_active(&menu, monday_at(23, 59)));
    }

    #[test]
    fn empty_day_list_is_never_active() {
        let menu = make_menu(None, None, Some(""));
        assert!(!menu_is_active(&menu, monday_at(12, 0)));
    }

    #[test]
    fn day_list_uses_monday_zero_indexing() {
        let menu = make_menu(None, None, Some("0,4"));
        assert!(menu_is_active(&menu, monday_at(12, 0)));

        let tuesday = Tz::UTC.with_ymd_and_hms(2026, 8, 4, 12, 0, 0).unwrap();
        assert!(!menu_is_active(&menu, tuesday));

        let friday = Tz::UTC.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        assert!(menu_is_active(&menu, friday));
    }

    #[test]
    fn same_day_window_is_inclusive() {
        let menu = make_menu(Some((11, 0)), Some((15, 0)), None);
        assert!(menu_is_active(&menu, monday_at(11, 0)));
        assert!(menu_is_active(&menu, monday_at(13, 30)));
        assert!(menu_is_active(&menu, monday_at(15, 0)));
        assert!(!menu_is_active(&menu, monday_at(15, 1)));
        assert!(!menu_is_active(&menu, monday_at(10, 59)));
    }

    #[test]
    fn overnight_window_wraps_midnight() {
        let menu = make_menu(Some((22, 0)), Some((2, 0)), None);
        assert!(menu_is_active(&menu, monday_at(23, 30)));
        assert!(menu_is_active(&menu, monday_at(1, 0)));
        assert!(!menu_is_active(&menu, monday_at(12, 0)));
    }

    #[test]
    fn single_bound_does_not_constrain() {
        let menu = make_menu(Some((22, 0)), None, None);
        assert!(menu_is_active(&menu, monday_at(12, 0)));
    }

    #[test]
    fn disabled_menu_is_inactive_regardless_of_window() {
        let mut menu = make_menu(None, None, None);
        menu.is_active = false;
        assert!(!menu_is_active(&menu, monday_at(12, 0)));
    }

    #[test]
    fn timezone_falls_back_to_utc() {
        let mut restaurant = Restaurant::new(1, "Demo", "demo");
        restaurant.timezone = "Mars/Olympus".to_string();
        assert_eq!(restaurant_tz(&restaurant), Tz::UTC);

        restaurant.timezone = "Europe/Madrid".to_string();
        assert_eq!(restaurant_tz(&restaurant).name(), "Europe/Madrid");
    }

    #[test]
    fn visible_items_union_deduplicates_and_respects_flags() {
        let mut lunch = make_menu(None, None, None);
        lunch.id = 1;
        lunch.category_ids = vec![10, 11];
        let mut dinner = make_menu(None, None, None);
        dinner.id = 2;
        dinner.category_ids = vec![11, 12];

        let cat = |id: i64, is_active: bool| Category {
            id,
            restaurant_id: 1,
            name: format!("cat-{id}"),
            is_active,
        };
        let starters = cat(10, true);
        let mains = cat(11, true);
        let hidden = cat(12, false);

        let item = |id: i64, category_ids: Vec<i64>, is_available: bool| MenuItem {
            id,
            restaurant_id: 1,
            name: format!("item-{id}"),
            sku: None,
            price: 10.0,
            compare_at_price: None,
            description: None,
            image: None,
            is_available,
            station_id: None,
            category_ids,
            created_at: chrono::Utc::now(),
        };
        // Attached to both active categories: must appear once.
        let soup = item(100, vec![10, 11], true);
        let steak = item(101, vec![11], true);
        let off = item(102, vec![11], false);
        let orphan = item(103, vec![12], true);

        let menus: Vec<&Menu> = vec![&lunch, &dinner];
        let categories: Vec<&Category> = vec![&starters, &mains, &hidden];
        let items: Vec<&MenuItem> = vec![&soup, &steak, &off, &orphan];

        let visible = visible_items(&menus, &categories, &items, monday_at(12, 0));
        let ids: Vec<i64> = visible.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![100, 101]);
    }
}

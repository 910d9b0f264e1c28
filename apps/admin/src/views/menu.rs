//! Sidebar entries.

use retail_core::session::{Role, SessionUser};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
    /// Least privileged role that sees the entry.
    pub min_role: Role,
}

pub const MENU: [MenuItem; 9] = [
    MenuItem { label: "Products", path: "/products", min_role: Role::Staff },
    MenuItem { label: "Categories", path: "/categories", min_role: Role::Staff },
    MenuItem { label: "Stock", path: "/stock", min_role: Role::Staff },
    MenuItem { label: "Transfers", path: "/stock-transfers", min_role: Role::Manager },
    MenuItem { label: "Purchase orders", path: "/purchase-orders", min_role: Role::Manager },
    MenuItem { label: "Vouchers", path: "/vouchers", min_role: Role::Manager },
    MenuItem { label: "Suppliers", path: "/suppliers", min_role: Role::Manager },
    MenuItem { label: "Branches", path: "/branches", min_role: Role::Admin },
    MenuItem { label: "Profile", path: "/profile", min_role: Role::Staff },
];

/// Entries the user may see. Nothing without a user.
pub fn menu_for(user: Option<&SessionUser>) -> Vec<MenuItem> {
    let Some(user) = user else {
        return Vec::new();
    };
    MENU.iter()
        .filter(|item| user.has_role(item.min_role))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: i16) -> SessionUser {
        SessionUser {
            role: Some(role),
            ..Default::default()
        }
    }

    fn paths(items: &[MenuItem]) -> Vec<&'static str> {
        items.iter().map(|i| i.path).collect()
    }

    #[test]
    fn test_menu_by_role() {
        assert_eq!(menu_for(Some(&user(1))).len(), MENU.len());
        assert_eq!(
            paths(&menu_for(Some(&user(2)))),
            vec![
                "/products",
                "/categories",
                "/stock",
                "/stock-transfers",
                "/purchase-orders",
                "/vouchers",
                "/suppliers",
                "/profile"
            ]
        );
        assert_eq!(
            paths(&menu_for(Some(&user(3)))),
            vec!["/products", "/categories", "/stock", "/profile"]
        );
    }

    #[test]
    fn test_no_menu_without_user_or_role() {
        assert!(menu_for(None).is_empty());
        assert!(menu_for(Some(&SessionUser::default())).is_empty());
    }
}

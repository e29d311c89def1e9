//! Sessions and the role-gated menu table
//!
//! A [`Session`] is the explicit result of a successful login. Every menu
//! action is listed once in [`MenuAction`] together with the role it needs;
//! the controller asks the session before dispatching.

use serde::Serialize;
use std::fmt;

use crate::error::{AuthError, Result};
use crate::types::Role;

/// Authenticated user and role for the lifetime of one login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    username: String,
    role: Role,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn can(&self, action: MenuAction) -> bool {
        self.role.permits(action.required_role())
    }

    /// Ok when this session may run `action`
    pub fn authorize(&self, action: MenuAction) -> Result<()> {
        if self.can(action) {
            Ok(())
        } else {
            tracing::warn!(username = %self.username, action = action.label(), "access denied");
            Err(AuthError::AccessDenied {
                action: action.label(),
                required: action.required_role(),
            }
            .into())
        }
    }

    /// Actions shown to this session, in menu order
    pub fn visible_actions(&self) -> Vec<MenuAction> {
        MenuAction::ALL
            .into_iter()
            .filter(|action| self.can(*action))
            .collect()
    }
}

/// Every entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    ViewInventory,
    AddItem,
    EditItem,
    DeleteItem,
    Summary,
    SearchItems,
    LowStockAlerts,
    CategoryDistribution,
    ValueTrend,
    Exit,
}

impl MenuAction {
    /// Menu order; the displayed number is the index plus one
    pub const ALL: [MenuAction; 10] = [
        Self::ViewInventory,
        Self::AddItem,
        Self::EditItem,
        Self::DeleteItem,
        Self::Summary,
        Self::SearchItems,
        Self::LowStockAlerts,
        Self::CategoryDistribution,
        Self::ValueTrend,
        Self::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ViewInventory => "View Inventory",
            Self::AddItem => "Add Item",
            Self::EditItem => "Edit Item",
            Self::DeleteItem => "Delete Item",
            Self::Summary => "Generate Summary Report",
            Self::SearchItems => "Search Items",
            Self::LowStockAlerts => "Low-Stock Alerts",
            Self::CategoryDistribution => "Category-Wise Stock Distribution",
            Self::ValueTrend => "Inventory Value Trends",
            Self::Exit => "Exit",
        }
    }

    pub fn required_role(self) -> Role {
        match self {
            Self::AddItem | Self::EditItem | Self::DeleteItem => Role::Admin,
            _ => Role::Viewer,
        }
    }

    /// Menu number shown to the user (1-based)
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|action| *action == self)
            .map_or(0, |index| index + 1)
    }

    /// Look up an action by its menu number
    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Whether running this action changes the catalog
    pub fn is_mutation(self) -> bool {
        self.required_role() == Role::Admin
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

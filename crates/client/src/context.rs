//! Application context: base URL and the signed-in session.
//!
//! An explicit object passed to whoever needs it; there is no ambient
//! global to look session values up from. Initialized on load, torn down on
//! logout. Role helpers mirror what the backend enforces; they gate what
//! the UI *offers*, never what the backend *permits*.

use serde::{Deserialize, Serialize};

use stockdesk_core::UserId;

/// Application role, as reported by the auth endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Manager,
    Clerk,
    Unrecognized(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Clerk => "CLERK",
            Role::Unrecognized(raw) => raw,
        }
    }

    /// Master data, purchase orders, receipt operations.
    pub fn can_manage_purchase_orders(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    pub fn can_transfer_stock(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    /// The reports pages are open to all staff roles.
    pub fn can_view_reports(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager | Role::Clerk)
    }

    /// Every signed-in staff user can create sales orders.
    pub fn can_create_sales_orders(&self) -> bool {
        self.can_view_reports()
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ADMIN" => Role::Admin,
            "MANAGER" => Role::Manager,
            "CLERK" => Role::Clerk,
            _ => {
                tracing::warn!(role = %raw, "unrecognized user role");
                Role::Unrecognized(raw)
            }
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

/// The signed-in user, as the auth endpoint describes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub username: String,
    pub role: Role,
}

/// An authenticated session: bearer token plus user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// Context threaded through every view and the HTTP adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct AppContext {
    base_url: String,
    session: Option<Session>,
}

impl AppContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn sign_in(&mut self, token: impl Into<String>, user: SessionUser) {
        self.session = Some(Session {
            token: token.into(),
            user,
        });
    }

    pub fn sign_out(&mut self) {
        self.session = None;
    }

    pub fn role(&self) -> Option<&Role> {
        self.session.as_ref().map(|s| &s.user.role)
    }
}

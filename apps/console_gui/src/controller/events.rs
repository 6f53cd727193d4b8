//! UI/backend events and error modeling for the console controller.

use client_core::CredentialScope;
use shared::domain::StaffRole;
use shared::protocol::{
    AssignableUsers, CategoriesPage, Category, DesignOrderDetails, DesignsPage, InventoryPage,
    Lead, LeadsForOrder, LeadsPage, OrderDetails, OrdersPage, OrdersReport, PreorderDetails,
    PrintJobsPage, PrintOrderDetails, Product, ProductsPage, ShippingOrderDetails, ShippingPage,
    StaffUser, TasksPage,
};

/// RGBA image decoded off the UI thread, ready to become a texture.
#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub enum UiEvent {
    Info(String),
    Error(UiError),

    GeneralLoginOk { role: Option<StaffRole> },
    AdminLoginOk,
    /// The gateway ended a session: either a 401 interception or an explicit
    /// sign-out. The view returns to the scope's login entry.
    SessionEnded { scope: CredentialScope },

    LeadsLoaded(LeadsPage),
    LeadLoaded(Lead),
    LeadOptionsLoaded(Vec<Lead>),
    LeadsRefreshNeeded,
    PreorderLoaded(PreorderDetails),
    OrderPlaced,

    OrdersLoaded(OrdersPage),
    OrderDetailsLoaded(OrderDetails),
    AssignableUsersLoaded(AssignableUsers),
    OrdersRefreshNeeded,
    LeadsForOrderLoaded(LeadsForOrder),
    BillUploaded,

    TasksLoaded(TasksPage),
    TasksRefreshNeeded,

    DesignsLoaded(DesignsPage),
    DesignOrderLoaded(DesignOrderDetails),
    DesignsRefreshNeeded,

    PrintJobsLoaded(PrintJobsPage),
    PrintOrderLoaded(PrintOrderDetails),
    PrintJobsRefreshNeeded,

    ShippingsLoaded(ShippingPage),
    ShippingOrderLoaded(ShippingOrderDetails),
    ShippingStatusUpdated { order_id: String, status: String },
    CourierSlipUploaded,

    ProductsLoaded(ProductsPage),
    ProductLoaded(Product),
    ProductsRefreshNeeded,
    CategoryOptionsLoaded(Vec<Category>),

    CategoriesLoaded(CategoriesPage),
    CategoriesRefreshNeeded,

    InventoryLoaded(InventoryPage),
    InventoryRefreshNeeded,

    StaffUsersLoaded(Vec<StaffUser>),
    StaffUsersRefreshNeeded,

    ReportLoaded(OrdersReport),

    FileDownloaded { filename: String, bytes: Vec<u8> },
    ImagePreviewLoaded { url: String, image: PreviewImage },
    ImagePreviewFailed { url: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Login,
    Mutation,
    General,
}

pub fn classify_login_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure")
        || lower.contains("failed to build backend runtime")
    {
        "Backend worker startup failure; verify local app environment and retry.".to_string()
    } else if lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Server unreachable; check URL/network and retry sign-in.".to_string()
    } else {
        format!("Login failed: {message}")
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("unauthorized")
            || message_lower.contains("forbidden")
            || message_lower.contains("session expired")
            || message_lower.contains("invalid token")
            || message_lower.contains("invalid credential")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("required")
            || message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("already exists")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_business_rejections_as_validation() {
        let err = UiError::from_message(UiErrorContext::Mutation, "phone already exists");
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn classifies_connectivity_failures_as_transport() {
        let err = UiError::from_message(UiErrorContext::General, "connection refused by server");
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn login_failure_classifier_flags_unreachable_servers() {
        let text = classify_login_failure("error sending request: connection refused");
        assert!(text.contains("Server unreachable"));
    }
}

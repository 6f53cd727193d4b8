use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(LeadId);
id_newtype!(OrderId);
id_newtype!(ProductId);
id_newtype!(CategoryId);
id_newtype!(InventoryItemId);
id_newtype!(TaskId);
id_newtype!(StaffId);

/// Staff role carried in the session token's `role` claim. Decides which
/// workspace menu section is rendered; never consulted for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    User,
    Designer,
    Printer,
    Shipping,
}

impl StaffRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Designer => "designer",
            Self::Printer => "printer",
            Self::Shipping => "shipping",
        }
    }
}

// Pipeline stages and record statuses are opaque backend strings; the
// constants below are only the fixed option sets the console offers in its
// forms and filter tabs.

pub const LEAD_RATINGS: &[&str] = &["hot", "warm", "cold", "junk"];
pub const LEAD_STATUSES: &[&str] = &["new", "followup", "won"];
pub const LEAD_FILTERS: &[&str] = &["all", "new", "followup", "won"];

pub const TASK_FILTERS: &[&str] = &["all", "duetoday", "overdue", "upcomming"];
pub const TASK_STATUSES: &[&str] = &["scheduled", "completed"];
pub const TASK_ACTIVITY_TYPES: &[&str] = &["whatsapp", "call", "meeting", "email"];
pub const TASK_PRIORITIES: &[&str] = &["low", "medium", "high"];

pub const ORDER_FILTERS: &[&str] = &["all", "design_completed", "design_rejected"];
pub const WORK_QUEUE_FILTERS: &[&str] = &["all", "pending", "finished"];
pub const REPORT_STAGES: &[&str] = &["all", "designing", "printing", "shipping"];

pub const SHIPPING_STATUSES: &[&str] = &[
    "assigned_to_shipping",
    "packing_started",
    "ready_for_shipping",
    "out_for_delivery",
    "order_delivered",
];

pub const PRODUCT_SHAPES: &[&str] = &["Square", "Circle", "Butterfly", "Eye"];
pub const PRODUCT_SIZES: &[&str] = &["6x8", "121x8", "16x12", "11x11"];

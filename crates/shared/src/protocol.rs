//! Wire DTOs for the operations backend.
//!
//! Records are carried verbatim from the API; the console never derives
//! state from them beyond staging form fields before submission. Paginated
//! list endpoints share the `totalPages` envelope convention.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CategoryId, InventoryItemId, LeadId, OrderId, ProductId, StaffId, TaskId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// ---------- Leads ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "_id")]
    pub id: LeadId,
    pub fullname: String,
    pub phone: String,
    #[serde(default)]
    pub rating: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_owner: Option<StaffId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadsPage {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(rename = "totalPages", default = "one_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadDraft {
    pub fullname: String,
    pub phone: String,
    pub rating: String,
    pub status: String,
    pub note: String,
    pub address: String,
}

/// Lead + product catalog snapshot returned before placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreorderDetails {
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub lead_details: Lead,
    #[serde(default)]
    pub product_details: Vec<Product>,
}

/// Fresh order number, open leads, and catalog snapshot for the
/// create-order-from-orders flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadsForOrder {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub product_details: Vec<Product>,
}

// ---------- Orders ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub order_id: String,
    #[serde(default)]
    pub lead_id: Option<Lead>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersPage {
    #[serde(default)]
    pub orders: Vec<OrderSummary>,
    #[serde(rename = "totalPages", default = "one_page")]
    pub total_pages: u32,
}

/// Product line as it appears inside an order detail payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSpec {
    pub name: String,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    #[serde(default)]
    pub lead_owner: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub status: String,
    #[serde(default)]
    pub products: Vec<ProductSpec>,
    #[serde(default)]
    pub order_image_links: Vec<String>,
    #[serde(default)]
    pub designed_image_links: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignableUser {
    #[serde(rename = "_id")]
    pub id: StaffId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignableUsers {
    #[serde(default)]
    pub designers: Vec<AssignableUser>,
    #[serde(default)]
    pub printers: Vec<AssignableUser>,
}

// ---------- Tasks ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: TaskId,
    pub task_name: String,
    /// Populated lead record, not a bare id.
    #[serde(default)]
    pub lead_id: Option<Lead>,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksPage {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(rename = "totalPages", default = "one_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDraft {
    pub task_name: String,
    pub lead_id: LeadId,
    pub status: String,
    pub due_date: String,
    pub activity_type: String,
    pub priority: String,
    pub note: String,
}

// ---------- Designing ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignJob {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub customer_name: String,
    pub phone: String,
    #[serde(default)]
    pub lead_owner: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignsPage {
    #[serde(default)]
    pub designs: Vec<DesignJob>,
    #[serde(rename = "totalPages", default = "one_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignOrderDetails {
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    #[serde(default)]
    pub lead_owner: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductSpec>,
    #[serde(default)]
    pub order_image_links: Vec<String>,
}

// ---------- Printing ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJob {
    pub order_id: String,
    pub lead_name: String,
    pub lead_phone: String,
    #[serde(default)]
    pub lead_owner_name: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJobsPage {
    #[serde(default)]
    pub orders: Vec<PrintJob>,
    #[serde(rename = "totalPages", default = "one_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintOrderDetails {
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    #[serde(default)]
    pub lead_owner: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductSpec>,
    #[serde(default)]
    pub designed_image_links: Vec<String>,
}

// ---------- Shipping ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingOrder {
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingPage {
    #[serde(default)]
    pub orders: Vec<ShippingOrder>,
    #[serde(rename = "totalPages", default = "one_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingOrderDetails {
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    #[serde(default)]
    pub lead_owner: Option<String>,
    pub status: String,
    #[serde(default)]
    pub products: Vec<ProductSpec>,
    #[serde(default)]
    pub designed_image_links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier_slip: Option<String>,
}

// ---------- Catalog ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub product_category: Option<Category>,
    #[serde(default)]
    pub mrp: Option<String>,
    #[serde(default)]
    pub selling_price: Option<String>,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub thickness: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(rename = "totalPages", default = "one_page")]
    pub total_pages: u32,
}

/// Create/edit payload; the product photo travels as a multipart part next
/// to these fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDraft {
    pub product_name: String,
    pub sku: String,
    pub product_category: CategoryId,
    pub mrp: String,
    pub selling_price: String,
    pub shape: String,
    pub size: String,
    pub thickness: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    pub category_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesPage {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(rename = "totalPages", default = "one_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: InventoryItemId,
    pub material_name: String,
    #[serde(default)]
    pub product_category: Option<Category>,
    pub unit: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryPage {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    #[serde(rename = "totalPages", default = "one_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryDraft {
    pub material_name: String,
    pub product_category: CategoryId,
    pub unit: String,
    pub quantity: String,
}

// ---------- Admin ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
    #[serde(rename = "_id")]
    pub id: StaffId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub pages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUsers {
    #[serde(default)]
    pub users: Vec<StaffUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffUserDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersReport {
    pub today: u64,
    #[serde(rename = "thisWeek")]
    pub this_week: u64,
    #[serde(rename = "thisMonth")]
    pub this_month: u64,
}

fn one_page() -> u32 {
    1
}

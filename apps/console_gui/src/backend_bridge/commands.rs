//! Backend commands queued from UI to the backend worker.

use std::path::PathBuf;

use client_core::CredentialScope;
use shared::domain::{CategoryId, InventoryItemId, LeadId, OrderId, ProductId, StaffId, TaskId};
use shared::protocol::{InventoryDraft, LeadDraft, ProductDraft, StaffUserDraft, TaskDraft};

pub enum BackendCommand {
    LoginGeneral {
        email: String,
        password: String,
    },
    LoginAdmin {
        phone: String,
        password: String,
    },
    SignOut {
        scope: CredentialScope,
    },

    FetchLeads {
        page: u32,
        filter: String,
    },
    FetchLead {
        id: LeadId,
    },
    FetchLeadOptions,
    CreateLead {
        draft: LeadDraft,
    },
    EditLead {
        id: LeadId,
        draft: LeadDraft,
    },
    DeleteLead {
        id: LeadId,
    },
    FetchPreorderDetails {
        lead_id: LeadId,
    },
    PlaceOrder {
        order_id: String,
        user_id: StaffId,
        lead_id: LeadId,
        address: String,
        product_id: ProductId,
        image_paths: Vec<PathBuf>,
        from_orders_page: bool,
    },

    FetchOrders {
        page: u32,
        filter: String,
    },
    FetchOrderDetails {
        id: OrderId,
    },
    FetchAssignableUsers,
    AssignOrder {
        order_db_id: OrderId,
        user_id: StaffId,
        role: String,
    },
    ApproveOrder {
        order_id: String,
    },
    RejectDesign {
        order_id: String,
    },
    DownloadDesigns {
        order_id: String,
    },
    UploadBill {
        order_id: String,
        is_one_payment: bool,
        bill1: PathBuf,
        bill2: Option<PathBuf>,
    },
    FetchLeadsForOrder,

    FetchTasks {
        page: u32,
        filter: String,
    },
    CreateTask {
        draft: TaskDraft,
    },
    EditTask {
        id: TaskId,
        draft: TaskDraft,
    },
    DeleteTask {
        id: TaskId,
    },

    FetchDesigns {
        page: u32,
        filter: String,
        search: String,
    },
    FetchDesignOrder {
        id: OrderId,
    },
    SubmitDesigns {
        order_id: String,
        image_paths: Vec<PathBuf>,
    },
    DownloadDesignerBundle {
        id: OrderId,
    },

    FetchPrintJobs {
        page: u32,
        filter: String,
    },
    FetchPrintOrder {
        order_id: String,
    },
    DownloadPrinterBundle {
        order_id: String,
    },
    StartPrinting {
        order_id: String,
    },
    SendToShipping {
        order_id: String,
    },

    FetchShippings {
        page: u32,
        filter: String,
    },
    FetchShippingOrder {
        order_id: String,
    },
    UpdateShippingStatus {
        order_id: String,
        status: String,
    },
    UploadCourierSlip {
        order_id: String,
        file: PathBuf,
    },

    FetchProducts {
        page: u32,
    },
    FetchProduct {
        id: ProductId,
    },
    CreateProduct {
        draft: ProductDraft,
        photo: Option<PathBuf>,
    },
    EditProduct {
        id: ProductId,
        draft: ProductDraft,
        photo: Option<PathBuf>,
    },
    DeleteProduct {
        id: ProductId,
    },
    FetchCategoryOptions,

    FetchCategories {
        page: u32,
    },
    CreateCategory {
        name: String,
        image: Option<PathBuf>,
    },
    EditCategory {
        id: CategoryId,
        name: String,
    },
    DeleteCategory {
        id: CategoryId,
    },

    FetchInventory {
        page: u32,
    },
    CreateInventoryItem {
        draft: InventoryDraft,
    },
    EditInventoryItem {
        id: InventoryItemId,
        draft: InventoryDraft,
    },
    DeleteInventoryItem {
        id: InventoryItemId,
    },

    FetchStaffUsers,
    CreateStaffUser {
        draft: StaffUserDraft,
    },
    EditStaffUser {
        id: StaffId,
        draft: StaffUserDraft,
    },
    ToggleStaffUserStatus {
        id: StaffId,
    },
    SetStaffPages {
        id: StaffId,
        pages: Vec<String>,
    },
    DeleteStaffUser {
        id: StaffId,
    },

    FetchReport {
        stage: String,
    },
    FetchImagePreview {
        url: String,
    },
}

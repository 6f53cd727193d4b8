//! Command orchestration helpers from UI actions to the backend queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = command_name(&cmd);
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}

/// Borrowed command sink handed to page renderers.
pub struct CommandQueue<'a> {
    cmd_tx: &'a Sender<BackendCommand>,
    pub status: &'a mut String,
}

impl<'a> CommandQueue<'a> {
    pub fn new(cmd_tx: &'a Sender<BackendCommand>, status: &'a mut String) -> Self {
        Self { cmd_tx, status }
    }

    pub fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(self.cmd_tx, cmd, self.status);
    }
}

fn command_name(cmd: &BackendCommand) -> &'static str {
    match cmd {
        BackendCommand::LoginGeneral { .. } => "login_general",
        BackendCommand::LoginAdmin { .. } => "login_admin",
        BackendCommand::SignOut { .. } => "sign_out",
        BackendCommand::FetchLeads { .. } => "fetch_leads",
        BackendCommand::FetchLead { .. } => "fetch_lead",
        BackendCommand::FetchLeadOptions => "fetch_lead_options",
        BackendCommand::CreateLead { .. } => "create_lead",
        BackendCommand::EditLead { .. } => "edit_lead",
        BackendCommand::DeleteLead { .. } => "delete_lead",
        BackendCommand::FetchPreorderDetails { .. } => "fetch_preorder_details",
        BackendCommand::PlaceOrder { .. } => "place_order",
        BackendCommand::FetchOrders { .. } => "fetch_orders",
        BackendCommand::FetchOrderDetails { .. } => "fetch_order_details",
        BackendCommand::FetchAssignableUsers => "fetch_assignable_users",
        BackendCommand::AssignOrder { .. } => "assign_order",
        BackendCommand::ApproveOrder { .. } => "approve_order",
        BackendCommand::RejectDesign { .. } => "reject_design",
        BackendCommand::DownloadDesigns { .. } => "download_designs",
        BackendCommand::UploadBill { .. } => "upload_bill",
        BackendCommand::FetchLeadsForOrder => "fetch_leads_for_order",
        BackendCommand::FetchTasks { .. } => "fetch_tasks",
        BackendCommand::CreateTask { .. } => "create_task",
        BackendCommand::EditTask { .. } => "edit_task",
        BackendCommand::DeleteTask { .. } => "delete_task",
        BackendCommand::FetchDesigns { .. } => "fetch_designs",
        BackendCommand::FetchDesignOrder { .. } => "fetch_design_order",
        BackendCommand::SubmitDesigns { .. } => "submit_designs",
        BackendCommand::DownloadDesignerBundle { .. } => "download_designer_bundle",
        BackendCommand::FetchPrintJobs { .. } => "fetch_print_jobs",
        BackendCommand::FetchPrintOrder { .. } => "fetch_print_order",
        BackendCommand::DownloadPrinterBundle { .. } => "download_printer_bundle",
        BackendCommand::StartPrinting { .. } => "start_printing",
        BackendCommand::SendToShipping { .. } => "send_to_shipping",
        BackendCommand::FetchShippings { .. } => "fetch_shippings",
        BackendCommand::FetchShippingOrder { .. } => "fetch_shipping_order",
        BackendCommand::UpdateShippingStatus { .. } => "update_shipping_status",
        BackendCommand::UploadCourierSlip { .. } => "upload_courier_slip",
        BackendCommand::FetchProducts { .. } => "fetch_products",
        BackendCommand::FetchProduct { .. } => "fetch_product",
        BackendCommand::CreateProduct { .. } => "create_product",
        BackendCommand::EditProduct { .. } => "edit_product",
        BackendCommand::DeleteProduct { .. } => "delete_product",
        BackendCommand::FetchCategoryOptions => "fetch_category_options",
        BackendCommand::FetchCategories { .. } => "fetch_categories",
        BackendCommand::CreateCategory { .. } => "create_category",
        BackendCommand::EditCategory { .. } => "edit_category",
        BackendCommand::DeleteCategory { .. } => "delete_category",
        BackendCommand::FetchInventory { .. } => "fetch_inventory",
        BackendCommand::CreateInventoryItem { .. } => "create_inventory_item",
        BackendCommand::EditInventoryItem { .. } => "edit_inventory_item",
        BackendCommand::DeleteInventoryItem { .. } => "delete_inventory_item",
        BackendCommand::FetchStaffUsers => "fetch_staff_users",
        BackendCommand::CreateStaffUser { .. } => "create_staff_user",
        BackendCommand::EditStaffUser { .. } => "edit_staff_user",
        BackendCommand::ToggleStaffUserStatus { .. } => "toggle_staff_user_status",
        BackendCommand::SetStaffPages { .. } => "set_staff_pages",
        BackendCommand::DeleteStaffUser { .. } => "delete_staff_user",
        BackendCommand::FetchReport { .. } => "fetch_report",
        BackendCommand::FetchImagePreview { .. } => "fetch_image_preview",
    }
}

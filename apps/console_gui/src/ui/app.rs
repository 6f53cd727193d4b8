//! Application shell: view state machine, backend event pump, login
//! screens, and role-gated navigation.
//!
//! Navigation mirrors the web console's routes: a general staff area whose
//! sidebar section is picked by the session token's role claim, and an
//! admin area behind its own login. The role claim is a menu hint only;
//! every request is re-authorized by the backend.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::CredentialScope;
use shared::domain::StaffRole;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{
    classify_login_failure, err_label, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::CommandQueue;
use crate::ui::pages::{
    categories, dashboard, designing, inventory, leads, orders, printing, products, shipping,
    tasks, users,
};
use crate::ui::previews::PreviewCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppView {
    GeneralLogin,
    AdminLogin,
    Workspace,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspacePage {
    AllOrders,
    Leads,
    Tasks,
    Designing,
    Printing,
    Shipping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminPage {
    Dashboard,
    AllProducts,
    Category,
    Inventory,
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

#[derive(Default)]
struct LoginForm {
    first: String,
    second: String,
    busy: bool,
}

#[derive(Default)]
struct PageStates {
    leads: leads::LeadsState,
    orders: orders::OrdersState,
    tasks: tasks::TasksState,
    designing: designing::DesigningState,
    printing: printing::PrintingState,
    shipping: shipping::ShippingState,
    products: products::ProductsState,
    categories: categories::CategoriesState,
    inventory: inventory::InventoryState,
    users: users::UsersState,
    dashboard: dashboard::DashboardState,
}

/// Landing page after a general sign-in, matching the web console's
/// per-role redirects.
pub fn landing_page_for(role: Option<StaffRole>) -> WorkspacePage {
    match role {
        Some(StaffRole::Designer) => WorkspacePage::Designing,
        Some(StaffRole::Printer) => WorkspacePage::Printing,
        Some(StaffRole::Shipping) => WorkspacePage::Shipping,
        Some(StaffRole::User) | None => WorkspacePage::Leads,
    }
}

pub struct ConsoleApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,

    view: AppView,
    role: Option<StaffRole>,
    workspace_page: WorkspacePage,
    admin_page: AdminPage,

    status: String,
    status_banner: Option<StatusBanner>,
    login: LoginForm,
    admin_login: LoginForm,
    logout_confirm: Option<CredentialScope>,
    pending_sign_out: Option<CredentialScope>,

    previews: PreviewCache,
    pages: PageStates,
}

impl ConsoleApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url,
            view: AppView::GeneralLogin,
            role: None,
            workspace_page: WorkspacePage::Leads,
            admin_page: AdminPage::Dashboard,
            status: "Not signed in".to_string(),
            status_banner: None,
            login: LoginForm::default(),
            admin_login: LoginForm::default(),
            logout_confirm: None,
            pending_sign_out: None,
            previews: PreviewCache::default(),
            pages: PageStates::default(),
        }
    }

    fn error_banner(&mut self, message: String) {
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message,
        });
    }

    fn clear_loading_flags(&mut self) {
        self.pages.leads.loading = false;
        self.pages.orders.loading = false;
        self.pages.tasks.loading = false;
        self.pages.designing.loading = false;
        self.pages.printing.loading = false;
        self.pages.shipping.loading = false;
        self.pages.products.loading = false;
        self.pages.categories.loading = false;
        self.pages.inventory.loading = false;
        self.pages.users.loading = false;
        self.pages.dashboard.loading = false;
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    self.login.busy = false;
                    self.admin_login.busy = false;
                    self.clear_loading_flags();
                    self.status = if err.context() == UiErrorContext::Login {
                        classify_login_failure(err.message())
                    } else {
                        format!("{} error: {}", err_label(err.category()), err.message())
                    };
                    if matches!(
                        err.context(),
                        UiErrorContext::Login
                            | UiErrorContext::Mutation
                            | UiErrorContext::BackendStartup
                    ) {
                        let message = self.status.clone();
                        self.error_banner(message);
                    }
                }
                UiEvent::GeneralLoginOk { role } => {
                    self.role = role;
                    self.login.busy = false;
                    self.login.second.clear();
                    self.status = "Signed in".to_string();
                    self.status_banner = None;
                    self.pages = PageStates::default();
                    self.previews = PreviewCache::default();
                    self.workspace_page = landing_page_for(self.role);
                    self.view = AppView::Workspace;
                }
                UiEvent::AdminLoginOk => {
                    self.admin_login.busy = false;
                    self.admin_login.second.clear();
                    self.status = "Admin signed in".to_string();
                    self.status_banner = None;
                    self.pages = PageStates::default();
                    self.previews = PreviewCache::default();
                    self.admin_page = AdminPage::Dashboard;
                    self.view = AppView::Admin;
                }
                UiEvent::SessionEnded { scope } => {
                    let intentional = self.pending_sign_out.take() == Some(scope);
                    self.login.busy = false;
                    self.admin_login.busy = false;
                    match scope {
                        CredentialScope::General => {
                            self.role = None;
                            self.view = AppView::GeneralLogin;
                        }
                        CredentialScope::Admin => {
                            self.view = AppView::AdminLogin;
                        }
                    }
                    if intentional {
                        self.status = "Signed out".to_string();
                        self.status_banner = None;
                    } else {
                        self.status = "Session expired".to_string();
                        self.error_banner(
                            "Session expired or invalid credentials. Please sign in again."
                                .to_string(),
                        );
                    }
                }

                UiEvent::LeadsLoaded(page) => self.pages.leads.apply_page(page),
                UiEvent::LeadLoaded(lead) => self.pages.leads.begin_edit(lead),
                UiEvent::LeadOptionsLoaded(options) => self.pages.tasks.set_lead_options(options),
                UiEvent::LeadsRefreshNeeded => self.pages.leads.needs_refresh = true,
                UiEvent::PreorderLoaded(details) => self.pages.leads.open_order_modal(details),
                UiEvent::OrderPlaced => {
                    self.pages.leads.close_order_modal();
                    self.pages.orders.close_create_modal();
                    self.pages.leads.needs_refresh = true;
                    self.pages.orders.needs_refresh = true;
                }

                UiEvent::OrdersLoaded(page) => self.pages.orders.apply_page(page),
                UiEvent::OrderDetailsLoaded(details) => self.pages.orders.open_details(details),
                UiEvent::AssignableUsersLoaded(assignable) => {
                    self.pages.orders.set_assignable(assignable)
                }
                UiEvent::OrdersRefreshNeeded => self.pages.orders.needs_refresh = true,
                UiEvent::LeadsForOrderLoaded(intake) => self.pages.orders.open_create_modal(intake),
                UiEvent::BillUploaded => self.pages.orders.bill_uploaded(),

                UiEvent::TasksLoaded(page) => self.pages.tasks.apply_page(page),
                UiEvent::TasksRefreshNeeded => self.pages.tasks.needs_refresh = true,

                UiEvent::DesignsLoaded(page) => self.pages.designing.apply_page(page),
                UiEvent::DesignOrderLoaded(details) => self.pages.designing.open_view(details),
                UiEvent::DesignsRefreshNeeded => {
                    self.pages.designing.close_view();
                    self.pages.designing.needs_refresh = true;
                }

                UiEvent::PrintJobsLoaded(page) => self.pages.printing.apply_page(page),
                UiEvent::PrintOrderLoaded(details) => self.pages.printing.open_view(details),
                UiEvent::PrintJobsRefreshNeeded => self.pages.printing.needs_refresh = true,

                UiEvent::ShippingsLoaded(page) => self.pages.shipping.apply_page(page),
                UiEvent::ShippingOrderLoaded(details) => self.pages.shipping.open_view(details),
                UiEvent::ShippingStatusUpdated { order_id, status } => {
                    self.pages.shipping.apply_status(&order_id, &status)
                }
                UiEvent::CourierSlipUploaded => {
                    let Self {
                        pages,
                        cmd_tx,
                        status,
                        ..
                    } = self;
                    let mut queue = CommandQueue::new(cmd_tx, status);
                    pages.shipping.courier_slip_uploaded(&mut queue);
                }

                UiEvent::ProductsLoaded(page) => self.pages.products.apply_page(page),
                UiEvent::ProductLoaded(product) => self.pages.products.begin_edit(product),
                UiEvent::ProductsRefreshNeeded => self.pages.products.needs_refresh = true,
                UiEvent::CategoryOptionsLoaded(options) => {
                    self.pages.products.set_categories(options.clone());
                    self.pages.inventory.set_categories(options);
                }

                UiEvent::CategoriesLoaded(page) => self.pages.categories.apply_page(page),
                UiEvent::CategoriesRefreshNeeded => self.pages.categories.needs_refresh = true,

                UiEvent::InventoryLoaded(page) => self.pages.inventory.apply_page(page),
                UiEvent::InventoryRefreshNeeded => self.pages.inventory.needs_refresh = true,

                UiEvent::StaffUsersLoaded(staff) => self.pages.users.apply_users(staff),
                UiEvent::StaffUsersRefreshNeeded => self.pages.users.needs_refresh = true,

                UiEvent::ReportLoaded(report) => self.pages.dashboard.apply_report(report),

                UiEvent::FileDownloaded { filename, bytes } => {
                    self.save_downloaded_file(&filename, &bytes)
                }
                UiEvent::ImagePreviewLoaded { url, image } => {
                    self.previews.insert_loaded(url, image)
                }
                UiEvent::ImagePreviewFailed { url, reason } => {
                    self.previews.insert_failed(url, reason)
                }
            }
        }
    }

    fn save_downloaded_file(&mut self, filename: &str, bytes: &[u8]) {
        if let Some(path) = rfd::FileDialog::new().set_file_name(filename).save_file() {
            match std::fs::write(&path, bytes) {
                Ok(()) => {
                    self.status = format!("Saved {} to {}", filename, path.display());
                }
                Err(err) => {
                    self.status = format!("Failed to save {filename}: {err}");
                }
            }
        } else {
            self.status = format!("Download of {filename} discarded");
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let fill = match banner.severity {
                StatusBannerSeverity::Error => egui::Color32::from_rgb(111, 53, 53),
            };
            egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
            ui.add_space(6.0);
        }
    }

    fn login_card(
        ui: &mut egui::Ui,
        form: &mut LoginForm,
        first_label: &str,
        first_hint: &str,
    ) -> (egui::Response, egui::Response) {
        ui.label(egui::RichText::new(first_label).strong());
        let first = ui.add(
            egui::TextEdit::singleline(&mut form.first)
                .hint_text(first_hint)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);
        ui.label(egui::RichText::new("Password").strong());
        let second = ui.add(
            egui::TextEdit::singleline(&mut form.second)
                .password(true)
                .hint_text("Enter password")
                .desired_width(f32::INFINITY),
        );
        (first, second)
    }

    fn show_general_login(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space((ui.available_height() * 0.15).clamp(18.0, 120.0));
            ui.vertical_centered(|ui| {
                ui.set_width(420.0);
                ui.heading("Dorakart");
                ui.weak("Sign in to your workspace.");
                ui.add_space(8.0);
                self.show_status_banner(ui);

                let (first, second) =
                    Self::login_card(ui, &mut self.login, "Email", "Enter your email");
                let enter = ui.input(|input| input.key_pressed(egui::Key::Enter));
                let submit_by_key = enter && (first.lost_focus() || second.lost_focus());

                ui.add_space(8.0);
                let clicked = ui
                    .add_enabled(
                        !self.login.busy,
                        egui::Button::new(egui::RichText::new("Login").strong())
                            .min_size(egui::vec2(ui.available_width(), 36.0)),
                    )
                    .clicked();
                if clicked || submit_by_key {
                    self.try_general_login();
                }

                ui.add_space(6.0);
                if ui.link("Admin sign in").clicked() {
                    self.status_banner = None;
                    self.view = AppView::AdminLogin;
                }

                ui.add_space(10.0);
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    ui.small("Status:");
                    ui.small(egui::RichText::new(&self.status).weak());
                });
                ui.small(egui::RichText::new(&self.server_url).weak());
            });
        });
    }

    fn try_general_login(&mut self) {
        let email = self.login.first.trim().to_string();
        let password = self.login.second.clone();
        if email.is_empty() || password.is_empty() {
            self.status = "Email and password are required".to_string();
            self.error_banner("Email and password are required".to_string());
            return;
        }
        self.login.busy = true;
        self.status = "Signing in...".to_string();
        self.status_banner = None;
        let Self { cmd_tx, status, .. } = self;
        let mut queue = CommandQueue::new(cmd_tx, status);
        queue.dispatch(BackendCommand::LoginGeneral { email, password });
    }

    fn show_admin_login(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space((ui.available_height() * 0.15).clamp(18.0, 120.0));
            ui.vertical_centered(|ui| {
                ui.set_width(420.0);
                ui.heading("Dorakart");
                ui.weak("Admin Login");
                ui.add_space(8.0);
                self.show_status_banner(ui);

                let (first, second) =
                    Self::login_card(ui, &mut self.admin_login, "Phone", "Enter phone");
                let enter = ui.input(|input| input.key_pressed(egui::Key::Enter));
                let submit_by_key = enter && (first.lost_focus() || second.lost_focus());

                ui.add_space(8.0);
                let clicked = ui
                    .add_enabled(
                        !self.admin_login.busy,
                        egui::Button::new(egui::RichText::new("Login").strong())
                            .min_size(egui::vec2(ui.available_width(), 36.0)),
                    )
                    .clicked();
                if clicked || submit_by_key {
                    self.try_admin_login();
                }

                ui.add_space(6.0);
                if ui.link("Back to staff sign in").clicked() {
                    self.status_banner = None;
                    self.view = AppView::GeneralLogin;
                }

                ui.add_space(10.0);
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    ui.small("Status:");
                    ui.small(egui::RichText::new(&self.status).weak());
                });
            });
        });
    }

    fn try_admin_login(&mut self) {
        let phone = self.admin_login.first.trim().to_string();
        let password = self.admin_login.second.clone();
        if phone.is_empty() || password.is_empty() {
            self.status = "Phone and password are required".to_string();
            self.error_banner("Phone and password are required".to_string());
            return;
        }
        self.admin_login.busy = true;
        self.status = "Signing in...".to_string();
        self.status_banner = None;
        let Self { cmd_tx, status, .. } = self;
        let mut queue = CommandQueue::new(cmd_tx, status);
        queue.dispatch(BackendCommand::LoginAdmin { phone, password });
    }

    fn show_workspace(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("workspace_sidebar")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.heading("Dorakart");
                if let Some(role) = self.role {
                    ui.weak(format!("Signed in as {}", role.label()));
                }
                ui.separator();

                match self.role.unwrap_or(StaffRole::User) {
                    StaffRole::User => {
                        ui.label(egui::RichText::new("Orders").strong());
                        for (page, label) in [
                            (WorkspacePage::AllOrders, "All orders"),
                            (WorkspacePage::Leads, "Leads"),
                            (WorkspacePage::Tasks, "Tasks"),
                        ] {
                            if ui
                                .selectable_label(self.workspace_page == page, label)
                                .clicked()
                            {
                                self.workspace_page = page;
                            }
                        }
                    }
                    StaffRole::Designer => {
                        if ui
                            .selectable_label(
                                self.workspace_page == WorkspacePage::Designing,
                                "Designing",
                            )
                            .clicked()
                        {
                            self.workspace_page = WorkspacePage::Designing;
                        }
                    }
                    StaffRole::Printer => {
                        if ui
                            .selectable_label(
                                self.workspace_page == WorkspacePage::Printing,
                                "Printing",
                            )
                            .clicked()
                        {
                            self.workspace_page = WorkspacePage::Printing;
                        }
                    }
                    StaffRole::Shipping => {
                        if ui
                            .selectable_label(
                                self.workspace_page == WorkspacePage::Shipping,
                                "Shipping",
                            )
                            .clicked()
                        {
                            self.workspace_page = WorkspacePage::Shipping;
                        }
                    }
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.add_space(8.0);
                    if ui.button("Logout").clicked() {
                        self.logout_confirm = Some(CredentialScope::General);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            let page = self.workspace_page;
            let Self {
                pages,
                cmd_tx,
                status,
                previews,
                ..
            } = self;
            let mut queue = CommandQueue::new(cmd_tx, status);
            match page {
                WorkspacePage::AllOrders => {
                    orders::show(&mut pages.orders, ui, &mut queue, previews)
                }
                WorkspacePage::Leads => leads::show(&mut pages.leads, ui, &mut queue),
                WorkspacePage::Tasks => tasks::show(&mut pages.tasks, ui, &mut queue),
                WorkspacePage::Designing => {
                    designing::show(&mut pages.designing, ui, &mut queue, previews)
                }
                WorkspacePage::Printing => {
                    printing::show(&mut pages.printing, ui, &mut queue, previews)
                }
                WorkspacePage::Shipping => {
                    shipping::show(&mut pages.shipping, ui, &mut queue, previews)
                }
            }
            ui.separator();
            ui.small(queue.status.as_str());
        });
    }

    fn show_admin(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("admin_sidebar")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.heading("Dorakart");
                ui.weak("Admin");
                ui.separator();

                if ui
                    .selectable_label(self.admin_page == AdminPage::Dashboard, "Dashboard")
                    .clicked()
                {
                    self.admin_page = AdminPage::Dashboard;
                }
                ui.label(egui::RichText::new("Products").strong());
                for (page, label) in [
                    (AdminPage::AllProducts, "All products"),
                    (AdminPage::Category, "Category"),
                    (AdminPage::Inventory, "Inventory"),
                ] {
                    if ui.selectable_label(self.admin_page == page, label).clicked() {
                        self.admin_page = page;
                    }
                }
                if ui
                    .selectable_label(self.admin_page == AdminPage::Users, "Users")
                    .clicked()
                {
                    self.admin_page = AdminPage::Users;
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.add_space(8.0);
                    if ui.button("Logout").clicked() {
                        self.logout_confirm = Some(CredentialScope::Admin);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            let page = self.admin_page;
            let Self {
                pages,
                cmd_tx,
                status,
                ..
            } = self;
            let mut queue = CommandQueue::new(cmd_tx, status);
            match page {
                AdminPage::Dashboard => dashboard::show(&mut pages.dashboard, ui, &mut queue),
                AdminPage::AllProducts => products::show(&mut pages.products, ui, &mut queue),
                AdminPage::Category => categories::show(&mut pages.categories, ui, &mut queue),
                AdminPage::Inventory => inventory::show(&mut pages.inventory, ui, &mut queue),
                AdminPage::Users => users::show(&mut pages.users, ui, &mut queue),
            }
            ui.separator();
            ui.small(queue.status.as_str());
        });
    }

    fn show_logout_confirm(&mut self, ctx: &egui::Context) {
        let Some(scope) = self.logout_confirm else {
            return;
        };
        let mut close = false;
        egui::Window::new("Confirm Logout")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Are you sure you want to logout?");
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    if ui.button("Logout").clicked() {
                        self.pending_sign_out = Some(scope);
                        let Self { cmd_tx, status, .. } = self;
                        let mut queue = CommandQueue::new(cmd_tx, status);
                        queue.dispatch(BackendCommand::SignOut { scope });
                        close = true;
                    }
                });
            });
        if close {
            self.logout_confirm = None;
        }
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        match self.view {
            AppView::GeneralLogin => self.show_general_login(ctx),
            AppView::AdminLogin => self.show_admin_login(ctx),
            AppView::Workspace => self.show_workspace(ctx),
            AppView::Admin => self.show_admin(ctx),
        }
        self.show_logout_confirm(ctx);
        // Backend events arrive on a channel; keep the loop ticking so they
        // surface without user input.
        ctx.request_repaint_after(std::time::Duration::from_millis(150));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_role_lands_on_its_own_queue() {
        assert_eq!(landing_page_for(Some(StaffRole::User)), WorkspacePage::Leads);
        assert_eq!(
            landing_page_for(Some(StaffRole::Designer)),
            WorkspacePage::Designing
        );
        assert_eq!(
            landing_page_for(Some(StaffRole::Printer)),
            WorkspacePage::Printing
        );
        assert_eq!(
            landing_page_for(Some(StaffRole::Shipping)),
            WorkspacePage::Shipping
        );
    }

    #[test]
    fn unreadable_role_claims_fall_back_to_the_orders_suite() {
        assert_eq!(landing_page_for(None), WorkspacePage::Leads);
    }
}

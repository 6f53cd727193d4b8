//! Printing queue: assigned print jobs with start/ship transitions, order
//! detail with design previews, and the printer's ZIP download.

use eframe::egui;

use shared::domain::WORK_QUEUE_FILTERS;
use shared::protocol::{PrintJob, PrintJobsPage, PrintOrderDetails};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::previews::PreviewCache;
use crate::ui::{badge, widgets};

pub struct PrintingState {
    pub filter: String,
    pub page: u32,
    pub total_pages: u32,
    pub jobs: Vec<PrintJob>,
    pub loading: bool,
    pub needs_refresh: bool,
    view: Option<PrintOrderDetails>,
}

impl Default for PrintingState {
    fn default() -> Self {
        Self {
            filter: "all".to_string(),
            page: 1,
            total_pages: 1,
            jobs: Vec::new(),
            loading: false,
            needs_refresh: true,
            view: None,
        }
    }
}

impl PrintingState {
    pub fn apply_page(&mut self, page: PrintJobsPage) {
        self.jobs = page.orders;
        self.total_pages = page.total_pages.max(1);
        self.loading = false;
    }

    pub fn open_view(&mut self, details: PrintOrderDetails) {
        self.view = Some(details);
    }
}

pub fn show(
    state: &mut PrintingState,
    ui: &mut egui::Ui,
    queue: &mut CommandQueue<'_>,
    previews: &mut PreviewCache,
) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchPrintJobs {
            page: state.page,
            filter: state.filter.clone(),
        });
    }

    ui.heading("Printing");

    if widgets::filter_tabs(ui, WORK_QUEUE_FILTERS, &mut state.filter) {
        state.page = 1;
        state.needs_refresh = true;
    }

    let rows = state.jobs.clone();
    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 56.0)
        .show(ui, |ui| {
            egui::Grid::new("print_jobs_table")
                .num_columns(5)
                .striped(true)
                .min_col_width(130.0)
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("Phone");
                    ui.strong("Lead Owner");
                    ui.strong("Status");
                    ui.strong("Action");
                    ui.end_row();

                    if state.loading {
                        ui.label("Loading...");
                        ui.end_row();
                    } else if rows.is_empty() {
                        ui.weak("No print jobs found.");
                        ui.end_row();
                    }
                    for job in rows {
                        ui.label(&job.lead_name);
                        ui.weak(&job.lead_phone);
                        ui.weak(job.lead_owner_name.as_deref().unwrap_or("-"));
                        badge::show(ui, &job.status);
                        ui.menu_button("⋮", |ui| {
                            if ui.button("View").clicked() {
                                queue.dispatch(BackendCommand::FetchPrintOrder {
                                    order_id: job.order_id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui.button("Download").clicked() {
                                queue.dispatch(BackendCommand::DownloadPrinterBundle {
                                    order_id: job.order_id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui.button("Start printing").clicked() {
                                queue.dispatch(BackendCommand::StartPrinting {
                                    order_id: job.order_id.clone(),
                                });
                                ui.close_menu();
                            }
                            if ui.button("Send to shipping").clicked() {
                                queue.dispatch(BackendCommand::SendToShipping {
                                    order_id: job.order_id.clone(),
                                });
                                ui.close_menu();
                            }
                        });
                        ui.end_row();
                    }
                });
        });

    if widgets::pagination_row(ui, &mut state.page, state.total_pages) {
        state.needs_refresh = true;
    }

    show_view_modal(state, ui, queue, previews);
}

fn show_view_modal(
    state: &mut PrintingState,
    ui: &mut egui::Ui,
    queue: &mut CommandQueue<'_>,
    previews: &mut PreviewCache,
) {
    let Some(details) = state.view.as_ref().cloned() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Print Order Details")
        .collapsible(false)
        .show(&ctx, |ui| {
            egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                ui.label(format!("Order ID: {}", details.order_id));
                ui.label(format!("Customer: {}", details.customer_name));
                ui.label(format!("Phone: {}", details.phone));
                if let Some(owner) = &details.lead_owner {
                    ui.label(format!("Lead Owner: {owner}"));
                }

                ui.separator();
                ui.strong("Products");
                for product in &details.products {
                    ui.label(format!(
                        "{} – Shape: {}, Size: {}",
                        product.name,
                        product.shape.as_deref().unwrap_or("-"),
                        product.size.as_deref().unwrap_or("-"),
                    ));
                }

                if !details.designed_image_links.is_empty() {
                    ui.separator();
                    ui.strong("Approved Designs");
                    ui.horizontal_wrapped(|ui| {
                        for link in &details.designed_image_links {
                            previews.show(ui, link, queue);
                        }
                    });
                }

                ui.add_space(6.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        });
    if close {
        state.view = None;
    }
}

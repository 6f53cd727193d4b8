//! Admin dashboard: order counts by reporting window, filterable by stage.

use eframe::egui;

use shared::domain::REPORT_STAGES;
use shared::protocol::OrdersReport;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;

pub struct DashboardState {
    pub stage: String,
    pub report: Option<OrdersReport>,
    pub loading: bool,
    pub needs_refresh: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            stage: "all".to_string(),
            report: None,
            loading: false,
            needs_refresh: true,
        }
    }
}

impl DashboardState {
    pub fn apply_report(&mut self, report: OrdersReport) {
        self.report = Some(report);
        self.loading = false;
    }
}

pub fn show(state: &mut DashboardState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchReport {
            stage: state.stage.clone(),
        });
    }

    ui.heading("Order Reports");
    ui.weak("Quick glance of orders across stages");
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        for stage in REPORT_STAGES {
            let selected = state.stage == *stage;
            if ui.selectable_label(selected, *stage).clicked() && !selected {
                state.stage = stage.to_string();
                state.needs_refresh = true;
            }
        }
    });
    ui.separator();

    if state.loading {
        ui.spinner();
        return;
    }
    match &state.report {
        None => {
            ui.weak("No data to display");
        }
        Some(report) => {
            ui.columns(3, |columns| {
                report_tile(&mut columns[0], "Today", report.today);
                report_tile(&mut columns[1], "This Week", report.this_week);
                report_tile(&mut columns[2], "This Month", report.this_month);
            });
        }
    }
}

fn report_tile(ui: &mut egui::Ui, title: &str, value: u64) {
    ui.group(|ui| {
        ui.weak(title);
        ui.label(egui::RichText::new(value.to_string()).size(32.0).strong());
    });
}

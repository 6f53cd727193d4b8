//! Tasks page: due-date filters, create/edit modal bound to a lead, delete
//! confirm.

use chrono::{DateTime, Utc};
use eframe::egui;

use shared::domain::{
    LeadId, TaskId, TASK_ACTIVITY_TYPES, TASK_FILTERS, TASK_PRIORITIES, TASK_STATUSES,
};
use shared::protocol::{Lead, Task, TaskDraft, TasksPage};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::CommandQueue;
use crate::ui::widgets;

pub struct TaskForm {
    pub task_name: String,
    pub lead_id: Option<LeadId>,
    pub status: String,
    pub due_date: String,
    pub activity_type: String,
    pub priority: String,
    pub note: String,
}

impl TaskForm {
    fn new() -> Self {
        Self {
            task_name: String::new(),
            lead_id: None,
            status: "scheduled".to_string(),
            due_date: String::new(),
            activity_type: "whatsapp".to_string(),
            priority: "medium".to_string(),
            note: String::new(),
        }
    }

    fn from_task(task: &Task) -> Self {
        Self {
            task_name: task.task_name.clone(),
            lead_id: task.lead_id.as_ref().map(|lead| lead.id.clone()),
            status: task.status.clone(),
            due_date: task
                .due_date
                .map(|date| date.format("%Y-%m-%dT%H:%M").to_string())
                .unwrap_or_default(),
            activity_type: task
                .activity_type
                .clone()
                .unwrap_or_else(|| "whatsapp".to_string()),
            priority: task.priority.clone().unwrap_or_else(|| "medium".to_string()),
            note: task.note.clone().unwrap_or_default(),
        }
    }

    fn draft(&self) -> Option<TaskDraft> {
        let lead_id = self.lead_id.clone()?;
        Some(TaskDraft {
            task_name: self.task_name.trim().to_string(),
            lead_id,
            status: self.status.clone(),
            due_date: self.due_date.clone(),
            activity_type: self.activity_type.clone(),
            priority: self.priority.clone(),
            note: self.note.clone(),
        })
    }
}

pub struct TasksState {
    pub filter: String,
    pub page: u32,
    pub total_pages: u32,
    pub search: String,
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub needs_refresh: bool,
    pub lead_options: Vec<Lead>,
    show_form: bool,
    editing: Option<TaskId>,
    form: TaskForm,
    delete_confirm: Option<TaskId>,
}

impl Default for TasksState {
    fn default() -> Self {
        Self {
            filter: "all".to_string(),
            page: 1,
            total_pages: 1,
            search: String::new(),
            tasks: Vec::new(),
            loading: false,
            needs_refresh: true,
            lead_options: Vec::new(),
            show_form: false,
            editing: None,
            form: TaskForm::new(),
            delete_confirm: None,
        }
    }
}

impl TasksState {
    pub fn apply_page(&mut self, page: TasksPage) {
        self.tasks = page.tasks;
        self.total_pages = page.total_pages.max(1);
        self.loading = false;
    }

    pub fn set_lead_options(&mut self, leads: Vec<Lead>) {
        self.lead_options = leads;
    }
}

fn format_due(due: Option<DateTime<Utc>>) -> String {
    due.map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn show(state: &mut TasksState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if state.needs_refresh {
        state.needs_refresh = false;
        state.loading = true;
        queue.dispatch(BackendCommand::FetchTasks {
            page: state.page,
            filter: state.filter.clone(),
        });
    }

    ui.horizontal(|ui| {
        ui.heading("Tasks");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Create Task").clicked() {
                state.form = TaskForm::new();
                state.editing = None;
                state.show_form = true;
                queue.dispatch(BackendCommand::FetchLeadOptions);
            }
        });
    });

    if widgets::filter_tabs(ui, TASK_FILTERS, &mut state.filter) {
        state.page = 1;
        state.needs_refresh = true;
    }

    ui.add(egui::TextEdit::singleline(&mut state.search).hint_text("Search tasks"));
    ui.add_space(6.0);

    let search = state.search.to_lowercase();
    let rows: Vec<Task> = state
        .tasks
        .iter()
        .filter(|task| task.task_name.to_lowercase().contains(&search))
        .cloned()
        .collect();

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 56.0)
        .show(ui, |ui| {
            egui::Grid::new("tasks_table")
                .num_columns(6)
                .striped(true)
                .min_col_width(110.0)
                .show(ui, |ui| {
                    ui.strong("Task");
                    ui.strong("Lead");
                    ui.strong("Due");
                    ui.strong("Priority");
                    ui.strong("Status");
                    ui.strong("Action");
                    ui.end_row();

                    if state.loading {
                        ui.label("Loading...");
                        ui.end_row();
                    } else if rows.is_empty() {
                        ui.weak("No tasks found.");
                        ui.end_row();
                    }
                    for task in rows {
                        ui.label(&task.task_name);
                        ui.weak(
                            task.lead_id
                                .as_ref()
                                .map(|lead| lead.fullname.as_str())
                                .unwrap_or("-"),
                        );
                        ui.weak(format_due(task.due_date));
                        ui.label(task.priority.as_deref().unwrap_or("-"));
                        ui.label(&task.status);
                        ui.menu_button("⋮", |ui| {
                            if ui.button("Edit").clicked() {
                                state.form = TaskForm::from_task(&task);
                                state.editing = Some(task.id.clone());
                                state.show_form = true;
                                queue.dispatch(BackendCommand::FetchLeadOptions);
                                ui.close_menu();
                            }
                            if ui.button("Delete").clicked() {
                                state.delete_confirm = Some(task.id.clone());
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

    show_form_modal(state, ui, queue);
    show_delete_modal(state, ui, queue);
}

fn show_form_modal(state: &mut TasksState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    if !state.show_form {
        return;
    }
    let ctx = ui.ctx().clone();
    let mut close = false;
    let title = if state.editing.is_some() {
        "Edit Task"
    } else {
        "Create Task"
    };
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            widgets::labeled_text_edit(ui, "Task Name", &mut state.form.task_name);

            ui.label("Lead");
            let lead_name = state
                .form
                .lead_id
                .as_ref()
                .and_then(|id| state.lead_options.iter().find(|lead| &lead.id == id))
                .map(|lead| lead.fullname.clone())
                .unwrap_or_else(|| "-- Select Lead --".to_string());
            egui::ComboBox::from_id_source("task_lead")
                .selected_text(lead_name)
                .show_ui(ui, |ui| {
                    for lead in &state.lead_options {
                        ui.selectable_value(
                            &mut state.form.lead_id,
                            Some(lead.id.clone()),
                            &lead.fullname,
                        );
                    }
                });

            ui.label("Status");
            ui.horizontal(|ui| {
                for status in TASK_STATUSES {
                    ui.radio_value(&mut state.form.status, status.to_string(), *status);
                }
            });

            widgets::labeled_text_edit(ui, "Due Date (YYYY-MM-DDTHH:MM)", &mut state.form.due_date);
            widgets::option_select(
                ui,
                "task_activity",
                "Activity Type",
                TASK_ACTIVITY_TYPES,
                &mut state.form.activity_type,
            );
            widgets::option_select(
                ui,
                "task_priority",
                "Priority",
                TASK_PRIORITIES,
                &mut state.form.priority,
            );
            widgets::labeled_text_edit(ui, "Note", &mut state.form.note);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let label = if state.editing.is_some() { "Update" } else { "Create" };
                if ui.button(label).clicked() {
                    if widgets::is_blank(&state.form.task_name) {
                        *queue.status = "Task name is required".to_string();
                    } else {
                        match state.form.draft() {
                            None => {
                                *queue.status = "Select a lead for the task".to_string();
                            }
                            Some(draft) => {
                                match state.editing.clone() {
                                    Some(id) => {
                                        queue.dispatch(BackendCommand::EditTask { id, draft })
                                    }
                                    None => queue.dispatch(BackendCommand::CreateTask { draft }),
                                }
                                close = true;
                            }
                        }
                    }
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });
    if close {
        state.show_form = false;
        state.editing = None;
    }
}

fn show_delete_modal(state: &mut TasksState, ui: &mut egui::Ui, queue: &mut CommandQueue<'_>) {
    let Some(id) = state.delete_confirm.clone() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let mut close = false;
    egui::Window::new("Delete Task")
        .collapsible(false)
        .resizable(false)
        .show(&ctx, |ui| {
            ui.label("Are you sure you want to delete this task?");
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    close = true;
                }
                if ui.button("Delete").clicked() {
                    queue.dispatch(BackendCommand::DeleteTask { id: id.clone() });
                    close = true;
                }
            });
        });
    if close {
        state.delete_confirm = None;
    }
}

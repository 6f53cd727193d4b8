//! Small shared widgets: filter tabs, pagination, form helpers.

use eframe::egui;

/// Tab strip over a fixed filter set. Returns true when the selection
/// changed; callers reset to page 1 and refetch.
pub fn filter_tabs(ui: &mut egui::Ui, tabs: &[&str], current: &mut String) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        for tab in tabs {
            let selected = current == tab;
            let label = tab.replace('_', " ");
            if ui.selectable_label(selected, label).clicked() && !selected {
                *current = tab.to_string();
                changed = true;
            }
        }
    });
    ui.separator();
    changed
}

/// Numbered pagination row. At most five page buttons are shown, matching
/// the web console. Returns true when the page changed.
pub fn pagination_row(ui: &mut egui::Ui, page: &mut u32, total_pages: u32) -> bool {
    let total_pages = total_pages.max(1);
    let mut changed = false;
    ui.horizontal(|ui| {
        if ui.add_enabled(*page > 1, egui::Button::new("◀")).clicked() {
            *page -= 1;
            changed = true;
        }
        for p in 1..=total_pages.min(5) {
            if ui.selectable_label(*page == p, p.to_string()).clicked() && *page != p {
                *page = p;
                changed = true;
            }
        }
        if total_pages > 5 {
            ui.label("…");
        }
        if ui
            .add_enabled(*page < total_pages, egui::Button::new("▶"))
            .clicked()
        {
            *page += 1;
            changed = true;
        }
    });
    changed
}

pub fn labeled_text_edit(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY));
}

/// Fixed-option select in the style of the web console's `<select>`s.
pub fn option_select(ui: &mut egui::Ui, id: &str, label: &str, options: &[&str], value: &mut String) {
    ui.label(label);
    egui::ComboBox::from_id_source(id)
        .selected_text(value.replace('_', " "))
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, option.to_string(), option.replace('_', " "));
            }
        });
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::is_blank;

    #[test]
    fn blank_detection_ignores_surrounding_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" x "));
    }
}

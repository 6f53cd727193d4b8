//! Pipeline-stage badge styling.
//!
//! A cosmetic mapping only: stage values are authoritative on the backend
//! and anything unrecognized renders with the neutral `pending` style.

use eframe::egui::{self, Color32};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageBadge {
    pub fill: Color32,
    pub text: Color32,
}

const PENDING_BADGE: StageBadge = StageBadge {
    fill: Color32::from_rgb(0xF3, 0xF4, 0xF6),
    text: Color32::from_rgb(0x1F, 0x29, 0x37),
};

pub fn stage_badge(status: &str) -> StageBadge {
    let (fill, text) = match status {
        "order_created" => ((0xDB, 0xEA, 0xFE), (0x1E, 0x40, 0xAF)),
        "assigned_to_designer" => ((0xE0, 0xE7, 0xFF), (0x37, 0x30, 0xA3)),
        "designing_started" => ((0xFE, 0xF9, 0xC3), (0x85, 0x4D, 0x0E)),
        "design_completed" => ((0xDC, 0xFC, 0xE7), (0x16, 0x65, 0x34)),
        "design_won" => ((0xD1, 0xFA, 0xE5), (0x06, 0x5F, 0x46)),
        "design_rejected" => ((0xFE, 0xE2, 0xE2), (0x99, 0x1B, 0x1B)),
        "assigned_to_printer" => ((0xF3, 0xE8, 0xFF), (0x6B, 0x21, 0xA8)),
        "printing_started" => ((0xFF, 0xED, 0xD5), (0x9A, 0x34, 0x12)),
        "printing_finished" => ((0xDC, 0xFC, 0xE7), (0x16, 0x65, 0x34)),
        "assigned_to_shipping" => ((0xCF, 0xFA, 0xFE), (0x15, 0x5E, 0x75)),
        "out_for_delivery" => ((0xFC, 0xE7, 0xF3), (0x9D, 0x17, 0x4D)),
        "order_delivered" => ((0xCC, 0xFB, 0xF1), (0x11, 0x5E, 0x59)),
        _ => return PENDING_BADGE,
    };
    StageBadge {
        fill: Color32::from_rgb(fill.0, fill.1, fill.2),
        text: Color32::from_rgb(text.0, text.1, text.2),
    }
}

/// Display form of a stage value: underscores become spaces.
pub fn stage_label(status: &str) -> String {
    status.replace('_', " ")
}

pub fn show(ui: &mut egui::Ui, status: &str) {
    let badge = stage_badge(status);
    ui.label(
        egui::RichText::new(format!(" {} ", stage_label(status)))
            .color(badge.text)
            .background_color(badge.fill)
            .small(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_stage_has_a_distinct_style_from_pending() {
        for stage in [
            "order_created",
            "assigned_to_designer",
            "designing_started",
            "design_completed",
            "design_won",
            "design_rejected",
            "assigned_to_printer",
            "printing_started",
            "printing_finished",
            "assigned_to_shipping",
            "out_for_delivery",
            "order_delivered",
        ] {
            assert_ne!(stage_badge(stage), PENDING_BADGE, "stage {stage}");
        }
    }

    #[test]
    fn unknown_stages_fall_back_to_the_pending_style() {
        assert_eq!(stage_badge("pending"), PENDING_BADGE);
        assert_eq!(stage_badge(""), PENDING_BADGE);
        assert_eq!(stage_badge("packing_started"), PENDING_BADGE);
        assert_eq!(stage_badge("something_the_backend_added"), PENDING_BADGE);
    }

    #[test]
    fn labels_replace_underscores_with_spaces() {
        assert_eq!(stage_label("out_for_delivery"), "out for delivery");
        assert_eq!(stage_label("pending"), "pending");
    }
}

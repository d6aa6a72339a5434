use eframe::egui::{self, Color32, RichText};

use crate::graph_utils::graph::Properties;
use crate::interaction::SelectionEvent;

const NAME_WIDTH: f32 = 200.0;
const ROW_HEIGHT: f32 = 30.0;

/// Side panel listing the selected node's properties as name/value rows.
pub struct PropertiesPanel {
    title: Option<String>,
    rows: Properties,
    max_rows: usize,
}

impl PropertiesPanel {
    pub fn new(max_rows: usize) -> Self {
        Self { title: None, rows: Properties::new(), max_rows }
    }

    pub fn rows(&self) -> &Properties { &self.rows }

    /// Replace the displayed rows; `None` or an empty mapping clears the panel.
    pub fn set_properties(&mut self, title: Option<String>, properties: Option<Properties>) {
        match properties {
            Some(props) if !props.is_empty() => {
                self.title = title;
                self.rows = props;
            }
            _ => self.clear(),
        }
    }

    pub fn apply(&mut self, event: SelectionEvent) {
        self.set_properties(Some(event.node_name), Some(event.properties));
    }

    pub fn clear(&mut self) {
        self.title = None;
        self.rows = Properties::new();
    }

    /// Rows beyond the configured limit are counted but not shown.
    pub fn hidden_rows(&self) -> usize {
        self.rows.len().saturating_sub(self.max_rows)
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.heading("properties");
        if let Some(title) = &self.title {
            ui.label(RichText::new(title).strong());
        }
        ui.separator();
        if self.rows.is_empty() {
            ui.weak("Click a node to inspect it");
            return;
        }
        egui::Grid::new("properties_grid").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
            for (name, value) in self.rows.iter().take(self.max_rows) {
                ui.add_sized([NAME_WIDTH, ROW_HEIGHT], egui::Label::new(name));
                egui::Frame::new()
                    .fill(Color32::from_rgb(49, 54, 59))
                    .corner_radius(egui::CornerRadius::same(5))
                    .inner_margin(egui::Margin::symmetric(8, 6))
                    .show(ui, |ui| {
                        ui.label(RichText::new(value).color(Color32::from_gray(230)));
                    });
                ui.end_row();
            }
        });
        let hidden = self.hidden_rows();
        if hidden > 0 {
            ui.small(format!("{} more not shown", hidden));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_clears_panel() {
        let mut panel = PropertiesPanel::new(30);
        let props: Properties = [("k", "v")].into_iter().collect();
        panel.set_properties(Some("a".into()), Some(props));
        assert_eq!(panel.rows().len(), 1);
        panel.set_properties(Some("b".into()), Some(Properties::new()));
        assert!(panel.rows().is_empty());
        panel.set_properties(None, Some([("k", "v")].into_iter().collect()));
        panel.set_properties(None, None);
        assert!(panel.rows().is_empty());
    }

    #[test]
    fn rows_over_limit_are_hidden() {
        let mut panel = PropertiesPanel::new(2);
        let props: Properties = (0..5).map(|i| (format!("k{}", i), i.to_string())).collect();
        panel.set_properties(None, Some(props));
        assert_eq!(panel.hidden_rows(), 3);
    }
}

use eframe::egui;

use crate::config::settings::ViewerConfig;
use crate::graph_utils::graph::LabeledNode;
use crate::gui::properties::PropertiesPanel;
use crate::gui::viewer::GraphViewer;

pub struct ViewerApp {
    viewer: GraphViewer<LabeledNode>,
    properties: PropertiesPanel,
    source: String,
}

impl ViewerApp {
    /// `viewer` must already hold the graph; `source` names where it came from.
    pub fn new(config: &ViewerConfig, viewer: GraphViewer<LabeledNode>, source: String) -> Self {
        Self {
            viewer,
            properties: PropertiesPanel::new(config.max_property_rows),
            source,
        }
    }

    pub fn menu_reset_view(&mut self) {
        self.viewer.reset_view();
    }

    pub fn menu_frame_content(&mut self) {
        self.viewer.frame_content();
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            let frame_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::NONE, egui::Key::F);
            let reset_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::NONE, egui::Key::Home);
            if ctx.input_mut(|i| i.consume_shortcut(&frame_shortcut)) {
                self.menu_frame_content();
            }
            if ctx.input_mut(|i| i.consume_shortcut(&reset_shortcut)) {
                self.menu_reset_view();
            }

            ui.horizontal(|ui| {
                ui.label("DAG Viewer");
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close();
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.add(egui::Button::new("Frame content").shortcut_text(ctx.format_shortcut(&frame_shortcut))).clicked() {
                        self.menu_frame_content();
                        ui.close();
                    }
                    if ui.add(egui::Button::new("Reset view").shortcut_text(ctx.format_shortcut(&reset_shortcut))).clicked() {
                        self.menu_reset_view();
                        ui.close();
                    }
                });
                ui.separator();
                let graph = self.viewer.scene().graph();
                ui.weak(format!(
                    "{} | {} nodes, {} edges | {:.0}%",
                    self.source,
                    graph.node_count(),
                    graph.edge_count(),
                    self.viewer.viewport().scale() * 100.0
                ));
            });
        });

        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.properties.show(ui));
            });

        egui::CentralPanel::default().frame(egui::Frame::NONE).show(ctx, |ui| {
            if let Some(event) = self.viewer.show(ui) {
                self.properties.apply(event);
            }
        });
    }
}

//! Settings panel for the digit-identifier GUI

use digit_app::config::Config;
use eframe::egui::{self, Color32, RichText, Ui};

/// Preset Gemini models with vision support
const GEMINI_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-2.5-flash", "gemini-2.5-pro"];

pub struct SettingsPanel {
    model_input: String,
    endpoint_input: String,
    api_key_env_input: String,
    /// Whether the form differs from the saved config
    modified: bool,
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl SettingsPanel {
    pub fn new(config: &Config) -> Self {
        Self {
            model_input: config.model.clone(),
            endpoint_input: config.endpoint.clone(),
            api_key_env_input: config.api_key_env.clone(),
            modified: false,
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, config: &mut Config) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Settings");
            ui.add_space(10.0);

            // Model selection
            ui.label(RichText::new("Model").strong());
            ui.add_space(5.0);
            ui.horizontal_wrapped(|ui| {
                for model in GEMINI_MODELS {
                    if ui
                        .selectable_label(self.model_input == *model, *model)
                        .clicked()
                    {
                        self.model_input = model.to_string();
                        self.modified = true;
                    }
                }
            });
            ui.horizontal(|ui| {
                ui.label("Custom:");
                if ui.text_edit_singleline(&mut self.model_input).changed() {
                    self.modified = true;
                }
            });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(15.0);

            ui.label(RichText::new("API endpoint").strong());
            ui.add_space(5.0);
            if ui.text_edit_singleline(&mut self.endpoint_input).changed() {
                self.modified = true;
            }

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(15.0);

            ui.label(RichText::new("API key environment variable").strong());
            ui.add_space(5.0);
            if ui.text_edit_singleline(&mut self.api_key_env_input).changed() {
                self.modified = true;
            }
            ui.add_space(5.0);
            let (status, color) = if config.credential().is_some() {
                (format!("{} is set", config.api_key_env), Color32::LIGHT_GREEN)
            } else {
                (format!("{} is not set", config.api_key_env), Color32::LIGHT_RED)
            };
            ui.label(RichText::new(status).color(color).small());
            ui.label(
                RichText::new("The key is read from the environment per request and never saved")
                    .color(Color32::GRAY)
                    .small(),
            );

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.modified, egui::Button::new(RichText::new("Save").size(16.0)))
                    .clicked()
                {
                    self.save_config(config);
                }

                if ui.button("Reset").clicked() {
                    *self = Self::new(config);
                }

                if self.modified {
                    ui.label(RichText::new("* Unsaved changes").color(Color32::YELLOW));
                }
            });

            if let Some((ref msg, is_error)) = self.status_message {
                ui.add_space(10.0);
                let color = if is_error { Color32::LIGHT_RED } else { Color32::LIGHT_GREEN };
                ui.label(RichText::new(msg).color(color));
            }
        });
    }

    fn save_config(&mut self, config: &mut Config) {
        let model = self.model_input.trim();
        let endpoint = self.endpoint_input.trim();
        let api_key_env = self.api_key_env_input.trim();
        if model.is_empty() || endpoint.is_empty() || api_key_env.is_empty() {
            self.status_message = Some(("All fields must be filled in".to_string(), true));
            return;
        }

        let mut updated = config.clone();
        updated.model = model.to_string();
        updated.endpoint = endpoint.to_string();
        updated.api_key_env = api_key_env.to_string();

        match updated.save() {
            Ok(()) => {
                *config = updated;
                self.modified = false;
                self.status_message = Some(("Settings saved".to_string(), false));
            }
            Err(e) => {
                self.status_message = Some((format!("Failed to save settings: {}", e), true));
            }
        }
    }
}

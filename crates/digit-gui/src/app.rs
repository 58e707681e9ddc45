//! Main application structure with tab navigation

use digit_app::config::Config;
use eframe::egui;
use tracing::warn;

use crate::identify_panel::IdentifyPanel;
use crate::settings_panel::SettingsPanel;

/// Application tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Identify,
    Settings,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Identify => "Identify",
            Tab::Settings => "Settings",
        }
    }
}

/// Main application state
pub struct DigitApp {
    current_tab: Tab,
    identify_panel: IdentifyPanel,
    settings_panel: SettingsPanel,
    config: Config,
}

impl DigitApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Preview rendering goes through the image crate loaders
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load config, using defaults");
            Config::default()
        });

        let settings_panel = SettingsPanel::new(&config);

        Self {
            current_tab: Tab::default(),
            identify_panel: IdentifyPanel::new(),
            settings_panel,
            config,
        }
    }

    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tab in [Tab::Identify, Tab::Settings] {
                let selected = self.current_tab == tab;
                if ui.selectable_label(selected, tab.label()).clicked() {
                    self.current_tab = tab;
                }
                ui.add_space(8.0);
            }
        });
    }
}

impl eframe::App for DigitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            Tab::Identify => self.identify_panel.ui(ui, &self.config),
            Tab::Settings => self.settings_panel.ui(ui, &mut self.config),
        });
    }
}

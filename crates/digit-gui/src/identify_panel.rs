//! Identify panel for the digit-identifier GUI
//!
//! Provides image selection with preview, identification on a background
//! thread, and result display.

use digit_app::app::{execute, IdentifyResponse};
use digit_app::config::Config;
use digit_app::session::IdentifierSession;
use digit_types::{ConfidenceTier, Outcome};
use digit_vision::UploadedImage;
use eframe::egui::{self, Color32, RichText, Ui};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// Panel for identifying handwritten digits
pub struct IdentifyPanel {
    session: IdentifierSession,
    /// Responses from worker threads, stale ones included
    sender: Sender<IdentifyResponse>,
    receiver: Receiver<IdentifyResponse>,
    /// Texture URI of the current preview, forgotten on replace/clear
    preview_uri: Option<String>,
    /// Start of the pending attempt
    start_time: Option<Instant>,
}

impl IdentifyPanel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            session: IdentifierSession::new(),
            sender,
            receiver,
            preview_uri: None,
            start_time: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, config: &Config) {
        self.poll_responses(ui.ctx());
        self.handle_dropped_files(ui.ctx());

        ui.heading("Handwritten Number Identifier");
        ui.label(
            RichText::new("Upload an image containing a handwritten digit and let AI identify it")
                .color(Color32::GRAY),
        );
        ui.add_space(10.0);

        self.render_upload_section(ui);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.render_actions(ui, config);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.render_outcome(ui);
    }

    /// Apply responses from worker threads; the session drops stale ones
    fn poll_responses(&mut self, ctx: &egui::Context) {
        while let Ok(response) = self.receiver.try_recv() {
            if self.session.complete(response.token, response.outcome) {
                self.start_time = None;
            }
        }

        if self.session.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.session.is_pending() {
            return;
        }

        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };

        if let Some(path) = file.path {
            let declared = (!file.mime.is_empty()).then_some(file.mime.as_str());
            self.select(ctx, UploadedImage::open(&path, declared));
        } else if let Some(bytes) = file.bytes {
            self.select(ctx, UploadedImage::accept(file.name, file.mime, bytes.to_vec()));
        }
    }

    fn pick_file(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.select(ctx, UploadedImage::open(&path, None));
        }
    }

    fn select(&mut self, ctx: &egui::Context, selected: digit_types::Result<UploadedImage>) {
        let accepted = selected.is_ok();
        self.session.select(selected);
        if accepted {
            self.forget_preview(ctx);
            self.preview_uri = self
                .session
                .image()
                .map(|image| preview_uri(self.session.selection(), image.file_name()));
        }
    }

    fn forget_preview(&mut self, ctx: &egui::Context) {
        if let Some(uri) = self.preview_uri.take() {
            ctx.forget_image(&uri);
        }
    }

    fn render_upload_section(&mut self, ui: &mut Ui) {
        let pending = self.session.is_pending();

        let preview = self
            .session
            .image()
            .zip(self.preview_uri.clone())
            .map(|(image, uri)| {
                let details = match image.dimensions() {
                    Some((w, h)) => format!(
                        "{} ({}x{}, {} bytes)",
                        image.file_name(),
                        w,
                        h,
                        image.len()
                    ),
                    None => format!("{} ({} bytes)", image.file_name(), image.len()),
                };
                (uri, image.shared_bytes(), details)
            });

        match preview {
            Some((uri, bytes, details)) => {
                let mut remove = false;
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Image::from_bytes(uri, bytes)
                            .max_height(240.0)
                            .max_width(320.0)
                            .maintain_aspect_ratio(true),
                    );
                    remove = ui.small_button("✕").on_hover_text("Remove image").clicked();
                });
                ui.label(RichText::new(details).monospace().color(Color32::LIGHT_BLUE));

                if remove {
                    self.session.remove_image();
                    self.forget_preview(ui.ctx());
                    self.start_time = None;
                }
            }
            None => {
                ui.label(RichText::new("No image selected").italics().color(Color32::GRAY));
                ui.label(
                    RichText::new("PNG, JPG, GIF up to 10MB (drop a file here or choose one)")
                        .small()
                        .color(Color32::GRAY),
                );
            }
        }

        ui.add_space(5.0);
        if ui
            .add_enabled(!pending, egui::Button::new("Choose image..."))
            .clicked()
        {
            self.pick_file(ui.ctx());
        }
    }

    fn render_actions(&mut self, ui: &mut Ui, config: &Config) {
        ui.horizontal(|ui| {
            let pending = self.session.is_pending();
            let label = if pending { "Identifying..." } else { "Identify Number" };
            let button = egui::Button::new(RichText::new(label).size(16.0));

            if ui.add_enabled(self.session.can_identify(), button).clicked() {
                self.start_identify(config);
            }

            if ui.button("Clear").clicked() {
                self.session.clear();
                self.forget_preview(ui.ctx());
                self.start_time = None;
            }

            if pending {
                ui.spinner();
                if let Some(start) = self.start_time {
                    ui.label(format!("{:.1} s", start.elapsed().as_secs_f32()));
                }
            }
        });
    }

    /// Start identification on a background thread
    fn start_identify(&mut self, config: &Config) {
        let Some(request) = self.session.begin_identify() else {
            return;
        };

        info!(token = request.token.value(), model = %config.model, "starting identification");
        self.start_time = Some(Instant::now());

        // Credential is read now, at call time
        let classifier = config.classifier();
        let sender = self.sender.clone();
        thread::spawn(move || {
            let _ = sender.send(execute(request, &classifier));
        });
    }

    fn render_outcome(&self, ui: &mut Ui) {
        match self.session.outcome() {
            Some(Outcome::Recognized(result)) | Some(Outcome::Unidentifiable(result)) => {
                ui.label(RichText::new("Result").strong().size(14.0));
                ui.add_space(5.0);

                egui::Grid::new("result_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Identified number:").strong());
                        let digit =
                            result.digit.map(String::from).unwrap_or_else(|| "-".to_string());
                        ui.label(
                            RichText::new(digit)
                                .size(48.0)
                                .strong()
                                .color(Color32::LIGHT_GREEN),
                        );
                        ui.end_row();

                        ui.label(RichText::new("Confidence:").strong());
                        ui.label(
                            RichText::new(result.confidence.label())
                                .color(confidence_color(result.confidence)),
                        );
                        ui.end_row();

                        ui.label(RichText::new("Model response:").strong());
                        ui.label(RichText::new(&result.raw_response).monospace());
                        ui.end_row();
                    });

                if let Some(notice) = result.notice() {
                    ui.add_space(10.0);
                    render_message(ui, notice, Color32::from_rgb(80, 60, 20), Color32::YELLOW);
                }
            }
            Some(Outcome::Failed { message, .. }) => {
                render_message(ui, message, Color32::from_rgb(80, 20, 20), Color32::LIGHT_RED);
            }
            None if !self.session.is_pending() => {
                ui.label(
                    RichText::new("Choose an image and press \"Identify Number\"")
                        .italics()
                        .color(Color32::GRAY),
                );
            }
            None => {}
        }
    }
}

impl Default for IdentifyPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique per selection so a replaced image never shows a cached texture
fn preview_uri(selection: u64, file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    format!("bytes://preview/{}/{}", selection, name)
}

fn confidence_color(tier: ConfidenceTier) -> Color32 {
    match tier {
        ConfidenceTier::High => Color32::LIGHT_GREEN,
        ConfidenceTier::Medium => Color32::YELLOW,
        ConfidenceTier::Low => Color32::LIGHT_RED,
    }
}

fn render_message(ui: &mut Ui, message: &str, fill: Color32, text: Color32) {
    egui::Frame::new()
        .fill(fill)
        .inner_margin(8.0)
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.label(RichText::new(message).color(text));
        });
}

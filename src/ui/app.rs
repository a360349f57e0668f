use std::time::Instant;

use eframe::egui::{self, Align2, FontId, RichText};

use crate::annotate::Label;
use crate::browser::LinkOpener;
use crate::scanner::{ProcessedFrame, Scanner, TickReport};
use crate::session::LinkAction;
use crate::ui::theme::{
    self, BLUE_DARK, BLUE_ENTRY_BG, BLUE_LIGHT, BLUE_LINK, BLUE_TEXT, LABEL_COLOR,
};

const VIDEO_TEXTURE: &str = "camera_frame";

pub struct QrScanApp {
    scanner: Scanner,
    opener: Box<dyn LinkOpener>,
    video: Option<egui::TextureHandle>,
    frame_size: [usize; 2],
    labels: Vec<Label>,
    status: String,
}

impl QrScanApp {
    pub fn new(scanner: Scanner, opener: Box<dyn LinkOpener>) -> Self {
        Self {
            scanner,
            opener,
            video: None,
            frame_size: [0, 0],
            labels: Vec::new(),
            status: String::new(),
        }
    }

    fn apply_report(&mut self, ctx: &egui::Context, report: TickReport) {
        if let Some(status) = report.status_line() {
            self.status = status;
        }
        if let Some(frame) = report.frame {
            self.show_frame(ctx, frame);
        }
    }

    fn show_frame(&mut self, ctx: &egui::Context, frame: ProcessedFrame) {
        let size = [frame.image.width() as usize, frame.image.height() as usize];
        let color_image = egui::ColorImage::from_rgb(size, frame.image.as_raw());
        match &mut self.video {
            Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                let texture =
                    ctx.load_texture(VIDEO_TEXTURE, color_image, egui::TextureOptions::LINEAR);
                self.video = Some(texture);
            }
        }
        self.frame_size = size;
        self.labels = frame.labels;
    }

    fn open_link(&mut self) {
        match self.scanner.open_link(self.opener.as_mut()) {
            Ok(LinkAction::Opened(url)) => self.status = format!("Opened {url}"),
            Ok(LinkAction::AlreadyOpened(_)) => {}
            Ok(LinkAction::NotUrl(_)) => self.status = "No valid URL to open".to_string(),
            Ok(LinkAction::NoData) => self.status = "No code scanned yet".to_string(),
            Err(err) => {
                tracing::warn!(%err, "failed to open link");
                if let Some(status) = err.status_message() {
                    self.status = status;
                }
            }
        }
    }

    fn render_video(&self, ui: &mut egui::Ui) {
        let Some(texture) = &self.video else {
            ui.allocate_ui_with_layout(
                egui::vec2(640.0, 360.0),
                egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                |ui| {
                    ui.label("Waiting for camera...");
                },
            );
            return;
        };

        let avail = ui.available_width().max(1.0);
        let [w, h] = self.frame_size;
        let scale = (avail / w.max(1) as f32).min(1.0);
        let display = egui::vec2(w as f32 * scale, h as f32 * scale);
        let response = ui.add(egui::Image::new(texture).fit_to_exact_size(display));

        let painter = ui.painter_at(response.rect);
        for label in &self.labels {
            let offset = egui::vec2(label.x as f32 * scale, label.y as f32 * scale);
            painter.text(
                response.rect.min + offset,
                Align2::LEFT_BOTTOM,
                &label.text,
                FontId::proportional(16.0),
                LABEL_COLOR,
            );
        }
    }

    fn render_log(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(BLUE_LIGHT)
            .stroke(egui::Stroke::new(1.0, BLUE_TEXT))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        egui::Grid::new("scan_log")
                            .striped(true)
                            .num_columns(3)
                            .min_col_width(50.0)
                            .show(ui, |ui| {
                                for title in ["No", "Jenis", "Data"] {
                                    ui.label(RichText::new(title).strong().size(15.0));
                                }
                                ui.end_row();
                                for entry in self.scanner.session().entries() {
                                    ui.label(entry.seq.to_string());
                                    ui.label(&entry.kind);
                                    ui.label(&entry.data);
                                    ui.end_row();
                                }
                            });
                    });
            });
    }
}

impl eframe::App for QrScanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(report) = self.scanner.tick(Instant::now()) {
            self.apply_report(ctx, report);
        }

        let (enter, escape, close_requested) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Escape),
                i.viewport().close_requested(),
            )
        });
        if enter {
            self.open_link();
        }
        if escape || close_requested {
            self.scanner.shutdown();
            if escape {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            return;
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} unique", self.scanner.session().unique_count()));
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(RichText::new(&self.status).color(BLUE_DARK));
                }
            });
        });

        egui::SidePanel::right("log_panel")
            .resizable(true)
            .default_width(520.0)
            .show(ctx, |ui| {
                theme::section_header(ui, "LINK TERDETEKSI");
                let mut link = self.scanner.session().link_field().to_string();
                egui::Frame::none()
                    .fill(BLUE_ENTRY_BG)
                    .stroke(egui::Stroke::new(1.0, BLUE_TEXT))
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut link)
                                .interactive(false)
                                .desired_width(f32::INFINITY)
                                .font(FontId::proportional(16.0))
                                .text_color(BLUE_LINK),
                        );
                    });
                ui.add_space(15.0);

                theme::section_header(ui, "LOG QR");
                self.render_log(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            theme::section_header(ui, "KAMERA PENDETEKSI");
            self.render_video(ui);
            ui.add_space(10.0);
            ui.label(RichText::new("ENTER untuk membuka link").strong());
            ui.label(RichText::new("ESC untuk keluar").strong());
        });

        ctx.request_repaint_after(self.scanner.time_until_next_tick(Instant::now()));
    }
}

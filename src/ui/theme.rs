use eframe::egui::{self, Color32, FontData, FontDefinitions, FontFamily, RichText, Stroke};

pub const BLUE_BG: Color32 = Color32::from_rgb(0xEA, 0xF2, 0xFF);
pub const BLUE_LIGHT: Color32 = Color32::from_rgb(0xD4, 0xE4, 0xFF);
pub const BLUE_MEDIUM: Color32 = Color32::from_rgb(0xB4, 0xD2, 0xFF);
pub const BLUE_DARK: Color32 = Color32::from_rgb(0x4A, 0x7E, 0xE2);
pub const BLUE_TEXT: Color32 = Color32::from_rgb(0x00, 0x1B, 0x4D);
pub const BLUE_ENTRY_BG: Color32 = Color32::from_rgb(0xF5, 0xF9, 0xFF);
pub const BLUE_LINK: Color32 = Color32::from_rgb(0x00, 0x00, 0xAA);
/// 映像上のラベル文字色
pub const LABEL_COLOR: Color32 = Color32::from_rgb(0, 0, 255);

pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = BLUE_BG;
    visuals.window_fill = BLUE_BG;
    visuals.extreme_bg_color = BLUE_ENTRY_BG;
    visuals.faint_bg_color = BLUE_LIGHT;
    visuals.selection.bg_fill = BLUE_DARK;
    visuals.override_text_color = Some(BLUE_TEXT);
    ctx.set_visuals(visuals);
}

/// 見出し帯（"KAMERA PENDETEKSI" など）
pub fn section_header(ui: &mut egui::Ui, title: &str) {
    egui::Frame::none()
        .fill(BLUE_MEDIUM)
        .stroke(Stroke::new(1.0, BLUE_TEXT))
        .inner_margin(egui::Margin::same(4.0))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(title).strong().size(18.0).color(BLUE_TEXT));
            });
        });
    ui.add_space(5.0);
}

/// 既定フォントにないCJK等のペイロード用に代替フォントを末尾に足す
pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        r"C:\Windows\Fonts\msgothic.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("payload_fallback".to_string(), FontData::from_owned(data));
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts.families
                    .entry(family)
                    .or_default()
                    .push("payload_fallback".to_string());
            }
            ctx.set_fonts(fonts);
            return;
        }
    }
}

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context as _;
use cropbox::{
    AspectRatioMode, CropChanged, CropEditor, CropPhase, EditorEvent, Handle, Point, Rect,
    Settings, Size, media,
};
use eframe::egui;
use image::DynamicImage;
use tracing_subscriber::EnvFilter;

const PADDING: f32 = 20.0;

struct CropApp {
    settings: Settings,
    image: Option<DynamicImage>,
    image_path: Option<PathBuf>,
    texture: Option<egui::TextureHandle>,
    // Created on the first frame that lays the preview out.
    editor: Option<CropEditor>,
    last_settled: Rc<RefCell<Option<CropChanged>>>,
    aspect_ratio_mode: AspectRatioMode,
    custom_w: u32,
    custom_h: u32,
    is_portrait: bool,
    status: Option<String>,
}

impl CropApp {
    fn new(_cc: &eframe::CreationContext<'_>, settings: Settings, initial: Option<PathBuf>) -> Self {
        let aspect_ratio_mode = settings.default_aspect;
        let mut app = Self {
            settings,
            image: None,
            image_path: None,
            texture: None,
            editor: None,
            last_settled: Rc::new(RefCell::new(None)),
            aspect_ratio_mode,
            custom_w: 4,
            custom_h: 3,
            is_portrait: aspect_ratio_mode.is_portrait(),
            status: None,
        };
        if let Some(path) = initial {
            app.open(&path);
        }
        app
    }

    fn open(&mut self, path: &Path) {
        match media::open_image(path) {
            Ok(img) => {
                tracing::info!(path = %path.display(), width = img.width(), height = img.height(), "opened image");
                self.image = Some(img);
                self.image_path = Some(path.to_path_buf());
                self.texture = None;
                self.editor = None;
                self.status = None;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not open media");
                self.status = Some(format!("Could not open {}: {err}", path.display()));
            }
        }
    }

    fn load_texture(&mut self, ctx: &egui::Context) {
        if let Some(image) = &self.image {
            let size = [image.width() as _, image.height() as _];
            let image_buffer = image.to_rgba8();
            let pixels = image_buffer.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            self.texture =
                Some(ctx.load_texture("image", color_image, egui::TextureOptions::LINEAR));
        }
    }

    fn media_size(&self) -> Size {
        self.image
            .as_ref()
            .map(|img| Size::new(img.width() as i32, img.height() as i32))
            .unwrap_or_default()
    }

    fn create_editor(&mut self, bounds: Rect) {
        let editor = CropEditor::new(self.media_size(), bounds)
            .with_handle_size(self.settings.handle_size)
            .with_constraints(self.settings.constraints());
        let mut editor = match editor {
            Ok(editor) => editor,
            Err(err) => {
                tracing::warn!(%err, "invalid constraints in settings, using defaults");
                CropEditor::new(self.media_size(), bounds).with_handle_size(self.settings.handle_size)
            }
        };
        let sink = Rc::clone(&self.last_settled);
        editor.subscribe(move |change| {
            if change.phase == CropPhase::Settled {
                *sink.borrow_mut() = Some(*change);
            }
        });
        self.editor = Some(editor);
        self.apply_aspect_ratio();
    }

    fn apply_aspect_ratio(&mut self) {
        let ratio = self
            .aspect_ratio_mode
            .ratio(self.media_size(), (self.custom_w, self.custom_h));
        if let Some(editor) = &mut self.editor {
            if let Err(err) = editor.set_aspect_ratio(ratio) {
                tracing::warn!(%err, "ignoring aspect ratio");
                return;
            }
            editor.maximize_to_aspect();
        }
    }

    fn save(&mut self) {
        let (Some(image), Some(editor)) = (&self.image, &self.editor) else {
            return;
        };
        let mut dialog = rfd::FileDialog::new().add_filter("Image", &["png", "jpg", "jpeg", "bmp"]);
        if let Some(dir) = &self.settings.output_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(stem) = self.image_path.as_ref().and_then(|p| p.file_stem()) {
            dialog = dialog.set_file_name(format!("{}_cropped.png", stem.to_string_lossy()));
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        match media::save_cropped(image, editor.media_crop_rect(), self.settings.even_dimensions, &path) {
            Ok(r) => {
                self.status = Some(format!("Saved {}x{} to {}", r.width, r.height, path.display()));
            }
            Err(err) => {
                tracing::error!(%err, "failed to save image");
                self.status = Some(format!("Failed to save image: {err}"));
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        if ui.button("Open Image").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Image", &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"])
                .pick_file()
            {
                self.open(&path);
            }
        }

        let Some(editor) = &mut self.editor else {
            return;
        };
        ui.separator();

        // Numeric fields hold media pixels.
        let media = editor.media_size();
        let mut r = editor.media_crop_rect();
        let mut changed = false;
        egui::Grid::new("crop_fields").num_columns(2).show(ui, |ui| {
            ui.label("x");
            changed |= ui.add(egui::DragValue::new(&mut r.x).range(0..=media.width)).changed();
            ui.end_row();
            ui.label("y");
            changed |= ui.add(egui::DragValue::new(&mut r.y).range(0..=media.height)).changed();
            ui.end_row();
            ui.label("width");
            changed |= ui.add(egui::DragValue::new(&mut r.width).range(1..=media.width)).changed();
            ui.end_row();
            ui.label("height");
            changed |= ui.add(egui::DragValue::new(&mut r.height).range(1..=media.height)).changed();
            ui.end_row();
        });
        if changed {
            match editor.set_media_crop_rect(r.x, r.y, r.width, r.height, true) {
                Ok(_) => self.status = None,
                Err(err) => self.status = Some(format!("Invalid crop: {err}")),
            }
        }

        ui.horizontal(|ui| {
            if ui.button("↔").on_hover_text("Center Horizontally").clicked() {
                editor.center_horizontally();
            }
            if ui.button("↕").on_hover_text("Center Vertically").clicked() {
                editor.center_vertically();
            }
        });

        ui.separator();
        ui.label("Aspect Ratio:");
        let mut changed = false;
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("params_aspect_ratio")
                .selected_text(format!("{}", self.aspect_ratio_mode))
                .show_ui(ui, |ui| {
                    for mode in [
                        AspectRatioMode::Free,
                        AspectRatioMode::Original,
                        AspectRatioMode::Square,
                    ] {
                        changed |= ui
                            .selectable_value(&mut self.aspect_ratio_mode, mode, mode.to_string())
                            .changed();
                    }

                    ui.separator();
                    let presets = if self.is_portrait {
                        AspectRatioMode::PORTRAIT
                    } else {
                        AspectRatioMode::LANDSCAPE
                    };
                    for mode in presets {
                        changed |= ui
                            .selectable_value(&mut self.aspect_ratio_mode, mode, mode.to_string())
                            .changed();
                    }

                    ui.separator();
                    changed |= ui
                        .selectable_value(
                            &mut self.aspect_ratio_mode,
                            AspectRatioMode::Custom,
                            "Custom",
                        )
                        .changed();
                });

            if ui.button("🔄").on_hover_text("Portrait / Landscape").clicked() {
                self.is_portrait = !self.is_portrait;
                if self.aspect_ratio_mode == AspectRatioMode::Custom {
                    std::mem::swap(&mut self.custom_w, &mut self.custom_h);
                } else {
                    self.aspect_ratio_mode = self.aspect_ratio_mode.counterpart();
                }
                changed = true;
            }
        });

        if self.aspect_ratio_mode == AspectRatioMode::Custom {
            ui.horizontal(|ui| {
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut self.custom_w)
                            .speed(0.1)
                            .range(1..=100),
                    )
                    .changed();
                ui.label(":");
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut self.custom_h)
                            .speed(0.1)
                            .range(1..=100),
                    )
                    .changed();
            });
        }

        if changed {
            self.apply_aspect_ratio();
        }

        ui.separator();
        if ui.button("Save Cropped Image").clicked() {
            self.save();
        }

        if let Some(settled) = *self.last_settled.borrow() {
            let r = settled.rect;
            ui.label(
                egui::RichText::new(format!("Last crop: {}, {} {}x{}", r.x, r.y, r.width, r.height))
                    .weak(),
            );
        }
        if let Some(status) = &self.status {
            ui.label(status);
        }
    }

    fn preview(&mut self, ui: &mut egui::Ui) {
        let Some(texture) = &self.texture else {
            ui.centered_and_justified(|ui| {
                ui.label("Drop an image here or use Open Image");
            });
            return;
        };

        let available_size = ui.available_size();
        let max_size = available_size - egui::vec2(PADDING * 2.0, PADDING * 2.0);
        let image_size = texture.size_vec2();

        // Calculate size to fit within available space while maintaining aspect ratio
        let scale = (max_size.x / image_size.x).min(max_size.y / image_size.y);
        let display_size = (image_size * scale).round();
        let total_display_size = display_size + egui::vec2(PADDING * 2.0, PADDING * 2.0);

        // Manual centering
        let x_offset = (available_size.x - total_display_size.x) / 2.0;
        let y_offset = (available_size.y - total_display_size.y) / 2.0;
        let start_pos = ui.cursor().min + egui::vec2(x_offset.max(0.0), y_offset.max(0.0));
        let target_rect = egui::Rect::from_min_size(start_pos, total_display_size);

        let response = ui.allocate_rect(target_rect, egui::Sense::drag());
        let painter = ui.painter_at(target_rect);

        let image_rect = egui::Rect::from_min_size(
            target_rect.min + egui::vec2(PADDING, PADDING),
            display_size,
        );
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        // Editor space has its origin at the preview's top-left corner.
        let bounds = Rect::new(0, 0, display_size.x as i32, display_size.y as i32);
        if bounds.is_empty() {
            return;
        }
        if self.editor.is_none() {
            self.create_editor(bounds);
        }
        let Some(editor) = &mut self.editor else {
            return;
        };
        editor.handle(EditorEvent::BoundsChanged(bounds));

        let origin = image_rect.min;
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                editor.handle(EditorEvent::PointerDown(to_local(pos, origin)));
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                editor.handle(EditorEvent::PointerMove(to_local(pos, origin)));
            }
        }
        if response.drag_stopped() {
            let pos = response.interact_pointer_pos().unwrap_or(origin);
            editor.handle(EditorEvent::PointerUp(to_local(pos, origin)));
        }

        let handle = editor
            .active_handle()
            .or_else(|| response.hover_pos().and_then(|p| editor.hover_handle(to_local(p, origin))));
        if let Some(handle) = handle {
            ui.ctx().set_cursor_icon(cursor_for(handle, editor.active_handle().is_some()));
        }

        let crop = editor.crop_rect();
        let screen_crop_rect = egui::Rect::from_min_size(
            origin + egui::vec2(crop.x as f32, crop.y as f32),
            egui::vec2(crop.width as f32, crop.height as f32),
        );
        draw_overlay(&painter, image_rect, screen_crop_rect, self.settings.handle_size as f32);
    }
}

fn to_local(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    let v = pos - origin;
    Point::new(v.x.round() as i32, v.y.round() as i32)
}

fn cursor_for(handle: Handle, dragging: bool) -> egui::CursorIcon {
    match handle {
        Handle::Move if dragging => egui::CursorIcon::Grabbing,
        Handle::Move => egui::CursorIcon::Grab,
        Handle::TopLeft | Handle::BottomRight => egui::CursorIcon::ResizeNwSe,
        Handle::TopRight | Handle::BottomLeft => egui::CursorIcon::ResizeNeSw,
    }
}

fn draw_overlay(painter: &egui::Painter, image_rect: egui::Rect, crop: egui::Rect, handle_size: f32) {
    // Dim everything outside the crop
    let overlay_color = egui::Color32::from_black_alpha(150);
    for region in [
        egui::Rect::from_min_max(image_rect.min, egui::pos2(image_rect.max.x, crop.min.y)),
        egui::Rect::from_min_max(egui::pos2(image_rect.min.x, crop.max.y), image_rect.max),
        egui::Rect::from_min_max(
            egui::pos2(image_rect.min.x, crop.min.y),
            egui::pos2(crop.min.x, crop.max.y),
        ),
        egui::Rect::from_min_max(
            egui::pos2(crop.max.x, crop.min.y),
            egui::pos2(image_rect.max.x, crop.max.y),
        ),
    ] {
        painter.rect_filled(region, 0.0, overlay_color);
    }

    painter.rect_stroke(crop, 0.0, egui::Stroke::new(1.0, egui::Color32::WHITE));

    let handle_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
    let handle_fill = egui::Color32::WHITE;
    for pos in [
        crop.min,
        crop.max,
        egui::pos2(crop.min.x, crop.max.y),
        egui::pos2(crop.max.x, crop.min.y),
    ] {
        painter.circle(pos, handle_size / 2.0, handle_fill, handle_stroke);
    }
}

impl eframe::App for CropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle dropped files
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.open(&path);
        }
        if self.image.is_some() && self.texture.is_none() {
            self.load_texture(ctx);
        }

        egui::SidePanel::right("controls")
            .resizable(false)
            .show(ctx, |ui| self.controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.preview(ui));
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cropbox=info")),
        )
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        "Cropbox",
        options,
        Box::new(move |cc| Ok(Box::new(CropApp::new(cc, settings, initial)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run the window: {err}"))
}

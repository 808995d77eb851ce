use eframe::egui;

use image_adjuster::adjust::Param;
use image_adjuster::image_io::{self, EXPORT_FILE_NAME};
use image_adjuster::session::{Session, SessionConfig};
use image_adjuster::AdjustError;

use crate::platform::{self, PendingUpload, Picker, PickerSlot};

pub struct ImageAdjusterApp {
    session: Session,
    pending_upload: PendingUpload,
    picker: PickerSlot<Picker>,
    preview_texture: Option<egui::TextureHandle>,
    texture_revision: u64,
    last_error: Option<String>,
}

impl ImageAdjusterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            session: Session::new(SessionConfig::default()),
            pending_upload: PendingUpload::default(),
            picker: PickerSlot::default(),
            preview_texture: None,
            texture_revision: 0,
            last_error: None,
        }
    }

    fn report(&mut self, err: AdjustError) {
        log::error!("{err}");
        self.last_error = Some(err.to_string());
    }

    /// Feed a finished upload, if any, into the session.
    fn poll_upload(&mut self) {
        let upload = self.pending_upload.borrow_mut().take();
        let result = match upload {
            Some(Ok(bytes)) => self.session.load_image(&bytes),
            Some(Err(e)) => Err(e),
            None => return,
        };
        self.picker.release();
        match result {
            Ok(()) => self.last_error = None,
            Err(e) => self.report(e),
        }
    }

    fn download(&mut self) {
        let result = self
            .session
            .export_png()
            .and_then(|bytes| platform::offer_download(&bytes, EXPORT_FILE_NAME));
        if let Err(e) = result {
            self.report(e);
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if self.session.revision() == self.texture_revision {
            return;
        }
        if let Some(rendered) = self.session.rendered() {
            let max_width = self.session.config().preview_max_width * ctx.pixels_per_point();
            let max_side = ctx.input(|i| i.max_texture_side) as u32;
            let preview = image_io::preview_image(rendered, max_width, max_side);
            let size = [preview.width() as usize, preview.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, preview.as_raw());
            self.preview_texture = Some(ctx.load_texture(
                "preview",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }
        self.texture_revision = self.session.revision();
    }
}

impl eframe::App for ImageAdjusterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_upload();
        self.refresh_texture(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Upload Image").clicked() {
                    platform::request_upload(ctx, &self.pending_upload, &mut self.picker);
                }
                let has_image = self.session.has_image();
                if ui
                    .add_enabled(has_image, egui::Button::new("Download Adjusted Image"))
                    .clicked()
                {
                    self.download();
                }
                if ui.add_enabled(has_image, egui::Button::new("Reset")).clicked() {
                    self.session.reset_params();
                }

                ui.separator();
                if let Some(err) = &self.last_error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                } else if let Some(src) = self.session.source() {
                    ui.label(format!(
                        "{}x{} | {:.0}ms",
                        src.width(),
                        src.height(),
                        self.session.last_render_time_ms()
                    ));
                }
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.weak("Adjust sliders to change image properties");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(tex) = &self.preview_texture else {
                ui.centered_and_justified(|ui| {
                    ui.label("Upload an image to begin");
                });
                return;
            };

            let available = ui.available_size();
            let [w, h] = tex.size();
            let config = self.session.config();
            let max_w = config.preview_width_limit(available.x);
            let max_h = config.preview_height_limit(available.y);
            let (dw, dh) = image_io::display_size(w as u32, h as u32, max_w, max_h);
            let texture_id = tex.id();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.image(egui::load::SizedTexture::new(texture_id, egui::vec2(dw, dh)));
                    ui.add_space(8.0);
                    ui.set_max_width(max_w);
                    ui_sliders(ui, self);
                });
            });
        });

        // Picks and slider moves from this frame show up on the next one.
        if self.session.revision() != self.texture_revision
            || self.pending_upload.borrow().is_some()
        {
            ctx.request_repaint();
        }
    }
}

fn ui_sliders(ui: &mut egui::Ui, app: &mut ImageAdjusterApp) {
    for &param in Param::ALL {
        let mut value = app.session.params().get(param);
        let changed = ui
            .add(
                egui::Slider::new(&mut value, param.range())
                    .step_by(1.0)
                    .suffix("%")
                    .text(param.name()),
            )
            .changed();
        if changed {
            if let Err(e) = app.session.set(param, value) {
                app.report(e);
            }
        }
    }
}

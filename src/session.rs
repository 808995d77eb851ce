//! Adjustment session: the loaded image, the slider values, and the
//! rendered result that is kept in sync with both.

use image::RgbaImage;

use crate::adjust::{self, AdjustParams, Param};
use crate::error::AdjustError;
use crate::image_io;

/// Session and preview settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Upper bound on preview width, in points.
    pub preview_max_width: f32,
    /// Horizontal space kept free around the preview.
    pub preview_margin: f32,
    /// Vertical space kept below the preview for sliders and buttons.
    pub controls_height: f32,
    /// The preview is never squeezed below this height, scrolling instead.
    pub preview_min_height: f32,
    /// Restore neutral slider values whenever a new image is loaded.
    pub reset_params_on_load: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preview_max_width: 400.0,
            preview_margin: 40.0,
            controls_height: 200.0,
            preview_min_height: 160.0,
            reset_params_on_load: false,
        }
    }
}

impl SessionConfig {
    /// Largest preview width for the given available width.
    pub fn preview_width_limit(&self, available_width: f32) -> f32 {
        f32::min(self.preview_max_width, available_width - self.preview_margin).max(1.0)
    }

    /// Largest preview height for the given available height.
    pub fn preview_height_limit(&self, available_height: f32) -> f32 {
        (available_height - self.controls_height).max(self.preview_min_height)
    }
}

pub struct Session {
    config: SessionConfig,
    source: Option<RgbaImage>,
    params: AdjustParams,
    rendered: Option<RgbaImage>,
    revision: u64,
    render_time_ms: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            source: None,
            params: AdjustParams::default(),
            rendered: None,
            revision: 0,
            render_time_ms: 0.0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn params(&self) -> AdjustParams {
        self.params
    }

    pub fn source(&self) -> Option<&RgbaImage> {
        self.source.as_ref()
    }

    pub fn rendered(&self) -> Option<&RgbaImage> {
        self.rendered.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Incremented every time the rendered buffer is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_render_time_ms(&self) -> f64 {
        self.render_time_ms
    }

    /// Decode `bytes` and make it the current image.
    ///
    /// On failure the previous image, if any, stays loaded.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), AdjustError> {
        let img = image_io::decode(bytes)?;
        self.load_decoded(img);
        Ok(())
    }

    pub fn load_decoded(&mut self, img: RgbaImage) {
        log::info!("Loaded {}x{} image", img.width(), img.height());
        self.source = Some(img);
        if self.config.reset_params_on_load {
            self.params = AdjustParams::default();
        }
        self.recompute();
    }

    pub fn set_brightness(&mut self, value: f32) -> Result<f32, AdjustError> {
        self.set(Param::Brightness, value)
    }

    pub fn set_contrast(&mut self, value: f32) -> Result<f32, AdjustError> {
        self.set(Param::Contrast, value)
    }

    pub fn set_mix(&mut self, value: f32) -> Result<f32, AdjustError> {
        self.set(Param::Mix, value)
    }

    /// Clamp and store one parameter, re-rendering if it changed.
    /// Returns the value actually stored.
    pub fn set(&mut self, param: Param, value: f32) -> Result<f32, AdjustError> {
        let value = param.clamp(value)?;
        let slot = self.params.get_mut(param);
        if *slot != value {
            *slot = value;
            self.recompute();
        }
        Ok(value)
    }

    pub fn set_params(&mut self, params: AdjustParams) -> Result<(), AdjustError> {
        let params = params.clamped()?;
        if params != self.params {
            self.params = params;
            self.recompute();
        }
        Ok(())
    }

    pub fn reset_params(&mut self) {
        if !self.params.is_neutral() {
            self.params = AdjustParams::default();
            self.recompute();
        }
    }

    /// Rebuild the rendered buffer from the untouched source.
    fn recompute(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        let start = web_time::Instant::now();
        self.rendered = Some(adjust::transform_image(source, &self.params));
        self.render_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.revision += 1;
        log::debug!(
            "Rendered {}x{} with {:?} in {:.1}ms",
            source.width(),
            source.height(),
            self.params,
            self.render_time_ms
        );
    }

    /// PNG bytes of the adjusted image, at full source resolution.
    pub fn export_png(&self) -> Result<Vec<u8>, AdjustError> {
        let rendered = self.rendered.as_ref().ok_or(AdjustError::NoImageLoaded)?;
        let bytes = image_io::encode_png(rendered)?;
        log::info!("Exported {} bytes as {}", bytes.len(), image_io::EXPORT_FILE_NAME);
        Ok(bytes)
    }
}

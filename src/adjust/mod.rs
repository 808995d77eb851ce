pub mod transform;

pub use transform::{adjust_pixel, contrast_factor, transform, transform_image, transform_in_place};

use std::ops::RangeInclusive;

use crate::error::AdjustError;

/// One of the three user-controlled adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Brightness,
    Contrast,
    Mix,
}

impl Param {
    pub const ALL: &[Param] = &[Param::Brightness, Param::Contrast, Param::Mix];

    pub fn name(self) -> &'static str {
        match self {
            Param::Brightness => "Brightness",
            Param::Contrast => "Contrast",
            Param::Mix => "Grayscale",
        }
    }

    /// Valid slider domain, in percent.
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Param::Brightness => 0.0..=200.0,
            Param::Contrast => 0.0..=200.0,
            Param::Mix => 0.0..=100.0,
        }
    }

    /// Value at which this adjustment leaves the image untouched.
    pub fn neutral(self) -> f32 {
        match self {
            Param::Brightness => 100.0,
            Param::Contrast => 100.0,
            Param::Mix => 0.0,
        }
    }

    /// Clamp `value` into this parameter's domain.
    ///
    /// Finite values outside the domain are clamped and logged. Non-finite
    /// values cannot be placed on a slider and are rejected.
    pub fn clamp(self, value: f32) -> Result<f32, AdjustError> {
        if !value.is_finite() {
            log::warn!("Rejecting non-finite {} value {value}", self.name());
            return Err(AdjustError::InvalidParameter { param: self, value });
        }
        let range = self.range();
        let clamped = value.clamp(*range.start(), *range.end());
        if clamped != value {
            log::warn!("{} value {value} out of range, clamped to {clamped}", self.name());
        }
        Ok(clamped)
    }
}

/// Brightness, contrast and grayscale mix, all in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustParams {
    pub brightness: f32,
    pub contrast: f32,
    pub mix: f32,
}

impl Default for AdjustParams {
    fn default() -> Self {
        Self {
            brightness: Param::Brightness.neutral(),
            contrast: Param::Contrast.neutral(),
            mix: Param::Mix.neutral(),
        }
    }
}

impl AdjustParams {
    pub fn new(brightness: f32, contrast: f32, mix: f32) -> Self {
        Self { brightness, contrast, mix }
    }

    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::Brightness => self.brightness,
            Param::Contrast => self.contrast,
            Param::Mix => self.mix,
        }
    }

    pub fn get_mut(&mut self, param: Param) -> &mut f32 {
        match param {
            Param::Brightness => &mut self.brightness,
            Param::Contrast => &mut self.contrast,
            Param::Mix => &mut self.mix,
        }
    }

    pub fn is_neutral(&self) -> bool {
        Param::ALL.iter().all(|&p| self.get(p) == p.neutral())
    }

    /// Copy with every field clamped into its domain.
    pub fn clamped(&self) -> Result<Self, AdjustError> {
        Ok(Self {
            brightness: Param::Brightness.clamp(self.brightness)?,
            contrast: Param::Contrast.clamp(self.contrast)?,
            mix: Param::Mix.clamp(self.mix)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_neutral() {
        assert!(AdjustParams::default().is_neutral());
        assert!(!AdjustParams::new(100.0, 100.0, 1.0).is_neutral());
    }

    #[test]
    fn clamp_limits_to_domain() {
        assert_eq!(Param::Brightness.clamp(250.0).unwrap(), 200.0);
        assert_eq!(Param::Contrast.clamp(-5.0).unwrap(), 0.0);
        assert_eq!(Param::Mix.clamp(150.0).unwrap(), 100.0);
        assert_eq!(Param::Mix.clamp(42.0).unwrap(), 42.0);
    }

    #[test]
    fn clamp_rejects_nan() {
        let err = Param::Contrast.clamp(f32::NAN).unwrap_err();
        assert!(matches!(
            err,
            AdjustError::InvalidParameter { param: Param::Contrast, .. }
        ));
        assert!(Param::Brightness.clamp(f32::INFINITY).is_err());
    }

    #[test]
    fn clamped_params() {
        let p = AdjustParams::new(300.0, 120.0, -1.0).clamped().unwrap();
        assert_eq!(p, AdjustParams::new(200.0, 120.0, 0.0));
    }

    #[test]
    fn get_mut_targets_field() {
        let mut p = AdjustParams::default();
        *p.get_mut(Param::Mix) = 30.0;
        assert_eq!(p.mix, 30.0);
        assert_eq!(p.get(Param::Mix), 30.0);
    }
}

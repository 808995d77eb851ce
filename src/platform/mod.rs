//! Upload and download glue for the native and browser builds.

use std::cell::RefCell;
use std::rc::Rc;

use image_adjuster::AdjustError;

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(not(target_arch = "wasm32"))]
pub use native::{Picker, offer_download, request_upload};

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::{Picker, offer_download, request_upload};

/// Bytes of a picked file, filled in once reading completes and taken by
/// the next frame.
pub type PendingUpload = Rc<RefCell<Option<Result<Vec<u8>, AdjustError>>>>;

/// Owns the resources of the most recently opened file picker.
///
/// Opening a new picker drops the previous one, so a cancelled picker is
/// released on the next click rather than leaked.
pub struct PickerSlot<P> {
    current: Option<P>,
}

impl<P> Default for PickerSlot<P> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<P> PickerSlot<P> {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn hold(&mut self, picker: P) {
        if self.current.replace(picker).is_some() {
            log::debug!("Dropping previous file picker");
        }
    }

    pub fn release(&mut self) {
        self.current = None;
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_holding(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_picker_drops_previous() {
        let first = Rc::new(());
        let second = Rc::new(());
        let mut slot = PickerSlot::default();

        slot.hold(first.clone());
        assert_eq!(Rc::strong_count(&first), 2);

        slot.hold(second.clone());
        assert_eq!(Rc::strong_count(&first), 1);
        assert_eq!(Rc::strong_count(&second), 2);
        assert!(slot.is_holding());
    }

    #[test]
    fn release_drops_held_picker() {
        let picker = Rc::new(());
        let mut slot = PickerSlot::default();
        slot.hold(picker.clone());
        slot.release();
        assert_eq!(Rc::strong_count(&picker), 1);
        assert!(!slot.is_holding());
    }
}

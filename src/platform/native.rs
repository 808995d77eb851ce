use eframe::egui;
use image_adjuster::AdjustError;
use image_adjuster::image_io::IMAGE_EXTENSIONS;

use super::{PendingUpload, PickerSlot};

/// The native dialog is modal and holds nothing once it returns.
pub type Picker = ();

pub fn request_upload(
    _ctx: &egui::Context,
    pending: &PendingUpload,
    _picker: &mut PickerSlot<Picker>,
) {
    if let Some(path) = rfd::FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
    {
        log::info!("Reading {}", path.display());
        let result = std::fs::read(&path).map_err(AdjustError::from);
        *pending.borrow_mut() = Some(result);
    }
}

pub fn offer_download(bytes: &[u8], file_name: &str) -> Result<(), AdjustError> {
    if let Some(path) = rfd::FileDialog::new()
        .add_filter("PNG", &["png"])
        .set_file_name(file_name)
        .save_file()
    {
        std::fs::write(&path, bytes)?;
        log::info!("Saved {}", path.display());
    }
    Ok(())
}

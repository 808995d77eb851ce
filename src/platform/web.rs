use eframe::egui;
use image_adjuster::AdjustError;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use super::{PendingUpload, PickerSlot};

/// Detached `<input type="file">` and its change handler.
pub type Picker = (web_sys::HtmlInputElement, Closure<dyn FnMut()>);

fn js_err(value: JsValue) -> AdjustError {
    AdjustError::Platform(format!("{value:?}"))
}

fn document() -> Result<web_sys::Document, AdjustError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AdjustError::Platform("no document".to_owned()))
}

/// Open the browser file picker. The file is read asynchronously and lands
/// in `pending`; a repaint is requested when it arrives.
pub fn request_upload(ctx: &egui::Context, pending: &PendingUpload, picker: &mut PickerSlot<Picker>) {
    match open_file_picker(ctx.clone(), pending.clone()) {
        Ok(opened) => picker.hold(opened),
        Err(e) => *pending.borrow_mut() = Some(Err(e)),
    }
}

fn open_file_picker(ctx: egui::Context, pending: PendingUpload) -> Result<Picker, AdjustError> {
    let input: web_sys::HtmlInputElement = document()?
        .create_element("input")
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err_element)?;
    input.set_type("file");
    input.set_accept("image/*");

    let picker = input.clone();
    let onchange = Closure::<dyn FnMut()>::new(move || {
        let Some(file) = picker.files().and_then(|files| files.get(0)) else {
            return;
        };
        log::info!("Reading {}", file.name());
        let pending = pending.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = read_file(&file).await;
            *pending.borrow_mut() = Some(result);
            ctx.request_repaint();
        });
    });
    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    input.click();
    Ok((input, onchange))
}

async fn read_file(file: &web_sys::File) -> Result<Vec<u8>, AdjustError> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn js_err_element(element: web_sys::Element) -> AdjustError {
    AdjustError::Platform(format!("unexpected element <{}>", element.tag_name()))
}

/// Hand `bytes` to the browser as a PNG download named `file_name`.
pub fn offer_download(bytes: &[u8], file_name: &str) -> Result<(), AdjustError> {
    let document = document()?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err_element)?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    let body = document
        .body()
        .ok_or_else(|| AdjustError::Platform("no body".to_owned()))?;
    body.append_child(&anchor).map_err(js_err)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_err)?;
    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
    Ok(())
}

//! WASM bindings for dnm-exporter.
//!
//! Scenes are passed in as JSON and documents come back as strings.

use wasm_bindgen::prelude::*;

use crate::{encode_document, encode_single_surface, ExportConfig, ExportError, Scene};

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// Export every visible mesh of a JSON scene as DNM text.
#[wasm_bindgen(js_name = exportDnm)]
pub fn export_dnm(scene_json: &str) -> Result<String, JsError> {
    let scene = Scene::from_json(scene_json).map_err(to_js)?;
    encode_document(&scene, &ExportConfig::default()).map_err(to_js)
}

/// Export one named mesh of a JSON scene as SRF text.
#[wasm_bindgen(js_name = exportSrf)]
pub fn export_srf(scene_json: &str, object_name: &str) -> Result<String, JsError> {
    let scene = Scene::from_json(scene_json).map_err(to_js)?;
    let node = scene
        .find(object_name)
        .ok_or_else(|| to_js(ExportError::NodeNotFound(object_name.to_string())))?;
    encode_single_surface(node, &ExportConfig::default()).map_err(to_js)
}

fn to_js(e: ExportError) -> JsError {
    JsError::new(&e.to_string())
}

//! WASM bindings for browser-based SVG conversion.
//!
//! This module exposes the conversion to JavaScript via wasm-bindgen. The
//! page owns the editor, file picking, preview and any debouncing.

use wasm_bindgen::prelude::*;

use crate::options::Options;
use crate::query::SelectorEngine;
use crate::stats::Statistics;
use crate::transform::convert_with;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Result of [`convert_svg`].
#[wasm_bindgen]
pub struct WasmConversion {
    markup: String,
    statistics: Statistics,
}

#[wasm_bindgen]
impl WasmConversion {
    #[wasm_bindgen(getter)]
    pub fn markup(&self) -> String {
        self.markup.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn converted_styles(&self) -> usize {
        self.statistics.converted_styles
    }

    #[wasm_bindgen(getter)]
    pub fn processed_elements(&self) -> usize {
        self.statistics.processed_elements
    }

    #[wasm_bindgen(getter)]
    pub fn size_change(&self) -> i64 {
        self.statistics.size_change
    }
}

/// Convert SVG text, returning the error message on failure.
#[wasm_bindgen]
pub fn convert_svg(input: &str, pretty: bool) -> Result<WasmConversion, JsValue> {
    let options = Options::default().with_pretty(pretty);
    let conversion = convert_with(input, &SelectorEngine, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let statistics = Statistics::compute(&conversion.stats, input.len(), conversion.markup.len());

    Ok(WasmConversion {
        markup: conversion.markup,
        statistics,
    })
}

/// Whether a picked file name should be accepted.
#[wasm_bindgen]
pub fn is_svg_file_name(name: &str) -> bool {
    crate::source::is_svg_path(name)
}

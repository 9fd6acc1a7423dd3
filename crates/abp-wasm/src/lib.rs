//! WebAssembly bindings for the filter list parser

use wasm_bindgen::prelude::*;

use abp_filters::{parse_filter_list as parse_lines, parse_line as parse_single, Line};

/// Parse one line and return the record as a JSON string.
#[wasm_bindgen]
pub fn parse_line(text: &str) -> Result<JsValue, JsValue> {
    let line = parse_single(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let json = to_json(&line)?;
    Ok(JsValue::from_str(&json))
}

/// Parse a whole list.
///
/// Returns `{ records, errors }`: `records` is a JSON array string of the
/// parsed lines, `errors` an array of `{ line, message }` objects.
#[wasm_bindgen]
pub fn parse_filter_list(text: &str) -> Result<JsValue, JsValue> {
    let parsed = ParsedList::from_text(text);

    let js_result = js_sys::Object::new();
    let records = serde_json::to_string(&parsed.records)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize records: {}", e)))?;
    let _ = js_sys::Reflect::set(&js_result, &"records".into(), &JsValue::from_str(&records));

    let errors = js_sys::Array::new_with_length(parsed.errors.len() as u32);
    for (i, (line, message)) in parsed.errors.iter().enumerate() {
        let error = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&error, &"line".into(), &JsValue::from(*line as u32));
        let _ = js_sys::Reflect::set(&error, &"message".into(), &JsValue::from_str(message));
        errors.set(i as u32, error.into());
    }
    let _ = js_sys::Reflect::set(&js_result, &"errors".into(), &errors);

    Ok(js_result.into())
}

fn to_json(line: &Line) -> Result<String, JsValue> {
    serde_json::to_string(line).map_err(|e| JsValue::from_str(&format!("Failed to serialize record: {}", e)))
}

struct ParsedList {
    records: Vec<Line>,
    /// 1-based line number and error message.
    errors: Vec<(usize, String)>,
}

impl ParsedList {
    fn from_text(text: &str) -> Self {
        let mut records = Vec::new();
        let mut errors = Vec::new();

        let mut lines = parse_lines(text.lines());
        while let Some(result) = lines.next() {
            match result {
                Ok(line) => records.push(line),
                Err(err) => errors.push((lines.line_number(), err.to_string())),
            }
        }

        Self { records, errors }
    }
}

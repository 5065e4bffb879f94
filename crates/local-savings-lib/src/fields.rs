//! Read/write boundary between the calculators and whatever interface hosts
//! them. Inputs are looked up by element id, outputs are written back by id.

use std::collections::{HashMap, HashSet};

pub trait FieldProvider {
    /// The numeric value of an input, or `None` if it is missing or not a number.
    fn get_number(&self, id: &str) -> Option<f64>;

    fn set_text(&mut self, id: &str, value: &str);

    fn set_visible(&mut self, _id: &str, _visible: bool) {}
}

/// Parses the leading number of `raw` the way a browser form does:
/// leading whitespace is skipped and anything after the numeric prefix is
/// ignored, so `"12 mpg"` reads as 12. Unlike `parseFloat`, `"Infinity"`
/// and anything else that is not finite counts as missing.
pub fn parse_lenient(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Reads a field, treating missing or non-numeric input as zero.
pub fn number_or_zero<F: FieldProvider + ?Sized>(fields: &F, id: &str) -> f64 {
    fields.get_number(id).unwrap_or(0.0)
}

/// In-memory form: raw input text, written output text and visibility flags.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    inputs: HashMap<String, String>,
    outputs: HashMap<String, String>,
    visible: HashSet<String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, id: &str, raw: &str) -> Self {
        self.set_input(id, raw);
        self
    }

    pub fn set_input(&mut self, id: &str, raw: &str) {
        self.inputs.insert(id.to_string(), raw.to_string());
    }

    pub fn input(&self, id: &str) -> Option<&str> {
        self.inputs.get(id).map(String::as_str)
    }

    pub fn input_mut(&mut self, id: &str) -> &mut String {
        self.inputs.entry(id.to_string()).or_default()
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.outputs.get(id).map(String::as_str)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }
}

impl FieldProvider for FormFields {
    fn get_number(&self, id: &str) -> Option<f64> {
        self.inputs.get(id).and_then(|raw| parse_lenient(raw))
    }

    fn set_text(&mut self, id: &str, value: &str) {
        self.outputs.insert(id.to_string(), value.to_string());
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if visible {
            self.visible.insert(id.to_string());
        } else {
            self.visible.remove(id);
        }
    }
}

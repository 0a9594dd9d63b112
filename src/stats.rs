//! Summary numbers for a finished conversion.

use crate::transform::ConversionResult;

/// Counters shown to the user after a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Statistics {
    pub converted_styles: usize,
    pub processed_elements: usize,
    /// Input length in bytes.
    pub input_size: usize,
    /// Output length in bytes.
    pub output_size: usize,
    /// `output_size - input_size`; negative when the output shrank.
    pub size_change: i64,
}

impl Statistics {
    pub fn compute(result: &ConversionResult, input_len: usize, output_len: usize) -> Self {
        Self {
            converted_styles: result.converted_styles,
            processed_elements: result.processed_elements,
            input_size: input_len,
            output_size: output_len,
            size_change: output_len as i64 - input_len as i64,
        }
    }
}

//! Conversion settings.

/// Settings for a single conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Run the output through [`crate::pretty::format_markup`].
    pub pretty: bool,
    /// Leave the `style` attribute untouched when a merge yields no
    /// declarations, instead of writing `style=""`. Off by default: every
    /// merge rewrites the attribute.
    pub strip_empty_style: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pretty: false,
            strip_empty_style: false,
        }
    }
}

impl Options {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_strip_empty_style(mut self, strip: bool) -> Self {
        self.strip_empty_style = strip;
        self
    }
}

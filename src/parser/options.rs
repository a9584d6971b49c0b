//! Parsing options and configuration.

/// Options for decoding HWP documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Whether to extract BinData images into the document
    pub extract_images: bool,

    /// Whether to pass extracted images to the image describer
    pub describe_images: bool,

    /// Whether images never anchored in the body are appended to the last section
    pub append_unreferenced_images: bool,

    /// Whether tables without a TABLE record are rebuilt with a guessed layout
    pub recover_approximate_tables: bool,

    /// Whether image descriptions are requested in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract text only (no images, no descriptions).
    pub fn text_only(mut self) -> Self {
        self.extract_images = false;
        self.describe_images = false;
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Enable or disable image descriptions.
    pub fn with_descriptions(mut self, describe: bool) -> Self {
        self.describe_images = describe;
        self
    }

    /// Keep unanchored images out of the section flow.
    pub fn without_unreferenced_images(mut self) -> Self {
        self.append_unreferenced_images = false;
        self
    }

    /// Drop tables whose grid is not declared instead of approximating them.
    pub fn strict_tables(mut self) -> Self {
        self.recover_approximate_tables = false;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extract_images: true,
            describe_images: true,
            append_unreferenced_images: true,
            recover_approximate_tables: true,
            parallel: true,
        }
    }
}

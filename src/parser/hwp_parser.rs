//! HWP 5.x document parser.

use std::sync::Arc;

use crate::describe::{describe_images, ImageDescriber};
use crate::error::Result;
use crate::model::{is_image_format, Block, Document, Image};

use super::binary::decode_utf16_cstr;
use super::container::{
    read_decoded, section_names, StreamSource, BIN_DATA_PREFIX, DOC_INFO, FILE_HEADER, PREVIEW_TEXT,
};
use super::context::ParseContext;
use super::header::FileHeader;
use super::options::ParseOptions;
use super::section::parse_section;
use super::style::StyleTables;

/// Decoder for one HWP 5.x document container.
pub struct HwpParser<S> {
    source: S,
    options: ParseOptions,
    describer: Option<Arc<dyn ImageDescriber>>,
}

impl<S: StreamSource> HwpParser<S> {
    /// Create a parser with default options.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(source: S, options: ParseOptions) -> Self {
        Self {
            source,
            options,
            describer: None,
        }
    }

    /// Attach an image describer.
    pub fn with_describer(mut self, describer: Arc<dyn ImageDescriber>) -> Self {
        self.describer = Some(describer);
        self
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Decode the FileHeader stream, or the default header when it is absent.
    pub fn header(&self) -> FileHeader {
        match self.source.read_stream(FILE_HEADER) {
            Some(data) => FileHeader::parse(&data),
            None => {
                log::warn!("no {} stream, assuming compressed streams", FILE_HEADER);
                FileHeader::default()
            }
        }
    }

    /// Parse the document.
    ///
    /// Fails only when the container cannot list its streams.
    pub fn parse(&self) -> Result<Document> {
        let names = self.source.stream_names()?;
        let mut document = Document::new();

        let header = self.header();
        record_header(&mut document, &header);
        if header.password || header.distribution {
            log::warn!("document is protected; body streams may not decode");
        }

        let styles = match read_decoded(&self.source, DOC_INFO, header.compressed) {
            Some(data) => StyleTables::load(&data),
            None => {
                log::warn!("no {} stream, using default styles", DOC_INFO);
                StyleTables::new()
            }
        };

        if self.options.extract_images {
            for image in self.extract_images(&names, header.compressed) {
                document.add_image(image);
            }
        }

        let mut ctx = ParseContext::new(styles)
            .with_images(document.images.keys().cloned())
            .with_table_recovery(self.options.recover_approximate_tables);

        for name in section_names(&names) {
            let Some(data) = read_decoded(&self.source, &name, header.compressed) else {
                continue;
            };
            log::debug!("parsing {} ({} bytes)", name, data.len());
            document.add_section(parse_section(&data, &mut ctx));
        }

        if self.options.append_unreferenced_images {
            let pending: Vec<String> = ctx.unreferenced_images().map(str::to_string).collect();
            if let Some(last) = document.sections.last_mut() {
                for id in pending {
                    last.add_block(Block::image(id));
                }
            }
        }

        let (footnotes, endnotes) = ctx.take_notes();
        document.footnotes = footnotes;
        document.endnotes = endnotes;

        if self.options.describe_images {
            if let Some(describer) = &self.describer {
                describe_images(&mut document.images, describer.as_ref(), self.options.parallel);
            }
        }

        Ok(document)
    }

    /// Read image assets from the `BinData/` streams.
    fn extract_images(&self, names: &[String], compressed: bool) -> Vec<Image> {
        names
            .iter()
            .filter_map(|name| {
                let file = name.strip_prefix(BIN_DATA_PREFIX)?;
                let (stem, ext) = file.rsplit_once('.')?;
                if !is_image_format(ext) {
                    return None;
                }
                let data = read_decoded(&self.source, name, compressed)?;
                Some(Image::new(stem, data, ext).with_alt_text(format!("Image: {}", file)))
            })
            .collect()
    }

    /// Preview text from the `PrvText` stream; empty when absent.
    pub fn quick_extract(&self) -> String {
        self.source
            .read_stream(PREVIEW_TEXT)
            .map(|data| decode_utf16_cstr(&data))
            .unwrap_or_default()
    }
}

fn record_header(document: &mut Document, header: &FileHeader) {
    let meta = &mut document.metadata;
    meta.insert("format".to_string(), "hwp5".to_string());
    meta.insert("version".to_string(), header.version.to_string());
    meta.insert("compressed".to_string(), header.compressed.to_string());
    meta.insert("password".to_string(), header.password.to_string());
    meta.insert("distribution".to_string(), header.distribution.to_string());
}

//! Image description hook.
//!
//! The decoder never describes images itself. Callers that have a vision
//! service plug it in through [`ImageDescriber`]; every supported image is
//! offered to it once, after extraction and before the document is returned.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::model::Image;

/// Produces a natural-language description of an image.
///
/// Returning `None` leaves the image undescribed; a describer that is slow or
/// unavailable should return `None` rather than fail the parse.
pub trait ImageDescriber: Send + Sync {
    /// Describe raw image bytes of the given MIME type.
    fn describe(&self, data: &[u8], mime_type: &str) -> Option<String>;
}

impl<F> ImageDescriber for F
where
    F: Fn(&[u8], &str) -> Option<String> + Send + Sync,
{
    fn describe(&self, data: &[u8], mime_type: &str) -> Option<String> {
        self(data, mime_type)
    }
}

/// Fill in descriptions for every image with a known MIME type.
///
/// Images without a MIME type (wmf, emf) are never offered. Returns how many
/// images received a description.
pub fn describe_images(images: &mut BTreeMap<String, Image>, describer: &dyn ImageDescriber, parallel: bool) -> usize {
    let describe_one = |image: &mut Image| -> bool {
        let Some(mime) = image.mime_type() else {
            return false;
        };
        match describer.describe(&image.data, mime) {
            Some(text) if !text.trim().is_empty() => {
                image.description = Some(text);
                true
            }
            _ => false,
        }
    };

    let described = if parallel {
        images
            .par_iter_mut()
            .map(|(_, image)| describe_one(image))
            .filter(|&done| done)
            .count()
    } else {
        images
            .values_mut()
            .map(describe_one)
            .filter(|&done| done)
            .count()
    };

    log::debug!("described {} of {} images", described, images.len());
    described
}

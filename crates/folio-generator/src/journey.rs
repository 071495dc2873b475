//! Journey feed aggregation.
//!
//! Merges the images of every collection into one chronological sequence.

use folio_core::{Collection, JourneyImage};

/// Build the journey feed from collections in listing order.
///
/// Images are sorted by their parent collection's date. The sort is stable,
/// so images of one collection stay in filename order and collections sharing
/// a date keep listing order.
pub fn journey_feed(collections: &[Collection]) -> Vec<JourneyImage> {
    let mut entries: Vec<_> = collections
        .iter()
        .flat_map(|collection| {
            let meta = &collection.meta;
            collection.images().enumerate().map(move |(index, media)| {
                let image = JourneyImage {
                    src: collection.media_src(&media.filename),
                    alt: format!("{} - {}", meta.title, index + 1),
                    collection: meta.title.clone(),
                    collection_slug: meta.slug.clone(),
                    date: meta.date.clone(),
                    index,
                };
                (meta.published, image)
            })
        })
        .collect();

    entries.sort_by_key(|(published, _)| *published);
    entries.into_iter().map(|(_, image)| image).collect()
}

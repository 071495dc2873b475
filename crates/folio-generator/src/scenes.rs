//! Gallery scene partitioning.
//!
//! Splits a collection's images into scenes for the horizontal gallery. Layouts
//! repeat in a fixed cycle of hero (1 image), duo (2) and cluster (3). The
//! cycle advances once per scene regardless of how many images the scene
//! actually received. A short tail is downgraded: one image is always a hero,
//! and two images in a cluster slot become a duo. There are no other
//! downgrades.

use folio_core::{Collection, MediaItem};
use serde::Serialize;

/// Visual layout of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneLayout {
    /// One full-bleed image.
    Hero,
    /// Two images side by side.
    Duo,
    /// Three images grouped together.
    Cluster,
}

impl SceneLayout {
    /// Layout cycle, in order.
    pub const CYCLE: [Self; 3] = [Self::Hero, Self::Duo, Self::Cluster];

    /// Number of images this layout wants.
    pub fn capacity(self) -> usize {
        match self {
            Self::Hero => 1,
            Self::Duo => 2,
            Self::Cluster => 3,
        }
    }

    /// Layout to use when only `taken` images were available.
    pub fn fit(self, taken: usize) -> Self {
        match (self, taken) {
            (_, 1) => Self::Hero,
            (Self::Cluster, 2) => Self::Duo,
            (layout, _) => layout,
        }
    }

    /// Lowercase name of this layout.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Duo => "duo",
            Self::Cluster => "cluster",
        }
    }
}

/// A group of consecutive images sharing one layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene<'a> {
    pub layout: SceneLayout,
    pub images: Vec<&'a MediaItem>,
    /// Index of the first image within the image-only list.
    pub start_index: usize,
}

/// Partition a collection's images into scenes. Videos are skipped.
pub fn partition_into_scenes(collection: &Collection) -> Vec<Scene<'_>> {
    let images: Vec<_> = collection.images().collect();
    partition_images(&images)
}

/// Partition an ordered image list into scenes.
pub fn partition_images<'a>(images: &[&'a MediaItem]) -> Vec<Scene<'a>> {
    let mut scenes = Vec::new();
    let mut start = 0;

    for layout in SceneLayout::CYCLE.into_iter().cycle() {
        if start >= images.len() {
            break;
        }

        let end = (start + layout.capacity()).min(images.len());
        let taken = &images[start..end];

        scenes.push(Scene {
            layout: layout.fit(taken.len()),
            images: taken.to_vec(),
            start_index: start,
        });
        start = end;
    }

    scenes
}

//! End-to-end tests for the portfolio model surface.
//!
//! Each test lays out a content root in a temporary directory and reads it
//! through [`Portfolio`].

use std::{fs, path::Path};

use folio_core::MediaKind;
use folio_generator::{ContentRepository, Portfolio, SceneLayout};

struct Site {
    dir: tempfile::TempDir,
}

impl Site {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn collection(&self, slug: &str, frontmatter: &str) -> &Self {
        let dir = self.root().join(slug);
        fs::create_dir_all(&dir).expect("mkdir");
        fs::write(dir.join("meta.md"), format!("---\n{frontmatter}\n---\n")).expect("write meta");
        self
    }

    fn media(&self, slug: &str, files: &[&str]) -> &Self {
        let dir = self.root().join(slug).join("media");
        fs::create_dir_all(&dir).expect("mkdir");
        for file in files {
            fs::write(dir.join(file), b"\xff\xd8").expect("write media");
        }
        self
    }

    fn reflection(&self, slug: &str, base: &str, text: &str) -> &Self {
        let path = self.root().join(slug).join("media").join(format!("{base}.md"));
        fs::write(path, text).expect("write reflection");
        self
    }

    fn portfolio(&self) -> Portfolio {
        Portfolio::new(ContentRepository::new(self.root()))
    }
}

fn meta(title: &str, date: &str, order: Option<i64>) -> String {
    let mut fm = format!("title: {title}\ndate: {date}\ncover: 01.jpg\ndescription: About {title}");
    if let Some(order) = order {
        fm.push_str(&format!("\norder: {order}"));
    }
    fm
}

#[test]
fn test_lists_every_collection_once() {
    let site = Site::new();
    for slug in ["kyoto", "coast", "desert"] {
        site.collection(slug, &meta(slug, "2021-05-01", None));
    }
    fs::write(site.root().join("notes.txt"), "not a collection").expect("write");

    let repo = ContentRepository::new(site.root());
    let mut slugs = repo.list_collection_slugs().expect("list");
    slugs.sort();
    assert_eq!(slugs, vec!["coast", "desert", "kyoto"]);

    let collections = site.portfolio().list_collections().expect("list");
    assert_eq!(collections.len(), 3);
}

#[test]
fn test_listing_sorted_by_order() {
    let site = Site::new();
    site.collection("kyoto", &meta("Kyoto", "2021-05-01", Some(3)))
        .collection("coast", &meta("Coast", "2020-01-01", Some(1)))
        .collection("desert", &meta("Desert", "2019-09-09", None));

    let slugs: Vec<_> = site
        .portfolio()
        .list_collections()
        .expect("list")
        .into_iter()
        .map(|m| m.slug)
        .collect();
    assert_eq!(slugs, vec!["desert", "coast", "kyoto"]);
}

#[test]
fn test_collection_media_order_and_kinds() {
    let site = Site::new();
    site.collection("kyoto", &meta("Kyoto", "2021-05-01", None))
        .media("kyoto", &["03.jpg", "01.jpg", "02.MP4", "04.webm", "05.png", "cover.txt"])
        .reflection("kyoto", "03", "---\nmood: still\n---\n\nA quiet moment.\n");

    let collection = site.portfolio().get_collection("kyoto").expect("get");

    let names: Vec<_> = collection.media.iter().map(|m| m.filename.as_str()).collect();
    assert_eq!(names, vec!["01.jpg", "02.MP4", "03.jpg", "04.webm", "05.png"]);

    let kinds: Vec<_> = collection.media.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MediaKind::Image,
            MediaKind::Video,
            MediaKind::Image,
            MediaKind::Video,
            MediaKind::Image,
        ]
    );

    let reflected = collection
        .media
        .iter()
        .find(|m| m.filename == "03.jpg")
        .expect("03.jpg");
    assert_eq!(reflected.reflection.as_deref(), Some("A quiet moment."));
    assert!(collection.media[0].reflection.is_none());
}

#[test]
fn test_metadata_only_collection_has_no_media() {
    let site = Site::new();
    site.collection("drafts", &meta("Drafts", "2022-02-02", None));

    let portfolio = site.portfolio();
    let collection = portfolio.get_collection("drafts").expect("get");
    assert!(collection.media.is_empty());
    assert!(portfolio.partition_into_scenes(&collection).is_empty());
}

#[test]
fn test_scenes_for_seven_images() {
    let site = Site::new();
    site.collection("kyoto", &meta("Kyoto", "2021-05-01", None)).media(
        "kyoto",
        &["01.jpg", "02.jpg", "03.jpg", "04.jpg", "05.jpg", "06.jpg", "07.jpg", "08.mp4"],
    );

    let portfolio = site.portfolio();
    let collection = portfolio.get_collection("kyoto").expect("get");
    let scenes = portfolio.partition_into_scenes(&collection);

    let counts: Vec<_> = scenes.iter().map(|s| s.images.len()).collect();
    let starts: Vec<_> = scenes.iter().map(|s| s.start_index).collect();
    let layouts: Vec<_> = scenes.iter().map(|s| s.layout).collect();

    assert_eq!(counts, vec![1, 2, 3, 1]);
    assert_eq!(starts, vec![0, 1, 3, 6]);
    assert_eq!(
        layouts,
        vec![
            SceneLayout::Hero,
            SceneLayout::Duo,
            SceneLayout::Cluster,
            SceneLayout::Hero,
        ]
    );
}

#[test]
fn test_journey_feed_orders_by_collection_date() {
    let site = Site::new();
    site.collection("kyoto", &meta("Kyoto", "2021-05-01", Some(0)))
        .media("kyoto", &["02.jpg", "01.jpg"])
        .collection("coast", &meta("Coast", "2020-01-01", Some(1)))
        .media("coast", &["b.jpg", "a.jpg", "c.mp4"]);

    let feed = site.portfolio().get_journey_feed().expect("journey");
    let entries: Vec<_> = feed
        .iter()
        .map(|i| (i.collection_slug.as_str(), i.src.as_str(), i.index))
        .collect();

    assert_eq!(
        entries,
        vec![
            ("coast", "/collections/coast/media/a.jpg", 0),
            ("coast", "/collections/coast/media/b.jpg", 1),
            ("kyoto", "/collections/kyoto/media/01.jpg", 0),
            ("kyoto", "/collections/kyoto/media/02.jpg", 1),
        ]
    );
    assert_eq!(feed[0].alt, "Coast - 1");
    assert_eq!(feed[0].date, "2020-01-01");
}

#[test]
fn test_unknown_collection_is_not_found() {
    let site = Site::new();
    site.collection("kyoto", &meta("Kyoto", "2021-05-01", None));

    let err = site.portfolio().get_collection("nonexistent").expect_err("fail");
    assert!(err.is_not_found());
}

#[test]
fn test_missing_title_is_validation_error() {
    let site = Site::new();
    site.collection(
        "untitled",
        "date: 2021-05-01\ncover: 01.jpg\ndescription: No title here",
    );

    let portfolio = site.portfolio();
    assert!(portfolio.get_collection("untitled").unwrap_err().is_validation());
    assert!(portfolio.list_collections().unwrap_err().is_validation());
}

#[test]
fn test_bad_date_fails_journey() {
    let site = Site::new();
    site.collection("kyoto", &meta("Kyoto", "sometime in May", None))
        .media("kyoto", &["01.jpg"]);

    let err = site.portfolio().get_journey_feed().expect_err("fail");
    assert!(err.is_validation());
}

#[test]
fn test_toml_frontmatter_collection() {
    let site = Site::new();
    let dir = site.root().join("coast");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(
        dir.join("meta.md"),
        "+++\ntitle = \"Coast\"\ndate = 2020-01-01\ncover = \"01.jpg\"\ndescription = \"Salt\"\norder = 5\n+++\n",
    )
    .expect("write");

    let meta = site.portfolio().get_collection("coast").expect("get").meta;
    assert_eq!(meta.date, "2020-01-01");
    assert_eq!(meta.order, 5);
}

#[test]
fn test_meta_with_byte_order_mark() {
    let site = Site::new();
    let dir = site.root().join("kyoto");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(
        dir.join("meta.md"),
        format!("\u{feff}---\n{}\n---\n", meta("Kyoto", "2021-05-01", None)),
    )
    .expect("write");

    let collection = site.portfolio().get_collection("kyoto").expect("get");
    assert_eq!(collection.meta.title, "Kyoto");
}

#[test]
fn test_reflection_starting_with_rule_is_kept_whole() {
    let site = Site::new();
    let text = "----\nA quiet moment.\n---\nSecond line.";
    site.collection("kyoto", &meta("Kyoto", "2021-05-01", None))
        .media("kyoto", &["01.jpg"])
        .reflection("kyoto", "01", text);

    let collection = site.portfolio().get_collection("kyoto").expect("get");
    assert_eq!(collection.media[0].reflection.as_deref(), Some(text));
}

//! End-to-end pipeline tests — drive the public library API over real
//! directories, the way the binary does: install assets, convert feeds,
//! inspect the produced pages.

use feedpage::config::RenderConfig;
use feedpage::{assets, convert};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn feed_with_entries(count: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <feed xmlns=\"http://www.w3.org/2005/Atom\">\n<title>Archive</title>\n",
    );
    for i in 0..count {
        xml.push_str(&format!(
            "<entry>\n\
             <title>Post {i}</title>\n\
             <published>2023-0{}-10T08:30:00Z</published>\n\
             <author><name>Writer {i}</name></author>\n\
             <link href=\"https://example.org/{i}\"/>\n\
             <content>&lt;p&gt;Body {i}&lt;/p&gt;</content>\n\
             </entry>\n",
            (i % 9) + 1,
        ));
    }
    xml.push_str("</feed>\n");
    xml
}

fn write_feed(dir: &TempDir, xml: &str) -> PathBuf {
    let input = dir.path().join("archive.xml");
    fs::write(&input, xml).unwrap();
    input
}

fn html_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".html"))
        .collect();
    names.sort();
    names
}

#[test]
fn default_run_produces_one_page_per_entry() {
    let dir = TempDir::new().unwrap();
    let input = write_feed(&dir, &feed_with_entries(3));
    let config = RenderConfig {
        output_dir: dir.path().to_path_buf(),
        ..RenderConfig::default()
    };

    let summary = convert::convert(&input, &config).unwrap();
    assert_eq!(summary.pages, 3);
    assert_eq!(summary.entries_written, 3);
    assert_eq!(
        html_files(dir.path()),
        vec!["archive_0000.html", "archive_0001.html", "archive_0002.html"]
    );

    for (i, name) in html_files(dir.path()).iter().enumerate() {
        let page = fs::read_to_string(dir.path().join(name)).unwrap();
        assert!(page.starts_with("<!DOCTYPE html><html>"));
        assert!(page.ends_with("</body></html>"));
        assert!(page.contains(&format!("<title>Post {i}</title>")));
        assert!(page.contains(&format!("<p>Body {i}</p>")));
    }
}

#[test]
fn file_count_follows_ceil_of_entries_over_batch() {
    for (entries, batch, expected) in [(5, 2, 3), (6, 2, 3), (6, 3, 2), (1, 4, 1), (4, 0, 1)] {
        let dir = TempDir::new().unwrap();
        let input = write_feed(&dir, &feed_with_entries(entries));
        let config = RenderConfig {
            per_file: batch,
            output_dir: dir.path().to_path_buf(),
            ..RenderConfig::default()
        };
        let summary = convert::convert(&input, &config).unwrap();
        assert_eq!(
            summary.pages, expected,
            "{entries} entries / batch {batch}"
        );
        assert_eq!(html_files(dir.path()).len(), expected);
    }
}

#[test]
fn batched_pages_are_collapsible_and_feed_titled() {
    let dir = TempDir::new().unwrap();
    let input = write_feed(&dir, &feed_with_entries(4));
    let config = RenderConfig {
        per_file: 0,
        write_author: true,
        link_text: Some("source".to_string()),
        output_dir: dir.path().to_path_buf(),
        ..RenderConfig::default()
    };

    convert::convert(&input, &config).unwrap();
    let page = fs::read_to_string(dir.path().join("archive.html")).unwrap();
    assert!(page.contains("<title>Archive</title>"));
    assert!(page.contains(r#"<ul class="entries">"#));
    assert_eq!(page.matches(r#"<li class="entry">"#).count(), 4);
    assert_eq!(page.matches(r#"<div class="entry-body">"#).count(), 4);
    assert!(page.contains("Writer 0 @ 2023-01-10 08:30:00 "));
    assert!(page.contains(r#"<a href="https://example.org/2">source</a>"#));
    assert!(page.ends_with("</ul></body></html>"));
}

#[test]
fn time_filter_and_batching_compose() {
    let dir = TempDir::new().unwrap();
    // months cycle 1..=9, so 2023-02 matches exactly one of the first 9
    let input = write_feed(&dir, &feed_with_entries(9));
    let config = RenderConfig {
        per_file: 4,
        time_filter: Some("2023-02".to_string()),
        output_dir: dir.path().to_path_buf(),
        ..RenderConfig::default()
    };

    let summary = convert::convert(&input, &config).unwrap();
    assert_eq!(summary.entries_written, 1);
    assert_eq!(summary.entries_filtered, 8);
    assert_eq!(html_files(dir.path()), vec!["archive_2023-02_0000.html"]);

    let page = fs::read_to_string(dir.path().join("archive_2023-02_0000.html")).unwrap();
    assert!(page.contains("<title>Archive - 2023-02</title>"));
    assert!(page.contains("Post 1"));
}

#[test]
fn malformed_feed_loses_only_the_unfinished_entry() {
    let dir = TempDir::new().unwrap();
    let mut xml = feed_with_entries(2);
    // replace the document close with an entry that dies mid-stream
    xml.truncate(xml.len() - "</feed>\n".len());
    xml.push_str("<entry><title>never finished</wrong>");
    let input = write_feed(&dir, &xml);
    let config = RenderConfig {
        output_dir: dir.path().to_path_buf(),
        ..RenderConfig::default()
    };

    let err = convert::convert(&input, &config).unwrap_err();
    assert!(matches!(err, convert::ConvertError::Xml { .. }));

    // both complete entries survived as intact pages
    let names = html_files(dir.path());
    assert_eq!(names, vec!["archive_0000.html", "archive_0001.html"]);
    for name in names {
        let page = fs::read_to_string(dir.path().join(name)).unwrap();
        assert!(page.ends_with("</body></html>"));
    }
}

#[test]
fn inputs_are_converted_independently() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.xml");
    let bad = dir.path().join("bad.xml");
    fs::write(&good, feed_with_entries(1)).unwrap();
    fs::write(&bad, "<feed><entry></wrong>").unwrap();
    let config = RenderConfig {
        output_dir: dir.path().to_path_buf(),
        ..RenderConfig::default()
    };

    // a broken file fails alone; the next conversion starts clean
    assert!(convert::convert(&bad, &config).is_err());
    let summary = convert::convert(&good, &config).unwrap();
    assert_eq!(summary.pages, 1);
    assert!(dir.path().join("good_0000.html").is_file());
}

#[test]
fn assets_land_next_to_the_pages() {
    let dir = TempDir::new().unwrap();
    let input = write_feed(&dir, &feed_with_entries(1));
    assets::install(dir.path(), None).unwrap();
    let config = RenderConfig {
        output_dir: dir.path().to_path_buf(),
        ..RenderConfig::default()
    };
    convert::convert(&input, &config).unwrap();

    // the page references the stylesheet by the name install used
    assert!(dir.path().join("style.css").is_file());
    let page = fs::read_to_string(dir.path().join("archive_0000.html")).unwrap();
    assert!(page.contains(r#"href="style.css""#));
}

#[test]
fn custom_stylesheet_is_referenced_by_basename() {
    let dir = TempDir::new().unwrap();
    let theme = dir.path().join("dark.css");
    fs::write(&theme, "body { background: #000 }").unwrap();
    let out = TempDir::new().unwrap();
    let input = write_feed(&out, &feed_with_entries(1));

    assets::install(out.path(), Some(&theme)).unwrap();
    let config = RenderConfig {
        stylesheet: assets::stylesheet_name(Some(&theme)),
        output_dir: out.path().to_path_buf(),
        ..RenderConfig::default()
    };
    convert::convert(&input, &config).unwrap();

    assert!(out.path().join("dark.css").is_file());
    let page = fs::read_to_string(out.path().join("archive_0000.html")).unwrap();
    assert!(page.contains(r#"href="dark.css""#));
}

//! Edge case tests for tgroom
//!
//! These tests cover markup variations and boundary conditions seen in real
//! exports that the regular unit and integration tests do not.

mod common;

use std::fs;

use chrono::{TimeZone, Utc};
use common::{Entry, fragment, write_export};
use tgroom::config::ParseConfig;
use tgroom::{Content, MessageType, RoomParser};

fn page(inner: &str) -> String {
    format!(
        r#"<html><body><div class="page_header"><div class="text bold">Edge</div></div><div class="history">{inner}</div></body></html>"#
    )
}

fn user(id: &str, from: Option<&str>, body: &str) -> String {
    let joined = if from.is_none() { " joined" } else { "" };
    let from = from
        .map(|name| format!(r#"<div class="from_name">{name}</div>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="message default clearfix{joined}" id="{id}"><div class="body"><div class="pull_right date details" title="05.06.2021 08:30:00">08:30</div>{from}{body}</div></div>"#
    )
}

// =========================================================================
// Unicode and special character tests
// =========================================================================

#[test]
fn test_unicode_senders_and_text() {
    let html = page(&format!(
        "{}{}{}",
        user("message1", Some("Иван"), r#"<div class="text">Привет мир!</div>"#),
        user("message2", Some("田中太郎"), r#"<div class="text">こんにちは世界！</div>"#),
        user("message3", Some("محمد"), r#"<div class="text">مرحبا 🎉🔥</div>"#),
    ));
    let doc = RoomParser::new().parse_str(&html).unwrap();

    let pairs: Vec<_> = doc
        .messages
        .iter()
        .map(|m| (m.sender_name.as_str(), m.text().unwrap()))
        .collect();
    assert_eq!(
        pairs,
        [("Иван", "Привет мир!"), ("田中太郎", "こんにちは世界！"), ("محمد", "مرحبا 🎉🔥")]
    );
}

#[test]
fn test_html_entities_decoded() {
    let html = page(&user(
        "message1",
        Some("Tom &amp; Jerry"),
        r#"<div class="text">1 &lt; 2 &amp;&amp; &quot;quoted&quot;</div>"#,
    ));
    let doc = RoomParser::new().parse_str(&html).unwrap();

    assert_eq!(doc.messages[0].sender_name, "Tom & Jerry");
    assert_eq!(doc.messages[0].text(), Some("1 < 2 && \"quoted\""));
}

#[test]
fn test_text_with_links_and_line_breaks() {
    let html = page(&user(
        "message1",
        Some("Alice"),
        r#"<div class="text">see <a href="https://example.com">example.com</a><br>thanks</div>"#,
    ));
    let doc = RoomParser::new().parse_str(&html).unwrap();

    let text = doc.messages[0].text().unwrap();
    assert!(text.contains("see example.com"));
    assert!(text.ends_with("thanks"));
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = page(&user("message1", Some("Alice"), r#"<div class="text">ok </div>"#)).into_bytes();
    let at = bytes.windows(3).position(|w| w == b"ok ").unwrap() + 2;
    bytes.insert(at, 0xFF);
    fs::write(dir.path().join("messages.html"), bytes).unwrap();

    let room = RoomParser::new().parse(dir.path()).unwrap();
    assert_eq!(room.len(), 1);
    assert!(room.messages[0].text().unwrap().starts_with("ok"));
}

// =========================================================================
// Missing and unexpected elements
// =========================================================================

#[test]
fn test_missing_from_name_on_opener() {
    let html = page(&user("message1", None, r#"<div class="text">x</div>"#).replace(" joined", ""));
    let doc = RoomParser::new().parse_str(&html).unwrap();

    assert_eq!(doc.messages[0].sender_name, "");
}

#[test]
fn test_empty_body_is_unknown() {
    let html = page(&user("message1", Some("Alice"), ""));
    let doc = RoomParser::new().parse_str(&html).unwrap();

    let msg = &doc.messages[0];
    assert_eq!(msg.message_type, MessageType::Unknown);
    assert_eq!(msg.content, Content::None);
    assert!(msg.media_path.is_empty());
}

#[test]
fn test_unrecognised_media_has_no_path() {
    let html = page(&user(
        "message1",
        Some("Alice"),
        r#"<div class="media_wrap clearfix"><a class="media clearfix pull_left block_link media_location" href="https://maps.example/1"><div class="body">Location</div></a></div>"#,
    ));
    let doc = RoomParser::new().parse_str(&html).unwrap();

    let msg = &doc.messages[0];
    assert_eq!(msg.message_type, MessageType::Unknown);
    assert!(!msg.is_media());
    assert!(msg.media_path.is_empty());
    assert!(msg.media_thumbnail_path.is_empty());
}

#[test]
fn test_video_without_thumbnail_element() {
    let html = page(&user(
        "message1",
        Some("Alice"),
        r#"<div class="media_wrap clearfix"><a class="video_file_wrap clearfix pull_left" href="video_files/v.mp4"></a></div>"#,
    ));
    let doc = RoomParser::new().parse_str(&html).unwrap();

    let msg = &doc.messages[0];
    assert_eq!(msg.message_type, MessageType::Video);
    assert_eq!(msg.media_path, "video_files/v.mp4");
    assert_eq!(msg.media_thumbnail_path, "");
}

#[test]
fn test_captioned_photo_is_text() {
    let html = page(&user(
        "message1",
        Some("Alice"),
        r#"<div class="media_wrap clearfix"><a class="photo_wrap clearfix pull_left" href="photos/p.jpg"><img class="photo" src="photos/p_thumb.jpg"></a></div><div class="text">caption</div>"#,
    ));
    let doc = RoomParser::new().parse_str(&html).unwrap();

    let msg = &doc.messages[0];
    assert_eq!(msg.message_type, MessageType::Text);
    assert_eq!(msg.text(), Some("caption"));
    assert!(msg.media_path.is_empty());
}

#[test]
fn test_all_media_kinds() {
    let cases = [
        ("photo_wrap", "photo", MessageType::Photo, true),
        ("sticker_wrap", "sticker", MessageType::Sticker, true),
        ("video_file_wrap", "video_file", MessageType::Video, true),
        ("animated_wrap", "animated", MessageType::AnimatedGif, true),
        ("media_voice_message", "", MessageType::Voice, false),
        ("media_audio_file", "", MessageType::Audio, false),
    ];

    for (marker, thumb, expected, has_thumb) in cases {
        let img = if thumb.is_empty() {
            String::new()
        } else {
            format!(r#"<img class="{thumb}" src="t.jpg">"#)
        };
        let body = format!(r#"<div class="media_wrap"><a class="{marker}" href="f.bin">{img}</a></div>"#);
        let doc = RoomParser::new()
            .parse_str(&page(&user("message1", Some("A"), &body)))
            .unwrap();

        let msg = &doc.messages[0];
        assert_eq!(msg.message_type, expected, "marker {marker}");
        assert_eq!(msg.media_path, "f.bin");
        assert_eq!(msg.media_thumbnail_path.is_empty(), !has_thumb, "marker {marker}");
        assert_eq!(expected.has_thumbnail(), has_thumb);
    }
}

// =========================================================================
// Replies
// =========================================================================

#[test]
fn test_reply_into_other_fragment() {
    let html = page(&user(
        "message9",
        Some("Bob"),
        r#"<div class="reply_to details">In reply to <a href="messages2.html#go_to_message42">this message</a></div><div class="text">late</div>"#,
    ));
    let doc = RoomParser::new().parse_str(&html).unwrap();
    assert_eq!(doc.messages[0].reply_to_id, "message42");
}

#[test]
fn test_reply_without_anchor() {
    let html = page(&user(
        "message9",
        Some("Bob"),
        r#"<div class="reply_to details">In reply to a deleted message</div><div class="text">hm</div>"#,
    ));
    let doc = RoomParser::new().parse_str(&html).unwrap();

    assert_eq!(doc.messages[0].reply_to_id, "");
    assert!(!doc.messages[0].is_reply());
}

// =========================================================================
// Dates and zones
// =========================================================================

#[test]
fn test_leap_day_and_year_end() {
    let dir = write_export(&[fragment(
        "Dates",
        &[
            Entry::text("message1", "29.02.2020 23:59:59", "A", "leap"),
            Entry::text("message2", "31.12.2020 23:30:00", "A", "eve"),
        ],
    )]);
    let room = RoomParser::with_config(ParseConfig::new().with_time_zone("Asia/Jakarta"))
        .parse(dir.path())
        .unwrap();

    assert_eq!(room.messages[0].sent_at, Utc.with_ymd_and_hms(2020, 2, 29, 16, 59, 59).unwrap());
    assert_eq!(room.messages[1].sent_at, Utc.with_ymd_and_hms(2020, 12, 31, 16, 30, 0).unwrap());
}

#[test]
fn test_dst_gap_rejected() {
    // 02:30 does not exist on 29 March 2020 in Berlin
    let dir = write_export(&[fragment(
        "Dates",
        &[Entry::text("message1", "29.03.2020 02:30:00", "A", "gap")],
    )]);
    let err = RoomParser::with_config(ParseConfig::new().with_time_zone("Europe/Berlin"))
        .parse(dir.path())
        .unwrap_err();

    assert!(err.is_malformed_timestamp());
}

#[test]
fn test_dst_overlap_takes_earlier_instant() {
    // 02:30 happens twice on 25 October 2020 in Berlin
    let dir = write_export(&[fragment(
        "Dates",
        &[Entry::text("message1", "25.10.2020 02:30:00", "A", "twice")],
    )]);
    let room = RoomParser::with_config(ParseConfig::new().with_time_zone("Europe/Berlin"))
        .parse(dir.path())
        .unwrap();

    assert_eq!(room.messages[0].sent_at, Utc.with_ymd_and_hms(2020, 10, 25, 0, 30, 0).unwrap());
}

#[test]
fn test_impossible_calendar_date() {
    let html = page(&user("message1", Some("A"), "").replace("05.06.2021", "31.02.2021"));
    let err = RoomParser::new().parse_str(&html).unwrap_err();
    assert!(err.is_malformed_timestamp());
}

// =========================================================================
// Directory layout
// =========================================================================

#[test]
fn test_lookalike_files_ignored() {
    let dir = write_export(&[fragment("Room", &[Entry::text("message1", "01.01.2020 00:00:00", "A", "x")])]);
    for name in ["messages.html.bak", "messages_old.html", "Messages2.html", "messages2.htm", "my_messages.html"] {
        fs::write(dir.path().join(name), "garbage").unwrap();
    }
    // a directory named like a fragment is not a fragment
    fs::create_dir(dir.path().join("messages3.html")).unwrap();

    let room = RoomParser::new().parse(dir.path()).unwrap();
    assert_eq!(room.len(), 1);
}

#[test]
fn test_service_only_export() {
    let dir = write_export(&[fragment("Quiet", &[Entry::service("1 January 2020"), Entry::service("Alice created group")])]);
    let room = RoomParser::new().parse(dir.path()).unwrap();

    assert!(room.is_empty());
    assert_eq!(room.room_name, "Quiet");
}

#[test]
fn test_blank_header_leaves_name_empty() {
    let dir = write_export(&[fragment("   ", &[Entry::text("message1", "01.01.2020 00:00:00", "A", "x")])]);
    let room = RoomParser::new().parse(dir.path()).unwrap();

    assert_eq!(room.room_name, "");
}

#[test]
fn test_more_workers_than_files() {
    let dir = write_export(&[fragment("Room", &[Entry::text("message1", "01.01.2020 00:00:00", "A", "x")])]);
    let mut room = tgroom::MessageRoom::new();

    let summary = RoomParser::with_config(ParseConfig::new().with_workers(32))
        .parse_into(dir.path(), &mut room)
        .unwrap();
    assert_eq!(summary.workers, 1);
    assert_eq!(room.len(), 1);
}

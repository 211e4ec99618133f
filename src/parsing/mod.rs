//! Decoding of Telegram Desktop HTML export documents.
//!
//! The export layout is fixed: a `.page_header` with the room title, then a
//! flat list of `.message` elements. User messages carry the `default` class;
//! service entries (date separators, "X joined the group") do not and are
//! skipped. A `joined` message continues the previous sender's group and omits
//! the `.from_name` element.
//!
//! - [`content`] classifies a message body (text or one of six media kinds)
//! - [`message`] turns one `.message` element into a [`Message`](crate::Message)
//! - [`document`] walks a whole document in order, threading the sender

pub mod content;
pub mod document;
pub mod message;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::time::TimeResolver;

pub use content::{Classified, classify};
pub use document::{DecodedDocument, decode, room_name, scan};
pub use message::{extract, reply_id_from_href};

/// Class that marks a user message.
pub const DEFAULT_CLASS: &str = "default";

/// Class that marks a continuation of the previous sender's group.
pub const JOINED_CLASS: &str = "joined";

/// Shared state every extraction step needs.
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub resolver: &'a TimeResolver,
    pub time_zone: &'a str,
}

impl<'a> ExtractContext<'a> {
    pub fn new(resolver: &'a TimeResolver, time_zone: &'a str) -> Self {
        Self {
            resolver,
            time_zone,
        }
    }
}

macro_rules! selector {
    ($css:literal) => {
        LazyLock::new(|| Selector::parse($css).expect("static selector is valid CSS"))
    };
}

// Selector constants are plain class lookups; each is parsed once per process.
pub(crate) static MESSAGE: LazyLock<Selector> = selector!(".message");
pub(crate) static BODY: LazyLock<Selector> = selector!(".body");
pub(crate) static FROM_NAME: LazyLock<Selector> = selector!(".from_name");
pub(crate) static DATE: LazyLock<Selector> = selector!(".date");
pub(crate) static REPLY_TO: LazyLock<Selector> = selector!(".reply_to");
pub(crate) static ANCHOR: LazyLock<Selector> = selector!("a");
pub(crate) static TEXT: LazyLock<Selector> = selector!(".text");
pub(crate) static MEDIA_WRAP: LazyLock<Selector> = selector!(".media_wrap");
pub(crate) static PAGE_HEADER_TEXT: LazyLock<Selector> = selector!(".page_header .text");
pub(crate) static VIDEO_THUMB: LazyLock<Selector> = selector!(".video_file");
pub(crate) static PHOTO_THUMB: LazyLock<Selector> = selector!(".photo");
pub(crate) static STICKER_THUMB: LazyLock<Selector> = selector!(".sticker");
pub(crate) static ANIMATED_THUMB: LazyLock<Selector> = selector!(".animated");

/// Parses an HTML document. Never fails; malformed markup is recovered the
/// way browsers do.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// First descendant of `el` matching `selector`.
pub(crate) fn find<'a>(el: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    el.select(selector).next()
}

/// Concatenated text of `el`, trimmed of spaces, tabs and line breaks.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    let text: String = el.text().collect();
    text.trim_matches([' ', '\t', '\n', '\r']).to_string()
}

pub(crate) fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Attribute value, or empty when the element or attribute is absent.
pub(crate) fn attr(el: Option<ElementRef<'_>>, name: &str) -> String {
    el.and_then(|e| e.value().attr(name))
        .unwrap_or_default()
        .to_string()
}

/// First child that is an element, skipping text and comments.
pub(crate) fn first_element_child(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.children().find_map(ElementRef::wrap)
}

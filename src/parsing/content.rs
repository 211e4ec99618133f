//! Message body classification.
//!
//! A body holds either a `.text` node or a `.media_wrap` whose first child
//! element names the media kind by class:
//!
//! | Marker class | Type | Thumbnail element |
//! |--------------|------|-------------------|
//! | `video_file_wrap` | Video | `.video_file` |
//! | `photo_wrap` | Photo | `.photo` |
//! | `sticker_wrap` | Sticker | `.sticker` |
//! | `animated_wrap` | AnimatedGif | `.animated` |
//! | `media_voice_message` | Voice | none |
//! | `media_audio_file` | Audio | none |

use scraper::{ElementRef, Selector};

use super::{
    ANIMATED_THUMB, MEDIA_WRAP, PHOTO_THUMB, STICKER_THUMB, TEXT, VIDEO_THUMB, attr,
    first_element_child, find, has_class, text_of,
};
use crate::message::{Content, MessageType};

/// Classification of one message body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classified {
    pub message_type: MessageType,
    pub content: Content,
    pub media_path: String,
    pub media_thumbnail_path: String,
}

/// Marker class and the media type it denotes, in match order.
const MEDIA_MARKERS: &[(&str, MessageType)] = &[
    ("video_file_wrap", MessageType::Video),
    ("photo_wrap", MessageType::Photo),
    ("sticker_wrap", MessageType::Sticker),
    ("animated_wrap", MessageType::AnimatedGif),
    ("media_voice_message", MessageType::Voice),
    ("media_audio_file", MessageType::Audio),
];

/// Classifies a message body.
///
/// First match wins: a `.text` node makes a text message even when media is
/// also present (captioned media). Absent elements decode to empty values;
/// this function never fails.
pub fn classify(body: ElementRef<'_>) -> Classified {
    if let Some(text) = find(body, &TEXT) {
        return Classified {
            message_type: MessageType::Text,
            content: Content::Text(text_of(text)),
            ..Classified::default()
        };
    }

    let Some(wrap) = find(body, &MEDIA_WRAP) else {
        return Classified::default();
    };

    // The marker normally sits on the first child; some exports put it on
    // the wrapper itself.
    let child = first_element_child(wrap);
    let marked = child
        .and_then(|c| media_marker(c).map(|marker| (c, marker)))
        .or_else(|| media_marker(wrap).map(|marker| (wrap, marker)));

    // Unrecognised media (location, poll, contact) carries no path.
    let Some((media, (message_type, thumb))) = marked else {
        return Classified::default();
    };

    Classified {
        message_type,
        content: Content::None,
        media_path: attr(Some(media), "href"),
        media_thumbnail_path: thumb
            .map(|selector| attr(find(media, selector), "src"))
            .unwrap_or_default(),
    }
}

fn media_marker(el: ElementRef<'_>) -> Option<(MessageType, Option<&'static Selector>)> {
    MEDIA_MARKERS
        .iter()
        .find(|(class, _)| has_class(el, class))
        .map(|&(_, ty)| (ty, thumbnail_selector(ty)))
}

fn thumbnail_selector(ty: MessageType) -> Option<&'static Selector> {
    match ty {
        MessageType::Video => Some(&*VIDEO_THUMB),
        MessageType::Photo => Some(&*PHOTO_THUMB),
        MessageType::Sticker => Some(&*STICKER_THUMB),
        MessageType::AnimatedGif => Some(&*ANIMATED_THUMB),
        _ => None,
    }
}

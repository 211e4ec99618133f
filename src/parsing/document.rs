//! In-order walk over one export document.

use scraper::Html;

use super::{DEFAULT_CLASS, ExtractContext, MESSAGE, PAGE_HEADER_TEXT, extract, has_class, parse_document, text_of};
use crate::error::Result;
use crate::message::Message;

/// Everything one document contributes to a room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedDocument {
    /// Title from the page header, if the document has a non-empty one.
    pub room_name: Option<String>,
    /// User messages in document order.
    pub messages: Vec<Message>,
}

/// Decodes all user messages of `doc` in document order.
///
/// The sender carry starts empty for every document and survives service
/// entries, which are skipped. A `joined` message at the top of a document
/// therefore gets an empty sender.
///
/// # Errors
///
/// Stops at the first message whose timestamp cannot be resolved. Nothing is
/// returned for the document in that case.
pub fn scan(doc: &Html, ctx: &ExtractContext<'_>) -> Result<Vec<Message>> {
    let (messages, _) = doc
        .select(&MESSAGE)
        .filter(|node| has_class(*node, DEFAULT_CLASS))
        .try_fold(
            (Vec::new(), String::new()),
            |(mut messages, previous), node| {
                let (message, carry) = extract(node, previous, ctx)?;
                messages.push(message);
                Ok::<_, crate::TgroomError>((messages, carry))
            },
        )?;

    Ok(messages)
}

/// Room title from `.page_header .text`. Empty titles count as absent.
pub fn room_name(doc: &Html) -> Option<String> {
    doc.select(&PAGE_HEADER_TEXT)
        .next()
        .map(text_of)
        .filter(|name| !name.is_empty())
}

/// Parses `html` and decodes it in one step.
///
/// # Errors
///
/// See [`scan`].
pub fn decode(html: &str, ctx: &ExtractContext<'_>) -> Result<DecodedDocument> {
    let doc = parse_document(html);
    let messages = scan(&doc, ctx)?;
    Ok(DecodedDocument {
        room_name: room_name(&doc),
        messages,
    })
}

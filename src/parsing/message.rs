//! Decoding of a single `.message` element.

use scraper::ElementRef;

use super::{
    ANCHOR, BODY, DATE, ExtractContext, FROM_NAME, JOINED_CLASS, REPLY_TO, attr, classify, find,
    has_class, text_of,
};
use crate::error::Result;
use crate::message::Message;

/// Prefix of internal reply links: `#go_to_message41` points at `id="message41"`.
pub const REPLY_LINK_PREFIX: &str = "#go_to_";

/// Decodes one user message element.
///
/// `previous_sender` is the sender carried from the preceding message in the
/// same document. The returned string is the sender to carry forward: the same
/// value for a continuation (`joined`) element, the element's own `.from_name`
/// otherwise.
///
/// Callers are expected to pass only elements with the `default` class.
///
/// # Errors
///
/// Fails if the date title cannot be resolved (see
/// [`TimeResolver::resolve`](crate::time::TimeResolver::resolve)).
pub fn extract(
    node: ElementRef<'_>,
    previous_sender: String,
    ctx: &ExtractContext<'_>,
) -> Result<(Message, String)> {
    let id = node.value().attr("id").unwrap_or_default().to_string();
    let body = find(node, &BODY);

    let sender_name = if has_class(node, JOINED_CLASS) {
        previous_sender
    } else {
        body.and_then(|b| find(b, &FROM_NAME))
            .map(text_of)
            .unwrap_or_default()
    };

    let reply_to_id = body
        .and_then(|b| find(b, &REPLY_TO))
        .and_then(|r| find(r, &ANCHOR))
        .and_then(|a| a.value().attr("href"))
        .map(reply_id_from_href)
        .unwrap_or_default();

    let date = attr(body.and_then(|b| find(b, &DATE)), "title");
    let sent_at = ctx.resolver.resolve(&date, ctx.time_zone)?;

    let classified = body.map(classify).unwrap_or_default();

    let message = Message {
        id,
        sent_at,
        sender_name: sender_name.clone(),
        reply_to_id,
        message_type: classified.message_type,
        content: classified.content,
        media_path: classified.media_path,
        media_thumbnail_path: classified.media_thumbnail_path,
    };

    Ok((message, sender_name))
}

/// Turns a reply link into the replied-to element id.
///
/// Links into other fragments (`messages2.html#go_to_message41`) resolve the
/// same way. A link without the prefix is returned unchanged.
///
/// ```
/// use tgroom::parsing::reply_id_from_href;
///
/// assert_eq!(reply_id_from_href("#go_to_message41"), "message41");
/// assert_eq!(reply_id_from_href("messages2.html#go_to_message9"), "message9");
/// assert_eq!(reply_id_from_href("#"), "#");
/// ```
pub fn reply_id_from_href(href: &str) -> String {
    href.split_once(REPLY_LINK_PREFIX)
        .map_or(href, |(_, id)| id)
        .to_string()
}

//! Shared fixtures: builders for Telegram Desktop HTML export fragments.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// One `.message` element of a fragment.
#[derive(Debug, Clone)]
pub enum Entry {
    /// Service line (date separator, "X joined"), no `default` class.
    Service(String),
    /// User message. `sender: None` renders a `joined` continuation.
    User {
        id: String,
        date: String,
        sender: Option<String>,
        reply_to: Option<String>,
        body: String,
    },
}

impl Entry {
    pub fn text(id: &str, date: &str, sender: &str, text: &str) -> Self {
        Entry::User {
            id: id.into(),
            date: date.into(),
            sender: Some(sender.into()),
            reply_to: None,
            body: format!("<div class=\"text\">\n  {text}\n</div>"),
        }
    }

    pub fn joined_text(id: &str, date: &str, text: &str) -> Self {
        Entry::User {
            id: id.into(),
            date: date.into(),
            sender: None,
            reply_to: None,
            body: format!("<div class=\"text\">{text}</div>"),
        }
    }

    pub fn photo(id: &str, date: &str, sender: Option<&str>, path: &str) -> Self {
        Entry::User {
            id: id.into(),
            date: date.into(),
            sender: sender.map(Into::into),
            reply_to: None,
            body: format!(
                r#"<div class="media_wrap clearfix"><a class="photo_wrap clearfix pull_left" href="{path}"><img class="photo" src="{path}_thumb.jpg" style="width: 260px; height: 195px"></a></div>"#
            ),
        }
    }

    pub fn voice(id: &str, date: &str, sender: Option<&str>, path: &str) -> Self {
        Entry::User {
            id: id.into(),
            date: date.into(),
            sender: sender.map(Into::into),
            reply_to: None,
            body: format!(
                r#"<div class="media_wrap clearfix"><a class="media clearfix pull_left block_link media_voice_message" href="{path}"><div class="fill pull_left"></div><div class="body"><div class="title bold">Voice message</div><div class="status details">0:04, 9.1 KB</div></div></a></div>"#
            ),
        }
    }

    pub fn service(text: &str) -> Self {
        Entry::Service(text.into())
    }

    /// Marks this user entry as a reply to `target` (an element id).
    pub fn replying_to(mut self, target: &str) -> Self {
        if let Entry::User { reply_to, .. } = &mut self {
            *reply_to = Some(target.into());
        }
        self
    }

    fn render(&self, index: usize) -> String {
        match self {
            Entry::Service(text) => format!(
                "<div class=\"message service\" id=\"message-{index}\">\n <div class=\"body details\">\n  {text}\n </div>\n</div>\n"
            ),
            Entry::User {
                id,
                date,
                sender,
                reply_to,
                body,
            } => {
                let joined = if sender.is_none() { " joined" } else { "" };
                let mut html = format!(
                    "<div class=\"message default clearfix{joined}\" id=\"{id}\">\n <div class=\"pull_left userpic_wrap\"></div>\n <div class=\"body\">\n  <div class=\"pull_right date details\" title=\"{date}\">\n   {}\n  </div>\n",
                    date.get(11..16).unwrap_or_default()
                );
                if let Some(name) = sender {
                    html.push_str(&format!("  <div class=\"from_name\">\n   {name}\n  </div>\n"));
                }
                if let Some(target) = reply_to {
                    html.push_str(&format!(
                        "  <div class=\"reply_to details\">\n   In reply to <a href=\"#go_to_{target}\" onclick=\"return GoToMessage(1)\">this message</a>\n  </div>\n"
                    ));
                }
                html.push_str(body);
                html.push_str("\n </div>\n</div>\n");
                html
            }
        }
    }
}

/// Renders a complete fragment document.
pub fn fragment(room_name: &str, entries: &[Entry]) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html>
 <head>
  <meta charset="utf-8"/>
  <title>Exported Data</title>
  <link href="css/style.css" rel="stylesheet"/>
 </head>
 <body onload="CheckLocation();">
  <div class="page_wrap">
   <div class="page_header">
    <div class="content">
     <div class="text bold">
{room_name}
     </div>
    </div>
   </div>
   <div class="page_body chat_page">
    <div class="history">
"#
    );
    for (i, entry) in entries.iter().enumerate() {
        html.push_str(&entry.render(i));
    }
    html.push_str("    </div>\n   </div>\n  </div>\n </body>\n</html>\n");
    html
}

/// Export-order file name for fragment `n` (1-based).
pub fn fragment_name(n: usize) -> String {
    if n == 1 {
        "messages.html".to_string()
    } else {
        format!("messages{n}.html")
    }
}

/// Writes each fragment into a fresh temp dir, in export order.
pub fn write_export(fragments: &[String]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_fragments(dir.path(), fragments);
    dir
}

pub fn write_fragments(dir: &Path, fragments: &[String]) -> Vec<PathBuf> {
    fragments
        .iter()
        .enumerate()
        .map(|(i, html)| {
            let path = dir.join(fragment_name(i + 1));
            fs::write(&path, html).expect("Failed to write fragment");
            path
        })
        .collect()
}

/// A three-fragment export exercising every decoding path.
///
/// Dates are Asia/Jakarta local times (UTC+7).
pub fn sample_export() -> TempDir {
    let first = fragment(
        "Rust Study Group",
        &[
            Entry::service("29 December 2019"),
            Entry::text("message1", "29.12.2019 14:05:30", "Alice", "Hello everyone"),
            Entry::joined_text("message2", "29.12.2019 14:05:41", "Anyone here?"),
            Entry::service("Bob joined group by link"),
            Entry::photo("message3", "29.12.2019 14:06:02", None, "photos/photo_1@29-12-2019_14-06-02.jpg"),
            Entry::text("message4", "29.12.2019 14:07:00", "Bob", "Hi Alice").replying_to("message1"),
        ],
    );
    let second = fragment(
        "Rust Study Group",
        &[
            Entry::joined_text("message5", "30.12.2019 09:00:00", "orphan continuation"),
            Entry::voice("message6", "30.12.2019 09:01:00", Some("Carol"), "voice_messages/audio_1@30-12-2019_09-01-00.ogg"),
            Entry::joined_text("message7", "30.12.2019 09:01:30", "that was me"),
        ],
    );
    let third = fragment(
        "Rust Study Group",
        &[Entry::text("message8", "31.12.2019 23:59:59", "Alice", "Happy new year").replying_to("message7")],
    );
    write_export(&[first, second, third])
}

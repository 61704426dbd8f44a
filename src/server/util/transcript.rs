//! HTML transcript rendering for ticket channels.

use chrono::{DateTime, Utc};

use crate::server::model::ticket::MessageSnapshot;

/// Escapes text for inclusion in HTML element content and attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a standalone HTML transcript.
///
/// `messages` are expected oldest first.
pub fn render_transcript(
    guild_name: &str,
    channel_name: &str,
    ticket_number: i32,
    messages: &[MessageSnapshot],
) -> String {
    let mut body = String::new();

    for message in messages {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(message.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_default();

        let avatar = message
            .author
            .avatar
            .as_deref()
            .map(|url| format!(r#"<img class="avatar" src="{}" alt="">"#, escape_html(url)))
            .unwrap_or_else(|| r#"<div class="avatar"></div>"#.to_string());

        let bot_tag = if message.author.bot {
            r#" <span class="bot">BOT</span>"#
        } else {
            ""
        };

        let content = escape_html(&message.content).replace('\n', "<br>");

        let attachments: String = message
            .attachments
            .iter()
            .map(|url| {
                let url = escape_html(url);
                format!(r#"<div class="attachment"><a href="{url}">{url}</a></div>"#)
            })
            .collect();

        let embeds = if message.embeds > 0 {
            format!(r#"<div class="embed-note">[{} embed(s)]</div>"#, message.embeds)
        } else {
            String::new()
        };

        body.push_str(&format!(
            r#"<div class="message">{avatar}<div class="content"><div class="meta"><span class="author">{author}</span>{bot_tag} <span class="time">{timestamp}</span></div><div class="text">{content}</div>{attachments}{embeds}</div></div>
"#,
            author = escape_html(&message.author.username),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Ticket #{ticket_number} - {channel}</title>
<style>
body {{ background: #313338; color: #dbdee1; font-family: "gg sans", Helvetica, Arial, sans-serif; margin: 0; padding: 24px; }}
header {{ border-bottom: 1px solid #3f4147; margin-bottom: 16px; padding-bottom: 12px; }}
.message {{ display: flex; gap: 12px; padding: 6px 0; }}
.avatar {{ width: 40px; height: 40px; border-radius: 50%; background: #5865f2; flex-shrink: 0; }}
.author {{ color: #f2f3f5; font-weight: 600; }}
.bot {{ background: #5865f2; border-radius: 3px; color: #fff; font-size: 10px; padding: 1px 4px; }}
.time {{ color: #949ba4; font-size: 12px; }}
.attachment a {{ color: #00a8fc; }}
.embed-note {{ color: #949ba4; font-style: italic; }}
</style>
</head>
<body>
<header><h1>{guild} / #{channel}</h1><p>Ticket #{ticket_number} &middot; {count} messages</p></header>
{body}</body>
</html>
"#,
        guild = escape_html(guild_name),
        channel = escape_html(channel_name),
        count = messages.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::ticket::SnapshotAuthor;

    fn message(content: &str) -> MessageSnapshot {
        MessageSnapshot {
            id: "1".to_string(),
            content: content.to_string(),
            author: SnapshotAuthor {
                id: "2".to_string(),
                username: "<alice>".to_string(),
                avatar: None,
                bot: false,
            },
            timestamp: 1_700_000_000_000,
            attachments: vec!["https://cdn/x.png".to_string()],
            embeds: 0,
            mentions: Vec::new(),
        }
    }

    #[test]
    fn escapes_user_content() {
        let html = render_transcript("Guild", "ticket-1", 1, &[message("<script>x</script>")]);

        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("&lt;alice&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn includes_header_and_attachments() {
        let html = render_transcript("My & Guild", "ticket-0042", 42, &[message("hi\nthere")]);

        assert!(html.contains("Ticket #42"));
        assert!(html.contains("My &amp; Guild"));
        assert!(html.contains("hi<br>there"));
        assert!(html.contains("https://cdn/x.png"));
        assert!(html.contains("1 messages"));
    }
}

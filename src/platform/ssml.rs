//! SSML rendering for abstract speech

use crate::dialog::{Segment, Speech};
use std::time::Duration;

/// Render speech as a `<speak>` document
pub fn render(speech: &Speech) -> String {
    let mut out = String::from("<speak>");
    let mut needs_space = false;

    for segment in speech.segments() {
        match segment {
            Segment::Text(text) => {
                if needs_space {
                    out.push(' ');
                }
                escape_into(&mut out, text);
                needs_space = true;
            }
            Segment::Pause(duration) => {
                out.push_str("<break time=\"");
                out.push_str(&break_time(*duration));
                out.push_str("\"/>");
                needs_space = false;
            }
        }
    }

    out.push_str("</speak>");
    out
}

fn break_time(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis % 1000 == 0 {
        format!("{}s", millis / 1000)
    } else {
        format!("{millis}ms")
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

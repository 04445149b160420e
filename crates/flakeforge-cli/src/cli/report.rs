//! The chat message template that forged batches were delivered in.
//!
//! Only the text is produced here; sending it anywhere is left to the caller.

use flakeforge::{Forged, RandSource};

/// Chance that an app's section claims nothing was found.
const EMPTY_SECTION_PROBABILITY: f64 = 0.05;

/// Renders one message with a section per app.
///
/// The message starts with `@everyone` when `ping` is set. Each section is
/// the app name in bold on its own line followed by a fenced code block
/// holding one token picked uniformly from `tokens`. A section reads
/// `No tokens found.` instead with 5% probability, or always when `tokens` is
/// empty.
pub fn format_report<R: RandSource + ?Sized>(
    rand: &R,
    apps: &[String],
    tokens: &[Forged],
    ping: bool,
) -> flakeforge::Result<String> {
    let mut message = String::new();
    if ping {
        message.push_str("@everyone");
    }

    for app in apps {
        message.push_str(&format!("\n**{app}**\n```\n"));
        if tokens.is_empty() || rand.random_unit() < EMPTY_SECTION_PROBABILITY {
            message.push_str("No tokens found.\n");
        } else {
            message.push_str(rand.choose(tokens)?.as_str());
            message.push('\n');
        }
        message.push_str("```");
    }

    Ok(message)
}

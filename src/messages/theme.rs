//! Theme tokens and colour code rendering.
//!
//! Message templates carry `{token}` theme markers. [`apply`] turns them into
//! Minecraft `§` colour codes, which in-game senders understand natively.
//! Terminal senders go through [`render`], which maps the codes to ANSI
//! escapes or strips them.

/// Prefix character of a Minecraft formatting code.
pub const SECTION: char = '§';

/// Theme token -> formatting code.
const THEME: &[(&str, &str)] = &[
    ("help", "§7"),
    ("info", "§3"),
    ("sorry", "§e"),
    ("please_wait", "§7"),
    ("success", "§a"),
    ("failure", "§c"),
    ("list_odd", "§f"),
    ("list_even", "§e"),
    ("cmd_usage", "§b"),
    ("cmd_flag", "§9"),
    ("req_arg", "§a"),
    ("opt_arg", "§6"),
    ("world_normal", "§a"),
    ("world_nether", "§c"),
    ("world_end", "§5"),
    ("reset", "§r"),
];

fn code_for(token: &str) -> Option<&'static str> {
    THEME.iter().find(|(name, _)| *name == token).map(|(_, code)| *code)
}

/// Replace every known `{token}` with its formatting code. Unknown tokens and
/// stray braces are left untouched.
pub fn apply(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => match code_for(&after[..close]) {
                Some(code) => {
                    out.push_str(code);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            },
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn ansi_for(code: char) -> Option<&'static str> {
    let seq = match code.to_ascii_lowercase() {
        '0' => "30",
        '1' => "34",
        '2' => "32",
        '3' => "36",
        '4' => "31",
        '5' => "35",
        '6' => "33",
        '7' => "37",
        '8' => "90",
        '9' => "94",
        'a' => "92",
        'b' => "96",
        'c' => "91",
        'd' => "95",
        'e' => "93",
        'f' => "97",
        'l' => "1",
        'm' => "9",
        'n' => "4",
        'o' => "3",
        'r' => "0",
        _ => return None,
    };
    Some(seq)
}

/// Render `§`-coded text for a terminal: ANSI escapes when `color` is set,
/// plain text otherwise.
pub fn render(text: &str, color: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    let mut styled = false;
    while let Some(ch) = chars.next() {
        if ch != SECTION {
            out.push(ch);
            continue;
        }
        let Some(code) = chars.next() else { break };
        if color {
            if let Some(seq) = ansi_for(code) {
                out.push_str("\x1b[");
                out.push_str(seq);
                out.push('m');
                styled = true;
            }
        }
    }
    if styled {
        out.push_str("\x1b[0m");
    }
    out
}

/// Plain text with every formatting code removed.
pub fn strip(text: &str) -> String {
    render(text, false)
}

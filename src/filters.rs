//! Named after-render filters that can be enabled from configuration.

pub const BUILTIN_NAMES: &[&str] = &["trim", "uppercase", "lowercase", "crlf"];

/// Resolve a built-in after-render filter by name.
pub fn builtin(name: &str) -> Option<fn(String) -> String> {
    let f: fn(String) -> String = match name {
        "trim" => |s| s.trim().to_string(),
        "uppercase" => |s| s.to_uppercase(),
        "lowercase" => |s| s.to_lowercase(),
        "crlf" => to_crlf,
        _ => return None,
    };
    Some(f)
}

/// Normalize line endings to CRLF, as mail transports expect.
fn to_crlf(text: String) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\r\n");
            }
            '\n' => out.push_str("\r\n"),
            c => out.push(c),
        }
    }
    out
}

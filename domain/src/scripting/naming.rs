//! Host ↔ guest member naming.
//!
//! Host API members opt in to guest exposure with the [`SENTINEL_PREFIX`] and
//! use camelCase; guest code sees lower_snake_case. Both directions are pure
//! functions so the registrar's initial pass and its `__index` fallback agree
//! on every name.
//!
//! | Host          | Guest           |
//! |---------------|-----------------|
//! | `$setColor`   | `set_color`     |
//! | `$peers`      | `peers`         |
//! | `$sendHTTP`   | `send_h_t_t_p`  |

/// Marks a host member as guest-exposed.
pub const SENTINEL_PREFIX: char = '$';

/// Map a host member name to its guest-visible name.
///
/// Returns `None` when the member does not carry the sentinel prefix.
/// A bare prefix maps to an empty name, which callers must reject.
pub fn guest_name(host: &str) -> Option<String> {
    let stem = host.strip_prefix(SENTINEL_PREFIX)?;
    let mut out = String::with_capacity(stem.len() + 4);
    for c in stem.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Map a guest-visible name back to the host member name (inverse of
/// [`guest_name`]).
pub fn host_name(guest: &str) -> String {
    let mut out = String::with_capacity(guest.len() + 1);
    out.push(SENTINEL_PREFIX);
    let mut chars = guest.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_'
            && let Some(next) = chars.peek().copied()
            && next.is_ascii_lowercase()
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_name_snake_cases_boundaries() {
        assert_eq!(guest_name("$setColor").as_deref(), Some("set_color"));
        assert_eq!(guest_name("$peers").as_deref(), Some("peers"));
        assert_eq!(guest_name("$sendHTTP").as_deref(), Some("send_h_t_t_p"));
        assert_eq!(guest_name("$playSfx2").as_deref(), Some("play_sfx2"));
    }

    #[test]
    fn test_guest_name_requires_prefix() {
        assert_eq!(guest_name("setColor"), None);
        assert_eq!(guest_name("").as_deref(), None);
        assert_eq!(guest_name("$").as_deref(), Some(""));
    }

    #[test]
    fn test_host_name_restores_camel_case() {
        assert_eq!(host_name("set_color"), "$setColor");
        assert_eq!(host_name("peers"), "$peers");
        assert_eq!(host_name("send_h_t_t_p"), "$sendHTTP");
    }

    #[test]
    fn test_host_name_keeps_non_letter_underscores() {
        assert_eq!(host_name("slot_2"), "$slot_2");
        assert_eq!(host_name("trailing_"), "$trailing_");
        assert_eq!(host_name("double__x"), "$double_X");
    }

    #[test]
    fn test_names_roundtrip() {
        for host in ["$setColor", "$x", "$queueDrawCall", "$isHeld", "$peerCount"] {
            let guest = guest_name(host).unwrap();
            assert_eq!(host_name(&guest), host);
        }
    }
}

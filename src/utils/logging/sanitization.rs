//! Secret masking for log output

const VISIBLE_EDGE: usize = 2;
const MIN_MASKABLE_LEN: usize = 8;

/// Mask a secret, keeping two characters on each side of long values
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > MIN_MASKABLE_LEN {
        let head: String = chars[..VISIBLE_EDGE].iter().collect();
        let tail: String = chars[chars.len() - VISIBLE_EDGE..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}

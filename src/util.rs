//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// Unknown placeholders are left verbatim: the template is administrator-edited
/// free text, so rendering must never fail on it.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
/// The cut backs off to a char boundary: upstream error bodies are arbitrary
/// (often multibyte) text and must never panic the handler.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_known_keys() {
    let out = fill_template("Hola {name}, nivel {level}.", &[("name", "Ana"), ("level", "B2")]);
    assert_eq!(out, "Hola Ana, nivel B2.");
  }

  #[test]
  fn fill_template_leaves_unknown_keys_verbatim() {
    let out = fill_template("keep {this} and ${nope}", &[("known", "x")]);
    assert_eq!(out, "keep {this} and ${nope}");
  }

  #[test]
  fn trunc_for_log_short_strings_pass_through() {
    assert_eq!(trunc_for_log("abc", 10), "abc");
    assert!(trunc_for_log("abcdefghijklmnop", 4).contains("bytes total"));
  }

  #[test]
  fn trunc_for_log_backs_off_to_a_char_boundary() {
    // 1 ASCII byte + 150 two-byte chars = 301 bytes; byte 300 falls inside
    // the final "é" and a naive byte slice would panic.
    let body = format!("a{}", "é".repeat(150));
    assert_eq!(body.len(), 301);
    let out = trunc_for_log(&body, 300);
    assert!(out.starts_with("aé"));
    assert!(out.contains("(301 bytes total)"));
    assert_eq!(out.chars().filter(|c| *c == 'é').count(), 149);
  }

  #[test]
  fn trunc_for_log_exact_boundary_cuts_cleanly() {
    let body = "é".repeat(10); // 20 bytes
    let out = trunc_for_log(&body, 8);
    assert!(out.starts_with(&"é".repeat(4)));
    assert!(out.contains("(20 bytes total)"));
  }
}

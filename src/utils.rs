//! Small helpers shared across the pipeline.

use url::Url;

/// Derive the scheme+host base of a URL, keeping an explicit port.
///
/// This is the `site` value persisted in the snapshot, e.g.
/// `https://gcaptain.com` or `http://localhost:8080`.
///
/// # Returns
///
/// `None` when the input is not an absolute URL with a host.
pub fn base_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes with an ellipsis and byte count
/// indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_domain_strips_path_and_query() {
        assert_eq!(
            base_domain("https://gcaptain.com/pipelay-vessel?ref=home"),
            Some("https://gcaptain.com".to_string())
        );
    }

    #[test]
    fn test_base_domain_keeps_port() {
        assert_eq!(
            base_domain("http://localhost:8080/news/1"),
            Some("http://localhost:8080".to_string())
        );
    }

    #[test]
    fn test_base_domain_rejects_relative() {
        assert_eq!(base_domain("/news/1"), None);
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }
}

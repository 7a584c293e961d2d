/// Site extraction for the tab list
use url::Url;

/// Extract the site shown next to a tab title
///
/// Algorithm:
/// 1. Parse the URL and take its hostname
/// 2. Strip a leading "www."
/// 3. Anything without a hostname (empty, unparsable, `about:blank`,
///    `file://`) yields an empty site
///
/// Examples:
/// - https://www.google.com/search → google.com
/// - https://mail.google.com → mail.google.com
/// - http://localhost:3000 → localhost
pub fn extract_site(url: &str) -> String {
    extract_hostname(url)
        .map(|hostname| match hostname.strip_prefix("www.") {
            Some(rest) => rest.to_string(),
            None => hostname,
        })
        .unwrap_or_default()
}

/// Extract hostname from a URL string
fn extract_hostname(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let parsed = Url::parse(url).ok()?;
    let hostname = parsed.host_str()?.to_lowercase();

    if hostname.is_empty() {
        None
    } else {
        Some(hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_site_basic() {
        assert_eq!(extract_site("https://www.google.com"), "google.com");
        assert_eq!(extract_site("https://google.com"), "google.com");
        assert_eq!(extract_site("http://google.com/"), "google.com");
    }

    #[test]
    fn test_extract_site_keeps_subdomains() {
        assert_eq!(extract_site("https://mail.google.com/mail/u/0"), "mail.google.com");
        assert_eq!(extract_site("https://docs.rs/yew"), "docs.rs");
    }

    #[test]
    fn test_extract_site_only_strips_leading_www() {
        assert_eq!(extract_site("https://www.www.example.org"), "www.example.org");
        assert_eq!(extract_site("https://wwwx.example.org"), "wwwx.example.org");
    }

    #[test]
    fn test_extract_site_with_port_and_path() {
        assert_eq!(extract_site("http://localhost:3000/index.html"), "localhost");
        assert_eq!(extract_site("http://127.0.0.1:8080"), "127.0.0.1");
    }

    #[test]
    fn test_extract_site_without_host() {
        assert_eq!(extract_site(""), "");
        assert_eq!(extract_site("   "), "");
        assert_eq!(extract_site("not a url"), "");
        assert_eq!(extract_site("about:blank"), "");
        assert_eq!(extract_site("file:///home/user/notes.txt"), "");
    }

    #[test]
    fn test_extract_site_lowercases() {
        assert_eq!(extract_site("https://WWW.Example.COM/Path"), "example.com");
    }
}

//! Stream CDN request rewriting.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::entities::ImageRequest;
use crate::domain::ports::ImageCdn;

/// Default target width for resized images.
pub const DEFAULT_WIDTH: u32 = 240;

/// Default target height for resized images.
pub const DEFAULT_HEIGHT: u32 = 240;

/// Query parameters the CDN uses to shape the served image.
const SIZING_PARAMS: [&str; 4] = ["w", "h", "resize", "crop"];

/// CDN rewriting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCdnConfig {
    /// Hosts served by the CDN. Subdomains match too.
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,

    /// Target width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Target height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// CDN resize strategy (`clip`, `crop`, `fill`, `scale`).
    #[serde(default = "default_resize")]
    pub resize: String,

    /// Crop anchor used with `resize = "crop"`.
    #[serde(default = "default_crop")]
    pub crop: String,
}

fn default_hosts() -> Vec<String> {
    vec!["stream-io-cdn.com".to_string()]
}

const fn default_width() -> u32 {
    DEFAULT_WIDTH
}

const fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_resize() -> String {
    "fill".to_string()
}

fn default_crop() -> String {
    "center".to_string()
}

impl Default for ImageCdnConfig {
    fn default() -> Self {
        Self {
            hosts: default_hosts(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            resize: default_resize(),
            crop: default_crop(),
        }
    }
}

/// [`ImageCdn`] adapter for the Stream CDN.
#[derive(Debug, Clone, Default)]
pub struct StreamImageCdn {
    config: ImageCdnConfig,
}

impl StreamImageCdn {
    /// Creates an adapter with the given configuration.
    #[must_use]
    pub const fn new(config: ImageCdnConfig) -> Self {
        Self { config }
    }

    /// Checks if a URL is served by one of the configured hosts.
    #[must_use]
    pub fn is_cdn_url(&self, url: &str) -> bool {
        self.parse_cdn_url(url).is_some()
    }

    /// Adds sizing parameters to a CDN URL, keeping unrelated parameters.
    /// Non-CDN URLs are returned unchanged.
    #[must_use]
    pub fn resized_url(&self, url: &str) -> String {
        let Some(mut parsed) = self.parse_cdn_url(url) else {
            return url.to_string();
        };

        let others: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(key, _)| !SIZING_PARAMS.contains(&key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        parsed
            .query_pairs_mut()
            .clear()
            .append_pair("w", &self.config.width.to_string())
            .append_pair("h", &self.config.height.to_string())
            .append_pair("resize", &self.config.resize)
            .append_pair("crop", &self.config.crop)
            .extend_pairs(others);

        parsed.into()
    }

    fn parse_cdn_url(&self, url: &str) -> Option<Url> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        let matches = self.config.hosts.iter().any(|cdn_host| {
            host == cdn_host
                || host
                    .strip_suffix(cdn_host.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        });
        matches.then_some(parsed)
    }
}

impl ImageCdn for StreamImageCdn {
    fn request_for_image(&self, url: &str) -> ImageRequest {
        let resized = self.resized_url(url);
        let key = self.caching_key(&resized);
        ImageRequest::new(resized).with_caching_key(key)
    }

    fn caching_key(&self, url: &str) -> String {
        let Some(mut parsed) = self.parse_cdn_url(url) else {
            return url.to_string();
        };

        let kept: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(key, _)| SIZING_PARAMS.contains(&key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        parsed.set_fragment(None);
        if kept.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.query_pairs_mut().clear().extend_pairs(kept);
        }

        parsed.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn cdn() -> StreamImageCdn {
        StreamImageCdn::default()
    }

    #[test_case("https://us-east.stream-io-cdn.com/1/images/a.png", true ; "subdomain")]
    #[test_case("https://stream-io-cdn.com/a.png", true ; "apex")]
    #[test_case("https://user@stream-io-cdn.com:443/a.png", true ; "userinfo and port")]
    #[test_case("https://evilstream-io-cdn.com/a.png", false ; "suffix without dot")]
    #[test_case("https://example.com/a.png?src=stream-io-cdn.com", false ; "host in query")]
    #[test_case("not a url", false ; "garbage")]
    fn test_is_cdn_url(url: &str, expected: bool) {
        assert_eq!(cdn().is_cdn_url(url), expected);
    }

    #[test]
    fn test_resized_url_adds_sizing() {
        let url = "https://us-east.stream-io-cdn.com/1/images/a.png";

        assert_eq!(
            cdn().resized_url(url),
            "https://us-east.stream-io-cdn.com/1/images/a.png?w=240&h=240&resize=fill&crop=center"
        );
    }

    #[test]
    fn test_resized_url_overrides_sizing_and_keeps_others() {
        let url = "https://us-east.stream-io-cdn.com/a.png?Key-Pair-Id=abc&w=10&Signature=xyz&h=20";
        let resized = cdn().resized_url(url);

        assert!(resized.contains("w=240"));
        assert!(resized.contains("h=240"));
        assert!(!resized.contains("w=10"));
        assert!(resized.contains("Key-Pair-Id=abc"));
        assert!(resized.contains("Signature=xyz"));
    }

    #[test]
    fn test_resized_url_puts_query_before_fragment() {
        assert_eq!(
            cdn().resized_url("https://stream-io-cdn.com/a.png#preview"),
            "https://stream-io-cdn.com/a.png?w=240&h=240&resize=fill&crop=center#preview"
        );
        assert_eq!(
            cdn().resized_url("https://stream-io-cdn.com/a.png?v=2#preview"),
            "https://stream-io-cdn.com/a.png?w=240&h=240&resize=fill&crop=center&v=2#preview"
        );
    }

    #[test]
    fn test_resized_url_overrides_percent_encoded_sizing_keys() {
        let resized = cdn().resized_url("https://stream-io-cdn.com/a.png?%77=10&%68=20");

        assert_eq!(
            resized,
            "https://stream-io-cdn.com/a.png?w=240&h=240&resize=fill&crop=center"
        );
    }

    #[test]
    fn test_caching_key_drops_fragment() {
        assert_eq!(
            cdn().caching_key("https://stream-io-cdn.com/a.png?w=240&Signature=s#preview"),
            "https://stream-io-cdn.com/a.png?w=240"
        );
    }

    #[test]
    fn test_non_cdn_url_unchanged() {
        let url = "https://example.com/avatar.png?size=64";

        assert_eq!(cdn().resized_url(url), url);
        assert_eq!(cdn().caching_key(url), url);
    }

    #[test]
    fn test_caching_key_strips_signatures() {
        let first = "https://us-east.stream-io-cdn.com/a.png?Signature=one&w=240&h=240";
        let second = "https://us-east.stream-io-cdn.com/a.png?Signature=two&w=240&h=240";

        assert_eq!(cdn().caching_key(first), cdn().caching_key(second));
        assert_eq!(
            cdn().caching_key(first),
            "https://us-east.stream-io-cdn.com/a.png?w=240&h=240"
        );
        assert_eq!(
            cdn().caching_key("https://us-east.stream-io-cdn.com/a.png?Expires=1"),
            "https://us-east.stream-io-cdn.com/a.png"
        );
    }

    #[test]
    fn test_request_for_image_uses_config() {
        let cdn = StreamImageCdn::new(ImageCdnConfig {
            width: 64,
            height: 48,
            ..ImageCdnConfig::default()
        });
        let request = cdn.request_for_image("https://stream-io-cdn.com/a.png?Signature=s");

        assert_eq!(
            request.url(),
            "https://stream-io-cdn.com/a.png?w=64&h=48&resize=fill&crop=center&Signature=s"
        );
        assert_eq!(
            request.caching_key(),
            "https://stream-io-cdn.com/a.png?w=64&h=48&resize=fill&crop=center"
        );
    }

    #[test]
    fn test_config_partial_toml() {
        let config: ImageCdnConfig = toml::from_str("width = 100\nhosts = [\"img.test\"]").unwrap();

        assert_eq!(config.width, 100);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.hosts, vec!["img.test".to_string()]);
        assert_eq!(config.resize, "fill");
    }
}

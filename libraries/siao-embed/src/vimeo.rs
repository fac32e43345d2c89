//! Vimeo id extraction

const MARKER: &str = "vimeo.com/";

pub(crate) fn player_url(video_id: &str) -> String {
    format!("https://player.vimeo.com/video/{}?autoplay=1", video_id)
}

/// Extract the numeric id from a Vimeo URL.
///
/// Only the path is inspected. The id is taken from the deepest path
/// segment after `vimeo.com/` that starts with a digit, so
/// `vimeo.com/channels/staffpicks/76979871` and `vimeo.com/76979871` both
/// yield `76979871`.
pub(crate) fn extract_video_id(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let start = path.find(MARKER)? + MARKER.len();

    path[start..]
        .split('/')
        .filter(|segment| segment.starts_with(|c: char| c.is_ascii_digit()))
        .last()
        .map(leading_digits)
}

fn leading_digits(segment: &str) -> &str {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    &segment[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_id() {
        assert_eq!(extract_video_id("https://vimeo.com/76979871"), Some("76979871"));
    }

    #[test]
    fn nested_path() {
        assert_eq!(
            extract_video_id("https://vimeo.com/channels/staffpicks/76979871"),
            Some("76979871")
        );
    }

    #[test]
    fn deepest_numeric_segment_wins() {
        assert_eq!(
            extract_video_id("https://vimeo.com/123/456abc"),
            Some("456")
        );
    }

    #[test]
    fn query_is_ignored() {
        assert_eq!(extract_video_id("https://vimeo.com/about?id=42"), None);
        assert_eq!(
            extract_video_id("https://vimeo.com/76979871?share=copy"),
            Some("76979871")
        );
    }

    #[test]
    fn no_numeric_segment() {
        assert_eq!(extract_video_id("https://vimeo.com/channels/staffpicks"), None);
    }

    #[test]
    fn player_url_enables_autoplay() {
        assert_eq!(
            player_url("76979871"),
            "https://player.vimeo.com/video/76979871?autoplay=1"
        );
    }
}

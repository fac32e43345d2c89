//! YouTube id extraction

/// Prefixes that precede a video id
const MARKERS: [&str; 3] = ["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"];

/// Characters that end a video id
const TERMINATORS: [char; 4] = ['&', '?', '#', '\n'];

/// YouTube ids are always this long
pub(crate) const VIDEO_ID_LEN: usize = 11;

/// Query string appended to every YouTube player URL
const PLAYER_PARAMS: &str = "autoplay=1&rel=0&modestbranding=1&playsinline=1&enablejsapi=1\
&controls=1&fs=1&iv_load_policy=3&cc_load_policy=0";

/// Player URL for a YouTube video id
pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}?{}", video_id, PLAYER_PARAMS)
}

/// Extract the video id following the leftmost marker.
///
/// A marker directly followed by a terminator does not count as a match and
/// the search moves on. The first real candidate decides: if it is not
/// exactly [`VIDEO_ID_LEN`] characters long there is no YouTube match.
pub(crate) fn extract_video_id(url: &str) -> Option<&str> {
    let mut from = 0;

    while let Some((start, marker)) = leftmost_marker(&url[from..]) {
        let id_start = from + start + marker.len();
        let rest = &url[id_start..];
        let id = rest.split(TERMINATORS).next().unwrap_or_default();

        if !id.is_empty() {
            return (id.chars().count() == VIDEO_ID_LEN).then_some(id);
        }
        from = from + start + 1;
    }

    None
}

fn leftmost_marker(haystack: &str) -> Option<(usize, &'static str)> {
    MARKERS
        .iter()
        .filter_map(|marker| haystack.find(marker).map(|pos| (pos, *marker)))
        .min_by_key(|(pos, _)| *pos)
}

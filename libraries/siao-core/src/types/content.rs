/// Raw content records as returned by the content API
///
/// The API is an untrusted collaborator: any field may be missing or `null`,
/// and identifiers occasionally arrive as numbers. Every field therefore
/// falls back to its default instead of failing the whole payload.
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as the type's default
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an identifier that may be a JSON string or number
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// A named contributor (author, artist)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
}

/// Audiobook metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Audiobook {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub description: Option<String>,
    pub poster: Option<String>,
    pub banner: Option<String>,
    pub narrator: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub authors: Vec<Person>,
}

/// Audiobook chapter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub audiobook_id: String,
    #[serde(deserialize_with = "nullable")]
    pub chapter_number: i64,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub audio_file: String,
    #[serde(deserialize_with = "nullable")]
    pub duration: f64,
    #[serde(deserialize_with = "nullable")]
    pub is_published: bool,
    #[serde(deserialize_with = "nullable")]
    pub order: i64,
}

/// Music album metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub description: Option<String>,
    pub poster: Option<String>,
    pub banner: Option<String>,
    pub artist: Option<Person>,
    pub release_date: Option<String>,
}

/// Album song
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub album_id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub track_number: i64,
    #[serde(deserialize_with = "nullable")]
    pub audio_url: String,
    #[serde(deserialize_with = "nullable")]
    pub duration_seconds: f64,
    #[serde(deserialize_with = "nullable")]
    pub is_published: bool,
    #[serde(deserialize_with = "nullable")]
    pub artists: Vec<Person>,
}

/// Series metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Series {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub description: Option<String>,
    pub poster: Option<String>,
    pub banner: Option<String>,
    pub trailer: Option<String>,
}

/// Season of a series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub serie_id: String,
    #[serde(deserialize_with = "nullable")]
    pub season_number: i64,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub poster: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub is_published: bool,
}

/// Series episode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub season_id: String,
    #[serde(deserialize_with = "nullable")]
    pub episode_number: i64,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub duration: f64,
    #[serde(deserialize_with = "nullable")]
    pub is_published: bool,
}

/// Course with its modules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub description: Option<String>,
    pub poster: Option<String>,
    pub banner: Option<String>,
    pub preview: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub status: bool,
    #[serde(deserialize_with = "nullable")]
    pub modules: Vec<Module>,
}

/// Course module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub status: bool,
    #[serde(deserialize_with = "nullable")]
    pub order: i64,
    #[serde(deserialize_with = "nullable")]
    pub classrooms: Vec<Classroom>,
}

/// Single lesson of a course module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classroom {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub module_id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub video: String,
    #[serde(deserialize_with = "nullable")]
    pub order: i64,
    #[serde(deserialize_with = "nullable")]
    pub duration: f64,
    #[serde(deserialize_with = "nullable")]
    pub status: bool,
}

/// Movie metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub description: Option<String>,
    pub poster: Option<String>,
    pub banner: Option<String>,
    pub video_url: Option<String>,
    pub trailer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_tolerates_missing_and_null_fields() {
        let chapter: Chapter = serde_json::from_str(
            r#"{"id": 7, "title": null, "audio_file": "/a.mp3", "is_published": true}"#,
        )
        .unwrap();

        assert_eq!(chapter.id, "7");
        assert_eq!(chapter.title, "");
        assert_eq!(chapter.order, 0);
        assert_eq!(chapter.duration, 0.0);
        assert!(chapter.is_published);
    }

    #[test]
    fn song_parses_nested_artists() {
        let song: Song = serde_json::from_str(
            r#"{
                "id": "s1",
                "album_id": "a1",
                "title": "Song",
                "track_number": 3,
                "audio_url": "https://cdn.example.com/s1.mp3",
                "duration_seconds": 201.5,
                "is_published": true,
                "artists": [{"id": "p1", "name": "Singer"}]
            }"#,
        )
        .unwrap();

        assert_eq!(song.track_number, 3);
        assert_eq!(song.artists[0].name, "Singer");
    }

    #[test]
    fn course_modules_default_to_empty() {
        let course: Course = serde_json::from_str(r#"{"id": "c1", "modules": null}"#).unwrap();
        assert!(course.modules.is_empty());
        assert!(!course.status);
    }
}

//! Domain types for SiaoPlay

mod content;
mod track;

pub use content::{
    Album, Audiobook, Chapter, Classroom, Course, Episode, Module, Movie, Person, Season, Series,
    Song,
};
pub use track::Track;

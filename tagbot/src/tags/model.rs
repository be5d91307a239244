//! Semantic tag record and the closed set of editable fields

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Working copy of an audio file's editable tags.
///
/// Every field is independently optional. `None` means "leave the file's
/// existing value untouched" at commit time, not "clear the field".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tags {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    /// Free-form text. Numeric validation is advisory only, never enforced.
    pub year: Option<String>,
    pub track_number: Option<String>,
    pub disc_number: Option<String>,
    /// Staged replacement cover image, not yet merged into the audio file
    pub cover: Option<StagedCover>,
}

/// A replacement cover image persisted to the user workspace,
/// waiting for the commit step to splice it into the tag container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedCover {
    pub path: PathBuf,
}

impl Tags {
    /// Read access by field. Cover art has no text value and returns None.
    pub fn get(&self, field: TagField) -> Option<&str> {
        match field {
            TagField::Artist => self.artist.as_deref(),
            TagField::Title => self.title.as_deref(),
            TagField::Album => self.album.as_deref(),
            TagField::Genre => self.genre.as_deref(),
            TagField::Year => self.year.as_deref(),
            TagField::TrackNumber => self.track_number.as_deref(),
            TagField::DiscNumber => self.disc_number.as_deref(),
            TagField::CoverArt => None,
        }
    }

    /// Store a free-text value into the given field.
    ///
    /// Cover art is not a text field; writes to it are ignored here and
    /// go through the staged-cover path instead.
    pub fn set(&mut self, field: TagField, value: String) {
        let slot = match field {
            TagField::Artist => &mut self.artist,
            TagField::Title => &mut self.title,
            TagField::Album => &mut self.album,
            TagField::Genre => &mut self.genre,
            TagField::Year => &mut self.year,
            TagField::TrackNumber => &mut self.track_number,
            TagField::DiscNumber => &mut self.disc_number,
            TagField::CoverArt => return,
        };
        *slot = Some(value);
    }
}

/// The editable tag fields, as a closed enumeration.
///
/// Selection happens through keyboard labels generated from this enum, so
/// an out-of-set field name is impossible by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagField {
    Artist,
    Title,
    Album,
    Genre,
    Year,
    TrackNumber,
    DiscNumber,
    CoverArt,
}

impl TagField {
    pub const ALL: [TagField; 8] = [
        TagField::Artist,
        TagField::Title,
        TagField::Album,
        TagField::Genre,
        TagField::Year,
        TagField::TrackNumber,
        TagField::DiscNumber,
        TagField::CoverArt,
    ];

    /// Keyboard label shown to the user (also the selector wire value)
    pub fn label(&self) -> &'static str {
        match self {
            TagField::Artist => "Artist",
            TagField::Title => "Title",
            TagField::Album => "Album",
            TagField::Genre => "Genre",
            TagField::Year => "Year",
            TagField::TrackNumber => "Track Number",
            TagField::DiscNumber => "Disc Number",
            TagField::CoverArt => "Cover Art",
        }
    }

    /// Prompt sent when the field becomes active
    pub fn prompt(&self) -> &'static str {
        match self {
            TagField::Artist => "Enter the name of the artist:",
            TagField::Title => "Enter the title of the music:",
            TagField::Album => "Enter the name of the album:",
            TagField::Genre => "Enter the genre:",
            TagField::Year => "Enter the publish year:",
            TagField::TrackNumber => "Enter the track number:",
            TagField::DiscNumber => "Enter the disc number:",
            TagField::CoverArt => "Send me a photo to use as the cover art:",
        }
    }

    /// Fields that normally hold a number. Non-numeric input is still
    /// accepted; the reply just carries an advisory note.
    pub fn is_numeric_advisory(&self) -> bool {
        matches!(
            self,
            TagField::Year | TagField::TrackNumber | TagField::DiscNumber
        )
    }

    /// Map a keyboard label back to its field
    pub fn from_label(label: &str) -> Option<TagField> {
        Self::ALL.iter().copied().find(|f| f.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for field in TagField::ALL {
            assert_eq!(TagField::from_label(field.label()), Some(field));
        }
    }

    #[test]
    fn unknown_label_maps_to_none() {
        assert_eq!(TagField::from_label("Bitrate"), None);
        assert_eq!(TagField::from_label(""), None);
    }

    #[test]
    fn set_and_get_text_fields() {
        let mut tags = Tags::default();
        tags.set(TagField::Artist, "A".to_string());
        tags.set(TagField::Year, "notanumber".to_string());
        assert_eq!(tags.get(TagField::Artist), Some("A"));
        assert_eq!(tags.get(TagField::Year), Some("notanumber"));
        assert_eq!(tags.get(TagField::Album), None);
    }

    #[test]
    fn cover_art_is_not_a_text_field() {
        let mut tags = Tags::default();
        tags.set(TagField::CoverArt, "ignored".to_string());
        assert_eq!(tags, Tags::default());
        assert_eq!(tags.get(TagField::CoverArt), None);
    }

    #[test]
    fn numeric_advisory_fields() {
        assert!(TagField::Year.is_numeric_advisory());
        assert!(TagField::TrackNumber.is_numeric_advisory());
        assert!(TagField::DiscNumber.is_numeric_advisory());
        assert!(!TagField::Artist.is_numeric_advisory());
        assert!(!TagField::CoverArt.is_numeric_advisory());
    }
}

//! Preview rendering and keyboard layout

use crate::tags::model::{TagField, Tags};

/// Marker shown for a field that carries no pending value
const ABSENT: &str = "-";

/// Render the pending tags as the read-only preview block.
pub fn render_preview(tags: &Tags) -> String {
    let cover = if tags.cover.is_some() {
        "(new image staged)"
    } else {
        ABSENT
    };

    format!(
        "Artist: {}\n\
         Title: {}\n\
         Album: {}\n\
         Genre: {}\n\
         Year: {}\n\
         Track Number: {}\n\
         Disc Number: {}\n\
         Cover Art: {}",
        tags.artist.as_deref().unwrap_or(ABSENT),
        tags.title.as_deref().unwrap_or(ABSENT),
        tags.album.as_deref().unwrap_or(ABSENT),
        tags.genre.as_deref().unwrap_or(ABSENT),
        tags.year.as_deref().unwrap_or(ABSENT),
        tags.track_number.as_deref().unwrap_or(ABSENT),
        tags.disc_number.as_deref().unwrap_or(ABSENT),
        cover,
    )
}

/// Field-selection keyboard, plus the preview/done shortcuts.
pub fn field_keyboard() -> Vec<Vec<String>> {
    vec![
        vec![
            TagField::Artist.label().to_string(),
            TagField::Title.label().to_string(),
        ],
        vec![
            TagField::Album.label().to_string(),
            TagField::Genre.label().to_string(),
            TagField::Year.label().to_string(),
        ],
        vec![
            TagField::TrackNumber.label().to_string(),
            TagField::DiscNumber.label().to_string(),
            TagField::CoverArt.label().to_string(),
        ],
        vec!["Preview".to_string(), "Done".to_string()],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::model::StagedCover;
    use std::path::PathBuf;

    #[test]
    fn preview_marks_absent_fields() {
        let tags = Tags {
            artist: Some("A".to_string()),
            title: Some("T".to_string()),
            ..Default::default()
        };
        let preview = render_preview(&tags);
        assert!(preview.contains("Artist: A"));
        assert!(preview.contains("Title: T"));
        assert!(preview.contains("Album: -"));
        assert!(preview.contains("Genre: -"));
        assert!(preview.contains("Year: -"));
        assert!(preview.contains("Cover Art: -"));
    }

    #[test]
    fn preview_shows_staged_cover() {
        let tags = Tags {
            cover: Some(StagedCover {
                path: PathBuf::from("/tmp/cover.png"),
            }),
            ..Default::default()
        };
        assert!(render_preview(&tags).contains("Cover Art: (new image staged)"));
    }

    #[test]
    fn keyboard_offers_every_field() {
        let keyboard = field_keyboard();
        let labels: Vec<&str> = keyboard
            .iter()
            .flatten()
            .map(|s| s.as_str())
            .collect();
        for field in TagField::ALL {
            assert!(labels.contains(&field.label()), "missing {:?}", field);
        }
    }
}

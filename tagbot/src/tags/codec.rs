//! Tag container read/write over lofty
//!
//! The binary container encoding itself is the codec's concern; this
//! module only maps between [`Tags`] and the file's primary tag. Writes
//! are partial: fields left `None` in the input never touch the frames
//! already present in the file.

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::prelude::*;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};
use std::path::Path;
use tracing::debug;

use crate::error::EditError;
use crate::image::ImageKind;
use crate::tags::model::Tags;

/// Tag codec over the audio file's primary tag
///
/// Supports every container lofty can probe (ID3v2, Vorbis Comments, MP4,
/// RIFF INFO, APE, ...). Stateless; each call opens the file fresh.
pub struct TagCodec;

impl TagCodec {
    pub fn new() -> Self {
        Self
    }

    /// Read the textual tag fields of an audio file.
    ///
    /// A file without any tag block is valid and yields an empty record.
    pub fn read(&self, path: &Path) -> Result<Tags, EditError> {
        let tagged_file = Probe::open(path)
            .map_err(|e| EditError::Decode(e.to_string()))?
            .read()
            .map_err(|e| EditError::Decode(e.to_string()))?;

        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

        let Some(tag) = tag else {
            debug!(file = ?path, "No tags found in audio file");
            return Ok(Tags::default());
        };

        Ok(Tags {
            artist: tag.artist().map(|s| s.to_string()),
            title: tag.title().map(|s| s.to_string()),
            album: tag.album().map(|s| s.to_string()),
            genre: tag.genre().map(|s| s.to_string()),
            year: tag
                .year()
                .map(|y| y.to_string())
                .or_else(|| tag.get_string(&ItemKey::Year).map(str::to_string)),
            track_number: tag.track().map(|t| t.to_string()),
            disc_number: tag.disk().map(|d| d.to_string()),
            cover: None,
        })
    }

    /// Write the set fields of `tags` into the file, leaving unset fields
    /// untouched. The staged cover is merged separately by
    /// [`TagCodec::update_cover_image`].
    pub fn write(&self, path: &Path, tags: &Tags) -> Result<(), EditError> {
        let mut tag = self.load_primary_tag(path)?;

        if let Some(artist) = &tags.artist {
            tag.set_artist(artist.clone());
        }
        if let Some(title) = &tags.title {
            tag.set_title(title.clone());
        }
        if let Some(album) = &tags.album {
            tag.set_album(album.clone());
        }
        if let Some(genre) = &tags.genre {
            tag.set_genre(genre.clone());
        }
        // Numeric-looking fields fall back to a text frame when the value
        // doesn't parse; the advisory already told the user.
        if let Some(year) = &tags.year {
            match year.parse::<u32>() {
                Ok(y) => tag.set_year(y),
                Err(_) => {
                    tag.insert_text(ItemKey::Year, year.clone());
                }
            }
        }
        if let Some(track) = &tags.track_number {
            match track.parse::<u32>() {
                Ok(t) => tag.set_track(t),
                Err(_) => {
                    tag.insert_text(ItemKey::TrackNumber, track.clone());
                }
            }
        }
        if let Some(disc) = &tags.disc_number {
            match disc.parse::<u32>() {
                Ok(d) => tag.set_disk(d),
                Err(_) => {
                    tag.insert_text(ItemKey::DiscNumber, disc.clone());
                }
            }
        }

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| EditError::Write(e.to_string()))?;

        debug!(file = ?path, "Tags written");
        Ok(())
    }

    /// Replace the front-cover picture slot with the given image bytes.
    pub fn update_cover_image(
        &self,
        path: &Path,
        bytes: Vec<u8>,
        kind: ImageKind,
    ) -> Result<(), EditError> {
        let mut tag = self.load_primary_tag(path)?;

        let mime = match kind {
            ImageKind::Png => MimeType::Png,
            ImageKind::Jpeg => MimeType::Jpeg,
        };

        tag.remove_picture_type(PictureType::CoverFront);
        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(mime),
            None,
            bytes,
        ));

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| EditError::Write(e.to_string()))?;

        debug!(file = ?path, "Cover image updated");
        Ok(())
    }

    /// Clone the file's primary tag, or start a fresh one of the format's
    /// preferred type for files carrying no tag block yet.
    fn load_primary_tag(&self, path: &Path) -> Result<Tag, EditError> {
        let tagged_file = Probe::open(path)
            .map_err(|e| EditError::Write(e.to_string()))?
            .read()
            .map_err(|e| EditError::Write(e.to_string()))?;

        Ok(match tagged_file.primary_tag() {
            Some(tag) => tag.clone(),
            None => Tag::new(tagged_file.primary_tag_type()),
        })
    }
}

impl Default for TagCodec {
    fn default() -> Self {
        Self::new()
    }
}

// Comment field mapping for catalog records
//
// Opus tags are free-form Vorbis comment keys. A catalog stores a handful of
// them as typed columns; this module picks those out of decoded metadata.

use serde::Serialize;

use crate::opus::OpusMetadata;

/// Catalog fields taken from the comment header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardField {
    Title,
    Artist,
    Album,
    AlbumArtist,
    Track,
    Cddb,
}

impl StandardField {
    /// Vorbis comment key holding this field
    pub fn comment_key(&self) -> &'static str {
        match self {
            StandardField::Title => "TITLE",
            StandardField::Artist => "ARTIST",
            StandardField::Album => "ALBUM",
            StandardField::AlbumArtist => "ALBUMARTIST",
            StandardField::Track => "TRACKNUMBER",
            StandardField::Cddb => "CDDB",
        }
    }

    /// Convert Vorbis Comment key to standard field
    pub fn from_comment_key(key: &str) -> Option<Self> {
        match key.to_uppercase().as_str() {
            "TITLE" => Some(StandardField::Title),
            "ARTIST" => Some(StandardField::Artist),
            "ALBUM" => Some(StandardField::Album),
            "ALBUMARTIST" | "ALBUM ARTIST" => Some(StandardField::AlbumArtist),
            "TRACKNUMBER" => Some(StandardField::Track),
            "CDDB" => Some(StandardField::Cddb),
            _ => None,
        }
    }
}

/// One catalog row for a decoded file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recording {
    pub path: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub track: Option<u32>,
    pub cddb: Option<String>,
}

impl Recording {
    /// Build a record from the comment header.
    ///
    /// Keys are matched through [`StandardField::from_comment_key`], so an
    /// alias such as `ALBUM ARTIST` fills the same column as `ALBUMARTIST`.
    /// When both spellings are present the canonical key wins.
    pub fn from_metadata(path: impl Into<String>, metadata: &OpusMetadata) -> Self {
        let mut recording = Recording {
            path: path.into(),
            ..Recording::default()
        };

        for (key, value) in &metadata.comments {
            let Some(field) = StandardField::from_comment_key(key) else {
                continue;
            };
            let canonical = key.as_str() == field.comment_key();
            if field == StandardField::Track {
                if canonical || recording.track.is_none() {
                    recording.track = parse_track(value);
                }
            } else if let Some(slot) = recording.text_field(field) {
                if canonical || slot.is_none() {
                    *slot = Some(value.clone());
                }
            }
        }
        recording
    }

    fn text_field(&mut self, field: StandardField) -> Option<&mut Option<String>> {
        match field {
            StandardField::Title => Some(&mut self.title),
            StandardField::Artist => Some(&mut self.artist),
            StandardField::Album => Some(&mut self.album),
            StandardField::AlbumArtist => Some(&mut self.album_artist),
            StandardField::Cddb => Some(&mut self.cddb),
            StandardField::Track => None,
        }
    }
}

/// Convert track number to a plain number (e.g., "1/10" -> 1)
pub fn parse_track(track: &str) -> Option<u32> {
    track.split('/').next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn metadata(comments: &[(&str, &str)]) -> OpusMetadata {
        OpusMetadata {
            channels: 2,
            pre_skip: 312,
            sample_rate: 48000,
            output_gain_db: 0.0,
            mapping_family: 0,
            vendor: "test".to_string(),
            comments: comments
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_field_mapping() {
        let fields = [
            StandardField::Title,
            StandardField::Artist,
            StandardField::Album,
            StandardField::AlbumArtist,
            StandardField::Track,
            StandardField::Cddb,
        ];
        for field in fields {
            assert_eq!(StandardField::from_comment_key(field.comment_key()), Some(field));
        }
        assert_eq!(StandardField::from_comment_key("tracknumber"), Some(StandardField::Track));
        assert_eq!(StandardField::from_comment_key("GENRE"), None);
    }

    #[test]
    fn test_parse_track() {
        assert_eq!(parse_track("5"), Some(5));
        assert_eq!(parse_track("3/12"), Some(3));
        assert_eq!(parse_track(" 7 "), Some(7));
        assert_eq!(parse_track("A1"), None);
        assert_eq!(parse_track(""), None);
    }

    #[test]
    fn test_recording_from_metadata() {
        let meta = metadata(&[
            ("TITLE", "Hoppípolla"),
            ("ARTIST", "Sigur Rós"),
            ("ALBUM", "Takk..."),
            ("ALBUMARTIST", "Sigur Rós"),
            ("TRACKNUMBER", "3/11"),
            ("CDDB", "8f0b6b0b"),
            ("GENRE", "Post-rock"),
        ]);
        let recording = Recording::from_metadata("music/takk/03.opus", &meta);
        assert_eq!(
            recording,
            Recording {
                path: "music/takk/03.opus".to_string(),
                title: Some("Hoppípolla".to_string()),
                artist: Some("Sigur Rós".to_string()),
                album: Some("Takk...".to_string()),
                album_artist: Some("Sigur Rós".to_string()),
                track: Some(3),
                cddb: Some("8f0b6b0b".to_string()),
            }
        );
    }

    #[test]
    fn test_recording_missing_fields() {
        let recording = Recording::from_metadata("a.opus", &metadata(&[("TRACKNUMBER", "x")]));
        assert_eq!(recording.title, None);
        assert_eq!(recording.track, None);
    }

    #[test]
    fn test_album_artist_alias() {
        let meta = metadata(&[("ALBUM ARTIST", "Various Artists")]);
        let recording = Recording::from_metadata("a.opus", &meta);
        assert_eq!(recording.album_artist, Some("Various Artists".to_string()));
    }

    #[test]
    fn test_canonical_key_beats_alias() {
        let meta = metadata(&[("ALBUMARTIST", "Canonical"), ("ALBUM ARTIST", "Alias")]);
        let recording = Recording::from_metadata("a.opus", &meta);
        assert_eq!(recording.album_artist, Some("Canonical".to_string()));
    }
}

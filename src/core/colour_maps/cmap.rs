//! Parser for `.cmap` palette files.
//!
//! One colour per line as three whitespace-separated channels in `0..=255`.
//! Blank lines and lines starting with `#` are skipped.

use crate::core::colour_maps::colour_map::ColourMap;
use crate::core::colour_maps::errors::CmapParseError;
use crate::core::data::colour::Colour;

pub fn parse_cmap(text: &str) -> Result<ColourMap, CmapParseError> {
    let mut colours = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(CmapParseError::WrongChannelCount {
                line: i + 1,
                found: fields.len(),
            });
        }

        let mut channels = [0u8; 3];
        for (channel, field) in channels.iter_mut().zip(&fields) {
            *channel = field.parse().map_err(|_| CmapParseError::InvalidChannel {
                line: i + 1,
                value: (*field).to_string(),
            })?;
        }

        colours.push(Colour::from_rgb8(channels[0], channels[1], channels[2]));
    }

    Ok(ColourMap::new(colours)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour_maps::errors::ColourMapError;

    #[test]
    fn parses_channels_and_skips_comments() {
        let text = "# black to white\n0 0 0\n\n  255 255 255  \n";

        let map = parse_cmap(text).unwrap();

        assert_eq!(map.colours(), &[Colour::BLACK, Colour::WHITE]);
    }

    #[test]
    fn tabs_separate_channels() {
        let map = parse_cmap("255\t0\t255").unwrap();
        assert_eq!(map.colours(), &[Colour::new(1.0, 0.0, 1.0)]);
    }

    #[test]
    fn wrong_channel_count_names_the_line() {
        let result = parse_cmap("0 0 0\n1 2\n");

        assert_eq!(
            result,
            Err(CmapParseError::WrongChannelCount { line: 2, found: 2 })
        );
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let result = parse_cmap("0 256 0");

        assert_eq!(
            result,
            Err(CmapParseError::InvalidChannel {
                line: 1,
                value: "256".to_string()
            })
        );
    }

    #[test]
    fn non_numeric_channel_is_rejected() {
        let err = parse_cmap("# header\nred 0 0").unwrap_err();
        assert_eq!(err.to_string(), "line 2: 'red' is not a channel value in 0..=255");
    }

    #[test]
    fn empty_file_is_an_empty_map() {
        assert_eq!(
            parse_cmap("# nothing here\n\n"),
            Err(CmapParseError::ColourMap(ColourMapError::Empty))
        );
    }
}

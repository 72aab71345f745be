use crate::core::colour_maps::colour_map::ColourMap;
use crate::core::colour_maps::kinds::ColourMapKind;
use crate::core::data::colour::Colour;

const WHITE_STOPS: &[(u8, u8, u8)] = &[(255, 255, 255), (255, 255, 255)];

const FIRE_STOPS: &[(u8, u8, u8)] = &[
    (0, 0, 0),
    (255, 0, 0),
    (255, 165, 0),
    (255, 255, 0),
    (255, 255, 255),
];

const BLUE_WHITE_STOPS: &[(u8, u8, u8)] = &[
    (0, 7, 100),
    (32, 107, 203),
    (237, 255, 255),
    (255, 170, 0),
    (255, 255, 255),
];

const VIRIDIS_STOPS: &[(u8, u8, u8)] = &[
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

fn stops(kind: ColourMapKind) -> &'static [(u8, u8, u8)] {
    match kind {
        ColourMapKind::White => WHITE_STOPS,
        ColourMapKind::Fire => FIRE_STOPS,
        ColourMapKind::BlueWhite => BLUE_WHITE_STOPS,
        ColourMapKind::Viridis => VIRIDIS_STOPS,
    }
}

#[must_use]
pub fn colour_map_factory(kind: ColourMapKind) -> ColourMap {
    let colours = stops(kind)
        .iter()
        .map(|&(r, g, b)| Colour::from_rgb8(r, g, b))
        .collect();

    // Stops are static 8-bit values, so the map is never empty or out of range.
    ColourMap::new(colours).unwrap_or_else(|_| ColourMap::solid(Colour::WHITE))
}

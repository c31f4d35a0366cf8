//! Pure Business Logic Functions
//!
//! Farb- und Slider-Berechnungen ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;

use crate::types::Color;

/// Wandelt einen Farbwinkel (HSV mit S = V = 1) in eine RGB-Farbe
///
/// Winkel außerhalb von 0..360 werden modulo 360 abgebildet.
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use playground_core::hsv_to_rgb;
/// assert_eq!(hsv_to_rgb(0.0), RGB8 { r: 255, g: 0, b: 0 });     // Rot
/// assert_eq!(hsv_to_rgb(120.0), RGB8 { r: 0, g: 255, b: 0 });   // Grün
/// assert_eq!(hsv_to_rgb(240.0), RGB8 { r: 0, g: 0, b: 255 });   // Blau
/// ```
pub fn hsv_to_rgb(hue: f32) -> Color {
    let mut hue = hue % 360.0;
    if hue < 0.0 {
        hue += 360.0;
    }

    let chroma = 1.0_f32;
    let sector = (hue / 60.0) % 2.0 - 1.0;
    let x = chroma * (1.0 - if sector < 0.0 { -sector } else { sector });

    let (r, g, b) = if hue < 60.0 {
        (chroma, x, 0.0)
    } else if hue < 120.0 {
        (x, chroma, 0.0)
    } else if hue < 180.0 {
        (0.0, chroma, x)
    } else if hue < 240.0 {
        (0.0, x, chroma)
    } else if hue < 300.0 {
        (x, 0.0, chroma)
    } else {
        (chroma, 0.0, x)
    };

    // `as u8` schneidet ab und sättigt bei 0..=255
    RGB8 {
        r: (r * 255.0) as u8,
        g: (g * 255.0) as u8,
        b: (b * 255.0) as u8,
    }
}

/// Bildet einen Slider-Rohwert (0..=`max`) auf einen Farbwinkel 0..=360° ab
pub fn slider_to_hue(raw: u16, max: u16) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (raw as f32 / max as f32) * 360.0
}

/// Slider gilt als bewegt, wenn die Differenz die Rauschschwelle übersteigt
pub fn slider_moved(previous: u16, current: u16, threshold: u16) -> bool {
    previous.abs_diff(current) > threshold
}

/// Farbrad für Regenbogen-Animationen (Position 0..=255)
pub fn color_wheel(pos: u8) -> Color {
    match pos {
        0..=84 => RGB8 {
            r: pos * 3,
            g: 255 - pos * 3,
            b: 0,
        },
        85..=169 => {
            let pos = pos - 85;
            RGB8 {
                r: 255 - pos * 3,
                g: 0,
                b: pos * 3,
            }
        }
        _ => {
            let pos = pos - 170;
            RGB8 {
                r: 0,
                g: pos * 3,
                b: 255 - pos * 3,
            }
        }
    }
}

/// Dimmt eine Farbe auf `level`/255
pub fn dim(color: Color, level: u8) -> Color {
    let scale = |c: u8| ((c as u16 * level as u16) / 255) as u8;
    RGB8 {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}

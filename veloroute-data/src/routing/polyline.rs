//! Decoder for encoded polylines at six decimal places.
//!
//! Valhalla encodes trip shapes in the Google polyline format with a
//! precision of 1e6 rather than the usual 1e5. Each point is a pair of
//! zig-zag varints (latitude, then longitude) holding the delta from the
//! previous point.

use thiserror::Error;
use veloroute_core::Coordinate;

const PRECISION: f64 = 1e6;

/// Errors returned by [`decode_polyline6`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The input stopped in the middle of a point.
    #[error("encoded shape ends inside a point at byte {offset}")]
    Truncated {
        /// Byte offset where more input was expected.
        offset: usize,
    },
    /// A byte outside the polyline alphabet was found.
    #[error("invalid shape character {found:?} at byte {offset}")]
    InvalidCharacter {
        /// Byte offset of the character.
        offset: usize,
        /// The offending character.
        found: char,
    },
    /// A value needed more bits than a coordinate can hold.
    #[error("encoded value starting before byte {offset} is too long")]
    Overflow {
        /// Byte offset where the value became too long.
        offset: usize,
    },
}

/// Decode a precision-6 polyline into latitude-first coordinates.
///
/// # Errors
///
/// Returns a [`PolylineError`] when the input is not a well-formed polyline.
///
/// # Examples
/// ```
/// use veloroute_core::Coordinate;
/// use veloroute_data::routing::decode_polyline6;
///
/// let points = decode_polyline6("_izlhA~rlgdF_{geC~ywl@")?;
/// assert_eq!(points, vec![Coordinate::new(38.5, -120.2), Coordinate::new(40.7, -120.95)]);
/// # Ok::<(), veloroute_data::routing::PolylineError>(())
/// ```
pub fn decode_polyline6(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut offset = 0;
    let mut lat = 0_i64;
    let mut lng = 0_i64;
    let mut points = Vec::new();
    while offset < bytes.len() {
        lat = lat.saturating_add(next_delta(bytes, &mut offset)?);
        lng = lng.saturating_add(next_delta(bytes, &mut offset)?);
        points.push(Coordinate::new(to_degrees(lat), to_degrees(lng)));
    }
    Ok(points)
}

fn next_delta(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let mut value = 0_i64;
    let mut shift = 0_u32;
    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(PolylineError::Truncated { offset: *offset });
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                offset: *offset,
                found: char::from(byte),
            });
        }
        if shift > 58 {
            return Err(PolylineError::Overflow { offset: *offset });
        }
        *offset += 1;
        let chunk = i64::from(byte - 63);
        value |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    Ok(if value & 1 == 1 {
        !(value >> 1)
    } else {
        value >> 1
    })
}

// Fixed-point degrees stay far below 2^53, so the conversion is exact.
fn to_degrees(value: i64) -> f64 {
    value as f64 / PRECISION
}

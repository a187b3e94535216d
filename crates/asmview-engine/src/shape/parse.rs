//! Text formats used by the command line front end.
//!
//! Numbers are separated by whitespace or commas. `#` starts a comment that runs
//! to the end of the line.

use crate::coords::Point;
use crate::error::{Result, ShapeDataError};

use super::{ensure_finite, Shape};

/// Parses a flat `[x1..xN, y1..yN]` vector.
pub fn parse_flat(src: &str) -> Result<Shape> {
    let values = src
        .lines()
        .flat_map(tokens)
        .map(parse_number)
        .collect::<Result<Vec<_>>>()?;
    Shape::from_flat(&values)
}

/// Parses one `x y` pair per non-empty line. Coordinates must be finite.
pub fn parse_points(src: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (n, line) in src.lines().enumerate() {
        let values = tokens(line).map(parse_number).collect::<Result<Vec<_>>>()?;
        match values.as_slice() {
            [] => continue,
            [x, y] => points.push(Point::new(*x, *y)),
            other => {
                return Err(ShapeDataError::NotAPair {
                    line: n + 1,
                    count: other.len(),
                }
                .into());
            }
        }
    }
    ensure_finite(&points)?;
    Ok(points)
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    let content = line.split('#').next().unwrap_or("");
    content
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
}

fn parse_number(token: &str) -> Result<f64> {
    token.parse::<f64>().map_err(|_| {
        ShapeDataError::NotANumber {
            token: token.to_string(),
        }
        .into()
    })
}

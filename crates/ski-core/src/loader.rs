//! Grid loading from disk.
//!
//! Text format: a `height width` header line, then `height` lines of `width`
//! whitespace-separated integers. Blank lines are ignored anywhere. Files with
//! a `.json` extension are read as a serialised [`HeightField`] instead.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::heightfield::HeightField;

/// The two failure classes a caller has to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridErrorKind {
    /// The input could not be located or opened.
    SourceNotFound,
    /// The input was readable but not a well-formed integer grid.
    MalformedNumericData,
}

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cannot open grid source {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is not valid UTF-8 after byte {offset}")]
    Encoding { offset: usize },

    #[error("input is empty, expected a `height width` header")]
    MissingHeader,

    #[error("line {line}: header must hold exactly two values, found {found}")]
    HeaderArity { line: usize, found: usize },

    #[error("line {line}: expected a positive dimension, found {token:?}")]
    BadDimension { line: usize, token: String },

    #[error("invalid grid dimensions {height}x{width}")]
    Dimensions { height: usize, width: usize },

    #[error("line {line}: expected an integer, found {token:?}")]
    NotAnInteger { line: usize, token: String },

    #[error("line {line}: row {row} has {found} values, expected {expected}")]
    RowWidth {
        line: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("input ends after {found} rows, expected {expected}")]
    MissingRows { expected: usize, found: usize },

    #[error("line {line}: unexpected data after the last row")]
    TrailingData { line: usize },

    #[error("heightfield holds {found} values, expected {expected}")]
    Shape { expected: usize, found: usize },

    #[error("invalid heightfield JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridError {
    pub fn kind(&self) -> GridErrorKind {
        match self {
            GridError::Open { .. } => GridErrorKind::SourceNotFound,
            _ => GridErrorKind::MalformedNumericData,
        }
    }
}

/// Read a grid from `path`, choosing the format by extension.
pub fn load_grid(path: impl AsRef<Path>) -> Result<HeightField, GridError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| GridError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| GridError::Encoding {
        offset: e.utf8_error().valid_up_to(),
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let hf = if is_json { parse_json(&text)? } else { parse_grid(&text)? };

    info!(
        path = %path.display(),
        height = hf.height,
        width = hf.width,
        min = hf.min_elevation(),
        max = hf.max_elevation(),
        "loaded grid"
    );
    Ok(hf)
}

/// Parse the whitespace-separated text format.
pub fn parse_grid(text: &str) -> Result<HeightField, GridError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (header_line, header) = lines.next().ok_or(GridError::MissingHeader)?;
    let (height, width) = parse_header(header_line, header)?;
    let cells = height
        .checked_mul(width)
        .ok_or(GridError::Dimensions { height, width })?;

    let mut data = Vec::new();
    for row in 0..height {
        let (line, row_text) = lines.next().ok_or(GridError::MissingRows {
            expected: height,
            found: row,
        })?;
        let before = data.len();
        for token in row_text.split_whitespace() {
            let value = token.parse::<i32>().map_err(|_| GridError::NotAnInteger {
                line,
                token: token.to_string(),
            })?;
            data.push(value);
        }
        let found = data.len() - before;
        if found != width {
            return Err(GridError::RowWidth {
                line,
                row,
                expected: width,
                found,
            });
        }
    }

    if let Some((line, _)) = lines.next() {
        return Err(GridError::TrailingData { line });
    }

    debug!(cells, "parsed text grid");
    Ok(HeightField::new(width, height, data))
}

/// Parse a serialised [`HeightField`], checking that its shape is consistent.
pub fn parse_json(text: &str) -> Result<HeightField, GridError> {
    let hf: HeightField = serde_json::from_str(text)?;
    if hf.width == 0 || hf.height == 0 {
        return Err(GridError::Dimensions {
            height: hf.height,
            width: hf.width,
        });
    }
    let expected = hf
        .width
        .checked_mul(hf.height)
        .ok_or(GridError::Dimensions {
            height: hf.height,
            width: hf.width,
        })?;
    if hf.data.len() != expected {
        return Err(GridError::Shape {
            expected,
            found: hf.data.len(),
        });
    }
    Ok(hf)
}

fn parse_header(line: usize, text: &str) -> Result<(usize, usize), GridError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(GridError::HeaderArity {
            line,
            found: tokens.len(),
        });
    }
    let dim = |token: &str| match token.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(GridError::BadDimension {
            line,
            token: token.to_string(),
        }),
    };
    Ok((dim(tokens[0])?, dim(tokens[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classic_map() {
        let text = "4 4\n4 8 7 3\n2 5 9 3\n6 3 2 5\n4 4 1 6\n";
        let hf = parse_grid(text).unwrap();
        assert_eq!((hf.height, hf.width), (4, 4));
        assert_eq!(hf.get(1, 2), 9);
        assert_eq!(hf.get(3, 3), 6);
    }

    #[test]
    fn tolerates_blank_lines_and_extra_spacing() {
        let text = "\n  2   3 \n1 2 3\n\n  -4\t5 6\n\n";
        let hf = parse_grid(text).unwrap();
        assert_eq!(hf.data, vec![1, 2, 3, -4, 5, 6]);
    }

    #[test]
    fn short_row_is_malformed() {
        let err = parse_grid("3 3\n1 2 3\n4 5\n7 8 9\n").unwrap_err();
        assert_eq!(err.kind(), GridErrorKind::MalformedNumericData);
        assert!(
            matches!(err, GridError::RowWidth { line: 3, row: 1, expected: 3, found: 2 }),
            "got {err:?}"
        );
    }

    #[test]
    fn long_row_is_malformed() {
        let err = parse_grid("1 2\n1 2 3\n").unwrap_err();
        assert!(matches!(err, GridError::RowWidth { found: 3, .. }), "got {err:?}");
    }

    #[test]
    fn non_integer_token_is_malformed() {
        let err = parse_grid("1 3\n1 x 3\n").unwrap_err();
        assert_eq!(err.kind(), GridErrorKind::MalformedNumericData);
        assert!(matches!(err, GridError::NotAnInteger { line: 2, ref token } if token == "x"));
    }

    #[test]
    fn missing_rows_are_malformed() {
        let err = parse_grid("3 1\n1\n2\n").unwrap_err();
        assert!(matches!(err, GridError::MissingRows { expected: 3, found: 2 }));
    }

    #[test]
    fn header_problems_are_malformed() {
        assert!(matches!(parse_grid(""), Err(GridError::MissingHeader)));
        assert!(matches!(parse_grid("3\n1 2 3\n"), Err(GridError::HeaderArity { found: 1, .. })));
        assert!(matches!(parse_grid("0 3\n"), Err(GridError::BadDimension { .. })));
        assert!(matches!(parse_grid("-1 3\n"), Err(GridError::BadDimension { .. })));
    }

    #[test]
    fn trailing_rows_are_rejected() {
        let err = parse_grid("1 1\n5\n6\n").unwrap_err();
        assert!(matches!(err, GridError::TrailingData { line: 3 }));
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = load_grid("definitely/not/here/map.txt").unwrap_err();
        assert_eq!(err.kind(), GridErrorKind::SourceNotFound);
        assert!(err.to_string().contains("map.txt"));
    }

    #[test]
    fn invalid_utf8_is_malformed_not_missing() {
        let dir = std::env::temp_dir().join(format!("ski-loader-utf8-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("map.txt");
        fs::write(&path, b"2 2\n4 \xff\n2 1\n").unwrap();

        let err = load_grid(&path).unwrap_err();
        assert_eq!(err.kind(), GridErrorKind::MalformedNumericData);
        assert!(matches!(err, GridError::Encoding { offset: 6 }), "got {err:?}");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn json_round_trip_and_shape_check() {
        let hf = HeightField::from_rows(&[[1, 2], [3, 4]]);
        let json = serde_json::to_string(&hf).unwrap();
        assert_eq!(parse_json(&json).unwrap(), hf);

        let bad = r#"{"data":[1,2,3],"width":2,"height":2}"#;
        assert!(matches!(parse_json(bad), Err(GridError::Shape { expected: 4, found: 3 })));
        assert_eq!(
            parse_json("{not json").unwrap_err().kind(),
            GridErrorKind::MalformedNumericData
        );
    }

    #[test]
    fn load_grid_reads_text_and_json_files() {
        let dir = std::env::temp_dir().join(format!("ski-loader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let txt = dir.join("map.txt");
        fs::write(&txt, "2 2\n4 3\n2 1\n").unwrap();
        let from_text = load_grid(&txt).unwrap();

        let json = dir.join("map.JSON");
        fs::write(&json, serde_json::to_string(&from_text).unwrap()).unwrap();
        let from_json = load_grid(&json).unwrap();

        assert_eq!(from_text, from_json);
        fs::remove_dir_all(&dir).unwrap();
    }
}

//! Decoding of the JHF glyph line format.
//!
//! Each glyph occupies one line with fixed columns:
//!
//! | columns | content |
//! |---------|---------|
//! | 0..5    | glyph number, right-justified (ignored for keying) |
//! | 5..8    | pair count, right-justified, including the extents pair |
//! | 8       | left extent |
//! | 9       | right extent |
//! | 10..    | coordinate pairs, x then y |
//!
//! Every data character encodes `ord(c) - ord('R')`. The pair `" R"` lifts
//! the pen. Lines starting with `#` carry a JSON object with font metrics.

use std::collections::BTreeMap;

use hershey_text_core::{Error, FontMetrics, Glyph, LineFault, PackedPoint, Result, Stroke};
use serde::Deserialize;

use crate::FontTable;

/// Character every coordinate is biased against.
const BIAS: char = 'R';

/// Columns taken by the glyph number, pair count and extents.
const HEADER_COLUMNS: usize = 10;

/// Character codes assigned to glyph lines start here unless told otherwise.
pub const FIRST_CHARACTER_CODE: u32 = 32;

/// How tolerant decoding is, and where character codes start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Abort the whole load on the first bad line instead of skipping it.
    pub strict: bool,
    /// Code given to the first glyph line; following lines count up from it.
    pub first_code: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            first_code: FIRST_CHARACTER_CODE,
        }
    }
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

/// A line that was skipped while decoding leniently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    /// A glyph line was malformed. Its code resolves as absent.
    Glyph {
        line: usize,
        code: u32,
        fault: LineFault,
    },
    /// A `#` header line was not valid JSON. Metrics keep their previous values.
    Header { line: usize, message: String },
}

impl LineIssue {
    /// 1-based line number of the skipped line.
    pub fn line(&self) -> usize {
        match self {
            Self::Glyph { line, .. } | Self::Header { line, .. } => *line,
        }
    }
}

type LineResult<T> = std::result::Result<T, LineFault>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrokeCommand {
    Point(PackedPoint),
    PenUp,
}

#[derive(Debug, Default, Deserialize)]
struct Header {
    define_cap_line: Option<f64>,
    define_base_line: Option<f64>,
    define_bottom_line: Option<f64>,
}

impl Header {
    fn apply(&self, metrics: &mut FontMetrics) {
        if let Some(cap) = self.define_cap_line {
            metrics.cap_line = cap;
        }
        if let Some(base) = self.define_base_line {
            metrics.base_line = base;
        }
        if let Some(bottom) = self.define_bottom_line {
            metrics.bottom_line = bottom;
        }
    }
}

fn decode_char(column: usize, character: char) -> LineResult<i8> {
    i8::try_from(i64::from(u32::from(character)) - i64::from(u32::from(BIAS)))
        .map_err(|_| LineFault::CharacterOutOfRange { column, character })
}

fn decode_pair(column: usize, x: char, y: char) -> LineResult<StrokeCommand> {
    if (x, y) == (' ', BIAS) {
        return Ok(StrokeCommand::PenUp);
    }

    Ok(StrokeCommand::Point(PackedPoint::new(
        decode_char(column, x)?,
        decode_char(column + 1, y)?,
    )))
}

/// Split stroke commands at every pen-up. `k` pen-ups give `k + 1` strokes,
/// empty ones included; no commands at all give no strokes.
fn assemble_strokes(commands: &[StrokeCommand]) -> Vec<Stroke> {
    if commands.is_empty() {
        return Vec::new();
    }

    commands
        .split(|command| *command == StrokeCommand::PenUp)
        .map(|run| {
            run.iter()
                .filter_map(|command| match command {
                    StrokeCommand::Point(point) => Some(*point),
                    StrokeCommand::PenUp => None,
                })
                .collect()
        })
        .collect()
}

/// Parse a single line of the Hershey format into a glyph stored under `code`.
///
/// The glyph number embedded in the line is kept as [Glyph::source_id] but
/// never trusted as a key.
pub fn parse_glyph_line(line: &str, code: u32) -> LineResult<Glyph> {
    let chars: Vec<char> = line.trim_end().chars().collect();

    if chars.len() < HEADER_COLUMNS {
        return Err(LineFault::TooShort { len: chars.len() });
    }

    let id: String = chars[0..5].iter().collect();
    let source_id = id.trim().parse().ok();

    let count: String = chars[5..8].iter().collect();
    let declared = count
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| LineFault::InvalidPointCount {
            field: count.clone(),
        })?;

    // the extents pair counts towards the declared total
    let data = &chars[8..];
    let available = data.len() / 2;
    if data.len() % 2 != 0 || available != declared {
        return Err(LineFault::PointCountMismatch {
            declared,
            available,
        });
    }

    let left = decode_char(8, chars[8])?;
    let right = decode_char(9, chars[9])?;
    if left > right {
        return Err(LineFault::InvertedExtents { left, right });
    }

    let commands = chars[HEADER_COLUMNS..]
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| decode_pair(HEADER_COLUMNS + 2 * i, pair[0], pair[1]))
        .collect::<LineResult<Vec<_>>>()?;

    Ok(Glyph {
        code,
        source_id,
        left,
        right,
        strokes: assemble_strokes(&commands),
    })
}

/// Decode a sequence of JHF lines into a [FontTable] called `name`.
///
/// Glyph lines get consecutive character codes starting at
/// [DecodeOptions::first_code]; a skipped line still uses up its code.
pub fn decode_lines<I, S>(name: &str, lines: I, options: &DecodeOptions) -> Result<FontTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut glyphs = BTreeMap::new();
    let mut metrics = FontMetrics::default();
    let mut issues = Vec::new();
    let mut code = options.first_code;

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let lineno = idx + 1;

        if let Some(json) = line.strip_prefix('#') {
            match serde_json::from_str::<Header>(json.trim()) {
                Ok(header) => header.apply(&mut metrics),
                Err(source) => {
                    if options.strict {
                        return Err(Error::MalformedHeader {
                            line: lineno,
                            source,
                        });
                    }
                    log::warn!("{}: skipping header on line {}: {}", name, lineno, source);
                    issues.push(LineIssue::Header {
                        line: lineno,
                        message: source.to_string(),
                    });
                }
            }
            continue;
        }

        match parse_glyph_line(line, code) {
            Ok(glyph) => {
                glyphs.insert(code, glyph);
            }
            Err(fault) => {
                if options.strict {
                    return Err(Error::MalformedGlyphLine {
                        line: lineno,
                        fault,
                    });
                }
                log::warn!(
                    "{}: skipping glyph for code {} on line {}: {}",
                    name,
                    code,
                    lineno,
                    fault
                );
                issues.push(LineIssue::Glyph {
                    line: lineno,
                    code,
                    fault,
                });
            }
        }

        code = code.saturating_add(1);
    }

    log::debug!(
        "Decoded font '{}': {} glyphs, {} skipped lines",
        name,
        glyphs.len(),
        issues.len()
    );

    Ok(FontTable::from_parts(name, glyphs, metrics, issues))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i8, y: i8) -> PackedPoint {
        PackedPoint::new(x, y)
    }

    #[test]
    fn test_two_point_glyph() {
        let glyph = parse_glyph_line("12345  3RRRRKK", 32).unwrap();
        assert_eq!(glyph.code, 32);
        assert_eq!(glyph.source_id, Some(12345));
        assert_eq!((glyph.left, glyph.right), (0, 0));
        assert_eq!(glyph.strokes, vec![vec![p(0, 0), p(-7, -7)]]);
    }

    #[test]
    fn test_space_has_extents_and_no_strokes() {
        let glyph = parse_glyph_line("12345  1JZ", 32).unwrap();
        assert_eq!((glyph.left, glyph.right), (-8, 8));
        assert!(glyph.strokes.is_empty());
    }

    #[test]
    fn test_pen_up_splits_strokes() {
        // the '!' glyph from futural: two strokes separated by one pen-up
        let glyph = parse_glyph_line("12345  9MWRFRT RRYQZR[SZRY", 33).unwrap();
        assert_eq!(glyph.strokes.len(), 2);
        assert_eq!(glyph.strokes[0], vec![p(0, -12), p(0, 2)]);
        assert_eq!(
            glyph.strokes[1],
            vec![p(0, 7), p(-1, 8), p(0, 9), p(1, 8), p(0, 7)]
        );
    }

    #[test]
    fn test_consecutive_pen_ups_keep_empty_stroke() {
        let glyph = parse_glyph_line("    1  5JZRR R RSS", 32).unwrap();
        assert_eq!(glyph.strokes, vec![vec![p(0, 0)], vec![], vec![p(1, 1)]]);
    }

    #[test]
    fn test_duplicate_points_preserved() {
        let glyph = parse_glyph_line("    1  3JZRRRR", 32).unwrap();
        assert_eq!(glyph.strokes, vec![vec![p(0, 0), p(0, 0)]]);
    }

    #[test]
    fn test_embedded_glyph_number_is_optional() {
        let glyph = parse_glyph_line("       1JZ", 40).unwrap();
        assert_eq!(glyph.source_id, None);
        assert_eq!(glyph.code, 40);
    }

    #[test]
    fn test_short_line_rejected() {
        assert_eq!(
            parse_glyph_line("", 32),
            Err(LineFault::TooShort { len: 0 })
        );
        assert_eq!(
            parse_glyph_line("12345  1J", 32),
            Err(LineFault::TooShort { len: 9 })
        );
    }

    #[test]
    fn test_unpadded_columns_rejected() {
        // id and count squeezed together leave too few fixed columns
        assert_eq!(
            parse_glyph_line("2 R  RRKK", 32),
            Err(LineFault::TooShort { len: 9 })
        );
        assert!(parse_glyph_line("12345  3RRRRKK", 32).is_ok());
    }

    #[test]
    fn test_count_mismatch_rejected() {
        assert_eq!(
            parse_glyph_line("12345  4RRRRKK", 32),
            Err(LineFault::PointCountMismatch {
                declared: 4,
                available: 3
            })
        );
        assert!(matches!(
            parse_glyph_line("12345  3RRRRKKQ", 32),
            Err(LineFault::PointCountMismatch { .. })
        ));
    }

    #[test]
    fn test_bad_count_field_rejected() {
        assert!(matches!(
            parse_glyph_line("12345 x3RRRRKK", 32),
            Err(LineFault::InvalidPointCount { .. })
        ));
        assert!(matches!(
            parse_glyph_line("12345  0RR", 32),
            Err(LineFault::InvalidPointCount { .. })
        ));
    }

    #[test]
    fn test_unencodable_character_rejected() {
        assert_eq!(
            parse_glyph_line("12345  2JZR\u{e9}", 32),
            Err(LineFault::CharacterOutOfRange {
                column: 11,
                character: '\u{e9}'
            })
        );
    }

    #[test]
    fn test_inverted_extents_rejected() {
        assert_eq!(
            parse_glyph_line("12345  1ZJ", 32),
            Err(LineFault::InvertedExtents { left: 8, right: -8 })
        );
    }

    #[test]
    fn test_codes_are_sequential_from_first_code() {
        let table = decode_lines(
            "test",
            ["99999  1JZ", "00001  1KY", "#{}", "55555  1LX"],
            &DecodeOptions::default(),
        )
        .unwrap();

        let codes: Vec<u32> = table.glyphs().map(|g| g.code).collect();
        assert_eq!(codes, vec![32, 33, 34]);
        assert_eq!(table.lookup(34).unwrap().left, -6);
    }

    #[test]
    fn test_lenient_decode_skips_bad_line() {
        let table = decode_lines(
            "test",
            ["12345  1JZ", "garbage", "12345  3RRRRKK"],
            &DecodeOptions::default(),
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.lookup(33).is_none());
        assert!(table.lookup(34).is_some());
        assert_eq!(
            table.issues(),
            &[LineIssue::Glyph {
                line: 2,
                code: 33,
                fault: LineFault::TooShort { len: 7 },
            }]
        );
    }

    #[test]
    fn test_strict_decode_aborts() {
        let result = decode_lines(
            "test",
            ["12345  1JZ", "garbage", "12345  3RRRRKK"],
            &DecodeOptions::strict(),
        );

        assert!(matches!(
            result,
            Err(Error::MalformedGlyphLine { line: 2, .. })
        ));
    }

    #[test]
    fn test_header_sets_metrics() {
        let table = decode_lines(
            "test",
            [
                r#"#{"define_cap_line": -14, "define_bottom_line": 21.0}"#,
                "12345  1JZ",
            ],
            &DecodeOptions::default(),
        )
        .unwrap();

        assert_eq!(table.metrics().cap_line, -14.0);
        assert_eq!(table.metrics().base_line, 9.0);
        assert_eq!(table.metrics().bottom_line, 21.0);
        assert_eq!(table.lookup(32).map(|g| g.code), Some(32));
    }

    #[test]
    fn test_malformed_header() {
        let lines = ["#{'define_cap_line': -12}", "12345  1JZ"];

        let table = decode_lines("test", lines, &DecodeOptions::default()).unwrap();
        assert_eq!(table.metrics(), &FontMetrics::default());
        assert_eq!(table.issues().len(), 1);
        assert_eq!(table.issues()[0].line(), 1);
        assert!(table.lookup(32).is_some());

        let strict = decode_lines("test", lines, &DecodeOptions::strict());
        assert!(matches!(strict, Err(Error::MalformedHeader { line: 1, .. })));
    }

    #[test]
    fn test_crlf_lines() {
        let table = decode_lines(
            "test",
            "12345  1JZ\r\n12345  3RRRRKK\r\n".lines(),
            &DecodeOptions::strict(),
        )
        .unwrap();
        assert_eq!(table.len(), 2);
    }
}

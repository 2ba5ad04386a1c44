//! Text renderers for `zonegen`

use clap::ValueEnum;
use serde::Serialize;
use zone_core::{MazeStats, WallState, Zone};

/// Output format for a generated zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One symbol per cell
    #[default]
    Ascii,
    /// Wall sprite codes, floor as `.`
    Keys,
    /// Dimensions, stats and ascii rows as JSON
    Json,
}

/// JSON document written by `--format json`
#[derive(Debug, Serialize)]
pub struct ZoneReport<'a> {
    pub width: usize,
    pub height: usize,
    pub seed: &'a str,
    pub stats: MazeStats,
    pub rows: Vec<String>,
}

/// Rows of wall symbols, top to bottom
pub fn ascii_rows(zone: &Zone) -> Vec<String> {
    zone.walls()
        .rows()
        .map(|row| row.iter().map(|s| s.symbol()).collect())
        .collect()
}

/// Rows of sprite codes; non-wall cells print as `.`
pub fn key_rows(zone: &Zone) -> Vec<String> {
    (0..zone.height() as i32)
        .map(|y| {
            (0..zone.width() as i32)
                .map(|x| match zone.get(x, y) {
                    WallState::Wall => zone.wall_direction(x, y).code(),
                    _ => ".",
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Render `zone` in `format`, newline terminated
pub fn render(
    zone: &Zone,
    format: OutputFormat,
    seed: &str,
    stats: MazeStats,
) -> serde_json::Result<String> {
    let mut out = match format {
        OutputFormat::Ascii => ascii_rows(zone).join("\n"),
        OutputFormat::Keys => key_rows(zone).join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&ZoneReport {
            width: zone.width(),
            height: zone.height(),
            seed,
            stats,
            rows: ascii_rows(zone),
        })?,
    };
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross() -> Zone {
        let mut zone = Zone::new(3, 3);
        for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2), (1, 1)] {
            zone.set(x, y, WallState::Wall);
        }
        zone
    }

    #[test]
    fn test_ascii_rows() {
        assert_eq!(ascii_rows(&cross()), vec!["#.#", ".#.", "#.#"]);
    }

    #[test]
    fn test_key_rows() {
        let rows = key_rows(&cross());
        assert_eq!(rows[1], ". pillar .");
        // Corner (0, 0) sees floor east and south, and the wall at (1, 1)
        assert_eq!(rows[0], "dr . dl");
    }

    #[test]
    fn test_render_json() {
        let out = render(&cross(), OutputFormat::Json, "abc", MazeStats::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["width"], 3);
        assert_eq!(value["seed"], "abc");
        assert_eq!(value["rows"][1], ".#.");
        assert_eq!(value["stats"]["doors_placed"], 0);
    }

    #[test]
    fn test_render_ascii_ends_with_newline() {
        let out = render(&cross(), OutputFormat::Ascii, "", MazeStats::default()).unwrap();
        assert_eq!(out, "#.#\n.#.\n#.#\n");
    }
}

use std::ops::Range;

use sandlot_gen::{TileGrid, TileKind};

/// Text rendering of a window of the level, one glyph per tile. The window is
/// clamped to the grid.
pub fn render(grid: &TileGrid, rows: Range<usize>, cols: Range<usize>) -> String {
    let rows = rows.start.min(grid.height())..rows.end.min(grid.height());
    let cols = cols.start.min(grid.width())..cols.end.min(grid.width());

    let mut out = String::with_capacity(rows.len() * (cols.len() + 1));
    for row in grid.rows().skip(rows.start).take(rows.len()) {
        let line: String = row[cols.clone()].iter().map(|t| t.glyph()).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn parse_range(s: &str) -> Result<Range<usize>, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got '{s}'"))?;
    let start: usize = start.trim().parse().map_err(|e| format!("bad range start: {e}"))?;
    let end: usize = end.trim().parse().map_err(|e| format!("bad range end: {e}"))?;
    if end < start {
        return Err(format!("range end {end} is before start {start}"));
    }
    Ok(start..end)
}

pub fn parse_pair<T: std::str::FromStr>(s: &str) -> Result<(T, T), String>
where
    T::Err: std::fmt::Display,
{
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let a = a.trim().parse().map_err(|e| format!("bad X: {e}"))?;
    let b = b.trim().parse().map_err(|e| format!("bad Y: {e}"))?;
    Ok((a, b))
}

/// Non-zero tile counts, in `TileKind::ALL` order.
pub fn tile_counts(grid: &TileGrid) -> Vec<(TileKind, usize)> {
    let mut counts = [0usize; TileKind::ALL.len()];
    for tile in grid.cells() {
        if let Some(i) = TileKind::ALL.iter().position(|k| k == tile) {
            counts[i] += 1;
        }
    }
    TileKind::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .collect()
}

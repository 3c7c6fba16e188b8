use crate::tile::TileKind;

/// Row-major tile storage, `height` rows of `width` tiles. Row 0 is the top
/// of the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<TileKind>,
}

impl TileGrid {
    /// Allocate a grid filled with `TileKind::Empty`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![TileKind::Empty; width * height],
        }
    }

    /// Build a grid from row-major cells. Returns `None` when the cell count
    /// does not match the dimensions.
    pub fn from_cells(width: usize, height: usize, cells: Vec<TileKind>) -> Option<Self> {
        if cells.len() != width * height {
            return None;
        }
        Some(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.idx(x, y).is_some()
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileKind> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Write one tile. Out-of-range coordinates are ignored and reported by
    /// returning `false`.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, kind: TileKind) -> bool {
        match self.idx(x, y) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &[TileKind] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        // chunks_exact panics on zero, and a zero-width grid has no rows anyway
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Topmost solid row of column `x`, if any.
    pub fn column_surface(&self, x: i32) -> Option<i32> {
        (0..self.height as i32).find(|&y| self.get(x, y).is_some_and(TileKind::is_solid))
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }
}

/// Ground surface row per column. Computed once per level and shared by every
/// later generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightProfile(Vec<i32>);

impl HeightProfile {
    pub fn new(rows: Vec<i32>) -> Self {
        Self(rows)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Surface row of column `x`, `None` past either edge.
    pub fn get(&self, x: i32) -> Option<i32> {
        usize::try_from(x).ok().and_then(|x| self.0.get(x).copied())
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = TileGrid::new(4, 3);
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.count(TileKind::Empty), 12);
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn test_set_rejects_out_of_bounds() {
        let mut grid = TileGrid::new(4, 3);
        assert!(grid.set(3, 2, TileKind::Stone));
        assert!(!grid.set(4, 0, TileKind::Stone));
        assert!(!grid.set(0, 3, TileKind::Stone));
        assert!(!grid.set(-1, 0, TileKind::Stone));
        assert!(!grid.set(0, -1, TileKind::Stone));
        assert_eq!(grid.count(TileKind::Stone), 1);
        assert_eq!(grid.get(3, 2), Some(TileKind::Stone));
        assert_eq!(grid.get(-1, 2), None);
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = TileGrid::new(3, 2);
        grid.set(1, 1, TileKind::Water);
        assert_eq!(grid.cells()[4], TileKind::Water);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows[1][1], TileKind::Water);
    }

    #[test]
    fn test_column_surface() {
        let mut grid = TileGrid::new(2, 5);
        grid.set(0, 3, TileKind::Grass);
        grid.set(0, 4, TileKind::Dirt);
        assert_eq!(grid.column_surface(0), Some(3));
        assert_eq!(grid.column_surface(1), None);
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert!(TileGrid::from_cells(2, 2, vec![TileKind::Dirt; 3]).is_none());
        let grid = TileGrid::from_cells(2, 2, vec![TileKind::Dirt; 4]).unwrap();
        assert_eq!(grid.count(TileKind::Dirt), 4);
    }

    #[test]
    fn test_profile_lookup() {
        let profile = HeightProfile::new(vec![10, 11, 12]);
        assert_eq!(profile.get(1), Some(11));
        assert_eq!(profile.get(3), None);
        assert_eq!(profile.get(-1), None);
    }
}

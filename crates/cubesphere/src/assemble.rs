//! Field assembly from per-tile sources, with optional baseline difference.

use tracing::debug;

use crate::error::{CubeSphereError, Result};
use crate::source::FieldInput;
use crate::tile::Field;

/// Reads one level of a variable from every tile into a [`Field`].
///
/// When a baseline is attached, the same variable and level are read from
/// it and subtracted tile by tile.
pub struct FieldAssembler {
    primary: FieldInput,
    baseline: Option<FieldInput>,
}

impl FieldAssembler {
    pub fn new(primary: FieldInput) -> Self {
        Self {
            primary,
            baseline: None,
        }
    }

    /// Attach a baseline; the assembled field becomes `field - baseline`.
    pub fn with_baseline(mut self, baseline: FieldInput) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// Assemble `variable` at the 1-based `level`.
    pub fn assemble(&self, variable: &str, level: usize) -> Result<Field> {
        let level_index = level
            .checked_sub(1)
            .ok_or_else(|| CubeSphereError::invalid_arguments("level is 1-based, got 0"))?;

        let tiles = self.primary.read(variable, level_index)?;
        let field = Field::from_tiles("field assembler", tiles)?;
        debug!(
            variable,
            level,
            layout = self.primary.layout_name(),
            edge = field.edge(),
            "Assembled field"
        );

        let Some(baseline) = &self.baseline else {
            return Ok(field);
        };

        let base_tiles = baseline.read(variable, level_index)?;
        for (tile, slice) in base_tiles.iter().enumerate() {
            if slice.shape() != (field.edge(), field.edge()) {
                return Err(CubeSphereError::shape_mismatch(
                    "baseline assembler",
                    tile,
                    (field.edge(), field.edge()),
                    slice.shape(),
                ));
            }
        }
        let base = Field::from_tiles("baseline assembler", base_tiles)?;
        debug!(variable, level, "Subtracting baseline");

        field.difference(&base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemoryMultiTileSource, MemoryTileSource, TileSource};
    use crate::tile::{TileSlice, TILE_COUNT};

    fn tiles(edge: usize, f: impl Fn(usize, usize, usize) -> f64) -> Vec<TileSlice> {
        (0..TILE_COUNT)
            .map(|t| TileSlice::from_fn(edge, edge, |r, c| f(t, r, c)))
            .collect()
    }

    fn combined(variable: &str, level_index: usize, data: Vec<TileSlice>) -> FieldInput {
        FieldInput::Combined(Box::new(
            MemoryMultiTileSource::new().with_level(variable, level_index, data),
        ))
    }

    #[test]
    fn test_level_is_one_based() {
        let input = combined("T", 2, tiles(2, |t, _, _| t as f64));
        let field = FieldAssembler::new(input).assemble("T", 3).unwrap();
        assert_eq!(field.get(4, 0, 0), 4.0);
    }

    #[test]
    fn test_level_zero_is_invalid() {
        let input = combined("T", 0, tiles(2, |_, _, _| 0.0));
        assert!(matches!(
            FieldAssembler::new(input).assemble("T", 0),
            Err(CubeSphereError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_layouts_are_indistinguishable() {
        let f = |t: usize, r: usize, c: usize| (t * 7 + r * 3 + c) as f64;
        let combined_field = FieldAssembler::new(combined("T", 0, tiles(3, f)))
            .assemble("T", 1)
            .unwrap();

        let sources: Vec<Box<dyn TileSource>> = tiles(3, f)
            .into_iter()
            .map(|slice| {
                Box::new(MemoryTileSource::new().with_slice("T", 0, slice)) as Box<dyn TileSource>
            })
            .collect();
        let per_tile_field = FieldAssembler::new(FieldInput::per_tile(sources).unwrap())
            .assemble("T", 1)
            .unwrap();

        assert_eq!(combined_field, per_tile_field);
    }

    #[test]
    fn test_baseline_difference() {
        let primary = combined("T", 0, tiles(2, |t, r, c| (t + r + c) as f64 * 2.0));
        let baseline = combined("T", 0, tiles(2, |t, r, c| (t + r + c) as f64));
        let assembler = FieldAssembler::new(primary).with_baseline(baseline);
        assert!(assembler.has_baseline());

        let field = assembler.assemble("T", 1).unwrap();
        for t in 0..TILE_COUNT {
            for r in 0..2 {
                for c in 0..2 {
                    assert_eq!(field.get(t, r, c), (t + r + c) as f64);
                }
            }
        }
    }

    #[test]
    fn test_baseline_shape_mismatch_names_tile() {
        let primary = combined("T", 0, tiles(2, |_, _, _| 1.0));
        let mut base = tiles(2, |_, _, _| 1.0);
        base[3] = TileSlice::from_fn(4, 4, |_, _| 1.0);
        let assembler = FieldAssembler::new(primary).with_baseline(combined("T", 0, base));

        match assembler.assemble("T", 1) {
            Err(CubeSphereError::ShapeMismatch { stage, tile, .. }) => {
                assert_eq!(stage, "baseline assembler");
                assert_eq!(tile, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

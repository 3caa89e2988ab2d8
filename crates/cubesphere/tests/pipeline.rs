//! End-to-end tests: assemble -> reduce -> normalize -> mesh.

use cubesphere::{
    build_mesh, build_polygons, reduce, CubeSphereError, FieldAssembler, FieldInput, GridAtlas,
    MemoryMultiTileSource, MemoryTileSource, MemoryVertexSource, Mesh, MeshLayout,
    NormalizationMode, RenderConfig, TileSlice, TileSource, ValueRange, TILE_COUNT,
};
use test_utils::{
    assert_close, constant_tiles, gnomonic_vertices, index_value, indexed_tiles, wave_tiles,
};

fn combined(level_index: usize, tiles: Vec<TileSlice>) -> FieldInput {
    FieldInput::Combined(Box::new(
        MemoryMultiTileSource::new().with_level("T", level_index, tiles),
    ))
}

#[test]
fn test_difference_against_baseline_per_cell() {
    let primary = wave_tiles(6, 10.0);
    let baseline = wave_tiles(6, 3.0);

    let field = FieldAssembler::new(combined(0, primary.clone()))
        .with_baseline(combined(0, baseline.clone()))
        .assemble("T", 1)
        .unwrap();

    for tile in 0..TILE_COUNT {
        for row in 0..6 {
            for col in 0..6 {
                assert_close!(
                    field.get(tile, row, col),
                    primary[tile].get(row, col) - baseline[tile].get(row, col)
                );
            }
        }
    }
}

#[test]
fn test_per_tile_baseline_with_combined_primary() {
    let baseline: Vec<Box<dyn TileSource>> = constant_tiles(2, 1.0)
        .into_iter()
        .map(|slice| {
            Box::new(MemoryTileSource::new().with_slice("T", 4, slice)) as Box<dyn TileSource>
        })
        .collect();

    let field = FieldAssembler::new(combined(4, indexed_tiles(2)))
        .with_baseline(FieldInput::per_tile(baseline).unwrap())
        .assemble("T", 5)
        .unwrap();

    assert_eq!(field.get(3, 1, 1), index_value(3, 1, 1) - 1.0);
}

#[test]
fn test_polygon_threshold_partition() {
    let edge = 8;
    let field = FieldAssembler::new(combined(0, wave_tiles(edge, 5.0)))
        .assemble("T", 1)
        .unwrap();
    let atlas = GridAtlas::new(MemoryVertexSource::new().with_grid(edge, gnomonic_vertices(edge)));
    let grid = atlas.load(edge).unwrap();

    let averaged = reduce(field, 2).unwrap();
    let threshold = 2.0;
    let polygons = build_polygons(&averaged, &grid, threshold).unwrap();

    let visible = averaged
        .field()
        .values()
        .iter()
        .filter(|v| v.abs() >= threshold)
        .count();
    assert_eq!(polygons.len(), visible);
    assert!(polygons.iter().all(|p| p.value.abs() >= threshold));
    assert!(visible < TILE_COUNT * 16, "pattern should hide some cells");
}

#[test]
fn test_polygon_corners_are_degrees() {
    let edge = 4;
    let atlas = GridAtlas::new(MemoryVertexSource::new().with_grid(edge, gnomonic_vertices(edge)));
    let grid = atlas.load(edge).unwrap();
    let field = FieldAssembler::new(combined(0, constant_tiles(edge, 1.0)))
        .assemble("T", 1)
        .unwrap();

    let rendered = build_mesh(field, Some(&grid), &RenderConfig::default()).unwrap();
    let Mesh::Polygons(polygons) = rendered.mesh else {
        panic!("expected polygons");
    };

    assert_eq!(polygons.len(), TILE_COUNT * edge * edge);
    for polygon in &polygons {
        for corner in &polygon.corners {
            assert!(corner.lon.abs() <= 180.0 + 1e-9);
            assert!(corner.lat.abs() <= 90.0 + 1e-9);
        }
    }
    // Center of tile 0 sits on the equator at 0 degrees
    let center = grid.corner(0, edge / 2, edge / 2);
    assert_close!(center.lon, 0.0);
    assert_close!(center.lat, 0.0);
}

#[test]
fn test_build_mesh_centered_range() {
    let edge = 4;
    let tiles = (0..TILE_COUNT)
        .map(|t| {
            TileSlice::from_fn(edge, edge, move |r, _| if t == 1 && r == 0 { -8.0 } else { 3.0 })
        })
        .collect();
    let field = FieldAssembler::new(combined(0, tiles)).assemble("T", 1).unwrap();
    let config = RenderConfig {
        mode: NormalizationMode::Centered,
        layout: MeshLayout::Cross,
        ..Default::default()
    };

    let rendered = build_mesh(field, None, &config).unwrap();
    assert_eq!(rendered.normalizer.range(), ValueRange::new(-8.0, 8.0));
    assert_eq!(rendered.edge, edge);
    assert!(matches!(rendered.mesh, Mesh::Cross(_)));
}

#[test]
fn test_build_mesh_polygons_need_grid() {
    let field = FieldAssembler::new(combined(0, constant_tiles(2, 1.0)))
        .assemble("T", 1)
        .unwrap();
    assert!(matches!(
        build_mesh(field, None, &RenderConfig::default()),
        Err(CubeSphereError::InvalidArguments(_))
    ));
}

#[test]
fn test_build_mesh_rejects_non_dividing_average() {
    let edge = 6;
    let atlas = GridAtlas::new(MemoryVertexSource::new().with_grid(edge, gnomonic_vertices(edge)));
    let grid = atlas.load(edge).unwrap();
    let field = FieldAssembler::new(combined(0, constant_tiles(edge, 1.0)))
        .assemble("T", 1)
        .unwrap();
    let config = RenderConfig {
        average: 4,
        ..Default::default()
    };

    assert!(matches!(
        build_mesh(field, Some(&grid), &config),
        Err(CubeSphereError::InvalidBlockSize { average: 4, edge: 6 })
    ));
}

#[test]
fn test_constant_field_normalizes_to_half() {
    let edge = 2;
    let atlas = GridAtlas::new(MemoryVertexSource::new().with_grid(edge, gnomonic_vertices(edge)));
    let grid = atlas.load(edge).unwrap();
    let field = FieldAssembler::new(combined(0, constant_tiles(edge, 42.0)))
        .assemble("T", 1)
        .unwrap();

    let rendered = build_mesh(field, Some(&grid), &RenderConfig::default()).unwrap();
    assert_eq!(rendered.normalizer.normalize(42.0), 0.5);
}

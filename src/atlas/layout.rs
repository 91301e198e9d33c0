//! Tile placement of atlas regions and pointer hit-testing.

use bevy::prelude::*;

use crate::regions::RegionId;

use super::features::RegionFeature;

#[derive(Debug, Clone)]
pub struct RegionTile {
    pub id: RegionId,
    pub display_name: String,
    pub rect: Rect,
}

/// Regions of the loaded atlas, in feature order
#[derive(Resource, Debug, Default)]
pub struct RegionAtlas {
    pub tiles: Vec<RegionTile>,
}

impl RegionAtlas {
    /// Lay the features out row by row on a near-square grid centred on the origin.
    pub fn from_features(features: Vec<RegionFeature>, tile_size: f32) -> Self {
        let count = features.len();
        if count == 0 {
            return Self::default();
        }

        let columns = (count as f32).sqrt().ceil() as usize;
        let rows = count.div_ceil(columns);
        let origin = Vec2::new(
            -(columns as f32) * tile_size / 2.0,
            rows as f32 * tile_size / 2.0,
        );

        let tiles = features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| {
                let column = (index % columns) as f32;
                let row = (index / columns) as f32;
                let min = origin + Vec2::new(column * tile_size, -(row + 1.0) * tile_size);
                RegionTile {
                    id: feature.id,
                    display_name: feature.display_name,
                    rect: Rect::from_corners(min, min + Vec2::splat(tile_size)),
                }
            })
            .collect();

        Self { tiles }
    }

    /// The region under a world-space point, if any
    pub fn hit_test(&self, point: Vec2) -> Option<&RegionTile> {
        self.tiles.iter().find(|tile| tile.rect.contains(point))
    }

    /// Smallest rectangle covering every tile
    pub fn bounds(&self) -> Option<Rect> {
        self.tiles
            .iter()
            .map(|tile| tile.rect)
            .reduce(|acc, rect| acc.union(rect))
    }

    pub fn ids(&self) -> Vec<RegionId> {
        self.tiles.iter().map(|tile| tile.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(count: usize) -> Vec<RegionFeature> {
        (0..count)
            .map(|i| RegionFeature {
                id: RegionId::new(format!("geo-{}", i)),
                display_name: format!("Region {}", i),
            })
            .collect()
    }

    #[test]
    fn test_empty_atlas_has_no_bounds() {
        let atlas = RegionAtlas::from_features(Vec::new(), 64.0);
        assert!(atlas.tiles.is_empty());
        assert!(atlas.bounds().is_none());
        assert!(atlas.hit_test(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_grid_is_near_square_and_centred() {
        let atlas = RegionAtlas::from_features(features(5), 10.0);
        let bounds = atlas.bounds().unwrap();

        // 5 tiles -> 3 columns, 2 rows
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 20.0);
        assert_eq!(bounds.center(), Vec2::ZERO);
    }

    #[test]
    fn test_tiles_follow_feature_order() {
        let atlas = RegionAtlas::from_features(features(4), 10.0);
        // 2 columns: first row left to right, then the next row down
        assert_eq!(atlas.tiles[0].rect.min, Vec2::new(-10.0, 0.0));
        assert_eq!(atlas.tiles[1].rect.min, Vec2::new(0.0, 0.0));
        assert_eq!(atlas.tiles[2].rect.min, Vec2::new(-10.0, -10.0));
        assert_eq!(atlas.ids()[3].as_str(), "geo-3");
    }

    #[test]
    fn test_hit_test_finds_tile_under_point() {
        let atlas = RegionAtlas::from_features(features(4), 10.0);

        let hit = atlas.hit_test(Vec2::new(5.0, -5.0)).unwrap();
        assert_eq!(hit.id.as_str(), "geo-3");
        assert_eq!(hit.display_name, "Region 3");

        assert!(atlas.hit_test(Vec2::new(50.0, 50.0)).is_none());
    }
}

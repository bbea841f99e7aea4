use geo::{BoundingRect, Point};
use rstar::{primitives::GeomWithData, primitives::Rectangle, RTree, AABB};

use super::polygon_contains;
use crate::model::{ZoneDataset, ZoneId};

type ZoneEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// spatial index over zone polygon envelopes. answers the same question as
/// [super::hit_test] over the dataset's zones in delivery order, but only runs
/// the containment test on zones whose envelope covers the point.
#[derive(Debug)]
pub struct ZoneIndex {
    rtree: RTree<ZoneEnvelope>,
}

impl ZoneIndex {
    pub fn new(dataset: &ZoneDataset) -> Self {
        let envelopes = dataset
            .zones()
            .enumerate()
            .filter_map(|(index, zone)| {
                let rect = zone.boundary.bounding_rect()?;
                let rectangle =
                    Rectangle::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
                Some(GeomWithData::new(rectangle, index))
            })
            .collect::<Vec<_>>();
        Self {
            rtree: RTree::bulk_load(envelopes),
        }
    }

    /// the first zone in dataset order whose polygon contains the point.
    pub fn locate<'a>(&self, dataset: &'a ZoneDataset, point: &Point<f64>) -> Option<&'a ZoneId> {
        let query = AABB::from_point([point.x(), point.y()]);
        let mut candidates = self
            .rtree
            .locate_in_envelope_intersecting(&query)
            .map(|envelope| envelope.data)
            .collect::<Vec<_>>();
        candidates.sort_unstable();
        candidates
            .into_iter()
            .filter_map(|index| dataset.zone_at(index))
            .find(|zone| polygon_contains(&zone.boundary, point))
            .map(|zone| &zone.id)
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::ZoneIndex;
    use crate::{
        geometry::hit_test,
        model::{ZoneDataset, ZoneId},
        test_fixtures::{chain_dataset, square_zone},
    };
    use geo::{point, Point};

    #[test]
    fn test_locate_matches_linear_scan() {
        let dataset = chain_dataset();
        let index = ZoneIndex::new(&dataset);
        assert_eq!(index.len(), 4);
        for i in 0..50 {
            let p = Point::new(i as f64 * 0.1 - 0.5, 0.5);
            let linear = hit_test(&p, dataset.zones().map(|z| (&z.id, &z.boundary)));
            assert_eq!(index.locate(&dataset, &p), linear);
        }
    }

    #[test]
    fn test_locate_prefers_dataset_order() {
        let dataset = ZoneDataset::new(
            vec![
                square_zone("under", 0.0, 0.0, &[]),
                square_zone("over", 0.0, 0.0, &[]),
            ],
            vec![],
        );
        let index = ZoneIndex::new(&dataset);
        assert_eq!(
            index.locate(&dataset, &point!(x: 0.5, y: 0.5)),
            Some(&ZoneId::from("under"))
        );
        assert_eq!(index.locate(&dataset, &point!(x: 3.0, y: 0.5)), None);
    }
}

//! Horizontal bounding box aggregation

use crate::adapters::host::HostDocument;
use crate::domain::geometry::BoundingBox2D;
use crate::domain::ids::{Category, ElementId};

/// Union of the horizontal footprints of every element of `anchor` category
///
/// Elements outside the category, elements whose geometry cannot be read and
/// elements with non-finite bounds are skipped. When nothing contributes the
/// returned box is empty.
pub fn union_bounds(
    doc: &dyn HostDocument,
    ids: &[ElementId],
    anchor: &Category,
) -> BoundingBox2D {
    let mut union = BoundingBox2D::empty();

    for &id in ids {
        match doc.category(id) {
            Ok(Some(category)) if &category == anchor => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(element = %id, error = %e, "Skipping element without category");
                continue;
            }
        }

        let bounds = match doc.bounding_box(id) {
            Ok(Some(bounds)) => bounds,
            Ok(None) => {
                tracing::trace!(element = %id, "Element has no geometry");
                continue;
            }
            Err(e) => {
                tracing::debug!(
                    element = %id,
                    error = %e,
                    "Skipping element with unreadable geometry"
                );
                continue;
            }
        };

        if !union.include(&bounds) {
            tracing::debug!(element = %id, "Rejected non-finite bounds");
        }
    }

    union
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::{ModelDocument, ModelElement, ModelFile};
    use crate::domain::geometry::{BoundingBox3, Point3};

    fn bb(x0: f64, y0: f64, x1: f64, y1: f64) -> BoundingBox3 {
        BoundingBox3::new(Point3::new(x0, y0, 0.0), Point3::new(x1, y1, 3.0))
    }

    #[test]
    fn test_only_anchor_category_contributes() {
        let mut model = ModelFile::new("Bounds");
        let w1 = model.add_element(|id| {
            ModelElement::new(id, "Walls").with_bounds(bb(0.0, 0.0, 10.0, 10.0))
        });
        let w2 = model.add_element(|id| {
            ModelElement::new(id, "walls").with_bounds(bb(10.0, 0.0, 20.0, 10.0))
        });
        let chair = model.add_element(|id| {
            ModelElement::new(id, "furniture").with_bounds(bb(500.0, 500.0, 501.0, 501.0))
        });
        let doc = ModelDocument::from_model(model);

        let union = union_bounds(&doc, &[w1, w2, chair], &Category::walls());
        assert_eq!(union.contributors, 2);
        assert_eq!(union.center(), Some((10.0, 5.0)));
    }

    #[test]
    fn test_non_anchor_only_is_empty() {
        let mut model = ModelFile::new("Bounds");
        let chair = model.add_element(|id| {
            ModelElement::new(id, "furniture").with_bounds(bb(0.0, 0.0, 1.0, 1.0))
        });
        let doc = ModelDocument::from_model(model);

        assert!(union_bounds(&doc, &[chair], &Category::walls()).is_empty());
    }

    #[test]
    fn test_skips_broken_geometry() {
        let mut model = ModelFile::new("Bounds");
        let good = model.add_element(|id| {
            ModelElement::new(id, "walls").with_bounds(bb(0.0, 0.0, 2.0, 2.0))
        });
        let corrupt = model.add_element(|id| {
            ModelElement::new(id, "walls")
                .with_bounds(bb(100.0, 100.0, 200.0, 200.0))
                .geometry_corrupt(true)
        });
        let nan = model.add_element(|id| {
            ModelElement::new(id, "walls").with_bounds(bb(f64::NAN, 0.0, 1.0, 1.0))
        });
        let bare = model.add_element(|id| ModelElement::new(id, "walls"));
        let doc = ModelDocument::from_model(model);

        let union = union_bounds(
            &doc,
            &[good, corrupt, nan, bare, ElementId::new(404)],
            &Category::walls(),
        );
        assert_eq!(union.contributors, 1);
        assert_eq!(union.center(), Some((1.0, 1.0)));
    }
}

//! Shared fixtures for integration tests

#![allow(dead_code)]

use setport::adapters::model::{ModelElement, ModelFile};
use setport::domain::{BoundingBox3, ElementId, Point3};
use std::path::{Path, PathBuf};

/// Storey-high box spanning `(x0, y0)`..`(x1, y1)` in plan
pub fn footprint(x0: f64, y0: f64, x1: f64, y1: f64) -> BoundingBox3 {
    BoundingBox3::new(Point3::new(x0, y0, 0.0), Point3::new(x1, y1, 3.0))
}

/// Element ids of the tower fixture
pub struct Tower {
    pub path: PathBuf,
    pub west_wall: ElementId,
    pub east_wall: ElementId,
    pub far_chair: ElementId,
    pub door: ElementId,
}

/// Writes `tower.rvt` with a "Kitchen" set (two walls spanning 0..20 x 0..10
/// plus a distant chair) and a "Bath" set (one wall and a door)
pub fn write_tower(dir: &Path) -> Tower {
    let mut model = ModelFile::new("Tower");
    let west_wall = model.add_element(|id| {
        ModelElement::new(id, "walls").with_bounds(footprint(0.0, 0.0, 10.0, 10.0))
    });
    let east_wall = model.add_element(|id| {
        ModelElement::new(id, "walls").with_bounds(footprint(10.0, 0.0, 20.0, 10.0))
    });
    let far_chair = model.add_element(|id| {
        ModelElement::new(id, "furniture").with_bounds(footprint(500.0, 500.0, 501.0, 501.0))
    });
    let door = model.add_element(|id| {
        ModelElement::new(id, "doors").with_bounds(footprint(2.0, 0.0, 3.0, 0.2))
    });
    model.add_selection_set("Kitchen", vec![west_wall, east_wall, far_chair]);
    model.add_selection_set("Bath", vec![west_wall, door]);

    let path = dir.join("tower.rvt");
    model.write(&path).unwrap();
    Tower {
        path,
        west_wall,
        east_wall,
        far_chair,
        door,
    }
}

/// Writes `count` empty documents named `model_<n>.rvt`, in sorted order
pub fn write_documents(dir: &Path, count: usize) -> Vec<PathBuf> {
    (1..=count)
        .map(|n| {
            let path = dir.join(format!("model_{n:02}.rvt"));
            let mut model = ModelFile::new(format!("Model {n}"));
            model.add_element(|id| ModelElement::new(id, "walls"));
            model.write(&path).unwrap();
            path
        })
        .collect()
}

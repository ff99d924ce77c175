use crate::objects::hit::{HitRecord, Hitable};
use crate::Ray;
use std::sync::Arc;

/// Flat collection of objects, intersected by linear scan. Children are
/// tried against a shrinking upper bound, so the returned record is always
/// the globally closest hit regardless of insertion order.
#[derive(Default)]
pub struct Group {
    objects: Vec<Arc<dyn Hitable>>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, obj: Arc<dyn Hitable>) {
        self.objects.push(obj);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hitable for Group {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        let mut closest_so_far = t_max;
        let mut res = None;
        for object in &self.objects {
            if let Some(rec) = object.hit(r, t_min, closest_so_far) {
                closest_so_far = rec.t;
                res = Some(rec);
            }
        }
        res
    }
}

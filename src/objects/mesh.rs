use crate::material::Material;
use crate::objects::group::Group;
use crate::objects::hit::{HitRecord, Hitable};
use crate::objects::triangle::Triangle;
use crate::scene::SceneError;
use crate::{Ray, Vec3};
use std::path::Path;
use std::sync::Arc;

/// Triangle mesh loaded from a Wavefront OBJ file. Triangles are kept in a
/// flat group and intersected by linear scan.
pub struct Mesh {
    triangles: Group,
}

impl Mesh {
    pub fn load_obj(obj_file: &Path, material: Arc<Material>) -> Result<Self, SceneError> {
        let (models, _) = tobj::load_obj(
            obj_file,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )?;

        let mut triangles = Group::new();
        for model in &models {
            let mesh = &model.mesh;
            let positions: Vec<Vec3> = mesh
                .positions
                .chunks(3)
                .map(|p| Vec3::new(p[0] as f64, p[1] as f64, p[2] as f64))
                .collect();
            let normals: Vec<Vec3> = mesh
                .normals
                .chunks(3)
                .map(|n| Vec3::new(n[0] as f64, n[1] as f64, n[2] as f64))
                .collect();
            let texcoords: Vec<(f64, f64)> = mesh
                .texcoords
                .chunks(2)
                .map(|t| (t[0] as f64, t[1] as f64))
                .collect();

            for idx in mesh.indices.chunks(3) {
                let (a, b, c) = (idx[0] as usize, idx[1] as usize, idx[2] as usize);
                let mut tri = Triangle::new(
                    positions[a],
                    positions[b],
                    positions[c],
                    Arc::clone(&material),
                );
                if !normals.is_empty() {
                    tri = tri.with_normals([normals[a], normals[b], normals[c]]);
                }
                if !texcoords.is_empty() {
                    tri = tri.with_texcoords([texcoords[a], texcoords[b], texcoords[c]]);
                }
                triangles.add(Arc::new(tri));
            }
        }
        log::debug!(
            "loaded {} triangles from {}",
            triangles.len(),
            obj_file.display()
        );
        Ok(Self { triangles })
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Hitable for Mesh {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        self.triangles.hit(r, t_min, t_max)
    }
}

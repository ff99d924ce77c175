use crate::material::Material;
use crate::objects::hit::{HitRecord, Hitable, Tbn};
use crate::{Ray, Vec3};
use std::sync::Arc;

/// Determinant of the 3x3 matrix with columns `c0, c1, c2`.
fn det3(c0: Vec3, c1: Vec3, c2: Vec3) -> f64 {
    c0 * Vec3::cross(c1, c2)
}

pub struct Triangle {
    vertices: [Vec3; 3],
    normals: Option<[Vec3; 3]>,
    texcoords: Option<[(f64, f64); 3]>,
    material: Arc<Material>,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, material: Arc<Material>) -> Self {
        Self {
            vertices: [a, b, c],
            normals: None,
            texcoords: None,
            material,
        }
    }

    /// Per-vertex normals enable smooth shading.
    pub fn with_normals(mut self, normals: [Vec3; 3]) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Per-vertex texture coordinates enable texturing and the tangent
    /// frame needed for normal mapping. A singular UV mapping (zero-area in
    /// texture space) propagates non-finite frame vectors.
    pub fn with_texcoords(mut self, texcoords: [(f64, f64); 3]) -> Self {
        self.texcoords = Some(texcoords);
        self
    }

    fn flat_normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        Vec3::cross(b - a, c - a).unit()
    }

    fn tangent_frame(&self, normal: Vec3) -> Option<Tbn> {
        let [ta, tb, tc] = self.texcoords?;
        let [a, b, c] = self.vertices;
        let e1 = b - a;
        let e2 = c - a;
        let du = (tb.0 - ta.0, tc.0 - ta.0);
        let dv = (tb.1 - ta.1, tc.1 - ta.1);
        // invert the 2x2 texture-space Jacobian
        let f = 1. / (du.0 * dv.1 - du.1 * dv.0);
        let tangent = f * (dv.1 * e1 - dv.0 * e2);
        let bitangent = f * (du.0 * e2 - du.1 * e1);
        Some(Tbn {
            tangent: tangent / tangent.length(),
            bitangent: bitangent / bitangent.length(),
            normal,
        })
    }
}

impl Hitable for Triangle {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        let [a, b, c] = self.vertices;
        // Cramer's rule over the barycentric system; a degenerate triangle
        // makes det_a zero and the non-finite quotients fail the range
        // checks below.
        let det_a = det3(a - b, a - c, r.dir);
        let beta = det3(a - r.orig, a - c, r.dir) / det_a;
        let gamma = det3(a - b, a - r.orig, r.dir) / det_a;
        let alpha = 1. - beta - gamma;
        if alpha < 0. || beta < 0. || gamma < 0. {
            return None;
        }
        let t = det3(a - b, a - c, a - r.orig) / det_a;
        if !(t > t_min && t < t_max) {
            return None;
        }

        let normal = match &self.normals {
            Some([na, nb, nc]) => (alpha * *na + beta * *nb + gamma * *nc).unit(),
            None => self.flat_normal(),
        };
        let mut rec = HitRecord::new(t, normal, r, Arc::clone(&self.material));
        if let Some([ta, tb, tc]) = self.texcoords {
            let u = alpha * ta.0 + beta * tb.0 + gamma * tc.0;
            let v = alpha * ta.1 + beta * tb.1 + gamma * tc.1;
            rec = rec.with_uv((u, v));
            if let Some(tbn) = self.tangent_frame(normal) {
                rec = rec.with_tbn(tbn);
            }
        }
        Some(rec)
    }
}

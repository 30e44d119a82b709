//! Scene: nearest-hit search and the recursive shading algorithm.

use lumen_math::{Ray, Vec3};

use crate::{Color, HitRecord, Hittable, Light};

/// Offset applied along the normal when spawning shadow, reflection and
/// refraction rays, so a secondary ray cannot re-hit its own surface.
pub const RAY_EPSILON: f32 = 1e-3;

/// The color returned for rays that hit nothing.
const BACKGROUND: Color = Vec3::ZERO;

/// A scene: objects, lights, the camera eye and render settings.
///
/// Populated once during setup and read-only while rendering, so pixels
/// can be traced concurrently without coordination. Objects keep their
/// insertion order; intersection ties resolve to the earlier object,
/// which keeps renders reproducible.
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
    lights: Vec<Light>,
    eye: Vec3,
    shadows: bool,
    recursion_depth: u32,
    supersampling_factor: u32,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects.len())
            .field("lights", &self.lights.len())
            .field("eye", &self.eye)
            .field("shadows", &self.shadows)
            .field("recursion_depth", &self.recursion_depth)
            .field("supersampling_factor", &self.supersampling_factor)
            .finish()
    }
}

impl Scene {
    /// Create an empty scene with rendering extras switched off.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            eye: Vec3::ZERO,
            shadows: false,
            recursion_depth: 0,
            supersampling_factor: 1,
        }
    }

    /// Append an object. Order is significant for tie-breaking.
    pub fn add_object(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Append a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Set the camera eye position.
    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    /// Enable or disable shadow rays.
    pub fn set_shadows(&mut self, shadows: bool) {
        self.shadows = shadows;
    }

    /// Set the number of reflection/refraction bounces for primary rays.
    pub fn set_recursion_depth(&mut self, depth: u32) {
        self.recursion_depth = depth;
    }

    /// Set the sub-pixel grid resolution per axis (minimum 1).
    pub fn set_supersampling_factor(&mut self, factor: u32) {
        self.supersampling_factor = factor.max(1);
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn recursion_depth(&self) -> u32 {
        self.recursion_depth
    }

    pub fn supersampling_factor(&self) -> u32 {
        self.supersampling_factor
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Find the nearest object hit by a ray.
    ///
    /// Linear scan over the object list, tracking the minimum `t` starting
    /// from infinity. The strict `<` comparison keeps the first-inserted
    /// object on an exact tie.
    pub fn cast_ray(&self, ray: &Ray) -> Option<(&dyn Hittable, HitRecord)> {
        let mut min_t = f32::INFINITY;
        let mut nearest = None;

        for object in &self.objects {
            if let Some(rec) = object.intersect(ray) {
                if rec.t < min_t {
                    min_t = rec.t;
                    nearest = Some((object.as_ref(), rec));
                }
            }
        }

        nearest
    }

    /// Trace a ray through the scene and return its (unclamped) color.
    ///
    /// `depth` is the number of reflection/refraction bounces still allowed;
    /// at zero no secondary rays are spawned, which is the sole
    /// termination guarantee of the recursion. A transparent surface
    /// spawns two rays per bounce, so the worst-case ray count is
    /// `2^(depth + 1)`.
    ///
    /// The ray direction is expected to be normalized; all secondary rays
    /// constructed here are.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        let Some((object, rec)) = self.cast_ray(ray) else {
            return BACKGROUND;
        };

        let material = object.material();
        let point = ray.at(rec.t);
        let view = -ray.direction;

        // The shading normal always points toward the viewer, as the
        // Phong model requires; rec.normal keeps the geometric direction.
        let shading_normal = if rec.normal.dot(view) >= 0.0 {
            rec.normal
        } else {
            -rec.normal
        };

        // Ambient once, regardless of the number of lights.
        let mut color = material.ka * material.color;

        for light in &self.lights {
            let to_light = light.position - point;
            let l = to_light.normalize();

            if self.shadows && self.in_shadow(point, shading_normal, l, to_light) {
                continue;
            }

            let dot_normal = shading_normal.dot(l);
            color += dot_normal.max(0.0) * material.kd * light.color * material.color;

            if dot_normal > 0.0 {
                let reflected = 2.0 * dot_normal * shading_normal - l;
                let spec_angle = reflected.dot(view).max(0.0);
                color += spec_angle.powf(material.n) * material.ks * light.color;
            }
        }

        if depth > 0 && material.is_transparent {
            // Entering the solid: from air into the material. Exiting:
            // swap. The geometric normal decides which side we are on.
            let (ni, nt) = if rec.normal.dot(view) >= 0.0 {
                (1.0, material.nt)
            } else {
                (material.nt, 1.0)
            };

            let reflection = reflection_ray(point, shading_normal, view);

            let cos_i = ray.direction.dot(shading_normal);
            let radicand = 1.0 - ni * ni * (1.0 - cos_i * cos_i) / (nt * nt);
            if radicand < 0.0 {
                // Total internal reflection: all energy to the
                // reflection ray.
                color += self.trace(&reflection, depth - 1);
            } else {
                // Snell's law in vector form, the refraction ray offset
                // into the surface.
                let transmitted = ni * (ray.direction - cos_i * shading_normal) / nt
                    - shading_normal * radicand.sqrt();
                let refraction = Ray::new(point - shading_normal * RAY_EPSILON, transmitted);

                // Schlick's approximation of the Fresnel reflectance
                // ratio splits the energy between the two rays.
                let kr0 = ((ni - nt) / (ni + nt)).powi(2);
                let kr = kr0 + (1.0 - kr0) * (1.0 - view.dot(shading_normal)).powi(5);
                let kt = 1.0 - kr;

                color += self.trace(&refraction, depth - 1) * kt;
                color += self.trace(&reflection, depth - 1) * kr;
            }
        } else if depth > 0 && material.ks > 0.0 {
            // Opaque but shiny: reflection only, scaled by ks.
            let reflection = reflection_ray(point, shading_normal, view);
            color += self.trace(&reflection, depth - 1) * material.ks;
        }

        color
    }

    /// True when an object blocks the path from `point` to the light.
    ///
    /// The shadow ray starts offset along the shading normal; only hits
    /// strictly closer than the light itself occlude (binary shadowing).
    fn in_shadow(&self, point: Vec3, shading_normal: Vec3, l: Vec3, to_light: Vec3) -> bool {
        let shadow_ray = Ray::new(point + shading_normal * RAY_EPSILON, l);

        match self.cast_ray(&shadow_ray) {
            Some((_, rec)) => {
                (shadow_ray.at(rec.t) - point).length_squared() < to_light.length_squared()
            }
            None => false,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Mirror of the view vector about the shading normal, offset away from
/// the surface.
fn reflection_ray(point: Vec3, shading_normal: Vec3, view: Vec3) -> Ray {
    let direction = 2.0 * shading_normal.dot(view) * shading_normal - view;
    Ray::new(point + shading_normal * RAY_EPSILON, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere, Triangle};

    fn single_sphere_scene(material: Material) -> Scene {
        let mut scene = Scene::new();
        scene.add_object(Box::new(Sphere::new(Vec3::ZERO, 1.0, material)));
        scene
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = single_sphere_scene(Material::diffuse(Color::ONE, 0.5, 0.5));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(scene.trace(&ray, 3), Vec3::ZERO);
    }

    #[test]
    fn test_ambient_only_without_lights() {
        let material = Material::diffuse(Color::new(1.0, 0.5, 0.0), 0.25, 0.75);
        let scene = single_sphere_scene(material);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let color = scene.trace(&ray, 0);
        assert!((color - Vec3::new(0.25, 0.125, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_diffuse_proportional_to_cosine() {
        // ka = 0, ks = 0: the only term left is kd * max(0, N.L).
        let material = Material::diffuse(Color::ONE, 0.0, 1.0);
        let mut scene = single_sphere_scene(material);
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 100.0), Color::ONE));

        let head_on = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let color = scene.trace(&head_on, 0);

        // Light and normal are aligned at the front pole: N.L ~ 1.
        assert!((color.x - 1.0).abs() < 1e-2);
        assert!(color.min_element() >= 0.0);

        // A grazing hit sees a smaller cosine, never a negative one.
        let grazing = Ray::new(Vec3::new(0.99, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let grazing_color = scene.trace(&grazing, 0);
        assert!(grazing_color.x < color.x);
        assert!(grazing_color.min_element() >= 0.0);
    }

    #[test]
    fn test_trace_is_idempotent() {
        let material = Material::specular(Color::new(0.2, 0.4, 0.8), 0.1, 0.7, 0.5, 32.0);
        let mut scene = single_sphere_scene(material);
        scene.add_light(Light::new(Vec3::new(50.0, 80.0, 50.0), Color::ONE));
        scene.set_shadows(true);

        let ray = Ray::new(Vec3::new(0.3, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.trace(&ray, 4), scene.trace(&ray, 4));
    }

    #[test]
    fn test_depth_zero_spawns_no_secondary_rays() {
        // A perfect mirror facing a bright sphere: with depth 0 the mirror
        // contributes only its local shading, which is zero here.
        let mirror = Material::specular(Color::ZERO, 0.0, 0.0, 1.0, 1.0);
        let emissive_stand_in = Material::diffuse(Color::ONE, 1.0, 0.0);

        let mut scene = Scene::new();
        scene.add_object(Box::new(Triangle::new(
            Vec3::new(-5.0, -5.0, 0.0),
            Vec3::new(5.0, -5.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            mirror,
        )));
        scene.add_object(Box::new(Sphere::new(
            Vec3::new(0.0, -3.0, 5.0),
            1.0,
            emissive_stand_in,
        )));

        // Straight down onto the mirror at (0, -3, 0); the reflection
        // returns along +z into the bright sphere.
        let ray = Ray::new(Vec3::new(0.0, -3.0, 3.0), Vec3::new(0.0, 0.0, -1.0));

        let without_bounce = scene.trace(&ray, 0);
        let with_bounce = scene.trace(&ray, 1);

        assert_eq!(without_bounce, Vec3::ZERO);
        assert!(with_bounce.length() > 0.0);
    }

    #[test]
    fn test_shadow_suppresses_light_but_not_ambient() {
        let floor = Material::diffuse(Color::ONE, 0.1, 0.9);
        let blocker = Material::diffuse(Color::ONE, 0.1, 0.9);

        let mut scene = Scene::new();
        // Large floor triangle in the z = 0 plane.
        scene.add_object(Box::new(Triangle::new(
            Vec3::new(-100.0, -100.0, 0.0),
            Vec3::new(100.0, -100.0, 0.0),
            Vec3::new(0.0, 100.0, 0.0),
            floor,
        )));
        // Occluder between the origin and the light above it.
        scene.add_object(Box::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, blocker)));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, 10.0), Color::ONE));

        // Angled ray reaching the floor at the origin, under the blocker.
        let occluded = Ray::new(
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(-1.0, 0.0, -1.0).normalize(),
        );
        // Straight ray reaching the floor at (5, 0, 0), which sees the light.
        let open = Ray::new(Vec3::new(5.0, 0.0, 20.0), Vec3::new(0.0, 0.0, -1.0));

        scene.set_shadows(true);
        let shadowed = scene.trace(&occluded, 0);
        // Only the ambient term survives under the blocker.
        assert!((shadowed - Vec3::splat(0.1)).length() < 1e-4);

        // An unoccluded point shades identically with shadows on and off.
        let with_shadows = scene.trace(&open, 0);
        scene.set_shadows(false);
        let without_shadows = scene.trace(&open, 0);
        assert!((with_shadows - without_shadows).length() < 1e-5);

        // Turning shadows off restores the diffuse term at the origin.
        let unshadowed = scene.trace(&occluded, 0);
        assert!(unshadowed.x > shadowed.x + 0.5);
    }

    #[test]
    fn test_tie_break_keeps_first_inserted_object() {
        // Two coincident spheres with different ambient colors.
        let red = Material::diffuse(Color::new(1.0, 0.0, 0.0), 1.0, 0.0);
        let blue = Material::diffuse(Color::new(0.0, 0.0, 1.0), 1.0, 0.0);

        let mut scene = Scene::new();
        scene.add_object(Box::new(Sphere::new(Vec3::ZERO, 1.0, red)));
        scene.add_object(Box::new(Sphere::new(Vec3::ZERO, 1.0, blue)));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let color = scene.trace(&ray, 0);
        assert!((color - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_reflection_gathers_surroundings() {
        // Mirror floor under a bright (ambient-only) sphere.
        let mirror = Material::specular(Color::ZERO, 0.0, 0.0, 0.8, 16.0);
        let bright = Material::diffuse(Color::new(0.0, 1.0, 0.0), 1.0, 0.0);

        let mut scene = Scene::new();
        scene.add_object(Box::new(Triangle::new(
            Vec3::new(-50.0, 0.0, -50.0),
            Vec3::new(50.0, 0.0, -50.0),
            Vec3::new(0.0, 0.0, 50.0),
            mirror,
        )));
        scene.add_object(Box::new(Sphere::new(Vec3::new(0.0, 2.0, -2.0), 1.0, bright)));

        // A 45-degree ray bouncing off the floor at the origin; the
        // reflection continues up and onward into the sphere.
        let ray = Ray::new(
            Vec3::new(0.0, 3.0, 3.0),
            Vec3::new(0.0, -1.0, -1.0).normalize(),
        );

        let color = scene.trace(&ray, 2);
        assert!((color.y - 0.8).abs() < 1e-3);
    }

    #[test]
    fn test_refraction_passes_through_at_matching_index() {
        // A transparent pane with nt = 1 bends nothing; at normal
        // incidence Schlick gives kr = 0, so the trace is exactly the
        // color seen through the pane.
        let pane = Material::transparent(Color::ONE, 0.0, 1.0, 1.0);
        let behind = Material::diffuse(Color::new(0.0, 1.0, 0.0), 1.0, 0.0);

        let mut scene = Scene::new();
        scene.add_object(Box::new(Triangle::new(
            Vec3::new(-5.0, -5.0, 2.0),
            Vec3::new(5.0, -5.0, 2.0),
            Vec3::new(0.0, 5.0, 2.0),
            pane,
        )));
        scene.add_object(Box::new(Sphere::new(Vec3::ZERO, 1.0, behind)));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(scene.trace(&ray, 0), Vec3::ZERO);
        let color = scene.trace(&ray, 2);
        assert!((color - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_schlick_blends_reflection_and_refraction() {
        // Glass pane (nt = 1.5) at normal incidence: kr0 = 0.04. The
        // refraction ray sees a green sphere behind the pane, the
        // reflection ray a red sphere back toward the camera side.
        let pane = Material::transparent(Color::ONE, 0.0, 1.0, 1.5);
        let behind = Material::diffuse(Color::new(0.0, 1.0, 0.0), 1.0, 0.0);
        let in_front = Material::diffuse(Color::new(1.0, 0.0, 0.0), 1.0, 0.0);

        let mut scene = Scene::new();
        scene.add_object(Box::new(Triangle::new(
            Vec3::new(-5.0, -5.0, 2.0),
            Vec3::new(5.0, -5.0, 2.0),
            Vec3::new(0.0, 5.0, 2.0),
            pane,
        )));
        scene.add_object(Box::new(Sphere::new(Vec3::ZERO, 1.0, behind)));
        scene.add_object(Box::new(Sphere::new(Vec3::new(0.0, 0.0, 8.0), 1.0, in_front)));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let color = scene.trace(&ray, 1);

        assert!((color - Vec3::new(0.04, 0.96, 0.0)).length() < 1e-3);
    }
}

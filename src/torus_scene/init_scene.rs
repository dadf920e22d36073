use crate::framework::{
    camera::{Camera, OrbitCameraRig},
    math::Transform,
};

use super::{
    components::{AxesHelper, LightHelper, Name, PointLight, Side, StandardMaterial},
    geometry,
    params::SceneParams,
    scene::Scene,
};

/// Builds the scene graph viewed through a camera with given aspect ratio.
pub fn init_scene(params: &SceneParams, aspect_ratio: f32) -> Scene {
    let mut world = hecs::World::new();

    // Torus
    // -----

    let torus = &params.torus;
    world.spawn((
        Name("torus"),
        Transform::from_position(torus.position),
        geometry::torus(torus.radius, torus.tube, torus.radial_segments, torus.tubular_segments),
        StandardMaterial { color: torus.color, side: Side::Front },
    ));

    // Floor
    // -----
    //   - plane is generated facing +Z, rotated to face up

    let floor = &params.floor;
    world.spawn((
        Name("floor"),
        Transform::from_position(floor.position)
            .with_rotation(glam::Quat::from_rotation_x(floor.rotation_x)),
        geometry::plane(floor.width, floor.height),
        StandardMaterial { color: floor.color, side: Side::Double },
    ));

    // Light and helpers
    // -----------------

    let light = &params.light;
    let light_entity = world.spawn((
        Name("point light"),
        Transform::from_position(light.position),
        PointLight {
            color: light.color,
            intensity: light.intensity,
            distance: light.distance,
            decay: light.decay,
        },
    ));

    world.spawn((
        Name("axes helper"),
        Transform::IDENTITY,
        geometry::axes(params.axes_length),
        AxesHelper,
    ));

    world.spawn((
        Name("light helper"),
        Transform::from_position(light.position),
        geometry::wire_sphere(params.light_helper_size, 4, 2, light.color.to_linear()),
        LightHelper { light: light_entity },
    ));

    // Camera and controls
    // -------------------

    let camera = Camera {
        aspect_ratio,
        fov: params.camera.fov,
        near: params.camera.near,
        far: params.camera.far,
        position: params.camera.position,
        ..Default::default()
    }.look_at(params.camera.target);

    let controls = &params.controls;
    let mut camera = OrbitCameraRig::new(camera, params.camera.target)
        .with_distance_limits(controls.min_distance, controls.max_distance);
    camera.auto_rotate = controls.auto_rotate;
    camera.auto_rotate_speed = controls.auto_rotate_speed;
    camera.rotate_speed = controls.rotate_speed;
    camera.min_polar_angle = controls.min_polar_angle;
    camera.max_polar_angle = controls.max_polar_angle;

    Scene { camera, world }
}

#[cfg(test)]
mod tests {
    use crate::framework::camera::CameraRig;
    use crate::torus_scene::components::{LineMesh, TriangleMesh};

    use super::*;

    fn position_of(scene: &Scene, name: &str) -> glam::Vec3 {
        scene.world.query::<(&Name, &Transform)>()
            .iter()
            .find(|(_, (n, _))| n.0 == name)
            .map(|(_, (_, transform))| transform.position)
            .unwrap()
    }

    #[test]
    fn scene_holds_five_entities() {
        let scene = init_scene(&SceneParams::default(), 1.0);
        assert_eq!(scene.world.len(), 5);

        let mut names: Vec<_> = scene.world.query::<&Name>().iter().map(|(_, n)| n.0).collect();
        names.sort();
        assert_eq!(names, vec!["axes helper", "floor", "light helper", "point light", "torus"]);

        assert_eq!(scene.world.query::<&TriangleMesh>().iter().count(), 2);
        assert_eq!(scene.world.query::<&LineMesh>().iter().count(), 2);
        assert_eq!(scene.world.query::<&PointLight>().iter().count(), 1);
    }

    #[test]
    fn floor_is_below_torus() {
        let scene = init_scene(&SceneParams::default(), 1.0);
        assert_eq!(position_of(&scene, "floor").y, -12.0);
        assert!(position_of(&scene, "floor").y < position_of(&scene, "torus").y);
    }

    #[test]
    fn light_helper_tracks_light_entity() {
        let scene = init_scene(&SceneParams::default(), 1.0);
        let mut helpers = scene.world.query::<&LightHelper>();
        let (_, helper) = helpers.iter().next().unwrap();
        let light = scene.world.get::<&PointLight>(helper.light).unwrap();
        assert_eq!(light.intensity, 2.5);
        assert_eq!(position_of(&scene, "light helper"), position_of(&scene, "point light"));
    }

    #[test]
    fn camera_uses_given_aspect_and_controls() {
        let params = SceneParams::default();
        let scene = init_scene(&params, 4.0 / 3.0);
        let camera = scene.camera.camera();

        assert_eq!(camera.aspect_ratio, 4.0 / 3.0);
        assert_eq!(camera.fov, 75.0);
        assert!((camera.position - glam::vec3(30.0, 10.0, 0.0)).length() < 1e-3);
        assert!(scene.camera.auto_rotate);
        assert_eq!(scene.camera.max_polar_angle, std::f32::consts::FRAC_PI_2);
    }
}

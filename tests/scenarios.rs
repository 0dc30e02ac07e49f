//! End-to-end scenarios exercising the public scene API.

use rand::{distributions as distr, distributions::Distribution, rngs::StdRng, SeedableRng};
use starcollide::{
    collision::collide, AabbParams, Body, PlaneParams, RigidBodyParams, Scene, SceneParams,
    SphereParams, Vec2,
};

fn approx_eq(a: Vec2, b: Vec2) -> bool {
    (a - b).mag() < 1e-9
}

fn position(scene: &Scene, handle: starcollide::ActorHandle) -> Vec2 {
    scene.get(handle).and_then(Body::position).unwrap()
}

fn velocity(scene: &Scene, handle: starcollide::ActorHandle) -> Vec2 {
    scene.get(handle).unwrap().velocity_or_zero()
}

#[test]
fn sphere_falls_one_step() {
    let mut scene = Scene::new(
        SceneParams::new()
            .with_gravity([0.0, -10.0])
            .with_time_step(0.1),
    )
    .unwrap();
    let ball = scene.add_actor(
        SphereParams::new(RigidBodyParams::new(2.0), 5.0)
            .build()
            .unwrap(),
    );

    assert_eq!(scene.update(0.1), 1);
    assert!(approx_eq(velocity(&scene, ball), Vec2::new(0.0, -1.0)));
    assert!(approx_eq(position(&scene, ball), Vec2::new(0.0, -0.1)));
}

#[test]
fn head_on_spheres_swap_velocities() {
    let mut scene = Scene::new(SceneParams::new().with_time_step(0.1)).unwrap();
    let left = scene.add_actor(
        SphereParams::new(
            RigidBodyParams::new(1.0)
                .with_position([-6.0, 0.0])
                .with_velocity([5.0, 0.0]),
            5.0,
        )
        .build()
        .unwrap(),
    );
    let right = scene.add_actor(
        SphereParams::new(
            RigidBodyParams::new(1.0)
                .with_position([6.0, 0.0])
                .with_velocity([-5.0, 0.0]),
            5.0,
        )
        .build()
        .unwrap(),
    );

    let mut steps = 0;
    while scene.last_contacts().is_empty() {
        assert!(steps < 10, "Spheres never touched");
        assert!(approx_eq(velocity(&scene, left), Vec2::new(5.0, 0.0)));
        scene.update(0.1);
        steps += 1;
    }

    assert!(approx_eq(velocity(&scene, left), Vec2::new(-5.0, 0.0)));
    assert!(approx_eq(velocity(&scene, right), Vec2::new(5.0, 0.0)));
    let dist = (position(&scene, left) - position(&scene, right)).mag();
    assert!(dist >= 10.0 - 1e-9, "Spheres still overlap: {}", dist);
}

#[test]
fn sphere_rests_on_plane() {
    let mut scene = Scene::default();
    let ball = scene.add_actor(
        SphereParams::new(RigidBodyParams::new(1.0).with_position([0.0, -48.0]), 3.0)
            .build()
            .unwrap(),
    );
    let floor = scene.add_actor(PlaneParams::new([0.0, 1.0], -50.0).build().unwrap());

    scene.step();
    let contacts = scene.last_contacts();
    assert_eq!(contacts.len(), 1);
    assert!((contacts[0].contact.depth - 1.0).abs() < 1e-9);

    assert!(approx_eq(position(&scene, ball), Vec2::new(0.0, -47.0)));
    let plane = scene.get(floor).and_then(Body::as_plane).unwrap();
    assert!((plane.signed_distance(position(&scene, ball)) - 3.0).abs() < 1e-9);
}

#[test]
fn box_lands_on_floor_and_stays_above_it() {
    let mut scene = Scene::new(
        SceneParams::new()
            .with_gravity([0.0, -10.0])
            .with_time_step(1.0 / 60.0),
    )
    .unwrap();
    let crate_box = scene.add_actor(
        AabbParams::new(
            RigidBodyParams::new(4.0)
                .with_position([0.0, 3.0])
                .with_elasticity(0.0),
            [1.0, 0.5],
        )
        .build()
        .unwrap(),
    );
    scene.add_actor(PlaneParams::new([0.0, 1.0], 0.0).build().unwrap());

    for _ in 0..300 {
        scene.update(1.0 / 60.0);
        let bottom = scene.get(crate_box).and_then(Body::as_box).unwrap().min().y;
        assert!(bottom >= -1e-9, "Box sank into the floor: {}", bottom);
    }
    let pos = position(&scene, crate_box);
    assert!((pos.y - 0.5).abs() < 0.01, "Box didn't come to rest: {:?}", pos);
}

#[test]
fn single_pairs_never_stay_penetrating() {
    let mut rng = StdRng::seed_from_u64(42);
    let coord = distr::Uniform::from(-4.0..4.0);
    let size = distr::Uniform::from(0.5..3.0);
    let mass = distr::Uniform::from(0.1..10.0);

    let random_body = |rng: &mut StdRng, kind: usize| -> Body {
        let rb = RigidBodyParams::new(mass.sample(rng))
            .with_position([coord.sample(rng), coord.sample(rng)])
            .with_velocity([coord.sample(rng), coord.sample(rng)]);
        match kind {
            0 => PlaneParams::new([coord.sample(rng), coord.sample(rng)], coord.sample(rng))
                .build()
                .unwrap()
                .into(),
            1 => SphereParams::new(rb, size.sample(rng)).build().unwrap().into(),
            _ => AabbParams::new(rb, [size.sample(rng), size.sample(rng)])
                .build()
                .unwrap()
                .into(),
        }
    };

    for k1 in 0..3 {
        for k2 in 0..3 {
            for _ in 0..100 {
                let mut scene = Scene::default();
                let a = random_body(&mut rng, k1);
                let b = random_body(&mut rng, k2);
                let planes_before: Vec<_> = [a, b]
                    .iter()
                    .filter_map(|body| body.as_plane().copied())
                    .map(|p| (*p.normal(), p.distance()))
                    .collect();
                let h1 = scene.add_actor(a);
                let h2 = scene.add_actor(b);
                scene.step();

                let (a, b) = (scene.get(h1).unwrap(), scene.get(h2).unwrap());
                if let Some(contact) = collide(a, b) {
                    assert!(
                        contact.depth < 1e-9,
                        "Residual penetration {} between {} and {}",
                        contact.depth,
                        a,
                        b
                    );
                }
                let planes_after: Vec<_> = [a, b]
                    .iter()
                    .filter_map(|body| body.as_plane())
                    .map(|p| (*p.normal(), p.distance()))
                    .collect();
                assert_eq!(planes_before, planes_after);
            }
        }
    }
}

#![allow(missing_docs)]

use std::sync::Arc;

use creatures::simulation::sensing::{
    NEAREST_TARGET_CHANNELS, NO_TARGET_DISTANCE, NearestTarget, Vision, sense_for,
};
use creatures::{
    AgentSpec, ConstantPolicy, EntityId, EntityKind, Params, PerceptionModel, Position, World,
};

const EPS: f32 = 1e-3;

fn create_test_params() -> Params {
    Params {
        width: 20,
        height: 20,
        n_resources: 0,
        ..Params::grid()
    }
}

fn vision_params() -> Params {
    Params {
        width: 300,
        height: 300,
        perception: PerceptionModel::RayFan,
        sensors_qty: 1,
        sensors_view_angle: 0.0,
        ..create_test_params()
    }
}

fn predator() -> AgentSpec {
    AgentSpec::new(Arc::new(ConstantPolicy(0)))
}

fn observe(world: &World, id: EntityId) -> Vec<f32> {
    let agent = world.entity(id).unwrap();
    sense_for(world.params().perception)
        .sense(agent, world)
        .values
        .to_vec()
}

#[test]
fn test_nearest_target_channels() {
    let mut world = World::empty(create_test_params()).unwrap();
    let agent = world.insert_agent(predator(), Position::new(5, 5)).unwrap();
    world
        .insert_resource(EntityKind::Resource, Position::new(8, 3))
        .unwrap();

    let values = observe(&world, agent);
    assert_eq!(values.len(), NEAREST_TARGET_CHANNELS);

    // east, north, west, south
    assert_eq!(values[..4], [3.0, 0.0, 0.0, 2.0]);
    assert!((values[4] - 13f32.sqrt()).abs() < EPS);
    assert!(values[5].abs() < EPS);
}

#[test]
fn test_nearest_target_reports_scaled_strength() {
    let mut world = World::empty(create_test_params()).unwrap();
    let agent = world.insert_agent(predator(), Position::new(5, 5)).unwrap();
    world
        .insert_resource(EntityKind::PoisonedResource, Position::new(5, 9))
        .unwrap();

    let values = observe(&world, agent);
    assert_eq!(values[..4], [0.0, 4.0, 0.0, 0.0]);
    assert!((values[4] - 4.0).abs() < EPS);
    assert!((values[5] - 1.0).abs() < EPS);
}

#[test]
fn test_nearest_target_tie_goes_to_first_in_world_order() {
    let mut world = World::empty(create_test_params()).unwrap();
    let agent = world.insert_agent(predator(), Position::new(5, 5)).unwrap();
    let first = world
        .insert_resource(EntityKind::Resource, Position::new(3, 5))
        .unwrap();
    world
        .insert_resource(EntityKind::Resource, Position::new(7, 5))
        .unwrap();

    let (target, d) = NearestTarget::nearest(world.entity(agent).unwrap(), &world).unwrap();
    assert_eq!(target.id, first);
    assert!((d - 2.0).abs() < EPS);

    let values = observe(&world, agent);
    assert_eq!(values[..4], [0.0, 0.0, 2.0, 0.0]);
}

#[test]
fn test_nearest_target_without_targets() {
    let mut world = World::empty(create_test_params()).unwrap();
    let agent = world.insert_agent(predator(), Position::new(5, 5)).unwrap();

    // Another predator is not a target by default
    world.insert_agent(predator(), Position::new(6, 5)).unwrap();

    let values = observe(&world, agent);
    assert_eq!(values, vec![0.0, 0.0, 0.0, 0.0, NO_TARGET_DISTANCE, 0.0]);
}

#[test]
fn test_predators_visible_when_attackable() {
    let params = Params {
        predators_attackable: true,
        ..create_test_params()
    };
    let mut world = World::empty(params).unwrap();
    let agent = world.insert_agent(predator(), Position::new(5, 5)).unwrap();
    let other = world.insert_agent(predator(), Position::new(6, 5)).unwrap();
    world
        .insert_agent(
            predator().with_kind(EntityKind::VegetarianAgent),
            Position::new(5, 6),
        )
        .unwrap();

    let (target, _) = NearestTarget::nearest(world.entity(agent).unwrap(), &world).unwrap();
    assert_eq!(target.id, other);
}

#[test]
fn test_vision_ray_hits_body() {
    let mut world = World::empty(vision_params()).unwrap();
    // Agent body spans 10..30, so rays start at (20, 20)
    let agent = world.insert_agent(predator(), Position::new(10, 10)).unwrap();
    // Resource body spans x 40..50, y 15..25
    world
        .insert_resource(EntityKind::Resource, Position::new(40, 15))
        .unwrap();

    let observation = sense_for(PerceptionModel::RayFan).sense(world.entity(agent).unwrap(), &world);
    assert_eq!(observation.values.len(), 1);
    assert!((observation.values[0] - 20.0).abs() < EPS);

    // The stored ray is shortened to the hit
    assert_eq!(observation.sensors.len(), 1);
    assert!((observation.sensors[0].segment.end.x - 40.0).abs() < EPS);
}

#[test]
fn test_vision_reports_sensor_len_on_miss() {
    let mut world = World::empty(vision_params()).unwrap();
    let agent = world.insert_agent(predator(), Position::new(10, 10)).unwrap();
    world
        .insert_resource(EntityKind::Resource, Position::new(40, 100))
        .unwrap();
    // Out of reach along the ray
    world
        .insert_resource(EntityKind::Resource, Position::new(250, 15))
        .unwrap();

    let values = observe(&world, agent);
    assert_eq!(values, vec![world.params().sensor_len]);
}

#[test]
fn test_vision_nearest_hit_wins() {
    let mut world = World::empty(vision_params()).unwrap();
    let agent = world.insert_agent(predator(), Position::new(10, 10)).unwrap();
    world
        .insert_resource(EntityKind::Resource, Position::new(80, 15))
        .unwrap();
    world
        .insert_resource(EntityKind::Resource, Position::new(50, 15))
        .unwrap();

    let values = observe(&world, agent);
    assert!((values[0] - 30.0).abs() < EPS);
}

#[test]
fn test_ray_angles_span_view() {
    let params = Params {
        sensors_qty: 4,
        sensors_view_angle: 1.0,
        ..vision_params()
    };
    assert!((Vision::ray_angle(&params, 0.0, 0) + 0.5).abs() < EPS);
    assert!((Vision::ray_angle(&params, 0.0, 1) + 0.25).abs() < EPS);
    assert!((Vision::ray_angle(&params, 2.0, 3) - 2.25).abs() < EPS);
}

#[test]
fn test_observation_sizes() {
    let params = create_test_params();
    assert_eq!(params.observation_size(), NEAREST_TARGET_CHANNELS);
    assert_eq!(
        sense_for(PerceptionModel::NearestTarget).input_size(&params),
        NEAREST_TARGET_CHANNELS
    );

    let params = Params {
        sensors_qty: 7,
        ..vision_params()
    };
    assert_eq!(params.observation_size(), 7);
    assert_eq!(sense_for(PerceptionModel::RayFan).input_size(&params), 7);
}

#[test]
fn test_every_ray_reports_a_value() {
    let params = Params {
        n_resources: 40,
        ..Params::continuous()
    };
    let world = World::new(vec![predator(); 5], params).unwrap();

    for agent in world.agents() {
        let observation = sense_for(PerceptionModel::RayFan).sense(agent, &world);
        assert_eq!(observation.values.len(), world.params().sensors_qty);
        assert!(
            observation
                .values
                .iter()
                .all(|v| (0.0..=world.params().sensor_len).contains(v))
        );
    }
}

#[test]
fn test_sense_names() {
    assert_eq!(sense_for(PerceptionModel::RayFan).name(), "Vision");
    assert_eq!(
        sense_for(PerceptionModel::NearestTarget).name(),
        "NearestTarget"
    );
}

#[test]
fn test_indexed_vision_matches_full_scan() {
    let mut world = World::empty(vision_params()).unwrap();
    let agent = world.insert_agent(predator(), Position::new(10, 10)).unwrap();
    world
        .insert_resource(EntityKind::Resource, Position::new(40, 15))
        .unwrap();
    world
        .insert_resource(EntityKind::Resource, Position::new(200, 200))
        .unwrap();

    // No turn has run yet, so this observation comes from a full scan
    let scanned = sense_for(PerceptionModel::RayFan).sense(world.entity(agent).unwrap(), &world);

    // A turn builds the target index before sensing and keeps the rays
    world.act(agent);
    let stored = world.entity(agent).unwrap().agent.as_ref().unwrap().sensors.clone();

    assert_eq!(stored.len(), scanned.sensors.len());
    for (indexed, full) in stored.iter().zip(&scanned.sensors) {
        assert!((indexed.segment.end.x - full.segment.end.x).abs() < EPS);
        assert!((indexed.segment.end.y - full.segment.end.y).abs() < EPS);
    }
    assert!((stored[0].segment.end.x - 40.0).abs() < EPS);
}

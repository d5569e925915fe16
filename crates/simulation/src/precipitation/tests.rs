#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::atmosphere::Atmosphere;
    use crate::clouds::factory::build_cloud;
    use crate::clouds::types::CloudKind;
    use crate::config::SimulationSettings;
    use crate::precipitation::pool::{RainPool, RAIN_POOL_CAPACITY};
    use crate::precipitation::{update_rain, RainPools};
    use crate::sim_rng::SimRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(3)
    }

    #[test]
    fn test_active_count_never_exceeds_capacity() {
        let mut rng = rng();
        let mut pool = RainPool::new();
        for _ in 0..RAIN_POOL_CAPACITY * 3 {
            pool.try_spawn(Vec3::new(0.0, 30.0, 0.0), 1.0, 1.0, &mut rng);
        }
        assert_eq!(pool.active, RAIN_POOL_CAPACITY);
    }

    #[test]
    fn test_spawn_rejected_at_capacity() {
        let mut rng = rng();
        let mut pool = RainPool::new();
        for _ in 0..RAIN_POOL_CAPACITY {
            assert!(pool.try_spawn(Vec3::new(0.0, 30.0, 0.0), 1.0, 0.5, &mut rng));
        }
        let before = pool.positions.clone();
        assert!(!pool.try_spawn(Vec3::new(0.0, 30.0, 0.0), 1.0, 0.5, &mut rng));
        assert_eq!(pool.active, RAIN_POOL_CAPACITY);
        assert_eq!(pool.positions, before, "rejected spawn must not touch slots");
    }

    #[test]
    fn test_compaction_preserves_relative_order() {
        let mut rng = rng();
        let mut pool = RainPool::new();
        for _ in 0..10 {
            pool.try_spawn(Vec3::new(0.0, 30.0, 0.0), 1.0, 0.5, &mut rng);
        }
        // Force drops 2, 5 and 6 underground.
        for &i in &[2usize, 5, 6] {
            pool.positions[i].y = -1.0;
        }
        let survivors: Vec<Vec3> = (0..10)
            .filter(|i| ![2usize, 5, 6].contains(i))
            .map(|i| pool.positions[i])
            .collect();

        pool.compact();

        assert_eq!(pool.active, 7);
        for (i, expected) in survivors.iter().enumerate() {
            assert_eq!(pool.positions[i], *expected, "order broken at {}", i);
        }
    }

    #[test]
    fn test_integrate_moves_drops_down() {
        let mut rng = rng();
        let mut pool = RainPool::new();
        pool.try_spawn(Vec3::new(0.0, 30.0, 0.0), 1.0, 1.0, &mut rng);
        let y0 = pool.positions[0].y;
        pool.integrate(1.0 / 60.0);
        assert!(pool.positions[0].y < y0);
    }

    #[test]
    fn test_zero_dt_integration_is_a_no_op() {
        let mut rng = rng();
        let mut pool = RainPool::new();
        for _ in 0..20 {
            pool.try_spawn(Vec3::new(0.0, 30.0, 0.0), 1.0, 0.5, &mut rng);
        }
        let before = pool.positions.clone();
        pool.integrate(0.0);
        assert_eq!(pool.positions, before);
    }

    #[test]
    fn test_drops_eventually_recycle() {
        let mut rng = rng();
        let mut pool = RainPool::new();
        for _ in 0..50 {
            pool.try_spawn(Vec3::new(0.0, 30.0, 0.0), 1.0, 1.0, &mut rng);
        }
        // Long enough for every drop to reach the ground.
        for _ in 0..400 {
            pool.integrate(1.0 / 60.0);
            pool.compact();
        }
        assert_eq!(pool.active, 0);
    }

    fn rain_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SimulationSettings>()
            .init_resource::<RainPools>()
            .init_resource::<SimRng>()
            .add_systems(Update, update_rain);
        app
    }

    fn precipitating_cloud() -> crate::clouds::Cloud {
        let atmo = Atmosphere {
            humidity: 85.0,
            ..Default::default()
        };
        let mut rng = rng();
        loop {
            let mut cloud = build_cloud(&atmo, &mut rng);
            if cloud.kind == CloudKind::Cumulonimbus {
                cloud.precipitating = true;
                cloud.precipitation_intensity = 0.8;
                cloud.current_scale = Vec3::splat(cloud.base_scale);
                return cloud;
            }
        }
    }

    #[test]
    fn test_pool_created_lazily_and_released_on_cessation() {
        let mut app = rain_test_app();
        let entity = app.world_mut().spawn(precipitating_cloud()).id();

        app.update();
        assert!(app
            .world()
            .resource::<RainPools>()
            .pools
            .contains_key(&entity));

        // Stop precipitating: the pool must be released on the next frame.
        app.world_mut()
            .get_mut::<crate::clouds::Cloud>(entity)
            .unwrap()
            .precipitating = false;
        app.update();
        assert!(!app
            .world()
            .resource::<RainPools>()
            .pools
            .contains_key(&entity));
    }

    #[test]
    fn test_pool_released_when_cloud_despawns() {
        let mut app = rain_test_app();
        let entity = app.world_mut().spawn(precipitating_cloud()).id();
        app.update();
        assert!(app
            .world()
            .resource::<RainPools>()
            .pools
            .contains_key(&entity));

        app.world_mut().entity_mut(entity).despawn();
        app.update();
        assert!(app.world().resource::<RainPools>().pools.is_empty());
    }

    #[test]
    fn test_spawned_drops_start_under_the_cloud() {
        let mut app = rain_test_app();
        let cloud = precipitating_cloud();
        let cloud_pos = cloud.position;
        let entity = app.world_mut().spawn(cloud).id();

        for _ in 0..20 {
            app.update();
        }

        let pools = app.world().resource::<RainPools>();
        let pool = pools.pools.get(&entity).expect("pool exists");
        assert!(pool.active > 0, "spawns should have happened");
        for i in 0..pool.active {
            let p = pool.positions[i];
            assert!(p.y < cloud_pos.y);
            // Horizontal jitter is bounded by 12 * scale / 2 each side.
            assert!((p.x - cloud_pos.x).abs() <= 6.0 * pool_scale(&app, entity) + 1e-3);
        }
    }

    fn pool_scale(app: &App, entity: Entity) -> f32 {
        app.world()
            .get::<crate::clouds::Cloud>(entity)
            .unwrap()
            .current_scale
            .x
    }
}

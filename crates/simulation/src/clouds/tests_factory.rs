#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::atmosphere::Atmosphere;
    use crate::clouds::factory::{build_cloud, build_puffs, select_kind};
    use crate::clouds::types::CloudKind;

    #[test]
    fn test_cascade_high_humidity_high_roll_is_cumulonimbus() {
        // First matching rule wins even though later rules also match.
        assert_eq!(select_kind(80.0, 0.75), CloudKind::Cumulonimbus);
    }

    #[test]
    fn test_cascade_falls_through_to_humilis() {
        assert_eq!(select_kind(10.0, 0.5), CloudKind::CumulusHumilis);
    }

    #[test]
    fn test_cascade_priority_order() {
        // humidity qualifies for congestus but the roll is only above the
        // mediocris gate: the mediocris rule fires first among matches.
        assert_eq!(select_kind(72.0, 0.55), CloudKind::CumulusMediocris);
        assert_eq!(select_kind(72.0, 0.65), CloudKind::CumulusCongestus);
        // Low humidity, high roll: stratocumulus rule.
        assert_eq!(select_kind(30.0, 0.8), CloudKind::Stratocumulus);
        // The cumulonimbus rule needs BOTH gates.
        assert_eq!(select_kind(80.0, 0.65), CloudKind::CumulusCongestus);
    }

    #[test]
    fn test_puff_count_ordering_by_convectivity() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let humilis = build_puffs(CloudKind::CumulusHumilis, 1, &mut rng).len();
        let mediocris = build_puffs(CloudKind::CumulusMediocris, 1, &mut rng).len();
        let congestus = build_puffs(CloudKind::CumulusCongestus, 1, &mut rng).len();
        let cumulonimbus = build_puffs(CloudKind::Cumulonimbus, 1, &mut rng).len();
        assert!(humilis < mediocris);
        assert!(mediocris < congestus);
        assert!(congestus < cumulonimbus);
    }

    #[test]
    fn test_cumulonimbus_tops_out_higher() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let top = |kind: CloudKind, rng: &mut ChaCha8Rng| {
            build_puffs(kind, 3, rng)
                .iter()
                .map(|p| p.rest_y)
                .fold(f32::MIN, f32::max)
        };
        let humilis_top = top(CloudKind::CumulusHumilis, &mut rng);
        let cb_top = top(CloudKind::Cumulonimbus, &mut rng);
        assert!(cb_top > humilis_top * 2.0, "{} vs {}", cb_top, humilis_top);
    }

    #[test]
    fn test_build_cloud_initial_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let atmo = Atmosphere {
            humidity: 80.0,
            ..Default::default()
        };
        for _ in 0..50 {
            let cloud = build_cloud(&atmo, &mut rng);
            assert!((300.0..500.0).contains(&cloud.max_age));
            assert!((0.0..=1.0).contains(&cloud.moisture));
            assert_eq!(cloud.age, 0.0);
            assert!(!cloud.precipitating);
            assert_eq!(cloud.precipitation_intensity, 0.0);
            assert!(!cloud.puffs.is_empty());
            assert_eq!(
                cloud.precipitation_threshold,
                cloud.kind.precipitation_threshold()
            );
            // Flat and small kinds never precipitate.
            if matches!(
                cloud.kind,
                CloudKind::CumulusHumilis | CloudKind::Stratocumulus
            ) {
                assert!(!cloud.can_precipitate);
            }
            if cloud.kind.is_convective() {
                assert!(cloud.can_precipitate);
            }
        }
    }

    #[test]
    fn test_build_cloud_deterministic_for_seed() {
        let atmo = Atmosphere::default();
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        let ca = build_cloud(&atmo, &mut a);
        let cb = build_cloud(&atmo, &mut b);
        assert_eq!(ca.kind, cb.kind);
        assert_eq!(ca.max_age, cb.max_age);
        assert_eq!(ca.position, cb.position);
        assert_eq!(ca.puffs.len(), cb.puffs.len());
    }
}


use deco_engine::{DecoConfig, Gas};
use fixtures::{engine_default, gas_air, gas_ean50, gas_trimix_18_35};

#[test]
fn fresh_engine_ndl_is_999_at_surface() {
    let engine = engine_default();
    let ndl = engine.ndl(0., &gas_air(), 1.0, deco_engine::DEFAULT_SURFACE_PRESSURE);
    assert_eq!(ndl, 999.);
}

#[test]
fn fresh_engine_ceiling_is_zero() {
    let engine = engine_default();
    assert_eq!(engine.ceiling(0.3, 0.85, None, deco_engine::DEFAULT_SURFACE_PRESSURE), 0.);
}

#[test]
fn ndl_is_monotone_non_increasing_in_gf() {
    let engine = engine_default();
    let air = gas_air();
    let ndl_70 = engine.ndl(30., &air, 0.70, deco_engine::DEFAULT_SURFACE_PRESSURE);
    let ndl_85 = engine.ndl(30., &air, 0.85, deco_engine::DEFAULT_SURFACE_PRESSURE);
    let ndl_100 = engine.ndl(30., &air, 1.0, deco_engine::DEFAULT_SURFACE_PRESSURE);
    assert!(ndl_70 <= ndl_85);
    assert!(ndl_85 <= ndl_100);
}

#[test]
fn deco_gases_never_lengthen_time_to_surface() {
    let mut engine = engine_default();
    let air = gas_air();
    engine.add_segment(0., 45., 5.0, &air, deco_engine::DEFAULT_SURFACE_PRESSURE);
    engine.add_segment(45., 45.0001, 25.0, &air, deco_engine::DEFAULT_SURFACE_PRESSURE);

    let config = DecoConfig::default();
    let tts_without = engine
        .time_to_surface(0.3, 0.85, 45.0001, &air, &[], &config, deco_engine::DEFAULT_SURFACE_PRESSURE)
        .unwrap();
    let ean50 = gas_ean50();
    let tts_with = engine
        .time_to_surface(
            0.3,
            0.85,
            45.0001,
            &air,
            &[ean50],
            &config,
            deco_engine::DEFAULT_SURFACE_PRESSURE,
        )
        .unwrap();

    assert!(tts_with <= tts_without + 1e-6);
}

#[test]
fn ccr_on_setpoint_is_not_longer_than_oc_on_pure_diluent() {
    let diluent = gas_trimix_18_35();
    let setpoint = 1.3;
    let config = DecoConfig::default();

    let mut ccr_engine = engine_default();
    ccr_engine
        .add_ccr_segment(0., 45., 4., &diluent, setpoint, deco_engine::DEFAULT_SURFACE_PRESSURE)
        .unwrap();
    ccr_engine
        .add_ccr_segment(45., 45.0001, 20., &diluent, setpoint, deco_engine::DEFAULT_SURFACE_PRESSURE)
        .unwrap();
    let ccr_tts = ccr_engine
        .calculate_ccr_deco_stops(
            0.3,
            0.85,
            45.0001,
            &diluent,
            setpoint,
            &config,
            deco_engine::DEFAULT_SURFACE_PRESSURE,
        )
        .unwrap()
        .iter()
        .map(|s| s.time)
        .sum::<f64>();

    let mut oc_engine = engine_default();
    oc_engine.add_segment(0., 45., 4., &diluent, deco_engine::DEFAULT_SURFACE_PRESSURE);
    oc_engine.add_segment(45., 45.0001, 20., &diluent, deco_engine::DEFAULT_SURFACE_PRESSURE);
    let oc_tts = oc_engine
        .time_to_surface(
            0.3,
            0.85,
            45.0001,
            &diluent,
            &[],
            &config,
            deco_engine::DEFAULT_SURFACE_PRESSURE,
        )
        .unwrap();

    assert!(
        ccr_tts <= oc_tts + 1e-6,
        "CCR tts {ccr_tts} should not exceed OC-on-diluent tts {oc_tts}"
    );
}

#[test]
fn ceiling_never_exceeds_depth_during_playback_of_generated_schedule() {
    let mut engine = engine_default();
    let air = gas_air();
    engine.add_segment(0., 40., 4., &air, deco_engine::DEFAULT_SURFACE_PRESSURE);
    engine.add_segment(40., 40.0001, 20., &air, deco_engine::DEFAULT_SURFACE_PRESSURE);

    let config = DecoConfig::default();
    let schedule = engine
        .calculate_deco_stops(0.3, 0.85, 40.0001, &air, &[], &config, deco_engine::DEFAULT_SURFACE_PRESSURE)
        .unwrap();

    let mut playback = engine_default();
    for segment in &schedule {
        playback.add_segment(
            segment.start_depth,
            segment.end_depth,
            segment.time,
            &segment.gas,
            deco_engine::DEFAULT_SURFACE_PRESSURE,
        );
        let ceiling = playback.ceiling(0.3, 0.85, None, deco_engine::DEFAULT_SURFACE_PRESSURE);
        assert!(
            ceiling <= segment.end_depth + 0.1,
            "ceiling {ceiling} exceeded current depth {} after segment {segment:?}",
            segment.end_depth
        );
    }
}

#[test]
fn non_negative_tissue_pressures_after_a_mixed_profile() {
    let mut engine = engine_default();
    let air = gas_air();
    let ean50 = gas_ean50();
    engine.add_segment(0., 45., 5., &air, deco_engine::DEFAULT_SURFACE_PRESSURE);
    engine.add_segment(45., 45.0001, 15., &air, deco_engine::DEFAULT_SURFACE_PRESSURE);
    engine.add_segment(45., 21., 2.7, &air, deco_engine::DEFAULT_SURFACE_PRESSURE);
    engine.add_segment(21., 21.0001, 4., &ean50, deco_engine::DEFAULT_SURFACE_PRESSURE);
    engine.add_segment(21., 0., 2.3, &ean50, deco_engine::DEFAULT_SURFACE_PRESSURE);

    for c in engine.compartments() {
        assert!(c.p_n2 >= 0.);
        assert!(c.p_he >= 0.);
    }
}

#[test]
fn invalid_gas_fractions_are_rejected_without_panicking() {
    assert!(Gas::new(1.5, 0.).is_err());
    assert!(Gas::new(0.21, 0.9).is_err());
}

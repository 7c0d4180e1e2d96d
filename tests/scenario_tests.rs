
use deco_engine::{DecoConfig, DecoError, Gas};
use fixtures::{engine_default, gas_air};

#[test]
fn scenario_1_schreiner_one_half_time() {
    let mut engine = engine_default();
    let air = gas_air();
    let before = engine.compartments()[0].p_n2;
    engine.add_segment(30., 30., 4.0, &air, deco_engine::DEFAULT_SURFACE_PRESSURE);
    let after = engine.compartments()[0].p_n2;
    assert_close_to_abs!(after, 1.945, 0.05);
    assert!(after > before);
}

#[test]
fn scenario_3_ndl_40m_air_gf_1() {
    let engine = engine_default();
    let ndl = engine.ndl(40., &gas_air(), 1.0, deco_engine::DEFAULT_SURFACE_PRESSURE);
    assert!((5.0..=15.0).contains(&ndl), "NDL@40m was {ndl}");
}

#[test]
fn scenario_4_ndl_table_air_gf_1() {
    let engine = engine_default();
    let air = gas_air();
    for (depth, lo, hi) in [
        (12., 140., 250.),
        (18., 50., 80.),
        (24., 25., 40.),
        (30., 15., 25.),
        (40., 7., 15.),
    ] {
        let ndl = engine.ndl(depth, &air, 1.0, deco_engine::DEFAULT_SURFACE_PRESSURE);
        assert!((lo..=hi).contains(&ndl), "NDL@{depth}m was {ndl}, expected [{lo},{hi}]");
    }
}

#[test]
fn scenario_5_deco_40m_20min_air_gf_30_85() {
    let mut engine = engine_default();
    let air = gas_air();
    engine.add_segment(0., 40., 2.0, &air, deco_engine::DEFAULT_SURFACE_PRESSURE);
    engine.add_segment(40., 40.0001, 20.0, &air, deco_engine::DEFAULT_SURFACE_PRESSURE);

    let config = DecoConfig::default();
    let schedule = engine
        .calculate_deco_stops(0.30, 0.85, 40.0001, &air, &[], &config, deco_engine::DEFAULT_SURFACE_PRESSURE)
        .unwrap();

    let has_3m_stop = schedule
        .iter()
        .any(|s| s.start_depth == s.end_depth && (s.end_depth - 3.0).abs() < 0.01);
    assert!(has_3m_stop, "expected a stop at 3m, got {schedule:?}");

    let deepest_stop = schedule
        .iter()
        .filter(|s| s.start_depth == s.end_depth)
        .map(|s| s.end_depth)
        .fold(0.0_f64, f64::max);
    assert!(deepest_stop >= 12.0, "deepest stop was {deepest_stop}, expected >= 12m");
}

#[test]
fn scenario_6_extreme_profile_raises_max_duration_exceeded() {
    // 150m / 110min on air, GF 30/85: a pathological profile (§7 MaxDurationExceeded
    // design note). Slow compartments keep on-gassing throughout the long ascent this
    // demands, so the schedule never converges within the iteration cap.
    let mut engine = engine_default();
    let air = gas_air();
    engine.add_segment(0., 150., 15.0, &air, deco_engine::DEFAULT_SURFACE_PRESSURE);
    engine.add_segment(150., 150.0001, 110.0, &air, deco_engine::DEFAULT_SURFACE_PRESSURE);

    let config = DecoConfig::default();
    let result = engine.calculate_deco_stops(
        0.30,
        0.85,
        150.0001,
        &air,
        &[],
        &config,
        deco_engine::DEFAULT_SURFACE_PRESSURE,
    );

    assert_eq!(result, Err(DecoError::MaxDurationExceeded));
}

#[test]
fn scenario_7_ccr_effective_gas_60m_sp13() {
    let diluent = Gas::new(0.10, 0.50).unwrap();
    let p_amb = deco_engine::depth_to_pressure(
        60.,
        deco_engine::DEFAULT_SURFACE_PRESSURE,
        deco_engine::DEFAULT_WATER_DENSITY,
    );
    let effective = deco_engine::ccr_effective_gas(p_amb, 1.3, &diluent).unwrap();
    assert_close_to_abs!(effective.f_o2, 0.184, 0.01);

    let diluent_ratio = diluent.f_he / (diluent.f_he + diluent.f_n2);
    let effective_ratio = effective.f_he / (effective.f_he + effective.f_n2);
    assert_close_to_abs!(diluent_ratio, effective_ratio, 0.01);
}

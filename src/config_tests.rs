use super::*;

#[test]
fn defaults_validate() {
    let cfg = GeoGraphIndexConfig::default();
    assert!(cfg.validate().is_ok());
}

#[test]
fn hnsw_level_mult_derives_from_max_m_when_non_positive() {
    let cfg = HnswConfig {
        mult: -1.0,
        max_m: 16,
        ..Default::default()
    };
    let expected = 1.0 / (16f64).ln();
    assert!((cfg.level_mult() - expected).abs() < 1e-9);
}

#[test]
fn hnsw_level_mult_honors_explicit_positive_value() {
    let cfg = HnswConfig {
        mult: 0.25,
        ..Default::default()
    };
    assert_eq!(cfg.level_mult(), 0.25);
}

#[test]
fn rejects_alpha_out_of_range() {
    let mut cfg = GeoGraphIndexConfig::default();
    cfg.search.alpha_query = 1.5;
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_zero_k_search() {
    let mut cfg = GeoGraphIndexConfig::default();
    cfg.search.k_search = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_l_search_below_k_search() {
    let mut cfg = GeoGraphIndexConfig::default();
    cfg.search.l_search = 2;
    cfg.search.k_search = 10;
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_accept_threshold_out_of_range() {
    let mut cfg = GeoGraphIndexConfig::default();
    cfg.geograph.accept_threshold = 1.1;
    assert!(cfg.validate().is_err());
}

#[test]
fn from_toml_string_overrides_defaults() {
    let toml_str = r#"
        [search]
        k_search = 5
        alpha_query = 0.25
    "#;
    let figment = Figment::new()
        .merge(Serialized::defaults(GeoGraphIndexConfig::default()))
        .merge(Toml::string(toml_str));
    let cfg: GeoGraphIndexConfig = figment.extract().unwrap();
    assert_eq!(cfg.search.k_search, 5);
    assert!((cfg.search.alpha_query - 0.25).abs() < 1e-9);
    // untouched sections keep their defaults
    assert_eq!(cfg.hnsw.max_m, HnswConfig::default().max_m);
}

#[test]
fn load_from_path_reads_a_real_file_on_top_of_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geograph.toml");
    std::fs::write(
        &path,
        r#"
        [geograph]
        max_m = 40
        accept_threshold = 0.3
        "#,
    )
    .unwrap();

    let cfg = GeoGraphIndexConfig::load_from_path(&path).unwrap();
    assert_eq!(cfg.geograph.max_m, 40);
    assert!((cfg.geograph.accept_threshold - 0.3).abs() < 1e-9);
    assert_eq!(cfg.nsw.nn, NswConfig::default().nn);
}

#[test]
fn load_from_path_falls_back_to_defaults_when_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");
    let cfg = GeoGraphIndexConfig::load_from_path(&path).unwrap();
    assert_eq!(cfg, GeoGraphIndexConfig::default());
}

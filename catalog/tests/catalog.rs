use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tunnelgen_catalog::{variant_for, DryTunnel, WetTunnel};
use tunnelgen_core::{
    AttributeKey, AttributeSource, Diagnostic, GenerationRequest, TunnelVariant, VariantKind,
};

fn change_weight_total(variant: &dyn TunnelVariant) -> u32 {
    variant
        .attributes()
        .iter()
        .map(|spec| spec.change_weight())
        .sum::<u32>()
        + variant.special_change_weight()
}

#[test]
fn dry_profile_tracks_seven_attributes() {
    let dry = DryTunnel::new(0, 0).expect("static tables");
    let keys: Vec<_> = dry.attributes().iter().map(|spec| spec.key()).collect();
    assert_eq!(
        keys,
        vec![
            AttributeKey::Size,
            AttributeKey::Slope,
            AttributeKey::Direction,
            AttributeKey::Texture,
            AttributeKey::Condition,
            AttributeKey::Air,
            AttributeKey::Illumination,
        ]
    );
    assert_eq!(change_weight_total(&dry), 100);
    assert!(dry.diagnostics().is_empty());
    assert_eq!(dry.kind(), VariantKind::Dry);
}

#[test]
fn wet_profile_tracks_width_depth_and_flow() {
    let wet = WetTunnel::new().expect("static tables");
    assert_eq!(change_weight_total(&wet), 100);
    assert!(wet
        .attributes()
        .iter()
        .all(|spec| spec.key() != AttributeKey::Slope));
    let size = wet
        .attributes()
        .iter()
        .find(|spec| spec.key() == AttributeKey::Size)
        .expect("wet tracks size");
    assert!(size.source().has_mutator());
}

#[test]
fn minimums_filter_dry_sizes() {
    let dry = DryTunnel::new(10, 10).expect("static tables");
    let size = &dry.attributes()[0];
    let AttributeSource::Table(table) = size.source() else {
        panic!("dry size is a plain table");
    };
    let names: Vec<_> = table.options().iter().map(|option| option.name()).collect();
    assert_eq!(names, vec!["Normal", "Wide", "Very Wide"]);

    let mut rng = ChaCha8Rng::seed_from_u64(41);
    for _ in 0..500 {
        let passage = *size
            .generate(&mut rng)
            .as_passage()
            .expect("sizes are passages");
        assert!(passage.height_ft().unwrap_or(0) >= 10);
        assert!(passage.width_ft() >= 10);
    }
}

#[test]
fn impossible_minimums_fall_back_to_every_size() {
    let dry = DryTunnel::new(999, 0).expect("static tables");
    assert_eq!(
        dry.diagnostics(),
        &[Diagnostic::SizeFilterFallback {
            min_height: 999,
            min_width: 0,
        }]
    );
    let AttributeSource::Table(table) = dry.attributes()[0].source() else {
        panic!("dry size is a plain table");
    };
    assert_eq!(table.len(), 9);
    assert_eq!(table.total_weight(), 100);
}

#[test]
fn wet_variant_ignores_minimums() {
    let request = GenerationRequest::new(1.0, VariantKind::Wet).with_minimums(999, 999);
    let variant = variant_for(&request).expect("static tables");
    assert_eq!(variant.kind(), VariantKind::Wet);
    assert!(variant.diagnostics().is_empty());
}

#[test]
fn wet_drops_carry_negative_elevation() {
    let wet = WetTunnel::new().expect("static tables");
    let mut rng = ChaCha8Rng::seed_from_u64(43);
    let mut saw_rapids = false;
    let mut saw_waterfall = false;
    for _ in 0..5_000 {
        let Some(feature) = wet.roll_special_feature(&mut rng) else {
            continue;
        };
        let drop = -feature.elevation_ft();
        if feature.description().starts_with("Rapids") {
            saw_rapids = true;
            assert!((2..=12).contains(&drop), "{feature}");
        } else if feature.description().starts_with("Waterfall") {
            saw_waterfall = true;
            assert!((3..=30).contains(&drop), "{feature}");
        } else {
            assert_eq!(drop, 0, "{feature}");
        }
    }
    assert!(saw_rapids && saw_waterfall);
}

#[test]
fn dry_specials_format_their_sub_rolls() {
    let dry = DryTunnel::new(0, 0).expect("static tables");
    let mut rng = ChaCha8Rng::seed_from_u64(47);
    let mut pits = 0;
    for _ in 0..5_000 {
        let Some(feature) = dry.roll_special_feature(&mut rng) else {
            continue;
        };
        if let Some(rest) = feature.description().strip_prefix("Pit (") {
            pits += 1;
            let depth: u32 = rest
                .trim_end_matches("' deep)")
                .parse()
                .expect("pit depth is numeric");
            assert!((3..=18).contains(&depth), "{feature}");
        }
    }
    assert!(pits > 0);
}

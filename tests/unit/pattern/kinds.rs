use super::*;

#[test]
fn names_parse_back_to_the_same_variant() {
    for p in PatternKind::ALL {
        assert_eq!(p.name().parse::<PatternKind>().unwrap(), p);
    }
    for c in ColorMode::ALL {
        assert_eq!(c.to_string().parse::<ColorMode>().unwrap(), c);
    }
    for r in RandomnessMode::ALL {
        assert_eq!(r.name().parse::<RandomnessMode>().unwrap(), r);
    }
    for f in TileFill::ALL {
        assert_eq!(f.name().parse::<TileFill>().unwrap(), f);
    }
}

#[test]
fn parsing_accepts_dashes_and_case() {
    assert_eq!(
        "Wave-Interference".parse::<PatternKind>().unwrap(),
        PatternKind::WaveInterference
    );
    assert_eq!(
        "RAINBOW_HSV".parse::<ColorMode>().unwrap(),
        ColorMode::RainbowHsv
    );
}

#[test]
fn unknown_name_lists_the_choices() {
    let err = "spiral".parse::<PatternKind>().unwrap_err().to_string();
    assert!(err.contains("unknown pattern 'spiral'"));
    assert!(err.contains("kaleidoscope"));
}

#[test]
fn index_selection_follows_declaration_order() {
    assert_eq!(PatternKind::from_index(0), Some(PatternKind::Original));
    assert_eq!(PatternKind::from_index(5), Some(PatternKind::Symmetry));
    assert_eq!(PatternKind::from_index(10), Some(PatternKind::Cellular));
    assert_eq!(PatternKind::from_index(11), None);
}

#[test]
fn serde_uses_snake_case_names() {
    let json = serde_json::to_string(&PatternKind::WaveInterference).unwrap();
    assert_eq!(json, "\"wave_interference\"");
    let back: RandomnessMode = serde_json::from_str("\"chaotic_attractor\"").unwrap();
    assert_eq!(back, RandomnessMode::ChaoticAttractor);
}

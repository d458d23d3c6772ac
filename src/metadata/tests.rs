use std::collections::HashSet;

use super::*;
use crate::value::{NumericArray, Value, ValueKind};

fn assert_registry_valid<'a>(entries: impl Iterator<Item = &'a MetaDatum>) {
    let mut seen = HashSet::new();
    for datum in entries {
        datum
            .validate()
            .unwrap_or_else(|e| panic!("invalid registry entry: {e}"));
        assert!(seen.insert(datum.tag()), "duplicate tag {}", datum.tag());
        assert!(
            units::ALL.contains(&datum.unit()),
            "unknown unit {} on {}",
            datum.unit(),
            datum.tag()
        );
    }
}

#[test]
fn test_acquisition_registry_is_valid() {
    assert_registry_valid(acquisition_tags::all());
    assert_eq!(acquisition_tags::all().count(), 25);
}

#[test]
fn test_device_registry_is_valid() {
    assert_registry_valid(device_tags::all());
    assert_eq!(device_tags::all().count(), 26);
}

#[test]
fn test_checked_subsets_belong_to_registry() {
    for datum in device_tags::CHECKED_DETECTOR {
        assert!(device_tags::TAGS_DETECTORS.contains(&datum));
    }
    for datum in device_tags::CHECKED_ILLUMINATOR {
        assert!(device_tags::TAGS_ILLUMINATORS.contains(&datum));
    }
    for datum in device_tags::CHECKED_GENERAL {
        assert!(device_tags::TAGS_GENERAL.contains(&datum));
    }
}

#[test]
fn test_find() {
    assert_eq!(
        acquisition_tags::find("ad_sampling_rate").map(MetaDatum::unit),
        Some(units::HERTZ)
    );
    assert!(device_tags::find("pulse_width").is_some());
    assert!(device_tags::find("ad_sampling_rate").is_none());
}

#[test]
fn test_checked_constructor_rejects_bad_declarations() {
    const FLOAT: &[ValueKind] = &[ValueKind::Float];

    assert_eq!(
        MetaDatum::new("", true, FLOAT, units::METERS, Constraint::Unconstrained),
        Err(SchemaError::EmptyTag)
    );
    assert!(matches!(
        MetaDatum::new("x", true, &[], units::METERS, Constraint::Unconstrained),
        Err(SchemaError::EmptyDtype(_))
    ));
    assert!(matches!(
        MetaDatum::new("x", true, FLOAT, "", Constraint::Unconstrained),
        Err(SchemaError::EmptyUnit(_))
    ));
    assert!(matches!(
        MetaDatum::new(
            "x",
            true,
            FLOAT,
            units::METERS,
            Constraint::BoundedNumber {
                lower: 1.0,
                upper: 0.0
            }
        ),
        Err(SchemaError::InvertedBounds { .. })
    ));
    assert!(matches!(
        MetaDatum::new(
            "x",
            true,
            FLOAT,
            units::METERS,
            Constraint::FixedDimensionArrayWithShape {
                rank: 2,
                shape: &[6]
            }
        ),
        Err(SchemaError::ShapeRankMismatch { .. })
    ));
    assert!(MetaDatum::new("x", false, FLOAT, units::NO_UNIT, Constraint::NonNegativeNumber).is_ok());
}

#[test]
fn test_pulse_width_boundary() {
    let datum = &device_tags::PULSE_WIDTH;
    assert_eq!(datum.evaluate_value_range(Some(&Value::Float(0.0))), Ok(true));
    assert_eq!(datum.evaluate_value_range(Some(&Value::Float(-0.1))), Ok(false));
    assert_eq!(datum.evaluate_value_range(None), Ok(false));
}

#[test]
fn test_field_of_view_shape() {
    let datum = &device_tags::FIELD_OF_VIEW;
    let good = Value::Array(NumericArray::from_vec(vec![0.0f64, 0.1, 0.0, 0.0, 0.0, 0.1]));
    let short = Value::Array(NumericArray::from_vec(vec![0.0f64, 0.1]));
    assert_eq!(datum.evaluate_value_range(Some(&good)), Ok(true));
    assert_eq!(datum.evaluate_value_range(Some(&short)), Ok(false));
}

#[test]
fn test_geometry_type_enumeration() {
    let datum = &device_tags::DETECTOR_GEOMETRY_TYPE;
    assert_eq!(datum.evaluate_value_range(Some(&Value::from("CUBOID"))), Ok(true));
    assert_eq!(datum.evaluate_value_range(Some(&Value::from("CONE"))), Ok(false));
}

#[test]
fn test_accepts_kind() {
    let datum = &acquisition_tags::SPEED_OF_SOUND;
    assert!(datum.accepts_kind(&Value::Float(1540.0)));
    assert!(datum.accepts_kind(&Value::Array(NumericArray::from_vec(vec![1540.0f64]))));
    assert!(!datum.accepts_kind(&Value::from("fast")));
    assert!(!datum.accepts_kind(&Value::Null));
}

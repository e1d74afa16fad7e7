use tadawul::Tadawul;
use tadawul_core::TadawulError;
use tadawul_mock::MockConnector;

use crate::helpers;

#[test]
fn build_requires_at_least_one_connector() {
    let err = Tadawul::builder()
        .registry(helpers::registry_of(&["1120"]))
        .build()
        .unwrap_err();
    assert!(matches!(err, TadawulError::InvalidArg(_)));
}

#[test]
fn build_requires_a_registry() {
    let err = Tadawul::builder()
        .with_connector(MockConnector::with_fixtures())
        .build()
        .unwrap_err();
    assert!(matches!(err, TadawulError::InvalidArg(_)));
}

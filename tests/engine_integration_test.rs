//! Integration tests for the resolution engine
//!
//! Runs the full flatten -> merge -> resolve -> format pipeline over an
//! environment document shaped like a real config server response for a
//! two-source invoice application.

use cloudenv::core::{
    EnvFormatter, Flattener, IdentityFormatter, PropertyPipeline, Resolver,
};
use cloudenv::domain::Environment;

const INVOICE_DOCUMENT: &str = r#"{
  "name": "test",
  "profiles": ["dev", "prod"],
  "label": "master",
  "version": "f65dfb395b177a3eac3bc29d3c3829e47543dcb2",
  "state": null,
  "propertySources": [
    {
      "name": "file://test.yml",
      "source": {
        "invoice": 34843,
        "date": "${test.date}",
        "bill-to": {
          "given": "${test.Name}",
          "family": "Dumars",
          "address": {
            "lines": "458 Walkman Dr.\nSuite #292\n",
            "city": "Royal Oak",
            "state": "MI",
            "postal": 48046
          }
        },
        "ship-to": {
          "given": "${test.Name}",
          "city": "${unknown:Royal Oak}"
        },
        "tax": 251.42,
        "total": 4443.52,
        "comments": "Late afternoon is best."
      }
    },
    {
      "name": "file://application.yml",
      "source": {
        "invoice": "100",
        "test": {
          "Name": "Test",
          "date": "2001-01-23",
          "price": 450.0
        }
      }
    }
  ]
}"#;

fn invoice_environment() -> Environment {
    serde_json::from_str(INVOICE_DOCUMENT).expect("invoice document must deserialize")
}

fn raw_pipeline() -> PropertyPipeline {
    PropertyPipeline::new(
        Flattener::new(),
        Resolver::default(),
        Box::new(IdentityFormatter),
    )
}

#[test]
fn resolves_the_invoice_document_end_to_end() {
    let outcome = raw_pipeline().process(&invoice_environment()).unwrap();
    let props = &outcome.properties;

    assert!(outcome.is_complete());

    // Precedence: the profile-specific source wins for "invoice"
    assert_eq!(props["invoice"], "34843");

    // Cross-source reference resolution
    assert_eq!(props["date"], "2001-01-23");
    assert_eq!(props["bill-to.given"], "Test");
    assert_eq!(props["ship-to.given"], "Test");

    // Default literal kicks in for a missing key
    assert_eq!(props["ship-to.city"], "Royal Oak");

    // Nested structure flattens to dot paths with canonical scalars
    assert_eq!(props["bill-to.address.postal"], "48046");
    assert_eq!(props["tax"], "251.42");
    assert_eq!(props["total"], "4443.52");
    assert_eq!(props["test.price"], "450");

    // Plain values pass through untouched
    assert_eq!(props["bill-to.family"], "Dumars");
    assert_eq!(props["comments"], "Late afternoon is best.");
}

#[test]
fn resolves_the_spec_scenario_with_precedence_and_reference() {
    let env: Environment = serde_json::from_str(
        r#"{
            "name": "app",
            "profiles": ["default"],
            "propertySources": [
                {"name": "file://app.yml", "source": {"x.y": "${z}"}},
                {"name": "file://defaults.yml", "source": {"z": "5", "x.y": "ignored"}}
            ]
        }"#,
    )
    .unwrap();

    let outcome = raw_pipeline().process(&env).unwrap();
    assert_eq!(outcome.properties["x.y"], "5");
}

#[test]
fn formats_the_invoice_document_for_environment_variables() {
    let pipeline = PropertyPipeline::new(
        Flattener::new(),
        Resolver::default(),
        Box::new(EnvFormatter::default()),
    );

    let outcome = pipeline.process(&invoice_environment()).unwrap();
    let props = &outcome.properties;

    assert_eq!(props["BILL-TO_GIVEN"], "Test");
    assert_eq!(props["SHIP-TO_CITY"], "Royal Oak");
    assert_eq!(props["TEST_NAME"], "Test");

    // Newlines are stripped so the value survives as one env var
    assert_eq!(props["BILL-TO_ADDRESS_LINES"], "458 Walkman Dr.Suite #292");
}

#[test]
fn best_effort_mode_reports_each_unresolved_property() {
    let env: Environment = serde_json::from_str(
        r#"{
            "name": "app",
            "profiles": ["default"],
            "propertySources": [
                {"name": "s0", "source": {
                    "a": "${gone}",
                    "b": "${also.gone}",
                    "c": "fine"
                }}
            ]
        }"#,
    )
    .unwrap();

    let pipeline = PropertyPipeline::new(
        Flattener::new(),
        Resolver::default().with_fail_fast(false),
        Box::new(IdentityFormatter),
    );

    let outcome = pipeline.process(&env).unwrap();
    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.properties["c"], "fine");
    assert_eq!(outcome.properties["a"], "${gone}");
}

#[test]
fn cycles_fail_instead_of_hanging() {
    let env: Environment = serde_json::from_str(
        r#"{
            "name": "app",
            "profiles": ["default"],
            "propertySources": [
                {"name": "s0", "source": {"a": "${b}", "b": "${a}"}}
            ]
        }"#,
    )
    .unwrap();

    let err = raw_pipeline().process(&env).unwrap_err();
    assert!(matches!(
        err,
        cloudenv::domain::CloudEnvError::CycleDetected { .. }
    ));
}

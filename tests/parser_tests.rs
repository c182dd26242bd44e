use pcf_trace_studio::trace::{parse_trace, validate_trace, EmissionSource, MentionClass};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_parse_full_document() {
    let raw = json!({
        "label": "Bicycle",
        "source": "Product",
        "methodology": "ISO 14067",
        "total": 42.5,
        "reference_impact_unit": "piece",
        "emissions_subtotal": {
            "A: Raw material supply": { "biogenic": 1.0, "non_biogenic": 20.0 },
            "C: Production": { "biogenic": 0.5, "non_biogenic": 21.0 }
        },
        "children": [
            {
                "emission_trace": {
                    "label": "Frame",
                    "source": "Material",
                    "total": 30.0
                },
                "quantity": 1.0
            }
        ],
        "mentions": [
            { "mention_class": "Info", "message": "verified supplier data" }
        ]
    });

    let trace = parse_trace(&raw).unwrap();

    assert_eq!(trace.label, "Bicycle");
    assert_eq!(trace.source, EmissionSource::Product);
    assert_eq!(trace.methodology, "ISO 14067");
    assert_eq!(trace.total, Some(42.5));
    assert_eq!(trace.reference_impact_unit, "piece");
    assert_eq!(trace.children.len(), 1);
    assert_eq!(trace.mentions.len(), 1);
    assert_eq!(trace.mentions[0].mention_class, MentionClass::Info);
}

#[test]
fn test_absent_collections_become_empty() {
    let trace = parse_trace(&json!({ "label": "x", "source": "UserEnergy" })).unwrap();

    assert!(trace.children.is_empty());
    assert!(trace.mentions.is_empty());
    assert!(trace.emissions_subtotal.is_empty());
    assert!(trace.total.is_none());
    assert_eq!(trace.methodology, "");
    assert_eq!(trace.reference_impact_unit, "");
}

#[test]
fn test_absent_quantity_defaults_to_one() {
    let raw = json!({
        "label": "x",
        "source": "Product",
        "children": [
            { "emission_trace": { "label": "y", "source": "Material" } }
        ]
    });

    let trace = parse_trace(&raw).unwrap();
    assert_eq!(trace.children[0].quantity, 1.0);
}

#[test]
fn test_subtotal_stage_order_is_preserved() {
    // Stage labels deliberately out of alphabetical order
    let raw = json!({
        "label": "x",
        "source": "Product",
        "emissions_subtotal": {
            "D: Usage": { "biogenic": 0.1, "non_biogenic": 0.2 },
            "A: Raw material supply": { "biogenic": 0.3, "non_biogenic": 0.4 },
            "C: Production": { "biogenic": 0.5, "non_biogenic": 0.6 }
        }
    });

    let trace = parse_trace(&raw).unwrap();
    let stages: Vec<&str> = trace.emissions_subtotal.iter().map(|(s, _)| s).collect();

    assert_eq!(
        stages,
        vec!["D: Usage", "A: Raw material supply", "C: Production"]
    );
}

#[test]
fn test_camel_case_aliases_accepted() {
    let raw = json!({
        "label": "x",
        "source": "ProductionEnergyReference",
        "referenceImpactUnit": "kWh",
        "emissionsSubtotal": {
            "C: Production": { "biogenic": 0.0, "non_biogenic": 1.0 }
        },
        "children": [
            {
                "emissionTrace": { "label": "y", "source": "Material" },
                "quantity": 2.0
            }
        ],
        "mentions": [
            { "mentionClass": "Error", "message": "missing factor" }
        ]
    });

    let trace = parse_trace(&raw).unwrap();

    assert_eq!(trace.reference_impact_unit, "kWh");
    assert_eq!(trace.emissions_subtotal.len(), 1);
    assert_eq!(trace.children.len(), 1);
    assert_eq!(trace.mentions[0].mention_class, MentionClass::Error);
    assert!(trace.source.is_reference());
}

#[test]
fn test_unknown_source_variant_is_rejected() {
    let raw = json!({ "label": "x", "source": "Teleportation" });
    assert!(parse_trace(&raw).is_err());
}

#[test]
fn test_serialization_round_trip() {
    let raw = json!({
        "label": "Bicycle",
        "source": "Product",
        "total": 42.5,
        "emissions_subtotal": {
            "D: Usage": { "biogenic": 0.1, "non_biogenic": 0.2 },
            "A: Raw material supply": { "biogenic": 0.3, "non_biogenic": 0.4 }
        },
        "children": [
            { "emission_trace": { "label": "Frame", "source": "Material" }, "quantity": 3.0 }
        ]
    });

    let trace = parse_trace(&raw).unwrap();
    let serialized = serde_json::to_value(&trace).unwrap();
    let reparsed = parse_trace(&serialized).unwrap();

    assert_eq!(trace, reparsed);
    let stages: Vec<&str> = reparsed.emissions_subtotal.iter().map(|(s, _)| s).collect();
    assert_eq!(stages, vec!["D: Usage", "A: Raw material supply"]);
}

#[test]
fn test_validate_collects_findings_without_failing() {
    let raw = json!({
        "label": "x",
        "source": "Product",
        "total": 1.0,
        "children": [
            {
                "emission_trace": {
                    "label": "y",
                    "source": "Material",
                    "emissions_subtotal": {
                        "C: Production": { "biogenic": -0.5, "non_biogenic": 0.5 }
                    }
                },
                "quantity": -2.0
            }
        ]
    });

    let trace = parse_trace(&raw).unwrap();
    let findings = validate_trace(&trace);

    assert_eq!(findings.len(), 2);
}

use std::fs;

use tempfile::tempdir;

use lamina_cli::{Args, View};

const TOPOLOGY_JSON: &str = r#"{
  "ietf-network:networks": {
    "network": [
      {
        "network-id": "logical",
        "network-types": {},
        "node": [
          {
            "node-id": "C",
            "ietf-network-topology:termination-point": [
              {
                "tp-id": "c1",
                "supporting-termination-point": [
                  { "network-ref": "physical", "node-ref": "A", "tp-ref": "a1" }
                ]
              }
            ],
            "supporting-node": [
              { "network-ref": "physical", "node-ref": "A" }
            ]
          }
        ]
      },
      {
        "network-id": "physical",
        "network-types": {},
        "node": [
          {
            "node-id": "A",
            "ietf-network-topology:termination-point": [ { "tp-id": "a1" } ]
          },
          {
            "node-id": "B",
            "ietf-network-topology:termination-point": [ { "tp-id": "b1" } ]
          }
        ],
        "ietf-network-topology:link": [
          {
            "link-id": "A,a1,B,b1",
            "source": { "source-node": "A", "source-tp": "a1" },
            "destination": { "dest-node": "B", "dest-tp": "b1" }
          }
        ]
      }
    ]
  }
}"#;

fn args_for(input: &str, output: &str, view: View) -> Args {
    Args {
        input: input.to_string(),
        output: output.to_string(),
        view,
        reverse: false,
        deep: false,
        layout: None,
        save_layout: false,
        target: None,
        target_layer: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_every_view() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("topology.json");
    fs::write(&input, TOPOLOGY_JSON).expect("Failed to write fixture");
    let input = input.to_string_lossy().to_string();

    for view in [View::Topology, View::Dependency, View::Nested] {
        let output = temp_dir
            .path()
            .join(format!("{view:?}.json"))
            .to_string_lossy()
            .to_string();

        lamina_cli::run(&args_for(&input, &output, view))
            .unwrap_or_else(|e| panic!("{view:?} view failed: {e}"));

        let payload = fs::read_to_string(&output).expect("Output file missing");
        let value: serde_json::Value =
            serde_json::from_str(&payload).expect("Output is not valid JSON");
        assert!(!value.is_null());
    }
}

#[test]
fn e2e_smoke_test_nested_layout_round_trip() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("topology.json");
    fs::write(&input, TOPOLOGY_JSON).expect("Failed to write fixture");

    let layout = temp_dir.path().join("topology-layout.json");
    let output = temp_dir.path().join("nested.json");

    let mut args = args_for(
        &input.to_string_lossy(),
        &output.to_string_lossy(),
        View::Nested,
    );
    args.layout = Some(layout.to_string_lossy().to_string());
    args.save_layout = true;

    // First run creates the layout file from synthetic assignments.
    lamina_cli::run(&args).expect("First nested run failed");
    let saved = fs::read_to_string(&layout).expect("Layout file was not written");
    let file: serde_json::Value = serde_json::from_str(&saved).expect("Bad layout JSON");
    assert!(file["shallow"]["standard"]["layout"]["logical/C"].is_object());

    // Second run consumes it without error.
    lamina_cli::run(&args).expect("Second nested run failed");
}

#[test]
fn e2e_smoke_test_invalid_document_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.json");
    fs::write(&input, "{ not json").expect("Failed to write fixture");

    let output = temp_dir.path().join("out.json");
    let result = lamina_cli::run(&args_for(
        &input.to_string_lossy(),
        &output.to_string_lossy(),
        View::Topology,
    ));
    assert!(result.is_err());
}

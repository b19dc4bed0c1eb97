//! Purpose: Built-in demonstration document covering every tag and drop rule.
//! Exports: `SAMPLE_INPUT`.
//! Role: Backs `attrjson --sample` and doubles as a regression fixture.
//! Invariants: Editing this text changes CLI output; keep the test below in sync.

pub const SAMPLE_INPUT: &str = r#"{
  "number_1": {
    "N": "1.50"
  },
  "string_1": {
    "S": "784498 "
  },
  "string_2": {
    "S": "2014-07-16T20:55:46Z"
  },
  "map_1": {
    "M": {
      "bool_1": {
        "BOOL": "truthy"
      },
      "null_1": {
        "NULL ": "true"
      },
      "list_1": {
        "L": [
          { "S": "" },
          { "N": "011" },
          { "N": "5215s" },
          { "BOOL": "f" },
          { "NULL": "0" }
        ]
      }
    }
  },
  "list_2": {
    "L": "noop"
  },
  "list_3": {
    "L": [
      "noop"
    ]
  },
  "": {
    "S": "noop"
  }
}"#;

//! End-to-end resource schema tests.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use provinfer::{InferError, InferOptions, ProviderResource, SchemaAssembler};
use provinfer_core::{Annotated, Annotator, Describe, TypeInfo};

struct Echo;
struct EchoArgs;
struct EchoState;

impl Describe for Echo {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>().resource().build()
    }
}

impl Describe for EchoArgs {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .field::<String>("field", "name=field")
            .build()
    }
}

impl Describe for EchoState {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .field::<String>("out", "name=out,secret")
            .build()
    }
}

impl ProviderResource for Echo {
    type Inputs = EchoArgs;
    type Outputs = EchoState;
}

#[test]
fn test_secret_output_and_plain_input() {
    let schema = SchemaAssembler::default()
        .resource::<Echo>()
        .into_result()
        .expect("schema should assemble");

    assert_eq!(schema.required_outputs, ["out"]);
    assert_eq!(schema.required_inputs, ["field"]);
    assert!(schema.output_properties["out"].secret);
    assert!(!schema.input_properties["field"].secret);
    insta::assert_json_snapshot!(schema, @r#"
    {
      "properties": {
        "out": {
          "type": "string",
          "secret": true
        }
      },
      "required": [
        "out"
      ],
      "inputProperties": {
        "field": {
          "type": "string"
        }
      },
      "requiredInputs": [
        "field"
      ]
    }
    "#);
}

struct Bucket;
struct BucketArgs;
struct BucketState;
struct Lifecycle;
struct StorageClass;

impl Describe for Bucket {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .resource()
            .annotated::<Self>()
            .build()
    }
}

impl Annotated for Bucket {
    fn annotate(a: &mut Annotator) {
        a.describe_type("An object storage bucket.")
            .set_token("storage", "Bucket");
    }
}

impl Describe for BucketArgs {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .field::<String>("bucket_name", "replaceOnChanges")
            .field::<Option<String>>("region", "optional")
            .field::<Option<Vec<Lifecycle>>>("lifecycle_rules", "optional")
            .field::<std::collections::BTreeMap<String, String>>("tags", "optional")
            .field::<Option<StorageClass>>("storage_class", "optional")
            .field::<u64>("generation", "internal")
            .annotated::<Self>()
            .build()
    }
}

impl Annotated for BucketArgs {
    fn annotate(a: &mut Annotator) {
        a.describe("bucketName", "Globally unique name of the bucket.")
            .describe("region", "Where the bucket lives.")
            .set_default("region", "us-east-1")
            .set_default_env("region", ["STORAGE_REGION"]);
    }
}

impl Describe for BucketState {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .field::<String>("bucket_name", "")
            .field::<String>("arn", "")
            .field::<serde_json::Value>("policy", "optional")
            .build()
    }
}

impl Describe for Lifecycle {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .field::<i32>("expire_after_days", "")
            .build()
    }
}

impl Describe for StorageClass {
    fn describe() -> TypeInfo {
        TypeInfo::enumeration::<Self, String>()
            .value("Standard", "STANDARD")
            .value("Archive", "ARCHIVE")
            .build()
    }
}

impl ProviderResource for Bucket {
    type Inputs = BucketArgs;
    type Outputs = BucketState;
}

#[test]
fn test_metadata_references_and_internal_fields() {
    let assembler = SchemaAssembler::new(InferOptions::new("cloud"));
    let schema = assembler.resource::<Bucket>().into_result().unwrap();

    assert!(!schema.input_properties.contains_key("generation"));
    insta::assert_json_snapshot!(schema, @r##"
    {
      "description": "An object storage bucket.",
      "properties": {
        "bucketName": {
          "type": "string"
        },
        "arn": {
          "type": "string"
        },
        "policy": {
          "$ref": "pulumi.json#/Any"
        }
      },
      "required": [
        "bucketName",
        "arn"
      ],
      "inputProperties": {
        "bucketName": {
          "type": "string",
          "replaceOnChanges": true,
          "description": "Globally unique name of the bucket."
        },
        "region": {
          "type": "string",
          "description": "Where the bucket lives.",
          "default": "us-east-1",
          "defaultInfo": {
            "environment": [
              "STORAGE_REGION"
            ]
          }
        },
        "lifecycleRules": {
          "type": "array",
          "items": {
            "$ref": "#/types/cloud:index:Lifecycle"
          }
        },
        "tags": {
          "type": "object",
          "additionalProperties": {
            "type": "string"
          }
        },
        "storageClass": {
          "$ref": "#/types/cloud:index:StorageClass"
        }
      },
      "requiredInputs": [
        "bucketName"
      ]
    }
    "##);
}

struct Broken;
struct BrokenArgs;
struct BrokenState;

impl Describe for Broken {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>().resource().build()
    }
}

impl Describe for BrokenArgs {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .field::<std::collections::HashMap<i64, String>>("index", "")
            .field::<String>("name", "name,colour=blue")
            .build()
    }
}

impl Describe for BrokenState {
    fn describe() -> TypeInfo {
        TypeInfo::structure::<Self>()
            .field::<char>("initial", "")
            .field::<String>("name", "")
            .build()
    }
}

impl ProviderResource for Broken {
    type Inputs = BrokenArgs;
    type Outputs = BrokenState;
}

#[test]
fn test_every_defect_is_reported() {
    let errors = SchemaAssembler::default()
        .resource::<Broken>()
        .into_result()
        .unwrap_err();

    let roots: Vec<&str> = errors
        .iter()
        .map(|e| match e.root() {
            InferError::UnsupportedKind { .. } => "unsupported",
            InferError::MapKey { .. } => "map key",
            InferError::TagParse { .. } => "tag",
            _ => "other",
        })
        .collect();
    assert_eq!(roots, ["unsupported", "map key", "tag"]);

    let report = errors.to_string();
    assert!(report.starts_with("3 errors occurred:"), "{report}");
    assert!(report.contains("could not infer output type 'BrokenState'"));
    assert!(report.contains("could not infer input type 'BrokenArgs'"));
}

use std::fs;
use std::path::Path;

use krosbridge_codegen::{
    Action, ArrayType, Builder, Error, Field, GeneratorConfig, Message, Schema, SchemaManifest,
    Service, TypeName,
};

fn read(root: &Path, relative: &str) -> String {
    let path = root.join(relative);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e))
}

fn generator(root: &Path, prefix: &str) -> krosbridge_codegen::Generator {
    GeneratorConfig::builder()
        .package_prefix(prefix)
        .output_dir(root)
        .build()
        .expect("Failed to build generator")
}

#[test]
fn test_add_two_ints_service() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "com.example");

    let srv = Schema::Service(Service {
        name: TypeName::from("demo/srv/AddTwoInts"),
        request: vec![Field::new("int64", "a"), Field::new("int64", "b")],
        response: vec![Field::new("int64", "sum")],
    });
    generator.generate(&srv).unwrap();
    assert_eq!(generator.report().written.len(), 3);

    let request = read(temp.path(), "com/example/demo/srv/AddTwoIntsRequest.kt");
    assert!(request.contains("package com.example.demo.srv\n"));
    assert!(request.contains(
        "public data class AddTwoIntsRequest(\n  public val a: Long,\n  public val b: Long\n) : ServiceRequest()"
    ));

    let response = read(temp.path(), "com/example/demo/srv/AddTwoIntsResponse.kt");
    assert!(response.contains(
        "public data class AddTwoIntsResponse(\n  public val sum: Long\n) : ServiceResponse()"
    ));

    let wrapper = read(temp.path(), "com/example/demo/srv/AddTwoInts.kt");
    assert!(wrapper.contains(
        "public suspend fun call(a: Long, b: Long): Pair<AddTwoIntsResponse?, Boolean>"
    ));
}

#[test]
fn test_constant_goes_to_companion_object() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "");

    let msg = Schema::Message(Message {
        name: TypeName::from("demo/msg/Log"),
        fields: vec![
            Field::constant("int32", "DEBUG", "0"),
            Field::new("string", "text"),
        ],
    });
    generator.generate(&msg).unwrap();

    let payload = read(temp.path(), "demo/msg/Log.kt");
    assert!(payload.contains("public val DEBUG: Long = 0"));
    assert!(payload.contains("public data class Log(\n  public val text: String\n) : Message()"));

    let topic = read(temp.path(), "demo/msg/LogTopic.kt");
    assert!(topic.contains("public suspend fun publish(text: String)"));
    assert!(!topic.contains("DEBUG"));
}

#[test]
fn test_well_known_namespace_ignores_prefix_and_builtins_follow_it() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "com.example.custom");

    let msg = Schema::Message(Message {
        name: TypeName::from("robot/msg/Target"),
        fields: vec![
            Field::new("Header", "header"),
            Field::new("geometry_msgs/Pose", "pose"),
        ],
    });
    generator.generate(&msg).unwrap();

    let payload = read(temp.path(), "com/example/custom/robot/msg/Target.kt");
    assert!(payload.contains("import com.github.thoebert.krosbridge.messages.geometry_msgs.msg.Pose\n"));
    assert!(payload.contains("import com.example.custom.std_msgs.msg.Header\n"));
    assert!(payload.contains("public val pose: Pose"));
}

#[test]
fn test_shared_nested_type_emitted_once() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "");

    let inner = || {
        Field::new("Reading", "reading").with_children(vec![
            Field::new("float64", "value"),
            Field::new("string", "unit"),
        ])
    };
    let schemas = vec![
        Schema::Message(Message {
            name: TypeName::from("sensors/msg/Temperature"),
            fields: vec![inner()],
        }),
        Schema::Message(Message {
            name: TypeName::from("sensors/msg/Pressure"),
            fields: vec![inner()],
        }),
    ];
    let report = generator.generate_all(&schemas).unwrap().clone();

    let nested = temp.path().join("sensors/msg/Reading.kt");
    assert_eq!(report.written.iter().filter(|p| **p == nested).count(), 1);
    assert_eq!(report.skipped, vec!["sensors.msg.Reading".to_string()]);

    let reading = read(temp.path(), "sensors/msg/Reading.kt");
    assert!(reading.contains(
        "public data class Reading(\n  public val value: Double,\n  public val unit: String\n)\n"
    ));
    assert!(!reading.contains(" : "));

    let temperature = read(temp.path(), "sensors/msg/Temperature.kt");
    assert!(temperature.contains("public val reading: Reading"));
}

#[test]
fn test_nested_type_emitted_before_parent() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "");

    let msg = Schema::Message(Message {
        name: TypeName::from("demo/msg/Outer"),
        fields: vec![
            Field::new("Inner", "items")
                .with_array(ArrayType::Unbounded)
                .with_children(vec![Field::new("uint16", "id")]),
        ],
    });
    generator.generate(&msg).unwrap();

    let written = &generator.report().written;
    assert_eq!(written[0], temp.path().join("demo/msg/Inner.kt"));
    assert_eq!(written[1], temp.path().join("demo/msg/Outer.kt"));
    assert_eq!(written[2], temp.path().join("demo/msg/OuterTopic.kt"));

    let outer = read(temp.path(), "demo/msg/Outer.kt");
    assert!(outer.contains("public val items: List<Inner>"));
    let inner = read(temp.path(), "demo/msg/Inner.kt");
    assert!(inner.contains("public val id: Int"));
}

#[test]
fn test_self_inlined_type_terminates() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "");

    // Node inlines itself through `child`, which inlines Node again
    let node = |children| Field::new("Node", "child").with_children(children);
    let msg = Schema::Message(Message {
        name: TypeName::from("tree/msg/Node"),
        fields: vec![
            Field::new("int32", "value"),
            node(vec![Field::new("int32", "value"), node(vec![Field::new("int32", "value")])]),
        ],
    });
    generator.generate(&msg).unwrap();

    let node = read(temp.path(), "tree/msg/Node.kt");
    assert!(node.contains("public val child: Node"));
    assert!(node.contains(" : Message()"));
    assert!(
        generator
            .report()
            .skipped
            .contains(&"tree.msg.Node".to_string())
    );
}

#[test]
fn test_invalid_constant_type_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "");

    let msg = Schema::Message(Message {
        name: TypeName::from("demo/msg/Bad"),
        fields: vec![Field::constant("demo/Point", "ORIGIN", "0")],
    });
    let err = generator.generate(&msg).unwrap_err();
    match err {
        Error::InvalidConstantType { name, ty } => {
            assert_eq!(name, "ORIGIN");
            assert_eq!(ty, TypeName::from("demo/Point"));
        }
        other => panic!("Expected InvalidConstantType, got {:?}", other),
    }
    assert!(generator.report().written.is_empty());
    assert!(!temp.path().join("demo/msg/BadTopic.kt").exists());
}

#[test]
fn test_existing_nested_file_is_kept() {
    let temp = tempfile::tempdir().unwrap();
    let existing = temp.path().join("demo/msg/Inner.kt");
    fs::create_dir_all(existing.parent().unwrap()).unwrap();
    fs::write(&existing, "// hand written\n").unwrap();

    let msg = Schema::Message(Message {
        name: TypeName::from("demo/msg/Outer"),
        fields: vec![Field::new("Inner", "inner").with_children(vec![Field::new("bool", "on")])],
    });

    let mut keep = generator(temp.path(), "");
    keep.generate(&msg).unwrap();
    assert_eq!(fs::read_to_string(&existing).unwrap(), "// hand written\n");
    assert_eq!(keep.report().skipped, vec!["demo.msg.Inner".to_string()]);

    let mut overwrite = GeneratorConfig::builder()
        .output_dir(temp.path())
        .skip_existing(false)
        .build()
        .unwrap();
    overwrite.generate(&msg).unwrap();
    assert!(fs::read_to_string(&existing).unwrap().contains("public data class Inner("));
}

#[test]
fn test_action_from_manifest() {
    let temp = tempfile::tempdir().unwrap();
    let manifest_path = temp.path().join("schemas.json");
    let manifest = SchemaManifest::new(vec![Schema::Action(Action {
        name: TypeName::from("demo/action/Fibonacci"),
        goal: vec![Field::new("int32", "order")],
        result: vec![Field::new("int32", "sequence").with_array(ArrayType::Unbounded)],
        feedback: vec![Field::new("int32", "partial").with_array(ArrayType::Unbounded)],
    })]);
    fs::write(&manifest_path, manifest.to_json_string().unwrap()).unwrap();

    let loaded = SchemaManifest::from_path(&manifest_path).unwrap();
    let out = temp.path().join("kotlin");
    let mut generator = generator(&out, "com.example");
    generator.generate_all(&loaded.schemas).unwrap();

    for class in ["FibonacciGoal", "FibonacciResult", "FibonacciFeedback", "Fibonacci"] {
        assert!(
            out.join(format!("com/example/demo/action/{}.kt", class)).exists(),
            "{} not generated",
            class
        );
    }
    let goal = read(&out, "com/example/demo/action/FibonacciGoal.kt");
    assert!(goal.contains(") : ActionGoal()"));
    let wrapper = read(&out, "com/example/demo/action/Fibonacci.kt");
    assert!(wrapper.contains("public suspend fun sendGoal(feedback: Boolean, order: Long): Flow<ActionType>"));
    assert!(wrapper.contains("isResult: Boolean = true"));
}

#[test]
fn test_schema_payload_replaces_earlier_inline_class() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "");

    let fields = || vec![Field::new("bool", "on")];
    let schemas = vec![
        Schema::Message(Message {
            name: TypeName::from("demo/msg/Outer"),
            fields: vec![Field::new("Inner", "inner").with_children(fields())],
        }),
        Schema::Message(Message {
            name: TypeName::from("demo/msg/Inner"),
            fields: fields(),
        }),
    ];
    let report = generator.generate_all(&schemas).unwrap();
    assert!(report.skipped.is_empty());

    let inner = read(temp.path(), "demo/msg/Inner.kt");
    assert!(inner.contains("public data class Inner(\n  public val on: Boolean\n) : Message()"));
    let topic = read(temp.path(), "demo/msg/InnerTopic.kt");
    assert!(topic.contains("GenericTopic<Inner>"));
}

#[test]
fn test_schema_payload_is_not_replaced_by_later_inline_class() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "");

    let schemas = vec![
        Schema::Message(Message {
            name: TypeName::from("demo/msg/Inner"),
            fields: vec![Field::new("bool", "on")],
        }),
        Schema::Message(Message {
            name: TypeName::from("demo/msg/Outer"),
            fields: vec![Field::new("Inner", "inner").with_children(vec![Field::new("bool", "on")])],
        }),
    ];
    let report = generator.generate_all(&schemas).unwrap();
    assert_eq!(report.skipped, vec!["demo.msg.Inner".to_string()]);
    assert!(read(temp.path(), "demo/msg/Inner.kt").contains(") : Message()"));
}

#[test]
fn test_inline_well_known_type_is_not_emitted() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "com.example");

    let msg = Schema::Message(Message {
        name: TypeName::from("robot/msg/Goal"),
        fields: vec![
            Field::new("geometry_msgs/Pose", "pose").with_children(vec![Field::new("float64", "x")]),
        ],
    });
    generator.generate(&msg).unwrap();

    assert!(!temp.path().join("com/github").exists());
    assert_eq!(generator.report().written.len(), 2);
    let goal = read(temp.path(), "com/example/robot/msg/Goal.kt");
    assert!(goal.contains("import com.github.thoebert.krosbridge.messages.geometry_msgs.msg.Pose\n"));
}

#[test]
fn test_reserved_parameter_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let mut generator = generator(temp.path(), "");

    let action = Schema::Action(Action {
        name: TypeName::from("demo/action/Track"),
        goal: vec![Field::new("bool", "feedback")],
        result: vec![],
        feedback: vec![],
    });
    let err = generator.generate(&action).unwrap_err();
    assert!(matches!(
        err,
        Error::ReservedParameter { operation: "sendGoal", ref name, .. } if name == "feedback"
    ));
    assert!(generator.report().written.is_empty());
    assert!(!temp.path().join("demo").exists());
}

#![allow(non_snake_case)]

use super::*;
use crate::test_support::*;
use prost_types::field_descriptor_proto::Type;
use test_case::test_case;
use twirpts_core::{CompileError, RoutePrefix};

fn v6() -> GeneratorConfig {
    GeneratorConfig {
        twirp_version: Some("v6".to_string()),
        ..GeneratorConfig::default()
    }
}

// ============================================================================
// module_filename
// ============================================================================

#[test_case("svc/ping.proto", "ping.ts" ; "proto keeps basename")]
#[test_case("ping.proto", "ping.ts" ; "bare proto")]
#[test_case("a/b/legacy.protodevel", "legacy.ts" ; "protodevel")]
#[test_case("svc/schema.txt", "svc/schema.txt.ts" ; "other extension keeps path")]
#[test_case("svc/noext", "svc/noext.ts" ; "no extension")]
#[test_case("svc/notproto", "svc/notproto.ts" ; "suffix without dot")]
fn module_filename___maps_schema_name(schema: &str, expected: &str) {
    assert_eq!(module_filename(schema), expected);
}

// ============================================================================
// Generator
// ============================================================================

#[test]
fn generate___ping___emits_one_module() {
    let files = Generator::default().generate(&ping_file()).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "ping.ts");
    assert!(files[0].content.contains("export class PingerClient implements Pinger"));
}

#[test]
fn generate___timestamp_proto___emits_nothing() {
    let timestamp = file(
        TIMESTAMP_PROTO,
        "google.protobuf",
        vec![message(
            "Timestamp",
            vec![scalar("seconds", Type::Int64), scalar("nanos", Type::Int32)],
        )],
        vec![],
        vec![],
    );

    let files = Generator::default().generate(&timestamp).unwrap();

    assert!(files.is_empty());
}

#[test]
fn generate___v6___uses_empty_prefix() {
    let files = Generator::new(v6()).generate(&ping_file()).unwrap();

    assert!(files[0].content.contains("private pathPrefix = \"/svc.Pinger/\";"));
}

#[test]
fn compile___ping___flags_payloads() {
    let ctx = Generator::default().compile(&ping_file()).unwrap();

    let (marshal, unmarshal) = ctx.flagged_models();
    assert_eq!(marshal, vec!["PingRequest"]);
    assert_eq!(unmarshal, vec!["PongResponse"]);
    assert_eq!(ctx.route_prefix, RoutePrefix::Twirp);
}

#[test]
fn compile___missing_method_input___is_malformed_schema() {
    let broken = file(
        "broken.proto",
        "svc",
        vec![message("PongResponse", vec![])],
        vec![],
        vec![service(
            "Pinger",
            vec![method("Ping", ".svc.PingRequest", ".svc.PongResponse")],
        )],
    );

    let result = Generator::default().compile(&broken);

    match result {
        Err(CompileError::MalformedSchema { type_name, context }) => {
            assert_eq!(type_name, "PingRequest");
            assert_eq!(context, "input of method Pinger.Ping");
        }
        other => panic!("expected MalformedSchema, got {other:?}"),
    }
}

#[test]
fn generate_all___one_failure___returns_no_files() {
    let broken = file(
        "broken.proto",
        "svc",
        vec![message("Holder", vec![message_field("x", ".svc.Missing")])],
        vec![],
        vec![service("S", vec![method("Do", ".svc.Holder", ".svc.Holder")])],
    );

    let result = Generator::default().generate_all([&ping_file(), &broken]);

    assert!(matches!(result, Err(CompileError::MalformedSchema { .. })));
}

#[test]
fn generate_all___many_files___keeps_input_order() {
    let other = file(
        "svc/other.proto",
        "svc",
        vec![message("Empty", vec![])],
        vec![],
        vec![],
    );

    let files = Generator::default()
        .generate_all([&ping_file(), &other])
        .unwrap();

    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["ping.ts", "other.ts"]);
}

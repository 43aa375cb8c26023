//! Descriptor fixtures shared by the unit tests

use prost::Message;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet,
    MethodDescriptorProto, ServiceDescriptorProto,
};
use std::path::{Path, PathBuf};

fn field(name: &str, ty: Type, type_name: Option<&str>) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        r#type: Some(ty as i32),
        type_name: type_name.map(str::to_string),
        label: Some(Label::Optional as i32),
        ..Default::default()
    }
}

fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

fn single_method_file(
    name: &str,
    messages: Vec<DescriptorProto>,
    service: &str,
    method: (&str, &str, &str),
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some("svc".to_string()),
        message_type: messages,
        service: vec![ServiceDescriptorProto {
            name: Some(service.to_string()),
            method: vec![MethodDescriptorProto {
                name: Some(method.0.to_string()),
                input_type: Some(method.1.to_string()),
                output_type: Some(method.2.to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

/// `svc.Pinger` with `Ping(PingRequest) -> PongResponse`
pub fn ping_file() -> FileDescriptorProto {
    single_method_file(
        "svc/ping.proto",
        vec![
            message("PingRequest", vec![field("message", Type::String, None)]),
            message("PongResponse", vec![field("reply", Type::String, None)]),
        ],
        "Pinger",
        ("Ping", ".svc.PingRequest", ".svc.PongResponse"),
    )
}

/// A file whose only message refers to an undeclared type
pub fn broken_file() -> FileDescriptorProto {
    single_method_file(
        "svc/broken.proto",
        vec![message(
            "Holder",
            vec![field("missing", Type::Message, Some(".svc.Missing"))],
        )],
        "Broken",
        ("Do", ".svc.Holder", ".svc.Holder"),
    )
}

/// Serialize `files` as a descriptor set at `dir/name`
pub fn write_set(dir: &Path, name: &str, files: Vec<FileDescriptorProto>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, FileDescriptorSet { file: files }.encode_to_vec()).unwrap();
    path
}

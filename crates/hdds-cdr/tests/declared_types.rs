// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Generated type metadata: descriptors, identities, aliases and services.

use hdds_cdr::{
    descriptor, descriptor_of, deserialize, identity, serialize, type_hash, type_name, Cardinality,
    Describe, NamedType, PrimitiveKind, Sequence, ServiceType, TypeKind,
};

hdds_cdr::schema! {
    message Imu = ("sensor_msgs::msg::dds_::Imu_", "RIHS01_7d9a00ff") {
        /// Orientation quaternion
        orientation: Quaternion,
        orientation_covariance: [float64; 9],
        label: Label,
        window: [Seconds; 2],
        raw: sequence<uint8>,
    }

    message Quaternion = ("geometry_msgs::msg::dds_::Quaternion_", "RIHS01_8a76") {
        x: float64,
        y: float64,
        z: float64,
        w: float64,
    }

    alias Seconds = ("demo_msgs::msg::dds_::Seconds_", "RIHS01_0010") int64;
    alias Label = ("demo_msgs::msg::dds_::Label_", "RIHS01_0011") string;
    alias Stamp = ("demo_msgs::msg::dds_::Stamp_", "RIHS01_0012") Quaternion;

    /// Adds two integers
    service AddTwoInts = ("example_interfaces::srv::dds_::AddTwoInts_", "RIHS01_e118de6b") {
        request {
            a: int64,
            b: int64,
        }
        reply {
            sum: int64,
        }
    }

    service SetName = ("demo_srvs::srv::dds_::SetName_", "RIHS01_0020") {
        request {
            name: string,
        }
        reply {
            accepted: bool,
            previous: sequence<string>,
        }
    }
}

#[test]
fn test_identity_constants() {
    assert_eq!(Imu::TYPE_NAME, "sensor_msgs::msg::dds_::Imu_");
    assert_eq!(type_hash::<Imu>(), "RIHS01_7d9a00ff");
    assert_eq!(type_name::<Seconds>(), "demo_msgs::msg::dds_::Seconds_");
    assert_eq!(
        identity::<AddTwoInts>().name,
        "example_interfaces::srv::dds_::AddTwoInts_"
    );
    assert!(Quaternion::IDENTITY.matches("geometry_msgs::msg::dds_::Quaternion_", "RIHS01_8a76"));
    assert!(Quaternion::IDENTITY
        .verify("geometry_msgs::msg::dds_::Quaternion_", "RIHS01_0000")
        .is_err());
}

#[test]
fn test_compound_descriptor() {
    let imu = descriptor_of::<Imu>();
    assert_eq!(imu.name, "Imu");
    let names: Vec<_> = imu.fields().iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        ["orientation", "orientation_covariance", "label", "window", "raw"]
    );

    let orientation = imu.field("orientation").unwrap();
    assert_eq!(orientation.cardinality, Cardinality::Scalar);
    assert_eq!(orientation.element.name, "Quaternion");
    assert_eq!(orientation.element.fields().len(), 4);

    let covariance = imu.field("orientation_covariance").unwrap();
    assert_eq!(covariance.cardinality, Cardinality::FixedArray(9));
    assert!(matches!(
        covariance.element.kind,
        TypeKind::Primitive(PrimitiveKind::Float64)
    ));

    let raw = imu.field("raw").unwrap();
    assert_eq!(raw.cardinality, Cardinality::Sequence);
    assert_eq!(raw.element.name, descriptor::UINT8.name);

    assert!(imu.is_variable_size());
    assert_eq!(Quaternion::DESCRIPTOR.fixed_size(), Some(32));
    assert_eq!(
        Quaternion::DESCRIPTOR.to_string(),
        "message Quaternion { x: float64, y: float64, z: float64, w: float64 }"
    );
}

#[test]
fn test_alias_descriptors_keep_target_shape() {
    let seconds = descriptor_of::<Seconds>();
    assert_eq!(seconds.name, "Seconds");
    assert!(matches!(
        seconds.kind,
        TypeKind::Primitive(PrimitiveKind::Int64)
    ));

    assert!(matches!(descriptor_of::<Label>().kind, TypeKind::String));
    assert_eq!(descriptor_of::<Stamp>().fields().len(), 4);

    let window = descriptor_of::<Imu>().field("window").unwrap();
    assert_eq!(window.element.name, "Seconds");
}

#[test]
fn test_alias_is_a_transparent_newtype() {
    let mut buf = [0u8; 16];
    let len = serialize(&mut buf, &Seconds(-2)).unwrap();
    assert_eq!(&buf[..len], &[0, 1, 0, 0, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);

    let mut rx = Seconds::default();
    deserialize(&buf[..len], &mut rx).unwrap();
    assert_eq!(rx, Seconds::from(-2));

    let len = serialize(&mut buf, &Label("ok")).unwrap();
    let mut label = Label::default();
    deserialize(&buf[..len], &mut label).unwrap();
    assert_eq!(label.0, "ok");
    assert_eq!(core::mem::size_of::<Seconds>(), core::mem::size_of::<i64>());
}

#[test]
fn test_message_with_aliases_round_trips() {
    let raw = [0xDEu8, 0xAD];
    let msg = Imu {
        orientation: Quaternion {
            x: 0.0,
            y: 0.0,
            z: 0.7071,
            w: 0.7071,
        },
        orientation_covariance: [0.01; 9],
        label: Label("imu0"),
        window: [Seconds(10), Seconds(20)],
        raw: Sequence::new(&raw),
    };
    let mut buf = [0u8; 256];
    let len = serialize(&mut buf, &msg).unwrap();

    let mut storage = [0u8; 16];
    let mut rx = Imu {
        raw: Sequence::with_storage(&mut storage),
        ..Imu::default()
    };
    deserialize(&buf[..len], &mut rx).unwrap();
    assert_eq!(rx, msg);
}

#[test]
fn test_service_request_and_reply_are_independent() {
    let request = AddTwoIntsRequest { a: 2, b: 40 };
    let reply = AddTwoIntsReply { sum: 42 };

    let mut req_buf = [0u8; 32];
    let req_len = serialize(&mut req_buf, &request).unwrap();
    assert_eq!(req_len, 4 + 16);

    let mut rep_buf = [0u8; 32];
    let rep_len = serialize(&mut rep_buf, &reply).unwrap();
    assert_eq!(rep_len, 4 + 8);
    assert_eq!(&rep_buf[4..12], &42i64.to_le_bytes());

    let mut decoded = AddTwoIntsRequest::default();
    deserialize(&req_buf[..req_len], &mut decoded).unwrap();
    assert_eq!(decoded, request);

    let req = descriptor_of::<AddTwoIntsRequest>();
    assert!(matches!(req.kind, TypeKind::ServiceRequest { service: "AddTwoInts", .. }));
    let rep = descriptor_of::<AddTwoIntsReply>();
    assert!(matches!(rep.kind, TypeKind::ServiceReply { service: "AddTwoInts", .. }));
    assert_eq!(rep.fields()[0].name, "sum");
}

fn request_size<S: ServiceType>(request: &S::Request<'_>) -> usize {
    hdds_cdr::encoded_size(request).unwrap()
}

#[test]
fn test_service_type_binds_request_and_reply() {
    assert_eq!(request_size::<AddTwoInts>(&AddTwoIntsRequest { a: 1, b: 1 }), 20);
    assert_eq!(request_size::<SetName>(&SetNameRequest { name: "abc" }), 4 + 4 + 4);
    assert_eq!(SetName::TYPE_NAME, "demo_srvs::srv::dds_::SetName_");

    let previous = ["old"];
    let reply = SetNameReply {
        accepted: true,
        previous: Sequence::new(&previous),
    };
    let mut buf = [0u8; 64];
    let len = serialize(&mut buf, &reply).unwrap();

    let mut storage = [""; 2];
    let mut rx: <SetName as ServiceType>::Reply<'_> = SetNameReply {
        accepted: false,
        previous: Sequence::with_storage(&mut storage),
    };
    deserialize(&buf[..len], &mut rx).unwrap();
    assert!(rx.accepted);
    assert_eq!(rx.previous.as_slice(), &["old"]);
}

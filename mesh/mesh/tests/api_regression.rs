//! API Regression Tests for the Tetra mesh crates
//!
//! These tests pin the public API and the behavior clients rely on. They are
//! organized in tiers following the pipeline:
//!
//! - Tier 1: Foundation (mesh-types, bounding boxes)
//! - Tier 2: Generation (mesh-generate)
//! - Tier 3: Serialization (mesh-io)
//! - Tier 4: Conversion service (mesh-convert)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs a version bump.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use mesh::{convert, generate, io, prelude::*, types};

// =============================================================================
// TIER 1: Foundation - Basic Types and Bounding Boxes
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn vertex_creation_and_access() {
        let v = types::Vertex::from_coords(1.0, 2.0, 3.0);
        assert!((v.position.x - 1.0).abs() < f64::EPSILON);
        assert!((v.position.y - 2.0).abs() < f64::EPSILON);
        assert!((v.position.z - 3.0).abs() < f64::EPSILON);

        let point = types::Point3::new(4.0, 5.0, 6.0);
        let v2 = types::Vertex::new(point);
        assert!((v2.position.x - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn indexed_mesh_construction() {
        let mesh = types::IndexedMesh::new();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());

        let vertices = vec![
            types::Vertex::from_coords(0.0, 0.0, 0.0),
            types::Vertex::from_coords(1.0, 0.0, 0.0),
            types::Vertex::from_coords(0.0, 1.0, 0.0),
        ];
        let mesh = types::IndexedMesh::from_parts(vertices, vec![[0, 1, 2]]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn single_point_bounding_box() {
        let mesh = types::IndexedMesh::from_parts(
            vec![types::Vertex::from_coords(1.0, 2.0, 3.0)],
            vec![],
        );
        let bounds = compute_bounding_box(&mesh).unwrap();
        assert_eq!(bounds.min_array(), [1.0, 2.0, 3.0]);
        assert_eq!(bounds.max_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_bounding_box_fails() {
        assert!(matches!(
            compute_bounding_box(&IndexedMesh::new()),
            Err(types::MeshError::EmptyMesh { .. })
        ));
        assert!(IndexedMesh::new().bounding_box().is_err());
    }

    #[test]
    fn unit_cube_bounds() {
        let bounds = types::unit_cube().bounding_box().unwrap();
        assert_eq!(bounds.min_array(), [0.0, 0.0, 0.0]);
        assert_eq!(bounds.max_array(), [1.0, 1.0, 1.0]);
    }
}

// =============================================================================
// TIER 2: Generation
// =============================================================================

mod tier2_generation {
    use super::*;

    #[test]
    fn budgets_are_exact() {
        let mesh = generate(25, 45).unwrap();
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.face_count(), 45);
        assert!(mesh.faces.iter().flatten().all(|&i| i < 25));
    }

    #[test]
    fn zero_budgets_fail() {
        assert!(matches!(
            generate(0, 3),
            Err(generate::GenerateError::InvalidBudget { .. })
        ));
        assert!(matches!(
            generate(3, 0),
            Err(generate::GenerateError::InvalidBudget { .. })
        ));
    }

    #[test]
    fn params_and_policies() {
        let params = GenerateParams::from_image_dimensions(320, 240)
            .with_degenerate_policy(DegeneratePolicy::Allow);
        assert_eq!(params.vertex_budget, 7_680);
        assert_eq!(params.face_budget, 13_824);

        let result =
            generate::generate_with(generate::RandomSource::seeded(1), &params).unwrap();
        assert_eq!(result.mesh.vertex_count(), 7_680);
    }
}

// =============================================================================
// TIER 3: Serialization
// =============================================================================

mod tier3_serialization {
    use super::*;

    #[test]
    fn every_format_serializes() {
        let mesh = generate_seeded(10, 12, 0).unwrap();
        for format in MeshFormat::ALL {
            let bytes = serialize(&mesh, format).unwrap();
            assert!(!bytes.is_empty(), "{format}");
        }
    }

    #[test]
    fn glb_is_unsupported() {
        assert!(matches!(
            "glb".parse::<MeshFormat>(),
            Err(io::IoError::UnsupportedFormat { .. })
        ));
        assert!(io::serialize_named(&types::unit_cube(), "glb").is_err());
    }

    #[test]
    fn empty_mesh_not_serialized() {
        assert!(matches!(
            serialize(&IndexedMesh::new(), MeshFormat::Obj),
            Err(io::IoError::Mesh(types::MeshError::EmptyMesh { .. }))
        ));
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.obj");
        save_mesh(&types::unit_cube(), &path).unwrap();
        let loaded = load_mesh(&path).unwrap();
        assert_eq!(loaded.faces, types::unit_cube().faces);
    }

    #[test]
    fn export_options() {
        let options = ExportOptions::compact().with_solid_name("part");
        let bytes = io::serialize_with(&types::unit_cube(), MeshFormat::Stl, &options).unwrap();
        assert_eq!(bytes.len(), 84 + 12 * 50);
    }
}

// =============================================================================
// TIER 4: Conversion Service
// =============================================================================

mod tier4_conversion {
    use super::*;

    #[test]
    fn in_memory_conversion() {
        let converter = Converter::new(ConvertConfig::in_memory());
        let request = ConversionRequest::new(8, 10)
            .with_format(FormatSelection::All)
            .with_seed(4);
        let response = converter.convert(&request).unwrap().into_response();

        assert_eq!(response.vertex_count, 8);
        assert_eq!(response.face_count, 10);
        assert_eq!(response.files.len(), 3);
        assert!(response.model_name.starts_with(convert::MODEL_NAME_PREFIX));
    }

    #[test]
    fn error_kinds() {
        let converter = Converter::new(ConvertConfig::in_memory());
        let err = converter
            .convert(&ConversionRequest::new(0, 1))
            .unwrap_err();
        assert_eq!(err.kind(), convert::ErrorKind::InvalidBudget);
    }

    #[test]
    fn file_size_formatting() {
        assert_eq!(convert::format_file_size(0), "0 B");
        assert_eq!(convert::format_file_size(2560), "2.5 KB");
    }
}

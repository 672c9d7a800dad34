//! The `convert` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use mesh_convert::{
    ConversionRequest, ConvertConfig, ConvertError, Converter, DEFAULT_OUTPUT_DIR, FormatSelection,
};
use mesh_generate::{DegeneratePolicy, GenerateParams};
use mesh_io::ExportOptions;

use crate::output;

/// Degenerate face handling, as a command line value.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateArg {
    /// Redraw faces that repeat an index
    #[default]
    Resample,
    /// Fail on the first degenerate face
    Reject,
    /// Keep degenerate faces
    Allow,
}

impl From<DegenerateArg> for DegeneratePolicy {
    fn from(arg: DegenerateArg) -> Self {
        match arg {
            DegenerateArg::Resample => Self::Resample,
            DegenerateArg::Reject => Self::Reject,
            DegenerateArg::Allow => Self::Allow,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Vertex budget
    #[arg(long, required_unless_present = "image_width")]
    pub vertices: Option<usize>,

    /// Face budget (default: 1.8 faces per vertex)
    #[arg(long, requires = "vertices")]
    pub faces: Option<usize>,

    /// Derive budgets from an image width in pixels
    #[arg(long, requires = "image_height", conflicts_with = "vertices")]
    pub image_width: Option<u32>,

    /// Derive budgets from an image height in pixels
    #[arg(long, requires = "image_width")]
    pub image_height: Option<u32>,

    /// Output format: obj, stl, ply or all
    #[arg(long, short, default_value = "obj")]
    pub format: String,

    /// Seed for reproducible geometry
    #[arg(long, env = "TETRA_SEED")]
    pub seed: Option<u64>,

    /// Degenerate face handling
    #[arg(long, value_enum, default_value_t = DegenerateArg::Resample)]
    pub degenerate: DegenerateArg,

    /// Print the response without writing artifacts
    #[arg(long)]
    pub no_write: bool,

    /// Write STL and PLY in binary with computed normals
    #[arg(long)]
    pub binary: bool,

    /// Solid name used in STL output
    #[arg(long)]
    pub solid_name: Option<String>,

    /// Artifact root directory
    #[arg(
        long = "out",
        short = 'o',
        env = "TETRA_OUTPUT_DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dir: PathBuf,
}

impl ConvertArgs {
    /// Build the request. Format errors surface as `UnsupportedFormat`.
    pub fn request(&self) -> Result<ConversionRequest, ConvertError> {
        let format: FormatSelection = self.format.parse()?;

        let request = match (self.vertices, self.image_width, self.image_height) {
            (Some(vertices), _, _) => {
                let faces = self
                    .faces
                    .unwrap_or_else(|| GenerateParams::face_budget_for(vertices));
                ConversionRequest::new(vertices, faces)
            }
            (None, Some(width), Some(height)) => {
                ConversionRequest::from_image_dimensions(width, height)
            }
            // clap enforces one of the two budget sources.
            _ => ConversionRequest::new(0, 0),
        };

        let request = request.with_format(format);
        Ok(match self.seed {
            Some(seed) => request.with_seed(seed),
            None => request,
        })
    }

    pub fn config(&self) -> ConvertConfig {
        let mut export = if self.binary {
            ExportOptions::compact()
        } else {
            ExportOptions::default()
        };
        if let Some(name) = &self.solid_name {
            export = export.with_solid_name(name);
        }

        ConvertConfig::new(&self.output_dir)
            .with_write_artifacts(!self.no_write)
            .with_degenerate_policy(self.degenerate.into())
            .with_export_options(export)
    }
}

pub fn run(args: &ConvertArgs) -> Result<()> {
    let request = args.request()?;
    let converter = Converter::new(args.config());
    let conversion = converter.convert(&request)?;
    output::print_json(&conversion.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mesh_convert::ErrorKind;
    use mesh_io::MeshFormat;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ConvertArgs,
    }

    fn parse(argv: &[&str]) -> ConvertArgs {
        let argv = std::iter::once("convert").chain(argv.iter().copied());
        Harness::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn faces_default_from_vertices() {
        let request = parse(&["--vertices", "10"]).request().unwrap();
        assert_eq!(request.vertex_budget, 10);
        assert_eq!(request.face_budget, 18);
        assert_eq!(request.format, FormatSelection::Single(MeshFormat::Obj));
    }

    #[test]
    fn explicit_budgets_and_seed() {
        let request = parse(&["--vertices", "4", "--faces", "2", "-f", "PLY", "--seed", "7"])
            .request()
            .unwrap();
        assert_eq!(request.face_budget, 2);
        assert_eq!(request.format, FormatSelection::Single(MeshFormat::Ply));
        assert_eq!(request.seed, Some(7));
    }

    #[test]
    fn image_dimensions_drive_budgets() {
        let request = parse(&["--image-width", "64", "--image-height", "48", "-f", "all"])
            .request()
            .unwrap();
        assert_eq!(request.vertex_budget, 307);
        assert_eq!(request.face_budget, 552);
        assert_eq!(request.format, FormatSelection::All);
    }

    #[test]
    fn budget_source_required() {
        assert!(Harness::try_parse_from(["convert"]).is_err());
        assert!(
            Harness::try_parse_from(["convert", "--vertices", "3", "--image-width", "9"]).is_err()
        );
    }

    #[test]
    fn unknown_format_is_unsupported() {
        let err = parse(&["--vertices", "3", "--format", "glb"])
            .request()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn config_follows_flags() {
        let config = parse(&[
            "--vertices",
            "3",
            "--no-write",
            "--degenerate",
            "reject",
            "--out",
            "/tmp/tetra",
        ])
        .config();
        assert!(!config.write_artifacts);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Reject);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/tetra"));
    }
}

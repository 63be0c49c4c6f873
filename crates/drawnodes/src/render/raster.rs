#![forbid(unsafe_code)]

//! PNG output through the external `openscad` binary.

use crate::render::{RenderedSection, sanitize_file_stem};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("`{0}` was not found; install OpenSCAD or set the program path")]
    ToolNotFound(String),
    #[error("openscad exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub program: PathBuf,
    pub colorscheme: String,
    /// Leave `<name>.scad` next to the PNG.
    pub keep_scad: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            program: PathBuf::from("openscad"),
            colorscheme: "Cornfield".to_string(),
            keep_scad: true,
        }
    }
}

/// Argument list for rendering `scad` into `png` with the section's camera.
pub fn openscad_args(
    section: &RenderedSection,
    scad: &Path,
    png: &Path,
    options: &RasterOptions,
) -> Vec<OsString> {
    vec![
        "-o".into(),
        png.into(),
        "--imgsize".into(),
        section.camera.imgsize_arg().into(),
        "--camera".into(),
        section.camera.openscad_arg().into(),
        "--autocenter".into(),
        "--colorscheme".into(),
        options.colorscheme.clone().into(),
        scad.into(),
    ]
}

/// Writes `<dir>/<name>.scad`, runs openscad on it and returns the PNG path.
pub fn render_png(
    section: &RenderedSection,
    dir: &Path,
    options: &RasterOptions,
) -> Result<PathBuf> {
    let stem = sanitize_file_stem(&section.name);
    let scad = dir.join(format!("{stem}.scad"));
    let png = dir.join(format!("{stem}.png"));
    std::fs::write(&scad, &section.scad)?;

    let args = openscad_args(section, &scad, &png, options);
    tracing::debug!(
        program = %options.program.display(),
        section = %section.name,
        camera = %section.camera.openscad_arg(),
        "running openscad"
    );
    let output = match Command::new(&options.program).args(&args).output() {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RasterError::ToolNotFound(
                options.program.display().to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    if !options.keep_scad {
        if let Err(e) = std::fs::remove_file(&scad) {
            tracing::warn!(error = %e, path = %scad.display(), "failed to remove scad file");
        }
    }

    if !output.status.success() {
        return Err(RasterError::ToolFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderOptions, render_sections};

    fn section() -> RenderedSection {
        let text = "=wire demo\n@imgsize=400,300\n@camera=10,20,300\n#\n|\nX\n=\n";
        render_sections(text, "nodes", &RenderOptions::default())
            .unwrap()
            .remove(0)
    }

    #[test]
    fn args_carry_camera_and_image_size() {
        let args = openscad_args(
            &section(),
            Path::new("wire-demo.scad"),
            Path::new("wire-demo.png"),
            &RasterOptions::default(),
        );
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-o",
                "wire-demo.png",
                "--imgsize",
                "400,300",
                "--camera",
                "10,20,300,10,20,0",
                "--autocenter",
                "--colorscheme",
                "Cornfield",
                "wire-demo.scad",
            ]
        );
    }

    #[test]
    fn missing_tool_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let options = RasterOptions {
            program: PathBuf::from("drawnodes-no-such-openscad"),
            ..RasterOptions::default()
        };
        let err = render_png(&section(), dir.path(), &options).unwrap_err();
        assert!(matches!(err, RasterError::ToolNotFound(_)), "{err}");
        assert!(dir.path().join("wire-demo.scad").exists());
    }
}

//! OpenSCAD script output.
//!
//! The script defines one module per primitive kind, wraps every color group in
//! `color(...) linear_extrude(...)` and calls `drawStuff()` at the end. No timestamps are
//! written, so the same scene always produces the same bytes.

use crate::Result;
use crate::primitive::{ColorGroup, Primitive, Scene};

const MODULES: &str = r#"// Number of sides for round things
$fn=31;
// Width as fraction of scale
wFrac=0.25;
// Unit length in drawing
scale=10;
// Height of text as fraction of scale
textFrac=0.75;
wf=1/2-wFrac/2;
hf=1/2;
module drawV(bx, ey, ll)
  translate (scale*[bx+wf,ey+1,0]) square([wFrac*scale,scale*ll]);
module drawH(bx, by, ll)
  translate (scale*[bx,by+wf,0])   square([scale*ll,wFrac*scale]);
module round2(radi, yfar) {
   circle(radi); translate([0,yfar,0]) circle(radi);
}
module drawNode(x,y, xfar) {
  ss=scale/4;  yf=scale/2;
  translate (scale*[x+1/4,y+1/4,0]) hull() {
      round2(ss,yf); translate([scale*(xfar-1/2),0,0]) round2(ss,yf);
  }
}
module drawComplement(x,y)
  translate (scale*[x+0.5,y+1+wFrac,0]) circle(d=2*wFrac*scale);
module drawChar(x,y,t)
  translate (scale*[x,y,0]) text(t, size=textFrac*scale);
module drawCorner(x,y,dx,dy)
  translate (scale*[x,y,0]) {
    intersection() {
      square(scale*[1,1], center=false);
      translate(scale*[dx,dy,0])
        difference() {
          circle(d=scale*(1+wFrac));
          circle(d=scale*(1-wFrac));
        }
      }
    }
"#;

/// Renders `scene` as a complete script. `name` only appears in the header comment.
pub fn to_scad(name: &str, scene: &Scene) -> Result<String> {
    let mut out = String::new();
    write_scad(&mut out, name, scene)?;
    Ok(out)
}

pub fn write_scad<W: std::fmt::Write>(out: &mut W, name: &str, scene: &Scene) -> Result<()> {
    writeln!(out, "// File {}, generated by drawnodes", one_line(name))?;
    out.write_str(MODULES)?;
    out.write_str("module drawStuff() {\n")?;
    for group in &scene.groups {
        write_group(out, group)?;
    }
    out.write_str("}\ndrawStuff();\n")?;
    Ok(())
}

fn write_group<W: std::fmt::Write>(out: &mut W, group: &ColorGroup) -> Result<()> {
    match &group.color {
        Some(color) => writeln!(
            out,
            "  color(c=\"{}\") linear_extrude(height={}) {{",
            escape(color),
            fmt(group.height)
        )?,
        None => writeln!(out, "  linear_extrude(height={}) {{", fmt(group.height))?,
    }
    for p in &group.primitives {
        write_primitive(out, p)?;
    }
    out.write_str("  }\n")?;
    Ok(())
}

fn write_primitive<W: std::fmt::Write>(out: &mut W, p: &Primitive) -> Result<()> {
    match p {
        Primitive::Arc { x, y, dx, dy } => writeln!(out, "    drawCorner({x}, {y}, {dx},{dy});")?,
        Primitive::HBar { x, y, len } => writeln!(out, "    drawH({x}, {y}, {len});")?,
        Primitive::VBar { x, y, len } => writeln!(out, "    drawV({x}, {y}, {len});")?,
        Primitive::Body { x, y, xfar } => writeln!(out, "    drawNode({x}, {y},{xfar});")?,
        Primitive::Glyph { x, y, text } => writeln!(
            out,
            "    drawChar({}, {}, \"{}\");",
            fmt(*x),
            fmt(*y),
            escape(text)
        )?,
        Primitive::Complement { x, y } => writeln!(out, "    drawComplement({x}, {y});")?,
    }
    Ok(())
}

/// OpenSCAD string-literal escaping.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

fn one_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    // Collapse float noise such as `3.3000000000000003` from the label offsets.
    let v = (v * 1e6).round() / 1e6;
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        let mut scene = Scene::new(3);
        scene.push(ColorGroup::colored("#A6CEE3", 1.0).with_primitives([
            Primitive::Arc {
                x: 0,
                y: 2,
                dx: 1,
                dy: 1,
            },
            Primitive::HBar { x: 1, y: 2, len: 2 },
            Primitive::VBar { x: 3, y: 2, len: 0 },
        ]));
        scene.push(ColorGroup::new(None, 1.2).with_primitives([Primitive::glyph(
            1.0 + 0.2,
            2.0 + 1.3,
            "\"q\\",
        )]));
        scene
    }

    #[test]
    fn scad_groups_and_primitives() {
        let text = to_scad("demo", &scene()).unwrap();
        assert!(text.starts_with("// File demo, generated by drawnodes\n"));
        assert!(text.contains(
            "  color(c=\"#A6CEE3\") linear_extrude(height=1) {\n    drawCorner(0, 2, 1,1);\n    drawH(1, 2, 2);\n    drawV(3, 2, 0);\n  }\n"
        ));
        assert!(text.contains(
            "  linear_extrude(height=1.2) {\n    drawChar(1.2, 3.3, \"\\\"q\\\\\");\n  }\n"
        ));
        assert!(text.ends_with("}\ndrawStuff();\n"));
    }

    #[test]
    fn scad_output_is_reproducible() {
        assert_eq!(
            to_scad("demo", &scene()).unwrap(),
            to_scad("demo", &scene()).unwrap()
        );
    }

    #[test]
    fn scad_number_formatting() {
        assert_eq!(fmt(3.0000000000000004), "3");
        assert_eq!(fmt(4.1), "4.1");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(f64::NAN), "0");
    }
}

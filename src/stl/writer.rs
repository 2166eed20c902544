use crate::error::ExportError;

use super::Facet;

/// Checks that a model name fits in the `solid <name>` line.
///
/// # Errors
///
/// Returns an error if the name is empty or contains whitespace.
pub fn validate_model_name(name: &str) -> Result<(), ExportError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ExportError::InvalidModelName(name.to_string()));
    }
    Ok(())
}

/// Appends the opening `solid` line.
pub fn write_header(out: &mut String, name: &str) {
    out.push_str(&format!("solid {name}\n"));
}

/// Appends one facet block, printing floats with `precision` fractional digits.
pub fn write_facet(out: &mut String, facet: &Facet, precision: usize) {
    let n = facet.normal;
    out.push_str(&format!(
        "  facet normal {:.p$} {:.p$} {:.p$}\n",
        n.x,
        n.y,
        n.z,
        p = precision
    ));
    out.push_str("    outer loop\n");
    for v in &facet.vertices {
        out.push_str(&format!(
            "      vertex {:.p$} {:.p$} {:.p$}\n",
            v.x,
            v.y,
            v.z,
            p = precision
        ));
    }
    out.push_str("    endloop\n");
    out.push_str("  endfacet\n");
}

/// Appends the closing `endsolid` line.
pub fn write_footer(out: &mut String, name: &str) {
    out.push_str(&format!("endsolid {name}\n"));
}
